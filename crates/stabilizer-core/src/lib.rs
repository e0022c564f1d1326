//! Steadycam Stabilizer Core
//!
//! Turns device tilt into a counter-movement offset for a preview surface:
//! - **Modes:** fixed smoothing/sensitivity presets
//! - **Estimation:** damped tilt averaged over a short history
//! - **Transforms:** display instructions for the presentation layer
//! - **Traces:** recorded orientation streams in JSONL
//!
//! This crate is pure computation. There is no frame-level motion
//! compensation here: the offset is a positional shift of the whole surface.

pub mod estimator;
pub mod mode;
pub mod tilt;
pub mod trace;
pub mod transform;

pub use estimator::{compute_offset, HistoryBuffer, Offset, OffsetEstimator, HISTORY_CAPACITY};
pub use mode::{Mode, ModeParams};
pub use tilt::{OrientationReading, TiltSample};
pub use transform::{SurfaceTransform, TransformKind};
