//! Steadycam Session
//!
//! Connects an orientation source to a preview surface. The session owns
//! the estimator and the latest tilt reading; a frame loop ticks it once
//! per display refresh and hands each transform to a [`TransformSink`].
//!
//! ```text
//!  orientation feed ──watch──▶ LatestSample
//!                                   │ read once per tick
//!  commands ──mpsc──▶ frame loop ──▶ StabilizationSession ──▶ TransformSink
//! ```

pub mod orientation;
pub mod runner;
pub mod session;

pub use orientation::{orientation_channel, LatestSample, OrientationFeed};
pub use runner::{run_frame_loop, FrameLoopReport, SessionCommand};
pub use session::*;
