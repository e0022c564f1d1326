//! Display instructions handed to the presentation layer.
//!
//! The preview surface is centered with `translate(-50%, -50%)`; tracking
//! offsets are added on top of that in pixels.

use serde::{Deserialize, Serialize};

use crate::estimator::Offset;

/// Easing applied while the surface follows live offsets (ms).
pub const TRACKING_TRANSITION_MS: u32 = 100;

/// Easing applied when the surface settles back to center (ms).
pub const SETTLE_TRANSITION_MS: u32 = 300;

/// Whether a transform follows live tilt or parks the surface at center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformKind {
    Tracking,
    Neutral,
}

/// A transform for the preview surface plus its transition timing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceTransform {
    pub kind: TransformKind,
    pub offset: Offset,
    pub transition_ms: u32,
}

impl SurfaceTransform {
    /// Transform that follows a live offset.
    pub fn tracking(offset: Offset) -> Self {
        Self {
            kind: TransformKind::Tracking,
            offset,
            transition_ms: TRACKING_TRANSITION_MS,
        }
    }

    /// Centered transform with no offset.
    pub fn neutral() -> Self {
        Self {
            kind: TransformKind::Neutral,
            offset: Offset::ZERO,
            transition_ms: SETTLE_TRANSITION_MS,
        }
    }

    /// Whether this is the reset transform. A tracking frame with a zero
    /// offset is still tracking.
    pub fn is_neutral(&self) -> bool {
        self.kind == TransformKind::Neutral
    }

    /// CSS `transform` value.
    pub fn css_transform(&self) -> String {
        let mut css = if self.is_neutral() {
            "translate(-50%, -50%)".to_string()
        } else {
            format!(
                "translate(calc(-50% + {}px), calc(-50% + {}px))",
                px(self.offset.x),
                px(self.offset.y)
            )
        };
        if self.offset.rotation != 0.0 {
            css.push_str(&format!(" rotate({}deg)", px(self.offset.rotation)));
        }
        css
    }

    /// CSS `transition` value.
    pub fn css_transition(&self) -> String {
        format!(
            "transform {}s ease-out",
            self.transition_ms as f64 / 1000.0
        )
    }
}

// Two decimals, with negative zero folded into zero.
fn px(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    format!("{:.2}", rounded + 0.0)
}
