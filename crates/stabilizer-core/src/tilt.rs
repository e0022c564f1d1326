//! Device orientation readings.
//!
//! Hosts report three rotation angles in degrees. Only the two tilt axes
//! feed the estimator; `alpha` (compass heading) is carried but unused.

use serde::{Deserialize, Serialize};

/// A raw orientation reading as a host reports it.
///
/// Any axis may be missing; some hosts never report one at all.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct OrientationReading {
    /// Rotation around the Z axis, degrees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alpha: Option<f64>,
    /// Front/back tilt (X axis), degrees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beta: Option<f64>,
    /// Left/right tilt (Y axis), degrees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gamma: Option<f64>,
}

impl OrientationReading {
    /// Reading with all three axes present.
    pub fn new(alpha: f64, beta: f64, gamma: f64) -> Self {
        Self {
            alpha: Some(alpha),
            beta: Some(beta),
            gamma: Some(gamma),
        }
    }

    /// Reading carrying only the two tilt axes.
    pub fn tilt(beta: f64, gamma: f64) -> Self {
        Self {
            alpha: None,
            beta: Some(beta),
            gamma: Some(gamma),
        }
    }

    /// Collapse to the tilt axes, treating absent or non-finite values as 0.
    pub fn to_tilt(&self) -> TiltSample {
        TiltSample {
            beta: axis_or_zero(self.beta),
            gamma: axis_or_zero(self.gamma),
        }
    }
}

impl From<OrientationReading> for TiltSample {
    fn from(reading: OrientationReading) -> Self {
        reading.to_tilt()
    }
}

/// Immutable snapshot of the two tilt axes, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TiltSample {
    /// Front/back tilt.
    pub beta: f64,
    /// Left/right tilt.
    pub gamma: f64,
}

impl TiltSample {
    /// Level device, also used when no orientation source exists.
    pub const ZERO: TiltSample = TiltSample {
        beta: 0.0,
        gamma: 0.0,
    };

    pub fn new(beta: f64, gamma: f64) -> Self {
        Self { beta, gamma }
    }
}

fn axis_or_zero(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_axes_become_zero() {
        let reading = OrientationReading {
            alpha: Some(90.0),
            beta: None,
            gamma: Some(12.5),
        };
        assert_eq!(reading.to_tilt(), TiltSample::new(0.0, 12.5));
        assert_eq!(OrientationReading::default().to_tilt(), TiltSample::ZERO);
    }

    #[test]
    fn test_non_finite_axes_become_zero() {
        let reading = OrientationReading::tilt(f64::NAN, f64::INFINITY);
        assert_eq!(reading.to_tilt(), TiltSample::ZERO);
    }

    #[test]
    fn test_alpha_is_ignored() {
        let a = OrientationReading::new(10.0, 5.0, -3.0).to_tilt();
        let b = OrientationReading::new(270.0, 5.0, -3.0).to_tilt();
        assert_eq!(a, b);
    }

    #[test]
    fn test_partial_json_reading() {
        let reading: OrientationReading = serde_json::from_str(r#"{"gamma": 4.0}"#).unwrap();
        assert_eq!(reading.alpha, None);
        assert_eq!(TiltSample::from(reading), TiltSample::new(0.0, 4.0));
    }
}
