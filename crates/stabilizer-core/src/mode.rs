//! Stabilization modes and their constant presets.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use steadycam_common::error::SteadycamError;

/// User-selectable stabilization mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Gentle, heavily damped correction.
    #[default]
    Cinematic,
    /// Snappier, larger correction.
    Standard,
    /// Middle ground between cinematic and standard.
    Auto,
    /// No correction. Unrecognized names deserialize here too.
    #[serde(other)]
    Off,
}

/// Per-mode constants applied to raw tilt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModeParams {
    /// Multiplicative damping applied before averaging.
    pub smoothing: f64,
    /// Gain applied to raw tilt (degrees to pixels).
    pub sensitivity: f64,
}

impl ModeParams {
    /// Combined factor mapping one degree of tilt to pixels of raw offset.
    pub fn gain(&self) -> f64 {
        self.sensitivity * self.smoothing
    }
}

impl Mode {
    /// All modes in selector order.
    pub const ALL: [Mode; 4] = [Mode::Cinematic, Mode::Standard, Mode::Auto, Mode::Off];

    /// Constants for this mode, or `None` when stabilization is off.
    pub fn params(self) -> Option<ModeParams> {
        match self {
            Mode::Cinematic => Some(ModeParams {
                smoothing: 0.15,
                sensitivity: 0.8,
            }),
            Mode::Standard => Some(ModeParams {
                smoothing: 0.25,
                sensitivity: 1.0,
            }),
            Mode::Auto => Some(ModeParams {
                smoothing: 0.20,
                sensitivity: 0.9,
            }),
            Mode::Off => None,
        }
    }

    /// Whether this mode produces any offset at all.
    pub fn is_active(self) -> bool {
        self != Mode::Off
    }

    /// Machine name, as accepted by `FromStr`.
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Cinematic => "cinematic",
            Mode::Standard => "standard",
            Mode::Auto => "auto",
            Mode::Off => "off",
        }
    }

    /// Human-readable label for selectors and status lines.
    pub fn label(self) -> &'static str {
        match self {
            Mode::Cinematic => "Cinematic",
            Mode::Standard => "Standard",
            Mode::Auto => "Auto",
            Mode::Off => "Off",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = SteadycamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cinematic" => Ok(Mode::Cinematic),
            "standard" => Ok(Mode::Standard),
            "auto" => Ok(Mode::Auto),
            "off" => Ok(Mode::Off),
            _ => Err(SteadycamError::invalid_mode(s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_table() {
        let cinematic = Mode::Cinematic.params().unwrap();
        assert_eq!(cinematic.smoothing, 0.15);
        assert_eq!(cinematic.sensitivity, 0.8);

        let standard = Mode::Standard.params().unwrap();
        assert_eq!(standard.smoothing, 0.25);
        assert_eq!(standard.sensitivity, 1.0);

        let auto = Mode::Auto.params().unwrap();
        assert_eq!(auto.smoothing, 0.20);
        assert_eq!(auto.sensitivity, 0.9);

        assert!(Mode::Off.params().is_none());
    }

    #[test]
    fn test_standard_is_snappier_than_cinematic() {
        let standard = Mode::Standard.params().unwrap().gain();
        let auto = Mode::Auto.params().unwrap().gain();
        let cinematic = Mode::Cinematic.params().unwrap().gain();
        assert!(standard > auto && auto > cinematic);
    }

    #[test]
    fn test_parse_names() {
        for mode in Mode::ALL {
            assert_eq!(mode.as_str().parse::<Mode>().unwrap(), mode);
        }
        assert_eq!(" Standard ".parse::<Mode>().unwrap(), Mode::Standard);
        assert!("turbo".parse::<Mode>().is_err());
    }

    #[test]
    fn test_unknown_name_deserializes_as_off() {
        let mode: Mode = serde_json::from_str("\"turbo\"").unwrap();
        assert_eq!(mode, Mode::Off);

        let mode: Mode = serde_json::from_str("\"auto\"").unwrap();
        assert_eq!(mode, Mode::Auto);
    }

    #[test]
    fn test_default_is_cinematic() {
        assert_eq!(Mode::default(), Mode::Cinematic);
        assert_eq!(Mode::default().label(), "Cinematic");
    }
}
