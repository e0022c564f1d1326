//! Clock and timer utilities.
//!
//! A recording is anchored to a monotonic epoch captured when it starts.
//! The elapsed time is shown to the user as an `MM:SS` timer.

use std::time::Instant;

/// A recording clock that provides monotonic timestamps relative to
/// a fixed epoch (the moment recording started).
#[derive(Debug, Clone)]
pub struct RecordingClock {
    /// The instant recording started.
    epoch: Instant,

    /// Wall-clock time at epoch (RFC 3339 string).
    epoch_wall: String,
}

impl RecordingClock {
    /// Create a new recording clock anchored to now.
    pub fn start() -> Self {
        Self {
            epoch: Instant::now(),
            epoch_wall: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Get milliseconds elapsed since recording start.
    pub fn elapsed_ms(&self) -> u64 {
        self.epoch.elapsed().as_millis() as u64
    }

    /// Get seconds elapsed since recording start.
    pub fn elapsed_secs(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64()
    }

    /// Wall-clock time at recording start.
    pub fn epoch_wall(&self) -> &str {
        &self.epoch_wall
    }

    /// Elapsed time formatted as the on-screen recording timer.
    pub fn elapsed_label(&self) -> String {
        format_mm_ss(self.epoch.elapsed().as_secs())
    }
}

/// Format whole seconds as `MM:SS`.
///
/// Minutes are not wrapped into hours, so an hour-long take reads `60:00`.
pub fn format_mm_ss(total_secs: u64) -> String {
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_elapsed() {
        let clock = RecordingClock::start();
        assert!(clock.elapsed_ms() < 1_000);
        assert_eq!(clock.elapsed_label(), "00:00");
        assert!(!clock.epoch_wall().is_empty());
    }

    #[test]
    fn test_format_mm_ss() {
        assert_eq!(format_mm_ss(0), "00:00");
        assert_eq!(format_mm_ss(9), "00:09");
        assert_eq!(format_mm_ss(75), "01:15");
        assert_eq!(format_mm_ss(3600), "60:00");
    }
}
