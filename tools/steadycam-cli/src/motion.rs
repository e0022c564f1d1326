//! Synthetic device motion for simulations.
//!
//! Deterministic waveforms, so repeated runs print the same offsets.

use std::f64::consts::TAU;

use steadycam_stabilizer::OrientationReading;

/// Shape of the simulated hand motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum MotionKind {
    /// Device held at a constant tilt.
    Steady,
    /// Fast hand tremor around level.
    Shake,
    /// Slow walking sway.
    Sway,
}

/// Orientation at `t_secs` for the given motion and peak tilt (degrees).
pub fn reading_at(kind: MotionKind, amplitude: f64, t_secs: f64) -> OrientationReading {
    let (beta, gamma) = match kind {
        MotionKind::Steady => (amplitude * 0.5, amplitude),
        MotionKind::Shake => (
            amplitude * (0.6 * (TAU * 7.0 * t_secs).sin() + 0.4 * (TAU * 11.0 * t_secs).cos()),
            amplitude * (0.7 * (TAU * 9.0 * t_secs).cos() + 0.3 * (TAU * 4.0 * t_secs).sin()),
        ),
        MotionKind::Sway => (
            amplitude * 0.3 * (TAU * 1.0 * t_secs).sin(),
            amplitude * (TAU * 0.5 * t_secs).sin(),
        ),
    };
    OrientationReading {
        alpha: Some((t_secs * 15.0) % 360.0),
        beta: Some(beta),
        gamma: Some(gamma),
    }
}
