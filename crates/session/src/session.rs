//! Stabilization session management.

use serde::Serialize;

use steadycam_stabilizer::{Mode, Offset, OffsetEstimator, SurfaceTransform};

use crate::orientation::LatestSample;

/// Writes display transforms to a surface the presentation layer owns.
///
/// The session never looks inside a surface handle; it only passes it back.
pub trait TransformSink {
    /// Opaque handle to the preview surface.
    type Surface;

    /// Apply `transform` to `surface`.
    fn apply(&mut self, surface: &Self::Surface, transform: &SurfaceTransform);
}

/// State of a stabilization session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// Not ticking; history is empty.
    Idle,
    /// Ticking once per frame.
    Running,
}

/// Result of one frame tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// An offset was computed and written to the surface.
    Applied(Offset),
    /// The session is not (or no longer) running; schedule no more frames.
    Halted,
}

/// Drives an [`OffsetEstimator`] from the latest orientation sample and
/// writes the result to a sink once per frame.
pub struct StabilizationSession<K: TransformSink> {
    estimator: OffsetEstimator,
    latest: LatestSample,
    sink: K,
    surface: Option<K::Surface>,
    state: SessionState,
    frames: u64,
}

impl<K: TransformSink> StabilizationSession<K> {
    /// Create an idle session.
    pub fn new(mode: Mode, latest: LatestSample, sink: K) -> Self {
        if !latest.has_source() {
            tracing::warn!("No orientation source; offsets will stay at zero");
        }
        Self {
            estimator: OffsetEstimator::new(mode),
            latest,
            sink,
            surface: None,
            state: SessionState::Idle,
            frames: 0,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SessionState::Running
    }

    pub fn mode(&self) -> Mode {
        self.estimator.mode()
    }

    /// Frames applied over the session's lifetime.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Raw offsets currently averaged.
    pub fn history_len(&self) -> usize {
        self.estimator.history().len()
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut K {
        &mut self.sink
    }

    pub fn into_sink(self) -> K {
        self.sink
    }

    /// Start stabilizing `surface`.
    ///
    /// Returns `false` without changing anything when the mode is off or a
    /// surface is already being stabilized.
    pub fn stabilize(&mut self, surface: K::Surface) -> bool {
        if !self.mode().is_active() {
            tracing::debug!("Stabilization is off; not starting");
            return false;
        }
        if self.is_running() {
            return false;
        }

        tracing::info!(mode = %self.mode(), "Stabilization started");
        self.surface = Some(surface);
        self.state = SessionState::Running;
        true
    }

    /// Stop ticking and drop the history.
    pub fn stop(&mut self) {
        if self.is_running() {
            tracing::info!(frames = self.frames, "Stabilization stopped");
        }
        self.state = SessionState::Idle;
        self.surface = None;
        self.estimator.clear();
    }

    /// Stop, then put `surface` back to the neutral transform.
    pub fn reset(&mut self, surface: &K::Surface) {
        self.stop();
        self.sink.apply(surface, &SurfaceTransform::neutral());
    }

    /// Reset and immediately start again, e.g. after switching cameras.
    pub fn restart(&mut self, surface: K::Surface) -> bool {
        self.reset(&surface);
        self.stabilize(surface)
    }

    /// Change mode. A running session keeps running with fresh history;
    /// switching to off halts it on the next tick.
    pub fn set_mode(&mut self, mode: Mode) {
        let changed = self.estimator.set_mode(mode);
        if changed && self.is_running() {
            tracing::info!(mode = %mode, "Mode changed while running; history re-primed");
        }
    }

    /// Run one frame: read the latest tilt, compute, write.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.is_running() {
            return TickOutcome::Halted;
        }
        if !self.mode().is_active() {
            self.stop();
            return TickOutcome::Halted;
        }

        let sample = self.latest.current();
        let offset = self.estimator.compute(sample);
        if let Some(surface) = self.surface.as_ref() {
            self.sink.apply(surface, &SurfaceTransform::tracking(offset));
        }
        self.frames += 1;

        tracing::trace!(x = offset.x, y = offset.y, "Frame offset applied");
        TickOutcome::Applied(offset)
    }
}

/// Sink that keeps every write in memory, for headless hosts and tests.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    applied: Vec<(String, SurfaceTransform)>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `(surface, transform)` write, oldest first.
    pub fn applied(&self) -> &[(String, SurfaceTransform)] {
        &self.applied
    }

    pub fn last(&self) -> Option<&SurfaceTransform> {
        self.applied.last().map(|(_, t)| t)
    }
}

impl TransformSink for MemorySink {
    type Surface = String;

    fn apply(&mut self, surface: &String, transform: &SurfaceTransform) {
        self.applied.push((surface.clone(), *transform));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orientation::orientation_channel;
    use steadycam_stabilizer::OrientationReading;

    fn surface() -> String {
        "preview".to_string()
    }

    fn session_with_tilt(
        mode: Mode,
        beta: f64,
        gamma: f64,
    ) -> (
        StabilizationSession<MemorySink>,
        crate::orientation::OrientationFeed,
    ) {
        let (feed, latest) = orientation_channel();
        feed.publish(OrientationReading::tilt(beta, gamma)).unwrap();
        (StabilizationSession::new(mode, latest, MemorySink::new()), feed)
    }

    #[test]
    fn test_start_requires_active_mode() {
        let (mut session, _feed) = session_with_tilt(Mode::Off, 0.0, 0.0);
        assert!(!session.stabilize(surface()));
        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(session.tick(), TickOutcome::Halted);
        assert!(session.sink().applied().is_empty());
    }

    #[test]
    fn test_start_is_noop_when_running() {
        let (mut session, _feed) = session_with_tilt(Mode::Standard, 0.0, 10.0);
        assert!(session.stabilize(surface()));
        assert!(!session.stabilize("other".to_string()));

        session.tick();
        assert_eq!(session.sink().applied()[0].0, "preview");
    }

    #[test]
    fn test_tick_writes_tracking_transform() {
        let (mut session, _feed) = session_with_tilt(Mode::Standard, 0.0, 10.0);
        session.stabilize(surface());

        match session.tick() {
            TickOutcome::Applied(offset) => {
                assert!((offset.x + 2.5).abs() < 1e-9);
                assert_eq!(offset.y, 0.0);
            }
            TickOutcome::Halted => panic!("running session should apply"),
        }
        let last = session.sink().last().unwrap();
        assert_eq!(last.css_transition(), "transform 0.1s ease-out");
        assert_eq!(session.frames(), 1);
    }

    #[test]
    fn test_tick_reads_latest_sample_each_frame() {
        let (mut session, feed) = session_with_tilt(Mode::Standard, 0.0, 0.0);
        session.stabilize(surface());
        session.tick();

        feed.publish(OrientationReading::tilt(0.0, 20.0)).unwrap();
        match session.tick() {
            // (0.0 + 5.0) / 2
            TickOutcome::Applied(offset) => assert!((offset.x + 2.5).abs() < 1e-9),
            TickOutcome::Halted => panic!("running session should apply"),
        }
    }

    #[test]
    fn test_stop_clears_history() {
        let (mut session, _feed) = session_with_tilt(Mode::Auto, 5.0, 5.0);
        session.stabilize(surface());
        for _ in 0..4 {
            session.tick();
        }
        assert_eq!(session.history_len(), 4);

        session.stop();
        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(session.history_len(), 0);
        assert_eq!(session.tick(), TickOutcome::Halted);
    }

    #[test]
    fn test_reset_writes_neutral_from_any_state() {
        let (mut session, _feed) = session_with_tilt(Mode::Cinematic, 10.0, 20.0);

        session.reset(&surface());
        assert!(session.sink().last().unwrap().is_neutral());

        session.stabilize(surface());
        for _ in 0..3 {
            session.tick();
        }
        session.reset(&surface());

        let last = session.sink().last().unwrap();
        assert!(last.is_neutral());
        assert_eq!(last.css_transform(), "translate(-50%, -50%)");
        assert_eq!(session.history_len(), 0);
        assert!(!session.is_running());
    }

    #[test]
    fn test_mode_change_while_running_reprimes() {
        let (mut session, _feed) = session_with_tilt(Mode::Cinematic, 0.0, 10.0);
        session.stabilize(surface());
        for _ in 0..5 {
            session.tick();
        }

        session.set_mode(Mode::Standard);
        assert!(session.is_running());
        assert_eq!(session.history_len(), 0);

        session.tick();
        assert_eq!(session.history_len(), 1);
    }

    #[test]
    fn test_switching_off_halts_on_next_tick() {
        let (mut session, _feed) = session_with_tilt(Mode::Standard, 3.0, 3.0);
        session.stabilize(surface());
        session.tick();

        session.set_mode(Mode::Off);
        assert!(session.is_running());
        assert_eq!(session.tick(), TickOutcome::Halted);
        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(session.sink().applied().len(), 1);
    }

    #[test]
    fn test_restart_resets_then_runs() {
        let (mut session, _feed) = session_with_tilt(Mode::Auto, 1.0, 1.0);
        session.stabilize(surface());
        session.tick();

        assert!(session.restart("front".to_string()));
        assert!(session.is_running());
        assert_eq!(session.history_len(), 0);

        let (name, transform) = session.sink().applied().last().unwrap();
        assert_eq!(name, "front");
        assert!(transform.is_neutral());
    }

    #[test]
    fn test_absent_sensor_yields_zero_offsets() {
        let mut session =
            StabilizationSession::new(Mode::Standard, LatestSample::absent(), MemorySink::new());
        session.stabilize(surface());
        assert_eq!(session.tick(), TickOutcome::Applied(Offset::ZERO));

        let last = session.sink().last().unwrap();
        assert!(!last.is_neutral());
        assert_eq!(last.css_transition(), "transform 0.1s ease-out");
    }

    #[test]
    fn test_level_device_frames_stay_distinct_from_reset() {
        let (mut session, _feed) = session_with_tilt(Mode::Cinematic, 0.0, 0.0);
        session.stabilize(surface());
        session.tick();
        session.reset(&surface());

        let kinds: Vec<bool> = session
            .sink()
            .applied()
            .iter()
            .map(|(_, t)| t.is_neutral())
            .collect();
        assert_eq!(kinds, vec![false, true]);
        assert_ne!(session.sink().applied()[0].1, SurfaceTransform::neutral());
    }
}
