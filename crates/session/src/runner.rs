//! Frame loop driving a session.
//!
//! Commands and frame ticks are handled on one task, so the session is
//! never touched concurrently. Frames are only awaited while the session
//! is running; an idle session costs nothing but the command wait.

use std::time::Duration;

use serde::Serialize;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

use steadycam_stabilizer::Mode;

use crate::session::{StabilizationSession, TickOutcome, TransformSink};

/// Control messages from the presentation layer.
#[derive(Debug)]
pub enum SessionCommand<S> {
    Stabilize(S),
    SetMode(Mode),
    Stop,
    Reset(S),
    Restart(S),
}

/// Counters collected over one run of the loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FrameLoopReport {
    /// Frames that produced an offset.
    pub frames: u64,
    /// Commands handled.
    pub commands: u64,
    /// Times the loop stopped scheduling frames because the mode went off.
    pub halts: u64,
}

/// Run until the command channel closes, then hand the session back.
///
/// Frames follow `frame_interval` on a best-effort basis: late ticks are
/// skipped rather than bunched up.
pub async fn run_frame_loop<K>(
    mut session: StabilizationSession<K>,
    frame_interval: Duration,
    mut commands: mpsc::Receiver<SessionCommand<K::Surface>>,
) -> (StabilizationSession<K>, FrameLoopReport)
where
    K: TransformSink,
{
    let mut frames = tokio::time::interval(frame_interval.max(Duration::from_millis(1)));
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut report = FrameLoopReport::default();
    tracing::debug!(?frame_interval, "Frame loop started");

    loop {
        tokio::select! {
            biased;

            command = commands.recv() => match command {
                Some(command) => {
                    report.commands += 1;
                    handle_command(&mut session, command);
                }
                None => break,
            },

            _ = frames.tick(), if session.is_running() => match session.tick() {
                TickOutcome::Applied(_) => report.frames += 1,
                TickOutcome::Halted => {
                    report.halts += 1;
                    tracing::info!("Stabilization halted; frame loop idle");
                }
            },
        }
    }

    tracing::debug!(
        frames = report.frames,
        commands = report.commands,
        "Frame loop finished"
    );
    (session, report)
}

fn handle_command<K: TransformSink>(
    session: &mut StabilizationSession<K>,
    command: SessionCommand<K::Surface>,
) {
    match command {
        SessionCommand::Stabilize(surface) => {
            session.stabilize(surface);
        }
        SessionCommand::SetMode(mode) => session.set_mode(mode),
        SessionCommand::Stop => session.stop(),
        SessionCommand::Reset(surface) => session.reset(&surface),
        SessionCommand::Restart(surface) => {
            session.restart(surface);
        }
    }
}
