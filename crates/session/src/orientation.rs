//! Latest-sample cell fed by an orientation source.
//!
//! The source publishes whenever the device reports; the session reads once
//! per frame. Nothing is queued: a burst of readings between two frames
//! collapses to the newest one.

use tokio::sync::watch;

use steadycam_common::error::{SteadycamError, SteadycamResult};
use steadycam_stabilizer::{OrientationReading, TiltSample};

/// Create a connected feed / cell pair, starting level.
pub fn orientation_channel() -> (OrientationFeed, LatestSample) {
    let (tx, rx) = watch::channel(TiltSample::ZERO);
    (OrientationFeed { tx }, LatestSample { rx: Some(rx) })
}

/// Write side, held by whatever receives device orientation events.
#[derive(Debug)]
pub struct OrientationFeed {
    tx: watch::Sender<TiltSample>,
}

impl OrientationFeed {
    /// Overwrite the latest sample.
    ///
    /// Fails once every [`LatestSample`] has been dropped, which tells the
    /// source it can stop listening.
    pub fn publish(&self, reading: OrientationReading) -> SteadycamResult<()> {
        self.tx
            .send(reading.to_tilt())
            .map_err(|_| SteadycamError::session("orientation cell dropped"))
    }

    /// Whether no session is reading anymore.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Read side, owned by the session.
#[derive(Debug, Clone)]
pub struct LatestSample {
    rx: Option<watch::Receiver<TiltSample>>,
}

impl LatestSample {
    /// Cell for hosts with no orientation sensor; always reads level.
    pub fn absent() -> Self {
        Self { rx: None }
    }

    /// The most recent sample. Keeps the last value if the feed is gone.
    pub fn current(&self) -> TiltSample {
        self.rx
            .as_ref()
            .map(|rx| *rx.borrow())
            .unwrap_or(TiltSample::ZERO)
    }

    /// Whether a sensor feed was ever attached.
    pub fn has_source(&self) -> bool {
        self.rx.is_some()
    }
}
