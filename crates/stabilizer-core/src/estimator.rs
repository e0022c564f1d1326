//! Counter-movement offset estimation.
//!
//! Each raw tilt reading is scaled by the mode's sensitivity and smoothing
//! constants, pushed into a short FIFO history, and the history mean is
//! negated so the surface moves against the detected tilt.
//!
//! There is no high-pass stage: a sustained tilt holds a sustained offset
//! instead of drifting back to center.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::mode::Mode;
use crate::tilt::TiltSample;

/// Number of raw offsets averaged per output.
pub const HISTORY_CAPACITY: usize = 10;

/// Per-tick display offset, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
    /// Rotation in degrees. Always 0; kept so sinks can already consume it.
    pub rotation: f64,
}

impl Offset {
    pub const ZERO: Offset = Offset {
        x: 0.0,
        y: 0.0,
        rotation: 0.0,
    };

    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            rotation: 0.0,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0 && self.rotation == 0.0
    }
}

/// Bounded FIFO of raw `(x, y)` offsets, oldest first.
#[derive(Debug, Clone)]
pub struct HistoryBuffer {
    entries: VecDeque<(f64, f64)>,
    capacity: usize,
}

impl Default for HistoryBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryBuffer {
    /// Empty buffer holding at most [`HISTORY_CAPACITY`] entries.
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(HISTORY_CAPACITY + 1),
            capacity: HISTORY_CAPACITY,
        }
    }

    /// Append a raw offset, evicting the oldest entry once over capacity.
    pub fn push(&mut self, x: f64, y: f64) {
        self.entries.push_back((x, y));
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    /// Mean of all stored entries, or `None` when empty.
    pub fn mean(&self) -> Option<(f64, f64)> {
        if self.entries.is_empty() {
            return None;
        }
        let n = self.entries.len() as f64;
        let (sum_x, sum_y) = self
            .entries
            .iter()
            .fold((0.0, 0.0), |(sx, sy), &(x, y)| (sx + x, sy + y));
        Some((sum_x / n, sum_y / n))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Entries from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.entries.iter().copied()
    }
}

/// Compute the smoothed counter-movement offset for one tilt sample.
///
/// With `Mode::Off` this returns [`Offset::ZERO`] and leaves `history` alone.
pub fn compute_offset(sample: TiltSample, mode: Mode, history: &mut HistoryBuffer) -> Offset {
    let Some(params) = mode.params() else {
        return Offset::ZERO;
    };

    let raw_x = sample.gamma * params.sensitivity * params.smoothing;
    let raw_y = sample.beta * params.sensitivity * params.smoothing;
    history.push(raw_x, raw_y);

    let (avg_x, avg_y) = history.mean().unwrap_or((raw_x, raw_y));
    Offset::new(-avg_x, -avg_y)
}

/// Estimator state: the selected mode and the history it owns.
#[derive(Debug, Clone, Default)]
pub struct OffsetEstimator {
    mode: Mode,
    history: HistoryBuffer,
}

impl OffsetEstimator {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            history: HistoryBuffer::new(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Switch mode. History is dropped on an actual change so offsets
    /// computed under different constants are never averaged together.
    ///
    /// Returns `true` if the mode changed.
    pub fn set_mode(&mut self, mode: Mode) -> bool {
        if mode == self.mode {
            return false;
        }
        tracing::debug!(from = %self.mode, to = %mode, "Stabilization mode changed");
        self.mode = mode;
        self.history.clear();
        true
    }

    /// Compute the offset for `sample` under the current mode.
    pub fn compute(&mut self, sample: TiltSample) -> Offset {
        compute_offset(sample, self.mode, &mut self.history)
    }

    pub fn history(&self) -> &HistoryBuffer {
        &self.history
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }
}
