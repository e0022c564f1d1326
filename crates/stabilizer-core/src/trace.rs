//! Recorded orientation traces.
//!
//! A trace is JSONL: one timestamped [`OrientationReading`] per line, with
//! `t` in milliseconds since the first reading. Blank lines and lines
//! starting with `#` are ignored so traces can be annotated by hand.

use serde::{Deserialize, Serialize};
use steadycam_common::error::{SteadycamError, SteadycamResult};

use crate::tilt::OrientationReading;

/// One line of a trace.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraceSample {
    /// Milliseconds since trace start.
    #[serde(rename = "t")]
    pub timestamp_ms: u64,

    #[serde(flatten)]
    pub reading: OrientationReading,
}

/// Parse a JSONL trace. Timestamps must not go backwards.
pub fn parse_trace(jsonl: &str) -> SteadycamResult<Vec<TraceSample>> {
    let mut samples: Vec<TraceSample> = Vec::new();

    for (index, line) in jsonl.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line_no = index + 1;
        let sample: TraceSample =
            serde_json::from_str(line).map_err(|e| SteadycamError::trace(line_no, e.to_string()))?;

        if let Some(prev) = samples.last() {
            if sample.timestamp_ms < prev.timestamp_ms {
                return Err(SteadycamError::trace(
                    line_no,
                    format!(
                        "timestamp {} is earlier than previous {}",
                        sample.timestamp_ms, prev.timestamp_ms
                    ),
                ));
            }
        }
        samples.push(sample);
    }

    tracing::debug!(samples = samples.len(), "Parsed orientation trace");
    Ok(samples)
}

/// Serialize samples to JSONL.
pub fn serialize_trace(samples: &[TraceSample]) -> SteadycamResult<String> {
    let mut output = String::new();
    for sample in samples {
        output.push_str(&serde_json::to_string(sample)?);
        output.push('\n');
    }
    Ok(output)
}

/// Read and parse a trace file.
pub fn load_trace(path: &std::path::Path) -> SteadycamResult<Vec<TraceSample>> {
    if !path.exists() {
        return Err(SteadycamError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    parse_trace(&content)
}
