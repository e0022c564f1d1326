//! Run a stabilization session against simulated device motion.

use std::path::PathBuf;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::mpsc;

use steadycam_common::clock::RecordingClock;
use steadycam_common::config::AppConfig;
use steadycam_session::{
    orientation_channel, run_frame_loop, LatestSample, OrientationFeed, SessionCommand,
    StabilizationSession, TransformSink,
};
use steadycam_stabilizer::trace::{load_trace, TraceSample};
use steadycam_stabilizer::{Mode, Offset, SurfaceTransform, TransformKind};

use crate::motion::{reading_at, MotionKind};

const SURFACE: &str = "preview";

/// Where simulated orientation comes from.
enum SensorSource {
    Synthetic { kind: MotionKind, amplitude: f64 },
    Trace(Vec<TraceSample>),
}

#[allow(clippy::too_many_arguments)]
pub async fn run(
    config: &AppConfig,
    mode: Option<String>,
    motion: MotionKind,
    trace: Option<PathBuf>,
    amplitude: f64,
    duration_secs: f64,
    fps: Option<u32>,
    sensor_hz: Option<u32>,
    no_sensor: bool,
    json: bool,
) -> anyhow::Result<()> {
    let mode: Mode = mode
        .as_deref()
        .unwrap_or(config.stabilization.mode.as_str())
        .parse()?;
    let fps = fps.unwrap_or(config.stabilization.frame_rate_hz);
    let sensor_hz = sensor_hz.unwrap_or(config.stabilization.sensor_rate_hz);
    if fps == 0 || sensor_hz == 0 {
        anyhow::bail!("Frame and sensor rates must be greater than zero");
    }
    let duration = run_duration(duration_secs)?;

    let source = match trace {
        Some(path) => {
            let samples = load_trace(&path)
                .map_err(|e| anyhow::anyhow!("Failed to load trace {}: {e}", path.display()))?;
            if !json {
                println!("Replaying {} readings from {}", samples.len(), path.display());
            }
            SensorSource::Trace(samples)
        }
        None => SensorSource::Synthetic {
            kind: motion,
            amplitude,
        },
    };

    let (feed, latest) = if no_sensor {
        (None, LatestSample::absent())
    } else {
        let (feed, latest) = orientation_channel();
        (Some(feed), latest)
    };

    if !json {
        println!(
            "Simulating {} stabilization for {duration_secs}s ({fps} fps, sensor {})",
            mode.label(),
            if no_sensor {
                "absent".to_string()
            } else {
                format!("{sensor_hz} Hz")
            }
        );
    }

    let clock = RecordingClock::start();
    let session = StabilizationSession::new(mode, latest, ConsoleSink::new(json));
    let frame_interval = Duration::from_secs_f64(1.0 / fps as f64);
    let sensor_interval = Duration::from_secs_f64(1.0 / sensor_hz as f64);

    let (tx, rx) = mpsc::channel(16);
    let frame_loop = tokio::spawn(run_frame_loop(session, frame_interval, rx));
    let sensor = feed.map(|feed| tokio::spawn(run_sensor(feed, source, sensor_interval)));

    tx.send(SessionCommand::Stabilize(SURFACE.to_string())).await?;
    tokio::time::sleep(duration).await;
    tx.send(SessionCommand::Reset(SURFACE.to_string())).await?;
    drop(tx);

    let (session, report) = frame_loop.await?;
    if let Some(sensor) = sensor {
        sensor.abort();
    }

    let sink = session.into_sink();
    let summary = Summary {
        mode,
        frames: report.frames,
        elapsed: clock.elapsed_label(),
        tracking_writes: sink.tracking_writes,
        final_offset: sink.last_tracking,
        peak_offset_px: sink.peak_px,
    };

    if json {
        println!("{}", serde_json::to_string(&summary)?);
        return Ok(());
    }

    println!();
    println!("Summary:");
    println!("  Mode: {}", summary.mode.label());
    println!("  Frames: {}", summary.frames);
    println!("  Tracking writes: {}", summary.tracking_writes);
    println!("  Elapsed: {}", summary.elapsed);
    match summary.final_offset {
        Some(offset) => println!("  Final offset: x={:.2} y={:.2}", offset.x, offset.y),
        None => println!("  Stabilization is off; no frames were produced."),
    }
    println!("  Peak offset: {:.2}px", summary.peak_offset_px);

    Ok(())
}

async fn run_sensor(feed: OrientationFeed, source: SensorSource, interval: Duration) {
    let start = tokio::time::Instant::now();
    match source {
        SensorSource::Synthetic { kind, amplitude } => {
            let mut ticker = tokio::time::interval(interval.max(Duration::from_millis(1)));
            loop {
                ticker.tick().await;
                let t = start.elapsed().as_secs_f64();
                if feed.publish(reading_at(kind, amplitude, t)).is_err() {
                    break;
                }
            }
        }
        SensorSource::Trace(samples) => {
            for sample in samples {
                tokio::time::sleep_until(start + Duration::from_millis(sample.timestamp_ms)).await;
                if feed.publish(sample.reading).is_err() {
                    break;
                }
            }
            tracing::debug!("Trace exhausted; holding last reading");
        }
    }
}

/// Validate `--duration-secs`.
fn run_duration(secs: f64) -> anyhow::Result<Duration> {
    if secs <= 0.0 {
        anyhow::bail!("Duration must be a positive number of seconds");
    }
    Duration::try_from_secs_f64(secs)
        .map_err(|e| anyhow::anyhow!("Invalid duration {secs}s: {e}"))
}

#[derive(Serialize)]
struct Summary {
    mode: Mode,
    frames: u64,
    tracking_writes: u64,
    elapsed: String,
    final_offset: Option<Offset>,
    peak_offset_px: f64,
}

#[derive(Serialize)]
struct FrameLine<'a> {
    write: u64,
    surface: &'a str,
    x: f64,
    y: f64,
    transform: String,
    transition: String,
}

/// Prints each transform as the presentation layer would receive it.
struct ConsoleSink {
    json: bool,
    writes: u64,
    tracking_writes: u64,
    last_tracking: Option<Offset>,
    peak_px: f64,
}

impl ConsoleSink {
    fn new(json: bool) -> Self {
        Self {
            json,
            writes: 0,
            tracking_writes: 0,
            last_tracking: None,
            peak_px: 0.0,
        }
    }
}

impl TransformSink for ConsoleSink {
    type Surface = String;

    fn apply(&mut self, surface: &String, transform: &SurfaceTransform) {
        self.writes += 1;
        if transform.kind == TransformKind::Tracking {
            let offset = transform.offset;
            self.tracking_writes += 1;
            self.last_tracking = Some(offset);
            self.peak_px = self.peak_px.max(offset.x.hypot(offset.y));
        }

        if self.json {
            let line = FrameLine {
                write: self.writes,
                surface,
                x: transform.offset.x,
                y: transform.offset.y,
                transform: transform.css_transform(),
                transition: transform.css_transition(),
            };
            match serde_json::to_string(&line) {
                Ok(s) => println!("{s}"),
                Err(e) => tracing::warn!("Failed to encode frame: {e}"),
            }
        } else {
            println!(
                "{:>5}  {:<8} x={:>7.2} y={:>7.2}  {}",
                self.writes,
                surface,
                transform.offset.x,
                transform.offset.y,
                transform.css_transform()
            );
        }
    }
}
