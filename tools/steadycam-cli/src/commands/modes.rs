//! Show mode presets.

use steadycam_stabilizer::{Mode, HISTORY_CAPACITY};

pub fn run() -> anyhow::Result<()> {
    println!("Stabilization modes (history: {HISTORY_CAPACITY} samples)");
    println!("{}", "=".repeat(50));
    println!(
        "{:<10} {:>10} {:>12} {:>12}",
        "mode", "smoothing", "sensitivity", "px/degree"
    );

    for mode in Mode::ALL {
        match mode.params() {
            Some(p) => println!(
                "{:<10} {:>10.2} {:>12.2} {:>12.3}",
                mode.as_str(),
                p.smoothing,
                p.sensitivity,
                p.gain()
            ),
            None => println!("{:<10} {:>10} {:>12} {:>12}", mode.as_str(), "-", "-", "-"),
        }
    }

    Ok(())
}
