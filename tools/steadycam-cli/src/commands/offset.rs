//! Compute offsets for explicit samples.

use steadycam_stabilizer::{Mode, OffsetEstimator, TiltSample};

pub fn run(mode: String, samples: Vec<String>) -> anyhow::Result<()> {
    let mode: Mode = mode.parse()?;
    let samples = samples
        .iter()
        .map(|s| parse_sample(s))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let mut estimator = OffsetEstimator::new(mode);

    println!("Mode: {}", mode.label());
    println!(
        "{:>3}  {:>8} {:>8}  {:>8} {:>8}  {:>7}",
        "#", "gamma", "beta", "x", "y", "history"
    );
    for (i, sample) in samples.into_iter().enumerate() {
        let offset = estimator.compute(sample);
        println!(
            "{:>3}  {:>8.2} {:>8.2}  {:>8.3} {:>8.3}  {:>7}",
            i + 1,
            sample.gamma,
            sample.beta,
            offset.x + 0.0,
            offset.y + 0.0,
            estimator.history().len()
        );
    }

    Ok(())
}

/// Parse `GAMMA,BETA`.
fn parse_sample(text: &str) -> anyhow::Result<TiltSample> {
    let (gamma, beta) = text
        .split_once(',')
        .ok_or_else(|| anyhow::anyhow!("Expected GAMMA,BETA but got '{text}'"))?;
    let gamma: f64 = gamma
        .trim()
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid gamma in '{text}': {e}"))?;
    let beta: f64 = beta
        .trim()
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid beta in '{text}': {e}"))?;
    Ok(TiltSample::new(beta, gamma))
}
