//! Inspect or create the configuration file.

use steadycam_common::config::{config_file_path, AppConfig};

pub fn show(config: &AppConfig) -> anyhow::Result<()> {
    let path = config_file_path();
    println!(
        "# {} ({})",
        path.display(),
        if path.exists() { "loaded" } else { "defaults" }
    );
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}

pub fn init(force: bool) -> anyhow::Result<()> {
    let path = config_file_path();
    if path.exists() && !force {
        anyhow::bail!(
            "Config already exists at {} (use --force to overwrite)",
            path.display()
        );
    }

    let path = AppConfig::default()
        .save()
        .map_err(|e| anyhow::anyhow!("Failed to write config: {e}"))?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}
