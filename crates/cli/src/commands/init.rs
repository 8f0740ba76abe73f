//! `handoff init` — Print or write a starter configuration.

use handoff_config::AppConfig;
use std::path::Path;

pub fn run(write: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !write {
        print!("{}", AppConfig::default_toml());
        return Ok(());
    }

    let config_path = AppConfig::config_dir().join("config.toml");
    write_starter(&config_path)?;
    println!("✅ Created {}", config_path.display());
    Ok(())
}

/// Write the starter config to `path`, refusing to overwrite.
fn write_starter(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if path.exists() {
        return Err(format!("{} already exists", path.display()).into());
    }

    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    std::fs::write(path, AppConfig::default_toml())?;
    tracing::info!("Wrote starter config to {}", path.display());
    Ok(())
}
