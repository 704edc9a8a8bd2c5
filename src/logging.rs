use anyhow::{Context, Result};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// Default log location; stdout belongs to the game while it runs
pub fn default_log_path() -> Result<PathBuf> {
    let dir = dirs::data_local_dir()
        .with_context(|| "Failed to determine data directory")?
        .join("tilesnake");

    Ok(dir.join("tilesnake.log"))
}

/// Route the `log` macros to a file, truncating whatever was there
pub fn init(path: &Path, verbose: bool) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create log directory: {:?}", dir))?;
    }

    let file = File::create(path)
        .with_context(|| format!("Failed to create log file: {:?}", path))?;

    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    WriteLogger::init(level, ConfigBuilder::new().build(), file)
        .with_context(|| "Failed to initialize logger")?;

    Ok(())
}
