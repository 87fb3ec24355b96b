//! `init`: write a config file and create the storage directory

use crate::models::TutorConfig;
use crate::{Context, Result};
use colored::Colorize;
use std::path::Path;

/// What `init` did with the config file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    Created,
    Overwritten,
    AlreadyExists,
}

/// Write `config` to `config_path` and create its storage directory.
///
/// An existing config file is left alone unless `force` is set.
pub fn init(config: &TutorConfig, config_path: &Path, force: bool) -> Result<InitOutcome> {
    let existed = config_path.exists();
    if existed && !force {
        return Ok(InitOutcome::AlreadyExists);
    }

    config
        .save(config_path)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    std::fs::create_dir_all(&config.storage_dir)
        .with_context(|| format!("Failed to create {}", config.storage_dir.display()))?;

    Ok(if existed {
        InitOutcome::Overwritten
    } else {
        InitOutcome::Created
    })
}

pub fn run(config: &TutorConfig, config_path: &Path, force: bool) -> Result<()> {
    match init(config, config_path, force)? {
        InitOutcome::AlreadyExists => {
            println!(
                "{}",
                format!("⚠️  {} already exists", config_path.display()).yellow()
            );
            println!("   Run with --force to overwrite");
        }
        outcome => {
            let verb = if outcome == InitOutcome::Overwritten {
                "Rewrote"
            } else {
                "Created"
            };
            println!("{}", format!("🚀 {} {}", verb, config_path.display()).green());
            println!("   Storage: {}", config.storage_dir.display());
        }
    }

    Ok(())
}
