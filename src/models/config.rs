use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file name, looked up in the current directory
pub const CONFIG_FILE: &str = "tutorcore.toml";

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TutorConfig {
    /// Directory holding one JSON blob per store
    #[serde(default = "default_storage_dir")]
    pub storage_dir: PathBuf,

    /// Log filter used when RUST_LOG is not set (e.g. "warn", "tutorcore=debug")
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_storage_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("tutorcore"))
        .unwrap_or_else(|| PathBuf::from(".tutorcore"))
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for TutorConfig {
    fn default() -> Self {
        Self {
            storage_dir: default_storage_dir(),
            log_level: default_log_level(),
        }
    }
}

impl TutorConfig {
    /// Load config from `path`, or defaults when the file does not exist
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: TutorConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save config to `path`
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
