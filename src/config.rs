// File: src/config.rs
use crate::error::{Result, TajweedError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// `surah|ayah|text` lines the annotation offsets were computed against.
    pub text_path: PathBuf,
    /// JSON array of `{surah, ayah, annotations}` records.
    pub annotations_path: PathBuf,
    pub snapshot_path: Option<PathBuf>,
    pub log_path: PathBuf,
    pub log_level: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            text_path: PathBuf::from("data/quran-uthmani.txt"),
            annotations_path: PathBuf::from("data/tajweed-cpfair.json"),
            snapshot_path: None,
            log_path: std::env::temp_dir().join("tajweed_engine.log"),
            log_level: "info".to_string(),
        }
    }
}

impl EngineConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let config: EngineConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.level_filter().map(|_| ())
    }

    pub fn level_filter(&self) -> Result<log::LevelFilter> {
        self.log_level
            .parse()
            .map_err(|_| TajweedError::Config(format!("unknown log level '{}'", self.log_level)))
    }
}
