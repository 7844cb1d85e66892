// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{AnalyzerError, Result};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const BYTES_PER_MB: u64 = 1_048_576;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub history: HistoryConfig,
    pub pipeline: PipelineConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HistoryConfig {
    pub path: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PipelineConfig {
    pub max_file_size_mb: u64,
    pub accepted_media_types: Vec<String>,
    #[serde(default = "default_stage_delay_ms")]
    pub stage_delay_ms: u64,
}

fn default_stage_delay_ms() -> u64 {
    1000
}

impl PipelineConfig {
    /// Saturates for limits that do not fit in a `u64` byte count;
    /// [`Config::load`] rejects those.
    pub fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_mb.saturating_mul(BYTES_PER_MB)
    }

    pub fn stage_delay(&self) -> Duration {
        Duration::from_millis(self.stage_delay_ms)
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_file_size_mb: 10,
            accepted_media_types: vec![
                "application/pdf".to_string(),
                "application/x-pdf".to_string(),
            ],
            stage_delay_ms: default_stage_delay_ms(),
        }
    }
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder.add_source(config::File::from(Path::new("config/default.toml")));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("RESUME_ANALYZER")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| AnalyzerError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| AnalyzerError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            history: HistoryConfig {
                path: PathBuf::from("data/history.json"),
            },
            pipeline: PipelineConfig::default(),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.pipeline.max_file_size_mb == 0 {
            return Err(AnalyzerError::Config(
                "max_file_size_mb must be greater than 0".to_string(),
            ));
        }

        if self
            .pipeline
            .max_file_size_mb
            .checked_mul(BYTES_PER_MB)
            .is_none()
        {
            return Err(AnalyzerError::Config(format!(
                "max_file_size_mb {} is too large",
                self.pipeline.max_file_size_mb
            )));
        }

        if self.pipeline.accepted_media_types.is_empty() {
            return Err(AnalyzerError::Config(
                "accepted_media_types must name at least one media type".to_string(),
            ));
        }

        if self.history.path.as_os_str().is_empty() {
            return Err(AnalyzerError::Config("history.path is empty".to_string()));
        }

        Ok(())
    }
}
