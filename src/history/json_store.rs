// file: src/history/json_store.rs
// description: durable history persisted as a single json array document
// reference: Production-grade metadata persistence

use crate::error::{AnalyzerError, Result};
use crate::history::store::{HistoryStore, duplicate_id};
use crate::models::AnalysisRecord;
use crate::utils::telemetry::HealthCheck;
use async_trait::async_trait;
use chrono::Utc;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

const COMPONENT: &str = "history";

/// What was found at the history path.
#[derive(Debug)]
pub enum HistoryState {
    Absent,
    Loaded(Vec<AnalysisRecord>),
    Corrupt(String),
}

pub fn to_document(records: &[AnalysisRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

pub fn from_document(contents: &str) -> Result<Vec<AnalysisRecord>> {
    Ok(serde_json::from_str(contents)?)
}

/// History kept in one JSON file. Appends rewrite the whole document through
/// a sibling temp file that is renamed into place, serialized by a lock.
pub struct JsonHistoryStore {
    storage_path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonHistoryStore {
    pub async fn new(storage_path: PathBuf) -> Result<Self> {
        if let Some(parent) = storage_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).await.map_err(|e| {
                AnalyzerError::Persistence(format!(
                    "Failed to create history directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        Ok(Self {
            storage_path,
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.storage_path
    }

    pub async fn read_state(&self) -> Result<HistoryState> {
        let contents = match fs::read_to_string(&self.storage_path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(HistoryState::Absent),
            Err(source) => {
                return Err(AnalyzerError::FileOperation {
                    path: self.storage_path.clone(),
                    source,
                });
            }
        };

        if contents.trim().is_empty() {
            return Ok(HistoryState::Absent);
        }

        match from_document(&contents) {
            Ok(records) => Ok(HistoryState::Loaded(records)),
            Err(e) => Ok(HistoryState::Corrupt(e.to_string())),
        }
    }

    pub async fn health(&self) -> HealthCheck {
        let start = Instant::now();
        match self.read_state().await {
            Ok(HistoryState::Absent) | Ok(HistoryState::Loaded(_)) => {
                HealthCheck::healthy(COMPONENT, start.elapsed())
            }
            Ok(HistoryState::Corrupt(reason)) => HealthCheck::degraded(
                COMPONENT,
                format!("history is unreadable and treated as empty: {}", reason),
                start.elapsed(),
            ),
            Err(e) => HealthCheck::unhealthy(COMPONENT, e.to_string(), start.elapsed()),
        }
    }

    async fn write_records(&self, records: &[AnalysisRecord]) -> Result<()> {
        let contents = to_document(records).map_err(|e| {
            AnalyzerError::Persistence(format!("Failed to serialize history: {}", e))
        })?;

        let temp_path = self.sibling_path("tmp");
        fs::write(&temp_path, contents).await.map_err(|e| {
            AnalyzerError::Persistence(format!(
                "Failed to write {}: {}",
                temp_path.display(),
                e
            ))
        })?;

        fs::rename(&temp_path, &self.storage_path)
            .await
            .map_err(|e| {
                AnalyzerError::Persistence(format!(
                    "Failed to replace {}: {}",
                    self.storage_path.display(),
                    e
                ))
            })?;

        debug!("Saved {} history records", records.len());
        Ok(())
    }

    /// Moves an unparseable document aside so a new append does not erase it.
    async fn preserve_corrupt(&self) -> Result<PathBuf> {
        let stamp = Utc::now().format("%Y%m%dT%H%M%S%.3f");
        let backup = self.sibling_path(&format!("corrupt-{}", stamp));
        fs::rename(&self.storage_path, &backup).await.map_err(|e| {
            AnalyzerError::Persistence(format!(
                "Failed to preserve corrupt history at {}: {}",
                backup.display(),
                e
            ))
        })?;
        Ok(backup)
    }

    fn sibling_path(&self, suffix: &str) -> PathBuf {
        let mut name = self
            .storage_path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(format!(".{}", suffix));
        self.storage_path.with_file_name(name)
    }
}

#[async_trait]
impl HistoryStore for JsonHistoryStore {
    async fn append(&self, record: &AnalysisRecord) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let state = self
            .read_state()
            .await
            .map_err(|e| AnalyzerError::Persistence(format!("History unavailable: {}", e)))?;

        let mut records = match state {
            HistoryState::Absent => Vec::new(),
            HistoryState::Loaded(records) => records,
            HistoryState::Corrupt(reason) => {
                let backup = self.preserve_corrupt().await?;
                warn!(
                    "Corrupt history moved to {} before append: {}",
                    backup.display(),
                    reason
                );
                Vec::new()
            }
        };

        if records.iter().any(|r| r.id == record.id) {
            return Err(duplicate_id(&record.id));
        }

        records.push(record.clone());
        self.write_records(&records).await?;

        info!(
            "Appended analysis {} for {} ({} records)",
            record.id,
            record.filename,
            records.len()
        );
        Ok(())
    }

    async fn list_all(&self) -> Vec<AnalysisRecord> {
        match self.read_state().await {
            Ok(HistoryState::Loaded(records)) => records,
            Ok(HistoryState::Absent) => Vec::new(),
            Ok(HistoryState::Corrupt(reason)) => {
                warn!(
                    "Failed to parse history at {}, treating as empty: {}",
                    self.storage_path.display(),
                    reason
                );
                Vec::new()
            }
            Err(e) => {
                warn!("Failed to read history, treating as empty: {}", e);
                Vec::new()
            }
        }
    }
}
