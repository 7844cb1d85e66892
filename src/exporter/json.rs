// file: src/exporter/json.rs
// description: json export of the analysis history with a manifest

use crate::error::Result;
use crate::history::{HistoryStore, to_document};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone)]
pub struct JsonExporter {
    output_dir: PathBuf,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExportManifest {
    pub exported_at: String,
    pub total_records: usize,
    pub files: Vec<String>,
}

impl JsonExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir)?;
        Ok(Self { output_dir })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Writes the full history in its persisted layout, plus `manifest.json`.
    pub async fn export_all(
        &self,
        history: &dyn HistoryStore,
        pretty: bool,
    ) -> Result<ExportManifest> {
        info!("Starting JSON export to {:?}", self.output_dir);

        let records = history.list_all().await;
        let now = Utc::now();
        let snapshot_name = format!("history-{}.json", now.format("%Y%m%dT%H%M%S"));

        let contents = if pretty {
            to_document(&records)?
        } else {
            serde_json::to_string(&records)?
        };
        fs::write(self.output_dir.join(&snapshot_name), contents)?;

        let manifest = ExportManifest {
            exported_at: now.to_rfc3339(),
            total_records: records.len(),
            files: vec![snapshot_name],
        };
        fs::write(
            self.output_dir.join("manifest.json"),
            serde_json::to_string_pretty(&manifest)?,
        )?;

        info!("Export complete: {} records exported", manifest.total_records);
        Ok(manifest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PipelineConfig;
    use crate::history::{InMemoryHistoryStore, from_document};
    use crate::models::Submission;
    use crate::pipeline::{AnalysisPipeline, ImmediateExecutor, NoopObserver};
    use std::sync::Arc;
    use tempfile::tempdir;

    #[test]
    fn test_exporter_creation() {
        let dir = tempdir().unwrap();
        let exporter = JsonExporter::new(dir.path().join("exports"));
        assert!(exporter.is_ok());
        assert!(dir.path().join("exports").is_dir());
    }

    #[tokio::test]
    async fn test_export_all_writes_snapshot_and_manifest() {
        let history = Arc::new(InMemoryHistoryStore::new());
        let pipeline = AnalysisPipeline::new(PipelineConfig::default(), history.clone())
            .with_executor(Arc::new(ImmediateExecutor));
        let record = pipeline
            .run(
                &Submission::new("resume.pdf", "application/pdf", vec![0u8; 64]),
                &NoopObserver,
            )
            .await
            .unwrap();

        let dir = tempdir().unwrap();
        let exporter = JsonExporter::new(dir.path()).unwrap();
        let manifest = exporter.export_all(&*history, false).await.unwrap();

        assert_eq!(manifest.total_records, 1);
        assert_eq!(manifest.files.len(), 1);

        let snapshot = fs::read_to_string(dir.path().join(&manifest.files[0])).unwrap();
        assert_eq!(from_document(&snapshot).unwrap(), vec![record]);

        let written: ExportManifest =
            serde_json::from_str(&fs::read_to_string(dir.path().join("manifest.json")).unwrap())
                .unwrap();
        assert_eq!(written.total_records, 1);
    }

    #[tokio::test]
    async fn test_export_empty_history() {
        let dir = tempdir().unwrap();
        let exporter = JsonExporter::new(dir.path()).unwrap();
        let manifest = exporter
            .export_all(&InMemoryHistoryStore::new(), true)
            .await
            .unwrap();

        assert_eq!(manifest.total_records, 0);
        let snapshot = fs::read_to_string(dir.path().join(&manifest.files[0])).unwrap();
        assert!(from_document(&snapshot).unwrap().is_empty());
    }
}
