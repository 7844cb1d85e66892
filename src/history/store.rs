// file: src/history/store.rs
// description: history store interface and the in-memory implementation
// reference: repository trait with swappable backends

use crate::error::{AnalyzerError, Result};
use crate::models::{AnalysisRecord, RecordId};
use async_trait::async_trait;
use tokio::sync::Mutex;

/// Append-only, insertion-ordered collection of completed analyses.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Appends to the end of the history. Fails with
    /// [`AnalyzerError::Persistence`] when the record could not be stored or
    /// its id is already present.
    async fn append(&self, record: &AnalysisRecord) -> Result<()>;

    /// Every stored record, oldest first. Unreadable history is empty.
    async fn list_all(&self) -> Vec<AnalysisRecord>;

    async fn find(&self, id: &RecordId) -> Option<AnalysisRecord> {
        self.list_all().await.into_iter().find(|r| &r.id == id)
    }

    async fn len(&self) -> usize {
        self.list_all().await.len()
    }
}

pub(crate) fn duplicate_id(id: &RecordId) -> AnalyzerError {
    AnalyzerError::Persistence(format!("record {} already exists in history", id))
}

#[derive(Debug, Default)]
pub struct InMemoryHistoryStore {
    records: Mutex<Vec<AnalysisRecord>>,
}

impl InMemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<AnalysisRecord>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }
}

#[async_trait]
impl HistoryStore for InMemoryHistoryStore {
    async fn append(&self, record: &AnalysisRecord) -> Result<()> {
        let mut records = self.records.lock().await;
        if records.iter().any(|r| r.id == record.id) {
            return Err(duplicate_id(&record.id));
        }
        records.push(record.clone());
        Ok(())
    }

    async fn list_all(&self) -> Vec<AnalysisRecord> {
        self.records.lock().await.clone()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::{AnalysisResult, ExtractedData, Rating};
    use chrono::Utc;

    pub(crate) fn sample_record(filename: &str) -> AnalysisRecord {
        AnalysisRecord::new(
            filename.to_string(),
            Utc::now(),
            ExtractedData {
                name: "Jane Doe".to_string(),
                core_skills: vec!["Rust".to_string(), "Go".to_string()],
                ..ExtractedData::default()
            },
            AnalysisResult {
                resume_rating: Rating::new(7.4).unwrap(),
                improvement_areas: "Quantify impact".to_string(),
                upskill_suggestions: vec![],
            },
        )
    }

    #[tokio::test]
    async fn test_in_memory_preserves_insertion_order() {
        let store = InMemoryHistoryStore::new();
        let first = sample_record("first.pdf");
        let second = sample_record("second.pdf");

        store.append(&first).await.unwrap();
        store.append(&second).await.unwrap();

        let all = store.list_all().await;
        assert_eq!(all, vec![first.clone(), second]);
        assert_eq!(store.len().await, 2);
        assert_eq!(store.find(&first.id).await, Some(first));
        assert_eq!(store.find(&RecordId::generate()).await, None);
    }

    #[tokio::test]
    async fn test_in_memory_rejects_duplicate_id() {
        let store = InMemoryHistoryStore::new();
        let record = sample_record("resume.pdf");

        store.append(&record).await.unwrap();
        let err = store.append(&record).await.unwrap_err();

        assert!(matches!(err, AnalyzerError::Persistence(_)));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_in_memory_seeded_records_keep_their_ids() {
        let seeded = sample_record("seeded.pdf");
        let store = InMemoryHistoryStore::with_records(vec![seeded.clone()]);

        assert_eq!(store.find(&seeded.id).await, Some(seeded.clone()));
        let err = store.append(&seeded).await.unwrap_err();
        assert!(matches!(err, AnalyzerError::Persistence(_)));

        let next = sample_record("next.pdf");
        store.append(&next).await.unwrap();
        assert_eq!(store.list_all().await, vec![seeded, next]);
    }

    #[tokio::test]
    async fn test_in_memory_empty() {
        let store = InMemoryHistoryStore::new();
        assert!(store.list_all().await.is_empty());
    }
}
