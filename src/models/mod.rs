// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod record;
pub mod submission;

pub use record::{
    AnalysisRecord, AnalysisResult, Education, Experience, ExtractedData, HistorySummary, Rating,
    RatingOutOfRange, RatingTier, RecordId, UpskillSuggestion,
};
pub use submission::{PDF_MEDIA_TYPE, Submission};
