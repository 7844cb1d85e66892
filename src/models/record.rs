// file: src/models/record.rs
// description: analysis record model persisted in the history store
// reference: internal data structures

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

pub const MIN_RATING: f64 = 0.0;
pub const MAX_RATING: f64 = 10.0;

/// One completed analysis. Records are never edited once appended; a
/// re-analysis produces a new record with a fresh id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRecord {
    pub id: RecordId,
    pub filename: String,
    #[serde(with = "iso_millis")]
    pub uploaded_at: DateTime<Utc>,
    pub extracted_data: ExtractedData,
    pub analysis: AnalysisResult,
}

/// `uploadedAt` is always written as `YYYY-MM-DDTHH:MM:SS.sssZ`.
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&at.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        DateTime::<Utc>::deserialize(deserializer)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedData {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub core_skills: Vec<String>,
    pub soft_skills: Vec<String>,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub company: String,
    pub position: String,
    pub duration: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Education {
    pub institution: String,
    pub degree: String,
    pub year: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub resume_rating: Rating,
    pub improvement_areas: String,
    pub upskill_suggestions: Vec<UpskillSuggestion>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpskillSuggestion {
    pub skill: String,
    pub reason: String,
}

/// Opaque record identifier. New records get a UUID, but any string read
/// back from history is kept as written.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl FromStr for RecordId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Resume score in `[0, 10]`. Stored values are kept exactly as read.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Deserialize)]
#[serde(try_from = "f64")]
pub struct Rating(f64);

impl Rating {
    pub fn new(value: f64) -> Result<Self, RatingOutOfRange> {
        if !value.is_finite() || !(MIN_RATING..=MAX_RATING).contains(&value) {
            return Err(RatingOutOfRange(value));
        }
        Ok(Self(value))
    }

    /// Validates, then rounds to one decimal place. Used for fresh analyzer
    /// output only.
    pub fn rounded(value: f64) -> Result<Self, RatingOutOfRange> {
        let rating = Self::new(value)?;
        Ok(Self((rating.0 * 10.0).round() / 10.0))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn tier(self) -> RatingTier {
        if self.0 >= 8.0 {
            RatingTier::Excellent
        } else if self.0 >= 6.0 {
            RatingTier::Good
        } else {
            RatingTier::NeedsImprovement
        }
    }
}

impl TryFrom<f64> for Rating {
    type Error = RatingOutOfRange;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Rating::new(value)
    }
}

impl From<Rating> for f64 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

// Whole ratings are written as integers, the way a browser's JSON.stringify
// writes them, so `8` reads back and writes out unchanged.
impl Serialize for Rating {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0.fract() == 0.0 {
            serializer.serialize_u64(self.0 as u64)
        } else {
            serializer.serialize_f64(self.0)
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/10", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingOutOfRange(pub f64);

impl fmt::Display for RatingOutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rating {} is outside [{}, {}]",
            self.0, MIN_RATING, MAX_RATING
        )
    }
}

impl std::error::Error for RatingOutOfRange {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingTier {
    Excellent,
    Good,
    NeedsImprovement,
}

impl fmt::Display for RatingTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RatingTier::Excellent => "Excellent",
            RatingTier::Good => "Good",
            RatingTier::NeedsImprovement => "Needs Improvement",
        };
        f.write_str(label)
    }
}

impl AnalysisRecord {
    pub fn new(
        filename: String,
        uploaded_at: DateTime<Utc>,
        extracted_data: ExtractedData,
        analysis: AnalysisResult,
    ) -> Self {
        Self {
            id: RecordId::generate(),
            filename,
            uploaded_at: uploaded_at.trunc_subsecs(3),
            extracted_data,
            analysis,
        }
    }

    pub fn rating(&self) -> Rating {
        self.analysis.resume_rating
    }
}

/// Aggregate view over a slice of history, in the order given.
#[derive(Debug, Clone, PartialEq)]
pub struct HistorySummary {
    pub total: usize,
    pub average_rating: Option<f64>,
    pub best: Option<(RecordId, Rating)>,
}

impl HistorySummary {
    pub fn from_records(records: &[AnalysisRecord]) -> Self {
        let total = records.len();
        let average_rating = if total == 0 {
            None
        } else {
            let sum: f64 = records.iter().map(|r| r.rating().value()).sum();
            Some(sum / total as f64)
        };

        let best = records
            .iter()
            .fold(None::<&AnalysisRecord>, |best, record| match best {
                Some(current) if current.rating() >= record.rating() => Some(current),
                _ => Some(record),
            })
            .map(|record| (record.id.clone(), record.rating()));

        Self {
            total,
            average_rating,
            best,
        }
    }
}
