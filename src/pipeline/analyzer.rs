// file: src/pipeline/analyzer.rs
// description: pluggable extraction and rating capability used after the final stage
// reference: analyzer trait with a fixed sample implementation

use crate::error::Result;
use crate::models::{Education, Experience, ExtractedData, UpskillSuggestion};
use async_trait::async_trait;

const SAMPLE_RATING: f64 = 8.2;

/// Output of a single analyzer call, before the pipeline checks the rating
/// and attaches the record identity and submission metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisOutcome {
    pub extracted_data: ExtractedData,
    pub resume_rating: f64,
    pub improvement_areas: String,
    pub upskill_suggestions: Vec<UpskillSuggestion>,
}

#[async_trait]
pub trait ResumeAnalyzer: Send + Sync {
    async fn analyze(&self, bytes: &[u8]) -> Result<AnalysisOutcome>;
}

/// Returns the same simulated report for every document.
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleAnalyzer;

#[async_trait]
impl ResumeAnalyzer for SampleAnalyzer {
    async fn analyze(&self, _bytes: &[u8]) -> Result<AnalysisOutcome> {
        Ok(sample_outcome())
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

pub fn sample_outcome() -> AnalysisOutcome {
    let extracted_data = ExtractedData {
        name: "John Smith".to_string(),
        email: "john.smith@email.com".to_string(),
        phone: "+1 (555) 123-4567".to_string(),
        core_skills: strings(&["JavaScript", "React", "Node.js", "Python", "SQL", "AWS"]),
        soft_skills: strings(&[
            "Leadership",
            "Communication",
            "Problem-solving",
            "Team collaboration",
        ]),
        experience: vec![
            Experience {
                company: "Tech Solutions Inc".to_string(),
                position: "Senior Software Engineer".to_string(),
                duration: "2021 - Present".to_string(),
                description: "Led development of web applications using React and Node.js"
                    .to_string(),
            },
            Experience {
                company: "StartupCorp".to_string(),
                position: "Full Stack Developer".to_string(),
                duration: "2019 - 2021".to_string(),
                description:
                    "Built scalable backend systems and responsive frontend interfaces"
                        .to_string(),
            },
        ],
        education: vec![Education {
            institution: "University of Technology".to_string(),
            degree: "Bachelor of Computer Science".to_string(),
            year: "2019".to_string(),
        }],
    };

    AnalysisOutcome {
        extracted_data,
        resume_rating: SAMPLE_RATING,
        improvement_areas: "Consider adding more quantifiable achievements and metrics to \
                            demonstrate impact. Include relevant certifications and expand on \
                            leadership experiences."
            .to_string(),
        upskill_suggestions: vec![
            UpskillSuggestion {
                skill: "TypeScript".to_string(),
                reason: "High demand in modern web development and improves code maintainability"
                    .to_string(),
            },
            UpskillSuggestion {
                skill: "Docker & Kubernetes".to_string(),
                reason: "Essential for containerization and orchestration in DevOps practices"
                    .to_string(),
            },
            UpskillSuggestion {
                skill: "Machine Learning".to_string(),
                reason: "Emerging field with growing opportunities in software development"
                    .to_string(),
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sample_analyzer_populates_every_field() {
        let outcome = SampleAnalyzer.analyze(b"%PDF-1.4").await.unwrap();
        let data = &outcome.extracted_data;

        assert!(!data.name.is_empty());
        assert!(!data.email.is_empty());
        assert!(!data.phone.is_empty());
        assert_eq!(data.core_skills.len(), 6);
        assert_eq!(data.core_skills[0], "JavaScript");
        assert_eq!(data.soft_skills.len(), 4);
        assert_eq!(data.experience[0].company, "Tech Solutions Inc");
        assert_eq!(data.education.len(), 1);

        assert_eq!(outcome.resume_rating, 8.2);
        assert!(!outcome.improvement_areas.is_empty());
        assert_eq!(outcome.upskill_suggestions.len(), 3);
    }

    #[tokio::test]
    async fn test_sample_analyzer_ignores_content() {
        let a = SampleAnalyzer.analyze(b"one").await.unwrap();
        let b = SampleAnalyzer.analyze(b"two").await.unwrap();
        assert_eq!(a, b);
    }
}
