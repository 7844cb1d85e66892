// file: src/report/console.rs
// description: plain-text rendering of analysis records and history listings
// reference: console summary reporting

use crate::models::{AnalysisRecord, HistorySummary};
use crate::utils::Validator;
use crate::utils::logging::{format_info, format_rating};
use chrono::{DateTime, Utc};
use colored::Colorize;
use std::fmt::Write;

const PREVIEW_CHARS: usize = 60;

/// "just now", "5 minutes ago", "3 days ago".
pub fn format_age(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - then).num_seconds();
    if seconds < 0 {
        return "in the future".to_string();
    }

    let (value, unit) = match seconds {
        0..=44 => return "just now".to_string(),
        45..=3_599 => ((seconds + 30) / 60, "minute"),
        3_600..=86_399 => ((seconds + 1_800) / 3_600, "hour"),
        86_400..=2_591_999 => ((seconds + 43_200) / 86_400, "day"),
        2_592_000..=31_535_999 => ((seconds + 1_296_000) / 2_592_000, "month"),
        _ => (seconds / 31_536_000, "year"),
    };

    let value = value.max(1);
    if value == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", value, unit)
    }
}

pub fn render_record(record: &AnalysisRecord) -> String {
    let data = &record.extracted_data;
    let analysis = &record.analysis;
    let mut out = String::new();

    let _ = writeln!(out, "{}", record.filename.bold());
    let _ = writeln!(out, "  Id:       {}", record.id);
    let _ = writeln!(
        out,
        "  Uploaded: {}",
        record.uploaded_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    let _ = writeln!(out, "  Rating:   {}", format_rating(analysis.resume_rating));

    let _ = writeln!(out, "\n{}", "Contact".underline());
    let _ = writeln!(out, "  Name:  {}", or_dash(&data.name));
    let _ = writeln!(out, "  Email: {}", or_dash(&data.email));
    let _ = writeln!(out, "  Phone: {}", or_dash(&data.phone));

    let _ = writeln!(out, "\n{}", "Skills".underline());
    let _ = writeln!(out, "  Core: {}", join_or_dash(&data.core_skills));
    let _ = writeln!(out, "  Soft: {}", join_or_dash(&data.soft_skills));

    if !data.experience.is_empty() {
        let _ = writeln!(out, "\n{}", "Experience".underline());
        for job in &data.experience {
            let _ = writeln!(
                out,
                "  {} at {} ({})",
                job.position, job.company, job.duration
            );
            if !job.description.is_empty() {
                let _ = writeln!(out, "    {}", job.description);
            }
        }
    }

    if !data.education.is_empty() {
        let _ = writeln!(out, "\n{}", "Education".underline());
        for school in &data.education {
            let _ = writeln!(
                out,
                "  {}, {} ({})",
                school.degree, school.institution, school.year
            );
        }
    }

    let _ = writeln!(out, "\n{}", "Areas for improvement".underline());
    let _ = writeln!(out, "  {}", or_dash(&analysis.improvement_areas));

    if !analysis.upskill_suggestions.is_empty() {
        let _ = writeln!(out, "\n{}", "Upskilling suggestions".underline());
        for (idx, suggestion) in analysis.upskill_suggestions.iter().enumerate() {
            let _ = writeln!(
                out,
                "  {}. {}: {}",
                idx + 1,
                suggestion.skill,
                suggestion.reason
            );
        }
    }

    out
}

pub fn render_history(records: &[AnalysisRecord], now: DateTime<Utc>) -> String {
    if records.is_empty() {
        return format_info(
            "No analysis history yet. Analyze your first resume to get started.",
        );
    }

    let mut out = String::new();
    for record in records {
        let skills = Validator::truncate_text(
            &record.extracted_data.core_skills.join(", "),
            PREVIEW_CHARS,
        );
        let _ = writeln!(
            out,
            "{}  {}  {}  {}",
            record.id.to_string().dimmed(),
            record.filename.bold(),
            format_age(record.uploaded_at, now),
            format_rating(record.rating())
        );
        if !skills.is_empty() {
            let _ = writeln!(out, "    {}", skills);
        }
    }

    let summary = HistorySummary::from_records(records);
    let average = summary
        .average_rating
        .map(|avg| format!("{:.1}/10", avg))
        .unwrap_or_else(|| "-".to_string());
    let _ = write!(
        out,
        "\n{} analyses, average rating {}",
        summary.total, average
    );
    if let Some((id, rating)) = summary.best {
        let _ = write!(out, ", best {} ({})", rating, id);
    }

    out
}

fn or_dash(value: &str) -> &str {
    if value.trim().is_empty() { "-" } else { value }
}

fn join_or_dash(values: &[String]) -> String {
    if values.is_empty() {
        "-".to_string()
    } else {
        values.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AnalysisResult, ExtractedData, Rating};
    use crate::pipeline::sample_outcome;
    use chrono::Duration;

    fn sample_record(rating: f64, uploaded_at: DateTime<Utc>) -> AnalysisRecord {
        let outcome = sample_outcome();
        AnalysisRecord::new(
            "resume.pdf".to_string(),
            uploaded_at,
            outcome.extracted_data,
            AnalysisResult {
                resume_rating: Rating::new(rating).unwrap(),
                improvement_areas: outcome.improvement_areas,
                upskill_suggestions: outcome.upskill_suggestions,
            },
        )
    }

    #[test]
    fn test_format_age() {
        let now = Utc::now();
        assert_eq!(format_age(now, now), "just now");
        assert_eq!(format_age(now - Duration::seconds(90), now), "2 minutes ago");
        assert_eq!(format_age(now - Duration::minutes(60), now), "1 hour ago");
        assert_eq!(format_age(now - Duration::days(3), now), "3 days ago");
        assert_eq!(format_age(now - Duration::days(400), now), "1 year ago");
        assert_eq!(format_age(now + Duration::minutes(5), now), "in the future");
    }

    #[test]
    fn test_render_record_includes_every_section() {
        colored::control::set_override(false);
        let record = sample_record(8.2, Utc::now());
        let text = render_record(&record);

        assert!(text.contains("resume.pdf"));
        assert!(text.contains("8.2/10 (Excellent)"));
        assert!(text.contains("Email: john.smith@email.com"));
        assert!(text.contains("Senior Software Engineer at Tech Solutions Inc"));
        assert!(text.contains("Bachelor of Computer Science, University of Technology (2019)"));
        assert!(text.contains("1. TypeScript:"));
    }

    #[test]
    fn test_render_record_with_empty_fields() {
        colored::control::set_override(false);
        let record = AnalysisRecord::new(
            "blank.pdf".to_string(),
            Utc::now(),
            ExtractedData::default(),
            AnalysisResult {
                resume_rating: Rating::new(3.0).unwrap(),
                improvement_areas: String::new(),
                upskill_suggestions: vec![],
            },
        );
        let text = render_record(&record);

        assert!(text.contains("Name:  -"));
        assert!(text.contains("Core: -"));
        assert!(text.contains("(Needs Improvement)"));
        assert!(!text.contains("Experience"));
    }

    #[test]
    fn test_render_history() {
        colored::control::set_override(false);
        let now = Utc::now();
        let records = vec![
            sample_record(6.0, now - Duration::days(2)),
            sample_record(9.0, now - Duration::minutes(10)),
        ];
        let text = render_history(&records, now);

        assert!(text.contains("2 days ago"));
        assert!(text.contains("10 minutes ago"));
        assert!(text.contains("6/10 (Good)"));
        assert!(text.contains("2 analyses, average rating 7.5/10"));
        assert!(text.contains(&format!("best 9/10 ({})", records[1].id)));
    }

    #[test]
    fn test_render_empty_history() {
        colored::control::set_override(false);
        let text = render_history(&[], Utc::now());
        assert!(text.contains("No analysis history yet"));
    }
}
