// file: src/utils/logging.rs
// description: Tracing subscriber initialization and colored console helpers

use crate::models::{Rating, RatingTier};
use colored::*;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

pub fn init_logger(colored_output: bool, verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(verbose)
        .with_line_number(verbose)
        .compact()
        .with_ansi(colored_output)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

pub fn format_success(msg: &str) -> String {
    format!("{} {}", "✓".green().bold(), msg.green())
}

pub fn format_error(msg: &str) -> String {
    format!("{} {}", "✗".red().bold(), msg.red())
}

pub fn format_warning(msg: &str) -> String {
    format!("{} {}", "⚠".yellow().bold(), msg.yellow())
}

pub fn format_info(msg: &str) -> String {
    format!("{} {}", "ℹ".blue().bold(), msg)
}

/// "8.2/10 (Excellent)", green/yellow/red by tier.
pub fn format_rating(rating: Rating) -> String {
    let text = format!("{} ({})", rating, rating.tier());
    match rating.tier() {
        RatingTier::Excellent => text.green().bold().to_string(),
        RatingTier::Good => text.yellow().bold().to_string(),
        RatingTier::NeedsImprovement => text.red().bold().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_rating_plain() {
        colored::control::set_override(false);
        assert_eq!(
            format_rating(Rating::new(8.2).unwrap()),
            "8.2/10 (Excellent)"
        );
        assert_eq!(format_info("History is empty"), "ℹ History is empty");
    }
}
