// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result, anyhow};
use chrono::Utc;
use clap::{ArgAction, Parser, Subcommand};
use resume_analyzer::report::{render_history, render_record};
use resume_analyzer::utils::logging::{format_error, format_success, format_warning};
use resume_analyzer::{
    AnalysisPipeline, Config, HealthReport, HealthStatus, HistoryStore, ImmediateExecutor,
    JsonExporter, JsonHistoryStore, ProgressTracker, RecordId, Submission,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "resume_analyzer")]
#[command(version)]
#[command(about = "Analyze resumes and keep a local history of the results", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a resume and append the result to the history
    Analyze {
        file: PathBuf,

        /// Declared media type, guessed from the extension when omitted
        #[arg(long, value_name = "TYPE")]
        media_type: Option<String>,

        /// Skip the per-stage delay
        #[arg(long)]
        no_delay: bool,
    },

    /// List past analyses, oldest first
    History,

    /// Show one past analysis in full
    Show { id: RecordId },

    /// Export the history as json
    Export {
        #[arg(short, long, default_value = "./exports")]
        output: PathBuf,

        #[arg(short, long)]
        pretty: bool,
    },

    /// Check that the history can be read
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    resume_analyzer::utils::logging::init_logger(cli.color, cli.verbose);
    colored::control::set_override(cli.color);

    let config = if cli.config.exists() {
        info!("Loading configuration from: {}", cli.config.display());
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        warn!(
            "Config file {} not found, using default configuration",
            cli.config.display()
        );
        Config::default_config()
    };

    let history = Arc::new(
        JsonHistoryStore::new(config.history.path.clone())
            .await
            .context("Failed to open history")?,
    );

    match cli.command {
        Commands::Analyze {
            file,
            media_type,
            no_delay,
        } => {
            cmd_analyze(&config, history, file, media_type, no_delay, cli.color).await?;
        }
        Commands::History => {
            cmd_history(history.as_ref()).await;
        }
        Commands::Show { id } => {
            cmd_show(history.as_ref(), id).await?;
        }
        Commands::Export { output, pretty } => {
            cmd_export(history.as_ref(), output, pretty).await?;
        }
        Commands::Status => {
            cmd_status(history.as_ref()).await?;
        }
    }

    Ok(())
}

async fn cmd_analyze(
    config: &Config,
    history: Arc<JsonHistoryStore>,
    file: PathBuf,
    media_type: Option<String>,
    no_delay: bool,
    color: bool,
) -> Result<()> {
    let limit = config.pipeline.max_file_size_bytes();
    let submission = Submission::from_path(&file, media_type, limit)
        .await
        .context("Failed to read submission")?;

    let mut pipeline = AnalysisPipeline::new(config.pipeline.clone(), history);
    if no_delay {
        pipeline = pipeline.with_executor(Arc::new(ImmediateExecutor));
    }

    let tracker = ProgressTracker::with_color(color);
    let result = pipeline.run(&submission, &tracker).await;
    tracker.finish();

    match result {
        Ok(record) => {
            println!("{}\n", format_success("Analysis complete"));
            println!("{}", render_record(&record));
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", format_error(&format!("{}: {}", e.kind(), e)));
            Err(anyhow!(e))
        }
    }
}

async fn cmd_history(history: &JsonHistoryStore) {
    let records = history.list_all().await;
    println!("{}", render_history(&records, Utc::now()));
}

async fn cmd_show(history: &JsonHistoryStore, id: RecordId) -> Result<()> {
    let record = history
        .find(&id)
        .await
        .ok_or_else(|| anyhow!("No analysis with id {}", id))?;
    println!("{}", render_record(&record));
    Ok(())
}

async fn cmd_export(history: &JsonHistoryStore, output: PathBuf, pretty: bool) -> Result<()> {
    let exporter = JsonExporter::new(output).context("Failed to create export directory")?;
    let manifest = exporter
        .export_all(history, pretty)
        .await
        .context("Export failed")?;

    println!(
        "{}",
        format_success(&format!(
            "Exported {} analyses to {}",
            manifest.total_records,
            exporter.output_dir().display()
        ))
    );
    Ok(())
}

async fn cmd_status(history: &JsonHistoryStore) -> Result<()> {
    let report = HealthReport::new(
        vec![history.health().await],
        env!("CARGO_PKG_VERSION").to_string(),
    );
    println!("{}", report.format());

    match report.overall_status {
        HealthStatus::Healthy => Ok(()),
        HealthStatus::Degraded => {
            println!(
                "{}",
                format_warning(&format!(
                    "{} could not be parsed; the next analysis will move it aside",
                    history.path().display()
                ))
            );
            Ok(())
        }
        HealthStatus::Unhealthy => Err(anyhow!("History store is unavailable")),
    }
}
