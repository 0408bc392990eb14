//! Barrier Coach command line.
//!
//! Usage:
//!   barrier-coach serve
//!   barrier-coach intervene --goal "exercise more" --barrier "I'm too tired after work"
//!   barrier-coach feedback --goal ... --barrier ... --category motivation \
//!       --technique "Temptation Bundling" --rating 4 --would-try yes
//!   barrier-coach stats
//!   barrier-coach recent --limit 5
//!   barrier-coach export --out feedback.csv

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use barrier_coach::adapters::{
    build_provider, build_router, load_catalog, CoachingAppState, CsvFeedbackLog,
};
use barrier_coach::application::handlers::{
    ExportFeedbackHandler, ExportFeedbackQuery, GenerationSettings, GetFeedbackStatisticsHandler,
    GetFeedbackStatisticsQuery, ListRecentFeedbackHandler, ListRecentFeedbackQuery,
    RequestInterventionCommand, RequestInterventionHandler, SubmitFeedbackCommand,
    SubmitFeedbackHandler,
};
use barrier_coach::config::{AiConfig, AppConfig, ConfigError, LogFormat, ServerConfig};
use barrier_coach::domain::coaching::{
    BarrierCategory, CatalogError, CoachingError, InterventionOutcome, SelectionReason,
};
use barrier_coach::domain::feedback::{FeedbackRecord, Rating, TrialIntent};
use barrier_coach::ports::{AIError, FeedbackLog};

#[derive(Parser)]
#[command(name = "barrier-coach")]
#[command(about = "COM-B behavior change coach", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve,
    /// Classify a barrier and generate an intervention
    Intervene {
        #[arg(long)]
        goal: String,
        #[arg(long)]
        barrier: String,
        /// Optional background about the situation
        #[arg(long)]
        context: Option<String>,
        /// Print the full outcome as JSON
        #[arg(long)]
        json: bool,
    },
    /// Record feedback on an intervention
    Feedback {
        #[arg(long)]
        goal: String,
        #[arg(long)]
        barrier: String,
        #[arg(long)]
        category: BarrierCategory,
        #[arg(long)]
        technique: String,
        #[arg(long, default_value = "")]
        theory: String,
        /// 1 to 5
        #[arg(long)]
        rating: Rating,
        /// yes, maybe or no
        #[arg(long)]
        would_try: TrialIntent,
        #[arg(long)]
        comment: Option<String>,
    },
    /// Show aggregate feedback statistics
    Stats {
        #[arg(long)]
        json: bool,
    },
    /// List the newest feedback entries
    Recent {
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Write the raw feedback CSV to a file or stdout
    Export {
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("Failed to create AI provider: {0}")]
    Provider(#[from] AIError),

    #[error(transparent)]
    Coaching(#[from] CoachingError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&config.server);

    match run(cli.command, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr so command output on stdout stays clean.
fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    match server.log_format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}

async fn run(command: Commands, config: AppConfig) -> Result<(), CliError> {
    config
        .server
        .validate()
        .and_then(|_| config.storage.validate())
        .map_err(ConfigError::from)?;

    let log: Arc<dyn FeedbackLog> = Arc::new(CsvFeedbackLog::new(&config.storage.feedback_log_path));

    match command {
        Commands::Serve => serve(config, log).await,
        Commands::Intervene {
            goal,
            barrier,
            context,
            json,
        } => {
            config.ai.validate().map_err(ConfigError::from)?;
            let catalog = Arc::new(load_catalog(&config.storage.catalog_path).await?);
            let handler = RequestInterventionHandler::new(
                catalog,
                build_provider(&config.ai)?,
                generation_settings(&config.ai),
            );
            let outcome = handler
                .handle(RequestInterventionCommand {
                    goal,
                    barrier,
                    context,
                })
                .await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                print_outcome(&outcome);
            }
            Ok(())
        }
        Commands::Feedback {
            goal,
            barrier,
            category,
            technique,
            theory,
            rating,
            would_try,
            comment,
        } => {
            let entry = SubmitFeedbackHandler::new(log)
                .handle(SubmitFeedbackCommand {
                    record: FeedbackRecord {
                        user_goal: goal,
                        user_barrier: barrier,
                        target_component: category,
                        technique_used: technique,
                        theory,
                        rating,
                        would_try,
                        feedback_text: comment,
                    },
                })
                .await?;
            println!("Recorded feedback at {}", entry.timestamp);
            Ok(())
        }
        Commands::Stats { json } => {
            let result = GetFeedbackStatisticsHandler::new(log)
                .handle(GetFeedbackStatisticsQuery)
                .await?;

            match result.statistics {
                None if result.skipped_rows > 0 => println!(
                    "No readable feedback ({} malformed rows ignored).",
                    result.skipped_rows
                ),
                None => println!("No feedback yet."),
                Some(stats) if json => println!("{}", serde_json::to_string_pretty(&stats)?),
                Some(stats) => {
                    println!("Total responses: {}", stats.total_responses);
                    println!("Average rating:  {:.1}/5", stats.average_rating);
                    println!("Would try:       {:.0}%", stats.would_try_percent);
                    println!("\nTop techniques:");
                    for (rank, performance) in stats.top_techniques(5).iter().enumerate() {
                        println!(
                            "  {}. {} ({:.1})",
                            rank + 1,
                            performance.technique,
                            performance.average_rating
                        );
                    }
                    println!("\nBarrier categories:");
                    for category in BarrierCategory::ALL {
                        println!(
                            "  {:<12} {:>5.1}%",
                            category.label(),
                            stats.component_share(category)
                        );
                    }
                    if stats.skipped_rows > 0 {
                        println!("\n({} malformed rows ignored)", stats.skipped_rows);
                    }
                }
            }
            Ok(())
        }
        Commands::Recent { limit } => {
            let entries = ListRecentFeedbackHandler::new(log)
                .handle(ListRecentFeedbackQuery {
                    limit: limit.unwrap_or(config.storage.recent_limit),
                })
                .await?;

            for entry in entries {
                println!(
                    "{}  {}  {}/5  {}  {}",
                    entry.timestamp,
                    entry.record.technique_used,
                    entry.record.rating,
                    entry.record.would_try,
                    entry.record.user_goal
                );
            }
            Ok(())
        }
        Commands::Export { out } => {
            let export = ExportFeedbackHandler::new(log)
                .handle(ExportFeedbackQuery)
                .await?;

            match out {
                Some(path) => {
                    tokio::fs::write(&path, &export.content).await?;
                    println!("Wrote {}", path.display());
                }
                None => {
                    use std::io::Write;
                    std::io::stdout().write_all(&export.content)?;
                }
            }
            Ok(())
        }
    }
}

async fn serve(config: AppConfig, log: Arc<dyn FeedbackLog>) -> Result<(), CliError> {
    config.ai.validate().map_err(ConfigError::from)?;
    let addr = config.server.socket_addr().map_err(ConfigError::from)?;

    let catalog = Arc::new(load_catalog(&config.storage.catalog_path).await?);
    let provider = build_provider(&config.ai)?;
    let info = provider.provider_info();

    let state = CoachingAppState::new(catalog, provider, log)
        .with_generation(generation_settings(&config.ai))
        .with_recent_limit(config.storage.recent_limit);
    let app = build_router(state, &config.server);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        %addr,
        provider = %info.name,
        model = %info.model,
        log_format = ?config.server.log_format,
        "Barrier Coach listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}

fn generation_settings(ai: &AiConfig) -> GenerationSettings {
    GenerationSettings {
        temperature: ai.temperature,
        top_p: ai.top_p,
        top_k: ai.top_k,
        max_output_tokens: ai.max_output_tokens,
    }
}

fn print_outcome(outcome: &InterventionOutcome) {
    let intervention = &outcome.intervention;
    let selection = match &outcome.selection {
        SelectionReason::KeywordMatch { keyword } => format!("matched \"{}\"", keyword),
        SelectionReason::CategoryDefault => "first in category".to_string(),
        SelectionReason::CatalogFallback => "catalog fallback".to_string(),
    };

    println!("Barrier: {}", outcome.barrier_category.label());
    println!("Technique: {} ({})", intervention.technique_name, selection);
    if !intervention.theory.is_empty() {
        println!("Theory: {}", intervention.theory);
    }
    if intervention.duration_minutes > 0 {
        println!("Time: {} min", intervention.duration_minutes);
    }
    if !intervention.evidence.is_empty() {
        println!("Evidence: {}", intervention.evidence);
    }
    println!();
    println!("{}", intervention.intervention_text);
    if intervention.is_fallback() {
        println!("\n(generated offline: the text service was unavailable)");
    }
}
