use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hwbot::config::{Config, LoggingConfig};
use hwbot::utils::mask_secret;
use hwbot::watcher::{CycleOutcome, Watcher};

#[derive(Parser)]
#[command(
    name = "hwbot",
    version,
    about = "Watches homework review statuses and reports changes to Telegram",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// TOML configuration file (environment variables take precedence)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Console log format (text, json)
    #[arg(long, global = true)]
    log_format: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Poll forever (default)
    Run,

    /// Run a single poll cycle and exit
    Once,

    /// Validate configuration and print the effective settings
    Check,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // A missing .env file is not an error
    dotenvy::dotenv().ok();

    let mut config = Config::resolve(cli.config.as_deref())?;
    if let Some(format) = &cli.log_format {
        config.logging.format = format.clone();
    }

    // Keep the guard alive so buffered log lines are flushed on exit
    let _guard = setup_tracing(&config.logging, cli.verbose)?;

    if let Err(e) = config.validate() {
        tracing::error!("Startup aborted: {e}");
        return Err(e.into());
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            let watcher = Watcher::from_config(&config)?;
            watcher.run().await;
        }

        Commands::Once => {
            let mut watcher = Watcher::from_config(&config)?;
            match watcher.tick().await {
                CycleOutcome::StatusSent(message) => println!("Sent: {message}"),
                CycleOutcome::StatusUnchanged => println!("Status unchanged"),
                CycleOutcome::NoUpdates => println!("No new homework statuses"),
                CycleOutcome::Failed { error, .. } => println!("Cycle failed: {error}"),
            }
        }

        Commands::Check => check(&config),
    }

    Ok(())
}

fn setup_tracing(logging: &LoggingConfig, verbose: bool) -> Result<WorkerGuard> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("hwbot=debug,info")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            tracing_subscriber::EnvFilter::new(format!("hwbot={},warn", logging.level))
        })
    };

    std::fs::create_dir_all(&logging.directory).with_context(|| {
        format!("Failed to create log directory: {}", logging.directory.display())
    })?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(logging.file_name.clone())
        .max_log_files(logging.max_files)
        .build(&logging.directory)
        .context("Failed to create rotating log file")?;
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    // The file layer's type depends on the stack below it, so each arm builds its own
    match logging.format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(file_writer)
                        .with_ansi(false),
                )
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(file_writer)
                        .with_ansi(false),
                )
                .init();
        }
    }

    Ok(guard)
}

fn check(config: &Config) {
    println!("Configuration OK");
    println!("  Endpoint: {}", config.practicum.endpoint);
    println!("  API token: {}", mask_secret(&config.practicum.token));
    println!("  Bot API: {}", config.telegram.api_base);
    println!("  Bot token: {}", mask_secret(&config.telegram.token));
    println!("  Chat id: {}", config.telegram.chat_id);
    println!("  Poll interval: {}s", config.watcher.poll_interval_secs);
    println!(
        "  Log file: {}/{} (keep {})",
        config.logging.directory.display(),
        config.logging.file_name,
        config.logging.max_files
    );
}
