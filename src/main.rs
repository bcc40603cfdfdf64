//! Temp Folder Remover - service entry point
//!
//! Maps the host lifecycle onto the process: start on launch, stop on
//! Ctrl+C or SIGTERM.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use temp_folder_remover::config::{DESCRIPTION, DISPLAY_NAME};
use temp_folder_remover::logging::TracingSink;
use temp_folder_remover::{settings, CleanupService, Config, Lifecycle};

#[derive(Parser, Debug)]
#[command(name = "temp_folder_remover", version, about = DESCRIPTION)]
struct Args {
    /// Directory containing appsettings.json (overrides SETTINGS_DIRECTORY)
    #[arg(long, value_name = "DIR")]
    settings_dir: Option<PathBuf>,

    /// Run a single cleanup pass and exit
    #[arg(long, action = clap::ArgAction::SetTrue)]
    once: bool,

    /// Print the effective settings as JSON and exit
    #[arg(long, action = clap::ArgAction::SetTrue)]
    print_settings: bool,
}

/// Main entry point for the cleanup service.
///
/// # Startup Sequence
/// 1. Load .env, then initialize tracing subscriber for diagnostics
/// 2. Load static configuration (environment, flags)
/// 3. Resolve effective settings from the settings document
/// 4. Start the service: first pass now, then one per interval
/// 5. Stop on SIGINT/SIGTERM, letting a running pass finish
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Before the subscriber, so RUST_LOG may come from .env
    let dotenv_loaded = dotenvy::dotenv().is_ok();

    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "temp_folder_remover=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    if dotenv_loaded {
        info!("Loaded .env file");
    }

    let mut config = Config::from_env();
    if let Some(dir) = args.settings_dir {
        config = config.with_settings_directory(dir);
    }
    info!(
        "Configuration loaded: settings_directory={}",
        config.settings_directory.display()
    );

    let sink = Arc::new(TracingSink::default());
    let effective = settings::resolve(&config.settings_directory, sink.as_ref());

    if args.print_settings {
        println!("{}", serde_json::to_string_pretty(&effective)?);
        return Ok(());
    }

    let mut service = CleanupService::new(effective, sink);

    if args.once {
        let report = service.run_once()?;
        info!(
            "Single pass finished: {} deleted, {} failed",
            report.deleted(),
            report.failed()
        );
        return Ok(());
    }

    info!("Starting {}", DISPLAY_NAME);
    service.start()?;

    shutdown_signal().await;

    service.stop().await?;
    info!("Shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
