//! ACT Water Dashboard server
//!
//! Loads the monitoring sites and sensor readings, then serves the
//! dashboard until Ctrl+C / SIGTERM.
//!
//! # Configuration
//!
//! `--config <path>` or the first of `~/.config/act-water/config.toml`,
//! `/etc/act-water/config.toml`, `./config.toml`; `ACT_WATER_*` environment
//! variables override either. A file that is found but does not parse stops
//! startup. `RUST_LOG` overrides the log filter.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use act_water::{generate_default_config, serve, AppState, Config, DashboardContext, LoggingConfig};

#[derive(Parser)]
#[command(name = "act-water")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Dashboard for ACT Government water monitoring sites")]
struct Cli {
    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the default config file and exit
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", generate_default_config());
        return Ok(());
    }

    // An existing config file that fails to load is fatal
    let (config, config_path) =
        Config::resolve(cli.config.as_deref()).context("failed to load configuration")?;

    init_tracing(&config.logging);

    tracing::info!("Starting ACT Water dashboard v{}", env!("CARGO_PKG_VERSION"));
    match &config_path {
        Some(path) => tracing::info!("Loaded config from {:?}", path),
        None => tracing::info!("Using default config with environment overrides"),
    }

    let context = DashboardContext::load(&config)
        .await
        .context("failed to load dashboard data")?;

    let state = AppState::new(Arc::new(context), config.api.clone());
    serve(state, &config.api).await?;

    tracing::info!("ACT Water dashboard stopped");
    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("act_water={},tower_http={}", logging.level, logging.level).into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    if logging.is_json() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
