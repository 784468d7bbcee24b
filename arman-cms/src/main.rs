//! Arman CMS - main entry point

use std::path::PathBuf;

use anyhow::{Context, Result};
use arman_common::config::{Config, ConfigOverrides, TomlConfig, DEFAULT_CONFIG_FILE};
use arman_common::db::init_database;
use arman_cms::{build_router, AppState};
use clap::Parser;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Command-line arguments for arman-cms
#[derive(Parser, Debug)]
#[command(name = "arman-cms")]
#[command(about = "Content management service for Arman")]
#[command(version)]
struct Args {
    /// TOML configuration file
    #[arg(short, long, env = "ARMAN_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Address to bind to
    #[arg(long, env = "ARMAN_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "ARMAN_PORT")]
    port: Option<u16>,

    /// SQLite database file
    #[arg(short, long, env = "ARMAN_DATABASE")]
    database: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long)]
    log_level: Option<String>,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            host: self.host.clone(),
            port: self.port,
            database_path: self.database.clone(),
            log_level: self.log_level.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // The default log level comes from configuration, so tracing starts
    // after the config file has been read.
    let toml_config = TomlConfig::load(&args.config)
        .with_context(|| format!("Failed to load {}", args.config.display()))?;
    let config = Config::resolve(toml_config, args.overrides());

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                EnvFilter::new(format!(
                    "arman_cms={level},arman_common={level},tower_http={level}",
                    level = config.logging.level
                ))
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting Arman CMS v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    if !args.config.exists() {
        warn!(
            "Config file {} not found, using compiled defaults",
            args.config.display()
        );
    }

    info!("Database: {}", config.database_path.display());

    let pool = init_database(&config.database_path, &config.database)
        .await
        .context("Failed to initialize database")?;

    let app = build_router(AppState::new(pool.clone()));

    let addr = config.bind_address();
    info!("Starting HTTP server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    pool.close().await;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_environment_fallbacks() {
        std::env::set_var("ARMAN_PORT", "6123");
        std::env::set_var("ARMAN_DATABASE", "/tmp/arman-env.db");

        let args = Args::try_parse_from(["arman-cms"]).unwrap();

        std::env::remove_var("ARMAN_PORT");
        std::env::remove_var("ARMAN_DATABASE");

        assert_eq!(args.port, Some(6123));
        assert_eq!(args.database, Some(PathBuf::from("/tmp/arman-env.db")));
        assert_eq!(args.host, None);
    }

    #[test]
    #[serial]
    fn test_cli_wins_over_environment() {
        std::env::set_var("ARMAN_PORT", "6123");

        let args = Args::try_parse_from(["arman-cms", "--port", "7000", "--log-level", "debug"])
            .unwrap();

        std::env::remove_var("ARMAN_PORT");

        let overrides = args.overrides();
        assert_eq!(overrides.port, Some(7000));
        assert_eq!(overrides.log_level.as_deref(), Some("debug"));
        assert_eq!(args.config, PathBuf::from(DEFAULT_CONFIG_FILE));
    }
}
