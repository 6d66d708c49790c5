use std::{future::IntoFuture, net::SocketAddr, path::PathBuf, sync::Arc, time::Duration};

use anyhow::Result;
use clap::Parser;
use tokio::{signal, sync::watch};

use login_server::{
    build_app, config::AppConfig, services::database::Database, utils,
    utils::shutdown::drain_with_timeout,
};

/// Department login server
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// Path to the YAML config file
    #[arg(long, default_value = "./config/dev.yml")]
    config: PathBuf,
}

/// Graceful shutdown signal handler
///
/// Resolves on Ctrl+C or SIGTERM so in-flight requests can complete.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
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
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down gracefully...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down gracefully...");
        },
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();
    utils::logging::init_logging()?;

    let config = Arc::new(AppConfig::load(&args.config)?);
    let version = config.app.version.clone();
    tracing::info!(version = %version, "server init...");

    let database = Database::connect(&config.database).await?;

    let app = build_app(config.clone(), Arc::new(database.clone()));

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(version = %version, "server {} is running at {}", version, addr);

    let drain_timeout = Duration::from_secs(config.server.shutdown_timeout_secs);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        shutdown_signal().await;
        let _ = shutdown_tx.send(true);
    });

    let mut server_rx = shutdown_rx.clone();
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = server_rx.changed().await;
        })
        .into_future();
    let mut drain_rx = shutdown_rx;
    let shutdown_started = async move {
        let _ = drain_rx.changed().await;
    };

    let served = drain_with_timeout(server, shutdown_started, drain_timeout).await;
    if served.is_none() {
        tracing::warn!(
            timeout_secs = config.server.shutdown_timeout_secs,
            "Requests still in flight after shutdown timeout, forcing exit"
        );
    }

    if tokio::time::timeout(drain_timeout, database.close())
        .await
        .is_err()
    {
        tracing::warn!("Database pool did not close within shutdown timeout");
    }

    if let Some(served) = served {
        served?;
    }

    Ok(())
}
