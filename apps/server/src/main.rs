//! # HZ Stock Server
//!
//! ```text
//! load config ──► open SQLite (+ migrations) ──► bind ──► serve until SIGINT/SIGTERM
//! ```

use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hz_db::{Database, DbConfig};
use hz_server::{create_app, AppConfig, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "hz_server=debug,hz_db=debug,hz_render=debug,tower_http=info,sqlx=warn".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting HZ Stock server...");

    let config = AppConfig::load()?;
    info!(
        database = %config.database_path().display(),
        output_dir = %config.output_dir.display(),
        business = %config.business_name,
        "Configuration loaded"
    );
    if config.uses_dev_secret() {
        warn!("SECRET_KEY not set, invoice links are signed with the development secret");
    }

    let db_config = DbConfig::new(config.database_path())
        .max_connections(config.db_max_connections);
    let db = Database::new(db_config).await?;
    info!("Database ready");

    tokio::fs::create_dir_all(&config.output_dir).await?;

    let addr = config.bind_address();
    let app = create_app(AppState::new(db.clone(), config));

    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(%err, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!(%err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
