//! # HZ Stock Server
//!
//! HTTP front for the shop's catalog, ledger and documents.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  form POST ──► handler ──► InventoryService ──► hz-db (1 transaction)  │
//! │                                  │                                      │
//! │                                  ▼                                      │
//! │                           DocumentService ──► hz-core layout           │
//! │                                  │                 │                    │
//! │                                  │                 ▼                    │
//! │                                  │          hz-render (blocking pool)  │
//! │                                  ▼                                      │
//! │                       output/<file> ──► streamed attachment            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod links;
pub mod routes;
pub mod services;

use std::sync::Arc;

use hz_db::Database;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use links::DownloadLinks;
pub use routes::create_app;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub config: Arc<AppConfig>,
    pub links: Arc<DownloadLinks>,
}

impl AppState {
    pub fn new(db: Database, config: AppConfig) -> Self {
        let links = DownloadLinks::new(config.secret_key.clone(), config.invoice_link_ttl_secs);
        AppState {
            db,
            config: Arc::new(config),
            links: Arc::new(links),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use hz_db::DbConfig;
    use tempfile::TempDir;

    /// In-memory database plus a scratch output directory.
    pub async fn test_state() -> (AppState, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("output");
        let config = AppConfig::from_lookup(|var| match var {
            "HZ_OUTPUT_DIR" => Some(output.display().to_string()),
            "SECRET_KEY" => Some("test-secret".to_string()),
            _ => None,
        })
        .unwrap();

        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        (AppState::new(db, config), dir)
    }
}
