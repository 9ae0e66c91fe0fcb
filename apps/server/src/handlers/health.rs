//! Health check handler

use axum::{extract::State, Json};
use serde::Serialize;

use hz_db::migrations::migration_status;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub database: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub migrations: Option<MigrationSummary>,
}

#[derive(Serialize)]
pub struct MigrationSummary {
    pub total: usize,
    pub applied: usize,
}

/// Liveness plus database connectivity and migration state.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let connected = state.db.health_check().await;
    let migrations = if connected {
        migration_status(state.db.pool())
            .await
            .ok()
            .map(|(total, applied)| MigrationSummary { total, applied })
    } else {
        None
    };

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: if connected { "connected" } else { "disconnected" }.to_string(),
        migrations,
    })
}
