use axum::{extract::State, http::StatusCode, response::Json};
use sea_orm::ConnectionTrait;
use serde_json::{json, Value};

use crate::server::app::AppState;

/// Liveness plus a round trip to the database.
pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let database = match state.app.db().execute_unprepared("SELECT 1").await {
        Ok(_) => "ok",
        Err(err) => {
            tracing::warn!("Health check database probe failed: {}", err);
            "unavailable"
        }
    };

    Ok(Json(json!({
        "status": "healthy",
        "service": "agrirecords",
        "database": database,
        "version": env!("CARGO_PKG_VERSION")
    })))
}
