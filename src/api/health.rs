use axum::{Json, extract::State};
use serde_json::{Value, json};

use crate::infrastructure::AppState;

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up; `database` reports connectivity")
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let database = match state.db().ping().await {
        Ok(()) => "ok",
        Err(e) => {
            tracing::warn!("Database ping failed: {}", e);
            "unavailable"
        }
    };

    Json(json!({
        "status": "ok",
        "service": "blog-api",
        "version": env!("CARGO_PKG_VERSION"),
        "database": database
    }))
}
