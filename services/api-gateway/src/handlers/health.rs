use axum::{extract::State, response::Json};
use serde_json::{json, Value};
use specmatch_utils::ScratchSpace;

use crate::AppState;

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "specmatch-api-gateway",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

pub async fn detailed_health_check(State(state): State<AppState>) -> Json<Value> {
    let mut health_status = json!({
        "status": "healthy",
        "service": "specmatch-api-gateway",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
        "checks": {}
    });

    // Uploads need writable scratch space
    let scratch_root = state.config.uploads.scratch_root.clone();
    let scratch_status = match tokio::task::spawn_blocking(move || {
        ScratchSpace::new(scratch_root.as_deref())
            .and_then(|scratch| scratch.persist("health", "probe.txt", b"ok").map(|_| ()))
    })
    .await
    {
        Ok(Ok(())) => json!({"status": "healthy", "message": "Writable"}),
        Ok(Err(e)) => json!({"status": "unhealthy", "message": e.to_string()}),
        Err(e) => json!({"status": "unhealthy", "message": e.to_string()}),
    };
    let healthy = scratch_status["status"] == "healthy";
    health_status["checks"]["scratch_space"] = scratch_status;

    if !healthy {
        health_status["status"] = json!("degraded");
    }

    Json(health_status)
}
