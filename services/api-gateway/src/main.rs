use anyhow::Result;
use axum::{
    extract::{DefaultBodyLimit, State},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    serve, Router,
};
use specmatch_utils::{init_logging, AppConfig};
use std::{sync::Arc, time::Duration};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

mod handlers;
mod metrics;
mod middleware;
mod routes;

use handlers::{health_check, index, upload_and_compare};
use metrics::Metrics;
use middleware::*;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        eprintln!("Failed to load configuration ({}), using defaults", e);
        AppConfig::default()
    });

    // Initialize logging
    init_logging(&config.logging)?;
    info!("Starting Specmatch API Gateway");

    let state = AppState::new(config)?;
    let app = create_app(state.clone());

    // Start server
    let addr = state.config.bind_address();
    let listener = TcpListener::bind(&addr).await?;
    info!("API Gateway listening on {}", addr);

    serve(listener, app).await?;

    Ok(())
}

fn create_app(state: AppState) -> Router {
    let config = &state.config;

    let mut app = Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/upload_and_compare", post(upload_and_compare));

    if config.monitoring.metrics_enabled {
        app = app.route("/metrics", get(metrics_handler));
    }

    app
        // API routes
        .nest("/api/v1", routes::create_api_routes())
        
        // Middleware stack
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods([Method::GET, Method::POST])
                        .allow_headers([header::CONTENT_TYPE])
                        .expose_headers([header::CONTENT_DISPOSITION])
                )
                .layer(TimeoutLayer::new(Duration::from_secs(config.server.timeout_seconds)))
                .layer(DefaultBodyLimit::max(config.server.max_request_size))
                .layer(axum::middleware::from_fn(request_id_middleware))
                .layer(axum::middleware::from_fn(error_handling_middleware))
        )
        
        // Application state
        .with_state(state)
}

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self> {
        let metrics = Metrics::new(&config.monitoring.prometheus_namespace)?;
        Ok(Self {
            config,
            metrics: Arc::new(metrics),
        })
    }
}

async fn metrics_handler(State(state): State<AppState>) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, prometheus::TEXT_FORMAT)],
        state.metrics.render(),
    )
        .into_response()
}
