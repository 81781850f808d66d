//! Intake API Gateway
//!
//! The main entry point for all external API requests.
//! Handles:
//! - Request routing for the form/entry/answer/review contract
//! - Observability (logging, metrics, tracing)
//! - Graceful shutdown

mod handlers;

use axum::{
    extract::{MatchedPath, Request},
    middleware::{self, Next},
    response::Response,
    routing::{delete, get, post},
    Router,
};
use intake_common::{
    config::AppConfig,
    db::{DbPool, Repository},
    metrics,
};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub repo: Repository,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load()?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.observability.log_level));

    if config.observability.json_logging {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    info!("Starting Intake API Gateway v{}", intake_common::VERSION);

    // Initialize metrics exporter
    if config.observability.metrics_port > 0 {
        let metrics_addr = SocketAddr::from(([0, 0, 0, 0], config.observability.metrics_port));
        PrometheusBuilder::new()
            .with_http_listener(metrics_addr)
            .set_buckets_for_metric(
                Matcher::Suffix("duration_seconds".to_string()),
                metrics::LATENCY_BUCKETS,
            )?
            .install()?;
        info!("Prometheus exporter listening on {}", metrics_addr);
    }
    metrics::register_metrics();

    // Initialize database connection
    let db = DbPool::new(&config.database).await?;
    db.ensure_schema().await?;
    let repo = Repository::new(db);

    // Create app state
    let config = Arc::new(config);
    let state = AppState {
        config: config.clone(),
        repo,
    };

    // Build the router
    let app = create_router(state);

    // Start the server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Create the main application router
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Health endpoints
        .route("/health", get(handlers::health::health))
        .route("/ready", get(handlers::health::ready))

        // Form catalog endpoints
        .route("/forms", post(handlers::forms::create_form))
        .route("/forms/feed", get(handlers::forms::list_forms))
        .route(
            "/forms/{form_id}",
            get(handlers::forms::get_form)
                .put(handlers::forms::update_form)
                .delete(handlers::forms::delete_form),
        )

        // Question endpoints
        .route(
            "/forms/{form_id}/questions",
            post(handlers::questions::append_question),
        )
        .route(
            "/forms/{form_id}/questions/{question_id}",
            delete(handlers::questions::delete_question),
        )

        // Entry endpoints
        .route(
            "/forms/entry/application",
            post(handlers::entries::create_entry),
        )
        .route(
            "/forms/entry/answer/text",
            post(handlers::answers::record_text_answer),
        )
        .route("/forms/{form_id}/entries", get(handlers::entries::list_entries))
        .route(
            "/forms/{form_id}/entries/{entry_id}",
            get(handlers::entries::get_entry),
        )

        // Review endpoints
        .route(
            "/forms/entries/{entry_id}/review",
            post(handlers::reviews::upsert_review).get(handlers::reviews::get_review),
        );

    // Compose the app
    api_routes
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(middleware::from_fn(track_metrics)),
        )
        .with_state(state)
}

/// Record request count and latency per matched route
async fn track_metrics(req: Request, next: Next) -> Response {
    let method = req.method().to_string();
    let endpoint = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());

    let tracker = metrics::RequestMetrics::start(&method, &endpoint);
    let response = next.run(req).await;
    tracker.finish(response.status().as_u16());

    response
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, starting shutdown..."),
        _ = terminate => info!("Received SIGTERM, starting shutdown..."),
    }
}
