use anyhow::Result;
use axum::{extract::DefaultBodyLimit, middleware, routing::get, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use std::{net::SocketAddr, sync::Arc};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::{
    auth::{self, PasswordVerifier, SharedVerifier},
    config::Config,
    handlers::{self, admin, booking, health, pages, AppState},
    metrics,
    signals::setup_signal_handlers,
    store::BookingStore,
    templates::Templates,
};

/// Form posts are a handful of short fields
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Start the booking site
///
/// This function:
/// 1. Initializes metrics
/// 2. Opens the booking store (creating the schema if needed)
/// 3. Builds the router with the admin verifier
/// 4. Serves requests until SIGTERM/SIGINT, then drains and closes the store
pub async fn start_server(config: Config) -> Result<()> {
    info!("Initializing Prometheus metrics...");
    let metrics_handle = Arc::new(metrics::init_metrics()?);

    info!(database = %config.database.path, "Opening booking store");
    let store = BookingStore::from_config(&config.database).await?;

    let verifier = PasswordVerifier::new(config.admin.password.clone());
    if !verifier.is_configured() {
        warn!("No admin password configured, admin pages will reject every request");
    }

    let templates = Arc::new(Templates::new()?);

    let (shutdown_tx, signal_handle) = setup_signal_handlers();
    let mut shutdown_rx = shutdown_tx.subscribe();

    let app_state = AppState {
        store: store.clone(),
        templates,
    };
    let app = create_router(app_state, Arc::new(verifier), metrics_handle);

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    info!("Starting school booking site on http://{}", addr);
    info!(bookings = store.count().await?, "Booking store ready");

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.recv().await;
            info!("Shutdown signal received, draining connections...");
        })
        .await?;

    signal_handle.await?;
    store.close().await;
    info!("Server stopped gracefully");

    Ok(())
}

/// Create the Axum router with all routes and middleware
pub fn create_router(
    app_state: AppState,
    verifier: SharedVerifier,
    metrics_handle: Arc<PrometheusHandle>,
) -> Router {
    let admin_routes = Router::new()
        .route("/admin", get(admin::admin_page))
        .route("/api/bookings", get(admin::list_bookings))
        .layer(middleware::from_fn_with_state(verifier, auth::admin_middleware));

    let site = Router::new()
        .route("/", get(pages::home))
        .route("/plans", get(pages::plans))
        .route("/book", get(booking::book_form).post(booking::submit_booking))
        .route("/api/quote", get(booking::quote))
        .route("/ready", get(health::readiness_check))
        .merge(admin_routes)
        .with_state(app_state);

    Router::new()
        .route("/health", get(health::health_check))
        .route("/metrics", get(handlers::metrics_handler::metrics))
        .with_state(metrics_handle)
        .merge(site)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
}
