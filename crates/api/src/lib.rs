//! HTTP layer for the order system.
//!
//! Three routers mirror the system's three processes: the order service
//! (orchestration + idempotency-guarded order store), the payment authority,
//! and the read-only catalog. Each app carries structured request tracing
//! and exposes `/health` and Prometheus `/metrics`.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use domain::{CatalogStore, PaymentStore};
use metrics_exporter_prometheus::PrometheusHandle;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use workflow::{CatalogGateway, PaymentGateway};

use routes::orders::OrderAppState;

fn base_layers(router: Router, metrics_handle: PrometheusHandle, service: &'static str) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::render))
        .with_state(metrics_handle);

    router
        .route("/health", get(move || routes::health::check(service)))
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates the order service router.
pub fn create_order_app<C, P>(
    state: Arc<OrderAppState<C, P>>,
    metrics_handle: PrometheusHandle,
) -> Router
where
    C: CatalogGateway + 'static,
    P: PaymentGateway + 'static,
{
    let router = Router::new()
        .route("/orders", post(routes::orders::create::<C, P>))
        .route("/orders/{id}", get(routes::orders::get::<C, P>))
        .with_state(state);
    base_layers(router, metrics_handle, "order-api")
}

/// Creates the payment authority router.
pub fn create_payment_app(store: PaymentStore, metrics_handle: PrometheusHandle) -> Router {
    let router = Router::new()
        .route("/payments", post(routes::payments::create))
        .route("/payments/{id}", get(routes::payments::get))
        .with_state(store);
    base_layers(router, metrics_handle, "payment-api")
}

/// Creates the catalog service router.
pub fn create_catalog_app(store: CatalogStore, metrics_handle: PrometheusHandle) -> Router {
    let router = Router::new()
        .route("/items", get(routes::catalog::list))
        .route("/items/{id}", get(routes::catalog::get))
        .with_state(store);
    base_layers(router, metrics_handle, "catalog-api")
}

/// Waits for a shutdown signal (SIGINT or SIGTERM).
pub async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("received SIGINT, starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("received SIGTERM, starting graceful shutdown");
        }
    }
}

/// Binds `addr` and serves `app` until a shutdown signal arrives.
pub async fn serve(app: Router, addr: &str) {
    tracing::info!(%addr, "starting server");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind address");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");
    tracing::info!("server shut down gracefully");
}
