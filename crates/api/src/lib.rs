//! HTTP API server with observability for the booking funnel.
//!
//! Provides REST endpoints for session lifecycle, funnel actions, and the
//! price catalog, with structured logging (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{delete, get, patch, post, put};
use catalog::StandardCatalog;
use domain::FunnelService;
use metrics_exporter_prometheus::PrometheusHandle;
use session_store::{InMemorySessionStore, SessionStore};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use routes::sessions::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S: SessionStore + 'static>(
    state: Arc<AppState<S>>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/catalog", get(routes::catalog::get::<S>))
        .route("/sessions", post(routes::sessions::create::<S>))
        .route("/sessions/{id}", get(routes::sessions::get::<S>))
        .route("/sessions/{id}", delete(routes::sessions::discard::<S>))
        .route("/sessions/{id}/quote", get(routes::sessions::quote::<S>))
        .route(
            "/sessions/{id}/package",
            post(routes::sessions::select_package::<S>),
        )
        .route(
            "/sessions/{id}/addons/toggle",
            post(routes::sessions::toggle_addon::<S>),
        )
        .route(
            "/sessions/{id}/addons/quantity",
            post(routes::sessions::set_addon_quantity::<S>),
        )
        .route(
            "/sessions/{id}/coupon",
            post(routes::sessions::apply_coupon::<S>),
        )
        .route(
            "/sessions/{id}/coupon",
            delete(routes::sessions::remove_coupon::<S>),
        )
        .route(
            "/sessions/{id}/loyalty",
            post(routes::sessions::set_loyalty::<S>),
        )
        .route(
            "/sessions/{id}/travel",
            post(routes::sessions::set_travel::<S>),
        )
        .route(
            "/sessions/{id}/property",
            post(routes::sessions::set_property::<S>),
        )
        .route(
            "/sessions/{id}/schedule",
            post(routes::sessions::set_schedule::<S>),
        )
        .route(
            "/sessions/{id}/form",
            patch(routes::sessions::update_form::<S>),
        )
        .route(
            "/sessions/{id}/advance",
            post(routes::sessions::advance::<S>),
        )
        .route("/sessions/{id}/back", post(routes::sessions::back::<S>))
        .route("/sessions/{id}/step", put(routes::sessions::goto_step::<S>))
        .route(
            "/sessions/{id}/abandon",
            post(routes::sessions::abandon::<S>),
        )
        .route(
            "/sessions/{id}/recovery-email",
            post(routes::sessions::recovery_email::<S>),
        )
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates the default application state backed by the in-memory store and
/// the standard price catalog.
pub fn create_default_state(store: InMemorySessionStore) -> Arc<AppState<InMemorySessionStore>> {
    Arc::new(AppState {
        funnel: FunnelService::new(store, StandardCatalog::new()),
    })
}
