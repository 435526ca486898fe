//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes for recording checks and building reports
//! - The shared application state
//! - Request extractors, response envelopes and error mapping

pub mod extract;
pub mod response;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use chrono_tz::Tz;
use puc_core::pricing::PriceTable;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// Prices loaded at start-up.
    pub prices: Arc<PriceTable>,
    /// Zone in which check dates and report days are interpreted.
    pub timezone: Tz,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
