//! # Tally API
//!
//! REST server for the Tally point of sale.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Tally API Server                               │
//! │                                                                         │
//! │  SPA ──► HTTP (5000) ──► CorsLayer ──► TraceLayer ──► Router           │
//! │                                                        │                │
//! │                       ApiJson ──► tally_core::validation                │
//! │                                                        │                │
//! │                                                        ▼                │
//! │                                            tally_db::Database (SQLite)  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The binary in `main.rs` owns startup and shutdown; everything needed to
//! build the [`Router`] lives here so tests can drive it without a socket.

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod state;

use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use config::{ApiConfig, ConfigError};
pub use error::{ApiError, ApiResult};
pub use state::AppState;

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/health", get(handlers::health::health))
        .route(
            "/cashiers",
            get(handlers::cashiers::list).post(handlers::cashiers::create),
        )
        .route(
            "/products",
            get(handlers::products::list).post(handlers::products::create),
        )
        .route("/customers", get(handlers::customers::list))
        .route(
            "/transactions",
            get(handlers::transactions::list).post(handlers::transactions::create),
        )
        .route("/transactions/{id}", get(handlers::transactions::get));

    Router::new()
        .nest("/api", api)
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        // the frontend is served from another origin
        .layer(CorsLayer::permissive())
        .with_state(state)
}
