//! # storefront-api - Axum HTTP Application
//!
//! The HTTP surface of the Storefront backend: product CRUD, order
//! creation, and session-based auth over JSON.
//!
//! ## Route Groups
//!
//! - `/register`, `/login`, `/logout` - authentication
//! - `/products` - catalog CRUD (reads: any session; writes: admin)
//! - `/orders` - order creation and status updates (any session)
//! - `/health` - liveness probe (unauthenticated)
//!
//! ## Crate Policy
//!
//! - No business logic in route handlers - validation lives in
//!   `storefront-core`, persistence in `storefront-db`.
//! - All errors map to an HTTP status and `{"error": "..."}` via
//!   [`ApiError`].
//! - Authorization extractors run before body parsing, so 401/403 beat
//!   400 by construction.

pub mod auth;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

use axum::Router;
use tower_http::trace::TraceLayer;

/// Build the application router with its middleware stack.
pub fn app(state: AppState) -> Router {
    routes::router()
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
