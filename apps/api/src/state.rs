//! # Application State
//!
//! Shared state for the Axum application.

use storefront_db::Database;

/// Shared application state passed to all route handlers.
///
/// Cheap to clone; the database handle is a pool behind the scenes.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Database handle providing repository access.
    pub db: Database,
}

impl AppState {
    /// Create a new application state.
    pub fn new(db: Database) -> Self {
        AppState { db }
    }
}
