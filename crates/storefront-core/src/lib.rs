//! # storefront-core: Pure Business Logic for Storefront
//!
//! This crate is the heart of the Storefront backend. It contains domain
//! types and business rules as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Storefront Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  apps/api (Axum handlers)                       │   │
//! │  │   register, login, product CRUD, order creation                 │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ storefront-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐   ┌───────────────┐   ┌───────────────────┐   │   │
//! │  │   │   types   │   │  validation   │   │      error        │   │   │
//! │  │   │  Product  │   │ payload shape │   │  ValidationError  │   │   │
//! │  │   │  Order    │   │ line items    │   │                   │   │   │
//! │  │   │  User     │   │               │   │                   │   │   │
//! │  │   └───────────┘   └───────────────┘   └───────────────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                storefront-db (Database Layer)                   │   │
//! │  │            SQLite queries, migrations, repositories             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Order, User, Role, Identity, etc.)
//! - [`error`] - Domain error types
//! - [`validation`] - Payload and business rule validation

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::ValidationError;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Status assigned to a newly created order.
///
/// Statuses are an open-ended set of labels; only the initial value is
/// fixed. `PUT /orders/{id}` replaces the status with any caller-supplied
/// string.
pub const DEFAULT_ORDER_STATUS: &str = "pending";

/// Maximum number of distinct products in a single order.
pub const MAX_ORDER_ITEMS: usize = 100;

/// Maximum quantity of a single product in an order.
pub const MAX_ITEM_QUANTITY: i64 = 999;
