//! # Error Types
//!
//! Domain-specific error types for storefront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  storefront-core errors (this file)                                    │
//! │  └── ValidationError  - Payload validation failures (→ 400)            │
//! │                                                                         │
//! │  storefront-db errors (separate crate)                                 │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  apps/api errors                                                       │
//! │  └── ApiError         - What clients see (status + JSON body)          │
//! │                                                                         │
//! │  Flow: ValidationError ──┐                                             │
//! │        DbError ──────────┴──► ApiError ──► {"error": "..."}            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Payload validation errors.
///
/// Validation stops at the first failing field, so a single error carries
/// the whole story for the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// String field missing, not a string, or empty after trimming.
    #[error("Invalid or missing \"{0}\" field")]
    InvalidField(&'static str),

    /// Numeric field missing, not a number, or not strictly positive.
    #[error("Invalid or missing \"{0}\" field. Must be a positive number")]
    InvalidNumber(&'static str),

    /// Email field present but not an address.
    #[error("Invalid \"email\" field. Must be a valid email address")]
    InvalidEmail,

    /// Create-order call with no line items.
    #[error("Order must contain at least one line item")]
    EmptyOrder,

    /// Line-item quantity is zero or negative.
    #[error("Quantity for product {product_id} must be a positive integer")]
    InvalidQuantity { product_id: i64 },

    /// Line-item quantity exceeds the per-product cap.
    #[error("Quantity for product {product_id} exceeds maximum allowed ({max})")]
    QuantityTooLarge { product_id: i64, max: i64 },

    /// Too many distinct products in one order.
    #[error("Order cannot have more than {max} line items")]
    TooManyItems { max: usize },
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================
