//! # Validation Module
//!
//! Payload validation for Storefront.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Authorization (apps/api extractors)                          │
//! │  ├── 401 for anonymous, 403 for non-admin                              │
//! │  └── Runs BEFORE anything here - a malformed body from a               │
//! │      non-admin reads as 403, never 400                                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (pure shape + rule validation)                   │
//! │  ├── Field-by-field, first failure wins                                │
//! │  └── name checked before description checked before price              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / CHECK constraints                                      │
//! │  ├── UNIQUE constraints (username, email)                              │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Handlers pass raw `serde_json::Value` bodies in so that type mismatches
//! ("price": "abc") produce the same field message as a missing field,
//! instead of a deserializer error.

use serde_json::Value;

use crate::error::{ValidationError, ValidationResult};
use crate::types::{Credentials, OrderItemDraft, ProductDraft, ProductPatch, RegistrationDraft};
use crate::{MAX_ITEM_QUANTITY, MAX_ORDER_ITEMS};

// =============================================================================
// Field Primitives
// =============================================================================

/// Extracts a required string field, trimmed and non-empty.
fn string_field(payload: &Value, field: &'static str) -> ValidationResult<String> {
    match payload.get(field) {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.trim().to_string()),
        _ => Err(ValidationError::InvalidField(field)),
    }
}

/// Extracts a required strictly-positive numeric field.
fn positive_number_field(payload: &Value, field: &'static str) -> ValidationResult<f64> {
    match payload.get(field).and_then(Value::as_f64) {
        Some(n) if n.is_finite() && n > 0.0 => Ok(n),
        _ => Err(ValidationError::InvalidNumber(field)),
    }
}

// =============================================================================
// Product Payloads
// =============================================================================

/// Validates a full product payload for create.
///
/// ## Rules
/// - `name`: string, non-empty after trimming
/// - `description`: string, non-empty after trimming
/// - `price`: number, strictly positive
///
/// Fields are checked in that order and validation stops at the first
/// failure, so the caller always gets the first failing field's message.
pub fn validate_product_payload(payload: &Value) -> ValidationResult<ProductDraft> {
    let name = string_field(payload, "name")?;
    let description = string_field(payload, "description")?;
    let price = positive_number_field(payload, "price")?;

    Ok(ProductDraft {
        name,
        description,
        price,
    })
}

/// Validates a partial product payload for update.
///
/// Only fields present in the payload are validated and applied; each
/// present field is subject to the same rule as on create, in the same
/// first-failure-wins order. An explicit `null` counts as present and
/// invalid.
pub fn validate_product_patch(payload: &Value) -> ValidationResult<ProductPatch> {
    let mut patch = ProductPatch::default();

    if payload.get("name").is_some() {
        patch.name = Some(string_field(payload, "name")?);
    }
    if payload.get("description").is_some() {
        patch.description = Some(string_field(payload, "description")?);
    }
    if payload.get("price").is_some() {
        patch.price = Some(positive_number_field(payload, "price")?);
    }

    Ok(patch)
}

// =============================================================================
// Auth Payloads
// =============================================================================

/// Validates a registration payload.
///
/// ## Rules
/// - `username`: string, non-empty after trimming
/// - `email`: string, non-empty after trimming, must contain `@`
/// - `password`: string, non-empty (not trimmed - leading/trailing
///   whitespace is significant in passwords)
pub fn validate_registration(payload: &Value) -> ValidationResult<RegistrationDraft> {
    let username = string_field(payload, "username")?;
    let email = string_field(payload, "email")?;
    if !email.contains('@') {
        return Err(ValidationError::InvalidEmail);
    }
    let password = password_field(payload)?;

    Ok(RegistrationDraft {
        username,
        email,
        password,
    })
}

/// Validates a login payload: `email` and `password` must be present.
///
/// No format checking beyond presence - credential verification decides
/// whether the pair is any good, and it answers identically for unknown
/// emails and wrong passwords.
pub fn validate_credentials(payload: &Value) -> ValidationResult<Credentials> {
    let email = string_field(payload, "email")?;
    let password = password_field(payload)?;

    Ok(Credentials { email, password })
}

fn password_field(payload: &Value) -> ValidationResult<String> {
    match payload.get("password") {
        Some(Value::String(s)) if !s.is_empty() => Ok(s.clone()),
        _ => Err(ValidationError::InvalidField("password")),
    }
}

// =============================================================================
// Order Line Items
// =============================================================================

/// Validates and normalizes the line items of a create-order call.
///
/// ## Rules
/// - At least one line item
/// - Every quantity strictly positive
/// - Duplicate `product_id`s are merged by summing quantities, so the
///   stored line items keep the one-row-per-product identity
/// - After merging: per-product quantity at most [`MAX_ITEM_QUANTITY`],
///   at most [`MAX_ORDER_ITEMS`] distinct products
///
/// Returns the merged list in first-seen order.
pub fn validate_order_items(items: &[OrderItemDraft]) -> ValidationResult<Vec<OrderItemDraft>> {
    if items.is_empty() {
        return Err(ValidationError::EmptyOrder);
    }

    let mut merged: Vec<OrderItemDraft> = Vec::new();
    for item in items {
        if item.quantity <= 0 {
            return Err(ValidationError::InvalidQuantity {
                product_id: item.product_id,
            });
        }
        match merged.iter_mut().find(|m| m.product_id == item.product_id) {
            Some(existing) => existing.quantity += item.quantity,
            None => merged.push(*item),
        }
    }

    for item in &merged {
        if item.quantity > MAX_ITEM_QUANTITY {
            return Err(ValidationError::QuantityTooLarge {
                product_id: item.product_id,
                max: MAX_ITEM_QUANTITY,
            });
        }
    }
    if merged.len() > MAX_ORDER_ITEMS {
        return Err(ValidationError::TooManyItems {
            max: MAX_ORDER_ITEMS,
        });
    }

    Ok(merged)
}

// =============================================================================
// Unit Tests
// =============================================================================
