//! # Domain Types
//!
//! Core domain types used throughout Storefront.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │      Order      │   │      User       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (i64)       │   │  id (i64)       │   │  id (i64)       │       │
//! │  │  name           │   │  order_date     │   │  username       │       │
//! │  │  description    │   │  total_price    │   │  email          │       │
//! │  │  price          │   │  status         │   │  role           │       │
//! │  └─────────────────┘   └────────┬────────┘   └─────────────────┘       │
//! │                                 │ owns                                  │
//! │                        ┌────────┴────────┐   ┌─────────────────┐       │
//! │                        │   OrderItem     │   │      Role       │       │
//! │                        │  ─────────────  │   │  ─────────────  │       │
//! │                        │  (order_id,     │   │  Admin          │       │
//! │                        │   product_id)   │   │  Client         │       │
//! │                        │  quantity       │   └─────────────────┘       │
//! │                        │  unit_price     │                             │
//! │                        └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Line items snapshot the product price at order time; the order total is
//! derived from those snapshots once and never recomputed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Role
// =============================================================================

/// A user's role, as a closed enumeration.
///
/// Authorization decisions go through [`Role::is_admin`], never through
/// string comparison. Stored as lowercase text in the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// May mutate the product catalog in addition to client rights.
    Admin,
    /// May browse the catalog and place orders.
    Client,
}

impl Role {
    /// Capability predicate for catalog mutation.
    #[inline]
    pub const fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::Client
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog.
///
/// Serializes as `{id, name, description, price}`; `created_at` is internal
/// bookkeeping and stays off the wire.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Unique identifier, assigned by the store on insert. Immutable.
    pub id: i64,

    /// Display name. Non-empty after trimming.
    pub name: String,

    /// Description. Non-empty after trimming.
    pub description: String,

    /// Unit price. Strictly positive.
    pub price: f64,

    /// When the product was created.
    #[serde(skip_serializing)]
    pub created_at: DateTime<Utc>,
}

/// A validated payload for creating a product.
///
/// Produced by [`crate::validation::validate_product_payload`]; fields are
/// already trimmed and range-checked.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: f64,
}

/// A validated partial update for a product.
///
/// Only fields present in the request payload are set; each was validated
/// with the same rules as on create.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
}

impl ProductPatch {
    /// True when the patch carries no changes.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.price.is_none()
    }
}

// =============================================================================
// Order
// =============================================================================

/// An order header.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,

    /// Set at creation. Immutable.
    pub order_date: DateTime<Utc>,

    /// Sum over line items of `unit_price * quantity`, computed once inside
    /// the creation transaction and frozen thereafter. Later product price
    /// changes do not touch it.
    pub total_price: f64,

    /// Open-ended status label. Defaults to
    /// [`crate::DEFAULT_ORDER_STATUS`].
    pub status: String,
}

/// A line item as stored: one product within one order.
///
/// Composite identity `(order_id, product_id)` - a product appears at most
/// once per order. Created only as part of order creation, never
/// independently.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct OrderItem {
    pub order_id: i64,
    pub product_id: i64,
    pub quantity: i64,
    /// Product price frozen at order time.
    pub unit_price: f64,
}

/// A line item expanded with the product name, for order responses.
///
/// Serializes as `{id, name, quantity}` where `id` is the product id.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct OrderLine {
    #[serde(rename = "id")]
    pub product_id: i64,
    pub name: String,
    pub quantity: i64,
}

/// One requested `(product, quantity)` pair in a create-order call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct OrderItemDraft {
    pub product_id: i64,
    pub quantity: i64,
}

// =============================================================================
// User
// =============================================================================

/// A registered user.
///
/// Serializes as `{id, username, email, role}` - the password hash never
/// leaves the process.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct User {
    pub id: i64,

    /// Globally unique.
    pub username: String,

    /// Globally unique.
    pub email: String,

    /// Argon2 salted hash of the password. Never the raw value.
    #[serde(skip_serializing)]
    pub password_hash: String,

    pub role: Role,

    #[serde(skip_serializing)]
    pub created_at: DateTime<Utc>,
}

/// A validated registration payload. The password is still plaintext here;
/// hashing happens at the edge, just before insert.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistrationDraft {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// A validated login payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

// =============================================================================
// Identity
// =============================================================================

/// The user a session resolves to.
///
/// Every protected request carries an `Identity`; requests without a live
/// session are anonymous and never reach a handler. Sessions are resolved
/// from an explicit bearer token - there is no ambient login state.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Identity {
    pub user_id: i64,
    pub username: String,
    pub role: Role,
}

impl Identity {
    /// Capability predicate for catalog mutation.
    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
