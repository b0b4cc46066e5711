//! # Repository Module
//!
//! Database repository implementations for Storefront.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  HTTP handler                                                          │
//! │       │                                                                 │
//! │       │  db.orders().create(&items)                                    │
//! │       ▼                                                                 │
//! │  OrderRepository                                                       │
//! │  ├── create(&self, items)       ← one transaction, all-or-nothing     │
//! │  ├── get_by_id(&self, id)                                              │
//! │  └── update_status(&self, id, status)                                  │
//! │       │                                                                 │
//! │       │  SQL                                                            │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`product::ProductRepository`] - Product CRUD
//! - [`order::OrderRepository`] - Transactional order creation, status updates
//! - [`user::UserRepository`] - User rows (uniqueness via constraints)
//! - [`session::SessionRepository`] - Session token issue/resolve/revoke

pub mod order;
pub mod product;
pub mod session;
pub mod user;
