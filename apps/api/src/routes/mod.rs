//! # Routes Module
//!
//! Router assembly for the Storefront API.
//!
//! | Method | Path | Auth | Handler |
//! |--------|------|------|---------|
//! | `POST`   | `/register`      | none        | `auth::register` |
//! | `POST`   | `/login`         | none        | `auth::login` |
//! | `POST`   | `/logout`        | any session | `auth::logout` |
//! | `POST`   | `/products`      | admin       | `products::create_product` |
//! | `GET`    | `/products`      | any session | `products::list_products` |
//! | `GET`    | `/products/:id`  | any session | `products::get_product` |
//! | `PUT`    | `/products/:id`  | admin       | `products::update_product` |
//! | `DELETE` | `/products/:id`  | admin       | `products::delete_product` |
//! | `POST`   | `/orders`        | any session | `orders::create_order` |
//! | `PUT`    | `/orders/:id`    | any session | `orders::update_order_status` |
//! | `GET`    | `/health`        | none        | liveness probe |

use axum::routing::get;
use axum::Router;

use crate::state::AppState;

pub mod auth;
pub mod orders;
pub mod products;

/// Build the full application router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .merge(auth::router())
        .merge(products::router())
        .merge(orders::router())
}

/// GET /health - liveness probe, unauthenticated.
async fn health() -> &'static str {
    "ok"
}
