//! # Integration Tests for storefront-api
//!
//! Drives the full router against an in-memory database: auth flows,
//! authorization ordering (403 before validation), product CRUD, order
//! creation atomicity, and the frozen-total invariant.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use storefront_api::{app, AppState};
use storefront_core::Role;
use storefront_db::{Database, DbConfig};

// -- Helpers ------------------------------------------------------------------

/// Build the test app on a fresh in-memory database. The database handle
/// is returned too, for direct state assertions.
async fn test_app() -> (axum::Router, Database) {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    let router = app(AppState::new(db.clone()));
    (router, db)
}

/// Insert a user directly and open a session for them, bypassing the HTTP
/// flow. Login/logout have their own tests.
async fn seed_session(db: &Database, username: &str, role: Role) -> String {
    let hash = storefront_api::auth::hash_password("password").unwrap();
    let user = db
        .users()
        .insert(username, &format!("{}@example.com", username), &hash, role)
        .await
        .unwrap();
    db.sessions().create(user.id).await.unwrap().token
}

/// Send one request; returns the status and the JSON body (Null when the
/// body is empty or not JSON).
async fn send(
    app: &axum::Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

/// Create a product as admin; returns its id.
async fn create_product(app: &axum::Router, admin: &str, name: &str, price: f64) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/products",
        Some(admin),
        Some(json!({
            "name": name,
            "description": format!("{} description", name),
            "price": price
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_i64().unwrap()
}

async fn table_count(db: &Database, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(db.pool())
        .await
        .unwrap()
}

// -- Health -------------------------------------------------------------------

#[tokio::test]
async fn health_is_unauthenticated() {
    let (app, _db) = test_app().await;
    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

// -- Registration -------------------------------------------------------------

#[tokio::test]
async fn register_creates_client_user() {
    let (app, _db) = test_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/register",
        None,
        Some(json!({
            "username": "ada",
            "email": "ada@example.com",
            "password": "hunter22"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user"]["username"], "ada");
    assert_eq!(body["user"]["role"], "client");
    // The hash never leaves the process.
    assert!(!body.to_string().contains("password"));
}

#[tokio::test]
async fn register_rejects_missing_fields_in_order() {
    let (app, _db) = test_app().await;

    let (status, body) = send(&app, "POST", "/register", None, Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid or missing \"username\" field");

    let (status, body) = send(
        &app,
        "POST",
        "/register",
        None,
        Some(json!({"username": "ada"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid or missing \"email\" field");

    let (status, body) = send(
        &app,
        "POST",
        "/register",
        None,
        Some(json!({"username": "ada", "email": "ada@example.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid or missing \"password\" field");
}

#[tokio::test]
async fn register_duplicate_email_conflicts() {
    let (app, db) = test_app().await;

    let payload = json!({
        "username": "ada",
        "email": "ada@example.com",
        "password": "hunter22"
    });
    let (status, _) = send(&app, "POST", "/register", None, Some(payload)).await;
    assert_eq!(status, StatusCode::CREATED);

    // Same email, different username.
    let (status, body) = send(
        &app,
        "POST",
        "/register",
        None,
        Some(json!({
            "username": "grace",
            "email": "ada@example.com",
            "password": "hunter22"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "email already exists");

    // No second row was created.
    assert_eq!(db.users().count().await.unwrap(), 1);
}

// -- Login / Logout -----------------------------------------------------------

#[tokio::test]
async fn login_issues_usable_token() {
    let (app, _db) = test_app().await;

    send(
        &app,
        "POST",
        "/register",
        None,
        Some(json!({
            "username": "ada",
            "email": "ada@example.com",
            "password": "hunter22"
        })),
    )
    .await;

    let (status, body) = send(
        &app,
        "POST",
        "/login",
        None,
        Some(json!({"email": "ada@example.com", "password": "hunter22"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap().to_string();

    let (status, _) = send(&app, "GET", "/products", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn login_failures_are_indistinguishable() {
    let (app, _db) = test_app().await;

    send(
        &app,
        "POST",
        "/register",
        None,
        Some(json!({
            "username": "ada",
            "email": "ada@example.com",
            "password": "hunter22"
        })),
    )
    .await;

    let (wrong_pw_status, wrong_pw_body) = send(
        &app,
        "POST",
        "/login",
        None,
        Some(json!({"email": "ada@example.com", "password": "not-it"})),
    )
    .await;
    let (no_user_status, no_user_body) = send(
        &app,
        "POST",
        "/login",
        None,
        Some(json!({"email": "nobody@example.com", "password": "hunter22"})),
    )
    .await;

    assert_eq!(wrong_pw_status, StatusCode::UNAUTHORIZED);
    assert_eq!(no_user_status, StatusCode::UNAUTHORIZED);
    // Byte-identical bodies: no account enumeration.
    assert_eq!(wrong_pw_body, no_user_body);
    assert_eq!(wrong_pw_body["error"], "Invalid email or password");
}

#[tokio::test]
async fn logout_revokes_session() {
    let (app, _db) = test_app().await;

    send(
        &app,
        "POST",
        "/register",
        None,
        Some(json!({
            "username": "ada",
            "email": "ada@example.com",
            "password": "hunter22"
        })),
    )
    .await;
    let (_, body) = send(
        &app,
        "POST",
        "/login",
        None,
        Some(json!({"email": "ada@example.com", "password": "hunter22"})),
    )
    .await;
    let token = body["token"].as_str().unwrap().to_string();

    let (status, _) = send(&app, "POST", "/logout", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    // The token is dead: protected reads and a second logout both 401.
    let (status, _) = send(&app, "GET", "/products", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = send(&app, "POST", "/logout", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// -- Authorization ordering ---------------------------------------------------

#[tokio::test]
async fn product_reads_require_session() {
    let (app, _db) = test_app().await;

    let (status, _) = send(&app, "GET", "/products", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, "GET", "/products/1", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn product_mutation_requires_admin() {
    let (app, db) = test_app().await;
    let client = seed_session(&db, "client", Role::Client).await;

    let valid = json!({"name": "X", "description": "Y", "price": 1.0});

    let (status, _) = send(&app, "POST", "/products", Some(&client), Some(valid.clone())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, "PUT", "/products/1", Some(&client), Some(valid)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, "DELETE", "/products/1", Some(&client), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn forbidden_beats_validation() {
    let (app, db) = test_app().await;
    let client = seed_session(&db, "client", Role::Client).await;

    // Garbage body: still 403, never 400.
    let (status, _) = send(
        &app,
        "PUT",
        "/products/1",
        Some(&client),
        Some(json!({"price": "not a number"})),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Missing body entirely: still 403.
    let (status, _) = send(&app, "PUT", "/products/1", Some(&client), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = send(&app, "POST", "/products", Some(&client), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

// -- Product CRUD -------------------------------------------------------------

#[tokio::test]
async fn admin_creates_and_fetches_product() {
    let (app, db) = test_app().await;
    let admin = seed_session(&db, "admin", Role::Admin).await;

    let (status, created) = send(
        &app,
        "POST",
        "/products",
        Some(&admin),
        Some(json!({
            "name": "Espresso Beans",
            "description": "Dark roast",
            "price": 18.5
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    // Wire shape: exactly {id, name, description, price}.
    let obj = created.as_object().unwrap();
    assert_eq!(obj.len(), 4);

    let id = created["id"].as_i64().unwrap();
    let (status, fetched) = send(&app, "GET", &format!("/products/{}", id), Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    // Listing contains it too.
    let (status, list) = send(&app, "GET", "/products", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn product_validation_stops_at_first_failure() {
    let (app, db) = test_app().await;
    let admin = seed_session(&db, "admin", Role::Admin).await;

    let (status, body) = send(&app, "POST", "/products", Some(&admin), Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid or missing \"name\" field");

    let (status, body) = send(
        &app,
        "POST",
        "/products",
        Some(&admin),
        Some(json!({"name": "X", "description": 5, "price": -2})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid or missing \"description\" field");

    let (status, body) = send(
        &app,
        "POST",
        "/products",
        Some(&admin),
        Some(json!({"name": "X", "description": "Y", "price": "free"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Invalid or missing \"price\" field. Must be a positive number"
    );
}

#[tokio::test]
async fn update_missing_product_is_404_regardless_of_payload() {
    let (app, db) = test_app().await;
    let admin = seed_session(&db, "admin", Role::Admin).await;

    // The payload would fail validation, but existence is checked first.
    let (status, _) = send(
        &app,
        "PUT",
        "/products/999",
        Some(&admin),
        Some(json!({"price": -5})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn partial_update_applies_present_fields() {
    let (app, db) = test_app().await;
    let admin = seed_session(&db, "admin", Role::Admin).await;
    let id = create_product(&app, &admin, "Espresso", 2.5).await;

    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/products/{}", id),
        Some(&admin),
        Some(json!({"price": 9.99})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["price"], 9.99);
    assert_eq!(updated["name"], "Espresso");

    // A present-but-invalid field still fails validation.
    let (status, body) = send(
        &app,
        "PUT",
        &format!("/products/{}", id),
        Some(&admin),
        Some(json!({"name": "   "})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid or missing \"name\" field");
}

#[tokio::test]
async fn delete_product_lifecycle() {
    let (app, db) = test_app().await;
    let admin = seed_session(&db, "admin", Role::Admin).await;
    let id = create_product(&app, &admin, "Espresso", 2.5).await;

    let (status, body) = send(&app, "DELETE", &format!("/products/{}", id), Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Product deleted successfully");

    let (status, _) = send(&app, "GET", &format!("/products/{}", id), Some(&admin), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", &format!("/products/{}", id), Some(&admin), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// -- Orders -------------------------------------------------------------------

#[tokio::test]
async fn order_total_is_sum_of_frozen_prices() {
    let (app, db) = test_app().await;
    let admin = seed_session(&db, "admin", Role::Admin).await;
    let client = seed_session(&db, "client", Role::Client).await;

    let p1 = create_product(&app, &admin, "Beans", 10.0).await;
    let p2 = create_product(&app, &admin, "Filters", 5.0).await;

    let (status, order) = send(
        &app,
        "POST",
        "/orders",
        Some(&client),
        Some(json!({"items": [
            {"product_id": p1, "quantity": 2},
            {"product_id": p2, "quantity": 1}
        ]})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(order["total_price"], 25.0);
    assert_eq!(order["status"], "pending");
    assert!(order["order_date"].is_string());

    let products = order["products"].as_array().unwrap();
    assert_eq!(products.len(), 2);
    assert_eq!(products[0], json!({"id": p1, "name": "Beans", "quantity": 2}));
    assert_eq!(products[1], json!({"id": p2, "name": "Filters", "quantity": 1}));
}

#[tokio::test]
async fn order_with_unknown_product_persists_nothing() {
    let (app, db) = test_app().await;
    let admin = seed_session(&db, "admin", Role::Admin).await;
    let client = seed_session(&db, "client", Role::Client).await;

    let p1 = create_product(&app, &admin, "Beans", 10.0).await;

    let (status, _) = send(
        &app,
        "POST",
        "/orders",
        Some(&client),
        Some(json!({"items": [
            {"product_id": p1, "quantity": 2},
            {"product_id": 9999, "quantity": 1}
        ]})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // All-or-nothing: no order header, no line items.
    assert_eq!(table_count(&db, "orders").await, 0);
    assert_eq!(table_count(&db, "order_items").await, 0);
}

#[tokio::test]
async fn order_requires_items() {
    let (app, db) = test_app().await;
    let client = seed_session(&db, "client", Role::Client).await;

    let (status, body) = send(&app, "POST", "/orders", Some(&client), Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid or missing \"items\" field");

    let (status, body) = send(
        &app,
        "POST",
        "/orders",
        Some(&client),
        Some(json!({"items": []})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Order must contain at least one line item");
}

#[tokio::test]
async fn orders_require_session() {
    let (app, _db) = test_app().await;

    let (status, _) = send(
        &app,
        "POST",
        "/orders",
        None,
        Some(json!({"items": [{"product_id": 1, "quantity": 1}]})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn update_order_status_replaces_any_label() {
    let (app, db) = test_app().await;
    let admin = seed_session(&db, "admin", Role::Admin).await;
    let client = seed_session(&db, "client", Role::Client).await;

    let p1 = create_product(&app, &admin, "Beans", 10.0).await;
    let (_, order) = send(
        &app,
        "POST",
        "/orders",
        Some(&client),
        Some(json!({"items": [{"product_id": p1, "quantity": 1}]})),
    )
    .await;
    let id = order["id"].as_i64().unwrap();

    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/orders/{}", id),
        Some(&client),
        Some(json!({"status": "shipped"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "shipped");
    assert_eq!(updated["total_price"], 10.0);
    assert_eq!(updated["products"].as_array().unwrap().len(), 1);

    // Statuses are an open label set: any string goes through.
    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/orders/{}", id),
        Some(&client),
        Some(json!({"status": "anything-at-all"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "anything-at-all");
}

#[tokio::test]
async fn update_status_on_missing_order_is_404() {
    let (app, db) = test_app().await;
    let client = seed_session(&db, "client", Role::Client).await;

    let (status, _) = send(
        &app,
        "PUT",
        "/orders/404",
        Some(&client),
        Some(json!({"status": "shipped"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn order_total_survives_product_reprice() {
    let (app, db) = test_app().await;
    let admin = seed_session(&db, "admin", Role::Admin).await;
    let client = seed_session(&db, "client", Role::Client).await;

    let p1 = create_product(&app, &admin, "Beans", 10.0).await;
    let (_, order) = send(
        &app,
        "POST",
        "/orders",
        Some(&client),
        Some(json!({"items": [{"product_id": p1, "quantity": 2}]})),
    )
    .await;
    let id = order["id"].as_i64().unwrap();

    // Reprice after the order exists.
    let (status, _) = send(
        &app,
        "PUT",
        &format!("/products/{}", p1),
        Some(&admin),
        Some(json!({"price": 99.0})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // The stored total is frozen at creation time.
    let stored = db.orders().get_by_id(id).await.unwrap().unwrap();
    assert_eq!(stored.total_price, 20.0);

    // A new order sees the new price.
    let (_, fresh) = send(
        &app,
        "POST",
        "/orders",
        Some(&client),
        Some(json!({"items": [{"product_id": p1, "quantity": 1}]})),
    )
    .await;
    assert_eq!(fresh["total_price"], 99.0);
}

#[tokio::test]
async fn delete_referenced_product_conflicts() {
    let (app, db) = test_app().await;
    let admin = seed_session(&db, "admin", Role::Admin).await;
    let client = seed_session(&db, "client", Role::Client).await;

    let p1 = create_product(&app, &admin, "Beans", 10.0).await;
    send(
        &app,
        "POST",
        "/orders",
        Some(&client),
        Some(json!({"items": [{"product_id": p1, "quantity": 1}]})),
    )
    .await;

    let (status, body) = send(&app, "DELETE", &format!("/products/{}", p1), Some(&admin), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("referenced"));

    // Still there.
    let (status, _) = send(&app, "GET", &format!("/products/{}", p1), Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
}
