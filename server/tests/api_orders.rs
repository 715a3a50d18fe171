//! API integration tests
//!
//! Drives the fully assembled router (middleware included) against an
//! in-memory database via `tower::ServiceExt::oneshot`.

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use pizzeria_server::api::build_app;
use pizzeria_server::core::{Config, ServerState};
use pizzeria_server::db::models::{IngredientKind, InventoryItemCreate, PizzaCreate, UserCreate};
use pizzeria_server::db::repository::{InventoryRepository, PizzaRepository, UserRepository};

async fn test_state() -> ServerState {
    ServerState::for_tests(Config::default())
        .await
        .expect("Failed to build test state")
}

fn test_app(state: &ServerState) -> Router {
    build_app(state).with_state(state.clone())
}

/// Create a user with the given role and return (user id, bearer token)
async fn seed_account(state: &ServerState, name: &str, role: &str) -> (String, String) {
    let user = UserRepository::new(state.get_db())
        .create(UserCreate {
            name: name.to_string(),
            email: format!("{}@example.com", name),
            password: "super-secret".to_string(),
            role: Some(role.to_string()),
        })
        .await
        .expect("Failed to create account");

    let id = user.id.expect("Account has no id").to_string();
    let token = state
        .jwt_service()
        .generate_token(&id, name, role)
        .expect("Failed to issue token");
    (id, token)
}

/// Seed one base + one pizza using it; returns (base id, pizza id)
async fn seed_catalog(state: &ServerState, stock: i64) -> (String, String) {
    let base = InventoryRepository::new(state.get_db())
        .create(
            IngredientKind::Base,
            InventoryItemCreate {
                name: "Classic".to_string(),
                quantity: stock,
            },
        )
        .await
        .expect("Failed to create base")
        .id
        .expect("Base has no id");

    let pizza = PizzaRepository::new(state.get_db())
        .create(
            PizzaCreate {
                name: "Margherita".to_string(),
                description: None,
                base: base.clone(),
                sauces: Vec::new(),
                cheeses: Vec::new(),
                veggies: Vec::new(),
                price: 6.95,
                size: None,
                image_url: None,
            },
            "seed",
        )
        .await
        .expect("Failed to create pizza")
        .id
        .expect("Pizza has no id");

    (base.to_string(), pizza.to_string())
}

fn order_body(pizza_id: &str, qty: u32) -> Value {
    json!({
        "orderItems": [{ "pizzaId": pizza_id, "qty": qty, "price": 6.95 }],
        "deliveryAddress": {
            "phoneNumber": "555-0123",
            "address": "1 Via Roma",
            "city": "Naples",
            "postalCode": "80100",
            "country": "Italy"
        },
        "salesTax": 0.5,
        "deliveryCharges": 2.0,
        "totalPrice": 6.95 * qty as f64,
        "payment": { "method": "stripe", "stripePaymentId": "pi_test_123" }
    })
}

fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(t) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", t));
    }
    match body {
        Some(b) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(b.to_string()))
            .expect("Failed to build request"),
        None => builder.body(Body::empty()).expect("Failed to build request"),
    }
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("Body is not JSON")
}

#[tokio::test]
async fn health_and_catalog_are_public() {
    let state = test_state().await;
    let app = test_app(&state);

    let res = app
        .clone()
        .oneshot(request("GET", "/api/health", None, None))
        .await
        .expect("Request failed");
    assert_eq!(res.status(), StatusCode::OK);

    let res = app
        .oneshot(request("GET", "/api/pizzas", None, None))
        .await
        .expect("Request failed");
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn missing_token_is_unauthorized() {
    let state = test_state().await;
    let app = test_app(&state);

    let res = app
        .oneshot(request("POST", "/api/orders", None, Some(order_body("pizza:x", 1))))
        .await
        .expect("Request failed");

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(res).await;
    assert_eq!(body["message"], "Not Authorized, No Token");
}

#[tokio::test]
async fn customer_cannot_reach_admin_routes() {
    let state = test_state().await;
    let app = test_app(&state);
    let (_, token) = seed_account(&state, "mario", "user").await;

    let res = app
        .oneshot(request("GET", "/api/orders", Some(&token), None))
        .await
        .expect("Request failed");

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(res).await;
    assert_eq!(body["message"], "Not Authorized As An Admin");
}

#[tokio::test]
async fn login_returns_token_without_hash() {
    let state = test_state().await;
    let app = test_app(&state);
    seed_account(&state, "mario", "user").await;

    let res = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": "mario@example.com", "password": "super-secret" })),
        ))
        .await
        .expect("Request failed");
    assert_eq!(res.status(), StatusCode::OK);
    let body = json_body(res).await;
    assert!(body["token"].is_string());
    assert_eq!(body["user"]["email"], "mario@example.com");
    assert!(body["user"].get("hash_pass").is_none());

    // wrong password gets the unified message
    let res = app
        .oneshot(request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": "mario@example.com", "password": "wrong" })),
        ))
        .await
        .expect("Request failed");
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(res).await;
    assert_eq!(body["message"], "Invalid username or password");
}

#[tokio::test]
async fn order_placement_end_to_end() {
    let state = test_state().await;
    let app = test_app(&state);

    let (_, user_token) = seed_account(&state, "mario", "user").await;
    let (_, admin_token) = seed_account(&state, "boss", "admin").await;
    let (base_id, pizza_id) = seed_catalog(&state, 10).await;

    // place the order
    let res = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/orders",
            Some(&user_token),
            Some(order_body(&pizza_id, 2)),
        ))
        .await
        .expect("Request failed");
    assert_eq!(res.status(), StatusCode::OK);
    let body = json_body(res).await;
    assert_eq!(body["message"], "Order Created Successfully!");
    assert_eq!(body["createdOrder"]["status"], "Received");
    let order_id = body["createdOrder"]["id"]
        .as_str()
        .expect("Order id missing")
        .to_string();

    // stock went down by the order quantity
    let res = app
        .clone()
        .oneshot(request(
            "GET",
            &format!("/api/inventory/base/{}", base_id),
            Some(&admin_token),
            None,
        ))
        .await
        .expect("Request failed");
    assert_eq!(res.status(), StatusCode::OK);
    let body = json_body(res).await;
    assert_eq!(body["quantity"], 8);

    // the customer sees it in their history
    let res = app
        .clone()
        .oneshot(request("GET", "/api/orders/user", Some(&user_token), None))
        .await
        .expect("Request failed");
    assert_eq!(res.status(), StatusCode::OK);
    let body = json_body(res).await;
    assert_eq!(body.as_array().map(|a| a.len()), Some(1));

    // admin marks it delivered; deliveredAt appears
    let res = app
        .clone()
        .oneshot(request(
            "PUT",
            &format!("/api/orders/{}", order_id),
            Some(&admin_token),
            Some(json!({ "status": "Delivered" })),
        ))
        .await
        .expect("Request failed");
    assert_eq!(res.status(), StatusCode::OK);
    let body = json_body(res).await;
    assert_eq!(body["message"], "Order Updated Successfully!");
    assert_eq!(body["updatedOrder"]["status"], "Delivered");
    assert!(body["updatedOrder"]["deliveredAt"].is_string());
}

#[tokio::test]
async fn insufficient_stock_is_a_client_error() {
    let state = test_state().await;
    let app = test_app(&state);

    let (_, user_token) = seed_account(&state, "mario", "user").await;
    let (_, pizza_id) = seed_catalog(&state, 1).await;

    let res = app
        .oneshot(request(
            "POST",
            "/api/orders",
            Some(&user_token),
            Some(order_body(&pizza_id, 2)),
        ))
        .await
        .expect("Request failed");

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = json_body(res).await;
    assert_eq!(
        body["message"],
        "Not enough Classic in inventory! Please update inventory!"
    );
}

#[tokio::test]
async fn unknown_status_string_is_rejected() {
    let state = test_state().await;
    let app = test_app(&state);
    let (_, admin_token) = seed_account(&state, "boss", "admin").await;

    let res = app
        .oneshot(request(
            "PUT",
            "/api/orders/order:any",
            Some(&admin_token),
            Some(json!({ "status": "Teleported" })),
        ))
        .await
        .expect("Request failed");

    // closed status enum: deserialization fails before any handler runs
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
