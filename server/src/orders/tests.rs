//! Order placement and lifecycle tests, run against the in-memory engine.

use surrealdb::RecordId;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::db::DbService;
use crate::db::models::{
    CreateOrderRequest, DeliveryAddress, IngredientKind, InventoryItemCreate, OrderItemInput,
    OrderStatus, OrderStatusUpdate, PaymentInfo, PizzaCreate, UserCreate,
};
use crate::db::repository::{InventoryRepository, OrderRepository, PizzaRepository, UserRepository};
use crate::orders::{place_order, update_status};
use crate::utils::AppError;

async fn test_db() -> Surreal<Db> {
    DbService::memory()
        .await
        .expect("Failed to open in-memory db")
        .db
}

async fn seed_user(db: &Surreal<Db>) -> RecordId {
    UserRepository::new(db.clone())
        .create(UserCreate {
            name: "mario".to_string(),
            email: "mario@example.com".to_string(),
            password: "super-secret".to_string(),
            role: None,
        })
        .await
        .expect("Failed to create user")
        .id
        .expect("Created user has no id")
}

async fn seed_item(
    db: &Surreal<Db>,
    kind: IngredientKind,
    name: &str,
    quantity: i64,
) -> RecordId {
    InventoryRepository::new(db.clone())
        .create(
            kind,
            InventoryItemCreate {
                name: name.to_string(),
                quantity,
            },
        )
        .await
        .expect("Failed to create inventory item")
        .id
        .expect("Created item has no id")
}

async fn quantity_of(db: &Surreal<Db>, kind: IngredientKind, id: &RecordId) -> i64 {
    InventoryRepository::new(db.clone())
        .find_by_id(kind, &id.to_string())
        .await
        .expect("Failed to fetch item")
        .expect("Item missing")
        .quantity
}

fn valid_address() -> DeliveryAddress {
    DeliveryAddress {
        phone_number: "555-0123".to_string(),
        address: "1 Via Roma".to_string(),
        city: "Naples".to_string(),
        postal_code: "80100".to_string(),
        country: "Italy".to_string(),
    }
}

fn stripe_payment() -> PaymentInfo {
    PaymentInfo {
        method: "stripe".to_string(),
        stripe_payment_id: "pi_test_123".to_string(),
        status: None,
    }
}

fn order_request(pizza_id: &RecordId, qty: u32, price: f64) -> CreateOrderRequest {
    CreateOrderRequest {
        order_items: vec![OrderItemInput {
            pizza_id: pizza_id.to_string(),
            qty,
            price,
        }],
        delivery_address: valid_address(),
        sales_tax: 1.5,
        delivery_charges: 2.0,
        total_price: price,
        payment: stripe_payment(),
    }
}

async fn seed_pizza(
    db: &Surreal<Db>,
    name: &str,
    base: RecordId,
    cheeses: Vec<RecordId>,
    price: f64,
) -> RecordId {
    PizzaRepository::new(db.clone())
        .create(
            PizzaCreate {
                name: name.to_string(),
                description: None,
                base,
                sauces: Vec::new(),
                cheeses,
                veggies: Vec::new(),
                price,
                size: None,
                image_url: None,
            },
            "admin",
        )
        .await
        .expect("Failed to create pizza")
        .id
        .expect("Created pizza has no id")
}

#[tokio::test]
async fn creates_order_and_deducts_stock_exactly_once() {
    let db = test_db().await;
    let user = seed_user(&db).await;
    let base = seed_item(&db, IngredientKind::Base, "Classic", 10).await;
    let cheese = seed_item(&db, IngredientKind::Cheese, "Mozzarella", 10).await;
    let pizza = seed_pizza(&db, "Margherita", base.clone(), vec![cheese.clone()], 6.95).await;

    let order = place_order(&db, &user.to_string(), order_request(&pizza, 2, 13.90))
        .await
        .expect("Order should succeed");

    assert_eq!(order.status, OrderStatus::Received);
    assert!(order.delivered_at.is_none());
    assert_eq!(order.order_items.len(), 1);
    assert_eq!(order.order_items[0].qty, 2);

    // base and cheese each referenced once: decremented by qty, exactly once
    assert_eq!(quantity_of(&db, IngredientKind::Base, &base).await, 8);
    assert_eq!(quantity_of(&db, IngredientKind::Cheese, &cheese).await, 8);

    // back-reference appended to the user
    let linked = UserRepository::new(db.clone())
        .find_by_id(&user.to_string())
        .await
        .expect("Failed to fetch user")
        .expect("User missing");
    assert_eq!(linked.orders.len(), 1);
    assert_eq!(Some(&linked.orders[0]), order.id.as_ref());
}

#[tokio::test]
async fn insufficient_stock_fails_and_restores_prior_deductions() {
    // Cart [{P1, qty: 2}]; P1 needs 1 unit of base B1 (stock 5) and 2 units
    // of cheese C1 (stock 3). qty 2 needs 2 of B1 and 4 of C1, so C1 is
    // short and B1 must come back to 5.
    let db = test_db().await;
    let user = seed_user(&db).await;
    let b1 = seed_item(&db, IngredientKind::Base, "Classic", 5).await;
    let c1 = seed_item(&db, IngredientKind::Cheese, "Gorgonzola", 3).await;
    let pizza = seed_pizza(
        &db,
        "Quattro Formaggi",
        b1.clone(),
        vec![c1.clone(), c1.clone()],
        8.95,
    )
    .await;

    let err = place_order(&db, &user.to_string(), order_request(&pizza, 2, 17.90))
        .await
        .expect_err("Order should fail on cheese shortfall");

    match err {
        AppError::InsufficientInventory(msg) => {
            assert!(msg.contains("Gorgonzola"), "message should name the item: {msg}");
        }
        other => panic!("Expected InsufficientInventory, got {other:?}"),
    }

    assert_eq!(quantity_of(&db, IngredientKind::Base, &b1).await, 5);
    assert_eq!(quantity_of(&db, IngredientKind::Cheese, &c1).await, 3);

    // and nothing was persisted
    let all = OrderRepository::new(db.clone())
        .find_all()
        .await
        .expect("Failed to list orders");
    assert!(all.is_empty());
}

#[tokio::test]
async fn unknown_pizza_aborts_without_touching_stock() {
    let db = test_db().await;
    let user = seed_user(&db).await;
    let base = seed_item(&db, IngredientKind::Base, "Classic", 5).await;

    let ghost = RecordId::from_table_key("pizza", "nonexistent");
    let err = place_order(&db, &user.to_string(), order_request(&ghost, 1, 6.95))
        .await
        .expect_err("Order should fail");

    assert!(matches!(err, AppError::NotFound(_)));
    assert_eq!(quantity_of(&db, IngredientKind::Base, &base).await, 5);
}

#[tokio::test]
async fn missing_ingredient_is_not_found() {
    let db = test_db().await;
    let user = seed_user(&db).await;
    // pizza referencing a base that was deleted from inventory
    let pizza = seed_pizza(
        &db,
        "Stale",
        RecordId::from_table_key("base", "deleted"),
        Vec::new(),
        6.95,
    )
    .await;

    let err = place_order(&db, &user.to_string(), order_request(&pizza, 1, 6.95))
        .await
        .expect_err("Order should fail");

    match err {
        AppError::NotFound(msg) => assert_eq!(msg, "Item Not Found!"),
        other => panic!("Expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn validation_rules_fail_fast_in_order() {
    let db = test_db().await;
    let user = seed_user(&db).await.to_string();
    let pizza = RecordId::from_table_key("pizza", "any");

    // 1. empty cart wins over everything else
    let mut req = order_request(&pizza, 1, 0.0);
    req.order_items.clear();
    req.delivery_address.city.clear();
    let err = place_order(&db, &user, req).await.expect_err("should fail");
    assert_eq!(err.to_string(), "No Order Items");

    // 2. incomplete address
    let mut req = order_request(&pizza, 1, 0.0);
    req.delivery_address.city = "  ".to_string();
    let err = place_order(&db, &user, req).await.expect_err("should fail");
    assert_eq!(err.to_string(), "Invalid Delivery Address");

    // 3. non-positive total
    let mut req = order_request(&pizza, 1, 0.0);
    req.delivery_charges = -1.0;
    let err = place_order(&db, &user, req).await.expect_err("should fail");
    assert_eq!(err.to_string(), "Invalid Total Price");

    // 4. negative delivery charges
    let mut req = order_request(&pizza, 1, 9.0);
    req.delivery_charges = -1.0;
    req.sales_tax = -1.0;
    let err = place_order(&db, &user, req).await.expect_err("should fail");
    assert_eq!(err.to_string(), "Invalid Delivery Charges");

    // 5. negative sales tax
    let mut req = order_request(&pizza, 1, 9.0);
    req.sales_tax = -1.0;
    req.payment.method = "razorpay".to_string();
    let err = place_order(&db, &user, req).await.expect_err("should fail");
    assert_eq!(err.to_string(), "Invalid Sales Tax");

    // 6. unsupported payment method
    let mut req = order_request(&pizza, 1, 9.0);
    req.payment.method = "razorpay".to_string();
    req.payment.stripe_payment_id.clear();
    let err = place_order(&db, &user, req).await.expect_err("should fail");
    assert_eq!(err.to_string(), "Invalid Payment Method");

    // 7. missing payment reference
    let mut req = order_request(&pizza, 1, 9.0);
    req.payment.stripe_payment_id.clear();
    let err = place_order(&db, &user, req).await.expect_err("should fail");
    assert_eq!(err.to_string(), "Invalid Stripe Payment Intent ID");
}

#[tokio::test]
async fn concurrent_orders_cannot_oversell() {
    // Two orders each wanting 6 of a 10-unit base: at most one may win.
    let db = test_db().await;
    let user = seed_user(&db).await;
    let base = seed_item(&db, IngredientKind::Base, "Classic", 10).await;
    let pizza = seed_pizza(&db, "Marinara", base.clone(), Vec::new(), 6.95).await;

    let user_id = user.to_string();
    let (a, b) = tokio::join!(
        place_order(&db, &user_id, order_request(&pizza, 6, 41.70)),
        place_order(&db, &user_id, order_request(&pizza, 6, 41.70)),
    );

    let successes = [a.is_ok(), b.is_ok()].iter().filter(|s| **s).count();
    assert!(successes <= 1, "both oversubscribing orders succeeded");

    // failed attempts must leave no trace on the counter
    let remaining = quantity_of(&db, IngredientKind::Base, &base).await;
    assert_eq!(remaining, 10 - 6 * successes as i64);
}

#[tokio::test]
async fn delivered_status_sets_timestamp_and_others_clear_it() {
    let db = test_db().await;
    let user = seed_user(&db).await;
    let base = seed_item(&db, IngredientKind::Base, "Classic", 10).await;
    let pizza = seed_pizza(&db, "Marinara", base, Vec::new(), 6.95).await;

    let order = place_order(&db, &user.to_string(), order_request(&pizza, 1, 6.95))
        .await
        .expect("Order should succeed");
    let order_id = order.id.expect("Order has no id").to_string();

    let updated = update_status(
        &db,
        &order_id,
        OrderStatusUpdate {
            status: Some(OrderStatus::Delivered),
        },
    )
    .await
    .expect("Status update should succeed");
    assert_eq!(updated.status, OrderStatus::Delivered);
    assert!(updated.delivered_at.is_some());

    // backward move is allowed and clears the timestamp
    let updated = update_status(
        &db,
        &order_id,
        OrderStatusUpdate {
            status: Some(OrderStatus::InTheKitchen),
        },
    )
    .await
    .expect("Status update should succeed");
    assert_eq!(updated.status, OrderStatus::InTheKitchen);
    assert!(updated.delivered_at.is_none());

    // omitted status keeps the current one
    let updated = update_status(&db, &order_id, OrderStatusUpdate { status: None })
        .await
        .expect("Status update should succeed");
    assert_eq!(updated.status, OrderStatus::InTheKitchen);
}

#[tokio::test]
async fn updating_or_deleting_missing_order_is_not_found() {
    let db = test_db().await;

    let err = update_status(
        &db,
        "order:nonexistent",
        OrderStatusUpdate {
            status: Some(OrderStatus::Delivered),
        },
    )
    .await
    .expect_err("should fail");
    assert!(matches!(err, AppError::NotFound(_)));

    let repo = OrderRepository::new(db.clone());
    let err = repo
        .delete("order:nonexistent")
        .await
        .expect_err("should fail");
    assert!(matches!(
        err,
        crate::db::repository::RepoError::NotFound(_)
    ));

    // and nothing was created as a side effect
    assert!(repo.find_all().await.expect("list should work").is_empty());
}

#[tokio::test]
async fn stored_order_round_trips_unchanged() {
    let db = test_db().await;
    let user = seed_user(&db).await;
    let base = seed_item(&db, IngredientKind::Base, "Classic", 10).await;
    let pizza = seed_pizza(&db, "Carbonara", base, Vec::new(), 11.70).await;

    let mut req = order_request(&pizza, 2, 23.40);
    req.sales_tax = 1.9;
    req.delivery_charges = 0.0;

    let created = place_order(&db, &user.to_string(), req)
        .await
        .expect("Order should succeed");
    let order_id = created.id.clone().expect("Order has no id");

    let fetched = OrderRepository::new(db.clone())
        .find_by_id(&order_id.to_string())
        .await
        .expect("Fetch should work")
        .expect("Order missing");

    assert_eq!(fetched.total_price, 23.40);
    assert_eq!(fetched.sales_tax, 1.9);
    assert_eq!(fetched.delivery_charges, 0.0);
    assert_eq!(fetched.delivery_address.city, "Naples");
    assert_eq!(fetched.delivery_address.postal_code, "80100");
    assert_eq!(fetched.order_items.len(), 1);
    assert_eq!(fetched.order_items[0].qty, 2);
    assert_eq!(fetched.order_items[0].price, 23.40);
    assert_eq!(fetched.payment.stripe_payment_id, "pi_test_123");
}
