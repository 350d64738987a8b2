mod common;

use axum::{Router, http::StatusCode};
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};
use serde_json::{Value, json};

use common::{send, sqlite_state, verified_manager, verified_user};
use restaurant_api::{
    db::entities::{addon_order, food_order, order, table_order},
    test_helpers::test_router,
};

struct Menu {
    token: String,
    user_id: i64,
    restaurant_id: i64,
    food_id: i64,
    table_id: i64,
    addon_id: i64,
}

/// Row counts for orders, food lines, table lines and addon lines.
async fn stored_rows(db: &DatabaseConnection) -> (u64, u64, u64, u64) {
    (
        order::Entity::find().count(db).await.unwrap(),
        food_order::Entity::find().count(db).await.unwrap(),
        table_order::Entity::find().count(db).await.unwrap(),
        addon_order::Entity::find().count(db).await.unwrap(),
    )
}

fn id_of(json: &Value) -> i64 {
    json["data"]["id"].as_i64().unwrap()
}

async fn seed_menu(app: &Router) -> Menu {
    let (user_id, token) = verified_manager(app, "owner@example.com").await;

    let (status, json) = send(
        app,
        "POST",
        "/restaurant",
        Some(&token),
        Some(json!({
            "name": "Blue Door",
            "address": "12 Harbour Road",
            "location": "Ikeja",
            "state": "Lagos",
            "country": "Nigeria",
            "phone": "+234-800-0000",
            "user_id": user_id
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{json}");
    let restaurant_id = id_of(&json);

    let (status, json) = send(
        app,
        "POST",
        "/foods",
        Some(&token),
        Some(json!({ "name": "Jollof", "price": 10.0, "restaurant_id": restaurant_id })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{json}");
    let food_id = id_of(&json);

    let (status, json) = send(
        app,
        "POST",
        "/tables",
        Some(&token),
        Some(json!({
            "name": "Window",
            "number": 4,
            "capacity": 2,
            "price": 0.0,
            "restaurant_id": restaurant_id
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{json}");
    let table_id = id_of(&json);

    let (status, json) = send(
        app,
        "POST",
        "/addons",
        Some(&token),
        Some(json!({ "name": "Plantain", "type": "side", "price": 2.0, "restaurant_id": restaurant_id })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{json}");
    let addon_id = id_of(&json);

    Menu {
        token,
        user_id,
        restaurant_id,
        food_id,
        table_id,
        addon_id,
    }
}

#[tokio::test]
async fn order_is_created_with_hydrated_lines() {
    let state = sqlite_state().await;
    let app = test_router(state.clone());
    let menu = seed_menu(&app).await;

    let (status, json) = send(
        &app,
        "POST",
        "/orders",
        Some(&menu.token),
        Some(json!({
            "restaurant_id": menu.restaurant_id,
            "table_id": menu.table_id,
            "total_price": 22.0,
            "special_notes": "no pepper",
            "foods": [{ "food_id": menu.food_id, "quantity": 2 }],
            "tables": [{ "table_id": menu.table_id }],
            "addons": [{ "addon_id": menu.addon_id }]
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED, "{json}");
    assert_eq!(json["message"], "Order created successfully");
    let order = &json["data"];
    assert_eq!(order["user_id"].as_i64(), Some(menu.user_id));
    assert_eq!(order["status"], "pending");
    assert_eq!(order["total_price"].as_f64(), Some(22.0));
    assert_eq!(order["food_orders"][0]["quantity"], 2);
    assert_eq!(order["food_orders"][0]["food"]["name"], "Jollof");
    assert_eq!(order["table_orders"][0]["table"]["name"], "Window");
    assert_eq!(order["addon_orders"][0]["quantity"], 1);
    assert_eq!(order["addon_orders"][0]["addon"]["name"], "Plantain");
    assert_eq!(stored_rows(&state.db).await, (1, 1, 1, 1));

    let order_id = order["id"].as_i64().unwrap();
    let (status, json) = send(&app, "GET", &format!("/orders/{order_id}"), Some(&menu.token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["food_orders"].as_array().unwrap().len(), 1);

    let (status, json) = send(&app, "GET", "/orders/search?q=pepper", Some(&menu.token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    let (status, json) = send(&app, "GET", "/orders/status?status=pending", Some(&menu.token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn unknown_food_rolls_back_the_whole_order() {
    let state = sqlite_state().await;
    let app = test_router(state.clone());
    let menu = seed_menu(&app).await;

    let (status, json) = send(
        &app,
        "POST",
        "/orders",
        Some(&menu.token),
        Some(json!({
            "restaurant_id": menu.restaurant_id,
            "total_price": 10.0,
            "foods": [
                { "food_id": menu.food_id, "quantity": 1 },
                { "food_id": 9999, "quantity": 1 }
            ],
            "tables": [{ "table_id": menu.table_id }],
            "addons": [{ "addon_id": menu.addon_id }]
        })),
    )
    .await;

    assert_ne!(status, StatusCode::CREATED);
    assert_eq!(json["success"], false);

    assert_eq!(stored_rows(&state.db).await, (0, 0, 0, 0));

    let (status, json) = send(&app, "GET", "/orders", Some(&menu.token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn update_without_user_keeps_the_owner() {
    let app = test_router(sqlite_state().await);
    let menu = seed_menu(&app).await;
    let (customer_id, customer_token) = verified_user(&app, "guest@example.com", "customer").await;

    let (status, json) = send(
        &app,
        "POST",
        "/orders",
        Some(&customer_token),
        Some(json!({
            "restaurant_id": menu.restaurant_id,
            "total_price": 10.0,
            "foods": [{ "food_id": menu.food_id }]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{json}");
    assert_eq!(json["data"]["user_id"].as_i64(), Some(customer_id));
    let order_id = id_of(&json);

    let (status, json) = send(
        &app,
        "PUT",
        &format!("/orders/{order_id}"),
        Some(&menu.token),
        Some(json!({
            "restaurant_id": menu.restaurant_id,
            "total_price": 10.0,
            "status": "served",
            "foods": [{ "food_id": menu.food_id }]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{json}");
    assert_eq!(json["data"]["status"], "served");
    assert_eq!(json["data"]["user_id"].as_i64(), Some(customer_id));

    let (status, json) = send(
        &app,
        "GET",
        &format!("/orders/user/{customer_id}"),
        Some(&menu.token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn update_replaces_lines_and_delete_removes_order() {
    let app = test_router(sqlite_state().await);
    let menu = seed_menu(&app).await;

    let (_, json) = send(
        &app,
        "POST",
        "/orders",
        Some(&menu.token),
        Some(json!({
            "restaurant_id": menu.restaurant_id,
            "total_price": 20.0,
            "foods": [{ "food_id": menu.food_id, "quantity": 2 }]
        })),
    )
    .await;
    let order_id = id_of(&json);

    let (status, json) = send(
        &app,
        "PUT",
        &format!("/orders/{order_id}"),
        Some(&menu.token),
        Some(json!({
            "restaurant_id": menu.restaurant_id,
            "total_price": 4.0,
            "status": "served",
            "addons": [{ "addon_id": menu.addon_id, "quantity": 2 }]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{json}");
    assert_eq!(json["data"]["status"], "served");
    assert!(json["data"]["food_orders"].as_array().unwrap().is_empty());
    assert_eq!(json["data"]["addon_orders"][0]["quantity"], 2);

    let (status, _) = send(&app, "DELETE", &format!("/orders/{order_id}"), Some(&menu.token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, json) = send(&app, "GET", &format!("/orders/{order_id}"), Some(&menu.token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "NotFound");

    let (status, _) = send(&app, "DELETE", &format!("/orders/{order_id}"), Some(&menu.token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn payments_and_transactions_reference_existing_rows() {
    let app = test_router(sqlite_state().await);
    let menu = seed_menu(&app).await;

    let (status, json) = send(
        &app,
        "POST",
        "/payments",
        Some(&menu.token),
        Some(json!({
            "order_id": 4242,
            "restaurant_id": menu.restaurant_id,
            "amount": 10.0,
            "method": "card",
            "status": "paid"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND, "{json}");

    let (_, json) = send(
        &app,
        "POST",
        "/orders",
        Some(&menu.token),
        Some(json!({ "restaurant_id": menu.restaurant_id, "total_price": 10.0 })),
    )
    .await;
    let order_id = id_of(&json);

    let (status, json) = send(
        &app,
        "POST",
        "/payments",
        Some(&menu.token),
        Some(json!({
            "order_id": order_id,
            "restaurant_id": menu.restaurant_id,
            "amount": 10.0,
            "method": "card",
            "status": "paid"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{json}");
    let payment_id = id_of(&json);

    let (status, json) = send(
        &app,
        "POST",
        "/transactions",
        Some(&menu.token),
        Some(json!({
            "order_id": order_id,
            "payment_id": payment_id,
            "restaurant_id": menu.restaurant_id,
            "amount": 10.0,
            "status": "settled"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{json}");

    let (status, json) = send(
        &app,
        "GET",
        &format!("/transactions/restaurant/{}", menu.restaurant_id),
        Some(&menu.token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn catalog_names_are_unique_per_restaurant() {
    let app = test_router(sqlite_state().await);
    let menu = seed_menu(&app).await;

    let (status, json) = send(
        &app,
        "POST",
        "/foods",
        Some(&menu.token),
        Some(json!({ "name": "Jollof", "price": 12.0, "restaurant_id": menu.restaurant_id })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT, "{json}");
    assert_eq!(json["error"], "Conflict");

    let (status, json) = send(
        &app,
        "GET",
        &format!("/foods/recommended/{}", menu.restaurant_id),
        Some(&menu.token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    let (status, json) = send(
        &app,
        "GET",
        &format!("/inits?restaurant_id={}", menu.restaurant_id),
        Some(&menu.token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{json}");
    assert_eq!(json["data"]["user"]["email"], "owner@example.com");
    assert_eq!(json["data"]["foods"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"]["tables"].as_array().unwrap().len(), 1);
}
