//! Fixtures shared by unit tests and the `tests/` integration suites.

use std::sync::Arc;

use axum::Router;
use chrono::{FixedOffset, TimeZone};
use sea_orm::{DatabaseConnection, prelude::DateTimeWithTimeZone};

use crate::{
    auth::{
        Role,
        bootstrap::build_providers,
        jwt::{JwtKeys, encode_token, make_claims},
        providers::AuthProviderId,
    },
    config::{AppConfig, AuthConfig},
    db::entities::{addon, category, food, food_order, order, restaurant, table, user},
    middleware::json_error_middleware,
    routes::router,
    services::ServiceContext,
    state::AppState,
};

pub const TEST_TOKEN_TTL_SECS: u64 = 3600;

pub fn ts() -> DateTimeWithTimeZone {
    FixedOffset::east_opt(0)
        .expect("utc offset")
        .with_ymd_and_hms(2025, 1, 1, 12, 0, 0)
        .single()
        .expect("fixed timestamp")
}

/// A verified, active manager.
pub fn user_model(id: i32, email: &str) -> user::Model {
    user::Model {
        id,
        created_at: ts(),
        updated_at: ts(),
        name: format!("User {id}"),
        email: email.to_string(),
        password: "hash".to_string(),
        phone: "+1-555-0100".to_string(),
        avatar: String::new(),
        role: Role::Manager.as_str().to_string(),
        active: true,
        token: None,
        device_id: String::new(),
        device_token: String::new(),
        email_verified: true,
        email_verification_otp: None,
    }
}

pub fn restaurant_model(id: i32, user_id: i32, name: &str) -> restaurant::Model {
    restaurant::Model {
        id,
        created_at: ts(),
        updated_at: ts(),
        name: name.to_string(),
        address: "12 Harbour Road".to_string(),
        location: "Ikeja".to_string(),
        state: "Lagos".to_string(),
        country: "Nigeria".to_string(),
        phone: "+234-800-0000".to_string(),
        active: true,
        verified: false,
        verified_at: None,
        user_id,
    }
}

pub fn category_model(id: i32, restaurant_id: i32, name: &str) -> category::Model {
    category::Model {
        id,
        created_at: ts(),
        updated_at: ts(),
        name: name.to_string(),
        category_type: "menu".to_string(),
        restaurant_id,
    }
}

pub fn food_model(id: i32, restaurant_id: i32, name: &str, price: f64) -> food::Model {
    food::Model {
        id,
        created_at: ts(),
        updated_at: ts(),
        name: name.to_string(),
        description: String::new(),
        image: String::new(),
        price,
        average_rating: 0.0,
        restaurant_id,
        category_id: None,
    }
}

pub fn table_model(id: i32, restaurant_id: i32, name: &str) -> table::Model {
    table::Model {
        id,
        created_at: ts(),
        updated_at: ts(),
        name: name.to_string(),
        number: id,
        capacity: 4,
        image: String::new(),
        price: 0.0,
        average_rating: 0.0,
        restaurant_id,
        category_id: None,
    }
}

pub fn addon_model(id: i32, restaurant_id: i32, name: &str, price: f64) -> addon::Model {
    addon::Model {
        id,
        created_at: ts(),
        updated_at: ts(),
        name: name.to_string(),
        addon_type: "extra".to_string(),
        price,
        restaurant_id,
        category_id: None,
    }
}

pub fn order_model(id: i32, user_id: i32, restaurant_id: i32) -> order::Model {
    order::Model {
        id,
        created_at: ts(),
        updated_at: ts(),
        user_id,
        restaurant_id,
        table_id: None,
        total_price: 0.0,
        status: order::DEFAULT_STATUS.to_string(),
        special_notes: None,
        expected_ready: None,
    }
}

pub fn food_order_model(id: i32, order_id: i32, food_id: i32, quantity: i32) -> food_order::Model {
    food_order::Model {
        id,
        created_at: ts(),
        updated_at: ts(),
        order_id,
        food_id,
        quantity,
    }
}

pub fn test_config(secret: &str) -> AppConfig {
    AppConfig {
        auth: Some(AuthConfig {
            provider: AuthProviderId::Local,
            jwt_secret: secret.to_string(),
            token_ttl_secs: TEST_TOKEN_TTL_SECS,
            admin_email: None,
            admin_password: None,
        }),
        ..AppConfig::default()
    }
}

pub fn test_state(db: DatabaseConnection, secret: &str) -> Arc<AppState> {
    let cfg = test_config(secret);
    let services = ServiceContext::new(&db);
    let providers = build_providers(
        cfg.auth.as_ref().expect("auth config should be present"),
        &services,
    )
    .expect("create auth providers");
    AppState::new(cfg, db, providers)
}

/// The API router with the error-envelope middleware `main` installs.
pub fn test_router(state: Arc<AppState>) -> Router {
    router(state).layer(axum::middleware::from_fn(json_error_middleware))
}

/// Signs a token the way the login flow does.
pub fn token_for(user_id: i32, secret: &str, ttl_secs: u64) -> String {
    let keys = JwtKeys::from_secret(secret.as_bytes());
    encode_token(&keys, &make_claims(user_id, ttl_secs)).expect("sign test token")
}
