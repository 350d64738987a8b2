use std::sync::Arc;

use axum::{Router, middleware::from_fn_with_state};

use crate::{middleware::jwt_auth, state::AppState};

use super::{
    addons, auth, categories, foods, inits, orders, payments, restaurants, tables, transactions,
    users,
};

pub fn router(state: Arc<AppState>) -> Router {
    let protected = Router::new()
        .merge(users::router())
        .merge(restaurants::router())
        .merge(categories::router())
        .merge(foods::router())
        .merge(tables::router())
        .merge(addons::router())
        .merge(orders::router())
        .merge(payments::router())
        .merge(transactions::router())
        .merge(inits::router())
        .route_layer(from_fn_with_state(state.clone(), jwt_auth));

    Router::new()
        .merge(auth::router())
        .merge(protected)
        .with_state(state)
}
