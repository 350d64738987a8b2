use crate::{
    db::dao::{DaoBase, DaoContext},
    db::entities::restaurant,
    error::AppError,
};

pub async fn require_restaurant(daos: &DaoContext, id: i32) -> Result<restaurant::Model, AppError> {
    daos.restaurant()
        .find_optional(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Restaurant {id} not found")))
}

/// A category reference is optional; when present it has to resolve.
pub async fn require_category(daos: &DaoContext, id: Option<i32>) -> Result<(), AppError> {
    match id {
        Some(id) if !daos.category().exists(id).await? => {
            Err(AppError::not_found(format!("Category {id} not found")))
        }
        _ => Ok(()),
    }
}

pub fn search_term(q: &str) -> Result<&str, AppError> {
    let q = q.trim();
    if q.is_empty() {
        return Err(AppError::invalid_input("search query is required"));
    }
    Ok(q)
}

/// Conflict unless the `(restaurant, name)` slot is free or held by `self_id`.
pub fn ensure_slot_free(
    entity: &str,
    existing_id: Option<i32>,
    self_id: Option<i32>,
) -> Result<(), AppError> {
    match existing_id {
        Some(id) if Some(id) != self_id => {
            tracing::warn!(entity, conflicting_id = id, "duplicate name in restaurant");
            Err(AppError::conflict(format!(
                "{entity} with this name already exists in the restaurant"
            )))
        }
        _ => Ok(()),
    }
}
