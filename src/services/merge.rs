//! Merge-update helpers: an absent, blank or zero input keeps the stored value.

use sea_orm::{ActiveValue, Set, Value};

pub fn text(field: &mut ActiveValue<String>, value: Option<String>) {
    if let Some(value) = value.filter(|value| !value.trim().is_empty()) {
        *field = Set(value);
    }
}

pub fn positive_i32(field: &mut ActiveValue<i32>, value: Option<i32>) {
    if let Some(value) = value.filter(|value| *value != 0) {
        *field = Set(value);
    }
}

pub fn positive_f64(field: &mut ActiveValue<f64>, value: Option<f64>) {
    if let Some(value) = value.filter(|value| *value != 0.0) {
        *field = Set(value);
    }
}

pub fn flag(field: &mut ActiveValue<bool>, value: Option<bool>) {
    if let Some(value) = value {
        *field = Set(value);
    }
}

/// For nullable columns a provided value always replaces the stored one.
pub fn optional<T>(field: &mut ActiveValue<Option<T>>, value: Option<T>)
where
    Option<T>: Into<Value>,
{
    if let Some(value) = value {
        *field = Set(Some(value));
    }
}
