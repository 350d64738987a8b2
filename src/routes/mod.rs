pub mod api;
mod entry;
pub mod validation;

pub use entry::{API_PREFIX, router};
