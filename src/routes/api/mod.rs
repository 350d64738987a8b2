pub mod addons;
pub mod auth;
pub mod categories;
pub mod foods;
pub mod inits;
pub mod orders;
pub mod payments;
pub mod restaurants;
mod router;
pub mod tables;
pub mod transactions;
pub mod users;

pub use router::router;

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}
