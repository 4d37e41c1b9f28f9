//! Core data structures

/// Drink id -> name lookup
pub mod catalog;
/// Borrowed luma plane views
pub mod frame;
/// Glass, liquor and recipe types
pub mod recipe;

pub use catalog::DrinkCatalog;
pub use frame::LumaFrame;
pub use recipe::{Glass, Liquor, Recipe, Strength};
