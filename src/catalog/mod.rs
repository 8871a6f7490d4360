//! In-memory catalog subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     CatalogConfig (size, max_price, seed)
//!     → store.rs (generate, stable sort by price)
//!     → RestaurantStore (immutable, shared via Arc)
//!
//! Per request:
//!     MaxPrice
//!     → RestaurantStore::get_by_max_price
//!     → lazy Stream<Restaurant>, cheapest first
//! ```

pub mod store;
pub mod types;

pub use store::RestaurantStore;
pub use types::{Hero, InvalidPrice, MaxPrice, Restaurant};
