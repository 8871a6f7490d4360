//! Reactive Feed Service Library

pub mod catalog;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod reactive;

pub use catalog::RestaurantStore;
pub use config::schema::FeedConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
