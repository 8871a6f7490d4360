//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID, per-request span)
//!     → handlers.rs (parse path, build feed)
//!     → response.rs (negotiate framing, stream body)
//!     → Send to client
//! ```
//!
//! # Routes
//! - `GET /hero/get-hero`
//! - `GET /{uid}/restaurants/{price}`
//! - `GET /health`

pub mod error;
pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use error::ApiError;
pub use request::{RequestId, RequestIdExt, X_REQUEST_ID};
pub use response::StreamFormat;
pub use server::{AppState, HttpServer};
