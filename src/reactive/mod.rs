//! Stream adapters.
//!
//! # Data Flow
//! ```text
//! RestaurantStore::get_by_max_price (lazy source)
//!     → context_log.rs (start log, per-element log under RequestContext)
//!     → http::response (body framing, transport)
//! ```

pub mod context_log;

pub use context_log::{log_with_context, LogActionError, LoggingSideEffectError, Stage};
