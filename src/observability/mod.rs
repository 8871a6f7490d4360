//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!     → mdc.rs (request identifier attached to individual log calls)
//!
//! Consumers:
//!     → stdout (pretty or JSON)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Request ID (x-request-id) is recorded on the per-request span
//! - Caller identifier (uid) is attached per log call, never per task
//! - Metrics are cheap (atomic increments)

pub mod logging;
pub mod mdc;
pub mod metrics;
