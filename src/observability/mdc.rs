//! Mapped diagnostic context.
//!
//! The request identifier reaches log output as the `uid` field of a
//! short-lived `mdc` span. Formatters that print span fields (the JSON
//! layer's span list, the pretty layer's span prefix) show it on every line
//! emitted while the span is entered.
//!
//! # Design Decisions
//! - The span is entered only for the synchronous scope of a single log call
//!   and never across an `.await`, so a task migrating between worker threads
//!   cannot carry it along or observe another request's identifier
//! - Entry goes through `Span::in_scope`, whose guard is `!Send` and exits the
//!   span on unwind as well as on return

/// Request-scoped logging context carried alongside a stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    uid: String,
}

impl RequestContext {
    pub fn new(uid: impl Into<String>) -> Self {
        Self { uid: uid.into() }
    }

    /// Run `f` inside an `mdc` span carrying the identifier. The span is
    /// exited before this returns.
    pub fn scope<R>(&self, f: impl FnOnce() -> R) -> R {
        tracing::info_span!("mdc", uid = %self.uid).in_scope(f)
    }
}
