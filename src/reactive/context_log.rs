//! Context-tagged logging over asynchronous streams.
//!
//! Wraps a source stream so that a start action runs once before the first
//! element is pulled, and a per-element action runs for every element, each
//! with the request's [`RequestContext`] installed for the duration of that
//! single call.
//!
//! A failing action yields one `Err` item and ends the stream. Nothing more
//! is pulled from the source after that.

use std::fmt;
use std::pin::Pin;

use futures_util::stream::{self, Stream, StreamExt};
use thiserror::Error;

use crate::observability::mdc::RequestContext;

/// Failure reported by a log action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct LogActionError(String);

impl LogActionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Which element the failing log action was handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Start,
    Element(usize),
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Start => write!(f, "start element"),
            Stage::Element(index) => write!(f, "element #{index}"),
        }
    }
}

/// A log action failed; the stream it belonged to has been aborted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("log action failed at {stage}: {source}")]
pub struct LoggingSideEffectError {
    pub stage: Stage,
    pub source: LogActionError,
}

struct State<S, P, F> {
    source: Pin<Box<S>>,
    context: Option<RequestContext>,
    on_start: Option<P>,
    on_next: F,
    index: usize,
    done: bool,
}

fn scoped<R>(context: Option<&RequestContext>, f: impl FnOnce() -> R) -> R {
    match context {
        Some(context) => context.scope(f),
        None => f(),
    }
}

/// Run `on_start` once, then `on_next` for each element of `source`, each
/// call scoped to `context`. Without a context the actions still run, just
/// without annotation.
pub fn log_with_context<S, T, P, F>(
    source: S,
    context: Option<RequestContext>,
    on_start: P,
    on_next: F,
) -> impl Stream<Item = Result<T, LoggingSideEffectError>> + Send + 'static
where
    S: Stream<Item = T> + Send + 'static,
    T: Send + 'static,
    P: FnOnce() -> Result<(), LogActionError> + Send + 'static,
    F: FnMut(&T) -> Result<(), LogActionError> + Send + 'static,
{
    let state = State {
        source: Box::pin(source),
        context,
        on_start: Some(on_start),
        on_next,
        index: 0,
        done: false,
    };

    stream::unfold(state, |mut state| async move {
        if state.done {
            return None;
        }

        if let Some(on_start) = state.on_start.take() {
            if let Err(source) = scoped(state.context.as_ref(), on_start) {
                state.done = true;
                let error = LoggingSideEffectError {
                    stage: Stage::Start,
                    source,
                };
                return Some((Err(error), state));
            }
        }

        let item = state.source.next().await?;
        let stage = Stage::Element(state.index);
        state.index += 1;

        let on_next = &mut state.on_next;
        match scoped(state.context.as_ref(), || on_next(&item)) {
            Ok(()) => Some((Ok(item), state)),
            Err(source) => {
                state.done = true;
                Some((Err(LoggingSideEffectError { stage, source }), state))
            }
        }
    })
}
