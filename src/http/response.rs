//! Streamed response bodies.
//!
//! # Responsibilities
//! - Pick a body framing from the `Accept` header
//! - Serialize each element as it is produced, without buffering the result
//! - Turn a failure before the first element into an error response
//!
//! # Design Decisions
//! - The first element is awaited before headers are committed, so a
//!   failing start log action still yields a 500
//! - Later failures cannot change the status; the body stream ends with an
//!   error and the connection is aborted
//! - Default framing is a JSON array written one element per chunk

use axum::body::{Body, Bytes};
use axum::http::header::{ACCEPT, CONTENT_TYPE};
use axum::http::{HeaderMap, HeaderValue};
use axum::response::sse::{Event, Sse};
use axum::response::{IntoResponse, Response};
use axum::BoxError;
use futures_util::stream::{self, Stream, StreamExt};
use serde::Serialize;

use crate::http::error::ApiError;
use crate::observability::metrics;
use crate::reactive::LoggingSideEffectError;

/// Body framing for streamed collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamFormat {
    /// `[{...},{...}]`, `application/json`.
    JsonArray,
    /// One object per line, `application/x-ndjson`.
    NdJson,
    /// One `data:` event per object, `text/event-stream`.
    EventStream,
}

impl StreamFormat {
    pub fn negotiate(headers: &HeaderMap) -> Self {
        let accept = headers
            .get(ACCEPT)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();

        if accept.contains("text/event-stream") {
            StreamFormat::EventStream
        } else if accept.contains("application/x-ndjson") {
            StreamFormat::NdJson
        } else {
            StreamFormat::JsonArray
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            StreamFormat::JsonArray => "application/json",
            StreamFormat::NdJson => "application/x-ndjson",
            StreamFormat::EventStream => "text/event-stream",
        }
    }

    fn label(self) -> &'static str {
        match self {
            StreamFormat::JsonArray => "json",
            StreamFormat::NdJson => "ndjson",
            StreamFormat::EventStream => "sse",
        }
    }
}

fn abort(err: LoggingSideEffectError) -> BoxError {
    tracing::error!(error = %err, "Aborting response stream");
    metrics::record_log_failure();
    Box::new(err)
}

/// Stream `items` to the client in `format`.
pub async fn stream_response<S, T>(items: S, format: StreamFormat) -> Result<Response, ApiError>
where
    S: Stream<Item = Result<T, LoggingSideEffectError>> + Send + 'static,
    T: Serialize + Send + 'static,
{
    let mut items = Box::pin(items);
    let first = match items.next().await {
        Some(Err(err)) => return Err(err.into()),
        first => first,
    };
    let label = format.label();
    let items = stream::iter(first)
        .chain(items)
        .map(move |item| -> Result<T, BoxError> {
            let item = item.map_err(abort)?;
            metrics::record_item_streamed(label);
            Ok(item)
        });

    let response = match format {
        StreamFormat::EventStream => {
            let events = items.map(|item| -> Result<Event, BoxError> {
                Ok(Event::default().json_data(&item?)?)
            });
            Sse::new(events).into_response()
        }
        StreamFormat::NdJson => {
            let lines = items.map(|item| -> Result<Bytes, BoxError> {
                let mut line = serde_json::to_vec(&item?)?;
                line.push(b'\n');
                Ok(Bytes::from(line))
            });
            with_content_type(Body::from_stream(lines), format)
        }
        StreamFormat::JsonArray => {
            let elements = items
                .enumerate()
                .map(|(index, item)| -> Result<Bytes, BoxError> {
                    let mut chunk = if index == 0 { Vec::new() } else { vec![b','] };
                    serde_json::to_writer(&mut chunk, &item?)?;
                    Ok(Bytes::from(chunk))
                });
            let open = stream::once(async { Ok::<Bytes, BoxError>(Bytes::from_static(b"[")) });
            let close = stream::once(async { Ok::<Bytes, BoxError>(Bytes::from_static(b"]")) });
            with_content_type(Body::from_stream(open.chain(elements).chain(close)), format)
        }
    };

    Ok(response)
}

fn with_content_type(body: Body, format: StreamFormat) -> Response {
    let mut response = Response::new(body);
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(format.content_type()));
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Restaurant;
    use crate::reactive::{LogActionError, Stage};
    use axum::http::StatusCode;

    fn ok_items(items: Vec<Restaurant>) -> impl Stream<Item = Result<Restaurant, LoggingSideEffectError>> {
        stream::iter(items.into_iter().map(Ok))
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn headers_with_accept(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_negotiate() {
        assert_eq!(StreamFormat::negotiate(&HeaderMap::new()), StreamFormat::JsonArray);
        assert_eq!(
            StreamFormat::negotiate(&headers_with_accept("application/x-ndjson")),
            StreamFormat::NdJson
        );
        assert_eq!(
            StreamFormat::negotiate(&headers_with_accept("text/event-stream")),
            StreamFormat::EventStream
        );
        assert_eq!(
            StreamFormat::negotiate(&headers_with_accept("*/*")),
            StreamFormat::JsonArray
        );
    }

    #[tokio::test]
    async fn test_json_array_framing() {
        let items = vec![Restaurant::new("a", 1.0), Restaurant::new("b", 2.5)];
        let response = stream_response(ok_items(items), StreamFormat::JsonArray)
            .await
            .unwrap();
        assert_eq!(response.headers()[CONTENT_TYPE], "application/json");
        assert_eq!(
            body_text(response).await,
            r#"[{"name":"a","pricePerPerson":1.0},{"name":"b","pricePerPerson":2.5}]"#
        );
    }

    #[tokio::test]
    async fn test_empty_json_array() {
        let response = stream_response(ok_items(Vec::new()), StreamFormat::JsonArray)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "[]");
    }

    #[tokio::test]
    async fn test_ndjson_framing() {
        let items = vec![Restaurant::new("a", 1.0), Restaurant::new("b", 2.0)];
        let response = stream_response(ok_items(items), StreamFormat::NdJson)
            .await
            .unwrap();
        assert_eq!(response.headers()[CONTENT_TYPE], "application/x-ndjson");
        assert_eq!(
            body_text(response).await,
            "{\"name\":\"a\",\"pricePerPerson\":1.0}\n{\"name\":\"b\",\"pricePerPerson\":2.0}\n"
        );
    }

    #[tokio::test]
    async fn test_event_stream_framing() {
        let response = stream_response(ok_items(vec![Restaurant::new("a", 1.0)]), StreamFormat::EventStream)
            .await
            .unwrap();
        assert_eq!(response.headers()[CONTENT_TYPE], "text/event-stream");
        assert_eq!(
            body_text(response).await,
            "data: {\"name\":\"a\",\"pricePerPerson\":1.0}\n\n"
        );
    }

    #[tokio::test]
    async fn test_failure_before_first_item_is_an_error_response() {
        let failing = stream::iter(vec![Err::<Restaurant, _>(LoggingSideEffectError {
            stage: Stage::Start,
            source: LogActionError::new("boom"),
        })]);

        let err = stream_response(failing, StreamFormat::JsonArray)
            .await
            .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_failure_mid_stream_aborts_body() {
        let items = stream::iter(vec![
            Ok(Restaurant::new("a", 1.0)),
            Err(LoggingSideEffectError {
                stage: Stage::Element(1),
                source: LogActionError::new("boom"),
            }),
        ]);

        let response = stream_response(items, StreamFormat::NdJson).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await;
        assert!(body.is_err());
    }
}
