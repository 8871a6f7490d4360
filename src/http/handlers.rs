//! Route handlers.

use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::Response;
use axum::Json;
use futures_util::stream::Stream;
use serde::{Deserialize, Serialize};

use crate::catalog::{Hero, MaxPrice, Restaurant, RestaurantStore};
use crate::http::error::ApiError;
use crate::http::response::{stream_response, StreamFormat};
use crate::http::server::AppState;
use crate::observability::mdc::RequestContext;
use crate::reactive::{log_with_context, LoggingSideEffectError};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    pub restaurants: usize,
}

pub async fn get_hero() -> Json<Hero> {
    Json(Hero::new(1, "name1"))
}

pub async fn get_health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        restaurants: state.store.len(),
    })
}

/// `GET /{uid}/restaurants/{price}`
pub async fn get_restaurants(
    State(state): State<AppState>,
    path: Result<Path<(String, String)>, PathRejection>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let Path((uid, price)) = path?;
    let max_price: MaxPrice = price.parse()?;
    let format = StreamFormat::negotiate(&headers);
    let feed = restaurant_feed(&state.store, uid, max_price);
    stream_response(feed, format).await
}

/// Restaurants under `max_price`, with a start line and one line per match
/// logged under the caller's identifier.
pub fn restaurant_feed(
    store: &RestaurantStore,
    uid: String,
    max_price: MaxPrice,
) -> impl Stream<Item = Result<Restaurant, LoggingSideEffectError>> + Send + 'static {
    let price = max_price.value();
    let context = (!uid.is_empty()).then(|| RequestContext::new(uid.as_str()));

    log_with_context(
        store.get_by_max_price(price),
        context,
        move || {
            tracing::info!(
                "finding restaurant having price lower than ${:.2} for {}",
                price,
                uid
            );
            Ok(())
        },
        |restaurant: &Restaurant| {
            tracing::info!(
                "found restaurant {} for ${}",
                restaurant.name,
                restaurant.price_per_person
            );
            Ok(())
        },
    )
}
