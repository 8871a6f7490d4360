//! Shared utilities for integration tests.

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use tower::ServiceExt;

use reactive_feed::catalog::{Restaurant, RestaurantStore};
use reactive_feed::config::{CatalogConfig, FeedConfig};
use reactive_feed::http::{AppState, HttpServer};

/// Reproducible 1000-item catalog.
#[allow(dead_code)]
pub fn seeded_store() -> RestaurantStore {
    RestaurantStore::from_config(&CatalogConfig {
        size: 1000,
        max_price: 100.0,
        seed: Some(1234),
    })
}

/// Small catalog with known prices, including a duplicate.
#[allow(dead_code)]
pub fn fixed_store() -> RestaurantStore {
    RestaurantStore::from_restaurants(vec![
        Restaurant::new("restaurant # 0", 42.0),
        Restaurant::new("restaurant # 1", 7.5),
        Restaurant::new("restaurant # 2", 19.99),
        Restaurant::new("restaurant # 3", 7.5),
        Restaurant::new("restaurant # 4", 88.0),
    ])
}

pub fn app(store: RestaurantStore) -> Router {
    HttpServer::build_router(&FeedConfig::default(), AppState { store })
}

pub async fn get(app: Router, uri: &str, accept: Option<&str>) -> Response<Body> {
    let mut request = Request::builder().uri(uri);
    if let Some(accept) = accept {
        request = request.header("accept", accept);
    }
    app.oneshot(request.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// GET a restaurant feed as a JSON array and decode it.
#[allow(dead_code)]
pub async fn restaurants(app: Router, uid: &str, price: &str) -> (StatusCode, Vec<Restaurant>) {
    let response = get(app, &format!("/{uid}/restaurants/{price}"), None).await;
    let status = response.status();
    let body = body_string(response).await;
    let items = if status.is_success() {
        serde_json::from_str(&body).unwrap()
    } else {
        Vec::new()
    };
    (status, items)
}
