//! Immutable, price-ordered restaurant store.
//!
//! # Responsibilities
//! - Generate the restaurant collection once at startup
//! - Serve lazy, ascending-price streams of restaurants under a price cap
//!
//! # Design Decisions
//! - Items are kept in a plain slice sorted with a stable sort, so restaurants
//!   sharing a price are all retained, in generation order
//! - Filtering is a binary search for the cut-off followed by a sequential
//!   walk, so output order is always ascending by price
//! - The slice is shared through `Arc` and never mutated; no locks

use std::sync::Arc;

use futures_util::stream::{self, Stream};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::catalog::types::Restaurant;
use crate::config::CatalogConfig;

/// Read-only collection of restaurants ordered by price.
#[derive(Debug, Clone)]
pub struct RestaurantStore {
    restaurants: Arc<[Restaurant]>,
}

impl RestaurantStore {
    /// Generate `size` restaurants named `restaurant # <i>` with prices in
    /// `[0, max_price)`.
    pub fn generate<R: Rng + ?Sized>(size: usize, max_price: f64, rng: &mut R) -> Self {
        let restaurants = (0..size)
            .map(|i| Restaurant::new(format!("restaurant # {i}"), rng.gen::<f64>() * max_price))
            .collect();
        Self::from_restaurants(restaurants)
    }

    /// Build the store described by the catalog configuration.
    pub fn from_config(config: &CatalogConfig) -> Self {
        match config.seed {
            Some(seed) => {
                Self::generate(config.size, config.max_price, &mut StdRng::seed_from_u64(seed))
            }
            None => Self::generate(config.size, config.max_price, &mut rand::thread_rng()),
        }
    }

    /// Build a store from explicit restaurants.
    pub fn from_restaurants(mut restaurants: Vec<Restaurant>) -> Self {
        restaurants.sort_by(|a, b| a.price_per_person.total_cmp(&b.price_per_person));
        Self {
            restaurants: restaurants.into(),
        }
    }

    /// Every restaurant priced at or below `max_price`, cheapest first.
    ///
    /// Each call returns a fresh stream over the same data.
    pub fn get_by_max_price(&self, max_price: f64) -> impl Stream<Item = Restaurant> + Send + 'static {
        let end = self
            .restaurants
            .partition_point(|r| r.price_per_person <= max_price);
        let restaurants = Arc::clone(&self.restaurants);
        stream::iter((0..end).map(move |i| restaurants[i].clone()))
    }

    pub fn restaurants(&self) -> &[Restaurant] {
        &self.restaurants
    }

    pub fn len(&self) -> usize {
        self.restaurants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.restaurants.is_empty()
    }

    /// Cheapest and most expensive price, if any restaurants exist.
    pub fn price_range(&self) -> Option<(f64, f64)> {
        let first = self.restaurants.first()?;
        let last = self.restaurants.last()?;
        Some((first.price_per_person, last.price_per_person))
    }
}
