pub mod client;

pub use client::{FeedClient, Hero, Restaurant};
