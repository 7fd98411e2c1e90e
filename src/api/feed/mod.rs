pub mod client;
pub mod models;

pub use client::{FeedClient, FeedSource, StaticFeed};
pub use models::{normalize_feed, FeedEnvelope, FeedError};
