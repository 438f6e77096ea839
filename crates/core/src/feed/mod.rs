//! Feed module - journal entries rendered newest first.

mod feed_model;
mod feed_service;

pub use feed_model::{ActionRecap, FeedItem};
pub use feed_service::{build_feed, FeedService, FeedServiceTrait};
