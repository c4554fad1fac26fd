//! Active-survey feed ordering.
//!
//! Surveys with the fewest responses are shown first so traffic flows to
//! the ones that need it most. Ties go to the oldest survey, then the lowest
//! id, which makes the order total.

use std::cmp::Ordering;

use crate::types::{DbId, Timestamp};

/// `ORDER BY` clause the persistence layer must use for the feed.
///
/// Kept next to [`FeedKey`] so the SQL and in-memory orderings cannot drift.
pub const FEED_ORDER_BY: &str = "s.response_count ASC, s.created_at ASC, s.id ASC";

/// Default feed page size.
pub const DEFAULT_FEED_LIMIT: i64 = 20;

/// Largest feed page a caller may request.
pub const MAX_FEED_LIMIT: i64 = 100;

/// The fields that decide a survey's position in the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedKey {
    pub response_count: i32,
    pub created_at: Timestamp,
    pub id: DbId,
}

impl Ord for FeedKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.response_count
            .cmp(&other.response_count)
            .then_with(|| self.created_at.cmp(&other.created_at))
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl PartialOrd for FeedKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Anything that can be placed in the feed.
pub trait FeedRanked {
    fn feed_key(&self) -> FeedKey;
}

/// Whether `items` are already in feed order.
pub fn is_feed_ordered<T: FeedRanked>(items: &[T]) -> bool {
    items
        .windows(2)
        .all(|pair| pair[0].feed_key() <= pair[1].feed_key())
}
