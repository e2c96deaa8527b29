//! Core data structures for the pipeline

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Kind of user interaction an event records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    PageView,
    AddToCart,
    Purchase,
    RemoveFromCart,
}

impl EventKind {
    /// All kinds, in weight order (most common first)
    pub const ALL: [EventKind; 4] = [
        EventKind::PageView,
        EventKind::AddToCart,
        EventKind::Purchase,
        EventKind::RemoveFromCart,
    ];

    /// String form stored in the `events.event_type` column
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::PageView => "page_view",
            EventKind::AddToCart => "add_to_cart",
            EventKind::Purchase => "purchase",
            EventKind::RemoveFromCart => "remove_from_cart",
        }
    }
}

/// One synthetic user interaction, immutable once persisted
///
/// `timestamp` is the event-occurrence time; the store assigns the
/// surrogate id and `created_at` on insert.
///
/// Invariant: `amount` is `Some` if and only if `kind == Purchase`.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    /// Acting user (nullable in the schema so integrity violations
    /// are representable; the generator always sets it)
    pub user_id: Option<i64>,
    pub kind: EventKind,
    pub timestamp: DateTime<Utc>,
    pub product_id: i64,
    /// Order value in currency units, purchases only
    pub amount: Option<f64>,
}

/// Result of one data-quality pass over the events table
///
/// Problems are reported, never raised: a dirty store still yields
/// an `Ok(QualityReport)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QualityReport {
    /// Events whose occurrence timestamp lies within the last hour
    pub recent_events: i64,
    /// Events with a NULL user id or NULL event type
    pub null_violations: i64,
}

impl QualityReport {
    pub fn is_clean(&self) -> bool {
        self.null_violations == 0
    }
}
