//! Trailing-window rollup recomputation
//!
//! Re-derives `daily_metrics` and `product_performance` from the raw
//! `events` table for every date in the `[today - 7 days, today]`
//! window, upserting with last-write-wins semantics. Both derivations
//! run inside one transaction; failure of either rolls back both.
//!
//! Dates older than the window are left stale on purpose: events are
//! append-only, so out-of-window aggregates can never drift.

use super::error::PipelineError;
use chrono::{Duration, Utc};
use rusqlite::{params, Connection};

/// Trailing recompute window in days
const WINDOW_DAYS: i64 = 7;

pub fn recompute(conn: &mut Connection) -> Result<(), PipelineError> {
    let window_start = (Utc::now().date_naive() - Duration::days(WINDOW_DAYS)).to_string();
    log::info!("🔧 Running data transformations (window start: {})...", window_start);

    let tx = conn.transaction().map_err(PipelineError::Aggregation)?;

    tx.execute(
        r#"
        INSERT INTO daily_metrics (date, total_events, unique_users, total_revenue, avg_order_value)
        SELECT
            DATE(timestamp, 'unixepoch') AS date,
            COUNT(*) AS total_events,
            COUNT(DISTINCT user_id) AS unique_users,
            COALESCE(SUM(amount) FILTER (WHERE event_type = 'purchase'), 0) AS total_revenue,
            COALESCE(AVG(amount) FILTER (WHERE event_type = 'purchase'), 0) AS avg_order_value
        FROM events
        WHERE DATE(timestamp, 'unixepoch') >= ?1
        GROUP BY DATE(timestamp, 'unixepoch')
        ON CONFLICT(date) DO UPDATE SET
            total_events = excluded.total_events,
            unique_users = excluded.unique_users,
            total_revenue = excluded.total_revenue,
            avg_order_value = excluded.avg_order_value,
            created_at = CURRENT_TIMESTAMP
        "#,
        params![window_start],
    )
    .map_err(|e| {
        log::error!("❌ Error recomputing daily metrics: {}", e);
        PipelineError::Aggregation(e)
    })?;

    tx.execute(
        r#"
        INSERT INTO product_performance (product_id, date, views, purchases, revenue)
        SELECT
            product_id,
            DATE(timestamp, 'unixepoch') AS date,
            COUNT(*) FILTER (WHERE event_type = 'page_view') AS views,
            COUNT(*) FILTER (WHERE event_type = 'purchase') AS purchases,
            COALESCE(SUM(amount) FILTER (WHERE event_type = 'purchase'), 0) AS revenue
        FROM events
        WHERE DATE(timestamp, 'unixepoch') >= ?1
        GROUP BY product_id, DATE(timestamp, 'unixepoch')
        ON CONFLICT(product_id, date) DO UPDATE SET
            views = excluded.views,
            purchases = excluded.purchases,
            revenue = excluded.revenue
        "#,
        params![window_start],
    )
    .map_err(|e| {
        log::error!("❌ Error recomputing product performance: {}", e);
        PipelineError::Aggregation(e)
    })?;

    tx.commit().map_err(|e| {
        log::error!("❌ Error committing transformations: {}", e);
        PipelineError::Aggregation(e)
    })?;

    log::info!("✅ Data transformations completed");
    Ok(())
}
