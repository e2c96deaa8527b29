//! Lightweight data-quality checks over recent events
//!
//! Freshness (events in the last hour) and integrity (NULL user or
//! event type). Findings are reported, never raised; the pipeline does
//! not block on this check.

use super::error::PipelineError;
use super::types::QualityReport;
use chrono::Utc;
use rusqlite::{params, Connection};

pub fn check(conn: &Connection) -> Result<QualityReport, PipelineError> {
    log::info!("🔧 Running data quality checks...");

    let freshness_cutoff = Utc::now().timestamp() - 3600;
    let recent_events: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM events WHERE timestamp >= ?1",
            params![freshness_cutoff],
            |row| row.get(0),
        )
        .map_err(|e| {
            log::error!("❌ Freshness query failed: {}", e);
            PipelineError::Quality(e)
        })?;

    let null_violations: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM events WHERE user_id IS NULL OR event_type IS NULL",
            [],
            |row| row.get(0),
        )
        .map_err(|e| {
            log::error!("❌ Integrity query failed: {}", e);
            PipelineError::Quality(e)
        })?;

    let report = QualityReport { recent_events, null_violations };

    log::info!("📊 Recent events (last hour): {}", report.recent_events);
    log::info!("📊 Events with null values: {}", report.null_violations);
    if let Ok(json) = serde_json::to_string(&report) {
        log::debug!("quality report: {}", json);
    }

    if !report.is_clean() {
        log::warn!("⚠️  Found {} events with null values!", report.null_violations);
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::schema::ensure_schema;

    fn open_test_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        ensure_schema(&conn).unwrap();
        conn
    }

    #[test]
    fn counts_only_events_from_the_last_hour() {
        let conn = open_test_db();
        let now = Utc::now().timestamp();

        conn.execute(
            "INSERT INTO events (user_id, event_type, timestamp, product_id) VALUES (1, 'page_view', ?1, 1)",
            params![now - 60],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO events (user_id, event_type, timestamp, product_id) VALUES (2, 'page_view', ?1, 1)",
            params![now - 7200],
        )
        .unwrap();

        let report = check(&conn).unwrap();
        assert_eq!(report.recent_events, 1);
        assert!(report.is_clean());
    }

    #[test]
    fn null_user_is_reported_not_raised() {
        let conn = open_test_db();
        let now = Utc::now().timestamp();

        conn.execute(
            "INSERT INTO events (user_id, event_type, timestamp, product_id) VALUES (NULL, 'page_view', ?1, 1)",
            params![now],
        )
        .unwrap();

        let report = check(&conn).unwrap();
        assert_eq!(report.null_violations, 1);
        assert!(!report.is_clean());
    }

    #[test]
    fn null_event_type_counts_as_violation() {
        let conn = open_test_db();
        let now = Utc::now().timestamp();

        conn.execute(
            "INSERT INTO events (user_id, event_type, timestamp, product_id) VALUES (5, NULL, ?1, 1)",
            params![now],
        )
        .unwrap();

        let report = check(&conn).unwrap();
        assert_eq!(report.null_violations, 1);
    }

    #[test]
    fn empty_store_yields_a_clean_report() {
        let conn = open_test_db();
        let report = check(&conn).unwrap();
        assert_eq!(report, QualityReport { recent_events: 0, null_violations: 0 });
    }
}
