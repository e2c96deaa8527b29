//! Transactional batch ingestion of events
//!
//! One transaction per batch, row-at-a-time inserts, single commit. Any
//! row failure drops the transaction uncommitted, so partial batches are
//! never visible to readers.

use super::error::PipelineError;
use super::types::Event;
use rusqlite::{params, Connection};

pub fn insert_events(conn: &mut Connection, events: &[Event]) -> Result<usize, PipelineError> {
    log::info!("🔧 Inserting {} events into database...", events.len());

    let tx = conn.transaction().map_err(PipelineError::Ingestion)?;

    for event in events {
        tx.execute(
            "INSERT INTO events (user_id, event_type, timestamp, product_id, amount)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                event.user_id,
                event.kind.as_str(),
                event.timestamp.timestamp(),
                event.product_id,
                event.amount,
            ],
        )
        .map_err(|e| {
            log::error!("❌ Error inserting events, rolling back batch: {}", e);
            PipelineError::Ingestion(e)
        })?;
    }

    tx.commit().map_err(|e| {
        log::error!("❌ Error committing event batch: {}", e);
        PipelineError::Ingestion(e)
    })?;

    log::info!("✅ Events inserted successfully");
    Ok(events.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::schema::ensure_schema;
    use crate::pipeline::types::EventKind;
    use chrono::Utc;

    fn open_test_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        ensure_schema(&conn).unwrap();
        conn
    }

    fn page_view(user_id: i64, product_id: i64) -> Event {
        Event {
            user_id: Some(user_id),
            kind: EventKind::PageView,
            timestamp: Utc::now(),
            product_id,
            amount: None,
        }
    }

    fn purchase(user_id: i64, product_id: i64, amount: f64) -> Event {
        Event {
            user_id: Some(user_id),
            kind: EventKind::Purchase,
            timestamp: Utc::now(),
            product_id,
            amount: Some(amount),
        }
    }

    #[test]
    fn inserts_whole_batch() {
        let mut conn = open_test_db();
        let events = vec![page_view(1, 10), purchase(2, 20, 49.99), page_view(3, 30)];

        let inserted = insert_events(&mut conn, &events).unwrap();
        assert_eq!(inserted, 3);

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM events", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 3);
    }

    #[test]
    fn stores_null_amount_for_non_purchases() {
        let mut conn = open_test_db();
        insert_events(&mut conn, &[page_view(1, 10)]).unwrap();

        let amount: Option<f64> = conn
            .query_row("SELECT amount FROM events WHERE user_id = 1", [], |row| row.get(0))
            .unwrap();
        assert!(amount.is_none());
    }

    #[test]
    fn failed_row_rolls_back_entire_batch() {
        let mut conn = open_test_db();

        // Last event violates the amount CHECK constraint
        let events = vec![
            page_view(1, 10),
            purchase(2, 20, 100.0),
            page_view(3, 30),
            purchase(4, 40, -1.0),
        ];

        let result = insert_events(&mut conn, &events);
        assert!(matches!(result, Err(PipelineError::Ingestion(_))));

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM events", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0, "partial batch must not be visible");
    }

    #[test]
    fn empty_batch_is_a_no_op() {
        let mut conn = open_test_db();
        assert_eq!(insert_events(&mut conn, &[]).unwrap(), 0);
    }
}
