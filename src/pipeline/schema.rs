//! Idempotent schema setup for the three persisted tables
//!
//! Safe to call on every process start. A pre-existing table with a
//! divergent shape is assumed compatible; no migration is attempted.

use super::error::PipelineError;
use rusqlite::Connection;

pub fn ensure_schema(conn: &Connection) -> Result<(), PipelineError> {
    log::info!("🔧 Setting up database tables...");

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS events (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id     INTEGER,
            event_type  TEXT,
            timestamp   INTEGER NOT NULL,
            product_id  INTEGER,
            amount      REAL CHECK (amount IS NULL OR amount > 0),
            created_at  TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        );

        CREATE TABLE IF NOT EXISTS daily_metrics (
            date            TEXT PRIMARY KEY,
            total_events    INTEGER NOT NULL,
            unique_users    INTEGER NOT NULL,
            total_revenue   REAL NOT NULL,
            avg_order_value REAL NOT NULL,
            created_at      TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        );

        CREATE TABLE IF NOT EXISTS product_performance (
            product_id  INTEGER NOT NULL,
            date        TEXT NOT NULL,
            views       INTEGER NOT NULL DEFAULT 0,
            purchases   INTEGER NOT NULL DEFAULT 0,
            revenue     REAL NOT NULL DEFAULT 0,
            PRIMARY KEY (product_id, date)
        );

        CREATE INDEX IF NOT EXISTS idx_events_timestamp ON events(timestamp DESC);
        "#,
    )
    .map_err(|e| {
        log::error!("❌ Schema setup failed: {}", e);
        PipelineError::Schema(e)
    })?;

    log::info!("✅ Database setup complete");
    Ok(())
}
