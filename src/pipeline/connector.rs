//! Store connector with bounded linear retry
//!
//! Every component reaches the store through `StoreConnector::acquire`,
//! which opens a fresh connection per use (released on drop). The retry
//! behavior is an explicit `RetryPolicy` value so the fixed linear
//! policy can later be swapped for exponential/jittered variants without
//! touching the contract.

use super::error::PipelineError;
use rusqlite::Connection;
use std::path::PathBuf;
use std::time::Duration;
use tokio::time::sleep;

/// Fixed linear retry budget: `max_attempts` opens, `delay` apart
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            delay: Duration::from_secs(5),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StoreConnector {
    path: PathBuf,
    retry: RetryPolicy,
}

impl StoreConnector {
    pub fn new(path: impl Into<PathBuf>, retry: RetryPolicy) -> Self {
        Self { path: path.into(), retry }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Open a connection, retrying up to the policy's budget
    ///
    /// On final failure the error propagates to the caller; the
    /// orchestrator/scheduler decides whether to abort or reschedule.
    pub async fn acquire(&self) -> Result<Connection, PipelineError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                if let Err(e) = std::fs::create_dir_all(parent) {
                    log::warn!("⚠️  Could not create store directory {}: {}", parent.display(), e);
                }
            }
        }

        let mut last_error = String::new();
        for attempt in 1..=self.retry.max_attempts {
            match self.open() {
                Ok(conn) => return Ok(conn),
                Err(e) => {
                    log::warn!(
                        "⏳ Store connection attempt {}/{} failed: {}",
                        attempt,
                        self.retry.max_attempts,
                        e
                    );
                    last_error = e.to_string();
                    if attempt < self.retry.max_attempts {
                        sleep(self.retry.delay).await;
                    }
                }
            }
        }

        Err(PipelineError::Connectivity {
            attempts: self.retry.max_attempts,
            message: last_error,
        })
    }

    fn open(&self) -> Result<Connection, rusqlite::Error> {
        let conn = Connection::open(&self.path)?;

        // WAL + busy timeout so the pipeline tick and the quality check
        // can hold connections to the same file
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        conn.busy_timeout(Duration::from_secs(5))?;

        Ok(conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;
    use tempfile::tempdir;

    #[tokio::test]
    async fn acquire_opens_database_with_wal_mode() {
        let dir = tempdir().unwrap();
        let connector = StoreConnector::new(dir.path().join("test.db"), RetryPolicy::default());

        let conn = connector.acquire().await.unwrap();

        let journal_mode: String = conn
            .query_row("PRAGMA journal_mode", [], |row| row.get(0))
            .unwrap();
        assert_eq!(journal_mode.to_lowercase(), "wal");
    }

    #[tokio::test]
    async fn acquire_creates_missing_parent_directory() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("data").join("ecommerce.db");
        let connector = StoreConnector::new(&nested, RetryPolicy::default());

        connector.acquire().await.unwrap();
        assert!(nested.exists());
    }

    #[tokio::test]
    async fn acquire_exhausts_retry_budget_before_failing() {
        let dir = tempdir().unwrap();
        // A directory path cannot be opened as a database file
        let connector = StoreConnector::new(
            dir.path(),
            RetryPolicy {
                max_attempts: 5,
                delay: Duration::from_millis(20),
            },
        );

        let started = Instant::now();
        let err = connector.acquire().await.unwrap_err();

        match err {
            PipelineError::Connectivity { attempts, .. } => assert_eq!(attempts, 5),
            other => panic!("expected Connectivity error, got {:?}", other),
        }
        // Four inter-attempt delays between five attempts
        assert!(started.elapsed() >= Duration::from_millis(80));
    }
}
