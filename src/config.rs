//! Runtime configuration from environment variables

use crate::pipeline::connector::RetryPolicy;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Configuration for the pipeline process
///
/// Loaded from environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Database namespace; the store file is `<name>.db` under `data_dir`
    pub db_name: String,

    /// Directory holding the store file
    pub data_dir: PathBuf,

    /// Batch size for the one-time initial load
    pub initial_batch: usize,

    /// Batch size for each recurring pipeline tick
    pub tick_batch: usize,

    /// Seconds between pipeline ticks in continuous mode
    pub pipeline_interval_secs: u64,

    /// Seconds between quality checks in continuous mode
    pub quality_interval_secs: u64,

    /// Store connection attempts before giving up
    pub db_max_retries: u32,

    /// Fixed delay between connection attempts, in seconds
    pub db_retry_delay_secs: u64,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - `SHOPFLOW_DB_NAME` (default: ecommerce)
    /// - `SHOPFLOW_DATA_DIR` (default: .)
    /// - `SHOPFLOW_INITIAL_BATCH` (default: 500)
    /// - `SHOPFLOW_TICK_BATCH` (default: 50)
    /// - `SHOPFLOW_PIPELINE_INTERVAL_SECS` (default: 300)
    /// - `SHOPFLOW_QUALITY_INTERVAL_SECS` (default: 1800)
    /// - `SHOPFLOW_DB_MAX_RETRIES` (default: 5)
    /// - `SHOPFLOW_DB_RETRY_DELAY_SECS` (default: 5)
    pub fn from_env() -> Self {
        Self {
            db_name: env::var("SHOPFLOW_DB_NAME").unwrap_or_else(|_| "ecommerce".to_string()),

            data_dir: env::var("SHOPFLOW_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".")),

            initial_batch: env::var("SHOPFLOW_INITIAL_BATCH")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(500),

            tick_batch: env::var("SHOPFLOW_TICK_BATCH")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(50),

            pipeline_interval_secs: env::var("SHOPFLOW_PIPELINE_INTERVAL_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(300),

            quality_interval_secs: env::var("SHOPFLOW_QUALITY_INTERVAL_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1_800),

            db_max_retries: env::var("SHOPFLOW_DB_MAX_RETRIES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(5),

            db_retry_delay_secs: env::var("SHOPFLOW_DB_RETRY_DELAY_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(5),
        }
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(format!("{}.db", self.db_name))
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.db_max_retries,
            delay: Duration::from_secs(self.db_retry_delay_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Env vars are process-global, so defaults and overrides share one test
    #[test]
    fn config_defaults_and_overrides() {
        for var in [
            "SHOPFLOW_DB_NAME",
            "SHOPFLOW_DATA_DIR",
            "SHOPFLOW_INITIAL_BATCH",
            "SHOPFLOW_TICK_BATCH",
            "SHOPFLOW_PIPELINE_INTERVAL_SECS",
            "SHOPFLOW_QUALITY_INTERVAL_SECS",
            "SHOPFLOW_DB_MAX_RETRIES",
            "SHOPFLOW_DB_RETRY_DELAY_SECS",
        ] {
            env::remove_var(var);
        }

        let config = Config::from_env();
        assert_eq!(config.db_name, "ecommerce");
        assert_eq!(config.db_path(), PathBuf::from("./ecommerce.db"));
        assert_eq!(config.initial_batch, 500);
        assert_eq!(config.tick_batch, 50);
        assert_eq!(config.pipeline_interval_secs, 300);
        assert_eq!(config.quality_interval_secs, 1_800);
        assert_eq!(config.retry_policy().max_attempts, 5);
        assert_eq!(config.retry_policy().delay, Duration::from_secs(5));

        env::set_var("SHOPFLOW_DB_NAME", "shop_test");
        env::set_var("SHOPFLOW_DATA_DIR", "/tmp/shopflow");
        env::set_var("SHOPFLOW_TICK_BATCH", "25");
        env::set_var("SHOPFLOW_DB_MAX_RETRIES", "3");

        let config = Config::from_env();
        assert_eq!(config.db_path(), PathBuf::from("/tmp/shopflow/shop_test.db"));
        assert_eq!(config.tick_batch, 25);
        assert_eq!(config.retry_policy().max_attempts, 3);

        env::remove_var("SHOPFLOW_DB_NAME");
        env::remove_var("SHOPFLOW_DATA_DIR");
        env::remove_var("SHOPFLOW_TICK_BATCH");
        env::remove_var("SHOPFLOW_DB_MAX_RETRIES");
    }
}
