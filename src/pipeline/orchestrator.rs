//! Pipeline orchestration: generate → ingest → recompute
//!
//! The initial load and the recurring tick both go through `run_once`,
//! differing only in batch size. Ingestion's and aggregation's
//! transactions are independent: events can land durably while the
//! aggregates stay stale until the next successful run.

use super::aggregate;
use super::connector::StoreConnector;
use super::error::PipelineError;
use super::generator::EventGenerator;
use super::writer;

pub struct Pipeline {
    connector: StoreConnector,
    generator: EventGenerator,
}

impl Pipeline {
    pub fn new(connector: StoreConnector, generator: EventGenerator) -> Self {
        Self { connector, generator }
    }

    /// One sequential pipeline run; the first failing stage aborts the
    /// rest and the error propagates to the caller
    pub async fn run_once(&mut self, batch_size: usize) -> Result<(), PipelineError> {
        log::info!("🚀 Starting data pipeline (batch: {})...", batch_size);

        let events = self.generator.generate(batch_size);

        let mut conn = self.connector.acquire().await?;
        writer::insert_events(&mut conn, &events)?;
        drop(conn);

        let mut conn = self.connector.acquire().await?;
        aggregate::recompute(&mut conn)?;

        log::info!("✅ Pipeline completed successfully");
        Ok(())
    }
}
