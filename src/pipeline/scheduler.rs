//! Continuous-mode scheduling
//!
//! Two independently scheduled periodic tasks — the pipeline tick and
//! the quality check — each on its own `tokio` interval, coordinated by
//! a single watch-channel stop signal flipped on CTRL+C. A tick runs
//! inline in its task, so same-kind ticks never overlap; stop is
//! observed between ticks (no mid-tick cancellation). A failed tick is
//! logged and the loop keeps polling for the next due trigger.

use super::connector::StoreConnector;
use super::error::PipelineError;
use super::generator::EventGenerator;
use super::orchestrator::Pipeline;
use super::quality;
use super::schema;
use crate::config::Config;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::interval;

pub async fn run_continuous(config: &Config) -> Result<(), PipelineError> {
    let connector = StoreConnector::new(config.db_path(), config.retry_policy());

    let conn = connector.acquire().await?;
    schema::ensure_schema(&conn)?;
    drop(conn);

    let (stop_tx, stop_rx) = watch::channel(false);

    let pipeline = Pipeline::new(connector.clone(), EventGenerator::new());
    let pipeline_task = tokio::spawn(pipeline_loop(
        pipeline,
        Duration::from_secs(config.pipeline_interval_secs),
        config.tick_batch,
        stop_rx.clone(),
    ));
    let quality_task = tokio::spawn(quality_loop(
        connector,
        Duration::from_secs(config.quality_interval_secs),
        stop_rx,
    ));

    log::info!("🔄 Continuous pipeline started");
    log::info!("   ├─ Pipeline tick: every {}s", config.pipeline_interval_secs);
    log::info!("   ├─ Quality check: every {}s", config.quality_interval_secs);
    log::info!("   └─ Press CTRL+C to stop");

    match tokio::signal::ctrl_c().await {
        Ok(()) => log::info!("⚠️  Received CTRL+C, shutting down..."),
        Err(e) => log::error!("❌ Failed to listen for CTRL+C: {}", e),
    }

    let _ = stop_tx.send(true);
    let _ = pipeline_task.await;
    let _ = quality_task.await;

    log::info!("✅ Pipeline stopped");
    Ok(())
}

/// Periodic pipeline tick; errors abandon only the current tick
async fn pipeline_loop(
    mut pipeline: Pipeline,
    every: Duration,
    batch_size: usize,
    mut stop: watch::Receiver<bool>,
) {
    let mut ticker = interval(every);
    // Swallow the immediate first tick so the first run happens one
    // full interval after start
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Err(e) = pipeline.run_once(batch_size).await {
                    log::error!("❌ Pipeline tick failed: {}", e);
                }
            }
            _ = stop.changed() => break,
        }
    }
    log::info!("   ├─ Pipeline loop stopped");
}

/// Periodic quality check on its own cadence
async fn quality_loop(connector: StoreConnector, every: Duration, mut stop: watch::Receiver<bool>) {
    let mut ticker = interval(every);
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match connector.acquire().await {
                    Ok(conn) => {
                        if let Err(e) = quality::check(&conn) {
                            log::error!("❌ Quality check failed: {}", e);
                        }
                    }
                    Err(e) => log::error!("❌ Quality check could not reach store: {}", e),
                }
            }
            _ = stop.changed() => break,
        }
    }
    log::info!("   ├─ Quality loop stopped");
}
