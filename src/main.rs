//! shopflow — scheduled e-commerce ETL demo
//!
//! Default invocation runs schema setup, one initial load, an
//! aggregation pass, and a quality check, then exits. `--continuous`
//! instead starts the scheduler, which runs until CTRL+C.
//!
//! Environment variables are documented on `config::Config::from_env`.

pub mod config;
pub mod pipeline;

use config::Config;
use dotenv::dotenv;
use log::{error, info};
use pipeline::{
    connector::StoreConnector, generator::EventGenerator, orchestrator::Pipeline, quality,
    scheduler, schema, PipelineError,
};

#[tokio::main]
pub async fn main() {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env();
    let continuous = std::env::args().skip(1).any(|arg| arg == "--continuous");

    info!("🚀 shopflow — mini resilient data platform");
    info!("   ├─ Store: {}", config.db_path().display());
    info!("   └─ Mode: {}", if continuous { "continuous" } else { "one-shot" });

    let result = if continuous {
        scheduler::run_continuous(&config).await
    } else {
        run_initial_load(&config).await
    };

    if let Err(e) = result {
        error!("❌ Startup failed: {}", e);
        std::process::exit(1);
    }
}

/// One-shot mode: schema setup, initial load, quality check
async fn run_initial_load(config: &Config) -> Result<(), PipelineError> {
    let connector = StoreConnector::new(config.db_path(), config.retry_policy());

    let conn = connector.acquire().await?;
    schema::ensure_schema(&conn)?;
    drop(conn);

    info!("🔧 Running initial data load...");
    let mut pipeline = Pipeline::new(connector.clone(), EventGenerator::new());
    pipeline.run_once(config.initial_batch).await?;

    let conn = connector.acquire().await?;
    quality::check(&conn)?;

    info!("✅ Initial setup complete!");
    info!("   └─ To run the continuous pipeline: shopflow --continuous");
    Ok(())
}
