//! Pipeline engine: event synthesis, batched ingestion, trailing-window
//! rollups, quality checks, and the scheduling that ties them together
//!
//! Component dependency order (leaves first):
//! - `connector` — retrying store access; everything else goes through it
//! - `schema` — idempotent table setup
//! - `generator` — synthetic event batches (no store dependency)
//! - `writer` — transactional batch ingestion
//! - `aggregate` — trailing-window rollup recomputation
//! - `quality` — freshness/integrity reporting
//! - `orchestrator` — generate → ingest → recompute as one run
//! - `scheduler` — periodic runs in continuous mode

pub mod aggregate;
pub mod connector;
pub mod error;
pub mod generator;
pub mod orchestrator;
pub mod quality;
pub mod scheduler;
pub mod schema;
pub mod types;
pub mod writer;

// Re-export commonly used types
pub use connector::{RetryPolicy, StoreConnector};
pub use error::PipelineError;
pub use generator::EventGenerator;
pub use orchestrator::Pipeline;
pub use types::{Event, EventKind, QualityReport};
