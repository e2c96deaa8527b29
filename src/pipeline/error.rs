//! Pipeline error taxonomy
//!
//! Every variant is fatal to the current run and bubbles up to the
//! orchestrator/scheduler boundary. Quality findings are not errors;
//! they travel inside a successful `QualityReport`.

#[derive(Debug)]
pub enum PipelineError {
    /// Store unreachable after the retry budget was exhausted
    Connectivity { attempts: u32, message: String },
    /// Table/index creation failed
    Schema(rusqlite::Error),
    /// A row insert failed; the whole batch was rolled back
    Ingestion(rusqlite::Error),
    /// A rollup recompute failed; both derived tables were rolled back
    Aggregation(rusqlite::Error),
    /// A quality-check query failed (distinct from quality findings)
    Quality(rusqlite::Error),
}

impl std::fmt::Display for PipelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineError::Connectivity { attempts, message } => {
                write!(f, "store unreachable after {} attempts: {}", attempts, message)
            }
            PipelineError::Schema(e) => write!(f, "schema setup failed: {}", e),
            PipelineError::Ingestion(e) => write!(f, "event ingestion failed: {}", e),
            PipelineError::Aggregation(e) => write!(f, "aggregate recompute failed: {}", e),
            PipelineError::Quality(e) => write!(f, "quality check query failed: {}", e),
        }
    }
}

impl std::error::Error for PipelineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PipelineError::Connectivity { .. } => None,
            PipelineError::Schema(e)
            | PipelineError::Ingestion(e)
            | PipelineError::Aggregation(e)
            | PipelineError::Quality(e) => Some(e),
        }
    }
}
