use rayon::prelude::*;
use tracing::{info, warn};

use crate::job::AiJob;
use crate::result::{AiError, AiResult};

/// Scheduler/executor for AI jobs.
///
/// This is intentionally minimal and storage/runtime agnostic.
pub trait AiScheduler: Send + Sync + 'static {
    /// Name used in logs.
    fn name(&self) -> &str;

    fn run<J: AiJob>(&self, job: J) -> Result<AiResult, AiError> {
        let outcome = job.run();
        match &outcome {
            Ok(result) => info!(
                scheduler = self.name(),
                kind = job.kind(),
                score = result.score,
                confidence = result.confidence,
                "ai job completed"
            ),
            Err(err) => warn!(scheduler = self.name(), kind = job.kind(), error = %err, "ai job failed"),
        }
        outcome
    }
}

/// Runs jobs immediately in-process.
///
/// Jobs share nothing, so batches fan out over the rayon pool with no
/// coordination.
#[derive(Debug, Clone)]
pub struct LocalAiScheduler {
    name: String,
}

impl LocalAiScheduler {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Run independent jobs in parallel. Results keep the input order.
    pub fn run_batch<J: AiJob>(&self, jobs: Vec<J>) -> Vec<Result<AiResult, AiError>> {
        jobs.into_par_iter().map(|job| self.run(job)).collect()
    }
}

impl Default for LocalAiScheduler {
    fn default() -> Self {
        Self::new("local")
    }
}

impl AiScheduler for LocalAiScheduler {
    fn name(&self) -> &str {
        &self.name
    }
}
