use crate::result::{AiError, AiResult};

/// A self-contained inference unit.
///
/// Jobs consume caller-provided snapshots via their `Input` type. This crate
/// stays storage-agnostic.
pub trait AiJob: Send + Sync + 'static {
    type Input: Send + Sync + 'static;

    /// Stable job kind used in logs and result metadata.
    fn kind(&self) -> &'static str;

    /// The input snapshot the job will run inference on.
    fn input(&self) -> &Self::Input;

    /// Execute inference and return an insight.
    ///
    /// Must not mutate domain state.
    fn run(&self) -> Result<AiResult, AiError>;
}
