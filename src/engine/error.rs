use thiserror::Error;

/// Commands the engine rejects outright instead of clamping.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Unknown reading mode: {0} (expected scan, normal, study or proofread)")]
    UnknownMode(String),
}
