use thiserror::Error;

/// Errors that can arise while loading story content, running a session, or
/// persisting snapshots.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Wrapper around IO errors (reading story files, console IO, saves).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapper around serde_json errors (story data, save snapshots).
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Returned when parsing a story document fails with context.
    #[error("invalid story data in {path}: {reason}")]
    InvalidStory { path: String, reason: String },

    /// Returned in strict-effects mode when authored content names an effect
    /// key the engine does not recognize.
    #[error("unknown effect key: {0}")]
    UnknownEffect(String),

    /// Returned when loading a save snapshot with an unexpected schema version.
    #[error("save schema mismatch: expected {expected}, got {found}")]
    SchemaMismatch { expected: u8, found: u8 },
}
