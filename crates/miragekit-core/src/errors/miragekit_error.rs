use super::{ConfigError, IntegrityError, LoadError};

/// Top-level error aggregating every subsystem error via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum MiragekitError {
    #[error("load error: {0}")]
    Load(#[from] LoadError),

    #[error("integrity error: {0}")]
    Integrity(#[from] IntegrityError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl MiragekitError {
    /// Whether this error ends the session (load failures and integrity violations do).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Load(_) | Self::Integrity(_))
    }
}

pub type MiragekitResult<T> = Result<T, MiragekitError>;
