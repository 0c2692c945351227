use proof_gen_core::{
    ChainError,
    ErrorKind,
};

/// Outcome of a failed proof request as seen by the HTTP layer.
#[derive(Debug, thiserror::Error)]
pub enum ProofError {
    /// Definitive negative answer, the message is safe to return to callers.
    #[error("{message}")]
    Info { kind: ErrorKind, message: String },
    /// Every attempt failed transiently. `last` is kept for logging only.
    #[error("all {attempts} attempts failed, last error: {last}")]
    Fatal { attempts: usize, last: ChainError },
    #[error("Invalid merkle proof created")]
    InvalidProof,
}

impl ProofError {
    pub fn info(kind: ErrorKind, error: &ChainError) -> Self {
        Self::Info {
            kind,
            message: error.to_string(),
        }
    }

    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Info { kind, .. } => Some(*kind),
            Self::Fatal { .. } | Self::InvalidProof => None,
        }
    }
}
