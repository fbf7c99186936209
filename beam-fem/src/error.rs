//! Error types for the beam solver

use thiserror::Error;

/// Main error type for beam analysis
#[derive(Error, Debug)]
pub enum BeamError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Beam is unstable: {0}")]
    Unstable(String),

    #[error("Stiffness matrix is singular at row {row} - beam is unstable or under-constrained")]
    SingularMatrix { row: usize },

    #[error("Matrix dimension mismatch in {op}: {left:?} vs {right:?}")]
    DimensionMismatch {
        op: &'static str,
        left: (usize, usize),
        right: (usize, usize),
    },

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl BeamError {
    /// True for failures caused by the structure itself rather than its input
    pub fn is_instability(&self) -> bool {
        matches!(self, Self::Unstable(_) | Self::SingularMatrix { .. })
    }
}

/// Result type for beam operations
pub type BeamResult<T> = Result<T, BeamError>;
