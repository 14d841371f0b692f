use thiserror::Error;

/// Error type for invalid conductance-model inputs or data.
#[derive(Error, Debug)]
pub enum ConductanceError {
    #[error("Kp must be an integer between 0 and 6 inclusive, got {0}")]
    InvalidKp(i32),
    #[error("Unrecognised conductance channel {0:?}. Expected one of: h, hall, p, pedersen, hp, hallandpedersen")]
    InvalidChannel(String),
    #[error("Input shapes {0:?} and {1:?} cannot be broadcast to a common shape")]
    ShapeMismatch(Vec<usize>, Vec<usize>),
    #[error("Malformed coefficient table: {0}")]
    TableParse(String),
}

/// Convenience type for `Result<T, ConductanceError>`.
pub type ConductanceResult<T> = Result<T, ConductanceError>;
