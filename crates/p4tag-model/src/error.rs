use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown build result: {0}")]
    UnknownResult(String),

    #[error("invalid build number '{value}': {reason}")]
    InvalidBuildNumber { value: String, reason: String },

    #[error("invalid model: {0}")]
    Invalid(String),
}

pub type ModelResult<T> = Result<T, ModelError>;
