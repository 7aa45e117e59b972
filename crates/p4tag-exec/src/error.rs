use p4tag_core::HostError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("invalid label command: {0}")]
    InvalidSpec(String),

    #[error("bad argument template: {0}")]
    Template(String),

    #[error("failed to start '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to wait for '{command}': {source}")]
    Wait {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{command}' exited with {status}")]
    NonZeroExit { command: String, status: String },
}

impl From<ExecError> for HostError {
    fn from(e: ExecError) -> Self {
        HostError::Failed(e.to_string())
    }
}
