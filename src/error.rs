use thiserror::Error;

#[derive(Error, Debug)]
pub enum SweepError {
    #[error("Malformed specification: {0}")]
    MalformedSpecification(String),

    #[error("Unsupported stage type: {0}")]
    UnsupportedStageType(String),

    #[error("Failed to parse specification: {0}")]
    SpecParse(#[from] serde_json::Error),

    #[error("Command execution failed: {0}")]
    ExecutionError(String),

    #[error("User cancelled")]
    UserCancelled,

    #[error("{0} encodes need confirmation but no terminal is available; pass --yes to run without asking")]
    ConfirmationRequired(usize),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Batch execution partially failed: {success}/{total} succeeded")]
    BatchPartialFailure { success: usize, total: usize },
}

impl SweepError {
    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        SweepError::MalformedSpecification(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, SweepError>;
