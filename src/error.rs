use thiserror::Error;

// =============================================================================
// Error taxonomy for counter runs
// =============================================================================

#[derive(Error, Debug)]
pub enum CounterError {
    #[error("invalid argument {name}={value}: {reason}")]
    InvalidArgument {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("failed to encode run report: {0}")]
    Encode(#[from] serde_json::Error),
}

impl CounterError {
    pub fn invalid_argument(
        name: &'static str,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidArgument {
            name,
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }
}

pub type Result<T> = std::result::Result<T, CounterError>;
