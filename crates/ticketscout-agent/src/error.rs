use thiserror::Error;
use ticketscout_core::MarketplaceError;

/// Failure of one tool invocation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ToolError {
    #[error("invalid parameters for {operation}: {message}")]
    InvalidParams { operation: String, message: String },

    #[error("unknown operation: {0}")]
    UnknownOperation(String),

    #[error(transparent)]
    Marketplace(#[from] MarketplaceError),
}

impl ToolError {
    pub(crate) fn invalid(operation: &str, message: impl Into<String>) -> Self {
        Self::InvalidParams {
            operation: operation.to_owned(),
            message: message.into(),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidParams { .. } => "tool.invalid_params",
            Self::UnknownOperation(_) => "tool.unknown_operation",
            Self::Marketplace(error) => error.code(),
        }
    }

    pub fn retryable(&self) -> bool {
        match self {
            Self::Marketplace(error) => error.retryable(),
            Self::InvalidParams { .. } | Self::UnknownOperation(_) => false,
        }
    }
}
