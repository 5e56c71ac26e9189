use thiserror::Error;

/// Startup configuration errors. Always fatal.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required setting '{name}'")]
    Missing { name: &'static str },
    #[error("setting '{name}' must not be empty")]
    Empty { name: &'static str },
    #[error("invalid environment '{value}', expected one of sandbox, production")]
    InvalidEnvironment { value: String },
    #[error("setting '{name}' has invalid value '{value}'")]
    InvalidNumber { name: &'static str, value: String },
    #[error("invalid base url '{value}': {reason}")]
    InvalidBaseUrl { value: String, reason: String },
}

impl ConfigError {
    pub const fn code(&self) -> &'static str {
        "config.invalid"
    }
}

/// Classified outcome of a failed marketplace call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MarketplaceError {
    #[error(transparent)]
    Configuration(#[from] ConfigError),

    #[error("marketplace rejected credentials (status {status})")]
    Auth { status: u16 },

    #[error("marketplace rejected request (status {status}): {detail}")]
    Validation { status: u16, detail: String },

    #[error("marketplace resource not found: {path}")]
    NotFound { path: String },

    #[error("marketplace unavailable after {attempts} attempt(s): {cause}")]
    Transient { attempts: u32, cause: String },

    #[error("unexpected marketplace response: {0}")]
    Decode(String),
}

impl MarketplaceError {
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "config.invalid",
            Self::Auth { .. } => "marketplace.auth",
            Self::Validation { .. } => "marketplace.validation",
            Self::NotFound { .. } => "marketplace.not_found",
            Self::Transient { .. } => "marketplace.transient",
            Self::Decode(_) => "marketplace.decode",
        }
    }

    /// Whether a caller may reasonably try the same call again later.
    pub const fn retryable(&self) -> bool {
        matches!(self, Self::Transient { .. })
    }

    pub const fn is_auth(&self) -> bool {
        matches!(self, Self::Auth { .. })
    }
}

/// Reference dataset loading errors.
#[derive(Debug, Error)]
pub enum ReferenceError {
    #[error("failed to read reference dataset '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed reference dataset '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
