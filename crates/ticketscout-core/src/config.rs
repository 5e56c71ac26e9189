//! Process-wide marketplace configuration.
//!
//! Built once at startup and shared read-only with every collaborator.
//!
//! # Environment Variables
//!
//! | Setting | Primary Env Var | Fallback Env Var | Default |
//! |---------|-----------------|------------------|---------|
//! | Token | `TICKETSCOUT_API_TOKEN` | `TEVO_API_TOKEN` | required |
//! | Secret | `TICKETSCOUT_API_SECRET` | `TEVO_API_SECRET` | required |
//! | Environment | `TICKETSCOUT_ENVIRONMENT` | `TEVO_ENVIRONMENT` | `sandbox` |
//! | Base URL | `TICKETSCOUT_BASE_URL` | - | derived from environment |
//! | Timeout | `TICKETSCOUT_TIMEOUT_MS` | - | `10000` |
//! | Retries | `TICKETSCOUT_MAX_RETRIES` | - | `3` |

use std::env;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::retry::RetryPolicy;

const DEFAULT_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_MAX_RETRIES: u32 = 3;

/// Marketplace deployment the process talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    Sandbox,
    Production,
}

impl Environment {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sandbox => "sandbox",
            Self::Production => "production",
        }
    }

    pub const fn default_base_url(self) -> &'static str {
        match self {
            Self::Sandbox => "https://api.sandbox.ticketevolution.com/v9",
            Self::Production => "https://api.ticketevolution.com/v9",
        }
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "sandbox" => Ok(Self::Sandbox),
            "production" => Ok(Self::Production),
            _ => Err(ConfigError::InvalidEnvironment {
                value: value.to_owned(),
            }),
        }
    }
}

/// Validated, immutable marketplace settings.
#[derive(Clone)]
pub struct MarketplaceConfig {
    environment: Environment,
    token: String,
    secret: String,
    base_url: Url,
    timeout_ms: u64,
    retry: RetryPolicy,
}

impl std::fmt::Debug for MarketplaceConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarketplaceConfig")
            .field("environment", &self.environment)
            .field("base_url", &self.base_url.as_str())
            .field("timeout_ms", &self.timeout_ms)
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}

impl MarketplaceConfig {
    /// Builds a configuration for `environment` with its default base URL.
    pub fn new(
        environment: Environment,
        token: impl Into<String>,
        secret: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let token = require_non_empty("TICKETSCOUT_API_TOKEN", token.into())?;
        let secret = require_non_empty("TICKETSCOUT_API_SECRET", secret.into())?;
        let base_url = parse_base_url(environment.default_base_url())?;

        Ok(Self {
            environment,
            token,
            secret,
            base_url,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            retry: RetryPolicy::exponential(DEFAULT_MAX_RETRIES),
        })
    }

    /// Reads and validates settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Reads settings through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |primary: &str, fallback: Option<&str>| {
            lookup(primary).or_else(|| fallback.and_then(|name| lookup(name)))
        };

        let token = read("TICKETSCOUT_API_TOKEN", Some("TEVO_API_TOKEN")).ok_or(
            ConfigError::Missing {
                name: "TICKETSCOUT_API_TOKEN",
            },
        )?;
        let secret = read("TICKETSCOUT_API_SECRET", Some("TEVO_API_SECRET")).ok_or(
            ConfigError::Missing {
                name: "TICKETSCOUT_API_SECRET",
            },
        )?;
        let environment = match read("TICKETSCOUT_ENVIRONMENT", Some("TEVO_ENVIRONMENT")) {
            Some(value) => value.parse()?,
            None => Environment::Sandbox,
        };

        let mut config = Self::new(environment, token, secret)?;

        if let Some(base_url) = read("TICKETSCOUT_BASE_URL", None) {
            config = config.with_base_url(&base_url)?;
        }
        if let Some(timeout) = read("TICKETSCOUT_TIMEOUT_MS", None) {
            config.timeout_ms = parse_number("TICKETSCOUT_TIMEOUT_MS", &timeout)?;
        }
        if let Some(retries) = read("TICKETSCOUT_MAX_RETRIES", None) {
            let max_retries = parse_number("TICKETSCOUT_MAX_RETRIES", &retries)?;
            config.retry = RetryPolicy {
                max_retries,
                ..config.retry
            };
        }

        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, ConfigError> {
        self.base_url = parse_base_url(base_url)?;
        Ok(self)
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub const fn environment(&self) -> Environment {
        self.environment
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Host (and explicit port, if any) used in the canonical request string.
    pub fn host(&self) -> String {
        let host = self.base_url.host_str().unwrap_or_default();
        match self.base_url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_owned(),
        }
    }

    /// Path prefix shared by every endpoint, without a trailing slash.
    pub fn path_prefix(&self) -> &str {
        self.base_url.path().trim_end_matches('/')
    }

    pub const fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    pub fn retry(&self) -> &RetryPolicy {
        &self.retry
    }
}

fn require_non_empty(name: &'static str, value: String) -> Result<String, ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Empty { name });
    }
    Ok(trimmed.to_owned())
}

fn parse_number<T: FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidNumber {
            name,
            value: value.to_owned(),
        })
}

fn parse_base_url(value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value.trim()).map_err(|error| ConfigError::InvalidBaseUrl {
        value: value.to_owned(),
        reason: error.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidBaseUrl {
            value: value.to_owned(),
            reason: String::from("scheme must be http or https"),
        });
    }
    if url.host_str().is_none() {
        return Err(ConfigError::InvalidBaseUrl {
            value: value.to_owned(),
            reason: String::from("missing host"),
        });
    }
    if url.query().is_some() {
        return Err(ConfigError::InvalidBaseUrl {
            value: value.to_owned(),
            reason: String::from("base url must not carry a query string"),
        });
    }

    Ok(url)
}
