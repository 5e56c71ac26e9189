//! Signed, retrying marketplace client.
//!
//! Composition, innermost first: [`HttpClient`] transport (one attempt) →
//! [`retry_with_backoff`] → signing and response classification here. Caching is
//! not this layer's concern; see [`crate::catalog`].

use std::fmt::{Display, Formatter};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::config::MarketplaceConfig;
use crate::error::{ConfigError, MarketplaceError};
use crate::http_client::{HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse};
use crate::retry::{retry_with_backoff, AttemptError, RetryError, RetryPolicy};
use crate::signer::{CanonicalRequest, RequestSigner};

const ACCEPT: &str = "application/vnd.ticketevolution.api+json; version=9";
const MAX_DETAIL_CHARS: usize = 300;

#[derive(Debug)]
enum AttemptFailure {
    Status(HttpResponse),
    Transport(HttpError),
}

impl Display for AttemptFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Status(response) => write!(f, "status {}", response.status),
            Self::Transport(error) => write!(f, "transport error: {error}"),
        }
    }
}

/// Authenticated GET client for the marketplace API.
pub struct MarketplaceClient {
    config: MarketplaceConfig,
    signer: RequestSigner,
    transport: Arc<dyn HttpClient>,
    calls: AtomicU64,
}

impl MarketplaceClient {
    pub fn new(
        config: MarketplaceConfig,
        transport: Arc<dyn HttpClient>,
    ) -> Result<Self, ConfigError> {
        let signer = RequestSigner::new(config.secret())?;
        Ok(Self {
            config,
            signer,
            transport,
            calls: AtomicU64::new(0),
        })
    }

    pub fn config(&self) -> &MarketplaceConfig {
        &self.config
    }

    /// Logical calls issued so far. Retries of one call count once.
    pub fn api_calls(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }

    /// Issues a signed GET for `path` (relative to the configured base URL).
    ///
    /// # Errors
    ///
    /// - [`MarketplaceError::Auth`] on 401/403
    /// - [`MarketplaceError::Validation`] on 400/422, and on any other 4xx not listed
    ///   here (405, 409, 410, ...) or non-retryable status, carrying the body's detail
    /// - [`MarketplaceError::NotFound`] on 404
    /// - [`MarketplaceError::Transient`] once 429/5xx/timeouts exhaust the retry budget
    /// - [`MarketplaceError::Decode`] when a 2xx body is not JSON
    pub async fn get<I, K, V>(&self, path: &str, params: I) -> Result<Value, MarketplaceError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let canonical = CanonicalRequest::new(
            HttpMethod::Get,
            self.config.host(),
            format!("{}{}", self.config.path_prefix(), path),
            params,
        );
        // Signed once; every retry of this logical request reuses it.
        let signature = self.signer.sign(&canonical);
        let url = self.url_for(&canonical);

        self.calls.fetch_add(1, Ordering::Relaxed);
        debug!(path = %canonical.path, params = canonical.params.len(), "marketplace request");

        let transport = &self.transport;
        let token = self.config.token();
        let timeout_ms = self.config.timeout_ms();

        let outcome = retry_with_backoff(self.config.retry(), |attempt| {
            let request = HttpRequest::get(url.clone())
                .with_header("Accept", ACCEPT)
                .with_header("X-Token", token)
                .with_header("X-Signature", signature.clone())
                .with_timeout_ms(timeout_ms);

            async move {
                debug!(attempt = attempt + 1, "sending marketplace request");
                match transport.execute(request).await {
                    Ok(response) if response.is_success() => Ok(response),
                    Ok(response) if RetryPolicy::should_retry_status(response.status) => {
                        Err(AttemptError::Retryable(AttemptFailure::Status(response)))
                    }
                    Ok(response) => Err(AttemptError::Fatal(AttemptFailure::Status(response))),
                    Err(error) if error.retryable() => {
                        Err(AttemptError::Retryable(AttemptFailure::Transport(error)))
                    }
                    Err(error) => Err(AttemptError::Fatal(AttemptFailure::Transport(error))),
                }
            }
        })
        .await;

        match outcome {
            Ok(response) => serde_json::from_str(&response.body).map_err(|error| {
                MarketplaceError::Decode(format!("{} returned invalid JSON: {error}", canonical.path))
            }),
            Err(RetryError::Fatal { attempts, error }) => {
                let error = classify_failure(&canonical.path, attempts, error);
                warn!(path = %canonical.path, code = error.code(), %error, "marketplace request failed");
                Err(error)
            }
            Err(RetryError::Exhausted { attempts, last }) => {
                warn!(path = %canonical.path, attempts, cause = %last, "marketplace retries exhausted");
                Err(MarketplaceError::Transient {
                    attempts,
                    cause: last.to_string(),
                })
            }
        }
    }

    fn url_for(&self, canonical: &CanonicalRequest) -> String {
        let query = canonical.query_string();
        let mut url = format!(
            "{}://{}{}",
            self.config.base_url().scheme(),
            canonical.host,
            canonical.path
        );
        if !query.is_empty() {
            url.push('?');
            url.push_str(&query);
        }
        url
    }
}

fn classify_failure(path: &str, attempts: u32, failure: AttemptFailure) -> MarketplaceError {
    match failure {
        AttemptFailure::Transport(error) => MarketplaceError::Transient {
            attempts,
            cause: error.to_string(),
        },
        AttemptFailure::Status(response) => match response.status {
            401 | 403 => MarketplaceError::Auth {
                status: response.status,
            },
            404 => MarketplaceError::NotFound {
                path: path.to_owned(),
            },
            status => MarketplaceError::Validation {
                status,
                detail: error_detail(&response.body),
            },
        },
    }
}

/// Pulls the marketplace's own explanation out of an error body.
fn error_detail(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        for key in ["error", "message", "errors"] {
            match value.get(key) {
                Some(Value::String(message)) => return truncate(message),
                Some(Value::Array(items)) if !items.is_empty() => {
                    let joined = items
                        .iter()
                        .map(|item| match item {
                            Value::String(message) => message.clone(),
                            other => other.to_string(),
                        })
                        .collect::<Vec<_>>()
                        .join("; ");
                    return truncate(&joined);
                }
                Some(Value::Object(map)) if !map.is_empty() => {
                    return truncate(&Value::Object(map.clone()).to_string());
                }
                _ => {}
            }
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        String::from("no detail provided")
    } else {
        truncate(trimmed)
    }
}

fn truncate(value: &str) -> String {
    if value.chars().count() <= MAX_DETAIL_CHARS {
        return value.to_owned();
    }
    let mut shortened = value.chars().take(MAX_DETAIL_CHARS).collect::<String>();
    shortened.push('…');
    shortened
}
