//! Canonical request construction and HMAC signing.
//!
//! The canonical string is
//!
//! ```text
//! GET api.ticketevolution.com/v9/events?occurs_at.gte=2025-06-01T00%3A00%3A00Z&venue_id=896
//! ```
//!
//! with query keys sorted lexicographically and both keys and values
//! percent-encoded (RFC 3986 unreserved characters are left intact). The `?` is
//! always present, even without parameters. The signature is the base64 encoded
//! HMAC-SHA256 of that string keyed with the API secret.

use std::collections::BTreeMap;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::ConfigError;
use crate::http_client::HttpMethod;

type HmacSha256 = Hmac<Sha256>;

/// Query parameters in canonical (sorted) order.
pub type QueryParams = BTreeMap<String, String>;

/// Method, host, path and sorted parameters of one logical request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalRequest {
    pub method: HttpMethod,
    pub host: String,
    pub path: String,
    pub params: QueryParams,
}

impl CanonicalRequest {
    pub fn new<I, K, V>(method: HttpMethod, host: impl Into<String>, path: impl Into<String>, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            method,
            host: host.into(),
            path: path.into(),
            params: params
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }

    /// Encoded `k=v&k=v` query in sorted key order. Used verbatim on the wire.
    pub fn query_string(&self) -> String {
        self.params
            .iter()
            .map(|(key, value)| {
                format!("{}={}", urlencoding::encode(key), urlencoding::encode(value))
            })
            .collect::<Vec<_>>()
            .join("&")
    }

    pub fn canonical_string(&self) -> String {
        format!(
            "{} {}{}?{}",
            self.method.as_str(),
            self.host,
            self.path,
            self.query_string()
        )
    }
}

/// Signs canonical requests with the shared API secret.
#[derive(Clone)]
pub struct RequestSigner {
    mac: HmacSha256,
}

impl std::fmt::Debug for RequestSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestSigner").finish_non_exhaustive()
    }
}

impl RequestSigner {
    pub fn new(secret: &str) -> Result<Self, ConfigError> {
        if secret.is_empty() {
            return Err(ConfigError::Missing {
                name: "TICKETSCOUT_API_SECRET",
            });
        }

        let mac = HmacSha256::new_from_slice(secret.as_bytes()).map_err(|_| ConfigError::Empty {
            name: "TICKETSCOUT_API_SECRET",
        })?;
        Ok(Self { mac })
    }

    pub fn sign_string(&self, canonical: &str) -> String {
        let mut mac = self.mac.clone();
        mac.update(canonical.as_bytes());
        STANDARD.encode(mac.finalize().into_bytes())
    }

    pub fn sign(&self, request: &CanonicalRequest) -> String {
        self.sign_string(&request.canonical_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn events_request<I>(params: I) -> CanonicalRequest
    where
        I: IntoIterator<Item = (&'static str, &'static str)>,
    {
        CanonicalRequest::new(
            HttpMethod::Get,
            "api.sandbox.ticketevolution.com",
            "/v9/events",
            params,
        )
    }

    #[test]
    fn sorts_keys_and_encodes_values() {
        let request = events_request([
            ("venue_id", "896"),
            ("occurs_at.gte", "2025-06-01T00:00:00Z"),
            ("q", "red sox"),
        ]);

        assert_eq!(
            request.canonical_string(),
            "GET api.sandbox.ticketevolution.com/v9/events?occurs_at.gte=2025-06-01T00%3A00%3A00Z&q=red%20sox&venue_id=896"
        );
    }

    #[test]
    fn keeps_question_mark_without_parameters() {
        let request = events_request([]);
        assert_eq!(
            request.canonical_string(),
            "GET api.sandbox.ticketevolution.com/v9/events?"
        );
    }

    #[test]
    fn insertion_order_does_not_change_signature() {
        let signer = RequestSigner::new("secret").expect("valid secret");
        let forward = events_request([("a", "1"), ("b", "2"), ("c", "x y")]);

        let mut shuffled = HashMap::new();
        shuffled.insert("c", "x y");
        shuffled.insert("a", "1");
        shuffled.insert("b", "2");
        let from_map = events_request(shuffled);
        let reversed = events_request([("c", "x y"), ("b", "2"), ("a", "1")]);

        assert_eq!(forward.canonical_string(), from_map.canonical_string());
        assert_eq!(signer.sign(&forward), signer.sign(&from_map));
        assert_eq!(signer.sign(&forward), signer.sign(&reversed));
    }

    #[test]
    fn signature_matches_reference_hmac() {
        // HMAC-SHA256("key", "The quick brown fox jumps over the lazy dog")
        let signer = RequestSigner::new("key").expect("valid secret");
        assert_eq!(
            signer.sign_string("The quick brown fox jumps over the lazy dog"),
            "97yD9DBThCSxMpjmqm+xQ+9NWaFJRhdZl0edvC0aPNg="
        );
    }

    #[test]
    fn different_secrets_produce_different_signatures() {
        let request = events_request([("venue_id", "1")]);
        let first = RequestSigner::new("one").expect("valid").sign(&request);
        let second = RequestSigner::new("two").expect("valid").sign(&request);
        assert_ne!(first, second);
    }

    #[test]
    fn empty_secret_is_a_configuration_error() {
        let error = RequestSigner::new("").expect_err("empty secret must fail");
        assert!(matches!(error, ConfigError::Missing { .. }));
    }
}
