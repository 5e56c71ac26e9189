//! Behavior tests for request signing, retries and error classification.

use serde_json::json;
use ticketscout_core::{
    CanonicalRequest, HttpError, HttpMethod, HttpResponse, MarketplaceError, RequestSigner,
};
use ticketscout_tests::{client, FakeMarketplace};

// =============================================================================
// Signing
// =============================================================================

#[test]
fn when_params_arrive_in_any_order_signature_is_identical() {
    let signer = RequestSigner::new("secret-xyz").expect("valid secret");
    let forward = CanonicalRequest::new(
        HttpMethod::Get,
        "api.sandbox.ticketevolution.com",
        "/v9/events",
        [("venue_id", "896"), ("per_page", "100"), ("occurs_at.gte", "2025-06-05T00:00:00Z")],
    );
    let reversed = CanonicalRequest::new(
        HttpMethod::Get,
        "api.sandbox.ticketevolution.com",
        "/v9/events",
        [("occurs_at.gte", "2025-06-05T00:00:00Z"), ("per_page", "100"), ("venue_id", "896")],
    );

    assert_eq!(signer.sign(&forward), signer.sign(&reversed));
    assert_eq!(
        forward.canonical_string(),
        "GET api.sandbox.ticketevolution.com/v9/events?occurs_at.gte=2025-06-05T00%3A00%3A00Z&per_page=100&venue_id=896"
    );
}

#[tokio::test]
async fn when_request_is_sent_the_wire_query_matches_what_was_signed() {
    let marketplace = FakeMarketplace::new();
    marketplace.route("/events/search", &[], json!({ "events": [] }));
    let client = client(&marketplace);

    client
        .get("/events/search", [("q", "red sox"), ("per_page", "10")])
        .await
        .expect("call should succeed");

    let calls = marketplace.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].params.get("q").map(String::as_str), Some("red sox"));

    let signer = RequestSigner::new("secret-xyz").expect("valid secret");
    let expected = signer.sign(&CanonicalRequest::new(
        HttpMethod::Get,
        "api.sandbox.ticketevolution.com",
        "/v9/events/search",
        [("q", "red sox"), ("per_page", "10")],
    ));
    assert_eq!(calls[0].signature.as_deref(), Some(expected.as_str()));
}

// =============================================================================
// Retries
// =============================================================================

#[tokio::test]
async fn when_server_recovers_retry_reuses_the_same_signature() {
    let marketplace = FakeMarketplace::new();
    marketplace.script(
        "/events",
        &[],
        vec![
            Ok(HttpResponse::new(503, "unavailable")),
            Err(HttpError::timeout("read timed out")),
            Ok(HttpResponse::ok_json(r#"{"events":[]}"#)),
        ],
    );
    let client = client(&marketplace);

    client
        .get("/events", [("venue_id", "896")])
        .await
        .expect("third attempt succeeds");

    let calls = marketplace.calls();
    assert_eq!(calls.len(), 3);
    assert!(calls.windows(2).all(|pair| pair[0].signature == pair[1].signature));
    assert_eq!(client.api_calls(), 1, "retries count as one logical call");
}

#[tokio::test]
async fn when_rate_limited_past_the_budget_error_is_transient() {
    let marketplace = FakeMarketplace::new();
    marketplace.script("/events", &[], vec![Ok(HttpResponse::new(429, "slow down"))]);
    let client = client(&marketplace);

    let error = client
        .get("/events", [("venue_id", "896")])
        .await
        .expect_err("every attempt is throttled");

    assert!(matches!(error, MarketplaceError::Transient { attempts: 3, .. }));
    assert!(error.retryable());
    assert_eq!(marketplace.calls().len(), 3);
}

// =============================================================================
// Classification
// =============================================================================

#[tokio::test]
async fn when_credentials_are_rejected_request_is_not_retried() {
    let marketplace = FakeMarketplace::new();
    marketplace.script("/events", &[], vec![Ok(HttpResponse::new(401, "{}"))]);
    let client = client(&marketplace);

    let error = client
        .get("/events", [("venue_id", "896")])
        .await
        .expect_err("401 is fatal");

    assert_eq!(error, MarketplaceError::Auth { status: 401 });
    assert_eq!(error.code(), "marketplace.auth");
    assert_eq!(marketplace.calls().len(), 1);
}

#[tokio::test]
async fn when_marketplace_rejects_parameters_its_detail_is_surfaced() {
    let marketplace = FakeMarketplace::new();
    marketplace.script(
        "/events",
        &[],
        vec![Ok(HttpResponse::new(
            422,
            r#"{"error":"within requires lat and lon"}"#,
        ))],
    );
    let client = client(&marketplace);

    let error = client
        .get("/events", [("within", "25")])
        .await
        .expect_err("422 is a validation error");

    match error {
        MarketplaceError::Validation { status, detail } => {
            assert_eq!(status, 422);
            assert_eq!(detail, "within requires lat and lon");
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    assert_eq!(marketplace.calls().len(), 1);
}

#[tokio::test]
async fn when_resource_is_missing_error_is_not_found() {
    let marketplace = FakeMarketplace::new();
    marketplace.script("/events/42", &[], vec![Ok(HttpResponse::new(404, ""))]);
    let client = client(&marketplace);

    let error = client
        .get("/events/42", Vec::<(String, String)>::new())
        .await
        .expect_err("404");

    assert_eq!(error.code(), "marketplace.not_found");
    assert!(!error.retryable());
}
