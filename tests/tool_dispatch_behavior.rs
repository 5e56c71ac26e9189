//! Tool dispatch: every call answers with an envelope, never a panic.

use serde_json::json;
use ticketscout_core::HttpResponse;
use ticketscout_tests::{
    days_from_now, event_json, events_page, listings_page, registry, sports_category,
    ticket_group, FakeMarketplace,
};

#[tokio::test]
async fn when_operation_is_unknown_envelope_reports_it() {
    let marketplace = FakeMarketplace::new();
    let registry = registry(&marketplace);

    let envelope = registry.dispatch("purchase_tickets", json!({})).await;

    assert!(!envelope.ok);
    assert_eq!(envelope.error_code(), Some("tool.unknown_operation"));
    assert!(marketplace.calls().is_empty());
}

#[tokio::test]
async fn when_params_are_out_of_bounds_nothing_is_sent() {
    let marketplace = FakeMarketplace::new();
    let registry = registry(&marketplace);

    let envelope = registry
        .dispatch("filter_listings", json!({ "event_id": 7, "return_top": 50 }))
        .await;

    assert!(!envelope.ok);
    assert_eq!(envelope.error_code(), Some("tool.invalid_params"));
    let message = envelope.error.as_ref().map(|error| error.message.as_str()).unwrap_or_default();
    assert!(message.contains("return_top"));
    assert!(marketplace.calls().is_empty());
}

#[tokio::test]
async fn when_listings_are_filtered_envelope_carries_options_and_report() {
    let marketplace = FakeMarketplace::new();
    marketplace.route(
        "/listings",
        &[("event_id", "7")],
        listings_page(vec![
            ticket_group(1, "101", 4, 120.0),
            ticket_group(2, "205", 2, 80.0),
            ticket_group(3, "310", 6, 45.0),
        ]),
    );
    let registry = registry(&marketplace);

    let envelope = registry
        .dispatch(
            "filter_listings",
            json!({ "event_id": 7, "quantity": 2, "price_max": 100, "return_top": 1 }),
        )
        .await;

    assert!(envelope.ok);
    let data = envelope.data.expect("data present");
    assert_eq!(data["options"].as_array().map(Vec::len), Some(1));
    assert_eq!(data["options"][0]["section"], json!("310"));
    assert_eq!(data["lowest_price"], json!(45.0));
    assert_eq!(data["criteria_applied"]["eligible_listings"], json!(2));
    assert_eq!(data["criteria_applied"]["returned"], json!(1));
}

#[tokio::test]
async fn when_one_listing_row_is_unusable_the_rest_are_still_ranked() {
    let marketplace = FakeMarketplace::new();
    marketplace.route(
        "/listings",
        &[("event_id", "8")],
        json!({
            "ticket_groups": [
                ticket_group(1, "101", 4, 120.0),
                { "id": 2, "section": "102", "quantity": 4, "retail_price": null },
                ticket_group(3, "205", 2, 80.0),
            ]
        }),
    );
    let registry = registry(&marketplace);

    let envelope = registry
        .dispatch("filter_listings", json!({ "event_id": 8, "quantity": 2 }))
        .await;

    assert!(envelope.ok, "unexpected error: {:?}", envelope.error);
    let data = envelope.data.expect("data present");
    assert_eq!(data["options"].as_array().map(Vec::len), Some(2));
    assert_eq!(data["options"][0]["section"], json!("205"));
    assert_eq!(data["criteria_applied"]["total_listings"], json!(3));
    assert_eq!(data["criteria_applied"]["unusable_listings"], json!(1));
    assert_eq!(data["criteria_applied"]["eligible_listings"], json!(2));

    let envelope = registry.dispatch("get_listings", json!({ "event_id": 8 })).await;
    let data = envelope.data.expect("data present");
    assert_eq!(data["total"], json!(2));
    assert_eq!(data["skipped"], json!(1));
}

#[tokio::test]
async fn when_marketplace_fails_envelope_is_a_structured_error() {
    let marketplace = FakeMarketplace::new();
    marketplace.script("/events/5", &[], vec![Ok(HttpResponse::new(502, "bad gateway"))]);
    let registry = registry(&marketplace);

    let envelope = registry.dispatch("get_event", json!({ "event_id": 5 })).await;

    assert!(!envelope.ok);
    let error = envelope.error.expect("error body");
    assert_eq!(error.code, "marketplace.transient");
    assert!(error.retryable);
    assert!(envelope.data.is_none());
}

#[tokio::test]
async fn when_find_events_is_dispatched_report_is_serialized() {
    let marketplace = FakeMarketplace::new();
    marketplace.route(
        "/events",
        &[("lat", "40.8135")],
        events_page(vec![event_json(
            301,
            "New England Patriots at New York Giants",
            &days_from_now(5),
            (1, "MetLife Stadium"),
            sports_category("NFL", "Football"),
        )]),
    );
    let registry = registry(&marketplace);

    let envelope = registry
        .dispatch(
            "find_events",
            json!({ "query": "Giants Patriots", "include_tickets": false }),
        )
        .await;

    assert!(envelope.ok, "unexpected error: {:?}", envelope.error);
    let data = envelope.data.expect("data present");
    assert_eq!(data["status"], json!("found"));
    assert_eq!(data["events"][0]["id"], json!(301));
    assert_eq!(data["events"][0]["strategy"], json!("geographic"));
    assert_eq!(data["strategies"][0]["strategy"], json!("geographic"));
}

#[test]
fn when_registry_is_described_every_operation_is_listed() {
    let marketplace = FakeMarketplace::new();
    let registry = registry(&marketplace);

    let names = registry
        .describe()
        .into_iter()
        .map(|descriptor| descriptor.name)
        .collect::<Vec<_>>();
    assert_eq!(
        names,
        vec![
            "search_suggestions",
            "list_events",
            "get_event",
            "get_listings",
            "filter_listings",
            "find_events",
        ]
    );
}
