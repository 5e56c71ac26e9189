//! End-to-end finder scenarios against the scripted marketplace.

use std::sync::Arc;

use serde_json::json;
use ticketscout_core::{
    FindRequest, FindStatus, HttpResponse, MarketplaceError, RecordPatch, ReferenceData,
    ReferenceDataBuilder, StrategyKind, Timestamp,
};
use ticketscout_tests::{
    catalog, days_from_now, event_json, events_page, finder, listings_page, sports_category,
    ticket_group, FakeMarketplace,
};

fn yankees_reference(performer_id: Option<u64>) -> Arc<ReferenceData> {
    let mut builder = ReferenceDataBuilder::with_builtin();
    builder.merge(vec![RecordPatch {
        key: String::from("new_york_yankees"),
        venue_id: Some(896),
        performer_id,
        ..RecordPatch::default()
    }]);
    builder.build()
}

fn june_6() -> time::Date {
    Timestamp::parse("2025-06-06").expect("valid date").date()
}

fn yankee_stadium_week(marketplace: &FakeMarketplace) {
    marketplace.route(
        "/events",
        &[("venue_id", "896")],
        events_page(vec![
            event_json(
                101,
                "Boston Red Sox at New York Yankees",
                "2025-06-06T23:05:00Z",
                (896, "Yankee Stadium"),
                sports_category("MLB", "Baseball"),
            ),
            event_json(
                102,
                "Summer Concert Series",
                "2025-06-07T00:00:00Z",
                (896, "Yankee Stadium"),
                json!({ "id": 5, "name": "Concerts" }),
            ),
            event_json(
                103,
                "Tampa Bay Rays at New York Yankees",
                "2025-06-20T23:05:00Z",
                (896, "Yankee Stadium"),
                sports_category("MLB", "Baseball"),
            ),
        ]),
    );
}

#[tokio::test]
async fn when_team_has_a_known_venue_home_game_and_tickets_are_found() {
    let marketplace = FakeMarketplace::new();
    yankee_stadium_week(&marketplace);
    marketplace.route(
        "/listings",
        &[("event_id", "101")],
        listings_page(vec![
            ticket_group(1, "101", 4, 120.0),
            ticket_group(2, "205", 2, 80.0),
            ticket_group(3, "Lot C Parking", 10, 25.0),
            ticket_group(4, "110", 2, 600.0),
        ]),
    );
    let catalog = catalog(&marketplace);
    let finder = finder(&catalog, yankees_reference(None));

    let request = FindRequest::new("Yankees")
        .on(june_6())
        .with_budget(500.0)
        .with_quantity(2);
    let report = finder.find(&request).await.expect("find succeeds");

    assert_eq!(report.status, FindStatus::Found);
    assert_eq!(report.matched.len(), 1);
    assert_eq!(report.matched[0].key, "new_york_yankees");
    assert_eq!(report.events.len(), 1);

    let found = &report.events[0];
    assert_eq!(found.event.id, 101);
    assert_eq!(found.strategy, StrategyKind::DirectId);

    let direct = &report.strategies[0];
    assert_eq!(direct.strategy, StrategyKind::DirectId);
    assert_eq!(direct.events_discovered, 3);
    assert_eq!(direct.discarded_by_classifier, 1);
    assert_eq!(direct.discarded_as_unrelated, 1);
    assert_eq!(direct.events_retained, 1);
    assert_eq!(direct.api_calls, 1);

    let tickets = found.tickets.as_ref().expect("tickets requested");
    let sections = tickets
        .options
        .iter()
        .map(|option| option.section.as_str())
        .collect::<Vec<_>>();
    assert_eq!(sections, vec!["205", "101"]);
    assert_eq!(tickets.lowest_price, Some(80.0));
    assert_eq!(tickets.options[0].total_cost, 160.0);
    assert!(tickets.error.is_none());

    let direct_call = &marketplace.calls_to("/events")[0];
    assert_eq!(
        direct_call.params.get("occurs_at.gte").map(String::as_str),
        Some("2025-06-05T00:00:00Z")
    );
    assert_eq!(
        direct_call.params.get("occurs_at.lt").map(String::as_str),
        Some("2025-06-08T00:00:00Z")
    );
}

#[tokio::test]
async fn when_only_home_games_turn_up_away_games_are_added_by_broadening() {
    let marketplace = FakeMarketplace::new();
    yankee_stadium_week(&marketplace);
    marketplace.route(
        "/events",
        &[("performer_id", "15")],
        events_page(vec![event_json(
            201,
            "New York Yankees at Boston Red Sox",
            "2025-06-09T23:10:00Z",
            (10, "Fenway Park"),
            sports_category("MLB", "Baseball"),
        )]),
    );
    let catalog = catalog(&marketplace);
    let finder = finder(&catalog, yankees_reference(Some(15)));

    let request = FindRequest {
        include_tickets: false,
        ..FindRequest::new("Yankees").on(june_6())
    };
    let report = finder.find(&request).await.expect("find succeeds");

    let strategies = report
        .strategies
        .iter()
        .map(|report| report.strategy)
        .collect::<Vec<_>>();
    assert_eq!(strategies, vec![StrategyKind::DirectId, StrategyKind::Broadened]);

    let events = report
        .events
        .iter()
        .map(|found| (found.event.id, found.strategy))
        .collect::<Vec<_>>();
    assert_eq!(
        events,
        vec![(101, StrategyKind::DirectId), (201, StrategyKind::Broadened)]
    );
    assert!(report.events.iter().all(|found| found.tickets.is_none()));
}

#[tokio::test]
async fn when_city_alone_is_named_caller_must_choose_a_team() {
    let marketplace = FakeMarketplace::new();
    let catalog = catalog(&marketplace);
    let finder = finder(&catalog, ReferenceData::builtin());

    let report = finder
        .find(&FindRequest::new("Chicago"))
        .await
        .expect("disambiguation is a result");

    assert_eq!(report.status, FindStatus::NeedsDisambiguation);
    let mut keys = report
        .candidates
        .iter()
        .map(|candidate| candidate.key.as_str())
        .collect::<Vec<_>>();
    keys.sort_unstable();
    assert_eq!(
        keys,
        vec![
            "chicago_bears",
            "chicago_blackhawks",
            "chicago_bulls",
            "chicago_cubs",
            "chicago_white_sox",
        ]
    );
    assert!(report.events.is_empty());
    assert!(marketplace.calls().is_empty(), "no marketplace traffic");
}

fn metlife_events(marketplace: &FakeMarketplace, game_day: &str) {
    marketplace.route(
        "/events",
        &[("lat", "40.8135"), ("lon", "-74.0745")],
        events_page(vec![
            event_json(
                301,
                "New England Patriots at New York Giants",
                game_day,
                (1, "MetLife Stadium"),
                sports_category("NFL", "Football"),
            ),
            event_json(
                302,
                "Buffalo Bills at New York Jets",
                game_day,
                (1, "MetLife Stadium"),
                sports_category("NFL", "Football"),
            ),
            event_json(
                303,
                "San Francisco Giants at New York Mets",
                game_day,
                (2, "Citi Field"),
                sports_category("MLB", "Baseball"),
            ),
        ]),
    );
}

#[tokio::test]
async fn when_matchup_is_named_only_that_game_is_returned_within_budget() {
    let marketplace = FakeMarketplace::new();
    let game_day = days_from_now(10);
    metlife_events(&marketplace, &game_day);
    marketplace.route(
        "/listings",
        &[("event_id", "301")],
        listings_page(vec![
            ticket_group(1, "113", 2, 450.0),
            ticket_group(2, "Mezzanine 214", 4, 520.0),
            ticket_group(3, "Lot E Parking", 20, 40.0),
            ticket_group(4, "301", 1, 210.0),
        ]),
    );
    let catalog = catalog(&marketplace);
    let finder = finder(&catalog, ReferenceData::builtin());

    let request = FindRequest::new("Giants Patriots")
        .with_budget(500.0)
        .with_quantity(1);
    let report = finder.find(&request).await.expect("find succeeds");

    assert_eq!(report.status, FindStatus::Found);
    let matched = report
        .matched
        .iter()
        .map(|candidate| candidate.key.as_str())
        .collect::<Vec<_>>();
    assert_eq!(matched, vec!["new_york_giants", "new_england_patriots"]);

    assert_eq!(report.events.len(), 1);
    let found = &report.events[0];
    assert_eq!(found.event.id, 301);
    assert_eq!(found.strategy, StrategyKind::Geographic);
    assert_eq!(
        found.event.venue.as_ref().map(|venue| venue.name.as_str()),
        Some("MetLife Stadium")
    );

    let tickets = found.tickets.as_ref().expect("tickets requested");
    assert!(!tickets.options.is_empty());
    assert!(tickets
        .options
        .iter()
        .all(|option| option.price_per_ticket <= 500.0));
    assert_eq!(tickets.lowest_price, Some(210.0));

    let geographic = &marketplace.calls_to("/events")[0];
    assert_eq!(geographic.params.get("within").map(String::as_str), Some("25"));
}

#[tokio::test]
async fn when_matched_teams_share_a_nickname_word_the_matchup_is_searched() {
    let marketplace = FakeMarketplace::new();
    let game_day = days_from_now(4);
    marketplace.route(
        "/events",
        &[("lat", "41.8299"), ("lon", "-87.6338")],
        events_page(vec![
            event_json(
                401,
                "Boston Red Sox at Chicago White Sox",
                &game_day,
                (3, "Rate Field"),
                sports_category("MLB", "Baseball"),
            ),
            event_json(
                402,
                "Detroit Tigers at Chicago White Sox",
                &game_day,
                (3, "Rate Field"),
                sports_category("MLB", "Baseball"),
            ),
        ]),
    );
    let catalog = catalog(&marketplace);
    let finder = finder(&catalog, ReferenceData::builtin());

    let request = FindRequest {
        include_tickets: false,
        ..FindRequest::new("White Sox at Red Sox")
    };
    let report = finder.find(&request).await.expect("find succeeds");

    assert_eq!(report.status, FindStatus::Found);
    assert!(report.candidates.is_empty());
    let matched = report
        .matched
        .iter()
        .map(|candidate| candidate.key.as_str())
        .collect::<Vec<_>>();
    assert_eq!(matched, vec!["chicago_white_sox", "boston_red_sox"]);

    assert_eq!(report.events.len(), 1);
    assert_eq!(report.events[0].event.id, 401);
    assert_eq!(report.events[0].strategy, StrategyKind::Geographic);
    assert_eq!(report.strategies[0].discarded_as_unrelated, 1);
    assert!(!marketplace.calls().is_empty());
}

#[tokio::test]
async fn when_a_strategy_fails_the_next_one_still_runs() {
    let marketplace = FakeMarketplace::new();
    let game_day = days_from_now(3);
    marketplace.script("/events", &[], vec![Ok(HttpResponse::new(503, "maintenance"))]);
    marketplace.route(
        "/events/search",
        &[("q", "Giants Patriots")],
        events_page(vec![event_json(
            301,
            "New England Patriots at New York Giants",
            &game_day,
            (1, "MetLife Stadium"),
            sports_category("NFL", "Football"),
        )]),
    );
    let catalog = catalog(&marketplace);
    let finder = finder(&catalog, ReferenceData::builtin());

    let request = FindRequest {
        include_tickets: false,
        ..FindRequest::new("Giants Patriots")
    };
    let report = finder.find(&request).await.expect("failure is swallowed");

    assert_eq!(report.strategies.len(), 2);
    assert_eq!(report.strategies[0].strategy, StrategyKind::Geographic);
    assert!(report.strategies[0].error.is_some());
    assert_eq!(report.strategies[1].strategy, StrategyKind::Keyword);
    assert_eq!(report.strategies[1].events_retained, 1);
    assert_eq!(report.events[0].strategy, StrategyKind::Keyword);
}

#[tokio::test]
async fn when_credentials_are_rejected_find_fails_immediately() {
    let marketplace = FakeMarketplace::new();
    marketplace.script("/events", &[], vec![Ok(HttpResponse::new(401, "{}"))]);
    let catalog = catalog(&marketplace);
    let finder = finder(&catalog, yankees_reference(None));

    let error = finder
        .find(&FindRequest::new("Yankees").on(june_6()))
        .await
        .expect_err("auth is fatal");

    assert_eq!(error, MarketplaceError::Auth { status: 401 });
    assert_eq!(marketplace.calls().len(), 1, "no later strategy runs");
}

#[tokio::test]
async fn when_nothing_matches_status_is_no_events() {
    let marketplace = FakeMarketplace::new();
    let catalog = catalog(&marketplace);
    let finder = finder(&catalog, ReferenceData::builtin());

    let report = finder
        .find(&FindRequest::new("Zzyzx Invitational"))
        .await
        .expect("empty result is not an error");

    assert_eq!(report.status, FindStatus::NoEvents);
    assert!(report.events.is_empty());
    assert_eq!(report.strategies.len(), 1);
    assert_eq!(report.strategies[0].strategy, StrategyKind::Keyword);
}
