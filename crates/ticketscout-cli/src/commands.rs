use std::sync::Arc;

use serde_json::{json, Map, Value};
use ticketscout_agent::ToolRegistry;
use ticketscout_core::{
    CacheStore, Catalog, ClassifierConfig, EventFinder, FinderConfig, MarketplaceClient,
    MarketplaceConfig, ReferenceData, ReqwestHttpClient, Resolver, ResolverConfig,
    SportsClassifier,
};
use tracing::info;

use crate::cli::{Cli, Command, EventsArgs, FindArgs, ListingsArgs};
use crate::error::CliError;

pub fn build_registry(cli: &Cli) -> Result<ToolRegistry, CliError> {
    let config = MarketplaceConfig::from_env()?;
    info!(environment = %config.environment(), host = %config.host(), "marketplace configured");

    let client = MarketplaceClient::new(config, Arc::new(ReqwestHttpClient::new()))?;
    let catalog = Arc::new(Catalog::new(Arc::new(client), CacheStore::default()));
    let reference = ReferenceData::load(cli.dataset.as_deref())?;
    let finder = EventFinder::new(
        Arc::clone(&catalog),
        Resolver::new(reference, ResolverConfig::default()),
        SportsClassifier::new(ClassifierConfig::default()),
        FinderConfig::default(),
    );
    Ok(ToolRegistry::new(catalog, finder))
}

/// Tool operation name and parameter object for a subcommand.
pub fn to_tool_call(command: &Command) -> (&'static str, Value) {
    match command {
        Command::Suggest(args) => (
            "search_suggestions",
            object([
                ("query", Some(json!(args.query))),
                ("entities", args.entities.as_ref().map(|entities| json!(entities))),
                ("limit", Some(json!(args.limit))),
            ]),
        ),
        Command::Events(args) => ("list_events", events_params(args)),
        Command::Event(args) => ("get_event", json!({ "event_id": args.event_id })),
        Command::Listings(args) if args.raw => {
            ("get_listings", json!({ "event_id": args.event_id }))
        }
        Command::Listings(args) => ("filter_listings", listings_params(args)),
        Command::Find(args) => ("find_events", find_params(args)),
    }
}

fn events_params(args: &EventsArgs) -> Value {
    object([
        ("performer_id", args.performer_id.map(|id| json!(id))),
        ("venue_id", args.venue_id.map(|id| json!(id))),
        ("category_id", args.category_id.map(|id| json!(id))),
        ("latitude", args.lat.map(|lat| json!(lat))),
        ("longitude", args.lon.map(|lon| json!(lon))),
        ("radius_miles", args.radius_miles.map(|radius| json!(radius))),
        ("date_from", args.from.as_ref().map(|from| json!(from))),
        ("date_to", args.to.as_ref().map(|to| json!(to))),
        ("page", args.page.map(|page| json!(page))),
        ("per_page", args.per_page.map(|per_page| json!(per_page))),
    ])
}

fn listings_params(args: &ListingsArgs) -> Value {
    object([
        ("event_id", Some(json!(args.event_id))),
        ("quantity", Some(json!(args.quantity))),
        ("price_min", args.min_price.map(|price| json!(price))),
        ("price_max", args.max_price.map(|price| json!(price))),
        (
            "section_pattern",
            args.section_pattern.as_ref().map(|pattern| json!(pattern)),
        ),
        ("include_parking", Some(json!(args.include_parking))),
        ("sort", Some(json!(args.sort.as_str()))),
        ("return_top", args.top.map(|top| json!(top))),
    ])
}

fn find_params(args: &FindArgs) -> Value {
    object([
        ("query", Some(json!(args.query.join(" ")))),
        ("date", args.date.as_ref().map(|date| json!(date))),
        ("flexible_date", Some(json!(args.flexible))),
        ("budget_per_ticket", args.budget.map(|budget| json!(budget))),
        ("quantity", Some(json!(args.quantity))),
        ("max_events", args.max_events.map(|max| json!(max))),
        (
            "tickets_per_event",
            args.tickets_per_event.map(|count| json!(count)),
        ),
        ("include_tickets", Some(json!(!args.no_tickets))),
        ("sports_only", Some(json!(!args.any_kind))),
    ])
}

fn object<const N: usize>(fields: [(&str, Option<Value>); N]) -> Value {
    let map = fields
        .into_iter()
        .filter_map(|(name, value)| value.map(|value| (name.to_owned(), value)))
        .collect::<Map<String, Value>>();
    Value::Object(map)
}
