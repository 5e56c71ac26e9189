//! Shared harness for behavior tests: an in-memory marketplace that routes
//! signed requests by path and query parameters, plus JSON fixture builders.

use std::cmp::Reverse;
use std::collections::{BTreeMap, VecDeque};
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::{json, Value};
use ticketscout_agent::ToolRegistry;
use ticketscout_core::{
    CacheStore, Catalog, Environment, EventFinder, FinderConfig, HttpClient, HttpError,
    HttpRequest, HttpResponse, MarketplaceClient, MarketplaceConfig, ReferenceData, Resolver,
    ResolverConfig, RetryPolicy, SportsClassifier, Timestamp,
};

const PATH_PREFIX: &str = "/v9";

struct Route {
    path: String,
    params: Vec<(String, String)>,
    /// Popped in order; the last response repeats.
    responses: VecDeque<Result<HttpResponse, HttpError>>,
}

impl Route {
    fn matches(&self, call: &RecordedCall) -> bool {
        self.path == call.path
            && self
                .params
                .iter()
                .all(|(key, value)| call.params.get(key) == Some(value))
    }

    fn next_response(&mut self) -> Result<HttpResponse, HttpError> {
        if self.responses.len() > 1 {
            if let Some(response) = self.responses.pop_front() {
                return response;
            }
        }
        self.responses
            .front()
            .cloned()
            .unwrap_or_else(|| Ok(HttpResponse::ok_json("{}")))
    }
}

/// A request as the marketplace saw it, with the `/v9` prefix stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub path: String,
    pub params: BTreeMap<String, String>,
    pub signature: Option<String>,
}

/// Scripted marketplace. Unrouted requests get an empty `{}` body.
#[derive(Default)]
pub struct FakeMarketplace {
    routes: Mutex<Vec<Route>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl FakeMarketplace {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Answers `path` requests carrying every pair in `params` with `body`.
    pub fn route(&self, path: &str, params: &[(&str, &str)], body: Value) {
        self.script(path, params, vec![Ok(HttpResponse::ok_json(body.to_string()))]);
    }

    pub fn script(
        &self,
        path: &str,
        params: &[(&str, &str)],
        responses: Vec<Result<HttpResponse, HttpError>>,
    ) {
        self.routes
            .lock()
            .expect("routes should not be poisoned")
            .push(Route {
                path: path.to_owned(),
                params: params
                    .iter()
                    .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
                    .collect(),
                responses: responses.into(),
            });
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .expect("calls should not be poisoned")
            .clone()
    }

    pub fn calls_to(&self, path: &str) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|call| call.path == path)
            .collect()
    }

    fn respond(&self, request: &HttpRequest) -> Result<HttpResponse, HttpError> {
        let url = reqwest::Url::parse(&request.url).expect("client should build valid URLs");
        let call = RecordedCall {
            path: url
                .path()
                .strip_prefix(PATH_PREFIX)
                .unwrap_or(url.path())
                .to_owned(),
            params: url.query_pairs().into_owned().collect(),
            signature: request.header("x-signature").map(str::to_owned),
        };
        self.calls
            .lock()
            .expect("calls should not be poisoned")
            .push(call.clone());

        let mut routes = self.routes.lock().expect("routes should not be poisoned");
        // Most specific route wins; ties go to the earliest registered.
        let best = routes
            .iter()
            .enumerate()
            .filter(|(_, route)| route.matches(&call))
            .min_by_key(|(position, route)| (Reverse(route.params.len()), *position))
            .map(|(position, _)| position);
        match best {
            Some(position) => routes[position].next_response(),
            None => Ok(HttpResponse::ok_json("{}")),
        }
    }
}

impl HttpClient for FakeMarketplace {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        let response = self.respond(&request);
        Box::pin(async move { response })
    }
}

/// Client over `marketplace` with two immediate retries.
pub fn client(marketplace: &Arc<FakeMarketplace>) -> Arc<MarketplaceClient> {
    let config = MarketplaceConfig::new(Environment::Sandbox, "token-abc", "secret-xyz")
        .expect("valid config")
        .with_retry(RetryPolicy::fixed(Duration::ZERO, 2));
    let transport: Arc<dyn HttpClient> = marketplace.clone();
    Arc::new(MarketplaceClient::new(config, transport).expect("valid client"))
}

pub fn catalog(marketplace: &Arc<FakeMarketplace>) -> Arc<Catalog> {
    Arc::new(Catalog::new(client(marketplace), CacheStore::default()))
}

pub fn finder(catalog: &Arc<Catalog>, reference: Arc<ReferenceData>) -> EventFinder {
    EventFinder::new(
        Arc::clone(catalog),
        Resolver::new(reference, ResolverConfig::default()),
        SportsClassifier::default(),
        FinderConfig::default(),
    )
}

pub fn registry(marketplace: &Arc<FakeMarketplace>) -> ToolRegistry {
    let catalog = catalog(marketplace);
    let finder = finder(&catalog, ReferenceData::builtin());
    ToolRegistry::new(catalog, finder)
}

/// RFC3339 start time `days` from now, inside the default look-ahead.
pub fn days_from_now(days: i64) -> String {
    Timestamp::now()
        .checked_add(time::Duration::days(days))
        .expect("in range")
        .format_rfc3339()
}

pub fn sports_category(league: &str, sport: &str) -> Value {
    json!({ "id": 1, "name": league, "parent": { "id": 2, "name": sport, "parent": { "id": 3, "name": "Sports" } } })
}

pub fn event_json(
    id: u64,
    name: &str,
    occurs_at: &str,
    venue: (u64, &str),
    category: Value,
) -> Value {
    json!({
        "id": id,
        "name": name,
        "occurs_at": occurs_at,
        "venue": { "id": venue.0, "name": venue.1 },
        "category": category,
        "performances": []
    })
}

pub fn events_page(events: Vec<Value>) -> Value {
    json!({ "current_page": 1, "per_page": 100, "total_entries": events.len(), "events": events })
}

pub fn ticket_group(id: u64, section: &str, quantity: u32, price: f64) -> Value {
    json!({
        "id": id,
        "section": section,
        "row": "A",
        "quantity": quantity,
        "splits": [],
        "retail_price": price,
        "format": "Electronic",
        "type": "event"
    })
}

pub fn listings_page(groups: Vec<Value>) -> Value {
    json!({ "ticket_groups": groups })
}
