//! Typed marketplace operations, with caching composed on top of the client.
//!
//! | Operation | Endpoint | Cache scope |
//! |-----------|----------|-------------|
//! | [`Catalog::search_suggestions`] | `GET /searches/suggestions` | none |
//! | [`Catalog::list_events`] | `GET /events` | TTL |
//! | [`Catalog::search_events`] | `GET /events/search` | TTL |
//! | [`Catalog::get_event`] | `GET /events/{id}` | request |
//! | [`Catalog::listings`] | `GET /listings` | request |

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cache::{CacheKey, CacheStore, DEFAULT_TTL};
use crate::client::MarketplaceClient;
use crate::domain::{DateWindow, Event, EventPage, ListingsPage};
use crate::error::MarketplaceError;
use crate::listings::{filter_and_rank, FilterOutcome, ListingCriteria};

pub const DEFAULT_PER_PAGE: u32 = 25;

/// Filters accepted by `GET /events`. Unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventQuery {
    pub performer_id: Option<u64>,
    pub venue_id: Option<u64>,
    pub category_id: Option<u64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Radius in miles around `latitude`/`longitude`.
    pub within: Option<u32>,
    pub window: Option<DateWindow>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub order_by: Option<String>,
}

impl EventQuery {
    pub fn by_performer(performer_id: u64) -> Self {
        Self {
            performer_id: Some(performer_id),
            ..Self::default()
        }
    }

    pub fn by_venue(venue_id: u64) -> Self {
        Self {
            venue_id: Some(venue_id),
            ..Self::default()
        }
    }

    pub fn near(latitude: f64, longitude: f64, within_miles: u32) -> Self {
        Self {
            latitude: Some(latitude),
            longitude: Some(longitude),
            within: Some(within_miles),
            ..Self::default()
        }
    }

    pub fn in_window(mut self, window: DateWindow) -> Self {
        self.window = Some(window);
        self
    }

    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    pub fn query_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        let mut push = |name: &str, value: Option<String>| {
            if let Some(value) = value {
                params.push((name.to_owned(), value));
            }
        };

        push("performer_id", self.performer_id.map(|id| id.to_string()));
        push("venue_id", self.venue_id.map(|id| id.to_string()));
        push("category_id", self.category_id.map(|id| id.to_string()));
        // Radius search needs all three; a partial triple is dropped rather than rejected upstream.
        if let (Some(latitude), Some(longitude), Some(within)) =
            (self.latitude, self.longitude, self.within)
        {
            push("lat", Some(format!("{latitude:.4}")));
            push("lon", Some(format!("{longitude:.4}")));
            push("within", Some(within.to_string()));
        }
        if let Some(window) = &self.window {
            for (name, value) in window.query_params() {
                push(name, Some(value));
            }
        }
        push("page", self.page.map(|page| page.to_string()));
        push(
            "per_page",
            Some(self.per_page.unwrap_or(DEFAULT_PER_PAGE).to_string()),
        );
        push("order_by", self.order_by.clone());
        params
    }
}

/// Marketplace operations shared by the finder and the tool layer.
#[derive(Clone)]
pub struct Catalog {
    client: Arc<MarketplaceClient>,
    cache: CacheStore,
    ttl: Duration,
}

impl Catalog {
    pub fn new(client: Arc<MarketplaceClient>, cache: CacheStore) -> Self {
        Self {
            client,
            cache,
            ttl: DEFAULT_TTL,
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn client(&self) -> &MarketplaceClient {
        &self.client
    }

    pub fn cache(&self) -> &CacheStore {
        &self.cache
    }

    /// Starts a new top-level operation: request-scoped entries are dropped.
    pub fn begin_operation(&self) {
        self.cache.clear_request_scope();
    }

    /// Entity suggestions for `query`, passed through as returned.
    pub async fn search_suggestions(
        &self,
        query: &str,
        entities: Option<&str>,
        limit: u32,
    ) -> Result<Value, MarketplaceError> {
        let mut params = vec![
            (String::from("q"), query.to_owned()),
            (String::from("limit"), limit.to_string()),
        ];
        if let Some(entities) = entities {
            params.push((String::from("entities"), entities.to_owned()));
        }
        self.client.get("/searches/suggestions", params).await
    }

    pub async fn list_events(&self, query: &EventQuery) -> Result<EventPage, MarketplaceError> {
        let params = query.query_params();
        let key = CacheKey::new("list_events").params(params.clone());
        let value = self.ttl_cached(&key, "/events", params).await?;
        decode(value, "/events")
    }

    /// Keyword search, optionally restricted to `window`.
    pub async fn search_events(
        &self,
        query: &str,
        window: Option<&DateWindow>,
        per_page: u32,
    ) -> Result<EventPage, MarketplaceError> {
        let mut params = vec![
            (String::from("q"), query.to_owned()),
            (String::from("per_page"), per_page.to_string()),
        ];
        if let Some(window) = window {
            params.extend(
                window
                    .query_params()
                    .into_iter()
                    .map(|(name, value)| (name.to_owned(), value)),
            );
        }
        let key = CacheKey::new("search_events").params(params.clone());
        let value = self.ttl_cached(&key, "/events/search", params).await?;
        decode(value, "/events/search")
    }

    pub async fn get_event(&self, event_id: u64) -> Result<Event, MarketplaceError> {
        let path = format!("/events/{event_id}");
        let key = CacheKey::new("get_event").param("id", event_id.to_string());
        let value = self.request_cached(&key, &path, Vec::new()).await?;
        decode(value, &path)
    }

    /// Every usable ticket group for `event_id`. Ordering and paging happen client-side.
    pub async fn listings(&self, event_id: u64) -> Result<ListingsPage, MarketplaceError> {
        let key = CacheKey::new("listings").param("event_id", event_id.to_string());
        let value = self
            .request_cached(
                &key,
                "/listings",
                vec![(String::from("event_id"), event_id.to_string())],
            )
            .await?;
        decode(value, "/listings")
    }

    pub async fn filter_listings(
        &self,
        event_id: u64,
        criteria: &ListingCriteria,
    ) -> Result<FilterOutcome, MarketplaceError> {
        let page = self.listings(event_id).await?;
        let mut outcome = filter_and_rank(&page.ticket_groups, criteria);
        outcome.criteria_applied.record_unusable(page.skipped);
        Ok(outcome)
    }

    async fn ttl_cached(
        &self,
        key: &CacheKey,
        path: &str,
        params: Vec<(String, String)>,
    ) -> Result<Value, MarketplaceError> {
        if let Some(value) = self.cache.get(key) {
            return Ok(value);
        }
        let value = self.client.get(path, params).await?;
        self.cache.set(key, value.clone(), Some(self.ttl));
        Ok(value)
    }

    async fn request_cached(
        &self,
        key: &CacheKey,
        path: &str,
        params: Vec<(String, String)>,
    ) -> Result<Value, MarketplaceError> {
        if let Some(value) = self.cache.get_request_scoped(key) {
            return Ok(value);
        }
        let value = self.client.get(path, params).await?;
        self.cache.set_request_scoped(key, value.clone());
        Ok(value)
    }
}

fn decode<T: DeserializeOwned>(value: Value, path: &str) -> Result<T, MarketplaceError> {
    serde_json::from_value(value)
        .map_err(|error| MarketplaceError::Decode(format!("{path}: {error}")))
}
