//! Named tool operations over the catalog and the finder.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use serde_json::{json, Value};
use ticketscout_core::{Catalog, EventFinder};
use tracing::{debug, warn};

use crate::envelope::{RequestId, ToolEnvelope};
use crate::error::ToolError;
use crate::params::{
    parse, EventIdParams, FilterListingsParams, FindEventsParams, ListEventsParams, SuggestParams,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    SearchSuggestions,
    ListEvents,
    GetEvent,
    GetListings,
    FilterListings,
    FindEvents,
}

impl Operation {
    pub const ALL: [Self; 6] = [
        Self::SearchSuggestions,
        Self::ListEvents,
        Self::GetEvent,
        Self::GetListings,
        Self::FilterListings,
        Self::FindEvents,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SearchSuggestions => "search_suggestions",
            Self::ListEvents => "list_events",
            Self::GetEvent => "get_event",
            Self::GetListings => "get_listings",
            Self::FilterListings => "filter_listings",
            Self::FindEvents => "find_events",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::SearchSuggestions => "Suggest performers, venues and events matching a partial query",
            Self::ListEvents => "List events by performer, venue, category, location and date window",
            Self::GetEvent => "Fetch one event by id",
            Self::GetListings => "Fetch every ticket group listed for an event",
            Self::FilterListings => "Filter and rank an event's ticket groups by quantity, budget and seating",
            Self::FindEvents => "Find events from a natural-language query, with ticket recommendations",
        }
    }
}

impl FromStr for Operation {
    type Err = ToolError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|operation| operation.as_str() == value)
            .ok_or_else(|| ToolError::UnknownOperation(value.to_owned()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationDescriptor {
    pub name: &'static str,
    pub description: &'static str,
}

/// Dispatches tool calls by name. Every call yields an envelope; nothing panics
/// or propagates past this boundary.
pub struct ToolRegistry {
    catalog: Arc<Catalog>,
    finder: EventFinder,
}

impl ToolRegistry {
    pub fn new(catalog: Arc<Catalog>, finder: EventFinder) -> Self {
        Self { catalog, finder }
    }

    pub fn describe(&self) -> Vec<OperationDescriptor> {
        Operation::ALL
            .into_iter()
            .map(|operation| OperationDescriptor {
                name: operation.as_str(),
                description: operation.description(),
            })
            .collect()
    }

    pub async fn dispatch(&self, name: &str, params: Value) -> ToolEnvelope {
        let started = Instant::now();
        let request_id = RequestId::new_v4();
        debug!(%request_id, operation = name, "dispatching tool call");

        let envelope = match self.run(name, params).await {
            Ok(data) => ToolEnvelope::success(name, data),
            Err(error) => {
                warn!(%request_id, operation = name, code = error.code(), %error, "tool call failed");
                ToolEnvelope::failure(name, &error)
            }
        };
        let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        envelope
            .with_request_id(request_id)
            .with_latency_ms(latency_ms)
    }

    async fn run(&self, name: &str, params: Value) -> Result<Value, ToolError> {
        let operation = name.parse::<Operation>()?;
        let op = operation.as_str();
        self.catalog.begin_operation();

        match operation {
            Operation::SearchSuggestions => {
                let params = parse::<SuggestParams>(op, params)?.validate()?;
                let suggestions = self
                    .catalog
                    .search_suggestions(&params.query, params.entities.as_deref(), params.limit)
                    .await?;
                Ok(suggestions)
            }
            Operation::ListEvents => {
                let query = parse::<ListEventsParams>(op, params)?.validate()?;
                let page = self.catalog.list_events(&query).await?;
                to_value(op, &page)
            }
            Operation::GetEvent => {
                let params = parse::<EventIdParams>(op, params)?;
                let event = self.catalog.get_event(params.event_id).await?;
                to_value(op, &event)
            }
            Operation::GetListings => {
                let params = parse::<EventIdParams>(op, params)?;
                let page = self.catalog.listings(params.event_id).await?;
                Ok(json!({
                    "event_id": params.event_id,
                    "total": page.ticket_groups.len(),
                    "skipped": page.skipped,
                    "ticket_groups": page.ticket_groups,
                }))
            }
            Operation::FilterListings => {
                let (event_id, criteria) = parse::<FilterListingsParams>(op, params)?.validate()?;
                let outcome = self.catalog.filter_listings(event_id, &criteria).await?;
                let lowest_price = outcome.lowest_price();
                Ok(json!({
                    "event_id": event_id,
                    "options": outcome.options,
                    "criteria_applied": outcome.criteria_applied,
                    "lowest_price": lowest_price,
                }))
            }
            Operation::FindEvents => {
                let request = parse::<FindEventsParams>(op, params)?.validate()?;
                let report = self.finder.find(&request).await?;
                to_value(op, &report)
            }
        }
    }
}

fn to_value<T: Serialize>(operation: &str, value: &T) -> Result<Value, ToolError> {
    serde_json::to_value(value).map_err(|error| {
        ToolError::invalid(operation, format!("result could not be serialized: {error}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operation_names_round_trip() {
        for operation in Operation::ALL {
            assert_eq!(operation.as_str().parse::<Operation>(), Ok(operation));
        }
        assert_eq!(
            "buy_tickets".parse::<Operation>(),
            Err(ToolError::UnknownOperation(String::from("buy_tickets")))
        );
    }
}
