//! Parameter objects for each tool operation.
//!
//! Each object deserializes from the caller's JSON, then `validate` enforces
//! bounds and converts it into the core request type.

use std::fmt::Display;
use std::ops::RangeInclusive;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use ticketscout_core::{
    DateWindow, EventQuery, FindRequest, ListingCriteria, SortOrder, Timestamp,
};

use crate::error::ToolError;

pub const RETURN_TOP_RANGE: RangeInclusive<usize> = 1..=20;
pub const QUANTITY_RANGE: RangeInclusive<u32> = 1..=50;
pub const MAX_EVENTS_RANGE: RangeInclusive<usize> = 1..=20;
pub const LIMIT_RANGE: RangeInclusive<u32> = 1..=50;
pub const RADIUS_MILES_RANGE: RangeInclusive<u32> = 1..=200;
const PER_PAGE_RANGE: RangeInclusive<u32> = 1..=100;

/// Look-ahead applied when a listing window has a start but no end.
const OPEN_WINDOW_WEEKS: i64 = 8;

pub(crate) fn parse<T: DeserializeOwned>(operation: &str, params: Value) -> Result<T, ToolError> {
    // A missing parameter object is treated as an empty one.
    let params = if params.is_null() {
        Value::Object(serde_json::Map::new())
    } else {
        params
    };
    serde_json::from_value(params).map_err(|error| ToolError::invalid(operation, error.to_string()))
}

fn bounded<T>(operation: &str, field: &str, value: T, range: RangeInclusive<T>) -> Result<T, ToolError>
where
    T: PartialOrd + Display + Copy,
{
    if range.contains(&value) {
        Ok(value)
    } else {
        Err(ToolError::invalid(
            operation,
            format!(
                "{field} must be between {} and {}, got {value}",
                range.start(),
                range.end()
            ),
        ))
    }
}

fn timestamp(operation: &str, field: &str, value: &str) -> Result<Timestamp, ToolError> {
    Timestamp::parse(value).ok_or_else(|| {
        ToolError::invalid(
            operation,
            format!("{field} must be an ISO-8601 date or datetime, got {value:?}"),
        )
    })
}

fn non_empty(operation: &str, field: &str, value: String) -> Result<String, ToolError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ToolError::invalid(operation, format!("{field} must not be empty")));
    }
    Ok(trimmed.to_owned())
}

fn default_limit() -> u32 {
    10
}

fn default_quantity() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SuggestParams {
    #[serde(alias = "q")]
    pub query: String,
    #[serde(default)]
    pub entities: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

impl SuggestParams {
    pub fn validate(self) -> Result<Self, ToolError> {
        const OP: &str = "search_suggestions";
        Ok(Self {
            query: non_empty(OP, "query", self.query)?,
            entities: self.entities,
            limit: bounded(OP, "limit", self.limit, LIMIT_RANGE)?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ListEventsParams {
    pub performer_id: Option<u64>,
    pub venue_id: Option<u64>,
    pub category_id: Option<u64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub radius_miles: Option<u32>,
    /// Inclusive lower bound on `occurs_at`.
    pub date_from: Option<String>,
    /// Exclusive upper bound on `occurs_at`.
    pub date_to: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub order_by: Option<String>,
}

impl ListEventsParams {
    pub fn validate(self) -> Result<EventQuery, ToolError> {
        const OP: &str = "list_events";

        let within = match (self.latitude, self.longitude, self.radius_miles) {
            (None, None, None) => None,
            (Some(_), Some(_), radius) => Some(bounded(
                OP,
                "radius_miles",
                radius.unwrap_or(25),
                RADIUS_MILES_RANGE,
            )?),
            _ => {
                return Err(ToolError::invalid(
                    OP,
                    "latitude and longitude must be given together",
                ))
            }
        };

        let window = match (self.date_from.as_deref(), self.date_to.as_deref()) {
            (None, None) => None,
            (from, to) => {
                let start = match from {
                    Some(value) => timestamp(OP, "date_from", value)?,
                    None => Timestamp::now(),
                };
                let window = match to {
                    Some(value) => DateWindow::new(start, timestamp(OP, "date_to", value)?),
                    None => DateWindow::weeks_from(start, OPEN_WINDOW_WEEKS),
                };
                if window.end <= window.start {
                    return Err(ToolError::invalid(OP, "date_to must be after date_from"));
                }
                Some(window)
            }
        };

        let per_page = self
            .per_page
            .map(|per_page| bounded(OP, "per_page", per_page, PER_PAGE_RANGE))
            .transpose()?;

        Ok(EventQuery {
            performer_id: self.performer_id,
            venue_id: self.venue_id,
            category_id: self.category_id,
            latitude: self.latitude,
            longitude: self.longitude,
            within,
            window,
            page: self.page,
            per_page,
            order_by: self.order_by,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EventIdParams {
    pub event_id: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterListingsParams {
    pub event_id: u64,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub price_min: Option<f64>,
    #[serde(default, alias = "budget_per_ticket")]
    pub price_max: Option<f64>,
    #[serde(default)]
    pub include_parking: bool,
    #[serde(default)]
    pub section: Option<String>,
    #[serde(default)]
    pub row: Option<String>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub wheelchair: Option<bool>,
    #[serde(default)]
    pub instant_delivery: Option<bool>,
    #[serde(default)]
    pub section_pattern: Option<String>,
    #[serde(default)]
    pub sort: SortOrder,
    #[serde(default)]
    pub return_top: Option<usize>,
}

impl FilterListingsParams {
    pub fn validate(self) -> Result<(u64, ListingCriteria), ToolError> {
        const OP: &str = "filter_listings";

        if let (Some(min), Some(max)) = (self.price_min, self.price_max) {
            if min > max {
                return Err(ToolError::invalid(OP, "price_min must not exceed price_max"));
            }
        }
        let return_top = self
            .return_top
            .map(|top| bounded(OP, "return_top", top, RETURN_TOP_RANGE))
            .transpose()?;

        let criteria = ListingCriteria {
            quantity: bounded(OP, "quantity", self.quantity, QUANTITY_RANGE)?,
            price_min: self.price_min,
            price_max: self.price_max,
            include_parking: self.include_parking,
            section: self.section,
            row: self.row,
            format: self.format,
            wheelchair: self.wheelchair,
            instant_delivery: self.instant_delivery,
            section_pattern: self.section_pattern,
            sort: self.sort,
            return_top: return_top.unwrap_or(ListingCriteria::default().return_top),
        };
        Ok((self.event_id, criteria))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FindEventsParams {
    pub query: String,
    /// `YYYY-MM-DD`.
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub flexible_date: bool,
    #[serde(default)]
    pub budget_per_ticket: Option<f64>,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub max_events: Option<usize>,
    #[serde(default)]
    pub include_tickets: Option<bool>,
    #[serde(default)]
    pub tickets_per_event: Option<usize>,
    #[serde(default)]
    pub sports_only: Option<bool>,
}

impl FindEventsParams {
    pub fn validate(self) -> Result<FindRequest, ToolError> {
        const OP: &str = "find_events";

        let mut request = FindRequest::new(non_empty(OP, "query", self.query)?);
        if let Some(date) = self.date.as_deref() {
            request.date = Some(timestamp(OP, "date", date)?.date());
        }
        if let Some(budget) = self.budget_per_ticket {
            if budget <= 0.0 || !budget.is_finite() {
                return Err(ToolError::invalid(OP, "budget_per_ticket must be positive"));
            }
            request.budget_per_ticket = Some(budget);
        }
        request.flexible_date = self.flexible_date;
        request.quantity = bounded(OP, "quantity", self.quantity, QUANTITY_RANGE)?;
        if let Some(max_events) = self.max_events {
            request.max_events = bounded(OP, "max_events", max_events, MAX_EVENTS_RANGE)?;
        }
        if let Some(tickets_per_event) = self.tickets_per_event {
            request.tickets_per_event =
                bounded(OP, "tickets_per_event", tickets_per_event, RETURN_TOP_RANGE)?;
        }
        if let Some(include_tickets) = self.include_tickets {
            request.include_tickets = include_tickets;
        }
        if let Some(sports_only) = self.sports_only {
            request.sports_only = sports_only;
        }
        Ok(request)
    }
}
