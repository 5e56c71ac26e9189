use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::MarketplaceError;
use crate::reference::League;

use super::plan::SearchPlan;

/// One way of asking the marketplace for candidate events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// `/events` filtered by a known performer or venue id.
    DirectId,
    /// `/events` within a radius of a record's coordinates.
    Geographic,
    /// `/events/search` free-text search, filtered client-side.
    Keyword,
    /// Wider window / wider net for away games of a resolved team.
    Broadened,
}

impl StrategyKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DirectId => "direct_id",
            Self::Geographic => "geographic",
            Self::Keyword => "keyword",
            Self::Broadened => "broadened",
        }
    }
}

impl Display for StrategyKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A strategy and the predicate deciding whether it can run for a plan.
pub(crate) struct StrategyDescriptor {
    pub kind: StrategyKind,
    pub is_applicable: fn(&SearchPlan) -> bool,
}

/// Attempted in order until one retains at least one event.
pub(crate) const PRIMARY_STRATEGIES: [StrategyDescriptor; 3] = [
    StrategyDescriptor {
        kind: StrategyKind::DirectId,
        is_applicable: direct_id_applicable,
    },
    StrategyDescriptor {
        kind: StrategyKind::Geographic,
        is_applicable: geographic_applicable,
    },
    StrategyDescriptor {
        kind: StrategyKind::Keyword,
        is_applicable: keyword_applicable,
    },
];

fn direct_id_applicable(plan: &SearchPlan) -> bool {
    plan.records()
        .any(|record| record.venue_id.is_some() || record.performer_id.is_some())
}

fn geographic_applicable(plan: &SearchPlan) -> bool {
    plan.records().any(|record| record.venue_id.is_none())
}

fn keyword_applicable(plan: &SearchPlan) -> bool {
    !plan.search_text().is_empty()
}

/// Runs only after the primaries, and only for team searches that did not name
/// a city and came back empty or with home games alone.
pub(crate) fn broadened_applicable(plan: &SearchPlan, home_only_or_empty: bool) -> bool {
    let team_count = plan
        .records()
        .filter(|record| record.league != League::Venue)
        .count();
    if team_count == 0 || plan.resolution.city_qualified {
        return false;
    }
    if team_count > 1 {
        return plan.found_nothing();
    }
    home_only_or_empty
}

/// Failure of one strategy attempt. Logged and treated as "found nothing".
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StrategyError {
    #[error(transparent)]
    Marketplace(#[from] MarketplaceError),
}

impl StrategyError {
    /// Rejected credentials doom every later strategy as well.
    pub fn is_fatal(&self) -> bool {
        match self {
            Self::Marketplace(error) => error.is_auth(),
        }
    }
}

/// Telemetry for one attempted strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyReport {
    pub strategy: StrategyKind,
    pub api_calls: u64,
    /// Events returned by the marketplace before any filtering.
    pub events_discovered: usize,
    pub discarded_by_classifier: usize,
    /// Outside the window, or not naming the requested teams.
    pub discarded_as_unrelated: usize,
    pub events_retained: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StrategyReport {
    pub(crate) fn new(strategy: StrategyKind) -> Self {
        Self {
            strategy,
            api_calls: 0,
            events_discovered: 0,
            discarded_by_classifier: 0,
            discarded_as_unrelated: 0,
            events_retained: 0,
            error: None,
        }
    }
}
