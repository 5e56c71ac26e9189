//! # Multi-Strategy Event Finder
//!
//! Natural-language query → ranked events with ticket summaries.
//!
//! 1. Clear the request-scoped cache and resolve the query against the reference table.
//! 2. Ambiguous resolutions short-circuit into a disambiguation result.
//! 3. Primary strategies ([`StrategyKind::DirectId`], [`StrategyKind::Geographic`],
//!    [`StrategyKind::Keyword`]) run strictly in order until one retains an event.
//!    A failing strategy counts as "found nothing" unless credentials were rejected.
//! 4. [`StrategyKind::Broadened`] widens the search for away games when a team was
//!    named without its city and only home games (or nothing) turned up.
//! 5. Retained events are ordered by start time, capped, and annotated with ticket
//!    summaries fetched with bounded concurrency.

mod plan;
mod strategy;

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use time::Date;
use tracing::{debug, info, warn};

use crate::catalog::{Catalog, EventQuery};
use crate::classify::SportsClassifier;
use crate::domain::{DateWindow, Event, RankedOption, Timestamp};
use crate::error::MarketplaceError;
use crate::listings::{CriteriaApplied, FilterOutcome, ListingCriteria};
use crate::reference::{Candidate, League, Resolver, TeamRecord};

use plan::SearchPlan;
use strategy::{broadened_applicable, PRIMARY_STRATEGIES};

pub use strategy::{StrategyError, StrategyKind, StrategyReport};

/// Tunable finder behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinderConfig {
    /// Look-ahead when no date is given.
    pub look_ahead_weeks: u32,
    /// Days either side of a flexible date.
    pub flexible_window_days: u32,
    pub radius_miles: u32,
    /// Concurrent listing fetches when attaching ticket summaries.
    pub listing_concurrency: usize,
    /// Share of query words an unresolved keyword hit must contain.
    pub keyword_min_overlap: f64,
    pub per_page: u32,
    /// Window multiplier for the broadened strategy.
    pub broadened_window_factor: u32,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            look_ahead_weeks: 8,
            flexible_window_days: 7,
            radius_miles: 25,
            listing_concurrency: 3,
            keyword_min_overlap: 0.5,
            per_page: 100,
            broadened_window_factor: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FindRequest {
    pub query: String,
    pub date: Option<Date>,
    /// Treat `date` as approximate (± the flexible window).
    pub flexible_date: bool,
    pub budget_per_ticket: Option<f64>,
    pub quantity: u32,
    pub max_events: usize,
    pub include_tickets: bool,
    pub tickets_per_event: usize,
    /// Drop events the sports classifier rejects.
    pub sports_only: bool,
}

impl FindRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            date: None,
            flexible_date: false,
            budget_per_ticket: None,
            quantity: 1,
            max_events: 5,
            include_tickets: true,
            tickets_per_event: 3,
            sports_only: true,
        }
    }

    pub fn on(mut self, date: Date) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_budget(mut self, budget_per_ticket: f64) -> Self {
        self.budget_per_ticket = Some(budget_per_ticket);
        self
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    fn listing_criteria(&self) -> ListingCriteria {
        ListingCriteria {
            quantity: self.quantity.max(1),
            price_max: self.budget_per_ticket,
            return_top: self.tickets_per_event,
            ..ListingCriteria::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindStatus {
    Found,
    NoEvents,
    NeedsDisambiguation,
}

/// Ticket recommendations attached to one event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketSummary {
    pub options: Vec<RankedOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub criteria_applied: Option<CriteriaApplied>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lowest_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<FilterOutcome> for TicketSummary {
    fn from(outcome: FilterOutcome) -> Self {
        Self {
            lowest_price: outcome.lowest_price(),
            options: outcome.options,
            criteria_applied: Some(outcome.criteria_applied),
            error: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoundEvent {
    #[serde(flatten)]
    pub event: Event,
    pub strategy: StrategyKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tickets: Option<TicketSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FindReport {
    pub status: FindStatus,
    pub query: String,
    pub window: DateWindow,
    pub matched: Vec<Candidate>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub candidates: Vec<Candidate>,
    pub events: Vec<FoundEvent>,
    pub strategies: Vec<StrategyReport>,
    pub api_calls: u64,
}

/// Orchestrates resolver, catalog, classifier and listing ranker.
pub struct EventFinder {
    catalog: Arc<Catalog>,
    resolver: Resolver,
    classifier: SportsClassifier,
    config: FinderConfig,
}

impl EventFinder {
    pub fn new(
        catalog: Arc<Catalog>,
        resolver: Resolver,
        classifier: SportsClassifier,
        config: FinderConfig,
    ) -> Self {
        Self {
            catalog,
            resolver,
            classifier,
            config,
        }
    }

    pub fn config(&self) -> &FinderConfig {
        &self.config
    }

    /// Event window for `request`.
    ///
    /// - specific date: `[date - 1 day, date + 2 days)`
    /// - flexible date: `[date - N days, date + N + 1 days)`
    /// - no date: `[now, now + look_ahead_weeks)`
    pub fn window_for(&self, request: &FindRequest) -> DateWindow {
        match request.date {
            Some(date) if request.flexible_date => {
                let days = i64::from(self.config.flexible_window_days);
                DateWindow::around(date, days, days + 1)
            }
            Some(date) => DateWindow::around(date, 1, 2),
            None => DateWindow::weeks_from(Timestamp::now(), i64::from(self.config.look_ahead_weeks)),
        }
    }

    /// Runs one top-level search.
    ///
    /// # Errors
    ///
    /// Only [`MarketplaceError::Auth`] escapes; every other marketplace failure
    /// is recorded in the strategy or ticket telemetry instead.
    pub async fn find(&self, request: &FindRequest) -> Result<FindReport, MarketplaceError> {
        self.catalog.begin_operation();
        let calls_at_start = self.catalog.client().api_calls();

        let resolution = self.resolver.resolve(&request.query);
        let window = self.window_for(request);
        let matched = resolution
            .records()
            .map(Candidate::from)
            .collect::<Vec<_>>();

        if resolution.ambiguous {
            info!(
                query = %request.query,
                candidates = resolution.candidates().len(),
                "query needs disambiguation"
            );
            return Ok(FindReport {
                status: FindStatus::NeedsDisambiguation,
                query: request.query.clone(),
                window,
                candidates: resolution.candidates(),
                matched: Vec::new(),
                events: Vec::new(),
                strategies: Vec::new(),
                api_calls: 0,
            });
        }

        let mut plan = SearchPlan::new(
            &request.query,
            resolution,
            window,
            &self.resolver.config().stop_words,
            request.sports_only,
            self.config.keyword_min_overlap,
        );

        let mut strategies = Vec::new();
        for descriptor in &PRIMARY_STRATEGIES {
            if !(descriptor.is_applicable)(&plan) {
                debug!(strategy = %descriptor.kind, "strategy not applicable");
                continue;
            }
            let report = self.attempt(descriptor.kind, &mut plan).await?;
            let retained = report.events_retained;
            strategies.push(report);
            if retained > 0 {
                break;
            }
        }

        let home_only_or_empty = plan.found_nothing() || plan.all_retained_at_home();
        if broadened_applicable(&plan, home_only_or_empty) {
            strategies.push(self.attempt(StrategyKind::Broadened, &mut plan).await?);
        }

        let ranked = plan.into_ranked(request.max_events);
        let events = if request.include_tickets {
            self.attach_tickets(ranked, request).await?
        } else {
            ranked
                .into_iter()
                .map(|(event, strategy)| FoundEvent {
                    event,
                    strategy,
                    tickets: None,
                })
                .collect()
        };

        let status = if events.is_empty() {
            FindStatus::NoEvents
        } else {
            FindStatus::Found
        };
        let api_calls = self.catalog.client().api_calls() - calls_at_start;
        info!(
            query = %request.query,
            events = events.len(),
            strategies = strategies.len(),
            api_calls,
            "find completed"
        );

        Ok(FindReport {
            status,
            query: request.query.clone(),
            window,
            matched,
            candidates: Vec::new(),
            events,
            strategies,
            api_calls,
        })
    }

    async fn attempt(
        &self,
        kind: StrategyKind,
        plan: &mut SearchPlan,
    ) -> Result<StrategyReport, MarketplaceError> {
        let calls_before = self.catalog.client().api_calls();
        let mut report = StrategyReport::new(kind);

        let outcome = match kind {
            StrategyKind::DirectId => self.run_direct_id(plan, &mut report).await,
            StrategyKind::Geographic => self.run_geographic(plan, &mut report).await,
            StrategyKind::Keyword => self.run_keyword(plan, &mut report).await,
            StrategyKind::Broadened => self.run_broadened(plan, &mut report).await,
        };
        report.api_calls = self.catalog.client().api_calls() - calls_before;

        match outcome {
            Ok(()) => info!(
                strategy = %kind,
                discovered = report.events_discovered,
                retained = report.events_retained,
                not_sports = report.discarded_by_classifier,
                unrelated = report.discarded_as_unrelated,
                api_calls = report.api_calls,
                "strategy finished"
            ),
            Err(error) if error.is_fatal() => {
                let StrategyError::Marketplace(error) = error;
                return Err(error);
            }
            Err(error) => {
                warn!(strategy = %kind, %error, "strategy failed, falling back");
                report.error = Some(error.to_string());
            }
        }
        Ok(report)
    }

    async fn run_direct_id(
        &self,
        plan: &mut SearchPlan,
        report: &mut StrategyReport,
    ) -> Result<(), StrategyError> {
        let records = plan.records().cloned().collect::<Vec<_>>();
        for record in records {
            let query = match (record.venue_id, record.performer_id) {
                (Some(venue_id), _) => EventQuery::by_venue(venue_id),
                (None, Some(performer_id)) => EventQuery::by_performer(performer_id),
                (None, None) => continue,
            };
            let window = plan.window;
            self.absorb_query(plan, report, StrategyKind::DirectId, query, window)
                .await?;
            if report.events_retained > 0 {
                break;
            }
        }
        Ok(())
    }

    async fn run_geographic(
        &self,
        plan: &mut SearchPlan,
        report: &mut StrategyReport,
    ) -> Result<(), StrategyError> {
        let records = plan
            .records()
            .filter(|record| record.venue_id.is_none())
            .cloned()
            .collect::<Vec<_>>();
        for record in records {
            let query =
                EventQuery::near(record.latitude, record.longitude, self.config.radius_miles);
            let window = plan.window;
            self.absorb_query(plan, report, StrategyKind::Geographic, query, window)
                .await?;
            if report.events_retained > 0 {
                break;
            }
        }
        Ok(())
    }

    async fn run_keyword(
        &self,
        plan: &mut SearchPlan,
        report: &mut StrategyReport,
    ) -> Result<(), StrategyError> {
        let window = plan.window;
        let page = self
            .catalog
            .search_events(plan.search_text(), Some(&window), self.config.per_page)
            .await?;
        plan.absorb(StrategyKind::Keyword, page.events, &window, &self.classifier, report);
        Ok(())
    }

    /// Performer-wide query (or a keyword search on the team name) over a wider window.
    async fn run_broadened(
        &self,
        plan: &mut SearchPlan,
        report: &mut StrategyReport,
    ) -> Result<(), StrategyError> {
        let window = plan.window.widened(self.config.broadened_window_factor);
        let teams = plan
            .records()
            .filter(|record| record.league != League::Venue)
            .cloned()
            .collect::<Vec<TeamRecord>>();

        for team in teams {
            match team.performer_id {
                Some(performer_id) => {
                    self.absorb_query(
                        plan,
                        report,
                        StrategyKind::Broadened,
                        EventQuery::by_performer(performer_id),
                        window,
                    )
                    .await?;
                }
                None => {
                    let page = self
                        .catalog
                        .search_events(&team.name, Some(&window), self.config.per_page)
                        .await?;
                    plan.absorb(
                        StrategyKind::Broadened,
                        page.events,
                        &window,
                        &self.classifier,
                        report,
                    );
                }
            }
        }
        Ok(())
    }

    async fn absorb_query(
        &self,
        plan: &mut SearchPlan,
        report: &mut StrategyReport,
        strategy: StrategyKind,
        query: EventQuery,
        window: DateWindow,
    ) -> Result<(), StrategyError> {
        let query = query
            .in_window(window)
            .with_per_page(self.config.per_page);
        let page = self.catalog.list_events(&query).await?;
        plan.absorb(strategy, page.events, &window, &self.classifier, report);
        Ok(())
    }

    async fn attach_tickets(
        &self,
        ranked: Vec<(Event, StrategyKind)>,
        request: &FindRequest,
    ) -> Result<Vec<FoundEvent>, MarketplaceError> {
        let criteria = request.listing_criteria();
        let catalog = &self.catalog;
        let criteria_ref = &criteria;

        let outcomes = stream::iter(ranked.iter().map(|(event, _)| event.id))
            .map(move |event_id| async move { catalog.filter_listings(event_id, criteria_ref).await })
            .buffered(self.config.listing_concurrency.max(1))
            .collect::<Vec<_>>()
            .await;

        let mut events = Vec::with_capacity(ranked.len());
        for ((event, strategy), outcome) in ranked.into_iter().zip(outcomes) {
            let tickets = match outcome {
                Ok(outcome) => TicketSummary::from(outcome),
                Err(error) if error.is_auth() => return Err(error),
                Err(error) => {
                    warn!(event_id = event.id, %error, "listing fetch failed");
                    TicketSummary {
                        options: Vec::new(),
                        criteria_applied: None,
                        lowest_price: None,
                        error: Some(error.to_string()),
                    }
                }
            };
            events.push(FoundEvent {
                event,
                strategy,
                tickets: Some(tickets),
            });
        }
        Ok(events)
    }
}
