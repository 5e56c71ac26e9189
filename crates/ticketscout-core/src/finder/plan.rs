//! Per-query search state: what the resolver found, the date window, and the
//! events retained so far across strategies.

use std::collections::HashSet;

use crate::classify::SportsClassifier;
use crate::domain::{DateWindow, Event};
use crate::reference::{League, Resolution, TeamRecord};
use crate::text::{normalize, tokens};

use super::strategy::{StrategyKind, StrategyReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Verdict {
    Keep,
    NotSports,
    Unrelated,
}

pub(crate) struct SearchPlan {
    pub resolution: Resolution,
    pub window: DateWindow,
    search_text: String,
    query_tokens: Vec<String>,
    team_terms: Vec<String>,
    sports_only: bool,
    keyword_min_overlap: f64,
    retained: Vec<(Event, StrategyKind)>,
    seen: HashSet<u64>,
}

impl SearchPlan {
    pub fn new(
        query: &str,
        resolution: Resolution,
        window: DateWindow,
        stop_words: &[String],
        sports_only: bool,
        keyword_min_overlap: f64,
    ) -> Self {
        let query_tokens = tokens(query)
            .into_iter()
            .filter(|token| !stop_words.contains(token))
            .collect();

        let mut team_terms = Vec::new();
        for team_match in &resolution.matches {
            if team_match.record.league == League::Venue {
                continue;
            }
            team_terms.push(team_match.nickname());
            team_terms.push(team_match.record.name.clone());
        }

        Self {
            resolution,
            window,
            search_text: query.trim().to_owned(),
            query_tokens,
            team_terms,
            sports_only,
            keyword_min_overlap,
            retained: Vec::new(),
            seen: HashSet::new(),
        }
    }

    pub fn records(&self) -> impl Iterator<Item = &TeamRecord> {
        self.resolution.records()
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn found_nothing(&self) -> bool {
        self.retained.is_empty()
    }

    /// Every retained event is at the home venue of a matched team.
    pub fn all_retained_at_home(&self) -> bool {
        self.retained
            .iter()
            .all(|(event, _)| self.records().any(|record| at_venue(event, record)))
    }

    /// Filters one batch from a strategy into the retained set, updating its report.
    pub fn absorb(
        &mut self,
        strategy: StrategyKind,
        events: Vec<Event>,
        window: &DateWindow,
        classifier: &SportsClassifier,
        report: &mut StrategyReport,
    ) {
        report.events_discovered += events.len();
        for event in events {
            match self.judge(&event, window, classifier) {
                Verdict::NotSports => report.discarded_by_classifier += 1,
                Verdict::Unrelated => report.discarded_as_unrelated += 1,
                // First occurrence wins; repeats are not counted as retained again.
                Verdict::Keep => {
                    if self.seen.insert(event.id) {
                        report.events_retained += 1;
                        self.retained.push((event, strategy));
                    }
                }
            }
        }
    }

    pub(crate) fn judge(
        &self,
        event: &Event,
        window: &DateWindow,
        classifier: &SportsClassifier,
    ) -> Verdict {
        if event
            .occurs_at()
            .is_some_and(|occurs_at| !window.contains(occurs_at))
        {
            return Verdict::Unrelated;
        }
        if self.sports_only && !classifier.is_sports(event, &self.team_terms) {
            return Verdict::NotSports;
        }
        if self.is_related(event) {
            Verdict::Keep
        } else {
            Verdict::Unrelated
        }
    }

    /// Matchups must name every team, single-team searches the team, and venue
    /// searches accept anything held at the venue. Unresolved queries fall back to
    /// token overlap with the event name.
    fn is_related(&self, event: &Event) -> bool {
        if self.resolution.matches.is_empty() {
            return self.keyword_overlap(event) + 1e-9 >= self.keyword_min_overlap;
        }
        self.records().all(|record| {
            if record.league == League::Venue {
                at_venue(event, record) || record.is_named_in(&event.name)
            } else {
                record.is_named_in(&event.name)
            }
        })
    }

    fn keyword_overlap(&self, event: &Event) -> f64 {
        if self.query_tokens.is_empty() {
            return 1.0;
        }
        let name_tokens = tokens(&event.name);
        let shared = self
            .query_tokens
            .iter()
            .filter(|token| name_tokens.contains(token))
            .count();
        shared as f64 / self.query_tokens.len() as f64
    }

    /// Retained events ordered by start time (undated last), capped at `limit`.
    pub fn into_ranked(self, limit: usize) -> Vec<(Event, StrategyKind)> {
        let mut retained = self.retained;
        retained.sort_by_key(|(event, _)| {
            let occurs_at = event.occurs_at();
            (occurs_at.is_none(), occurs_at)
        });
        retained.truncate(limit);
        retained
    }
}

fn at_venue(event: &Event, record: &TeamRecord) -> bool {
    let Some(venue) = &event.venue else {
        return false;
    };
    if let (Some(event_venue), Some(home_venue)) = (venue.id, record.venue_id) {
        return event_venue == home_venue;
    }
    !venue.name.is_empty() && normalize(&venue.name) == normalize(&record.venue_name)
}
