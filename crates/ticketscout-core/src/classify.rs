//! Sports / non-sports event classification.
//!
//! Keyword search and venue-wide queries return concerts and shows that share a
//! venue or date with the game the user asked for. Signals are weighed in order:
//!
//! 1. a non-sports category ("Concerts") makes the event non-sports;
//! 2. a sports category ("Golf") makes it sports, whatever its name says;
//! 3. a non-sports word in the name ("tour", "show") makes it non-sports;
//! 4. a sports word or known team in the name makes it sports.

use serde::{Deserialize, Serialize};

use crate::domain::Event;
use crate::text::{contains_term, normalize};

/// Keyword lists driving [`SportsClassifier`]. Heuristic and freely tunable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub sports_terms: Vec<String>,
    pub non_sports_terms: Vec<String>,
    pub sports_categories: Vec<String>,
    pub non_sports_categories: Vec<String>,
}

fn owned(terms: &[&str]) -> Vec<String> {
    terms.iter().map(|term| (*term).to_owned()).collect()
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            sports_terms: owned(&[
                "vs", "versus", "mlb", "nfl", "nba", "nhl", "mls", "wnba", "ncaa", "baseball",
                "football", "basketball", "hockey", "soccer", "playoffs", "preseason",
                "spring training", "world series", "super bowl", "stanley cup", "nba finals",
                "wild card", "boxing", "ufc", "mma", "fight night",
            ]),
            non_sports_terms: owned(&[
                "concert", "tour", "show", "festival", "fest", "comedy", "comedian", "theatre",
                "theater", "musical", "symphony", "orchestra", "tribute", "ballet", "opera",
                "broadway", "the musical", "live in concert", "dj",
            ]),
            sports_categories: owned(&[
                "sports", "baseball", "football", "basketball", "hockey", "soccer", "boxing",
                "fighting", "mma", "golf", "tennis", "racing", "wrestling",
            ]),
            non_sports_categories: owned(&[
                "concerts", "theater", "theatre", "comedy", "family", "festivals", "classical",
            ]),
        }
    }
}

/// Whether a classified event belongs in a sports result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Sports,
    NonSports,
    Unclassified,
}

#[derive(Debug, Clone, Default)]
pub struct SportsClassifier {
    config: ClassifierConfig,
}

impl SportsClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Classifies `event`; `team_terms` are team names that count as sports patterns.
    pub fn classify(&self, event: &Event, team_terms: &[String]) -> EventKind {
        let name = normalize(&event.name);
        let categories = event
            .category_names()
            .into_iter()
            .map(normalize)
            .collect::<Vec<_>>();

        let in_categories = |terms: &[String]| {
            categories
                .iter()
                .any(|category| terms.iter().any(|term| contains_term(category, term)))
        };
        let in_name = |terms: &[String]| terms.iter().any(|term| contains_term(&name, term));

        if in_categories(&self.config.non_sports_categories) {
            return EventKind::NonSports;
        }
        // "PGA Tour" and "ATP Tour" carry a non-sports word but a sports category.
        if in_categories(&self.config.sports_categories) {
            return EventKind::Sports;
        }
        if in_name(&self.config.non_sports_terms) {
            return EventKind::NonSports;
        }
        if in_name(&self.config.sports_terms) || in_name(team_terms) {
            return EventKind::Sports;
        }
        EventKind::Unclassified
    }

    pub fn is_sports(&self, event: &Event, team_terms: &[String]) -> bool {
        self.classify(event, team_terms) == EventKind::Sports
    }
}
