use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::text::{contains_term, normalize, tokens};

/// League a reference record belongs to. Venue records stand on their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum League {
    Mlb,
    Nfl,
    Nba,
    Nhl,
    Mls,
    Wnba,
    Venue,
}

impl League {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mlb => "MLB",
            Self::Nfl => "NFL",
            Self::Nba => "NBA",
            Self::Nhl => "NHL",
            Self::Mls => "MLS",
            Self::Wnba => "WNBA",
            Self::Venue => "VENUE",
        }
    }

    pub const fn is_team(self) -> bool {
        !matches!(self, Self::Venue)
    }
}

impl Display for League {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One team or venue in the static lookup table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamRecord {
    /// Canonical lowercase id, e.g. `new_york_yankees`.
    pub key: String,
    pub league: League,
    pub name: String,
    pub city: String,
    pub venue_name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub venue_id: Option<u64>,
    #[serde(default)]
    pub performer_id: Option<u64>,
    /// Normalized names this record is known by, the full name first.
    #[serde(default)]
    pub variations: Vec<String>,
    /// Normalized names of the record's city.
    #[serde(default)]
    pub city_aliases: Vec<String>,
}

impl TeamRecord {
    /// Tokens appearing in any city alias (or the city itself).
    pub fn city_tokens(&self) -> Vec<String> {
        let mut city_tokens = tokens(&self.city);
        for alias in &self.city_aliases {
            for token in tokens(alias) {
                if !city_tokens.contains(&token) {
                    city_tokens.push(token);
                }
            }
        }
        city_tokens
    }

    /// Each variation reduced to its non-city tokens ("new york yankees" → ["yankees"]).
    /// Variations made only of city words are skipped.
    pub fn nickname_sets(&self) -> Vec<Vec<String>> {
        let city_tokens = self.city_tokens();
        self.variations
            .iter()
            .map(|variation| {
                tokens(variation)
                    .into_iter()
                    .filter(|token| !city_tokens.contains(token))
                    .collect::<Vec<_>>()
            })
            .filter(|nickname| !nickname.is_empty())
            .collect()
    }

    /// Whether `text` names this record by one of its nicknames.
    pub fn is_named_in(&self, text: &str) -> bool {
        let text = normalize(text);
        self.nickname_sets()
            .iter()
            .any(|nickname| contains_term(&text, &nickname.join(" ")))
    }

    /// Adds `variation` unless an equal normalized form is already present.
    pub(crate) fn add_variation(&mut self, variation: &str) {
        push_unique(&mut self.variations, variation);
    }

    pub(crate) fn add_city_alias(&mut self, alias: &str) {
        push_unique(&mut self.city_aliases, alias);
    }
}

fn push_unique(values: &mut Vec<String>, value: &str) {
    let normalized = normalize(value);
    if !normalized.is_empty() && !values.contains(&normalized) {
        values.push(normalized);
    }
}
