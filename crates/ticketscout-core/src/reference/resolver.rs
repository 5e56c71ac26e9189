//! Free-text team/venue resolution over the reference table.
//!
//! Pure lookup: no network, no mutation. A query token set is scored against each
//! record's name variations and city aliases (score = fraction of query tokens
//! present). A record is a *team match* when every non-city token of one of its
//! variations is in the query, and a *city match* when one of its city aliases is.
//! Team matches only compete when their nicknames cover the same query words, so
//! "White Sox at Red Sox" names two teams while "Giants" alone names either of two.

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::dataset::ReferenceData;
use super::record::{League, TeamRecord};
use crate::text::tokens;

const SCORE_EPSILON: f64 = 1e-9;

/// Tunable matching parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Minimum fraction of (non stop word) query tokens a record must cover.
    pub min_score: f64,
    pub stop_words: Vec<String>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            min_score: 0.1,
            stop_words: [
                "tickets", "ticket", "tix", "vs", "versus", "v", "at", "game", "games", "the",
                "a", "an", "for", "in", "on", "and", "match", "matchup", "play", "playing",
                "plays", "tonight", "today", "tomorrow", "this", "next", "weekend", "week",
                "cheap", "best", "seats", "find", "me", "show",
            ]
            .iter()
            .map(|word| (*word).to_owned())
            .collect(),
        }
    }
}

/// A record selected by the resolver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMatch {
    pub record: TeamRecord,
    pub score: f64,
    /// The query also named this record's city.
    pub city_qualified: bool,
    #[serde(skip)]
    nickname: Vec<String>,
}

impl TeamMatch {
    /// The non-city words the query matched this record by, e.g. "red sox".
    pub fn nickname(&self) -> String {
        self.nickname.join(" ")
    }
}

/// Team offered back to the caller when the query is ambiguous.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub key: String,
    pub name: String,
    pub league: League,
    pub city: String,
    pub venue_name: String,
}

impl From<&TeamRecord> for Candidate {
    fn from(record: &TeamRecord) -> Self {
        Self {
            key: record.key.clone(),
            name: record.name.clone(),
            league: record.league,
            city: record.city.clone(),
            venue_name: record.venue_name.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    /// Matched records in query order.
    pub matches: Vec<TeamMatch>,
    /// The query does not single out the records it refers to.
    pub ambiguous: bool,
    /// Teams sharing the city of a city-only query.
    pub city_candidates: Vec<Candidate>,
    /// Some matched record's city was named in the query.
    pub city_qualified: bool,
}

impl Resolution {
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty() && self.city_candidates.is_empty()
    }

    /// Records the caller must choose between, when ambiguous.
    pub fn candidates(&self) -> Vec<Candidate> {
        if !self.city_candidates.is_empty() {
            return self.city_candidates.clone();
        }
        self.matches
            .iter()
            .map(|team_match| Candidate::from(&team_match.record))
            .collect()
    }

    pub fn records(&self) -> impl Iterator<Item = &TeamRecord> {
        self.matches.iter().map(|team_match| &team_match.record)
    }
}

struct Hit<'a> {
    record: &'a TeamRecord,
    score: f64,
    nickname: Vec<String>,
    /// Query word positions the nickname occupies.
    span: Vec<usize>,
    position: usize,
    city_qualified: bool,
}

/// Resolves free text against a shared, immutable [`ReferenceData`].
#[derive(Debug, Clone)]
pub struct Resolver {
    data: Arc<ReferenceData>,
    config: ResolverConfig,
}

impl Resolver {
    pub fn new(data: Arc<ReferenceData>, config: ResolverConfig) -> Self {
        Self { data, config }
    }

    pub fn data(&self) -> &ReferenceData {
        &self.data
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn resolve(&self, query: &str) -> Resolution {
        let sequence = self.query_sequence(query);
        let query_tokens = dedup(&sequence);
        if query_tokens.is_empty() {
            return Resolution::default();
        }

        let mut team_hits = Vec::new();
        let mut city_hits = Vec::new();
        for record in self.data.records() {
            if let Some(hit) = self.team_hit(record, &query_tokens, &sequence) {
                team_hits.push(hit);
            } else if let Some(hit) = self.city_hit(record, &query_tokens) {
                city_hits.push(hit);
            }
        }

        let resolution = if team_hits.is_empty() {
            Self::resolve_city(city_hits)
        } else {
            Self::resolve_teams(team_hits)
        };

        debug!(
            query,
            matches = resolution.matches.len(),
            ambiguous = resolution.ambiguous,
            city_candidates = resolution.city_candidates.len(),
            "resolved query"
        );
        resolution
    }

    /// Query words in order, stop words removed, repeats kept.
    fn query_sequence(&self, query: &str) -> Vec<String> {
        tokens(query)
            .into_iter()
            .filter(|token| !self.config.stop_words.contains(token))
            .collect()
    }

    fn team_hit<'a>(
        &self,
        record: &'a TeamRecord,
        query: &[String],
        sequence: &[String],
    ) -> Option<Hit<'a>> {
        let city_tokens = record.city_tokens();
        let mut best: Option<Hit<'a>> = None;

        for variation in &record.variations {
            let variation_tokens = tokens(variation);
            let nickname = variation_tokens
                .iter()
                .filter(|token| !city_tokens.contains(token))
                .cloned()
                .collect::<Vec<_>>();
            if nickname.is_empty() || !nickname.iter().all(|token| query.contains(token)) {
                continue;
            }

            let covered = query
                .iter()
                .filter(|token| variation_tokens.contains(token) || city_tokens.contains(token))
                .count();
            let score = fraction(covered, query.len());
            let better = best.as_ref().map_or(true, |current| {
                score > current.score + SCORE_EPSILON
                    || ((score - current.score).abs() <= SCORE_EPSILON
                        && nickname.len() > current.nickname.len())
            });
            if better {
                let span = locate(&nickname, sequence);
                let position = span.iter().copied().min().unwrap_or(usize::MAX);
                best = Some(Hit {
                    record,
                    score,
                    nickname,
                    span,
                    position,
                    city_qualified: names_city(record, query),
                });
            }
        }

        best.filter(|hit| hit.score + SCORE_EPSILON >= self.config.min_score)
    }

    fn city_hit<'a>(&self, record: &'a TeamRecord, query: &[String]) -> Option<Hit<'a>> {
        if !record.league.is_team() {
            return None;
        }
        let (covered, position) = record
            .city_aliases
            .iter()
            .map(|alias| tokens(alias))
            .filter(|alias| !alias.is_empty() && alias.iter().all(|token| query.contains(token)))
            .map(|alias| {
                let position = alias
                    .iter()
                    .filter_map(|token| query.iter().position(|candidate| candidate == token))
                    .min()
                    .unwrap_or(usize::MAX);
                (alias.len(), position)
            })
            .max_by_key(|(covered, _)| *covered)?;

        let score = fraction(covered, query.len());
        (score + SCORE_EPSILON >= self.config.min_score).then(|| Hit {
            record,
            score,
            nickname: Vec::new(),
            span: Vec::new(),
            position,
            city_qualified: true,
        })
    }

    fn resolve_city(hits: Vec<Hit<'_>>) -> Resolution {
        match hits.len() {
            0 => Resolution::default(),
            1 => {
                let matches = hits.into_iter().map(into_match).collect::<Vec<_>>();
                Resolution {
                    matches,
                    ambiguous: false,
                    city_candidates: Vec::new(),
                    city_qualified: true,
                }
            }
            _ => Resolution {
                matches: Vec::new(),
                ambiguous: true,
                city_candidates: hits.iter().map(|hit| Candidate::from(hit.record)).collect(),
                city_qualified: true,
            },
        }
    }

    fn resolve_teams(hits: Vec<Hit<'_>>) -> Resolution {
        // Records whose nicknames claim the same query words compete with each other.
        let mut groups: Vec<Vec<Hit<'_>>> = Vec::new();
        for hit in hits {
            let overlapping = groups
                .iter()
                .enumerate()
                .filter(|(_, group)| group.iter().any(|member| claims_same_words(member, &hit)))
                .map(|(index, _)| index)
                .collect::<Vec<_>>();

            let mut merged = vec![hit];
            for index in overlapping.into_iter().rev() {
                merged.extend(groups.remove(index));
            }
            groups.push(merged);
        }

        let mut resolved = Vec::new();
        let mut contested = Vec::new();
        for group in groups {
            let top = group
                .iter()
                .map(|hit| hit.score)
                .fold(f64::MIN, f64::max);
            let winners = group
                .into_iter()
                .filter(|hit| (hit.score - top).abs() <= SCORE_EPSILON)
                .collect::<Vec<_>>();
            if winners.len() == 1 {
                resolved.extend(winners);
            } else {
                contested.push(winners);
            }
        }

        let settled_leagues = resolved
            .iter()
            .map(|hit| hit.record.league)
            .collect::<HashSet<_>>();
        let mut ambiguous = false;
        for winners in contested {
            let (preferred, others): (Vec<_>, Vec<_>) = winners
                .into_iter()
                .partition(|hit| settled_leagues.contains(&hit.record.league));
            match preferred.len() {
                1 => resolved.extend(preferred),
                0 => {
                    ambiguous = true;
                    resolved.extend(others);
                }
                _ => {
                    ambiguous = true;
                    resolved.extend(preferred);
                }
            }
        }

        resolved.sort_by(|left, right| {
            left.position
                .cmp(&right.position)
                .then(right.score.total_cmp(&left.score))
                .then_with(|| left.record.key.cmp(&right.record.key))
        });
        let city_qualified = resolved.iter().any(|hit| hit.city_qualified);

        Resolution {
            matches: resolved.into_iter().map(into_match).collect(),
            ambiguous,
            city_candidates: Vec::new(),
            city_qualified,
        }
    }
}

fn into_match(hit: Hit<'_>) -> TeamMatch {
    TeamMatch {
        record: hit.record.clone(),
        score: hit.score,
        city_qualified: hit.city_qualified,
        nickname: hit.nickname,
    }
}

fn claims_same_words(left: &Hit<'_>, right: &Hit<'_>) -> bool {
    left.span.iter().any(|position| right.span.contains(position))
}

fn dedup(sequence: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    sequence
        .iter()
        .filter(|token| seen.insert(token.as_str()))
        .cloned()
        .collect()
}

/// Positions of `nickname` in `sequence`: its first contiguous occurrence, or else
/// the first position of each word when the words are scattered.
fn locate(nickname: &[String], sequence: &[String]) -> Vec<usize> {
    if !nickname.is_empty() {
        if let Some(start) = sequence
            .windows(nickname.len())
            .position(|window| window == nickname)
        {
            return (start..start + nickname.len()).collect();
        }
    }
    nickname
        .iter()
        .filter_map(|token| sequence.iter().position(|candidate| candidate == token))
        .collect()
}

fn names_city(record: &TeamRecord, query: &[String]) -> bool {
    record.city_aliases.iter().any(|alias| {
        let alias = tokens(alias);
        !alias.is_empty() && alias.iter().all(|token| query.contains(token))
    })
}

fn fraction(covered: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    covered as f64 / total as f64
}
