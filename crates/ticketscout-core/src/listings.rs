//! Listing filter and ranker.
//!
//! Turns the flat ticket-group list of one event into a short, budget-correct,
//! ordered recommendation set, and reports which filters produced it so callers
//! can tell "no tickets exist" apart from "filters excluded everything".

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::domain::{RankedOption, TicketGroup};

pub const DEFAULT_RETURN_TOP: usize = 5;

/// Ordering applied to eligible ticket groups. Ties keep listing order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    PriceAsc,
    PriceDesc,
    SectionAsc,
    QuantityDesc,
}

impl SortOrder {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PriceAsc => "price_asc",
            Self::PriceDesc => "price_desc",
            Self::SectionAsc => "section_asc",
            Self::QuantityDesc => "quantity_desc",
        }
    }

    fn compare(self, left: &TicketGroup, right: &TicketGroup) -> Ordering {
        match self {
            Self::PriceAsc => left.retail_price.total_cmp(&right.retail_price),
            Self::PriceDesc => right.retail_price.total_cmp(&left.retail_price),
            Self::SectionAsc => compare_sections(&left.section, &right.section),
            Self::QuantityDesc => right.quantity.cmp(&left.quantity),
        }
    }
}

/// Eligibility and ranking criteria for one listing request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingCriteria {
    pub quantity: u32,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    pub include_parking: bool,
    pub section: Option<String>,
    pub row: Option<String>,
    pub format: Option<String>,
    pub wheelchair: Option<bool>,
    pub instant_delivery: Option<bool>,
    /// Numeric prefix of the section, e.g. "1" for the 100 level.
    pub section_pattern: Option<String>,
    pub sort: SortOrder,
    pub return_top: usize,
}

impl Default for ListingCriteria {
    fn default() -> Self {
        Self {
            quantity: 1,
            price_min: None,
            price_max: None,
            include_parking: false,
            section: None,
            row: None,
            format: None,
            wheelchair: None,
            instant_delivery: None,
            section_pattern: None,
            sort: SortOrder::default(),
            return_top: DEFAULT_RETURN_TOP,
        }
    }
}

impl ListingCriteria {
    pub fn for_quantity(quantity: u32) -> Self {
        Self {
            quantity,
            ..Self::default()
        }
    }

    pub fn with_price_max(mut self, price_max: f64) -> Self {
        self.price_max = Some(price_max);
        self
    }

    pub fn with_section_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.section_pattern = Some(pattern.into());
        self
    }

    pub fn with_return_top(mut self, return_top: usize) -> Self {
        self.return_top = return_top;
        self
    }

    fn requested_quantity(&self) -> u32 {
        self.quantity.max(1)
    }

    fn accepts(&self, group: &TicketGroup) -> bool {
        if !group.allows_quantity(self.requested_quantity()) {
            return false;
        }
        if self.price_min.is_some_and(|min| group.retail_price < min) {
            return false;
        }
        if self.price_max.is_some_and(|max| group.retail_price > max) {
            return false;
        }
        if !self.include_parking && group.is_parking() {
            return false;
        }
        if !matches_exact(self.section.as_deref(), &group.section)
            || !matches_exact(self.row.as_deref(), &group.row)
            || !matches_exact(self.format.as_deref(), group.format.as_deref().unwrap_or_default())
        {
            return false;
        }
        if self.wheelchair.is_some_and(|wanted| group.wheelchair != wanted) {
            return false;
        }
        if self
            .instant_delivery
            .is_some_and(|wanted| group.instant_delivery != wanted)
        {
            return false;
        }
        match self.section_pattern.as_deref().map(str::trim) {
            Some(pattern) if !pattern.is_empty() => section_matches_pattern(&group.section, pattern),
            _ => true,
        }
    }

    /// Human-readable list of the filters that are actually set.
    pub fn describe_filters(&self) -> Vec<String> {
        let mut filters = vec![format!("quantity>={}", self.requested_quantity())];
        if let Some(min) = self.price_min {
            filters.push(format!("price_min>={min}"));
        }
        if let Some(max) = self.price_max {
            filters.push(format!("price_max<={max}"));
        }
        if !self.include_parking {
            filters.push(String::from("exclude_parking"));
        }
        if let Some(section) = non_blank(self.section.as_deref()) {
            filters.push(format!("section={section}"));
        }
        if let Some(row) = non_blank(self.row.as_deref()) {
            filters.push(format!("row={row}"));
        }
        if let Some(format) = non_blank(self.format.as_deref()) {
            filters.push(format!("format={format}"));
        }
        if let Some(wheelchair) = self.wheelchair {
            filters.push(format!("wheelchair={wheelchair}"));
        }
        if let Some(instant) = self.instant_delivery {
            filters.push(format!("instant_delivery={instant}"));
        }
        if let Some(pattern) = non_blank(self.section_pattern.as_deref()) {
            filters.push(format!("section_pattern={pattern}"));
        }
        filters
    }
}

/// What was filtered, and how much survived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriteriaApplied {
    /// Every row the marketplace returned, unusable ones included.
    pub total_listings: usize,
    /// Rows dropped before filtering for lacking a usable price or quantity.
    #[serde(default)]
    pub unusable_listings: usize,
    pub eligible_listings: usize,
    pub returned: usize,
    pub sort: SortOrder,
    pub filters_applied: Vec<String>,
}

impl CriteriaApplied {
    pub fn record_unusable(&mut self, count: usize) {
        self.total_listings += count;
        self.unusable_listings += count;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterOutcome {
    pub options: Vec<RankedOption>,
    pub criteria_applied: CriteriaApplied,
}

impl FilterOutcome {
    pub fn lowest_price(&self) -> Option<f64> {
        self.options
            .iter()
            .map(|option| option.price_per_ticket)
            .min_by(f64::total_cmp)
    }
}

/// Filters `groups` by `criteria`, sorts the survivors stably, and keeps the top `return_top`.
pub fn filter_and_rank(groups: &[TicketGroup], criteria: &ListingCriteria) -> FilterOutcome {
    let mut eligible = groups
        .iter()
        .filter(|group| criteria.accepts(group))
        .collect::<Vec<_>>();
    let eligible_listings = eligible.len();

    eligible.sort_by(|left, right| criteria.sort.compare(left, right));

    let quantity = criteria.requested_quantity();
    let options = eligible
        .into_iter()
        .take(criteria.return_top)
        .map(|group| RankedOption::from_group(group, quantity))
        .collect::<Vec<_>>();

    FilterOutcome {
        criteria_applied: CriteriaApplied {
            total_listings: groups.len(),
            unusable_listings: 0,
            eligible_listings,
            returned: options.len(),
            sort: criteria.sort,
            filters_applied: criteria.describe_filters(),
        },
        options,
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

fn matches_exact(wanted: Option<&str>, actual: &str) -> bool {
    match non_blank(wanted) {
        Some(wanted) => wanted.eq_ignore_ascii_case(actual.trim()),
        None => true,
    }
}

/// Leading run of digits in a section label ("Section 112A" → "112").
fn leading_number(section: &str) -> Option<&str> {
    let start = section.find(|c: char| c.is_ascii_digit())?;
    let rest = &section[start..];
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    Some(&rest[..end])
}

fn section_matches_pattern(section: &str, pattern: &str) -> bool {
    if pattern.chars().all(|c| c.is_ascii_digit()) {
        return leading_number(section).is_some_and(|number| number.starts_with(pattern));
    }
    section
        .trim()
        .to_ascii_lowercase()
        .starts_with(&pattern.to_ascii_lowercase())
}

/// Numeric sections sort by value, everything else alphabetically after them.
fn compare_sections(left: &str, right: &str) -> Ordering {
    let parse = |section: &str| section.trim().parse::<u64>().ok();
    match (parse(left), parse(right)) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => left
            .to_ascii_lowercase()
            .cmp(&right.to_ascii_lowercase()),
    }
}
