use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use super::event::null_as_default;

/// What a ticket group grants entry to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketType {
    #[default]
    Event,
    Parking,
    #[serde(other)]
    Other,
}

/// One purchasable block of seats, as listed at query time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketGroup {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub section: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub row: String,
    #[serde(alias = "available_quantity")]
    pub quantity: u32,
    /// Quantities the seller allows a buyer to take. Empty means any.
    #[serde(default, deserialize_with = "null_as_default")]
    pub splits: Vec<u32>,
    pub retail_price: f64,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(rename = "type", default)]
    pub ticket_type: TicketType,
    #[serde(default, deserialize_with = "null_as_default")]
    pub wheelchair: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub instant_delivery: bool,
}

impl TicketGroup {
    /// Parking passes are flagged by type, and some sellers only say so in the section name.
    pub fn is_parking(&self) -> bool {
        if self.ticket_type == TicketType::Parking {
            return true;
        }
        let section = self.section.to_ascii_lowercase();
        section
            .split(|c: char| !c.is_ascii_alphanumeric())
            .any(|word| matches!(word, "parking" | "lot" | "garage"))
    }

    pub fn allows_quantity(&self, quantity: u32) -> bool {
        self.quantity >= quantity && (self.splits.is_empty() || self.splits.contains(&quantity))
    }
}

/// Listings response: the marketplace calls them ticket groups.
///
/// Rows are decoded one at a time. A row without a usable price or quantity is
/// dropped and counted in `skipped`, so one bad row never loses the rest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawListingsPage")]
pub struct ListingsPage {
    pub ticket_groups: Vec<TicketGroup>,
    #[serde(skip_serializing)]
    pub skipped: usize,
}

#[derive(Deserialize)]
struct RawListingsPage {
    #[serde(default, alias = "listings", deserialize_with = "null_as_default")]
    ticket_groups: Vec<Value>,
}

impl From<RawListingsPage> for ListingsPage {
    fn from(raw: RawListingsPage) -> Self {
        let mut page = Self::default();
        for row in raw.ticket_groups {
            let id = row.get("id").cloned();
            match serde_json::from_value::<TicketGroup>(row) {
                Ok(group) if group.retail_price.is_finite() && group.retail_price >= 0.0 => {
                    page.ticket_groups.push(group);
                }
                Ok(group) => {
                    warn!(?id, price = group.retail_price, "skipping ticket group with unusable price");
                    page.skipped += 1;
                }
                Err(error) => {
                    warn!(?id, %error, "skipping undecodable ticket group");
                    page.skipped += 1;
                }
            }
        }
        page
    }
}

/// A ticket group annotated for a specific requested quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedOption {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub section: String,
    pub row: String,
    pub price_per_ticket: f64,
    pub total_cost: f64,
    pub available_quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    pub wheelchair: bool,
    pub instant_delivery: bool,
}

impl RankedOption {
    pub fn from_group(group: &TicketGroup, quantity: u32) -> Self {
        Self {
            id: group.id,
            section: group.section.clone(),
            row: group.row.clone(),
            price_per_ticket: group.retail_price,
            total_cost: round_cents(group.retail_price * f64::from(quantity)),
            available_quantity: group.quantity,
            format: group.format.clone(),
            wheelchair: group.wheelchair,
            instant_delivery: group.instant_delivery,
        }
    }
}

fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
