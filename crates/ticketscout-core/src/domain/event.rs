use serde::{Deserialize, Deserializer, Serialize};

use super::Timestamp;

/// Venue as embedded in marketplace event payloads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, alias = "locality")]
    pub city: Option<String>,
    #[serde(default, alias = "region")]
    pub state: Option<String>,
    #[serde(default, alias = "lat")]
    pub latitude: Option<f64>,
    #[serde(default, alias = "lon")]
    pub longitude: Option<f64>,
}

/// Marketplace category, with its parent chain (e.g. "Baseball" → "Sports").
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub parent: Option<Box<Category>>,
}

impl Category {
    /// This category's name followed by every ancestor's.
    pub fn lineage(&self) -> Vec<&str> {
        let mut names = vec![self.name.as_str()];
        let mut current = self.parent.as_deref();
        while let Some(category) = current {
            names.push(category.name.as_str());
            current = category.parent.as_deref();
        }
        names
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Performer {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Performance {
    #[serde(default)]
    pub primary: bool,
    pub performer: Performer,
}

/// Marketplace event. Never mutated after decoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub occurs_at: Option<String>,
    #[serde(default)]
    pub venue: Option<Venue>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub performances: Vec<Performance>,
}

impl Event {
    pub fn occurs_at(&self) -> Option<Timestamp> {
        self.occurs_at.as_deref().and_then(Timestamp::parse)
    }

    pub fn venue_id(&self) -> Option<u64> {
        self.venue.as_ref().and_then(|venue| venue.id)
    }

    pub fn category_names(&self) -> Vec<&str> {
        self.category
            .as_ref()
            .map(Category::lineage)
            .unwrap_or_default()
    }
}

/// Page of events as returned by `/events` and `/events/search`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventPage {
    #[serde(default)]
    pub current_page: Option<u32>,
    #[serde(default)]
    pub per_page: Option<u32>,
    #[serde(default)]
    pub total_entries: Option<u64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub events: Vec<Event>,
}

pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
