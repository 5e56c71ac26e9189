//! Versioned reference lookup table.
//!
//! Built once at startup from the compiled-in records plus any number of dataset
//! files, then frozen behind an `Arc` and handed to the resolver.
//!
//! Dataset files are JSON, either `{"version": 3, "records": [...]}` or a bare
//! array of records. A record whose `key` is already known patches it:
//! coordinates, marketplace ids, venue name and display name are overridden
//! when present, while variations and city aliases only ever accumulate.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::builtin;
use super::record::{League, TeamRecord};
use crate::error::ReferenceError;
use crate::text::normalize;

/// One record as it appears in a dataset file. Only `key` is mandatory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordPatch {
    pub key: String,
    pub league: Option<League>,
    pub name: Option<String>,
    pub city: Option<String>,
    pub venue_name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub venue_id: Option<u64>,
    pub performer_id: Option<u64>,
    pub variations: Vec<String>,
    pub city_aliases: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DatasetFile {
    Versioned {
        #[serde(default)]
        version: Option<u64>,
        records: Vec<RecordPatch>,
    },
    Bare(Vec<RecordPatch>),
}

/// Counts from one merge, for logging and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    pub added: usize,
    pub updated: usize,
    pub skipped: usize,
}

/// Mutable accumulator used only while the table is being assembled.
#[derive(Debug, Clone, Default)]
pub struct ReferenceDataBuilder {
    records: Vec<TeamRecord>,
    index: HashMap<String, usize>,
    sources: u32,
}

impl ReferenceDataBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from the compiled-in table (counted as the first source).
    pub fn with_builtin() -> Self {
        let mut builder = Self::new();
        for record in builtin::records() {
            builder.index.insert(record.key.clone(), builder.records.len());
            builder.records.push(record);
        }
        builder.sources = 1;
        builder
    }

    /// Merges one source's records, later sources winning on scalar fields.
    pub fn merge(&mut self, patches: Vec<RecordPatch>) -> MergeStats {
        let mut stats = MergeStats::default();
        for patch in patches {
            let key = canonical_key(&patch.key);
            if key.is_empty() {
                warn!("skipping reference record without a key");
                stats.skipped += 1;
                continue;
            }

            match self.index.get(&key) {
                Some(&position) => {
                    apply_patch(&mut self.records[position], &patch);
                    stats.updated += 1;
                }
                None => match new_record(key.clone(), &patch) {
                    Some(record) => {
                        self.index.insert(key, self.records.len());
                        self.records.push(record);
                        stats.added += 1;
                    }
                    None => {
                        warn!(
                            key = %key,
                            "skipping new reference record missing league, city, venue or coordinates"
                        );
                        stats.skipped += 1;
                    }
                },
            }
        }
        self.sources += 1;
        stats
    }

    /// Parses and merges a dataset document.
    pub fn merge_json(&mut self, origin: &str, json: &str) -> Result<MergeStats, ReferenceError> {
        let file: DatasetFile =
            serde_json::from_str(json).map_err(|source| ReferenceError::Parse {
                path: origin.to_owned(),
                source,
            })?;
        let (declared_version, patches) = match file {
            DatasetFile::Versioned { version, records } => (version, records),
            DatasetFile::Bare(records) => (None, records),
        };

        let stats = self.merge(patches);
        info!(
            origin,
            declared_version,
            added = stats.added,
            updated = stats.updated,
            skipped = stats.skipped,
            "merged reference dataset"
        );
        Ok(stats)
    }

    /// Reads and merges a dataset file. A missing file is not an error.
    pub fn merge_file(&mut self, path: &Path) -> Result<Option<MergeStats>, ReferenceError> {
        let origin = path.display().to_string();
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %origin, "reference dataset not found, using built-in records only");
                return Ok(None);
            }
            Err(source) => return Err(ReferenceError::Io { path: origin, source }),
        };
        self.merge_json(&origin, &json).map(Some)
    }

    pub fn build(self) -> Arc<ReferenceData> {
        Arc::new(ReferenceData {
            version: self.sources,
            records: self.records,
            index: self.index,
        })
    }
}

/// Frozen team/venue table.
#[derive(Debug, Clone)]
pub struct ReferenceData {
    version: u32,
    records: Vec<TeamRecord>,
    index: HashMap<String, usize>,
}

impl ReferenceData {
    /// Compiled-in records only.
    pub fn builtin() -> Arc<Self> {
        ReferenceDataBuilder::with_builtin().build()
    }

    /// Compiled-in records plus `path`, if given and present.
    pub fn load(path: Option<&Path>) -> Result<Arc<Self>, ReferenceError> {
        let mut builder = ReferenceDataBuilder::with_builtin();
        if let Some(path) = path {
            builder.merge_file(path)?;
        }
        Ok(builder.build())
    }

    /// Number of sources merged into this table.
    pub const fn version(&self) -> u32 {
        self.version
    }

    pub fn records(&self) -> &[TeamRecord] {
        &self.records
    }

    pub fn get(&self, key: &str) -> Option<&TeamRecord> {
        self.index
            .get(&canonical_key(key))
            .and_then(|&position| self.records.get(position))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn canonical_key(key: &str) -> String {
    normalize(key).replace(' ', "_")
}

fn apply_patch(record: &mut TeamRecord, patch: &RecordPatch) {
    if let Some(name) = &patch.name {
        record.name = name.clone();
        record.add_variation(name);
    }
    if let Some(venue_name) = &patch.venue_name {
        record.venue_name = venue_name.clone();
    }
    if let (Some(latitude), Some(longitude)) = (patch.latitude, patch.longitude) {
        record.latitude = latitude;
        record.longitude = longitude;
    }
    if patch.venue_id.is_some() {
        record.venue_id = patch.venue_id;
    }
    if patch.performer_id.is_some() {
        record.performer_id = patch.performer_id;
    }
    for variation in &patch.variations {
        record.add_variation(variation);
    }
    for alias in &patch.city_aliases {
        record.add_city_alias(alias);
    }
}

fn new_record(key: String, patch: &RecordPatch) -> Option<TeamRecord> {
    let name = patch
        .name
        .clone()
        .or_else(|| patch.variations.first().cloned())
        .unwrap_or_else(|| key.replace('_', " "));
    let city = patch.city.clone()?;

    let mut record = TeamRecord {
        league: patch.league?,
        venue_name: patch.venue_name.clone()?,
        latitude: patch.latitude?,
        longitude: patch.longitude?,
        venue_id: patch.venue_id,
        performer_id: patch.performer_id,
        variations: Vec::new(),
        city_aliases: Vec::new(),
        key,
        name,
        city,
    };
    let name = record.name.clone();
    record.add_variation(&name);
    for variation in &patch.variations {
        record.add_variation(variation);
    }
    let city = record.city.clone();
    record.add_city_alias(&city);
    for alias in &patch.city_aliases {
        record.add_city_alias(alias);
    }
    Some(record)
}
