//! # Team/Venue Reference
//!
//! | Type | Description |
//! |------|-------------|
//! | [`TeamRecord`] | One team or venue: league, city, venue, coordinates, optional marketplace ids |
//! | [`ReferenceDataBuilder`] | Merges the compiled-in table with dataset files |
//! | [`ReferenceData`] | Frozen, versioned lookup table shared via `Arc` |
//! | [`Resolver`] | Free text → [`Resolution`] (matches, ambiguity, city candidates) |

mod builtin;
mod dataset;
mod record;
mod resolver;

pub use dataset::{MergeStats, RecordPatch, ReferenceData, ReferenceDataBuilder};
pub use record::{League, TeamRecord};
pub use resolver::{Candidate, Resolution, Resolver, ResolverConfig, TeamMatch};
