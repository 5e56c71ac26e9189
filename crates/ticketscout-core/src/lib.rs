//! # Ticketscout Core
//!
//! Ticket-marketplace search engine: signed API access, caching, team resolution
//! and a multi-strategy event finder.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`cache`] | TTL and request-scoped response cache |
//! | [`catalog`] | Typed marketplace operations on top of the client |
//! | [`classify`] | Sports / non-sports event classifier |
//! | [`client`] | Signed marketplace client with retries |
//! | [`config`] | Environment-driven configuration |
//! | [`domain`] | Events, venues, ticket groups, timestamps |
//! | [`error`] | Error types |
//! | [`finder`] | Natural-language event finder |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`listings`] | Listing filter and ranker |
//! | [`reference`] | Team/venue reference data and resolver |
//! | [`retry`] | Backoff policy and retry loop |
//! | [`signer`] | Canonical request signing |
//! | [`text`] | Text normalization helpers |
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  CLI / Agent    │
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │  EventFinder    │────▶│ Resolver         │
//! └────────┬────────┘     │ + ReferenceData  │
//!          │              └──────────────────┘
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │  Catalog        │────▶│ CacheStore       │
//! └────────┬────────┘     └──────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ MarketplaceClient────▶│ HttpClient       │
//! │ (sign + retry)  │     │ (reqwest)        │
//! └─────────────────┘     └──────────────────┘
//! ```

pub mod cache;
pub mod catalog;
pub mod classify;
pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod finder;
pub mod http_client;
pub mod listings;
pub mod reference;
pub mod retry;
pub mod signer;
pub mod text;

pub use cache::{CacheKey, CacheStore, DEFAULT_TTL};
pub use catalog::{Catalog, EventQuery, DEFAULT_PER_PAGE};
pub use classify::{ClassifierConfig, EventKind, SportsClassifier};
pub use client::MarketplaceClient;
pub use config::{Environment, MarketplaceConfig};
pub use domain::*;
pub use error::{ConfigError, MarketplaceError, ReferenceError};
pub use finder::{
    EventFinder, FindReport, FindRequest, FindStatus, FinderConfig, FoundEvent, StrategyError,
    StrategyKind, StrategyReport, TicketSummary,
};
pub use http_client::{
    HttpClient, HttpError, HttpErrorKind, HttpMethod, HttpRequest, HttpResponse,
    ReqwestHttpClient,
};
pub use listings::{
    filter_and_rank, CriteriaApplied, FilterOutcome, ListingCriteria, SortOrder,
    DEFAULT_RETURN_TOP,
};
pub use reference::{
    Candidate, League, MergeStats, RecordPatch, ReferenceData, ReferenceDataBuilder, Resolution,
    Resolver, ResolverConfig, TeamMatch, TeamRecord,
};
pub use retry::{Backoff, RetryPolicy};
pub use signer::{CanonicalRequest, QueryParams, RequestSigner};
