//! # ticketscout-agent
//!
//! Tool dispatch layer: the named operations a calling agent can invoke, each
//! taking a JSON parameter object and answering with a JSON envelope.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`envelope`] | Success / error envelope with request id and latency |
//! | [`error`] | Tool-level error codes |
//! | [`params`] | Parameter objects, bounds and conversion to core requests |
//! | [`registry`] | Operation names and dispatch |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ticketscout_agent::ToolRegistry;
//! use serde_json::json;
//!
//! let registry = ToolRegistry::new(catalog, finder);
//! let envelope = registry
//!     .dispatch("find_events", json!({ "query": "Yankees", "budget_per_ticket": 150 }))
//!     .await;
//! println!("{}", serde_json::to_string(&envelope)?);
//! ```

pub mod envelope;
pub mod error;
pub mod params;
pub mod registry;

pub use envelope::{ErrorBody, RequestId, ToolEnvelope};
pub use error::ToolError;
pub use params::{
    EventIdParams, FilterListingsParams, FindEventsParams, ListEventsParams, SuggestParams,
};
pub use registry::{Operation, OperationDescriptor, ToolRegistry};
