//! CLI argument definitions for ticketscout.
//!
//! # Commands
//!
//! | Command | Tool operation |
//! |---------|----------------|
//! | `suggest` | `search_suggestions` |
//! | `events` | `list_events` |
//! | `event` | `get_event` |
//! | `listings` | `filter_listings` (or `get_listings` with `--raw`) |
//! | `find` | `find_events` |
//!
//! # Examples
//!
//! ```bash
//! ticketscout find "Giants Patriots" --budget 500 --pretty
//! ticketscout listings 2713448 --quantity 2 --max-price 150 --section-pattern 1
//! RUST_LOG=ticketscout_core=debug ticketscout find Yankees --date 2025-06-06
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(
    name = "ticketscout",
    author,
    version,
    about = "Search a ticket marketplace for events and the best seats within budget"
)]
pub struct Cli {
    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// JSON file of team/venue records merged over the built-in table.
    #[arg(long, global = true, env = "TICKETSCOUT_REFERENCE_DATA")]
    pub dataset: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Suggest performers, venues and events for a partial query.
    Suggest(SuggestArgs),
    /// List events by performer, venue, location and dates.
    Events(EventsArgs),
    /// Fetch one event.
    Event(EventArgs),
    /// Ranked ticket options for an event.
    Listings(ListingsArgs),
    /// Find events from a natural-language query.
    Find(FindArgs),
}

#[derive(Debug, Args)]
pub struct SuggestArgs {
    pub query: String,

    /// Comma-separated entity types, e.g. `events,performers`.
    #[arg(long)]
    pub entities: Option<String>,

    #[arg(long, default_value_t = 10)]
    pub limit: u32,
}

#[derive(Debug, Args)]
pub struct EventsArgs {
    #[arg(long)]
    pub performer_id: Option<u64>,
    #[arg(long)]
    pub venue_id: Option<u64>,
    #[arg(long)]
    pub category_id: Option<u64>,
    #[arg(long, allow_hyphen_values = true, requires = "lon")]
    pub lat: Option<f64>,
    #[arg(long, allow_hyphen_values = true, requires = "lat")]
    pub lon: Option<f64>,
    #[arg(long)]
    pub radius_miles: Option<u32>,
    /// Earliest start, `YYYY-MM-DD` or RFC3339.
    #[arg(long)]
    pub from: Option<String>,
    /// Latest start (exclusive).
    #[arg(long)]
    pub to: Option<String>,
    #[arg(long)]
    pub page: Option<u32>,
    #[arg(long)]
    pub per_page: Option<u32>,
}

#[derive(Debug, Args)]
pub struct EventArgs {
    pub event_id: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    PriceAsc,
    PriceDesc,
    SectionAsc,
    QuantityDesc,
}

impl SortArg {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PriceAsc => "price_asc",
            Self::PriceDesc => "price_desc",
            Self::SectionAsc => "section_asc",
            Self::QuantityDesc => "quantity_desc",
        }
    }
}

#[derive(Debug, Args)]
pub struct ListingsArgs {
    pub event_id: u64,

    /// Print every ticket group unfiltered.
    #[arg(long, default_value_t = false)]
    pub raw: bool,

    #[arg(long, default_value_t = 1)]
    pub quantity: u32,
    #[arg(long)]
    pub min_price: Option<f64>,
    #[arg(long)]
    pub max_price: Option<f64>,
    /// Leading section digits, e.g. `1` for the 100 level.
    #[arg(long)]
    pub section_pattern: Option<String>,
    #[arg(long, default_value_t = false)]
    pub include_parking: bool,
    #[arg(long, value_enum, default_value_t = SortArg::PriceAsc)]
    pub sort: SortArg,
    #[arg(long)]
    pub top: Option<usize>,
}

#[derive(Debug, Args)]
pub struct FindArgs {
    /// Free text, e.g. "Red Sox at Yankees".
    #[arg(required = true, num_args = 1..)]
    pub query: Vec<String>,

    /// `YYYY-MM-DD`.
    #[arg(long)]
    pub date: Option<String>,
    /// Search a week either side of `--date`.
    #[arg(long, default_value_t = false)]
    pub flexible: bool,
    /// Maximum price per ticket.
    #[arg(long)]
    pub budget: Option<f64>,
    #[arg(long, default_value_t = 1)]
    pub quantity: u32,
    #[arg(long)]
    pub max_events: Option<usize>,
    #[arg(long)]
    pub tickets_per_event: Option<usize>,
    /// Skip the listing lookups.
    #[arg(long, default_value_t = false)]
    pub no_tickets: bool,
    /// Keep events the sports classifier rejects.
    #[arg(long, default_value_t = false)]
    pub any_kind: bool,
}
