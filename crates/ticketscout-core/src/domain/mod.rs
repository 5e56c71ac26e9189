//! # Domain Models
//!
//! Marketplace payloads as typed values. Everything here is a snapshot decoded
//! from the marketplace; nothing is mutated after decoding.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Event`] | Event with venue, category and performers |
//! | [`EventPage`] | One page of `/events` results |
//! | [`TicketGroup`] | Listing block: section, row, price, quantity, splits |
//! | [`RankedOption`] | Ticket group priced for a requested quantity |
//! | [`Timestamp`] | UTC timestamp used for `occurs_at` windows |
//! | [`DateWindow`] | Half-open event-time window |

mod event;
mod listing;
mod timestamp;

pub use event::{Category, Event, EventPage, Performance, Performer, Venue};
pub use listing::{ListingsPage, RankedOption, TicketGroup, TicketType};
pub use timestamp::{DateWindow, Timestamp};
