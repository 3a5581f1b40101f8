//! Map-click payload → listing resolution.
//!
//! - [`binder`] — resolves one payload against the loaded listings.
//! - [`session`] — per-session selection state and its no-match policy.

use serde::Deserialize;

pub mod binder;
pub mod session;

pub use binder::SelectionBinder;
pub use session::{ClickOutcome, Session};

/// How a click payload is matched to a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Record id (`r12`), bare or embedded as `data-record="r12"`. Unique.
    Id,
    /// Payload equals a building name or selection key.
    Exact,
    /// First selection key, in load order, contained in the payload.
    Contains,
}

/// What an unresolved click does to the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissPolicy {
    /// Keep showing the last selected listing.
    Keep,
    /// Revert to the unselected placeholder.
    Clear,
}
