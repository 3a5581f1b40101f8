//! Report renderers for classified listings.
//!
//! - [`summary`] — totals, deposit-ratio figures and per-tier counts.
//! - [`markers`] — location-grouped map markers with HTML popups; GeoJSON export.
//! - [`card`] — detail card fields and the HTML fragment attached to each listing.
//! - [`terminal`] — colored tables and the selection card; respects `--verbose` / `--quiet`.

pub mod card;
pub mod markers;
pub mod summary;
pub mod terminal;
