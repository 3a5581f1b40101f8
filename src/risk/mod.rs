//! Risk-tier classification.
//!
//! - [`labels`] — exact label lookup against the configured label table.
//! - [`classifier`] — entry point combining the label, the probability and
//!   optional score thresholds into a [`Classification`](crate::models::Classification).

pub mod classifier;
pub mod labels;
