use std::collections::HashMap;

use crate::models::RiskTier;

/// Look up a categorical label in the label table.
///
/// Matching is exact and case-sensitive; unlisted labels are `Unknown`.
pub fn tier_for_label(labels: &HashMap<String, RiskTier>, label: &str) -> RiskTier {
    labels.get(label).copied().unwrap_or(RiskTier::Unknown)
}
