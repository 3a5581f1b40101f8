use std::collections::HashMap;
use std::sync::LazyLock;

use html_escape::decode_html_entities;
use regex::Regex;

use crate::models::{ListingRecord, RecordId};
use crate::selection::Strategy;

static RECORD_ANCHOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"data-record="(r\d+)""#).expect("record anchor pattern is valid"));

/// Resolves click payloads to at most one listing.
///
/// The id index is built once; the exact and containment strategies scan
/// the listings in load order and return the first match.
pub struct SelectionBinder<'a> {
    records: &'a [ListingRecord],
    strategy: Strategy,
    by_id: HashMap<RecordId, usize>,
}

impl<'a> SelectionBinder<'a> {
    pub fn new(records: &'a [ListingRecord], strategy: Strategy) -> Self {
        let by_id = records
            .iter()
            .enumerate()
            .map(|(idx, r)| (r.id, idx))
            .collect();

        Self {
            records,
            strategy,
            by_id,
        }
    }

    /// Look up a listing by its id.
    pub fn get(&self, id: RecordId) -> Option<&'a ListingRecord> {
        self.by_id.get(&id).map(|&idx| &self.records[idx])
    }

    /// Resolve a payload; `None` means "no selection", not an error.
    ///
    /// A blank payload never resolves. Only the id and containment
    /// strategies trim it; `Exact` compares the payload as given.
    pub fn resolve(&self, payload: &str) -> Option<&'a ListingRecord> {
        if payload.trim().is_empty() {
            return None;
        }

        match self.strategy {
            Strategy::Id => self.resolve_id(payload.trim()),
            Strategy::Exact => self.resolve_exact(payload),
            Strategy::Contains => self.resolve_contains(payload.trim()),
        }
    }

    fn resolve_id(&self, payload: &str) -> Option<&'a ListingRecord> {
        let id = RecordId::parse(payload).or_else(|| {
            RECORD_ANCHOR
                .captures(payload)
                .and_then(|caps| RecordId::parse(&caps[1]))
        })?;
        self.get(id)
    }

    fn resolve_exact(&self, payload: &str) -> Option<&'a ListingRecord> {
        let records: &'a [ListingRecord] = self.records;
        records.iter().find(|r| {
            (!r.building.is_empty() && r.building == payload) || r.selection_key == payload
        })
    }

    // O(n) per click. Keys are not unique, so the earliest listing wins.
    // Popups are HTML, so entities are decoded before keys are matched.
    fn resolve_contains(&self, payload: &str) -> Option<&'a ListingRecord> {
        let payload = decode_html_entities(payload);
        let records: &'a [ListingRecord] = self.records;
        records
            .iter()
            .find(|r| !r.selection_key.is_empty() && payload.contains(r.selection_key.as_str()))
    }
}
