//! Raw CSV rows → typed [`ListingRecord`]s.
//!
//! - [`source`] — reads a CSV file into [`RawRow`]s.
//! - [`fields`] — lenient numeric coercion and locality splitting.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Result;

use crate::config::ColumnMapping;
use crate::models::{selection_key, ListingRecord, RecordId};

pub mod fields;
pub mod source;

/// One CSV row: column name → raw cell text.
pub type RawRow = HashMap<String, String>;

/// Load and normalize every file in order. Record ids run on across files.
pub fn load_listings(paths: &[PathBuf], mapping: &ColumnMapping) -> Result<Vec<ListingRecord>> {
    let mut records = Vec::new();

    for path in paths {
        let rows = source::load_csv(path)?;
        let normalized = normalize_rows(&rows, mapping, records.len());
        tracing::info!(
            file = %path.display(),
            rows = rows.len(),
            kept = normalized.len(),
            "normalized listings"
        );
        records.extend(normalized);
    }

    Ok(records)
}

/// Normalize rows in input order, dropping those without usable coordinates.
///
/// Kept rows receive consecutive ids starting at `first_id`.
pub fn normalize_rows(rows: &[RawRow], mapping: &ColumnMapping, first_id: usize) -> Vec<ListingRecord> {
    let mut records = Vec::with_capacity(rows.len());

    for (idx, row) in rows.iter().enumerate() {
        let id = RecordId(first_id + records.len());
        match normalize_row(row, mapping, id) {
            Some(record) => records.push(record),
            None => tracing::debug!(row = idx + 1, "dropping row without coordinates"),
        }
    }

    records
}

/// Build one record, or `None` when latitude or longitude is missing or not numeric.
pub fn normalize_row(row: &RawRow, mapping: &ColumnMapping, id: RecordId) -> Option<ListingRecord> {
    let latitude = fields::number(row, &mapping.latitude)?;
    let longitude = fields::number(row, &mapping.longitude)?;

    let building = fields::text(row, &mapping.building).unwrap_or_default();
    let floor = fields::whole(row, &mapping.floor);

    let mut city = fields::text(row, &mapping.city);
    let mut district = fields::text(row, &mapping.district);
    if city.is_none() && district.is_none() {
        if let Some(combined) = fields::pick(row, &mapping.locality) {
            (city, district) = fields::split_locality(combined);
        }
    }

    Some(ListingRecord {
        id,
        selection_key: selection_key(&building, floor),
        building,
        city,
        district,
        latitude,
        longitude,
        jeonse_ratio: fields::number(row, &mapping.jeonse_ratio),
        deposit: fields::number(row, &mapping.deposit),
        transaction_amount: fields::number(row, &mapping.transaction_amount),
        build_year: fields::whole(row, &mapping.build_year),
        floor,
        housing_type: fields::text(row, &mapping.housing_type),
        lease_type: fields::text(row, &mapping.lease_type),
        risk_probability: fields::number(row, &mapping.risk_probability),
        risk_label: fields::text(row, &mapping.risk_label),
        detail_html: None,
    })
}
