use std::path::Path;

use anyhow::{Context, Result};

use super::RawRow;

/// Read a listings CSV into raw rows keyed by (trimmed) header name.
///
/// Ragged rows are accepted; a record the CSV reader cannot decode is
/// skipped with a warning rather than failing the whole load.
pub fn load_csv(path: &Path) -> Result<Vec<RawRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;

    let headers: Vec<String> = reader
        .headers()
        .with_context(|| format!("Failed to read CSV header: {}", path.display()))?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(file = %path.display(), row = idx + 1, error = %e, "skipping unreadable row");
                continue;
            }
        };

        let row: RawRow = headers
            .iter()
            .zip(record.iter())
            .map(|(h, v)| (h.clone(), v.to_string()))
            .collect();
        rows.push(row);
    }

    tracing::debug!(file = %path.display(), rows = rows.len(), "read CSV");
    Ok(rows)
}
