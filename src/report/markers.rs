//! Map markers: listings grouped by location, with an HTML popup per marker.

use std::collections::HashMap;

use html_escape::{encode_double_quoted_attribute, encode_text};
use serde::Serialize;

use crate::models::{fmt_text, fmt_unit, Bucket, ClassifiedListing, RecordId};

/// One map marker covering every listing at the same rounded coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub latitude: f64,
    pub longitude: f64,
    /// Most severe bucket among the grouped listings.
    pub bucket: Bucket,
    pub records: Vec<RecordId>,
    pub popup: String,
}

/// Coordinates are grouped at six decimals (about 0.1 m).
fn location_key(latitude: f64, longitude: f64) -> (i64, i64) {
    (
        (latitude * 1e6).round() as i64,
        (longitude * 1e6).round() as i64,
    )
}

/// Group listings into markers, in order of first appearance.
pub fn build_markers(listings: &[ClassifiedListing<'_>]) -> Vec<Marker> {
    let mut markers: Vec<Marker> = Vec::new();
    let mut index: HashMap<(i64, i64), usize> = HashMap::new();

    for listing in listings {
        let record = listing.record;
        let key = location_key(record.latitude, record.longitude);
        let line = popup_line(listing);

        match index.get(&key) {
            Some(&idx) => {
                let marker = &mut markers[idx];
                marker.bucket = marker.bucket.max(listing.classification.bucket);
                marker.records.push(record.id);
                marker.popup.push_str("<br>");
                marker.popup.push_str(&line);
            }
            None => {
                index.insert(key, markers.len());
                markers.push(Marker {
                    latitude: key.0 as f64 / 1e6,
                    longitude: key.1 as f64 / 1e6,
                    bucket: listing.classification.bucket,
                    records: vec![record.id],
                    popup: line,
                });
            }
        }
    }

    markers
}

/// Popup line for one listing. The `data-record` anchor lets id-based
/// binding resolve the click; `title` carries the selection key.
fn popup_line(listing: &ClassifiedListing<'_>) -> String {
    let record = listing.record;
    format!(
        "<span data-record=\"{}\" title=\"{}\"><b>{}</b> | 보증금: {} | 전세가율: {} | 계약유형: {}</span>",
        record.id,
        encode_double_quoted_attribute(&record.selection_key),
        encode_text(&record.building),
        fmt_unit(record.deposit, "만원"),
        fmt_unit(record.jeonse_ratio, "%"),
        encode_text(&fmt_text(record.lease_type.as_deref())),
    )
}

/// Export markers as a GeoJSON `FeatureCollection` of points.
pub fn to_geojson(markers: &[Marker]) -> serde_json::Value {
    let features: Vec<serde_json::Value> = markers
        .iter()
        .map(|m| {
            serde_json::json!({
                "type": "Feature",
                "geometry": {
                    "type": "Point",
                    "coordinates": [m.longitude, m.latitude],
                },
                "properties": {
                    "bucket": m.bucket,
                    "color": m.bucket.color(),
                    "records": m.records.iter().map(ToString::to_string).collect::<Vec<_>>(),
                    "popup": m.popup,
                },
            })
        })
        .collect();

    serde_json::json!({
        "type": "FeatureCollection",
        "features": features,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{selection_key, Classification, DisplayScore, ListingRecord, RiskTier};
    use crate::selection::{SelectionBinder, Strategy};

    fn record(id: usize, building: &str, lat: f64, lon: f64) -> ListingRecord {
        ListingRecord {
            id: RecordId(id),
            building: building.to_string(),
            city: None,
            district: None,
            latitude: lat,
            longitude: lon,
            jeonse_ratio: Some(85.5),
            deposit: Some(20000.0),
            transaction_amount: None,
            build_year: None,
            floor: Some(3),
            housing_type: None,
            lease_type: None,
            risk_probability: None,
            risk_label: None,
            selection_key: selection_key(building, Some(3)),
            detail_html: None,
        }
    }

    fn classified(record: &ListingRecord, tier: RiskTier) -> ClassifiedListing<'_> {
        ClassifiedListing {
            record,
            classification: Classification {
                tier,
                bucket: tier.into(),
                score: DisplayScore::NotAvailable,
            },
        }
    }

    #[test]
    fn test_grouping_by_rounded_coordinates() {
        let records = vec![
            record(0, "A", 37.2636001, 127.0286),
            record(1, "B", 37.30, 127.00),
            record(2, "C", 37.2636004, 127.0286002),
        ];
        let listings = vec![
            classified(&records[0], RiskTier::Safe),
            classified(&records[1], RiskTier::Caution),
            classified(&records[2], RiskTier::Risk),
        ];

        let markers = build_markers(&listings);
        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0].records, vec![RecordId(0), RecordId(2)]);
        assert_eq!(markers[0].bucket, Bucket::Risk);
        assert_eq!(markers[0].popup.matches("<br>").count(), 1);
        assert_eq!(markers[1].records, vec![RecordId(1)]);
        assert_eq!(markers[1].bucket, Bucket::Caution);
    }

    #[test]
    fn test_popup_is_escaped() {
        let records = vec![record(0, "<script>", 37.0, 127.0)];
        let listings = vec![classified(&records[0], RiskTier::Unknown)];

        let popup = &build_markers(&listings)[0].popup;
        assert!(popup.contains("<b>&lt;script&gt;</b>"));
        assert!(popup.contains("보증금: 20000만원"));
        assert!(popup.contains("전세가율: 85.5%"));
        assert!(popup.contains("계약유형: N/A"));
    }

    #[test]
    fn test_popup_resolves_with_id_and_contains_binders() {
        let records = vec![record(0, "A", 37.0, 127.0), record(1, "B", 37.0, 127.0)];
        let listings = vec![
            classified(&records[0], RiskTier::Safe),
            classified(&records[1], RiskTier::Safe),
        ];
        let popup = build_markers(&listings)[0].popup.clone();

        // Both bind to the first listing in the popup.
        let by_id = SelectionBinder::new(&records, Strategy::Id);
        assert_eq!(by_id.resolve(&popup).unwrap().id, RecordId(0));
        let by_key = SelectionBinder::new(&records, Strategy::Contains);
        assert_eq!(by_key.resolve(&popup).unwrap().id, RecordId(0));
    }

    #[test]
    fn test_popup_with_markup_in_name_resolves_by_key() {
        let records = vec![record(0, "A&B빌라", 37.0, 127.0)];
        let listings = vec![classified(&records[0], RiskTier::Risk)];
        let popup = build_markers(&listings)[0].popup.clone();
        assert!(popup.contains("title=\"A&amp;B빌라_3\""));

        let by_key = SelectionBinder::new(&records, Strategy::Contains);
        assert_eq!(by_key.resolve(&popup).map(|r| r.id), Some(RecordId(0)));
    }

    #[test]
    fn test_geojson_shape() {
        let records = vec![record(0, "A", 37.5, 127.25)];
        let listings = vec![classified(&records[0], RiskTier::Risk)];

        let geo = to_geojson(&build_markers(&listings));
        assert_eq!(geo["type"], "FeatureCollection");
        let feature = &geo["features"][0];
        assert_eq!(feature["geometry"]["coordinates"][0], 127.25);
        assert_eq!(feature["geometry"]["coordinates"][1], 37.5);
        assert_eq!(feature["properties"]["color"], "red");
        assert_eq!(feature["properties"]["bucket"], "risk");
        assert_eq!(feature["properties"]["records"][0], "r0");
    }
}
