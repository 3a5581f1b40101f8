use serde::Serialize;

use crate::models::{ClassifiedListing, RiskTier};

/// Headline figures for a loaded data set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total: usize,
    /// Mean deposit ratio over listings that have one.
    pub mean_ratio: Option<f64>,
    pub max_ratio: Option<f64>,
    pub safe: usize,
    pub caution: usize,
    pub risk: usize,
    pub unknown: usize,
}

pub fn summarize(listings: &[ClassifiedListing<'_>]) -> Summary {
    let ratios: Vec<f64> = listings
        .iter()
        .filter_map(|l| l.record.jeonse_ratio)
        .collect();

    let mean_ratio = (!ratios.is_empty()).then(|| ratios.iter().sum::<f64>() / ratios.len() as f64);
    let max_ratio = ratios.iter().copied().reduce(f64::max);

    let tally = |tier: RiskTier| {
        listings
            .iter()
            .filter(|l| l.classification.tier == tier)
            .count()
    };

    Summary {
        total: listings.len(),
        mean_ratio,
        max_ratio,
        safe: tally(RiskTier::Safe),
        caution: tally(RiskTier::Caution),
        risk: tally(RiskTier::Risk),
        unknown: tally(RiskTier::Unknown),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{selection_key, Classification, DisplayScore, ListingRecord, RecordId};

    fn record(id: usize, ratio: Option<f64>) -> ListingRecord {
        ListingRecord {
            id: RecordId(id),
            building: format!("b{}", id),
            city: None,
            district: None,
            latitude: 37.0,
            longitude: 127.0,
            jeonse_ratio: ratio,
            deposit: None,
            transaction_amount: None,
            build_year: None,
            floor: None,
            housing_type: None,
            lease_type: None,
            risk_probability: None,
            risk_label: None,
            selection_key: selection_key(&format!("b{}", id), None),
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
    fn test_summary_ignores_missing_ratios() {
        let records = vec![record(0, Some(80.0)), record(1, None), record(2, Some(90.0))];
        let listings = vec![
            classified(&records[0], RiskTier::Risk),
            classified(&records[1], RiskTier::Unknown),
            classified(&records[2], RiskTier::Risk),
        ];

        let s = summarize(&listings);
        assert_eq!(s.total, 3);
        assert_eq!(s.mean_ratio, Some(85.0));
        assert_eq!(s.max_ratio, Some(90.0));
        assert_eq!(s.risk, 2);
        assert_eq!(s.unknown, 1);
        assert_eq!(s.safe, 0);
        assert_eq!(s.caution, 0);
    }

    #[test]
    fn test_empty_summary() {
        let s = summarize(&[]);
        assert_eq!(s.total, 0);
        assert_eq!(s.mean_ratio, None);
        assert_eq!(s.max_ratio, None);
    }
}
