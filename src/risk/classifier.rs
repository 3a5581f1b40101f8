use crate::config::{ClassifierConfig, Thresholds};
use crate::models::{Classification, DisplayScore, ListingRecord, RiskTier, RiskUnit};
use crate::risk::labels::tier_for_label;

/// Classify a listing into a risk tier, display bucket and formatted score.
///
/// - A label, when present, decides the tier on its own; the score is only
///   formatted for display.
/// - Without a label, configured [`Thresholds`] bucket the display score.
///   With no thresholds the listing is `Unknown`.
/// - Never fails: unusable numbers become [`DisplayScore::NotAvailable`].
pub fn classify(record: &ListingRecord, config: &ClassifierConfig) -> Classification {
    let score = display_score(record.risk_probability, config.risk_unit);

    let tier = match record.risk_label.as_deref() {
        Some(label) => tier_for_label(&config.labels, label),
        None => config
            .thresholds
            .map(|t| tier_for_score(score, t))
            .unwrap_or(RiskTier::Unknown),
    };

    Classification {
        tier,
        bucket: tier.into(),
        score,
    }
}

/// Convert a raw probability to a percentage rounded to one decimal.
pub fn display_score(value: Option<f64>, unit: RiskUnit) -> DisplayScore {
    match value.filter(|v| v.is_finite()) {
        Some(v) => {
            let percent = match unit {
                RiskUnit::Fraction => v * 100.0,
                RiskUnit::Percent => v,
            };
            DisplayScore::Value(round1(percent))
        }
        None => DisplayScore::NotAvailable,
    }
}

/// Round to one decimal place.
pub fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

fn tier_for_score(score: DisplayScore, thresholds: Thresholds) -> RiskTier {
    match score.value() {
        Some(v) if v >= thresholds.risk => RiskTier::Risk,
        Some(v) if v >= thresholds.caution => RiskTier::Caution,
        Some(_) => RiskTier::Safe,
        None => RiskTier::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Bucket, RecordId};
    use proptest::prelude::*;

    fn listing(label: Option<&str>, probability: Option<f64>) -> ListingRecord {
        ListingRecord {
            id: RecordId(0),
            building: "한양아파트".to_string(),
            city: None,
            district: None,
            latitude: 37.27,
            longitude: 127.01,
            jeonse_ratio: None,
            deposit: None,
            transaction_amount: None,
            build_year: None,
            floor: Some(5),
            housing_type: None,
            lease_type: None,
            risk_probability: probability,
            risk_label: label.map(str::to_string),
            selection_key: "한양아파트_5".to_string(),
            detail_html: None,
        }
    }

    #[test]
    fn test_fraction_is_scaled() {
        assert_eq!(
            display_score(Some(0.83), RiskUnit::Fraction),
            DisplayScore::Value(83.0)
        );
        assert_eq!(
            display_score(Some(0.12345), RiskUnit::Fraction),
            DisplayScore::Value(12.3)
        );
    }

    #[test]
    fn test_percent_is_not_scaled() {
        assert_eq!(
            display_score(Some(0.8), RiskUnit::Percent),
            DisplayScore::Value(0.8)
        );
        assert_eq!(
            display_score(Some(67.25), RiskUnit::Percent),
            DisplayScore::Value(67.3)
        );
    }

    #[test]
    fn test_missing_score_is_not_available() {
        assert_eq!(display_score(None, RiskUnit::Fraction), DisplayScore::NotAvailable);
        assert_eq!(
            display_score(Some(f64::NAN), RiskUnit::Percent),
            DisplayScore::NotAvailable
        );
    }

    #[test]
    fn test_label_decides_tier() {
        let cfg = ClassifierConfig::default();
        let c = classify(&listing(Some("위험"), Some(0.83)), &cfg);
        assert_eq!(c.tier, RiskTier::Risk);
        assert_eq!(c.bucket, Bucket::Risk);
        assert_eq!(c.score, DisplayScore::Value(83.0));

        let c = classify(&listing(Some("안전"), None), &cfg);
        assert_eq!(c.bucket, Bucket::Safe);
        assert_eq!(c.score, DisplayScore::NotAvailable);
    }

    #[test]
    fn test_glossed_labels_classify_like_bare_ones() {
        let cfg = ClassifierConfig::default();
        let cases = [
            ("안전(Safe)", Bucket::Safe),
            ("주의(Caution)", Bucket::Caution),
            ("보통(Moderate)", Bucket::Caution),
            ("위험(Risk)", Bucket::Risk),
        ];
        for (label, bucket) in cases {
            assert_eq!(classify(&listing(Some(label), Some(0.5)), &cfg).bucket, bucket, "{}", label);
        }
    }

    #[test]
    fn test_unrecognized_label_is_unknown() {
        let cfg = ClassifierConfig::default();
        let c = classify(&listing(Some("고위험"), Some(0.99)), &cfg);
        assert_eq!(c.tier, RiskTier::Unknown);
        assert_eq!(c.bucket, Bucket::Default);

        // Matching is exact: case and spacing matter.
        assert_eq!(classify(&listing(Some("위험(risk)"), None), &cfg).tier, RiskTier::Unknown);
        assert_eq!(classify(&listing(Some(" 위험"), None), &cfg).tier, RiskTier::Unknown);
    }

    #[test]
    fn test_absent_label_without_thresholds_is_unknown() {
        let cfg = ClassifierConfig::default();
        let c = classify(&listing(None, Some(0.95)), &cfg);
        assert_eq!(c.tier, RiskTier::Unknown);
        assert_eq!(c.score, DisplayScore::Value(95.0));
    }

    #[test]
    fn test_thresholds_apply_only_without_label() {
        let cfg = ClassifierConfig {
            thresholds: Some(Thresholds {
                caution: 50.0,
                risk: 80.0,
            }),
            ..ClassifierConfig::default()
        };

        assert_eq!(classify(&listing(None, Some(0.80)), &cfg).tier, RiskTier::Risk);
        assert_eq!(classify(&listing(None, Some(0.5)), &cfg).tier, RiskTier::Caution);
        assert_eq!(classify(&listing(None, Some(0.1)), &cfg).tier, RiskTier::Safe);
        assert_eq!(classify(&listing(None, None), &cfg).tier, RiskTier::Unknown);
        // A label still wins over a high score.
        assert_eq!(
            classify(&listing(Some("안전"), Some(0.99)), &cfg).tier,
            RiskTier::Safe
        );
    }

    proptest! {
        /// Property: rounding a percentage twice equals rounding it once.
        #[test]
        fn rounding_is_idempotent(v in 0.0f64..=100.0) {
            let once = round1(v);
            prop_assert_eq!(round1(once), once);
        }

        /// Property: the `위험` label always lands in the risk bucket.
        #[test]
        fn risk_label_ignores_score(p in proptest::option::of(-1.0f64..2.0)) {
            let c = classify(&listing(Some("위험"), p), &ClassifierConfig::default());
            prop_assert_eq!(c.bucket, Bucket::Risk);
        }
    }
}
