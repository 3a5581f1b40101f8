use crate::models::{fmt_text, fmt_unit, Classification, ListingRecord};

const ROLE: &str = "당신은 부동산 전세사기 위험을 분석하는 전문가입니다.";
const TASK: &str = "아래 매물 정보를 근거로 전세사기 위험 요인을 두세 문장으로 간단히 설명하세요.";

/// A chat prompt: system instructions followed by one user message.
#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    pub system: Vec<String>,
    pub user: String,
}

/// Interpolate a listing into the fixed advisory template.
pub fn build_prompt(record: &ListingRecord, classification: &Classification) -> Prompt {
    let locality = record.locality();
    let locality = if locality.is_empty() { "N/A".to_string() } else { locality };

    let user = [
        format!("단지명: {}", record.building),
        format!("위치: {}", locality),
        format!("보증금: {}", fmt_unit(record.deposit, "만원")),
        format!("거래금액: {}", fmt_unit(record.transaction_amount, "만원")),
        format!("전세가율: {}", fmt_unit(record.jeonse_ratio, "%")),
        format!("계약유형: {}", fmt_text(record.lease_type.as_deref())),
        format!("주택유형: {}", fmt_text(record.housing_type.as_deref())),
        format!("층: {}", fmt_text(record.floor)),
        format!("건축년도: {}", fmt_text(record.build_year)),
        format!(
            "위험등급: {} (위험점수: {})",
            classification.tier, classification.score
        ),
    ]
    .join("\n");

    Prompt {
        system: vec![ROLE.to_string(), TASK.to_string()],
        user,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Bucket, DisplayScore, RecordId, RiskTier};

    #[test]
    fn test_prompt_interpolates_fields() {
        let record = ListingRecord {
            id: RecordId(0),
            building: "한양아파트".to_string(),
            city: Some("수원시".to_string()),
            district: Some("팔달구".to_string()),
            latitude: 37.27,
            longitude: 127.01,
            jeonse_ratio: Some(92.4),
            deposit: Some(21000.0),
            transaction_amount: None,
            build_year: Some(1994),
            floor: Some(5),
            housing_type: None,
            lease_type: Some("신규".to_string()),
            risk_probability: Some(0.83),
            risk_label: Some("위험".to_string()),
            selection_key: "한양아파트_5".to_string(),
            detail_html: None,
        };
        let classification = Classification {
            tier: RiskTier::Risk,
            bucket: Bucket::Risk,
            score: DisplayScore::Value(83.0),
        };

        let prompt = build_prompt(&record, &classification);
        assert_eq!(prompt.system.len(), 2);
        assert!(prompt.user.contains("단지명: 한양아파트"));
        assert!(prompt.user.contains("위치: 수원시 팔달구"));
        assert!(prompt.user.contains("보증금: 21000만원"));
        assert!(prompt.user.contains("거래금액: N/A"));
        assert!(prompt.user.contains("전세가율: 92.4%"));
        assert!(prompt.user.contains("층: 5"));
        assert!(prompt.user.contains("주택유형: N/A"));
        assert!(prompt.user.contains("위험등급: Risk (위험점수: 83.0)"));
    }
}
