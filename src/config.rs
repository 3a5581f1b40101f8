use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::models::{RiskTier, RiskUnit};
use crate::selection::{MissPolicy, Strategy};

/// Root configuration structure, deserialized from `.rent-risk/config.toml`.
///
/// Every section is optional; missing sections and fields fall back to the
/// built-in defaults.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub classifier: ClassifierConfig,
    #[serde(default)]
    pub columns: ColumnMapping,
    #[serde(default)]
    pub selection: SelectionConfig,
    #[serde(default)]
    pub advisory: AdvisoryConfig,
}

/// How risk labels and probabilities are turned into tiers.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Unit of the risk probability column.
    pub risk_unit: RiskUnit,
    /// Exact, case-sensitive label → tier table. Labels not listed are `Unknown`.
    pub labels: HashMap<String, RiskTier>,
    /// Score cut-offs (percent) applied only to listings that carry no label.
    pub thresholds: Option<Thresholds>,
}

impl Default for ClassifierConfig {
    /// The canonical label set: `안전`, `주의`/`보통`, `위험`, each in its bare
    /// form and with the English gloss some exports append, e.g. `위험(Risk)`.
    fn default() -> Self {
        let labels = [
            ("안전", RiskTier::Safe),
            ("안전(Safe)", RiskTier::Safe),
            ("주의", RiskTier::Caution),
            ("주의(Caution)", RiskTier::Caution),
            ("보통", RiskTier::Caution),
            ("보통(Moderate)", RiskTier::Caution),
            ("위험", RiskTier::Risk),
            ("위험(Risk)", RiskTier::Risk),
        ]
        .into_iter()
        .map(|(label, tier)| (label.to_string(), tier))
        .collect();

        ClassifierConfig {
            risk_unit: RiskUnit::Fraction,
            labels,
            thresholds: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Thresholds {
    pub caution: f64,
    pub risk: f64,
}

/// Accepted column names for each logical field, in priority order.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ColumnMapping {
    pub building: Vec<String>,
    pub city: Vec<String>,
    pub district: Vec<String>,
    /// Combined `"city district"` column, split when the discrete ones are absent.
    pub locality: Vec<String>,
    pub latitude: Vec<String>,
    pub longitude: Vec<String>,
    pub jeonse_ratio: Vec<String>,
    pub deposit: Vec<String>,
    pub transaction_amount: Vec<String>,
    pub build_year: Vec<String>,
    pub floor: Vec<String>,
    pub housing_type: Vec<String>,
    pub lease_type: Vec<String>,
    pub risk_probability: Vec<String>,
    pub risk_label: Vec<String>,
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

impl Default for ColumnMapping {
    fn default() -> Self {
        ColumnMapping {
            building: names(&["단지명", "건물명", "building", "apt_name", "name"]),
            city: names(&["시", "시도", "city"]),
            district: names(&["구", "district", "gu"]),
            locality: names(&["시군구", "지역", "locality", "sigungu"]),
            latitude: names(&["위도", "lat", "latitude"]),
            longitude: names(&["경도", "lon", "lng", "longitude"]),
            jeonse_ratio: names(&["전세가율", "jeonse_ratio", "ratio"]),
            deposit: names(&["보증금.만원.", "보증금(만원)", "보증금", "deposit"]),
            transaction_amount: names(&[
                "거래금액.만원.",
                "거래금액(만원)",
                "거래금액",
                "매매가",
                "price",
            ]),
            build_year: names(&["건축년도", "build_year", "year_built"]),
            floor: names(&["층", "floor"]),
            housing_type: names(&["주택유형", "건물유형", "housing_type"]),
            lease_type: names(&["계약유형", "전월세구분", "lease_type"]),
            risk_probability: names(&["위험확률", "risk_prob", "risk_probability"]),
            risk_label: names(&["위험등급", "risk_level", "risk_label"]),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    pub strategy: Strategy,
    pub on_miss: MissPolicy,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        SelectionConfig {
            strategy: Strategy::Id,
            on_miss: MissPolicy::Keep,
        }
    }
}

/// Settings for the hosted completion service.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AdvisoryConfig {
    pub model: String,
    pub endpoint: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    pub timeout_secs: u64,
}

impl Default for AdvisoryConfig {
    fn default() -> Self {
        AdvisoryConfig {
            model: "gpt-3.5-turbo".to_string(),
            endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Load the configuration, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `<working_dir>/.rent-risk/config.toml`
/// 3. `~/.config/rent-risk/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(working_dir: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        return read_config(path);
    }

    let project_config = working_dir.join(".rent-risk").join("config.toml");
    if project_config.exists() {
        return read_config(&project_config);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home.join(".config").join("rent-risk").join("config.toml");
        if home_config.exists() {
            return read_config(&home_config);
        }
    }

    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}
