use serde::{Deserialize, Serialize};

/// Unique identifier assigned to a listing when it is loaded.
///
/// Ids are global across every file loaded in one run, so they stay unique
/// even when two listings share a building name and floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordId(pub usize);

impl RecordId {
    /// Parse the `r{n}` form produced by [`Display`](std::fmt::Display).
    pub fn parse(s: &str) -> Option<RecordId> {
        s.trim()
            .strip_prefix('r')
            .and_then(|n| n.parse().ok())
            .map(RecordId)
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "r{}", self.0)
    }
}

/// One rental unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingRecord {
    pub id: RecordId,
    pub building: String,
    pub city: Option<String>,
    pub district: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    /// Deposit-to-price ratio in percent.
    pub jeonse_ratio: Option<f64>,
    /// Deposit in units of 10,000 won.
    pub deposit: Option<f64>,
    /// Transaction amount in units of 10,000 won.
    pub transaction_amount: Option<f64>,
    pub build_year: Option<i32>,
    pub floor: Option<i32>,
    pub housing_type: Option<String>,
    pub lease_type: Option<String>,
    /// Raw risk probability; its unit is declared by the caller, see [`RiskUnit`].
    pub risk_probability: Option<f64>,
    /// Categorical risk label exactly as found in the source file.
    pub risk_label: Option<String>,
    /// `building_floor`, used by the exact and containment binders. Not unique.
    pub selection_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail_html: Option<String>,
}

impl ListingRecord {
    /// `"city district"`, whichever parts are known.
    pub fn locality(&self) -> String {
        [self.city.as_deref(), self.district.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Derive the selection key for a building and floor.
pub fn selection_key(building: &str, floor: Option<i32>) -> String {
    match floor {
        Some(floor) => format!("{}_{}", building, floor),
        None => building.to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    Safe,
    Caution,
    Risk,
    Unknown,
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskTier::Safe => write!(f, "Safe"),
            RiskTier::Caution => write!(f, "Caution"),
            RiskTier::Risk => write!(f, "Risk"),
            RiskTier::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Display bucket used for color-coding markers and table cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    Default,
    Safe,
    Caution,
    Risk,
}

impl Bucket {
    /// Marker color name understood by common map widgets.
    pub fn color(&self) -> &'static str {
        match self {
            Bucket::Safe => "green",
            Bucket::Caution => "orange",
            Bucket::Risk => "red",
            Bucket::Default => "gray",
        }
    }
}

impl From<RiskTier> for Bucket {
    fn from(tier: RiskTier) -> Self {
        match tier {
            RiskTier::Safe => Bucket::Safe,
            RiskTier::Caution => Bucket::Caution,
            RiskTier::Risk => Bucket::Risk,
            RiskTier::Unknown => Bucket::Default,
        }
    }
}

/// Unit of the risk probability column. Must be declared; `0.8` is
/// ambiguous between 0.8% and 80%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskUnit {
    /// 0.0 – 1.0
    Fraction,
    /// 0 – 100
    Percent,
}

/// Formatted risk score, in percent with one decimal. Serialized as a
/// number or `null`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DisplayScore {
    Value(f64),
    NotAvailable,
}

impl DisplayScore {
    pub fn value(&self) -> Option<f64> {
        match self {
            DisplayScore::Value(v) => Some(*v),
            DisplayScore::NotAvailable => None,
        }
    }
}

impl std::fmt::Display for DisplayScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DisplayScore::Value(v) => write!(f, "{:.1}", v),
            DisplayScore::NotAvailable => write!(f, "N/A"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub tier: RiskTier,
    pub bucket: Bucket,
    pub score: DisplayScore,
}

/// A listing paired with its classification, as handed to reports.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ClassifiedListing<'a> {
    #[serde(flatten)]
    pub record: &'a ListingRecord,
    pub classification: Classification,
}

/// Format a number, dropping the fraction for whole values; `N/A` when absent.
pub fn fmt_number(value: Option<f64>) -> String {
    match value {
        Some(v) if v.fract() == 0.0 => format!("{:.0}", v),
        Some(v) => format!("{}", v),
        None => "N/A".to_string(),
    }
}

/// Like [`fmt_number`] with a unit suffix, which is omitted for `N/A`.
pub fn fmt_unit(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(_) => format!("{}{}", fmt_number(value), unit),
        None => "N/A".to_string(),
    }
}

pub fn fmt_text<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| v.to_string())
}
