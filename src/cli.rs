use std::path::PathBuf;

use clap::Parser;

use crate::models::RiskUnit;
use crate::selection::{MissPolicy, Strategy};

#[derive(Parser, Debug)]
#[command(
    name = "rent-risk",
    about = "Classify rental listings by jeonse fraud risk and inspect them by selection",
    version
)]
pub struct Cli {
    /// Listing CSV files, loaded in order
    #[arg(required = true, value_name = "CSV")]
    pub paths: Vec<PathBuf>,

    /// Config file [default: ./.rent-risk/config.toml, fallback ~/.config/rent-risk/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Unit of the risk probability column (overrides config)
    #[arg(long, value_name = "UNIT")]
    pub risk_unit: Option<RiskUnitArg>,

    /// Report format
    #[arg(long, default_value = "terminal", value_name = "FORMAT")]
    pub report: ReportFormat,

    /// How click payloads are matched to listings (overrides config)
    #[arg(long, value_name = "STRATEGY")]
    pub strategy: Option<StrategyArg>,

    /// What a click that matches nothing does to the selection (overrides config)
    #[arg(long, value_name = "POLICY")]
    pub on_miss: Option<MissPolicyArg>,

    /// Click payload to replay against the listings (repeatable, applied in order)
    #[arg(long = "select", value_name = "PAYLOAD")]
    pub select: Vec<String>,

    /// Read click payloads from stdin, one per line
    #[arg(short, long)]
    pub interactive: bool,

    /// Request advisory text for each selected listing
    #[arg(long)]
    pub advise: bool,

    /// Show all listings (not just caution/risk)
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print summary line
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, clap::ValueEnum)]
pub enum ReportFormat {
    Terminal,
    Json,
    Geojson,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum RiskUnitArg {
    Fraction,
    Percent,
}

impl From<RiskUnitArg> for RiskUnit {
    fn from(arg: RiskUnitArg) -> Self {
        match arg {
            RiskUnitArg::Fraction => RiskUnit::Fraction,
            RiskUnitArg::Percent => RiskUnit::Percent,
        }
    }
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum StrategyArg {
    Id,
    Exact,
    Contains,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Id => Strategy::Id,
            StrategyArg::Exact => Strategy::Exact,
            StrategyArg::Contains => Strategy::Contains,
        }
    }
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum MissPolicyArg {
    Keep,
    Clear,
}

impl From<MissPolicyArg> for MissPolicy {
    fn from(arg: MissPolicyArg) -> Self {
        match arg {
            MissPolicyArg::Keep => MissPolicy::Keep,
            MissPolicyArg::Clear => MissPolicy::Clear,
        }
    }
}
