//! `rent-risk` — load rental listings, classify their jeonse fraud risk, and
//! inspect them one selection at a time.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]).
//! 2. Load config ([`config::load_config`]); CLI flags override it.
//! 3. Load and normalize the listing CSVs ([`normalizer`]).
//! 4. Classify each listing ([`risk`]) and attach its detail card ([`report::card`]).
//! 5. Render the requested report ([`report`]).
//! 6. Replay click payloads (`--select`, `--interactive`) through a selection
//!    session ([`selection`]), optionally with advisory text ([`advisory`]).

mod advisory;
mod cli;
mod config;
mod models;
mod normalizer;
mod report;
mod risk;
mod selection;

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use advisory::openai::OpenAiClient;
use advisory::request_advisory;
use cli::{Cli, ReportFormat};
use config::{load_config, ClassifierConfig};
use models::{Classification, ClassifiedListing};
use normalizer::load_listings;
use report::markers::{build_markers, to_geojson};
use report::summary::summarize;
use report::{card, terminal};
use risk::classifier::classify;
use selection::{ClickOutcome, SelectionBinder, Session};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    // Load config, then let explicit flags win
    let cwd = std::env::current_dir()?;
    let mut config = load_config(&cwd, cli.config.as_deref())?;
    if let Some(unit) = cli.risk_unit {
        config.classifier.risk_unit = unit.into();
    }
    if let Some(strategy) = cli.strategy {
        config.selection.strategy = strategy.into();
    }
    if let Some(on_miss) = cli.on_miss {
        config.selection.on_miss = on_miss.into();
    }

    let mut records = load_listings(&cli.paths, &config.columns)?;
    if records.is_empty() && !cli.quiet {
        eprintln!("No listings with coordinates found in the given files");
    }

    // Classify and attach the detail card fragment
    let classifications: Vec<Classification> = records
        .iter()
        .map(|r| classify(r, &config.classifier))
        .collect();
    for (record, classification) in records.iter_mut().zip(&classifications) {
        let html = card::detail_html(&ClassifiedListing {
            record: &*record,
            classification: *classification,
        });
        record.detail_html = Some(html);
    }

    let listings: Vec<ClassifiedListing> = records
        .iter()
        .zip(&classifications)
        .map(|(record, classification)| ClassifiedListing {
            record,
            classification: *classification,
        })
        .collect();
    let summary = summarize(&listings);

    match cli.report {
        ReportFormat::Terminal => {
            terminal::render(&listings, &summary, &cli.paths, cli.verbose, cli.quiet)?;
        }
        ReportFormat::Json => {
            let doc = serde_json::json!({ "summary": summary, "listings": listings });
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }
        ReportFormat::Geojson => {
            let doc = to_geojson(&build_markers(&listings));
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }
    }

    if cli.select.is_empty() && !cli.interactive {
        return Ok(());
    }

    let generator = if cli.advise {
        Some(OpenAiClient::from_config(&config.advisory)?)
    } else {
        None
    };

    let binder = SelectionBinder::new(&records, config.selection.strategy);
    let mut inspector = Inspector {
        binder: &binder,
        session: Session::new(config.selection.on_miss),
        classifier: &config.classifier,
        generator: generator.as_ref(),
        format: cli.report,
        quiet: cli.quiet,
    };

    for payload in &cli.select {
        inspector.click(payload).await?;
    }

    if cli.interactive {
        if !cli.quiet {
            eprintln!(
                "  {} Enter one click payload per line (record id, building_floor or popup HTML)",
                "→".cyan()
            );
        }
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            inspector.click(&line).await?;
        }
    }

    Ok(())
}

/// One user session over the loaded listings.
struct Inspector<'a> {
    binder: &'a SelectionBinder<'a>,
    session: Session,
    classifier: &'a ClassifierConfig,
    generator: Option<&'a OpenAiClient>,
    format: ReportFormat,
    quiet: bool,
}

impl<'a> Inspector<'a> {
    async fn click(&mut self, payload: &str) -> Result<()> {
        let (selected, state) = match self.session.click(self.binder, payload) {
            ClickOutcome::Selected(record) => (Some(record), "selected"),
            ClickOutcome::Kept(record) => {
                if !self.quiet {
                    eprintln!(
                        "  {} No listing matched; keeping {}",
                        "→".cyan(),
                        record.id
                    );
                }
                (Some(record), "kept")
            }
            ClickOutcome::Unselected => (None, "unselected"),
        };

        let listing = selected.map(|record| ClassifiedListing {
            record,
            classification: classify(record, self.classifier),
        });

        let advisory = match (self.generator, &listing) {
            (Some(generator), Some(listing)) => Some(self.advise(generator, listing).await?),
            _ => None,
        };

        match self.format {
            ReportFormat::Terminal => {
                terminal::render_selection(listing.as_ref(), advisory.as_deref());
            }
            ReportFormat::Json | ReportFormat::Geojson => {
                let line = serde_json::json!({
                    "payload": payload,
                    "state": state,
                    "listing": listing,
                    "advisory": advisory,
                });
                println!("{}", serde_json::to_string(&line)?);
            }
        }

        Ok(())
    }

    async fn advise(
        &mut self,
        generator: &OpenAiClient,
        listing: &ClassifiedListing<'_>,
    ) -> Result<String> {
        let cache = &mut self.session.advisories;

        let spinner = if !self.quiet && cache.get(listing.record.id).is_none() {
            let pb = ProgressBar::new_spinner();
            pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
            pb.set_message(format!("Requesting advisory for {}", listing.record.building));
            pb.enable_steady_tick(Duration::from_millis(100));
            Some(pb)
        } else {
            None
        };

        let text =
            request_advisory(generator, cache, listing.record, &listing.classification).await;

        if let Some(pb) = spinner {
            pb.finish_and_clear();
        }
        Ok(text)
    }
}
