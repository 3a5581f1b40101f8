use std::path::PathBuf;

use anyhow::Result;
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::models::{fmt_number, fmt_text, fmt_unit, Bucket, ClassifiedListing, RiskTier};
use crate::report::card::detail_fields;
use crate::report::summary::Summary;

/// Render a colored terminal report.
pub fn render(
    listings: &[ClassifiedListing<'_>],
    summary: &Summary,
    sources: &[PathBuf],
    verbose: bool,
    quiet: bool,
) -> Result<()> {
    if quiet {
        println!(
            "Total: {}  Safe: {}  Caution: {}  Risk: {}  Unknown: {}",
            summary.total,
            summary.safe.to_string().green(),
            summary.caution.to_string().yellow(),
            summary.risk.to_string().red(),
            summary.unknown.to_string().dimmed(),
        );
        return Ok(());
    }

    println!("\n {} v{}", "rent-risk".bold(), env!("CARGO_PKG_VERSION"));
    for source in sources {
        println!(" Loaded: {}", source.display());
    }
    println!();

    println!(" ┌────────────────────────────────────────────────────┐");
    println!(" │  {:<48} │", "SUMMARY".bold());
    println!(" │  {:<48} │", format!("Total listings     : {}", summary.total));
    println!(
        " │  {:<48} │",
        format!("Mean deposit ratio : {}", fmt_ratio(summary.mean_ratio))
    );
    println!(
        " │  {:<48} │",
        format!("Max deposit ratio  : {}", fmt_ratio(summary.max_ratio))
    );
    println!(
        " │  {:<48} │",
        format!("{}  Safe            : {:>4}", "✓".green(), summary.safe)
    );
    println!(
        " │  {:<48} │",
        format!("{}  Caution         : {:>4}", "⚠".yellow(), summary.caution)
    );
    println!(
        " │  {:<48} │",
        format!("{}  Risk            : {:>4}", "✗".red(), summary.risk)
    );
    println!(
        " │  {:<48} │",
        format!("{}  Unknown         : {:>4}", "?".dimmed(), summary.unknown)
    );
    println!(" └────────────────────────────────────────────────────┘\n");

    if summary.risk > 0 {
        println!(" {} High-risk listings:\n", "[RISK]".red().bold());
        render_table(listings, RiskTier::Risk);
        println!();
    }

    if summary.caution > 0 {
        println!(" {} Listings needing caution:\n", "[CAUTION]".yellow().bold());
        render_table(listings, RiskTier::Caution);
        println!();
    }

    if verbose {
        if summary.safe > 0 {
            println!(" {} Safe listings:\n", "[SAFE]".green().bold());
            render_table(listings, RiskTier::Safe);
            println!();
        }
        if summary.unknown > 0 {
            println!(" {} Unclassified listings:\n", "[UNKNOWN]".dimmed().bold());
            render_table(listings, RiskTier::Unknown);
            println!();
        }
    }

    Ok(())
}

/// Render the detail card for the current selection, or the placeholder.
pub fn render_selection(selected: Option<&ClassifiedListing<'_>>, advisory: Option<&str>) {
    let Some(listing) = selected else {
        println!(" {} Select a listing on the map.\n", "→".cyan());
        return;
    };

    println!(
        " {} {} ({})\n",
        "Selected:".bold(),
        listing.record.building,
        listing.record.id
    );

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let color = bucket_color(listing.classification.bucket);
    for (label, value) in detail_fields(listing) {
        let cell = Cell::new(value);
        let cell = if label == "위험등급" || label == "위험점수" {
            cell.fg(color).add_attribute(Attribute::Bold)
        } else {
            cell
        };
        table.add_row(vec![Cell::new(label).add_attribute(Attribute::Bold), cell]);
    }
    println!("{}", table);

    if let Some(text) = advisory {
        println!("\n {}\n {}\n", "Advisory".bold(), text);
    } else {
        println!();
    }
}

fn render_table(listings: &[ClassifiedListing<'_>], tier: RiskTier) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Id").add_attribute(Attribute::Bold),
            Cell::new("Building").add_attribute(Attribute::Bold),
            Cell::new("Floor").add_attribute(Attribute::Bold),
            Cell::new("Locality").add_attribute(Attribute::Bold),
            Cell::new("Deposit").add_attribute(Attribute::Bold),
            Cell::new("Ratio").add_attribute(Attribute::Bold),
            Cell::new("Lease").add_attribute(Attribute::Bold),
            Cell::new("Score").add_attribute(Attribute::Bold),
            Cell::new("Tier").add_attribute(Attribute::Bold),
        ]);

    for listing in listings.iter().filter(|l| l.classification.tier == tier) {
        let r = listing.record;
        let c = &listing.classification;

        table.add_row(vec![
            Cell::new(r.id.to_string()),
            Cell::new(&r.building),
            Cell::new(fmt_text(r.floor)).set_alignment(CellAlignment::Right),
            Cell::new(r.locality()),
            Cell::new(fmt_unit(r.deposit, "만원")).set_alignment(CellAlignment::Right),
            Cell::new(fmt_unit(r.jeonse_ratio, "%")).set_alignment(CellAlignment::Right),
            Cell::new(fmt_text(r.lease_type.as_deref())),
            Cell::new(c.score.to_string()).set_alignment(CellAlignment::Right),
            Cell::new(c.tier.to_string())
                .fg(bucket_color(c.bucket))
                .set_alignment(CellAlignment::Center),
        ]);
    }

    println!("{}", table);
}

fn bucket_color(bucket: Bucket) -> Color {
    match bucket {
        Bucket::Safe => Color::Green,
        Bucket::Caution => Color::Yellow,
        Bucket::Risk => Color::Red,
        Bucket::Default => Color::DarkGrey,
    }
}

fn fmt_ratio(ratio: Option<f64>) -> String {
    match ratio {
        Some(v) => format!("{:.2}%", v),
        None => fmt_number(None),
    }
}
