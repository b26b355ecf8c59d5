//! Terminal tables for binning results

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, CellAlignment, Color, Table};
use console::style;

use crate::pipeline::{FeatureAnalysis, FeatureBinning, WoeTable};

/// Conventional IV strength bands used in scorecard development
pub fn iv_strength(iv: f64) -> &'static str {
    match iv {
        v if v < 0.02 => "unpredictive",
        v if v < 0.1 => "weak",
        v if v < 0.3 => "medium",
        v if v < 0.5 => "strong",
        _ => "suspicious",
    }
}

fn strength_color(iv: f64) -> Color {
    match iv_strength(iv) {
        "unpredictive" => Color::DarkGrey,
        "weak" => Color::Yellow,
        "medium" => Color::Cyan,
        "strong" => Color::Green,
        _ => Color::Red,
    }
}

fn format_bound(value: f64) -> String {
    if value == f64::NEG_INFINITY {
        "-inf".to_string()
    } else if value == f64::INFINITY {
        "+inf".to_string()
    } else {
        format!("{}", value)
    }
}

/// Build the bin table of one feature
pub fn bin_table(table: &WoeTable) -> Table {
    let mut out = Table::new();
    out.load_preset(UTF8_FULL_CONDENSED);
    out.set_header(vec![
        Cell::new("Bin").add_attribute(Attribute::Bold),
        Cell::new("Interval").add_attribute(Attribute::Bold),
        Cell::new("Count").add_attribute(Attribute::Bold),
        Cell::new("Pop %").add_attribute(Attribute::Bold),
        Cell::new("Zeros").add_attribute(Attribute::Bold),
        Cell::new("Ones").add_attribute(Attribute::Bold),
        Cell::new("Event rate").add_attribute(Attribute::Bold),
        Cell::new("WoE").add_attribute(Attribute::Bold),
        Cell::new("IV").add_attribute(Attribute::Bold),
    ]);

    for (k, bin) in table.bins.iter().enumerate() {
        let closing = if bin.upper_bound.is_finite() { "]" } else { ")" };
        out.add_row(vec![
            Cell::new(k + 1),
            Cell::new(format!(
                "({}, {}{}",
                format_bound(bin.lower_bound),
                format_bound(bin.upper_bound),
                closing
            )),
            Cell::new(bin.count).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.1}", bin.population_pct)).set_alignment(CellAlignment::Right),
            Cell::new(bin.zeros).set_alignment(CellAlignment::Right),
            Cell::new(bin.ones).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.3}", bin.event_rate)).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.4}", bin.woe)).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.4}", bin.iv_contribution)).set_alignment(CellAlignment::Right),
        ]);
    }

    if let Some(missing) = &table.missing_bin {
        out.add_row(vec![
            Cell::new("-"),
            Cell::new("MISSING").fg(Color::DarkGrey),
            Cell::new(missing.count).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.1}", missing.population_pct)).set_alignment(CellAlignment::Right),
            Cell::new(missing.zeros).set_alignment(CellAlignment::Right),
            Cell::new(missing.ones).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.3}", missing.event_rate)).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.4}", missing.woe)).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.4}", missing.iv_contribution))
                .set_alignment(CellAlignment::Right),
        ]);
    }

    out
}

/// Print one feature's bins
pub fn display_feature(feature: &FeatureBinning) {
    println!();
    println!(
        "    {} {}  {} {}",
        style("◆").cyan().bold(),
        style(&feature.feature_name).white().bold(),
        style(format!("IV {:.4}", feature.iv)).yellow(),
        style(format!("({})", iv_strength(feature.iv))).dim()
    );

    for line in bin_table(&feature.table).to_string().lines() {
        println!("      {}", line);
    }
}

/// Build the IV ranking table across features
pub fn ranking_table(analysis: &FeatureAnalysis) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Rank").add_attribute(Attribute::Bold),
        Cell::new("Feature").add_attribute(Attribute::Bold),
        Cell::new("Bins").add_attribute(Attribute::Bold),
        Cell::new("IV").add_attribute(Attribute::Bold),
        Cell::new("Strength").add_attribute(Attribute::Bold),
    ]);

    for (rank, feature) in analysis.features.iter().enumerate() {
        table.add_row(vec![
            Cell::new(rank + 1),
            Cell::new(&feature.feature_name),
            Cell::new(feature.binning.num_bins).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.4}", feature.iv)).set_alignment(CellAlignment::Right),
            Cell::new(iv_strength(feature.iv)).fg(strength_color(feature.iv)),
        ]);
    }

    table
}

/// Print the ranking and any skipped features
pub fn display_summary(analysis: &FeatureAnalysis) {
    println!();
    println!(
        "    {} {}",
        style("📋").cyan(),
        style("IV RANKING").white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
    println!();

    for line in ranking_table(analysis).to_string().lines() {
        println!("    {}", line);
    }

    if !analysis.skipped.is_empty() {
        println!();
        println!(
            "    {} {}",
            style("📝").cyan(),
            style("SKIPPED FEATURES").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        for skipped in &analysis.skipped {
            println!(
                "        {} {} {}",
                style("•").dim(),
                skipped.feature_name,
                style(format!("({})", skipped.reason)).dim()
            );
        }
    }
}
