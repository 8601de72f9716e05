//! Churn profile tables

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, CellAlignment, Table};
use console::style;

use crate::pipeline::{ChurnOverview, ChurnSplitMean, GroupChurnRate};
use crate::utils::format_pct;

fn section(title: &str) {
    println!();
    println!("    {} {}", style("📊").cyan(), style(title).white().bold());
    println!("    {}", style("─".repeat(50)).dim());
}

fn print_indented(table: &Table) {
    for line in table.to_string().lines() {
        println!("    {}", line);
    }
}

/// Class balance table
pub fn render_overview(overview: &ChurnOverview) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Status").add_attribute(Attribute::Bold),
        Cell::new("Users").add_attribute(Attribute::Bold),
        Cell::new("Share").add_attribute(Attribute::Bold),
    ]);

    let share = |n: usize| {
        if overview.users > 0 {
            format_pct(n as f64 / overview.users as f64)
        } else {
            format_pct(0.0)
        }
    };

    table.add_row(vec![
        Cell::new("Stayed"),
        Cell::new(overview.stayed).set_alignment(CellAlignment::Right),
        Cell::new(share(overview.stayed)).set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![
        Cell::new("Churned"),
        Cell::new(overview.churned).set_alignment(CellAlignment::Right),
        Cell::new(share(overview.churned)).set_alignment(CellAlignment::Right),
    ]);
    table
}

/// Churn rate per group value
pub fn render_group_rates(column: &str, rates: &[GroupChurnRate]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new(column).add_attribute(Attribute::Bold),
        Cell::new("Users").add_attribute(Attribute::Bold),
        Cell::new("Churn rate").add_attribute(Attribute::Bold),
    ]);
    for rate in rates {
        table.add_row(vec![
            Cell::new(&rate.value),
            Cell::new(rate.users).set_alignment(CellAlignment::Right),
            Cell::new(format_pct(rate.churn_rate)).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

/// Numeric means per churn status
pub fn render_means(means: &[ChurnSplitMean]) -> Table {
    let fmt = |v: Option<f64>| v.map_or_else(|| "-".to_string(), |v| format!("{:.3}", v));

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Feature").add_attribute(Attribute::Bold),
        Cell::new("Stayed mean").add_attribute(Attribute::Bold),
        Cell::new("Churned mean").add_attribute(Attribute::Bold),
    ]);
    for mean in means {
        table.add_row(vec![
            Cell::new(&mean.column),
            Cell::new(fmt(mean.stayed_mean)).set_alignment(CellAlignment::Right),
            Cell::new(fmt(mean.churned_mean)).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

/// Print the full churn profile
pub fn display_profile(
    overview: &ChurnOverview,
    group_rates: &[(String, Vec<GroupChurnRate>)],
    means: &[ChurnSplitMean],
) {
    section("CHURN DISTRIBUTION");
    print_indented(&render_overview(overview));

    for (column, rates) in group_rates {
        section(&format!("CHURN RATE BY {}", column.to_uppercase()));
        print_indented(&render_group_rates(column, rates));
    }

    section("NUMERIC MEANS BY CHURN STATUS");
    print_indented(&render_means(means));
    println!();
}
