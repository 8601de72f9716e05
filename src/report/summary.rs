//! Preparation summary report

use std::time::Duration;

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::utils::format_pct;

/// Summary of one preparation run
#[derive(Debug, Default)]
pub struct PreparationSummary {
    pub input_rows: usize,
    pub input_columns: usize,
    pub engineered_columns: usize,
    pub train_rows: usize,
    pub test_rows: usize,
    pub train_churn_rate: f64,
    pub test_churn_rate: f64,
    pub features_out: usize,
    pub dropped_columns: Vec<String>,
    pub step_times: Vec<(String, Duration)>,
}

impl PreparationSummary {
    pub fn new(input_rows: usize, input_columns: usize) -> Self {
        Self {
            input_rows,
            input_columns,
            ..Default::default()
        }
    }

    pub fn record_step(&mut self, name: &str, elapsed: Duration) {
        self.step_times.push((name.to_string(), elapsed));
    }

    pub fn total_time(&self) -> Duration {
        self.step_times.iter().map(|(_, t)| *t).sum()
    }

    /// Render the summary table as a string
    pub fn render(&self) -> String {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![
            Cell::new("📁 Input"),
            Cell::new(format!("{} rows × {} columns", self.input_rows, self.input_columns)),
        ]);
        table.add_row(vec![
            Cell::new("🧪 Engineered columns"),
            Cell::new(self.engineered_columns),
        ]);
        table.add_row(vec![
            Cell::new("🏋️  Train rows"),
            Cell::new(format!("{} (churn {})", self.train_rows, format_pct(self.train_churn_rate))),
        ]);
        table.add_row(vec![
            Cell::new("🔍 Test rows"),
            Cell::new(format!("{} (churn {})", self.test_rows, format_pct(self.test_churn_rate))),
        ]);
        table.add_row(vec![
            Cell::new("🗑️  Dropped (ungrouped)"),
            Cell::new(self.dropped_columns.len()).fg(if self.dropped_columns.is_empty() {
                Color::White
            } else {
                Color::Yellow
            }),
        ]);
        table.add_row(vec![
            Cell::new("✅ Output features"),
            Cell::new(self.features_out)
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
        ]);
        table.add_row(vec![
            Cell::new("⏱  Total time"),
            Cell::new(format!("{:.2}s", self.total_time().as_secs_f64())),
        ]);

        table.to_string()
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("PREPARATION SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        for line in self.render().lines() {
            println!("    {}", line);
        }

        if !self.dropped_columns.is_empty() {
            println!();
            println!(
                "      {} {}:",
                style("Not covered by any transformer group").yellow(),
                style(format!("({})", self.dropped_columns.len())).dim()
            );
            for column in &self.dropped_columns {
                println!("        {} {}", style("•").dim(), column);
            }
        }
    }
}
