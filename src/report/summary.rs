//! Batch run summary: terminal table and optional JSON export.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;
use serde::Serialize;

use crate::batch::RunResult;
use crate::error::PressmapError;

/// Summary of one batch run.
#[derive(Debug)]
pub struct RunSummary {
    result: RunResult,
    elapsed: Duration,
    dry_run: bool,
}

impl RunSummary {
    pub fn new(result: RunResult, elapsed: Duration, dry_run: bool) -> Self {
        Self {
            result,
            elapsed,
            dry_run,
        }
    }

    pub fn result(&self) -> &RunResult {
        &self.result
    }

    pub fn display(&self) {
        println!();
        let heading = if self.dry_run {
            "DRY RUN SUMMARY"
        } else {
            "RUN SUMMARY"
        };
        println!(
            "    {} {}",
            style("📋").cyan(),
            style(heading).white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![
            Cell::new("Rows attempted"),
            Cell::new(self.result.attempted),
        ]);
        table.add_row(vec![
            Cell::new("Succeeded"),
            Cell::new(self.result.success)
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
        ]);
        table.add_row(vec![
            Cell::new("Failed"),
            Cell::new(self.result.failure_count()).fg(if self.result.failures.is_empty() {
                Color::White
            } else {
                Color::Red
            }),
        ]);
        table.add_row(vec![
            Cell::new("Elapsed"),
            Cell::new(format!("{:.1}s", self.elapsed.as_secs_f64())),
        ]);
        if self.result.cancelled {
            table.add_row(vec![
                Cell::new("Cancelled"),
                Cell::new("yes").fg(Color::Yellow),
            ]);
        }

        for line in table.to_string().lines() {
            println!("    {}", line);
        }

        if !self.result.failures.is_empty() {
            println!();
            println!(
                "    {} {}",
                style("📝").cyan(),
                style("FAILED ROWS").white().bold()
            );
            println!("    {}", style("─".repeat(50)).dim());
            for failure in &self.result.failures {
                println!(
                    "      {} {}",
                    style("•").dim(),
                    style(PressmapError::from(failure)).red()
                );
            }

            let rows = self
                .result
                .failed_rows()
                .iter()
                .map(usize::to_string)
                .collect::<Vec<_>>()
                .join(",");
            println!();
            println!(
                "      Re-run only the failed rows with {}",
                style(format!("--rows {}", rows)).cyan()
            );
        }
    }
}

#[derive(Serialize)]
struct ReportDocument<'a> {
    generated_at: String,
    #[serde(flatten)]
    result: &'a RunResult,
}

/// Write the run result as a JSON report.
pub fn write_report(path: &Path, result: &RunResult) -> Result<()> {
    let document = ReportDocument {
        generated_at: Utc::now().to_rfc3339(),
        result,
    };
    let json = serde_json::to_string_pretty(&document)?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write report: {}", path.display()))?;
    Ok(())
}
