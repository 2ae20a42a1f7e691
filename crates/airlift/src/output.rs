//! Report rendering: per-section result tables.
//!
//! Tables use `tabled`; status cells get color when stdout is an
//! interactive terminal and `NO_COLOR` is unset.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};

use airlift_core::{ApplyReport, GateReport, SectionResult, SectionVerdict};

/// Whether status cells should carry ANSI color.
fn should_color() -> bool {
    io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err()
}

fn paint(status: &str, color: bool) -> String {
    if !color {
        return status.to_owned();
    }
    match status {
        "applied" | "verified" => status.green().to_string(),
        "rejected" | "failed" => status.red().to_string(),
        _ => status.to_owned(),
    }
}

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct SectionRow {
    #[tabled(rename = "Class")]
    class: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Detail")]
    detail: String,
}

/// Render the verification-only report.
pub fn render_gate_report(report: &GateReport) -> String {
    let color = should_color();
    let rows: Vec<SectionRow> = report
        .iter()
        .map(|(class, verdict)| match verdict {
            SectionVerdict::Verified => SectionRow {
                class: class.to_owned(),
                status: paint("verified", color),
                detail: String::new(),
            },
            SectionVerdict::Rejected(err) => SectionRow {
                class: class.to_owned(),
                status: paint("rejected", color),
                detail: err.to_string(),
            },
        })
        .collect();

    render_table(&rows)
}

/// Render the itemized apply report.
pub fn render_apply_report(report: &ApplyReport) -> String {
    let color = should_color();
    let rows: Vec<SectionRow> = report
        .outcomes
        .iter()
        .map(|outcome| {
            let (status, detail) = match &outcome.result {
                SectionResult::Applied(update) => (
                    "applied",
                    format!(
                        "network {} slot {} ({} fields)",
                        update.network_id,
                        update.device_index,
                        update.payload.len()
                    ),
                ),
                SectionResult::Rejected(err) => ("rejected", err.to_string()),
                SectionResult::Failed(err) => ("failed", err.to_string()),
            };
            SectionRow {
                class: outcome.class.clone(),
                status: paint(status, color),
                detail,
            }
        })
        .collect();

    render_table(&rows)
}

fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Print rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}
