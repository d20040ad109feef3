use std::io::{self, Write};

use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone};
use ng_core::Report;
use ng_guardian::LoadState;

pub const EMPTY_STATE: &str = "No reports found.";

pub fn format_date<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    date.format("%b %d, %Y").to_string()
}

pub fn format_time<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    date.format("%-I:%M:%S %p").to_string()
}

pub fn render_report(report: &Report) -> String {
    let mut lines = vec![report.title().to_string()];

    match report.author() {
        Some(author) => lines.push(format!("  {} | by {}", report.section(), author)),
        None => lines.push(format!("  {}", report.section())),
    }

    // Shown in the reader's local time zone.
    match report.published_at_utc().map(|date| date.with_timezone(&Local)) {
        Some(date) => lines.push(format!("  {}  {}", format_date(&date), format_time(&date))),
        None => lines.push(format!("  {}", report.published_at())),
    }

    lines.push(format!("  {}", report.url()));
    lines.join("\n")
}

/// Writes `state` for the user. Returns `false` when there was nothing
/// successful to show.
pub fn render_state<W: Write, E: Write>(
    state: &LoadState,
    json: bool,
    out: &mut W,
    err: &mut E,
) -> io::Result<bool> {
    match state {
        LoadState::Loaded(reports) if json => {
            serde_json::to_writer_pretty(&mut *out, reports)?;
            writeln!(out)?;
            Ok(true)
        }
        LoadState::Loaded(reports) if reports.is_empty() => {
            writeln!(out, "{}", EMPTY_STATE)?;
            Ok(true)
        }
        LoadState::Loaded(reports) => {
            for report in reports {
                writeln!(out, "{}\n", render_report(report))?;
            }
            Ok(true)
        }
        LoadState::Failed(message) => {
            writeln!(err, "Failed to load reports: {}", message)?;
            Ok(false)
        }
        LoadState::Idle => {
            writeln!(err, "Nothing was loaded")?;
            Ok(false)
        }
    }
}
