use crate::changelog::{ChangeLog, ChangeLogEntry};
use crate::model::FieldValue;
use chrono::{DateTime, Utc};

/// Change times are shown like `Oct 01 11:00` (UTC)
const CHANGE_TIME_FORMAT: &str = "%b %d %H:%M";

fn format_time(at: &DateTime<Utc>) -> String {
    at.format(CHANGE_TIME_FORMAT).to_string()
}

/// Make a value safe for a single Markdown table cell
fn cell(value: &FieldValue) -> String {
    value
        .to_string()
        .replace('|', "\\|")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn render_entry(out: &mut String, entry: &ChangeLogEntry, fields: &[String]) {
    out.push_str(&format!("### {}\n\n", entry.id));
    out.push_str(&format!(
        "_Last change: {} UTC_\n\n",
        format_time(&entry.last_change)
    ));
    out.push_str("| Field | Value |\n|---|---|\n");

    for field in fields {
        let Some(current) = entry.data.get(field) else {
            continue;
        };
        out.push_str(&format!("| {} | {} |\n", field, cell(current)));

        if let Some(at) = entry.changed.get(field) {
            let baseline = entry.first.get(field).cloned().unwrap_or_default();
            out.push_str(&format!(
                "| {} | ~~{}~~ |\n",
                format_time(at),
                cell(&baseline)
            ));
        }
    }
    out.push('\n');
}

/// Render a change log as Markdown for reviewers
///
/// One section per entry, in change log order. Each listed field shows its
/// current value; a changed field gets a second row with the change time and
/// the struck-through baseline value. Fields an entry does not carry are
/// skipped.
pub fn render_change_log(log: &ChangeLog, fields: &[String]) -> String {
    let mut out = String::new();
    out.push_str("## Change Log\n\n");

    if log.is_empty() {
        out.push_str("_No lasting changes._\n");
        return out;
    }

    out.push_str(&format!("**Entries**: {}\n\n", log.len()));
    for entry in log {
        render_entry(&mut out, entry, fields);
    }
    out
}
