/// Human readable formatting of entries, statistics and users
///
/// Everything here returns strings; the binary decides where they go.

use crate::analytics::WeightStatistics;
use crate::commands::UserListing;
use crate::config::AppConfig;
use crate::domain::{User, WeightEntry};

pub fn format_entry(entry: &WeightEntry, config: &AppConfig) -> String {
    let unit = entry.unit.unwrap_or(config.default_unit);

    let mut out = format!(
        "* Weight Entry ID: {}\n* Date: {}\n* Weight: {:.2} {}\n",
        entry.id,
        config.format_date(entry.valid_date()),
        entry.weight,
        unit
    );
    if let Some(note) = entry.note.as_deref().filter(|n| !n.is_empty()) {
        out.push_str(&format!("* Note: {}\n", note));
    }
    if let Some(owner) = entry.owner {
        out.push_str(&format!("* UserID: {}\n", owner));
    }
    out
}

pub fn format_entries(entries: &[WeightEntry], config: &AppConfig) -> String {
    if entries.is_empty() {
        return "No weight entries found.\n".to_string();
    }

    let mut out = format!("Found {} weight entries:\n\n", entries.len());
    for entry in entries {
        out.push_str(&format_entry(entry, config));
        out.push('\n');
    }
    out
}

/// Statistics report; `verbose` adds the details of the referenced entries
pub fn format_statistics(stats: &WeightStatistics, config: &AppConfig, verbose: bool) -> String {
    let unit = config.default_unit;
    let mut out = format!(
        "Weight Tracking Statistics\n=========================\nTotal Entries: {}\n",
        stats.total_entries
    );

    if stats.is_empty() {
        out.push_str("\nNo weight entries recorded yet.\n");
        return out;
    }

    out.push_str(&format!("Average Weight: {:.2} {}\n", stats.average_weight, unit));
    out.push_str(&format!(
        "Weight Range: {:.2} {} ({:.2} - {:.2})\n\n",
        stats.weight_range, unit, stats.min_weight, stats.max_weight
    ));

    out.push_str(&extreme_lines("Minimum", stats.min_weight, stats.min_entry.as_ref(), config, verbose));
    out.push_str(&extreme_lines("Maximum", stats.max_weight, stats.max_entry.as_ref(), config, verbose));
    out.push('\n');

    match (&stats.first_entry, &stats.last_entry) {
        (Some(first), Some(last)) if stats.span_days() > 0 => {
            if verbose {
                out.push_str(&format!(
                    "Time Span: {} days\n  From: {} (Entry ID: {})\n  To: {} (Entry ID: {})\n",
                    stats.span_days(),
                    config.format_date(first.valid_date()),
                    first.id,
                    config.format_date(last.valid_date()),
                    last.id
                ));
            } else {
                out.push_str(&format!(
                    "Time Span: {} days (from Entry ID: {} to Entry ID: {})\n",
                    stats.span_days(),
                    first.id,
                    last.id
                ));
            }
        }
        _ => out.push_str("Time Span: Unable to calculate (insufficient valid dates)\n"),
    }

    out
}

fn extreme_lines(
    label: &str,
    weight: f64,
    entry: Option<&WeightEntry>,
    config: &AppConfig,
    verbose: bool,
) -> String {
    let unit = config.default_unit;
    let headline = format!("{} Weight: {:.2} {}", label, weight, unit);

    match entry {
        None => format!("{}\n", headline),
        Some(entry) if verbose => format!(
            "{}\n  Entry: ID={}, Date={}, Weight={:.2} {}, Note={}\n",
            headline,
            entry.id,
            config.format_date(entry.valid_date()),
            entry.weight,
            entry.unit.unwrap_or(unit),
            entry.note.as_deref().unwrap_or("")
        ),
        Some(entry) => format!("{} (Entry ID: {})\n", headline, entry.id),
    }
}

pub fn format_user(user: &User) -> String {
    format!(" * User ID: {}\n * Username: {}\n", user.id, user.username)
}

pub fn format_user_list(users: &[UserListing]) -> String {
    if users.is_empty() {
        return "No users registered.\n".to_string();
    }

    users
        .iter()
        .map(|listing| {
            if listing.current {
                format!("* {} (current)\n", listing.user.username)
            } else {
                format!("* {}\n", listing.user.username)
            }
        })
        .collect()
}
