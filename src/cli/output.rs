//! Output formatting utilities

use crate::domain::summary::format_hours;
use crate::domain::{Category, DailyStats, LogEntry, Summary, Theme};
use std::fmt::Write;

const RESET: &str = "\x1b[0m";

/// Accent coloring for headings, derived from the theme preference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    accent: Option<&'static str>,
}

impl Style {
    /// No escape codes, for pipes and tests
    pub fn plain() -> Self {
        Style { accent: None }
    }

    pub fn for_theme(theme: Theme) -> Self {
        let accent = match theme {
            Theme::Dark => "\x1b[1;36m",
            Theme::Light => "\x1b[1;34m",
        };
        Style {
            accent: Some(accent),
        }
    }

    fn accent(&self, text: &str) -> String {
        match self.accent {
            Some(code) => format!("{}{}{}", code, text, RESET),
            None => text.to_string(),
        }
    }
}

/// Format one day's entries grouped by category, with a total
pub fn format_day(entries: &[LogEntry], show_ids: bool, style: Style) -> String {
    if entries.is_empty() {
        return "No logs for this day yet.\n".to_string();
    }

    let mut categories: Vec<Category> = Vec::new();
    for entry in entries {
        if !categories.contains(&entry.category) {
            categories.push(entry.category);
        }
    }
    categories.sort_by_key(|c| c.as_str());

    let mut output = String::new();
    for category in categories {
        let _ = writeln!(output, "{}", style.accent(category.as_str()));
        for entry in entries.iter().filter(|e| e.category == category) {
            let _ = write!(output, "  - {}  {}h", entry.skill, format_hours(entry.hours));
            if show_ids {
                let _ = write!(output, "  [{}]", entry.id);
            }
            output.push('\n');
            if !entry.notes.is_empty() {
                let _ = writeln!(output, "      {}", entry.notes);
            }
        }
    }

    let total: f64 = entries.iter().map(|e| e.hours).sum();
    let _ = writeln!(output, "Total hours: {}", format_hours(total));
    output
}

/// Format all entries, one per line, in the order given
pub fn format_entry_list(entries: &[LogEntry]) -> String {
    if entries.is_empty() {
        return "No entries found\n".to_string();
    }

    let mut output = String::new();
    for entry in entries {
        let _ = writeln!(
            output,
            "{}  {:<11}  {}  {}h  [{}]",
            entry.date.format("%Y-%m-%d"),
            entry.category.as_str(),
            entry.skill,
            format_hours(entry.hours),
            entry.id
        );
    }
    output
}

/// Format a summary with the per-category breakdown and insights
pub fn format_summary(summary: &Summary, stats: &DailyStats, style: Style) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "{}", summary.summary);

    if !stats.skills.is_empty() {
        let _ = writeln!(output, "\n{}", style.accent("Totals"));
        let _ = writeln!(output, "  Total hours: {}", format_hours(stats.total_hours));
        let _ = writeln!(output, "  Categories: {}", stats.categories.len());
        let _ = writeln!(output, "  Skills: {}", stats.skills.len());
        if let Some((skill, hours)) = stats.top_skill() {
            let _ = writeln!(output, "  Top skill: {} ({}h)", skill, format_hours(hours));
        }
    }

    if !stats.categories.is_empty() {
        let _ = writeln!(output, "\n{}", style.accent("By category"));
        for (category, hours) in &stats.categories {
            let _ = writeln!(output, "  {}: {}h", category, format_hours(*hours));
        }
    }

    if !summary.insights.is_empty() {
        let _ = writeln!(output, "\n{}", style.accent("Insights"));
        for insight in &summary.insights {
            let _ = writeln!(output, "  • {}", insight);
        }
    }

    output
}
