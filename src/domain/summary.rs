//! Day summaries
//!
//! The log store never calls a summarizer itself; callers pass it the result
//! of a day view. [`HeuristicSummarizer`] works offline from the entries alone.

use crate::domain::{Category, LogEntry};
use regex::Regex;
use std::sync::OnceLock;

const NOTES_SNIPPET_LIMIT: usize = 300;

const PRACTICE_TIPS: [&str; 3] = [
    "Consider breaking sessions into focused 25-60 minute blocks for better retention.",
    "If you want faster progress, allocate >50% of time to one priority skill for several days.",
    "Try setting a small, measurable goal for the next session (example: implement one feature).",
];

/// Result of summarizing a set of entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub summary: String,
    pub insights: Vec<String>,
    pub is_error: bool,
}

/// Produces a summary for a set of entries
pub trait Summarizer {
    fn summarize(&self, entries: &[LogEntry]) -> Summary;
}

/// Aggregated hours for a set of entries
#[derive(Debug, Clone, PartialEq)]
pub struct DailyStats {
    pub total_hours: f64,
    /// Hours per skill, in first-seen order
    pub skills: Vec<(String, f64)>,
    /// Hours per category, highest first
    pub categories: Vec<(Category, f64)>,
}

impl DailyStats {
    pub fn from_entries(entries: &[LogEntry]) -> Self {
        let mut skills: Vec<(String, f64)> = Vec::new();
        let mut categories: Vec<(Category, f64)> = Vec::new();
        let mut total_hours = 0.0;

        for entry in entries {
            total_hours += entry.hours;

            match skills.iter_mut().find(|(s, _)| *s == entry.skill) {
                Some((_, hours)) => *hours += entry.hours,
                None => skills.push((entry.skill.clone(), entry.hours)),
            }
            match categories.iter_mut().find(|(c, _)| *c == entry.category) {
                Some((_, hours)) => *hours += entry.hours,
                None => categories.push((entry.category, entry.hours)),
            }
        }

        categories.sort_by(|a, b| b.1.total_cmp(&a.1));

        DailyStats {
            total_hours,
            skills,
            categories,
        }
    }

    /// Skill with the strictly highest total; ties go to the first seen
    pub fn top_skill(&self) -> Option<(&str, f64)> {
        let mut top: Option<(&str, f64)> = None;
        for (skill, hours) in &self.skills {
            if *hours > top.map_or(0.0, |(_, h)| h) {
                top = Some((skill.as_str(), *hours));
            }
        }
        top
    }
}

/// Offline summarizer built from totals and notes
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicSummarizer;

impl Summarizer for HeuristicSummarizer {
    fn summarize(&self, entries: &[LogEntry]) -> Summary {
        if entries.is_empty() {
            return Summary {
                summary: "No data yet - add some work to see a summary.".to_string(),
                insights: Vec::new(),
                is_error: false,
            };
        }

        let stats = DailyStats::from_entries(entries);
        let category_count = stats.categories.len();

        let mut summary = format!(
            "You spent {} hour{} across {} categor{}.",
            format_hours(stats.total_hours),
            if stats.total_hours == 1.0 { "" } else { "s" },
            category_count,
            if category_count == 1 { "y" } else { "ies" },
        );
        if let Some((skill, _)) = stats.top_skill() {
            summary.push_str(&format!(" Most time on {}.", skill));
        }

        let notes = entries
            .iter()
            .map(|e| e.notes.as_str())
            .filter(|n| !n.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        let snippet = notes_snippet(&notes);
        if !snippet.is_empty() {
            summary.push_str(&format!(" Notes: {}", snippet));
        }

        Summary {
            summary,
            insights: PRACTICE_TIPS.iter().map(|t| t.to_string()).collect(),
            is_error: false,
        }
    }
}

fn sentence_end_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"[.!?]\s+").expect("valid sentence regex"))
}

/// First two sentences of `notes`, capped at 300 characters
pub fn notes_snippet(notes: &str) -> String {
    let notes = notes.trim();
    if notes.is_empty() {
        return String::new();
    }

    let mut sentences = Vec::new();
    let mut start = 0;
    for m in sentence_end_regex().find_iter(notes) {
        sentences.push(&notes[start..m.start() + 1]);
        start = m.end();
        if sentences.len() == 2 {
            break;
        }
    }
    if sentences.len() < 2 && start < notes.len() {
        sentences.push(&notes[start..]);
    }

    sentences.join(" ").chars().take(NOTES_SNIPPET_LIMIT).collect()
}

/// Render hours with at most two decimals and no trailing zeros
pub fn format_hours(hours: f64) -> String {
    let formatted = format!("{:.2}", hours);
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}
