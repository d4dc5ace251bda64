//! Practice log entries and boundary validation

use crate::error::{Result, SkillogError};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fixed set of practice categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub enum Category {
    Programming,
    Design,
    Languages,
    Personal,
    #[default]
    Other,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Programming,
        Category::Design,
        Category::Languages,
        Category::Personal,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Programming => "Programming",
            Category::Design => "Design",
            Category::Languages => "Languages",
            Category::Personal => "Personal",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "programming" => Ok(Category::Programming),
            "design" => Ok(Category::Design),
            "languages" => Ok(Category::Languages),
            "personal" => Ok(Category::Personal),
            "other" => Ok(Category::Other),
            _ => Err(format!(
                "Invalid category: '{}'. Valid categories are: programming, design, languages, personal, other",
                s
            )),
        }
    }
}

/// A single practice record.
///
/// Entries are only built through [`EntryDraft::into_entry`], so every
/// accepted entry has a non-empty skill and positive hours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: String,
    pub date: NaiveDate,
    pub skill: String,
    #[serde(default)]
    pub category: Category,
    pub hours: f64,
    #[serde(default)]
    pub notes: String,
    pub timestamp: DateTime<Utc>,
}

/// Unvalidated user input for a new entry
#[derive(Debug, Clone, Default)]
pub struct EntryDraft {
    pub skill: String,
    pub category: Option<Category>,
    pub hours: f64,
    pub notes: Option<String>,
}

impl EntryDraft {
    pub fn new(skill: impl Into<String>, hours: f64) -> Self {
        EntryDraft {
            skill: skill.into(),
            hours,
            ..Default::default()
        }
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Check the skill and hours invariants without building an entry
    pub fn validate(&self) -> Result<()> {
        if self.skill.trim().is_empty() {
            return Err(SkillogError::Validation(
                "Please enter a skill name.".to_string(),
            ));
        }
        if !self.hours.is_finite() || self.hours <= 0.0 {
            return Err(SkillogError::Validation(
                "Enter a valid number of hours (> 0).".to_string(),
            ));
        }
        Ok(())
    }

    /// Validate and stamp the draft with a fresh id and the creation instant.
    ///
    /// `date` is the UTC calendar day of `now`, the same boundary legacy
    /// records were written with.
    pub fn into_entry(self, now: DateTime<Utc>) -> Result<LogEntry> {
        self.validate()?;

        Ok(LogEntry {
            id: uuid::Uuid::new_v4().to_string(),
            date: now.date_naive(),
            skill: self.skill.trim().to_string(),
            category: self.category.unwrap_or_default(),
            hours: self.hours,
            notes: self.notes.map(|n| n.trim().to_string()).unwrap_or_default(),
            timestamp: now,
        })
    }
}
