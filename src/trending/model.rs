// src/trending/model.rs
// =============================================================================
// The data we pull off the trending page.
//
// RepositoryRecord is created once by the extractor and never changed after
// that. Numbers are kept as digit-only strings ("12345", never "12,345") so
// the presenter can re-apply grouping the same way every time.
// =============================================================================

use clap::ValueEnum;
use serde::Serialize;
use std::fmt;

pub const DEFAULT_DESCRIPTION: &str = "No description";
pub const DEFAULT_LANGUAGE: &str = "Unknown";
pub const DEFAULT_COUNT: &str = "0";

// One repository entry from the trending list, in rank order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryRecord {
    /// "owner / repo", whitespace collapsed
    pub name: String,
    /// Absolute repository URL
    pub url: String,
    pub description: String,
    pub language: String,
    /// Total stars, digits only
    pub stars: String,
    /// Stars gained within the selected date range, digits only
    pub stars_period: String,
}

impl RepositoryRecord {
    // Builds a record with every optional field at its default
    //
    // The extractor fills the rest in field by field.
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            description: DEFAULT_DESCRIPTION.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            stars: DEFAULT_COUNT.to_string(),
            stars_period: DEFAULT_COUNT.to_string(),
        }
    }
}

// Which trending window to ask GitHub for
//
// #[derive(ValueEnum)] lets clap accept "daily" / "weekly" / "monthly"
// directly on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum DateRange {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl DateRange {
    pub const ALL: [DateRange; 3] = [DateRange::Daily, DateRange::Weekly, DateRange::Monthly];

    pub fn as_str(&self) -> &'static str {
        match self {
            DateRange::Daily => "daily",
            DateRange::Weekly => "weekly",
            DateRange::Monthly => "monthly",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            DateRange::Daily => "Daily",
            DateRange::Weekly => "Weekly",
            DateRange::Monthly => "Monthly",
        }
    }

    // Value of the `since` query parameter
    //
    // Daily is GitHub's default, so no parameter is sent for it.
    pub fn since_param(&self) -> Option<&'static str> {
        match self {
            DateRange::Daily => None,
            DateRange::Weekly => Some("weekly"),
            DateRange::Monthly => Some("monthly"),
        }
    }

    pub fn period_label(&self) -> &'static str {
        match self {
            DateRange::Daily => "today",
            DateRange::Weekly => "this week",
            DateRange::Monthly => "this month",
        }
    }

    // The phrase GitHub prints next to the period star count
    pub fn star_phrase(&self) -> &'static str {
        match self {
            DateRange::Daily => "stars today",
            DateRange::Weekly => "stars this week",
            DateRange::Monthly => "stars this month",
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_has_defaults() {
        let record = RepositoryRecord::new("rust-lang / rust", "https://github.com/rust-lang/rust");
        assert_eq!(record.description, "No description");
        assert_eq!(record.language, "Unknown");
        assert_eq!(record.stars, "0");
        assert_eq!(record.stars_period, "0");
    }

    #[test]
    fn test_since_param() {
        assert_eq!(DateRange::Daily.since_param(), None);
        assert_eq!(DateRange::Weekly.since_param(), Some("weekly"));
        assert_eq!(DateRange::Monthly.since_param(), Some("monthly"));
    }

    #[test]
    fn test_default_range_is_daily() {
        assert_eq!(DateRange::default(), DateRange::Daily);
        assert_eq!(DateRange::default().to_string(), "daily");
    }
}
