// src/display/theme.rs
// =============================================================================
// Emoji tables, colors and trending thresholds for the presenter.
//
// A Theme is built once in main() and moved into the Presenter. Nothing
// writes to it afterwards.
// =============================================================================

use crossterm::style::Color;
use std::collections::HashMap;

use crate::trending::DateRange;

// One step of the "how hot is it" scale
//
// Tiers are checked from the top; the first one whose `min` the period star
// count reaches wins.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendTier {
    pub min: u64,
    pub indicator: String,
    pub color: Color,
}

#[derive(Debug, Clone)]
pub struct Theme {
    languages: HashMap<String, String>,
    unknown_language: String,
    tiers: Vec<TrendTier>,
}

const LANGUAGE_EMOJIS: &[(&str, &str)] = &[
    ("Python", "🐍"),
    ("JavaScript", "🟨"),
    ("TypeScript", "🔷"),
    ("Java", "☕"),
    ("C++", "⚡"),
    ("C", "🔧"),
    ("C#", "💜"),
    ("Go", "🐹"),
    ("Rust", "🦀"),
    ("PHP", "🐘"),
    ("Ruby", "💎"),
    ("Swift", "🍎"),
    ("Kotlin", "🟣"),
    ("Dart", "🎯"),
    ("Shell", "🐚"),
    ("HTML", "🌐"),
    ("CSS", "🎨"),
    ("Vue", "💚"),
    ("Jupyter Notebook", "📓"),
    ("Lua", "🌙"),
    ("R", "📊"),
    ("Scala", "🔺"),
    ("Perl", "🐪"),
    ("Haskell", "🎓"),
    ("Clojure", "🔮"),
    ("Elixir", "💧"),
    ("Erlang", "📡"),
    ("Zig", "⚡"),
    ("MDX", "📝"),
];

impl Default for Theme {
    fn default() -> Self {
        Self {
            languages: LANGUAGE_EMOJIS
                .iter()
                .map(|(lang, emoji)| (lang.to_string(), emoji.to_string()))
                .collect(),
            unknown_language: "❓".to_string(),
            tiers: vec![
                TrendTier { min: 100, indicator: "🔥".to_string(), color: Color::Red },
                TrendTier { min: 50, indicator: "🚀".to_string(), color: Color::Yellow },
                TrendTier { min: 10, indicator: "📈".to_string(), color: Color::Green },
                TrendTier { min: 0, indicator: String::new(), color: Color::DarkGrey },
            ],
        }
    }
}

impl Theme {
    pub fn language_emoji(&self, language: &str) -> &str {
        self.languages
            .get(language)
            .map(String::as_str)
            .unwrap_or(&self.unknown_language)
    }

    pub fn range_emoji(&self, range: DateRange) -> &'static str {
        match range {
            DateRange::Daily => "📅",
            DateRange::Weekly => "📊",
            DateRange::Monthly => "📈",
        }
    }

    // Picks the tier for a period star count
    //
    // Falls back to the last tier if the table has no zero floor.
    pub fn tier(&self, stars_period: u64) -> Option<&TrendTier> {
        self.tiers
            .iter()
            .find(|tier| stars_period >= tier.min)
            .or_else(|| self.tiers.last())
    }
}
