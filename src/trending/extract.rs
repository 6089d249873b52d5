// src/trending/extract.rs
// =============================================================================
// This module turns the raw trending page HTML into RepositoryRecords.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser)
//
// Every repository on the page is one <article class="Box-row"> fragment.
// Fragments are read in document order, which is the trending rank.
//
// Failure policy:
// - name and url are mandatory; a fragment without them is skipped
// - every other field falls back to its default on its own
// - one bad fragment never stops the rest of the page from being read
// =============================================================================

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use super::model::{DateRange, RepositoryRecord};
use crate::error::ExtractError;

const ARTICLE: &str = "article.Box-row";
const TITLE_LINK: &str = "h2.h3 a";
const DESCRIPTION: &str = "p.col-9";
const LANGUAGE: &str = r#"span[itemprop="programmingLanguage"]"#;
const STARGAZERS: &str = r#"a[href$="/stargazers"]"#;
const BADGE: &str = "span.d-inline-block";

// First run of digits, allowing "1,234,567" style grouping
const GROUPED_NUMBER: &str = r"(\d+(?:,\d+)*)";

// Holds the compiled selectors so we only parse them once per session
pub struct TrendingExtractor {
    site_base: String,
    article: Selector,
    title_link: Selector,
    description: Selector,
    language: Selector,
    stargazers: Selector,
    badge: Selector,
    number: Regex,
}

impl TrendingExtractor {
    // Compiles all selectors
    //
    // Parameters:
    //   site_base: prefix for the relative repository hrefs (e.g. "https://github.com")
    pub fn new(site_base: &str) -> Result<Self, ExtractError> {
        Ok(Self {
            site_base: site_base.trim_end_matches('/').to_string(),
            article: compile(ARTICLE)?,
            title_link: compile(TITLE_LINK)?,
            description: compile(DESCRIPTION)?,
            language: compile(LANGUAGE)?,
            stargazers: compile(STARGAZERS)?,
            badge: compile(BADGE)?,
            number: Regex::new(GROUPED_NUMBER)?,
        })
    }

    // Extracts all well-formed repository records from the page
    //
    // Returns: records in the same order the page lists them
    pub fn extract(&self, markup: &str) -> Vec<RepositoryRecord> {
        let document = Html::parse_document(markup);

        document
            .select(&self.article)
            .filter_map(|article| self.extract_record(article))
            .collect()
    }

    // Reads one <article> fragment, or None if it has no name/url
    fn extract_record(&self, article: ElementRef<'_>) -> Option<RepositoryRecord> {
        let (name, url) = self.name_and_url(article)?;

        let mut record = RepositoryRecord::new(name, url);
        if let Some(description) = self.description(article) {
            record.description = description;
        }
        if let Some(language) = self.language(article) {
            record.language = language;
        }
        if let Some(stars) = self.stars(article) {
            record.stars = stars;
        }
        if let Some(stars_period) = self.stars_period(article) {
            record.stars_period = stars_period;
        }

        Some(record)
    }

    fn name_and_url(&self, article: ElementRef<'_>) -> Option<(String, String)> {
        let link = article.select(&self.title_link).next()?;

        let href = link.value().attr("href")?.trim();
        if href.is_empty() {
            return None;
        }

        let name = collapse_whitespace(&element_text(link));
        if name.is_empty() {
            return None;
        }

        let url = if href.starts_with('/') {
            format!("{}{}", self.site_base, href)
        } else {
            format!("{}/{}", self.site_base, href)
        };

        Some((name, url))
    }

    fn description(&self, article: ElementRef<'_>) -> Option<String> {
        let text = element_text(article.select(&self.description).next()?);
        let text = text.trim();
        (!text.is_empty()).then(|| text.to_string())
    }

    fn language(&self, article: ElementRef<'_>) -> Option<String> {
        let text = element_text(article.select(&self.language).next()?);
        let text = text.trim();
        (!text.is_empty()).then(|| text.to_string())
    }

    fn stars(&self, article: ElementRef<'_>) -> Option<String> {
        let text = element_text(article.select(&self.stargazers).next()?);
        digits_only(&text.trim().replace(',', ""))
    }

    // The "1,234 stars today" badge
    //
    // There are several span.d-inline-block elements per fragment (the
    // language wrapper is one of them), so we look for the first one that
    // actually carries a star phrase.
    fn stars_period(&self, article: ElementRef<'_>) -> Option<String> {
        let text = article
            .select(&self.badge)
            .map(element_text)
            .find(|text| has_star_phrase(text))?;

        let captures = self.number.captures(&text)?;
        digits_only(&captures.get(1)?.as_str().replace(',', ""))
    }
}

fn compile(css: &'static str) -> Result<Selector, ExtractError> {
    Selector::parse(css).map_err(|e| ExtractError::Selector {
        css,
        message: e.to_string(),
    })
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn has_star_phrase(text: &str) -> bool {
    DateRange::ALL.iter().any(|range| text.contains(range.star_phrase()))
}

// Keeps the digit-only invariant: anything else is not a count
fn digits_only(text: &str) -> Option<String> {
    if !text.is_empty() && text.chars().all(|c| c.is_ascii_digit()) {
        Some(text.to_string())
    } else {
        None
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why compile the selectors once in new()?
//    - Selector::parse and Regex::new do real work (parsing the pattern)
//    - The extractor is built once and reused for every page
//    - A broken built-in selector becomes an ExtractError at startup instead
//      of a panic in the middle of a listing
//
// 2. What does filter_map do here?
//    - extract_record returns Option<RepositoryRecord>
//    - filter_map keeps the Some values and drops the None ones
//    - So a malformed <article> is skipped and the rest keep their order
//
// 3. Why does name_and_url use ? on Options?
//    - Inside a function returning Option, `x?` means "return None if x is None"
//    - It reads like the Result version, just without an error value
// -----------------------------------------------------------------------------
