// src/display/presenter.rs
// =============================================================================
// Pure formatting: records in, strings out.
//
// The presenter never reads input and never writes to the terminal itself.
// Callers decide where the strings go, which keeps the navigator testable
// against a plain Vec<u8>.
//
// Styling (bold, dim, colors) comes from crossterm and is only applied when
// stdout is a real terminal; otherwise the output is plain text.
// =============================================================================

use crossterm::style::{style, Color, Stylize};

use super::theme::Theme;
use crate::trending::{DateRange, RepositoryRecord};

// ANSI "cursor home + clear screen"
pub const CLEAR_SCREEN: &str = "\x1b[H\x1b[2J";

pub const DEFAULT_TERMINAL_WIDTH: usize = 80;
const MAX_CONSOLE_WIDTH: usize = 120;
const MIN_CONSOLE_WIDTH: usize = 20;
const DESCRIPTION_INDENT: &str = "    ";

#[derive(Debug, Clone, Copy)]
enum Tone {
    Bold,
    Dim,
    Fg(Color),
}

pub struct Presenter {
    theme: Theme,
    width: usize,
    ansi: bool,
}

impl Presenter {
    // Parameters:
    //   theme: emoji tables and thresholds
    //   terminal_width: full terminal width in columns
    //   ansi: whether to emit styling and screen-clear sequences
    pub fn new(theme: Theme, terminal_width: usize, ansi: bool) -> Self {
        let width = terminal_width
            .saturating_sub(4)
            .clamp(MIN_CONSOLE_WIDTH, MAX_CONSOLE_WIDTH);
        Self { theme, width, ansi }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn clear_screen(&self) -> &'static str {
        if self.ansi {
            CLEAR_SCREEN
        } else {
            ""
        }
    }

    fn paint(&self, text: &str, tone: Tone) -> String {
        if !self.ansi || text.is_empty() {
            return text.to_string();
        }
        match tone {
            Tone::Bold => style(text).bold().to_string(),
            Tone::Dim => style(text).dim().to_string(),
            Tone::Fg(color) => style(text).with(color).to_string(),
        }
    }

    pub fn header(&self, range: DateRange) -> String {
        format!(
            "\n{}{}\n",
            self.paint("🚀 GitHub Trending Repositories", Tone::Bold),
            self.paint(
                &format!(" - {} {}", range.title(), self.theme.range_emoji(range)),
                Tone::Dim
            ),
        )
    }

    // Indicator and color for a period star count ("0" for anything unparsable)
    pub fn trend(&self, stars_period: &str) -> (&str, Color) {
        let period = stars_period.parse::<u64>().unwrap_or(0);
        match self.theme.tier(period) {
            Some(tier) => (tier.indicator.as_str(), tier.color),
            None => ("", Color::DarkGrey),
        }
    }

    // One summary line, e.g. " 3. octo / cat  🦀  ⭐1,234  🔥+150"
    pub fn repo_line(&self, index: usize, repo: &RepositoryRecord) -> String {
        let (indicator, color) = self.trend(&repo.stars_period);

        format!(
            "{}{}  {}  {}  {}",
            self.paint(&format!("{:2}. ", index), Tone::Dim),
            self.paint(&repo.name, Tone::Bold),
            self.theme.language_emoji(repo.language.trim()),
            self.paint(&format!("⭐{}", format_number(&repo.stars)), Tone::Dim),
            self.paint(
                &format!("{}+{}", indicator, format_number(&repo.stars_period)),
                Tone::Fg(color)
            ),
        )
    }

    // Description wrapped to the console width, indented under the name
    pub fn description_lines(&self, description: &str) -> Vec<String> {
        wrap(description, self.width - DESCRIPTION_INDENT.len())
            .into_iter()
            .map(|line| format!("{}{}", DESCRIPTION_INDENT, self.paint(&line, Tone::Dim)))
            .collect()
    }

    // The whole listing screen for everything displayed so far
    //
    // Parameters:
    //   displayed: the displayed prefix, in rank order
    //   remaining: how many records are still hidden
    pub fn listing(&self, displayed: &[RepositoryRecord], remaining: usize, range: DateRange) -> String {
        let mut out = self.header(range);
        out.push('\n');

        for (i, repo) in displayed.iter().enumerate() {
            out.push_str(&self.repo_line(i + 1, repo));
            out.push('\n');
            for line in self.description_lines(&repo.description) {
                out.push_str(&line);
                out.push('\n');
            }
            out.push('\n');
        }

        if remaining > 0 {
            out.push_str(&self.paint(&format!("({} more repositories)", remaining), Tone::Dim));
            out.push('\n');
        }
        out.push_str(&self.footer(displayed.len(), displayed.len() + remaining));
        out
    }

    pub fn footer(&self, shown: usize, total: usize) -> String {
        format!(
            "{} {} {}\n",
            self.paint("Showing", Tone::Dim),
            self.paint(&format!("{} of {}", shown, total), Tone::Bold),
            self.paint("trending repositories", Tone::Dim),
        )
    }

    pub fn prompt(&self, shown: usize, remaining: usize) -> String {
        if remaining > 0 {
            format!("Enter repo number (1-{}), Enter for more, 'q' to quit: ", shown)
        } else {
            format!("Enter repo number (1-{}) or 'q' to quit: ", shown)
        }
    }

    pub fn out_of_range(&self, max: usize) -> String {
        self.paint(&format!("Please enter a number between 1 and {}", max), Tone::Fg(Color::Red))
    }

    pub fn invalid_input(&self) -> String {
        self.paint("Please enter a valid number, Enter, or 'q'", Tone::Fg(Color::Red))
    }

    // The detail header shown above a README
    pub fn repo_header(&self, repo: &RepositoryRecord, range: DateRange) -> String {
        format!(
            "📦 Name: {}\n🔗 URL: {}\n🏷️  Language: {}\n⭐ Stars: {} (+{} {})\n📝 Description: {}\n",
            self.paint(&repo.name, Tone::Bold),
            repo.url,
            repo.language,
            format_number(&repo.stars),
            format_number(&repo.stars_period),
            range.period_label(),
            repo.description,
        )
    }
}

// Groups a digit string with commas: "1234567" -> "1,234,567"
//
// Anything that isn't a plain number is returned unchanged ("0" if empty).
pub fn format_number(number: &str) -> String {
    let raw = number.replace(',', "");
    if raw.is_empty() {
        return "0".to_string();
    }
    if !raw.chars().all(|c| c.is_ascii_digit()) {
        return number.to_string();
    }

    let raw = raw.trim_start_matches('0');
    if raw.is_empty() {
        return "0".to_string();
    }

    let len = raw.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in raw.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

// Greedy word wrap on character counts
//
// Words longer than the width get a line of their own rather than being cut.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if current_len > 0 && current_len + 1 + word_len > width {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += word_len;
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn presenter() -> Presenter {
        Presenter::new(Theme::default(), DEFAULT_TERMINAL_WIDTH, false)
    }

    fn record(name: &str, stars: &str, period: &str) -> RepositoryRecord {
        let mut repo = RepositoryRecord::new(name, format!("https://github.com/{}", name));
        repo.language = "Rust".to_string();
        repo.stars = stars.to_string();
        repo.stars_period = period.to_string();
        repo.description = "A blazingly fast thing".to_string();
        repo
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number("0"), "0");
        assert_eq!(format_number(""), "0");
        assert_eq!(format_number("999"), "999");
        assert_eq!(format_number("1000"), "1,000");
        assert_eq!(format_number("1234567"), "1,234,567");
        assert_eq!(format_number("12,345"), "12,345");
        assert_eq!(format_number("n/a"), "n/a");
    }

    #[test]
    fn test_wrap() {
        assert_eq!(wrap("one two three four", 9), vec!["one two", "three", "four"]);
        assert_eq!(wrap("   ", 10), Vec::<String>::new());
        assert_eq!(wrap("supercalifragilistic word", 5), vec!["supercalifragilistic", "word"]);
    }

    #[test]
    fn test_repo_line_plain() {
        let line = presenter().repo_line(3, &record("octo / cat", "1234", "150"));
        assert_eq!(line, " 3. octo / cat  🦀  ⭐1,234  🔥+150");
    }

    #[test]
    fn test_repo_line_cold_repo_has_no_indicator() {
        let line = presenter().repo_line(12, &record("a / b", "7", "2"));
        assert_eq!(line, "12. a / b  🦀  ⭐7  +2");
    }

    #[test]
    fn test_trend_tiers() {
        let p = presenter();
        assert_eq!(p.trend("150"), ("🔥", Color::Red));
        assert_eq!(p.trend("50"), ("🚀", Color::Yellow));
        assert_eq!(p.trend("12"), ("📈", Color::Green));
        assert_eq!(p.trend("garbage"), ("", Color::DarkGrey));
    }

    #[test]
    fn test_plain_presenter_emits_no_escape_codes() {
        let p = presenter();
        let out = p.listing(&[record("a / b", "10", "1")], 0, DateRange::Weekly);
        assert!(!out.contains('\x1b'));
        assert_eq!(p.clear_screen(), "");
        assert!(out.contains("🚀 GitHub Trending Repositories - Weekly 📊"));
    }

    #[test]
    fn test_ansi_presenter_styles_output() {
        let p = Presenter::new(Theme::default(), DEFAULT_TERMINAL_WIDTH, true);
        assert!(p.repo_line(1, &record("a / b", "10", "1")).contains('\x1b'));
        assert_eq!(p.clear_screen(), CLEAR_SCREEN);
    }

    #[test]
    fn test_listing_shows_remaining_hint_and_footer() {
        let p = presenter();
        let shown = vec![record("a / b", "1", "1"), record("c / d", "2", "2")];

        let out = p.listing(&shown, 3, DateRange::Daily);
        assert!(out.contains(" 1. a / b"));
        assert!(out.contains(" 2. c / d"));
        assert!(out.contains("    A blazingly fast thing"));
        assert!(out.contains("(3 more repositories)"));
        assert!(out.contains("Showing 2 of 5 trending repositories"));

        let done = p.listing(&shown, 0, DateRange::Daily);
        assert!(!done.contains("more repositories"));
    }

    #[test]
    fn test_description_wraps_within_width() {
        let p = Presenter::new(Theme::default(), 30, false);
        let lines = p.description_lines("lorem ipsum dolor sit amet consectetur adipiscing elit");
        assert!(lines.len() > 1);
        for line in lines {
            assert!(line.starts_with("    "));
            assert!(line.chars().count() <= p.width());
        }
    }

    #[test]
    fn test_prompt_mentions_more_only_when_remaining() {
        let p = presenter();
        assert!(p.prompt(5, 7).contains("Enter for more"));
        assert!(!p.prompt(12, 0).contains("Enter for more"));
    }

    #[test]
    fn test_repo_header_uses_period_label() {
        let header = presenter().repo_header(&record("a / b", "2500", "42"), DateRange::Monthly);
        assert!(header.contains("⭐ Stars: 2,500 (+42 this month)"));
        assert!(header.contains("🔗 URL: https://github.com/a / b"));
    }
}
