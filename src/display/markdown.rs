// src/display/markdown.rs
// =============================================================================
// This module turns README markdown into lines for the terminal pager.
//
// We use the `pulldown-cmark` crate which:
// - Parses Markdown into events (heading, paragraph, link, etc.)
// - Follows the CommonMark specification
// - Is fast and memory-efficient (it's a streaming parser)
//
// Rendering is best effort. The viewer falls back to the raw README lines
// whenever a renderer returns an error, so the MarkdownRenderer trait exists
// mostly to make that fallback testable.
// =============================================================================

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag};

use super::presenter::wrap;
use crate::error::RenderError;

pub const MIN_RENDER_WIDTH: usize = 20;

pub trait MarkdownRenderer {
    // Renders markdown into display lines no wider than `width` (where the
    // content allows it)
    fn render(&self, markdown: &str, width: usize) -> Result<Vec<String>, RenderError>;
}

// Plain-text terminal rendering of CommonMark + GitHub extensions
pub struct TerminalMarkdown;

impl MarkdownRenderer for TerminalMarkdown {
    fn render(&self, markdown: &str, width: usize) -> Result<Vec<String>, RenderError> {
        if width < MIN_RENDER_WIDTH {
            return Err(RenderError::TooNarrow {
                width,
                min: MIN_RENDER_WIDTH,
            });
        }

        let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS;
        let mut writer = LineWriter::new(width);

        for event in Parser::new_ext(markdown, options) {
            writer.handle(event);
        }

        Ok(writer.finish())
    }
}

// Collects inline text and flushes it as wrapped, prefixed lines
struct LineWriter {
    width: usize,
    lines: Vec<String>,
    // inline text of the block we're currently inside
    current: String,
    // list nesting: None = bullet list, Some(n) = next number of an ordered list
    lists: Vec<Option<u64>>,
    // bullet/number waiting to be put in front of the next flushed line
    marker: Option<String>,
    quote_depth: usize,
    in_code_block: bool,
    heading: Option<HeadingLevel>,
}

impl LineWriter {
    fn new(width: usize) -> Self {
        Self {
            width,
            lines: Vec::new(),
            current: String::new(),
            lists: Vec::new(),
            marker: None,
            quote_depth: 0,
            in_code_block: false,
            heading: None,
        }
    }

    fn handle(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => {
                if self.in_code_block {
                    for line in text.lines() {
                        let prefix = self.prefix();
                        self.lines.push(format!("{}    {}", prefix, line));
                    }
                } else {
                    self.current.push_str(&text);
                }
            }
            Event::Code(code) => {
                self.current.push('`');
                self.current.push_str(&code);
                self.current.push('`');
            }
            Event::SoftBreak => self.current.push(' '),
            Event::HardBreak => self.flush(),
            Event::Rule => {
                self.flush();
                self.lines.push("─".repeat(self.width));
                self.blank();
            }
            Event::TaskListMarker(done) => {
                self.current.push_str(if done { "[x] " } else { "[ ] " });
            }
            // raw HTML (badges, <p align>, etc.) doesn't read well as text
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Heading(level, ..) => {
                self.flush();
                self.heading = Some(level);
            }
            Tag::BlockQuote => {
                self.flush();
                self.quote_depth += 1;
            }
            Tag::CodeBlock(kind) => {
                self.flush();
                if let CodeBlockKind::Fenced(lang) = kind {
                    if !lang.is_empty() {
                        let prefix = self.prefix();
                        self.lines.push(format!("{}    [{}]", prefix, lang));
                    }
                }
                self.in_code_block = true;
            }
            Tag::List(start) => {
                self.flush();
                self.lists.push(start);
            }
            Tag::Item => {
                self.flush();
                let marker = match self.lists.last_mut() {
                    Some(Some(n)) => {
                        let marker = format!("{}. ", n);
                        *n += 1;
                        marker
                    }
                    _ => "• ".to_string(),
                };
                self.marker = Some(marker);
            }
            Tag::TableHead | Tag::TableRow => self.flush(),
            Tag::Image(..) => self.current.push_str("[image: "),
            _ => {}
        }
    }

    fn end(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Heading(..) => {
                let level = self.heading.take();
                let title = std::mem::take(&mut self.current).trim().to_string();
                if !title.is_empty() {
                    let underline = match level {
                        Some(HeadingLevel::H1) => Some('═'),
                        Some(HeadingLevel::H2) => Some('─'),
                        _ => None,
                    };
                    let width = title.chars().count().min(self.width);
                    self.lines.push(title);
                    if let Some(ch) = underline {
                        self.lines.push(ch.to_string().repeat(width));
                    }
                }
                self.blank();
            }
            Tag::Paragraph => {
                self.flush();
                if self.lists.is_empty() {
                    self.blank();
                }
            }
            Tag::BlockQuote => {
                self.flush();
                self.quote_depth = self.quote_depth.saturating_sub(1);
                self.blank();
            }
            Tag::CodeBlock(_) => {
                self.in_code_block = false;
                self.blank();
            }
            Tag::List(_) => {
                self.flush();
                self.lists.pop();
                if self.lists.is_empty() {
                    self.blank();
                }
            }
            Tag::Item => self.flush(),
            Tag::TableCell => self.current.push_str(" | "),
            Tag::TableHead | Tag::TableRow => {
                let row = std::mem::take(&mut self.current);
                let row = row.trim_end().trim_end_matches('|').trim_end().to_string();
                self.lines.push(row);
            }
            Tag::Table(_) => self.blank(),
            Tag::Image(..) => self.current.push(']'),
            _ => {}
        }
    }

    // "│ " per quote level plus list indentation
    fn prefix(&self) -> String {
        let mut prefix = "│ ".repeat(self.quote_depth);
        prefix.push_str(&"  ".repeat(self.lists.len().saturating_sub(1)));
        prefix
    }

    // Wraps the pending inline text and moves it into `lines`
    fn flush(&mut self) {
        let text = std::mem::take(&mut self.current);
        let marker = self.marker.take();
        if text.trim().is_empty() {
            // an item whose text arrives later still needs its marker
            self.marker = marker;
            return;
        }

        let prefix = self.prefix();
        let marker = marker.unwrap_or_default();
        let hang = " ".repeat(marker.chars().count());
        let used = prefix.chars().count() + marker.chars().count();
        let available = self.width.saturating_sub(used).max(10);

        for (i, line) in wrap(&text, available).into_iter().enumerate() {
            let lead = if i == 0 { &marker } else { &hang };
            self.lines.push(format!("{}{}{}", prefix, lead, line));
        }
    }

    // Adds one empty line, never two in a row
    fn blank(&mut self) {
        if matches!(self.lines.last(), Some(last) if !last.is_empty()) {
            self.lines.push(String::new());
        }
    }

    fn finish(mut self) -> Vec<String> {
        self.flush();
        while matches!(self.lines.last(), Some(last) if last.is_empty()) {
            self.lines.pop();
        }
        self.lines
    }
}
