// src/browse/readme.rs
// =============================================================================
// README viewing: the nested pager that runs when a repository is selected.
//
// - Pager: where we are in the README (pure state, no I/O)
// - ReadmeViewer: renders markdown, then loops showing a page and waiting
//   for a key until the user quits or pages past the end
// - ReadmeDetail: the DetailView the navigator calls; prints the repository
//   header, fetches the README (racing Ctrl-C) and hands it to the viewer
// =============================================================================

use async_trait::async_trait;
use std::io::{self, Write};
use std::ops::Range;

use super::input::{Interrupt, KeyCommand, KeySource};
use super::navigator::{DetailExit, DetailView};
use crate::display::{MarkdownRenderer, Presenter};
use crate::trending::{DateRange, RepositoryRecord, TrendingClient, Transport};

pub const MIN_README_LINES: usize = 15;

// Whether the pager wants another key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerStep {
    Continue,
    Finished,
}

// A window of `page` lines over `total` lines, starting at `top`
#[derive(Debug, Clone)]
pub struct Pager {
    total: usize,
    page: usize,
    top: usize,
}

impl Pager {
    pub fn new(total: usize, page: usize) -> Self {
        Self {
            total,
            page: page.max(1),
            top: 0,
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn top(&self) -> usize {
        self.top
    }

    pub fn visible(&self) -> Range<usize> {
        self.top..(self.top + self.page).min(self.total)
    }

    // True when the last line is on screen
    pub fn at_end(&self) -> bool {
        self.top + self.page >= self.total
    }

    // Highest `top` that still fills a whole page
    fn last_top(&self) -> usize {
        self.total.saturating_sub(self.page)
    }

    pub fn apply(&mut self, command: KeyCommand) -> PagerStep {
        match command {
            KeyCommand::Quit => return PagerStep::Finished,
            KeyCommand::Up => self.top = self.top.saturating_sub(1),
            KeyCommand::Down => self.top = (self.top + 1).min(self.last_top()),
            KeyCommand::PageUp => self.top = self.top.saturating_sub(self.page),
            KeyCommand::PageDown | KeyCommand::Enter => {
                if self.at_end() {
                    return PagerStep::Finished;
                }
                self.top = (self.top + self.page).min(self.last_top());
            }
            KeyCommand::Char(_) => {}
        }
        PagerStep::Continue
    }
}

// Page size for a terminal with `rows` lines, leaving room for the indicator
pub fn readme_page_size(rows: usize) -> usize {
    rows.saturating_sub(2).max(MIN_README_LINES)
}

pub struct ReadmeViewer<K, R> {
    keys: K,
    renderer: R,
    page_size: usize,
    width: usize,
    clear: &'static str,
}

impl<K: KeySource, R: MarkdownRenderer> ReadmeViewer<K, R> {
    // Parameters:
    //   keys: where navigation commands come from
    //   renderer: markdown -> lines (falls back to raw lines on error)
    //   page_size: lines per screen
    //   width: render width in columns
    //   clear: screen-clear sequence written before each page ("" to disable)
    pub fn new(keys: K, renderer: R, page_size: usize, width: usize, clear: &'static str) -> Self {
        Self {
            keys,
            renderer,
            page_size,
            width,
            clear,
        }
    }

    pub fn show(&mut self, content: &str, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "\n{}", "-".repeat(80))?;
        writeln!(out, "📖 README")?;
        writeln!(out, "{}", "-".repeat(80))?;

        if content.trim().is_empty() {
            writeln!(out, "No README content available.")?;
            return Ok(());
        }

        let lines = match self.renderer.render(content, self.width) {
            Ok(lines) if !lines.is_empty() => lines,
            Ok(_) => raw_lines(content),
            Err(e) => {
                tracing::warn!("markdown rendering failed, showing raw README: {}", e);
                writeln!(out, "⚠️  Error rendering README: {}", e)?;
                raw_lines(content)
            }
        };

        self.page_through(&lines, out)?;
        writeln!(out, "\n📖 README reading finished.")
    }

    fn page_through(&mut self, lines: &[String], out: &mut dyn Write) -> io::Result<()> {
        let mut pager = Pager::new(lines.len(), self.page_size);

        loop {
            write!(out, "{}", self.clear)?;

            let visible = pager.visible();
            for line in &lines[visible.clone()] {
                writeln!(out, "{}", line)?;
            }
            writeln!(
                out,
                "\n📖 README ({}-{} of {}) | ↑/↓ scroll, Enter/PgDn more, 'q' exit",
                visible.start + 1,
                visible.end,
                pager.total()
            )?;
            out.flush()?;

            if pager.apply(self.keys.read_command()) == PagerStep::Finished {
                return Ok(());
            }
        }
    }
}

fn raw_lines(content: &str) -> Vec<String> {
    content.lines().map(str::to_string).collect()
}

// Selecting a repository: header, README fetch, pager
pub struct ReadmeDetail<'a, T: Transport, I, K, R> {
    client: &'a TrendingClient<T>,
    presenter: &'a Presenter,
    range: DateRange,
    viewer: ReadmeViewer<K, R>,
    interrupt: &'a I,
}

impl<'a, T: Transport, I, K, R> ReadmeDetail<'a, T, I, K, R> {
    pub fn new(
        client: &'a TrendingClient<T>,
        presenter: &'a Presenter,
        range: DateRange,
        viewer: ReadmeViewer<K, R>,
        interrupt: &'a I,
    ) -> Self {
        Self {
            client,
            presenter,
            range,
            viewer,
            interrupt,
        }
    }
}

#[async_trait(?Send)]
impl<'a, T, I, K, R> DetailView for ReadmeDetail<'a, T, I, K, R>
where
    T: Transport,
    I: Interrupt,
    K: KeySource,
    R: MarkdownRenderer,
{
    async fn show(&mut self, repo: &RepositoryRecord, out: &mut dyn Write) -> io::Result<DetailExit> {
        writeln!(out, "\n{}", "=".repeat(80))?;
        writeln!(out, "📦 Repository Details")?;
        writeln!(out, "{}", "=".repeat(80))?;
        write!(out, "{}", self.presenter.repo_header(repo, self.range))?;

        writeln!(out, "\n📖 Fetching README...")?;
        out.flush()?;

        let content = tokio::select! {
            content = self.client.fetch_readme(&repo.url) => content,
            _ = self.interrupt.interrupted() => return Ok(DetailExit::Interrupted),
        };

        self.viewer.show(&content, out)?;
        Ok(DetailExit::Back)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::display::{TerminalMarkdown, Theme, DEFAULT_TERMINAL_WIDTH};
    use crate::error::RenderError;
    use crate::error::FetchError;
    use crate::trending::MockTransport;
    use std::collections::VecDeque;
    use std::time::{Duration, Instant};
    use url::Url;

    struct ScriptedKeys(VecDeque<KeyCommand>);

    impl ScriptedKeys {
        fn new(keys: &[KeyCommand]) -> Self {
            Self(keys.iter().copied().collect())
        }
    }

    impl KeySource for ScriptedKeys {
        fn read_command(&mut self) -> KeyCommand {
            self.0.pop_front().unwrap_or(KeyCommand::Quit)
        }
    }

    struct BrokenRenderer;

    impl MarkdownRenderer for BrokenRenderer {
        fn render(&self, _markdown: &str, width: usize) -> Result<Vec<String>, RenderError> {
            Err(RenderError::TooNarrow { width, min: 1000 })
        }
    }

    struct NoInterrupt;

    #[async_trait(?Send)]
    impl Interrupt for NoInterrupt {
        async fn interrupted(&self) {
            std::future::pending::<()>().await;
        }
    }

    // Ctrl-C arrives shortly after the fetch starts
    struct InterruptAfter(Duration);

    #[async_trait(?Send)]
    impl Interrupt for InterruptAfter {
        async fn interrupted(&self) {
            tokio::time::sleep(self.0).await;
        }
    }

    // A server that never answers in time
    struct HangingTransport;

    #[async_trait]
    impl Transport for HangingTransport {
        async fn get_text(&self, _url: &Url) -> Result<String, FetchError> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok("# Too late".to_string())
        }
    }

    fn numbered(n: usize) -> String {
        (1..=n).map(|i| format!("line {}", i)).collect::<Vec<_>>().join("\n")
    }

    #[test]
    fn test_pager_pages_forward_then_finishes() {
        let mut pager = Pager::new(100, 30);
        assert_eq!(pager.visible(), 0..30);

        assert_eq!(pager.apply(KeyCommand::Enter), PagerStep::Continue);
        assert_eq!(pager.top(), 30);
        assert_eq!(pager.apply(KeyCommand::PageDown), PagerStep::Continue);
        assert_eq!(pager.top(), 60);
        assert_eq!(pager.apply(KeyCommand::Enter), PagerStep::Continue);
        assert_eq!(pager.top(), 70);
        assert_eq!(pager.visible(), 70..100);
        assert!(pager.at_end());

        assert_eq!(pager.apply(KeyCommand::Enter), PagerStep::Finished);
    }

    #[test]
    fn test_pager_scrolls_by_line() {
        let mut pager = Pager::new(40, 30);
        pager.apply(KeyCommand::Up);
        assert_eq!(pager.top(), 0);

        for _ in 0..20 {
            pager.apply(KeyCommand::Down);
        }
        // can't scroll past the last full page
        assert_eq!(pager.top(), 10);

        pager.apply(KeyCommand::PageUp);
        assert_eq!(pager.top(), 0);
        assert_eq!(pager.apply(KeyCommand::Char('x')), PagerStep::Continue);
        assert_eq!(pager.apply(KeyCommand::Quit), PagerStep::Finished);
    }

    #[test]
    fn test_short_content_finishes_on_first_enter() {
        let mut pager = Pager::new(10, 30);
        assert_eq!(pager.visible(), 0..10);
        assert_eq!(pager.apply(KeyCommand::Enter), PagerStep::Finished);
    }

    #[test]
    fn test_readme_page_size() {
        assert_eq!(readme_page_size(50), 48);
        assert_eq!(readme_page_size(10), 15);
    }

    #[test]
    fn test_viewer_shows_indicator_per_page() {
        let mut viewer = ReadmeViewer::new(
            ScriptedKeys::new(&[KeyCommand::Enter, KeyCommand::Enter]),
            BrokenRenderer,
            20,
            80,
            "",
        );
        let mut out = Vec::new();
        viewer.show(&numbered(30), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("📖 README (1-20 of 30)"));
        assert!(text.contains("📖 README (11-30 of 30)"));
        assert!(text.contains("README reading finished."));
    }

    #[test]
    fn test_viewer_falls_back_to_raw_lines() {
        let mut viewer = ReadmeViewer::new(ScriptedKeys::new(&[]), BrokenRenderer, 20, 80, "");
        let mut out = Vec::new();
        viewer.show("# Title\n\n* item", &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("⚠️  Error rendering README"));
        assert!(text.contains("# Title"));
        assert!(text.contains("* item"));
    }

    #[test]
    fn test_viewer_empty_content() {
        let mut viewer = ReadmeViewer::new(ScriptedKeys::new(&[]), TerminalMarkdown, 20, 80, "");
        let mut out = Vec::new();
        viewer.show("   \n", &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("No README content available."));
        assert!(!text.contains("README ("));
    }

    #[tokio::test]
    async fn test_readme_detail_fetches_and_renders() {
        let mut transport = MockTransport::new();
        transport
            .expect_get_text()
            .withf(|url| url.path() == "/octo/cat/main/README.md")
            .times(1)
            .returning(|_| Ok("# Octocat\n\nHello there".to_string()));

        let client = TrendingClient::new(transport, &Config::default()).unwrap();
        let presenter = Presenter::new(Theme::default(), DEFAULT_TERMINAL_WIDTH, false);
        let viewer = ReadmeViewer::new(ScriptedKeys::new(&[]), TerminalMarkdown, 20, 76, "");
        let mut detail = ReadmeDetail::new(&client, &presenter, DateRange::Daily, viewer, &NoInterrupt);

        let repo = RepositoryRecord::new("octo / cat", "https://github.com/octo/cat");
        let mut out = Vec::new();
        let exit = detail.show(&repo, &mut out).await.unwrap();
        assert_eq!(exit, DetailExit::Back);

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("📦 Name: octo / cat"));
        assert!(text.contains("📖 Fetching README..."));
        assert!(text.contains("Octocat\n═══════"));
        assert!(text.contains("Hello there"));
    }

    #[tokio::test]
    async fn test_ctrl_c_during_readme_fetch() {
        let client = TrendingClient::new(HangingTransport, &Config::default()).unwrap();
        let presenter = Presenter::new(Theme::default(), DEFAULT_TERMINAL_WIDTH, false);
        let viewer = ReadmeViewer::new(ScriptedKeys::new(&[]), TerminalMarkdown, 20, 76, "");
        let interrupt = InterruptAfter(Duration::from_millis(50));
        let mut detail = ReadmeDetail::new(&client, &presenter, DateRange::Daily, viewer, &interrupt);

        let repo = RepositoryRecord::new("octo / cat", "https://github.com/octo/cat");
        let mut out = Vec::new();
        let started = Instant::now();
        let exit = detail.show(&repo, &mut out).await.unwrap();

        assert_eq!(exit, DetailExit::Interrupted);
        assert!(started.elapsed() < Duration::from_secs(5));
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("📖 Fetching README..."));
        assert!(!text.contains("Too late"));
        assert!(!text.contains("README reading finished."));
    }
}
