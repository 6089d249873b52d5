// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap and validate the export format
// 2. Fetch the trending listing for the chosen range
// 3. Export it to CSV / JSON lines if --export was given
// 4. Hand the records to the interactive browser
// 5. Exit with proper code (0 = quit or Ctrl-C, 1 = nothing fetched or error)
//
// Rust concepts used:
// - async/await: the HTTP client and the stdin prompt are both async
// - tokio::select!: races the listing fetch against Ctrl-C
// - generics: the session takes any Transport and console, so tests can
//   drive it with a mock server and scripted input
// - Result<T, E> + ?: errors bubble up to run() and become an exit code
// =============================================================================

// Module declarations - tells Rust about our other source files
mod browse;        // src/browse/ - navigator, prompts, README pager
mod cli;           // src/cli.rs - command-line parsing
mod config;        // src/config.rs - runtime settings
mod display;       // src/display/ - presenter, theme, markdown rendering
mod error;         // src/error.rs - typed errors
mod export;        // src/export.rs - CSV / JSON-lines files
mod trending;      // src/trending/ - fetching and extracting the listing

use anyhow::Result;
use clap::Parser;
use std::io::{self, IsTerminal, Write};
use tracing_subscriber::EnvFilter;

use browse::{
    readme_page_size, CtrlC, Interrupt, KeySource, LinePrompt, Navigator, Outcome, ReadmeDetail,
    ReadmeViewer, StdinPrompt, TerminalKeys,
};
use cli::Cli;
use config::Config;
use display::{Presenter, TerminalMarkdown, Theme, DEFAULT_TERMINAL_WIDTH};
use export::{ExportFormat, Exporter};
use trending::{HttpTransport, TrendingClient, Transport};

const DEFAULT_TERMINAL_ROWS: u16 = 24;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("❌ Error: {:#}", e);
            1
        }
    };

    std::process::exit(exit_code);
}

// Diagnostics go to stderr so they never mix with the listing on stdout.
// RUST_LOG overrides the --verbose switch.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "github_trending=debug" } else { "github_trending=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

// What we know about the terminal before the session starts
struct Screen {
    cols: usize,
    rows: usize,
    ansi: bool,
}

impl Screen {
    // Falls back to 80x24 when stdout isn't a terminal
    fn detect() -> Self {
        let (cols, rows) = crossterm::terminal::size()
            .unwrap_or((DEFAULT_TERMINAL_WIDTH as u16, DEFAULT_TERMINAL_ROWS));
        Self {
            cols: cols as usize,
            rows: rows as usize,
            ansi: io::stdout().is_terminal(),
        }
    }
}

// The interactive side of a session: where input comes from and output goes
struct Console<P, K, I, W> {
    prompt: P,
    keys: K,
    interrupt: I,
    out: W,
    screen: Screen,
}

// Builds the real HTTP client and terminal, then runs the session
async fn run(cli: Cli) -> Result<i32> {
    let config = Config::from_cli(&cli);
    let transport = HttpTransport::new(&config)?;
    let client = TrendingClient::new(transport, &config)?;

    let console = Console {
        prompt: StdinPrompt::new(),
        keys: TerminalKeys,
        interrupt: CtrlC,
        out: io::stdout(),
        screen: Screen::detect(),
    };
    browse_trending(&cli, &config, &client, console).await
}

// This is the main application logic
// Returns:
//   Ok(0) = the user quit or pressed Ctrl-C
//   Ok(1) = nothing fetched, or the export failed
//   Err = unexpected error (also exit code 1)
async fn browse_trending<T, P, K, I, W>(
    cli: &Cli,
    config: &Config,
    client: &TrendingClient<T>,
    console: Console<P, K, I, W>,
) -> Result<i32>
where
    T: Transport,
    P: LinePrompt,
    K: KeySource,
    I: Interrupt,
    W: Write,
{
    let Console {
        mut prompt,
        keys,
        interrupt,
        mut out,
        screen,
    } = console;

    // An unusable --format should fail before we hit the network
    let format = if cli.export {
        match cli.format.parse::<ExportFormat>() {
            Ok(format) => Some(format),
            Err(e) => {
                eprintln!("❌ Export failed: {}", e);
                return Ok(1);
            }
        }
    } else {
        None
    };

    writeln!(out, "🔍 Fetching {} trending repositories...", cli.range.as_str())?;
    out.flush()?;

    // biased: a Ctrl-C that is already pending wins over the fetch
    let records = tokio::select! {
        biased;
        _ = interrupt.interrupted() => {
            writeln!(out, "\nInterrupted.")?;
            return Ok(0);
        }
        records = client.fetch_trending(cli.range) => records,
    };

    if records.is_empty() {
        writeln!(out, "❌ No repositories found or error occurred.")?;
        return Ok(1);
    }

    if let Some(format) = format {
        match Exporter::new(&config.export_dir).export(&records, cli.range, format) {
            Ok(path) => writeln!(out, "✅ Exported {} repositories to {}", records.len(), path.display())?,
            Err(e) => {
                eprintln!("❌ Export failed: {}", e);
                return Ok(1);
            }
        }
    }

    let presenter = Presenter::new(Theme::default(), screen.cols, screen.ansi);
    let viewer = ReadmeViewer::new(
        keys,
        TerminalMarkdown,
        config.readme_page_size.unwrap_or_else(|| readme_page_size(screen.rows)),
        presenter.width(),
        presenter.clear_screen(),
    );
    let mut detail = ReadmeDetail::new(client, &presenter, cli.range, viewer, &interrupt);
    let mut navigator = Navigator::new(records, config.page_size);

    let outcome = navigator
        .run(&presenter, cli.range, &mut prompt, &mut detail, &mut out)
        .await?;

    if outcome == Outcome::Quit {
        writeln!(out, "\n👋 Thanks for using GitHub Trending CLI!")?;
    }
    Ok(0)
}
