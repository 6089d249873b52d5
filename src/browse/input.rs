// src/browse/input.rs
// =============================================================================
// The two ways we read from the user.
//
// - LinePrompt: one line of text at a time (the repository list)
// - KeySource: one keypress at a time (the README pager)
//
// Both are traits so the loops that use them can be driven by scripted
// input in tests. The real implementations are StdinPrompt and TerminalKeys.
//
// Ctrl-C:
// - at a line prompt it arrives as SIGINT; we race tokio's ctrl_c() against
//   the stdin read and report Input::Interrupted
// - in raw mode the terminal doesn't send signals, so it shows up as a
//   normal key event and maps to KeyCommand::Quit
// =============================================================================

use async_trait::async_trait;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use std::io::{self, IsTerminal};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

// What a line prompt produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// A line of text, without the trailing newline
    Line(String),
    /// The user pressed Ctrl-C
    Interrupted,
    /// End of input (piped stdin ran out)
    Closed,
}

// Reads a single line of user input
//
// The prompt text itself is written by the caller before this is awaited.
// ?Send: the interactive loop runs on a single task and holds terminal handles.
#[async_trait(?Send)]
pub trait LinePrompt {
    async fn read_line(&mut self) -> io::Result<Input>;
}

pub struct StdinPrompt {
    lines: Lines<BufReader<Stdin>>,
}

impl StdinPrompt {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }
}

impl Default for StdinPrompt {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl LinePrompt for StdinPrompt {
    async fn read_line(&mut self) -> io::Result<Input> {
        // next_line() is cancel safe, so losing the race to Ctrl-C drops nothing
        tokio::select! {
            line = self.lines.next_line() => Ok(match line? {
                Some(line) => Input::Line(line),
                None => Input::Closed,
            }),
            signal = tokio::signal::ctrl_c() => {
                signal?;
                Ok(Input::Interrupted)
            }
        }
    }
}

// Resolves when the user asks to stop
//
// Raced against the slow steps (listing fetch, README fetch) so a Ctrl-C
// there ends the session instead of waiting for the network.
#[async_trait(?Send)]
pub trait Interrupt {
    async fn interrupted(&self);
}

// SIGINT via tokio
pub struct CtrlC;

#[async_trait(?Send)]
impl Interrupt for CtrlC {
    async fn interrupted(&self) {
        if let Err(e) = tokio::signal::ctrl_c().await {
            // without a handler we can't be interrupted at all
            tracing::warn!("cannot listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

// Pager navigation commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Up,
    Down,
    PageUp,
    PageDown,
    Enter,
    Quit,
    Char(char),
}

// Reads one navigation command
//
// Implementations that can't read keys (no terminal, read error) must
// return Quit so pager loops always terminate.
pub trait KeySource {
    fn read_command(&mut self) -> KeyCommand;
}

// Single keypresses from the terminal via crossterm raw mode
pub struct TerminalKeys;

impl KeySource for TerminalKeys {
    fn read_command(&mut self) -> KeyCommand {
        if !io::stdin().is_terminal() {
            return KeyCommand::Quit;
        }

        match read_raw_command() {
            Ok(command) => command,
            Err(e) => {
                tracing::debug!("raw key read failed: {}", e);
                KeyCommand::Quit
            }
        }
    }
}

// Switches to raw mode only for the duration of one keypress so normal
// println! output keeps working between reads
fn read_raw_command() -> io::Result<KeyCommand> {
    terminal::enable_raw_mode()?;
    let command = next_command();
    terminal::disable_raw_mode()?;
    command
}

fn next_command() -> io::Result<KeyCommand> {
    loop {
        if let Event::Key(key) = event::read()? {
            if let Some(command) = map_key(key) {
                return Ok(command);
            }
        }
    }
}

// Translates a crossterm key event into a pager command
//
// Returns None for events we ignore (key releases, modifier-only keys, ...)
pub fn map_key(key: KeyEvent) -> Option<KeyCommand> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('C') => Some(KeyCommand::Quit),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Up => Some(KeyCommand::Up),
        KeyCode::Down => Some(KeyCommand::Down),
        KeyCode::PageUp => Some(KeyCommand::PageUp),
        KeyCode::PageDown => Some(KeyCommand::PageDown),
        KeyCode::Enter => Some(KeyCommand::Enter),
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Some(KeyCommand::Quit),
        KeyCode::Char(c) => Some(KeyCommand::Char(c)),
        _ => None,
    }
}
