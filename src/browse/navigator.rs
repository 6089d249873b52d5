// src/browse/navigator.rs
// =============================================================================
// The interactive repository list.
//
// State:
// - records: everything the fetch returned, in trending order
// - shown: how many of them have been revealed so far
//
// The displayed prefix is records[..shown]. It only ever grows: Enter reveals
// another page, selecting a repository opens its README and comes back to
// exactly the same list.
//
// The pure part (advance/handle) decides what an input means. run() wires
// that to a prompt, a detail view and an output sink.
// =============================================================================

use async_trait::async_trait;
use std::io::{self, Write};

use super::input::{Input, LinePrompt};
use crate::display::Presenter;
use crate::trending::{DateRange, RepositoryRecord};

// What one line of input did to the navigator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Another page was revealed
    Advanced,
    /// Enter with nothing left to reveal
    Unchanged,
    /// A repository was picked (0-based index into the displayed prefix)
    Selected(usize),
    /// A number outside 1..=max
    OutOfRange { max: usize },
    /// Not a number, not empty, not quit
    Invalid,
    Quit,
}

// How a browsing session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Quit,
    Interrupted,
}

// How a detail view handed control back to the list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailExit {
    Back,
    /// Ctrl-C while the detail was loading; ends the session
    Interrupted,
}

// Whatever happens when a repository is selected
//
// In the app that is "fetch the README and page through it"; in tests it
// just records the call.
#[async_trait(?Send)]
pub trait DetailView {
    async fn show(&mut self, repo: &RepositoryRecord, out: &mut dyn Write) -> io::Result<DetailExit>;
}

pub struct Navigator {
    records: Vec<RepositoryRecord>,
    page_size: usize,
    shown: usize,
}

impl Navigator {
    pub fn new(records: Vec<RepositoryRecord>, page_size: usize) -> Self {
        Self {
            records,
            page_size: page_size.max(1),
            shown: 0,
        }
    }

    pub fn total(&self) -> usize {
        self.records.len()
    }

    pub fn shown(&self) -> usize {
        self.shown
    }

    pub fn remaining(&self) -> usize {
        self.total() - self.shown
    }

    pub fn displayed(&self) -> &[RepositoryRecord] {
        &self.records[..self.shown]
    }

    // Reveals the next page
    //
    // Returns: false if everything was already shown
    pub fn advance(&mut self) -> bool {
        if self.remaining() == 0 {
            return false;
        }
        self.shown = (self.shown + self.page_size).min(self.total());
        true
    }

    // Interprets one line of user input
    pub fn handle(&mut self, input: &str) -> Transition {
        let input = input.trim().to_lowercase();

        match input.as_str() {
            "q" | "quit" | "exit" => Transition::Quit,
            "" => {
                if self.advance() {
                    Transition::Advanced
                } else {
                    Transition::Unchanged
                }
            }
            _ => match input.parse::<i64>() {
                Ok(number) if number >= 1 && (number as u64) <= self.shown as u64 => {
                    Transition::Selected(number as usize - 1)
                }
                Ok(_) => Transition::OutOfRange { max: self.shown },
                // too big for i64, but still a number
                Err(_) if is_integer(&input) => Transition::OutOfRange { max: self.shown },
                Err(_) => Transition::Invalid,
            },
        }
    }

    // The full listing screen for the current state
    //
    // Every transition that redraws goes through here, so rendering twice
    // without a state change gives the same text.
    pub fn render(&self, presenter: &Presenter, range: DateRange) -> String {
        format!(
            "{}{}",
            presenter.clear_screen(),
            presenter.listing(self.displayed(), self.remaining(), range)
        )
    }

    // Runs the browse loop until the user quits or interrupts
    pub async fn run<P, D, W>(
        &mut self,
        presenter: &Presenter,
        range: DateRange,
        prompt: &mut P,
        detail: &mut D,
        out: &mut W,
    ) -> io::Result<Outcome>
    where
        P: LinePrompt,
        D: DetailView,
        W: Write,
    {
        // Idle -> Listing
        if self.shown == 0 {
            self.advance();
        }

        let mut redraw = true;
        loop {
            if redraw {
                write!(out, "{}", self.render(presenter, range))?;
            }
            redraw = true;

            write!(out, "{}", presenter.prompt(self.shown, self.remaining()))?;
            out.flush()?;

            let line = match prompt.read_line().await? {
                Input::Line(line) => line,
                Input::Closed => {
                    writeln!(out)?;
                    return Ok(Outcome::Quit);
                }
                Input::Interrupted => {
                    writeln!(out, "\nInterrupted.")?;
                    return Ok(Outcome::Interrupted);
                }
            };

            match self.handle(&line) {
                Transition::Advanced | Transition::Unchanged => {}
                Transition::Selected(index) => {
                    let repo = self.records[index].clone();
                    if detail.show(&repo, &mut *out).await? == DetailExit::Interrupted {
                        writeln!(out, "\nInterrupted.")?;
                        return Ok(Outcome::Interrupted);
                    }
                }
                Transition::OutOfRange { max } => {
                    writeln!(out, "{}", presenter.out_of_range(max))?;
                    redraw = false;
                }
                Transition::Invalid => {
                    writeln!(out, "{}", presenter.invalid_input())?;
                    redraw = false;
                }
                Transition::Quit => return Ok(Outcome::Quit),
            }
        }
    }
}

// An optionally signed run of ASCII digits
fn is_integer(input: &str) -> bool {
    let digits = input.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(input);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why split handle() from run()?
//    - handle() is a plain function of (state, input) -> Transition
//    - It needs no terminal, so the tests call it directly
//    - run() only does I/O and delegates every decision to handle()
//
// 2. What is `&mut *out`?
//    - out is a &mut W; detail.show wants a &mut dyn Write
//    - Reborrowing with &mut *out hands out a short-lived borrow so we can
//      keep using out after show() returns
//
// 3. Why #[async_trait(?Send)]?
//    - Rust traits can't easily return futures from methods on their own
//    - async_trait boxes the future for us
//    - ?Send says the future doesn't need to move between threads, which is
//      true for an interactive loop holding stdin/stdout
// -----------------------------------------------------------------------------
