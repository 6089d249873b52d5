// src/browse/mod.rs
// =============================================================================
// The interactive part of the tool.
//
// Submodules:
// - input: line prompt + raw keypress readers
// - navigator: the repository list state machine and its loop
// - readme: the README pager that runs on selection
// =============================================================================

mod input;
mod navigator;
mod readme;

pub use input::{CtrlC, Interrupt, KeySource, LinePrompt, StdinPrompt, TerminalKeys};
pub use navigator::{Navigator, Outcome};

#[cfg(test)]
pub use input::{Input, KeyCommand};
pub use readme::{readme_page_size, ReadmeDetail, ReadmeViewer};
