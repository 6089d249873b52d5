// src/display/mod.rs
// =============================================================================
// Output formatting.
//
// Submodules:
// - theme: emoji tables and thresholds (immutable configuration)
// - presenter: records -> styled strings
// - markdown: README markdown -> terminal lines
// =============================================================================

mod markdown;
mod presenter;
mod theme;

pub use markdown::{MarkdownRenderer, TerminalMarkdown};
pub use presenter::{Presenter, DEFAULT_TERMINAL_WIDTH};
pub use theme::Theme;
