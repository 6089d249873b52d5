// src/error.rs
// =============================================================================
// Typed errors for each subsystem.
//
// The application layer (main.rs) works with anyhow::Result, but the pieces
// underneath return these enums so callers can tell a missing README apart
// from a bad export path. thiserror writes the Display/Error impls for us.
// =============================================================================

use thiserror::Error;

// Errors from outbound HTTP requests
#[derive(Error, Debug)]
pub enum FetchError {
    /// Network, DNS or TLS failure before we got a response
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Got a response, but not a 2xx one
    #[error("GET {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// A configured endpoint could not be parsed or joined
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

// Errors building the trending-page extractor
//
// These only happen if one of the built-in selectors or patterns is broken,
// never because of page content.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("invalid CSS selector '{css}': {message}")]
    Selector { css: &'static str, message: String },

    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}

// Errors from the markdown renderer
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RenderError {
    #[error("terminal too narrow to render markdown ({width} columns, need {min})")]
    TooNarrow { width: usize, min: usize },
}

// Errors from the CSV / JSON-lines export sink
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("no repositories to export")]
    NoRepositories,

    #[error("unsupported export format: {0} (expected csv or json)")]
    UnsupportedFormat(String),

    #[error("failed to write export file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize record: {0}")]
    Json(#[from] serde_json::Error),
}
