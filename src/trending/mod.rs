// src/trending/mod.rs
// =============================================================================
// Everything about getting trending data off GitHub.
//
// Submodules:
// - model: RepositoryRecord and DateRange
// - extract: HTML -> records
// - fetch: HTTP requests for the listing and READMEs
// =============================================================================

mod extract;
mod fetch;
mod model;

pub use fetch::{HttpTransport, TrendingClient, Transport};
pub use model::{DateRange, RepositoryRecord};

#[cfg(test)]
pub use fetch::MockTransport;
