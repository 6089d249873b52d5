// src/config.rs
// =============================================================================
// Runtime configuration, built once at startup from the command line.
//
// Everything that used to be a hard-coded constant (endpoints, branch
// candidates, page sizes) lives here so it can be passed down instead of
// read from globals. Nothing mutates a Config after main() builds it.
// =============================================================================

use std::path::PathBuf;
use std::time::Duration;

use crate::cli::Cli;

pub const TRENDING_ENDPOINT: &str = "https://github.com/trending";
pub const SITE_BASE: &str = "https://github.com";
pub const RAW_CONTENT_BASE: &str = "https://raw.githubusercontent.com";
pub const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36";
pub const DEFAULT_BRANCHES: [&str; 2] = ["main", "master"];
pub const REPOS_PER_PAGE: usize = 5;
pub const EXPORT_DIR: &str = "exported";

#[derive(Debug, Clone)]
pub struct Config {
    pub trending_endpoint: String,
    pub site_base: String,
    pub raw_content_base: String,
    /// Sent as the User-Agent header on every request
    pub user_agent: String,
    /// README branch candidates, tried in order
    pub branches: Vec<String>,
    /// Per-request timeout; None leaves reqwest's default in place
    pub timeout: Option<Duration>,
    /// Repositories revealed per "Enter"
    pub page_size: usize,
    /// README lines per screen; None sizes it from the terminal
    pub readme_page_size: Option<usize>,
    pub export_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            trending_endpoint: TRENDING_ENDPOINT.to_string(),
            site_base: SITE_BASE.to_string(),
            raw_content_base: RAW_CONTENT_BASE.to_string(),
            user_agent: USER_AGENT.to_string(),
            branches: DEFAULT_BRANCHES.iter().map(|b| b.to_string()).collect(),
            timeout: None,
            page_size: REPOS_PER_PAGE,
            readme_page_size: None,
            export_dir: PathBuf::from(EXPORT_DIR),
        }
    }
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            timeout: cli.timeout.map(Duration::from_secs),
            page_size: cli.page_size.max(1),
            readme_page_size: cli.readme_lines.map(|n| n.max(1)),
            export_dir: cli.export_dir.clone(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_defaults_from_empty_command_line() {
        let cli = Cli::parse_from(["github-trending"]);
        let config = Config::from_cli(&cli);

        assert_eq!(config.page_size, 5);
        assert_eq!(config.timeout, None);
        assert_eq!(config.readme_page_size, None);
        assert_eq!(config.branches, vec!["main", "master"]);
        assert_eq!(config.export_dir, PathBuf::from("exported"));
    }

    #[test]
    fn test_tunables_from_flags() {
        let cli = Cli::parse_from([
            "github-trending",
            "--timeout",
            "15",
            "--page-size",
            "0",
            "--readme-lines",
            "40",
        ]);
        let config = Config::from_cli(&cli);

        assert_eq!(config.timeout, Some(Duration::from_secs(15)));
        // a zero page size would never reveal anything
        assert_eq!(config.page_size, 1);
        assert_eq!(config.readme_page_size, Some(40));
    }
}
