// src/trending/fetch.rs
// =============================================================================
// This module talks to GitHub.
//
// Two kinds of requests:
// - the trending page itself (https://github.com/trending?since=...)
// - a repository's README, read from raw.githubusercontent.com which serves
//   raw file contents without needing the API
//
// Neither path ever returns an error to the caller:
// - a failed listing fetch is logged and gives an empty list
// - a failed README candidate is logged and the next branch is tried
//
// The actual HTTP call sits behind the Transport trait so tests can swap in
// a mock instead of hitting the network.
// =============================================================================

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use super::extract::TrendingExtractor;
use super::model::{DateRange, RepositoryRecord};
use crate::config::Config;
use crate::error::{ExtractError, FetchError};

// Returned by fetch_readme when no branch candidate has a README
pub const README_NOT_FOUND: &str = "README not found or not accessible.";

// Returned by fetch_readme when we cannot work out owner/repo from the URL
pub const INVALID_REPO_URL: &str = "Invalid repository URL.";

const README_FILE: &str = "README.md";

// One GET request returning the body as text
//
// Implementations must treat any non-2xx status as an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get_text(&self, url: &Url) -> Result<String, FetchError>;
}

// The real transport: one reqwest Client shared by every request
//
// The client keeps connections alive between the listing request and the
// README requests that follow it.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let mut builder = Client::builder().user_agent(config.user_agent.as_str());

        // No timeout unless asked for; reqwest's default applies otherwise
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get_text(&self, url: &Url) -> Result<String, FetchError> {
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}

// Fetches trending listings and READMEs through a Transport
pub struct TrendingClient<T: Transport> {
    transport: T,
    extractor: TrendingExtractor,
    trending_endpoint: String,
    raw_content_base: String,
    branches: Vec<String>,
}

impl<T: Transport> TrendingClient<T> {
    pub fn new(transport: T, config: &Config) -> Result<Self, ExtractError> {
        Ok(Self {
            transport,
            extractor: TrendingExtractor::new(&config.site_base)?,
            trending_endpoint: config.trending_endpoint.clone(),
            raw_content_base: config.raw_content_base.trim_end_matches('/').to_string(),
            branches: config.branches.clone(),
        })
    }

    // Fetches and parses the trending page for a date range
    //
    // Returns: the records in trending order, or an empty Vec on any failure
    pub async fn fetch_trending(&self, range: DateRange) -> Vec<RepositoryRecord> {
        match self.try_fetch_trending(range).await {
            Ok(records) => {
                tracing::debug!(count = records.len(), %range, "parsed trending page");
                records
            }
            Err(e) => {
                tracing::error!(%range, "error fetching trending repositories: {}", e);
                Vec::new()
            }
        }
    }

    async fn try_fetch_trending(&self, range: DateRange) -> Result<Vec<RepositoryRecord>, FetchError> {
        let url = trending_url(&self.trending_endpoint, range)?;
        let html = self.transport.get_text(&url).await?;
        Ok(self.extractor.extract(&html))
    }

    // Fetches a repository's README.md
    //
    // Parameters:
    //   repo_url: the repository's GitHub URL (e.g. "https://github.com/user/repo")
    //
    // Tries each branch candidate in order (main, then master by default)
    // and returns the first body that comes back with a 2xx status.
    pub async fn fetch_readme(&self, repo_url: &str) -> String {
        let Some(path) = repo_path(repo_url) else {
            tracing::warn!(repo_url, "cannot derive owner/repo from URL");
            return INVALID_REPO_URL.to_string();
        };

        for branch in &self.branches {
            let url = match readme_url(&self.raw_content_base, &path, branch) {
                Ok(url) => url,
                Err(e) => {
                    tracing::debug!(branch = %branch, "skipping README candidate: {}", e);
                    continue;
                }
            };

            match self.transport.get_text(&url).await {
                Ok(content) => {
                    tracing::debug!(%url, "README found");
                    return content;
                }
                Err(e) => {
                    tracing::debug!(%url, "README candidate failed: {}", e);
                }
            }
        }

        README_NOT_FOUND.to_string()
    }
}

// Builds the trending page URL for a date range
//
// Examples:
//   daily   -> "https://github.com/trending"
//   weekly  -> "https://github.com/trending?since=weekly"
pub fn trending_url(endpoint: &str, range: DateRange) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(endpoint)?;

    if let Some(since) = range.since_param() {
        url.query_pairs_mut().append_pair("since", since);
    }

    Ok(url)
}

// Builds "<raw-base>/<owner>/<repo>/<branch>/README.md"
pub fn readme_url(raw_base: &str, repo_path: &str, branch: &str) -> Result<Url, url::ParseError> {
    Url::parse(&format!("{}/{}/{}/{}", raw_base, repo_path, branch, README_FILE))
}

// Extracts "owner/repo" from a repository URL
//
// Supported formats:
//   - https://github.com/owner/repo
//   - https://github.com/owner/repo.git
//   - https://github.com/owner/repo/ (trailing slash)
//
// Returns None when the URL doesn't parse or has fewer than two path segments.
pub fn repo_path(repo_url: &str) -> Option<String> {
    let url = Url::parse(repo_url).ok()?;
    let mut segments = url.path_segments()?.filter(|s| !s.is_empty());

    let owner = segments.next()?;
    let repo = segments.next()?.trim_end_matches(".git");
    if repo.is_empty() {
        return None;
    }

    Some(format!("{}/{}", owner, repo))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::*;
    use mockall::Sequence;

    const PAGE: &str = r#"
<article class="Box-row">
  <h2 class="h3"><a href="/octo/cat">octo / cat</a></h2>
  <span class="d-inline-block float-sm-right">12 stars today</span>
</article>"#;

    fn client(transport: MockTransport) -> TrendingClient<MockTransport> {
        TrendingClient::new(transport, &Config::default()).unwrap()
    }

    fn status_error(url: &Url, status: u16) -> FetchError {
        FetchError::Status {
            url: url.to_string(),
            status,
        }
    }

    #[test]
    fn test_trending_url_daily_has_no_since() {
        let url = trending_url("https://github.com/trending", DateRange::Daily).unwrap();
        assert_eq!(url.as_str(), "https://github.com/trending");
        assert!(url.query().is_none());
    }

    #[test]
    fn test_trending_url_weekly_and_monthly() {
        let weekly = trending_url("https://github.com/trending", DateRange::Weekly).unwrap();
        let monthly = trending_url("https://github.com/trending", DateRange::Monthly).unwrap();
        assert_eq!(weekly.as_str(), "https://github.com/trending?since=weekly");
        assert_eq!(monthly.as_str(), "https://github.com/trending?since=monthly");
    }

    #[test]
    fn test_repo_path() {
        assert_eq!(repo_path("https://github.com/rust-lang/rust").as_deref(), Some("rust-lang/rust"));
        assert_eq!(repo_path("https://github.com/user/repo.git").as_deref(), Some("user/repo"));
        assert_eq!(repo_path("https://github.com/user/repo/").as_deref(), Some("user/repo"));
        assert_eq!(repo_path("https://github.com/onlyowner"), None);
        assert_eq!(repo_path("not a url"), None);
    }

    #[test]
    fn test_readme_url() {
        let url = readme_url("https://raw.githubusercontent.com", "user/repo", "main").unwrap();
        assert_eq!(url.as_str(), "https://raw.githubusercontent.com/user/repo/main/README.md");
    }

    #[tokio::test]
    async fn test_fetch_trending_parses_page() {
        let mut transport = MockTransport::new();
        transport
            .expect_get_text()
            .withf(|url| url.as_str() == "https://github.com/trending?since=weekly")
            .times(1)
            .returning(|_| Ok(PAGE.to_string()));

        let records = client(transport).fetch_trending(DateRange::Weekly).await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "octo / cat");
        assert_eq!(records[0].stars_period, "12");
    }

    #[tokio::test]
    async fn test_fetch_trending_failure_returns_empty() {
        let mut transport = MockTransport::new();
        transport
            .expect_get_text()
            .times(1)
            .returning(|url| Err(status_error(url, 503)));

        let records = client(transport).fetch_trending(DateRange::Daily).await;
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_readme_tries_main_first() {
        let mut transport = MockTransport::new();
        transport
            .expect_get_text()
            .with(eq(Url::parse("https://raw.githubusercontent.com/user/repo/main/README.md").unwrap()))
            .times(1)
            .returning(|_| Ok("# Main readme".to_string()));

        let readme = client(transport).fetch_readme("https://github.com/user/repo").await;
        assert_eq!(readme, "# Main readme");
    }

    #[tokio::test]
    async fn test_fetch_readme_falls_back_to_master() {
        let mut seq = Sequence::new();
        let mut transport = MockTransport::new();
        transport
            .expect_get_text()
            .withf(|url| url.path() == "/user/repo/main/README.md")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|url| Err(status_error(url, 404)));
        transport
            .expect_get_text()
            .withf(|url| url.path() == "/user/repo/master/README.md")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok("master readme".to_string()));

        let readme = client(transport).fetch_readme("https://github.com/user/repo").await;
        assert_eq!(readme, "master readme");
    }

    #[tokio::test]
    async fn test_fetch_readme_not_found_sentinel() {
        let mut seq = Sequence::new();
        let mut transport = MockTransport::new();
        for branch in ["main", "master"] {
            transport
                .expect_get_text()
                .withf(move |url| url.path() == format!("/user/repo/{}/README.md", branch))
                .times(1)
                .in_sequence(&mut seq)
                .returning(|url| Err(status_error(url, 404)));
        }

        let readme = client(transport).fetch_readme("https://github.com/user/repo").await;
        assert_eq!(readme, "README not found or not accessible.");
    }

    #[tokio::test]
    async fn test_fetch_readme_invalid_url_makes_no_requests() {
        let transport = MockTransport::new();
        let readme = client(transport).fetch_readme("https://github.com/").await;
        assert_eq!(readme, INVALID_REPO_URL);
    }
}
