//! Repository metadata lookup against the GitHub REST API.
//!
//! One GET per lookup, no retry, no backoff. Callers treat any failure as
//! "no data" and fall back to a URL-derived draft; this module only reports
//! the failure, it never panics or degrades on its own.

use std::sync::OnceLock;
use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;

use crate::config;
use crate::error::Result;

/// Subset of the repository record the pipeline cares about.
#[derive(Debug, Clone, Deserialize)]
pub struct RepoMetadata {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "stargazers_count", default)]
    pub stars: u64,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(rename = "updated_at", default)]
    pub updated_at: Option<String>,
    pub owner: RepoOwner,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RepoOwner {
    pub login: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Blocking GitHub API client. The underlying HTTP client is built lazily
/// on first use and shared across threads, so batch parsing can fan out
/// lookups concurrently over one connection pool.
pub struct GithubClient {
    api_base: String,
    timeout: Duration,
    client: OnceLock<Client>,
}

impl GithubClient {
    pub fn new(timeout: Duration) -> Self {
        Self {
            api_base: config::GITHUB_API_BASE.to_string(),
            timeout,
            client: OnceLock::new(),
        }
    }

    /// Point the client at a different API base. Used by tests to avoid
    /// real network traffic.
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    fn client(&self) -> &Client {
        self.client.get_or_init(|| {
            Client::builder()
                .timeout(self.timeout)
                .user_agent(concat!("cardvault/", env!("CARGO_PKG_VERSION")))
                .redirect(reqwest::redirect::Policy::limited(10))
                .build()
                .expect("failed to build HTTP client")
        })
    }

    /// Fetch repository metadata for `owner/repo`.
    ///
    /// Network errors, non-success statuses, and malformed bodies all come
    /// back as `Err`; the link parser maps those to a minimal fallback draft.
    pub fn fetch_repo(&self, owner: &str, repo: &str) -> Result<RepoMetadata> {
        let url = format!("{}/repos/{}/{}", self.api_base, owner, repo);
        let resp = self.client().get(&url).send()?.error_for_status()?;
        let meta: RepoMetadata = resp.json()?;
        Ok(meta)
    }
}

impl Default for GithubClient {
    fn default() -> Self {
        Self::new(Duration::from_secs(30))
    }
}
