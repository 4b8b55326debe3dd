use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;

use super::repo::GitHubRepo;
use super::types::Release;

/// Default GitHub API base URL.
pub const GITHUB_API_URL: &str = "https://api.github.com";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FetchLatestRelease: Send + Sync {
    /// Fetch the latest published release of the repository.
    async fn latest_release(&self, repo: &GitHubRepo) -> Result<Release>;
    fn api_url(&self) -> &str;
}

pub struct GitHub {
    pub client: Client,
    pub api_url: String,
}

impl GitHub {
    #[tracing::instrument(skip(client, api_url))]
    pub fn new(client: Client, api_url: Option<String>) -> Self {
        let api_url = api_url.unwrap_or_else(|| GITHUB_API_URL.to_string());
        Self { client, api_url }
    }
}

#[async_trait]
impl FetchLatestRelease for GitHub {
    #[tracing::instrument(skip(self, repo))]
    async fn latest_release(&self, repo: &GitHubRepo) -> Result<Release> {
        GitHub::fetch_latest_release(repo, &self.client, &self.api_url).await
    }

    fn api_url(&self) -> &str {
        &self.api_url
    }
}

impl GitHub {
    #[tracing::instrument(skip(client, api_url))]
    pub async fn fetch_latest_release(
        repo: &GitHubRepo,
        client: &Client,
        api_url: &str,
    ) -> Result<Release> {
        let url = format!(
            "{}/repos/{}/{}/releases/latest",
            api_url, repo.owner, repo.repo
        );

        debug!("Fetching latest release from {}...", url);

        let response = client
            .get(&url)
            .send()
            .await
            .context("Failed to send request to GitHub API")?;

        let release = response
            .error_for_status()
            .context("GitHub API returned an error status")?
            .json::<Release>()
            .await
            .context("Failed to parse JSON response from GitHub API")?;

        Ok(release)
    }
}
