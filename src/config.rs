//! Constructor-level configuration and HTTP client assembly.

use anyhow::{Context, Result, anyhow};
use log::debug;
use reqwest::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::DEFAULT_TTL;
use crate::github::GitHubRepo;

/// Total request timeout for the releases-latest fetch.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

const USER_AGENT: &str = concat!("ghpu/", env!("CARGO_PKG_VERSION"));
const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";

/// Host-side plugin identifier in `namespace/file.ext` form
/// (e.g. `my-plugin/my-plugin.php`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginSlug {
    namespace: String,
    file: String,
}

impl PluginSlug {
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// True when `queried` names this plugin, either by the full slug
    /// or by the namespace alone (hosts use both forms).
    pub fn matches(&self, queried: &str) -> bool {
        queried == self.namespace || queried == self.to_string()
    }

    /// Human-readable name: hyphens in the namespace become spaces,
    /// each word title-cased ("my-plugin" -> "My Plugin").
    pub fn display_name(&self) -> String {
        self.namespace
            .split('-')
            .filter(|word| !word.is_empty())
            .map(capitalize)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

impl fmt::Display for PluginSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.file)
    }
}

impl FromStr for PluginSlug {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('/').collect();
        if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
            Err(anyhow!(
                "Invalid plugin slug '{}'. Expected 'namespace/file.ext'.",
                s
            ))
        } else {
            Ok(PluginSlug {
                namespace: parts[0].to_string(),
                file: parts[1].to_string(),
            })
        }
    }
}

/// Everything an update checker is constructed from.
#[derive(Debug, Clone)]
pub struct UpdaterConfig {
    /// Plugin entry file path, handed back to the host in update records.
    pub plugin_file: String,
    pub slug: PluginSlug,
    pub repo: GitHubRepo,
    /// Access token for private repositories or rate-limit headroom.
    pub token: Option<String>,
    pub ttl: Duration,
    /// API base override, used by tests against a local mock server.
    pub api_url: Option<String>,
    /// Minimum compatible host version placeholder.
    pub requires: Option<String>,
    /// Maximum tested host version placeholder.
    pub tested: Option<String>,
}

impl UpdaterConfig {
    pub fn new(plugin_file: impl Into<String>, slug: &str, repo: &str) -> Result<Self> {
        Ok(Self {
            plugin_file: plugin_file.into(),
            slug: slug.parse()?,
            repo: repo.parse()?,
            token: None,
            ttl: DEFAULT_TTL,
            api_url: None,
            requires: None,
            tested: None,
        })
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = Some(api_url.into());
        self
    }

    pub fn with_host_compat(
        mut self,
        requires: impl Into<String>,
        tested: impl Into<String>,
    ) -> Self {
        self.requires = Some(requires.into());
        self.tested = Some(tested.into());
        self
    }

    /// Builds the HTTP client: bounded timeout, `User-Agent`, GitHub
    /// `Accept` header and, when a token is present, a sensitive
    /// `Authorization` header.
    pub fn build_client(&self) -> Result<Client> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_ACCEPT));

        if let Some(token) = &self.token {
            let mut auth_value = HeaderValue::from_str(&format!("token {}", token))
                .context("Access token is not a valid header value")?;
            auth_value.set_sensitive(true);
            headers.insert(AUTHORIZATION, auth_value);
            debug!("Using access token for {}", self.repo);
        }

        Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")
    }

    /// Repository home page shown to users.
    pub fn homepage(&self) -> String {
        format!("https://github.com/{}", self.repo)
    }

    /// Author markup derived from the repository owner. Sanitized
    /// before display like any other rich text.
    pub fn author_markup(&self) -> String {
        format!(
            r#"<a href="https://github.com/{owner}">{owner}</a>"#,
            owner = self.repo.owner
        )
    }
}
