use anyhow::{Result, anyhow};
use std::fmt;
use std::str::FromStr;

/// The GitHub repository an update checker watches.
///
/// Both segments are restricted to ASCII alphanumerics, hyphen and
/// underscore; the rendered `owner/repo` string doubles as the cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GitHubRepo {
    pub owner: String,
    pub repo: String,
}

impl fmt::Display for GitHubRepo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

fn valid_segment(s: &str) -> bool {
    !s.is_empty()
        && s.chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

impl FromStr for GitHubRepo {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('/').collect();
        if parts.len() != 2 || !valid_segment(parts[0]) || !valid_segment(parts[1]) {
            Err(anyhow!(
                "Invalid repository '{}'. Expected 'owner/repo' using letters, digits, '-' or '_'.",
                s
            ))
        } else {
            Ok(GitHubRepo {
                owner: parts[0].to_string(),
                repo: parts[1].to_string(),
            })
        }
    }
}
