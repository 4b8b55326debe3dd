//! GitHub REST API access.
//!
//! One endpoint matters to this crate: `releases/latest`. The fetch is
//! behind the [`FetchLatestRelease`] trait so the checker can be driven
//! by a mock in tests.

mod client;
mod repo;
mod types;

pub use client::{FetchLatestRelease, GITHUB_API_URL, GitHub};
pub use repo::GitHubRepo;
pub use types::{Release, ReleaseAsset};

#[cfg(test)]
pub use client::MockFetchLatestRelease;
