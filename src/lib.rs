//! ghpu - GitHub plugin-update shim.
//!
//! Polls a GitHub repository's latest release, compares version tags
//! and feeds the host application's update UI with upgrade and
//! changelog metadata. The flow is fetch, parse, compare, cache,
//! render: a single [`UpdateChecker`] per plugin, a TTL-bounded
//! release cache, and two hook methods ([`UpdateHooks`]) an adapter
//! registers with the host's dispatch mechanism.
//!
//! Every runtime failure degrades to "no update this cycle"; only
//! invalid configuration is an error, and only at construction.

pub mod asset;
pub mod cache;
pub mod checker;
pub mod config;
pub mod github;
pub mod host;
pub mod sanitize;
pub mod version;

pub use cache::{Clock, DEFAULT_TTL, ReleaseCache, SystemClock};
pub use checker::UpdateChecker;
pub use config::{PluginSlug, REQUEST_TIMEOUT, UpdaterConfig};
pub use github::{FetchLatestRelease, GitHub, GitHubRepo, Release, ReleaseAsset};
pub use host::{
    PLUGIN_INFORMATION_ACTION, PluginInfo, PluginInfoRequest, UpdateCheck, UpdateDescriptor,
    UpdateHooks,
};
