//! Host-facing hook surface.
//!
//! Plain value types exchanged with the host's update UI, plus the
//! two-method interface an adapter layer registers with the host's
//! dispatch mechanism. The core never talks to the dispatcher itself,
//! and several checkers can sit behind the same hooks: each one passes
//! through anything that is not its concern.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Action name of the host's "show me details" query.
pub const PLUGIN_INFORMATION_ACTION: &str = "plugin_information";

/// The transient-like structure flowing through the update-check hook.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateCheck {
    /// Installed version by plugin slug, supplied by the host.
    pub checked: HashMap<String, String>,
    /// Update records merged in by checkers.
    pub updates: HashMap<String, UpdateDescriptor>,
}

impl UpdateCheck {
    /// Convenience for hosts and tests: a state with one checked plugin.
    pub fn with_checked(slug: impl Into<String>, version: impl Into<String>) -> Self {
        let mut state = Self::default();
        state.checked.insert(slug.into(), version.into());
        state
    }
}

/// An available-update record for one plugin.
///
/// Derived per query and handed to the host; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateDescriptor {
    pub slug: String,
    /// Plugin entry file path the host uses to apply the update.
    pub plugin_file: String,
    /// Bare version, tag prefix stripped.
    pub new_version: String,
    /// Homepage shown next to the update notice.
    pub url: String,
    /// Package (download) URL.
    pub package: String,
    /// Minimum compatible host version, if the integrator declared one.
    pub requires: Option<String>,
    /// Maximum host version the plugin was tested against.
    pub tested: Option<String>,
    pub last_updated: Option<String>,
}

/// Query arguments of the plugin-information hook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginInfoRequest {
    pub action: String,
    pub slug: String,
}

impl PluginInfoRequest {
    /// A plugin-information query for `slug`.
    pub fn information(slug: impl Into<String>) -> Self {
        Self {
            action: PLUGIN_INFORMATION_ACTION.to_string(),
            slug: slug.into(),
        }
    }
}

/// Display metadata for the host's plugin-details view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginInfo {
    pub name: String,
    pub slug: String,
    pub version: String,
    /// Sanitized author markup.
    pub author: String,
    pub homepage: String,
    pub download_link: String,
    pub last_updated: Option<String>,
    /// Sanitized description/changelog section.
    pub description: String,
}

/// The two extension points an adapter registers with the host.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UpdateHooks: Send + Sync {
    /// Update-check hook: returns the state, optionally augmented with
    /// an update record.
    async fn on_update_check(&self, state: UpdateCheck) -> UpdateCheck;

    /// Plugin-information hook: `None` means "not my concern" and
    /// defers to any other handler.
    async fn on_plugin_information(&self, request: &PluginInfoRequest) -> Option<PluginInfo>;
}
