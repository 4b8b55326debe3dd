//! The update checker: fetch, compare, cache, render.
//!
//! One instance watches one repository on behalf of one plugin. All
//! failure paths degrade to "report no update this cycle"; nothing in
//! here is fatal to the host.

use async_trait::async_trait;
use log::{debug, warn};

use crate::asset::select_download_url;
use crate::cache::{Clock, ReleaseCache, SystemClock};
use crate::config::UpdaterConfig;
use crate::github::{FetchLatestRelease, GitHub, Release};
use crate::host::{
    PLUGIN_INFORMATION_ACTION, PluginInfo, PluginInfoRequest, UpdateCheck, UpdateDescriptor,
    UpdateHooks,
};
use crate::sanitize::sanitize_html;
use crate::version::{is_newer, normalize_tag};

/// Checks one GitHub repository for plugin updates on behalf of the host.
pub struct UpdateChecker<F: FetchLatestRelease = GitHub, C: Clock = SystemClock> {
    config: UpdaterConfig,
    client: F,
    cache: ReleaseCache<C>,
}

impl UpdateChecker<GitHub, SystemClock> {
    /// Build a checker with the real GitHub client. Fails only on
    /// invalid configuration; runtime trouble degrades per query.
    pub fn new(config: UpdaterConfig) -> anyhow::Result<Self> {
        let client = GitHub::new(config.build_client()?, config.api_url.clone());
        let cache = ReleaseCache::new(config.ttl);
        Ok(Self {
            config,
            client,
            cache,
        })
    }
}

impl<F: FetchLatestRelease, C: Clock> UpdateChecker<F, C> {
    /// Assemble a checker from parts (dependency injection).
    pub fn from_parts(config: UpdaterConfig, client: F, cache: ReleaseCache<C>) -> Self {
        Self {
            config,
            client,
            cache,
        }
    }

    pub fn config(&self) -> &UpdaterConfig {
        &self.config
    }

    /// Cache-or-network lookup of the latest release.
    ///
    /// Transport failures and malformed payloads are recoverable: they
    /// log a diagnostic and yield `None`, and the caller skips this
    /// check cycle.
    #[tracing::instrument(skip(self))]
    pub async fn fetch_latest_release(&self) -> Option<Release> {
        let key = self.config.repo.to_string();
        if let Some(release) = self.cache.get(&key) {
            debug!("Using cached release {} for {}", release.tag_name, key);
            return Some(release);
        }

        match self.client.latest_release(&self.config.repo).await {
            Ok(release) => {
                self.cache.set(&key, release.clone());
                Some(release)
            }
            Err(e) => {
                warn!("Skipping update check for {}: {:#}", key, e);
                None
            }
        }
    }

    /// Update-check hook body: merges an update record into `state`
    /// when the latest release is strictly newer than the installed
    /// version and carries a usable package.
    pub async fn check_for_update(&self, state: UpdateCheck) -> UpdateCheck {
        let slug = self.config.slug.to_string();
        let Some(current) = state.checked.get(&slug).cloned() else {
            return state;
        };
        let Some(release) = self.fetch_latest_release().await else {
            return state;
        };

        let latest = normalize_tag(&release.tag_name);
        let Some(package) = select_download_url(&release.assets) else {
            warn!(
                "Release {} of {} has no usable package, not offering an update",
                release.tag_name, self.config.repo
            );
            return state;
        };
        if !is_newer(latest, &current) {
            debug!(
                "{} is up to date ({} installed, {} latest)",
                slug, current, latest
            );
            return state;
        }

        let descriptor = UpdateDescriptor {
            slug: slug.clone(),
            plugin_file: self.config.plugin_file.clone(),
            new_version: latest.to_string(),
            url: self.config.homepage(),
            package: package.to_string(),
            requires: self.config.requires.clone(),
            tested: self.config.tested.clone(),
            last_updated: release.published_at.clone(),
        };

        let mut state = state;
        state.updates.insert(slug, descriptor);
        state
    }

    /// Plugin-information hook body. `None` defers to other handlers:
    /// foreign action or slug, no release data, or no download URL.
    pub async fn plugin_info(&self, request: &PluginInfoRequest) -> Option<PluginInfo> {
        if request.action != PLUGIN_INFORMATION_ACTION || !self.config.slug.matches(&request.slug) {
            return None;
        }

        let release = self.fetch_latest_release().await?;
        let Some(download_link) = select_download_url(&release.assets) else {
            debug!(
                "Release {} of {} has no download URL, deferring plugin info",
                release.tag_name, self.config.repo
            );
            return None;
        };

        Some(PluginInfo {
            name: self.config.slug.display_name(),
            slug: request.slug.clone(),
            version: normalize_tag(&release.tag_name).to_string(),
            author: sanitize_html(&self.config.author_markup()),
            homepage: release
                .html_url
                .clone()
                .unwrap_or_else(|| self.config.homepage()),
            download_link: download_link.to_string(),
            last_updated: release.published_at.clone(),
            description: sanitize_html(release.body.as_deref().unwrap_or_default()),
        })
    }

    /// Drops the cached release so the next fetch hits the network.
    /// Manual refresh and tests only; never invoked autonomously.
    pub fn clear_cache(&self) {
        self.cache.delete(&self.config.repo.to_string());
    }
}

#[async_trait]
impl<F: FetchLatestRelease, C: Clock> UpdateHooks for UpdateChecker<F, C> {
    async fn on_update_check(&self, state: UpdateCheck) -> UpdateCheck {
        self.check_for_update(state).await
    }

    async fn on_plugin_information(&self, request: &PluginInfoRequest) -> Option<PluginInfo> {
        self.plugin_info(request).await
    }
}
