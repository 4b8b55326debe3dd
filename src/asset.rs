//! Asset-selection policy for release packages.

use crate::github::ReleaseAsset;

/// Picks the download URL for a release's installable package.
///
/// Assets are scanned in listed order: the first one whose file
/// extension is exactly `zip` wins (case-sensitive, so `.ZIP` does not
/// match), then the first asset of any kind, then nothing.
pub fn select_download_url(assets: &[ReleaseAsset]) -> Option<&str> {
    assets
        .iter()
        .find(|asset| has_zip_extension(&asset.name))
        .or_else(|| assets.first())
        .map(|asset| asset.browser_download_url.as_str())
}

fn has_zip_extension(name: &str) -> bool {
    name.rsplit_once('.').is_some_and(|(_, ext)| ext == "zip")
}
