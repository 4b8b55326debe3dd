use serde::{Deserialize, Serialize};

/// A downloadable file attached to a release.
#[derive(Deserialize, Serialize, Debug, PartialEq, Clone)]
pub struct ReleaseAsset {
    pub name: String,
    pub browser_download_url: String,
}

/// The latest published release of a repository.
///
/// Replaced wholesale on every refresh. `tag_name` is the one field a
/// usable payload must carry; a response without it fails to parse and
/// the fetch degrades to a cache miss.
#[derive(Deserialize, Serialize, Debug, PartialEq, Clone, Default)]
pub struct Release {
    pub tag_name: String,
    pub name: Option<String>,
    pub body: Option<String>,
    pub html_url: Option<String>,
    pub published_at: Option<String>,
    #[serde(default)]
    pub assets: Vec<ReleaseAsset>,
}
