use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One item from the YouTube `videos.list` response, restricted to the
/// `snippet` and `statistics` parts the importer requests.
#[derive(Debug, Clone, Deserialize)]
pub struct RawVideoDetail {
    pub id: String,
    pub snippet: VideoSnippet,
    #[serde(default)]
    pub statistics: VideoStatistics,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSnippet {
    pub title: String,
    pub description: String,
    pub published_at: String,
    #[serde(default)]
    pub thumbnails: HashMap<String, Thumbnail>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Thumbnail {
    pub url: String,
}

/// YouTube serializes counts as decimal strings and omits a statistic
/// entirely when the channel has disabled it. Both counts stay optional
/// here; defaulting to zero happens in the transform step.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoStatistics {
    pub view_count: Option<String>,
    pub like_count: Option<String>,
}

/// The flat document shape stored in the Algolia index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    pub published_at: String,
    pub published_at_unix_time: i64,
    pub views: u64,
    pub likes: u64,
    pub image: String,
    pub url: String,
    /// Algolia's required unique-key field; always equals `id`.
    #[serde(rename = "objectID")]
    pub object_id: String,
}
