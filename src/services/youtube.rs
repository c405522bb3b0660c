use crate::models::RawVideoDetail;
use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;

const YOUTUBE_API_BASE: &str = "https://www.googleapis.com/youtube/v3";

/// Both `playlistItems.list` (page size) and `videos.list` (ids per call)
/// cap out at 50.
const MAX_RESULTS_PER_PAGE: usize = 50;
const MAX_IDS_PER_REQUEST: usize = 50;

/// Read-only client for the YouTube Data API v3.
pub struct YoutubeClient {
    http: Client,
    api_key: String,
    base_url: String,
}

#[derive(Deserialize)]
struct ChannelListResponse {
    #[serde(default)]
    items: Vec<ChannelItem>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChannelItem {
    content_details: ChannelContentDetails,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChannelContentDetails {
    related_playlists: RelatedPlaylists,
}

#[derive(Deserialize)]
struct RelatedPlaylists {
    uploads: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistItemsPage {
    next_page_token: Option<String>,
    #[serde(default)]
    items: Vec<PlaylistItem>,
}

#[derive(Deserialize)]
struct PlaylistItem {
    snippet: PlaylistItemSnippet,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistItemSnippet {
    resource_id: PlaylistResourceId,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistResourceId {
    video_id: String,
}

#[derive(Deserialize)]
struct VideoListResponse {
    #[serde(default)]
    items: Vec<RawVideoDetail>,
}

impl YoutubeClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, YOUTUBE_API_BASE.to_string())
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        YoutubeClient {
            http: Client::new(),
            api_key,
            base_url,
        }
    }

    /// Resolves a channel's implicit "uploads" playlist, the listing that
    /// contains every video the channel has published.
    pub async fn uploads_playlist_id(&self, channel_id: &str) -> Result<String> {
        // https://developers.google.com/youtube/v3/docs/channels
        let url = format!(
            "{}/channels?id={channel_id}&key={}&part=contentDetails&fields=items/contentDetails/relatedPlaylists/uploads",
            self.base_url, self.api_key
        );

        let response: ChannelListResponse = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()
            .with_context(|| format!("resolving uploads playlist for channel {channel_id}"))?
            .json()
            .await?;

        response
            .items
            .into_iter()
            .next()
            .map(|item| item.content_details.related_playlists.uploads)
            .ok_or_else(|| anyhow::anyhow!("no uploads playlist found for channel {channel_id}"))
    }

    /// Walks the playlist's paged listing and returns every video id in
    /// playlist order. A failed page aborts with no partial result.
    pub async fn list_all_video_ids(&self, playlist_id: &str) -> Result<Vec<String>> {
        let mut all_video_ids = Vec::new();
        let mut next_page_token: Option<String> = None;

        loop {
            // https://developers.google.com/youtube/v3/docs/playlistItems
            let mut url = format!(
                "{}/playlistItems?playlistId={playlist_id}&key={}&part=snippet&maxResults={MAX_RESULTS_PER_PAGE}&fields=nextPageToken,items/snippet/resourceId/videoId",
                self.base_url, self.api_key
            );
            if let Some(token) = &next_page_token {
                url.push_str(&format!("&pageToken={token}"));
            }

            let page: PlaylistItemsPage = self
                .http
                .get(&url)
                .send()
                .await?
                .error_for_status()
                .with_context(|| format!("listing items of playlist {playlist_id}"))?
                .json()
                .await?;

            for item in page.items {
                all_video_ids.push(item.snippet.resource_id.video_id);
            }

            match page.next_page_token {
                Some(token) => next_page_token = Some(token),
                None => break,
            }
        }

        Ok(all_video_ids)
    }

    /// Fetches snippet + statistics for every id, at most 50 ids per call.
    /// The upstream may reorder within a batch, so callers match by id.
    pub async fn fetch_details(&self, ids: &[String]) -> Result<Vec<RawVideoDetail>> {
        let mut details = Vec::with_capacity(ids.len());

        for chunk in ids.chunks(MAX_IDS_PER_REQUEST) {
            let joined = chunk.join(",");
            // https://developers.google.com/youtube/v3/docs/videos
            let url = format!(
                "{}/videos?id={joined}&key={}&part=snippet,statistics&fields=items(id,snippet(title,description,publishedAt,thumbnails),statistics(viewCount,likeCount))",
                self.base_url, self.api_key
            );

            let response: VideoListResponse = self
                .http
                .get(&url)
                .send()
                .await?
                .error_for_status()
                .context("fetching video details")?
                .json()
                .await?;

            details.extend(response.items);
        }

        Ok(details)
    }
}
