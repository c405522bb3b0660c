use crate::services::algolia::AlgoliaClient;
use crate::services::transform;
use crate::services::youtube::YoutubeClient;
use anyhow::Result;
use log::info;

/// Runs the whole import once: channel → uploads playlist → video ids →
/// detail records → normalized records → Algolia. Strictly sequential;
/// the first failure anywhere aborts the run.
pub async fn run(youtube: &YoutubeClient, algolia: &AlgoliaClient, channel_id: &str) -> Result<()> {
    let playlist_id = youtube.uploads_playlist_id(channel_id).await?;
    info!("Uploads playlist for channel {channel_id}: {playlist_id}");

    let video_ids = youtube.list_all_video_ids(&playlist_id).await?;
    info!("Found {} videos in playlist", video_ids.len());

    let details = youtube.fetch_details(&video_ids).await?;

    let mut records = Vec::with_capacity(details.len());
    for detail in &details {
        records.push(transform::normalize(detail)?);
    }

    algolia.save_objects(&records).await?;
    algolia.set_settings().await?;

    info!("Import complete: {} videos indexed", records.len());
    Ok(())
}
