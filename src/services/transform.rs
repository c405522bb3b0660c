use crate::models::{RawVideoDetail, Thumbnail, VideoRecord};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Best-resolution-first. The order is load-bearing: the first label
/// present in a video's thumbnail set wins.
const THUMBNAIL_QUALITIES: [&str; 5] = ["maxres", "standard", "high", "medium", "default"];

/// Returns the URL of the best available thumbnail variant, or an empty
/// string when the video has no thumbnails at all.
pub fn best_image_url(thumbnails: &HashMap<String, Thumbnail>) -> String {
    for quality in THUMBNAIL_QUALITIES {
        if let Some(thumbnail) = thumbnails.get(quality) {
            return thumbnail.url.clone();
        }
    }
    String::new()
}

/// Parses the RFC-3339 publish timestamp (trailing `Z` = UTC) into whole
/// epoch seconds.
pub fn published_at_unix_time(published_at: &str) -> Result<i64> {
    let datetime = published_at
        .parse::<DateTime<Utc>>()
        .with_context(|| format!("parsing publish timestamp {published_at}"))?;
    Ok(datetime.timestamp())
}

pub fn embed_url(video_id: &str) -> String {
    format!("https://www.youtube.com/embed/{video_id}")
}

/// A statistic the channel has disabled is absent upstream, not zero; the
/// index record always carries a number, so absence maps to 0 here.
fn parse_count(count: Option<&String>, field: &str, video_id: &str) -> Result<u64> {
    match count {
        Some(value) => value
            .parse::<u64>()
            .with_context(|| format!("parsing {field} {value:?} of video {video_id}")),
        None => Ok(0),
    }
}

/// Maps one raw detail record into the flat index document. Pure, no I/O.
pub fn normalize(detail: &RawVideoDetail) -> Result<VideoRecord> {
    let snippet = &detail.snippet;

    Ok(VideoRecord {
        id: detail.id.clone(),
        title: snippet.title.clone(),
        description: snippet.description.clone(),
        published_at: snippet.published_at.clone(),
        published_at_unix_time: published_at_unix_time(&snippet.published_at)?,
        views: parse_count(detail.statistics.view_count.as_ref(), "viewCount", &detail.id)?,
        likes: parse_count(detail.statistics.like_count.as_ref(), "likeCount", &detail.id)?,
        image: best_image_url(&snippet.thumbnails),
        url: embed_url(&detail.id),
        object_id: detail.id.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{VideoSnippet, VideoStatistics};

    fn thumbnails(labels: &[&str]) -> HashMap<String, Thumbnail> {
        labels
            .iter()
            .map(|label| {
                (
                    label.to_string(),
                    Thumbnail {
                        url: format!("https://i.ytimg.com/vi/x/{label}.jpg"),
                    },
                )
            })
            .collect()
    }

    fn detail(statistics: VideoStatistics, thumbs: &[&str]) -> RawVideoDetail {
        RawVideoDetail {
            id: "abc123".to_string(),
            snippet: VideoSnippet {
                title: "A title".to_string(),
                description: "A description".to_string(),
                published_at: "2021-06-01T00:00:00Z".to_string(),
                thumbnails: thumbnails(thumbs),
            },
            statistics,
        }
    }

    #[test]
    fn picks_highest_priority_thumbnail_present() {
        assert_eq!(
            best_image_url(&thumbnails(&["default", "high", "maxres"])),
            "https://i.ytimg.com/vi/x/maxres.jpg"
        );
        assert_eq!(
            best_image_url(&thumbnails(&["default", "medium"])),
            "https://i.ytimg.com/vi/x/medium.jpg"
        );
        assert_eq!(
            best_image_url(&thumbnails(&["default"])),
            "https://i.ytimg.com/vi/x/default.jpg"
        );
    }

    #[test]
    fn empty_thumbnail_set_yields_empty_string() {
        assert_eq!(best_image_url(&HashMap::new()), "");
    }

    #[test]
    fn unknown_labels_are_ignored() {
        let mut thumbs = thumbnails(&["medium"]);
        thumbs.insert(
            "ultra".to_string(),
            Thumbnail {
                url: "https://i.ytimg.com/vi/x/ultra.jpg".to_string(),
            },
        );
        assert_eq!(best_image_url(&thumbs), "https://i.ytimg.com/vi/x/medium.jpg");
    }

    #[test]
    fn z_suffixed_timestamp_is_utc_epoch_seconds() {
        assert_eq!(published_at_unix_time("2021-06-01T00:00:00Z").unwrap(), 1622505600);
        assert_eq!(published_at_unix_time("1970-01-01T00:00:01Z").unwrap(), 1);
    }

    #[test]
    fn malformed_timestamp_is_an_error() {
        assert!(published_at_unix_time("not-a-date").is_err());
        assert!(published_at_unix_time("").is_err());
    }

    #[test]
    fn absent_counts_default_to_zero() {
        let record = normalize(&detail(VideoStatistics::default(), &["default"])).unwrap();
        assert_eq!(record.views, 0);
        assert_eq!(record.likes, 0);
    }

    #[test]
    fn present_counts_parse_exactly() {
        let statistics = VideoStatistics {
            view_count: Some("1234567".to_string()),
            like_count: Some("89".to_string()),
        };
        let record = normalize(&detail(statistics, &[])).unwrap();
        assert_eq!(record.views, 1234567);
        assert_eq!(record.likes, 89);
    }

    #[test]
    fn malformed_count_is_an_error() {
        let statistics = VideoStatistics {
            view_count: Some("lots".to_string()),
            like_count: None,
        };
        assert!(normalize(&detail(statistics, &[])).is_err());
    }

    #[test]
    fn normalized_record_carries_every_field() {
        let statistics = VideoStatistics {
            view_count: Some("10".to_string()),
            like_count: None,
        };
        let record = normalize(&detail(statistics, &["default"])).unwrap();

        assert_eq!(record.id, "abc123");
        assert_eq!(record.object_id, record.id);
        assert_eq!(record.title, "A title");
        assert_eq!(record.description, "A description");
        assert_eq!(record.published_at, "2021-06-01T00:00:00Z");
        assert_eq!(record.published_at_unix_time, 1622505600);
        assert_eq!(record.views, 10);
        assert_eq!(record.likes, 0);
        assert_eq!(record.image, "https://i.ytimg.com/vi/x/default.jpg");
        assert_eq!(record.url, "https://www.youtube.com/embed/abc123");
    }

    #[test]
    fn record_serializes_with_index_field_names() {
        let record = normalize(&detail(VideoStatistics::default(), &[])).unwrap();
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["objectID"], "abc123");
        assert_eq!(value["publishedAt"], "2021-06-01T00:00:00Z");
        assert_eq!(value["publishedAtUnixTime"], 1622505600);
        assert_eq!(value["image"], "");
        assert_eq!(value["url"], "https://www.youtube.com/embed/abc123");
    }
}
