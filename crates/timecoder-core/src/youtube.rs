use async_trait::async_trait;
use serde::Deserialize;

use crate::{
    error::{Result, TimecoderError},
    types::VideoEntry,
};

const YOUTUBE_API_BASE: &str = "https://www.googleapis.com/youtube/v3";
const PLAYLIST_PAGE_SIZE: &str = "50";

/// Narrow video-platform surface needed by the pipeline.
#[async_trait]
pub trait VideoPlatform: Send + Sync {
    /// Ordered (title, url) pairs for every video in the playlist.
    /// Degrades to an empty list on failure.
    async fn playlist_videos(&self, playlist_id: &str) -> Vec<VideoEntry>;

    /// Video duration in seconds, 0 on failure.
    async fn video_duration(&self, video_id: &str) -> f64;
}

pub struct YoutubeClient {
    client: reqwest::Client,
    api_base: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct PlaylistItemsPage {
    #[serde(default)]
    items: Vec<PlaylistItem>,
    #[serde(rename = "nextPageToken")]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PlaylistItem {
    snippet: Option<PlaylistSnippet>,
}

#[derive(Debug, Deserialize)]
struct PlaylistSnippet {
    #[serde(default)]
    title: String,
    #[serde(rename = "resourceId")]
    resource_id: Option<PlaylistResourceId>,
}

#[derive(Debug, Deserialize)]
struct PlaylistResourceId {
    #[serde(rename = "videoId", default)]
    video_id: String,
}

#[derive(Debug, Deserialize)]
struct VideoListPage {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
struct VideoItem {
    #[serde(rename = "contentDetails")]
    content_details: Option<VideoContentDetails>,
}

#[derive(Debug, Deserialize)]
struct VideoContentDetails {
    #[serde(default)]
    duration: String,
}

impl YoutubeClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: YOUTUBE_API_BASE.to_string(),
            api_key: api_key.into(),
        }
    }

    async fn fetch_playlist_items(&self, playlist_id: &str) -> Result<Vec<VideoEntry>> {
        let url = format!("{}/playlistItems", self.api_base);
        let mut video_info = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut query = vec![
                ("part", "snippet".to_string()),
                ("maxResults", PLAYLIST_PAGE_SIZE.to_string()),
                ("playlistId", playlist_id.to_string()),
                ("key", self.api_key.clone()),
            ];
            if let Some(token) = &page_token {
                query.push(("pageToken", token.clone()));
            }

            let page = self
                .client
                .get(&url)
                .query(&query)
                .send()
                .await?
                .error_for_status()?
                .json::<PlaylistItemsPage>()
                .await?;

            for item in page.items {
                let Some(snippet) = item.snippet else { continue };
                let video_id = snippet
                    .resource_id
                    .map(|resource| resource.video_id)
                    .unwrap_or_default();
                video_info.push(VideoEntry {
                    title: snippet.title,
                    url: format!("https://www.youtube.com/watch?v={video_id}"),
                });
            }

            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        Ok(video_info)
    }

    async fn fetch_video_duration(&self, video_id: &str) -> Result<f64> {
        let url = format!("{}/videos", self.api_base);
        let page = self
            .client
            .get(&url)
            .query(&[
                ("part", "contentDetails"),
                ("id", video_id),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json::<VideoListPage>()
            .await?;

        let duration = page
            .items
            .first()
            .and_then(|item| item.content_details.as_ref())
            .map(|details| details.duration.as_str())
            .unwrap_or_default();

        parse_iso8601_duration(duration).ok_or_else(|| TimecoderError::DurationParse {
            value: duration.to_string(),
        })
    }
}

#[async_trait]
impl VideoPlatform for YoutubeClient {
    async fn playlist_videos(&self, playlist_id: &str) -> Vec<VideoEntry> {
        match self.fetch_playlist_items(playlist_id).await {
            Ok(video_info) => video_info,
            Err(e) => {
                println!("An error occurred while listing playlist {playlist_id}: {e}");
                Vec::new()
            }
        }
    }

    async fn video_duration(&self, video_id: &str) -> f64 {
        match self.fetch_video_duration(video_id).await {
            Ok(seconds) => seconds,
            Err(e) => {
                println!("An error occurred while fetching duration for {video_id}: {e}");
                0.0
            }
        }
    }
}

/// Video id from a watch URL: everything after the literal `watch?v=`,
/// matching how playlist listings build their URLs.
pub fn extract_video_id(url: &str) -> Result<String> {
    url.split_once("watch?v=")
        .map(|(_, id)| id.to_string())
        .ok_or_else(|| TimecoderError::VideoUrlParse {
            url: url.to_string(),
        })
}

/// Accepts either a bare playlist id or a full playlist URL.
pub fn playlist_id_from_url(playlist_url: &str) -> &str {
    match playlist_url.split_once("list=") {
        Some((_, rest)) => rest.split('&').next().unwrap_or(rest),
        None => playlist_url,
    }
}

/// Parse an ISO-8601 duration as returned by the videos endpoint
/// ("PT1H2M5S", "PT4M13S", "P1DT2H") into whole seconds.
pub fn parse_iso8601_duration(value: &str) -> Option<f64> {
    let rest = value.strip_prefix('P')?;
    let (date_part, time_part) = match rest.split_once('T') {
        Some((date, time)) => (date, time),
        None => (rest, ""),
    };

    let mut seconds = 0.0;
    for (part, in_time) in [(date_part, false), (time_part, true)] {
        let mut digits = String::new();
        for c in part.chars() {
            if c.is_ascii_digit() {
                digits.push(c);
                continue;
            }
            let amount: f64 = digits.parse().ok()?;
            digits.clear();
            let factor = match (c, in_time) {
                ('D', false) => 86_400.0,
                ('H', true) => 3_600.0,
                ('M', true) => 60.0,
                ('S', true) => 1.0,
                _ => return None,
            };
            seconds += amount * factor;
        }
        if !digits.is_empty() {
            return None;
        }
    }
    Some(seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hours_minutes_seconds() {
        assert_eq!(parse_iso8601_duration("PT1H2M5S"), Some(3725.0));
        assert_eq!(parse_iso8601_duration("PT4M13S"), Some(253.0));
        assert_eq!(parse_iso8601_duration("PT45S"), Some(45.0));
    }

    #[test]
    fn parses_day_component() {
        assert_eq!(parse_iso8601_duration("P1DT2H"), Some(93_600.0));
    }

    #[test]
    fn empty_time_designator_is_zero() {
        assert_eq!(parse_iso8601_duration("PT"), Some(0.0));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_iso8601_duration(""), None);
        assert_eq!(parse_iso8601_duration("1H2M"), None);
        assert_eq!(parse_iso8601_duration("PT1X"), None);
        assert_eq!(parse_iso8601_duration("PT1H2"), None);
    }

    #[test]
    fn extracts_video_id_after_watch_param() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ").unwrap(),
            "dQw4w9WgXcQ"
        );
    }

    #[test]
    fn errors_on_url_without_watch_param() {
        let result = extract_video_id("https://youtu.be/dQw4w9WgXcQ");
        assert!(matches!(
            result,
            Err(TimecoderError::VideoUrlParse { .. })
        ));
    }

    #[test]
    fn playlist_id_accepts_bare_ids_and_urls() {
        assert_eq!(playlist_id_from_url("PL12345"), "PL12345");
        assert_eq!(
            playlist_id_from_url("https://www.youtube.com/playlist?list=PL12345"),
            "PL12345"
        );
        assert_eq!(
            playlist_id_from_url("https://www.youtube.com/watch?v=abc&list=PL12345&index=2"),
            "PL12345"
        );
    }
}
