use std::thread;
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::config::VideoSettings;
use crate::error::FetchError;

use super::model::{Video, VideoFeed};

const UNAVAILABLE: &str = "Videos are unavailable right now.";

/// Blocking client for the two listing calls.
pub struct YouTubeClient {
    agent: ureq::Agent,
    base_url: String,
    channel_id: String,
    api_key: String,
    max_results: u32,
    retries: u32,
    backoff: Duration,
}

impl YouTubeClient {
    pub fn from_settings(settings: &VideoSettings) -> Result<Self, FetchError> {
        if settings.channel_id.trim().is_empty() {
            return Err(FetchError::NotConfigured("videos.channel_id"));
        }
        if settings.api_key.trim().is_empty() {
            return Err(FetchError::NotConfigured("videos.api_key"));
        }

        let timeout = Duration::from_secs(settings.timeout_secs);
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(timeout)
            .timeout_read(timeout)
            .redirects(10)
            .build();

        Ok(Self {
            agent,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            channel_id: settings.channel_id.clone(),
            api_key: settings.api_key.clone(),
            max_results: settings.max_results,
            retries: settings.retries,
            backoff: Duration::from_millis(settings.backoff_ms),
        })
    }

    /// Look up the channel's uploads playlist, then list its items.
    pub fn fetch_uploads(&self) -> Result<Vec<Video>, FetchError> {
        let body = self.get(
            "channels",
            &[("part", "contentDetails"), ("id", &self.channel_id)],
        )?;
        let playlist = uploads_playlist_id(&body)?;
        debug!(%playlist, "resolved uploads playlist");

        let max_results = self.max_results.to_string();
        let body = self.get(
            "playlistItems",
            &[
                ("part", "snippet"),
                ("maxResults", &max_results),
                ("playlistId", &playlist),
            ],
        )?;
        parse_playlist_items(&body)
    }

    /// GET `path` with bounded retries. Client errors (4xx) are not retried.
    fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<String, FetchError> {
        let url = format!("{}/{}", self.base_url, path);
        let mut last_error = None;

        for attempt in 0..=self.retries {
            if attempt > 0 {
                let delay = self.backoff * (1u32 << (attempt - 1).min(16));
                info!(path, attempt, ?delay, "retrying video listing request");
                thread::sleep(delay);
            }

            let mut req = self.agent.get(&url);
            for (k, v) in query {
                req = req.query(k, v);
            }
            match req.query("key", &self.api_key).call() {
                Ok(resp) => return Ok(resp.into_string()?),
                Err(ureq::Error::Status(code, _)) if (400..500).contains(&code) => {
                    return Err(FetchError::Http(format!("{path}: status {code}")));
                }
                Err(e) => {
                    // The error text carries the full URL; keep the key out of logs.
                    let reason = match &e {
                        ureq::Error::Status(code, _) => format!("status {code}"),
                        ureq::Error::Transport(t) => t.kind().to_string(),
                    };
                    warn!(path, attempt = attempt + 1, %reason, "video listing request failed");
                    last_error = Some(reason);
                }
            }
        }

        Err(FetchError::Http(format!(
            "{path}: failed after {} attempts: {}",
            self.retries + 1,
            last_error.unwrap_or_else(|| "unknown error".to_string())
        )))
    }
}

#[derive(Deserialize)]
struct ChannelList {
    #[serde(default)]
    items: Vec<Channel>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Channel {
    content_details: ContentDetails,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContentDetails {
    related_playlists: RelatedPlaylists,
}

#[derive(Deserialize)]
struct RelatedPlaylists {
    uploads: String,
}

#[derive(Deserialize)]
struct PlaylistItems {
    #[serde(default)]
    items: Vec<PlaylistItem>,
}

#[derive(Deserialize)]
struct PlaylistItem {
    snippet: Snippet,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snippet {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    published_at: String,
    #[serde(default)]
    thumbnails: Thumbnails,
    resource_id: ResourceId,
}

#[derive(Deserialize, Default)]
struct Thumbnails {
    high: Option<Thumbnail>,
    medium: Option<Thumbnail>,
    default: Option<Thumbnail>,
}

#[derive(Deserialize)]
struct Thumbnail {
    url: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResourceId {
    video_id: Option<String>,
}

/// Uploads playlist id from a `channels?part=contentDetails` response.
pub fn uploads_playlist_id(body: &str) -> Result<String, FetchError> {
    let list: ChannelList = serde_json::from_str(body)?;
    list.items
        .into_iter()
        .next()
        .map(|c| c.content_details.related_playlists.uploads)
        .ok_or(FetchError::Missing("channel"))
}

/// Videos from a `playlistItems?part=snippet` response, in listing order.
/// Items without a video id (deleted or private uploads) are skipped.
pub fn parse_playlist_items(body: &str) -> Result<Vec<Video>, FetchError> {
    let list: PlaylistItems = serde_json::from_str(body)?;
    Ok(list
        .items
        .into_iter()
        .filter_map(|item| {
            let s = item.snippet;
            let id = s.resource_id.video_id?;
            let thumbs = s.thumbnails;
            let thumbnail_url = thumbs
                .high
                .or(thumbs.medium)
                .or(thumbs.default)
                .map(|t| t.url)
                .unwrap_or_default();
            Some(Video {
                id,
                title: s.title,
                description: s.description,
                thumbnail_url,
                published_at: s.published_at,
            })
        })
        .collect())
}

/// Load the video section, degrading to an explanation on any failure.
pub fn load_feed(settings: &VideoSettings) -> VideoFeed {
    if !settings.enabled {
        return VideoFeed::unavailable("Videos are turned off.");
    }
    let client = match YouTubeClient::from_settings(settings) {
        Ok(c) => c,
        Err(e) => {
            info!(error = %e, "video listing skipped");
            return VideoFeed::unavailable(UNAVAILABLE);
        }
    };
    match client.fetch_uploads() {
        Ok(videos) => {
            info!(count = videos.len(), "loaded channel videos");
            VideoFeed::loaded(videos)
        }
        Err(e) => {
            warn!(error = %e, "video listing failed");
            VideoFeed::unavailable(UNAVAILABLE)
        }
    }
}
