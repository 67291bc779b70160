/// One uploaded video, flattened from the listing response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Video {
    pub id: String,
    pub title: String,
    pub description: String,
    pub thumbnail_url: String,
    /// RFC 3339 timestamp as returned by the API.
    pub published_at: String,
}

impl Video {
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.id)
    }

    /// Calendar date part of `published_at`.
    pub fn published_date(&self) -> &str {
        self.published_at
            .split_once('T')
            .map_or(self.published_at.as_str(), |(date, _)| date)
    }
}

/// Result of loading the video section.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VideoFeed {
    pub videos: Vec<Video>,
    /// Shown in place of the list when loading failed.
    pub unavailable: Option<String>,
}

impl VideoFeed {
    pub fn loaded(videos: Vec<Video>) -> Self {
        Self {
            videos,
            unavailable: None,
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            videos: Vec::new(),
            unavailable: Some(message.into()),
        }
    }
}
