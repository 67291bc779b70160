//! Search, genre filter and sort order for the music carousel.

use std::cmp::Ordering;

use crate::catalog::Track;

/// Order in which matching tracks are listed.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum SortKey {
    /// Catalog order.
    #[default]
    Default,
    Title,
    Artist,
    /// Shortest first; unknown durations count as zero.
    Duration,
}

impl SortKey {
    pub fn next(self) -> Self {
        match self {
            SortKey::Default => SortKey::Title,
            SortKey::Title => SortKey::Artist,
            SortKey::Artist => SortKey::Duration,
            SortKey::Duration => SortKey::Default,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortKey::Default => "default",
            SortKey::Title => "title",
            SortKey::Artist => "artist",
            SortKey::Duration => "duration",
        }
    }

    fn compare(self, a: &Track, b: &Track) -> Ordering {
        match self {
            SortKey::Default => Ordering::Equal,
            SortKey::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
            SortKey::Artist => a.artist.to_lowercase().cmp(&b.artist.to_lowercase()),
            SortKey::Duration => {
                let d = |t: &Track| t.duration_seconds.filter(|d| d.is_finite()).unwrap_or(0.0);
                d(a).total_cmp(&d(b))
            }
        }
    }
}

/// What the music carousel shows out of the audio catalog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MusicFilter {
    /// Case-insensitive substring of the title or artist.
    pub query: String,
    /// `None` shows every genre.
    pub genre: Option<String>,
    pub sort: SortKey,
}

impl MusicFilter {
    pub fn matches(&self, track: &Track) -> bool {
        let query = self.query.trim().to_lowercase();
        let found = query.is_empty()
            || track.title.to_lowercase().contains(&query)
            || track.artist.to_lowercase().contains(&query);
        let genre_ok = match self.genre.as_deref() {
            None => true,
            Some(g) => track.genre.as_deref() == Some(g),
        };
        found && genre_ok
    }

    /// Matching tracks in display order. The sort is stable, so ties keep
    /// catalog order.
    pub fn apply(&self, tracks: &[Track]) -> Vec<Track> {
        let mut out: Vec<Track> = tracks.iter().filter(|t| self.matches(t)).cloned().collect();
        out.sort_by(|a, b| self.sort.compare(a, b));
        out
    }

    pub fn is_active(&self) -> bool {
        !self.query.trim().is_empty() || self.genre.is_some()
    }
}

/// Distinct genres in first-seen order.
pub fn genres(tracks: &[Track]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for g in tracks.iter().filter_map(|t| t.genre.as_deref()) {
        if !out.iter().any(|seen| seen == g) {
            out.push(g.to_string());
        }
    }
    out
}

/// Genre after `current` in `genres`, cycling through "all" (`None`).
pub fn next_genre(genres: &[String], current: Option<&str>) -> Option<String> {
    let next = match current {
        None => 0,
        Some(g) => match genres.iter().position(|x| x == g) {
            Some(i) => i + 1,
            None => 0,
        },
    };
    genres.get(next).cloned()
}
