use serde::Deserialize;

use crate::error::CatalogError;

/// What kind of media a catalog entry points at.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MediaKind {
    #[default]
    Audio,
    Video,
    Image,
}

/// A playable catalog item.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Track {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub media_url: String,
    #[serde(default)]
    pub cover_image_url: String,
    #[serde(default)]
    pub kind: MediaKind,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub duration_seconds: Option<f64>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Track {
    /// `Artist - Title`, or just the title when the artist is blank.
    pub fn display(&self) -> String {
        let artist = self.artist.trim();
        if artist.is_empty() {
            self.title.clone()
        } else {
            format!("{} - {}", artist, self.title)
        }
    }
}

/// Ordered, read-only list of tracks with unique ids.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub(super) tracks: Vec<Track>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids.
    pub fn new(tracks: Vec<Track>) -> Result<Self, CatalogError> {
        for (i, t) in tracks.iter().enumerate() {
            if tracks[..i].iter().any(|other| other.id == t.id) {
                return Err(CatalogError::DuplicateId(t.id.clone()));
            }
        }
        Ok(Self { tracks })
    }

    pub fn get_all(&self) -> &[Track] {
        &self.tracks
    }

    pub fn get_by_id(&self, id: &str) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id == id)
    }

    pub fn get_by_type(&self, kind: MediaKind) -> Vec<&Track> {
        self.tracks.iter().filter(|t| t.kind == kind).collect()
    }

    pub fn get_featured(&self) -> Vec<&Track> {
        self.tracks.iter().filter(|t| t.featured).collect()
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}
