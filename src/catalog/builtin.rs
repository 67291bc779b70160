use super::model::{Catalog, MediaKind, Track};

fn entry(
    id: &str,
    title: &str,
    media_url: &str,
    kind: MediaKind,
    featured: bool,
    genre: &str,
    release_date: &str,
    description: &str,
) -> Track {
    Track {
        id: id.to_string(),
        title: title.to_string(),
        artist: "The House Band".to_string(),
        media_url: media_url.to_string(),
        cover_image_url: format!("/images/{id}-cover.jpg"),
        kind,
        featured,
        duration_seconds: None,
        genre: Some(genre.to_string()),
        release_date: Some(release_date.to_string()),
        description: Some(description.to_string()),
    }
}

impl Catalog {
    /// The catalog shipped with the binary, used when no catalog file is configured.
    pub fn builtin() -> Self {
        Self {
            tracks: vec![
                entry(
                    "1",
                    "Midnight Circuit",
                    "/music/midnight-circuit.mp3",
                    MediaKind::Audio,
                    true,
                    "Electronic",
                    "2023-06-01",
                    "Late-night synth mix to keep the floor moving",
                ),
                entry(
                    "2",
                    "Monsoon Mashup",
                    "/music/monsoon-mashup.ogg",
                    MediaKind::Audio,
                    true,
                    "Pop",
                    "2023-07-15",
                    "Summer mashup of the year's biggest hooks",
                ),
                entry(
                    "3",
                    "Rooftop Sessions",
                    "/music/rooftop-sessions.flac",
                    MediaKind::Audio,
                    false,
                    "House",
                    "2023-09-02",
                    "Live set recorded above the city",
                ),
                entry(
                    "4",
                    "Festival Lights",
                    "/music/festival-lights.mp3",
                    MediaKind::Audio,
                    false,
                    "Dance",
                    "2023-11-12",
                    "Festival edit with extended drops",
                ),
                entry(
                    "5",
                    "Festival Lights (Video)",
                    "/videos/festival-lights.mp4",
                    MediaKind::Video,
                    true,
                    "Dance",
                    "2023-11-12",
                    "Official video for the festival edit",
                ),
            ],
        }
    }
}
