//! Ordered, id-unique play queue with wrap-around stepping.

use crate::catalog::Track;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayQueue {
    tracks: Vec<Track>,
}

impl PlayQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `track` unless a track with the same id is already queued.
    /// Returns whether the queue changed.
    pub fn append(&mut self, track: Track) -> bool {
        if self.position(&track.id).is_some() {
            return false;
        }
        self.tracks.push(track);
        true
    }

    /// Remove the track with `id`. Returns whether it was present.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.tracks.len();
        self.tracks.retain(|t| t.id != id);
        self.tracks.len() != before
    }

    pub fn clear(&mut self) {
        self.tracks.clear();
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.tracks.iter().position(|t| t.id == id)
    }

    /// Track after `current_id`, wrapping to the front. An unknown id also
    /// lands on the front.
    pub fn next(&self, current_id: &str) -> Option<&Track> {
        match self.position(current_id) {
            Some(i) => self.tracks.get(i + 1).or_else(|| self.tracks.first()),
            None => self.tracks.first(),
        }
    }

    /// Track before `current_id`, wrapping to the back. An unknown id also
    /// lands on the back.
    pub fn previous(&self, current_id: &str) -> Option<&Track> {
        match self.position(current_id) {
            Some(i) if i > 0 => self.tracks.get(i - 1),
            _ => self.tracks.last(),
        }
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}
