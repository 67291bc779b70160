//! Application model: what the terminal front end shows and where.
//!
//! `App` holds the catalog views (filtered audio tracks, featured strip,
//! catalog clips), the music and video carousels, the latest player snapshot
//! and the per-surface controls. It never talks to the media element;
//! playback goes through the `SharedPlayer` handed to the event loop.

use ratatui::layout::{Position, Rect};

use super::browse::{self, MusicFilter};
use crate::carousel::{Breakpoint, Carousel};
use crate::catalog::{Catalog, MediaKind, Track};
use crate::config::Settings;
use crate::controls::{CardView, ProgressControl, TransportButtons, VolumeControl, Waveform};
use crate::player::PlayerSnapshot;
use crate::videos::{Video, VideoFeed};

/// Which section keyboard navigation applies to.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Music,
    Videos,
}

/// Screen areas the mouse can interact with, recorded on every draw.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct HitRegions {
    pub progress: Option<Rect>,
    pub volume: Option<Rect>,
    pub music: Option<Rect>,
    pub videos: Option<Rect>,
}

impl HitRegions {
    pub fn hit(area: Option<Rect>, column: u16, row: u16) -> bool {
        area.is_some_and(|r| r.contains(Position::new(column, row)))
    }
}

/// Number of featured tracks shown in the strip.
pub const FEATURED_SLOTS: usize = 3;

/// One row of the videos section: a catalog clip played through the shared
/// player, or an upload from the channel feed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VideoEntry<'a> {
    Clip(&'a Track),
    Upload(&'a Video),
}

/// Breakpoint widths and cell size used to map terminal columns to pixels.
#[derive(Copy, Clone, Debug)]
struct Viewport {
    cell_width_px: f64,
    medium_min_px: f64,
    large_min_px: f64,
}

/// The main application model.
pub struct App {
    catalog: Catalog,
    /// Every audio track, catalog order.
    library: Vec<Track>,
    /// Tracks passing `filter`, in display order.
    pub tracks: Vec<Track>,
    pub selected: usize,
    pub music: Carousel,
    pub filter: MusicFilter,
    pub genres: Vec<String>,
    /// Keystrokes go into the search query.
    pub searching: bool,
    /// Ids of the featured audio tracks.
    pub featured: Vec<String>,

    /// Video entries of the catalog, listed ahead of the uploads.
    pub clips: Vec<Track>,
    pub videos: Vec<Video>,
    pub videos_unavailable: Option<String>,
    pub videos_loading: bool,
    pub video_selected: usize,
    pub video_carousel: Carousel,

    pub focus: Focus,
    /// Full player panel instead of the browse view.
    pub full_player: bool,
    pub snapshot: PlayerSnapshot,
    pub progress: ProgressControl,
    pub buttons: TransportButtons,
    pub volume: VolumeControl,
    pub waveform: Waveform,
    pub header_text: String,
    pub status: Option<String>,
    pub regions: HitRegions,
    /// Seconds since start, drives the visualizer animation.
    pub elapsed: f64,

    viewport: Viewport,
}

impl App {
    /// Build the model over `catalog`: audio tracks feed the music carousel,
    /// video entries lead the videos section.
    pub fn new(catalog: &Catalog, settings: &Settings, snapshot: PlayerSnapshot) -> Self {
        let owned = |tracks: Vec<&Track>| tracks.into_iter().cloned().collect::<Vec<_>>();
        let library = owned(catalog.get_by_type(MediaKind::Audio));
        let clips = owned(catalog.get_by_type(MediaKind::Video));
        let featured = catalog
            .get_featured()
            .into_iter()
            .filter(|t| t.kind == MediaKind::Audio)
            .take(FEATURED_SLOTS)
            .map(|t| t.id.clone())
            .collect();
        let threshold = settings.carousel.swipe_threshold_px;

        Self {
            catalog: catalog.clone(),
            music: Carousel::new(library.len(), 1, threshold),
            tracks: library.clone(),
            genres: browse::genres(&library),
            library,
            selected: 0,
            filter: MusicFilter::default(),
            searching: false,
            featured,

            video_carousel: Carousel::new(clips.len(), settings.carousel.videos_per_page, threshold),
            clips,
            videos: Vec::new(),
            videos_unavailable: None,
            videos_loading: settings.videos.enabled,
            video_selected: 0,

            focus: Focus::Music,
            full_player: false,
            snapshot,
            progress: ProgressControl::new(),
            buttons: TransportButtons::new(settings.controls.reset_threshold_seconds),
            volume: VolumeControl::new(settings.controls.volume_step),
            waveform: Waveform::new(settings.ui.visualizer_bars),
            header_text: settings.ui.header_text.clone(),
            status: None,
            regions: HitRegions::default(),
            elapsed: 0.0,

            viewport: Viewport {
                cell_width_px: settings.carousel.cell_width_px,
                medium_min_px: settings.carousel.medium_min_width_px,
                large_min_px: settings.carousel.large_min_width_px,
            },
        }
    }

    pub fn has_tracks(&self) -> bool {
        !self.tracks.is_empty()
    }

    pub fn selected_track(&self) -> Option<&Track> {
        self.tracks.get(self.selected)
    }

    /// Catalog entry by id, whatever its kind.
    pub fn track(&self, id: &str) -> Option<&Track> {
        self.catalog.get_by_id(id)
    }

    /// Featured track in strip slot `slot`.
    pub fn featured_track(&self, slot: usize) -> Option<&Track> {
        self.featured.get(slot).and_then(|id| self.track(id))
    }

    pub fn video_count(&self) -> usize {
        self.clips.len() + self.videos.len()
    }

    pub fn video_entry(&self, index: usize) -> Option<VideoEntry<'_>> {
        match self.clips.get(index) {
            Some(clip) => Some(VideoEntry::Clip(clip)),
            None => self
                .videos
                .get(index - self.clips.len())
                .map(VideoEntry::Upload),
        }
    }

    pub fn selected_video(&self) -> Option<VideoEntry<'_>> {
        self.video_entry(self.video_selected)
    }

    /// Card for the track at `index`; cards on the visible page are active.
    pub fn card(&self, index: usize) -> Option<CardView> {
        let track = self.tracks.get(index)?;
        let mut card = CardView::new(track.id.clone());
        card.set_active(self.music.pager().visible_range().contains(&index));
        Some(card)
    }

    pub fn observe(&mut self, snapshot: PlayerSnapshot) {
        self.snapshot = snapshot;
    }

    pub fn tick(&mut self, seconds: f64) {
        self.elapsed += seconds;
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status = Some(msg.into());
    }

    pub fn toggle_full_player(&mut self) {
        self.full_player = !self.full_player;
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Music => Focus::Videos,
            Focus::Videos => Focus::Music,
        };
    }

    /// Carousel of the focused section.
    pub fn focused_carousel_mut(&mut self) -> &mut Carousel {
        match self.focus {
            Focus::Music => &mut self.music,
            Focus::Videos => &mut self.video_carousel,
        }
    }

    /// Carousel with a pointer drag in progress.
    pub fn dragging_carousel_mut(&mut self) -> Option<&mut Carousel> {
        if self.music.is_dragging() {
            Some(&mut self.music)
        } else if self.video_carousel.is_dragging() {
            Some(&mut self.video_carousel)
        } else {
            None
        }
    }

    /// Adjust cards per page to a terminal `columns` wide.
    pub fn set_viewport_columns(&mut self, columns: u16) {
        let px = self.columns_to_px(columns);
        let per_page = Breakpoint::from_width(
            px,
            self.viewport.medium_min_px,
            self.viewport.large_min_px,
        )
        .items_per_page();
        self.music.set_items_per_page(per_page);
        self.follow_page();
    }

    pub fn columns_to_px(&self, columns: u16) -> f64 {
        f64::from(columns) * self.viewport.cell_width_px
    }

    pub fn set_videos(&mut self, feed: VideoFeed) {
        self.videos = feed.videos;
        self.videos_unavailable = feed.unavailable;
        self.videos_loading = false;
        self.video_selected = 0;
        self.video_carousel.set_total_items(self.video_count());
    }

    pub fn start_search(&mut self) {
        self.searching = true;
        self.focus = Focus::Music;
    }

    /// Leave search mode, keeping the query.
    pub fn finish_search(&mut self) {
        self.searching = false;
    }

    /// Leave search mode and drop the query.
    pub fn cancel_search(&mut self) {
        self.searching = false;
        self.filter.query.clear();
        self.refilter();
    }

    pub fn push_query(&mut self, c: char) {
        self.filter.query.push(c);
        self.refilter();
    }

    pub fn pop_query(&mut self) {
        self.filter.query.pop();
        self.refilter();
    }

    /// Next genre, then back to all genres.
    pub fn cycle_genre(&mut self) {
        self.filter.genre = browse::next_genre(&self.genres, self.filter.genre.as_deref());
        self.refilter();
    }

    pub fn cycle_sort(&mut self) {
        self.filter.sort = self.filter.sort.next();
        self.refilter();
    }

    /// Rebuild the music view from the filter. The selected track stays
    /// selected when it still matches; otherwise selection returns to the
    /// first track.
    fn refilter(&mut self) {
        let keep = self.selected_track().map(|t| t.id.clone());
        self.tracks = self.filter.apply(&self.library);
        self.music.set_total_items(self.tracks.len());

        self.selected = keep
            .and_then(|id| self.tracks.iter().position(|t| t.id == id))
            .unwrap_or(0);
        let page = self.selected / self.music.pager().items_per_page();
        self.music.select(page);
        self.follow_page();
    }

    /// Move the selection within the focused section, wrapping at the ends.
    /// The carousel pages along with it.
    pub fn select_next(&mut self) {
        match self.focus {
            Focus::Music => {
                self.selected = step(self.selected, self.tracks.len(), 1);
                let page = self.selected / self.music.pager().items_per_page();
                self.music.select(page);
            }
            Focus::Videos => {
                self.video_selected = step(self.video_selected, self.video_count(), 1);
                let page = self.video_selected / self.video_carousel.pager().items_per_page();
                self.video_carousel.select(page);
            }
        }
    }

    pub fn select_prev(&mut self) {
        match self.focus {
            Focus::Music => {
                self.selected = step(self.selected, self.tracks.len(), -1);
                let page = self.selected / self.music.pager().items_per_page();
                self.music.select(page);
            }
            Focus::Videos => {
                self.video_selected = step(self.video_selected, self.video_count(), -1);
                let page = self.video_selected / self.video_carousel.pager().items_per_page();
                self.video_carousel.select(page);
            }
        }
    }

    pub fn page_next(&mut self) {
        self.focused_carousel_mut().next();
        self.follow_page();
    }

    pub fn page_prev(&mut self) {
        self.focused_carousel_mut().previous();
        self.follow_page();
    }

    /// Jump the focused carousel to `page` (zero-based).
    pub fn select_page(&mut self, page: usize) -> bool {
        let moved = self.focused_carousel_mut().select(page);
        self.follow_page();
        moved
    }

    /// Keep each selection on its carousel's visible page.
    pub fn follow_page(&mut self) {
        let range = self.music.pager().visible_range();
        if !range.contains(&self.selected) {
            self.selected = range.start;
        }
        let range = self.video_carousel.pager().visible_range();
        if !range.contains(&self.video_selected) {
            self.video_selected = range.start;
        }
    }
}

fn step(index: usize, len: usize, delta: isize) -> usize {
    if len == 0 {
        return 0;
    }
    (index as isize + delta).rem_euclid(len as isize) as usize
}
