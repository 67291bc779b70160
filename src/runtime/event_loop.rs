use std::cell::RefCell;
use std::rc::Rc;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::debug;

use crate::app::{App, Focus, HitRegions, VideoEntry};
use crate::config;
use crate::controls::CardView;
use crate::player::{PlayerSnapshot, SharedPlayer};
use crate::ui;
use crate::videos::VideoFeed;

/// State tracked by the runtime event loop across iterations.
pub struct EventLoopState {
    /// Most recent snapshot published to the loop's subscription.
    pub latest: Rc<RefCell<Option<PlayerSnapshot>>>,
    /// Pending video feed; dropped once delivered.
    pub video_rx: Option<mpsc::Receiver<VideoFeed>>,
    last_tick: Instant,
}

impl EventLoopState {
    pub fn new(
        latest: Rc<RefCell<Option<PlayerSnapshot>>>,
        video_rx: Option<mpsc::Receiver<VideoFeed>>,
    ) -> Self {
        Self {
            latest,
            video_rx,
            last_tick: Instant::now(),
        }
    }
}

/// Main terminal event loop: pumps the player, draws, and routes keyboard
/// and mouse input. Returns `Ok(())` when shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    player: &SharedPlayer,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    let poll = Duration::from_millis(settings.audio.poll_interval_ms);

    loop {
        player.pump();
        if let Some(snapshot) = state.latest.borrow_mut().take() {
            app.observe(snapshot);
        }

        if let Some(rx) = state.video_rx.as_ref() {
            match rx.try_recv() {
                Ok(feed) => {
                    app.set_videos(feed);
                    state.video_rx = None;
                }
                Err(mpsc::TryRecvError::Disconnected) => {
                    app.set_videos(VideoFeed::unavailable("Videos are unavailable right now."));
                    state.video_rx = None;
                }
                Err(mpsc::TryRecvError::Empty) => {}
            }
        }

        let now = Instant::now();
        app.tick(now.duration_since(state.last_tick).as_secs_f64());
        state.last_tick = now;

        let size = terminal.size()?;
        app.set_viewport_columns(size.width);

        let mut regions = HitRegions::default();
        terminal.draw(|f| regions = ui::draw(f, app, &settings.controls))?;
        app.regions = regions;

        if event::poll(poll)? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if handle_key_event(key, settings, app, player)? {
                        break;
                    }
                }
                Event::Mouse(mouse) => handle_mouse_event(mouse, settings, app, player),
                _ => {}
            }
        }
    }

    Ok(())
}

fn handle_key_event(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    player: &SharedPlayer,
) -> Result<bool, Box<dyn std::error::Error>> {
    if app.searching {
        match key.code {
            KeyCode::Char(c) => app.push_query(c),
            KeyCode::Backspace => app.pop_query(),
            KeyCode::Enter => {
                debug!(query = %app.filter.query, matches = app.tracks.len(), "search");
                app.finish_search();
            }
            KeyCode::Esc => app.cancel_search(),
            _ => {}
        }
        return Ok(false);
    }

    let snap = player.snapshot();

    match key.code {
        KeyCode::Char('q') => return Ok(true),
        KeyCode::Char('/') => app.start_search(),
        KeyCode::Esc => {
            if !app.filter.query.is_empty() {
                app.cancel_search();
            }
        }
        KeyCode::Char('g') => app.cycle_genre(),
        KeyCode::Char('s') => app.cycle_sort(),
        KeyCode::F(n @ 1..=3) => {
            if let Some(track) = app.featured_track(usize::from(n - 1)).cloned() {
                player.play(&track);
                app.set_status(format!("Playing featured {}", track.display()));
            }
        }
        KeyCode::Tab => app.toggle_focus(),
        KeyCode::Char('f') => app.toggle_full_player(),
        KeyCode::Char('l') | KeyCode::Right => app.select_next(),
        KeyCode::Char('h') | KeyCode::Left => app.select_prev(),
        KeyCode::Char(']') => app.page_next(),
        KeyCode::Char('[') => app.page_prev(),
        KeyCode::Char(c @ '1'..='9') => {
            let page = c as usize - '1' as usize;
            app.select_page(page);
        }
        KeyCode::Enter => match app.focus {
            Focus::Music => {
                if let (Some(card), Some(track)) = (app.card(app.selected), app.selected_track()) {
                    card.press(player, track);
                }
            }
            Focus::Videos => match app.selected_video() {
                Some(VideoEntry::Clip(clip)) => {
                    CardView::new(clip.id.clone()).press(player, clip);
                }
                Some(VideoEntry::Upload(video)) => {
                    let msg = format!("Watch: {}", video.watch_url());
                    app.set_status(msg);
                }
                None => {}
            },
        },
        KeyCode::Char(' ') => {
            if snap.current.is_none() {
                if let Some(track) = app.selected_track() {
                    player.play(track);
                }
            } else if !app.buttons.press_play(player) {
                app.set_status("Press enter on a card to retry");
            }
        }
        KeyCode::Char('r') => {
            app.buttons.press_reset(player);
        }
        KeyCode::Char('L') => {
            let secs = settings.controls.scrub_seconds as f64;
            player.seek(snap.state.current_time_seconds + secs);
        }
        KeyCode::Char('H') => {
            let secs = settings.controls.scrub_seconds as f64;
            player.seek(snap.state.current_time_seconds - secs);
        }
        KeyCode::Char('+') | KeyCode::Char('=') => app.volume.louder(player),
        KeyCode::Char('-') => app.volume.quieter(player),
        KeyCode::Char('m') => app.volume.toggle_mute(player),
        KeyCode::Char('n') => player.play_next(),
        KeyCode::Char('p') => player.play_previous(),
        KeyCode::Char('a') => {
            if let Some(track) = app.selected_track().cloned() {
                player.add_to_queue(&track);
                app.set_status(format!("Queued {}", track.display()));
            }
        }
        KeyCode::Char('d') => {
            if let Some(track) = app.selected_track().cloned() {
                player.remove_from_queue(&track.id);
                app.set_status(format!("Removed {} from queue", track.display()));
            }
        }
        KeyCode::Char('c') => {
            player.clear_queue();
            app.set_status("Queue cleared");
        }
        KeyCode::Char('x') => player.close(),
        KeyCode::Char('v') => player.toggle_mini_player(),
        _ => {}
    }

    Ok(false)
}

fn handle_mouse_event(
    mouse: MouseEvent,
    settings: &config::Settings,
    app: &mut App,
    player: &SharedPlayer,
) {
    let (col, row) = (mouse.column, mouse.row);
    let regions = app.regions;

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some((x, width)) = bar_position(regions.progress, col, row) {
                app.progress.pointer_down(player, x, width);
            } else if let Some((x, width)) = bar_position(regions.volume, col, row) {
                app.volume.slide(player, x, width);
            } else if let Some(section) = section_at(&regions, col, row) {
                app.focus = section;
                let px = app.columns_to_px(col);
                let offset = app.focused_carousel_mut().pager().offset() as f64;
                app.focused_carousel_mut().pointer_down(px, offset);
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            let px = app.columns_to_px(col);
            if app.progress.is_dragging() {
                match bar_position(regions.progress, col, row) {
                    Some((x, width)) => app.progress.pointer_move(player, x, width),
                    None => app.progress.pointer_leave(player),
                }
            } else if let Some(carousel) = app.dragging_carousel_mut() {
                if carousel.pointer_move(px).is_some() {
                    app.follow_page();
                }
            } else if let Some((x, width)) = bar_position(regions.volume, col, row) {
                app.volume.slide(player, x, width);
            }
        }
        MouseEventKind::Up(_) => {
            // A release anywhere ends a seek drag.
            match bar_position(regions.progress, col, row) {
                Some((x, width)) => app.progress.pointer_up(player, x, width),
                None => app.progress.release(player),
            }
            if let Some(carousel) = app.dragging_carousel_mut() {
                carousel.pointer_up();
            }
        }
        MouseEventKind::ScrollLeft | MouseEventKind::ScrollRight => {
            let step = settings.carousel.wheel_step_px;
            let dx = if mouse.kind == MouseEventKind::ScrollRight {
                step
            } else {
                -step
            };
            if let Some(section) = section_at(&regions, col, row) {
                app.focus = section;
            }
            if app.focused_carousel_mut().wheel(dx, 0.0).is_some() {
                app.follow_page();
            }
        }
        MouseEventKind::ScrollUp if HitRegions::hit(regions.volume, col, row) => {
            app.volume.louder(player)
        }
        MouseEventKind::ScrollDown if HitRegions::hit(regions.volume, col, row) => {
            app.volume.quieter(player)
        }
        _ => {}
    }
}

/// Pointer position along a one-row bar, or `None` when the pointer is not
/// on it. The last column maps to the end of the bar.
fn bar_position(area: Option<ratatui::layout::Rect>, col: u16, row: u16) -> Option<(f64, f64)> {
    let r = area.filter(|_| HitRegions::hit(area, col, row))?;
    let width = f64::from(r.width.saturating_sub(1).max(1));
    let x = f64::from(col) - f64::from(r.x);
    Some((x, width))
}

fn section_at(regions: &HitRegions, col: u16, row: u16) -> Option<Focus> {
    if HitRegions::hit(regions.music, col, row) {
        Some(Focus::Music)
    } else if HitRegions::hit(regions.videos, col, row) {
        Some(Focus::Videos)
    } else {
        None
    }
}
