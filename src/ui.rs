//! UI rendering helpers for the terminal user interface.
//!
//! This module renders the TUI using `ratatui` and reports back the screen
//! regions the mouse can act on.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};

use crate::app::{App, FEATURED_SLOTS, Focus, HitRegions, SortKey, VideoEntry};
use crate::carousel::Pager;
use crate::config::ControlsSettings;
use crate::controls::{ProgressControl, VolumeTier, format_time};

const ACCENT: Color = Color::Magenta;

/// Render the controls help text, incorporating scrub seconds.
fn controls_text(scrub_seconds: u64) -> String {
    [
        "[h/l] select".to_string(),
        "[ [ ] ] page".to_string(),
        "[1-9] go to page".to_string(),
        "[enter] play card".to_string(),
        "[space] play/pause".to_string(),
        format!("[H/L] scrub -/+{scrub_seconds}s"),
        "[+/-] volume".to_string(),
        "[m] mute".to_string(),
        "[r] reset".to_string(),
        "[n/p] next/prev".to_string(),
        "[a/d/c] queue add/remove/clear".to_string(),
        "[x] close".to_string(),
        "[v] mini player".to_string(),
        "[f] full player".to_string(),
        "[tab] music/videos".to_string(),
        "[/] search".to_string(),
        "[g] genre".to_string(),
        "[s] sort".to_string(),
        "[F1-F3] featured".to_string(),
        "[q] quit".to_string(),
    ]
    .join(" | ")
}

fn padded_block<'a>(title: impl Into<Line<'a>>) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .padding(Padding {
            left: 1,
            right: 0,
            top: 0,
            bottom: 0,
        })
}

/// Page dots, with an arrow on the side the last page change moved toward.
fn page_dots(pager: &Pager) -> String {
    let current = pager.current_page();
    let dots = (0..pager.total_pages())
        .map(|i| if i == current { "●" } else { "○" })
        .collect::<Vec<_>>()
        .join(" ");
    match pager.direction() {
        1 => format!("  {dots} ›"),
        -1 => format!("‹ {dots}  "),
        _ => dots,
    }
}

/// "★ [F1] Title  [F2] Title" strip of featured tracks.
fn featured_line(app: &App) -> Line<'static> {
    let mut spans = vec![Span::styled("★ ", Style::default().fg(ACCENT))];
    for slot in 0..FEATURED_SLOTS {
        let Some(track) = app.featured_track(slot) else {
            break;
        };
        let style = if card_is_playing(app, &track.id) {
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        spans.push(Span::raw(format!(" [F{}] ", slot + 1)));
        spans.push(Span::styled(track.title.clone(), style));
    }
    if spans.len() == 1 {
        spans.push(Span::raw("encore"));
    }
    Line::from(spans)
}

/// " music 1/3 · /query · Fusion · sort: title " title for the music block.
fn music_title(app: &App) -> String {
    let pager = app.music.pager();
    let mut parts = vec![format!(
        "music  {}/{}",
        pager.current_page() + 1,
        pager.total_pages().max(1)
    )];
    if app.searching || !app.filter.query.is_empty() {
        let cursor = if app.searching { "▏" } else { "" };
        parts.push(format!("/{}{cursor}", app.filter.query));
    }
    parts.push(app.filter.genre.clone().unwrap_or_else(|| "all genres".into()));
    if app.filter.sort != SortKey::Default {
        parts.push(format!("sort: {}", app.filter.sort.label()));
    }
    format!(" {} ", parts.join(" · "))
}

/// Render the entire UI into `frame` and return the interactive regions.
pub fn draw(frame: &mut Frame, app: &App, controls: &ControlsSettings) -> HitRegions {
    let mut regions = HitRegions::default();
    let mini_visible = app.snapshot.mini_player_visible;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(if mini_visible { 5 } else { 0 }),
            Constraint::Length(4),
        ])
        .split(frame.area());

    let header = Paragraph::new(featured_line(app))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(app.header_text.as_str())
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    if app.full_player {
        draw_full_player(frame, app, chunks[1]);
    } else {
        let body = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(7), Constraint::Length(10)])
            .split(chunks[1]);
        regions.music = Some(body[0]);
        regions.videos = Some(body[1]);
        draw_music(frame, app, body[0]);
        draw_videos(frame, app, body[1]);
    }

    if mini_visible {
        draw_mini_player(frame, app, chunks[2], &mut regions);
    }

    let mut footer_text = controls_text(controls.scrub_seconds);
    if let Some(status) = app.status.as_deref() {
        footer_text = format!("{status}  ·  {footer_text}");
    }
    let footer = Paragraph::new(footer_text)
        .block(padded_block(" controls "))
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[3]);

    regions
}

fn draw_music(frame: &mut Frame, app: &App, area: Rect) {
    let pager = app.music.pager();
    let focused = app.focus == Focus::Music;
    let mut block = Block::default().borders(Borders::ALL).title(music_title(app));
    if focused {
        block = block.border_style(Style::default().fg(ACCENT));
    }
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if !app.has_tracks() {
        let text = if app.filter.is_active() {
            "No tracks match. Press esc to clear the search."
        } else {
            "No tracks in the catalog."
        };
        frame.render_widget(Paragraph::new(text), inner);
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(4), Constraint::Length(1)])
        .split(inner);

    let per_page = pager.items_per_page();
    let slots = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, per_page as u32); per_page])
        .split(rows[0]);

    for (slot, index) in slots.iter().zip(pager.visible_range()) {
        let (Some(track), Some(card)) = (app.tracks.get(index), app.card(index)) else {
            continue;
        };
        let selected = index == app.selected;

        let mut lines = vec![
            Line::from(Span::styled(
                track.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(track.artist.clone()),
        ];
        let mut meta = Vec::new();
        if track.featured {
            meta.push("★ featured".to_string());
        }
        if let Some(genre) = track.genre.as_deref() {
            meta.push(genre.to_string());
        }
        if let Some(d) = track.duration_seconds {
            meta.push(format_time(d));
        }
        if !meta.is_empty() {
            lines.push(Line::from(meta.join(" · ")));
        }
        if card.is_now_playing(&app.snapshot) {
            lines.push(Line::from(Span::styled(
                "▶ now playing",
                Style::default().fg(ACCENT),
            )));
        } else if card.is_loaded(&app.snapshot) {
            lines.push(Line::from("⏸ paused"));
        }

        let mut card_block = Block::default().borders(Borders::ALL);
        if selected {
            card_block = card_block
                .border_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
                .title(" > ");
        }
        let para = Paragraph::new(lines)
            .block(card_block)
            .wrap(Wrap { trim: true });
        frame.render_widget(para, *slot);
    }

    if pager.is_paginated() {
        let dots = Paragraph::new(page_dots(pager))
            .alignment(Alignment::Center);
        frame.render_widget(dots, rows[1]);
    }
}

fn draw_videos(frame: &mut Frame, app: &App, area: Rect) {
    let pager = app.video_carousel.pager();
    let title = if pager.is_paginated() {
        format!(" videos  {} ", page_dots(pager))
    } else {
        " videos ".to_string()
    };
    let mut block = padded_block(title);
    if app.focus == Focus::Videos {
        block = block.border_style(Style::default().fg(ACCENT));
    }

    let feed_note = if !app.videos.is_empty() {
        None
    } else if app.videos_loading {
        Some("Loading videos…")
    } else {
        Some(app.videos_unavailable.as_deref().unwrap_or("No videos yet."))
    };

    if app.video_count() == 0 {
        let text = feed_note.unwrap_or("No videos yet.");
        frame.render_widget(Paragraph::new(text).block(block), area);
        return;
    }
    if let Some(note) = feed_note {
        block = block.title_bottom(Line::from(format!(" {note} ")));
    }

    let range = pager.visible_range();
    let items: Vec<ListItem> = range
        .clone()
        .filter_map(|i| app.video_entry(i))
        .map(|entry| match entry {
            VideoEntry::Clip(clip) => {
                let mut label = format!("▶ {}", clip.title);
                if card_is_playing(app, &clip.id) {
                    label.push_str("  (now playing)");
                }
                ListItem::new(label)
            }
            VideoEntry::Upload(v) => {
                ListItem::new(format!("{}  {}", v.published_date(), v.title))
            }
        })
        .collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    if app.focus == Focus::Videos && range.contains(&app.video_selected) {
        state.select(Some(app.video_selected - range.start));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn card_is_playing(app: &App, id: &str) -> bool {
    app.snapshot.is_current_track(id) && app.snapshot.state.is_playing
}

fn draw_mini_player(frame: &mut Frame, app: &App, area: Rect, regions: &mut HitRegions) {
    let snap = &app.snapshot;
    let s = &snap.state;

    let block = padded_block(" now playing ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    // Track line with buttons and queue count.
    let play_glyph = if s.is_playing { "⏸" } else { "▶" };
    let dim = Style::default().add_modifier(Modifier::DIM);
    let play_style = if app.buttons.play_enabled(snap) {
        Style::default().fg(ACCENT)
    } else {
        dim
    };
    let reset_style = if app.buttons.reset_enabled(snap) {
        Style::default()
    } else {
        dim
    };
    let track_text = snap
        .current
        .as_ref()
        .map(|t| t.display())
        .unwrap_or_else(|| "Nothing loaded".to_string());
    let info = Line::from(vec![
        Span::styled(format!("{play_glyph} "), play_style),
        Span::styled("↺ ", reset_style),
        Span::raw(track_text),
        Span::styled(format!("   queue: {}", snap.queue.len()), dim),
    ]);
    frame.render_widget(Paragraph::new(info), rows[0]);

    // Progress bar between elapsed and total time.
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(7),
            Constraint::Min(10),
            Constraint::Length(7),
        ])
        .split(rows[1]);
    frame.render_widget(
        Paragraph::new(format_time(s.current_time_seconds)).alignment(Alignment::Right),
        cols[0],
    );
    let gauge = Gauge::default()
        .ratio(ProgressControl::fraction(snap))
        .label("")
        .gauge_style(Style::default().fg(ACCENT));
    frame.render_widget(gauge, cols[1]);
    regions.progress = Some(cols[1]);
    frame.render_widget(
        Paragraph::new(format!(" {}", format_time(s.duration_seconds))),
        cols[2],
    );

    // Volume and error line.
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(12),
            Constraint::Min(0),
        ])
        .split(rows[2]);
    frame.render_widget(Paragraph::new(VolumeTier::of(snap).glyph()), cols[0]);
    let volume = Gauge::default()
        .ratio(f64::from(s.effective_volume()).clamp(0.0, 1.0))
        .label("")
        .gauge_style(Style::default().fg(Color::Gray));
    frame.render_widget(volume, cols[1]);
    regions.volume = Some(cols[1]);
    if let Some(err) = s.last_error.as_deref() {
        frame.render_widget(
            Paragraph::new(format!("  {err}")).style(Style::default().fg(Color::Red)),
            cols[2],
        );
    }
}

fn draw_full_player(frame: &mut Frame, app: &App, area: Rect) {
    let snap = &app.snapshot;
    let block = padded_block(" player ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(inner);

    let mut lines = Vec::new();
    match snap.current.as_ref() {
        Some(t) => {
            lines.push(Line::from(Span::styled(
                t.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(t.artist.clone()));
            if let Some(desc) = t.description.as_deref() {
                lines.push(Line::from(Span::styled(
                    desc.to_string(),
                    Style::default().add_modifier(Modifier::DIM),
                )));
            }
        }
        None => lines.push(Line::from("Pick a card and press enter.")),
    }
    frame.render_widget(Paragraph::new(lines), rows[0]);

    let heights = app.waveform.heights(snap.state.is_playing, app.elapsed);
    // Two columns per bar; drop the bars that do not fit.
    let fit = usize::from(rows[1].width / 2).min(app.waveform.bar_count());
    frame.render_widget(
        Paragraph::new(visualizer_lines(&heights[..fit], rows[1].height))
            .alignment(Alignment::Center)
            .style(Style::default().fg(ACCENT)),
        rows[1],
    );
}

/// Bars drawn bottom-up, one column per bar with a gap between.
fn visualizer_lines(heights: &[f64], rows: u16) -> Vec<Line<'static>> {
    let rows = usize::from(rows.max(1));
    (0..rows)
        .map(|r| {
            let level = (rows - r) as f64 / rows as f64;
            let text: String = heights
                .iter()
                .map(|h| if *h >= level { "█ " } else { "  " })
                .collect();
            Line::from(text)
        })
        .collect()
}
