use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};

use crate::app::App;
use crate::media::RodioElement;
use crate::player::{PlayerSnapshot, SharedPlayer};

mod event_loop;
mod settings;
mod startup;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (settings, config_warning) = settings::load_settings();

    match crate::logging::init(&settings.log) {
        Ok(path) => info!(log = %path.display(), "encore starting"),
        Err(e) => eprintln!("encore: logging disabled: {e}"),
    }
    if let Some(msg) = config_warning.as_deref() {
        warn!("{msg}");
    }

    let (catalog, catalog_warning) = startup::load_catalog(&settings);

    let element = RodioElement::new(
        settings.catalog.media_root.clone(),
        Duration::from_secs(settings.audio.fetch_timeout_secs),
    );
    let player = SharedPlayer::new(Box::new(element), settings.audio.initial_volume);

    let latest: Rc<RefCell<Option<PlayerSnapshot>>> = Rc::default();
    let sink = latest.clone();
    let _ui_subscription = player.subscribe(move |snap| {
        *sink.borrow_mut() = Some(snap.clone());
    });
    let _log_subscription = startup::log_track_changes(&player);

    let mut app = App::new(&catalog, &settings, player.snapshot());
    if let Some(msg) = config_warning.or(catalog_warning) {
        app.set_status(msg);
    }

    let video_rx = settings
        .videos
        .enabled
        .then(|| startup::spawn_video_fetch(settings.videos.clone()));
    if video_rx.is_none() {
        app.set_videos(crate::videos::load_feed(&settings.videos));
    }

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result: Result<(), Box<dyn std::error::Error>> = (|| {
        let mut state = event_loop::EventLoopState::new(latest.clone(), video_rx);
        event_loop::run(&mut terminal, &settings, &mut app, &player, &mut state)
    })();

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    info!("encore exiting");
    run_result
}
