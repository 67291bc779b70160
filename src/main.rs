mod app;
mod carousel;
mod catalog;
mod config;
mod controls;
mod error;
mod logging;
mod media;
mod player;
mod runtime;
mod ui;
mod videos;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
