use iced::{window, Application, Settings};

mod app;
mod assistant;
mod bookmarks;
mod downloads;
mod prefs;
mod theme;
mod ui;
mod update;

use app::DroidWeb;

fn main() -> iced::Result {
    // Initialize logging
    env_logger::init();

    log::info!(
        "Starting DroidWeb v{} - AI-Powered Privacy Browser",
        env!("CARGO_PKG_VERSION")
    );
    log::info!("Simulated browser UI: page rendering is sandboxed, no real engine");

    // Phone-shaped window; desktop device mode still fits when maximized
    let mut settings = Settings::with_flags(());
    settings.window = window::Settings {
        size: (420, 860),
        min_size: Some((360, 640)),
        position: window::Position::Centered,
        ..window::Settings::default()
    };
    settings.default_text_size = 14.0;

    DroidWeb::run(settings)
}
