//! The DroidWeb application: message loop, commands, and subscriptions.
//!
//! All state mutations happen here, in `update`, in response to discrete
//! events. The only timed operation is the simulated load-latency window: it
//! is dispatched as a command carrying the navigation generation, and the
//! controller drops completions whose generation is no longer current.

use std::path::PathBuf;
use std::time::Duration;

use iced::{event, keyboard, window, Application, Command, Element, Subscription, Theme};

use droidweb_nav::{classify, InputKind, LoadStatus, NavigationController, LOAD_LATENCY};

use crate::assistant::Assistant;
use crate::downloads::{self, DownloadManager};
use crate::prefs::{DeviceMode, PrefsManager, ViewMode};
use crate::theme::ThemeChoice;
use crate::ui::{self, BrowserUi, UiMessage};
use crate::update::UpdateNotifier;

/// How often the host polls the update channel.
const UPDATE_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Main application state.
pub struct DroidWeb {
    /// Navigation core: history, current URL, title, status, detected media
    pub(crate) nav: NavigationController,
    /// Chrome input state
    pub(crate) ui: BrowserUi,
    /// Persisted preferences
    pub(crate) prefs: PrefsManager,
    /// Detected-media download panel
    pub(crate) downloads: DownloadManager,
    /// AI suggestion client
    pub(crate) assistant: Assistant,
    pub(crate) assistant_thinking: bool,
    pub(crate) suggestion: Option<String>,
    /// Staged-version update channel
    pub(crate) updates: UpdateNotifier,
    /// Dismissible error notice
    pub(crate) notice: Option<String>,
    pub(crate) show_menu: bool,
    pub(crate) show_settings: bool,
    pub(crate) show_downloads: bool,
    pub(crate) fullscreen: bool,
}

/// Messages the application reacts to.
#[derive(Debug, Clone)]
pub enum Message {
    /// Chrome widget messages
    Ui(UiMessage),
    /// Navigate to raw address-bar input
    Navigate(String),
    Back,
    Forward,
    GoHome,
    Reload,
    /// The simulated load-latency window elapsed for a navigation token
    LoadSettled(u64),
    /// The AI suggestion for the last free-text query arrived
    AssistantReplied(String),
    SetTheme(ThemeChoice),
    SetViewMode(ViewMode),
    SetDeviceMode(DeviceMode),
    SetSearchEngine(String),
    OpenSettings,
    CloseSettings,
    OpenDownloads,
    CloseDownloads,
    ToggleMenu,
    ToggleFullscreen,
    /// Start downloading a detected resource by id
    StartDownload(String),
    /// A download finished, successfully or not
    DownloadFinished {
        id: String,
        result: Result<PathBuf, String>,
    },
    DismissNotice,
    /// Poll the update channel
    CheckForUpdate,
    /// Accept the staged version and reload the session
    ApplyUpdate,
}

impl Application for DroidWeb {
    type Executor = iced::executor::Default;
    type Message = Message;
    type Theme = Theme;
    type Flags = ();

    fn new(_flags: ()) -> (Self, Command<Message>) {
        log::info!("initializing DroidWeb session");

        let prefs = PrefsManager::new().unwrap_or_else(|err| {
            log::warn!("falling back to in-memory preferences: {}", err);
            PrefsManager::in_memory()
        });

        let app = Self {
            nav: NavigationController::new(),
            ui: BrowserUi::new(),
            prefs,
            downloads: DownloadManager::new(),
            assistant: Assistant::from_env(),
            assistant_thinking: false,
            suggestion: None,
            updates: UpdateNotifier::new(),
            notice: None,
            show_menu: false,
            show_settings: false,
            show_downloads: false,
            fullscreen: false,
        };

        (app, Command::none())
    }

    fn title(&self) -> String {
        let base = format!("DroidWeb AI v{}", env!("CARGO_PKG_VERSION"));
        match self.nav.status() {
            LoadStatus::Loading => format!("Loading... - {}", base),
            _ if self.nav.is_home() => base,
            _ => format!("{} - {}", self.nav.title(), base),
        }
    }

    fn update(&mut self, message: Message) -> Command<Message> {
        match message {
            Message::Ui(ui_message) => {
                match &ui_message {
                    UiMessage::AddressBarSubmitted => {
                        let input = self.ui.address_bar_value().trim().to_string();
                        if !input.is_empty() {
                            return self.update(Message::Navigate(input));
                        }
                    }
                    UiMessage::HomeQuerySubmitted => {
                        let query = self.ui.home_query().trim().to_string();
                        if !query.is_empty() {
                            self.ui.clear_home_query();
                            return self.update(Message::Navigate(query));
                        }
                    }
                    _ => {}
                }
                self.ui.update(ui_message)
            }

            Message::Navigate(input) => {
                self.show_menu = false;
                self.show_settings = false;
                self.show_downloads = false;
                self.suggestion = None;

                let engine = self.prefs.prefs().engine();
                let kind = classify(&input);
                let ticket = self.nav.navigate(&input, engine);
                self.after_navigation();

                let mut commands = vec![schedule_settle(ticket.token)];
                if kind == InputKind::Query {
                    // Fire-and-forget: the suggestion never blocks navigation.
                    self.assistant_thinking = true;
                    let assistant = self.assistant.clone();
                    commands.push(Command::perform(
                        assistant.suggest(input),
                        Message::AssistantReplied,
                    ));
                }
                Command::batch(commands)
            }

            Message::Back => match self.nav.back() {
                Some(ticket) => {
                    self.after_navigation();
                    schedule_settle(ticket.token)
                }
                None => Command::none(),
            },

            Message::Forward => match self.nav.forward() {
                Some(ticket) => {
                    self.after_navigation();
                    schedule_settle(ticket.token)
                }
                None => Command::none(),
            },

            Message::GoHome => {
                let engine = self.prefs.prefs().engine();
                let ticket = self.nav.home(engine);
                self.after_navigation();
                schedule_settle(ticket.token)
            }

            Message::Reload => {
                let engine = self.prefs.prefs().engine();
                let ticket = self.nav.reload(engine);
                self.after_navigation();
                schedule_settle(ticket.token)
            }

            Message::LoadSettled(token) => {
                if self.nav.settle(token) {
                    self.downloads.sync(self.nav.media());
                    log::debug!("page settled: {}", self.nav.current_url());
                }
                Command::none()
            }

            Message::AssistantReplied(reply) => {
                self.assistant_thinking = false;
                self.suggestion = Some(reply);
                Command::none()
            }

            Message::SetTheme(choice) => {
                self.prefs.update(|p| p.set_theme(choice));
                Command::none()
            }

            Message::SetViewMode(mode) => {
                // The embedded surface is keyed by (url, view mode), so this
                // remounts it without touching history.
                self.prefs.update(|p| p.set_view_mode(mode));
                Command::none()
            }

            Message::SetDeviceMode(mode) => {
                self.prefs.update(|p| p.set_device_mode(mode));
                self.show_menu = false;
                self.show_settings = false;
                // A device-mode change restarts from the home surface.
                self.update(Message::GoHome)
            }

            Message::SetSearchEngine(name) => {
                self.prefs.update(|p| p.set_engine(&name));
                Command::none()
            }

            Message::OpenSettings => {
                self.show_settings = true;
                self.show_menu = false;
                Command::none()
            }
            Message::CloseSettings => {
                self.show_settings = false;
                Command::none()
            }
            Message::OpenDownloads => {
                self.show_downloads = true;
                self.show_menu = false;
                Command::none()
            }
            Message::CloseDownloads => {
                self.show_downloads = false;
                Command::none()
            }
            Message::ToggleMenu => {
                self.show_menu = !self.show_menu;
                Command::none()
            }

            Message::ToggleFullscreen => {
                self.fullscreen = !self.fullscreen;
                self.show_menu = false;
                let mode = if self.fullscreen {
                    window::Mode::Fullscreen
                } else {
                    window::Mode::Windowed
                };
                window::change_mode(mode)
            }

            Message::StartDownload(id) => {
                match (self.downloads.begin(&id), self.downloads.download_dir()) {
                    (Some(resource), Some(dir)) => Command::perform(
                        downloads::fetch(resource, dir),
                        move |result| Message::DownloadFinished {
                            id,
                            result: result.map_err(|err| err.to_string()),
                        },
                    ),
                    (Some(_), None) => {
                        self.downloads.fail(&id);
                        self.notice =
                            Some("No download directory is available on this system.".to_string());
                        Command::none()
                    }
                    _ => Command::none(),
                }
            }

            Message::DownloadFinished { id, result } => {
                match result {
                    Ok(path) => {
                        self.downloads.finish(&id);
                        log::info!("download completed: {}", path.display());
                    }
                    Err(err) => {
                        self.downloads.fail(&id);
                        log::warn!("download failed: {}", err);
                        self.notice = Some(format!(
                            "Download failed: {}. Cross-origin restrictions may prevent \
                             saving external media.",
                            err
                        ));
                    }
                }
                Command::none()
            }

            Message::DismissNotice => {
                self.notice = None;
                Command::none()
            }

            Message::CheckForUpdate => {
                self.updates.check();
                Command::none()
            }

            Message::ApplyUpdate => {
                if let Some(version) = self.updates.accept() {
                    log::info!("applying staged version {} and reloading", version);
                    self.reload_session();
                }
                Command::none()
            }
        }
    }

    fn view(&self) -> Element<Message> {
        ui::view(self)
    }

    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch(vec![
            iced::subscription::events_with(handle_key_event),
            iced::time::every(UPDATE_POLL_INTERVAL).map(|_| Message::CheckForUpdate),
        ])
    }

    fn theme(&self) -> Theme {
        self.prefs.prefs().theme().to_iced_theme()
    }
}

impl DroidWeb {
    /// Housekeeping after any cursor change: the media list was cleared by
    /// the controller, and the address bar mirrors the new URL (blank on the
    /// home surface).
    fn after_navigation(&mut self) {
        self.downloads.sync(self.nav.media());
        if self.nav.is_home() {
            self.ui.set_address("");
        } else {
            let url = self.nav.current_url().to_string();
            self.ui.set_address(&url);
        }
    }

    /// The full reload performed after accepting a staged version:
    /// everything session-scoped is discarded, preferences survive.
    fn reload_session(&mut self) {
        self.nav = NavigationController::new();
        self.downloads.sync(&[]);
        self.ui.reset();
        self.assistant_thinking = false;
        self.suggestion = None;
        self.notice = None;
        self.show_menu = false;
        self.show_settings = false;
        self.show_downloads = false;
    }
}

/// The simulated load-latency window for one navigation token.
fn schedule_settle(token: u64) -> Command<Message> {
    Command::perform(
        async move {
            tokio::time::sleep(LOAD_LATENCY).await;
            token
        },
        Message::LoadSettled,
    )
}

/// Keyboard shortcuts: Ctrl+L / Alt+D focus the address bar, Ctrl+R / F5
/// reload, Alt+Left/Right walk history, Alt+Home goes home.
fn handle_key_event(event: iced::Event, _status: event::Status) -> Option<Message> {
    let iced::Event::Keyboard(keyboard::Event::KeyPressed {
        key_code,
        modifiers,
    }) = event
    else {
        return None;
    };

    match key_code {
        keyboard::KeyCode::L if modifiers.control() => {
            Some(Message::Ui(UiMessage::FocusAddressBar))
        }
        keyboard::KeyCode::D if modifiers.alt() => Some(Message::Ui(UiMessage::FocusAddressBar)),
        keyboard::KeyCode::R if modifiers.control() => Some(Message::Reload),
        keyboard::KeyCode::F5 => Some(Message::Reload),
        keyboard::KeyCode::Left if modifiers.alt() => Some(Message::Back),
        keyboard::KeyCode::Right if modifiers.alt() => Some(Message::Forward),
        keyboard::KeyCode::Home if modifiers.alt() => Some(Message::GoHome),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use droidweb_nav::HOME_URL;

    fn test_app() -> DroidWeb {
        DroidWeb {
            nav: NavigationController::new(),
            ui: BrowserUi::new(),
            prefs: PrefsManager::in_memory(),
            downloads: DownloadManager::new(),
            assistant: Assistant::from_env(),
            assistant_thinking: false,
            suggestion: None,
            updates: UpdateNotifier::with_marker(std::env::temp_dir().join("droidweb-no-marker")),
            notice: None,
            show_menu: false,
            show_settings: false,
            show_downloads: false,
            fullscreen: false,
        }
    }

    #[test]
    fn test_navigate_syncs_address_bar() {
        let mut app = test_app();
        let _ = app.update(Message::Navigate("example.com".to_string()));
        assert_eq!(app.ui.address_bar_value(), "https://example.com");

        let _ = app.update(Message::GoHome);
        assert_eq!(app.nav.current_url(), HOME_URL);
        assert_eq!(app.ui.address_bar_value(), "");
    }

    #[test]
    fn test_free_text_query_marks_assistant_thinking() {
        let mut app = test_app();
        let _ = app.update(Message::Navigate("weather today".to_string()));
        assert!(app.assistant_thinking);

        let _ = app.update(Message::AssistantReplied("Sunny.".to_string()));
        assert!(!app.assistant_thinking);
        assert_eq!(app.suggestion.as_deref(), Some("Sunny."));

        // The next navigation drops the previous suggestion.
        let _ = app.update(Message::Navigate("example.com".to_string()));
        assert!(app.suggestion.is_none());
    }

    #[test]
    fn test_device_mode_change_goes_home_without_forward_history() {
        let mut app = test_app();
        let _ = app.update(Message::Navigate("example.com".to_string()));
        let history_len = app.nav.history().len();

        let _ = app.update(Message::SetDeviceMode(DeviceMode::Desktop));
        assert_eq!(app.nav.current_url(), HOME_URL);
        assert_eq!(app.nav.history().len(), history_len + 1);
        assert_eq!(app.prefs.prefs().device_mode(), DeviceMode::Desktop);
    }

    #[test]
    fn test_view_mode_change_leaves_history_alone() {
        let mut app = test_app();
        let _ = app.update(Message::Navigate("example.com".to_string()));
        let history_len = app.nav.history().len();
        let url = app.nav.current_url().to_string();

        let _ = app.update(Message::SetViewMode(ViewMode::Desktop));
        assert_eq!(app.nav.history().len(), history_len);
        assert_eq!(app.nav.current_url(), url);
        // The surface key, and with it the embedded surface, did change.
        assert_ne!(
            ui::surface_key(&url, ViewMode::Mobile),
            ui::surface_key(&url, app.prefs.prefs().view_mode())
        );
    }

    #[test]
    fn test_stale_settle_does_not_populate_downloads() {
        let mut app = test_app();
        let _ = app.update(Message::Navigate(format!(
            "{}?demo=true",
            droidweb_nav::DEMO_VIDEO_URL
        )));
        let first_token = 1;
        let _ = app.update(Message::Navigate("example.com".to_string()));

        let _ = app.update(Message::LoadSettled(first_token));
        assert!(app.downloads.is_empty());
        assert_eq!(app.nav.status(), LoadStatus::Loading);

        let _ = app.update(Message::LoadSettled(2));
        assert_eq!(app.nav.status(), LoadStatus::Loaded);
        assert!(app.downloads.is_empty());
    }

    #[test]
    fn test_download_failure_sets_notice_and_reverts() {
        let mut app = test_app();
        let _ = app.update(Message::Navigate(format!(
            "{}?demo=true",
            droidweb_nav::DEMO_VIDEO_URL
        )));
        let _ = app.update(Message::LoadSettled(1));
        assert_eq!(app.downloads.len(), 1);

        let _ = app.update(Message::StartDownload("demo-vid-1".to_string()));
        let _ = app.update(Message::DownloadFinished {
            id: "demo-vid-1".to_string(),
            result: Err("connection refused".to_string()),
        });
        assert!(app.notice.is_some());
        assert!(app.downloads.begin("demo-vid-1").is_some());

        let _ = app.update(Message::DismissNotice);
        assert!(app.notice.is_none());
    }
}
