//! Address-bar state and all view composition for the browser chrome.
//!
//! The widget tree follows the phone layout of the UI this simulates: a
//! toolbar on top, the content surface in the middle, and (in mobile device
//! mode) a bottom navigation row. Desktop device mode moves the navigation
//! controls into the toolbar and adds the bookmark strip.

use iced::widget::container::{Appearance, StyleSheet};
use iced::widget::{button, container, scrollable, text, text_input, Column, Row, Space};
use iced::{theme, Alignment, Background, Color, Element, Length};

use droidweb_nav::{LoadStatus, SEARCH_ENGINES, DEMO_VIDEO_TITLE, DEMO_VIDEO_URL};

use crate::app::{DroidWeb, Message};
use crate::bookmarks::DEFAULT_BOOKMARKS;
use crate::downloads::{DownloadEntry, DownloadState};
use crate::prefs::{DeviceMode, ViewMode};
use crate::theme::{Palette, ThemeChoice};

/// Messages owned by the chrome widgets.
#[derive(Debug, Clone)]
pub enum UiMessage {
    /// Address bar value changed
    AddressBarChanged(String),
    /// Address bar submitted (Enter pressed)
    AddressBarSubmitted,
    /// Home-surface search field changed
    HomeQueryChanged(String),
    /// Home-surface search submitted
    HomeQuerySubmitted,
    /// Keyboard shortcut asked for the address bar
    FocusAddressBar,
}

/// Chrome input state.
#[derive(Debug, Clone, Default)]
pub struct BrowserUi {
    address_bar: String,
    home_query: String,
}

impl BrowserUi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn address_bar_value(&self) -> &str {
        &self.address_bar
    }

    pub fn home_query(&self) -> &str {
        &self.home_query
    }

    /// Sync the address bar with the navigation state. The home sentinel
    /// shows as an empty field, inviting input.
    pub fn set_address(&mut self, url: &str) {
        self.address_bar = url.to_string();
    }

    pub fn clear_home_query(&mut self) {
        self.home_query.clear();
    }

    pub fn reset(&mut self) {
        self.address_bar.clear();
        self.home_query.clear();
    }

    pub fn update(&mut self, message: UiMessage) -> iced::Command<Message> {
        match message {
            UiMessage::AddressBarChanged(value) => {
                self.address_bar = value;
            }
            UiMessage::HomeQueryChanged(value) => {
                self.home_query = value;
            }
            UiMessage::FocusAddressBar => {
                return iced::Command::batch(vec![
                    text_input::focus(address_bar_id()),
                    text_input::select_all(address_bar_id()),
                ]);
            }
            // Submissions are routed to navigation by the application.
            UiMessage::AddressBarSubmitted | UiMessage::HomeQuerySubmitted => {}
        }
        iced::Command::none()
    }
}

pub fn address_bar_id() -> text_input::Id {
    text_input::Id::new("address-bar")
}

/// Identity of the embedded content surface. A view-mode change produces a
/// new key, which remounts the surface (scroll state and all) without
/// touching history.
pub fn surface_key(url: &str, mode: ViewMode) -> String {
    format!("{}::{}", url, mode.key())
}

/// Top-level view.
pub fn view(app: &DroidWeb) -> Element<Message> {
    let prefs = app.prefs.prefs();
    let palette = prefs.theme().palette();
    let device = prefs.device_mode();

    let mut root = Column::new();
    root = root.push(toolbar(app, palette, device));
    if device == DeviceMode::Desktop {
        root = root.push(bookmarks_bar(palette));
    }
    if app.nav.status() == LoadStatus::Loading {
        root = root.push(loading_bar(palette));
    }
    if app.assistant_thinking || app.suggestion.is_some() {
        root = root.push(suggestion_box(app, palette));
    }
    root = root.push(content(app, palette));
    if let Some(notice) = &app.notice {
        root = root.push(notice_bar(notice, palette));
    }
    if app.updates.staged().is_some() {
        root = root.push(update_banner(palette));
    }
    if app.show_menu && device == DeviceMode::Mobile {
        root = root.push(menu(app, palette));
    }
    if device == DeviceMode::Mobile {
        root = root.push(bottom_nav(app, palette));
    }

    container(root)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn toolbar<'a>(app: &'a DroidWeb, palette: Palette, device: DeviceMode) -> Element<'a, Message> {
    let engine = app.prefs.prefs().engine();

    let mut row = Row::new()
        .spacing(6)
        .padding(8)
        .align_items(Alignment::Center);

    if device == DeviceMode::Desktop {
        row = row
            .push(nav_button("←", app.nav.can_go_back().then_some(Message::Back)))
            .push(nav_button(
                "→",
                app.nav.can_go_forward().then_some(Message::Forward),
            ))
            .push(nav_button("⟳", Some(Message::Reload)))
            .push(nav_button("⌂", Some(Message::GoHome)));
    }

    row = row.push(text(engine.icon).size(13).style(palette.text_muted));

    let address = text_input("Search or type URL", app.ui.address_bar_value())
        .id(address_bar_id())
        .on_input(|value| Message::Ui(UiMessage::AddressBarChanged(value)))
        .on_submit(Message::Ui(UiMessage::AddressBarSubmitted))
        .padding(10)
        .size(14)
        .width(Length::Fill);
    row = row.push(address);

    if device == DeviceMode::Mobile {
        row = row.push(nav_button("⟳", Some(Message::Reload)));
    }

    row.into()
}

fn nav_button(label: &'static str, on_press: Option<Message>) -> Element<'static, Message> {
    let mut widget = button(text(label).size(16))
        .padding(8)
        .style(theme::Button::Text);
    if let Some(message) = on_press {
        widget = widget.on_press(message);
    }
    widget.into()
}

fn bookmarks_bar(palette: Palette) -> Element<'static, Message> {
    let mut row = Row::new()
        .spacing(4)
        .padding([4, 8])
        .align_items(Alignment::Center);
    for bookmark in DEFAULT_BOOKMARKS {
        row = row.push(
            button(
                Row::new()
                    .spacing(6)
                    .align_items(Alignment::Center)
                    .push(text(bookmark.icon).size(12).style(palette.text_muted))
                    .push(text(bookmark.name).size(12)),
            )
            .padding([4, 8])
            .style(theme::Button::Text)
            .on_press(Message::Navigate(bookmark.url.to_string())),
        );
    }
    scrollable(row)
        .direction(scrollable::Direction::Horizontal(
            scrollable::Properties::default(),
        ))
        .into()
}

fn loading_bar(palette: Palette) -> Element<'static, Message> {
    container(Space::with_height(3))
        .width(Length::Fill)
        .style(fill_style(palette.accent))
        .into()
}

fn suggestion_box<'a>(app: &'a DroidWeb, palette: Palette) -> Element<'a, Message> {
    let reply: Element<Message> = if app.assistant_thinking {
        text("Thinking...").size(13).style(palette.text_muted).into()
    } else {
        text(app.suggestion.as_deref().unwrap_or_default())
            .size(13)
            .into()
    };

    container(
        Row::new()
            .spacing(10)
            .align_items(Alignment::Center)
            .push(text("AI").size(12).style(palette.accent))
            .push(reply),
    )
    .padding(10)
    .width(Length::Fill)
    .style(card_style(palette))
    .into()
}

fn content<'a>(app: &'a DroidWeb, palette: Palette) -> Element<'a, Message> {
    let prefs = app.prefs.prefs();

    let body: Element<Message> = if app.show_settings {
        settings_panel(app, palette)
    } else if app.show_downloads {
        downloads_panel(app, palette)
    } else if app.nav.is_home() {
        home_surface(app, palette)
    } else if app.nav.current_url().contains("demo=true") {
        demo_surface(palette)
    } else {
        embedded_surface(app, palette)
    };

    let mut surface = scrollable(body);
    let on_embedded =
        !app.show_settings && !app.show_downloads && !app.nav.is_home();
    if on_embedded {
        // Keyed scroll state: a view-mode change remounts the surface.
        surface = surface.id(scrollable::Id::new(surface_key(
            app.nav.current_url(),
            prefs.view_mode(),
        )));
    }

    container(surface)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn home_surface<'a>(app: &'a DroidWeb, palette: Palette) -> Element<'a, Message> {
    let engine = app.prefs.prefs().engine();

    let search = text_input(
        &format!("Search with {} or type URL", engine.name),
        app.ui.home_query(),
    )
    .on_input(|value| Message::Ui(UiMessage::HomeQueryChanged(value)))
    .on_submit(Message::Ui(UiMessage::HomeQuerySubmitted))
    .padding(12)
    .size(14)
    .width(Length::Fixed(340.0));

    let quick_links = Row::new()
        .spacing(16)
        .align_items(Alignment::Center)
        .push(quick_link("G", "Google", "https://google.com"))
        .push(quick_link("Y", "YouTube", "https://youtube.com"))
        .push(quick_link("R", "Reddit", "https://reddit.com"))
        .push(quick_link("W", "Wiki", "https://wikipedia.org"));

    let demo_card = container(
        Column::new()
            .spacing(10)
            .push(
                Row::new()
                    .align_items(Alignment::Center)
                    .push(text("Video Detection Demo").size(13).width(Length::Fill))
                    .push(text("Feature").size(10).style(palette.accent)),
            )
            .push(
                button(text("Load Test Video").size(13))
                    .padding(10)
                    .width(Length::Fill)
                    .style(theme::Button::Secondary)
                    .on_press(Message::Navigate(format!("{}?demo=true", DEMO_VIDEO_URL))),
            ),
    )
    .padding(16)
    .width(Length::Fixed(340.0))
    .style(card_style(palette));

    Column::new()
        .spacing(24)
        .padding(24)
        .width(Length::Fill)
        .align_items(Alignment::Center)
        .push(Space::with_height(30))
        .push(text("DroidWeb").size(44).style(palette.accent))
        .push(
            text("AI-Powered Privacy Browser")
                .size(13)
                .style(palette.text_muted),
        )
        .push(search)
        .push(quick_links)
        .push(demo_card)
        .into()
}

fn quick_link(icon: &'static str, name: &'static str, url: &'static str) -> Element<'static, Message> {
    button(
        Column::new()
            .spacing(4)
            .align_items(Alignment::Center)
            .push(text(icon).size(18))
            .push(text(name).size(11)),
    )
    .padding(10)
    .style(theme::Button::Text)
    .on_press(Message::Navigate(url.to_string()))
    .into()
}

fn demo_surface(palette: Palette) -> Element<'static, Message> {
    container(
        Column::new()
            .spacing(10)
            .align_items(Alignment::Center)
            .push(Space::with_height(40))
            .push(text("▶").size(36).style(palette.accent))
            .push(text(DEMO_VIDEO_TITLE).size(18))
            .push(
                text("This is a demo page to demonstrate video detection.")
                    .size(13)
                    .style(palette.text_muted),
            )
            .push(
                text("The detected clip is available in the media panel.")
                    .size(12)
                    .style(palette.text_muted),
            ),
    )
    .padding(20)
    .width(Length::Fill)
    .center_x()
    .into()
}

fn embedded_surface<'a>(app: &'a DroidWeb, palette: Palette) -> Element<'a, Message> {
    let view_mode = app.prefs.prefs().view_mode();

    let header_label = match view_mode {
        ViewMode::Desktop => format!("[desktop] {}", app.nav.current_url()),
        ViewMode::Mobile => app.nav.current_url().to_string(),
    };
    let header = container(text(header_label).size(11).style(palette.text_muted))
        .padding([4, 12])
        .width(Length::Fill)
        .center_x()
        .style(card_style(palette));

    let restriction = container(
        Column::new()
            .spacing(8)
            .push(text("Security Restriction").size(16).style(palette.accent))
            .push(
                text(
                    "Real websites block embedding for security. In a real Android app, \
                     this surface would render the page.",
                )
                .size(12)
                .style(palette.text_muted),
            ),
    )
    .padding(20)
    .width(Length::Fixed(340.0))
    .style(card_style(palette));

    let body_width = match view_mode {
        ViewMode::Desktop => Length::Fixed(1280.0),
        ViewMode::Mobile => Length::Fill,
    };

    Column::new()
        .push(header)
        .push(
            container(restriction)
                .padding(24)
                .width(body_width)
                .center_x(),
        )
        .width(Length::Fill)
        .into()
}

fn settings_panel<'a>(app: &'a DroidWeb, palette: Palette) -> Element<'a, Message> {
    let prefs = app.prefs.prefs();

    let header = Row::new()
        .align_items(Alignment::Center)
        .push(text("Settings").size(18).width(Length::Fill))
        .push(
            button(text("×").size(16))
                .padding([4, 10])
                .style(theme::Button::Text)
                .on_press(Message::CloseSettings),
        );

    let device_row = Row::new()
        .spacing(8)
        .push(choice_button(
            "Mobile Mode",
            prefs.device_mode() == DeviceMode::Mobile,
            Message::SetDeviceMode(DeviceMode::Mobile),
        ))
        .push(choice_button(
            "Desktop Mode",
            prefs.device_mode() == DeviceMode::Desktop,
            Message::SetDeviceMode(DeviceMode::Desktop),
        ));

    let appearance_row = Row::new()
        .spacing(8)
        .push(choice_button(
            "Light",
            prefs.theme() == ThemeChoice::Light,
            Message::SetTheme(ThemeChoice::Light),
        ))
        .push(choice_button(
            "Dark",
            prefs.theme() == ThemeChoice::Dark,
            Message::SetTheme(ThemeChoice::Dark),
        ));

    let view_row = Row::new()
        .spacing(8)
        .push(choice_button(
            "Mobile View",
            prefs.view_mode() == ViewMode::Mobile,
            Message::SetViewMode(ViewMode::Mobile),
        ))
        .push(choice_button(
            "Desktop View",
            prefs.view_mode() == ViewMode::Desktop,
            Message::SetViewMode(ViewMode::Desktop),
        ));

    let mut engines = Column::new().spacing(4);
    for engine in SEARCH_ENGINES {
        let selected = engine.name == prefs.engine().name;
        let label = Row::new()
            .spacing(10)
            .align_items(Alignment::Center)
            .push(text(engine.icon).size(12).style(palette.text_muted))
            .push(text(engine.name).size(13).width(Length::Fill))
            .push(
                text(if selected { "✓" } else { "" })
                    .size(13)
                    .style(palette.accent),
            );
        engines = engines.push(
            button(label)
                .padding(10)
                .width(Length::Fill)
                .style(if selected {
                    theme::Button::Secondary
                } else {
                    theme::Button::Text
                })
                .on_press(Message::SetSearchEngine(engine.name.to_string())),
        );
    }

    let footer = Column::new()
        .spacing(2)
        .align_items(Alignment::Center)
        .width(Length::Fill)
        .push(text("DroidWeb AI").size(12))
        .push(
            text(format!("Version {}", env!("CARGO_PKG_VERSION")))
                .size(10)
                .style(palette.text_muted),
        );

    Column::new()
        .spacing(18)
        .padding(16)
        .push(header)
        .push(section("DEVICE MODE", device_row.into(), palette))
        .push(section("APPEARANCE", appearance_row.into(), palette))
        .push(section("CONTENT PREFERENCES", view_row.into(), palette))
        .push(section("SEARCH ENGINE", engines.into(), palette))
        .push(footer)
        .into()
}

fn section<'a>(
    title: &'static str,
    body: Element<'a, Message>,
    palette: Palette,
) -> Element<'a, Message> {
    Column::new()
        .spacing(8)
        .push(text(title).size(11).style(palette.text_muted))
        .push(body)
        .into()
}

fn choice_button(
    label: &'static str,
    selected: bool,
    message: Message,
) -> Element<'static, Message> {
    button(text(label).size(13))
        .padding([10, 16])
        .style(if selected {
            theme::Button::Primary
        } else {
            theme::Button::Secondary
        })
        .on_press(message)
        .into()
}

fn downloads_panel<'a>(app: &'a DroidWeb, palette: Palette) -> Element<'a, Message> {
    let header = Row::new()
        .align_items(Alignment::Center)
        .push(
            text(format!("Detected Media ({})", app.downloads.len()))
                .size(16)
                .width(Length::Fill),
        )
        .push(
            button(text("×").size(16))
                .padding([4, 10])
                .style(theme::Button::Text)
                .on_press(Message::CloseDownloads),
        );

    let mut list = Column::new().spacing(10);
    if app.downloads.is_empty() {
        list = list
            .push(
                text("No videos detected on this page.")
                    .size(13)
                    .style(palette.text_muted),
            )
            .push(
                text("Try playing a video first.")
                    .size(11)
                    .style(palette.text_muted),
            );
    } else {
        for entry in app.downloads.entries() {
            list = list.push(download_row(entry, palette));
        }
    }

    Column::new()
        .spacing(14)
        .padding(16)
        .push(header)
        .push(list)
        .push(
            text("Note: Direct downloads may be limited by cross-origin restrictions.")
                .size(10)
                .style(palette.text_muted),
        )
        .into()
}

fn download_row<'a>(entry: &'a DownloadEntry, palette: Palette) -> Element<'a, Message> {
    let action: Element<Message> = match entry.state {
        DownloadState::Completed => text("✓ Downloaded").size(12).style(palette.accent).into(),
        DownloadState::Downloading => text("Downloading...")
            .size(12)
            .style(palette.text_muted)
            .into(),
        DownloadState::Pending => button(text("Download").size(12))
            .padding([6, 12])
            .style(theme::Button::Primary)
            .on_press(Message::StartDownload(entry.resource.id.clone()))
            .into(),
    };

    let kind = entry
        .resource
        .mime_type
        .split('/')
        .nth(1)
        .unwrap_or("mp4")
        .to_uppercase();

    container(
        Column::new()
            .spacing(6)
            .push(
                Row::new()
                    .spacing(8)
                    .align_items(Alignment::Center)
                    .push(text(&entry.resource.title).size(13).width(Length::Fill))
                    .push(text(kind).size(10).style(palette.text_muted)),
            )
            .push(
                Row::new()
                    .spacing(8)
                    .align_items(Alignment::Center)
                    .push(
                        text(entry.resource.size.as_deref().unwrap_or("Unknown size"))
                            .size(11)
                            .style(palette.text_muted)
                            .width(Length::Fill),
                    )
                    .push(action),
            ),
    )
    .padding(12)
    .width(Length::Fill)
    .style(card_style(palette))
    .into()
}

fn bottom_nav<'a>(app: &'a DroidWeb, palette: Palette) -> Element<'a, Message> {
    let media_count = app.downloads.len();
    let downloads_label = if media_count > 0 {
        format!("🎬 {}", media_count)
    } else {
        "🎬".to_string()
    };

    let home = button(text("⌂").size(18).style(palette.accent))
        .padding(8)
        .style(theme::Button::Text)
        .on_press(Message::GoHome);

    let downloads = button(text(downloads_label).size(16))
        .padding(8)
        .style(theme::Button::Text)
        .on_press(Message::OpenDownloads);

    let menu_toggle = button(text("☰").size(18))
        .padding(8)
        .style(theme::Button::Text)
        .on_press(Message::ToggleMenu);

    let row = Row::new()
        .padding([6, 18])
        .align_items(Alignment::Center)
        .push(slot(nav_button(
            "←",
            app.nav.can_go_back().then_some(Message::Back),
        )))
        .push(slot(nav_button(
            "→",
            app.nav.can_go_forward().then_some(Message::Forward),
        )))
        .push(slot(home.into()))
        .push(slot(downloads.into()))
        .push(slot(menu_toggle.into()));

    container(row)
        .width(Length::Fill)
        .style(card_style(palette))
        .into()
}

fn slot(widget: Element<Message>) -> Element<Message> {
    container(widget)
        .width(Length::FillPortion(1))
        .center_x()
        .into()
}

fn menu<'a>(app: &'a DroidWeb, palette: Palette) -> Element<'a, Message> {
    let fullscreen_label = if app.fullscreen {
        "Exit Fullscreen"
    } else {
        "Fullscreen"
    };

    container(
        Column::new()
            .spacing(2)
            .padding(8)
            .push(menu_item(
                "Switch to Desktop Mode",
                Message::SetDeviceMode(DeviceMode::Desktop),
            ))
            .push(menu_item(fullscreen_label, Message::ToggleFullscreen))
            .push(menu_item("Settings", Message::OpenSettings)),
    )
    .width(Length::Fill)
    .style(card_style(palette))
    .into()
}

fn menu_item(label: &'static str, message: Message) -> Element<'static, Message> {
    button(text(label).size(13))
        .padding(10)
        .width(Length::Fill)
        .style(theme::Button::Text)
        .on_press(message)
        .into()
}

fn notice_bar<'a>(notice: &'a str, palette: Palette) -> Element<'a, Message> {
    container(
        Row::new()
            .spacing(10)
            .align_items(Alignment::Center)
            .push(text(notice).size(12).style(palette.danger).width(Length::Fill))
            .push(
                button(text("Dismiss").size(12))
                    .padding([4, 10])
                    .style(theme::Button::Text)
                    .on_press(Message::DismissNotice),
            ),
    )
    .padding([8, 12])
    .width(Length::Fill)
    .style(card_style(palette))
    .into()
}

fn update_banner(palette: Palette) -> Element<'static, Message> {
    container(
        Row::new()
            .spacing(12)
            .align_items(Alignment::Center)
            .push(text("A new version is available!").size(13).width(Length::Fill))
            .push(
                button(text("Update").size(13))
                    .padding([6, 14])
                    .style(theme::Button::Primary)
                    .on_press(Message::ApplyUpdate),
            ),
    )
    .padding([8, 12])
    .width(Length::Fill)
    .style(card_style(palette))
    .into()
}

fn card_style(palette: Palette) -> theme::Container {
    theme::Container::Custom(Box::new(CardStyle(palette)))
}

fn fill_style(color: Color) -> theme::Container {
    theme::Container::Custom(Box::new(FillStyle(color)))
}

/// Card background with a subtle border.
struct CardStyle(Palette);

impl StyleSheet for CardStyle {
    type Style = iced::Theme;

    fn appearance(&self, _style: &Self::Style) -> Appearance {
        Appearance {
            background: Some(Background::Color(self.0.surface)),
            border_radius: 10.0.into(),
            border_width: 1.0,
            border_color: self.0.surface_border,
            ..Default::default()
        }
    }
}

/// Solid fill, used for the loading bar.
struct FillStyle(Color);

impl StyleSheet for FillStyle {
    type Style = iced::Theme;

    fn appearance(&self, _style: &Self::Style) -> Appearance {
        Appearance {
            background: Some(Background::Color(self.0)),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_key_changes_with_view_mode() {
        let url = "https://example.com";
        assert_ne!(
            surface_key(url, ViewMode::Mobile),
            surface_key(url, ViewMode::Desktop)
        );
        assert_eq!(
            surface_key(url, ViewMode::Mobile),
            surface_key(url, ViewMode::Mobile)
        );
    }

    #[test]
    fn test_address_bar_sync() {
        let mut ui = BrowserUi::new();
        ui.set_address("https://example.com");
        assert_eq!(ui.address_bar_value(), "https://example.com");
        ui.set_address("");
        assert_eq!(ui.address_bar_value(), "");
    }
}
