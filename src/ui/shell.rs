use eframe::egui;
use std::path::Path;
use std::time::{Duration, Instant};

use crate::types::site_config::SiteConfig;
use crate::ui::player::Player;
use crate::ui::reveal::Reveal;

/// How long the loading placeholder stays up before the card opens.
pub const LOADING_DELAY: Duration = Duration::from_millis(100);
/// Window width at or below which the player stacks under the card.
pub const STACKED_LAYOUT_MAX_WIDTH: f32 = 950.0;
const CARD_ANIMATION_SECS: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    NotFound,
}

impl Route {
    pub fn parse(path: Option<&str>) -> Self {
        match path.map(str::trim) {
            None | Some("") | Some("/") => Route::Home,
            Some(_) => Route::NotFound,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    SideBySide,
    Stacked,
}

impl LayoutMode {
    pub fn from_width(width: f32) -> Self {
        if width <= STACKED_LAYOUT_MAX_WIDTH {
            LayoutMode::Stacked
        } else {
            LayoutMode::SideBySide
        }
    }
}

/// Loading placeholder, then an open card.
#[derive(Debug)]
pub struct Entrance {
    mounted_at: Instant,
    open: bool,
}

impl Entrance {
    pub fn new(now: Instant) -> Self {
        Self {
            mounted_at: now,
            open: false,
        }
    }

    /// Returns true on the call that opens the card.
    pub fn update(&mut self, now: Instant) -> bool {
        if !self.open && now.duration_since(self.mounted_at) >= LOADING_DELAY {
            self.open = true;
            return true;
        }
        false
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn remaining(&self, now: Instant) -> Duration {
        LOADING_DELAY.saturating_sub(now.duration_since(self.mounted_at))
    }
}

/// Paints a rounded card whose size springs from `closed` to `open`.
fn animated_card(
    ui: &mut egui::Ui,
    id: egui::Id,
    open: bool,
    closed: egui::Vec2,
    opened: egui::Vec2,
    add_contents: impl FnOnce(&mut egui::Ui),
) {
    let t = ui.ctx().animate_bool_with_time(id, open, CARD_ANIMATION_SECS);
    let size = egui::lerp(closed..=opened, t);
    ui.allocate_ui_with_layout(size, egui::Layout::top_down(egui::Align::Center), |ui| {
        ui.set_min_size(size);
        let rect = egui::Rect::from_min_size(ui.min_rect().min, size);
        ui.painter()
            .rect_filled(rect, 40.0, ui.visuals().faint_bg_color);
        ui.add_space(24.0);
        add_contents(ui);
    });
}

pub struct HomePage {
    config: SiteConfig,
    logo_uri: Option<String>,
    entrance: Entrance,
    content_reveal: Option<Reveal>,
    player: Option<Player>,
    layout: Option<LayoutMode>,
}

impl HomePage {
    pub fn new(config: SiteConfig) -> Self {
        let logo_uri = config.profile.logo_path.as_ref().and_then(|logo| {
            match std::fs::canonicalize(logo) {
                Ok(abs) => Some(format!("file://{}", abs.display())),
                Err(err) => {
                    tracing::warn!(path = %logo, error = %err, "logo not found");
                    None
                }
            }
        });
        Self {
            config,
            logo_uri,
            entrance: Entrance::new(Instant::now()),
            content_reveal: None,
            player: None,
            layout: None,
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        let now = Instant::now();
        if self.entrance.update(now) {
            self.content_reveal = Some(Reveal::content(now));
            // The player mounts together with the open card.
            self.player = Some(Player::open(
                Path::new(&self.config.audio_path),
                &self.config.player,
            ));
        }
        if !self.entrance.is_open() {
            ui.ctx().request_repaint_after(self.entrance.remaining(now));
        }

        let mode = LayoutMode::from_width(ui.available_width());
        if self.layout.replace(mode).is_some_and(|previous| previous != mode) {
            if let Some(player) = self.player.as_mut() {
                player.remount(now);
            }
        }
        match mode {
            LayoutMode::SideBySide => {
                ui.horizontal_top(|ui| {
                    self.show_card(ui, now);
                    ui.add_space(24.0);
                    if let Some(player) = self.player.as_mut() {
                        player.show(ui);
                    }
                });
            }
            LayoutMode::Stacked => {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    ui.vertical_centered(|ui| {
                        self.show_card(ui, now);
                        ui.add_space(16.0);
                        if let Some(player) = self.player.as_mut() {
                            player.show(ui);
                        }
                    });
                });
            }
        }
    }

    fn show_card(&self, ui: &mut egui::Ui, now: Instant) {
        let open = self.entrance.is_open();
        let config = &self.config;
        let logo_uri = self.logo_uri.as_ref();
        let reveal = self.content_reveal.unwrap_or_else(|| Reveal::content(now));
        animated_card(
            ui,
            egui::Id::new("home_card"),
            open,
            egui::vec2(200.0, 250.0),
            egui::vec2(300.0, 630.0),
            |ui| {
                if !open {
                    ui.add_space(80.0);
                    ui.spinner();
                    return;
                }
                reveal.show(ui, now, |ui| {
                    if let Some(logo) = logo_uri {
                        ui.add(
                            egui::Image::new(logo.as_str())
                                .fit_to_exact_size(egui::vec2(160.0, 160.0)),
                        );
                    }
                    ui.label(egui::RichText::new(&config.profile.name).size(28.0).strong());
                    ui.label(egui::RichText::new(&config.profile.email).weak());
                    ui.add_space(24.0);
                    for link in &config.social_links {
                        ui.add_sized(
                            egui::vec2(220.0, 36.0),
                            egui::Hyperlink::from_label_and_url(
                                format!("{}  {}", link.kind.icon(), link.label),
                                &link.href,
                            )
                            .open_in_new_tab(true),
                        );
                        ui.add_space(6.0);
                    }
                });
            },
        );
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundAction {
    None,
    GoHome,
}

pub struct NotFoundPage {
    entrance: Entrance,
    content_reveal: Option<Reveal>,
}

impl NotFoundPage {
    pub fn new() -> Self {
        Self {
            entrance: Entrance::new(Instant::now()),
            content_reveal: None,
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui) -> NotFoundAction {
        let now = Instant::now();
        if self.entrance.update(now) {
            self.content_reveal = Some(Reveal::content(now));
        }
        if !self.entrance.is_open() {
            ui.ctx().request_repaint_after(self.entrance.remaining(now));
        }

        let open = self.entrance.is_open();
        let reveal = self.content_reveal.unwrap_or_else(|| Reveal::content(now));
        let mut action = NotFoundAction::None;
        ui.vertical_centered(|ui| {
            animated_card(
                ui,
                egui::Id::new("not_found_card"),
                open,
                egui::vec2(100.0, 100.0),
                egui::vec2(350.0, 250.0),
                |ui| {
                    if !open {
                        ui.spinner();
                        return;
                    }
                    reveal.show(ui, now, |ui| {
                        ui.label(egui::RichText::new("404").size(40.0).strong());
                        ui.label("This page could not be found.");
                        ui.add_space(16.0);
                        if ui.button("🏠 Home").clicked() {
                            action = NotFoundAction::GoHome;
                        }
                    });
                },
            );
        });
        action
    }
}

impl Default for NotFoundPage {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_parse() {
        assert_eq!(Route::parse(None), Route::Home);
        assert_eq!(Route::parse(Some("/")), Route::Home);
        assert_eq!(Route::parse(Some("  ")), Route::Home);
        assert_eq!(Route::parse(Some("/missing")), Route::NotFound);
    }

    #[test]
    fn test_layout_mode_threshold() {
        assert_eq!(LayoutMode::from_width(950.0), LayoutMode::Stacked);
        assert_eq!(LayoutMode::from_width(400.0), LayoutMode::Stacked);
        assert_eq!(LayoutMode::from_width(951.0), LayoutMode::SideBySide);
    }

    #[test]
    fn test_entrance_opens_once_after_delay() {
        let start = Instant::now();
        let mut entrance = Entrance::new(start);
        assert!(!entrance.update(start + Duration::from_millis(50)));
        assert!(!entrance.is_open());
        assert_eq!(
            entrance.remaining(start + Duration::from_millis(50)),
            Duration::from_millis(50)
        );
        assert!(entrance.update(start + LOADING_DELAY));
        assert!(entrance.is_open());
        assert!(!entrance.update(start + Duration::from_secs(1)));
    }
}
