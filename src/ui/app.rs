use eframe::egui;

use crate::types::site_config::SiteConfig;
use crate::ui::shell::{HomePage, NotFoundAction, NotFoundPage, Route};

pub enum Page {
    Home(HomePage),
    NotFound(NotFoundPage),
}

impl Page {
    fn for_route(route: Route, config: &SiteConfig) -> Self {
        match route {
            Route::Home => Page::Home(HomePage::new(config.clone())),
            Route::NotFound => Page::NotFound(NotFoundPage::new()),
        }
    }
}

pub struct ArtistCardApp {
    config: SiteConfig,
    page: Page,
}

impl ArtistCardApp {
    pub fn new(config: SiteConfig, route: Route) -> Self {
        let page = Page::for_route(route, &config);
        Self { config, page }
    }

    /// Replacing the page drops the old one, which tears down its player.
    fn navigate(&mut self, route: Route) {
        tracing::debug!(?route, "navigating");
        self.page = Page::for_route(route, &self.config);
    }
}

impl eframe::App for ArtistCardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut next_route = None;

        egui::CentralPanel::default().show(ctx, |ui| match &mut self.page {
            Page::Home(home) => home.show(ui),
            Page::NotFound(not_found) => {
                if not_found.show(ui) == NotFoundAction::GoHome {
                    next_route = Some(Route::Home);
                }
            }
        });

        if let Some(route) = next_route {
            self.navigate(route);
        }
    }
}
