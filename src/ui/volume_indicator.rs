use eframe::egui;
use std::time::{Duration, Instant};

pub const DEFAULT_HIDE_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IndicatorVisibility {
    Hidden,
    Visible { position_percent: f64 },
}

/// Floating volume readout shown while the volume slider moves.
///
/// Holds at most one pending hide deadline; every `show` replaces it, so a
/// burst of changes produces a single hide after the last one.
#[derive(Debug)]
pub struct VolumeIndicator {
    visibility: IndicatorVisibility,
    volume: f64,
    hide_at: Option<Instant>,
    hide_delay: Duration,
}

impl VolumeIndicator {
    pub fn new(hide_delay: Duration) -> Self {
        Self {
            visibility: IndicatorVisibility::Hidden,
            volume: 0.0,
            hide_at: None,
            hide_delay,
        }
    }

    pub fn show(&mut self, volume: f64, now: Instant) {
        self.volume = volume.clamp(0.0, 1.0);
        self.visibility = IndicatorVisibility::Visible {
            position_percent: self.volume * 100.0,
        };
        self.hide_at = Some(now + self.hide_delay);
    }

    /// Hides the indicator once its deadline passed. Returns true on the
    /// frame the hide happens.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.hide_at {
            Some(deadline) if now >= deadline => {
                self.hide_at = None;
                self.visibility = IndicatorVisibility::Hidden;
                true
            }
            _ => false,
        }
    }

    pub fn cancel(&mut self) {
        self.hide_at = None;
        self.visibility = IndicatorVisibility::Hidden;
    }

    pub fn time_until_hide(&self, now: Instant) -> Option<Duration> {
        self.hide_at
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    #[cfg(test)]
    pub fn visibility(&self) -> IndicatorVisibility {
        self.visibility
    }

    pub fn is_visible(&self) -> bool {
        matches!(self.visibility, IndicatorVisibility::Visible { .. })
    }

    pub fn label(&self) -> String {
        format!("{}%", (self.volume * 100.0).round() as u32)
    }

    /// Paints the readout above `track`, horizontally at the volume position.
    pub fn paint(&self, ui: &egui::Ui, track: egui::Rect) {
        let IndicatorVisibility::Visible { position_percent } = self.visibility else {
            return;
        };
        let x = track.left() + track.width() * (position_percent as f32 / 100.0);
        let anchor = egui::pos2(x, track.top() - 18.0);

        let painter = ui.painter();
        let galley = painter.layout_no_wrap(
            self.label(),
            egui::FontId::proportional(13.0),
            ui.visuals().strong_text_color(),
        );
        let bubble = egui::Rect::from_center_size(anchor, galley.size() + egui::vec2(12.0, 6.0));
        painter.rect_filled(bubble, 6.0, ui.visuals().window_fill);
        painter.galley(
            bubble.center() - galley.size() / 2.0,
            galley,
            ui.visuals().strong_text_color(),
        );
    }
}

impl Default for VolumeIndicator {
    fn default() -> Self {
        Self::new(DEFAULT_HIDE_DELAY)
    }
}
