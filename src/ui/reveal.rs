use eframe::egui;
use std::time::{Duration, Instant};

/// Card and player content: short delay, then fade in.
pub const CONTENT_DELAY: Duration = Duration::from_millis(200);
pub const FADE_DURATION: Duration = Duration::from_millis(300);

/// A time-driven fade-in.
#[derive(Debug, Clone, Copy)]
pub struct Reveal {
    started: Instant,
    delay: Duration,
    duration: Duration,
}

impl Reveal {
    pub fn new(started: Instant, delay: Duration, duration: Duration) -> Self {
        Self {
            started,
            delay,
            duration,
        }
    }

    /// Content appearing inside a freshly opened card.
    pub fn content(now: Instant) -> Self {
        Self::new(now, CONTENT_DELAY, FADE_DURATION)
    }

    /// A swapped element (e.g. the play/pause glyph) or a remounted widget.
    pub fn immediate(now: Instant) -> Self {
        Self::new(now, Duration::ZERO, FADE_DURATION)
    }

    pub fn restart(&mut self, now: Instant) {
        self.started = now;
    }

    /// Eased opacity in `[0, 1]`.
    pub fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now
            .saturating_duration_since(self.started)
            .saturating_sub(self.delay);
        let t = (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0);
        egui::emath::easing::cubic_in_out(t)
    }

    pub fn is_done(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started) >= self.delay + self.duration
    }

    /// Adds `add_contents` with its opacity following the fade. Keeps frames
    /// coming until the fade completes.
    pub fn show<R>(
        &self,
        ui: &mut egui::Ui,
        now: Instant,
        add_contents: impl FnOnce(&mut egui::Ui) -> R,
    ) -> R {
        if !self.is_done(now) {
            ui.ctx().request_repaint();
        }
        let opacity = self.progress(now);
        ui.scope(|ui| {
            ui.multiply_opacity(opacity);
            add_contents(ui)
        })
        .inner
    }
}
