use eframe::egui;
use std::path::Path;
use std::time::{Duration, Instant};

use crate::ops::metadata_loader::MetadataTask;
use crate::ops::time_format::{format_remaining, format_time};
use crate::renderer::gst_audio::GstAudioElement;
use crate::renderer::transport::Transport;
use crate::types::metadata::{TrackMetadata, display_labels};
use crate::types::playback_state::{PlaybackState, VolumeLevel, VolumeState};
use crate::types::site_config::PlayerSettings;
use crate::ui::reveal::Reveal;
use crate::ui::slider::{Slider, SliderState};
use crate::ui::volume_indicator::VolumeIndicator;

pub const PLAYER_WIDTH: f32 = 300.0;
const COVER_SIZE: f32 = 80.0;
const TIME_UPDATE_INTERVAL: Duration = Duration::from_millis(250);
const METADATA_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// The audio player widget: cover art, title/artist, transport controls,
/// seek bar and volume control.
pub struct Player {
    transport: Transport,
    volume: VolumeState,
    indicator: VolumeIndicator,
    seek_slider: SliderState,
    volume_slider: SliderState,
    metadata: Option<TrackMetadata>,
    pending_metadata: Option<MetadataTask>,
    cover_texture: Option<egui::TextureHandle>,
    cover_dirty: bool,
    mount_reveal: Reveal,
    glyph_reveal: Reveal,
}

impl Player {
    pub fn new(
        transport: Transport,
        pending_metadata: Option<MetadataTask>,
        settings: &PlayerSettings,
    ) -> Self {
        let volume = VolumeState::new(settings.initial_volume);
        let now = Instant::now();
        let mut player = Self {
            transport,
            indicator: VolumeIndicator::new(Duration::from_millis(settings.indicator_hide_ms)),
            seek_slider: SliderState::new(0.0),
            volume_slider: SliderState::new(volume.current()),
            volume,
            metadata: None,
            pending_metadata,
            cover_texture: None,
            cover_dirty: false,
            mount_reveal: Reveal::content(now),
            glyph_reveal: Reveal::immediate(now),
        };
        player.transport.set_volume(player.volume.current());
        player
    }

    /// Opens the track with GStreamer and starts reading its tags.
    /// A track that cannot be opened still yields a usable (inert) player.
    pub fn open(audio_path: &Path, settings: &PlayerSettings) -> Self {
        let transport = match GstAudioElement::open(audio_path) {
            Ok(element) => Transport::with_element(Box::new(element)),
            Err(err) => {
                tracing::warn!(path = %audio_path.display(), error = %err, "audio unavailable");
                Transport::new()
            }
        };
        Self::new(transport, Some(MetadataTask::for_path(audio_path)), settings)
    }

    pub fn playback_state(&self) -> &PlaybackState {
        &self.transport.playback_state
    }

    #[cfg(test)]
    pub fn indicator(&self) -> &VolumeIndicator {
        &self.indicator
    }

    #[cfg(test)]
    pub fn metadata(&self) -> Option<&TrackMetadata> {
        self.metadata.as_ref()
    }

    pub fn labels(&self) -> (&str, &str) {
        display_labels(self.metadata.as_ref())
    }

    pub fn toggle_play_pause(&mut self) {
        self.transport.toggle_play_pause();
    }

    pub fn on_seek(&mut self, position: f64) {
        self.transport.seek(position);
    }

    pub fn on_volume_change(&mut self, volume: f64, now: Instant) {
        self.volume.set(volume);
        self.transport.set_volume(self.volume.current());
        self.indicator.show(self.volume.current(), now);
    }

    /// Fades the widget in again, e.g. after it moved to another layout.
    pub fn remount(&mut self, now: Instant) {
        self.mount_reveal = Reveal::immediate(now);
    }

    pub fn toggle_mute(&mut self) {
        self.volume.toggle_mute();
        self.transport.set_volume(self.volume.current());
    }

    /// Applies everything that happened since the last frame: finished tag
    /// load, media notifications and the indicator deadline.
    pub fn update(&mut self, now: Instant) {
        if let Some(task) = self.pending_metadata.as_mut() {
            if let Some(result) = task.poll() {
                self.pending_metadata = None;
                match result {
                    Ok(metadata) => {
                        tracing::debug!(title = ?metadata.title, artist = ?metadata.artist, "track metadata loaded");
                        self.cover_dirty = true;
                        self.metadata = Some(metadata);
                    }
                    Err(err) => tracing::warn!(error = %err, "failed to load track metadata"),
                }
            }
        }
        self.transport.update();
        self.indicator.tick(now);
    }

    /// Earliest time the widget needs another frame, if any.
    fn next_repaint(&self, now: Instant) -> Option<Duration> {
        [
            self.playback_state()
                .is_playing
                .then_some(TIME_UPDATE_INTERVAL),
            self.indicator.time_until_hide(now),
            self.pending_metadata
                .is_some()
                .then_some(METADATA_POLL_INTERVAL),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    /// Decode the cover art into a texture. The previous handle is released
    /// when it gets replaced.
    fn update_cover_texture(&mut self, ctx: &egui::Context) {
        if !self.cover_dirty {
            return;
        }
        self.cover_dirty = false;
        self.cover_texture = None;

        let Some(cover) = self.metadata.as_ref().and_then(|m| m.cover_art.as_ref()) else {
            return;
        };
        match image::load_from_memory(&cover.data) {
            Ok(decoded) => {
                let rgba = decoded.to_rgba8();
                let size = [rgba.width() as usize, rgba.height() as usize];
                let color_img = egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw());
                self.cover_texture =
                    Some(ctx.load_texture("cover_art", color_img, egui::TextureOptions::LINEAR));
            }
            Err(err) => {
                tracing::warn!(mime = ?cover.mime_type, error = %err, "could not decode cover art")
            }
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        let now = Instant::now();
        self.update(now);
        self.update_cover_texture(ui.ctx());

        let reveal = self.mount_reveal;
        ui.vertical(|ui| {
            reveal.show(ui, now, |ui| {
                ui.group(|ui| {
                    ui.set_width(PLAYER_WIDTH);
                    self.show_track(ui, now);
                });
            });
            ui.add_space(12.0);
            reveal.show(ui, now, |ui| {
                ui.group(|ui| {
                    ui.set_width(PLAYER_WIDTH);
                    self.show_volume(ui, now);
                });
            });
        });

        if let Some(after) = self.next_repaint(Instant::now()) {
            ui.ctx().request_repaint_after(after);
        }
    }

    fn show_track(&mut self, ui: &mut egui::Ui, now: Instant) {
        ui.horizontal(|ui| {
            let cover_size = egui::vec2(COVER_SIZE, COVER_SIZE);
            match &self.cover_texture {
                Some(texture) => {
                    ui.add(egui::Image::new(texture).fit_to_exact_size(cover_size));
                }
                None => {
                    let (rect, _) = ui.allocate_exact_size(cover_size, egui::Sense::hover());
                    ui.painter()
                        .rect_filled(rect, 10.0, ui.visuals().faint_bg_color);
                }
            }

            let (title, artist) = self.labels();
            ui.vertical(|ui| {
                ui.label(egui::RichText::new(title).strong());
                ui.label(egui::RichText::new(artist).weak());
            });

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let was_playing = self.transport.playback_state.is_playing;
                let glyph = if was_playing { "⏸" } else { "▶" };
                let clicked = self.glyph_reveal.show(ui, now, |ui| {
                    ui.add(egui::Button::new(egui::RichText::new(glyph).size(20.0)).frame(false))
                        .clicked()
                });
                if clicked {
                    self.toggle_play_pause();
                    if self.transport.playback_state.is_playing != was_playing {
                        self.glyph_reveal.restart(now);
                    }
                }
            });
        });

        ui.add_space(8.0);
        let state = self.transport.playback_state.clone();
        let (_, changed) =
            Slider::new(&mut self.seek_slider, state.position, 0.0, state.duration).show(ui);
        if let Some(position) = changed {
            self.on_seek(position);
        }

        ui.horizontal(|ui| {
            ui.label(egui::RichText::new(format_time(state.position)).weak());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(egui::RichText::new(format_remaining(state.position, state.duration)).weak());
            });
        });
    }

    fn show_volume(&mut self, ui: &mut egui::Ui, now: Instant) {
        ui.horizontal(|ui| {
            let glyph = match self.volume.level() {
                VolumeLevel::Muted => "🔇",
                VolumeLevel::Low => "🔉",
                VolumeLevel::High => "🔊",
            };
            if ui.add(egui::Button::new(glyph).frame(false)).clicked() {
                self.toggle_mute();
            }

            let current = self.volume.current();
            let (response, changed) =
                Slider::new(&mut self.volume_slider, current, 0.0, 1.0).show(ui);
            if let Some(volume) = changed {
                self.on_volume_change(volume, now);
            }
            self.indicator.paint(ui, response.rect);
        });
    }
}

impl Drop for Player {
    fn drop(&mut self) {
        if let Some(mut task) = self.pending_metadata.take() {
            task.cancel();
        }
        self.indicator.cancel();
        self.seek_slider.force_release();
        self.volume_slider.force_release();
        self.cover_texture = None;
        self.transport.detach();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MetadataError;
    use crate::ops::slider_math::TrackGeometry;
    use crate::renderer::media_element::fake::FakeElement;
    use crate::types::metadata::{UNKNOWN_ARTIST, UNKNOWN_TITLE};

    fn wait_for_metadata(player: &mut Player) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while player.pending_metadata.is_some() && Instant::now() < deadline {
            player.update(Instant::now());
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_metadata_failure_degrades_gracefully() {
        let (element, log) = FakeElement::new(Some(200.0));
        let task = MetadataTask::spawn(|| Err(MetadataError::NoTag));
        let mut player = Player::new(
            Transport::with_element(Box::new(element)),
            Some(task),
            &PlayerSettings::default(),
        );

        wait_for_metadata(&mut player);
        assert!(player.pending_metadata.is_none());
        assert!(player.metadata().is_none());
        assert_eq!(player.labels(), (UNKNOWN_TITLE, UNKNOWN_ARTIST));
        assert!(player.cover_texture.is_none());

        player.toggle_play_pause();
        assert!(player.playback_state().is_playing);
        assert!(log.borrow().playing);
    }

    #[test]
    fn test_metadata_success_is_applied() {
        let task = MetadataTask::spawn(|| {
            Ok(TrackMetadata {
                title: Some("Outdate".to_string()),
                artist: Some("espilx".to_string()),
                ..Default::default()
            })
        });
        let mut player = Player::new(Transport::new(), Some(task), &PlayerSettings::default());
        wait_for_metadata(&mut player);
        assert_eq!(player.labels(), ("Outdate", "espilx"));
    }

    #[test]
    fn test_seek_drag_to_half_of_track() {
        let (element, log) = FakeElement::new(Some(200.0));
        let mut player = Player::new(
            Transport::with_element(Box::new(element)),
            None,
            &PlayerSettings::default(),
        );
        let track = TrackGeometry::new(20.0, 260.0);
        let duration = player.playback_state().duration;

        let value = player
            .seek_slider
            .press(20.0 + 130.0, track, 0.0, duration)
            .unwrap();
        player.seek_slider.release();
        player.on_seek(value);

        assert_eq!(player.playback_state().position, 100.0);
        assert_eq!(log.borrow().position, 100.0);
        assert!(!player.playback_state().is_playing);
    }

    #[test]
    fn test_initial_volume_applied_to_element() {
        let (element, log) = FakeElement::new(None);
        let _player = Player::new(
            Transport::with_element(Box::new(element)),
            None,
            &PlayerSettings::default(),
        );
        assert_eq!(log.borrow().volume, Some(0.25));
    }

    #[test]
    fn test_volume_change_shows_indicator_and_mute_restores() {
        let (element, log) = FakeElement::new(None);
        let mut player = Player::new(
            Transport::with_element(Box::new(element)),
            None,
            &PlayerSettings::default(),
        );
        let now = Instant::now();

        player.on_volume_change(0.8, now);
        assert_eq!(log.borrow().volume, Some(0.8));
        assert!(player.indicator().is_visible());

        player.toggle_mute();
        assert_eq!(log.borrow().volume, Some(0.0));
        player.toggle_mute();
        assert_eq!(log.borrow().volume, Some(0.8));

        player.update(now + Duration::from_millis(1000));
        assert!(!player.indicator().is_visible());
    }

    #[test]
    fn test_next_repaint_while_indicator_pending() {
        let mut player = Player::new(Transport::new(), None, &PlayerSettings::default());
        let now = Instant::now();
        assert_eq!(player.next_repaint(now), None);
        player.on_volume_change(0.5, now);
        assert_eq!(
            player.next_repaint(now + Duration::from_millis(900)),
            Some(Duration::from_millis(100))
        );
    }

    #[test]
    fn test_drop_cancels_pending_metadata() {
        let (release_tx, release_rx) = std::sync::mpsc::channel::<()>();
        let (done_tx, done_rx) = std::sync::mpsc::channel::<()>();
        let task = MetadataTask::spawn(move || {
            let _ = release_rx.recv();
            let _ = done_tx.send(());
            Ok(TrackMetadata::default())
        });
        let alive = task.liveness();
        let player = Player::new(Transport::new(), Some(task), &PlayerSettings::default());
        assert!(alive.load(std::sync::atomic::Ordering::Acquire));

        drop(player);
        assert!(!alive.load(std::sync::atomic::Ordering::Acquire));

        // The worker finishes after teardown and sees the cancelled flag
        release_tx.send(()).unwrap();
        done_rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(!alive.load(std::sync::atomic::Ordering::Acquire));
    }

    #[test]
    fn test_cancelled_result_is_never_applied() {
        let (release_tx, release_rx) = std::sync::mpsc::channel::<()>();
        let task = MetadataTask::spawn(move || {
            let _ = release_rx.recv();
            Ok(TrackMetadata {
                title: Some("late".to_string()),
                ..Default::default()
            })
        });
        let mut player = Player::new(Transport::new(), Some(task), &PlayerSettings::default());
        if let Some(task) = player.pending_metadata.as_mut() {
            task.cancel();
        }
        release_tx.send(()).unwrap();
        std::thread::sleep(Duration::from_millis(50));

        player.update(Instant::now());
        assert!(player.metadata().is_none());
        assert_eq!(player.labels(), (UNKNOWN_TITLE, UNKNOWN_ARTIST));
    }
}
