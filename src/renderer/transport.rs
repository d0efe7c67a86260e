use crate::renderer::media_element::{MediaElement, MediaEvent};
use crate::types::playback_state::PlaybackState;

/// Bridges the player's playback state to a native media element.
/// Every action is a silent no-op until an element is attached.
pub struct Transport {
    element: Option<Box<dyn MediaElement>>,
    pub playback_state: PlaybackState,
}

impl Transport {
    pub fn new() -> Self {
        Self {
            element: None,
            playback_state: PlaybackState::new(),
        }
    }

    pub fn with_element(element: Box<dyn MediaElement>) -> Self {
        let mut transport = Self::new();
        transport.attach(element);
        transport
    }

    pub fn attach(&mut self, element: Box<dyn MediaElement>) {
        if let Some(duration) = element.duration() {
            self.playback_state.set_duration(duration);
        }
        self.element = Some(element);
    }

    pub fn detach(&mut self) {
        if let Some(mut element) = self.element.take() {
            element.pause();
        }
        self.playback_state.is_playing = false;
    }

    pub fn toggle_play_pause(&mut self) {
        let Some(element) = self.element.as_mut() else {
            return;
        };
        if self.playback_state.is_playing {
            element.pause();
            self.playback_state.is_playing = false;
        } else {
            element.play();
            self.playback_state.is_playing = true;
        }
        tracing::debug!(playing = self.playback_state.is_playing, "transport toggled");
    }

    /// Moves the playhead. Leaves the playing flag alone.
    pub fn seek(&mut self, position: f64) {
        let Some(element) = self.element.as_mut() else {
            return;
        };
        let position = self.playback_state.clamp_position(position);
        element.set_position(position);
        self.playback_state.position = position;
    }

    pub fn set_volume(&mut self, volume: f64) {
        if let Some(element) = self.element.as_mut() {
            element.set_volume(volume);
        }
    }

    pub fn handle_event(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::TimeUpdate(position) => self.playback_state.set_position(position),
            MediaEvent::LoadedMetadata(duration) => self.playback_state.set_duration(duration),
            // Position stays wherever the element left it.
            MediaEvent::Ended => self.playback_state.is_playing = false,
            MediaEvent::Error(message) => {
                tracing::warn!(%message, "media element error");
                self.playback_state.is_playing = false;
            }
        }
    }

    /// Drains the element's pending notifications into the playback state.
    pub fn update(&mut self) {
        let events = match self.element.as_mut() {
            Some(element) => element.poll_events(),
            None => return,
        };
        for event in events {
            self.handle_event(event);
        }
    }
}

impl Default for Transport {
    fn default() -> Self {
        Self::new()
    }
}
