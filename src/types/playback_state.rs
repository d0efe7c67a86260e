#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    pub is_playing: bool,
    pub position: f64, // seconds
    pub duration: f64, // seconds, 0 until the element reports it
}

impl PlaybackState {
    pub fn new() -> Self {
        Self {
            is_playing: false,
            position: 0.0,
            duration: 0.0,
        }
    }

    pub fn duration_known(&self) -> bool {
        self.duration > 0.0
    }

    /// Clamp a position into the playable range.
    /// Before the duration is known only the lower bound applies.
    pub fn clamp_position(&self, position: f64) -> f64 {
        if !position.is_finite() {
            return self.position;
        }
        let position = position.max(0.0);
        if self.duration_known() {
            position.min(self.duration)
        } else {
            position
        }
    }

    pub fn set_position(&mut self, position: f64) {
        self.position = self.clamp_position(position);
    }

    pub fn set_duration(&mut self, duration: f64) {
        if !duration.is_finite() || duration < 0.0 {
            return;
        }
        self.duration = duration;
        self.position = self.clamp_position(self.position);
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::new()
    }
}

pub const DEFAULT_VOLUME: f64 = 0.25;

/// Current volume plus the restore point used by the mute toggle.
#[derive(Debug, Clone, PartialEq)]
pub struct VolumeState {
    current: f64,
    previous: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeLevel {
    Muted,
    Low,
    High,
}

impl VolumeState {
    pub fn new(initial: f64) -> Self {
        let mut state = Self {
            current: DEFAULT_VOLUME,
            previous: 1.0,
        };
        state.set(initial);
        state
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    #[cfg(test)]
    pub fn previous(&self) -> f64 {
        self.previous
    }

    pub fn set(&mut self, volume: f64) {
        if volume.is_nan() {
            return;
        }
        self.current = volume.clamp(0.0, 1.0);
    }

    /// Mute stashes the current volume; unmute restores it.
    /// The restore point is never overwritten with 0.
    pub fn toggle_mute(&mut self) {
        if self.current > 0.0 {
            self.previous = self.current;
            self.current = 0.0;
        } else {
            self.current = self.previous;
        }
    }

    pub fn is_muted(&self) -> bool {
        self.current <= 0.0
    }

    pub fn level(&self) -> VolumeLevel {
        if self.is_muted() {
            VolumeLevel::Muted
        } else if self.current < 0.5 {
            VolumeLevel::Low
        } else {
            VolumeLevel::High
        }
    }
}

impl Default for VolumeState {
    fn default() -> Self {
        Self::new(DEFAULT_VOLUME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_clamped_once_duration_known() {
        let mut state = PlaybackState::new();
        state.set_position(500.0);
        assert_eq!(state.position, 500.0);

        state.set_duration(200.0);
        assert_eq!(state.position, 200.0);

        state.set_position(-3.0);
        assert_eq!(state.position, 0.0);
    }

    #[test]
    fn test_invalid_duration_ignored() {
        let mut state = PlaybackState::new();
        state.set_duration(f64::NAN);
        state.set_duration(-1.0);
        state.set_duration(f64::INFINITY);
        assert_eq!(state.duration, 0.0);
        assert!(!state.duration_known());
    }

    #[test]
    fn test_mute_then_unmute_restores_volume() {
        let mut volume = VolumeState::new(0.6);
        volume.toggle_mute();
        assert_eq!(volume.current(), 0.0);
        assert_eq!(volume.previous(), 0.6);
        volume.toggle_mute();
        assert_eq!(volume.current(), 0.6);
    }

    #[test]
    fn test_unmute_from_zero_uses_default_restore_point() {
        let mut volume = VolumeState::new(0.0);
        volume.toggle_mute();
        assert_eq!(volume.current(), 1.0);
    }

    #[test]
    fn test_restore_point_never_zero() {
        let mut volume = VolumeState::new(0.4);
        volume.toggle_mute();
        // Dragging to zero and muting again must keep the old restore point.
        volume.set(0.0);
        volume.toggle_mute();
        assert_eq!(volume.current(), 0.4);
        assert!(volume.previous() > 0.0);
    }

    #[test]
    fn test_set_clamps_and_ignores_nan() {
        let mut volume = VolumeState::default();
        volume.set(1.7);
        assert_eq!(volume.current(), 1.0);
        volume.set(-0.2);
        assert_eq!(volume.current(), 0.0);
        volume.set(f64::NAN);
        assert_eq!(volume.current(), 0.0);
    }

    #[test]
    fn test_volume_level() {
        assert_eq!(VolumeState::new(0.0).level(), VolumeLevel::Muted);
        assert_eq!(VolumeState::new(0.25).level(), VolumeLevel::Low);
        assert_eq!(VolumeState::new(0.9).level(), VolumeLevel::High);
    }
}
