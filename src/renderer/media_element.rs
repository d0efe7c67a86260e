/// Notifications from the native playback primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    /// Position advanced (seconds)
    TimeUpdate(f64),
    /// Duration became available (seconds)
    LoadedMetadata(f64),
    Ended,
    Error(String),
}

/// The native media-playback primitive the transport drives.
pub trait MediaElement {
    fn play(&mut self);
    fn pause(&mut self);
    fn position(&self) -> f64;
    fn set_position(&mut self, seconds: f64);
    fn duration(&self) -> Option<f64>;
    fn set_volume(&mut self, volume: f64);
    /// Drains pending notifications without blocking.
    fn poll_events(&mut self) -> Vec<MediaEvent>;
}
