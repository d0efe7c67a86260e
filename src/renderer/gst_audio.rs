use crate::error::MediaError;
use crate::renderer::media_element::{MediaElement, MediaEvent};
use gst::prelude::*;
use gstreamer as gst;
use std::path::Path;

// Helper function to convert a path to a file URI for GStreamer
#[cfg(windows)]
fn path_to_file_uri(path: &str) -> String {
    // Remove UNC prefix if present
    let mut path = path.replace('\\', "/");
    if let Some(stripped) = path.strip_prefix("//?/") {
        path = stripped.to_string();
    }
    format!("file:///{}", path)
}

#[cfg(not(windows))]
fn path_to_file_uri(path: &str) -> String {
    format!("file://{}", path)
}

fn to_clock_time(seconds: f64) -> gst::ClockTime {
    gst::ClockTime::from_nseconds((seconds.max(0.0) * 1_000_000_000.0) as u64)
}

fn to_seconds(time: gst::ClockTime) -> f64 {
    time.nseconds() as f64 / 1_000_000_000.0
}

/// Transport bookkeeping for the pipeline, kept apart from GStreamer calls.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
struct PlayheadFlags {
    playing: bool,
    ended: bool,
}

impl PlayheadFlags {
    /// After EOS the pipeline is parked in `Paused`. A flushing seek would
    /// otherwise restart a pipeline still in `Playing`.
    fn end_of_stream(&mut self) -> gst::State {
        self.playing = false;
        self.ended = true;
        gst::State::Paused
    }

    /// Returns true when playback has to start over from 0.
    fn play(&mut self) -> bool {
        let rewind = self.ended;
        self.ended = false;
        self.playing = true;
        rewind
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn seeked(&mut self) {
        self.ended = false;
    }
}

/// Plays a single audio file through a `playbin` pipeline.
pub struct GstAudioElement {
    playbin: gst::Element,
    bus: Option<gst::Bus>,
    flags: PlayheadFlags,
    reported_duration: Option<f64>,
}

impl GstAudioElement {
    pub fn open(path: &Path) -> Result<Self, MediaError> {
        gst::init()?;

        let abs_path =
            std::fs::canonicalize(path).map_err(|_| MediaError::FileNotFound(path.to_path_buf()))?;
        let uri = path_to_file_uri(&abs_path.to_string_lossy());
        tracing::debug!(%uri, "opening playbin");

        let playbin = gst::ElementFactory::make("playbin")
            .property("uri", uri.as_str())
            .build()?;

        // Preroll so the duration becomes queryable without starting playback.
        playbin.set_state(gst::State::Paused)?;
        let bus = playbin.bus();

        Ok(Self {
            playbin,
            bus,
            flags: PlayheadFlags::default(),
            reported_duration: None,
        })
    }

    fn set_state(&self, state: gst::State) {
        if let Err(err) = self.playbin.set_state(state) {
            tracing::warn!(?state, error = %err, "playbin state change failed");
        }
    }

    /// Emits `LoadedMetadata` once per distinct duration value.
    fn check_duration(&mut self, events: &mut Vec<MediaEvent>) {
        if let Some(duration) = self.duration() {
            if self.reported_duration != Some(duration) {
                self.reported_duration = Some(duration);
                events.push(MediaEvent::LoadedMetadata(duration));
            }
        }
    }
}

impl MediaElement for GstAudioElement {
    fn play(&mut self) {
        // Like a media element, playing after the end starts over.
        if self.flags.play() {
            self.set_position(0.0);
        }
        self.set_state(gst::State::Playing);
    }

    fn pause(&mut self) {
        self.set_state(gst::State::Paused);
        self.flags.pause();
    }

    fn position(&self) -> f64 {
        self.playbin
            .query_position::<gst::ClockTime>()
            .map(to_seconds)
            .unwrap_or(0.0)
    }

    fn set_position(&mut self, seconds: f64) {
        self.flags.seeked();
        let seek = self.playbin.seek_simple(
            gst::SeekFlags::FLUSH | gst::SeekFlags::ACCURATE,
            to_clock_time(seconds),
        );
        if let Err(err) = seek {
            tracing::warn!(seconds, error = %err, "seek failed");
        }
    }

    fn duration(&self) -> Option<f64> {
        self.playbin
            .query_duration::<gst::ClockTime>()
            .map(to_seconds)
    }

    fn set_volume(&mut self, volume: f64) {
        self.playbin.set_property("volume", volume.clamp(0.0, 1.0));
    }

    fn poll_events(&mut self) -> Vec<MediaEvent> {
        let mut events = Vec::new();

        let messages: Vec<gst::Message> = match &self.bus {
            Some(bus) => std::iter::from_fn(|| bus.pop()).collect(),
            None => Vec::new(),
        };

        for msg in messages {
            use gst::MessageView;
            match msg.view() {
                MessageView::Eos(..) => {
                    let parked = self.flags.end_of_stream();
                    self.set_state(parked);
                    events.push(MediaEvent::TimeUpdate(self.position()));
                    events.push(MediaEvent::Ended);
                }
                MessageView::DurationChanged(..) | MessageView::AsyncDone(..) => {
                    self.check_duration(&mut events);
                }
                MessageView::Error(err) => {
                    self.flags.pause();
                    events.push(MediaEvent::Error(format!(
                        "{} ({:?})",
                        err.error(),
                        err.debug()
                    )));
                }
                _ => (),
            }
        }

        if self.reported_duration.is_none() {
            self.check_duration(&mut events);
        }
        if self.flags.playing {
            events.push(MediaEvent::TimeUpdate(self.position()));
        }
        events
    }
}

impl Drop for GstAudioElement {
    fn drop(&mut self) {
        self.set_state(gst::State::Null);
    }
}
