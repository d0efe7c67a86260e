use eframe::egui;

use crate::ops::slider_math::{TrackGeometry, fill_fraction, value_at};

const TRACK_HEIGHT: f32 = 8.0;
const ACTIVE_SCALE: f32 = 1.5;

/// A pointer gesture in flight. Held from press until release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    last_x: f32,
}

/// Slider state that persists between frames.
///
/// The locally mirrored value lets the fill follow the pointer before the
/// owner has applied the change; it is reconciled with the owner's value
/// whenever that value changes on its own (e.g. playback advancing).
#[derive(Debug, Default)]
pub struct SliderState {
    value: f64,
    authoritative: Option<f64>,
    drag: Option<DragSession>,
}

impl SliderState {
    pub fn new(value: f64) -> Self {
        Self {
            value,
            authoritative: Some(value),
            drag: None,
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Reconcile with the owner's value if it changed since we last saw it.
    pub fn sync(&mut self, external: f64) {
        if self.authoritative != Some(external) {
            self.authoritative = Some(external);
            self.value = external;
        }
    }

    /// Starts a gesture and reports the value under the pointer.
    pub fn press(&mut self, x: f32, track: TrackGeometry, min: f64, max: f64) -> Option<f64> {
        self.drag = Some(DragSession { last_x: x });
        self.apply(x, track, min, max)
    }

    /// Reports a new value while a gesture is held and the pointer moved.
    pub fn drag_to(&mut self, x: f32, track: TrackGeometry, min: f64, max: f64) -> Option<f64> {
        let session = self.drag.as_mut()?;
        if session.last_x == x {
            return None;
        }
        session.last_x = x;
        self.apply(x, track, min, max)
    }

    pub fn release(&mut self) {
        self.drag = None;
    }

    /// Drops a gesture that never saw its release (widget torn down mid-drag).
    pub fn force_release(&mut self) {
        if self.drag.take().is_some() {
            tracing::debug!("slider released while dragging");
        }
    }

    fn apply(&mut self, x: f32, track: TrackGeometry, min: f64, max: f64) -> Option<f64> {
        let value = value_at(x, track, min, max)?;
        self.value = value;
        Some(value)
    }
}

impl Drop for SliderState {
    fn drop(&mut self) {
        self.force_release();
    }
}

/// Draggable range control. Returns the new value when the pointer changed it.
pub struct Slider<'a> {
    state: &'a mut SliderState,
    value: f64,
    min: f64,
    max: f64,
}

impl<'a> Slider<'a> {
    pub fn new(state: &'a mut SliderState, value: f64, min: f64, max: f64) -> Self {
        Self {
            state,
            value,
            min,
            max,
        }
    }

    pub fn show(self, ui: &mut egui::Ui) -> (egui::Response, Option<f64>) {
        let Self {
            state,
            value,
            min,
            max,
        } = self;
        state.sync(value);

        let desired = egui::vec2(ui.available_width(), TRACK_HEIGHT * ACTIVE_SCALE);
        let (rect, response) = ui.allocate_exact_size(desired, egui::Sense::click_and_drag());
        let track = TrackGeometry::new(rect.left(), rect.width());

        // Set while held, and also on the frame of a click or drag stop, so
        // a press and release arriving in one frame still count as a press.
        let mut changed = None;
        if let Some(pos) = response.interact_pointer_pos() {
            changed = if state.is_dragging() {
                state.drag_to(pos.x, track, min, max)
            } else {
                state.press(pos.x, track, min, max)
            };
        }
        if !response.is_pointer_button_down_on() {
            state.release();
        }

        if ui.is_rect_visible(rect) {
            let height = if state.is_dragging() {
                TRACK_HEIGHT * ACTIVE_SCALE
            } else {
                TRACK_HEIGHT
            };
            let bar = egui::Rect::from_center_size(rect.center(), egui::vec2(rect.width(), height));
            let visuals = ui.visuals();
            let fill_color = if response.hovered() || state.is_dragging() {
                visuals.strong_text_color()
            } else {
                visuals.text_color()
            };

            let painter = ui.painter();
            painter.rect_filled(bar, height / 2.0, visuals.extreme_bg_color);
            let fraction = fill_fraction(state.value(), min, max);
            if fraction > 0.0 {
                let filled = egui::Rect::from_min_size(
                    bar.min,
                    egui::vec2(bar.width() * fraction, bar.height()),
                );
                painter.rect_filled(filled, height / 2.0, fill_color);
            }
        }

        (response, changed)
    }
}
