/// Horizontal extent of a slider track in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackGeometry {
    pub left: f32,
    pub width: f32,
}

impl TrackGeometry {
    pub fn new(left: f32, width: f32) -> Self {
        Self { left, width }
    }

    pub fn is_usable(&self) -> bool {
        self.width.is_finite() && self.width > 0.0 && self.left.is_finite()
    }

    /// Pointer x that corresponds to `value` within `[min, max]`.
    #[cfg(test)]
    pub fn x_for_value(&self, value: f64, min: f64, max: f64) -> f32 {
        self.left + self.width * fill_fraction(value, min, max)
    }
}

/// Maps a pointer x onto `[min, max]` by linear interpolation, clamped.
/// Returns `None` for a degenerate track so the caller keeps its previous value.
pub fn value_at(pointer_x: f32, track: TrackGeometry, min: f64, max: f64) -> Option<f64> {
    if !track.is_usable() || !pointer_x.is_finite() {
        return None;
    }
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    let ratio = f64::from(pointer_x - track.left) / f64::from(track.width);
    let value = ratio * (max - min) + min;
    Some(value.clamp(lo, hi))
}

/// Portion of the track to paint as filled, in `[0, 1]`.
pub fn fill_fraction(value: f64, min: f64, max: f64) -> f32 {
    let span = max - min;
    if !span.is_finite() || span == 0.0 || !value.is_finite() {
        return 0.0;
    }
    (((value - min) / span) as f32).clamp(0.0, 1.0)
}
