use crate::{
    animation::ease::Ease,
    foundation::beat::Beat,
    foundation::error::{ConvertError, ConvertResult},
    foundation::math::lerp_unclamped,
};

/// One eased transition of a scalar property between two beats.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Keyframe {
    /// Beat at which the transition starts.
    pub start_time: Beat,
    /// Beat at which the transition ends (`>= start_time`).
    pub end_time: Beat,
    /// Value at `start_time`.
    pub start_value: f32,
    /// Value at `end_time`.
    pub end_value: f32,
    /// Easing shape applied to progress.
    pub ease: Ease,
    /// Sub-window of the easing shape, `(0, 1)` for the full curve.
    pub ease_window: (f64, f64),
}

impl Keyframe {
    /// Linear keyframe over the full easing window.
    pub fn new(start_time: Beat, end_time: Beat, start_value: f32, end_value: f32) -> Self {
        Self {
            start_time,
            end_time,
            start_value,
            end_value,
            ease: Ease::Linear,
            ease_window: (0.0, 1.0),
        }
    }

    /// Zero-length keyframe: an instant jump to `value` at `at`.
    pub fn instant(at: Beat, value: f32) -> Self {
        Self::new(at, at, value, value)
    }

    /// Replace the easing shape.
    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    /// Replace the easing window.
    pub fn with_window(mut self, left: f64, right: f64) -> Self {
        self.ease_window = (left, right);
        self
    }

    /// Check beat validity and `start_time <= end_time`.
    pub fn validate(&self) -> ConvertResult<()> {
        self.start_time.validate()?;
        self.end_time.validate()?;
        if self.start_time.to_f64() > self.end_time.to_f64() {
            return Err(ConvertError::beat(format!(
                "keyframe ends ({}) before it starts ({})",
                self.end_time, self.start_time
            )));
        }
        Ok(())
    }

    /// `true` when `start_time <= beat <= end_time`.
    pub fn covers(&self, beat: f64) -> bool {
        self.start_time.to_f64() <= beat && beat <= self.end_time.to_f64()
    }

    /// Interpolated value at `beat`; zero-length keyframes yield `end_value`.
    pub fn value_at(&self, beat: f64) -> f32 {
        let start = self.start_time.to_f64();
        let span = self.end_time.to_f64() - start;
        if span <= 0.0 {
            return self.end_value;
        }
        let t = (beat - start) / span;
        let (left, right) = self.ease_window;
        lerp_unclamped(self.start_value, self.end_value, self.ease.evaluate(left, right, t))
    }
}

/// Keyframes of one property, kept sorted by start beat.
///
/// Insertion is stable: keyframes sharing a start beat stay in insertion order. Next to the keys
/// the track keeps `reach[i]`, the latest end beat among `keys[..=i]`, so coverage queries stay
/// O(log n) even when an early keyframe spans later ones.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct KeyframeTrack {
    keys: Vec<Keyframe>,
    reach: Vec<f64>,
}

impl KeyframeTrack {
    /// Empty track.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a track from keyframes in any order.
    pub fn from_keys(keys: impl IntoIterator<Item = Keyframe>) -> Self {
        let mut keys: Vec<Keyframe> = keys.into_iter().collect();
        keys.sort_by(|a, b| a.start_time.to_f64().total_cmp(&b.start_time.to_f64()));
        let mut track = Self {
            keys,
            reach: Vec::new(),
        };
        track.reindex();
        track
    }

    /// Insert after every keyframe starting at or before `key`.
    pub fn insert(&mut self, key: Keyframe) {
        let start = key.start_time.to_f64();
        let idx = self
            .keys
            .partition_point(|k| k.start_time.to_f64() <= start);
        self.keys.insert(idx, key);
        self.reindex();
    }

    /// Remove and return the keyframe at `index`.
    pub fn remove(&mut self, index: usize) -> Option<Keyframe> {
        if index >= self.keys.len() {
            return None;
        }
        let key = self.keys.remove(index);
        self.reindex();
        Some(key)
    }

    /// Remove every keyframe.
    pub fn clear(&mut self) {
        self.keys.clear();
        self.reach.clear();
    }

    /// Sorted keyframes.
    pub fn keys(&self) -> &[Keyframe] {
        &self.keys
    }

    /// Number of keyframes.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// `true` when the track has no keyframes.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Validate every keyframe.
    pub fn validate(&self) -> ConvertResult<()> {
        self.keys.iter().try_for_each(Keyframe::validate)
    }

    /// Value at `beat`.
    ///
    /// The keyframe with the greatest start beat `<= beat` decides: inside it the value is
    /// interpolated, past its end its `end_value` holds. Before the first keyframe the value is 0.
    pub fn value_at(&self, beat: f64) -> f32 {
        let idx = self.preceding(beat);
        if idx == 0 {
            return 0.0;
        }
        let key = &self.keys[idx - 1];
        if key.covers(beat) {
            key.value_at(beat)
        } else {
            key.end_value
        }
    }

    /// `true` iff some keyframe covers `beat`, both ends inclusive.
    pub fn has_event_at(&self, beat: f64) -> bool {
        let idx = self.preceding(beat);
        idx > 0 && self.reach[idx - 1] >= beat
    }

    /// End beat of the last keyframe, or zero when empty.
    ///
    /// A last keyframe that holds until [`Beat::FAR_FUTURE`] stops animating at its start, which
    /// is reported instead.
    pub fn last_end(&self) -> Beat {
        match self.keys.last() {
            None => Beat::ZERO,
            Some(k) if k.end_time.is_far_future() => k.start_time,
            Some(k) => k.end_time,
        }
    }

    fn preceding(&self, beat: f64) -> usize {
        self.keys
            .partition_point(|k| k.start_time.to_f64() <= beat)
    }

    fn reindex(&mut self) {
        self.reach.clear();
        let mut reach = f64::NEG_INFINITY;
        for key in &self.keys {
            reach = reach.max(key.end_time.to_f64());
            self.reach.push(reach);
        }
    }
}

impl FromIterator<Keyframe> for KeyframeTrack {
    fn from_iter<I: IntoIterator<Item = Keyframe>>(iter: I) -> Self {
        Self::from_keys(iter)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/track.rs"]
mod tests;
