use crate::{foundation::beat::Beat, timeline::track::KeyframeTrack};

/// Animated scalar property of a judge line layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Property {
    /// Horizontal offset.
    MoveX,
    /// Vertical offset.
    MoveY,
    /// Rotation in degrees.
    Rotate,
    /// Opacity.
    Alpha,
    /// Note scroll speed.
    Speed,
}

impl Property {
    /// Every property.
    pub const ALL: [Property; 5] = [
        Self::MoveX,
        Self::MoveY,
        Self::Rotate,
        Self::Alpha,
        Self::Speed,
    ];

    /// Properties that contribute to a line's animation horizon (speed does not).
    pub const ANIMATED: [Property; 4] = [Self::MoveX, Self::MoveY, Self::Rotate, Self::Alpha];
}

/// One event layer: a keyframe track per property.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Layer {
    /// Horizontal offset track.
    pub move_x: KeyframeTrack,
    /// Vertical offset track.
    pub move_y: KeyframeTrack,
    /// Rotation track (degrees).
    pub rotate: KeyframeTrack,
    /// Opacity track.
    pub alpha: KeyframeTrack,
    /// Speed track.
    pub speed: KeyframeTrack,
}

impl Layer {
    /// Track for `prop`.
    pub fn track(&self, prop: Property) -> &KeyframeTrack {
        match prop {
            Property::MoveX => &self.move_x,
            Property::MoveY => &self.move_y,
            Property::Rotate => &self.rotate,
            Property::Alpha => &self.alpha,
            Property::Speed => &self.speed,
        }
    }

    /// Mutable track for `prop`.
    pub fn track_mut(&mut self, prop: Property) -> &mut KeyframeTrack {
        match prop {
            Property::MoveX => &mut self.move_x,
            Property::MoveY => &mut self.move_y,
            Property::Rotate => &mut self.rotate,
            Property::Alpha => &mut self.alpha,
            Property::Speed => &mut self.speed,
        }
    }

    /// `true` when no track holds a keyframe.
    pub fn is_empty(&self) -> bool {
        Property::ALL.iter().all(|p| self.track(*p).is_empty())
    }
}

/// Ordered event layers of one line; a property's value is the sum over layers.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayerStack {
    layers: Vec<Layer>,
}

impl LayerStack {
    /// Empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stack over `layers`, in order.
    pub fn from_layers(layers: Vec<Layer>) -> Self {
        Self { layers }
    }

    /// Append a layer.
    pub fn push(&mut self, layer: Layer) {
        self.layers.push(layer);
    }

    /// Layers in order.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Layer at `index`.
    pub fn get(&self, index: usize) -> Option<&Layer> {
        self.layers.get(index)
    }

    /// Number of layers.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// `true` when the stack has no layers.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Sum of `prop` over all layers at `beat`; zero for an empty stack.
    pub fn value_at(&self, prop: Property, beat: f64) -> f32 {
        self.layers
            .iter()
            .map(|l| l.track(prop).value_at(beat))
            .sum()
    }

    /// `true` when any layer's `prop` track covers `beat`.
    pub fn has_event_at(&self, prop: Property, beat: f64) -> bool {
        self.layers.iter().any(|l| l.track(prop).has_event_at(beat))
    }

    /// Summed horizontal offset.
    pub fn x_at(&self, beat: f64) -> f32 {
        self.value_at(Property::MoveX, beat)
    }

    /// Summed vertical offset.
    pub fn y_at(&self, beat: f64) -> f32 {
        self.value_at(Property::MoveY, beat)
    }

    /// Summed rotation in degrees.
    pub fn angle_at(&self, beat: f64) -> f32 {
        self.value_at(Property::Rotate, beat)
    }

    /// Summed opacity.
    pub fn alpha_at(&self, beat: f64) -> f32 {
        self.value_at(Property::Alpha, beat)
    }

    /// Summed speed.
    pub fn speed_at(&self, beat: f64) -> f32 {
        self.value_at(Property::Speed, beat)
    }

    /// Any layer moves X at `beat`.
    pub fn has_x_event_at(&self, beat: f64) -> bool {
        self.has_event_at(Property::MoveX, beat)
    }

    /// Any layer moves Y at `beat`.
    pub fn has_y_event_at(&self, beat: f64) -> bool {
        self.has_event_at(Property::MoveY, beat)
    }

    /// Any layer rotates at `beat`.
    pub fn has_angle_event_at(&self, beat: f64) -> bool {
        self.has_event_at(Property::Rotate, beat)
    }

    /// Any layer fades at `beat`.
    pub fn has_alpha_event_at(&self, beat: f64) -> bool {
        self.has_event_at(Property::Alpha, beat)
    }

    /// Latest [`KeyframeTrack::last_end`] over the animated properties of every layer.
    pub fn last_event_end(&self) -> Beat {
        self.layers
            .iter()
            .flat_map(|l| Property::ANIMATED.iter().map(|p| l.track(*p).last_end()))
            .max_by(|a, b| a.to_f64().total_cmp(&b.to_f64()))
            .unwrap_or(Beat::ZERO)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/layers.rs"]
mod tests;
