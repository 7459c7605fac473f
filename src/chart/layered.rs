use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Deserializer};
use serde_json::{Value, json};

use crate::{
    animation::ease::Ease,
    chart::mapping::LINE_TEXTURE,
    foundation::beat::Beat,
    foundation::error::{ConvertError, ConvertResult},
    timeline::hierarchy::{Line, LineHierarchy},
    timeline::layers::{Layer, LayerStack},
    timeline::track::{Keyframe, KeyframeTrack},
};

/// `RPEVersion` written into converted charts.
pub const RPE_VERSION: i32 = 150;

fn one_f32() -> f32 {
    1.0
}

fn one_i32() -> i32 {
    1
}

fn root_father() -> i32 {
    -1
}

fn default_line_name() -> String {
    "PhiFansLine".to_owned()
}

fn default_texture() -> String {
    LINE_TEXTURE.to_owned()
}

fn default_anchor() -> [f32; 2] {
    [0.5, 0.5]
}

fn default_alpha() -> i32 {
    255
}

fn default_visible_time() -> f32 {
    999_999.0
}

fn empty_object() -> Value {
    json!({})
}

fn control(key: &str, value: f64) -> Vec<Value> {
    [0.0, 9_999_999.0]
        .into_iter()
        .map(|x| json!({ key: value, "easing": 1, "x": x }))
        .collect()
}

fn default_alpha_control() -> Vec<Value> {
    control("alpha", 1.0)
}

fn default_pos_control() -> Vec<Value> {
    control("pos", 1.0)
}

fn default_size_control() -> Vec<Value> {
    control("size", 1.0)
}

fn default_skew_control() -> Vec<Value> {
    control("skew", 0.0)
}

fn default_y_control() -> Vec<Value> {
    control("y", 1.0)
}

fn null_as_default<'de, D, T>(de: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(de)?.unwrap_or_default())
}

fn drop_null_layers<'de, D>(de: D) -> Result<Vec<EventLayer>, D::Error>
where
    D: Deserializer<'de>,
{
    let layers: Option<Vec<Option<EventLayer>>> = Option::deserialize(de)?;
    Ok(layers.unwrap_or_default().into_iter().flatten().collect())
}

/// Layered (RePhiEdit-style) chart: stacked event layers and parented lines.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LayeredChart {
    /// Tempo changes.
    #[serde(rename = "BPMList", default)]
    pub bpm_list: Vec<LayeredBpm>,
    /// Song and chart metadata.
    #[serde(rename = "META", default)]
    pub meta: Meta,
    /// Judge lines; `father` links index into this list.
    #[serde(rename = "judgeLineList", default)]
    pub judge_line_list: Vec<JudgeLine>,
}

/// Tempo change.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LayeredBpm {
    /// Beats per minute.
    #[serde(default)]
    pub bpm: f32,
    /// Beat from which `bpm` applies.
    #[serde(rename = "startTime", default)]
    pub start_time: Beat,
}

/// Layered chart metadata.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Meta {
    /// Editor format version.
    #[serde(rename = "RPEVersion", default)]
    pub rpe_version: i32,
    /// Background image file.
    #[serde(default)]
    pub background: String,
    /// Charter.
    #[serde(default)]
    pub charter: String,
    /// Composer.
    #[serde(default)]
    pub composer: String,
    /// Illustrator.
    #[serde(default)]
    pub illustration: String,
    /// Difficulty label.
    #[serde(default)]
    pub level: String,
    /// Song title.
    #[serde(default)]
    pub name: String,
    /// Audio offset in milliseconds.
    #[serde(default)]
    pub offset: i32,
    /// Audio file.
    #[serde(default)]
    pub song: String,
}

/// One layered judge line.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct JudgeLine {
    /// Display name.
    #[serde(rename = "Name", default = "default_line_name")]
    pub name: String,
    /// Texture file; only `line.png` survives flattening.
    #[serde(rename = "Texture", default = "default_texture")]
    pub texture: String,
    /// Texture anchor.
    #[serde(default = "default_anchor")]
    pub anchor: [f32; 2],
    /// Event layers, summed per property. `null` entries are dropped on load.
    #[serde(
        rename = "eventLayers",
        default,
        deserialize_with = "drop_null_layers"
    )]
    pub event_layers: Vec<EventLayer>,
    /// Parent line index, `-1` for a root line.
    #[serde(default = "root_father")]
    pub father: i32,
    /// Masks notes below the line when 1.
    #[serde(rename = "isCover", default = "one_i32")]
    pub is_cover: i32,
    /// Notes on this line.
    #[serde(default, deserialize_with = "null_as_default")]
    pub notes: Vec<LayeredNote>,
    /// Draw order.
    #[serde(rename = "zOrder", default)]
    pub z_order: i32,
    /// Bound UI element, if any.
    #[serde(rename = "attachUI", default)]
    pub attach_ui: Option<String>,
    /// Texture is an animated GIF.
    #[serde(rename = "isGif", default)]
    pub is_gif: bool,
    /// Per-line BPM multiplier.
    #[serde(default = "one_f32")]
    pub bpmfactor: f32,
    /// Note alpha over distance.
    #[serde(rename = "alphaControl", default = "default_alpha_control")]
    pub alpha_control: Vec<Value>,
    /// Note position over distance.
    #[serde(rename = "posControl", default = "default_pos_control")]
    pub pos_control: Vec<Value>,
    /// Note size over distance.
    #[serde(rename = "sizeControl", default = "default_size_control")]
    pub size_control: Vec<Value>,
    /// Note skew over distance.
    #[serde(rename = "skewControl", default = "default_skew_control")]
    pub skew_control: Vec<Value>,
    /// Note Y over distance.
    #[serde(rename = "yControl", default = "default_y_control")]
    pub y_control: Vec<Value>,
    /// Editor extension data.
    #[serde(default = "empty_object")]
    pub extended: Value,
}

impl Default for JudgeLine {
    fn default() -> Self {
        Self {
            name: default_line_name(),
            texture: default_texture(),
            anchor: default_anchor(),
            event_layers: Vec::new(),
            father: root_father(),
            is_cover: 1,
            notes: Vec::new(),
            z_order: 0,
            attach_ui: None,
            is_gif: false,
            bpmfactor: 1.0,
            alpha_control: default_alpha_control(),
            pos_control: default_pos_control(),
            size_control: default_size_control(),
            skew_control: default_skew_control(),
            y_control: default_y_control(),
            extended: empty_object(),
        }
    }
}

/// One event layer: an event list per property.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EventLayer {
    /// X events.
    #[serde(rename = "moveXEvents", default, deserialize_with = "null_as_default")]
    pub move_x_events: Vec<LayeredEvent>,
    /// Y events.
    #[serde(rename = "moveYEvents", default, deserialize_with = "null_as_default")]
    pub move_y_events: Vec<LayeredEvent>,
    /// Rotation events.
    #[serde(rename = "rotateEvents", default, deserialize_with = "null_as_default")]
    pub rotate_events: Vec<LayeredEvent>,
    /// Opacity events.
    #[serde(rename = "alphaEvents", default, deserialize_with = "null_as_default")]
    pub alpha_events: Vec<LayeredEvent>,
    /// Speed events.
    #[serde(rename = "speedEvents", default, deserialize_with = "null_as_default")]
    pub speed_events: Vec<LayeredEvent>,
}

/// One layered event.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LayeredEvent {
    /// Bezier easing flag (unused by conversion).
    #[serde(default)]
    pub bezier: i32,
    /// Bezier control points (unused by conversion).
    #[serde(rename = "bezierPoints", default)]
    pub bezier_points: [f32; 4],
    /// Left edge of the easing window.
    #[serde(rename = "easingLeft", default)]
    pub easing_left: f32,
    /// Right edge of the easing window.
    #[serde(rename = "easingRight", default = "one_f32")]
    pub easing_right: f32,
    /// Layered easing id.
    #[serde(rename = "easingType", default = "one_i32")]
    pub easing_type: i32,
    /// Start value.
    #[serde(default)]
    pub start: f32,
    /// End value.
    #[serde(default)]
    pub end: f32,
    /// Start beat.
    #[serde(rename = "startTime", default)]
    pub start_time: Beat,
    /// End beat.
    #[serde(rename = "endTime", default)]
    pub end_time: Beat,
}

/// One layered note.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LayeredNote {
    /// 1 when the note falls from above the line, 2 from below.
    #[serde(default = "one_i32")]
    pub above: i32,
    /// Opacity, 0..=255.
    #[serde(default = "default_alpha")]
    pub alpha: i32,
    /// Hit beat.
    #[serde(rename = "startTime", default)]
    pub start_time: Beat,
    /// End beat (holds).
    #[serde(rename = "endTime", default)]
    pub end_time: Beat,
    /// Non-zero for decorative notes that are never judged.
    #[serde(rename = "isFake", default)]
    pub is_fake: i32,
    /// Horizontal position in layered units.
    #[serde(rename = "positionX", default)]
    pub position_x: f32,
    /// Width multiplier.
    #[serde(default = "one_f32")]
    pub size: f32,
    /// Speed multiplier.
    #[serde(alias = "Speed", default = "one_f32")]
    pub speed: f32,
    /// Layered note type: 1 Tap, 2 Hold, 3 Flick, 4 Drag.
    #[serde(rename = "type", default = "one_i32")]
    pub kind: i32,
    /// Seconds the note is visible before its hit time.
    #[serde(rename = "visibleTime", default = "default_visible_time")]
    pub visible_time: f32,
    /// Vertical offset.
    #[serde(rename = "yOffset", default)]
    pub y_offset: f32,
    /// Custom hit sound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hitsound: Option<String>,
}

impl Default for LayeredNote {
    fn default() -> Self {
        Self {
            above: 1,
            alpha: default_alpha(),
            start_time: Beat::ZERO,
            end_time: Beat::ZERO,
            is_fake: 0,
            position_x: 0.0,
            size: 1.0,
            speed: 1.0,
            kind: 1,
            visible_time: default_visible_time(),
            y_offset: 0.0,
            hitsound: None,
        }
    }
}

impl LayeredEvent {
    /// Runtime keyframe for this event.
    pub fn to_keyframe(&self) -> ConvertResult<Keyframe> {
        let key = Keyframe::new(self.start_time, self.end_time, self.start, self.end)
            .with_ease(Ease::from_id(self.easing_type))
            .with_window(f64::from(self.easing_left), f64::from(self.easing_right));
        key.validate()?;
        Ok(key)
    }

    /// Event for a runtime keyframe.
    pub fn from_keyframe(key: &Keyframe) -> Self {
        Self {
            bezier: 0,
            bezier_points: [0.0; 4],
            easing_left: key.ease_window.0 as f32,
            easing_right: key.ease_window.1 as f32,
            easing_type: key.ease.id(),
            start: key.start_value,
            end: key.end_value,
            start_time: key.start_time,
            end_time: key.end_time,
        }
    }
}

fn to_track(events: &[LayeredEvent]) -> ConvertResult<KeyframeTrack> {
    events
        .iter()
        .map(LayeredEvent::to_keyframe)
        .collect::<ConvertResult<Vec<_>>>()
        .map(KeyframeTrack::from_keys)
}

fn from_track(track: &KeyframeTrack) -> Vec<LayeredEvent> {
    track.keys().iter().map(LayeredEvent::from_keyframe).collect()
}

impl EventLayer {
    /// Runtime layer; fails on malformed beats or reversed events.
    pub fn to_layer(&self) -> ConvertResult<Layer> {
        Ok(Layer {
            move_x: to_track(&self.move_x_events)?,
            move_y: to_track(&self.move_y_events)?,
            rotate: to_track(&self.rotate_events)?,
            alpha: to_track(&self.alpha_events)?,
            speed: to_track(&self.speed_events)?,
        })
    }

    /// Event layer for a runtime layer.
    pub fn from_layer(layer: &Layer) -> Self {
        Self {
            move_x_events: from_track(&layer.move_x),
            move_y_events: from_track(&layer.move_y),
            rotate_events: from_track(&layer.rotate),
            alpha_events: from_track(&layer.alpha),
            speed_events: from_track(&layer.speed),
        }
    }
}

impl JudgeLine {
    /// Parent index, or `None` for a root line (any negative `father`).
    pub fn parent(&self) -> Option<usize> {
        usize::try_from(self.father).ok()
    }

    /// Runtime line.
    pub fn to_line(&self) -> ConvertResult<Line> {
        let layers = self
            .event_layers
            .iter()
            .map(EventLayer::to_layer)
            .collect::<ConvertResult<Vec<_>>>()?;
        Ok(Line {
            parent: self.parent(),
            layers: LayerStack::from_layers(layers),
        })
    }
}

impl LayeredChart {
    /// Parse a layered chart from JSON.
    pub fn from_reader<R: std::io::Read>(r: R) -> ConvertResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| ConvertError::serde(format!("parse layered chart JSON: {e}")))
    }

    /// Parse a layered chart from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ConvertResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ConvertError::validation(format!("open layered chart '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Pretty-printed JSON.
    pub fn to_json_string(&self) -> ConvertResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ConvertError::serde(format!("write layered chart JSON: {e}")))
    }

    /// Check tempo and note beats. Event beats are checked by [`LayeredChart::hierarchy`].
    pub fn validate(&self) -> ConvertResult<()> {
        for bpm in &self.bpm_list {
            bpm.start_time.validate()?;
        }
        for (i, line) in self.judge_line_list.iter().enumerate() {
            line.notes
                .iter()
                .try_for_each(|note| {
                    note.start_time.validate()?;
                    note.end_time.validate()
                })
                .map_err(|e| e.on_line(i))?;
        }
        Ok(())
    }

    /// Build the runtime line hierarchy, validating beats and parent links.
    pub fn hierarchy(&self) -> ConvertResult<LineHierarchy> {
        let lines = self
            .judge_line_list
            .iter()
            .enumerate()
            .map(|(i, line)| line.to_line().map_err(|e| e.on_line(i)))
            .collect::<ConvertResult<Vec<_>>>()?;
        LineHierarchy::from_lines(lines)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/chart/layered.rs"]
mod tests;
