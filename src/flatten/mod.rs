//! Collapse layered, parented timelines into flat sample tracks and back.

pub(crate) mod expand;
pub(crate) mod resample;

use crate::{
    chart::mapping::DEFAULT_SPEED_RATIO,
    foundation::beat::{Beat, DEFAULT_EPSILON, DEFAULT_MAX_DENOMINATOR},
};

/// One flat-track sample.
///
/// A `continuous` sample is reached by easing from the previous sample; otherwise the value jumps.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FlatSample {
    /// Beat of the sample.
    #[serde(default)]
    pub beat: Beat,
    /// Property value.
    #[serde(default)]
    pub value: f32,
    /// Ease in from the previous sample instead of jumping.
    #[serde(default)]
    pub continuous: bool,
    /// Flat easing id used when `continuous`.
    #[serde(default)]
    pub easing: i32,
}

impl FlatSample {
    /// Jump sample with linear easing.
    pub fn jump(beat: Beat, value: f32) -> Self {
        Self {
            beat,
            value,
            continuous: false,
            easing: 0,
        }
    }

    /// Continuous sample eased with flat easing `easing`.
    pub fn eased(beat: Beat, value: f32, easing: i32) -> Self {
        Self {
            beat,
            value,
            continuous: true,
            easing,
        }
    }
}

/// Flat tracks of one line, in flat units.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FlatTracks {
    /// Scroll speed samples.
    #[serde(default)]
    pub speed: Vec<FlatSample>,
    /// Horizontal position samples.
    #[serde(rename = "positionX", default)]
    pub position_x: Vec<FlatSample>,
    /// Vertical position samples.
    #[serde(rename = "positionY", default)]
    pub position_y: Vec<FlatSample>,
    /// Rotation samples (degrees).
    #[serde(default)]
    pub rotate: Vec<FlatSample>,
    /// Opacity samples.
    #[serde(default)]
    pub alpha: Vec<FlatSample>,
}

impl FlatTracks {
    /// Total sample count over all tracks.
    pub fn sample_count(&self) -> usize {
        self.speed.len()
            + self.position_x.len()
            + self.position_y.len()
            + self.rotate.len()
            + self.alpha.len()
    }
}

/// Numeric knobs of the flattener.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sampling {
    /// Resampling step in beats.
    pub precision: f64,
    /// Layered speed per flat speed unit.
    pub speed_ratio: f32,
    /// Largest denominator tried when reconstructing sample beats.
    pub max_denominator: usize,
    /// Reconstruction tolerance.
    pub epsilon: f64,
}

impl Default for Sampling {
    fn default() -> Self {
        Self {
            precision: 1.0 / 8.0,
            speed_ratio: DEFAULT_SPEED_RATIO,
            max_denominator: DEFAULT_MAX_DENOMINATOR,
            epsilon: DEFAULT_EPSILON,
        }
    }
}

/// Which flattening strategy produced a line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlattenPath {
    /// Keyframes copied one-to-one.
    Direct,
    /// Fixed-step resampling of the resolved timeline.
    Resampled,
}

/// Result of flattening one line.
#[derive(Clone, Debug, PartialEq)]
pub struct FlattenedLine {
    /// Flat tracks.
    pub tracks: FlatTracks,
    /// Strategy used.
    pub path: FlattenPath,
    /// Sample beats whose reconstruction missed the tolerance.
    pub inexact_beats: usize,
}

pub use expand::expand_tracks;
pub use resample::flatten_line;
