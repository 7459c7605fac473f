use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::{
    flatten::{FlatSample, FlatTracks},
    foundation::beat::Beat,
    foundation::error::{ConvertError, ConvertResult},
};

fn default_bpm() -> f32 {
    120.0
}

fn default_note_type() -> i32 {
    1
}

fn default_true() -> bool {
    true
}

/// Flat (PhiFans-style) chart: one flat track per property per line.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FlatChart {
    /// Song and chart metadata.
    #[serde(default)]
    pub info: FlatInfo,
    /// Audio offset in milliseconds.
    #[serde(default)]
    pub offset: i32,
    /// Tempo changes.
    #[serde(default)]
    pub bpm: Vec<FlatBpm>,
    /// Judge lines.
    #[serde(default)]
    pub lines: Vec<FlatLine>,
}

/// Flat chart metadata.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FlatInfo {
    /// Song title.
    #[serde(default)]
    pub name: String,
    /// Composer.
    #[serde(default)]
    pub artist: String,
    /// Illustrator.
    #[serde(default)]
    pub illustration: String,
    /// Difficulty label.
    #[serde(default)]
    pub level: String,
    /// Charter.
    #[serde(default)]
    pub designer: String,
}

/// Tempo change at `beat`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FlatBpm {
    /// Beat from which `bpm` applies.
    #[serde(default)]
    pub beat: Beat,
    /// Beats per minute.
    #[serde(default = "default_bpm")]
    pub bpm: f32,
}

/// One flat judge line.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FlatLine {
    /// Property tracks.
    #[serde(default)]
    pub props: FlatTracks,
    /// Notes on this line.
    #[serde(default)]
    pub notes: Vec<FlatNote>,
}

/// One flat note.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FlatNote {
    /// Flat note type: 1 Tap, 2 Drag, 3 Hold, 4 Flick.
    #[serde(rename = "type", default = "default_note_type")]
    pub kind: i32,
    /// Hit beat.
    #[serde(default)]
    pub beat: Beat,
    /// Horizontal position in flat units.
    #[serde(rename = "positionX", default)]
    pub position_x: f32,
    /// Speed multiplier.
    #[serde(default)]
    pub speed: f32,
    /// Falls from above the line.
    #[serde(rename = "isAbove", default = "default_true")]
    pub is_above: bool,
    /// End beat of a hold (equal to `beat` otherwise).
    #[serde(rename = "holdEndBeat", default)]
    pub hold_end_beat: Beat,
}

impl FlatChart {
    /// Parse a flat chart from JSON.
    pub fn from_reader<R: std::io::Read>(r: R) -> ConvertResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| ConvertError::serde(format!("parse flat chart JSON: {e}")))
    }

    /// Parse a flat chart from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ConvertResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ConvertError::validation(format!("open flat chart '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Pretty-printed JSON.
    pub fn to_json_string(&self) -> ConvertResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ConvertError::serde(format!("write flat chart JSON: {e}")))
    }

    /// Check every beat in the chart.
    pub fn validate(&self) -> ConvertResult<()> {
        for bpm in &self.bpm {
            bpm.beat.validate()?;
        }
        for (i, line) in self.lines.iter().enumerate() {
            line.validate().map_err(|e| e.on_line(i))?;
        }
        Ok(())
    }
}

impl FlatLine {
    fn validate(&self) -> ConvertResult<()> {
        let FlatTracks {
            speed,
            position_x,
            position_y,
            rotate,
            alpha,
        } = &self.props;
        [speed, position_x, position_y, rotate, alpha]
            .into_iter()
            .flat_map(|track| track.iter())
            .try_for_each(|s: &FlatSample| s.beat.validate())?;
        for note in &self.notes {
            note.beat.validate()?;
            note.hold_end_beat.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/chart/flat.rs"]
mod tests;
