//! JSON boundary models of both chart schemas.

pub(crate) mod flat;
pub(crate) mod layered;
pub(crate) mod mapping;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::error::{ConvertError, ConvertResult};

use self::{flat::FlatChart, layered::LayeredChart};

/// Which schema a chart document uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChartFormat {
    /// Flat (PhiFans-style) schema, keyed by `lines`.
    Flat,
    /// Layered (RePhiEdit-style) schema, keyed by `judgeLineList`.
    Layered,
}

impl ChartFormat {
    /// Detect the schema of a parsed JSON document from its top-level keys.
    pub fn detect(doc: &serde_json::Value) -> ConvertResult<Self> {
        let obj = doc
            .as_object()
            .ok_or_else(|| ConvertError::validation("chart JSON must be an object"))?;
        if obj.contains_key("judgeLineList") {
            Ok(Self::Layered)
        } else if obj.contains_key("lines") {
            Ok(Self::Flat)
        } else {
            Err(ConvertError::validation(
                "unrecognized chart: expected a `judgeLineList` or `lines` key",
            ))
        }
    }
}

/// A chart of either schema.
#[derive(Clone, Debug, PartialEq)]
pub enum Chart {
    /// Flat chart.
    Flat(FlatChart),
    /// Layered chart.
    Layered(LayeredChart),
}

impl Chart {
    /// Parse JSON of either schema.
    pub fn from_reader<R: std::io::Read>(r: R) -> ConvertResult<Self> {
        let doc: serde_json::Value = serde_json::from_reader(r)
            .map_err(|e| ConvertError::serde(format!("parse chart JSON: {e}")))?;
        match ChartFormat::detect(&doc)? {
            ChartFormat::Flat => serde_json::from_value(doc)
                .map(Self::Flat)
                .map_err(|e| ConvertError::serde(format!("parse flat chart JSON: {e}"))),
            ChartFormat::Layered => serde_json::from_value(doc)
                .map(Self::Layered)
                .map_err(|e| ConvertError::serde(format!("parse layered chart JSON: {e}"))),
        }
    }

    /// Parse a JSON file of either schema.
    pub fn from_path(path: impl AsRef<Path>) -> ConvertResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ConvertError::validation(format!("open chart '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Schema of this chart.
    pub fn format(&self) -> ChartFormat {
        match self {
            Self::Flat(_) => ChartFormat::Flat,
            Self::Layered(_) => ChartFormat::Layered,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/chart/mod.rs"]
mod tests;
