use std::fmt;

/// Non-fatal representational loss found during a conversion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConversionWarning {
    /// Line has more than one event layer; it was resampled.
    MultipleLayers {
        /// Judge line index.
        line: usize,
        /// Number of event layers.
        layers: usize,
    },
    /// Line has a parent; it was resampled in absolute coordinates.
    NestedParent {
        /// Judge line index.
        line: usize,
        /// Parent line index.
        parent: usize,
    },
    /// Line texture cannot be expressed in the flat schema.
    UnsupportedTexture {
        /// Judge line index.
        line: usize,
        /// Texture name.
        texture: String,
    },
    /// Fake note converted as a real one.
    FakeNote {
        /// Judge line index.
        line: usize,
        /// Note index within the line.
        note: usize,
    },
    /// Resampled beats that only approximate the sampling grid.
    InexactBeats {
        /// Number of affected sample beats over the whole chart.
        count: usize,
    },
}

impl fmt::Display for ConversionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MultipleLayers { line, layers } => {
                write!(f, "line {line}: {layers} event layers merged by resampling")
            }
            Self::NestedParent { line, parent } => {
                write!(f, "line {line}: parent line {parent} baked into absolute motion")
            }
            Self::UnsupportedTexture { line, texture } => {
                write!(f, "line {line}: unsupported texture '{texture}'")
            }
            Self::FakeNote { line, note } => {
                write!(f, "line {line}: note {note} is fake and becomes a real note")
            }
            Self::InexactBeats { count } => {
                write!(f, "{count} sample beats could not be reconstructed exactly")
            }
        }
    }
}

/// Everything a conversion reports besides its output.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConversionReport {
    /// Warnings in line order; the inexact-beat summary comes last.
    pub warnings: Vec<ConversionWarning>,
    /// Lines flattened by resampling.
    pub resampled_lines: usize,
    /// Lines whose keyframes were copied directly.
    pub direct_lines: usize,
}

impl ConversionReport {
    /// `true` when the conversion was lossless as far as the report can tell.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    pub(crate) fn warn(&mut self, warning: ConversionWarning) {
        tracing::warn!(%warning, "conversion warning");
        self.warnings.push(warning);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/convert/report.rs"]
mod tests;
