/// Convenience result type used across phichart.
pub type ConvertResult<T> = Result<T, ConvertError>;

/// Top-level error taxonomy used by engine and conversion APIs.
///
/// Only structural problems are errors. Lossy-but-representable input (extra layers, parented
/// lines, fake notes) is reported through [`crate::ConversionReport`] instead.
#[derive(thiserror::Error, Debug)]
pub enum ConvertError {
    /// Broken line hierarchy: cycle or parent index out of range.
    #[error("structure error on line {line}: {msg}")]
    Structure {
        /// Index of the offending judge line.
        line: usize,
        /// Human-readable description.
        msg: String,
    },

    /// Malformed rational beat (zero or negative denominator, negative parts).
    #[error("beat error: {0}")]
    Beat(String),

    /// Invalid options or user-provided data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing chart JSON.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ConvertError {
    /// Build a [`ConvertError::Structure`] value for `line`.
    pub fn structure(line: usize, msg: impl Into<String>) -> Self {
        Self::Structure {
            line,
            msg: msg.into(),
        }
    }

    /// Build a [`ConvertError::Beat`] value.
    pub fn beat(msg: impl Into<String>) -> Self {
        Self::Beat(msg.into())
    }

    /// Build a [`ConvertError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ConvertError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Attach a judge line index to a beat error; other variants pass through unchanged.
    pub(crate) fn on_line(self, line: usize) -> Self {
        match self {
            Self::Beat(msg) => Self::structure(line, msg),
            other => other,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
