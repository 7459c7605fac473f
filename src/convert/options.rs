use crate::{
    chart::mapping::DEFAULT_SPEED_RATIO,
    flatten::Sampling,
    foundation::beat::{DEFAULT_EPSILON, DEFAULT_MAX_DENOMINATOR},
    foundation::error::{ConvertError, ConvertResult},
};

/// Tunables for chart conversion.
#[derive(Clone, Debug, PartialEq)]
pub struct ConvertOptions {
    /// Resampling step in beats for lines that cannot be copied directly.
    pub precision: f64,
    /// Layered speed per flat speed unit.
    pub speed_ratio: f32,
    /// Largest denominator tried when reconstructing sample beats.
    pub max_denominator: usize,
    /// Reconstruction tolerance.
    pub epsilon: f64,
    /// Flatten lines on a rayon pool instead of one after another.
    pub parallel: bool,
    /// Pool size; `None` lets rayon decide.
    pub threads: Option<usize>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            precision: 1.0 / 8.0,
            speed_ratio: DEFAULT_SPEED_RATIO,
            max_denominator: DEFAULT_MAX_DENOMINATOR,
            epsilon: DEFAULT_EPSILON,
            parallel: true,
            threads: None,
        }
    }
}

impl ConvertOptions {
    /// Reject settings no conversion can run with.
    pub fn validate(&self) -> ConvertResult<()> {
        if !(self.precision.is_finite() && self.precision > 0.0) {
            return Err(ConvertError::validation(format!(
                "precision must be > 0 (got {})",
                self.precision
            )));
        }
        if !(self.speed_ratio.is_finite() && self.speed_ratio > 0.0) {
            return Err(ConvertError::validation(format!(
                "speed_ratio must be > 0 (got {})",
                self.speed_ratio
            )));
        }
        if self.max_denominator == 0 {
            return Err(ConvertError::validation("max_denominator must be >= 1"));
        }
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return Err(ConvertError::validation(format!(
                "epsilon must be > 0 (got {})",
                self.epsilon
            )));
        }
        if self.threads == Some(0) {
            return Err(ConvertError::validation(
                "'threads' must be >= 1 when set",
            ));
        }
        Ok(())
    }

    pub(crate) fn sampling(&self) -> Sampling {
        Sampling {
            precision: self.precision,
            speed_ratio: self.speed_ratio,
            max_denominator: self.max_denominator,
            epsilon: self.epsilon,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/convert/options.rs"]
mod tests;
