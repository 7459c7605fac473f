use std::fmt;

use crate::foundation::error::{ConvertError, ConvertResult};

/// Largest denominator tried by [`Beat::reconstruct`] by default.
pub const DEFAULT_MAX_DENOMINATOR: usize = 10_000;
/// Acceptance tolerance used by [`Beat::reconstruct`] by default.
pub const DEFAULT_EPSILON: f64 = 1e-6;

/// Exact musical time `whole + numerator / denominator`.
///
/// Both chart schemas store beats as a three-element JSON array. The fraction does not have to be
/// reduced and `numerator` may exceed `denominator`; only [`Beat::to_f64`] carries meaning.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "[i64; 3]", into = "[i64; 3]")]
pub struct Beat {
    /// Whole beats.
    pub whole: i64,
    /// Fraction numerator (`>= 0`).
    pub numerator: i64,
    /// Fraction denominator (`> 0`).
    pub denominator: i64,
}

impl Beat {
    /// Beat zero, `[0, 0, 1]`.
    pub const ZERO: Self = Self {
        whole: 0,
        numerator: 0,
        denominator: 1,
    };

    /// Far-future beat `[9999999, 0, 1]` marking a keyframe that holds until superseded.
    pub const FAR_FUTURE: Self = Self {
        whole: 9_999_999,
        numerator: 0,
        denominator: 1,
    };

    /// Create a validated beat.
    pub fn new(whole: i64, numerator: i64, denominator: i64) -> ConvertResult<Self> {
        let beat = Self {
            whole,
            numerator,
            denominator,
        };
        beat.validate()?;
        Ok(beat)
    }

    /// Integral beat `[whole, 0, 1]`.
    pub fn from_whole(whole: i64) -> Self {
        Self {
            whole,
            numerator: 0,
            denominator: 1,
        }
    }

    /// Check the `denominator > 0`, non-negative parts invariant.
    pub fn validate(&self) -> ConvertResult<()> {
        if self.denominator <= 0 {
            return Err(ConvertError::beat(format!(
                "beat {self} has denominator {} (must be > 0)",
                self.denominator
            )));
        }
        if self.whole < 0 || self.numerator < 0 {
            return Err(ConvertError::beat(format!(
                "beat {self} has a negative component"
            )));
        }
        Ok(())
    }

    /// Floating approximation `whole + numerator / denominator`.
    pub fn to_f64(self) -> f64 {
        self.whole as f64 + self.numerator as f64 / self.denominator as f64
    }

    /// Single-precision approximation, the unit all evaluators work in.
    pub fn to_f32(self) -> f32 {
        self.to_f64() as f32
    }

    /// `true` for [`Beat::FAR_FUTURE`] (compared by value).
    pub fn is_far_future(self) -> bool {
        self.to_f64() >= Self::FAR_FUTURE.to_f64()
    }

    /// Reconstruct a beat from a sampled floating value.
    ///
    /// Denominators are tried in ascending order from 1 to `max_denominator`. Among all
    /// `(whole, numerator, denominator)` triples within `epsilon` of `value`, the one with the
    /// smallest component sum wins; ties keep the first found. When nothing lands within
    /// `epsilon` the closest triple is returned with `exact == false`.
    pub fn reconstruct(value: f64, max_denominator: usize, epsilon: f64) -> Reconstructed {
        if !value.is_finite() || value < 0.0 {
            return Reconstructed {
                beat: Self::ZERO,
                exact: false,
            };
        }

        let max_den = i64::try_from(max_denominator.max(1)).unwrap_or(i64::MAX);
        let mut best: Option<(i64, Beat)> = None;
        let mut closest: Option<(f64, Beat)> = None;

        for den in 1..=max_den {
            // Accepted triples share `whole`, and the fraction part here is at least `den`.
            if let Some((_, found)) = best
                && den >= found.numerator + found.denominator
            {
                break;
            }

            let scaled = (value * den as f64).round();
            if scaled > i64::MAX as f64 {
                break;
            }
            let total = scaled as i64;
            let candidate = Beat {
                whole: total.div_euclid(den),
                numerator: total.rem_euclid(den),
                denominator: den,
            };
            let err = (candidate.to_f64() - value).abs();

            if err < epsilon {
                let sum = candidate.whole + candidate.numerator + candidate.denominator;
                if best.is_none_or(|(best_sum, _)| sum < best_sum) {
                    best = Some((sum, candidate));
                }
            } else if closest.is_none_or(|(best_err, _)| err < best_err) {
                closest = Some((err, candidate));
            }
        }

        match (best, closest) {
            (Some((_, beat)), _) => Reconstructed { beat, exact: true },
            (None, Some((_, beat))) => Reconstructed { beat, exact: false },
            (None, None) => Reconstructed {
                beat: Self::ZERO,
                exact: false,
            },
        }
    }

    /// [`Beat::reconstruct`] with the default denominator bound and tolerance.
    pub fn reconstruct_default(value: f64) -> Reconstructed {
        Self::reconstruct(value, DEFAULT_MAX_DENOMINATOR, DEFAULT_EPSILON)
    }
}

impl Default for Beat {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<[i64; 3]> for Beat {
    fn from(v: [i64; 3]) -> Self {
        Self {
            whole: v[0],
            numerator: v[1],
            denominator: v[2],
        }
    }
}

impl From<Beat> for [i64; 3] {
    fn from(b: Beat) -> Self {
        [b.whole, b.numerator, b.denominator]
    }
}

impl fmt::Display for Beat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}/{}", self.whole, self.numerator, self.denominator)
    }
}

/// Result of [`Beat::reconstruct`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reconstructed {
    /// Reconstructed beat.
    pub beat: Beat,
    /// `false` when no triple within the tolerance existed and `beat` is only the closest one.
    pub exact: bool,
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/beat.rs"]
mod tests;
