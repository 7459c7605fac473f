use std::f64::consts::PI;

const BACK_S: f64 = 1.70158;
const BACK_S_IN_OUT: f64 = BACK_S * 1.525;
const BOUNCE_N1: f64 = 7.5625;
const BOUNCE_D1: f64 = 2.75;

/// Easing shapes addressable by layered-chart easing ids (`easingType`, 1..=29).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Ease {
    /// Linear interpolation.
    Linear,
    /// Sine ease-out.
    OutSine,
    /// Sine ease-in.
    InSine,
    /// Quadratic ease-out.
    OutQuad,
    /// Quadratic ease-in.
    InQuad,
    /// Sine ease-in/out.
    InOutSine,
    /// Quadratic ease-in/out.
    InOutQuad,
    /// Cubic ease-out.
    OutCubic,
    /// Cubic ease-in.
    InCubic,
    /// Quartic ease-out.
    OutQuart,
    /// Quartic ease-in.
    InQuart,
    /// Cubic ease-in/out.
    InOutCubic,
    /// Quartic ease-in/out.
    InOutQuart,
    /// Quintic ease-out.
    OutQuint,
    /// Quintic ease-in.
    InQuint,
    /// Exponential ease-out.
    OutExpo,
    /// Exponential ease-in.
    InExpo,
    /// Circular ease-out.
    OutCirc,
    /// Circular ease-in.
    InCirc,
    /// Back (overshooting) ease-out.
    OutBack,
    /// Back (overshooting) ease-in.
    InBack,
    /// Circular ease-in/out.
    InOutCirc,
    /// Back (overshooting) ease-in/out.
    InOutBack,
    /// Elastic ease-out.
    OutElastic,
    /// Elastic ease-in.
    InElastic,
    /// Bounce ease-out.
    OutBounce,
    /// Bounce ease-in.
    InBounce,
    /// Bounce ease-in/out.
    InOutBounce,
    /// Elastic ease-in/out.
    InOutElastic,
}

impl Ease {
    /// Every shape, ordered by easing id.
    pub const ALL: [Ease; 29] = [
        Self::Linear,
        Self::OutSine,
        Self::InSine,
        Self::OutQuad,
        Self::InQuad,
        Self::InOutSine,
        Self::InOutQuad,
        Self::OutCubic,
        Self::InCubic,
        Self::OutQuart,
        Self::InQuart,
        Self::InOutCubic,
        Self::InOutQuart,
        Self::OutQuint,
        Self::InQuint,
        Self::OutExpo,
        Self::InExpo,
        Self::OutCirc,
        Self::InCirc,
        Self::OutBack,
        Self::InBack,
        Self::InOutCirc,
        Self::InOutBack,
        Self::OutElastic,
        Self::InElastic,
        Self::OutBounce,
        Self::InBounce,
        Self::InOutBounce,
        Self::InOutElastic,
    ];

    /// Look up a layered-chart easing id; unknown ids are linear.
    pub fn from_id(id: i32) -> Self {
        usize::try_from(id)
            .ok()
            .and_then(|i| i.checked_sub(1))
            .and_then(|i| Self::ALL.get(i).copied())
            .unwrap_or(Self::Linear)
    }

    /// Layered-chart easing id of this shape.
    pub fn id(self) -> i32 {
        Self::ALL
            .iter()
            .position(|e| *e == self)
            .map_or(1, |i| i as i32 + 1)
    }

    /// Evaluate the shape over the full unit window.
    pub fn apply(self, t: f64) -> f64 {
        self.evaluate(0.0, 1.0, t)
    }

    /// Evaluate the shape clipped to the window `[start, end]`, renormalized to `0..1`.
    ///
    /// The raw shape is sampled at `start + (end - start) * t` and rescaled by its values at
    /// the window edges. A window whose edges map to the same value (including `start == end`)
    /// has no usable scale; `t` is returned unchanged in that case.
    pub fn evaluate(self, start: f64, end: f64, t: f64) -> f64 {
        let f_start = self.shape(start);
        let f_end = self.shape(end);
        let span = f_end - f_start;
        if span == 0.0 || !span.is_finite() {
            return t;
        }
        let v = (self.shape(start + (end - start) * t) - f_start) / span;
        if v.is_finite() { v } else { t }
    }

    fn shape(self, t: f64) -> f64 {
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => t * (2.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            Self::InCubic => t.powi(3),
            Self::OutCubic => (t - 1.0).powi(3) + 1.0,
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t.powi(3)
                } else {
                    (t - 1.0) * (2.0 * t - 2.0).powi(2) + 1.0
                }
            }
            Self::InQuart => t.powi(4),
            Self::OutQuart => 1.0 - (t - 1.0).powi(4),
            Self::InOutQuart => {
                if t < 0.5 {
                    8.0 * t.powi(4)
                } else {
                    1.0 - 8.0 * (t - 1.0).powi(4)
                }
            }
            Self::InQuint => t.powi(5),
            Self::OutQuint => (t - 1.0).powi(5) + 1.0,
            Self::InSine => 1.0 - (t * PI / 2.0).cos(),
            Self::OutSine => (t * PI / 2.0).sin(),
            Self::InOutSine => -0.5 * ((PI * t).cos() - 1.0),
            Self::InExpo => {
                if t == 0.0 {
                    0.0
                } else {
                    2f64.powf(10.0 * (t - 1.0))
                }
            }
            Self::OutExpo => {
                if t == 1.0 {
                    1.0
                } else {
                    1.0 - 2f64.powf(-10.0 * t)
                }
            }
            Self::InCirc => 1.0 - (1.0 - t * t).sqrt(),
            Self::OutCirc => (1.0 - (t - 1.0).powi(2)).sqrt(),
            Self::InOutCirc => {
                if t < 0.5 {
                    0.5 * (1.0 - (1.0 - 4.0 * t * t).sqrt())
                } else {
                    0.5 * ((1.0 - 4.0 * (t - 1.0).powi(2)).sqrt() + 1.0)
                }
            }
            Self::InBack => t * t * ((BACK_S + 1.0) * t - BACK_S),
            Self::OutBack => {
                let u = t - 1.0;
                u * u * ((BACK_S + 1.0) * u + BACK_S) + 1.0
            }
            Self::InOutBack => {
                let u = t * 2.0;
                if u < 1.0 {
                    0.5 * (u * u * ((BACK_S_IN_OUT + 1.0) * u - BACK_S_IN_OUT))
                } else {
                    let u = u - 2.0;
                    0.5 * (u * u * ((BACK_S_IN_OUT + 1.0) * u + BACK_S_IN_OUT) + 2.0)
                }
            }
            Self::InElastic => {
                if t == 0.0 || t == 1.0 {
                    t
                } else {
                    -(2f64.powf(10.0 * (t - 1.0))) * ((t - 1.1) * 5.0 * PI).sin()
                }
            }
            Self::OutElastic => {
                if t == 0.0 || t == 1.0 {
                    t
                } else {
                    2f64.powf(-10.0 * t) * ((t - 0.1) * 5.0 * PI).sin() + 1.0
                }
            }
            Self::InOutElastic => {
                if t == 0.0 || t == 1.0 {
                    return t;
                }
                let u = t * 2.0;
                if u < 1.0 {
                    -0.5 * 2f64.powf(10.0 * (u - 1.0)) * ((u - 1.1) * 5.0 * PI).sin()
                } else {
                    let u = u - 1.0;
                    2f64.powf(-10.0 * u) * ((u - 0.1) * 5.0 * PI).sin() * 0.5 + 1.0
                }
            }
            Self::OutBounce => bounce_out(t),
            Self::InBounce => 1.0 - bounce_out(1.0 - t),
            Self::InOutBounce => {
                if t < 0.5 {
                    (1.0 - bounce_out(1.0 - 2.0 * t)) * 0.5
                } else {
                    (bounce_out(2.0 * t - 1.0) + 1.0) * 0.5
                }
            }
        }
    }
}

fn bounce_out(t: f64) -> f64 {
    if t < 1.0 / BOUNCE_D1 {
        BOUNCE_N1 * t * t
    } else if t < 2.0 / BOUNCE_D1 {
        let t = t - 1.5 / BOUNCE_D1;
        BOUNCE_N1 * t * t + 0.75
    } else if t < 2.5 / BOUNCE_D1 {
        let t = t - 2.25 / BOUNCE_D1;
        BOUNCE_N1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / BOUNCE_D1;
        BOUNCE_N1 * t * t + 0.984375
    }
}

/// Evaluate easing id `id` over the window `[start, end]` at progress `t`.
///
/// Shorthand for `Ease::from_id(id).evaluate(start, end, t)`.
pub fn evaluate_easing(id: i32, start: f64, end: f64, t: f64) -> f64 {
    Ease::from_id(id).evaluate(start, end, t)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
