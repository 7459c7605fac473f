use kurbo::{Affine, Vec2};

/// `a + (b - a) * t` without clamping `t`; back/elastic easings overshoot on purpose.
pub(crate) fn lerp_unclamped(a: f32, b: f32, t: f64) -> f32 {
    (f64::from(a) + (f64::from(b) - f64::from(a)) * t) as f32
}

/// Wrap an angle in degrees into `[0, 360)`.
pub(crate) fn normalize_degrees(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Rotate `offset` counter-clockwise by `deg` degrees around the origin.
///
/// `x' = x cos θ - y sin θ`, `y' = x sin θ + y cos θ`.
pub(crate) fn rotate_deg(offset: Vec2, deg: f64) -> Vec2 {
    let rad = normalize_degrees(deg).to_radians();
    (Affine::rotate(rad) * offset.to_point()).to_vec2()
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
