use crate::{
    animation::ease::Ease,
    chart::mapping::{X_SCALE, Y_SCALE, layered_easing},
    flatten::{FlatSample, FlatTracks, Sampling},
    foundation::beat::Beat,
    timeline::layers::Layer,
    timeline::track::{Keyframe, KeyframeTrack},
};

/// Expand flat tracks into a single event layer in layered units.
///
/// Every sample becomes one keyframe: a continuous sample eases from the previous sample to itself,
/// any other sample is an instant jump. Speed keyframes are always linear.
pub fn expand_tracks(tracks: &FlatTracks, sampling: &Sampling) -> Layer {
    Layer {
        move_x: expand(&tracks.position_x, |v| v * X_SCALE, true),
        move_y: expand(&tracks.position_y, |v| v * Y_SCALE, true),
        rotate: expand(&tracks.rotate, |v| v, true),
        alpha: expand(&tracks.alpha, |v| v, true),
        speed: expand(&tracks.speed, |v| v * sampling.speed_ratio, false),
    }
}

fn expand(samples: &[FlatSample], scale: impl Fn(f32) -> f32, eased: bool) -> KeyframeTrack {
    let mut ordered: Vec<&FlatSample> = samples.iter().collect();
    ordered.sort_by(|a, b| a.beat.to_f64().total_cmp(&b.beat.to_f64()));

    let mut keys = Vec::with_capacity(ordered.len());
    let mut prev: Option<&FlatSample> = None;
    for sample in ordered {
        let ease = if eased {
            Ease::from_id(layered_easing(sample.easing))
        } else {
            Ease::Linear
        };
        let end = scale(sample.value);
        let key = match prev {
            Some(p) if sample.continuous => Keyframe::new(p.beat, sample.beat, scale(p.value), end),
            _ => Keyframe::instant(sample.beat, end),
        };
        keys.push(key.with_ease(ease));
        prev = Some(sample);
    }

    tidy_head(&mut keys);
    KeyframeTrack::from_keys(keys)
}

/// A leading jump immediately superseded at the same beat is dropped; otherwise the first
/// keyframe is held until [`Beat::FAR_FUTURE`] so the track has a value from its first beat on.
fn tidy_head(keys: &mut Vec<Keyframe>) {
    let shared_start = keys.len() >= 2
        && (keys[0].start_time.to_f64() - keys[1].start_time.to_f64()).abs() < f64::EPSILON;
    if shared_start {
        keys.remove(0);
    } else if let Some(first) = keys.first_mut() {
        first.end_time = Beat::FAR_FUTURE;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/flatten/expand.rs"]
mod tests;
