use crate::{
    chart::mapping::{X_SCALE, Y_SCALE, flat_easing},
    flatten::{FlatSample, FlatTracks, FlattenPath, FlattenedLine, Sampling},
    foundation::beat::Beat,
    foundation::error::{ConvertError, ConvertResult},
    timeline::hierarchy::LineHierarchy,
    timeline::layers::{Layer, LayerStack},
    timeline::track::{Keyframe, KeyframeTrack},
};

/// Flatten line `index` of `hierarchy` into flat tracks.
///
/// Lines with more than one layer or with a parent cannot be expressed key-for-key and are
/// resampled every `sampling.precision` beats up to the latest animated beat of the line and its
/// ancestors. Other lines have their keyframes copied directly.
pub fn flatten_line(
    hierarchy: &LineHierarchy,
    index: usize,
    sampling: &Sampling,
) -> ConvertResult<FlattenedLine> {
    let line = hierarchy
        .get(index)
        .ok_or_else(|| ConvertError::structure(index, "no such line"))?;

    if line.layers.len() > 1 || line.parent.is_some() {
        resample(hierarchy, index, sampling)
    } else {
        Ok(FlattenedLine {
            tracks: copy_direct(&line.layers, sampling),
            path: FlattenPath::Direct,
            inexact_beats: 0,
        })
    }
}

fn resample(
    hierarchy: &LineHierarchy,
    index: usize,
    sampling: &Sampling,
) -> ConvertResult<FlattenedLine> {
    if !(sampling.precision.is_finite() && sampling.precision > 0.0) {
        return Err(ConvertError::validation(format!(
            "sampling precision must be > 0 (got {})",
            sampling.precision
        )));
    }

    let layers = &hierarchy.lines()[index].layers;
    let horizon = hierarchy.chain_last_event_end(index)?.to_f64();
    let step = sampling.precision;

    let mut tracks = FlatTracks::default();
    let mut inexact_beats = 0usize;

    for i in 0u64.. {
        let b = i as f64 * step;
        if b >= horizon {
            break;
        }

        let alpha = layers.has_alpha_event_at(b);
        let angle = layers.has_angle_event_at(b);
        let xy = hierarchy.has_xy_event_at(index, b)?;
        if !(alpha || angle || xy) {
            continue;
        }

        let rec = Beat::reconstruct(b, sampling.max_denominator, sampling.epsilon);
        if !rec.exact {
            inexact_beats += 1;
        }
        let beat = rec.beat;
        let prev = b - step;

        if alpha {
            tracks.alpha.push(FlatSample {
                beat,
                value: layers.alpha_at(b),
                continuous: layers.has_alpha_event_at(prev),
                easing: 0,
            });
        }
        if angle {
            tracks.rotate.push(FlatSample {
                beat,
                value: layers.angle_at(b),
                continuous: layers.has_angle_event_at(prev),
                easing: 0,
            });
        }
        if xy {
            let (x, y) = hierarchy.position_at(index, b)?;
            let continuous = hierarchy.has_xy_event_at(index, prev)?;
            tracks.position_x.push(FlatSample {
                beat,
                value: x / X_SCALE,
                continuous,
                easing: 0,
            });
            tracks.position_y.push(FlatSample {
                beat,
                value: y / Y_SCALE,
                continuous,
                easing: 0,
            });
        }
    }

    if let Some(first) = layers.get(0) {
        split_keys(&first.speed, &mut tracks.speed, |v| v / sampling.speed_ratio, |_| 0);
    }

    Ok(FlattenedLine {
        tracks,
        path: FlattenPath::Resampled,
        inexact_beats,
    })
}

fn copy_direct(layers: &LayerStack, sampling: &Sampling) -> FlatTracks {
    let mut tracks = FlatTracks::default();
    let mapped = |k: &Keyframe| flat_easing(k.ease.id());
    for layer in layers.layers() {
        let Layer {
            move_x,
            move_y,
            rotate,
            alpha,
            speed,
        } = layer;
        split_keys(alpha, &mut tracks.alpha, |v| v, mapped);
        split_keys(move_x, &mut tracks.position_x, |v| v / X_SCALE, mapped);
        split_keys(move_y, &mut tracks.position_y, |v| v / Y_SCALE, mapped);
        split_keys(rotate, &mut tracks.rotate, |v| v, mapped);
        split_keys(speed, &mut tracks.speed, |v| v / sampling.speed_ratio, |_| 0);
    }
    tracks
}

/// Emit a jump sample at each keyframe start, followed by an eased sample at its end unless the
/// keyframe holds a constant value.
fn split_keys(
    track: &KeyframeTrack,
    out: &mut Vec<FlatSample>,
    scale: impl Fn(f32) -> f32,
    easing: impl Fn(&Keyframe) -> i32,
) {
    for key in track.keys() {
        if (key.start_value - key.end_value).abs() < f32::EPSILON {
            out.push(FlatSample::jump(key.start_time, scale(key.start_value)));
            continue;
        }
        let id = easing(key);
        out.push(FlatSample {
            beat: key.start_time,
            value: scale(key.start_value),
            continuous: false,
            easing: id,
        });
        out.push(FlatSample::eased(key.end_time, scale(key.end_value), id));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/flatten/resample.rs"]
mod tests;
