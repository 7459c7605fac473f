use crate::{
    chart::flat::{FlatChart, FlatNote},
    chart::layered::{EventLayer, JudgeLine, LayeredBpm, LayeredChart, LayeredNote, Meta, RPE_VERSION},
    chart::mapping::{NoteKind, X_SCALE},
    convert::map_lines,
    convert::options::ConvertOptions,
    convert::report::ConversionReport,
    flatten::expand_tracks,
    foundation::error::ConvertResult,
};

// Layered `above`: 1 falls from above the line, 2 from below.
const BELOW: i32 = 2;

/// Convert a flat chart into a layered chart with one event layer per line.
#[tracing::instrument(skip(chart, opts), fields(lines = chart.lines.len()))]
pub fn to_layered(
    chart: &FlatChart,
    opts: &ConvertOptions,
) -> ConvertResult<(LayeredChart, ConversionReport)> {
    opts.validate()?;
    chart.validate()?;
    let sampling = opts.sampling();

    let layers = map_lines(opts, chart.lines.len(), |i| {
        Ok(EventLayer::from_layer(&expand_tracks(
            &chart.lines[i].props,
            &sampling,
        )))
    })?;

    let judge_line_list = chart
        .lines
        .iter()
        .zip(layers)
        .map(|(line, layer)| JudgeLine {
            event_layers: vec![layer],
            notes: line.notes.iter().map(layered_note).collect(),
            ..JudgeLine::default()
        })
        .collect::<Vec<_>>();
    tracing::debug!(lines = judge_line_list.len(), "expanded lines");

    let info = &chart.info;
    let out = LayeredChart {
        bpm_list: chart
            .bpm
            .iter()
            .map(|b| LayeredBpm {
                bpm: b.bpm,
                start_time: b.beat,
            })
            .collect(),
        meta: Meta {
            rpe_version: RPE_VERSION,
            charter: info.designer.clone(),
            composer: info.artist.clone(),
            illustration: info.illustration.clone(),
            level: info.level.clone(),
            name: info.name.clone(),
            offset: chart.offset,
            ..Meta::default()
        },
        judge_line_list,
    };
    let report = ConversionReport {
        direct_lines: out.judge_line_list.len(),
        ..ConversionReport::default()
    };
    Ok((out, report))
}

fn layered_note(note: &FlatNote) -> LayeredNote {
    LayeredNote {
        above: if note.is_above { 1 } else { BELOW },
        start_time: note.beat,
        end_time: note.hold_end_beat,
        position_x: note.position_x * X_SCALE,
        speed: note.speed,
        kind: NoteKind::from_flat(note.kind).layered_id(),
        ..LayeredNote::default()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/convert/to_layered.rs"]
mod tests;
