use crate::{
    chart::flat::{FlatBpm, FlatChart, FlatInfo, FlatLine, FlatNote},
    chart::layered::{JudgeLine, LayeredChart, LayeredNote},
    chart::mapping::{LINE_TEXTURE, NoteKind, X_SCALE},
    convert::map_lines,
    convert::options::ConvertOptions,
    convert::report::{ConversionReport, ConversionWarning},
    flatten::{FlattenPath, flatten_line},
    foundation::error::ConvertResult,
};

/// Convert a layered chart into a flat chart.
///
/// Lines with several event layers or a parent are resampled; every such loss of structure is
/// recorded in the returned report and logged.
#[tracing::instrument(skip(chart, opts), fields(lines = chart.judge_line_list.len()))]
pub fn to_flat(
    chart: &LayeredChart,
    opts: &ConvertOptions,
) -> ConvertResult<(FlatChart, ConversionReport)> {
    opts.validate()?;
    chart.validate()?;
    let hierarchy = chart.hierarchy()?;
    let sampling = opts.sampling();

    let mut report = ConversionReport::default();
    for (i, line) in chart.judge_line_list.iter().enumerate() {
        check_line(i, line, &mut report);
    }

    let flattened = map_lines(opts, hierarchy.len(), |i| {
        flatten_line(&hierarchy, i, &sampling)
    })?;

    let mut inexact = 0usize;
    let mut lines = Vec::with_capacity(flattened.len());
    for (i, (line, flat)) in chart.judge_line_list.iter().zip(flattened).enumerate() {
        match flat.path {
            FlattenPath::Direct => report.direct_lines += 1,
            FlattenPath::Resampled => report.resampled_lines += 1,
        }
        tracing::debug!(
            line = i,
            path = ?flat.path,
            samples = flat.tracks.sample_count(),
            "flattened line"
        );
        inexact += flat.inexact_beats;
        lines.push(FlatLine {
            props: flat.tracks,
            notes: line.notes.iter().map(flat_note).collect(),
        });
    }
    if inexact > 0 {
        report.warn(ConversionWarning::InexactBeats { count: inexact });
    }

    let meta = &chart.meta;
    let out = FlatChart {
        info: FlatInfo {
            name: meta.name.clone(),
            artist: meta.composer.clone(),
            illustration: meta.illustration.clone(),
            level: meta.level.clone(),
            designer: meta.charter.clone(),
        },
        offset: meta.offset,
        bpm: chart
            .bpm_list
            .iter()
            .map(|b| FlatBpm {
                beat: b.start_time,
                bpm: b.bpm,
            })
            .collect(),
        lines,
    };
    Ok((out, report))
}

fn check_line(index: usize, line: &JudgeLine, report: &mut ConversionReport) {
    if line.texture != LINE_TEXTURE {
        report.warn(ConversionWarning::UnsupportedTexture {
            line: index,
            texture: line.texture.clone(),
        });
    }
    if line.event_layers.len() > 1 {
        report.warn(ConversionWarning::MultipleLayers {
            line: index,
            layers: line.event_layers.len(),
        });
    }
    if let Some(parent) = line.parent() {
        report.warn(ConversionWarning::NestedParent {
            line: index,
            parent,
        });
    }
    for (n, note) in line.notes.iter().enumerate() {
        if note.is_fake != 0 {
            report.warn(ConversionWarning::FakeNote {
                line: index,
                note: n,
            });
        }
    }
}

fn flat_note(note: &LayeredNote) -> FlatNote {
    FlatNote {
        kind: NoteKind::from_layered(note.kind).flat_id(),
        beat: note.start_time,
        position_x: note.position_x / X_SCALE,
        speed: note.speed,
        is_above: note.above == 1,
        hold_end_beat: note.end_time,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/convert/to_flat.rs"]
mod tests;
