use super::*;
use crate::chart::flat::{FlatBpm, FlatInfo, FlatLine};
use crate::flatten::{FlatSample, FlatTracks};
use crate::foundation::beat::Beat;
use crate::foundation::error::ConvertError;

fn b(whole: i64) -> Beat {
    Beat::from_whole(whole)
}

fn alpha_chart() -> FlatChart {
    FlatChart {
        info: FlatInfo {
            name: "Song".to_owned(),
            artist: "Comp".to_owned(),
            designer: "Chart".to_owned(),
            ..FlatInfo::default()
        },
        offset: -10,
        bpm: vec![FlatBpm {
            beat: Beat::ZERO,
            bpm: 120.0,
        }],
        lines: vec![FlatLine {
            props: FlatTracks {
                alpha: vec![FlatSample::jump(b(0), 0.0), FlatSample::eased(b(4), 1.0, 0)],
                ..FlatTracks::default()
            },
            notes: vec![FlatNote {
                kind: 2,
                beat: b(1),
                position_x: -20.0,
                speed: 1.5,
                is_above: false,
                hold_end_beat: b(1),
            }],
        }],
    }
}

#[test]
fn two_alpha_samples_make_one_event() {
    let (chart, report) = to_layered(&alpha_chart(), &ConvertOptions::default()).unwrap();
    assert!(report.is_clean());

    let layers = &chart.judge_line_list[0].event_layers;
    assert_eq!(layers.len(), 1);
    let alpha = &layers[0].alpha_events;
    assert_eq!(alpha.len(), 1);
    assert_eq!(alpha[0].start, 0.0);
    assert_eq!(alpha[0].end, 1.0);
    assert_eq!(alpha[0].easing_type, 1);
    assert_eq!(alpha[0].start_time, Beat::ZERO);
    assert_eq!(alpha[0].end_time, b(4));
    assert!(layers[0].move_x_events.is_empty());
}

#[test]
fn metadata_and_notes_are_mapped() {
    let (chart, _) = to_layered(&alpha_chart(), &ConvertOptions::default()).unwrap();
    assert_eq!(chart.meta.rpe_version, 150);
    assert_eq!(chart.meta.name, "Song");
    assert_eq!(chart.meta.composer, "Comp");
    assert_eq!(chart.meta.charter, "Chart");
    assert_eq!(chart.meta.offset, -10);
    assert_eq!(chart.bpm_list[0].bpm, 120.0);

    let line = &chart.judge_line_list[0];
    assert_eq!(line.name, "PhiFansLine");
    assert_eq!(line.father, -1);

    let note = &line.notes[0];
    assert_eq!(note.kind, 4);
    assert_eq!(note.position_x, -135.0);
    assert_eq!(note.above, 2);
    assert_eq!(note.speed, 1.5);
    assert_eq!(note.size, 1.0);
    assert_eq!(note.alpha, 255);
}

#[test]
fn malformed_beats_name_the_line() {
    let mut chart = alpha_chart();
    chart.lines[0].notes[0].beat = Beat {
        whole: -1,
        numerator: 0,
        denominator: 1,
    };
    let err = to_layered(&chart, &ConvertOptions::default()).unwrap_err();
    assert!(matches!(err, ConvertError::Structure { line: 0, .. }));
}
