use super::*;
use crate::foundation::beat::Beat;
use crate::foundation::error::ConvertError;

const CHART: &str = r#"{
    "BPMList": [ { "bpm": 180, "startTime": [0, 0, 1] }, { "bpm": 90, "startTime": [16, 0, 1] } ],
    "META": { "RPEVersion": 150, "name": "Song", "composer": "Comp", "charter": "Chart",
              "illustration": "Ill", "level": "HD 10", "offset": 25 },
    "judgeLineList": [
        {
            "Texture": "line.png",
            "eventLayers": [
                { "alphaEvents": [ { "start": 0, "end": 255, "startTime": [0, 0, 1], "endTime": [2, 0, 1] } ] }
            ],
            "notes": [
                { "type": 4, "startTime": [1, 0, 1], "endTime": [1, 0, 1], "positionX": 675, "above": 2 },
                { "type": 2, "startTime": [2, 0, 1], "endTime": [3, 0, 1], "isFake": 1 }
            ]
        },
        {
            "Texture": "arrow.png",
            "father": 0,
            "eventLayers": [
                { "moveYEvents": [ { "start": 0, "end": 45, "startTime": [0, 0, 1], "endTime": [1, 0, 1] } ] },
                { "rotateEvents": [ { "start": 0, "end": 90, "startTime": [0, 0, 1], "endTime": [1, 0, 1] } ] }
            ]
        }
    ]
}"#;

fn chart() -> LayeredChart {
    LayeredChart::from_reader(CHART.as_bytes()).unwrap()
}

#[test]
fn metadata_bpm_and_notes_are_mapped() {
    let (flat, _) = to_flat(&chart(), &ConvertOptions::default()).unwrap();
    assert_eq!(flat.info.name, "Song");
    assert_eq!(flat.info.artist, "Comp");
    assert_eq!(flat.info.designer, "Chart");
    assert_eq!(flat.info.illustration, "Ill");
    assert_eq!(flat.info.level, "HD 10");
    assert_eq!(flat.offset, 25);
    assert_eq!(flat.bpm.len(), 2);
    assert_eq!(flat.bpm[1].beat, Beat::from_whole(16));

    let notes = &flat.lines[0].notes;
    assert_eq!(notes[0].kind, 2);
    assert_eq!(notes[0].position_x, 100.0);
    assert!(!notes[0].is_above);
    assert_eq!(notes[1].kind, 3);
    assert_eq!(notes[1].hold_end_beat, Beat::from_whole(3));
}

#[test]
fn losses_are_reported() {
    let (flat, report) = to_flat(&chart(), &ConvertOptions::default()).unwrap();
    assert_eq!(report.direct_lines, 1);
    assert_eq!(report.resampled_lines, 1);
    assert!(report.warnings.contains(&ConversionWarning::FakeNote { line: 0, note: 1 }));
    assert!(report.warnings.contains(&ConversionWarning::UnsupportedTexture {
        line: 1,
        texture: "arrow.png".to_owned(),
    }));
    assert!(report.warnings.contains(&ConversionWarning::MultipleLayers { line: 1, layers: 2 }));
    assert!(report.warnings.contains(&ConversionWarning::NestedParent { line: 1, parent: 0 }));
    assert!(!report
        .warnings
        .iter()
        .any(|w| matches!(w, ConversionWarning::InexactBeats { .. })));

    // Both child tracks are covered on [0, 1]: nine samples at 1/8 beat.
    let child = &flat.lines[1].props;
    assert_eq!(child.position_y.len(), 9);
    assert_eq!(child.rotate.len(), 9);
    assert_eq!(child.position_y[8].beat, Beat::from_whole(1));
    assert!((child.position_y[8].value - 10.0).abs() < 1e-5);
    assert!(child.alpha.is_empty());
}

#[test]
fn sequential_output_matches_parallel() {
    let sequential = ConvertOptions {
        parallel: false,
        ..ConvertOptions::default()
    };
    let (a, ra) = to_flat(&chart(), &ConvertOptions::default()).unwrap();
    let (b, rb) = to_flat(&chart(), &sequential).unwrap();
    assert_eq!(a, b);
    assert_eq!(ra, rb);
}

#[test]
fn structural_errors_abort() {
    let mut looped = chart();
    looped.judge_line_list[0].father = 1;
    let err = to_flat(&looped, &ConvertOptions::default()).unwrap_err();
    assert!(matches!(err, ConvertError::Structure { .. }));

    let bad_opts = ConvertOptions {
        threads: Some(0),
        ..ConvertOptions::default()
    };
    assert!(to_flat(&chart(), &bad_opts).is_err());
}

#[test]
fn malformed_note_and_tempo_beats_abort() {
    let mut bad_note = chart();
    bad_note.judge_line_list[1].notes.push(LayeredNote {
        start_time: Beat {
            whole: 1,
            numerator: 0,
            denominator: 0,
        },
        ..LayeredNote::default()
    });
    let err = to_flat(&bad_note, &ConvertOptions::default()).unwrap_err();
    assert!(matches!(err, ConvertError::Structure { line: 1, .. }));

    let mut bad_tempo = chart();
    bad_tempo.bpm_list[0].start_time = Beat {
        whole: 0,
        numerator: 0,
        denominator: 0,
    };
    let err = to_flat(&bad_tempo, &ConvertOptions::default()).unwrap_err();
    assert!(matches!(err, ConvertError::Beat(_)));
}
