use super::*;
use crate::timeline::layers::{Layer, Property};
use crate::timeline::track::{Keyframe, KeyframeTrack};

fn b(whole: i64) -> Beat {
    Beat::from_whole(whole)
}

/// Single layer holding constant x, y and angle from beat 0.
fn fixed(x: f32, y: f32, angle: f32) -> LayerStack {
    let mut layer = Layer::default();
    for (prop, v) in [
        (Property::MoveX, x),
        (Property::MoveY, y),
        (Property::Rotate, angle),
    ] {
        *layer.track_mut(prop) = KeyframeTrack::from_keys([Keyframe::instant(Beat::ZERO, v)]);
    }
    LayerStack::from_layers(vec![layer])
}

fn close(actual: (f32, f32), expected: (f32, f32)) -> bool {
    (actual.0 - expected.0).abs() < 1e-4 && (actual.1 - expected.1).abs() < 1e-4
}

fn parent_and_child(parent_angle: f32) -> LineHierarchy {
    LineHierarchy::from_lines(vec![
        Line::root(fixed(10.0, 0.0, parent_angle)),
        Line::child(0, fixed(0.0, 5.0, 0.0)),
    ])
    .unwrap()
}

#[test]
fn root_position_is_its_own_offset() {
    let h = parent_and_child(90.0);
    assert_eq!(h.position_at(0, 1.0).unwrap(), (10.0, 0.0));
}

#[test]
fn child_rotates_by_negated_parent_angle() {
    let at = |angle: f32| parent_and_child(angle).position_at(1, 1.0).unwrap();
    assert!(close(at(0.0), (10.0, 5.0)));
    assert!(close(at(90.0), (15.0, 0.0)));
    assert!(close(at(180.0), (10.0, -5.0)));
    assert!(close(at(-90.0), (5.0, 0.0)));
    assert!(close(at(450.0), (15.0, 0.0)));
}

#[test]
fn grandchild_composes_the_whole_chain() {
    let h = LineHierarchy::from_lines(vec![
        Line::root(fixed(10.0, 0.0, 90.0)),
        Line::child(0, fixed(0.0, 5.0, 0.0)),
        Line::child(1, fixed(1.0, 0.0, 0.0)),
    ])
    .unwrap();
    assert!(close(h.position_at(2, 0.0).unwrap(), (16.0, 0.0)));
    assert_eq!(h.ancestry(2).unwrap().as_slice(), &[2, 1, 0]);
}

#[test]
fn xy_coverage_includes_ancestors() {
    let mut moving = Layer::default();
    moving.move_x = KeyframeTrack::from_keys([Keyframe::new(b(2), b(4), 0.0, 1.0)]);
    let h = LineHierarchy::from_lines(vec![
        Line::root(LayerStack::from_layers(vec![moving])),
        Line::child(0, LayerStack::new()),
    ])
    .unwrap();
    assert!(h.has_xy_event_at(1, 3.0).unwrap());
    assert!(!h.has_xy_event_at(1, 5.0).unwrap());
    assert_eq!(h.chain_last_event_end(1).unwrap(), b(4));
}

#[test]
fn cycles_are_structure_errors() {
    let err = LineHierarchy::from_lines(vec![
        Line::child(1, LayerStack::new()),
        Line::child(0, LayerStack::new()),
    ])
    .unwrap_err();
    assert!(matches!(err, ConvertError::Structure { line: 0, .. }));
    assert!(err.to_string().contains("loops back"));

    let self_parent = LineHierarchy::from_lines(vec![Line::child(0, LayerStack::new())]);
    assert!(self_parent.is_err());
}

#[test]
fn out_of_range_parent_names_the_line() {
    let err = LineHierarchy::from_lines(vec![
        Line::root(LayerStack::new()),
        Line::child(7, LayerStack::new()),
    ])
    .unwrap_err();
    assert!(matches!(err, ConvertError::Structure { line: 1, .. }));
}

#[test]
fn unknown_line_index_is_an_error() {
    let h = LineHierarchy::new();
    assert!(h.position_at(0, 0.0).is_err());
    assert!(h.has_xy_event_at(3, 0.0).is_err());
}

#[test]
fn push_rejects_bad_parents_and_keeps_state() {
    let mut h = LineHierarchy::new();
    assert_eq!(h.push(Line::root(fixed(1.0, 2.0, 0.0))).unwrap(), 0);
    assert!(h.push(Line::child(5, LayerStack::new())).is_err());
    assert_eq!(h.len(), 1);
    assert_eq!(h.push(Line::child(0, LayerStack::new())).unwrap(), 1);
}

#[test]
fn remove_relinks_children() {
    let mut h = LineHierarchy::from_lines(vec![
        Line::root(LayerStack::new()),
        Line::root(LayerStack::new()),
        Line::child(1, LayerStack::new()),
        Line::child(0, LayerStack::new()),
    ])
    .unwrap();
    assert!(h.remove(1).is_some());
    assert_eq!(h.get(1).unwrap().parent, None);
    assert_eq!(h.get(2).unwrap().parent, Some(0));
    assert!(h.validate().is_ok());
    assert!(h.remove(10).is_none());
    h.clear();
    assert!(h.is_empty());
}

#[test]
fn mutation_drops_memoized_results() {
    let mut h = parent_and_child(0.0);
    assert!(close(h.position_at(1, 1.0).unwrap(), (10.0, 5.0)));

    assert!(h.has_xy_event_at(1, 0.0).unwrap());

    h.get_mut(0).unwrap().layers = LayerStack::new();
    h.get_mut(1).unwrap().layers = LayerStack::new();
    assert!(!h.has_xy_event_at(1, 0.0).unwrap());

    h.get_mut(0).unwrap().layers = fixed(10.0, 0.0, 180.0);
    h.get_mut(1).unwrap().layers = fixed(0.0, 5.0, 0.0);
    assert!(close(h.position_at(1, 1.0).unwrap(), (10.0, -5.0)));

    let copy = h.clone();
    assert_eq!(copy.lines(), h.lines());
}

#[test]
fn only_coverage_is_memoized() {
    let h = parent_and_child(90.0);
    for step in 0..16 {
        h.position_at(1, f64::from(step) * 0.125).unwrap();
    }
    assert!(h.cache.coverage.read().unwrap().is_empty());

    h.has_xy_event_at(1, 0.5).unwrap();
    h.has_xy_event_at(1, 0.5).unwrap();
    assert_eq!(h.cache.coverage.read().unwrap().len(), 1);
}

#[test]
fn hierarchy_is_shareable_across_threads() {
    fn assert_sync<T: Sync + Send>() {}
    assert_sync::<LineHierarchy>();
}
