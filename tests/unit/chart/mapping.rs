use super::*;

#[test]
fn easing_table_matches_known_pairs() {
    let pairs = [
        (1, 0),
        (2, 2),
        (3, 1),
        (4, 5),
        (9, 7),
        (16, 17),
        (18, 20),
        (26, 29),
        (28, 30),
        (29, 27),
    ];
    for (layered, flat) in pairs {
        assert_eq!(flat_easing(layered), flat, "layered {layered}");
        assert_eq!(layered_easing(flat), layered, "flat {flat}");
    }
}

#[test]
fn easing_table_is_a_bijection_on_mapped_ids() {
    for layered in 1..=29 {
        assert_eq!(layered_easing(flat_easing(layered)), layered);
    }
}

#[test]
fn unmapped_easing_ids_fall_back_to_linear() {
    assert_eq!(flat_easing(0), 0);
    assert_eq!(flat_easing(30), 0);
    assert_eq!(flat_easing(-1), 0);
    assert_eq!(layered_easing(18), 1);
    assert_eq!(layered_easing(31), 1);
    assert_eq!(layered_easing(-4), 1);
}

#[test]
fn note_kinds_translate_between_numberings() {
    for (flat, layered) in [(1, 1), (2, 4), (3, 2), (4, 3)] {
        assert_eq!(NoteKind::from_flat(flat).layered_id(), layered);
        assert_eq!(NoteKind::from_layered(layered).flat_id(), flat);
    }
    assert_eq!(NoteKind::from_flat(9), NoteKind::Tap);
    assert_eq!(NoteKind::from_layered(0), NoteKind::Tap);
}
