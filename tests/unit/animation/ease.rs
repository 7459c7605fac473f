use super::*;

const MONOTONIC: [Ease; 15] = [
    Ease::Linear,
    Ease::InQuad,
    Ease::OutQuad,
    Ease::InOutQuad,
    Ease::InCubic,
    Ease::OutCubic,
    Ease::InOutCubic,
    Ease::InQuart,
    Ease::OutQuart,
    Ease::InQuint,
    Ease::OutQuint,
    Ease::InSine,
    Ease::OutSine,
    Ease::InOutSine,
    Ease::OutExpo,
];

#[test]
fn endpoints_are_stable() {
    for ease in Ease::ALL {
        assert_eq!(ease.apply(0.0), 0.0, "{ease:?}");
        assert_eq!(ease.apply(1.0), 1.0, "{ease:?}");
    }
}

#[test]
fn monotonic_spot_check() {
    for ease in MONOTONIC {
        let a = ease.apply(0.25);
        let b = ease.apply(0.5);
        let c = ease.apply(0.75);
        assert!(a < b, "{ease:?}");
        assert!(b < c, "{ease:?}");
    }
}

#[test]
fn ids_cover_the_whole_table() {
    for (i, ease) in Ease::ALL.iter().enumerate() {
        let id = i as i32 + 1;
        assert_eq!(ease.id(), id);
        assert_eq!(Ease::from_id(id), *ease);
    }
    assert_eq!(Ease::from_id(2), Ease::OutSine);
    assert_eq!(Ease::from_id(28), Ease::InOutBounce);
}

#[test]
fn unknown_ids_are_linear() {
    for id in [-3, 0, 30, 1000] {
        assert_eq!(Ease::from_id(id), Ease::Linear);
    }
}

#[test]
fn window_clips_and_renormalizes() {
    assert!((Ease::Linear.evaluate(0.2, 0.8, 0.5) - 0.5).abs() < 1e-12);

    // InQuad on [0.5, 1]: f(0.75) = 0.5625, rescaled from [0.25, 1].
    let v = Ease::InQuad.evaluate(0.5, 1.0, 0.5);
    assert!((v - (0.5625 - 0.25) / 0.75).abs() < 1e-12);
    assert_eq!(Ease::InQuad.evaluate(0.5, 1.0, 0.0), 0.0);
    assert_eq!(Ease::InQuad.evaluate(0.5, 1.0, 1.0), 1.0);
}

#[test]
fn degenerate_window_returns_progress() {
    for ease in Ease::ALL {
        assert_eq!(ease.evaluate(0.3, 0.3, 0.7), 0.7, "{ease:?}");
    }
}

#[test]
fn overshooting_shapes_leave_the_unit_range() {
    assert!(Ease::InBack.apply(0.2) < 0.0);
    assert!(Ease::OutBack.apply(0.8) > 1.0);
}

#[test]
fn evaluate_easing_dispatches_by_id() {
    let direct = Ease::InOutCubic.evaluate(0.0, 1.0, 0.3);
    assert_eq!(evaluate_easing(12, 0.0, 1.0, 0.3), direct);
    assert_eq!(evaluate_easing(999, 0.0, 1.0, 0.3), 0.3);
}
