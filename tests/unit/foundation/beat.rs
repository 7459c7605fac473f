use super::*;

#[test]
fn to_f64_tolerates_unreduced_fractions() {
    assert_eq!(Beat::from([1, 1, 2]).to_f64(), 1.5);
    assert_eq!(Beat::from([0, 3, 2]).to_f64(), 1.5);
    assert_eq!(Beat::from([2, 4, 4]).to_f64(), 3.0);
}

#[test]
fn new_rejects_bad_denominators() {
    assert!(Beat::new(0, 0, 0).is_err());
    assert!(Beat::new(0, 1, -4).is_err());
    assert!(Beat::new(-1, 0, 1).is_err());
    assert_eq!(Beat::new(3, 1, 4).unwrap(), Beat::from([3, 1, 4]));
}

#[test]
fn json_is_a_three_element_array() {
    let beat: Beat = serde_json::from_str("[4, 1, 8]").unwrap();
    assert_eq!(beat, Beat::from([4, 1, 8]));
    assert_eq!(serde_json::to_string(&beat).unwrap(), "[4,1,8]");
}

#[test]
fn reconstruct_prefers_mixed_form() {
    let r = Beat::reconstruct_default(2.5);
    assert!(r.exact);
    assert_eq!(r.beat, Beat::from([2, 1, 2]));

    let r = Beat::reconstruct_default(0.375);
    assert_eq!(r.beat, Beat::from([0, 3, 8]));

    let r = Beat::reconstruct_default(351.0);
    assert_eq!(r.beat, Beat::from([351, 0, 1]));

    let r = Beat::reconstruct_default(0.0);
    assert_eq!(r.beat, Beat::ZERO);
}

#[test]
fn reconstruct_round_trips_small_denominators() {
    for den in [1_i64, 2, 3, 4, 6, 7, 8, 12, 16, 48, 97, 192, 1000, 9973, 10000] {
        for num in [0_i64, 1, den / 3, den / 2, den - 1] {
            for whole in [0_i64, 1, 17, 250] {
                let beat = Beat::from([whole, num, den]);
                let r = Beat::reconstruct_default(beat.to_f64());
                assert!(r.exact, "{beat} did not reconstruct exactly");
                assert!(
                    (r.beat.to_f64() - beat.to_f64()).abs() < 1e-6,
                    "{beat} -> {}",
                    r.beat
                );
            }
        }
    }
}

#[test]
fn reconstruct_stops_early_for_late_beats() {
    let started = std::time::Instant::now();
    for i in 0..8000_u32 {
        let b = 20_000.0 + f64::from(i) / 8.0;
        let r = Beat::reconstruct_default(b);
        assert!(r.exact);
        assert!(r.beat.denominator <= 8, "{b} -> {}", r.beat);
        assert_eq!(r.beat.to_f64(), b);
    }
    assert_eq!(
        Beat::reconstruct_default(20_000.375).beat,
        Beat::from([20_000, 3, 8])
    );
    // A full scan of every denominator per sample takes seconds here.
    assert!(started.elapsed() < std::time::Duration::from_millis(500));
}

#[test]
fn reconstruct_reports_inexact_fallback() {
    // An irrational value needs a denominator well past the bound for 1e-12 accuracy.
    let r = Beat::reconstruct(std::f64::consts::PI, 16, 1e-12);
    assert!(!r.exact);
    assert_eq!(r.beat.denominator, 7);
    assert_eq!(r.beat.whole, 3);
    assert_eq!(r.beat.numerator, 1);
}

#[test]
fn reconstruct_degenerate_inputs_fall_back_to_zero() {
    for v in [-0.125, f64::NAN, f64::INFINITY] {
        let r = Beat::reconstruct_default(v);
        assert!(!r.exact);
        assert_eq!(r.beat, Beat::ZERO);
    }
}

#[test]
fn far_future_detection_is_by_value() {
    assert!(Beat::FAR_FUTURE.is_far_future());
    assert!(Beat::from([0, 19_999_998, 2]).is_far_future());
    assert!(!Beat::from_whole(1024).is_far_future());
}
