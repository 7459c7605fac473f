use super::*;

#[test]
fn defaults_match_the_converter_constants() {
    let opts = ConvertOptions::default();
    assert_eq!(opts.precision, 0.125);
    assert_eq!(opts.speed_ratio, 6.0);
    assert_eq!(opts.max_denominator, 10_000);
    assert_eq!(opts.epsilon, 1e-6);
    assert!(opts.parallel);
    assert_eq!(opts.threads, None);
    assert!(opts.validate().is_ok());
    assert_eq!(opts.sampling(), Sampling::default());
}

#[test]
fn validate_rejects_unusable_settings() {
    let bad = [
        ConvertOptions {
            precision: 0.0,
            ..ConvertOptions::default()
        },
        ConvertOptions {
            precision: f64::NAN,
            ..ConvertOptions::default()
        },
        ConvertOptions {
            speed_ratio: -6.0,
            ..ConvertOptions::default()
        },
        ConvertOptions {
            max_denominator: 0,
            ..ConvertOptions::default()
        },
        ConvertOptions {
            epsilon: 0.0,
            ..ConvertOptions::default()
        },
        ConvertOptions {
            threads: Some(0),
            ..ConvertOptions::default()
        },
    ];
    for opts in bad {
        let err = opts.validate().unwrap_err();
        assert!(matches!(err, ConvertError::Validation(_)), "{opts:?}");
    }
}
