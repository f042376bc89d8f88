//! Dispersion metric tests: both normalizations and manual-entry parsing.

use approx::assert_abs_diff_eq;
use risklab_core::{
    dispersion::{
        normalized_sd, normalized_std_dev, parse_value_list, population_std_dev, CostVariability,
        MeanNormalizedSd,
    },
    error::LabError,
};

fn reference_pop_std(v: &[f64]) -> f64 {
    let n = v.len() as f64;
    let mean = v.iter().sum::<f64>() / n;
    (v.iter().map(|x| (x - mean) * (x - mean)).sum::<f64>() / n).sqrt()
}

#[test]
fn range_normalized_matches_definition() {
    let samples: [&[f64]; 4] = [
        &[10.0, 12.0, 15.0, 13.0, 16.0],
        &[1.0, 2.0],
        &[-3.5, 0.0, 7.25, 7.25, 100.0],
        &[0.001, 0.002, 0.0015],
    ];
    for v in samples {
        let max = v.iter().copied().fold(f64::MIN, f64::max);
        let min = v.iter().copied().fold(f64::MAX, f64::min);
        let expected = reference_pop_std(v) / (max - min);
        assert_abs_diff_eq!(normalized_std_dev(v).unwrap(), expected, epsilon = 1e-9);
    }
}

#[test]
fn range_normalized_worked_example() {
    // population std of [10, 12, 15, 13, 16] is sqrt(4.56); range is 6
    let v = [10.0, 12.0, 15.0, 13.0, 16.0];
    assert_abs_diff_eq!(normalized_std_dev(&v).unwrap(), 4.56f64.sqrt() / 6.0, epsilon = 1e-12);
    assert_abs_diff_eq!(normalized_std_dev(&v).unwrap(), 0.355_902_608, epsilon = 1e-6);
}

#[test]
fn range_normalized_single_value_is_zero() {
    for x in [0.0, -4.0, 12.5, 1e9] {
        assert_eq!(normalized_std_dev(&[x]).unwrap(), 0.0);
    }
}

#[test]
fn range_normalized_constant_is_zero() {
    for n in 2..6 {
        assert_eq!(normalized_std_dev(&vec![7.5; n]).unwrap(), 0.0);
        assert_eq!(normalized_std_dev(&vec![0.0; n]).unwrap(), 0.0);
    }
}

#[test]
fn range_normalized_empty_is_error() {
    let err = normalized_std_dev(&[]).unwrap_err();
    assert!(matches!(err, LabError::EmptyInput), "got {err:?}");
}

#[test]
fn mean_normalized_uses_sample_std_over_mean() {
    // sample std of [1..5] is sqrt(2.5); mean is 3
    let result = normalized_sd(&[1.0, 2.0, 3.0, 4.0, 5.0]);
    assert_abs_diff_eq!(result.value().unwrap(), 2.5f64.sqrt() / 3.0, epsilon = 1e-12);
}

#[test]
fn mean_normalized_degenerate_table() {
    assert_eq!(normalized_sd(&[]), MeanNormalizedSd::Undefined);
    assert!(normalized_sd(&[]).as_f64().is_nan());

    assert_eq!(normalized_sd(&[10.0; 5]), MeanNormalizedSd::Value(0.0));
    assert_eq!(normalized_sd(&[5.0; 4]), MeanNormalizedSd::Value(0.0));
    assert_eq!(normalized_sd(&[1.0, 1.0]), MeanNormalizedSd::Value(0.0));

    assert_eq!(normalized_sd(&[0.0, 0.0, 0.0]), MeanNormalizedSd::Undefined);
    assert_eq!(normalized_sd(&[-1.0, 1.0]), MeanNormalizedSd::Infinite);
    assert_eq!(normalized_sd(&[-1.0, 1.0]).as_f64(), f64::INFINITY);
}

#[test]
fn mean_normalized_renders_each_case_distinctly() {
    assert_eq!(normalized_sd(&[1.0, 2.0, 3.0, 4.0, 5.0]).to_string(), "0.5270");
    assert_eq!(normalized_sd(&[-1.0, 1.0]).to_string(), "infinite (zero mean)");
    assert_eq!(normalized_sd(&[]).to_string(), "undefined");
}

#[test]
fn mean_normalized_single_value() {
    assert_eq!(normalized_sd(&[4.0]), MeanNormalizedSd::Value(0.0));
    assert_eq!(normalized_sd(&[0.0]), MeanNormalizedSd::Undefined);
}

#[test]
fn manual_entry_parses_and_skips_blanks() {
    let values = parse_value_list("10, 12, 15, 11, 13").unwrap();
    assert_eq!(values, vec![10.0, 12.0, 15.0, 11.0, 13.0]);

    let values = parse_value_list(" 1.5,,  -2 , 3e1, ").unwrap();
    assert_eq!(values, vec![1.5, -2.0, 30.0]);

    assert!(parse_value_list("").unwrap().is_empty());
}

#[test]
fn manual_entry_rejects_non_numeric_token() {
    match parse_value_list("10, twelve, 15") {
        Err(LabError::Parse { token }) => assert_eq!(token, "twelve"),
        other => panic!("Expected parse error, got {other:?}"),
    }
    assert!(matches!(parse_value_list("1, inf"), Err(LabError::Parse { .. })));
}

#[test]
fn cost_variability_bundles_page_figures() {
    let v = [10.0, 12.0, 15.0, 11.0, 13.0];
    let cv = CostVariability::compute(&v).unwrap();
    assert_eq!(cv.count, 5);
    assert_abs_diff_eq!(cv.mean, 12.2, epsilon = 1e-12);
    assert_abs_diff_eq!(cv.std_dev, population_std_dev(&v).unwrap(), epsilon = 1e-12);
    assert_abs_diff_eq!(cv.normalized_std_dev, cv.std_dev / 5.0, epsilon = 1e-12);

    assert!(matches!(CostVariability::compute(&[]), Err(LabError::EmptyInput)));
}
