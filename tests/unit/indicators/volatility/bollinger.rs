//! Unit tests for the Bollinger Bands indicator

use chartix::indicators::volatility::bollinger_series;

#[test]
fn test_defined_from_period_minus_one() {
    let values: Vec<f64> = (1..=10).map(f64::from).collect();
    let out = bollinger_series(&values, 4, 2.0);
    assert_eq!(out.middle.iter().position(Option::is_some), Some(3));
    assert_eq!(out.upper.iter().position(Option::is_some), Some(3));
    assert_eq!(out.lower.iter().position(Option::is_some), Some(3));
}

#[test]
fn test_population_standard_deviation() {
    // Window [1, 2, 3, 4]: mean 2.5, population variance 1.25.
    let out = bollinger_series(&[1.0, 2.0, 3.0, 4.0], 4, 2.0);
    let sigma = 1.25_f64.sqrt();
    assert!((out.middle[3].unwrap() - 2.5).abs() < 1e-9);
    assert!((out.upper[3].unwrap() - (2.5 + 2.0 * sigma)).abs() < 1e-9);
    assert!((out.lower[3].unwrap() - (2.5 - 2.0 * sigma)).abs() < 1e-9);
}

#[test]
fn test_band_ordering() {
    let values: Vec<f64> = (0..40)
        .map(|i| 100.0 + (i as f64 * 0.9).sin() * 6.0)
        .collect();
    let out = bollinger_series(&values, 10, 2.0);

    for i in 0..values.len() {
        if let (Some(u), Some(m), Some(l)) = (out.upper[i], out.middle[i], out.lower[i]) {
            assert!(u >= m, "upper {u} < middle {m} at {i}");
            assert!(m >= l, "middle {m} < lower {l} at {i}");
        }
    }
}

#[test]
fn test_flat_window_collapses_bands() {
    let out = bollinger_series(&[100.0; 10], 5, 2.0);
    for i in 4..10 {
        assert!((out.upper[i].unwrap() - 100.0).abs() < 1e-9);
        assert!((out.middle[i].unwrap() - 100.0).abs() < 1e-9);
        assert!((out.lower[i].unwrap() - 100.0).abs() < 1e-9);
    }
}

#[test]
fn test_zero_multiplier_equals_middle() {
    let values: Vec<f64> = (1..=12).map(f64::from).collect();
    let out = bollinger_series(&values, 5, 0.0);
    for i in 0..values.len() {
        assert_eq!(out.upper[i], out.middle[i]);
        assert_eq!(out.lower[i], out.middle[i]);
    }
}

#[test]
fn test_insufficient_data() {
    let out = bollinger_series(&[1.0, 2.0], 5, 2.0);
    assert!(out.middle.iter().all(Option::is_none));
    assert!(out.upper.iter().all(Option::is_none));
    assert!(out.lower.iter().all(Option::is_none));
}
