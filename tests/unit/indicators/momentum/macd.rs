//! Unit tests for the MACD indicator

use chartix::catalog::ParamValue;
use chartix::indicators::momentum::macd_series;
use chartix::indicators::trend::ema_series;
use chartix::indicators::{compute, IndicatorError};
use chartix::instances::InstanceManager;
use chartix::models::{PriceBar, PriceSeries};
use chrono::{Duration, TimeZone, Utc};
use std::collections::BTreeMap;

fn series_from_closes(closes: &[f64]) -> PriceSeries {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let bars = closes
        .iter()
        .enumerate()
        .map(|(i, &c)| {
            PriceBar::new(
                c,
                c + 0.5,
                c - 0.5,
                c,
                1000.0,
                start + Duration::days(i as i64),
            )
        })
        .collect();
    PriceSeries::from_bars(bars)
}

fn sample_closes(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| 100.0 + (i as f64 * 0.7).sin() * 4.0 + i as f64 * 0.1)
        .collect()
}

#[test]
fn test_first_defined_indices() {
    let closes = sample_closes(12);
    let out = macd_series(&closes, 3, 5, 3);

    // MACD defined where the slow EMA is: index slow - 1 = 4.
    assert_eq!(out.macd.iter().position(Option::is_some), Some(4));
    // Signal seeds over the first signal_period MACD values: 4 + 3 - 1 = 6.
    assert_eq!(out.signal.iter().position(Option::is_some), Some(6));
    assert_eq!(out.histogram.iter().position(Option::is_some), Some(6));
}

#[test]
fn test_macd_line_is_ema_difference() {
    let closes = sample_closes(40);
    let out = macd_series(&closes, 12, 26, 9);
    let fast = ema_series(&closes, 12);
    let slow = ema_series(&closes, 26);

    for i in 0..closes.len() {
        match (fast[i], slow[i]) {
            (Some(f), Some(s)) => {
                assert!((out.macd[i].unwrap() - (f - s)).abs() < 1e-9);
            }
            _ => assert_eq!(out.macd[i], None),
        }
    }
}

#[test]
fn test_histogram_identity() {
    let closes = sample_closes(60);
    let out = macd_series(&closes, 12, 26, 9);

    let mut checked = 0;
    for i in 0..closes.len() {
        if let (Some(m), Some(s)) = (out.macd[i], out.signal[i]) {
            let h = out.histogram[i].unwrap();
            assert_eq!(h, m - s, "histogram must equal macd - signal exactly");
            checked += 1;
        }
    }
    assert!(checked > 0);
}

#[test]
fn test_outputs_aligned_with_input() {
    let closes = sample_closes(50);
    let out = macd_series(&closes, 12, 26, 9);
    assert_eq!(out.macd.len(), 50);
    assert_eq!(out.signal.len(), 50);
    assert_eq!(out.histogram.len(), 50);
}

#[test]
fn test_series_shorter_than_slow_period() {
    let closes = sample_closes(10);
    let out = macd_series(&closes, 12, 26, 9);
    assert!(out.macd.iter().all(Option::is_none));
    assert!(out.signal.iter().all(Option::is_none));
    assert!(out.histogram.iter().all(Option::is_none));
}

#[test]
fn test_compute_rejects_fast_not_below_slow() {
    let mut manager = InstanceManager::new();
    let change = manager
        .create_instance(
            "macd",
            &BTreeMap::from([
                ("fast_period".to_string(), ParamValue::Number(26.0)),
                ("slow_period".to_string(), ParamValue::Number(12.0)),
            ]),
        )
        .unwrap();

    let series = series_from_closes(&sample_closes(40));
    let err = compute(&change.instance, &series).unwrap_err();
    assert!(matches!(err, IndicatorError::InvalidConfiguration(_)));
    assert!(err.is_validation());
}

#[test]
fn test_compute_produces_three_outputs() {
    let mut manager = InstanceManager::new();
    let change = manager.create_instance("macd", &BTreeMap::new()).unwrap();

    let series = series_from_closes(&sample_closes(60));
    let computed = compute(&change.instance, &series).unwrap();
    let names: Vec<&str> = computed.outputs.iter().map(|o| o.name.as_str()).collect();
    assert_eq!(names, vec!["macd", "signal", "histogram"]);
}

#[test]
fn test_insufficient_history_is_not_an_error() {
    let mut manager = InstanceManager::new();
    let change = manager.create_instance("macd", &BTreeMap::new()).unwrap();

    let series = series_from_closes(&sample_closes(5));
    let computed = compute(&change.instance, &series).unwrap();
    for output in &computed.outputs {
        assert_eq!(output.values.len(), 5);
        assert!(output.values.iter().all(Option::is_none));
    }
}
