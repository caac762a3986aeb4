//! Unit tests for the output adapter

use chartix::catalog::{catalog, ParamValue};
use chartix::indicators::compute;
use chartix::instances::InstanceManager;
use chartix::models::{PriceBar, PriceSeries};
use chartix::render::{placement_for, to_renderable, PanelPlacement};
use chrono::{Duration, TimeZone, Utc};
use std::collections::BTreeMap;

fn sample_series(n: usize) -> PriceSeries {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let bars = (0..n)
        .map(|i| {
            let c = 100.0 + (i as f64 * 0.5).sin() * 3.0;
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

fn renderable_for(definition_id: &str, overrides: &BTreeMap<String, ParamValue>) -> chartix::render::Renderable {
    let mut manager = InstanceManager::new();
    let change = manager.create_instance(definition_id, overrides).unwrap();
    let series = sample_series(60);
    let computed = compute(&change.instance, &series).unwrap();
    let definition = catalog().get(definition_id).unwrap();
    to_renderable(&computed, &change.instance, definition)
}

#[test]
fn test_placement_by_category() {
    use chartix::catalog::Category;
    assert_eq!(placement_for(Category::Trend), PanelPlacement::Overlay);
    assert_eq!(placement_for(Category::Volatility), PanelPlacement::Overlay);
    assert_eq!(placement_for(Category::Momentum), PanelPlacement::SeparatePane);
    assert_eq!(placement_for(Category::Volume), PanelPlacement::SeparatePane);
}

#[test]
fn test_trend_overlay_momentum_pane() {
    assert_eq!(renderable_for("sma", &BTreeMap::new()).placement, PanelPlacement::Overlay);
    assert_eq!(
        renderable_for("bollinger", &BTreeMap::new()).placement,
        PanelPlacement::Overlay
    );
    assert_eq!(
        renderable_for("rsi", &BTreeMap::new()).placement,
        PanelPlacement::SeparatePane
    );
    assert_eq!(
        renderable_for("macd", &BTreeMap::new()).placement,
        PanelPlacement::SeparatePane
    );
}

#[test]
fn test_single_line_uses_instance_color() {
    let mut manager = InstanceManager::new();
    let change = manager.create_instance("sma", &BTreeMap::new()).unwrap();
    let series = sample_series(40);
    let computed = compute(&change.instance, &series).unwrap();
    let definition = catalog().get("sma").unwrap();
    let renderable = to_renderable(&computed, &change.instance, definition);

    assert_eq!(renderable.lines.len(), 1);
    assert_eq!(renderable.lines[0].name, "sma");
    assert_eq!(renderable.lines[0].color, change.instance.color);
}

#[test]
fn test_macd_sub_line_colors() {
    let renderable = renderable_for("macd", &BTreeMap::new());
    let by_name: BTreeMap<&str, &str> = renderable
        .lines
        .iter()
        .map(|l| (l.name.as_str(), l.color.as_str()))
        .collect();

    // Declared color parameters win; the main line falls back to the
    // instance color.
    assert_eq!(by_name["signal"], "#f472b6");
    assert_eq!(by_name["histogram"], "#94a3b8");
    assert_ne!(by_name["macd"], "#f472b6");
}

#[test]
fn test_band_color_override() {
    let renderable = renderable_for(
        "bollinger",
        &BTreeMap::from([(
            "upper_color".to_string(),
            ParamValue::Color("#123abc".to_string()),
        )]),
    );
    let upper = renderable.lines.iter().find(|l| l.name == "upper").unwrap();
    assert_eq!(upper.color, "#123abc");
}

#[test]
fn test_rsi_threshold_levels() {
    let renderable = renderable_for(
        "rsi",
        &BTreeMap::from([("overbought".to_string(), ParamValue::Number(80.0))]),
    );
    assert_eq!(renderable.label, "RSI(14)");
    assert_eq!(renderable.levels.len(), 2);

    let overbought = renderable
        .levels
        .iter()
        .find(|l| l.label == "overbought")
        .unwrap();
    assert_eq!(overbought.value, 80.0);
    let oversold = renderable
        .levels
        .iter()
        .find(|l| l.label == "oversold")
        .unwrap();
    assert_eq!(oversold.value, 30.0);
}

#[test]
fn test_trend_indicators_have_no_levels() {
    assert!(renderable_for("sma", &BTreeMap::new()).levels.is_empty());
    assert!(renderable_for("macd", &BTreeMap::new()).levels.is_empty());
}

#[test]
fn test_labels() {
    assert_eq!(renderable_for("sma", &BTreeMap::new()).label, "SMA(20)");
    assert_eq!(renderable_for("macd", &BTreeMap::new()).label, "MACD(12,26,9)");
    assert_eq!(
        renderable_for("bollinger", &BTreeMap::new()).label,
        "BB(20,2)"
    );
}
