use chartix::catalog::{catalog, ParamValue};
use chartix::models::{Granularity, Period, PriceBar, PriceSeries};
use chartix::view::ChartView;
use chrono::{Duration, TimeZone, Utc};
use std::collections::BTreeMap;
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    chartix::logging::init_logging();

    let period: Period = "3M".parse()?;
    let granularity: Granularity = "1D".parse()?;
    info!(%period, %granularity, "demo chart view");

    for definition in catalog().list(None) {
        info!(
            id = %definition.id,
            category = ?definition.category,
            "{}",
            definition.display_name
        );
    }

    let mut view = ChartView::new();
    let sma = view.add_indicator(
        "sma",
        &BTreeMap::from([("period".to_string(), ParamValue::Number(50.0))]),
    )?;
    let rsi = view.add_indicator("rsi", &BTreeMap::new())?;
    view.add_indicator("macd", &BTreeMap::new())?;
    let bb = view.add_indicator("bollinger", &BTreeMap::new())?;
    view.set_indicator_color(&rsi.instance.instance_id, "#facc15")?;

    // An out-of-policy override gets clamped, not rejected.
    let clamped = view.update_indicator(
        &sma.instance.instance_id,
        &BTreeMap::from([("period".to_string(), ParamValue::Number(500.0))]),
    )?;
    for adj in &clamped.adjustments {
        info!(key = %adj.key, from = adj.from, to = adj.to, "override corrected");
    }

    let mut series = synthetic_series(120);
    let frames = view.render_frames(&series)?;
    for frame in &frames {
        println!("{}", serde_json::to_string_pretty(&frame.renderable)?);
    }

    // Streaming tick: amend the open bar, then recompute.
    let mut last = *series.bars().last().expect("series is non-empty");
    last.close += 1.5;
    series.amend_last(last);
    let frames = view.render_frames(&series)?;
    for frame in &frames {
        let defined = frame.computed.outputs[0]
            .values
            .iter()
            .filter(|v| v.is_some())
            .count();
        info!(
            instance_id = %frame.computed.instance_id,
            label = %frame.renderable.label,
            defined,
            "recomputed after tick"
        );
    }

    // Removal is idempotent; the second call is a no-op.
    view.remove_indicator(&bb.instance.instance_id);
    view.remove_indicator(&bb.instance.instance_id);
    info!(active = view.manager().instances().len(), "view after removal");

    Ok(())
}

/// Deterministic synthetic daily bars: a gentle drift with a sine swing.
fn synthetic_series(bars: usize) -> PriceSeries {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let mut series = PriceSeries::new();
    for i in 0..bars {
        let base = 100.0 + i as f64 * 0.05 + 5.0 * (i as f64 * 0.3).sin();
        series.push(PriceBar::new(
            base - 0.2,
            base + 0.6,
            base - 0.7,
            base,
            1_000.0 + (i as f64 * 7.0) % 300.0,
            start + Duration::days(i as i64),
        ));
    }
    series
}
