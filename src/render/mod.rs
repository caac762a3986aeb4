//! Output adapter: packages computed series for the rendering collaborator.
//!
//! Pure and side-effect free. Panel placement follows the definition's
//! category; line colors come from per-sub-line color parameters when the
//! definition declares them, else from the instance's single color.

use crate::catalog::{Category, IndicatorDefinition, IndicatorKind, ParamValue};
use crate::instances::IndicatorInstance;
use crate::models::ComputedSeries;
use serde::{Deserialize, Serialize};

/// Where the rendering collaborator draws an indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelPlacement {
    Overlay,
    SeparatePane,
}

/// Display descriptor for one output line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineDescriptor {
    pub name: String,
    pub color: String,
}

/// A constant horizontal threshold line (e.g. RSI overbought).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelLine {
    pub label: String,
    pub value: f64,
}

/// Render-ready descriptor for one indicator instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Renderable {
    pub instance_id: String,
    pub label: String,
    pub category: Category,
    pub placement: PanelPlacement,
    pub lines: Vec<LineDescriptor>,
    pub levels: Vec<LevelLine>,
}

/// Trend and volatility kinds draw on the price pane; momentum and volume
/// kinds get their own pane.
pub fn placement_for(category: Category) -> PanelPlacement {
    match category {
        Category::Trend | Category::Volatility => PanelPlacement::Overlay,
        Category::Momentum | Category::Volume => PanelPlacement::SeparatePane,
    }
}

/// Build the render descriptor for a computed series.
pub fn to_renderable(
    computed: &ComputedSeries,
    instance: &IndicatorInstance,
    definition: &IndicatorDefinition,
) -> Renderable {
    let lines = computed
        .outputs
        .iter()
        .map(|output| {
            let color = instance
                .params
                .get(&format!("{}_color", output.name))
                .and_then(ParamValue::as_color)
                .unwrap_or(&instance.color)
                .to_string();
            LineDescriptor {
                name: output.name.clone(),
                color,
            }
        })
        .collect();

    let levels = ["overbought", "oversold"]
        .iter()
        .filter_map(|key| {
            instance
                .params
                .get(*key)
                .and_then(ParamValue::as_number)
                .map(|value| LevelLine {
                    label: (*key).to_string(),
                    value,
                })
        })
        .collect();

    Renderable {
        instance_id: instance.instance_id.clone(),
        label: label_for(instance, definition),
        category: definition.category,
        placement: placement_for(definition.category),
        lines,
        levels,
    }
}

fn number(instance: &IndicatorInstance, key: &str) -> f64 {
    instance
        .params
        .get(key)
        .and_then(ParamValue::as_number)
        .unwrap_or(0.0)
}

fn label_for(instance: &IndicatorInstance, definition: &IndicatorDefinition) -> String {
    match definition.kind {
        IndicatorKind::Sma => format!("SMA({})", number(instance, "period")),
        IndicatorKind::Ema => format!("EMA({})", number(instance, "period")),
        IndicatorKind::Rsi => format!("RSI({})", number(instance, "period")),
        IndicatorKind::Macd => format!(
            "MACD({},{},{})",
            number(instance, "fast_period"),
            number(instance, "slow_period"),
            number(instance, "signal_period")
        ),
        IndicatorKind::Bollinger => format!(
            "BB({},{})",
            number(instance, "period"),
            number(instance, "std_dev_multiplier")
        ),
    }
}
