//! Pure computation dispatch: (instance, series) -> computed series.
//!
//! Stateless and deterministic; identical inputs produce identical output,
//! which is what makes per-instance memoization safe upstream. Inputs are
//! never mutated. Misconfiguration (non-positive period, fast >= slow)
//! raises a validation error at call time; insufficient history does not.

use crate::catalog::{catalog, IndicatorKind, ParamValue};
use crate::indicators::error::IndicatorError;
use crate::indicators::momentum::{macd_series, rsi_series};
use crate::indicators::trend::{ema_series, sma_series};
use crate::indicators::volatility::bollinger_series;
use crate::instances::IndicatorInstance;
use crate::models::{ComputedSeries, PriceSeries, SourceField, SubSeries};
use std::collections::BTreeMap;

/// Compute the output series for one instance over the given price series.
pub fn compute(
    instance: &IndicatorInstance,
    series: &PriceSeries,
) -> Result<ComputedSeries, IndicatorError> {
    let definition = catalog().get(&instance.definition_id)?;
    let params = &instance.params;

    let outputs = match definition.kind {
        IndicatorKind::Sma => {
            let period = period_param(params, "period")?;
            let values = source_param(params)?.extract(series.bars());
            vec![SubSeries::new("sma", sma_series(&values, period))]
        }
        IndicatorKind::Ema => {
            let period = period_param(params, "period")?;
            let values = source_param(params)?.extract(series.bars());
            vec![SubSeries::new("ema", ema_series(&values, period))]
        }
        IndicatorKind::Rsi => {
            let period = period_param(params, "period")?;
            let closes = SourceField::Close.extract(series.bars());
            vec![SubSeries::new("rsi", rsi_series(&closes, period))]
        }
        IndicatorKind::Macd => {
            let fast = period_param(params, "fast_period")?;
            let slow = period_param(params, "slow_period")?;
            let signal = period_param(params, "signal_period")?;
            if fast >= slow {
                return Err(IndicatorError::InvalidConfiguration(format!(
                    "fast_period {fast} must be less than slow_period {slow}"
                )));
            }
            let closes = SourceField::Close.extract(series.bars());
            let macd = macd_series(&closes, fast, slow, signal);
            vec![
                SubSeries::new("macd", macd.macd),
                SubSeries::new("signal", macd.signal),
                SubSeries::new("histogram", macd.histogram),
            ]
        }
        IndicatorKind::Bollinger => {
            let period = period_param(params, "period")?;
            let multiplier = number_param(params, "std_dev_multiplier")?;
            let values = source_param(params)?.extract(series.bars());
            let bands = bollinger_series(&values, period, multiplier);
            vec![
                SubSeries::new("middle", bands.middle),
                SubSeries::new("upper", bands.upper),
                SubSeries::new("lower", bands.lower),
            ]
        }
    };

    Ok(ComputedSeries::new(instance.instance_id.clone(), outputs))
}

fn number_param(params: &BTreeMap<String, ParamValue>, key: &str) -> Result<f64, IndicatorError> {
    params
        .get(key)
        .and_then(ParamValue::as_number)
        .ok_or_else(|| IndicatorError::InvalidParameterValue {
            key: key.to_string(),
            reason: "missing numeric parameter".to_string(),
        })
}

/// A period is a whole bar count and must be positive.
fn period_param(params: &BTreeMap<String, ParamValue>, key: &str) -> Result<usize, IndicatorError> {
    let value = number_param(params, key)?;
    let rounded = value.round();
    if rounded < 1.0 {
        return Err(IndicatorError::InvalidConfiguration(format!(
            "{key} must be positive, got {value}"
        )));
    }
    Ok(rounded as usize)
}

/// The configured source field; defaults to close when the definition
/// declares no source parameter.
fn source_param(params: &BTreeMap<String, ParamValue>) -> Result<SourceField, IndicatorError> {
    match params.get("source") {
        Some(ParamValue::Select(s)) => {
            s.parse()
                .map_err(|_| IndicatorError::InvalidParameterValue {
                    key: "source".to_string(),
                    reason: format!("{s} is not a known source field"),
                })
        }
        Some(_) => Err(IndicatorError::InvalidParameterValue {
            key: "source".to_string(),
            reason: "value type does not match the parameter schema".to_string(),
        }),
        None => Ok(SourceField::Close),
    }
}
