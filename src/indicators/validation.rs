//! Schema-driven parameter validation.
//!
//! Overrides are checked against the catalog's parameter specs: numeric
//! values are clamped into `[min, max]` and snapped to the nearest `step`,
//! select values must name a listed option, colors must be `#rrggbb`
//! literals, and unknown keys are rejected. Every auto-correction is
//! reported back so the UI can tell the user what changed.

use crate::catalog::{IndicatorDefinition, ParamKind, ParamValue};
use crate::indicators::error::IndicatorError;
use std::collections::BTreeMap;

/// Parameter overrides as supplied by the configuration collaborator.
pub type ParamOverrides = BTreeMap<String, ParamValue>;

/// How an out-of-policy numeric override was corrected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdjustmentKind {
    Clamped,
    Snapped,
}

/// One auto-correction applied during validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamAdjustment {
    pub key: String,
    pub from: f64,
    pub to: f64,
    pub kind: AdjustmentKind,
}

/// Merge `overrides` over the definition's defaults, validating each entry.
///
/// Returns the resolved parameter map plus the list of adjustments applied.
pub fn resolve_parameters(
    definition: &IndicatorDefinition,
    overrides: &ParamOverrides,
) -> Result<(BTreeMap<String, ParamValue>, Vec<ParamAdjustment>), IndicatorError> {
    let mut resolved: BTreeMap<String, ParamValue> = definition
        .params
        .iter()
        .map(|spec| (spec.key.clone(), spec.default.clone()))
        .collect();
    let mut adjustments = Vec::new();

    for (key, value) in overrides {
        let spec = definition
            .param(key)
            .ok_or_else(|| IndicatorError::UnknownParameter {
                definition: definition.id.clone(),
                key: key.clone(),
            })?;

        let accepted = match (&spec.kind, value) {
            (ParamKind::Number { min, max, step }, ParamValue::Number(v)) => {
                let corrected = correct_number(key, *v, *min, *max, *step, &mut adjustments)?;
                ParamValue::Number(corrected)
            }
            (ParamKind::Color, ParamValue::Color(c)) => {
                validate_color(key, c)?;
                ParamValue::Color(c.clone())
            }
            (ParamKind::Select { options }, ParamValue::Select(s)) => {
                if !options.iter().any(|o| o == s) {
                    return Err(IndicatorError::InvalidParameterValue {
                        key: key.clone(),
                        reason: format!("{s} is not one of {}", options.join(", ")),
                    });
                }
                ParamValue::Select(s.clone())
            }
            _ => {
                return Err(IndicatorError::InvalidParameterValue {
                    key: key.clone(),
                    reason: "value type does not match the parameter schema".to_string(),
                });
            }
        };

        resolved.insert(key.clone(), accepted);
    }

    Ok((resolved, adjustments))
}

fn correct_number(
    key: &str,
    value: f64,
    min: Option<f64>,
    max: Option<f64>,
    step: Option<f64>,
    adjustments: &mut Vec<ParamAdjustment>,
) -> Result<f64, IndicatorError> {
    if !value.is_finite() {
        return Err(IndicatorError::InvalidParameterValue {
            key: key.to_string(),
            reason: "value must be finite".to_string(),
        });
    }

    let mut corrected = value;

    if let Some(min) = min {
        if corrected < min {
            corrected = min;
        }
    }
    if let Some(max) = max {
        if corrected > max {
            corrected = max;
        }
    }
    if corrected != value {
        adjustments.push(ParamAdjustment {
            key: key.to_string(),
            from: value,
            to: corrected,
            kind: AdjustmentKind::Clamped,
        });
    }

    if let Some(step) = step {
        if step > 0.0 {
            // Snap to the step grid anchored at `min` (or zero).
            let anchor = min.unwrap_or(0.0);
            let snapped = anchor + ((corrected - anchor) / step).round() * step;
            if (snapped - corrected).abs() > f64::EPSILON * corrected.abs().max(1.0) {
                adjustments.push(ParamAdjustment {
                    key: key.to_string(),
                    from: corrected,
                    to: snapped,
                    kind: AdjustmentKind::Snapped,
                });
                corrected = snapped;
            }
        }
    }

    Ok(corrected)
}

/// Accepts `#rrggbb` literals only.
pub fn validate_color(key: &str, color: &str) -> Result<(), IndicatorError> {
    let valid = color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit());
    if valid {
        Ok(())
    } else {
        Err(IndicatorError::InvalidParameterValue {
            key: key.to_string(),
            reason: format!("{color} is not a #rrggbb color"),
        })
    }
}
