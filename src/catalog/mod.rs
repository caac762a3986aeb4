//! Static, read-only registry of indicator definitions.
//!
//! Loaded once per process; no mutation operations exist.

use crate::indicators::IndicatorError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Indicator category, drives default panel placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Trend,
    Momentum,
    Volatility,
    Volume,
}

/// Supported indicator kinds. The computation dispatch matches on this
/// exhaustively, so adding a kind is a compile-checked change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndicatorKind {
    Sma,
    Ema,
    Rsi,
    Macd,
    Bollinger,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIndicatorKindError;

impl fmt::Display for ParseIndicatorKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unknown indicator kind")
    }
}

impl std::error::Error for ParseIndicatorKindError {}

impl FromStr for IndicatorKind {
    type Err = ParseIndicatorKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sma" | "ma" => Ok(IndicatorKind::Sma),
            "ema" => Ok(IndicatorKind::Ema),
            "rsi" => Ok(IndicatorKind::Rsi),
            "macd" => Ok(IndicatorKind::Macd),
            "bollinger" | "bbands" | "bollinger_bands" => Ok(IndicatorKind::Bollinger),
            _ => Err(ParseIndicatorKindError),
        }
    }
}

/// A resolved parameter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamValue {
    Number(f64),
    Color(String),
    Select(String),
}

impl ParamValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ParamValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<&str> {
        match self {
            ParamValue::Color(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_select(&self) -> Option<&str> {
        match self {
            ParamValue::Select(s) => Some(s),
            _ => None,
        }
    }
}

/// Schema of one parameter: value kind plus numeric policy or option list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "type")]
pub enum ParamKind {
    Number {
        min: Option<f64>,
        max: Option<f64>,
        step: Option<f64>,
    },
    Color,
    Select {
        options: Vec<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSpec {
    pub key: String,
    pub kind: ParamKind,
    pub default: ParamValue,
}

impl ParameterSpec {
    fn number(key: &str, default: f64, min: f64, max: f64, step: f64) -> Self {
        Self {
            key: key.to_string(),
            kind: ParamKind::Number {
                min: Some(min),
                max: Some(max),
                step: Some(step),
            },
            default: ParamValue::Number(default),
        }
    }

    fn color(key: &str, default: &str) -> Self {
        Self {
            key: key.to_string(),
            kind: ParamKind::Color,
            default: ParamValue::Color(default.to_string()),
        }
    }

    fn select(key: &str, default: &str, options: &[&str]) -> Self {
        Self {
            key: key.to_string(),
            kind: ParamKind::Select {
                options: options.iter().map(|o| o.to_string()).collect(),
            },
            default: ParamValue::Select(default.to_string()),
        }
    }
}

/// Immutable definition of one indicator type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorDefinition {
    pub id: String,
    pub display_name: String,
    pub kind: IndicatorKind,
    pub category: Category,
    pub params: Vec<ParameterSpec>,
}

impl IndicatorDefinition {
    pub fn param(&self, key: &str) -> Option<&ParameterSpec> {
        self.params.iter().find(|p| p.key == key)
    }
}

/// The indicator catalog: definitions in declaration order.
#[derive(Debug)]
pub struct Catalog {
    definitions: Vec<IndicatorDefinition>,
}

const SOURCE_OPTIONS: &[&str] = &["close", "hl2", "hlc3", "ohlc4"];

impl Catalog {
    fn bootstrap() -> Self {
        let definitions = vec![
            IndicatorDefinition {
                id: "sma".to_string(),
                display_name: "Simple Moving Average".to_string(),
                kind: IndicatorKind::Sma,
                category: Category::Trend,
                params: vec![
                    ParameterSpec::number("period", 20.0, 1.0, 200.0, 1.0),
                    ParameterSpec::select("source", "close", SOURCE_OPTIONS),
                ],
            },
            IndicatorDefinition {
                id: "ema".to_string(),
                display_name: "Exponential Moving Average".to_string(),
                kind: IndicatorKind::Ema,
                category: Category::Trend,
                params: vec![
                    ParameterSpec::number("period", 20.0, 1.0, 200.0, 1.0),
                    ParameterSpec::select("source", "close", SOURCE_OPTIONS),
                ],
            },
            IndicatorDefinition {
                id: "rsi".to_string(),
                display_name: "Relative Strength Index".to_string(),
                kind: IndicatorKind::Rsi,
                category: Category::Momentum,
                params: vec![
                    ParameterSpec::number("period", 14.0, 2.0, 100.0, 1.0),
                    ParameterSpec::number("overbought", 70.0, 50.0, 100.0, 1.0),
                    ParameterSpec::number("oversold", 30.0, 0.0, 50.0, 1.0),
                ],
            },
            IndicatorDefinition {
                id: "macd".to_string(),
                display_name: "MACD".to_string(),
                kind: IndicatorKind::Macd,
                category: Category::Momentum,
                params: vec![
                    ParameterSpec::number("fast_period", 12.0, 1.0, 100.0, 1.0),
                    ParameterSpec::number("slow_period", 26.0, 2.0, 200.0, 1.0),
                    ParameterSpec::number("signal_period", 9.0, 1.0, 100.0, 1.0),
                    ParameterSpec::color("signal_color", "#f472b6"),
                    ParameterSpec::color("histogram_color", "#94a3b8"),
                ],
            },
            IndicatorDefinition {
                id: "bollinger".to_string(),
                display_name: "Bollinger Bands".to_string(),
                kind: IndicatorKind::Bollinger,
                category: Category::Volatility,
                params: vec![
                    ParameterSpec::number("period", 20.0, 1.0, 200.0, 1.0),
                    ParameterSpec::number("std_dev_multiplier", 2.0, 0.0, 5.0, 0.1),
                    ParameterSpec::color("upper_color", "#93c5fd"),
                    ParameterSpec::color("lower_color", "#93c5fd"),
                    ParameterSpec::select("source", "close", SOURCE_OPTIONS),
                ],
            },
        ];
        Self { definitions }
    }

    /// Look up a definition by id.
    pub fn get(&self, id: &str) -> Result<&IndicatorDefinition, IndicatorError> {
        self.definitions
            .iter()
            .find(|d| d.id == id)
            .ok_or_else(|| IndicatorError::UnknownDefinition(id.to_string()))
    }

    /// All definitions in declaration order, optionally filtered by category.
    pub fn list(&self, category: Option<Category>) -> Vec<&IndicatorDefinition> {
        self.definitions
            .iter()
            .filter(|d| category.is_none_or(|c| d.category == c))
            .collect()
    }
}

/// Process-wide catalog, initialized on first access.
pub fn catalog() -> &'static Catalog {
    static CATALOG: OnceLock<Catalog> = OnceLock::new();
    CATALOG.get_or_init(Catalog::bootstrap)
}
