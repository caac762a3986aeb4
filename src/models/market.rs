//! Market data primitives consumed from the data collaborator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single OHLCV bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub timestamp: DateTime<Utc>,
}

impl PriceBar {
    pub fn new(
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            open,
            high,
            low,
            close,
            volume,
            timestamp,
        }
    }
}

/// An ordered price series with strictly increasing timestamps.
///
/// The last bar may be amended in place while it is still open (streaming
/// tick); all prior bars are immutable. Every append or amendment bumps
/// `version`, which downstream caches use to detect staleness.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriceSeries {
    bars: Vec<PriceBar>,
    version: u64,
}

impl PriceSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_bars(bars: Vec<PriceBar>) -> Self {
        debug_assert!(
            bars.windows(2).all(|w| w[0].timestamp < w[1].timestamp),
            "timestamps must be strictly increasing"
        );
        Self { bars, version: 1 }
    }

    /// Append a closed bar.
    pub fn push(&mut self, bar: PriceBar) {
        debug_assert!(
            self.bars
                .last()
                .is_none_or(|last| last.timestamp < bar.timestamp),
            "timestamps must be strictly increasing"
        );
        self.bars.push(bar);
        self.version += 1;
    }

    /// Replace the open (last) bar with a revised tick.
    ///
    /// No-op on an empty series.
    pub fn amend_last(&mut self, bar: PriceBar) {
        if let Some(last) = self.bars.last_mut() {
            debug_assert!(
                last.timestamp == bar.timestamp,
                "amendments must target the open bar"
            );
            *last = bar;
            self.version += 1;
        }
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn version(&self) -> u64 {
        self.version
    }
}

/// Which bar field feeds a computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceField {
    Close,
    Hl2,
    Hlc3,
    Ohlc4,
}

impl SourceField {
    pub fn value(&self, bar: &PriceBar) -> f64 {
        match self {
            SourceField::Close => bar.close,
            SourceField::Hl2 => (bar.high + bar.low) / 2.0,
            SourceField::Hlc3 => (bar.high + bar.low + bar.close) / 3.0,
            SourceField::Ohlc4 => (bar.open + bar.high + bar.low + bar.close) / 4.0,
        }
    }

    pub fn extract(&self, bars: &[PriceBar]) -> Vec<f64> {
        bars.iter().map(|b| self.value(b)).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSourceFieldError;

impl fmt::Display for ParseSourceFieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unknown source field")
    }
}

impl std::error::Error for ParseSourceFieldError {}

impl FromStr for SourceField {
    type Err = ParseSourceFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "close" => Ok(SourceField::Close),
            "hl2" => Ok(SourceField::Hl2),
            "hlc3" => Ok(SourceField::Hlc3),
            "ohlc4" => Ok(SourceField::Ohlc4),
            _ => Err(ParseSourceFieldError),
        }
    }
}

impl fmt::Display for SourceField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SourceField::Close => "close",
            SourceField::Hl2 => "hl2",
            SourceField::Hlc3 => "hlc3",
            SourceField::Ohlc4 => "ohlc4",
        };
        f.write_str(s)
    }
}

/// Chart look-back period selected in the UI.
///
/// Opaque to the engine: computations rely only on series ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Period {
    OneDay,
    FiveDays,
    OneMonth,
    ThreeMonths,
    SixMonths,
    OneYear,
    FiveYears,
    Max,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePeriodError;

impl fmt::Display for ParsePeriodError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unknown period")
    }
}

impl std::error::Error for ParsePeriodError {}

impl FromStr for Period {
    type Err = ParsePeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "1D" => Ok(Period::OneDay),
            "5D" => Ok(Period::FiveDays),
            "1M" => Ok(Period::OneMonth),
            "3M" => Ok(Period::ThreeMonths),
            "6M" => Ok(Period::SixMonths),
            "1Y" => Ok(Period::OneYear),
            "5Y" => Ok(Period::FiveYears),
            "MAX" => Ok(Period::Max),
            _ => Err(ParsePeriodError),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Period::OneDay => "1D",
            Period::FiveDays => "5D",
            Period::OneMonth => "1M",
            Period::ThreeMonths => "3M",
            Period::SixMonths => "6M",
            Period::OneYear => "1Y",
            Period::FiveYears => "5Y",
            Period::Max => "Max",
        };
        f.write_str(s)
    }
}

/// Bar granularity selected in the UI. Opaque to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Granularity {
    Min1,
    Min5,
    Min15,
    Hour1,
    Hour4,
    Day1,
    Week1,
    Month1,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseGranularityError;

impl fmt::Display for ParseGranularityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unknown granularity")
    }
}

impl std::error::Error for ParseGranularityError {}

impl FromStr for Granularity {
    type Err = ParseGranularityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1m" => Ok(Granularity::Min1),
            "5m" => Ok(Granularity::Min5),
            "15m" => Ok(Granularity::Min15),
            "1h" => Ok(Granularity::Hour1),
            "4h" => Ok(Granularity::Hour4),
            "1D" => Ok(Granularity::Day1),
            "1W" => Ok(Granularity::Week1),
            "1M" => Ok(Granularity::Month1),
            _ => Err(ParseGranularityError),
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Granularity::Min1 => "1m",
            Granularity::Min5 => "5m",
            Granularity::Min15 => "15m",
            Granularity::Hour1 => "1h",
            Granularity::Hour4 => "4h",
            Granularity::Day1 => "1D",
            Granularity::Week1 => "1W",
            Granularity::Month1 => "1M",
        };
        f.write_str(s)
    }
}
