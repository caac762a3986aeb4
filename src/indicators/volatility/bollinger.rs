//! Bollinger Bands indicator
//!
//! Middle Band = SMA(period)
//! Upper Band = Middle + multiplier * sigma
//! Lower Band = Middle - multiplier * sigma
//!
//! sigma is the population standard deviation of the window (divide by
//! `period`, not `period - 1`); the convention never changes mid-series.

/// The three index-aligned band lines.
#[derive(Debug, Clone, PartialEq)]
pub struct BollingerSeries {
    pub middle: Vec<Option<f64>>,
    pub upper: Vec<Option<f64>>,
    pub lower: Vec<Option<f64>>,
}

/// Compute Bollinger Bands over `values`.
///
/// Defined from index `period - 1`; earlier positions are `None`.
pub fn bollinger_series(values: &[f64], period: usize, multiplier: f64) -> BollingerSeries {
    let len = values.len();
    let mut bands = BollingerSeries {
        middle: vec![None; len],
        upper: vec![None; len],
        lower: vec![None; len],
    };
    if period == 0 || len < period {
        return bands;
    }

    let n = period as f64;
    let mut sum = 0.0;
    let mut sum_sq = 0.0;
    for (i, &v) in values.iter().enumerate() {
        sum += v;
        sum_sq += v * v;
        if i >= period {
            let old = values[i - period];
            sum -= old;
            sum_sq -= old * old;
        }
        if i + 1 >= period {
            let mean = sum / n;
            // Guard against tiny negative variance from float cancellation.
            let variance = (sum_sq / n - mean * mean).max(0.0);
            let sigma = variance.sqrt();
            bands.middle[i] = Some(mean);
            bands.upper[i] = Some(mean + multiplier * sigma);
            bands.lower[i] = Some(mean - multiplier * sigma);
        }
    }
    bands
}
