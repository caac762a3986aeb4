//! MACD (Moving Average Convergence Divergence) indicator
//!
//! MACD = EMA(fast) - EMA(slow)
//! Signal = EMA(signal_period) of the MACD line
//! Histogram = MACD - Signal

use crate::indicators::trend::ema_series;

/// The three index-aligned MACD output lines.
#[derive(Debug, Clone, PartialEq)]
pub struct MacdSeries {
    pub macd: Vec<Option<f64>>,
    pub signal: Vec<Option<f64>>,
    pub histogram: Vec<Option<f64>>,
}

/// Compute MACD over `closes`.
///
/// The MACD line is defined from index `slow - 1` (where both EMAs exist).
/// The signal line applies the standard SMA-seeded EMA to the MACD line
/// starting at its first defined index, so it is defined from
/// `slow + signal_period - 2`; the histogram follows the signal line.
///
/// Callers must ensure `fast < slow`; the engine validates this before
/// dispatching.
pub fn macd_series(closes: &[f64], fast: usize, slow: usize, signal_period: usize) -> MacdSeries {
    let len = closes.len();
    let fast_ema = ema_series(closes, fast);
    let slow_ema = ema_series(closes, slow);

    let mut macd = vec![None; len];
    for i in 0..len {
        if let (Some(f), Some(s)) = (fast_ema[i], slow_ema[i]) {
            macd[i] = Some(f - s);
        }
    }

    let mut signal = vec![None; len];
    let mut histogram = vec![None; len];
    if let Some(start) = macd.iter().position(Option::is_some) {
        // The MACD line is contiguous from its first defined index.
        let defined: Vec<f64> = macd[start..].iter().filter_map(|v| *v).collect();
        let signal_on_defined = ema_series(&defined, signal_period);
        for (offset, value) in signal_on_defined.into_iter().enumerate() {
            if let Some(s) = value {
                signal[start + offset] = Some(s);
                histogram[start + offset] = Some(defined[offset] - s);
            }
        }
    }

    MacdSeries {
        macd,
        signal,
        histogram,
    }
}
