//! RSI (Relative Strength Index) indicator
//!
//! Wilder smoothing: the seed averages are simple means of the gains and
//! losses over the first `period` deltas, then
//!
//!   avg_gain = (avg_gain * (period - 1) + gain) / period
//!   avg_loss = (avg_loss * (period - 1) + loss) / period
//!
//! RS = avg_gain / avg_loss, RSI = 100 - 100 / (1 + RS).

/// Compute the RSI series of `closes` over `period`.
///
/// Index-aligned with the input; the first defined index is `period`
/// (the first `period` deltas seed the averages). Degenerate averages
/// resolve by fixed policy instead of raising: RSI is 100 when the average
/// loss is zero, and 0 when the average gain is zero while losses exist.
pub fn rsi_series(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; closes.len()];
    if period == 0 || closes.len() < period + 1 {
        return out;
    }

    let period_f = period as f64;
    let mut avg_gain = 0.0;
    let mut avg_loss = 0.0;
    for w in closes.windows(2).take(period) {
        let delta = w[1] - w[0];
        if delta > 0.0 {
            avg_gain += delta;
        } else {
            avg_loss += -delta;
        }
    }
    avg_gain /= period_f;
    avg_loss /= period_f;
    out[period] = Some(rsi_from_averages(avg_gain, avg_loss));

    for i in period + 1..closes.len() {
        let delta = closes[i] - closes[i - 1];
        let gain = delta.max(0.0);
        let loss = (-delta).max(0.0);
        avg_gain = (avg_gain * (period_f - 1.0) + gain) / period_f;
        avg_loss = (avg_loss * (period_f - 1.0) + loss) / period_f;
        out[i] = Some(rsi_from_averages(avg_gain, avg_loss));
    }
    out
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        100.0
    } else if avg_gain == 0.0 {
        0.0
    } else {
        let rs = avg_gain / avg_loss;
        100.0 - 100.0 / (1.0 + rs)
    }
}
