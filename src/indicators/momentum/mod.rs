pub mod macd;
pub mod rsi;

pub use macd::{macd_series, MacdSeries};
pub use rsi::rsi_series;
