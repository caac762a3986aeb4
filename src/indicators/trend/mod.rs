pub mod ema;
pub mod sma;

pub use ema::ema_series;
pub use sma::sma_series;
