// Technical indicators module
// Wilder ATR and ADX plus the moving average that smooths the ATR column

pub mod adx;
pub mod atr;
pub mod moving_average;

pub use adx::adx_series;
pub use atr::{atr_series, true_range};
pub use moving_average::sma_series;

/// ATR lookback (Wilder smoothing)
pub const ATR_PERIOD: usize = 14;

/// Simple moving average window applied to the ATR column
pub const ATR_MA_PERIOD: usize = 50;

/// ADX lookback (Wilder smoothing)
pub const ADX_PERIOD: usize = 14;
