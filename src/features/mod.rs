//! Derived feature columns for the classifier
//!
//! One row per candle position, computed strictly from the supplied window.
//! Early positions carry warm-up nulls; callers read the last row and must
//! treat a null there as an error, never as zero.

pub mod assembler;

use crate::indicators::{
    adx_series, atr_series, sma_series, ADX_PERIOD, ATR_MA_PERIOD, ATR_PERIOD,
};
use crate::models::Candle;

/// Guards the wick-ratio denominator on zero-range candles
pub const RANGE_EPSILON: f64 = 1e-6;

/// Columns the engine produces, named as in the training frame
pub const COLUMN_NAMES: &[&str] = &[
    "atr",
    "atr_ma",
    "atr_rel",
    "adx_real",
    "adx",
    "hour",
    "ret_1",
    "ret_3",
    "upper_wick",
    "lower_wick",
];

/// Derived values attached to one candle position
///
/// Rolling columns are None until their lookback is filled; per-bar columns
/// are always defined.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorRow {
    pub atr: Option<f64>,
    pub atr_ma: Option<f64>,
    pub atr_rel: Option<f64>,
    pub adx_real: Option<f64>,
    pub adx: Option<f64>,
    pub hour: f64,
    pub ret_1: Option<f64>,
    pub ret_3: Option<f64>,
    pub upper_wick: f64,
    pub lower_wick: f64,
}

impl IndicatorRow {
    /// Look up a column by its training-frame name
    ///
    /// Outer None means the engine has no such column; `Some(None)` means the
    /// column exists but has no value at this position.
    pub fn column(&self, name: &str) -> Option<Option<f64>> {
        match name {
            "atr" => Some(self.atr),
            "atr_ma" => Some(self.atr_ma),
            "atr_rel" => Some(self.atr_rel),
            "adx_real" => Some(self.adx_real),
            "adx" => Some(self.adx),
            "hour" => Some(Some(self.hour)),
            "ret_1" => Some(self.ret_1),
            "ret_3" => Some(self.ret_3),
            "upper_wick" => Some(Some(self.upper_wick)),
            "lower_wick" => Some(Some(self.lower_wick)),
            _ => None,
        }
    }
}

/// Compute the full indicator frame for a candle window
///
/// `hour` is the wall-clock hour of the evaluation, not a property of the
/// candles; see `SignalEngine` for where it comes from.
pub fn compute_rows(candles: &[Candle], hour: u32) -> Vec<IndicatorRow> {
    let atr = atr_series(candles, ATR_PERIOD);
    let atr_ma = sma_series(&atr, ATR_MA_PERIOD);
    let adx_real = adx_series(candles, ADX_PERIOD);

    let mut rows = Vec::with_capacity(candles.len());
    for (i, candle) in candles.iter().enumerate() {
        let range = candle.high - candle.low + RANGE_EPSILON;
        rows.push(IndicatorRow {
            atr: atr[i],
            atr_ma: atr_ma[i],
            atr_rel: atr[i].map(|a| a / candle.close),
            adx_real: adx_real[i],
            adx: adx_real[i].map(|a| a / 100.0),
            hour: f64::from(hour),
            ret_1: pct_change(candles, i, 1),
            ret_3: pct_change(candles, i, 3),
            upper_wick: (candle.high - candle.body_high()) / range,
            lower_wick: (candle.body_low() - candle.low) / range,
        });
    }
    rows
}

/// close_t / close_{t-k} - 1, None before k prior closes exist
fn pct_change(candles: &[Candle], i: usize, k: usize) -> Option<f64> {
    if i < k {
        return None;
    }
    Some(candles[i].close / candles[i - k].close - 1.0)
}
