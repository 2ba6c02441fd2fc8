//! Volatility/trend safety filters around the classifier probability
//!
//! Strict inequalities everywhere: a probability of exactly 0.53, an ATR
//! exactly equal to its average, or an ADX of exactly 20 all resolve to Wait.

use crate::models::{Signal, SignalReason};

/// Minimum buy probability, exclusive
pub const BUY_PROBABILITY_THRESHOLD: f64 = 0.53;

/// Minimum ADX for a tradeable trend, exclusive
pub const ADX_TREND_THRESHOLD: f64 = 20.0;

/// Values the policy reads off the latest indicator row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolicyInputs {
    pub probability: f64,
    pub atr: f64,
    pub atr_ma: f64,
    pub adx_real: f64,
}

/// The discrete signal plus the filters that held a buy back
#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    pub signal: Signal,
    pub reasons: Vec<SignalReason>,
}

/// State-free decision function
///
/// Reasons are collected whenever a filter is not satisfied, even when the
/// probability alone already rules a buy out.
pub fn decide(inputs: PolicyInputs) -> Decision {
    let is_volatile = inputs.atr > inputs.atr_ma;
    let is_trending = inputs.adx_real > ADX_TREND_THRESHOLD;

    let mut reasons = Vec::new();
    if !is_volatile {
        reasons.push(SignalReason::LowVolatility);
    }
    if !is_trending {
        reasons.push(SignalReason::NoTrend);
    }

    let signal = if inputs.probability > BUY_PROBABILITY_THRESHOLD && is_volatile && is_trending {
        Signal::Buy
    } else {
        Signal::Wait
    };

    Decision { signal, reasons }
}
