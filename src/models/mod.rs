use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::SignalError;

/// One OHLC price bar for a fixed time bucket. Immutable once recorded.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Candle {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Candle {
    pub fn new(open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            open,
            high,
            low,
            close,
        }
    }

    /// Reject candles before they reach the indicator engine
    ///
    /// All four fields must be finite and the high may not sit below the low.
    pub fn validate(&self) -> Result<(), SignalError> {
        let fields = [
            ("open", self.open),
            ("high", self.high),
            ("low", self.low),
            ("close", self.close),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(SignalError::InvalidInput(format!(
                    "{name} is not a finite number"
                )));
            }
        }
        if self.high < self.low {
            return Err(SignalError::InvalidInput(format!(
                "high {} is below low {}",
                self.high, self.low
            )));
        }
        Ok(())
    }

    /// Top of the candle body
    pub fn body_high(&self) -> f64 {
        self.open.max(self.close)
    }

    /// Bottom of the candle body
    pub fn body_low(&self) -> f64 {
        self.open.min(self.close)
    }
}

/// Final discrete trading signal
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Signal {
    Buy,
    Wait,
}

/// Safety filter that held a buy back (or would have)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SignalReason {
    LowVolatility,
    NoTrend,
}

impl SignalReason {
    /// Operator-facing warning text
    pub fn describe(&self) -> &'static str {
        match self {
            SignalReason::LowVolatility => "market is low volatility (ATR below its 50-period average)",
            SignalReason::NoTrend => "market has no trend (ADX at or below 20)",
        }
    }
}

/// Outcome of one pipeline evaluation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SignalReport {
    pub signal: Signal,
    /// Buy probability the classifier produced, in [0, 1]
    pub probability: f64,
    /// Shown regardless of the final signal, to explain a Wait
    pub reasons: Vec<SignalReason>,
}

/// Journal payload for one emitted signal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalRecord {
    pub id: Uuid,
    pub time: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub confidence_pct: f64,
    pub signal: Signal,
}

impl SignalRecord {
    pub fn new(candle: &Candle, report: &SignalReport) -> Self {
        Self {
            id: Uuid::new_v4(),
            time: Utc::now(),
            open: candle.open,
            high: candle.high,
            low: candle.low,
            close: candle.close,
            confidence_pct: report.probability * 100.0,
            signal: report.signal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_candle_passes() {
        let candle = Candle::new(2000.0, 2010.0, 1995.0, 2005.0);
        assert!(candle.validate().is_ok());
    }

    #[test]
    fn test_non_finite_field_rejected() {
        let candle = Candle::new(f64::NAN, 2010.0, 1995.0, 2005.0);
        let err = candle.validate().unwrap_err();
        assert!(matches!(err, SignalError::InvalidInput(_)));

        let candle = Candle::new(2000.0, f64::INFINITY, 1995.0, 2005.0);
        assert!(candle.validate().is_err());
    }

    #[test]
    fn test_high_below_low_rejected() {
        let candle = Candle::new(2000.0, 1990.0, 1995.0, 2005.0);
        assert!(candle.validate().is_err());
    }

    #[test]
    fn test_body_edges() {
        // Bearish candle: open above close
        let candle = Candle::new(2010.0, 2020.0, 1990.0, 2000.0);
        assert_eq!(candle.body_high(), 2010.0);
        assert_eq!(candle.body_low(), 2000.0);
    }

    #[test]
    fn test_record_carries_confidence_percent() {
        let candle = Candle::new(2005.0, 2020.0, 2000.0, 2018.0);
        let report = SignalReport {
            signal: Signal::Wait,
            probability: 0.481,
            reasons: vec![SignalReason::NoTrend],
        };

        let record = SignalRecord::new(&candle, &report);
        assert_eq!(record.signal, Signal::Wait);
        assert!((record.confidence_pct - 48.1).abs() < 1e-9);
        assert_eq!(record.close, 2018.0);
    }
}
