//! End-to-end signal evaluation
//!
//! One request runs start to finish with no suspension points and no shared
//! mutable state: the stored history and the model package are read-only,
//! and the appended candle lives in a per-request copy of the trailing
//! window. Identical inputs at the same hour produce bit-identical output.

use chrono::{Local, Timelike};

use crate::error::SignalError;
use crate::features::{assembler, compute_rows, IndicatorRow};
use crate::history::CandleHistory;
use crate::model::ModelPackage;
use crate::models::{Candle, SignalReport};
use crate::policy::{self, PolicyInputs};

/// Trailing history candles fed to the indicator engine per request
pub const HISTORY_WINDOW: usize = 100;

pub struct SignalEngine {
    model: ModelPackage,
    history: CandleHistory,
}

impl SignalEngine {
    pub fn new(model: ModelPackage, history: CandleHistory) -> Self {
        Self { model, history }
    }

    /// Score one newly closed candle against the stored history
    ///
    /// The hour feature is read from the wall clock here, so two calls that
    /// straddle an hour boundary can legitimately differ for identical price
    /// data. Use `evaluate_at_hour` to pin it.
    pub fn evaluate(&self, candle: Candle) -> crate::Result<SignalReport> {
        self.evaluate_at_hour(candle, Local::now().hour())
    }

    /// Same pipeline with the hour feature pinned by the caller
    pub fn evaluate_at_hour(&self, candle: Candle, hour: u32) -> crate::Result<SignalReport> {
        candle.validate()?;

        let series = self.history.append_to_window(HISTORY_WINDOW, candle)?;
        let rows = compute_rows(&series, hour);
        let Some(last) = rows.last() else {
            // Unreachable: the appended series always has at least one candle
            return Err(SignalError::InsufficientHistory { have: 0, need: 1 });
        };

        let features = assembler::assemble(last, self.model.feature_names())?;
        let probability = self.model.predict(&features)?;

        let decision = policy::decide(PolicyInputs {
            probability,
            atr: policy_input(last, "atr")?,
            atr_ma: policy_input(last, "atr_ma")?,
            adx_real: policy_input(last, "adx_real")?,
        });

        tracing::debug!(
            "Evaluated candle close={} -> {:?} at {:.4} probability",
            candle.close,
            decision.signal,
            probability
        );

        Ok(SignalReport {
            signal: decision.signal,
            probability,
            reasons: decision.reasons,
        })
    }
}

/// The safety filters read these columns directly, whether or not the
/// manifest selects them for the classifier
fn policy_input(row: &IndicatorRow, name: &str) -> crate::Result<f64> {
    row.column(name)
        .ok_or_else(|| SignalError::MissingFeature(name.to_string()))?
        .ok_or_else(|| SignalError::NullFeature(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Candle;

    fn flat(len: usize, price: f64) -> Vec<Candle> {
        vec![Candle::new(price, price, price, price); len]
    }

    fn fixture_model() -> ModelPackage {
        let raw = r#"{
            "features": ["atr_rel", "hour", "upper_wick"],
            "model": {
                "trees": [{
                    "split_feature": [],
                    "threshold": [],
                    "left_child": [],
                    "right_child": [],
                    "leaf_value": [0.25]
                }]
            }
        }"#;
        ModelPackage::from_json(raw).unwrap()
    }

    #[test]
    fn test_short_history_is_rejected() {
        let engine = SignalEngine::new(fixture_model(), CandleHistory::new(flat(50, 2000.0)));
        let err = engine
            .evaluate_at_hour(Candle::new(2000.0, 2010.0, 1995.0, 2005.0), 12)
            .unwrap_err();

        assert!(matches!(
            err,
            SignalError::InsufficientHistory {
                have: 50,
                need: HISTORY_WINDOW
            }
        ));
    }

    #[test]
    fn test_invalid_candle_is_rejected_before_indicators() {
        let engine = SignalEngine::new(fixture_model(), CandleHistory::new(flat(100, 2000.0)));
        let err = engine
            .evaluate_at_hour(Candle::new(f64::NAN, 2010.0, 1995.0, 2005.0), 12)
            .unwrap_err();

        assert!(matches!(err, SignalError::InvalidInput(_)));
    }
}
