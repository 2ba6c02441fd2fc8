use std::io;

/// Error taxonomy for the signal pipeline.
///
/// Load failures are startup-fatal: the process reports them and computes
/// nothing. Everything else fails only the request that triggered it. All
/// inputs are deterministic, so no failure is ever retried.
#[derive(Debug, thiserror::Error)]
pub enum SignalError {
    /// Model artifact missing or corrupt
    #[error("failed to load model package from {path}: {reason}")]
    ModelLoad { path: String, reason: String },

    /// Historical data file missing or malformed
    #[error("failed to load candle history from {path}: {reason}")]
    HistoryLoad { path: String, reason: String },

    /// Fewer candles stored than the requested trailing window
    #[error("insufficient history: have {have} candles, need {need}")]
    InsufficientHistory { have: usize, need: usize },

    /// Candle fields rejected before reaching the indicator engine
    #[error("invalid candle input: {0}")]
    InvalidInput(String),

    /// Manifest names a column the indicator engine does not produce
    #[error("feature '{0}' is not produced by the indicator engine")]
    MissingFeature(String),

    /// Looked-up feature is null (insufficient warm-up) or non-finite
    #[error("feature '{0}' has no usable value for the latest candle")]
    NullFeature(String),

    /// Classifier received a vector of the wrong arity
    #[error("classifier expected {expected} features, got {got}")]
    FeatureArity { expected: usize, got: usize },

    /// Signal journal I/O
    #[error("signal journal: {0}")]
    Journal(#[from] io::Error),
}
