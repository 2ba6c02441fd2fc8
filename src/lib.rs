// Core modules
pub mod error;
pub mod features;
pub mod history;
pub mod indicators;
pub mod model;
pub mod models;
pub mod persistence;
pub mod pipeline;
pub mod policy;

// Re-export commonly used types
pub use error::SignalError;
pub use models::{Candle, Signal, SignalReason, SignalReport};
pub use pipeline::SignalEngine;

// Error handling
pub type Result<T> = std::result::Result<T, SignalError>;
