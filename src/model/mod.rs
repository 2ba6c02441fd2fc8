//! Pretrained model package
//!
//! The artifact is a JSON bundle of the trained classifier and the ordered
//! feature-name manifest it expects at inference time. It is loaded once at
//! startup and never mutated; a missing or corrupt file means no signal can
//! be computed at all.

pub mod gbdt;

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::SignalError;

pub use gbdt::{DecisionTree, GbdtClassifier};

#[derive(Debug, Clone, Deserialize)]
pub struct ModelPackage {
    features: Vec<String>,
    model: GbdtClassifier,
}

impl ModelPackage {
    /// Load and validate the artifact at `path`
    pub fn load(path: &Path) -> Result<Self, SignalError> {
        let raw = fs::read_to_string(path).map_err(|e| SignalError::ModelLoad {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let package = Self::from_json(&raw).map_err(|reason| SignalError::ModelLoad {
            path: path.display().to_string(),
            reason,
        })?;

        tracing::info!(
            "Loaded model package from {} ({} features, {} trees)",
            path.display(),
            package.features.len(),
            package.model.trees.len()
        );
        Ok(package)
    }

    /// Parse and validate a JSON artifact
    pub fn from_json(raw: &str) -> Result<Self, String> {
        let package: ModelPackage = serde_json::from_str(raw).map_err(|e| e.to_string())?;
        if package.features.is_empty() {
            return Err("feature manifest is empty".to_string());
        }
        package.model.validate(package.features.len())?;
        Ok(package)
    }

    /// Ordered feature names the classifier expects
    pub fn feature_names(&self) -> &[String] {
        &self.features
    }

    /// Probability that the instrument moves favorably given `features`
    ///
    /// Pure function of the vector and the loaded weights; identical inputs
    /// always produce identical output.
    pub fn predict(&self, features: &[f64]) -> Result<f64, SignalError> {
        if features.len() != self.features.len() {
            return Err(SignalError::FeatureArity {
                expected: self.features.len(),
                got: features.len(),
            });
        }
        Ok(self.model.predict_probability(features))
    }
}
