//! Boosted-tree binary classifier
//!
//! Trees use the LightGBM array encoding: internal nodes are parallel arrays
//! and a negative child index `-k` addresses leaf `k - 1`. The ensemble sum
//! is squashed through a scaled sigmoid into a buy probability.

use serde::Deserialize;

/// One regression tree of the ensemble
#[derive(Debug, Clone, Deserialize)]
pub struct DecisionTree {
    pub split_feature: Vec<usize>,
    pub threshold: Vec<f64>,
    pub left_child: Vec<i32>,
    pub right_child: Vec<i32>,
    pub leaf_value: Vec<f64>,
}

impl DecisionTree {
    /// Structural consistency against the manifest arity
    pub fn validate(&self, feature_count: usize) -> Result<(), String> {
        let nodes = self.split_feature.len();
        if self.threshold.len() != nodes
            || self.left_child.len() != nodes
            || self.right_child.len() != nodes
        {
            return Err("node arrays have mismatched lengths".to_string());
        }
        if self.leaf_value.is_empty() {
            return Err("tree has no leaves".to_string());
        }
        if let Some(&bad) = self.split_feature.iter().find(|&&f| f >= feature_count) {
            return Err(format!(
                "splits on feature index {bad}, but the manifest has {feature_count} features"
            ));
        }
        for &child in self.left_child.iter().chain(&self.right_child) {
            let in_bounds = if child < 0 {
                ((-child - 1) as usize) < self.leaf_value.len()
            } else {
                (child as usize) < nodes
            };
            if !in_bounds {
                return Err(format!("child index {child} is out of bounds"));
            }
        }
        Ok(())
    }

    /// Route one feature vector to a leaf
    fn output(&self, features: &[f64]) -> f64 {
        // A single-leaf tree has no internal nodes at all
        if self.split_feature.is_empty() {
            return self.leaf_value[0];
        }

        let mut node = 0usize;
        loop {
            let child = if features[self.split_feature[node]] <= self.threshold[node] {
                self.left_child[node]
            } else {
                self.right_child[node]
            };
            if child < 0 {
                return self.leaf_value[(-child - 1) as usize];
            }
            node = child as usize;
        }
    }
}

/// Additive tree ensemble with a sigmoid output head
#[derive(Debug, Clone, Deserialize)]
pub struct GbdtClassifier {
    pub trees: Vec<DecisionTree>,
    #[serde(default)]
    pub base_score: f64,
    #[serde(default = "default_sigmoid")]
    pub sigmoid: f64,
}

fn default_sigmoid() -> f64 {
    1.0
}

impl GbdtClassifier {
    pub fn validate(&self, feature_count: usize) -> Result<(), String> {
        if self.trees.is_empty() {
            return Err("classifier contains no trees".to_string());
        }
        if !self.sigmoid.is_finite() || self.sigmoid <= 0.0 {
            return Err(format!(
                "sigmoid scale {} is not a positive number",
                self.sigmoid
            ));
        }
        for (idx, tree) in self.trees.iter().enumerate() {
            tree.validate(feature_count)
                .map_err(|reason| format!("tree {idx}: {reason}"))?;
        }
        Ok(())
    }

    /// Buy probability for one assembled feature vector
    pub fn predict_probability(&self, features: &[f64]) -> f64 {
        let score: f64 =
            self.base_score + self.trees.iter().map(|t| t.output(features)).sum::<f64>();
        let probability = 1.0 / (1.0 + (-self.sigmoid * score).exp());
        probability.clamp(0.0, 1.0)
    }
}
