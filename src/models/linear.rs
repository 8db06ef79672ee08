//! Multi-output linear regression model
//!
//! One model maps the feature vector to every output in a single joint fit.
//! Prediction is a dot product per output:
//!
//! ```text
//! output[o] = bias[o] + Σ(feature[f] × weight[f, o])
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Linear model (weights + bias).
///
/// Weights are laid out feature-major, output-minor, with the bias in the
/// last row:
///
/// ```text
/// weights[feature * num_outputs + output] → coefficient
/// weights[num_features * num_outputs + output] → bias
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLinearModel", into = "RawLinearModel")]
pub struct LinearModel {
    weights: Vec<f64>,
    num_features: usize,
    num_outputs: usize,
}

/// Serialized form, validated on the way back in
#[derive(Serialize, Deserialize)]
struct RawLinearModel {
    num_features: usize,
    num_outputs: usize,
    weights: Vec<f64>,
}

impl TryFrom<RawLinearModel> for LinearModel {
    type Error = LinearModelError;

    fn try_from(raw: RawLinearModel) -> Result<Self, Self::Error> {
        LinearModel::new(raw.weights, raw.num_features, raw.num_outputs)
    }
}

impl From<LinearModel> for RawLinearModel {
    fn from(model: LinearModel) -> Self {
        Self {
            num_features: model.num_features,
            num_outputs: model.num_outputs,
            weights: model.weights,
        }
    }
}

impl LinearModel {
    /// Create a model from a flat weight array of size `(num_features + 1) * num_outputs`
    pub fn new(
        weights: Vec<f64>,
        num_features: usize,
        num_outputs: usize,
    ) -> Result<Self, LinearModelError> {
        let expected = (num_features + 1) * num_outputs;
        if weights.len() != expected {
            return Err(LinearModelError::WeightCount {
                expected,
                actual: weights.len(),
            });
        }
        Ok(Self {
            weights,
            num_features,
            num_outputs,
        })
    }

    /// Create a zero-initialized model
    pub fn zeros(num_features: usize, num_outputs: usize) -> Self {
        Self {
            weights: vec![0.0; (num_features + 1) * num_outputs],
            num_features,
            num_outputs,
        }
    }

    /// Fit ordinary least squares from a single feature to every output column.
    ///
    /// `targets[row][output]` holds the observed outputs for `feature[row]`.
    /// When the feature has no variance the slope is zero and each bias is the
    /// output's mean, which is the minimum-norm least-squares solution.
    pub fn fit_single_feature(
        feature: &[f64],
        targets: &[Vec<f64>],
    ) -> Result<Self, LinearModelError> {
        let n = feature.len();
        if n != targets.len() {
            return Err(LinearModelError::RowCount {
                features: n,
                targets: targets.len(),
            });
        }
        if n == 0 {
            return Err(LinearModelError::NoSamples);
        }

        let num_outputs = targets[0].len();
        if num_outputs == 0 {
            return Err(LinearModelError::NoOutputs);
        }
        if let Some(row) = targets.iter().position(|t| t.len() != num_outputs) {
            return Err(LinearModelError::RaggedTargets { row });
        }

        let count = n as f64;
        let mean_x = feature.iter().sum::<f64>() / count;
        let sum_sq_x: f64 = feature.iter().map(|x| x * x).sum();
        let sxx: f64 = feature.iter().map(|x| (x - mean_x).powi(2)).sum();
        let degenerate = sxx <= f64::EPSILON * sum_sq_x;

        let mut model = Self::zeros(1, num_outputs);
        for output in 0..num_outputs {
            let mean_y = targets.iter().map(|t| t[output]).sum::<f64>() / count;
            let slope = if degenerate {
                0.0
            } else {
                let sxy: f64 = feature
                    .iter()
                    .zip(targets)
                    .map(|(x, t)| (x - mean_x) * (t[output] - mean_y))
                    .sum();
                sxy / sxx
            };
            model.set_weight(0, output, slope);
            model.set_bias(output, mean_y - slope * mean_x);
        }

        Ok(model)
    }

    /// Number of input features.
    #[inline]
    pub fn num_features(&self) -> usize {
        self.num_features
    }

    /// Number of outputs.
    #[inline]
    pub fn num_outputs(&self) -> usize {
        self.num_outputs
    }

    /// Coefficient for a feature and output.
    #[inline]
    pub fn weight(&self, feature: usize, output: usize) -> f64 {
        debug_assert!(feature < self.num_features, "feature index out of bounds");
        debug_assert!(output < self.num_outputs, "output index out of bounds");
        self.weights[feature * self.num_outputs + output]
    }

    /// Intercept for an output.
    #[inline]
    pub fn bias(&self, output: usize) -> f64 {
        debug_assert!(output < self.num_outputs, "output index out of bounds");
        self.weights[self.num_features * self.num_outputs + output]
    }

    /// Set coefficient for a feature and output.
    #[inline]
    pub fn set_weight(&mut self, feature: usize, output: usize, value: f64) {
        debug_assert!(feature < self.num_features, "feature index out of bounds");
        debug_assert!(output < self.num_outputs, "output index out of bounds");
        self.weights[feature * self.num_outputs + output] = value;
    }

    /// Set intercept for an output.
    #[inline]
    pub fn set_bias(&mut self, output: usize, value: f64) {
        debug_assert!(output < self.num_outputs, "output index out of bounds");
        self.weights[self.num_features * self.num_outputs + output] = value;
    }

    /// Predict for a single row. Returns a vector of length `num_outputs`.
    pub fn predict_row(&self, features: &[f64]) -> Result<Vec<f64>, LinearModelError> {
        if features.len() != self.num_features {
            return Err(LinearModelError::FeatureCount {
                expected: self.num_features,
                actual: features.len(),
            });
        }

        let outputs = (0..self.num_outputs)
            .map(|output| {
                features
                    .iter()
                    .enumerate()
                    .fold(self.bias(output), |sum, (f, value)| {
                        sum + value * self.weight(f, output)
                    })
            })
            .collect();

        Ok(outputs)
    }
}

/// Errors from fitting or evaluating a linear model
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinearModelError {
    NoSamples,
    NoOutputs,
    RowCount { features: usize, targets: usize },
    RaggedTargets { row: usize },
    WeightCount { expected: usize, actual: usize },
    FeatureCount { expected: usize, actual: usize },
}

impl fmt::Display for LinearModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSamples => write!(f, "No samples to fit"),
            Self::NoOutputs => write!(f, "No output columns to fit"),
            Self::RowCount { features, targets } => write!(
                f,
                "Feature rows ({}) and target rows ({}) differ",
                features, targets
            ),
            Self::RaggedTargets { row } => {
                write!(f, "Target row {} has a different number of outputs", row)
            }
            Self::WeightCount { expected, actual } => {
                write!(f, "Expected {} weights, found {}", expected, actual)
            }
            Self::FeatureCount { expected, actual } => {
                write!(f, "Expected {} features, got {}", expected, actual)
            }
        }
    }
}

impl std::error::Error for LinearModelError {}
