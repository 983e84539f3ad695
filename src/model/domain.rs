//! Classifier capability and the bundled logistic-regression artefact.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::common::error::ModelError;
use crate::features::{FeatureVector, FEATURE_COUNT, FEATURE_NAMES};

/// Binary churn classifier. Implementations must tolerate concurrent calls.
pub trait Classifier: Send + Sync {
    /// Hard label: 1 for churn, 0 otherwise.
    fn predict(&self, features: &FeatureVector) -> Result<u8, ModelError>;

    /// `[p(no churn), p(churn)]`.
    fn predict_proba(&self, features: &FeatureVector) -> Result<[f64; 2], ModelError>;
}

/// Process-wide, read-only classifier shared by every request.
pub type ModelHandle = Arc<dyn Classifier>;

fn default_threshold() -> f64 {
    0.5
}

/// Logistic regression over the encoded feature vector.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LogisticModel {
    pub name: String,
    pub feature_names: Vec<String>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

impl LogisticModel {
    /// Check the artefact against the encoder's layout.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.feature_names.len() != FEATURE_COUNT {
            return Err(ModelError::Arity {
                what: "feature names",
                expected: FEATURE_COUNT,
                actual: self.feature_names.len(),
            });
        }
        if self.coefficients.len() != FEATURE_COUNT {
            return Err(ModelError::Arity {
                what: "coefficients",
                expected: FEATURE_COUNT,
                actual: self.coefficients.len(),
            });
        }
        for (index, (found, expected)) in self.feature_names.iter().zip(FEATURE_NAMES).enumerate() {
            if found != expected {
                return Err(ModelError::FeatureOrder {
                    index,
                    expected,
                    found: found.clone(),
                });
            }
        }
        if !(self.threshold > 0.0 && self.threshold < 1.0) {
            return Err(ModelError::Threshold(self.threshold));
        }
        Ok(())
    }

    fn churn_probability(&self, features: &FeatureVector) -> Result<f64, ModelError> {
        let z = self
            .coefficients
            .iter()
            .zip(features.as_slice())
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.intercept;
        let p = 1.0 / (1.0 + (-z).exp());
        if p.is_finite() {
            Ok(p)
        } else {
            Err(ModelError::Inference(format!("non-finite score {z}")))
        }
    }
}

impl Classifier for LogisticModel {
    fn predict(&self, features: &FeatureVector) -> Result<u8, ModelError> {
        let p = self.churn_probability(features)?;
        Ok(u8::from(p >= self.threshold))
    }

    fn predict_proba(&self, features: &FeatureVector) -> Result<[f64; 2], ModelError> {
        let p = self.churn_probability(features)?;
        Ok([1.0 - p, p])
    }
}
