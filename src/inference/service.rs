//! Prediction orchestration: readiness check, encoding, inference.

use std::time::Instant;

use tracing::debug;

use crate::common::error::{ServiceError, ServiceResult};
use crate::features::{self, AttributeBag, FeatureVector};
use crate::model::ModelHandle;

use super::domain::ChurnPrediction;

/// Shared entry point for both endpoints. Cheap to clone.
#[derive(Clone)]
pub struct PredictionService {
    model: Option<ModelHandle>,
}

impl PredictionService {
    /// `None` means the classifier failed to load; every prediction then
    /// reports [`ServiceError::Unavailable`].
    pub fn new(model: Option<ModelHandle>) -> Self {
        Self { model }
    }

    pub fn is_ready(&self) -> bool {
        self.model.is_some()
    }

    /// Fails fast when no classifier is loaded.
    pub fn ensure_ready(&self) -> ServiceResult<&ModelHandle> {
        self.model.as_ref().ok_or(ServiceError::Unavailable)
    }

    /// Encode the bag once and run it through the classifier.
    pub fn predict(&self, bag: &AttributeBag) -> ServiceResult<ChurnPrediction> {
        let model = self.ensure_ready()?;
        let features = features::encode(bag)?;
        infer(model, &features)
    }
}

/// Both classifier calls see the same vector.
fn infer(model: &ModelHandle, features: &FeatureVector) -> ServiceResult<ChurnPrediction> {
    let start = Instant::now();
    let label = model.predict(features)?;
    let [_, churn_probability] = model.predict_proba(features)?;

    if !(0.0..=1.0).contains(&churn_probability) {
        return Err(ServiceError::prediction(format!(
            "classifier returned churn probability {churn_probability} outside [0, 1]"
        )));
    }

    debug!(
        label,
        churn_probability,
        elapsed_us = start.elapsed().as_micros() as u64,
        "inference complete"
    );

    Ok(ChurnPrediction {
        churn: label == 1,
        churn_probability,
        no_churn_probability: 1.0 - churn_probability,
    })
}
