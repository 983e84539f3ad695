//! Prediction service and its response shapes.

pub mod domain;
pub mod service;

pub use domain::{ApiPrediction, ChurnPrediction, FormPrediction, RiskLevel};
pub use service::PredictionService;
