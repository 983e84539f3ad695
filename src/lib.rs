// lib.rs - central orchestrator
pub mod api;
pub mod common;
pub mod features;
pub mod inference;
pub mod model;

pub use features::{encode, AttributeBag, FeatureVector};
pub use inference::{ChurnPrediction, PredictionService, RiskLevel};
pub use model::{Classifier, ModelHandle};
