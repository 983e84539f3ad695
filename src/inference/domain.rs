//! Prediction results and the two response shapes built from them.

use serde::{Deserialize, Serialize};

/// Coarse churn risk, derived from the churn percentage.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// High above 70, Medium above 40, Low otherwise. Boundaries fall to the lower tier.
    pub fn from_percent(churn_percent: f64) -> Self {
        if churn_percent > 70.0 {
            RiskLevel::High
        } else if churn_percent > 40.0 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

/// Canonical result of one prediction, probabilities on a 0–1 scale.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ChurnPrediction {
    pub churn: bool,
    pub churn_probability: f64,
    pub no_churn_probability: f64,
}

impl ChurnPrediction {
    pub fn churn_percent(&self) -> f64 {
        self.churn_probability * 100.0
    }

    pub fn risk_level(&self) -> RiskLevel {
        RiskLevel::from_percent(self.churn_percent())
    }
}

/// Body returned by the form endpoint: percentages rounded to 2 places.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FormPrediction {
    pub prediction: String,
    pub churn_probability: f64,
    pub no_churn_probability: f64,
    pub risk_level: RiskLevel,
}

impl From<&ChurnPrediction> for FormPrediction {
    fn from(p: &ChurnPrediction) -> Self {
        let churn = round2(p.churn_percent());
        Self {
            prediction: if p.churn { "Yes" } else { "No" }.to_string(),
            churn_probability: churn,
            no_churn_probability: round2(100.0 - churn),
            risk_level: p.risk_level(),
        }
    }
}

/// Body returned by the JSON endpoint: raw 0–1 probabilities, no risk tier.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiPrediction {
    pub churn: bool,
    pub churn_probability: f64,
    pub no_churn_probability: f64,
}

impl From<&ChurnPrediction> for ApiPrediction {
    fn from(p: &ChurnPrediction) -> Self {
        Self {
            churn: p.churn,
            churn_probability: p.churn_probability,
            no_churn_probability: p.no_churn_probability,
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
