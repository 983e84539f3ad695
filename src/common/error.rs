//! Error handling primitives shared across the core.
//!
//! Every failure a request can hit is folded into [`ServiceError`], which the
//! HTTP layer maps onto a status code through [`ErrorCode`].

use thiserror::Error;

/// Stable error codes that cross the HTTP boundary.
#[repr(u32)]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ErrorCode {
    /// Success code used as a sentinel.
    Ok = 0,
    /// No classifier is loaded.
    ModelMissing = 1,
    /// Input failed numeric coercion.
    InvalidInput = 2,
    /// Inference or response shaping failed.
    PredictionFailed = 3,
}

impl ErrorCode {
    /// Whether the failure is the server's fault rather than the caller's.
    pub fn is_server_side(self) -> bool {
        matches!(self, ErrorCode::ModelMissing)
    }
}

/// Raised while converting an attribute bag into a feature vector.
///
/// Unknown categorical values never produce this error; they fall back to
/// the attribute default.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum EncodingError {
    #[error("could not convert {attribute} value {value} to a number")]
    NotNumeric { attribute: &'static str, value: String },

    #[error("could not convert {attribute} value {value} to an integer")]
    NotInteger { attribute: &'static str, value: String },
}

impl EncodingError {
    /// Name of the attribute that failed to convert.
    pub fn attribute(&self) -> &'static str {
        match self {
            EncodingError::NotNumeric { attribute, .. }
            | EncodingError::NotInteger { attribute, .. } => *attribute,
        }
    }
}

/// Failures loading or evaluating a classifier artefact.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to read model artefact {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed model artefact: {0}")]
    Format(#[from] serde_json::Error),

    #[error("model expects {actual} {what}, encoder produces {expected}")]
    Arity {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("feature {index} is {found:?} in the artefact but {expected:?} in the encoder")]
    FeatureOrder {
        index: usize,
        expected: &'static str,
        found: String,
    },

    #[error("invalid decision threshold {0}")]
    Threshold(f64),

    #[error("inference failed: {0}")]
    Inference(String),
}

/// Canonical per-request error.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("model not loaded")]
    Unavailable,

    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error("{0}")]
    Prediction(String),
}

impl ServiceError {
    /// Machine parsable code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            ServiceError::Unavailable => ErrorCode::ModelMissing,
            ServiceError::Encoding(_) => ErrorCode::InvalidInput,
            ServiceError::Prediction(_) => ErrorCode::PredictionFailed,
        }
    }

    pub fn prediction(msg: impl Into<String>) -> Self {
        ServiceError::Prediction(msg.into())
    }
}

impl From<ModelError> for ServiceError {
    fn from(err: ModelError) -> Self {
        ServiceError::Prediction(err.to_string())
    }
}

/// Result alias used throughout the crate.
pub type ServiceResult<T> = Result<T, ServiceError>;
