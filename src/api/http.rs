//! HTTP surface: form and JSON prediction endpoints plus small helpers.

use std::collections::{BTreeMap, HashMap};

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Multipart, Request, State},
    http::{header::CONTENT_TYPE, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;

use crate::common::error::ServiceError;
use crate::features::domain::FEATURE_OPTIONS;
use crate::features::{self, AttributeBag};
use crate::inference::{ApiPrediction, FormPrediction, PredictionService};

const FORM_UNAVAILABLE: &str = "Model not loaded. Please check the model file.";
const API_UNAVAILABLE: &str = "Model not loaded";

/// State shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: PredictionService,
}

impl AppState {
    pub fn new(service: PredictionService) -> Self {
        Self { service }
    }
}

/// Error payload returned by both prediction endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    /// Server error for a missing model, client error for everything else.
    fn from_service(err: ServiceError, unavailable: &str) -> Self {
        let code = err.code();
        warn!(code = code as u32, error = %err, "prediction rejected");
        if code.is_server_side() {
            Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: unavailable.to_string(),
            }
        } else {
            Self::bad_request(err.to_string())
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody { error: self.message })).into_response()
    }
}

/// Form fields from either a urlencoded or a multipart body.
#[derive(Debug, Default)]
pub struct FormFields(pub HashMap<String, String>);

#[async_trait]
impl<S> FromRequest<S> for FormFields
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("multipart/form-data"));

        if !is_multipart {
            let Form(fields) = Form::<HashMap<String, String>>::from_request(req, state)
                .await
                .map_err(|e| ApiError::bad_request(e.body_text()))?;
            return Ok(Self(fields));
        }

        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| ApiError::bad_request(e.body_text()))?;
        let mut fields = HashMap::new();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::bad_request(e.body_text()))?
        {
            let Some(name) = field.name().map(str::to_owned) else {
                continue;
            };
            let value = field
                .text()
                .await
                .map_err(|e| ApiError::bad_request(e.body_text()))?;
            fields.insert(name, value);
        }
        Ok(Self(fields))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub model_loaded: bool,
}

pub fn router(state: AppState, cors_enabled: bool) -> Router {
    let app = Router::new()
        .route("/health", get(health))
        .route("/predict", post(predict_form))
        .route("/api/predict", post(predict_api))
        .route("/api/options", get(options))
        .with_state(state);

    if !cors_enabled {
        return app;
    }
    app.layer(
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers(Any),
    )
}

pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let model_loaded = state.service.is_ready();
    let health = HealthResponse {
        status: if model_loaded { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        model_loaded,
    };
    (StatusCode::OK, Json(health))
}

/// Categorical choices for building a form.
pub async fn options() -> Json<BTreeMap<&'static str, &'static [&'static str]>> {
    Json(FEATURE_OPTIONS.into_iter().collect())
}

/// `POST /predict`: percentages, Yes/No label and risk tier.
pub async fn predict_form(
    State(state): State<AppState>,
    fields: Result<FormFields, ApiError>,
) -> Result<Json<FormPrediction>, ApiError> {
    let fail = |err: ServiceError| ApiError::from_service(err, FORM_UNAVAILABLE);

    state.service.ensure_ready().map_err(fail)?;
    let FormFields(fields) = fields?;
    let bag = features::bag_from_form(&fields).map_err(|err| fail(err.into()))?;
    let prediction = state.service.predict(&bag).map_err(fail)?;

    Ok(Json(FormPrediction::from(&prediction)))
}

/// `POST /api/predict`: raw probabilities and a boolean churn flag.
pub async fn predict_api(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ApiPrediction>, ApiError> {
    let fail = |err: ServiceError| ApiError::from_service(err, API_UNAVAILABLE);

    state.service.ensure_ready().map_err(fail)?;
    let bag = parse_json_bag(&body)?;
    let prediction = state.service.predict(&bag).map_err(fail)?;

    Ok(Json(ApiPrediction::from(&prediction)))
}

fn parse_json_bag(body: &[u8]) -> Result<AttributeBag, ApiError> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(object)) => Ok(AttributeBag::from_json_object(object)),
        Ok(_) => Err(ApiError::bad_request("request body must be a JSON object")),
        Err(err) => Err(ApiError::bad_request(format!("invalid JSON body: {err}"))),
    }
}
