use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use shared::{
    error::ResponseShapeError,
    protocol::{ModelInfo, ModelInfoResponse, PredictionPayload, PredictionResult},
};
use thiserror::Error;
use tracing::{debug, info};

pub const DEFAULT_PREDICT_PATH: &str = "/predict";
pub const DEFAULT_MODEL_INFO_PATH: &str = "/model_info";

/// Everything that can go wrong between issuing a request and holding a
/// recognised response body.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("request to prediction service failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("prediction service responded with status {0}")]
    Status(StatusCode),
    #[error("failed to decode prediction service response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("unrecognised prediction service response: {0}")]
    Shape(#[from] ResponseShapeError),
    #[error("prediction service reported an error: {0}")]
    Rejected(String),
}

#[async_trait]
pub trait PredictionService: Send + Sync {
    /// Posts one payload. An application-level `success: false` is an `Ok`
    /// [`PredictionResult::Failure`], not an error.
    async fn predict(&self, payload: &PredictionPayload) -> Result<PredictionResult, ServiceError>;

    async fn model_info(&self) -> Result<ModelInfo, ServiceError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub base_url: String,
    pub predict_path: String,
    pub model_info_path: String,
}

impl ServiceConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            predict_path: DEFAULT_PREDICT_PATH.to_string(),
            model_info_path: DEFAULT_MODEL_INFO_PATH.to_string(),
        }
    }

    pub fn predict_url(&self) -> String {
        join_url(&self.base_url, &self.predict_path)
    }

    pub fn model_info_url(&self) -> String {
        join_url(&self.base_url, &self.model_info_path)
    }
}

fn join_url(base_url: &str, path: &str) -> String {
    let base_url = base_url.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{base_url}/{path}")
}

pub struct HttpPredictionService {
    http: Client,
    config: ServiceConfig,
}

impl HttpPredictionService {
    pub fn new(config: ServiceConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(http: Client, config: ServiceConfig) -> Self {
        Self { http, config }
    }
}

#[async_trait]
impl PredictionService for HttpPredictionService {
    async fn predict(&self, payload: &PredictionPayload) -> Result<PredictionResult, ServiceError> {
        let url = self.config.predict_url();
        info!(%url, year = ?payload.year, education = ?payload.education, "posting prediction request");

        let response = self.http.post(&url).json(payload).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::Status(status));
        }
        let body = response.bytes().await?;
        debug!(%status, bytes = body.len(), "prediction response received");

        Ok(serde_json::from_slice(&body)?)
    }

    async fn model_info(&self) -> Result<ModelInfo, ServiceError> {
        let url = self.config.model_info_url();
        debug!(%url, "fetching model info");

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::Status(status));
        }
        let body = response.bytes().await?;
        let envelope: ModelInfoResponse = serde_json::from_slice(&body)?;

        envelope.into_result()?.map_err(ServiceError::Rejected)
    }
}
