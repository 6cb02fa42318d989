use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ResponseShapeError;

/// JSON body posted to the prediction endpoint.
///
/// `year` and `education` travel as numbers; a value without a numeric
/// prefix is sent as `null`. Every other form field is passed through as a
/// string, empty strings included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionPayload {
    pub year: Option<i64>,
    pub education: Option<f64>,
    #[serde(flatten)]
    pub fields: BTreeMap<String, String>,
}

/// Body returned by the prediction endpoint, discriminated on `success`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PredictionResponse", into = "PredictionResponse")]
pub enum PredictionResult {
    Success {
        prediction: f64,
        interpretation: String,
    },
    Failure {
        error: String,
    },
}

/// Wire form of [`PredictionResult`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prediction: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interpretation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TryFrom<PredictionResponse> for PredictionResult {
    type Error = ResponseShapeError;

    fn try_from(value: PredictionResponse) -> Result<Self, Self::Error> {
        if value.success {
            let prediction = value
                .prediction
                .ok_or(ResponseShapeError::MissingField("prediction"))?;
            let interpretation = value
                .interpretation
                .ok_or(ResponseShapeError::MissingField("interpretation"))?;
            Ok(Self::Success {
                prediction,
                interpretation,
            })
        } else {
            let error = value
                .error
                .ok_or(ResponseShapeError::MissingField("error"))?;
            Ok(Self::Failure { error })
        }
    }
}

impl From<PredictionResult> for PredictionResponse {
    fn from(value: PredictionResult) -> Self {
        match value {
            PredictionResult::Success {
                prediction,
                interpretation,
            } => Self {
                success: true,
                prediction: Some(prediction),
                interpretation: Some(interpretation),
                error: None,
            },
            PredictionResult::Failure { error } => Self {
                success: false,
                error: Some(error),
                ..Self::default()
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelPerformance {
    pub r2_score: f64,
    pub mae: f64,
    pub rmse: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub model_type: String,
    pub features: Vec<String>,
    pub performance: ModelPerformance,
}

/// Wire form of the model info endpoint, sharing the `success`/`error`
/// envelope of the prediction endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelInfoResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub performance: Option<ModelPerformance>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ModelInfoResponse {
    /// Splits the envelope into the model description or the service's error text.
    pub fn into_result(self) -> Result<Result<ModelInfo, String>, ResponseShapeError> {
        if !self.success {
            return self
                .error
                .map(Err)
                .ok_or(ResponseShapeError::MissingField("error"));
        }
        Ok(Ok(ModelInfo {
            model_type: self
                .model_type
                .ok_or(ResponseShapeError::MissingField("model_type"))?,
            features: self.features.unwrap_or_default(),
            performance: self
                .performance
                .ok_or(ResponseShapeError::MissingField("performance"))?,
        }))
    }
}
