use std::fmt::Display;

use machine_learning::Prediction;
use serde::Serialize;

/// The JSON answer for a single image.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PredictResponse {
    Success {
        prediction: usize,
        probabilities: Vec<f64>,
        success: bool,
    },
    Failure {
        error: String,
        success: bool,
    },
}

impl PredictResponse {
    pub fn success(prediction: Prediction) -> Self {
        Self::Success {
            prediction: prediction.class,
            probabilities: prediction.probabilities.to_vec(),
            success: true,
        }
    }

    pub fn failure<E: Display>(error: E) -> Self {
        Self::Failure {
            error: error.to_string(),
            success: false,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub model_loaded: bool,
}
