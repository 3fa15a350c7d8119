use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::{env, time::Duration};
use thiserror::Error;

const DEFAULT_LOCATION: &str = "us-central1";
const DEFAULT_ENDPOINT_HOST: &str = "aiplatform.googleapis.com";
const DEFAULT_MODEL: &str = "text-bison@002";

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Environment error: {0}")]
    EnvironmentError(String),
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("Authentication error: {0}")]
    AuthError(String),
    #[error("Response error: {0}")]
    ResponseError(String),
}

/// Sampling settings sent with every prediction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationParameters {
    pub temperature: f64,
    pub max_output_tokens: u32,
    pub top_p: f64,
    pub top_k: u32,
}

impl Default for GenerationParameters {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_output_tokens: 4096,
            top_p: 0.8,
            top_k: 40,
        }
    }
}

/// Prompt in, text out.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn predict(
        &self,
        prompt: &str,
        parameters: &GenerationParameters,
    ) -> Result<String, GenerationError>;
}

#[derive(Debug, Serialize)]
struct PredictRequest<'a> {
    instances: [PredictInstance<'a>; 1],
    parameters: &'a GenerationParameters,
}

#[derive(Debug, Serialize)]
struct PredictInstance<'a> {
    prompt: &'a str,
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    #[serde(default)]
    predictions: Vec<Prediction>,
}

#[derive(Debug, Deserialize)]
struct Prediction {
    content: String,
}

#[derive(Clone)]
pub struct VertexTextService {
    client: Client,
    base_url: String,
    project_id: String,
    location: String,
    model: String,
}

impl VertexTextService {
    pub fn new() -> Result<Self, GenerationError> {
        let project_id = env::var("GOOGLE_CLOUD_PROJECT_ID").map_err(|_| {
            GenerationError::EnvironmentError("GOOGLE_CLOUD_PROJECT_ID not set".to_string())
        })?;

        let location =
            env::var("VERTEX_LOCATION").unwrap_or_else(|_| DEFAULT_LOCATION.to_string());

        let model = env::var("VERTEX_TEXT_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let base_url = format!("https://{}-{}", location, DEFAULT_ENDPOINT_HOST);
        Self::with_endpoint(base_url, project_id, location, model)
    }

    /// Client for a specific endpoint, e.g. a regional or private one.
    pub fn with_endpoint(
        base_url: impl Into<String>,
        project_id: impl Into<String>,
        location: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, GenerationError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            project_id: project_id.into(),
            location: location.into(),
            model: model.into(),
        })
    }

    fn predict_url(&self) -> String {
        format!(
            "{base}/v1/projects/{project}/locations/{location}/publishers/google/models/{model}:predict",
            base = self.base_url,
            location = self.location,
            project = self.project_id,
            model = self.model,
        )
    }

    async fn get_access_token(&self) -> Result<String, GenerationError> {
        if let Ok(token) = env::var("GOOGLE_CLOUD_ACCESS_TOKEN") {
            return Ok(token);
        }

        let output = tokio::process::Command::new("gcloud")
            .args(["auth", "print-access-token"])
            .output()
            .await
            .map_err(|e| GenerationError::AuthError(format!("Failed to get gcloud token: {}", e)))?;

        if !output.status.success() {
            return Err(GenerationError::AuthError(format!(
                "gcloud command failed: {}",
                String::from_utf8_lossy(&output.stderr)
            )));
        }

        String::from_utf8(output.stdout)
            .map(|token| token.trim().to_string())
            .map_err(|e| GenerationError::AuthError(format!("Invalid UTF-8 in token: {}", e)))
    }
}

#[async_trait]
impl TextGenerator for VertexTextService {
    async fn predict(
        &self,
        prompt: &str,
        parameters: &GenerationParameters,
    ) -> Result<String, GenerationError> {
        let access_token = self.get_access_token().await?;

        let request = PredictRequest {
            instances: [PredictInstance { prompt }],
            parameters,
        };

        let response = self
            .client
            .post(self.predict_url())
            .bearer_auth(access_token)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(GenerationError::ResponseError(format!(
                "Prediction request failed with status {}: {}",
                status, error_text
            )));
        }

        let prediction: PredictResponse = response.json().await.map_err(|e| {
            GenerationError::ResponseError(format!("Failed to parse response: {}", e))
        })?;

        prediction
            .predictions
            .into_iter()
            .next()
            .map(|p| p.content)
            .ok_or_else(|| GenerationError::ResponseError("Response had no predictions".to_string()))
    }
}
