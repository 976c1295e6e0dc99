use crate::auth::{Authenticator, ServiceAccountKey};
use crate::config::VertexConfig;
use crate::models::{GenerateContentRequest, GenerateContentResponse};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;

const MODEL_NAME: &str = "gemini-2.5-pro";

/// Failure taxonomy for one model call. A failed call leaves the service
/// usable; the next call proceeds normally.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model service authentication failed: {0}")]
    Auth(String),
    #[error("model request failed: {0}")]
    Network(String),
    #[error("model service returned {status}: {message}")]
    Api { status: u16, message: String },
    #[error("model reply contained no text")]
    EmptyReply,
}

/// Single-turn text generation against a hosted model.
#[async_trait]
pub trait TextModel: Send + Sync {
    async fn query(&self, prompt: &str) -> Result<String, ModelError>;
}

pub struct GeminiService {
    client: Client,
    auth: Authenticator,
    endpoint: String,
}

impl GeminiService {
    /// Resolves credentials and the target project, then performs one
    /// token fetch so that bad configuration aborts startup instead of
    /// failing the first request.
    pub async fn new(config: VertexConfig) -> Result<Self> {
        let key = ServiceAccountKey::from_file(&config.credentials_path)?;
        let client = Client::new();
        let auth = Authenticator::new(key, client.clone());

        let project_id = config
            .project_id
            .clone()
            .or_else(|| auth.project_id().map(str::to_string))
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "PROJECT_ID is not set and the service account key carries no project_id"
                )
            })?;

        auth.token().await.context("initial authentication failed")?;

        let endpoint = endpoint_url(&project_id, &config.location, MODEL_NAME);

        log::info!(
            "Vertex AI initialized for project {}, location {}",
            project_id,
            config.location
        );

        Ok(Self {
            client,
            auth,
            endpoint,
        })
    }
}

fn endpoint_url(project_id: &str, location: &str, model: &str) -> String {
    format!(
        "https://{location}-aiplatform.googleapis.com/v1/projects/{project_id}/locations/{location}/publishers/google/models/{model}:generateContent"
    )
}

#[async_trait]
impl TextModel for GeminiService {
    async fn query(&self, prompt: &str) -> Result<String, ModelError> {
        let token = self
            .auth
            .token()
            .await
            .map_err(|e| ModelError::Auth(e.to_string()))?;

        let preview: String = prompt.chars().take(100).collect();
        log::info!("Sending query to Vertex AI generative model: '{}...'", preview);

        let request = GenerateContentRequest::single_turn(prompt);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&token)
            .json(&request)
            .send()
            .await
            .map_err(|e| ModelError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(ModelError::Api { status, message });
        }

        let reply: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ModelError::Network(e.to_string()))?;

        reply.into_text().ok_or(ModelError::EmptyReply)
    }
}
