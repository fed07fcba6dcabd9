use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::error::GenerationError;

pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Body of a non-streaming `/api/generate` call.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct GenerateRequest<'a> {
    pub model: &'a str,
    pub prompt: &'a str,
    pub stream: bool,
}

#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub response: String,
}

/// Talks to an Ollama-style text generation endpoint.
#[derive(Debug, Clone)]
pub struct GenerationClient {
    client: Client,
    endpoint: String,
    model: String,
}

impl GenerationClient {
    pub fn new(client: Client, endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        GenerationClient {
            client,
            endpoint: endpoint.into(),
            model: model.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Always yields text: the model's answer, or a readable description of
    /// what went wrong.
    pub async fn generate(&self, prompt: &str) -> String {
        match self.try_generate(prompt).await {
            Ok(answer) => {
                log::info!("received ollama response length: {}", answer.len());
                answer
            }
            Err(e) => {
                log::error!("ollama generation failed: {e}");
                e.to_string()
            }
        }
    }

    pub async fn try_generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let payload = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };
        let body = serde_json::to_vec(&payload)?;

        log::debug!(
            "sending prompt to ollama. model: {}, url: {}",
            self.model,
            self.endpoint
        );

        let res = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .body(body)
            .send()
            .await?;

        let status = res.status();
        log::debug!("ollama api response code: {}", status.as_u16());

        if status != StatusCode::OK {
            return Err(match res.text().await {
                Ok(body) => {
                    log::error!("error response from ollama ({}): {body}", status.as_u16());
                    GenerationError::Status {
                        code: status.as_u16(),
                        body,
                    }
                }
                Err(e) => {
                    log::error!("could not read error body from ollama: {e}");
                    GenerationError::UnreadableStatus(status.as_u16())
                }
            });
        }

        let text = res.text().await?;
        parse_answer(&text)
    }
}

/// Extracts the trimmed `response` field from a success body. A blank body, a
/// missing field, or whitespace-only text all count as no answer.
pub fn parse_answer(body: &str) -> Result<String, GenerationError> {
    if body.trim().is_empty() {
        return Err(GenerationError::EmptyResponse);
    }
    let parsed: GenerateResponse = serde_json::from_str(body)?;
    let answer = parsed.response.trim();
    if answer.is_empty() {
        return Err(GenerationError::EmptyResponse);
    }
    Ok(answer.to_string())
}
