use crate::{
    error::{GeminiError, Result},
    gemini::wire::{
        Candidate, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
        Part,
    },
    models::{GenerationOutcome, GenerationRequest, ImagePayload},
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use reqwest::Client;

pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.0-flash-exp-image-generation";

/// Client for the generateContent endpoint with TEXT+IMAGE response
/// modalities. Responses interleave text and inline image parts; the first
/// inline payload wins.
#[derive(Clone, Debug)]
pub struct ImageClient {
    client: Client,
    api_key: String,
    base_url: String,
    default_model: String,
}

impl ImageClient {
    pub fn new(client: Client, api_key: String, base_url: String, default_model: String) -> Self {
        Self {
            client,
            api_key,
            base_url,
            default_model,
        }
    }

    pub fn supported_models() -> Vec<(&'static str, &'static str, &'static str)> {
        vec![
            (
                "gemini-2.0-flash-exp-image-generation",
                "Gemini 2.0 Flash Image Generation",
                "Google",
            ),
            ("gemini-2.0-flash-exp", "Gemini 2.0 Flash Experimental", "Google"),
        ]
    }

    pub async fn generate(&self, request: &GenerationRequest) -> Result<GenerationOutcome> {
        let model_id = request.model_id.as_deref().unwrap_or(&self.default_model);

        let payload = GenerateContentRequest {
            contents: vec![Content {
                role: None,
                parts: vec![Part::Text {
                    text: request.prompt.clone(),
                }],
            }],
            generation_config: Some(GenerationConfig {
                response_modalities: vec!["TEXT".to_string(), "IMAGE".to_string()],
            }),
        };

        log::info!("Generating image with model: {}", model_id);

        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, model_id, self.api_key
        );

        let response = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| GeminiError::RequestError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(GeminiError::ResponseError(format!(
                "generateContent returned {}: {}",
                status, body
            )));
        }

        let content_response: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GeminiError::ResponseError(e.to_string()))?;

        outcome_from_candidates(&content_response.candidates)
    }
}

/// Scans the first candidate's parts in order. The first inline payload is
/// decoded and returned; text parts seen before it are logged. A response
/// carrying only text becomes a Text outcome so callers can report it
/// without treating it as a transport failure.
pub(crate) fn outcome_from_candidates(candidates: &[Candidate]) -> Result<GenerationOutcome> {
    let candidate = candidates
        .first()
        .ok_or_else(|| GeminiError::ResponseError("no candidates in response".into()))?;

    let mut notes: Vec<&str> = Vec::new();

    for part in &candidate.content.parts {
        match part {
            Part::InlineData { inline_data } => {
                let bytes = BASE64
                    .decode(&inline_data.data)
                    .map_err(|e| GeminiError::SerializationError(e.to_string()))?;
                return Ok(GenerationOutcome::Image(ImagePayload {
                    bytes,
                    mime_type: inline_data.mime_type.clone(),
                }));
            }
            Part::Text { text } => {
                log::debug!("Text part before image: {}", text);
                notes.push(text);
            }
        }
    }

    if notes.is_empty() {
        return Err(GeminiError::ResponseError(
            "no image or text parts in response".into(),
        ));
    }

    Ok(GenerationOutcome::Text(notes.join("\n")))
}
