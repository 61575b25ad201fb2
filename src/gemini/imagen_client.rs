use crate::{
    error::{GeminiError, Result},
    gemini::wire::{ImagenInstance, ImagenParameters, PredictRequest, PredictResponse, Prediction},
    models::{GenerationOutcome, GenerationRequest, ImagePayload},
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use reqwest::Client;

pub const DEFAULT_IMAGEN_MODEL: &str = "imagen-4.0-generate-001";
pub const DEFAULT_OUTPUT_MIME_TYPE: &str = "image/png";

/// Client for the Imagen predict endpoint. Unlike generateContent it takes
/// batch parameters (sample count, aspect ratio) and returns only images.
#[derive(Clone, Debug)]
pub struct ImagenClient {
    client: Client,
    api_key: String,
    base_url: String,
    default_model: String,
}

impl ImagenClient {
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
            ("imagen-4.0-generate-001", "Imagen 4.0", "Google"),
            ("imagen-3.0-generate-002", "Imagen 3.0", "Google"),
        ]
    }

    pub async fn generate(&self, request: &GenerationRequest) -> Result<GenerationOutcome> {
        let model_id = request.model_id.as_deref().unwrap_or(&self.default_model);

        let payload = PredictRequest {
            instances: vec![ImagenInstance {
                prompt: request.prompt.clone(),
            }],
            parameters: ImagenParameters {
                sample_count: request.image_count.unwrap_or(1),
                aspect_ratio: request.aspect_ratio.clone(),
                output_mime_type: DEFAULT_OUTPUT_MIME_TYPE.to_string(),
            },
        };

        log::info!("Generating image with model: {}", model_id);

        let url = format!(
            "{}/v1beta/models/{}:predict?key={}",
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
                "predict returned {}: {}",
                status, body
            )));
        }

        let predict_response: PredictResponse = response
            .json()
            .await
            .map_err(|e| GeminiError::ResponseError(e.to_string()))?;

        outcome_from_predictions(&predict_response.predictions)
    }
}

/// The first prediction is decoded and returned; the endpoint never mixes
/// text into its predictions, so an empty list means no image was produced.
pub(crate) fn outcome_from_predictions(predictions: &[Prediction]) -> Result<GenerationOutcome> {
    let prediction = predictions
        .first()
        .ok_or_else(|| GeminiError::ResponseError("no images generated".into()))?;

    let bytes = BASE64
        .decode(&prediction.bytes_base64_encoded)
        .map_err(|e| GeminiError::SerializationError(e.to_string()))?;

    Ok(GenerationOutcome::Image(ImagePayload {
        bytes,
        mime_type: prediction
            .mime_type
            .clone()
            .unwrap_or_else(|| DEFAULT_OUTPUT_MIME_TYPE.to_string()),
    }))
}
