pub mod image_client;
pub mod imagen_client;
pub mod wire;

use crate::{
    config::GeminiConfig,
    error::{GeminiError, Result},
    models::{GenerationOutcome, GenerationRequest},
};
use async_trait::async_trait;
use reqwest::Client;

pub use image_client::{ImageClient, DEFAULT_IMAGE_MODEL};
pub use imagen_client::{ImagenClient, DEFAULT_IMAGEN_MODEL};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Anything that can turn a generation request into an outcome. Both
/// sub-clients implement it, as does [`GeminiClient`] itself, which routes
/// between them.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationOutcome>;
}

#[derive(Clone, Debug)]
pub struct GeminiClient {
    image_client: ImageClient,
    imagen_client: ImagenClient,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .ok_or_else(|| GeminiError::ConfigError("GOOGLE_API_KEY is required".into()))?;

        let base_url = config
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let image_model = config
            .image_model
            .unwrap_or_else(|| DEFAULT_IMAGE_MODEL.to_string());

        let imagen_model = config
            .imagen_model
            .unwrap_or_else(|| DEFAULT_IMAGEN_MODEL.to_string());

        let client = Client::new();

        Ok(Self {
            image_client: ImageClient::new(
                client.clone(),
                api_key.clone(),
                base_url.clone(),
                image_model,
            ),
            imagen_client: ImagenClient::new(client, api_key, base_url, imagen_model),
        })
    }

    pub fn image(&self) -> &ImageClient {
        &self.image_client
    }

    pub fn imagen(&self) -> &ImagenClient {
        &self.imagen_client
    }
}

#[async_trait]
impl ImageGenerator for ImageClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationOutcome> {
        ImageClient::generate(self, request).await
    }
}

#[async_trait]
impl ImageGenerator for ImagenClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationOutcome> {
        ImagenClient::generate(self, request).await
    }
}

#[async_trait]
impl ImageGenerator for GeminiClient {
    /// Requests carrying batch parameters go to the Imagen predict endpoint,
    /// everything else to generateContent.
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationOutcome> {
        if request.wants_imagen() {
            self.imagen_client.generate(request).await
        } else {
            self.image_client.generate(request).await
        }
    }
}
