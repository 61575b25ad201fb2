use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct GenerationRequest {
    pub prompt: String,
    pub model_id: Option<String>,
    pub image_count: Option<u32>,
    pub aspect_ratio: Option<String>,
}

impl GenerationRequest {
    pub fn from_prompt(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            model_id: None,
            image_count: None,
            aspect_ratio: None,
        }
    }

    /// Requests with batch parameters are routed to the Imagen predict
    /// endpoint instead of generateContent.
    pub fn wants_imagen(&self) -> bool {
        self.image_count.is_some() || self.aspect_ratio.is_some()
    }
}

/// Decoded inline image returned by the service.
#[derive(Debug, Clone, Serialize)]
pub struct ImagePayload {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

/// What a single generation call produced: an image payload, or only
/// diagnostic text with no image anywhere in the response.
#[derive(Debug, Clone)]
pub enum GenerationOutcome {
    Image(ImagePayload),
    Text(String),
}

impl GenerationOutcome {
    pub fn is_image(&self) -> bool {
        matches!(self, GenerationOutcome::Image(_))
    }
}
