pub mod batch;
pub mod config;
pub mod error;
pub mod gemini;
pub mod logger;
pub mod models;

pub use batch::{BatchRunner, BatchSummary, SaveRequest};
pub use config::{Config, GeminiConfig};
pub use error::{GeminiError, Result};
pub use gemini::{GeminiClient, ImageClient, ImageGenerator, ImagenClient};
pub use models::{GenerationOutcome, GenerationRequest, ImagePayload};
