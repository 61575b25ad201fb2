use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub image_model: Option<String>,
    pub imagen_model: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub output_dir: Option<PathBuf>,
    pub gemini: Option<GeminiConfig>,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        GeminiConfig {
            api_key: None,
            base_url: None,
            image_model: None,
            imagen_model: None,
        }
    }
}

impl GeminiConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let api_key = env::var("GOOGLE_API_KEY").ok();
        let base_url = env::var("GEMINI_BASE_URL").ok();
        let image_model = env::var("GEMINI_IMAGE_MODEL").ok();
        let imagen_model = env::var("GEMINI_IMAGEN_MODEL").ok();

        GeminiConfig {
            api_key,
            base_url,
            image_model,
            imagen_model,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_models(
        mut self,
        image_model: impl Into<String>,
        imagen_model: impl Into<String>,
    ) -> Self {
        self.image_model = Some(image_model.into());
        self.imagen_model = Some(imagen_model.into());
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            output_dir: None,
            gemini: None,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let output_dir = env::var("OUTPUT_DIR").ok().map(PathBuf::from);

        Config {
            output_dir,
            gemini: Some(GeminiConfig::from_env()),
        }
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(output_dir.into());
        self
    }

    pub fn with_gemini(mut self, config: GeminiConfig) -> Self {
        self.gemini = Some(config);
        self
    }

    /// Directory image files are written into when none is configured.
    pub fn output_dir_or_default(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("public"))
    }
}
