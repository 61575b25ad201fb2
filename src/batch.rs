use crate::{
    error::Result,
    gemini::ImageGenerator,
    logger,
    models::{GenerationOutcome, GenerationRequest},
};
use std::fs;
use std::path::{Path, PathBuf};

/// One entry of a batch: a prompt plus the file name its image lands under.
#[derive(Debug, Clone)]
pub struct SaveRequest {
    pub prompt: String,
    pub file_name: String,
    pub model_id: Option<String>,
    pub image_count: Option<u32>,
    pub aspect_ratio: Option<String>,
}

impl SaveRequest {
    pub fn new(prompt: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            file_name: file_name.into(),
            model_id: None,
            image_count: None,
            aspect_ratio: None,
        }
    }

    pub fn with_model(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = Some(model_id.into());
        self
    }

    pub fn with_image_count(mut self, image_count: u32) -> Self {
        self.image_count = Some(image_count);
        self
    }

    pub fn with_aspect_ratio(mut self, aspect_ratio: impl Into<String>) -> Self {
        self.aspect_ratio = Some(aspect_ratio.into());
        self
    }

    fn to_generation_request(&self) -> GenerationRequest {
        GenerationRequest {
            prompt: self.prompt.clone(),
            model_id: self.model_id.clone(),
            image_count: self.image_count,
            aspect_ratio: self.aspect_ratio.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub saved: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn all_saved(&self) -> bool {
        self.failed == 0
    }
}

/// Consumes a list of save requests sequentially, one remote call each.
/// Every failure is caught per request, logged, and the run moves on.
pub struct BatchRunner<G: ImageGenerator> {
    generator: G,
    output_dir: PathBuf,
}

impl<G: ImageGenerator> BatchRunner<G> {
    pub fn new(generator: G, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            generator,
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub async fn run(&self, requests: &[SaveRequest]) -> BatchSummary {
        let mut summary = BatchSummary::default();

        for request in requests {
            let _timer = logger::timer(&request.file_name);
            if self.fetch_and_save(request).await {
                summary.saved += 1;
            } else {
                summary.failed += 1;
            }
        }

        log::info!(
            "Batch finished: {} saved, {} failed",
            summary.saved,
            summary.failed
        );

        summary
    }

    /// Issues one generation call and writes the first returned image
    /// payload verbatim to the target path. Returns false when the service
    /// answered with text only or when anything errored; no file is written
    /// in either case.
    pub async fn fetch_and_save(&self, request: &SaveRequest) -> bool {
        log::info!("Generating: {}...", request.file_name);

        match self.try_fetch_and_save(request).await {
            Ok(Some(path)) => {
                log::info!("Saved: {}", path.display());
                true
            }
            Ok(None) => false,
            Err(e) => {
                log::error!("Error generating {}: {}", request.file_name, e);
                false
            }
        }
    }

    async fn try_fetch_and_save(&self, request: &SaveRequest) -> Result<Option<PathBuf>> {
        let outcome = self
            .generator
            .generate(&request.to_generation_request())
            .await?;

        match outcome {
            GenerationOutcome::Image(payload) => {
                fs::create_dir_all(&self.output_dir)?;
                let path = self.output_dir.join(&request.file_name);
                fs::write(&path, &payload.bytes)?;
                Ok(Some(path))
            }
            GenerationOutcome::Text(note) => {
                log::warn!("Text response for {}: {}", request.file_name, note);
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GeminiError;
    use crate::models::ImagePayload;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use uuid::Uuid;

    enum Scripted {
        Image(Vec<u8>),
        Text(String),
        Fail(String),
    }

    struct MockGenerator {
        script: Mutex<Vec<Scripted>>,
        calls: AtomicUsize,
    }

    impl MockGenerator {
        fn new(script: Vec<Scripted>) -> Self {
            Self {
                script: Mutex::new(script),
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ImageGenerator for MockGenerator {
        async fn generate(&self, _request: &GenerationRequest) -> Result<GenerationOutcome> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut script = self.script.lock().unwrap();
            match script.remove(0) {
                Scripted::Image(bytes) => Ok(GenerationOutcome::Image(ImagePayload {
                    bytes,
                    mime_type: "image/png".to_string(),
                })),
                Scripted::Text(note) => Ok(GenerationOutcome::Text(note)),
                Scripted::Fail(msg) => Err(GeminiError::RequestError(msg)),
            }
        }
    }

    fn temp_output_dir() -> PathBuf {
        std::env::temp_dir().join(format!("genimg-test-{}", Uuid::new_v4()))
    }

    #[tokio::test]
    async fn test_image_outcome_writes_exact_bytes() {
        let payload = b"\x89PNG\r\n\x1a\nfake image bytes".to_vec();
        let generator = MockGenerator::new(vec![Scripted::Image(payload.clone())]);
        let dir = temp_output_dir();
        let runner = BatchRunner::new(generator, &dir);

        let request = SaveRequest::new("gold shield", "shield-emblem.png");
        assert!(runner.fetch_and_save(&request).await);

        let written = fs::read(dir.join("shield-emblem.png")).unwrap();
        assert_eq!(written, payload);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn test_text_outcome_writes_nothing() {
        let generator =
            MockGenerator::new(vec![Scripted::Text("cannot generate".to_string())]);
        let dir = temp_output_dir();
        let runner = BatchRunner::new(generator, &dir);

        let request = SaveRequest::new("gold shield", "shield-emblem.png");
        assert!(!runner.fetch_and_save(&request).await);
        assert!(!dir.join("shield-emblem.png").exists());
    }

    #[tokio::test]
    async fn test_failure_is_caught_and_batch_continues() {
        let generator = MockGenerator::new(vec![
            Scripted::Fail("connection refused".to_string()),
            Scripted::Image(b"banner".to_vec()),
            Scripted::Text("try a different prompt".to_string()),
        ]);
        let dir = temp_output_dir();
        let runner = BatchRunner::new(generator, &dir);

        let requests = vec![
            SaveRequest::new("hero banner", "hero-banner.png"),
            SaveRequest::new("login background", "login-bg.png"),
            SaveRequest::new("pattern overlay", "pattern-overlay.png"),
        ];

        let summary = runner.run(&requests).await;
        assert_eq!(summary, BatchSummary { saved: 1, failed: 2 });
        assert!(!summary.all_saved());
        assert_eq!(runner.generator.calls(), 3);

        assert!(!dir.join("hero-banner.png").exists());
        assert!(dir.join("login-bg.png").exists());
        assert!(!dir.join("pattern-overlay.png").exists());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn test_rerun_overwrites_destination() {
        let generator = MockGenerator::new(vec![
            Scripted::Image(b"first render".to_vec()),
            Scripted::Image(b"second render".to_vec()),
        ]);
        let dir = temp_output_dir();
        let runner = BatchRunner::new(generator, &dir);

        let request = SaveRequest::new("pattern", "pattern-bg.png");
        assert!(runner.fetch_and_save(&request).await);
        assert_eq!(fs::read(dir.join("pattern-bg.png")).unwrap(), b"first render");

        assert!(runner.fetch_and_save(&request).await);
        assert_eq!(
            fs::read(dir.join("pattern-bg.png")).unwrap(),
            b"second render"
        );

        fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn test_output_dir_created_on_demand() {
        let generator = MockGenerator::new(vec![Scripted::Image(b"splash".to_vec())]);
        let dir = temp_output_dir().join("nested").join("public");
        let runner = BatchRunner::new(generator, &dir);

        assert!(!dir.exists());
        let request = SaveRequest::new("splash background", "splash-bg.png");
        assert!(runner.fetch_and_save(&request).await);
        assert!(dir.join("splash-bg.png").exists());
    }

    #[test]
    fn test_save_request_builders() {
        let request = SaveRequest::new("dashboard", "dashboard-bg.png")
            .with_model("imagen-4.0-generate-001")
            .with_image_count(1)
            .with_aspect_ratio("16:9");

        let generation = request.to_generation_request();
        assert_eq!(generation.prompt, "dashboard");
        assert_eq!(generation.model_id.as_deref(), Some("imagen-4.0-generate-001"));
        assert_eq!(generation.image_count, Some(1));
        assert_eq!(generation.aspect_ratio.as_deref(), Some("16:9"));
        assert!(generation.wants_imagen());
    }
}
