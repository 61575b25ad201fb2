use genimg::{
    BatchRunner, Config, GeminiClient, GeminiConfig, ImageClient, ImagenClient, SaveRequest,
};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file first
    match dotenv::dotenv() {
        Ok(_) => log::info!("✅ .env file loaded successfully"),
        Err(_) => log::warn!("⚠️  No .env file found, using system environment variables"),
    }

    genimg::logger::init_with_config(
        genimg::logger::LoggerConfig::development().with_level(genimg::logger::LogLevel::Debug),
    )?;

    genimg::logger::log_startup_info("genimg", env!("CARGO_PKG_VERSION"));

    log::info!("🔍 Checking Gemini environment...");

    match env::var("GOOGLE_API_KEY") {
        Ok(api_key) => {
            log::info!("✅ GOOGLE_API_KEY found in environment");
            log::debug!(
                "API key starts with: {}...",
                &api_key[..5.min(api_key.len())]
            );
        }
        Err(_) => {
            log::warn!("⚠️  GOOGLE_API_KEY not set, client construction will fail");
        }
    }

    let config = Config::from_env();
    genimg::logger::log_config_info(&config);

    log::info!("🔄 Creating Gemini client...");
    let gemini_config = config.gemini.clone().unwrap_or_else(GeminiConfig::from_env);
    let client = match GeminiClient::new(gemini_config) {
        Ok(client) => {
            log::info!("✅ Gemini client initialized successfully");
            client
        }
        Err(e) => {
            log::error!("❌ Failed to initialize Gemini client: {}", e);
            return Err(e.into());
        }
    };

    log::info!("🖼️  Available image generation models:");
    for (id, name, provider) in ImageClient::supported_models() {
        log::info!("  {} - {} ({})", id, name, provider);
    }
    for (id, name, provider) in ImagenClient::supported_models() {
        log::info!("  {} - {} ({})", id, name, provider);
    }

    let requests = vec![
        SaveRequest::new(
            "A luxurious golden shield emblem with ornate decorative borders, \
             warm gold and dark brown colors, clean modern design, no text, \
             white background, high quality app icon style",
            "shield-emblem.png",
        ),
        SaveRequest::new(
            "Beautiful warm sunset panorama over rolling hills and mountains, \
             golden hour lighting with warm orange and gold tones, suitable as \
             a website hero banner background, 16:9 landscape",
            "hero-banner.png",
        )
        .with_aspect_ratio("16:9"),
        SaveRequest::new(
            "Subtle elegant geometric pattern, light gold on cream, seamless \
             tileable, luxury stationery feel, minimalist design",
            "pattern-bg.png",
        ),
        SaveRequest::new(
            "Dramatic aerial view of desert mountains at sunset, golden hour \
             lighting, misty valleys, epic cinematic landscape photography",
            "login-bg.png",
        )
        .with_image_count(1)
        .with_aspect_ratio("16:9"),
    ];

    log::info!("🎨 Running batch of {} image requests...", requests.len());

    let runner = BatchRunner::new(client, config.output_dir_or_default());
    let summary = runner.run(&requests).await;

    log::info!("🎉 Batch complete!");
    log::info!("   Saved: {}", summary.saved);
    log::info!("   Failed: {}", summary.failed);
    log::info!(
        "💡 Check the generated image files in {}",
        runner.output_dir().display()
    );

    if !summary.all_saved() {
        log::logger().flush();
        std::process::exit(1);
    }

    Ok(())
}
