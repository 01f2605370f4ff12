//! Image generation from a text prompt.

use memochat_config::Config;
use memochat_core::{
    ImageGenerator, ImageQuality, ImageRequest, ImageSize, styled_prompt, validate_image_count,
};
use std::path::PathBuf;
use tracing::info;

use super::{build_provider, file_timestamp, output_path};

/// Input parameters for the Image command strategy.
#[derive(Debug, Clone)]
pub struct ImageInput {
    pub prompt: String,
    pub styles: Vec<String>,
    pub size: Option<ImageSize>,
    pub quality: Option<ImageQuality>,
    pub count: u8,
    pub out_dir: PathBuf,
}

/// Strategy for executing the Image command.
#[derive(Debug, Clone, Copy)]
pub struct ImageStrategy;

impl super::CommandStrategy for ImageStrategy {
    type Input = ImageInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let count = validate_image_count(input.count)?;
        let prompt = styled_prompt(&input.prompt, &input.styles);
        if prompt.trim().is_empty() {
            anyhow::bail!("Please enter a description for your image");
        }

        let config = Config::load()?;
        let provider = build_provider(&config)?;
        let request = ImageRequest {
            model: config.image.model.clone(),
            prompt,
            size: input.size.unwrap_or(config.image.size),
            quality: input.quality.unwrap_or(config.image.quality),
        };
        info!("Requesting {count} image(s)");

        let timestamp = file_timestamp();
        for i in 1..=count {
            let image = provider.generate(&request).await?;
            let path = output_path(
                &input.out_dir,
                &format!("ai_generated_image_{timestamp}_{i}.png"),
            )?;
            std::fs::write(&path, &image.bytes)?;

            println!("Saved: {}", path.display());
            if let Some(revised) = image.revised_prompt {
                println!("  Revised prompt: {revised}");
            }
        }

        Ok(())
    }
}
