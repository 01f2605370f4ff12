//! Audio transcription with optional translation.

use memochat_config::Config;
use memochat_conversation::translation::{self, LANGUAGES};
use memochat_core::{AudioUpload, Transcriber};
use std::path::PathBuf;
use tracing::{info, warn};

use super::{build_provider, file_timestamp, output_path};

/// Input parameters for the Transcribe command strategy.
#[derive(Debug, Clone)]
pub struct TranscribeInput {
    /// Audio file to transcribe
    pub file: PathBuf,
    /// Translate the transcription into this language
    pub language: Option<String>,
    /// Translation model override
    pub model: Option<String>,
    /// Directory for the written text files
    pub out_dir: PathBuf,
}

/// Strategy for executing the Transcribe command.
#[derive(Debug, Clone, Copy)]
pub struct TranscribeStrategy;

impl super::CommandStrategy for TranscribeStrategy {
    type Input = TranscribeInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load()?;
        let audio = AudioUpload::from_path(&input.file)?;
        println!("File: {} ({:.2} MB)", audio.file_name, audio.size_mib());

        let provider = build_provider(&config)?;
        let text = provider
            .transcribe(&audio, &config.audio.transcription_model)
            .await?;

        let timestamp = file_timestamp();
        let transcription_path =
            output_path(&input.out_dir, &format!("transcription_{timestamp}.txt"))?;
        std::fs::write(&transcription_path, &text)?;

        println!("\n=== Transcription ===\n{text}\n");
        println!("Saved: {}", transcription_path.display());

        let Some(language) = input.language else {
            return Ok(());
        };
        if !LANGUAGES.iter().any(|l| l.eq_ignore_ascii_case(&language)) {
            warn!("{language} is not in the list of suggested languages");
        }

        let model = input
            .model
            .unwrap_or_else(|| config.audio.translation_model.clone());
        info!("Translating transcription with {model}");
        let translated = translation::translate(&provider, &text, &language, &model).await?;

        let translation_path = output_path(
            &input.out_dir,
            &format!(
                "translation_{}_{timestamp}.txt",
                translation::language_slug(&language)
            ),
        )?;
        std::fs::write(&translation_path, &translated)?;

        println!("\n=== Translation ({language}) ===\n{translated}\n");
        println!("Saved: {}", translation_path.display());
        Ok(())
    }
}
