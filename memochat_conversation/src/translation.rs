//! Translation of transcripts through the completion API.

use tracing::info;

use memochat_core::{ChatMessage, ChatOptions, LLMProvider};

use crate::error::{ConversationError, Result};

/// Sampling temperature for translations; low to stay close to the source.
pub const TRANSLATION_TEMPERATURE: f32 = 0.3;

/// Target languages offered by the CLI.
pub const LANGUAGES: &[&str] = &[
    "Arabic",
    "French",
    "Spanish",
    "German",
    "Chinese (Simplified)",
    "Chinese (Traditional)",
    "Japanese",
    "Korean",
    "Portuguese",
    "Italian",
    "Russian",
    "Dutch",
    "Hindi",
    "Turkish",
    "Polish",
    "Swedish",
];

/// Messages asking the model to translate `text` into `language`.
#[must_use]
pub fn translation_messages(text: &str, language: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(format!(
            "You are a professional translator. Translate the given text accurately to {language}. \
             Maintain the original meaning, tone, and context. \
             If the text is already in {language}, indicate that no translation is needed."
        )),
        ChatMessage::user(format!("Translate this text to {language}:\n\n{text}")),
    ]
}

/// Translate `text` into `language` with `model`.
pub async fn translate<P>(provider: &P, text: &str, language: &str, model: &str) -> Result<String>
where
    P: LLMProvider + ?Sized,
{
    info!("Translating {} characters to {language}", text.len());
    let options = ChatOptions::new(model).with_temperature(TRANSLATION_TEMPERATURE);
    let response = provider
        .chat(&translation_messages(text, language), &options)
        .await?;

    if response.content.trim().is_empty() {
        return Err(ConversationError::EmptyResponse);
    }
    Ok(response.content)
}

/// File-name friendly form of a language name, e.g. `chinese_simplified`.
#[must_use]
pub fn language_slug(language: &str) -> String {
    language
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}
