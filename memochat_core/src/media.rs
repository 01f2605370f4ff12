//! Audio and image request types shared by providers and the CLI.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Upload limit of the hosted transcription endpoint.
pub const MAX_AUDIO_BYTES: usize = 25 * 1024 * 1024;

/// File extensions accepted for transcription.
pub const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "m4a", "flac", "ogg", "webm"];

/// Maximum number of images generated per request.
pub const MAX_IMAGE_COUNT: u8 = 4;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("unsupported audio format: {0} (expected one of mp3, wav, m4a, flac, ogg, webm)")]
    UnsupportedFormat(String),

    #[error("audio file is {size} bytes, limit is {MAX_AUDIO_BYTES} bytes")]
    TooLarge { size: usize },

    #[error("audio file is empty")]
    Empty,

    #[error("invalid image size: {0}")]
    InvalidSize(String),

    #[error("invalid image quality: {0}")]
    InvalidQuality(String),

    #[error("image count must be between 1 and {MAX_IMAGE_COUNT}, got {0}")]
    InvalidCount(u8),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// An audio file that passed format and size checks.
#[derive(Debug, Clone)]
pub struct AudioUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl AudioUpload {
    pub fn from_bytes(file_name: impl Into<String>, bytes: Vec<u8>) -> Result<Self, MediaError> {
        let file_name = file_name.into();
        let extension = Path::new(&file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        if !AUDIO_EXTENSIONS.contains(&extension.as_str()) {
            return Err(MediaError::UnsupportedFormat(file_name));
        }
        if bytes.is_empty() {
            return Err(MediaError::Empty);
        }
        if bytes.len() > MAX_AUDIO_BYTES {
            return Err(MediaError::TooLarge { size: bytes.len() });
        }

        Ok(Self { file_name, bytes })
    }

    pub fn from_path(path: &Path) -> Result<Self, MediaError> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        let bytes = std::fs::read(path)?;
        Self::from_bytes(file_name, bytes)
    }

    /// Size in mebibytes, for display.
    #[must_use]
    #[expect(clippy::cast_precision_loss, reason = "display only")]
    pub fn size_mib(&self) -> f64 {
        self.bytes.len() as f64 / (1024.0 * 1024.0)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ImageSize {
    #[default]
    #[serde(rename = "1024x1024")]
    Square,
    #[serde(rename = "1024x1792")]
    Portrait,
    #[serde(rename = "1792x1024")]
    Landscape,
}

impl ImageSize {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Square => "1024x1024",
            Self::Portrait => "1024x1792",
            Self::Landscape => "1792x1024",
        }
    }
}

impl FromStr for ImageSize {
    type Err = MediaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1024x1024" => Ok(Self::Square),
            "1024x1792" => Ok(Self::Portrait),
            "1792x1024" => Ok(Self::Landscape),
            other => Err(MediaError::InvalidSize(other.to_string())),
        }
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ImageQuality {
    #[default]
    Standard,
    Hd,
}

impl ImageQuality {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Hd => "hd",
        }
    }
}

impl FromStr for ImageQuality {
    type Err = MediaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "hd" => Ok(Self::Hd),
            _ => Err(MediaError::InvalidQuality(s.to_string())),
        }
    }
}

impl std::fmt::Display for ImageQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct ImageRequest {
    pub model: String,
    pub prompt: String,
    pub size: ImageSize,
    pub quality: ImageQuality,
}

#[derive(Debug, Clone)]
pub struct GeneratedImage {
    pub bytes: Vec<u8>,
    /// Prompt as rewritten by the provider, when it reports one.
    pub revised_prompt: Option<String>,
}

/// Check a requested image count against the per-request limit.
pub const fn validate_image_count(count: u8) -> Result<u8, MediaError> {
    if count == 0 || count > MAX_IMAGE_COUNT {
        Err(MediaError::InvalidCount(count))
    } else {
        Ok(count)
    }
}

/// Append artistic styles to a prompt: `"{prompt}, in {styles} style"`.
#[must_use]
pub fn styled_prompt(prompt: &str, styles: &[String]) -> String {
    if styles.is_empty() {
        return prompt.to_string();
    }
    let style_text = styles.join(", ");
    let prompt = prompt.trim();
    if prompt.is_empty() {
        format!("in {style_text} style")
    } else {
        format!("{prompt}, in {style_text} style")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_supported_audio() {
        let upload = AudioUpload::from_bytes("talk.MP3", vec![1, 2, 3]);
        assert!(upload.is_ok());
    }

    #[test]
    fn rejects_unknown_extension() {
        let err = AudioUpload::from_bytes("notes.txt", vec![1]).err();
        assert!(matches!(err, Some(MediaError::UnsupportedFormat(_))));

        let err = AudioUpload::from_bytes("noext", vec![1]).err();
        assert!(matches!(err, Some(MediaError::UnsupportedFormat(_))));
    }

    #[test]
    fn rejects_oversized_and_empty_audio() {
        let err = AudioUpload::from_bytes("big.wav", vec![0; MAX_AUDIO_BYTES + 1]).err();
        assert!(matches!(err, Some(MediaError::TooLarge { .. })));

        let err = AudioUpload::from_bytes("empty.wav", Vec::new()).err();
        assert!(matches!(err, Some(MediaError::Empty)));
    }

    #[test]
    fn parses_image_options() {
        assert_eq!("1792x1024".parse::<ImageSize>().ok(), Some(ImageSize::Landscape));
        assert!("512x512".parse::<ImageSize>().is_err());
        assert_eq!("HD".parse::<ImageQuality>().ok(), Some(ImageQuality::Hd));
        assert!("ultra".parse::<ImageQuality>().is_err());
    }

    #[test]
    fn image_count_bounds() {
        assert!(validate_image_count(0).is_err());
        assert!(validate_image_count(1).is_ok());
        assert!(validate_image_count(4).is_ok());
        assert!(validate_image_count(5).is_err());
    }

    #[test]
    fn styles_are_appended() {
        let styles = vec!["watercolor".to_string(), "minimalist".to_string()];
        assert_eq!(
            styled_prompt("A fox", &styles),
            "A fox, in watercolor, minimalist style"
        );
        assert_eq!(styled_prompt("", &styles), "in watercolor, minimalist style");
        assert_eq!(styled_prompt("A fox", &[]), "A fox");
    }
}
