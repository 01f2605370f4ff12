use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::STANDARD};
use memochat_core::{
    AudioUpload, ChatMessage, ChatOptions, GeneratedImage, ImageGenerator, ImageRequest,
    LLMProvider, LLMResponse, Transcriber, Usage,
};
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, info};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OpenAiProvider {
    pub fn new(api_key: String) -> Self {
        info!("Creating OpenAiProvider");
        Self {
            client: Client::new(),
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Replace the HTTP client with one that gives up after `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> anyhow::Result<Self> {
        self.client = Client::builder().timeout(timeout).build()?;
        Ok(self)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    /// Send a request and surface the response body on non-success statuses.
    async fn send(request: reqwest::RequestBuilder) -> anyhow::Result<reqwest::Response> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(anyhow::anyhow!("API error {status}: {}", error_message(&body)))
    }
}

fn chat_request(messages: &[ChatMessage], options: &ChatOptions) -> serde_json::Value {
    json!({
        "model": options.model,
        "messages": messages,
        "temperature": options.temperature,
        "max_tokens": options.max_tokens,
    })
}

fn parse_chat_response(response: &serde_json::Value) -> anyhow::Result<LLMResponse> {
    let content = response["choices"][0]["message"]["content"]
        .as_str()
        .ok_or_else(|| anyhow::anyhow!("Invalid response format: missing content"))?
        .to_string();

    let count = |u: &serde_json::Map<String, serde_json::Value>, key: &str| {
        u.get(key)
            .and_then(serde_json::Value::as_u64)
            .and_then(|n| u32::try_from(n).ok())
            .unwrap_or(0)
    };
    let usage = response["usage"].as_object().map(|u| Usage {
        prompt_tokens: count(u, "prompt_tokens"),
        completion_tokens: count(u, "completion_tokens"),
        total_tokens: count(u, "total_tokens"),
    });

    Ok(LLMResponse { content, usage })
}

/// Pull `error.message` out of an API error body, falling back to the raw text.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}

#[derive(Debug, Deserialize)]
struct ImageResponse {
    data: Vec<ImageData>,
}

#[derive(Debug, Deserialize)]
struct ImageData {
    b64_json: Option<String>,
    revised_prompt: Option<String>,
}

fn decode_image_response(response: ImageResponse) -> anyhow::Result<GeneratedImage> {
    let data = response
        .data
        .into_iter()
        .next()
        .ok_or_else(|| anyhow::anyhow!("No image data in response"))?;
    let b64 = data
        .b64_json
        .ok_or_else(|| anyhow::anyhow!("Image response has no b64_json payload"))?;
    let bytes = STANDARD
        .decode(b64)
        .map_err(|e| anyhow::anyhow!("Failed to decode base64 image: {e}"))?;

    Ok(GeneratedImage {
        bytes,
        revised_prompt: data.revised_prompt,
    })
}

#[async_trait]
impl LLMProvider for OpenAiProvider {
    async fn chat(
        &self,
        messages: &[ChatMessage],
        options: &ChatOptions,
    ) -> anyhow::Result<LLMResponse> {
        info!(
            "Sending chat request: model={}, messages={}",
            options.model,
            messages.len()
        );

        let response = Self::send(
            self.client
                .post(self.endpoint("chat/completions"))
                .bearer_auth(&self.api_key)
                .json(&chat_request(messages, options)),
        )
        .await?
        .json::<serde_json::Value>()
        .await?;

        let parsed = parse_chat_response(&response)?;
        debug!("Chat usage: {:?}", parsed.usage);
        Ok(parsed)
    }
}

#[async_trait]
impl Transcriber for OpenAiProvider {
    async fn transcribe(&self, audio: &AudioUpload, model: &str) -> anyhow::Result<String> {
        info!(
            "Transcribing {} ({:.2} MiB) with {model}",
            audio.file_name,
            audio.size_mib()
        );

        let part = Part::bytes(audio.bytes.clone()).file_name(audio.file_name.clone());
        let form = Form::new()
            .text("model", model.to_string())
            .text("response_format", "text")
            .part("file", part);

        let text = Self::send(
            self.client
                .post(self.endpoint("audio/transcriptions"))
                .bearer_auth(&self.api_key)
                .multipart(form),
        )
        .await?
        .text()
        .await?;

        Ok(text.trim().to_string())
    }
}

#[async_trait]
impl ImageGenerator for OpenAiProvider {
    async fn generate(&self, request: &ImageRequest) -> anyhow::Result<GeneratedImage> {
        info!(
            "Generating image: model={}, size={}, quality={}",
            request.model, request.size, request.quality
        );

        let body = json!({
            "model": request.model,
            "prompt": request.prompt,
            "size": request.size.as_str(),
            "quality": request.quality.as_str(),
            "n": 1,
            "response_format": "b64_json",
        });

        let response = Self::send(
            self.client
                .post(self.endpoint("images/generations"))
                .bearer_auth(&self.api_key)
                .json(&body),
        )
        .await?
        .json::<ImageResponse>()
        .await?;

        let image = decode_image_response(response)?;
        info!("Image generated: {} bytes", image.bytes.len());
        Ok(image)
    }
}
