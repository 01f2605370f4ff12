//! Static strategy pattern for CLI commands.
//!
//! Each command is a separate strategy with its own input type, dispatched
//! statically from `main`.

use memochat_config::Config;
use memochat_providers::OpenAiProvider;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

mod chat;
mod image;
mod info;
mod init;
mod transcribe;
mod version;

pub use chat::{ChatInput, ChatStrategy};
pub use image::{ImageInput, ImageStrategy};
pub use info::InfoStrategy;
pub use init::InitStrategy;
pub use transcribe::{TranscribeInput, TranscribeStrategy};
pub use version::VersionStrategy;

/// Core trait defining the contract for all command strategies.
///
/// # Example
/// ```rust,ignore
/// struct MyStrategy;
///
/// impl CommandStrategy for MyStrategy {
///     type Input = MyInput;
///
///     async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
///         Ok(())
///     }
/// }
/// ```
pub trait CommandStrategy: Send + Sync + 'static {
    /// The input type this strategy accepts.
    type Input;

    /// Execute the command with the given input.
    ///
    /// # Errors
    /// Returns an error if command execution fails.
    async fn execute(&self, input: Self::Input) -> anyhow::Result<()>;
}

/// Build the HTTP provider from the loaded configuration.
fn build_provider(config: &Config) -> anyhow::Result<OpenAiProvider> {
    let openai = &config.providers.openai;
    let mut provider = OpenAiProvider::new(config.api_key()?.to_string());

    if let Some(ref base_url) = openai.base_url {
        info!("Using custom base URL: {base_url}");
        provider = provider.with_base_url(base_url.clone());
    }
    if let Some(secs) = openai.timeout_secs {
        provider = provider.with_timeout(Duration::from_secs(secs))?;
    }
    Ok(provider)
}

/// Timestamp used in generated file names, e.g. `20240501_103000`.
fn file_timestamp() -> String {
    chrono::Local::now().format("%Y%m%d_%H%M%S").to_string()
}

fn output_path(out_dir: &Path, file_name: &str) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(out_dir)?;
    Ok(out_dir.join(file_name))
}
