use memochat_config::Config;
use memochat_core::util::{mask_secret, truncate};

/// Strategy for displaying configuration information.
///
/// Prints the API key (masked), provider settings, agent defaults and the
/// audio and image models.
#[derive(Debug, Clone, Copy)]
pub struct InfoStrategy;

impl super::CommandStrategy for InfoStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load()?;

        println!("=== memochat Configuration ===\n");

        println!("Provider:");
        let openai = &config.providers.openai;
        println!("  API Key: {}", mask_secret(&openai.api_key));
        println!(
            "  Base URL: {}",
            openai
                .base_url
                .as_deref()
                .unwrap_or(memochat_providers::DEFAULT_BASE_URL)
        );
        match openai.timeout_secs {
            Some(secs) => println!("  Timeout: {secs}s"),
            None => println!("  Timeout: (none)"),
        }
        println!();

        let defaults = &config.agents.defaults;
        println!("Agent Defaults:");
        println!("  Model: {}", defaults.model);
        println!("  Max Tokens: {}", defaults.max_tokens);
        println!("  Temperature: {}", defaults.temperature);
        println!("  System Prompt: {}", truncate(config.system_prompt(), 60));
        match defaults.history_limit {
            Some(limit) => println!("  History Limit: {limit}"),
            None => println!("  History Limit: (all)"),
        }
        println!(
            "  Rollback Facts On Error: {}",
            defaults.rollback_facts_on_error
        );
        println!();

        println!("Audio:");
        println!("  Transcription Model: {}", config.audio.transcription_model);
        println!("  Translation Model: {}", config.audio.translation_model);
        println!();

        println!("Image:");
        println!("  Model: {}", config.image.model);
        println!("  Size: {}", config.image.size);
        println!("  Quality: {}", config.image.quality);

        Ok(())
    }
}
