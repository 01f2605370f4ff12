//! Multi-turn conversation command with fact memory.

use memochat_config::Config;
use memochat_conversation::{ConversationConfig, ConversationManager, export};
use memochat_memory::Extractor;
use std::path::PathBuf;
use tracing::info;

use super::build_provider;

/// Input parameters for the Chat command strategy.
#[derive(Debug, Clone)]
pub struct ChatInput {
    /// Optional single message to send (non-interactive mode)
    pub message: Option<String>,
    /// Optional model override
    pub model: Option<String>,
    /// JSON export to continue from
    pub resume: Option<PathBuf>,
}

/// Strategy for executing the Chat command.
#[derive(Debug, Clone, Copy)]
pub struct ChatStrategy;

fn conversation_config(config: &Config, model: Option<String>) -> ConversationConfig {
    let defaults = &config.agents.defaults;
    ConversationConfig {
        temperature: defaults.temperature,
        max_tokens: defaults.max_tokens,
        ..ConversationConfig::default()
    }
    .with_model(model.unwrap_or_else(|| defaults.model.clone()))
    .with_system_prompt(config.system_prompt().to_string())
    .with_history_limit(defaults.history_limit)
    .with_rollback_facts_on_error(defaults.rollback_facts_on_error)
}

impl super::CommandStrategy for ChatStrategy {
    type Input = ChatInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load()?;
        let provider = build_provider(&config)?;
        let extractor = Extractor::with_defaults()?;
        info!("Loaded {} extraction patterns", extractor.pattern_count());

        let conversation_config = conversation_config(&config, input.model);
        info!("Starting conversation with model {}", conversation_config.model);

        let mut manager = ConversationManager::new(provider, extractor, conversation_config);

        if let Some(ref path) = input.resume {
            let session = export::import_from_path(path, config.system_prompt())?;
            manager = manager.with_session(session);
        }

        if let Some(msg) = input.message {
            let result = manager.process_turn(&msg).await?;
            println!("{}", result.reply);
            info!("Turn {} completed.", result.turn_number);
        } else {
            manager.run_interactive().await?;
            info!(
                "Conversation ended: {} total messages",
                manager.session().messages().len()
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_override_wins() {
        let config = Config::default();
        let conversation = conversation_config(&config, Some("gpt-4o".to_string()));
        assert_eq!(conversation.model, "gpt-4o");
        assert_eq!(conversation.max_tokens, config.agents.defaults.max_tokens);
        assert_eq!(conversation.system_prompt, config.system_prompt());

        let conversation = conversation_config(&config, None);
        assert_eq!(conversation.model, config.agents.defaults.model);
        assert_eq!(conversation.history_limit, config.agents.defaults.history_limit);
        assert!(!conversation.rollback_facts_on_error);
    }
}
