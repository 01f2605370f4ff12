use memochat_config::Config;

/// Strategy for initializing the configuration.
///
/// Creates the default configuration file at `~/memochat/config.json`.
#[derive(Debug, Clone, Copy)]
pub struct InitStrategy;

impl super::CommandStrategy for InitStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let config_path = Config::create_config()?;

        println!("Created config file at: {}", config_path.display());
        println!();
        println!("Next steps:");
        println!("   1. Add your OpenAI API key to the config file (or set OPENAI_API_KEY)");
        println!("   2. Run 'memochat chat' to start a conversation");
        println!();
        println!("Configuration options:");
        println!("   - agents.defaults.history_limit: messages sent per request (omit for all)");
        println!("   - agents.defaults.rollback_facts_on_error: forget facts from failed turns");
        println!("   - image.size: 1024x1024, 1024x1792 or 1792x1024");
        println!();
        Ok(())
    }
}
