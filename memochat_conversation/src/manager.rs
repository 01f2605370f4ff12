//! Conversation manager for multi-turn dialogue with memory.
//!
//! The `ConversationManager` is the session context object: every turn goes
//! through it, and it is the only thing that mutates the session.

use memochat_core::util::DEFAULT_SYSTEM_PROMPT;
use memochat_core::{ChatOptions, LLMProvider, Role};
use memochat_memory::{Extractor, FactSet, MemoryStore};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::error::{ConversationError, Result};
use crate::export::{self, ExportFormat};
use crate::prompt::PromptBuilder;
use crate::session::ConversationSession;

/// Configuration for conversation management.
#[derive(Debug, Clone)]
pub struct ConversationConfig {
    /// Model to use for completions
    pub model: String,
    /// System prompt, fixed at index 0 of the history
    pub system_prompt: String,
    /// Temperature for sampling
    pub temperature: f32,
    /// Max tokens in response
    pub max_tokens: usize,
    /// Maximum history messages sent per request; `None` sends everything
    pub history_limit: Option<usize>,
    /// Undo a turn's memory merge when its completion call fails
    pub rollback_facts_on_error: bool,
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self {
            model: "gpt-3.5-turbo".to_string(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            temperature: 0.7,
            max_tokens: 1024,
            history_limit: None,
            rollback_facts_on_error: false,
        }
    }
}

impl ConversationConfig {
    /// Set the model name.
    #[must_use]
    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    /// Set the system prompt.
    #[must_use]
    pub fn with_system_prompt(mut self, prompt: String) -> Self {
        self.system_prompt = prompt;
        self
    }

    /// Set the history limit.
    #[must_use]
    pub const fn with_history_limit(mut self, limit: Option<usize>) -> Self {
        self.history_limit = limit;
        self
    }

    #[must_use]
    pub const fn with_rollback_facts_on_error(mut self, rollback: bool) -> Self {
        self.rollback_facts_on_error = rollback;
        self
    }

    fn chat_options(&self) -> ChatOptions {
        ChatOptions::new(self.model.clone())
            .with_temperature(self.temperature)
            .with_max_tokens(self.max_tokens)
    }
}

/// Result of processing a conversation turn.
#[derive(Debug, Clone)]
pub struct TurnResult {
    /// Assistant's response
    pub reply: String,
    /// Facts extracted from the user's input
    pub facts: FactSet,
    /// Token usage information
    pub usage: Option<TurnUsage>,
    /// Turn number
    pub turn_number: usize,
}

/// Token usage information for a turn.
#[derive(Debug, Clone, Copy)]
pub struct TurnUsage {
    pub prompt: u32,
    pub completion: u32,
    pub total: u32,
}

/// Multi-turn conversation manager with fact memory.
pub struct ConversationManager<P = Arc<dyn LLMProvider>>
where
    P: Send + Sync,
{
    provider: P,
    extractor: Extractor,
    config: ConversationConfig,
    prompt: PromptBuilder,
    session: ConversationSession,
}

impl<P> ConversationManager<P>
where
    P: LLMProvider + Send + Sync,
{
    /// Create a manager with a fresh session.
    pub fn new(provider: P, extractor: Extractor, config: ConversationConfig) -> Self {
        let session = ConversationSession::new(config.system_prompt.clone());
        info!("Creating conversation manager for session: {}", session.id);

        Self {
            provider,
            extractor,
            prompt: PromptBuilder::new().with_history_limit(config.history_limit),
            config,
            session,
        }
    }

    /// Continue an existing session instead of the fresh one.
    #[must_use]
    pub fn with_session(mut self, session: ConversationSession) -> Self {
        info!(
            "Resuming session {} with {} messages",
            session.id,
            session.messages().len()
        );
        self.session = session;
        self
    }

    /// Process a single conversation turn.
    ///
    /// Facts are extracted and merged before the completion call so the reply
    /// can already use them. If the call fails the user message is withdrawn
    /// and no assistant message is added; the merged facts stay unless
    /// `rollback_facts_on_error` is set.
    pub async fn process_turn(&mut self, user_input: &str) -> Result<TurnResult> {
        let turn_number = self.session.turn_count() + 1;
        info!("Processing turn {turn_number} for session: {}", self.session.id);
        debug!("User input: {user_input}");

        let facts = self.extractor.extract(user_input);
        if !facts.is_empty() {
            info!("Extracted facts: {:?}", facts.attributes());
        }

        let snapshot: Option<MemoryStore> = self
            .config
            .rollback_facts_on_error
            .then(|| self.session.memory().clone());

        self.session.memory_mut().merge(&facts);
        self.session.add_message(Role::User, user_input.to_string());

        let messages = self.prompt.build(&self.session);
        let outcome = self
            .provider
            .chat(&messages, &self.config.chat_options())
            .await
            .map_err(ConversationError::Provider)
            .and_then(|response| {
                if response.content.trim().is_empty() {
                    Err(ConversationError::EmptyResponse)
                } else {
                    Ok(response)
                }
            });

        let llm_response = match outcome {
            Ok(response) => response,
            Err(e) => {
                warn!("Turn {turn_number} failed: {e}");
                self.session.pop_message();
                if let Some(previous) = snapshot {
                    *self.session.memory_mut() = previous;
                    debug!("Rolled back memory for failed turn {turn_number}");
                }
                return Err(e);
            }
        };

        self.session
            .add_message(Role::Assistant, llm_response.content.clone());

        debug!("Turn {turn_number} completed successfully");

        Ok(TurnResult {
            reply: llm_response.content,
            facts,
            usage: llm_response.usage.map(|u| TurnUsage {
                prompt: u.prompt_tokens,
                completion: u.completion_tokens,
                total: u.total_tokens,
            }),
            turn_number,
        })
    }

    /// Run an interactive conversation loop.
    ///
    /// This reads from stdin and writes to stdout, maintaining
    /// conversation context across turns.
    pub async fn run_interactive(&mut self) -> Result<()> {
        println!("=== Conversation Session: {} ===", self.session.id);
        println!("Type /help for commands, 'exit' or 'quit' to end the session.\n");

        loop {
            print!("> ");
            std::io::stdout().flush()?;

            let mut input = String::new();
            if std::io::stdin().read_line(&mut input)? == 0 {
                break;
            }
            let input = input.trim();

            if matches!(input, "exit" | "quit" | "q") {
                println!(
                    "\nSession ended. Total turns: {}",
                    self.session.turn_count()
                );
                break;
            }

            if input.is_empty() {
                continue;
            }

            if input.starts_with('/') {
                self.handle_command(input);
                continue;
            }

            match self.process_turn(input).await {
                Ok(result) => {
                    println!("\n{}\n", result.reply);

                    if let Some(usage) = result.usage {
                        debug!(
                            "Tokens: {} prompt + {} completion = {} total",
                            usage.prompt, usage.completion, usage.total
                        );
                    }
                }
                Err(e) => {
                    eprintln!("Error: {e}");
                }
            }
        }

        Ok(())
    }

    fn handle_command(&mut self, input: &str) {
        let (command, arg) = input
            .split_once(char::is_whitespace)
            .map_or((input, ""), |(c, a)| (c, a.trim()));

        match command {
            "/memory" => {
                let memory = self.session.memory();
                if memory.is_empty() {
                    println!("No memory yet.\n");
                } else {
                    println!("{}\n", memory.render());
                }
            }
            "/clear" => {
                self.clear();
                println!("Chat and memory cleared!\n");
            }
            "/export" if !arg.is_empty() => match self.export_path(Path::new(arg)) {
                Ok(format) => println!("Exported ({format:?}) to {arg}\n"),
                Err(e) => eprintln!("Error: {e}"),
            },
            "/export" => println!("Usage: /export <path.txt|path.json>\n"),
            _ => {
                println!("Commands:");
                println!("  /memory         show remembered facts");
                println!("  /clear          clear chat and memory");
                println!("  /export <path>  save the chat (.json for full session)\n");
            }
        }
    }

    /// Get the current session state.
    #[must_use]
    pub const fn session(&self) -> &ConversationSession {
        &self.session
    }

    #[must_use]
    pub const fn memory(&self) -> &MemoryStore {
        self.session.memory()
    }

    #[must_use]
    pub const fn config(&self) -> &ConversationConfig {
        &self.config
    }

    /// Reset history and memory, keeping the system instruction.
    pub fn clear(&mut self) {
        info!("Clearing session {}", self.session.id);
        self.session.clear();
    }

    #[must_use]
    pub fn export_text(&self) -> String {
        export::transcript(&self.session)
    }

    pub fn export_json(&self) -> Result<String> {
        export::SessionExport::from_session(&self.session).to_json()
    }

    pub fn export_path(&self, path: &Path) -> Result<ExportFormat> {
        export::export_to_path(&self.session, path)
    }
}
