//! Session state for one conversation.
//!
//! A session owns the message history and the memory store. The first message
//! is the fixed system instruction and survives `clear`.

use chrono::{DateTime, Local};
use uuid::Uuid;

use memochat_core::{ChatMessage, Role};
use memochat_memory::MemoryStore;

/// A conversation session with full message history and accumulated memory.
#[derive(Debug, Clone)]
pub struct ConversationSession {
    /// Session identifier
    pub id: Uuid,
    /// When the conversation started
    pub started_at: DateTime<Local>,
    messages: Vec<ChatMessage>,
    memory: MemoryStore,
}

impl ConversationSession {
    /// Create a session whose history starts with `system_prompt`.
    #[must_use]
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            started_at: Local::now(),
            messages: vec![ChatMessage::system(system_prompt)],
            memory: MemoryStore::new(),
        }
    }

    /// Rebuild a session from previously exported parts.
    ///
    /// A leading system message is kept if present, otherwise `system_prompt`
    /// is inserted in front of the history.
    #[must_use]
    pub fn restore(
        system_prompt: &str,
        started_at: DateTime<Local>,
        messages: Vec<ChatMessage>,
        memory: MemoryStore,
    ) -> Self {
        let mut restored = Vec::with_capacity(messages.len() + 1);
        if messages.first().is_none_or(|m| m.role != Role::System) {
            restored.push(ChatMessage::system(system_prompt));
        }
        restored.extend(messages);

        Self {
            id: Uuid::now_v7(),
            started_at,
            messages: restored,
            memory,
        }
    }

    /// The fixed system instruction.
    #[must_use]
    pub fn system_message(&self) -> &ChatMessage {
        &self.messages[0]
    }

    /// Every message after the system instruction.
    #[must_use]
    pub fn history(&self) -> &[ChatMessage] {
        &self.messages[1..]
    }

    /// All messages including the system instruction.
    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    #[must_use]
    pub const fn memory(&self) -> &MemoryStore {
        &self.memory
    }

    pub const fn memory_mut(&mut self) -> &mut MemoryStore {
        &mut self.memory
    }

    /// Add a message to the history.
    pub fn add_message(&mut self, role: Role, content: String) {
        self.messages.push(ChatMessage { role, content });
    }

    /// Drop the most recent history message, never the system instruction.
    pub fn pop_message(&mut self) -> Option<ChatMessage> {
        if self.messages.len() > 1 {
            self.messages.pop()
        } else {
            None
        }
    }

    /// Number of completed user/assistant exchanges.
    #[must_use]
    pub fn turn_count(&self) -> usize {
        self.history()
            .iter()
            .filter(|m| m.role == Role::Assistant)
            .count()
    }

    /// Check if there is any history besides the system instruction.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.messages.len() <= 1
    }

    /// Clear history and memory, keeping the system instruction.
    pub fn clear(&mut self) {
        self.messages.truncate(1);
        self.memory.clear();
    }
}
