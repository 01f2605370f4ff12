//! Prompt assembly.
//!
//! The message list sent to the completion API is always
//! `[system, memory-context (if any), ...history]`: remembered facts sit right
//! after the fixed instruction and ahead of every conversation turn.

use memochat_core::util::MEMORY_CONTEXT_HEADER;
use memochat_core::{ChatMessage, Role};

use crate::session::ConversationSession;

/// Wrap rendered memory in the instruction injected after the system prompt.
///
/// Returns `None` for an empty context so no "no facts" message is ever sent.
#[must_use]
pub fn memory_message(memory_context: &str) -> Option<ChatMessage> {
    if memory_context.trim().is_empty() {
        None
    } else {
        Some(ChatMessage::system(format!(
            "{MEMORY_CONTEXT_HEADER}\n{memory_context}"
        )))
    }
}

/// Assemble `[system, memory-context (if non-empty), ...history]`.
#[must_use]
pub fn assemble(
    system: &ChatMessage,
    memory_context: &str,
    history: &[ChatMessage],
) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(system.clone());
    messages.extend(memory_message(memory_context));
    messages.extend_from_slice(history);
    messages
}

/// Builds prompts from a session, optionally windowing the history.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptBuilder {
    /// Keep only the most recent N history messages; `None` keeps all.
    history_limit: Option<usize>,
}

impl PromptBuilder {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            history_limit: None,
        }
    }

    #[must_use]
    pub const fn with_history_limit(mut self, limit: Option<usize>) -> Self {
        self.history_limit = limit;
        self
    }

    /// Slice of `history` that fits the window.
    ///
    /// The window never starts on an assistant message, and it always keeps
    /// the most recent user message even when the limit is smaller.
    #[must_use]
    pub fn window<'a>(&self, history: &'a [ChatMessage]) -> &'a [ChatMessage] {
        let Some(limit) = self.history_limit else {
            return history;
        };
        let mut start = history.len().saturating_sub(limit.max(1));
        while start < history.len() && history[start].role == Role::Assistant {
            start += 1;
        }
        let last_user = history.iter().rposition(|m| m.role == Role::User);
        if let Some(last_user) = last_user {
            start = start.min(last_user);
        }
        &history[start..]
    }

    /// Full message list for the next completion call.
    #[must_use]
    pub fn build(&self, session: &ConversationSession) -> Vec<ChatMessage> {
        assemble(
            session.system_message(),
            &session.memory().render(),
            self.window(session.history()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use memochat_memory::{Attribute, FactSet, FactValue};

    fn create_test_history(count: usize) -> Vec<ChatMessage> {
        (0..count)
            .map(|i| {
                if i % 2 == 0 {
                    ChatMessage::user(format!("Message {i}"))
                } else {
                    ChatMessage::assistant(format!("Message {i}"))
                }
            })
            .collect()
    }

    #[test]
    fn test_empty_memory_adds_no_message() {
        let system = ChatMessage::system("sys");
        let history = create_test_history(3);
        let messages = assemble(&system, "", &history);

        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0], system);
        assert_eq!(&messages[1..], history.as_slice());
    }

    #[test]
    fn test_memory_follows_system_message() {
        let system = ChatMessage::system("sys");
        let history = create_test_history(4);
        let messages = assemble(&system, "name: Sam", &history);

        assert_eq!(messages.len(), 6);
        assert_eq!(messages[0], system);
        assert_eq!(messages[1].role, Role::System);
        assert_eq!(
            messages[1].content,
            "Here are the facts you remember:\nname: Sam"
        );
        assert_eq!(&messages[2..], history.as_slice());
    }

    #[test]
    fn test_memory_precedes_history_even_without_turns() {
        let system = ChatMessage::system("sys");
        let messages = assemble(&system, "age: 29", &[]);
        assert_eq!(messages.len(), 2);
        assert!(messages[1].content.ends_with("age: 29"));
    }

    #[test]
    fn test_window_limits_history() {
        let history = create_test_history(10);
        let builder = PromptBuilder::new().with_history_limit(Some(4));
        let window = builder.window(&history);
        assert_eq!(window.len(), 4);
        assert_eq!(window[0].content, "Message 6");
    }

    #[test]
    fn test_window_skips_leading_assistant_message() {
        let history = create_test_history(10);
        let builder = PromptBuilder::new().with_history_limit(Some(3));
        let window = builder.window(&history);
        assert_eq!(window.len(), 2);
        assert_eq!(window[0].role, Role::User);
    }

    #[test]
    fn test_zero_limit_keeps_current_user_turn() {
        let mut session = ConversationSession::new("sys");
        session.add_message(Role::User, "hello".to_string());

        let messages = PromptBuilder::new()
            .with_history_limit(Some(0))
            .build(&session);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1], ChatMessage::user("hello"));
    }

    #[test]
    fn test_window_never_drops_last_user_message() {
        let mut history = create_test_history(4);
        history.push(ChatMessage::assistant("Message 4"));

        let builder = PromptBuilder::new().with_history_limit(Some(1));
        let window = builder.window(&history);
        assert_eq!(window.len(), 3);
        assert_eq!(window[0].content, "Message 2");
        assert_eq!(window[0].role, Role::User);
    }

    #[test]
    fn test_no_limit_keeps_everything() {
        let history = create_test_history(7);
        assert_eq!(PromptBuilder::new().window(&history).len(), 7);
    }

    #[test]
    fn test_build_from_session() {
        let mut session = ConversationSession::new("sys");
        session.add_message(Role::User, "hi".to_string());
        session.add_message(Role::Assistant, "hello".to_string());
        session.add_message(Role::User, "I'm Sam".to_string());
        session
            .memory_mut()
            .merge(&FactSet::new().with(Attribute::Name, FactValue::scalar("Sam")));

        let messages = PromptBuilder::new().build(&session);
        let roles: Vec<Role> = messages.iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![
                Role::System,
                Role::System,
                Role::User,
                Role::Assistant,
                Role::User
            ]
        );
        assert_eq!(messages[0].content, "sys");
        assert!(messages[1].content.contains("name: Sam"));
    }
}
