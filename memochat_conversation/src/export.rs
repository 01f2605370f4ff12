//! Session export and import.
//!
//! Two formats: a plain-text transcript (`Role: content` per line, system
//! instruction omitted) and a JSON document with the fields
//! `conversation_started`, `messages` and `memory`. The JSON field names are
//! relied on by tooling that reads exported sessions and must not change.

use chrono::{Local, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use memochat_core::{ChatMessage, Role};
use memochat_memory::MemoryStore;

use crate::error::{ConversationError, Result};
use crate::session::ConversationSession;

/// Timestamp layout of `conversation_started`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Output format, chosen from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Text,
    Json,
}

impl ExportFormat {
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Text,
        }
    }
}

/// JSON export document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionExport {
    pub conversation_started: String,
    pub messages: Vec<ChatMessage>,
    pub memory: MemoryStore,
}

impl SessionExport {
    #[must_use]
    pub fn from_session(session: &ConversationSession) -> Self {
        Self {
            conversation_started: session.started_at.format(TIMESTAMP_FORMAT).to_string(),
            messages: session.messages().to_vec(),
            memory: session.memory().clone(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Turn the export back into a live session.
    ///
    /// `system_prompt` is used only when the export has no system message.
    pub fn into_session(self, system_prompt: &str) -> Result<ConversationSession> {
        let naive = NaiveDateTime::parse_from_str(&self.conversation_started, TIMESTAMP_FORMAT)
            .map_err(|e| ConversationError::Timestamp(e.to_string()))?;
        let started_at = Local
            .from_local_datetime(&naive)
            .earliest()
            .ok_or_else(|| ConversationError::Timestamp(self.conversation_started.clone()))?;

        Ok(ConversationSession::restore(
            system_prompt,
            started_at,
            self.messages,
            self.memory,
        ))
    }
}

/// Plain-text transcript of everything after the system instruction.
#[must_use]
pub fn transcript(session: &ConversationSession) -> String {
    transcript_of(session.history())
}

fn transcript_of(messages: &[ChatMessage]) -> String {
    messages
        .iter()
        .filter(|m| m.role != Role::System)
        .map(|m| format!("{}: {}", m.role.label(), m.content))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Write the session to `path`, format picked by extension.
pub fn export_to_path(session: &ConversationSession, path: &Path) -> Result<ExportFormat> {
    let format = ExportFormat::from_path(path);
    let body = match format {
        ExportFormat::Json => SessionExport::from_session(session).to_json()?,
        ExportFormat::Text => transcript(session),
    };
    std::fs::write(path, body)?;
    info!("Exported session {} to {}", session.id, path.display());
    Ok(format)
}

/// Load a JSON export from `path`.
pub fn import_from_path(path: &Path, system_prompt: &str) -> Result<ConversationSession> {
    let json = std::fs::read_to_string(path)?;
    let session = SessionExport::from_json(&json)?.into_session(system_prompt)?;
    info!(
        "Resumed session from {} ({} messages)",
        path.display(),
        session.messages().len()
    );
    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use memochat_memory::{Attribute, FactSet, FactValue};

    fn sample_session() -> ConversationSession {
        let mut session = ConversationSession::new("You are helpful.");
        session.add_message(Role::User, "My name is Sam".to_string());
        session.add_message(Role::Assistant, "Nice to meet you, Sam!".to_string());
        session.memory_mut().merge(
            &FactSet::new()
                .with(Attribute::Name, FactValue::scalar("Sam"))
                .with(Attribute::Interests, FactValue::list(["chess"])),
        );
        session
    }

    #[test]
    fn test_transcript_skips_system_message() {
        let text = transcript(&sample_session());
        assert_eq!(text, "User: My name is Sam\nAssistant: Nice to meet you, Sam!");
    }

    #[test]
    fn test_transcript_of_empty_session() {
        assert_eq!(transcript(&ConversationSession::new("sys")), "");
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn test_json_has_fixed_top_level_fields() {
        let json = SessionExport::from_session(&sample_session())
            .to_json()
            .expect("export should serialize");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid JSON");

        let object = value.as_object().expect("top level should be an object");
        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["conversation_started", "memory", "messages"]);

        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1]["content"], "My name is Sam");
        assert_eq!(
            value["memory"],
            serde_json::json!({ "name": "Sam", "interests": ["chess"] })
        );
        let started = value["conversation_started"].as_str().unwrap_or_default();
        assert!(NaiveDateTime::parse_from_str(started, TIMESTAMP_FORMAT).is_ok());
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn test_json_round_trip_restores_session() {
        let session = sample_session();
        let json = SessionExport::from_session(&session)
            .to_json()
            .expect("export should serialize");

        let restored = SessionExport::from_json(&json)
            .expect("export should parse")
            .into_session("ignored")
            .expect("export should restore");

        assert_eq!(restored.messages(), session.messages());
        assert_eq!(restored.memory(), session.memory());
        assert_eq!(
            restored.started_at.format(TIMESTAMP_FORMAT).to_string(),
            session.started_at.format(TIMESTAMP_FORMAT).to_string()
        );
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn test_legacy_export_is_accepted() {
        let json = r#"{
            "conversation_started": "2024-05-01 10:30:00",
            "messages": [{"role": "user", "content": "I'm interested in chess"}],
            "memory": {"name": "Sam", "interest": "chess"}
        }"#;
        let session = SessionExport::from_json(json)
            .expect("legacy export should parse")
            .into_session("sys")
            .expect("legacy export should restore");

        assert_eq!(session.system_message().content, "sys");
        assert_eq!(session.history().len(), 1);
        assert_eq!(
            session.memory().get(Attribute::Interests),
            Some(&FactValue::scalar("chess"))
        );
    }

    #[test]
    fn test_bad_timestamp_is_rejected() {
        let export = SessionExport {
            conversation_started: "yesterday".to_string(),
            messages: Vec::new(),
            memory: MemoryStore::new(),
        };
        assert!(matches!(
            export.into_session("sys"),
            Err(ConversationError::Timestamp(_))
        ));
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ExportFormat::from_path(Path::new("chat.json")), ExportFormat::Json);
        assert_eq!(ExportFormat::from_path(Path::new("chat.JSON")), ExportFormat::Json);
        assert_eq!(ExportFormat::from_path(Path::new("chat.txt")), ExportFormat::Text);
        assert_eq!(ExportFormat::from_path(Path::new("chat")), ExportFormat::Text);
    }
}
