//! Shared constants and small string helpers.

/// Default system prompt for the memory-aware chat assistant.
pub const DEFAULT_SYSTEM_PROMPT: &str =
    "You are a helpful assistant that remembers facts given during the conversation.";

/// Header placed in front of the rendered memory context.
pub const MEMORY_CONTEXT_HEADER: &str = "Here are the facts you remember:";

/// Mask an API key for display, keeping the first and last four characters.
#[must_use]
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() > 8 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}...{tail}")
    } else {
        "***".to_string()
    }
}

/// Shorten `s` to at most `max_len` characters, ending in `...` when cut.
#[must_use]
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_long_secret() {
        assert_eq!(mask_secret("sk-abcdefghijkl"), "sk-a...ijkl");
    }

    #[test]
    fn masks_short_secret_entirely() {
        assert_eq!(mask_secret("short"), "***");
        assert_eq!(mask_secret(""), "***");
    }

    #[test]
    fn truncate_keeps_short_strings() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
    }
}
