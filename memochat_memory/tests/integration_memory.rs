//! Integration tests for conversational memory.
//!
//! These tests verify the complete flow of:
//! - Extracting facts from successive utterances
//! - Merging them into one store
//! - Rendering the store as prompt context

use memochat_memory::{Attribute, Extractor, FactValue, MemoryStore};

fn extractor() -> Extractor {
    Extractor::with_defaults().expect("default patterns should compile")
}

/// Facts from several turns accumulate, scalars are replaced.
#[test]
fn test_multi_turn_accumulation() {
    let extractor = extractor();
    let mut store = MemoryStore::new();

    for utterance in [
        "Hi! My name is Sam, I'm interested in chess.",
        "I am 29 years old and I live in Cairo.",
        "I like reading.",
        "Actually, I live in alexandria.",
        "I'm interested in chess.",
    ] {
        store.merge(&extractor.extract(utterance));
    }

    assert_eq!(store.get(Attribute::Name), Some(&FactValue::scalar("Sam")));
    assert_eq!(store.get(Attribute::Age), Some(&FactValue::scalar("29")));
    assert_eq!(
        store.get(Attribute::Location),
        Some(&FactValue::scalar("Alexandria"))
    );
    assert_eq!(store.interests(), vec!["chess", "reading"]);
    assert_eq!(
        store.render(),
        "name: Sam\nage: 29\nlocation: Alexandria\ninterests: chess, reading"
    );
}

/// Small talk never touches the store.
#[test]
fn test_small_talk_leaves_store_empty() {
    let extractor = extractor();
    let mut store = MemoryStore::new();

    for utterance in ["hello there", "how are you?", "thanks, that helps", ""] {
        let facts = extractor.extract(utterance);
        assert!(facts.is_empty(), "unexpected facts for {utterance:?}");
        store.merge(&facts);
    }

    assert!(store.is_empty());
    assert_eq!(store.render(), "");
}

/// Every attribute can be found in a single utterance without interference.
#[test]
fn test_all_attributes_in_one_utterance() {
    let facts = extractor().extract(
        "My name is lee. I am 41 years old. I live in san diego. I work as a pilot. I enjoy sailing.",
    );

    assert_eq!(facts.len(), 5);
    assert_eq!(facts.get(Attribute::Name), Some(&FactValue::scalar("Lee")));
    assert_eq!(facts.get(Attribute::Age), Some(&FactValue::scalar("41")));
    assert_eq!(
        facts.get(Attribute::Location),
        Some(&FactValue::scalar("San Diego"))
    );
    assert_eq!(
        facts.get(Attribute::Profession),
        Some(&FactValue::scalar("pilot"))
    );
    assert_eq!(
        facts.get(Attribute::Interests),
        Some(&FactValue::list(["sailing"]))
    );
}

/// The store survives a JSON round trip unchanged.
#[test]
fn test_store_json_round_trip() {
    let mut store = MemoryStore::new();
    store.merge(&extractor().extract("Call me Jo. I love painting."));

    let json = serde_json::to_string(&store).expect("store should serialize");
    assert_eq!(json, r#"{"name":"Jo","interests":["painting"]}"#);

    let back: MemoryStore = serde_json::from_str(&json).expect("store should deserialize");
    assert_eq!(back, store);
}
