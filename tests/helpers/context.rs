//! Assembled dialogue fixtures
//!
//! A fixture wires a `ChatService` to the in-memory stores and keeps
//! handles to them so tests can inspect carts and persisted turns after
//! driving the conversation.

use std::sync::Arc;

use StyleBuddy::config::Settings;
use StyleBuddy::database::traits::{CartStore, ConversationLog};
use StyleBuddy::services::{ChatService, LlmClient};
use StyleBuddy::state::SessionStore;

use super::stores::{seed_products, InMemoryCart, InMemoryCatalog, InMemoryLog};

/// A chat service over in-memory stores, with inspection handles
pub struct DialogueFixture {
    pub chat: ChatService,
    pub cart: Arc<InMemoryCart>,
    pub log: Arc<InMemoryLog>,
    pub store: Arc<SessionStore>,
}

/// Build a fixture with the language model disabled, so every turn takes
/// the deterministic fallback paths.
pub fn fallback_fixture() -> DialogueFixture {
    build_fixture(Settings::default())
}

/// Build a fixture pointed at a mock chat-completions server
pub fn llm_fixture(api_url: &str) -> DialogueFixture {
    let mut settings = Settings::default();
    settings.openai.api_url = api_url.to_string();
    settings.openai.api_key = "test-key".to_string();
    settings.openai.timeout_seconds = 5;
    build_fixture(settings)
}

fn build_fixture(settings: Settings) -> DialogueFixture {
    let products = seed_products();
    let catalog = Arc::new(InMemoryCatalog::new(products.clone()));
    let cart = Arc::new(InMemoryCart::new(products));
    let log = Arc::new(InMemoryLog::default());
    let store = Arc::new(SessionStore::new(settings.dialogue.session_ttl_seconds));

    let llm = Arc::new(LlmClient::new(settings.openai.clone()).expect("client should build"));
    let chat = ChatService::new(
        Arc::clone(&store),
        llm,
        catalog,
        Arc::clone(&cart) as Arc<dyn CartStore>,
        Arc::clone(&log) as Arc<dyn ConversationLog>,
        &settings.dialogue,
    );

    DialogueFixture { chat, cart, log, store }
}
