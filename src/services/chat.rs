//! Chat orchestration
//!
//! `ChatService` ties the dialogue components together: it looks up the
//! caller's session, classifies the message, dispatches it to the right
//! handler and persists the exchange. Every stage degrades on its own
//! (classification falls back to keyword rules, handlers answer with
//! apologetic text, a failed write only costs the conversation id), so a
//! chat turn never surfaces an error to the caller.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use tracing::{error, warn};

use crate::config::DialogueConfig;
use crate::database::traits::{CartStore, ConversationLog, ProductStore};
use crate::handlers::{
    CartHandler, Dispatcher, ProductViewHandler, SearchHandler, SmalltalkHandler,
};
use crate::models::{
    ActionPerformed, ChatMessage, ChatResult, ConversationTurn, CreateTurnRequest, MessageRole,
};
use crate::state::{SessionContext, SessionStore};
use crate::utils::errors::Result;
use crate::utils::helpers::generate_session_id;
use crate::utils::logging::{log_chat_turn, log_session_event};

use super::extraction::AttributeExtractor;
use super::formatter::ResponseFormatter;
use super::intent::IntentClassifier;
use super::llm::LlmClient;

/// Orchestrates a full chat turn from raw message to structured result
pub struct ChatService {
    store: Arc<SessionStore>,
    llm: Arc<LlmClient>,
    classifier: IntentClassifier,
    dispatcher: Dispatcher,
    conversations: Arc<dyn ConversationLog>,
    history_window: usize,
}

impl std::fmt::Debug for ChatService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatService")
            .field("history_window", &self.history_window)
            .finish_non_exhaustive()
    }
}

impl ChatService {
    pub fn new(
        store: Arc<SessionStore>,
        llm: Arc<LlmClient>,
        products: Arc<dyn ProductStore>,
        carts: Arc<dyn CartStore>,
        conversations: Arc<dyn ConversationLog>,
        dialogue: &DialogueConfig,
    ) -> Self {
        let classifier = IntentClassifier::new(Arc::clone(&llm));
        let extractor = AttributeExtractor::new(Arc::clone(&llm));
        let formatter = ResponseFormatter::new(Arc::clone(&llm), dialogue.max_products_shown);

        let dispatcher = Dispatcher {
            search: SearchHandler::new(
                extractor,
                formatter,
                Arc::clone(&products),
                dialogue.search_limit,
            ),
            cart: CartHandler::new(Arc::clone(&products), carts),
            product: ProductViewHandler::new(products),
            smalltalk: SmalltalkHandler::new(Arc::clone(&llm)),
        };

        Self {
            store,
            llm,
            classifier,
            dispatcher,
            conversations,
            history_window: dialogue.history_window,
        }
    }

    /// Handle one chat turn for a user
    pub async fn chat(&self, user_id: i64, message: &str) -> ChatResult {
        let session = self.store.get_or_create(user_id);
        // Held for the whole turn so rapid double-submits from one user
        // serialize instead of interleaving
        let mut context = session.lock().await;

        context.push_user_message(message);
        self.restore_history(&mut context).await;

        let intent_result = self.classifier.classify(message, &context.messages).await;
        let reply = self
            .dispatcher
            .dispatch(intent_result.intent, message, &mut context)
            .await;
        context.record_outcome(intent_result.intent, reply.primary_action_label(), &reply.response);

        let metadata = json!({
            "slot_state": context.slot_state,
            "confidence": intent_result.confidence,
        });
        let conversation_id = self
            .persist_exchange(
                user_id,
                message,
                &reply.response,
                Some(intent_result.intent.as_str()),
                None,
                Some(metadata),
            )
            .await;

        log_chat_turn(
            user_id,
            intent_result.intent.as_str(),
            intent_result.confidence,
            !self.llm.is_enabled(),
        );

        ChatResult {
            response: reply.response,
            products: reply.products,
            actions_performed: reply.actions,
            conversation_id,
            intent: intent_result.intent.as_str().to_string(),
            session_id: None,
        }
    }

    /// Reset a user's conversation.
    ///
    /// Drops the in-memory session, mints a fresh session id and logs a
    /// reset turn. When even the reduced write fails the caller gets an
    /// apologetic reply with neither session nor conversation id.
    pub async fn reset_conversation(&self, user_id: i64) -> ChatResult {
        let existed = self.store.remove(user_id);
        log_session_event(user_id, "reset", existed.then_some("dropped active session"));

        let session_id = generate_session_id();
        let reset_message = "Conversation reset requested";
        let reset_response = "Sure! Let's start fresh. What kind of product are you looking for?";
        let metadata = json!({
            "action": "conversation_reset",
            "session_id": session_id,
            "reset_timestamp": Utc::now().to_rfc3339(),
        });

        let conversation_id = self
            .persist_exchange(
                user_id,
                reset_message,
                reset_response,
                Some("conversation_reset"),
                Some(&session_id),
                Some(metadata),
            )
            .await;

        match conversation_id {
            Some(id) => ChatResult {
                response: reset_response.to_string(),
                products: Vec::new(),
                actions_performed: vec![ActionPerformed::named("conversation_reset")],
                conversation_id: Some(id),
                intent: "conversation_reset".to_string(),
                session_id: Some(session_id),
            },
            None => ChatResult {
                response: "I apologize, but I couldn't reset the conversation properly. \
                           Let's try starting fresh - what can I help you find today?"
                    .to_string(),
                products: Vec::new(),
                actions_performed: vec![ActionPerformed::named("conversation_reset")],
                conversation_id: None,
                intent: "conversation_reset".to_string(),
                session_id: None,
            },
        }
    }

    /// Recent persisted turns for a user, most recent first
    pub async fn conversation_history(
        &self,
        user_id: i64,
        limit: i64,
    ) -> Result<Vec<ConversationTurn>> {
        self.conversations.load_recent_turns(user_id, limit).await
    }

    /// Restore persisted history into a context that only holds the
    /// current message. A failed load costs the history, not the turn.
    async fn restore_history(&self, context: &mut SessionContext) {
        if context.messages.len() > 2 {
            return;
        }

        let limit = (self.history_window * 2) as i64;
        match self.conversations.load_recent_turns(context.user_id, limit).await {
            Ok(turns) => {
                let history: Vec<ChatMessage> = turns
                    .into_iter()
                    .rev()
                    .map(|turn| ChatMessage {
                        role: MessageRole::from_db_code(turn.role),
                        content: turn.content,
                    })
                    .collect();
                context.bootstrap_history(history);
            }
            Err(e) => {
                warn!(user_id = context.user_id, error = %e, "Could not load conversation history");
            }
        }
    }

    /// Persist a user/assistant exchange, returning the assistant row id.
    ///
    /// A rejected write is retried once with only the required columns;
    /// when that fails too the exchange is dropped.
    async fn persist_exchange(
        &self,
        user_id: i64,
        user_message: &str,
        assistant_message: &str,
        intent: Option<&str>,
        session_id: Option<&str>,
        metadata: Option<serde_json::Value>,
    ) -> Option<i64> {
        match self
            .try_persist_exchange(user_id, user_message, assistant_message, intent, session_id, metadata)
            .await
        {
            Ok(id) => Some(id),
            Err(e) => {
                error!(user_id = user_id, error = %e, "Saving conversation failed, retrying reduced");
                match self
                    .try_persist_exchange(user_id, user_message, assistant_message, None, None, None)
                    .await
                {
                    Ok(id) => Some(id),
                    Err(e) => {
                        error!(user_id = user_id, error = %e, "Reduced conversation save failed");
                        None
                    }
                }
            }
        }
    }

    async fn try_persist_exchange(
        &self,
        user_id: i64,
        user_message: &str,
        assistant_message: &str,
        intent: Option<&str>,
        session_id: Option<&str>,
        metadata: Option<serde_json::Value>,
    ) -> Result<i64> {
        self.conversations
            .append_turn(CreateTurnRequest {
                user_id,
                role: MessageRole::User,
                content: user_message.to_string(),
                intent: intent.map(str::to_string),
                session_id: session_id.map(str::to_string),
                metadata: metadata.clone(),
            })
            .await?;

        self.conversations
            .append_turn(CreateTurnRequest {
                user_id,
                role: MessageRole::Assistant,
                content: assistant_message.to_string(),
                intent: intent.map(str::to_string),
                session_id: session_id.map(str::to_string),
                metadata,
            })
            .await
    }
}
