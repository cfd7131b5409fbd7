//! Application services shared by the HTTP handlers.

use std::sync::{Arc, Mutex};

use chrono::Utc;

use qhatu_catalog::{CatalogQuery, Product};
use qhatu_chat::{ChatMessage, ConversationLog, Responder};
use qhatu_infra::{CatalogStore, InMemoryCatalogStore};

pub struct AppServices {
    store: Arc<dyn CatalogStore>,
    responder: Responder,
    conversation: Mutex<ConversationLog>,
}

impl AppServices {
    /// In-memory wiring (dev/test; a durable store plugs into the same seam).
    pub fn new() -> Self {
        Self::with_parts(Arc::new(InMemoryCatalogStore::new()), Responder::default())
    }

    pub fn with_parts(store: Arc<dyn CatalogStore>, responder: Responder) -> Self {
        Self {
            store,
            responder,
            conversation: Mutex::new(ConversationLog::new(Utc::now())),
        }
    }

    pub fn store(&self) -> &Arc<dyn CatalogStore> {
        &self.store
    }

    /// Derived catalog view for one render of the catalog screen.
    pub fn catalog_view(&self, query: &CatalogQuery) -> Vec<Product> {
        query.apply(&self.store.list())
    }

    /// One chat turn: append the user message, generate and append the
    /// assistant reply, return the reply.
    pub fn chat(&self, text: &str) -> ChatMessage {
        let reply = self.responder.reply(text).to_string();

        let mut log = self
            .conversation
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        log.push_user(text, Utc::now());
        log.push_bot(reply, Utc::now()).clone()
    }

    pub fn chat_log(&self) -> Vec<ChatMessage> {
        self.conversation
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .messages()
            .to_vec()
    }
}

impl Default for AppServices {
    fn default() -> Self {
        Self::new()
    }
}
