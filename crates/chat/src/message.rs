use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use qhatu_core::{Entity, MessageId};

/// Greeting the assistant opens every conversation with.
pub const WELCOME_MESSAGE: &str = "¡Hola! Soy Robo Qhatu, tu asistente virtual del minimarket. \
     ¿En qué puedo ayudarte hoy? Puedo ayudarte con información de productos, precios, stock y más.";

/// One turn of the conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: MessageId,
    pub text: String,
    pub from_bot: bool,
    pub sent_at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn from_user(text: impl Into<String>, sent_at: DateTime<Utc>) -> Self {
        Self {
            id: MessageId::new(),
            text: text.into(),
            from_bot: false,
            sent_at,
        }
    }

    pub fn from_bot(text: impl Into<String>, sent_at: DateTime<Utc>) -> Self {
        Self {
            id: MessageId::new(),
            text: text.into(),
            from_bot: true,
            sent_at,
        }
    }
}

impl Entity for ChatMessage {
    type Id = MessageId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Ordered, append-only message history of a single conversation.
///
/// Messages are never edited or removed. A new log starts with the fixed
/// assistant welcome.
#[derive(Debug, Clone)]
pub struct ConversationLog {
    messages: Vec<ChatMessage>,
}

impl ConversationLog {
    pub fn new(opened_at: DateTime<Utc>) -> Self {
        Self {
            messages: vec![ChatMessage::from_bot(WELCOME_MESSAGE, opened_at)],
        }
    }

    /// Append a user turn; returns the created message.
    pub fn push_user(&mut self, text: impl Into<String>, sent_at: DateTime<Utc>) -> &ChatMessage {
        self.push(ChatMessage::from_user(text, sent_at))
    }

    /// Append an assistant turn; returns the created message.
    pub fn push_bot(&mut self, text: impl Into<String>, sent_at: DateTime<Utc>) -> &ChatMessage {
        self.push(ChatMessage::from_bot(text, sent_at))
    }

    fn push(&mut self, message: ChatMessage) -> &ChatMessage {
        let at = self.messages.len();
        self.messages.push(message);
        &self.messages[at]
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
