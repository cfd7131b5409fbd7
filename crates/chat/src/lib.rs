//! `qhatu-chat` — the rule-based shop assistant.
//!
//! [`Responder`] maps a free-text utterance to a canned reply: keyword
//! matching picks a [`ResponseCategory`] deterministically, then one reply is
//! drawn uniformly at random from that category's fixed candidate list.
//! [`ConversationLog`] keeps the ordered, append-only message history.

pub mod message;
pub mod responder;

pub use message::{ChatMessage, ConversationLog};
pub use responder::{CandidatePicker, Responder, ResponseCategory, ResponseTable, UniformPicker};
