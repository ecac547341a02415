//! The core models for the client side transcript.
use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::sanitize::SanitizedHtml;

/// Identifies a message for its whole lifetime, including every
/// partial render of a reply that is still being typed out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct MessageId(Uuid);

impl MessageId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
    /// Client generated failure notices. Never sent to the relay.
    Error,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Message {
    pub id: MessageId,
    pub text: SanitizedHtml,
    pub sender: Sender,
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn new(id: MessageId, sender: Sender, text: SanitizedHtml) -> Self {
        Self {
            id,
            text,
            sender,
            created_at: Utc::now(),
        }
    }

    pub fn user(text: SanitizedHtml) -> Self {
        Self::new(MessageId::new(), Sender::User, text)
    }

    pub fn error(text: SanitizedHtml) -> Self {
        Self::new(MessageId::new(), Sender::Error, text)
    }
}

/// Ordered, append-only log of messages. The only in-place change
/// allowed is replacing the text of an existing message by id.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Transcript(Vec<Message>);

impl Transcript {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn messages(&self) -> &[Message] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.0.iter()
    }

    pub fn get(&self, id: MessageId) -> Option<&Message> {
        self.0.iter().find(|m| m.id == id)
    }

    pub fn last(&self) -> Option<&Message> {
        self.0.last()
    }

    /// Add a message to the end of the transcript
    pub fn append(&mut self, msg: Message) -> &Message {
        self.0.push(msg);
        &self.0[self.0.len() - 1]
    }

    /// Swap in new text for the message with `id`, keeping its
    /// position and creation time. Returns false if there is no such
    /// message.
    pub fn replace_text(&mut self, id: MessageId, text: SanitizedHtml) -> bool {
        match self.0.iter_mut().find(|m| m.id == id) {
            Some(existing) => {
                existing.text = text;
                true
            }
            None => false,
        }
    }

    /// Replace the message with the same id in place or append it if
    /// it isn't in the transcript yet. Never creates a second entry
    /// for an id.
    pub fn upsert(&mut self, msg: Message) {
        if !self.replace_text(msg.id, msg.text.clone()) {
            self.0.push(msg);
        }
    }
}

impl<'a> IntoIterator for &'a Transcript {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
