use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use tokio::sync::mpsc;

use super::client::{RelayClient, RelayClientError};
use super::models::{Message, MessageId, Transcript};
use super::sanitize::{SanitizedHtml, sanitize};
use super::surface::EditableSurface;
use super::typing::{TypingEvent, TypingSimulation, spawn_typing};
use crate::core::ChatConfig;

/// What happened when the surface content was submitted
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SendOutcome {
    /// Blank input. Nothing was sent and the transcript is untouched.
    Skipped,
    /// The relay replied and the reply is being typed out under this id
    Replying(MessageId),
    /// The request failed and an error message with this id was added
    Failed(MessageId),
}

/// Client side chat state: the transcript, the input surface and the
/// replies currently being typed out.
///
/// The transcript is only ever changed through `&mut self`. Typing
/// timers run as separate tasks and hand their renders back over a
/// channel, which the owner applies with `next_render` or
/// `apply_pending`.
pub struct ChatBox {
    transcript: Transcript,
    surface: EditableSurface,
    relay: RelayClient,
    typing_interval: Duration,
    typing: HashSet<MessageId>,
    tx: mpsc::UnboundedSender<TypingEvent>,
    rx: mpsc::UnboundedReceiver<TypingEvent>,
}

impl ChatBox {
    pub fn new(relay: RelayClient, typing_interval: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            transcript: Transcript::new(),
            surface: EditableSurface::new(),
            relay,
            typing_interval,
            typing: HashSet::new(),
            tx,
            rx,
        }
    }

    pub fn from_config(config: &ChatConfig) -> Self {
        Self::new(RelayClient::from_config(config), config.typing_interval)
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn surface(&self) -> &EditableSurface {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut EditableSurface {
        &mut self.surface
    }

    /// True while any reply is still being typed out
    pub fn is_typing(&self) -> bool {
        !self.typing.is_empty()
    }

    /// Submit the surface content to the relay.
    ///
    /// Failures never escape: they are recorded in the transcript as
    /// an error message and the chat stays usable.
    pub async fn send(&mut self) -> SendOutcome {
        if self.surface.text().trim().is_empty() {
            return SendOutcome::Skipped;
        }

        // Input made only of stripped markup is as blank as whitespace
        let content = sanitize(self.surface.content_html().trim());
        if content.as_str().trim().is_empty() {
            return SendOutcome::Skipped;
        }

        self.transcript.append(Message::user(content.clone()));
        self.surface.clear();

        tracing::debug!("Sending: {}", content);

        let reply = match self.relay.send(content.as_str()).await {
            Ok(reply) => sanitize(&reply),
            Err(e) => return SendOutcome::Failed(self.record_error(&e)),
        };

        if reply.is_empty() {
            return SendOutcome::Failed(self.record_error(&RelayClientError::UnexpectedResponse));
        }
        SendOutcome::Replying(self.start_typing(reply))
    }

    fn record_error(&mut self, e: &RelayClientError) -> MessageId {
        tracing::error!("Error fetching: {}", e);
        let msg = Message::error(sanitize(&format!("Error: {}", e)));
        self.transcript.append(msg).id
    }

    /// Start revealing `reply` in the transcript. The id is fixed here,
    /// before the first character shows up.
    pub fn type_reply(&mut self, reply: &str) -> MessageId {
        self.start_typing(sanitize(reply))
    }

    fn start_typing(&mut self, reply: SanitizedHtml) -> MessageId {
        let message_id = MessageId::new();
        let simulation = TypingSimulation::new(message_id, reply);
        self.typing.insert(message_id);
        spawn_typing(simulation, self.typing_interval, self.tx.clone());
        message_id
    }

    /// Record an attached file by name only. The file is never opened.
    pub fn attach_file(&mut self, path: &Path) -> Option<MessageId> {
        let name = path.file_name()?.to_string_lossy();
        let msg = Message::user(sanitize(&format!("File: {}", name)));
        Some(self.transcript.append(msg).id)
    }

    fn apply(&mut self, event: TypingEvent) -> Option<MessageId> {
        match event {
            TypingEvent::Reveal(msg) => {
                let id = msg.id;
                self.transcript.upsert(msg);
                Some(id)
            }
            TypingEvent::Finished(id) => {
                self.typing.remove(&id);
                None
            }
        }
    }

    /// Wait for the next partial render and apply it. Returns `None`
    /// once no reply is being typed.
    pub async fn next_render(&mut self) -> Option<&Message> {
        while self.is_typing() {
            let event = self.rx.recv().await?;
            if let Some(id) = self.apply(event) {
                return self.transcript.get(id);
            }
        }
        None
    }

    /// Apply every render that is already waiting without blocking.
    /// Returns how many were applied.
    pub fn apply_pending(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.rx.try_recv() {
            if self.apply(event).is_some() {
                applied += 1;
            }
        }
        applied
    }
}
