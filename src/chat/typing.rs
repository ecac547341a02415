//! Typing simulation for replies.
//!
//! The relay returns a reply in one piece. To make it look like it is
//! being generated live, the reply is revealed one visible character
//! per tick. A tag or character reference counts as a single visible
//! character so a partial render never cuts through markup.
use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::models::{Message, MessageId, Sender};
use super::sanitize::SanitizedHtml;

static UNIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<[^>]*>|&#?[A-Za-z0-9]+;|.").expect("Invalid unit regex")
});

/// State of one reply being typed out. Termination is purely a
/// function of how much has been revealed.
#[derive(Clone, Debug)]
pub struct TypingSimulation {
    message_id: MessageId,
    full_text: SanitizedHtml,
    // Byte offset where each visible unit ends
    boundaries: Vec<usize>,
    revealed_count: usize,
}

impl TypingSimulation {
    pub fn new(message_id: MessageId, full_text: SanitizedHtml) -> Self {
        let boundaries = UNIT
            .find_iter(full_text.as_str())
            .map(|m| m.end())
            .collect();
        Self {
            message_id,
            full_text,
            boundaries,
            revealed_count: 0,
        }
    }

    pub fn message_id(&self) -> MessageId {
        self.message_id
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed_count
    }

    /// Number of visible units in the full reply
    pub fn len(&self) -> usize {
        self.boundaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boundaries.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.revealed_count == self.boundaries.len()
    }

    /// Reveal one more unit and return the message to render, or
    /// `None` once everything is visible.
    pub fn advance(&mut self) -> Option<Message> {
        if self.is_complete() {
            return None;
        }
        self.revealed_count += 1;
        let end = self.boundaries[self.revealed_count - 1];
        Some(Message::new(
            self.message_id,
            Sender::Assistant,
            self.full_text.prefix(end),
        ))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum TypingEvent {
    /// Render this partial (or final) reply in place of the previous one
    Reveal(Message),
    /// The reply is fully visible and its timer has stopped
    Finished(MessageId),
}

/// Drive `simulation` on a timer, sending one `Reveal` per tick. The
/// task ends on its own right after the last unit is revealed or when
/// the receiver goes away.
pub fn spawn_typing(
    mut simulation: TypingSimulation,
    every: Duration,
    tx: mpsc::UnboundedSender<TypingEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let message_id = simulation.message_id();
        let mut ticker = tokio::time::interval(every);
        // The first tick fires immediately
        ticker.tick().await;

        while !simulation.is_complete() {
            ticker.tick().await;
            let Some(msg) = simulation.advance() else {
                break;
            };
            if tx.send(TypingEvent::Reveal(msg)).is_err() {
                tracing::debug!("Render target dropped, stopping typing for {}", message_id);
                return;
            }
        }

        let _ = tx.send(TypingEvent::Finished(message_id));
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::sanitize::sanitize;

    fn reveal_all(simulation: &mut TypingSimulation) -> Vec<String> {
        let mut seen = Vec::new();
        while let Some(msg) = simulation.advance() {
            seen.push(msg.text.as_str().to_string());
        }
        seen
    }

    #[test]
    fn test_reveals_exact_prefixes() {
        let id = MessageId::new();
        let mut simulation = TypingSimulation::new(id, sanitize("abc"));

        let mut ids = Vec::new();
        let mut seen = Vec::new();
        while let Some(msg) = simulation.advance() {
            ids.push(msg.id);
            assert_eq!(msg.sender, Sender::Assistant);
            seen.push(msg.text.as_str().to_string());
        }

        assert_eq!(seen, vec!["a", "ab", "abc"]);
        assert!(ids.iter().all(|i| *i == id));
        assert!(simulation.is_complete());
        assert_eq!(simulation.advance(), None);
    }

    #[test]
    fn test_counts_unicode_characters() {
        let mut simulation = TypingSimulation::new(MessageId::new(), sanitize("héllo 👋"));
        assert_eq!(simulation.len(), 7);
        let seen = reveal_all(&mut simulation);
        assert_eq!(seen[1], "hé");
        assert_eq!(seen.last().unwrap(), "héllo 👋");
    }

    #[test]
    fn test_markup_is_revealed_whole() {
        let mut simulation =
            TypingSimulation::new(MessageId::new(), sanitize("<b>hi</b> &amp; bye"));
        let seen = reveal_all(&mut simulation);
        assert_eq!(seen[0], "<b>");
        assert_eq!(seen[1], "<b>h");
        assert_eq!(seen[3], "<b>hi</b>");
        assert!(seen.contains(&"<b>hi</b> &amp;".to_string()));
        assert!(!seen.iter().any(|s| s.ends_with("&am") || s.ends_with("<b")));
        assert_eq!(seen.last().unwrap(), "<b>hi</b> &amp; bye");
    }

    #[test]
    fn test_empty_reply_is_already_complete() {
        let mut simulation = TypingSimulation::new(MessageId::new(), sanitize(""));
        assert!(simulation.is_empty());
        assert!(simulation.is_complete());
        assert_eq!(simulation.advance(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_spawned_typing_stops_after_last_character() {
        let id = MessageId::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let start = tokio::time::Instant::now();
        let handle = spawn_typing(
            TypingSimulation::new(id, sanitize("abc")),
            Duration::from_millis(50),
            tx,
        );

        let mut seen = Vec::new();
        while let Some(event) = rx.recv().await {
            match event {
                TypingEvent::Reveal(msg) => {
                    assert_eq!(msg.id, id);
                    seen.push(msg.text.as_str().to_string());
                }
                TypingEvent::Finished(finished_id) => {
                    assert_eq!(finished_id, id);
                    break;
                }
            }
        }

        assert_eq!(seen, vec!["a", "ab", "abc"]);
        assert!(start.elapsed() >= Duration::from_millis(150));
        assert!(start.elapsed() < Duration::from_millis(200));

        handle.await.unwrap();
        // The sender was dropped with the task so nothing else arrives
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_replies_stay_separate() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let first = MessageId::new();
        let second = MessageId::new();
        spawn_typing(
            TypingSimulation::new(first, sanitize("aaaa")),
            Duration::from_millis(50),
            tx.clone(),
        );
        spawn_typing(
            TypingSimulation::new(second, sanitize("bb")),
            Duration::from_millis(50),
            tx,
        );

        let mut first_seen = Vec::new();
        let mut second_seen = Vec::new();
        let mut finished = 0;
        while finished < 2 {
            match rx.recv().await.unwrap() {
                TypingEvent::Reveal(msg) if msg.id == first => {
                    first_seen.push(msg.text.as_str().to_string())
                }
                TypingEvent::Reveal(msg) => {
                    assert_eq!(msg.id, second);
                    second_seen.push(msg.text.as_str().to_string())
                }
                TypingEvent::Finished(_) => finished += 1,
            }
        }

        assert_eq!(first_seen, vec!["a", "aa", "aaa", "aaaa"]);
        assert_eq!(second_seen, vec!["b", "bb"]);
    }
}
