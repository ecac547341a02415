//! Client side transcript engine
pub mod client;
pub mod core;
pub mod models;
pub mod sanitize;
pub mod surface;
pub mod typing;

pub use self::core::{ChatBox, SendOutcome};
pub use client::{RelayClient, RelayClientError};
pub use models::{Message, MessageId, Sender, Transcript};
pub use sanitize::{SanitizedHtml, sanitize};
pub use surface::{Clipboard, EditableSurface, Emoji};
pub use typing::{TypingEvent, TypingSimulation, spawn_typing};
