pub mod provider;
pub use provider::{BoxedProvider, CompletionError, CompletionProvider};
