mod core;
pub use self::core::{
    Choice, ChoiceMessage, CompletionRequest, CompletionResponse, Message, OpenAiProvider, Role,
    completion,
};
