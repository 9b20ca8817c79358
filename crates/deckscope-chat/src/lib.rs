pub mod error;
pub mod models;
pub mod service;
mod sources;
mod summarize;

pub use error::ChatError;
pub use models::{
    AnalysisContext, ChatMessage, ConversationHistory, ConversationSummary, MessageRole,
};
pub use service::{ChatReply, ChatService, ChatSettings, ChatTurn};
