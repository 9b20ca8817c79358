pub mod traits;
pub mod gemini;

pub use traits::{
    CompletionClient,
    CompletionRequest, CompletionResponse, CompletionOptions,
    TokenUsage,
};

pub use gemini::GeminiClient;
