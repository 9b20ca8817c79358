pub mod client;
pub mod document;
pub mod error;
mod sections;

pub use client::ParseClient;
pub use document::ExtractedDocument;
pub use error::ExtractError;
