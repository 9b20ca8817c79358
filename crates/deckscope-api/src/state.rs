use std::sync::Arc;

use deckscope_analysis::DeckAnalyzer;
use deckscope_chat::ChatService;
use deckscope_extract::ParseClient;

use crate::config::Config;

/// Shared application state passed to all handlers
///
/// All resources are wrapped in Arc for efficient sharing across async
/// tasks. The chat service owns the in-memory context and conversation
/// stores.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub extractor: Arc<ParseClient>,
    pub analyzer: Arc<DeckAnalyzer>,
    pub chat: Arc<ChatService>,
}

impl AppState {
    pub fn new(
        config: Config,
        extractor: ParseClient,
        analyzer: DeckAnalyzer,
        chat: ChatService,
    ) -> Self {
        Self {
            config: Arc::new(config),
            extractor: Arc::new(extractor),
            analyzer: Arc::new(analyzer),
            chat: Arc::new(chat),
        }
    }
}
