use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use deckscope_api::{
    config::Config,
    middleware::logging,
    routes::{analyze, chat, criteria, health},
    state::AppState,
};
use deckscope_analysis::{AnalyzerSettings, DeckAnalyzer};
use deckscope_chat::{ChatService, ChatSettings};
use deckscope_extract::ParseClient;
use deckscope_llm::{CompletionClient, GeminiClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Load configuration; missing API keys abort startup here
    let config = Config::load()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    // Initialize logging
    init_logging(&config);

    tracing::info!("Starting Deckscope API server");
    tracing::info!("Config loaded: {}:{}", config.server.host, config.server.port);

    // Initialize LLM client
    tracing::info!("Initializing Gemini client");
    let llm: Arc<dyn CompletionClient> = Arc::new(GeminiClient::new(config.gemini_api_key.clone())?);

    // Initialize parsing-service client
    let mut extractor = ParseClient::new(config.parse_api_key.clone())?.with_poll_window(
        Duration::from_secs(config.parsing.poll_interval_secs),
        Duration::from_secs(config.parsing.poll_timeout_secs),
    );
    if let Some(base_url) = &config.parsing.base_url {
        extractor = extractor.with_base_url(base_url);
    }

    let analyzer = DeckAnalyzer::new(
        llm.clone(),
        AnalyzerSettings {
            model: config.llm.model.clone(),
            max_retries: config.analysis.max_retries,
        },
    );

    let chat_service = ChatService::new(
        llm.clone(),
        ChatSettings {
            model: config.llm.chat_model.clone(),
            history_window: config.chat.history_window,
            summary_interval: config.chat.summary_interval,
            ..ChatSettings::default()
        },
    );

    // Create application state
    let state = Arc::new(AppState::new(config.clone(), extractor, analyzer, chat_service));

    // Build router
    let app = build_router(state.clone());

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);
    tracing::info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    // API routes
    let api_routes = Router::new()
        // Health
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
        // Analysis
        .route("/analyze-pdf", post(analyze::analyze_pdf))
        .route("/criteria", get(criteria::get_criteria))
        // Chat
        .route("/chat", post(chat::send_message))
        .route("/chat/conversations/:analysis_id", get(chat::list_conversations))
        .route("/chat/history/:conversation_id", get(chat::get_history));

    // Build full router with middleware
    Router::new()
        .merge(api_routes)
        .layer(middleware::from_fn(logging::log_request))
        // Outer bound on a request; the parsing poll alone may take 300s
        .layer(TimeoutLayer::new(Duration::from_secs(600)))
        .layer(DefaultBodyLimit::max(analyze::MAX_UPLOAD_BYTES + 1024 * 1024))
        .layer(build_cors_layer(&state.config))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn build_cors_layer(config: &Config) -> CorsLayer {
    if config.cors.enabled {
        let mut cors = CorsLayer::new()
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers(Any);

        if config.cors.origins.iter().any(|o| o == "*") {
            cors = cors.allow_origin(Any);
        } else {
            let origins: Vec<axum::http::HeaderValue> = config
                .cors
                .origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();
            cors = cors.allow_origin(AllowOrigin::list(origins));
        }

        cors
    } else {
        CorsLayer::permissive()
    }
}

fn init_logging(config: &Config) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.logging.format.as_str() {
        "json" => {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            registry
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }
}
