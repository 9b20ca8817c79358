use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use deckscope_llm::{CompletionClient, CompletionOptions, CompletionRequest};

use crate::error::{ChatError, Result};
use crate::models::{
    AnalysisContext, ChatMessage, ConversationHistory, ConversationSummary, MessageRole,
};
use crate::sources::sources_referenced;
use crate::summarize::{
    parse_summary_response, unavailable_summary, SUMMARIZATION_PROMPT_TEMPLATE,
};

const CHAT_PROMPT_TEMPLATE: &str = r#"You are an assistant answering questions about <company_name>'s IPO readiness analysis.

## Analysis results
<analysis_results>

## Source document
<full_text>

## Conversation so far
<conversation_history>
<summary_context>
User question: <user_message>

Answer using the analysis and the source document above. Be specific and reference scores where relevant."#;

/// Reply substituted when the completion call fails
const FALLBACK_REPLY: &str =
    "I apologize, but I encountered an error while processing your question. Please try again.";

/// Reply substituted when the model returns no text
const EMPTY_REPLY: &str = "I apologize, but I couldn't generate a response.";

#[derive(Debug, Clone)]
pub struct ChatSettings {
    pub model: String,
    /// Messages replayed into the prompt
    pub history_window: usize,
    /// Summary recomputation cadence, in messages
    pub summary_interval: usize,
    pub reply_temperature: f32,
    pub reply_max_tokens: u32,
    pub summary_temperature: f32,
    pub summary_max_tokens: u32,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash".to_string(),
            history_window: 10,
            summary_interval: 6,
            reply_temperature: 0.3,
            reply_max_tokens: 1000,
            summary_temperature: 0.3,
            summary_max_tokens: 500,
        }
    }
}

/// One incoming chat message
#[derive(Debug, Clone, Deserialize)]
pub struct ChatTurn {
    pub message: String,
    pub analysis_id: String,
    pub conversation_id: Option<String>,
}

/// The assistant's reply for one turn
#[derive(Debug, Clone, Serialize)]
pub struct ChatReply {
    pub message_id: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub conversation_id: String,
    pub analysis_id: String,
    pub sources_referenced: Vec<String>,
}

/// Chat over completed analyses, with per-conversation memory
///
/// Contexts and conversations live in process memory only; a restart
/// discards both.
pub struct ChatService {
    llm: Arc<dyn CompletionClient>,
    settings: ChatSettings,
    contexts: DashMap<String, AnalysisContext>,
    conversations: DashMap<String, ConversationHistory>,
}

impl ChatService {
    pub fn new(llm: Arc<dyn CompletionClient>, settings: ChatSettings) -> Self {
        Self {
            llm,
            settings,
            contexts: DashMap::new(),
            conversations: DashMap::new(),
        }
    }

    /// Register the context for a completed analysis
    pub fn store_context(&self, context: AnalysisContext) {
        tracing::info!(analysis_id = %context.analysis_id, "Stored chat context");
        self.contexts.insert(context.analysis_id.clone(), context);
    }

    pub fn context(&self, analysis_id: &str) -> Option<AnalysisContext> {
        self.contexts.get(analysis_id).map(|c| c.value().clone())
    }

    /// Process one chat message with full context and memory
    pub async fn chat(&self, turn: ChatTurn) -> Result<ChatReply> {
        let context = self
            .context(&turn.analysis_id)
            .ok_or_else(|| ChatError::ContextNotFound(turn.analysis_id.clone()))?;

        let conversation_id = turn
            .conversation_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let user_message =
            ChatMessage::new(MessageRole::User, turn.message.clone(), turn.analysis_id.clone());

        // Append the user message; snapshot what prompt building needs so no
        // map entry stays locked across the LLM calls.
        let (messages, summary, message_count) = {
            let mut entry = self
                .conversations
                .entry(conversation_id.clone())
                .or_insert_with(|| {
                    ConversationHistory::new(conversation_id.clone(), turn.analysis_id.clone())
                });
            entry.messages.push(user_message);
            entry.updated_at = Utc::now();
            (entry.messages.clone(), entry.summary.clone(), entry.messages.len())
        };

        // Recompute the summary on the cadence boundary so raw history stays
        // bounded in the prompt.
        let summary = if self.summary_due(message_count) {
            let recomputed = self.recompute_summary(&context, &messages).await;
            if let Some(mut entry) = self.conversations.get_mut(&conversation_id) {
                entry.summary = Some(recomputed.clone());
            }
            Some(recomputed)
        } else {
            summary
        };

        let prompt = self.build_reply_prompt(&turn.message, &context, &messages, summary.as_ref());
        let content = self.generate_reply(prompt).await;

        let reply_message = ChatMessage::new(
            MessageRole::Assistant,
            content.clone(),
            turn.analysis_id.clone(),
        );
        let message_id = reply_message.id.clone();
        let timestamp = reply_message.timestamp;

        if let Some(mut entry) = self.conversations.get_mut(&conversation_id) {
            entry.messages.push(reply_message);
            entry.updated_at = Utc::now();
        }

        let sources = sources_referenced(&content);

        Ok(ChatReply {
            message_id,
            content,
            timestamp,
            conversation_id,
            analysis_id: turn.analysis_id,
            sources_referenced: sources,
        })
    }

    /// Cadence check: first when the count exceeds the interval, then on
    /// every later interval boundary (counts 7, 13, 19, ... for interval 6)
    fn summary_due(&self, message_count: usize) -> bool {
        let interval = self.settings.summary_interval;
        interval > 0 && message_count > interval && (message_count - 1) % interval == 0
    }

    /// Generate the reply text, degrading to a fixed apology on any failure
    async fn generate_reply(&self, prompt: String) -> String {
        let request = CompletionRequest::new(&self.settings.model, prompt).with_options(
            CompletionOptions::new()
                .temperature(self.settings.reply_temperature)
                .max_output_tokens(self.settings.reply_max_tokens),
        );

        match self.llm.complete(request).await {
            Ok(response) => match response.text {
                Some(text) => text.trim().to_string(),
                None => EMPTY_REPLY.to_string(),
            },
            Err(e) => {
                tracing::error!(error = %e, "Error generating chat reply");
                FALLBACK_REPLY.to_string()
            }
        }
    }

    fn build_reply_prompt(
        &self,
        user_message: &str,
        context: &AnalysisContext,
        messages: &[ChatMessage],
        summary: Option<&ConversationSummary>,
    ) -> String {
        // Last N messages, excluding the just-appended user message
        let window_start = messages.len().saturating_sub(self.settings.history_window);
        let recent = &messages[window_start..];
        let history = recent[..recent.len().saturating_sub(1)]
            .iter()
            .map(|m| format!("{}: {}", m.role.label(), m.content))
            .collect::<Vec<_>>()
            .join("\n\n");

        let summary_block = summary.map(render_summary_block).unwrap_or_default();

        let analysis_results =
            serde_json::to_string_pretty(&context.report).unwrap_or_default();

        CHAT_PROMPT_TEMPLATE
            .replace("<company_name>", context.company_label())
            .replace("<analysis_results>", &analysis_results)
            .replace("<full_text>", &context.full_text)
            .replace("<conversation_history>", &history)
            .replace("<summary_context>", &summary_block)
            .replace("<user_message>", user_message)
    }

    /// Summarize the recent window; the result replaces any prior summary
    async fn recompute_summary(
        &self,
        context: &AnalysisContext,
        messages: &[ChatMessage],
    ) -> ConversationSummary {
        let window_start = messages.len().saturating_sub(self.settings.history_window);
        let conversation = messages[window_start..]
            .iter()
            .map(|m| format!("{}: {}", m.role.label(), m.content))
            .collect::<Vec<_>>()
            .join("\n\n");

        let prompt = SUMMARIZATION_PROMPT_TEMPLATE
            .replace("<company_name>", context.company_label())
            .replace("<conversation>", &conversation);

        let request = CompletionRequest::new(&self.settings.model, prompt).with_options(
            CompletionOptions::new()
                .temperature(self.settings.summary_temperature)
                .max_output_tokens(self.settings.summary_max_tokens),
        );

        match self.llm.complete(request).await {
            Ok(response) => {
                let text = response.text.unwrap_or_default();
                parse_summary_response(&text)
            }
            Err(e) => {
                tracing::error!(error = %e, "Error updating conversation summary");
                unavailable_summary()
            }
        }
    }

    /// One conversation by id
    pub fn conversation(&self, conversation_id: &str) -> Option<ConversationHistory> {
        self.conversations
            .get(conversation_id)
            .map(|c| c.value().clone())
    }

    /// All conversations attached to an analysis
    pub fn conversations_for_analysis(&self, analysis_id: &str) -> Vec<ConversationHistory> {
        self.conversations
            .iter()
            .filter(|entry| entry.value().analysis_id == analysis_id)
            .map(|entry| entry.value().clone())
            .collect()
    }
}

fn render_summary_block(summary: &ConversationSummary) -> String {
    format!(
        "\n## Previous Conversation Summary\nKey Topics: {}\nImportant Questions: {}\nKey Insights: {}\nUser Concerns: {}\nSummary: {}\n",
        summary.key_topics.join(", "),
        summary.important_questions.join(", "),
        summary.key_insights.join(", "),
        summary.user_concerns.join(", "),
        summary.summary_text,
    )
}
