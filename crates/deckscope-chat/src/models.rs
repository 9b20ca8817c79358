use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use deckscope_analysis::AnalysisReport;
use deckscope_extract::ExtractedDocument;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl MessageRole {
    /// Display label used when rendering history into prompts
    pub fn label(self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Assistant => "Assistant",
        }
    }
}

/// Individual chat message; immutable once appended
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub role: MessageRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub analysis_id: String,
}

impl ChatMessage {
    pub fn new(role: MessageRole, content: impl Into<String>, analysis_id: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
            analysis_id: analysis_id.into(),
        }
    }
}

/// Summarized conversation context, recomputed wholesale on each trigger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationSummary {
    #[serde(default)]
    pub key_topics: Vec<String>,
    #[serde(default)]
    pub important_questions: Vec<String>,
    #[serde(default)]
    pub key_insights: Vec<String>,
    #[serde(default)]
    pub user_concerns: Vec<String>,
    pub summary_text: String,
    pub last_updated: DateTime<Utc>,
}

/// Complete conversation history, process lifetime only
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationHistory {
    pub conversation_id: String,
    pub analysis_id: String,
    pub messages: Vec<ChatMessage>,
    pub summary: Option<ConversationSummary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ConversationHistory {
    pub fn new(conversation_id: impl Into<String>, analysis_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            conversation_id: conversation_id.into(),
            analysis_id: analysis_id.into(),
            messages: Vec::new(),
            summary: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Everything a chat turn needs to know about one completed analysis
///
/// Created once per successful PDF analysis and immutable thereafter.
#[derive(Debug, Clone)]
pub struct AnalysisContext {
    pub analysis_id: String,
    pub company_name: Option<String>,
    pub full_text: String,
    pub extracted: ExtractedDocument,
    pub report: AnalysisReport,
}

impl AnalysisContext {
    pub fn from_analysis(extracted: ExtractedDocument, report: AnalysisReport) -> Self {
        Self {
            analysis_id: report.analysis_id.clone(),
            company_name: report.company_metadata.company_name.clone(),
            full_text: extracted.full_text.clone(),
            extracted,
            report,
        }
    }

    /// Company name with the fixed fallback used in prompts
    pub fn company_label(&self) -> &str {
        self.company_name.as_deref().unwrap_or("the company")
    }
}
