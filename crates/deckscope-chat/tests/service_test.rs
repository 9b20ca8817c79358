use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;

use deckscope_analysis::{
    AnalysisReport, CompanyMetadata, ExecutiveSummary, FollowUpQuestions, RiskAssessment,
};
use deckscope_chat::{AnalysisContext, ChatService, ChatSettings, ChatTurn, MessageRole};
use deckscope_extract::ExtractedDocument;
use deckscope_llm::{CompletionClient, CompletionRequest, CompletionResponse};

/// Mock client that counts reply and summarization calls separately
///
/// Summarization requests are recognized by their fixed prompt text.
struct CountingClient {
    reply: String,
    reply_calls: AtomicUsize,
    summary_calls: AtomicUsize,
    fail_replies: bool,
    fail_summaries: bool,
}

impl CountingClient {
    fn replying(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            reply_calls: AtomicUsize::new(0),
            summary_calls: AtomicUsize::new(0),
            fail_replies: false,
            fail_summaries: false,
        }
    }

    fn failing_replies() -> Self {
        Self {
            fail_replies: true,
            ..Self::replying("")
        }
    }

    fn failing_summaries(reply: &str) -> Self {
        Self {
            fail_summaries: true,
            ..Self::replying(reply)
        }
    }
}

#[async_trait]
impl CompletionClient for CountingClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let is_summary = request.prompt.contains("create a concise summary");
        if is_summary {
            self.summary_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_summaries {
                anyhow::bail!("summarization unavailable");
            }
            return Ok(text_response(
                "Key topics:\n- Revenue\nSummary: A short recap.",
            ));
        }

        self.reply_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_replies {
            anyhow::bail!("completion unavailable");
        }
        Ok(text_response(&self.reply))
    }

    async fn complete_json(&self, _request: CompletionRequest, _schema: Value) -> Result<Value> {
        anyhow::bail!("structured output is not used by chat")
    }
}

fn text_response(text: &str) -> CompletionResponse {
    CompletionResponse {
        text: Some(text.to_string()),
        usage: None,
        finish_reason: Some("STOP".to_string()),
        raw: Value::Null,
    }
}

fn report(analysis_id: &str) -> AnalysisReport {
    AnalysisReport {
        analysis_id: analysis_id.to_string(),
        timestamp: Utc::now(),
        filename: "deck.pdf".to_string(),
        company_metadata: CompanyMetadata {
            company_name: Some("Acme Robotics".to_string()),
            ..CompanyMetadata::default()
        },
        overall_ipo_score: 70.0,
        readiness_level: "Ready".to_string(),
        criterion_scores: Vec::new(),
        executive_summary: ExecutiveSummary {
            overall_assessment: "Solid".to_string(),
            key_highlights: Vec::new(),
            critical_gaps: Vec::new(),
            recommendation: "Prepare".to_string(),
        },
        risk_assessment: RiskAssessment {
            key_risks: Vec::new(),
            information_gaps: Vec::new(),
            risk_level: "Medium".to_string(),
        },
        follow_up_questions: FollowUpQuestions::default(),
        financial_highlights: Vec::new(),
        competitive_positioning: "Competitive".to_string(),
        processing_time_seconds: 0.1,
        confidence_score: 0.8,
    }
}

fn service_with_context(client: Arc<CountingClient>, analysis_id: &str) -> ChatService {
    let service = ChatService::new(client, ChatSettings::default());
    let extracted = ExtractedDocument::from_markdown("Deck text".to_string());
    service.store_context(AnalysisContext::from_analysis(extracted, report(analysis_id)));
    service
}

fn turn(analysis_id: &str, conversation_id: Option<&str>, message: &str) -> ChatTurn {
    ChatTurn {
        message: message.to_string(),
        analysis_id: analysis_id.to_string(),
        conversation_id: conversation_id.map(String::from),
    }
}

#[tokio::test]
async fn first_message_creates_one_conversation() {
    let client = Arc::new(CountingClient::replying("Sure."));
    let service = service_with_context(client, "a-1");

    let reply = service.chat(turn("a-1", None, "Hello")).await.unwrap();

    let conversations = service.conversations_for_analysis("a-1");
    assert_eq!(conversations.len(), 1);
    assert_eq!(conversations[0].conversation_id, reply.conversation_id);
    assert_eq!(conversations[0].messages.len(), 2);
    assert_eq!(conversations[0].messages[0].role, MessageRole::User);
    assert_eq!(conversations[0].messages[0].content, "Hello");
}

#[tokio::test]
async fn unknown_analysis_fails_not_found_and_appends_nothing() {
    let client = Arc::new(CountingClient::replying("Sure."));
    let service = ChatService::new(client.clone(), ChatSettings::default());

    let result = service.chat(turn("missing", Some("c-1"), "Hello")).await;

    assert!(result.is_err());
    assert!(service.conversation("c-1").is_none());
    assert_eq!(client.reply_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn n_turns_yield_2n_alternating_messages() {
    let client = Arc::new(CountingClient::replying("Noted."));
    let service = service_with_context(client, "a-1");

    let first = service.chat(turn("a-1", None, "Question 1")).await.unwrap();
    let conversation_id = first.conversation_id.clone();
    for i in 2..=3 {
        service
            .chat(turn("a-1", Some(&conversation_id), &format!("Question {}", i)))
            .await
            .unwrap();
    }

    let conversation = service.conversation(&conversation_id).unwrap();
    assert_eq!(conversation.messages.len(), 6);
    for (i, message) in conversation.messages.iter().enumerate() {
        let expected = if i % 2 == 0 {
            MessageRole::User
        } else {
            MessageRole::Assistant
        };
        assert_eq!(message.role, expected);
    }
}

#[tokio::test]
async fn summary_recomputes_on_interval_boundaries() {
    let client = Arc::new(CountingClient::replying("Noted."));
    let service = service_with_context(client.clone(), "a-1");

    let first = service.chat(turn("a-1", None, "Question 1")).await.unwrap();
    let conversation_id = first.conversation_id.clone();

    // Message counts at the pre-reply check are 1, 3, 5, 7, ...: the
    // summary fires when the count first exceeds 6 (call 4, count 7) and on
    // each later multiple-of-6 boundary (call 7 at 13, call 10 at 19).
    let mut calls_that_summarized = Vec::new();
    for call in 2..=10 {
        let before = client.summary_calls.load(Ordering::SeqCst);
        service
            .chat(turn("a-1", Some(&conversation_id), "Another question"))
            .await
            .unwrap();
        if client.summary_calls.load(Ordering::SeqCst) > before {
            calls_that_summarized.push(call);
        }
    }

    assert_eq!(calls_that_summarized, vec![4, 7, 10]);
    assert_eq!(client.summary_calls.load(Ordering::SeqCst), 3);

    let conversation = service.conversation(&conversation_id).unwrap();
    let summary = conversation.summary.unwrap();
    assert_eq!(summary.key_topics, vec!["Revenue"]);
    assert_eq!(summary.summary_text, "A short recap.");
}

#[tokio::test]
async fn sources_cover_financials_and_risk() {
    let client = Arc::new(CountingClient::replying(
        "Revenue is growing, though execution risk remains.",
    ));
    let service = service_with_context(client, "a-1");

    let reply = service.chat(turn("a-1", None, "How do we look?")).await.unwrap();

    assert_eq!(
        reply.sources_referenced,
        vec!["Financial Highlights", "Risk Assessment"]
    );
}

#[tokio::test]
async fn failed_completion_degrades_to_apology() {
    let client = Arc::new(CountingClient::failing_replies());
    let service = service_with_context(client, "a-1");

    let reply = service.chat(turn("a-1", None, "Hello")).await.unwrap();

    assert!(reply.content.starts_with("I apologize"));

    // The apology is still recorded as the assistant turn
    let conversation = service.conversation(&reply.conversation_id).unwrap();
    assert_eq!(conversation.messages.len(), 2);
    assert_eq!(conversation.messages[1].content, reply.content);
}

#[tokio::test]
async fn failed_summarization_stores_unavailable_summary() {
    let client = Arc::new(CountingClient::failing_summaries("Noted."));
    let service = service_with_context(client, "a-1");

    let first = service.chat(turn("a-1", None, "Question 1")).await.unwrap();
    let conversation_id = first.conversation_id.clone();
    for _ in 2..=4 {
        service
            .chat(turn("a-1", Some(&conversation_id), "Another question"))
            .await
            .unwrap();
    }

    let conversation = service.conversation(&conversation_id).unwrap();
    let summary = conversation.summary.unwrap();
    assert_eq!(
        summary.summary_text,
        "Summary unavailable due to processing error"
    );
    assert!(summary.key_topics.is_empty());
}
