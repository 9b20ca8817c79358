use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::Utc;
use rand::Rng;
use uuid::Uuid;

use deckscope_extract::ExtractedDocument;
use deckscope_llm::{CompletionClient, CompletionOptions, CompletionRequest};

use crate::criteria::{readiness_level, CriterionDefinition, CRITERIA};
use crate::prompt::render_analysis_prompt;
use crate::schema::analysis_response_schema;
use crate::types::{
    AnalysisReport, CompanyMetadata, CriterionScore, ExecutiveSummary, FollowUpQuestions,
    RiskAssessment, StructuredAnalysis,
};

#[derive(Debug, Clone)]
pub struct AnalyzerSettings {
    pub model: String,
    /// Attempts for the structured-output call before falling back
    pub max_retries: u32,
}

impl Default for AnalyzerSettings {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash".to_string(),
            max_retries: 3,
        }
    }
}

/// AI-powered IPO readiness analyzer
pub struct DeckAnalyzer {
    llm: Arc<dyn CompletionClient>,
    settings: AnalyzerSettings,
}

impl DeckAnalyzer {
    pub fn new(llm: Arc<dyn CompletionClient>, settings: AnalyzerSettings) -> Self {
        Self { llm, settings }
    }

    /// Analyze a parsed pitch deck and produce the full readiness report
    ///
    /// Structured scoring is attempted first; a structural-parse failure
    /// falls back to an unstructured completion scored by keyword
    /// heuristics. Upstream failures on both paths propagate.
    pub async fn analyze(
        &self,
        document: &ExtractedDocument,
        filename: &str,
    ) -> Result<AnalysisReport> {
        let started = Instant::now();
        let analysis_id = Uuid::new_v4().to_string();

        tracing::info!(analysis_id = %analysis_id, filename, "Starting pitch-deck analysis");

        let prompt = render_analysis_prompt(document, filename);

        let analysis = match self.structured_analysis(&prompt).await {
            Ok(analysis) => analysis,
            Err(e) => {
                tracing::warn!(
                    analysis_id = %analysis_id,
                    error = %e,
                    "Structured analysis failed, using fallback scoring"
                );
                self.fallback_analysis(&prompt).await?
            }
        };

        let processing_time = started.elapsed().as_secs_f64();
        tracing::info!(
            analysis_id = %analysis_id,
            score = analysis.overall_ipo_score,
            elapsed_s = processing_time,
            "Analysis completed"
        );

        Ok(AnalysisReport {
            analysis_id,
            timestamp: Utc::now(),
            filename: filename.to_string(),
            readiness_level: readiness_level(analysis.overall_ipo_score).to_string(),
            company_metadata: analysis.company_metadata,
            overall_ipo_score: analysis.overall_ipo_score,
            criterion_scores: analysis.criterion_scores,
            executive_summary: analysis.executive_summary,
            risk_assessment: analysis.risk_assessment,
            follow_up_questions: analysis.follow_up_questions,
            financial_highlights: analysis.financial_highlights,
            competitive_positioning: analysis.competitive_positioning,
            processing_time_seconds: processing_time,
            confidence_score: analysis.confidence_score,
        })
    }

    /// Schema-constrained scoring with bounded retries
    async fn structured_analysis(&self, prompt: &str) -> Result<StructuredAnalysis> {
        let schema = analysis_response_schema();
        let mut last_error = None;

        for attempt in 1..=self.settings.max_retries {
            let request = CompletionRequest::new(&self.settings.model, prompt);

            let parsed = self
                .llm
                .complete_json(request, schema.clone())
                .await
                .and_then(|value| {
                    serde_json::from_value::<StructuredAnalysis>(value)
                        .context("Structured reply did not match the analysis shape")
                });

            match parsed {
                Ok(analysis) => return Ok(analysis),
                Err(e) => {
                    tracing::warn!(attempt, error = %e, "Structured analysis attempt failed");
                    last_error = Some(e);
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| anyhow::anyhow!("Structured analysis produced no attempts")))
    }

    /// Fallback when structured responses cannot be obtained
    async fn fallback_analysis(&self, prompt: &str) -> Result<StructuredAnalysis> {
        let request = CompletionRequest::new(
            &self.settings.model,
            format!(
                "{}\n\nPlease provide a brief analysis with scores for each criterion.",
                prompt
            ),
        )
        .with_options(CompletionOptions::new().temperature(0.3));

        let response = self.llm.complete(request).await?;
        let text = response.text.unwrap_or_default();

        let mut rng = rand::thread_rng();
        let criterion_scores: Vec<CriterionScore> = CRITERIA
            .iter()
            .map(|criterion| {
                let jitter = rng.gen_range(-0.5..1.5);
                let score = (keyword_score(&text, criterion) + jitter).clamp(0.0, 10.0);
                CriterionScore {
                    name: criterion.name.to_string(),
                    score,
                    rationale: "Basic assessment based on available information".to_string(),
                    strengths: if score > 5.0 {
                        vec!["Information available".to_string()]
                    } else {
                        Vec::new()
                    },
                    weaknesses: if score <= 5.0 {
                        vec!["Limited information".to_string()]
                    } else {
                        Vec::new()
                    },
                }
            })
            .collect();

        let overall_score = criterion_scores.iter().map(|c| c.score).sum::<f32>() * 10.0
            / criterion_scores.len() as f32;

        Ok(StructuredAnalysis {
            company_metadata: CompanyMetadata::default(),
            overall_ipo_score: overall_score,
            criterion_scores,
            executive_summary: ExecutiveSummary {
                overall_assessment: "Basic analysis completed".to_string(),
                key_highlights: Vec::new(),
                critical_gaps: Vec::new(),
                recommendation: "Detailed review recommended".to_string(),
            },
            risk_assessment: RiskAssessment {
                key_risks: Vec::new(),
                information_gaps: Vec::new(),
                risk_level: "Medium".to_string(),
            },
            follow_up_questions: FollowUpQuestions {
                questions: vec![
                    "Provide detailed financial statements".to_string(),
                    "Clarify business model".to_string(),
                ],
                priority_areas: Vec::new(),
            },
            financial_highlights: Vec::new(),
            competitive_positioning: "Requires further analysis".to_string(),
            confidence_score: 0.3,
        })
    }
}

/// Keyword-presence score for one criterion: min(matches x 2, 8)
///
/// Deterministic part of the fallback heuristic; the caller adds jitter.
pub fn keyword_score(text: &str, criterion: &CriterionDefinition) -> f32 {
    let text_lower = text.to_lowercase();
    let matches = criterion
        .keywords
        .iter()
        .filter(|keyword| text_lower.contains(**keyword))
        .count();

    (matches as f32 * 2.0).min(8.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_score_three_matches() {
        let criterion = &CRITERIA[0]; // company, founded, team, background, history
        let text = "The company was founded by a strong team.";

        assert_eq!(keyword_score(text, criterion), 6.0);
    }

    #[test]
    fn test_keyword_score_caps_at_eight() {
        let criterion = &CRITERIA[0];
        let text = "company founded team background history";

        assert_eq!(keyword_score(text, criterion), 8.0);
    }

    #[test]
    fn test_keyword_score_case_insensitive() {
        let criterion = &CRITERIA[3]; // regulatory, compliance, ...
        assert_eq!(keyword_score("REGULATORY Compliance", criterion), 4.0);
    }

    #[test]
    fn test_keyword_score_no_matches() {
        let criterion = &CRITERIA[6]; // equity, cap table, ...
        assert_eq!(keyword_score("nothing relevant here", criterion), 0.0);
    }
}
