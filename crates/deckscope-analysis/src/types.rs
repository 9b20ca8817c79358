use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Individual criterion evaluation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriterionScore {
    pub name: String,
    /// Score out of 10
    pub score: f32,
    pub rationale: String,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
}

/// Risk and gap analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAssessment {
    #[serde(default)]
    pub key_risks: Vec<String>,
    #[serde(default)]
    pub information_gaps: Vec<String>,
    /// Overall risk level: Low, Medium, High
    pub risk_level: String,
}

/// Questions for the next meeting
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FollowUpQuestions {
    #[serde(default)]
    pub questions: Vec<String>,
    #[serde(default)]
    pub priority_areas: Vec<String>,
}

/// Executive summary of the analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutiveSummary {
    pub overall_assessment: String,
    #[serde(default)]
    pub key_highlights: Vec<String>,
    #[serde(default)]
    pub critical_gaps: Vec<String>,
    pub recommendation: String,
}

/// One financial metric surfaced from the deck
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialHighlight {
    pub metric: String,
    pub value: String,
}

/// Basic company information extracted from the deck
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompanyMetadata {
    pub company_name: Option<String>,
    pub industry: Option<String>,
    pub founding_year: Option<i32>,
    pub stage: Option<String>,
    pub employee_count: Option<i32>,
}

/// Shape of the model's structured analysis reply
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredAnalysis {
    #[serde(default)]
    pub company_metadata: CompanyMetadata,
    /// Overall IPO readiness score (0-100)
    pub overall_ipo_score: f32,
    pub criterion_scores: Vec<CriterionScore>,
    pub executive_summary: ExecutiveSummary,
    pub risk_assessment: RiskAssessment,
    #[serde(default)]
    pub follow_up_questions: FollowUpQuestions,
    #[serde(default)]
    pub financial_highlights: Vec<FinancialHighlight>,
    #[serde(default)]
    pub competitive_positioning: String,
    /// Confidence in the analysis (0-1)
    pub confidence_score: f32,
}

/// Complete IPO readiness analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub analysis_id: String,
    pub timestamp: DateTime<Utc>,
    pub filename: String,

    pub company_metadata: CompanyMetadata,

    pub overall_ipo_score: f32,
    /// Not Ready, Developing, Ready, Highly Ready
    pub readiness_level: String,

    pub criterion_scores: Vec<CriterionScore>,

    pub executive_summary: ExecutiveSummary,
    pub risk_assessment: RiskAssessment,
    pub follow_up_questions: FollowUpQuestions,

    pub financial_highlights: Vec<FinancialHighlight>,
    pub competitive_positioning: String,

    pub processing_time_seconds: f64,
    pub confidence_score: f32,
}
