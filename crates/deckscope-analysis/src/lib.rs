pub mod analyzer;
pub mod criteria;
pub mod types;
mod prompt;
mod schema;

pub use analyzer::{keyword_score, AnalyzerSettings, DeckAnalyzer};
pub use criteria::{readiness_level, CriterionDefinition, CRITERIA};
pub use types::{
    AnalysisReport, CompanyMetadata, CriterionScore, ExecutiveSummary, FinancialHighlight,
    FollowUpQuestions, RiskAssessment, StructuredAnalysis,
};
