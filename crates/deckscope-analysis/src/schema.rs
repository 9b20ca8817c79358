use serde_json::{json, Value};

/// Gemini response schema for [`crate::types::StructuredAnalysis`]
///
/// Kept in the provider's OpenAPI-subset dialect (upper-case type names, no
/// additionalProperties support), which is why financial_highlights is
/// modeled as free-form key/value pairs.
pub(crate) fn analysis_response_schema() -> Value {
    let string_list = || json!({ "type": "ARRAY", "items": { "type": "STRING" } });

    json!({
        "type": "OBJECT",
        "properties": {
            "company_metadata": {
                "type": "OBJECT",
                "properties": {
                    "company_name": { "type": "STRING", "nullable": true },
                    "industry": { "type": "STRING", "nullable": true },
                    "founding_year": { "type": "INTEGER", "nullable": true },
                    "stage": { "type": "STRING", "nullable": true },
                    "employee_count": { "type": "INTEGER", "nullable": true },
                },
            },
            "overall_ipo_score": { "type": "NUMBER" },
            "criterion_scores": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING" },
                        "score": { "type": "NUMBER" },
                        "rationale": { "type": "STRING" },
                        "strengths": string_list(),
                        "weaknesses": string_list(),
                    },
                    "required": ["name", "score", "rationale"],
                },
            },
            "executive_summary": {
                "type": "OBJECT",
                "properties": {
                    "overall_assessment": { "type": "STRING" },
                    "key_highlights": string_list(),
                    "critical_gaps": string_list(),
                    "recommendation": { "type": "STRING" },
                },
                "required": ["overall_assessment", "recommendation"],
            },
            "risk_assessment": {
                "type": "OBJECT",
                "properties": {
                    "key_risks": string_list(),
                    "information_gaps": string_list(),
                    "risk_level": { "type": "STRING" },
                },
                "required": ["risk_level"],
            },
            "follow_up_questions": {
                "type": "OBJECT",
                "properties": {
                    "questions": string_list(),
                    "priority_areas": string_list(),
                },
            },
            "financial_highlights": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "metric": { "type": "STRING" },
                        "value": { "type": "STRING" },
                    },
                    "required": ["metric", "value"],
                },
            },
            "competitive_positioning": { "type": "STRING" },
            "confidence_score": { "type": "NUMBER" },
        },
        "required": [
            "overall_ipo_score",
            "criterion_scores",
            "executive_summary",
            "risk_assessment",
            "confidence_score",
        ],
    })
}
