use axum::Json;
use serde::Serialize;

use deckscope_analysis::CRITERIA;

#[derive(Debug, Serialize)]
pub struct CriterionInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub weight: f32,
}

#[derive(Debug, Serialize)]
pub struct CriteriaResponse {
    pub criteria: Vec<CriterionInfo>,
    pub scoring_range: &'static str,
    pub description: &'static str,
}

/// The evaluation criteria used for IPO readiness scoring
#[utoipa::path(
    get,
    path = "/criteria",
    responses(
        (status = 200, description = "Static list of rubric criteria")
    ),
    tag = "criteria"
)]
pub async fn get_criteria() -> Json<CriteriaResponse> {
    let criteria = CRITERIA
        .iter()
        .map(|c| CriterionInfo {
            name: c.name,
            description: c.description,
            weight: c.weight,
        })
        .collect();

    Json(CriteriaResponse {
        criteria,
        scoring_range: "0-100",
        description: "Each criterion is weighted equally (12.5%) for the overall IPO readiness score",
    })
}
