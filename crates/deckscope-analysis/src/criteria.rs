/// One dimension of the IPO readiness rubric
#[derive(Debug, Clone, Copy)]
pub struct CriterionDefinition {
    pub name: &'static str,
    pub description: &'static str,
    /// Percentage weight in the overall score; all criteria weigh equally
    pub weight: f32,
    /// Keywords used by the fallback scoring heuristic
    pub keywords: &'static [&'static str],
}

/// The 8 evaluation criteria, in rubric order
pub const CRITERIA: [CriterionDefinition; 8] = [
    CriterionDefinition {
        name: "Basic Company Info",
        description: "Company background, founding details, and key information",
        weight: 12.5,
        keywords: &["company", "founded", "team", "background", "history"],
    },
    CriterionDefinition {
        name: "Mission & Core Business",
        description: "Business model clarity and strategic focus",
        weight: 12.5,
        keywords: &["mission", "business model", "value proposition", "strategy"],
    },
    CriterionDefinition {
        name: "Defensibility / IP / MOAT",
        description: "Competitive advantages and intellectual property",
        weight: 12.5,
        keywords: &["competitive advantage", "ip", "patent", "moat", "differentiation"],
    },
    CriterionDefinition {
        name: "Regulatory Approvals & Compliance",
        description: "Industry compliance and regulatory readiness",
        weight: 12.5,
        keywords: &["regulatory", "compliance", "license", "approval", "legal"],
    },
    CriterionDefinition {
        name: "Commercial Traction & Validation",
        description: "Market validation and customer traction",
        weight: 12.5,
        keywords: &["traction", "customers", "revenue", "growth", "validation"],
    },
    CriterionDefinition {
        name: "Segment-level Unit Economics",
        description: "Financial metrics and unit economics analysis",
        weight: 12.5,
        keywords: &["unit economics", "cac", "ltv", "margins", "profitability"],
    },
    CriterionDefinition {
        name: "Equity Cap Table",
        description: "Ownership structure and equity distribution",
        weight: 12.5,
        keywords: &["equity", "cap table", "ownership", "shares", "dilution"],
    },
    CriterionDefinition {
        name: "Key Risks & Information Gaps",
        description: "Risk assessment and information completeness",
        weight: 12.5,
        keywords: &["risks", "challenges", "gaps", "threats", "weaknesses"],
    },
];

/// Map an overall score (0-100) to its readiness band
///
/// Bands are inclusive on their lower edge.
pub fn readiness_level(score: f32) -> &'static str {
    if score >= 86.0 {
        "Highly Ready"
    } else if score >= 66.0 {
        "Ready"
    } else if score >= 41.0 {
        "Developing"
    } else {
        "Not Ready"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_criteria_count_and_weights() {
        assert_eq!(CRITERIA.len(), 8);
        assert!(CRITERIA.iter().all(|c| (c.weight - 12.5).abs() < f32::EPSILON));
    }

    #[test]
    fn test_readiness_bands() {
        assert_eq!(readiness_level(90.0), "Highly Ready");
        assert_eq!(readiness_level(66.0), "Ready");
        assert_eq!(readiness_level(41.0), "Developing");
        assert_eq!(readiness_level(10.0), "Not Ready");
    }

    #[test]
    fn test_readiness_lower_edges_inclusive() {
        assert_eq!(readiness_level(86.0), "Highly Ready");
        assert_eq!(readiness_level(85.9), "Ready");
        assert_eq!(readiness_level(65.9), "Developing");
        assert_eq!(readiness_level(40.9), "Not Ready");
        assert_eq!(readiness_level(0.0), "Not Ready");
    }
}
