/// Analysis areas a reply can reference, with the keywords that signal each
///
/// Declaration order is the order categories appear in the result. Matching
/// is non-exclusive: a reply can hit several categories or none.
const SOURCE_CATEGORIES: &[(&str, &[&str])] = &[
    ("IPO Scores", &["score", "scoring", "rating"]),
    ("Financial Highlights", &["financial", "revenue", "profit", "funding"]),
    ("Risk Assessment", &["risk", "concern", "weakness"]),
    ("Strengths Analysis", &["strength", "advantage", "positive"]),
    ("Recommendations", &["recommendation", "suggest", "should"]),
    ("Market Analysis", &["competitive", "market", "industry"]),
];

/// Which parts of the analysis a reply references, by keyword presence
pub(crate) fn sources_referenced(reply: &str) -> Vec<String> {
    let reply_lower = reply.to_lowercase();

    SOURCE_CATEGORIES
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|kw| reply_lower.contains(kw)))
        .map(|(category, _)| category.to_string())
        .collect()
}
