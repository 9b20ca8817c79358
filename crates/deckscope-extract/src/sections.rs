use std::collections::BTreeMap;

/// Section headers commonly found in pitch decks
const SECTION_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "company_overview",
        &[
            "company overview",
            "about us",
            "about the company",
            "introduction",
            "company profile",
            "who we are",
        ],
    ),
    (
        "business_model",
        &[
            "business model",
            "revenue model",
            "how we make money",
            "monetization",
            "business strategy",
        ],
    ),
    (
        "market_opportunity",
        &[
            "market opportunity",
            "market size",
            "tam",
            "total addressable market",
            "market analysis",
            "opportunity",
        ],
    ),
    (
        "financial_projections",
        &[
            "financial projections",
            "financials",
            "revenue projections",
            "financial forecast",
            "financial outlook",
            "p&l",
            "profit and loss",
        ],
    ),
    (
        "traction",
        &[
            "traction",
            "milestones",
            "achievements",
            "growth metrics",
            "customer acquisition",
            "user growth",
        ],
    ),
    (
        "team",
        &[
            "team",
            "leadership",
            "founders",
            "management team",
            "key personnel",
            "advisory board",
        ],
    ),
    (
        "funding",
        &[
            "funding",
            "investment",
            "capital requirements",
            "use of funds",
            "fundraising",
            "valuation",
        ],
    ),
    (
        "competitive_advantage",
        &[
            "competitive advantage",
            "differentiation",
            "moat",
            "unique value proposition",
            "competitive landscape",
            "competitive analysis",
        ],
    ),
];

/// Maximum lines captured per section before moving on
const SECTION_LINE_CAP: usize = 50;

/// Identify key pitch-deck sections in extracted text
///
/// Best-effort keyword scan: capture starts on a line matching one of the
/// section's keywords and stops at another section's keyword or the line
/// cap.
pub fn identify_sections(text: &str) -> BTreeMap<String, String> {
    let mut sections = BTreeMap::new();

    if text.is_empty() {
        return sections;
    }

    let lines: Vec<&str> = text.lines().collect();

    for (section_name, keywords) in SECTION_KEYWORDS {
        let mut content: Vec<&str> = Vec::new();
        let mut capturing = false;

        for line in &lines {
            let line_lower = line.trim().to_lowercase();

            if keywords.iter().any(|kw| line_lower.contains(kw)) {
                capturing = true;
                content = vec![line.trim()];
                continue;
            }

            if capturing && belongs_to_other_section(&line_lower, section_name) {
                break;
            }

            if capturing && !line.trim().is_empty() {
                content.push(line.trim());
                if content.len() > SECTION_LINE_CAP {
                    break;
                }
            }
        }

        if !content.is_empty() {
            sections.insert(section_name.to_string(), content.join("\n"));
        }
    }

    sections
}

fn belongs_to_other_section(line_lower: &str, current: &str) -> bool {
    SECTION_KEYWORDS
        .iter()
        .filter(|(name, _)| *name != current)
        .any(|(_, keywords)| keywords.iter().any(|kw| line_lower.contains(kw)))
}
