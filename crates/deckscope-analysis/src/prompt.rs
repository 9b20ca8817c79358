use deckscope_extract::ExtractedDocument;

use crate::criteria::CRITERIA;

const ANALYSIS_PROMPT_TEMPLATE: &str = r#"You are an IPO readiness analyst reviewing a company pitch deck.

Document: <filename>

## Extracted content
<full_text>

## Identified sections
<sections>

Evaluate the company against each of the following criteria, scoring each from 0 to 10 with a brief rationale, key strengths, and weaknesses:

<criteria>

Then provide:
- company metadata (name, industry, founding year, stage, employee count) where identifiable
- an overall IPO readiness score from 0 to 100
- an executive summary with overall assessment, key highlights, critical gaps, and a recommendation on IPO timing
- a risk assessment (key risks, information gaps, overall risk level: Low, Medium, or High)
- follow-up questions and priority areas for the next meeting
- key financial highlights found in the document
- an assessment of competitive positioning
- a confidence score from 0 to 1 reflecting how complete the available information is"#;

/// Render the analysis prompt for a parsed document
pub(crate) fn render_analysis_prompt(document: &ExtractedDocument, filename: &str) -> String {
    let criteria_block = CRITERIA
        .iter()
        .map(|c| format!("- {}: {}", c.name, c.description))
        .collect::<Vec<_>>()
        .join("\n");

    let sections_block = if document.sections.is_empty() {
        "(none identified)".to_string()
    } else {
        document
            .sections
            .iter()
            .map(|(name, body)| format!("### {}\n{}", name, body))
            .collect::<Vec<_>>()
            .join("\n\n")
    };

    ANALYSIS_PROMPT_TEMPLATE
        .replace("<filename>", filename)
        .replace("<full_text>", &document.full_text)
        .replace("<sections>", &sections_block)
        .replace("<criteria>", &criteria_block)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_includes_document_and_criteria() {
        let document = ExtractedDocument::from_markdown("Our traction is strong.".to_string());
        let prompt = render_analysis_prompt(&document, "deck.pdf");

        assert!(prompt.contains("deck.pdf"));
        assert!(prompt.contains("Our traction is strong."));
        assert!(prompt.contains("Basic Company Info"));
        assert!(prompt.contains("Key Risks & Information Gaps"));
        assert!(!prompt.contains("<full_text>"));
    }
}
