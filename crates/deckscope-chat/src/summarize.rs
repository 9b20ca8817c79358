use chrono::Utc;

use crate::models::ConversationSummary;

pub(crate) const SUMMARIZATION_PROMPT_TEMPLATE: &str = r#"Please analyze the following conversation about <company_name>'s IPO readiness analysis and create a concise summary:

<conversation>

Extract:
1. Key topics discussed (max 5)
2. Important questions asked by the user (max 5)
3. Key insights shared (max 5)
4. Main user concerns or focus areas (max 5)
5. A concise summary paragraph (max 150 words)

Provide the response in a structured format."#;

/// Fixed text stored when the summarization call itself fails
pub(crate) const SUMMARY_UNAVAILABLE: &str = "Summary unavailable due to processing error";

/// Fixed text used when parsing finds no summary paragraph
const SUMMARY_TEXT_MISSING: &str = "Conversation summary unavailable";

const MAX_SECTION_ITEMS: usize = 5;

/// Lines starting with one of these terminate section collection
const SECTION_STOP_WORDS: &[&str] = &["Key", "Important", "Main", "Summary"];

/// The summary paragraph additionally runs until one of these
const SUMMARY_STOP_WORDS: &[&str] = &["Key", "Important", "Main"];

/// Parse the model's free-text summary reply into a summary object
///
/// Best-effort heuristic over unstructured text; format drift upstream can
/// silently empty any field.
pub(crate) fn parse_summary_response(response: &str) -> ConversationSummary {
    ConversationSummary {
        key_topics: extract_list(response, "Key topics"),
        important_questions: extract_list(response, "Important questions"),
        key_insights: extract_list(response, "Key insights"),
        user_concerns: extract_list(response, "user concerns"),
        summary_text: extract_summary(response),
        last_updated: Utc::now(),
    }
}

/// Summary substituted when the LLM call fails outright
pub(crate) fn unavailable_summary() -> ConversationSummary {
    ConversationSummary {
        key_topics: Vec::new(),
        important_questions: Vec::new(),
        key_insights: Vec::new(),
        user_concerns: Vec::new(),
        summary_text: SUMMARY_UNAVAILABLE.to_string(),
        last_updated: Utc::now(),
    }
}

/// Collect list items under the line containing `section`
///
/// Blank lines are skipped; a stop-word line or any other non-list line
/// ends the section. Capped at 5 items.
pub(crate) fn extract_list(response: &str, section: &str) -> Vec<String> {
    let section_lower = section.to_lowercase();
    let mut items = Vec::new();
    let mut in_section = false;

    for line in response.lines() {
        if !in_section {
            if line.to_lowercase().contains(&section_lower) {
                in_section = true;
            }
            continue;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if starts_with_any(trimmed, SECTION_STOP_WORDS) {
            break;
        }
        match strip_list_decoration(trimmed) {
            Some(item) => {
                // A decorated but empty line is skipped, not a terminator
                if !item.is_empty() {
                    items.push(item.to_string());
                }
            }
            None => break,
        }
    }

    items.truncate(MAX_SECTION_ITEMS);
    items
}

/// Extract the summary paragraph following a "summary:" line
pub(crate) fn extract_summary(response: &str) -> String {
    let mut summary_lines: Vec<&str> = Vec::new();
    let mut in_summary = false;

    for line in response.lines() {
        if !in_summary {
            if line.to_lowercase().contains("summary") && line.contains(':') {
                in_summary = true;
                if let Some((_, rest)) = line.split_once(':') {
                    let rest = rest.trim();
                    if !rest.is_empty() {
                        summary_lines.push(rest);
                    }
                }
            }
            continue;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if starts_with_any(trimmed, SUMMARY_STOP_WORDS) {
            break;
        }
        summary_lines.push(trimmed);
    }

    let summary = summary_lines.join(" ");
    if summary.trim().is_empty() {
        SUMMARY_TEXT_MISSING.to_string()
    } else {
        summary
    }
}

fn starts_with_any(line: &str, prefixes: &[&str]) -> bool {
    prefixes.iter().any(|prefix| line.starts_with(prefix))
}

/// Strip leading bullet/number decoration from a list line
///
/// Returns None when the line does not look like a list item.
fn strip_list_decoration(line: &str) -> Option<&str> {
    let is_numbered = line
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_digit())
        && line
            .trim_start_matches(|c: char| c.is_ascii_digit())
            .starts_with('.');

    if !is_numbered && !line.starts_with(['-', '•', '*']) {
        return None;
    }

    Some(line.trim_start_matches(['-', '•', '*', '.', ' ', '0', '1', '2', '3', '4', '5', '6', '7', '8', '9']))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_list_two_sections() {
        let response = "Key topics:\n- Alpha\n- Beta\nImportant questions:\n- Gamma";

        assert_eq!(extract_list(response, "Key topics"), vec!["Alpha", "Beta"]);
        assert_eq!(extract_list(response, "Important questions"), vec!["Gamma"]);
    }

    #[test]
    fn test_extract_list_numbered_and_bulleted() {
        let response = "Key insights:\n1. First insight\n• Second insight\n* Third insight";

        assert_eq!(
            extract_list(response, "Key insights"),
            vec!["First insight", "Second insight", "Third insight"]
        );
    }

    #[test]
    fn test_extract_list_stops_at_plain_line() {
        let response = "Key topics:\n- Alpha\nThat is all.\n- Beta";

        assert_eq!(extract_list(response, "Key topics"), vec!["Alpha"]);
    }

    #[test]
    fn test_extract_list_skips_blank_lines() {
        let response = "Key topics:\n\n- Alpha\n\n- Beta";

        assert_eq!(extract_list(response, "Key topics"), vec!["Alpha", "Beta"]);
    }

    #[test]
    fn test_extract_list_caps_at_five() {
        let response = "Key topics:\n- a\n- b\n- c\n- d\n- e\n- f\n- g";

        assert_eq!(extract_list(response, "Key topics").len(), 5);
    }

    #[test]
    fn test_extract_list_missing_section() {
        assert!(extract_list("No sections here", "Key topics").is_empty());
    }

    #[test]
    fn test_extract_summary_same_line() {
        let response = "Summary: Everything went well.";

        assert_eq!(extract_summary(response), "Everything went well.");
    }

    #[test]
    fn test_extract_summary_multi_line() {
        let response = "Summary:\nThe user asked about revenue.\nRisks were discussed.\nKey topics:\n- Alpha";

        assert_eq!(
            extract_summary(response),
            "The user asked about revenue. Risks were discussed."
        );
    }

    #[test]
    fn test_extract_summary_missing() {
        assert_eq!(extract_summary("no such section"), "Conversation summary unavailable");
    }

    #[test]
    fn test_parse_summary_response_full() {
        let response = "Key topics:\n- Revenue\nImportant questions:\n- When to IPO?\nKey insights:\n- Strong margins\nMain user concerns:\n- Dilution\nSummary: A focused discussion.";

        let summary = parse_summary_response(response);

        assert_eq!(summary.key_topics, vec!["Revenue"]);
        assert_eq!(summary.important_questions, vec!["When to IPO?"]);
        assert_eq!(summary.key_insights, vec!["Strong margins"]);
        assert_eq!(summary.user_concerns, vec!["Dilution"]);
        assert_eq!(summary.summary_text, "A focused discussion.");
    }

    #[test]
    fn test_unavailable_summary() {
        let summary = unavailable_summary();

        assert_eq!(summary.summary_text, SUMMARY_UNAVAILABLE);
        assert!(summary.key_topics.is_empty());
    }
}
