use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::sections::identify_sections;

/// Text content extracted from an uploaded document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedDocument {
    /// Full rendered markdown text
    pub full_text: String,
    /// Pitch-deck sections identified by keyword scan
    pub sections: BTreeMap<String, String>,
    pub word_count: usize,
    /// The markdown result path does not report pages; always 0
    pub page_count: usize,
}

impl ExtractedDocument {
    pub fn from_markdown(full_text: String) -> Self {
        let sections = identify_sections(&full_text);
        let word_count = full_text.split_whitespace().count();

        Self {
            full_text,
            sections,
            word_count,
            page_count: 0,
        }
    }
}
