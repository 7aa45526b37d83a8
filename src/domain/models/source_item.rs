use serde::{Deserialize, Serialize};

use super::Language;

/// One readable text file produced by the Scanner (§3). Immutable once built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceItem {
    path: String,
    content: String,
    language: Language,
}

impl SourceItem {
    /// `path` must already be forward-slash normalized and relative to the scan root.
    pub fn new(path: String, content: String, language: Language) -> Self {
        Self {
            path,
            content,
            language,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn line_count(&self) -> usize {
        if self.content.is_empty() {
            0
        } else {
            self.content.lines().count()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_count_matches_lines() {
        let item = SourceItem::new(
            "a.py".to_string(),
            "one\ntwo\nthree".to_string(),
            Language::Python,
        );
        assert_eq!(item.line_count(), 3);
    }

    #[test]
    fn empty_content_has_zero_lines() {
        let item = SourceItem::new("empty.py".to_string(), String::new(), Language::Python);
        assert_eq!(item.line_count(), 0);
    }
}
