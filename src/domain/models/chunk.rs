use serde::{Deserialize, Serialize};

use super::Language;

/// The kind of boundary a [`Chunk`] was cut on (§3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChunkType {
    File,
    Header,
    Function,
    Class,
    Struct,
    Interface,
    Trait,
    Impl,
    Enum,
    Type,
    Section,
}

impl ChunkType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChunkType::File => "file",
            ChunkType::Header => "header",
            ChunkType::Function => "function",
            ChunkType::Class => "class",
            ChunkType::Struct => "struct",
            ChunkType::Interface => "interface",
            ChunkType::Trait => "trait",
            ChunkType::Impl => "impl",
            ChunkType::Enum => "enum",
            ChunkType::Type => "type",
            ChunkType::Section => "section",
        }
    }
}

impl std::fmt::Display for ChunkType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A contiguous line range of a [`SourceItem`](super::SourceItem), the unit the rankers
/// score and the selector budgets over (§3).
///
/// Invariant: `1 <= start_line <= end_line`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    path: String,
    content: String,
    start_line: usize,
    end_line: usize,
    chunk_type: ChunkType,
    name: Option<String>,
    language: Language,
}

impl Chunk {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        path: String,
        content: String,
        start_line: usize,
        end_line: usize,
        chunk_type: ChunkType,
        name: Option<String>,
        language: Language,
    ) -> Self {
        debug_assert!(start_line >= 1 && start_line <= end_line);
        Self {
            path,
            content,
            start_line,
            end_line,
            chunk_type,
            name,
            language,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn start_line(&self) -> usize {
        self.start_line
    }

    pub fn end_line(&self) -> usize {
        self.end_line
    }

    pub fn chunk_type(&self) -> ChunkType {
        self.chunk_type
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn line_count(&self) -> usize {
        self.end_line - self.start_line + 1
    }

    /// Structural key used to correlate the same chunk across ranking stages,
    /// rather than the dynamic `path + str(start_line)` concatenation the
    /// original implementation used (§9).
    pub fn key(&self) -> (String, usize, usize) {
        (self.path.clone(), self.start_line, self.end_line)
    }

    pub fn is_documentation(&self) -> bool {
        let path = self.path.to_ascii_lowercase();
        path.ends_with(".md") || path.ends_with(".mdx") || path.ends_with(".txt") || path.ends_with(".rst")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(path: &str) -> Chunk {
        Chunk::new(
            path.to_string(),
            "fn f() {}".to_string(),
            10,
            12,
            ChunkType::Function,
            Some("f".to_string()),
            Language::Rust,
        )
    }

    #[test]
    fn line_count_is_inclusive() {
        let c = sample("src/lib.rs");
        assert_eq!(c.line_count(), 3);
    }

    #[test]
    fn key_is_structural() {
        let c = sample("src/lib.rs");
        assert_eq!(c.key(), ("src/lib.rs".to_string(), 10, 12));
    }

    #[test]
    fn documentation_detection() {
        assert!(sample("docs/intro.md").is_documentation());
        assert!(!sample("src/lib.rs").is_documentation());
    }
}
