use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::{ChunkType, Language};

/// One definition-boundary pattern: matches a trimmed source line, capturing
/// the defined symbol's name in the first non-modifier group (§4.2).
pub struct DefinitionPattern {
    pub regex: Regex,
    pub chunk_type: ChunkType,
}

const MODIFIER_KEYWORDS: &[&str] = &["async", "export", "pub", "public", "static", "abstract"];

/// Returns the definition patterns for `language`, or an empty slice when the
/// language has no definition-pattern table (§4.2) — callers fall back to
/// fixed-size slicing in that case.
pub fn patterns_for(language: Language) -> &'static [DefinitionPattern] {
    match language {
        Language::Python => &PYTHON_PATTERNS,
        Language::JavaScript => &JS_PATTERNS,
        Language::TypeScript => &JS_PATTERNS,
        Language::Go => &GO_PATTERNS,
        Language::Rust => &RUST_PATTERNS,
        Language::Ruby => &RUBY_PATTERNS,
        Language::Java => &JAVA_PATTERNS,
        Language::C => &C_PATTERNS,
        Language::Cpp => &C_PATTERNS,
        _ => &[],
    }
}

/// Extracts the captured identifier from a match, skipping a leading modifier
/// keyword capture when present (§4.2).
pub fn captured_name(caps: &regex::Captures) -> Option<String> {
    for i in 1..caps.len() {
        if let Some(m) = caps.get(i) {
            let text = m.as_str();
            if MODIFIER_KEYWORDS.contains(&text.trim()) {
                continue;
            }
            return Some(text.to_string());
        }
    }
    None
}

macro_rules! pattern_table {
    ($name:ident, [$(($re:expr, $kind:expr)),+ $(,)?]) => {
        static $name: Lazy<Vec<DefinitionPattern>> = Lazy::new(|| {
            vec![$(
                DefinitionPattern {
                    regex: Regex::new($re).expect("static pattern compiles"),
                    chunk_type: $kind,
                },
            )+]
        });
    };
}

pattern_table!(
    PYTHON_PATTERNS,
    [
        (r"^(async\s+)?def\s+(\w+)\s*\(", ChunkType::Function),
        (r"^class\s+(\w+)\s*[:(]", ChunkType::Class),
    ]
);

pattern_table!(
    JS_PATTERNS,
    [
        (
            r"^(export\s+)?(async\s+)?function\s*\*?\s+(\w+)\s*\(",
            ChunkType::Function
        ),
        (r"^(export\s+)?class\s+(\w+)", ChunkType::Class),
        (
            r"^(export\s+)?const\s+(\w+)\s*=\s*(?:async\s*)?\(.*\)\s*=>",
            ChunkType::Function
        ),
        (r"^(export\s+)?interface\s+(\w+)", ChunkType::Interface),
        (r"^(export\s+)?type\s+(\w+)\s*=", ChunkType::Type),
        (r"^(export\s+)?enum\s+(\w+)", ChunkType::Enum),
    ]
);

pattern_table!(
    GO_PATTERNS,
    [
        (r"^func\s+(?:\([^)]*\)\s*)?(\w+)\s*\(", ChunkType::Function),
        (r"^type\s+(\w+)\s+struct\b", ChunkType::Struct),
        (r"^type\s+(\w+)\s+interface\b", ChunkType::Interface),
        (r"^type\s+(\w+)\s+", ChunkType::Type),
    ]
);

pattern_table!(
    RUST_PATTERNS,
    [
        (r"^(pub(?:\([^)]*\))?\s+)?(async\s+)?fn\s+(\w+)", ChunkType::Function),
        (r"^(pub(?:\([^)]*\))?\s+)?struct\s+(\w+)", ChunkType::Struct),
        (r"^(pub(?:\([^)]*\))?\s+)?enum\s+(\w+)", ChunkType::Enum),
        (r"^(pub(?:\([^)]*\))?\s+)?trait\s+(\w+)", ChunkType::Trait),
        (r"^impl(?:<[^>]*>)?\s+(?:\w+\s+for\s+)?(\w+)", ChunkType::Impl),
        (r"^(pub(?:\([^)]*\))?\s+)?type\s+(\w+)", ChunkType::Type),
    ]
);

pattern_table!(
    RUBY_PATTERNS,
    [
        (r"^def\s+(?:self\.)?(\w+[?!=]?)", ChunkType::Function),
        (r"^class\s+(\w+)", ChunkType::Class),
        (r"^module\s+(\w+)", ChunkType::Class),
    ]
);

pattern_table!(
    JAVA_PATTERNS,
    [
        (
            r"^(?:public|private|protected)?\s*(?:static\s+)?(?:final\s+)?class\s+(\w+)",
            ChunkType::Class
        ),
        (
            r"^(?:public|private|protected)?\s*interface\s+(\w+)",
            ChunkType::Interface
        ),
        (r"^(?:public|private|protected)?\s*enum\s+(\w+)", ChunkType::Enum),
    ]
);

pattern_table!(
    C_PATTERNS,
    [
        (r"^struct\s+(\w+)\s*\{?", ChunkType::Struct),
        (r"^class\s+(\w+)", ChunkType::Class),
        (r"^enum\s+(\w+)\s*\{?", ChunkType::Enum),
        (
            r"^(?:[\w:\*&<>, ]+?)\s+(\w+)\s*\([^;]*\)\s*\{",
            ChunkType::Function
        ),
    ]
);
