use crate::domain::{Chunk, ContextResult};

/// Renders a [`ContextResult`] as XML per §6:
/// `<file path="…" [name="…" type="…"] lines="S-E" [language="…"]>` wrapping
/// the raw content directly, chunks separated by a blank line.
pub fn render(result: &ContextResult) -> String {
    result
        .chunks()
        .iter()
        .map(|scored| render_chunk(scored.chunk()))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn render_chunk(chunk: &Chunk) -> String {
    let mut attrs = format!("path=\"{}\"", escape(chunk.path()));
    if let Some(name) = chunk.name() {
        attrs.push_str(&format!(" name=\"{}\"", escape(name)));
        attrs.push_str(&format!(" type=\"{}\"", chunk.chunk_type()));
    }
    attrs.push_str(&format!(" lines=\"{}-{}\"", chunk.start_line(), chunk.end_line()));
    attrs.push_str(&format!(" language=\"{}\"", chunk.language()));

    format!("<file {attrs}>\n{}\n</file>", escape(chunk.content()))
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ChunkType, Language, ScanStats, ScoredChunk};

    #[test]
    fn renders_attributes_and_content() {
        let chunk = Chunk::new(
            "src/lib.rs".to_string(),
            "fn main() {}".to_string(),
            1,
            1,
            ChunkType::Function,
            Some("main".to_string()),
            Language::Rust,
        );
        let result = ContextResult::new(
            "q".to_string(),
            vec![ScoredChunk::new(chunk, 1.0)],
            10,
            100,
            1,
            1,
            0,
            ScanStats::default(),
        );
        let xml = render(&result);
        assert!(xml.contains(r#"path="src/lib.rs""#));
        assert!(xml.contains(r#"name="main""#));
        assert!(xml.contains(r#"type="function""#));
        assert!(xml.contains("<file path=\"src/lib.rs\" name=\"main\" type=\"function\" lines=\"1-1\" language=\"rust\">\nfn main() {}\n</file>"));
    }

    #[test]
    fn escapes_special_characters_in_content() {
        let chunk = Chunk::new(
            "a.html".to_string(),
            "<div>&\"</div>".to_string(),
            1,
            1,
            ChunkType::File,
            None,
            Language::Unknown,
        );
        let result = ContextResult::new(
            "q".to_string(),
            vec![ScoredChunk::new(chunk, 1.0)],
            1,
            100,
            1,
            1,
            0,
            ScanStats::default(),
        );
        let xml = render(&result);
        assert!(xml.contains("&lt;div&gt;&amp;&quot;&lt;/div&gt;"));
    }
}
