use crate::domain::ContextResult;

/// Renders a [`ContextResult`] as Markdown per §6: chunks joined by a `---`
/// rule, each headed by its path/line-range/type-and-name, a blank line, then
/// a fenced code block labeled with the language tag.
pub fn render(result: &ContextResult) -> String {
    result
        .chunks()
        .iter()
        .map(|scored| render_chunk(scored.chunk()))
        .collect::<Vec<_>>()
        .join("\n\n---\n\n")
}

fn render_chunk(chunk: &crate::domain::Chunk) -> String {
    let mut header = format!(
        "## {}:L{}-{}",
        chunk.path(),
        chunk.start_line(),
        chunk.end_line()
    );
    if let Some(name) = chunk.name() {
        header.push_str(&format!(" ({}: {})", chunk.chunk_type(), name));
    }

    format!("{header}\n\n```{}\n{}\n```", chunk.language(), chunk.content())
}
