use crate::connector::chunker::patterns::{captured_name, patterns_for};
use crate::domain::{Chunk, ChunkType, SourceItem};

const SINGLE_CHUNK_LINE_LIMIT: usize = 200;
const FIXED_SLICE_SIZE: usize = 200;

/// Splits one [`SourceItem`] into [`Chunk`]s per §4.2.
///
/// Invariant preserved: the returned chunks' line ranges cover `[1, line_count]`
/// disjointly, in order.
pub fn chunk_file(item: &SourceItem) -> Vec<Chunk> {
    let lines: Vec<&str> = item.content().lines().collect();
    if lines.is_empty() {
        return Vec::new();
    }

    if lines.len() <= SINGLE_CHUNK_LINE_LIMIT {
        return vec![whole_file_chunk(item, &lines)];
    }

    let patterns = patterns_for(item.language());
    if patterns.is_empty() {
        return fixed_size_chunks(item, &lines);
    }

    let definitions = find_definitions(&lines, patterns);
    if definitions.is_empty() {
        return fixed_size_chunks(item, &lines);
    }

    definition_chunks(item, &lines, definitions)
}

struct Definition {
    line_idx: usize,
    chunk_type: ChunkType,
    name: Option<String>,
}

fn find_definitions(
    lines: &[&str],
    patterns: &[crate::connector::chunker::patterns::DefinitionPattern],
) -> Vec<Definition> {
    let mut found = Vec::new();
    for (idx, line) in lines.iter().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        for pattern in patterns {
            if let Some(caps) = pattern.regex.captures(trimmed) {
                found.push(Definition {
                    line_idx: idx,
                    chunk_type: pattern.chunk_type,
                    name: captured_name(&caps),
                });
                break;
            }
        }
    }
    found
}

fn definition_chunks(item: &SourceItem, lines: &[&str], definitions: Vec<Definition>) -> Vec<Chunk> {
    let mut chunks = Vec::with_capacity(definitions.len() + 1);

    if let Some(first) = definitions.first() {
        if first.line_idx > 0 {
            chunks.push(make_chunk(item, lines, 0, first.line_idx - 1, ChunkType::Header, None));
        }
    }

    for (i, def) in definitions.iter().enumerate() {
        let end = definitions
            .get(i + 1)
            .map(|next| next.line_idx - 1)
            .unwrap_or(lines.len() - 1);
        chunks.push(make_chunk(
            item,
            lines,
            def.line_idx,
            end,
            def.chunk_type,
            def.name.clone(),
        ));
    }

    chunks
}

fn fixed_size_chunks(item: &SourceItem, lines: &[&str]) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    let mut start = 0;
    while start < lines.len() {
        let end = (start + FIXED_SLICE_SIZE - 1).min(lines.len() - 1);
        chunks.push(make_chunk(item, lines, start, end, ChunkType::Section, None));
        start = end + 1;
    }
    chunks
}

fn whole_file_chunk(item: &SourceItem, lines: &[&str]) -> Chunk {
    make_chunk(item, lines, 0, lines.len() - 1, ChunkType::File, None)
}

fn make_chunk(
    item: &SourceItem,
    lines: &[&str],
    start_idx: usize,
    end_idx: usize,
    chunk_type: ChunkType,
    name: Option<String>,
) -> Chunk {
    let content = lines[start_idx..=end_idx].join("\n");
    Chunk::new(
        item.path().to_string(),
        content,
        start_idx + 1,
        end_idx + 1,
        chunk_type,
        name,
        item.language(),
    )
}
