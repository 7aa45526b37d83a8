use std::collections::HashSet;

use tracing::debug;

use crate::connector::analyzer::import_patterns::extract_imports;
use crate::connector::analyzer::resolver::resolve;
use crate::domain::{DependencyGraph, SourceItem};

/// Builds the forward/reverse dependency graph over `items` (§4.3). Every
/// item becomes a node, whether or not it has resolvable imports, so BFS
/// expansion can start from any scanned path.
pub fn analyze(items: &[SourceItem]) -> DependencyGraph {
    let corpus: HashSet<String> = items.iter().map(|i| i.path().to_string()).collect();
    let mut graph = DependencyGraph::new();

    for item in items {
        graph.insert_node(item.path());
        let imports = extract_imports(item.content(), item.language());
        let resolved: Vec<String> = imports
            .iter()
            .filter_map(|import| resolve(import, item.path(), item.language(), &corpus))
            .collect();

        debug!(
            path = item.path(),
            imports = imports.len(),
            resolved = resolved.len(),
            "analyzed imports"
        );
        graph.insert_edges(item.path(), resolved);
    }

    graph
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Language;

    #[test]
    fn builds_graph_from_relative_imports() {
        let items = vec![
            SourceItem::new("a.py".to_string(), "import b\n".to_string(), Language::Python),
            SourceItem::new("b.py".to_string(), "x = 1\n".to_string(), Language::Python),
        ];
        let graph = analyze(&items);
        assert!(graph.forward("a.py").contains("b.py"));
        assert!(graph.reverse("b.py").contains("a.py"));
    }

    #[test]
    fn unresolved_imports_are_dropped_without_failing() {
        let items = vec![SourceItem::new(
            "a.py".to_string(),
            "import nonexistent_package\n".to_string(),
            Language::Python,
        )];
        let graph = analyze(&items);
        assert!(graph.forward("a.py").is_empty());
        assert!(graph.contains("a.py"));
    }

    #[test]
    fn every_edge_target_is_in_corpus() {
        let items = vec![
            SourceItem::new("a.py".to_string(), "from . import b\n".to_string(), Language::Python),
            SourceItem::new("b.py".to_string(), "".to_string(), Language::Python),
        ];
        let graph = analyze(&items);
        for target in graph.forward("a.py") {
            assert!(graph.contains(&target));
        }
    }
}
