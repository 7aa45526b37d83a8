use std::collections::{HashMap, HashSet};

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use serde::{Deserialize, Serialize};

/// A single import reference extracted from a file (§3). Lifetime bound to one
/// Dependency Analyzer pass; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportInfo {
    module: String,
    is_relative: bool,
}

impl ImportInfo {
    pub fn new(module: impl Into<String>, is_relative: bool) -> Self {
        Self {
            module: module.into(),
            is_relative,
        }
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn is_relative(&self) -> bool {
        self.is_relative
    }
}

/// Forward/reverse import graph over the scanned corpus (§3, §4.3).
///
/// Invariant: every key and every edge target is a path present in the corpus —
/// callers must only feed [`DependencyGraph::insert_edges`] already-resolved,
/// in-corpus paths. Unresolved imports never reach the graph.
#[derive(Debug, Default)]
pub struct DependencyGraph {
    graph: DiGraph<String, ()>,
    index: HashMap<String, NodeIndex>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_node(&mut self, path: &str) -> NodeIndex {
        if let Some(&idx) = self.index.get(path) {
            return idx;
        }
        let idx = self.graph.add_node(path.to_string());
        self.index.insert(path.to_string(), idx);
        idx
    }

    /// Records that `from` imports each of `targets`. Both `from` and every
    /// target become nodes even if one side has no further edges, so a leaf
    /// file with no outgoing imports still participates in BFS expansion.
    pub fn insert_edges(&mut self, from: &str, targets: impl IntoIterator<Item = String>) {
        let from_idx = self.ensure_node(from);
        for target in targets {
            let target_idx = self.ensure_node(&target);
            self.graph.update_edge(from_idx, target_idx, ());
        }
    }

    /// Ensures a path participates in the graph (as an isolated node) even
    /// when it has no resolved imports and nothing imports it.
    pub fn insert_node(&mut self, path: &str) {
        self.ensure_node(path);
    }

    pub fn contains(&self, path: &str) -> bool {
        self.index.contains_key(path)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn forward(&self, path: &str) -> HashSet<String> {
        self.neighbors(path, Direction::Outgoing)
    }

    pub fn reverse(&self, path: &str) -> HashSet<String> {
        self.neighbors(path, Direction::Incoming)
    }

    fn neighbors(&self, path: &str, direction: Direction) -> HashSet<String> {
        match self.index.get(path) {
            Some(&idx) => self
                .graph
                .neighbors_directed(idx, direction)
                .map(|n| self.graph[n].clone())
                .collect(),
            None => HashSet::new(),
        }
    }

    pub fn in_degree(&self, path: &str) -> usize {
        match self.index.get(path) {
            Some(&idx) => self.graph.neighbors_directed(idx, Direction::Incoming).count(),
            None => 0,
        }
    }

    pub fn out_degree(&self, path: &str) -> usize {
        match self.index.get(path) {
            Some(&idx) => self.graph.neighbors_directed(idx, Direction::Outgoing).count(),
            None => 0,
        }
    }

    /// BFS over the union of forward and reverse edges, `depth` rounds from `seeds`,
    /// returning the transitive closure minus the seeds themselves (§4.3's
    /// related-file expansion, feeding the Budgeted Selector's expansion pass).
    ///
    /// Cycles need no special handling beyond the visited set (§9).
    pub fn related(&self, seeds: &HashSet<String>, depth: usize) -> HashSet<String> {
        let mut visited: HashSet<String> = seeds.clone();
        let mut frontier: Vec<String> = seeds.iter().cloned().collect();

        for _ in 0..depth {
            let mut next = Vec::new();
            for path in &frontier {
                if let Some(&idx) = self.index.get(path) {
                    let neighbors = self
                        .graph
                        .neighbors_directed(idx, Direction::Outgoing)
                        .chain(self.graph.neighbors_directed(idx, Direction::Incoming));
                    for neighbor in neighbors {
                        let npath = self.graph[neighbor].clone();
                        if visited.insert(npath.clone()) {
                            next.push(npath);
                        }
                    }
                }
            }
            if next.is_empty() {
                break;
            }
            frontier = next;
        }

        for seed in seeds {
            visited.remove(seed);
        }
        visited
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn related_expands_one_hop() {
        let mut graph = DependencyGraph::new();
        graph.insert_edges("a.py", ["b.py".to_string()]);
        graph.insert_node("b.py");

        let seeds: HashSet<String> = ["a.py".to_string()].into_iter().collect();
        let related = graph.related(&seeds, 1);

        assert_eq!(related, ["b.py".to_string()].into_iter().collect());
    }

    #[test]
    fn related_respects_depth_zero() {
        let mut graph = DependencyGraph::new();
        graph.insert_edges("a.py", ["b.py".to_string()]);

        let seeds: HashSet<String> = ["a.py".to_string()].into_iter().collect();
        assert!(graph.related(&seeds, 0).is_empty());
    }

    #[test]
    fn related_tolerates_cycles() {
        let mut graph = DependencyGraph::new();
        graph.insert_edges("a.py", ["b.py".to_string()]);
        graph.insert_edges("b.py", ["a.py".to_string()]);

        let seeds: HashSet<String> = ["a.py".to_string()].into_iter().collect();
        let related = graph.related(&seeds, 5);

        assert_eq!(related, ["b.py".to_string()].into_iter().collect());
    }

    #[test]
    fn centrality_inputs_reflect_edges() {
        let mut graph = DependencyGraph::new();
        graph.insert_edges("a.py", ["b.py".to_string(), "c.py".to_string()]);
        graph.insert_edges("b.py", ["c.py".to_string()]);

        assert_eq!(graph.out_degree("a.py"), 2);
        assert_eq!(graph.in_degree("c.py"), 2);
        assert_eq!(graph.node_count(), 3);
    }

    #[test]
    fn unknown_path_has_no_neighbors() {
        let graph = DependencyGraph::new();
        assert!(graph.forward("missing.py").is_empty());
        assert_eq!(graph.in_degree("missing.py"), 0);
    }
}
