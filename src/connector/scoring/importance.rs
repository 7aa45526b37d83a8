use crate::domain::DependencyGraph;

const SHORT_ENTRY_PREFIXES: &[&str] = &["main", "app", "index"];
const SRC_LIKE_SEGMENTS: &[&str] = &["src", "lib", "core", "api", "app", "server"];
const LOW_VALUE_SEGMENTS: &[&str] = &[
    "test", "tests", "spec", "specs", "examples", "docs", "scripts", "tools", "utils", "vendor",
    "migrations", "fixtures",
];
const MANIFEST_FILES: &[&str] = &[
    "cargo.toml",
    "package.json",
    "pyproject.toml",
    "go.mod",
    "pom.xml",
    "build.gradle",
];
const CONFIG_WHITELIST: &[&str] = &["package.json", "cargo.toml", "tsconfig.json", "pyproject.toml"];

/// Per-file static importance in [0, 1] from path heuristics (§4.4).
pub fn file_importance(path: &str) -> f32 {
    let lower = path.to_ascii_lowercase();
    let basename = lower.rsplit('/').next().unwrap_or(&lower).to_string();
    let segments: Vec<&str> = lower.split('/').collect();
    let depth = segments.len();

    let mut score: f32 = 0.5;

    if is_entry_point(&basename) || MANIFEST_FILES.contains(&basename.as_str()) {
        score += 0.3;
    }
    if SHORT_ENTRY_PREFIXES.iter().any(|p| basename.starts_with(p)) {
        score += 0.15;
    }
    if depth <= 3 && is_package_initializer(&basename) {
        score += 0.1;
    }
    if segments.iter().any(|s| SRC_LIKE_SEGMENTS.contains(s)) {
        score += 0.1;
    }
    if segments.iter().any(|s| LOW_VALUE_SEGMENTS.contains(s)) {
        score -= 0.2;
    }
    if depth > 5 {
        score -= 0.1 * (depth as f32 - 5.0);
    }
    if is_auxiliary_config(&basename) {
        score -= 0.1;
    }

    score.clamp(0.0, 1.0)
}

fn is_entry_point(basename: &str) -> bool {
    basename.starts_with("main.")
        || basename.starts_with("app.")
        || basename.starts_with("index.")
        || basename == "lib.rs"
        || basename.starts_with("readme.")
}

fn is_package_initializer(basename: &str) -> bool {
    basename == "__init__.py" || basename == "mod.rs" || basename.starts_with("index.")
}

fn is_auxiliary_config(basename: &str) -> bool {
    let is_config_ext = basename.ends_with(".json")
        || basename.ends_with(".yaml")
        || basename.ends_with(".yml");
    is_config_ext && !CONFIG_WHITELIST.contains(&basename)
}

/// Graph centrality in [0, 1] (§4.4). Zero for paths absent from the graph.
pub fn centrality(path: &str, graph: &DependencyGraph) -> f32 {
    if !graph.contains(path) {
        return 0.0;
    }
    let n = graph.node_count().max(1) as f32;
    let in_degree = graph.in_degree(path) as f32;
    let out_degree = graph.out_degree(path) as f32;
    ((2.0 * in_degree + out_degree) / (3.0 * n)).min(1.0)
}

/// Composite per-chunk importance (§4.4): `0.7 * file_importance + 0.3 * centrality`.
pub fn composite_importance(path: &str, graph: &DependencyGraph) -> f32 {
    0.7 * file_importance(path) + 0.3 * centrality(path, graph)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_point_boosts_score() {
        assert!(file_importance("main.rs") > file_importance("helper.rs"));
    }

    #[test]
    fn test_directory_is_penalized() {
        assert!(file_importance("tests/foo.rs") < file_importance("src/foo.rs"));
    }

    #[test]
    fn deep_paths_are_penalized() {
        let deep = file_importance("a/b/c/d/e/f/g/h.rs");
        let shallow = file_importance("src/h.rs");
        assert!(deep < shallow);
    }

    #[test]
    fn score_is_clamped() {
        assert!(file_importance("main.rs") <= 1.0);
        assert!(file_importance("a/b/c/d/e/f/g/h/i/j/tests/vendor/x.rs") >= 0.0);
    }

    #[test]
    fn package_initializer_bonus_is_not_given_to_plain_shallow_files() {
        assert!(file_importance("src/a/__init__.py") > file_importance("src/a/helper.py"));
    }

    #[test]
    fn centrality_zero_for_unknown_path() {
        let graph = DependencyGraph::new();
        assert_eq!(centrality("missing.py", &graph), 0.0);
    }

    #[test]
    fn centrality_reflects_in_and_out_degree() {
        let mut graph = DependencyGraph::new();
        graph.insert_edges("a.py", ["b.py".to_string()]);
        let c = centrality("b.py", &graph);
        assert!(c > 0.0);
    }
}
