use std::collections::HashSet;

use crate::domain::{ImportInfo, Language};

/// Resolves one [`ImportInfo`] to a corpus-relative path, or `None` if it
/// can't be resolved (§4.3). `source_path` is the importing file's own path,
/// used to anchor relative imports.
pub fn resolve(
    import: &ImportInfo,
    source_path: &str,
    language: Language,
    corpus: &HashSet<String>,
) -> Option<String> {
    match language {
        Language::Python => resolve_python(import, source_path, corpus),
        Language::JavaScript | Language::TypeScript => resolve_js(import, source_path, corpus),
        _ => None,
    }
}

fn resolve_python(import: &ImportInfo, source_path: &str, corpus: &HashSet<String>) -> Option<String> {
    let module_path = import.module().replace('.', "/");
    if module_path.is_empty() {
        return None;
    }

    let base = if import.is_relative() {
        let parent = parent_dir(source_path);
        join(&parent, &module_path)
    } else {
        module_path
    };

    for candidate in [format!("{base}.py"), format!("{base}/__init__.py")] {
        if corpus.contains(&candidate) {
            return Some(candidate);
        }
    }
    None
}

fn resolve_js(import: &ImportInfo, source_path: &str, corpus: &HashSet<String>) -> Option<String> {
    if !import.is_relative() {
        return None;
    }

    let parent = parent_dir(source_path);
    let base = join(&parent, import.module());

    for ext in [".ts", ".tsx", ".js", ".jsx"] {
        let candidate = format!("{base}{ext}");
        if corpus.contains(&candidate) {
            return Some(candidate);
        }
    }
    for index in ["index.ts", "index.js"] {
        let candidate = format!("{base}/{index}");
        if corpus.contains(&candidate) {
            return Some(candidate);
        }
    }
    None
}

fn parent_dir(path: &str) -> String {
    match path.rfind('/') {
        Some(idx) => path[..idx].to_string(),
        None => String::new(),
    }
}

/// Joins `base` and `relative` (which may start with `./` or `../`
/// segments) and normalizes the result, dropping `.`/`..` components.
fn join(base: &str, relative: &str) -> String {
    let mut segments: Vec<&str> = if base.is_empty() {
        Vec::new()
    } else {
        base.split('/').collect()
    };

    for part in relative.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    segments.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus(paths: &[&str]) -> HashSet<String> {
        paths.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn python_absolute_module_resolves_to_file() {
        let corpus = corpus(&["pkg/util.py"]);
        let import = ImportInfo::new("pkg.util", false);
        let resolved = resolve_python(&import, "main.py", &corpus);
        assert_eq!(resolved.as_deref(), Some("pkg/util.py"));
    }

    #[test]
    fn python_absolute_module_resolves_to_package_init() {
        let corpus = corpus(&["pkg/util/__init__.py"]);
        let import = ImportInfo::new("pkg.util", false);
        let resolved = resolve_python(&import, "main.py", &corpus);
        assert_eq!(resolved.as_deref(), Some("pkg/util/__init__.py"));
    }

    #[test]
    fn python_relative_anchors_to_parent() {
        let corpus = corpus(&["pkg/helpers.py"]);
        let import = ImportInfo::new("helpers", true);
        let resolved = resolve_python(&import, "pkg/main.py", &corpus);
        assert_eq!(resolved.as_deref(), Some("pkg/helpers.py"));
    }

    #[test]
    fn js_relative_resolves_with_extension() {
        let corpus = corpus(&["src/bar.ts"]);
        let import = ImportInfo::new("./bar", true);
        let resolved = resolve_js(&import, "src/foo.ts", &corpus);
        assert_eq!(resolved.as_deref(), Some("src/bar.ts"));
    }

    #[test]
    fn js_relative_resolves_to_index() {
        let corpus = corpus(&["src/widgets/index.ts"]);
        let import = ImportInfo::new("./widgets", true);
        let resolved = resolve_js(&import, "src/app.ts", &corpus);
        assert_eq!(resolved.as_deref(), Some("src/widgets/index.ts"));
    }

    #[test]
    fn js_package_dependency_is_unresolved() {
        let corpus = corpus(&["src/bar.ts"]);
        let import = ImportInfo::new("react", false);
        assert!(resolve_js(&import, "src/foo.ts", &corpus).is_none());
    }

    #[test]
    fn join_normalizes_parent_traversal() {
        assert_eq!(join("pkg/sub", "../helpers"), "pkg/helpers");
    }
}
