use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::{ImportInfo, Language};

static PY_FROM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*from\s+(\.*)(\S*)\s+import\s+(.*)").unwrap());
static PY_IMPORT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*import\s+([\w.]+)").unwrap());

static JS_IMPORT_FROM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^\s*import\s+.*\s+from\s+["']([^"']+)["']"#).unwrap());
static JS_BARE_IMPORT: Lazy<Regex> = Lazy::new(|| Regex::new(r#"^\s*import\s+["']([^"']+)["']"#).unwrap());
static JS_REQUIRE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"require\(\s*["']([^"']+)["']\s*\)"#).unwrap());

static GO_SINGLE_IMPORT: Lazy<Regex> = Lazy::new(|| Regex::new(r#"^\s*import\s+"([^"]+)""#).unwrap());
static GO_BLOCK_ENTRY: Lazy<Regex> = Lazy::new(|| Regex::new(r#"^\s*(?:\w+\s+)?"([^"]+)"\s*$"#).unwrap());

static RUST_USE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*(?:pub\s+)?use\s+([\w:]+)").unwrap());
static RUST_MOD: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*(?:pub\s+)?mod\s+(\w+)\s*;").unwrap());

/// Extracts [`ImportInfo`] from one file's content by the per-language line
/// patterns of §4.3. Languages with no entry here yield no imports — the
/// analyzer never fails, it simply finds nothing to resolve.
pub fn extract_imports(content: &str, language: Language) -> Vec<ImportInfo> {
    match language {
        Language::Python => extract_python(content),
        Language::JavaScript | Language::TypeScript => extract_js(content),
        Language::Go => extract_go(content),
        Language::Rust => extract_rust(content),
        _ => Vec::new(),
    }
}

fn extract_python(content: &str) -> Vec<ImportInfo> {
    let mut out = Vec::new();
    for line in content.lines() {
        if let Some(caps) = PY_FROM.captures(line) {
            let dots = caps.get(1).map(|m| m.as_str()).unwrap_or("");
            let module = caps.get(2).map(|m| m.as_str()).unwrap_or("");
            let is_relative = !dots.is_empty();
            if module.is_empty() && is_relative {
                // `from . import name[, name2, ...]` — the first imported
                // name doubles as the submodule to resolve (§4.3).
                let names = caps.get(3).map(|m| m.as_str()).unwrap_or("");
                if let Some(first) = names.split(',').next() {
                    let name = first.trim().split(" as ").next().unwrap_or("").trim();
                    if !name.is_empty() {
                        out.push(ImportInfo::new(name.to_string(), true));
                    }
                }
            } else {
                out.push(ImportInfo::new(module.to_string(), is_relative));
            }
        } else if let Some(caps) = PY_IMPORT.captures(line) {
            out.push(ImportInfo::new(caps[1].to_string(), false));
        }
    }
    out
}

fn extract_js(content: &str) -> Vec<ImportInfo> {
    let mut out = Vec::new();
    for line in content.lines() {
        if let Some(caps) = JS_IMPORT_FROM.captures(line) {
            let spec = &caps[1];
            out.push(ImportInfo::new(spec.to_string(), spec.starts_with('.')));
        } else if let Some(caps) = JS_BARE_IMPORT.captures(line) {
            let spec = &caps[1];
            out.push(ImportInfo::new(spec.to_string(), spec.starts_with('.')));
        }
        for caps in JS_REQUIRE.captures_iter(line) {
            let spec = &caps[1];
            out.push(ImportInfo::new(spec.to_string(), spec.starts_with('.')));
        }
    }
    out
}

fn extract_go(content: &str) -> Vec<ImportInfo> {
    let mut out = Vec::new();
    let mut in_block = false;
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with("import (") {
            in_block = true;
            continue;
        }
        if in_block {
            if trimmed == ")" {
                in_block = false;
                continue;
            }
            if let Some(caps) = GO_BLOCK_ENTRY.captures(trimmed) {
                out.push(ImportInfo::new(caps[1].to_string(), false));
            }
            continue;
        }
        if let Some(caps) = GO_SINGLE_IMPORT.captures(line) {
            out.push(ImportInfo::new(caps[1].to_string(), false));
        }
    }
    out
}

fn extract_rust(content: &str) -> Vec<ImportInfo> {
    let mut out = Vec::new();
    for line in content.lines() {
        if let Some(caps) = RUST_USE.captures(line) {
            out.push(ImportInfo::new(caps[1].to_string(), false));
        } else if let Some(caps) = RUST_MOD.captures(line) {
            out.push(ImportInfo::new(caps[1].to_string(), true));
        }
    }
    out
}
