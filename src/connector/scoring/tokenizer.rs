use once_cell::sync::Lazy;
use regex::Regex;

static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-z][a-z0-9_]*").unwrap());

/// Tokenizes for the Lexical Ranker (§4.5): lowercase, extract `[a-z][a-z0-9_]*`
/// runs, then additionally split each run's camelCase and snake_case
/// boundaries into constituent lowercase words, added as extra tokens — so a
/// query and a chunk that name the same identifier in different conventions
/// still share tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let mut tokens = Vec::new();
    for m in WORD.find_iter(&lowered) {
        let word = m.as_str();
        tokens.push(word.to_string());
        if word.contains('_') {
            tokens.extend(word.split('_').filter(|p| p.len() > 1).map(str::to_string));
        }
    }

    // camelCase splitting must run on the original-case text, since lowering
    // first destroys the case boundaries it depends on.
    for m in camel_candidates(text) {
        for part in split_camel_case(m) {
            tokens.push(part.to_lowercase());
        }
    }

    tokens
}

static IDENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z][A-Za-z0-9_]*").unwrap());

fn camel_candidates(text: &str) -> Vec<&str> {
    IDENT.find_iter(text).map(|m| m.as_str()).collect()
}

fn split_camel_case(word: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let chars: Vec<char> = word.chars().collect();

    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() && !current.is_empty() {
            let prev_lower = chars[i - 1].is_lowercase();
            let next_lower = chars.get(i + 1).map(|c| c.is_lowercase()).unwrap_or(false);
            if prev_lower || next_lower {
                parts.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }
    if !current.is_empty() {
        parts.push(current);
    }
    parts.into_iter().filter(|p| p.len() > 1).collect()
}

/// Approximate, deterministic token counter used by the Budgeted Selector
/// (§4.8, §9): word-count over whitespace-delimited runs. Documented here as
/// the crate's one chosen tokenization proxy — not the BM25 tokenizer above.
pub fn count_tokens(text: &str) -> usize {
    text.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_camel_case_into_lowercase_words() {
        let tokens = tokenize("function parseGithubUrl(url) {}");
        assert!(tokens.contains(&"parse".to_string()));
        assert!(tokens.contains(&"github".to_string()));
        assert!(tokens.contains(&"url".to_string()));
    }

    #[test]
    fn keeps_snake_case_words_intact_and_also_splits_them() {
        let tokens = tokenize("def parse_github_url(url):");
        assert!(tokens.contains(&"parse_github_url".to_string()));
        assert!(tokens.contains(&"parse".to_string()));
        assert!(tokens.contains(&"github".to_string()));
    }

    #[test]
    fn camel_and_snake_queries_share_tokens_with_each_other() {
        let camel = tokenize("parseGithubUrl");
        let snake = tokenize("parse_github_url");
        assert!(camel.contains(&"github".to_string()));
        assert!(snake.contains(&"github".to_string()));
    }

    #[test]
    fn count_tokens_is_additive() {
        let a = count_tokens("one two three");
        let b = count_tokens("four five");
        assert_eq!(count_tokens("one two three four five"), a + b);
    }
}
