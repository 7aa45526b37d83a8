/// Fixed ignore sets consulted by the Scanner ahead of any user-supplied
/// include/exclude globs (§4.1).
const IGNORE_DIRS: &[&str] = &[
    ".git",
    ".hg",
    ".svn",
    "node_modules",
    "target",
    "dist",
    "build",
    "out",
    "venv",
    ".venv",
    "env",
    ".env",
    "__pycache__",
    ".mypy_cache",
    ".pytest_cache",
    ".tox",
    ".idea",
    ".vscode",
    ".vs",
    "vendor",
    ".cargo",
    ".next",
    ".nuxt",
];

const IGNORE_FILES: &[&str] = &[
    "Cargo.lock",
    "package-lock.json",
    "yarn.lock",
    "pnpm-lock.yaml",
    "poetry.lock",
    "Gemfile.lock",
    "go.sum",
    "LICENSE",
    "LICENSE.txt",
    "LICENSE.md",
    "CHANGELOG.md",
    "CHANGELOG",
    ".DS_Store",
    "Thumbs.db",
];

const BINARY_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "bmp", "ico", "webp", "svg", "pdf", "zip", "gz", "tar", "bz2",
    "xz", "7z", "rar", "exe", "dll", "so", "dylib", "bin", "class", "jar", "war", "wasm", "woff",
    "woff2", "ttf", "eot", "mp3", "mp4", "mov", "avi", "mkv", "db", "sqlite", "sqlite3", "lock",
    "o", "a", "pyc", "pyo",
];

pub const MAX_FILE_BYTES: u64 = 1024 * 1024;
pub const MAX_FILE_LINES: usize = 20_000;
pub const READ_CONCURRENCY: usize = 100;

pub fn is_ignored_dir(name: &str) -> bool {
    IGNORE_DIRS.contains(&name)
}

pub fn is_ignored_file(name: &str) -> bool {
    IGNORE_FILES.contains(&name)
}

pub fn is_binary_extension(ext: &str) -> bool {
    BINARY_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_common_dirs() {
        assert!(is_ignored_dir("node_modules"));
        assert!(is_ignored_dir(".git"));
        assert!(!is_ignored_dir("src"));
    }

    #[test]
    fn recognizes_lockfiles() {
        assert!(is_ignored_file("Cargo.lock"));
        assert!(!is_ignored_file("main.rs"));
    }

    #[test]
    fn binary_extension_check_is_case_insensitive() {
        assert!(is_binary_extension("PNG"));
        assert!(!is_binary_extension("rs"));
    }
}
