//! File classification for the scanner.

/// Directory names whose whole subtree is skipped.
pub const EXCLUDED_DIRS: &[&str] = &[
    "node_modules",
    "vendor",
    ".git",
    ".hg",
    ".svn",
    "dist",
    "build",
    "target",
    "__pycache__",
    ".pytest_cache",
    ".venv",
    "venv",
    "env",
    ".next",
    ".nuxt",
    "out",
];

/// File name suffixes that are never opened (generated assets).
pub const EXCLUDED_SUFFIXES: &[&str] = &[".min.js", ".min.css", ".map"];

/// Extensions of files worth scanning. Everything else is assumed binary.
pub const TEXT_EXTENSIONS: &[&str] = &[
    // Programming languages
    ".go", ".js", ".ts", ".tsx", ".jsx", ".py", ".rb", ".java", ".c", ".cpp", ".cc", ".cxx",
    ".h", ".hpp", ".hxx", ".cs", ".rs", ".swift", ".kt", ".kts", ".scala", ".php", ".sh",
    ".bash", ".zsh", ".fish",
    // Web
    ".html", ".htm", ".css", ".scss", ".sass", ".less", ".vue", ".svelte",
    // Config/Data
    ".yaml", ".yml", ".json", ".toml", ".xml", ".md", ".txt", ".sql", ".env",
];

/// Lowercased extension including the dot, taken from the last `.` in the
/// name. Dotfiles count as their own extension, so `.env` is `.env`.
fn extension(file_name: &str) -> Option<String> {
    file_name
        .rfind('.')
        .map(|idx| file_name[idx..].to_ascii_lowercase())
}

pub fn is_text_file(file_name: &str) -> bool {
    extension(file_name).is_some_and(|ext| TEXT_EXTENSIONS.contains(&ext.as_str()))
}

pub fn is_excluded_dir(dir_name: &str) -> bool {
    EXCLUDED_DIRS.contains(&dir_name)
}

pub fn is_excluded_file(file_name: &str) -> bool {
    EXCLUDED_SUFFIXES
        .iter()
        .any(|suffix| file_name.ends_with(suffix))
}
