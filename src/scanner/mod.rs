//! Codebase scanner for technical debt markers.
//!
//! Walks a directory tree depth-first in file-name order, skipping excluded
//! directories (and their subtrees), excluded file suffixes and files without
//! a known text extension. Every remaining file is matched line by line
//! against the pattern table in [`patterns`]; at most one finding is produced
//! per line.
//!
//! Only an unresolvable root aborts a scan. Unreadable files and directories
//! are logged as warnings and skipped.

pub mod filetype;
pub mod patterns;

use crate::models::{Marker, ScanResult};
use crate::{Error, Result};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;
use walkdir::WalkDir;

pub use patterns::{CommentPattern, CommentSyntax, match_line};

/// Scanner with the default exclusion and pattern sets.
#[derive(Debug, Clone, Default)]
pub struct Scanner;

impl Scanner {
    pub fn new() -> Self {
        Self
    }

    /// Scan `root` recursively. File paths in the results are relative to
    /// the canonicalized root.
    pub fn scan(&self, root: &Path) -> Result<Vec<ScanResult>> {
        let abs_root = fs::canonicalize(root).map_err(|source| Error::ScanRoot {
            path: root.to_path_buf(),
            source,
        })?;

        tracing::debug!(root = %abs_root.display(), "scan started");

        let mut results = Vec::new();
        let mut files_scanned = 0usize;

        let walker = WalkDir::new(&abs_root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !should_skip_entry(entry));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    let path = err
                        .path()
                        .map(|p| relative_path(&abs_root, p))
                        .unwrap_or_default();
                    tracing::warn!(path = %path, error = %err, "skipping unreadable entry");
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let file_name = entry.file_name().to_string_lossy();
            if filetype::is_excluded_file(&file_name) || !filetype::is_text_file(&file_name) {
                continue;
            }

            let relative = relative_path(&abs_root, entry.path());
            match self.scan_file(entry.path(), &relative) {
                Ok(found) => {
                    files_scanned += 1;
                    results.extend(found);
                }
                Err(err) => {
                    tracing::warn!(path = %relative, error = %err, "failed to scan file");
                }
            }
        }

        tracing::info!(
            root = %abs_root.display(),
            files = files_scanned,
            found = results.len(),
            "scan complete"
        );
        Ok(results)
    }

    /// Read one file and match its lines.
    fn scan_file(&self, path: &Path, relative: &str) -> io::Result<Vec<ScanResult>> {
        let bytes = fs::read(path)?;
        let content = String::from_utf8_lossy(&bytes);
        Ok(self.scan_content(relative, &content))
    }

    /// Match every line of `content`, reporting findings under `file_path`.
    pub fn scan_content(&self, file_path: &str, content: &str) -> Vec<ScanResult> {
        content
            .lines()
            .enumerate()
            .filter_map(|(idx, line)| {
                let (pattern, description) = match_line(line)?;
                Some(ScanResult {
                    file_path: file_path.to_string(),
                    line_number: idx + 1,
                    comment_type: pattern.marker,
                    description,
                    line: line.trim().to_string(),
                })
            })
            .collect()
    }
}

/// Count findings per marker, in marker priority order.
pub fn count_by_marker(results: &[ScanResult]) -> BTreeMap<Marker, usize> {
    let mut counts = BTreeMap::new();
    for result in results {
        *counts.entry(result.comment_type).or_insert(0) += 1;
    }
    counts
}

/// The root itself is never skipped, even when its name is excluded.
fn should_skip_entry(entry: &walkdir::DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && filetype::is_excluded_dir(&entry.file_name().to_string_lossy())
}

/// Path of `path` relative to `root`. Scanning a single file yields its name.
fn relative_path(root: &Path, path: &Path) -> String {
    match path.strip_prefix(root) {
        Ok(rel) if !rel.as_os_str().is_empty() => rel.to_string_lossy().into_owned(),
        _ => path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestEnv;

    fn scan(env: &TestEnv) -> Vec<ScanResult> {
        Scanner::new().scan(env.path()).unwrap()
    }

    #[test]
    fn test_todo_on_line_five() {
        let env = TestEnv::new();
        env.write_file(
            "src/main.go",
            "package main\n\nimport \"fmt\"\n\n// TODO: fix this\nfunc main() {}\n",
        );

        let results = scan(&env);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].comment_type, Marker::Todo);
        assert_eq!(results[0].line_number, 5);
        assert_eq!(results[0].description, "fix this");
        assert_eq!(results[0].line, "// TODO: fix this");
        assert_eq!(
            results[0].file_path,
            Path::new("src").join("main.go").to_string_lossy()
        );
    }

    #[test]
    fn test_minified_files_are_skipped() {
        let env = TestEnv::new();
        env.write_file("bundle.min.js", "// TODO: never seen\n");
        env.write_file("app.js.map", "// FIXME: never seen\n");
        env.write_file("app.js", "// HACK: seen\n");

        let results = scan(&env);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].file_path, "app.js");
    }

    #[test]
    fn test_excluded_directory_subtree_is_skipped() {
        let env = TestEnv::new();
        env.write_file("node_modules/pkg/index.js", "// TODO: vendored\n");
        env.write_file("node_modules/pkg/lib/deep.js", "// FIXME: vendored\n");
        env.write_file("target/debug/build.rs", "// TODO: generated\n");
        env.write_file("lib/index.js", "// NOTE: ours\n");

        let results = scan(&env);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].description, "ours");
    }

    #[test]
    fn test_non_text_files_are_ignored() {
        let env = TestEnv::new();
        env.write_file("image.png", "// TODO: inside a png\n");
        env.write_file("Makefile", "# TODO: no extension\n");

        assert!(scan(&env).is_empty());
    }

    #[test]
    fn test_one_result_per_line() {
        let env = TestEnv::new();
        env.write_file("a.py", "x = 1  # FIXME: first # TODO: second\n");

        let results = scan(&env);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].comment_type, Marker::Todo);
    }

    #[test]
    fn test_scan_is_deterministic() {
        let env = TestEnv::new();
        env.write_file("b/two.rs", "// TODO: b\n// FIXME: b2\n");
        env.write_file("a/one.rs", "// TODO: a\n");
        env.write_file("c.md", "<!-- NOTE: c -->\n");

        let first = scan(&env);
        let second = scan(&env);
        assert_eq!(first, second);

        let descriptions: Vec<&str> = first.iter().map(|r| r.description.as_str()).collect();
        assert_eq!(descriptions, ["a", "b", "b2", "c"]);
    }

    #[test]
    fn test_root_named_like_excluded_dir_is_scanned() {
        let env = TestEnv::new();
        let root = env.path().join("build");
        env.write_file("build/script.sh", "# TODO: still scanned\n");

        let results = Scanner::new().scan(&root).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].file_path, "script.sh");
    }

    #[test]
    fn test_scan_single_file_root() {
        let env = TestEnv::new();
        let file = env.write_file("notes.txt", "line\n# XXX: odd\n");

        let results = Scanner::new().scan(&file).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].file_path, "notes.txt");
        assert_eq!(results[0].line_number, 2);
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let env = TestEnv::new();
        let err = Scanner::new()
            .scan(&env.path().join("does-not-exist"))
            .unwrap_err();
        assert!(matches!(err, Error::ScanRoot { .. }));
    }

    #[test]
    fn test_invalid_utf8_is_decoded_lossily() {
        let env = TestEnv::new();
        let path = env.path().join("latin1.c");
        std::fs::write(&path, b"/* TODO: caf\xe9 */\n").unwrap();

        let results = scan(&env);
        assert_eq!(results.len(), 1);
        assert!(results[0].description.starts_with("caf"));
    }

    #[test]
    fn test_crlf_line_endings() {
        let env = TestEnv::new();
        env.write_file("win.cs", "class A {}\r\n// BUG: crlf\r\n");

        let results = scan(&env);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].line_number, 2);
        assert_eq!(results[0].description, "crlf");
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_entries_are_skipped() {
        use std::os::unix::fs::PermissionsExt;

        let env = TestEnv::new();
        env.write_file("a_ok.rs", "// TODO: readable
");
        let locked_file = env.write_file("b_locked.rs", "// FIXME: hidden file
");
        env.write_file("c_locked/inner.rs", "// HACK: hidden dir
");
        env.write_file("d_ok/last.rs", "// NOTE: after the locked entries
");
        let locked_dir = env.path().join("c_locked");

        fs::set_permissions(&locked_file, fs::Permissions::from_mode(0o000)).unwrap();
        fs::set_permissions(&locked_dir, fs::Permissions::from_mode(0o000)).unwrap();

        // Permission bits do not apply to a privileged user
        let privileged = fs::read(&locked_file).is_ok();

        let results = Scanner::new().scan(env.path());

        fs::set_permissions(&locked_dir, fs::Permissions::from_mode(0o755)).unwrap();
        fs::set_permissions(&locked_file, fs::Permissions::from_mode(0o644)).unwrap();

        if privileged {
            return;
        }

        let descriptions: Vec<String> = results
            .unwrap()
            .into_iter()
            .map(|r| r.description)
            .collect();
        assert_eq!(descriptions, ["readable", "after the locked entries"]);
    }

    #[test]
    fn test_count_by_marker_in_priority_order() {
        let scanner = Scanner::new();
        let results = scanner.scan_content(
            "x.rs",
            "// NOTE: a\n// TODO: b\n// NOTE: c\n// HACK: d\n",
        );
        let counts: Vec<(Marker, usize)> = count_by_marker(&results).into_iter().collect();
        assert_eq!(
            counts,
            vec![(Marker::Todo, 1), (Marker::Hack, 1), (Marker::Note, 2)]
        );
    }
}
