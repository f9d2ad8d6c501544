//! The `scan` command: summarize findings, then preview, import or hand them
//! to the interactive selector.

use super::manager::Manager;
use super::{Output, json_string};
use crate::Result;
use crate::models::{Marker, ScanResult};
use crate::scanner::{Scanner, count_by_marker};
use crate::storage::StorageBackend;
use serde::Serialize;
use std::path::Path;

/// What happens to the findings after the summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanMode {
    /// Keep the findings for interactive review; nothing is persisted here
    Review,
    /// Preview the first findings without persisting
    DryRun,
    /// Persist every finding
    AddAll,
}

#[derive(Debug, Serialize)]
pub struct MarkerCount {
    pub marker: Marker,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct ScanReport {
    pub root: String,
    pub mode: ScanMode,
    pub total: usize,
    /// Non-zero counts in marker order
    pub counts: Vec<MarkerCount>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub preview: Vec<ScanResult>,
    /// Findings left out of the preview
    #[serde(skip_serializing_if = "is_zero")]
    pub remaining: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub added: Option<usize>,
    pub data_file: String,
    /// Every finding, kept for review
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub findings: Vec<ScanResult>,
}

fn is_zero(n: &usize) -> bool {
    *n == 0
}

impl Output for ScanReport {
    fn to_json(&self) -> String {
        json_string(self)
    }

    fn to_human(&self) -> String {
        let mut lines = vec![format!("Scan complete: found {} items", self.total), String::new()];

        if self.total == 0 {
            lines.push("No technical debt markers found.".to_string());
            return lines.join("\n");
        }

        for count in &self.counts {
            lines.push(format!("  {}: {}", count.marker, count.count));
        }

        match self.mode {
            ScanMode::Review => {}
            ScanMode::DryRun => {
                lines.push(String::new());
                lines.push(format!(
                    "Dry-run mode: items not added to {}",
                    self.data_file
                ));
                for result in &self.preview {
                    lines.push(format!(
                        "  [{}] {}:{} - {}",
                        result.comment_type, result.file_path, result.line_number, result.description
                    ));
                }
                if self.remaining > 0 {
                    lines.push(String::new());
                    lines.push(format!("  ... and {} more items", self.remaining));
                }
            }
            ScanMode::AddAll => {
                lines.push(String::new());
                lines.push(format!(
                    "Added {} items to {}",
                    self.added.unwrap_or(0),
                    self.data_file
                ));
            }
        }

        lines.join("\n")
    }
}

/// Scan `root` and act on the findings according to `mode`.
pub fn scan<B: StorageBackend>(
    manager: &mut Manager<B>,
    root: &Path,
    mode: ScanMode,
    preview_limit: usize,
) -> Result<ScanReport> {
    let results = Scanner::new().scan(root)?;

    let counts = count_by_marker(&results)
        .into_iter()
        .map(|(marker, count)| MarkerCount { marker, count })
        .collect();

    let mut report = ScanReport {
        root: root.display().to_string(),
        mode,
        total: results.len(),
        counts,
        preview: Vec::new(),
        remaining: 0,
        added: None,
        data_file: manager.location(),
        findings: Vec::new(),
    };

    match mode {
        ScanMode::Review => report.findings = results,
        ScanMode::DryRun => {
            let shown = preview_limit.min(results.len());
            report.remaining = results.len() - shown;
            report.preview = results.into_iter().take(shown).collect();
        }
        ScanMode::AddAll => {
            let imported = manager.import(&results)?;
            report.added = Some(imported.len());
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestEnv;

    fn seed(env: &TestEnv) {
        env.write_file(
            "src/main.rs",
            "// TODO: one\n// TODO: two\n// FIXME: three\nfn main() {}\n",
        );
        env.write_file("notes.md", "<!-- NOTE: four -->\n# BUG: five\n");
    }

    #[test]
    fn test_dry_run_does_not_persist() {
        let env = TestEnv::new();
        seed(&env);
        let mut manager = env.manager();

        let report = scan(&mut manager, env.path(), ScanMode::DryRun, 2).unwrap();
        assert_eq!(report.total, 5);
        assert_eq!(report.preview.len(), 2);
        assert_eq!(report.remaining, 3);
        assert!(!env.data_file().exists());

        let text = report.to_human();
        assert!(text.contains("Dry-run mode"));
        assert!(text.contains("[NOTE] notes.md:1 - four"));
        assert!(text.contains("... and 3 more items"));
    }

    #[test]
    fn test_counts_follow_marker_order() {
        let env = TestEnv::new();
        seed(&env);
        let mut manager = env.manager();

        let report = scan(&mut manager, env.path(), ScanMode::DryRun, 10).unwrap();
        let counts: Vec<(Marker, usize)> =
            report.counts.iter().map(|c| (c.marker, c.count)).collect();
        assert_eq!(
            counts,
            vec![
                (Marker::Todo, 2),
                (Marker::Fixme, 1),
                (Marker::Bug, 1),
                (Marker::Note, 1)
            ]
        );
        assert_eq!(report.remaining, 0);
        assert!(!report.to_human().contains("more items"));
    }

    #[test]
    fn test_add_all_imports_everything() {
        let env = TestEnv::new();
        seed(&env);
        let mut manager = env.manager();

        let report = scan(&mut manager, env.path(), ScanMode::AddAll, 10).unwrap();
        assert_eq!(report.added, Some(5));
        assert!(report.to_human().contains("Added 5 items to"));

        let items = manager.list().unwrap();
        assert_eq!(items.len(), 5);
        assert!(items.iter().all(|item| item.is_scanned));
    }

    #[test]
    fn test_review_keeps_findings() {
        let env = TestEnv::new();
        seed(&env);
        let mut manager = env.manager();

        let report = scan(&mut manager, env.path(), ScanMode::Review, 10).unwrap();
        assert_eq!(report.findings.len(), 5);
        assert!(!env.data_file().exists());
    }

    #[test]
    fn test_nothing_found() {
        let env = TestEnv::new();
        env.write_file("clean.rs", "fn main() {}\n");
        let mut manager = env.manager();

        let report = scan(&mut manager, env.path(), ScanMode::AddAll, 10).unwrap();
        assert_eq!(report.total, 0);
        assert!(report.to_human().contains("No technical debt markers found."));
        assert!(!env.data_file().exists());
    }
}
