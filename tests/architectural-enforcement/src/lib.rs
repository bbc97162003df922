//! Architectural Enforcement Integration Tests
//!
//! This package contains integration tests that enforce architectural principles:
//! - The mascot core stays headless: no I/O, no sleeping, no wall clock
//! - The terminal host never blocks inside async code
//! - Production code propagates errors instead of panicking
//!
//! The helpers here locate the workspace and yield the production lines of
//! each source file (comments stripped, `#[cfg(test)]` modules skipped).

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Workspace root, two levels above this package
#[must_use]
pub fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
}

/// Every `.rs` file below `dir` (relative to the workspace root)
///
/// # Panics
///
/// Panics if the directory does not exist, so a moved crate cannot turn a
/// check into a silent pass.
#[must_use]
pub fn rust_sources(dir: &str) -> Vec<PathBuf> {
    let root = workspace_root().join(dir);
    assert!(root.is_dir(), "source directory not found: {}", root.display());

    let mut files: Vec<PathBuf> = WalkDir::new(&root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.path().extension().and_then(|s| s.to_str()) == Some("rs"))
        .map(|e| e.into_path())
        .collect();
    files.sort();
    files
}

/// A production line of a source file
#[derive(Debug)]
pub struct SourceLine {
    /// 1-based line number
    pub number: usize,
    /// Line with any `//` comment removed
    pub code: String,
}

/// Production lines of a file: everything before its first `#[cfg(test)]`,
/// with comments removed
#[must_use]
pub fn production_lines(path: &Path) -> Vec<SourceLine> {
    let Ok(content) = fs::read_to_string(path) else {
        return Vec::new();
    };

    content
        .lines()
        .enumerate()
        .take_while(|(_, line)| !line.trim_start().starts_with("#[cfg(test)]"))
        .map(|(idx, line)| SourceLine {
            number: idx + 1,
            code: strip_comment(line).to_string(),
        })
        .collect()
}

/// Drop a trailing `//` comment, leaving string literals containing `//` alone
fn strip_comment(line: &str) -> &str {
    let mut in_string = false;
    let mut prev = '\0';
    for (i, c) in line.char_indices() {
        match c {
            '"' if prev != '\\' => in_string = !in_string,
            '/' if !in_string && prev == '/' => return &line[..i - 1],
            _ => {}
        }
        prev = c;
    }
    line
}

/// Format a violation the way the reports print them
#[must_use]
pub fn violation(path: &Path, line: &SourceLine, what: &str) -> String {
    let shown = path
        .strip_prefix(workspace_root())
        .unwrap_or(path)
        .display()
        .to_string();
    format!("{shown}:{} - {what}: {}", line.number, line.code.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_comment() {
        assert_eq!(strip_comment("let x = 1; // note"), "let x = 1; ");
        assert_eq!(strip_comment(r#"let s = "http://x";"#), r#"let s = "http://x";"#);
        assert_eq!(strip_comment("//! doc"), "");
    }

    #[test]
    fn test_workspace_layout() {
        assert!(workspace_root().join("Cargo.toml").is_file());
        assert!(!rust_sources("mascot/core/src").is_empty());
    }
}
