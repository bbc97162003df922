//! Core Purity Enforcement
//!
//! The mascot core is a pure state engine: the host owns the clock, the
//! terminal, and the filesystem. These tests keep it that way.
//!
//! Forbidden in `mascot/core/src` production code:
//! - Filesystem, network, and process access
//! - Sleeping or reading the wall clock (time arrives as a `Duration`)
//! - Async runtimes and terminal crates
//! - `unwrap()`/`expect()` (errors are propagated or defaulted)

use architectural_enforcement::{production_lines, rust_sources, violation, workspace_root};

const CORE_SRC: &str = "mascot/core/src";

const FORBIDDEN_IO: &[(&str, &str)] = &[
    ("std::fs", "filesystem access"),
    ("std::net", "network access"),
    ("std::process", "process control"),
    ("std::io::stdin", "terminal input"),
    ("println!", "direct stdout"),
    ("eprintln!", "direct stderr"),
];

const FORBIDDEN_TIME: &[(&str, &str)] = &[
    ("thread::sleep", "blocking sleep"),
    ("Instant::now", "wall-clock read"),
    ("SystemTime::now", "wall-clock read"),
];

const FORBIDDEN_CRATES: &[&str] = &["tokio", "ratatui", "crossterm", "futures"];

fn scan(patterns: &[(&str, &str)]) -> Vec<String> {
    let mut violations = Vec::new();
    for path in rust_sources(CORE_SRC) {
        for line in production_lines(&path) {
            for (pattern, what) in patterns {
                if line.code.contains(pattern) {
                    violations.push(violation(&path, &line, what));
                }
            }
        }
    }
    violations
}

fn report(kind: &str, violations: &[String]) {
    if violations.is_empty() {
        return;
    }
    eprintln!("\n{kind} violations in the mascot core:\n");
    for v in violations {
        eprintln!("  {v}");
    }
    panic!("{} {kind} violation(s) found", violations.len());
}

#[test]
fn core_performs_no_io() {
    report("I/O", &scan(FORBIDDEN_IO));
}

#[test]
fn core_never_reads_the_clock() {
    report("clock", &scan(FORBIDDEN_TIME));
}

#[test]
fn core_imports_no_runtime_or_terminal_crates() {
    let patterns: Vec<(String, &str)> = FORBIDDEN_CRATES
        .iter()
        .map(|name| (format!("{name}::"), "host-only crate"))
        .collect();
    let borrowed: Vec<(&str, &str)> = patterns.iter().map(|(p, w)| (p.as_str(), *w)).collect();
    report("dependency", &scan(&borrowed));
}

#[test]
fn core_manifest_declares_no_host_crates() {
    let manifest = workspace_root().join("mascot/core/Cargo.toml");
    let content = std::fs::read_to_string(&manifest)
        .unwrap_or_else(|e| panic!("cannot read {}: {e}", manifest.display()));

    let declared: Vec<&str> = FORBIDDEN_CRATES
        .iter()
        .copied()
        .filter(|name| {
            let plain = format!("{name} ");
            let dotted = format!("{name}.");
            content.lines().map(str::trim_start).any(|line| {
                line.starts_with(&plain) || line.starts_with(&dotted) || line.starts_with(&format!("{name}="))
            })
        })
        .collect();

    assert!(
        declared.is_empty(),
        "mascot-core must stay headless, but depends on: {declared:?}"
    );
}

#[test]
fn core_does_not_panic_on_errors() {
    report(
        "panic",
        &scan(&[(".unwrap()", "unwrap in production"), (".expect(", "expect in production")]),
    );
}
