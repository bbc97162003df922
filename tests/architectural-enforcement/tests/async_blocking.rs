//! Blocking Operation Prohibition in the Terminal Host
//!
//! The host runs one tokio loop that multiplexes keys, driver events, and
//! frame ticks. A blocking call inside any `async fn` stalls all three.
//!
//! Forbidden inside `async fn` bodies under `tui/src`:
//! - `std::thread::sleep` (use `tokio::time::sleep`)
//! - `std::fs` (read files before entering the loop)
//! - Blocking channel receives

use architectural_enforcement::{production_lines, rust_sources, violation, SourceLine};

const TUI_SRC: &str = "tui/src";

const BLOCKING: &[(&str, &str)] = &[
    ("thread::sleep", "blocking sleep in async fn"),
    ("std::fs::", "blocking filesystem call in async fn"),
    ("fs::read", "blocking filesystem call in async fn"),
    ("fs::write", "blocking filesystem call in async fn"),
    ("blocking_recv", "blocking channel receive in async fn"),
    ("recv_timeout", "blocking channel receive in async fn"),
];

/// Track brace depth from each `async fn` signature to its closing brace
fn async_lines(lines: &[SourceLine]) -> Vec<&SourceLine> {
    let mut inside = Vec::new();
    let mut depth: i64 = 0;
    let mut in_async = false;

    for line in lines {
        if !in_async && line.code.contains("async fn ") {
            in_async = true;
            depth = 0;
        }
        if in_async {
            inside.push(line);
            for c in line.code.chars() {
                match c {
                    '{' => depth += 1,
                    '}' => depth -= 1,
                    _ => {}
                }
            }
            if depth <= 0 && line.code.contains('}') {
                in_async = false;
            }
        }
    }
    inside
}

#[test]
fn no_blocking_calls_in_async_functions() {
    let mut violations = Vec::new();

    for path in rust_sources(TUI_SRC) {
        let lines = production_lines(&path);
        for line in async_lines(&lines) {
            for (pattern, what) in BLOCKING {
                if line.code.contains(pattern) {
                    violations.push(violation(&path, line, what));
                }
            }
        }
    }

    if !violations.is_empty() {
        eprintln!("\nBlocking calls inside async functions:\n");
        for v in &violations {
            eprintln!("  {v}");
        }
        panic!("{} blocking violation(s) found", violations.len());
    }
}

#[test]
fn no_thread_sleep_anywhere_in_host() {
    let mut violations = Vec::new();
    for path in rust_sources(TUI_SRC) {
        for line in production_lines(&path) {
            if line.code.contains("thread::sleep") {
                violations.push(violation(&path, &line, "thread::sleep"));
            }
        }
    }
    assert!(violations.is_empty(), "found: {violations:#?}");
}
