//! Public API Documentation in the Terminal Host
//!
//! `mascot-core` enforces `missing_docs` at compile time. The host crate
//! does not, so this scan requires a `///` line on every `pub fn` in the
//! widget and avatar modules other crates build screens from.

use architectural_enforcement::{production_lines, rust_sources, violation};

const DOCUMENTED_DIRS: &[&str] = &["tui/src/widgets", "tui/src/avatar"];

#[test]
fn public_functions_are_documented() {
    let mut violations = Vec::new();

    for dir in DOCUMENTED_DIRS {
        for path in rust_sources(dir) {
            let Ok(raw) = std::fs::read_to_string(&path) else {
                continue;
            };
            let raw: Vec<&str> = raw.lines().collect();

            for line in production_lines(&path) {
                let code = line.code.trim_start();
                if !(code.starts_with("pub fn ") || code.starts_with("pub const fn ")) {
                    continue;
                }

                // walk up past attributes to the nearest meaningful line
                let documented = raw[..line.number - 1]
                    .iter()
                    .rev()
                    .map(|l| l.trim())
                    .find(|l| !l.starts_with("#["))
                    .is_some_and(|l| l.starts_with("///"));

                if !documented {
                    violations.push(violation(&path, &line, "undocumented public function"));
                }
            }
        }
    }

    if !violations.is_empty() {
        eprintln!("\nUndocumented public functions:\n");
        for v in &violations {
            eprintln!("  {v}");
        }
        panic!("{} undocumented public function(s)", violations.len());
    }
}
