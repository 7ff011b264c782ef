//! Lint: key hints like `[C]` must be clickable.
//!
//! Every `[X]` shown in a `render.rs` is a promise that tapping it works.
//! Text pushed through `ClickableList::push()` renders fine but registers
//! no target, which silently breaks touch input. This test scans every
//! `render.rs` under `src/` and flags such `push(` calls.

use std::fs;
use std::path::Path;

/// True if `s` contains a one-character key hint such as `[C]`, `[1]` or `[-]`.
fn contains_key_hint(s: &str) -> bool {
    s.as_bytes().windows(3).any(|w| {
        w[0] == b'[' && w[2] == b']' && (w[1].is_ascii_alphanumeric() || b"-=!~|".contains(&w[1]))
    })
}

/// `(line_number, line)` of every non-clickable push that shows a key hint.
fn find_unclickable_hints(source: &str) -> Vec<(usize, String)> {
    source
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let trimmed = line.trim_start();
            !trimmed.starts_with("//")
                && contains_key_hint(line)
                && line.contains(".push(")
                && !line.contains("push_clickable(")
        })
        .map(|(i, line)| (i + 1, line.trim().to_string()))
        .collect()
}

fn collect_render_files(dir: &Path, out: &mut Vec<std::path::PathBuf>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for path in entries.flatten().map(|e| e.path()) {
        if path.is_dir() {
            collect_render_files(&path, out);
        } else if path.file_name().is_some_and(|n| n == "render.rs") {
            out.push(path);
        }
    }
}

#[test]
fn key_hints_are_clickable() {
    let src = Path::new(env!("CARGO_MANIFEST_DIR")).join("src");
    let mut files = Vec::new();
    collect_render_files(&src, &mut files);
    assert!(!files.is_empty(), "no render.rs found under {}", src.display());

    let mut report = String::new();
    for file in &files {
        let source = fs::read_to_string(file).unwrap();
        for (line_num, line) in find_unclickable_hints(&source) {
            report.push_str(&format!("  {}:{}: {}\n", file.display(), line_num, line));
        }
    }
    assert!(
        report.is_empty(),
        "Key hints pushed without a click target (use push_clickable):\n{report}"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_plain_push_with_hint() {
        let source = r#"cl.push(Line::from(" [X] Reset all progress"));"#;
        assert_eq!(find_unclickable_hints(source).len(), 1);
    }

    #[test]
    fn allows_push_clickable() {
        let source = r#"cl.push_clickable(Line::from(" [X] Reset"), RESET_REQUEST);"#;
        assert!(find_unclickable_hints(source).is_empty());
    }

    #[test]
    fn ignores_comments_and_plain_text() {
        assert!(find_unclickable_hints(r#"// cl.push(Line::from("[C]"));"#).is_empty());
        assert!(find_unclickable_hints(r#"cl.push(Line::from("Passive income"));"#).is_empty());
    }

    #[test]
    fn key_hint_detection() {
        assert!(contains_key_hint("[C]"));
        assert!(contains_key_hint(" [1] Cursor"));
        assert!(contains_key_hint("[-]"));
        assert!(!contains_key_hint("[]"));
        assert!(!contains_key_hint("[1-0]"));
        assert!(!contains_key_hint("[{}]"));
    }
}
