//! Whitespace normalization applied to raw document text before extraction

use regex::Regex;
use std::sync::LazyLock;

static LINE_BREAK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r\n|[\r\x0C\x{2028}\x{2029}]").expect("Invalid line break regex"));

// Unicode-aware: covers NBSP, thin space, narrow NBSP, tabs and friends.
static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

/// Canonicalize whitespace while keeping line boundaries intact.
///
/// Every line break variant becomes `\n`, whitespace runs inside a line
/// collapse to a single ASCII space, each line is trimmed and so is the
/// whole text. Idempotent and total.
pub fn normalize(raw: &str) -> String {
    let without_bom = raw.replace('\u{FEFF}', "");
    let unified = LINE_BREAK_RE.replace_all(&without_bom, "\n");

    let lines: Vec<String> = unified
        .split('\n')
        .map(|line| WHITESPACE_RE.replace_all(line, " ").trim().to_string())
        .collect();

    lines.join("\n").trim().to_string()
}
