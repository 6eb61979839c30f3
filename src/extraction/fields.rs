//! Single-value field extractors: email, phone, name and skills
//!
//! All extractors are total: a missing field yields an empty value.

use crate::extraction::vocabulary::SkillVocabulary;
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// Leading lines of a resume searched for the candidate's name.
pub const NAME_SCAN_LINES: usize = 5;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").expect("Invalid email regex")
});

// Russian-style numbers: optional +7/8 prefix, optional (XXX), then 3-3-2-2 digits.
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\+7|8)?[\s\-]?\(?\d{3}\)?[\s\-]?\d{3}[\s\-]?\d{2}[\s\-]?\d{2}").expect("Invalid phone regex")
});

// Surname Given [Patronymic], Cyrillic only, whole line.
static NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[А-ЯЁ][а-яё]+\s[А-ЯЁ][а-яё]+(\s[А-ЯЁ][а-яё]+)?$").expect("Invalid name regex")
});

/// First email address in the text, verbatim.
pub fn extract_email(text: &str) -> String {
    EMAIL_RE
        .find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// First phone-like token in the text, with its original formatting.
pub fn extract_phone(text: &str) -> String {
    let text = text.replace(['\u{00A0}', '\u{2009}'], " ");

    PHONE_RE
        .find(&text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Full name from the first [`NAME_SCAN_LINES`] lines.
pub fn extract_name(text: &str) -> String {
    extract_name_within(text, NAME_SCAN_LINES)
}

/// First line among the leading `max_lines` that is exactly a 2 or 3 word
/// capitalized Cyrillic name.
pub fn extract_name_within(text: &str, max_lines: usize) -> String {
    text.trim()
        .split('\n')
        .take(max_lines)
        .map(str::trim)
        .find(|line| NAME_RE.is_match(line))
        .map(str::to_string)
        .unwrap_or_default()
}

/// Built-in vocabulary skills mentioned in the text.
pub fn extract_skills(text: &str) -> BTreeSet<String> {
    SkillVocabulary::builtin().find_in(text)
}
