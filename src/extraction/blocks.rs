//! Labeled block extraction: find a section heading, capture the lines after it

use crate::error::{Result, ResumeParserError};
use aho_corasick::AhoCorasick;

/// Default number of lines captured after a heading.
pub const MAX_BLOCK_LINES: usize = 10;

pub const EXPERIENCE_KEYWORDS: &[&str] = &["опыт работы", "трудовая деятельность", "стаж работы", "карьера"];

pub const EDUCATION_KEYWORDS: &[&str] = &["образование", "учёба", "вуз", "университет", "колледж"];

/// Lines following the first line that contains any of `keywords`.
///
/// The heading itself is not captured. At most `max_lines` lines are
/// looked at; blank ones are dropped, the rest are trimmed and keep their
/// order. No heading means an empty block.
pub fn extract_block(text: &str, keywords: &[&str], max_lines: usize) -> Vec<String> {
    let keywords: Vec<String> = keywords.iter().map(|kw| kw.to_lowercase()).collect();

    capture_after_heading(text, max_lines, |line| keywords.iter().any(|kw| line.contains(kw.as_str())))
}

pub fn extract_experience(text: &str) -> Vec<String> {
    extract_block(text, EXPERIENCE_KEYWORDS, MAX_BLOCK_LINES)
}

pub fn extract_education(text: &str) -> Vec<String> {
    extract_block(text, EDUCATION_KEYWORDS, MAX_BLOCK_LINES)
}

/// Block extractor with its heading keywords compiled once.
#[derive(Debug, Clone)]
pub struct BlockExtractor {
    heading_matcher: AhoCorasick,
    max_lines: usize,
}

impl BlockExtractor {
    pub fn new<S: AsRef<str>>(keywords: &[S], max_lines: usize) -> Result<Self> {
        let patterns: Vec<String> = keywords
            .iter()
            .map(|kw| kw.as_ref().trim().to_lowercase())
            .filter(|kw| !kw.is_empty())
            .collect();

        let heading_matcher = AhoCorasick::new(&patterns)
            .map_err(|e| ResumeParserError::Processing(format!("Failed to build heading matcher: {}", e)))?;

        Ok(Self {
            heading_matcher,
            max_lines,
        })
    }

    pub fn experience() -> Result<Self> {
        Self::new(EXPERIENCE_KEYWORDS, MAX_BLOCK_LINES)
    }

    pub fn education() -> Result<Self> {
        Self::new(EDUCATION_KEYWORDS, MAX_BLOCK_LINES)
    }

    pub fn extract(&self, text: &str) -> Vec<String> {
        capture_after_heading(text, self.max_lines, |line| self.heading_matcher.is_match(line))
    }
}

fn capture_after_heading<F>(text: &str, max_lines: usize, is_heading: F) -> Vec<String>
where
    F: Fn(&str) -> bool,
{
    let lines: Vec<&str> = text.split('\n').collect();

    let Some(heading) = lines
        .iter()
        .position(|line| is_heading(&line.trim().to_lowercase()))
    else {
        return Vec::new();
    };

    lines[heading + 1..]
        .iter()
        .take(max_lines)
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_heading_returns_empty() {
        assert!(extract_block("Python developer\nMoscow", &["education"], 10).is_empty());
        assert!(extract_experience("").is_empty());
        assert!(extract_education("Навыки: Python").is_empty());
    }

    #[test]
    fn test_window_counts_blank_lines() {
        let text = "Education\nMSU\n\nBachelor\n\n2015-2019";
        let block = extract_block(text, &["education"], 3);
        assert_eq!(block, vec!["MSU", "Bachelor"]);

        let block = extract_block(text, &["education"], 10);
        assert_eq!(block, vec!["MSU", "Bachelor", "2015-2019"]);
    }

    #[test]
    fn test_only_first_heading_is_used() {
        let text = "Опыт работы\nООО Ромашка\nОпыт работы\nООО Лютик";
        let block = extract_block(text, EXPERIENCE_KEYWORDS, 1);
        assert_eq!(block, vec!["ООО Ромашка"]);
    }

    #[test]
    fn test_heading_match_is_case_insensitive_substring() {
        let text = "Сводка\n  ОПЫТ РАБОТЫ (5 лет)  \n  Разработчик, ООО Ромашка  \n2019 — 2024";
        assert_eq!(extract_experience(text), vec!["Разработчик, ООО Ромашка", "2019 — 2024"]);
    }

    #[test]
    fn test_heading_on_last_line() {
        assert!(extract_education("Python\nОбразование").is_empty());
    }

    #[test]
    fn test_default_window_is_ten_lines() {
        let mut text = String::from("Образование");
        for i in 1..=15 {
            text.push_str(&format!("\nстрока {}", i));
        }
        let block = extract_education(&text);
        assert_eq!(block.len(), 10);
        assert_eq!(block.first().map(String::as_str), Some("строка 1"));
        assert_eq!(block.last().map(String::as_str), Some("строка 10"));
    }

    #[test]
    fn test_block_extractor_matches_free_function() {
        let text = "Иванов Иван\nВУЗ: МГУ\nФакультет ВМК\n\nКвалификация: бакалавр";
        let extractor = BlockExtractor::education().unwrap();
        assert_eq!(extractor.extract(text), extract_education(text));
        assert_eq!(extractor.extract(text), vec!["Факультет ВМК", "Квалификация: бакалавр"]);
    }

    #[test]
    fn test_block_extractor_custom_keywords() {
        let extractor = BlockExtractor::new(&["Work History", " "], 2).unwrap();
        let text = "Summary\nWORK HISTORY\nAcme Corp\nEngineer\nPython";
        assert_eq!(extractor.extract(text), vec!["Acme Corp", "Engineer"]);
    }

    #[test]
    fn test_block_extractor_without_keywords_never_matches() {
        let extractor = BlockExtractor::new::<&str>(&[], 10).unwrap();
        assert!(extractor.extract("Опыт работы\nООО Ромашка").is_empty());
    }
}
