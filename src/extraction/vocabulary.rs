//! Closed skill vocabulary and whole-word skill matching

use crate::error::{Result, ResumeParserError};
use log::debug;
use regex::RegexSet;
use std::collections::{BTreeSet, HashSet};
use std::path::Path;
use std::sync::LazyLock;

/// Built-in skill terms in canonical casing.
///
/// Every entry starts and ends with a word character, otherwise the
/// `\b` anchors used for matching could never be satisfied.
pub const DEFAULT_SKILLS: &[&str] = &[
    // Languages
    "python", "java", "javascript", "typescript", "kotlin", "swift", "golang", "rust",
    "php", "ruby", "scala", "perl", "bash", "powershell", "matlab", "1c",
    // Web
    "html", "css", "sass", "react", "angular", "vue", "node.js", "express", "jquery",
    "bootstrap", "django", "flask", "fastapi", "spring", "laravel", "asp.net", "graphql",
    "rest api",
    // Data
    "sql", "mysql", "postgresql", "sqlite", "oracle", "mongodb", "redis", "clickhouse",
    "elasticsearch", "pandas", "numpy", "scikit-learn", "tensorflow", "pytorch", "hadoop",
    "spark", "airflow", "kafka", "rabbitmq", "tableau", "power bi", "machine learning",
    "data science",
    // Infrastructure
    "docker", "kubernetes", "ansible", "terraform", "jenkins", "ci/cd", "nginx", "apache",
    "linux", "unix", "windows", "aws", "azure", "gcp", "git", "github", "gitlab", "bitbucket",
    // Testing
    "selenium", "pytest", "junit", "postman",
    // Office and process
    "excel", "word", "powerpoint", "photoshop", "figma", "jira", "confluence", "agile",
    "scrum", "kanban",
    // Russian-language terms
    "управление проектами", "английский язык", "деловая переписка", "ведение переговоров",
];

static BUILTIN: LazyLock<SkillVocabulary> = LazyLock::new(|| {
    SkillVocabulary::new(DEFAULT_SKILLS.iter().copied()).expect("Invalid built-in skill vocabulary")
});

/// Immutable set of canonical skill terms compiled into one matcher.
#[derive(Debug, Clone)]
pub struct SkillVocabulary {
    terms: Vec<String>,
    matcher: RegexSet,
}

impl SkillVocabulary {
    /// Build a vocabulary from canonical terms.
    ///
    /// Blank entries are skipped and case-insensitive duplicates keep their
    /// first spelling. Fails when a term cannot be compiled into a pattern.
    pub fn new<I, S>(terms: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut canonical = Vec::new();

        for term in terms {
            let term = term.as_ref().trim();
            if term.is_empty() {
                continue;
            }
            if seen.insert(term.to_lowercase()) {
                canonical.push(term.to_string());
            }
        }

        let patterns: Vec<String> = canonical
            .iter()
            .map(|term| format!(r"\b{}\b", regex::escape(&term.to_lowercase())))
            .collect();

        let matcher = RegexSet::new(&patterns)
            .map_err(|e| ResumeParserError::Vocabulary(format!("Failed to compile skill patterns: {}", e)))?;

        debug!("Compiled skill vocabulary with {} terms", canonical.len());

        Ok(Self {
            terms: canonical,
            matcher,
        })
    }

    /// Load a vocabulary file: one term per line, `#` starts a comment line.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ResumeParserError::Vocabulary(format!("Failed to read skills file '{}': {}", path.display(), e))
        })?;

        let terms = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.starts_with('#'));

        Self::new(terms)
    }

    /// The process-wide built-in vocabulary.
    pub fn builtin() -> &'static SkillVocabulary {
        &BUILTIN
    }

    /// Terms occurring in `text` as whole words or whole phrases.
    pub fn find_in(&self, text: &str) -> BTreeSet<String> {
        let lowered = text.to_lowercase();

        self.matcher
            .matches(&lowered)
            .into_iter()
            .map(|index| self.terms[index].clone())
            .collect()
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn contains(&self, term: &str) -> bool {
        let lowered = term.to_lowercase();
        self.terms.iter().any(|t| t.to_lowercase() == lowered)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl Default for SkillVocabulary {
    fn default() -> Self {
        Self::builtin().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_java_and_javascript_are_independent() {
        let vocab = SkillVocabulary::builtin();

        assert_eq!(vocab.find_in("Senior JavaScript developer"), set(&["javascript"]));
        assert_eq!(vocab.find_in("Java backend"), set(&["java"]));
        assert_eq!(vocab.find_in("Java и JavaScript"), set(&["java", "javascript"]));
    }

    #[test]
    fn test_multi_word_phrase_requires_contiguous_match() {
        let vocab = SkillVocabulary::new(["Machine Learning", "Power BI"]).unwrap();

        assert_eq!(vocab.find_in("applied machine learning daily"), set(&["Machine Learning"]));
        assert!(vocab.find_in("machine-assisted learning").is_empty());
        assert!(vocab.find_in("power tools, BI dashboards").is_empty());
    }

    #[test]
    fn test_canonical_casing_restored() {
        let vocab = SkillVocabulary::new(["PostgreSQL", "Docker"]).unwrap();
        assert_eq!(vocab.find_in("POSTGRESQL and docker"), set(&["Docker", "PostgreSQL"]));
    }

    #[test]
    fn test_duplicates_and_blanks_skipped() {
        let vocab = SkillVocabulary::new(["Rust", "rust", "  ", "Go lang"]).unwrap();
        assert_eq!(vocab.terms(), &["Rust".to_string(), "Go lang".to_string()]);
        assert!(vocab.contains("RUST"));
        assert_eq!(vocab.len(), 2);
    }

    #[test]
    fn test_cyrillic_phrases_match_on_word_boundaries() {
        let vocab = SkillVocabulary::builtin();
        let found = vocab.find_in("Навыки: Управление проектами, английский язык (B2)");
        assert!(found.contains("управление проектами"));
        assert!(found.contains("английский язык"));
    }

    #[test]
    fn test_builtin_entries_are_lowercase_and_unique() {
        let vocab = SkillVocabulary::builtin();
        assert_eq!(vocab.len(), DEFAULT_SKILLS.len());
        for term in vocab.terms() {
            assert_eq!(term, &term.to_lowercase());
        }
    }

    #[test]
    fn test_from_file_skips_comments() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# custom list").unwrap();
        writeln!(file, "Haskell").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "  Elixir  ").unwrap();

        let vocab = SkillVocabulary::from_file(file.path()).unwrap();
        assert_eq!(vocab.terms(), &["Haskell".to_string(), "Elixir".to_string()]);
        assert_eq!(vocab.find_in("elixir and haskell"), set(&["Elixir", "Haskell"]));
    }

    #[test]
    fn test_empty_vocabulary_matches_nothing() {
        let vocab = SkillVocabulary::new(Vec::<String>::new()).unwrap();
        assert!(vocab.is_empty());
        assert!(vocab.find_in("python docker").is_empty());
    }
}
