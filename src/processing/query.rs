//! Candidate filtering by skills and free-text keyword search

use crate::extraction::CandidateRecord;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SkillMatchMode {
    /// Every requested skill must be present
    #[default]
    All,
    /// At least one requested skill must be present
    Any,
}

/// Case-insensitive skill check.
pub fn matches_skills<S: AsRef<str>>(record: &CandidateRecord, skills: &[S], mode: SkillMatchMode) -> bool {
    let candidate: HashSet<String> = record.skills.iter().map(|s| s.to_lowercase()).collect();
    let mut wanted = skills.iter().map(|s| s.as_ref().to_lowercase());

    match mode {
        SkillMatchMode::All => wanted.all(|skill| candidate.contains(&skill)),
        SkillMatchMode::Any => wanted.any(|skill| candidate.contains(&skill)),
    }
}

/// True when every whitespace-separated keyword of `query` occurs somewhere
/// in the record's text fields (case-insensitive substring match).
pub fn matches_search(record: &CandidateRecord, query: &str) -> bool {
    let haystack = searchable_text(record);

    query
        .to_lowercase()
        .split_whitespace()
        .all(|keyword| haystack.contains(keyword))
}

fn searchable_text(record: &CandidateRecord) -> String {
    let skills: Vec<&str> = record.skills.iter().map(String::as_str).collect();

    [
        record.name.clone(),
        record.email.clone(),
        record.phone.clone(),
        skills.join(" "),
        record.experience.join(" "),
        record.education.join(" "),
    ]
    .join(" ")
    .to_lowercase()
}

/// Combined skill filter and keyword search.
#[derive(Debug, Clone, Default)]
pub struct CandidateFilter {
    skills: Vec<String>,
    mode: SkillMatchMode,
    query: Option<String>,
}

impl CandidateFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_skills(mut self, skills: Vec<String>, mode: SkillMatchMode) -> Self {
        self.skills = skills;
        self.mode = mode;
        self
    }

    pub fn with_search(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn matches(&self, record: &CandidateRecord) -> bool {
        let skills_ok = self.skills.is_empty() || matches_skills(record, &self.skills, self.mode);
        let search_ok = self
            .query
            .as_deref()
            .map_or(true, |query| matches_search(record, query));

        skills_ok && search_ok
    }

    pub fn apply(&self, records: &[CandidateRecord]) -> Vec<CandidateRecord> {
        records.iter().filter(|r| self.matches(r)).cloned().collect()
    }
}
