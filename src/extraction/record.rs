//! Candidate record assembly

use crate::config::ExtractionConfig;
use crate::error::Result;
use crate::extraction::blocks::{extract_education, extract_experience, BlockExtractor};
use crate::extraction::fields::{extract_email, extract_name, extract_name_within, extract_phone, extract_skills};
use crate::extraction::vocabulary::SkillVocabulary;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Structured fields extracted from one resume.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub skills: BTreeSet<String>,
    pub experience: Vec<String>,
    pub education: Vec<String>,
    #[serde(default)]
    pub filename: String,
}

impl CandidateRecord {
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = filename.into();
        self
    }

    /// True when no extractor found anything.
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
            && self.email.is_empty()
            && self.phone.is_empty()
            && self.skills.is_empty()
            && self.experience.is_empty()
            && self.education.is_empty()
    }
}

/// Run every extractor with default settings over normalized text.
pub fn assemble(text: &str) -> CandidateRecord {
    CandidateRecord {
        name: extract_name(text),
        email: extract_email(text),
        phone: extract_phone(text),
        skills: extract_skills(text),
        experience: extract_experience(text),
        education: extract_education(text),
        filename: String::new(),
    }
}

/// Configured extraction pipeline, shareable across worker tasks.
#[derive(Debug, Clone)]
pub struct ResumeExtractor {
    vocabulary: Arc<SkillVocabulary>,
    experience: BlockExtractor,
    education: BlockExtractor,
    name_scan_lines: usize,
}

impl ResumeExtractor {
    pub fn new(vocabulary: Arc<SkillVocabulary>, settings: &ExtractionConfig) -> Result<Self> {
        let experience = BlockExtractor::new(settings.experience_keywords.as_slice(), settings.max_block_lines)?;
        let education = BlockExtractor::new(settings.education_keywords.as_slice(), settings.max_block_lines)?;

        debug!(
            "Resume extractor ready: {} skills, {} experience / {} education keywords",
            vocabulary.len(),
            settings.experience_keywords.len(),
            settings.education_keywords.len()
        );

        Ok(Self {
            vocabulary,
            experience,
            education,
            name_scan_lines: settings.name_scan_lines,
        })
    }

    pub fn vocabulary(&self) -> &SkillVocabulary {
        &self.vocabulary
    }

    pub fn assemble(&self, text: &str) -> CandidateRecord {
        CandidateRecord {
            name: extract_name_within(text, self.name_scan_lines),
            email: extract_email(text),
            phone: extract_phone(text),
            skills: self.vocabulary.find_in(text),
            experience: self.experience.extract(text),
            education: self.education.extract(text),
            filename: String::new(),
        }
    }
}

impl Default for ResumeExtractor {
    fn default() -> Self {
        Self {
            vocabulary: Arc::new(SkillVocabulary::default()),
            experience: BlockExtractor::experience().expect("Invalid experience keywords"),
            education: BlockExtractor::education().expect("Invalid education keywords"),
            name_scan_lines: crate::extraction::fields::NAME_SCAN_LINES,
        }
    }
}
