//! Heuristic field extraction from normalized resume text
//! Normalizer, field extractors, block extractors and record assembly

pub mod normalizer;
pub mod vocabulary;
pub mod fields;
pub mod blocks;
pub mod record;

pub use normalizer::normalize;
pub use record::{assemble, CandidateRecord, ResumeExtractor};
pub use vocabulary::SkillVocabulary;
