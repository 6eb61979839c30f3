//! Aggregate skill statistics over candidate records

use crate::extraction::CandidateRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillCount {
    pub skill: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillStatistics {
    pub total_candidates: usize,
    /// Mean skills per candidate, two decimals
    pub average_skills: f64,
    /// Most frequent skills, ties kept in first-seen order
    pub top_skills: Vec<SkillCount>,
}

impl SkillStatistics {
    pub fn compute(records: &[CandidateRecord], top_n: usize) -> Self {
        let total_candidates = records.len();

        let mut counts: Vec<SkillCount> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();
        let mut mentions = 0usize;

        for skill in records.iter().flat_map(|r| r.skills.iter()) {
            mentions += 1;
            let skill = skill.to_lowercase();
            match positions.get(&skill) {
                Some(&pos) => counts[pos].count += 1,
                None => {
                    positions.insert(skill.clone(), counts.len());
                    counts.push(SkillCount { skill, count: 1 });
                }
            }
        }

        // Stable sort keeps first-seen order among equal counts
        counts.sort_by(|a, b| b.count.cmp(&a.count));
        counts.truncate(top_n);

        let average_skills = if total_candidates == 0 {
            0.0
        } else {
            (mentions as f64 / total_candidates as f64 * 100.0).round() / 100.0
        };

        Self {
            total_candidates,
            average_skills,
            top_skills: counts,
        }
    }

    pub fn has_skills(&self) -> bool {
        !self.top_skills.is_empty()
    }
}
