//! Configuration management for the resume parser

use crate::error::{Result, ResumeParserError};
use crate::extraction::blocks::{EDUCATION_KEYWORDS, EXPERIENCE_KEYWORDS};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Upper bound for `output.top_skills`.
pub const MAX_TOP_SKILLS: usize = 50;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub extraction: ExtractionConfig,
    pub processing: ProcessingConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Lines captured after an experience/education heading
    pub max_block_lines: usize,
    /// Leading lines searched for the candidate's full name
    pub name_scan_lines: usize,
    pub experience_keywords: Vec<String>,
    pub education_keywords: Vec<String>,
    /// Custom skill vocabulary, one term per line. Built-in list when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingConfig {
    pub max_concurrency: usize,
    /// Per-document time limit in seconds, 0 disables it.
    ///
    /// An expired document is reported as failed and its worker slot is
    /// released, but a PDF parse already running on a blocking thread cannot
    /// be interrupted and finishes in the background. A folder of
    /// pathological PDFs can therefore occupy more blocking threads than
    /// `max_concurrency`.
    pub document_timeout_secs: u64,
    pub save_text: bool,
    pub show_progress: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub pretty_json: bool,
    pub color_output: bool,
    /// Skills shown in statistics and the chart, 1 to [`MAX_TOP_SKILLS`]
    pub top_skills: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            max_block_lines: 10,
            name_scan_lines: 5,
            experience_keywords: EXPERIENCE_KEYWORDS.iter().map(|s| s.to_string()).collect(),
            education_keywords: EDUCATION_KEYWORDS.iter().map(|s| s.to_string()).collect(),
            skills_file: None,
        }
    }
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            max_concurrency: 8,
            document_timeout_secs: 30,
            save_text: true,
            show_progress: true,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty_json: true,
            color_output: true,
            top_skills: 10,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            extraction: ExtractionConfig::default(),
            processing: ProcessingConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    /// Load from the default location, writing defaults there on first use.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Load an explicit configuration file. A missing file is an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ResumeParserError::Configuration(format!(
                "Config file does not exist: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| ResumeParserError::Configuration(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ResumeParserError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    /// The file `--config` points at, or the default location.
    pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
        explicit.map(Path::to_path_buf).unwrap_or_else(Self::config_path)
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-parser")
            .join("config.toml")
    }

    fn validate(&self) -> Result<()> {
        if self.processing.max_concurrency == 0 {
            return Err(ResumeParserError::Configuration(
                "processing.max_concurrency must be at least 1".to_string(),
            ));
        }
        if self.extraction.name_scan_lines == 0 {
            return Err(ResumeParserError::Configuration(
                "extraction.name_scan_lines must be at least 1".to_string(),
            ));
        }
        if !(1..=MAX_TOP_SKILLS).contains(&self.output.top_skills) {
            return Err(ResumeParserError::Configuration(format!(
                "output.top_skills must be between 1 and {}",
                MAX_TOP_SKILLS
            )));
        }
        Ok(())
    }
}
