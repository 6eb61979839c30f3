//! CLI interface for the resume parser

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "resume-parser")]
#[command(about = "Extract candidate fields from a folder of resumes")]
#[command(long_about = "Read PDF and DOCX resumes, extract name, contacts, skills, experience and education, then filter, search and summarize the candidates")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse every resume in a directory
    Parse {
        /// Directory with resume files (PDF, DOCX, TXT, MD)
        #[arg(short, long, default_value = "data/resumes")]
        input: PathBuf,

        /// Directory for extracted text and result files
        #[arg(short, long, default_value = "data/output")]
        output: PathBuf,

        /// Keep only candidates with these skills
        #[arg(short, long, num_args = 1..)]
        filter: Vec<String>,

        /// Match any of the filter skills instead of all of them
        #[arg(long, requires = "filter")]
        any: bool,

        /// Keep only candidates whose fields contain every keyword
        #[arg(short, long)]
        search: Option<String>,

        /// Print skill statistics and write a chart
        #[arg(long)]
        stats: bool,

        /// Copy matching source files into <output>/matched
        #[arg(long)]
        copy_matching: bool,

        /// Also write the results as a CSV spreadsheet
        #[arg(long)]
        export_csv: bool,
    },

    /// Extract a single document and print the record as JSON
    Extract {
        /// Path to a resume file
        file: PathBuf,
    },

    /// List the active skill vocabulary
    Skills,

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file location
    Path,
}
