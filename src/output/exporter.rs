//! Result export: JSON summary, CSV spreadsheet, text dumps and file copies

use crate::error::Result;
use crate::extraction::CandidateRecord;
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};

pub const SUMMARY_JSON: &str = "summary.json";
pub const SUMMARY_CSV: &str = "summary.csv";
pub const MATCHED_DIR: &str = "matched";

const CSV_HEADER: [&str; 7] = ["name", "email", "phone", "skills", "experience", "education", "filename"];

/// Write records as a JSON array. Non-ASCII text is kept as is.
pub fn write_summary_json(records: &[CandidateRecord], path: &Path, pretty: bool) -> Result<()> {
    let content = if pretty {
        serde_json::to_string_pretty(records)?
    } else {
        serde_json::to_string(records)?
    };

    ensure_parent(path)?;
    fs::write(path, content)?;
    debug!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}

/// Write records as a spreadsheet-friendly CSV, list fields joined by `; `.
pub fn write_summary_csv(records: &[CandidateRecord], path: &Path) -> Result<()> {
    ensure_parent(path)?;
    let mut writer = csv::Writer::from_path(path)?;

    writer.write_record(CSV_HEADER)?;
    for record in records {
        let skills = record.skills.iter().map(String::as_str).collect::<Vec<_>>().join("; ");
        let experience = record.experience.join("; ");
        let education = record.education.join("; ");

        writer.write_record([
            record.name.as_str(),
            record.email.as_str(),
            record.phone.as_str(),
            skills.as_str(),
            experience.as_str(),
            education.as_str(),
            record.filename.as_str(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Save a document's normalized text as `<stem>.txt` inside `output_dir`.
pub async fn save_normalized_text(output_dir: &Path, filename: &str, text: &str) -> Result<PathBuf> {
    let stem = Path::new(filename)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| filename.to_string());
    let target = output_dir.join(format!("{}.txt", stem));

    tokio::fs::create_dir_all(output_dir).await?;
    tokio::fs::write(&target, text).await?;
    Ok(target)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyReport {
    pub copied: usize,
    pub failed: usize,
}

/// Copy each record's source document from `input_dir` into `matched_dir`.
/// A failed copy is logged and counted, the rest still get copied.
pub async fn copy_matching(records: &[CandidateRecord], input_dir: &Path, matched_dir: &Path) -> Result<CopyReport> {
    tokio::fs::create_dir_all(matched_dir).await?;

    let mut report = CopyReport::default();
    for record in records {
        let source = input_dir.join(&record.filename);
        let target = matched_dir.join(&record.filename);

        match tokio::fs::copy(&source, &target).await {
            Ok(_) => report.copied += 1,
            Err(e) => {
                warn!("Failed to copy {}: {}", record.filename, e);
                report.failed += 1;
            }
        }
    }

    Ok(report)
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> CandidateRecord {
        CandidateRecord {
            name: "Иванов Иван".to_string(),
            email: "ivanov@example.com".to_string(),
            phone: "8 912 456 78 90".to_string(),
            skills: ["python", "docker"].iter().map(|s| s.to_string()).collect(),
            experience: vec!["ООО Ромашка".to_string(), "Тимлид".to_string()],
            education: vec![],
            filename: "ivanov.pdf".to_string(),
        }
    }

    #[test]
    fn test_json_keeps_cyrillic_and_field_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(SUMMARY_JSON);
        write_summary_json(&[sample()], &path, true).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("Иванов Иван"));
        assert!(content.find("\"name\"").unwrap() < content.find("\"filename\"").unwrap());

        let parsed: Vec<CandidateRecord> = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, vec![sample()]);
    }

    #[test]
    fn test_csv_layout() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(SUMMARY_CSV);
        write_summary_csv(&[sample()], &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some("name,email,phone,skills,experience,education,filename"));
        assert_eq!(
            lines.next(),
            Some("Иванов Иван,ivanov@example.com,8 912 456 78 90,docker; python,ООО Ромашка; Тимлид,,ivanov.pdf")
        );
    }

    #[tokio::test]
    async fn test_save_normalized_text_uses_stem() {
        let dir = TempDir::new().unwrap();
        let target = save_normalized_text(dir.path(), "cv.docx", "text").await.unwrap();
        assert_eq!(target, dir.path().join("cv.txt"));
        assert_eq!(fs::read_to_string(target).unwrap(), "text");
    }

    #[tokio::test]
    async fn test_copy_matching_counts_failures() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        fs::write(input.path().join("ivanov.pdf"), b"%PDF").unwrap();

        let missing = CandidateRecord {
            filename: "gone.pdf".to_string(),
            ..CandidateRecord::default()
        };
        let matched = output.path().join(MATCHED_DIR);
        let report = copy_matching(&[sample(), missing], input.path(), &matched).await.unwrap();

        assert_eq!(report, CopyReport { copied: 1, failed: 1 });
        assert!(matched.join("ivanov.pdf").exists());
    }
}
