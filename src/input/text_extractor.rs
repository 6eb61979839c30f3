//! Text extraction from various file formats

use crate::error::{Result, ResumeParserError};
use pulldown_cmark::{html, Parser};
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use regex::Regex;
use std::io::{Cursor, Read};
use std::path::Path;
use std::sync::LazyLock;
use tokio::fs;

static HTML_TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("Invalid HTML tag regex"));

const DOCX_BODY_PART: &str = "word/document.xml";

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await.map_err(ResumeParserError::Io)?;
        let display = path.display().to_string();

        // pdf-extract is CPU bound and may panic on broken files
        let parsed = tokio::task::spawn_blocking(move || {
            pdf_extract::extract_text_from_mem(&bytes).map_err(|e| e.to_string())
        })
        .await
        .map_err(|e| ResumeParserError::PdfExtraction(format!("PDF reader crashed on '{}': {}", display, e)))?;

        let text = parsed.map_err(|e| {
            ResumeParserError::PdfExtraction(format!("Failed to extract text from PDF '{}': {}", display, e))
        })?;

        // Page breaks become plain line breaks
        Ok(text.replace('\u{000C}', "\n"))
    }
}

pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await.map_err(ResumeParserError::Io)?;
        let display = path.display().to_string();

        tokio::task::spawn_blocking(move || docx_bytes_to_text(bytes))
            .await
            .map_err(|e| ResumeParserError::DocxExtraction(format!("DOCX reader crashed on '{}': {}", display, e)))?
    }
}

/// Read the main document part out of a DOCX container.
pub fn docx_bytes_to_text(bytes: Vec<u8>) -> Result<String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| ResumeParserError::DocxExtraction(format!("Not a DOCX archive: {}", e)))?;

    let mut xml = String::new();
    archive
        .by_name(DOCX_BODY_PART)
        .map_err(|e| ResumeParserError::DocxExtraction(format!("Missing {}: {}", DOCX_BODY_PART, e)))?
        .read_to_string(&mut xml)?;

    docx_xml_to_text(&xml)
}

/// Flatten WordprocessingML into lines.
///
/// Body paragraphs come first in document order, followed by the paragraphs
/// found inside table cells. Blank paragraphs are dropped.
pub fn docx_xml_to_text(xml: &str) -> Result<String> {
    let mut reader = Reader::from_str(xml);

    let mut body_lines = Vec::new();
    let mut table_lines = Vec::new();
    let mut paragraphs: Vec<String> = Vec::new();
    let mut table_depth = 0usize;
    let mut in_text = false;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| ResumeParserError::DocxExtraction(format!("Malformed document XML: {}", e)))?;

        match event {
            Event::Start(e) => match e.name().as_ref() {
                b"w:tbl" => table_depth += 1,
                b"w:p" => paragraphs.push(String::new()),
                b"w:t" => in_text = true,
                _ => {}
            },
            Event::End(e) => match e.name().as_ref() {
                b"w:tbl" => table_depth = table_depth.saturating_sub(1),
                b"w:t" => in_text = false,
                b"w:p" => {
                    if let Some(paragraph) = paragraphs.pop() {
                        let paragraph = paragraph.trim();
                        if !paragraph.is_empty() {
                            if table_depth > 0 {
                                table_lines.push(paragraph.to_string());
                            } else {
                                body_lines.push(paragraph.to_string());
                            }
                        }
                    }
                }
                _ => {}
            },
            Event::Empty(e) => {
                if let Some(current) = paragraphs.last_mut() {
                    match e.name().as_ref() {
                        b"w:tab" => current.push('\t'),
                        b"w:br" | b"w:cr" => current.push('\n'),
                        _ => {}
                    }
                }
            }
            Event::Text(t) if in_text => {
                let text = t
                    .unescape()
                    .map_err(|e| ResumeParserError::DocxExtraction(format!("Bad text run: {}", e)))?;
                if let Some(current) = paragraphs.last_mut() {
                    current.push_str(&text);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    body_lines.extend(table_lines);
    Ok(body_lines.join("\n"))
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let content = fs::read_to_string(path).await.map_err(ResumeParserError::Io)?;
        Ok(content)
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let markdown_content = fs::read_to_string(path).await.map_err(ResumeParserError::Io)?;
        Ok(Self::markdown_to_text(&markdown_content))
    }
}

impl MarkdownExtractor {
    pub fn markdown_to_text(markdown: &str) -> String {
        let parser = Parser::new(markdown);
        let mut html_output = String::new();
        html::push_html(&mut html_output, parser);

        Self::html_to_text(&html_output)
    }

    fn html_to_text(html: &str) -> String {
        let text = html
            .replace("<br>", "\n")
            .replace("<br />", "\n")
            .replace("</p>", "\n\n")
            .replace("</li>", "\n")
            .replace("&nbsp;", " ");

        let stripped = HTML_TAG_RE.replace_all(&text, "");

        // Entities last so escaped angle brackets survive tag stripping
        let decoded = stripped
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#39;", "'")
            .replace("&amp;", "&");

        decoded
            .lines()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCX_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>Иванов Иван Иванович</w:t></w:r></w:p>
    <w:tbl>
      <w:tr>
        <w:tc><w:p><w:r><w:t>Тел: +7 (999) 123-45-67</w:t></w:r></w:p></w:tc>
        <w:tc><w:p/></w:tc>
      </w:tr>
    </w:tbl>
    <w:p><w:r><w:t xml:space="preserve">Опыт </w:t></w:r><w:r><w:t>работы</w:t></w:r></w:p>
    <w:p></w:p>
    <w:p><w:r><w:t>R&amp;D</w:t><w:tab/><w:t>2020</w:t></w:r></w:p>
  </w:body>
</w:document>"#;

    #[test]
    fn test_docx_body_before_tables() {
        let text = docx_xml_to_text(DOCX_XML).unwrap();
        assert_eq!(
            text,
            "Иванов Иван Иванович\nОпыт работы\nR&D\t2020\nТел: +7 (999) 123-45-67"
        );
    }

    #[test]
    fn test_docx_empty_document() {
        let xml = r#"<w:document xmlns:w="x"><w:body/></w:document>"#;
        assert_eq!(docx_xml_to_text(xml).unwrap(), "");
    }

    #[test]
    fn test_docx_rejects_non_archive() {
        let result = docx_bytes_to_text(b"definitely not a zip".to_vec());
        assert!(matches!(result, Err(ResumeParserError::DocxExtraction(_))));
    }

    #[test]
    fn test_markdown_to_text_strips_formatting() {
        let text = MarkdownExtractor::markdown_to_text("# Петров Пётр\n\n**Навыки:** Rust & Go\n\n- Docker\n- Linux");
        assert!(text.contains("Петров Пётр"));
        assert!(text.contains("Навыки: Rust & Go"));
        assert!(text.contains("Docker"));
        assert!(!text.contains("**"));
        assert!(!text.contains('#'));
        assert!(!text.contains("<li>"));
    }
}
