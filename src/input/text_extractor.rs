//! Text extraction from various file formats

use crate::error::{Result, ResumeAnalyzerError};
use pulldown_cmark::{html, Parser};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Cursor, Read};
use std::path::Path;
use tokio::fs;

/// Turns a document into plain text. `extract` is the file-path entry;
/// `extract_bytes` handles an in-memory payload of the same format.
pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
    fn extract_bytes(&self, bytes: &[u8]) -> Result<String>;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await.map_err(|e| ResumeAnalyzerError::Io(e))?;
        self.extract_bytes(&bytes)
    }

    fn extract_bytes(&self, bytes: &[u8]) -> Result<String> {
        let text = pdf_extract::extract_text_from_mem(bytes).map_err(|e| {
            ResumeAnalyzerError::PdfExtraction(format!("Failed to extract text from PDF: {}", e))
        })?;
        Ok(text)
    }
}

pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await.map_err(|e| ResumeAnalyzerError::Io(e))?;
        self.extract_bytes(&bytes)
    }

    fn extract_bytes(&self, bytes: &[u8]) -> Result<String> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).map_err(|e| {
            ResumeAnalyzerError::DocxExtraction(format!("Failed to open DOCX container: {}", e))
        })?;

        let mut document_xml = String::new();
        archive
            .by_name("word/document.xml")
            .map_err(|e| {
                ResumeAnalyzerError::DocxExtraction(format!("DOCX has no document body: {}", e))
            })?
            .read_to_string(&mut document_xml)
            .map_err(|e| {
                ResumeAnalyzerError::DocxExtraction(format!("Failed to read document body: {}", e))
            })?;

        Self::document_xml_to_text(&document_xml)
    }
}

impl DocxExtractor {
    /// Collect `w:t` text runs, join paragraphs (`w:p`) with newlines.
    fn document_xml_to_text(document_xml: &str) -> Result<String> {
        let mut reader = Reader::from_str(document_xml);
        let mut paragraphs: Vec<String> = Vec::new();
        let mut current = String::new();
        let mut in_text_run = false;

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) if e.local_name().as_ref() == b"t" => {
                    in_text_run = true;
                }
                Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                    b"t" => in_text_run = false,
                    b"p" => paragraphs.push(std::mem::take(&mut current)),
                    _ => {}
                },
                Ok(Event::Empty(ref e)) => match e.local_name().as_ref() {
                    // A self-closing w:p is a blank line in the document
                    b"p" => paragraphs.push(String::new()),
                    b"br" => current.push('\n'),
                    b"tab" => current.push('\t'),
                    _ => {}
                },
                Ok(Event::Text(e)) if in_text_run => {
                    let run = e.unescape().map_err(|err| {
                        ResumeAnalyzerError::DocxExtraction(format!(
                            "Malformed text run: {}",
                            err
                        ))
                    })?;
                    current.push_str(&run);
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(ResumeAnalyzerError::DocxExtraction(format!(
                        "Malformed document XML: {}",
                        e
                    )));
                }
                _ => {}
            }
        }

        if !current.is_empty() {
            paragraphs.push(current);
        }

        Ok(paragraphs.join("\n"))
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| ResumeAnalyzerError::Io(e))?;
        Ok(content)
    }

    fn extract_bytes(&self, bytes: &[u8]) -> Result<String> {
        String::from_utf8(bytes.to_vec()).map_err(|e| {
            ResumeAnalyzerError::InvalidInput(format!("Text payload is not valid UTF-8: {}", e))
        })
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let markdown_content = fs::read_to_string(path)
            .await
            .map_err(|e| ResumeAnalyzerError::Io(e))?;
        Ok(self.strip_markup(&markdown_content))
    }

    fn extract_bytes(&self, bytes: &[u8]) -> Result<String> {
        let markdown_content = String::from_utf8(bytes.to_vec()).map_err(|e| {
            ResumeAnalyzerError::InvalidInput(format!(
                "Markdown payload is not valid UTF-8: {}",
                e
            ))
        })?;
        Ok(self.strip_markup(&markdown_content))
    }
}

impl MarkdownExtractor {
    fn strip_markup(&self, markdown: &str) -> String {
        let parser = Parser::new(markdown);
        let mut html_output = String::new();
        html::push_html(&mut html_output, parser);

        self.html_to_text(&html_output)
    }

    fn html_to_text(&self, html: &str) -> String {
        let text = html
            .replace("<br>", "\n")
            .replace("</p>", "\n\n")
            .replace("</h1>", "\n")
            .replace("</h2>", "\n")
            .replace("</h3>", "\n")
            .replace("</li>", "\n")
            .replace("&nbsp;", " ")
            .replace("&amp;", "&")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#39;", "'");

        let re = regex::Regex::new(r"<[^>]*>").unwrap();
        let clean_text = re.replace_all(&text, "");

        let lines: Vec<String> = clean_text
            .lines()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect();

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_markup_is_stripped() {
        let extractor = MarkdownExtractor;
        let text = extractor.strip_markup(
            "# Jane Smith\n\n**Senior Developer**\n\n- Python\n- Docker\n",
        );

        assert!(text.contains("Jane Smith"));
        assert!(text.contains("Senior Developer"));
        assert!(text.contains("Python"));
        assert!(!text.contains('#'));
        assert!(!text.contains("**"));
        assert!(!text.contains('-'));
    }

    #[test]
    fn test_plain_text_bytes_require_utf8() {
        let extractor = PlainTextExtractor;
        let text = extractor.extract_bytes(b"Python developer").unwrap();
        assert_eq!(text, "Python developer");

        let invalid = extractor.extract_bytes(&[0xff, 0xfe, 0x00]);
        assert!(invalid.is_err());
    }

    #[test]
    fn test_docx_document_xml_paragraphs() {
        let document_xml = r#"<?xml version="1.0"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>Jane Smith</w:t></w:r></w:p>
    <w:p><w:r><w:t>Python</w:t></w:r><w:r><w:t xml:space="preserve"> developer</w:t></w:r></w:p>
  </w:body>
</w:document>"#;

        let text = DocxExtractor::document_xml_to_text(document_xml).unwrap();
        assert_eq!(text, "Jane Smith\nPython developer");
    }

    #[test]
    fn test_docx_blank_paragraph_keeps_empty_segment() {
        let document_xml = r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body><w:p><w:r><w:t>Summary</w:t></w:r></w:p><w:p/><w:p><w:r><w:t>Details</w:t></w:r></w:p></w:body></w:document>"#;

        let text = DocxExtractor::document_xml_to_text(document_xml).unwrap();
        assert_eq!(text, "Summary\n\nDetails");
    }
}
