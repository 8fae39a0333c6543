//! Uploaded file parsing and text extraction.
//!
//! The extractor is picked from the declared media type, falling back to
//! the file name for Word documents. Anything unrecognized is decoded as
//! UTF-8 text.

use docqa_core::{AppError, AppResult};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Cursor, Read};

/// Part of a DOCX package holding the document body.
const DOCX_BODY_PART: &str = "word/document.xml";

/// Kind of uploaded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Pdf,
    Word,
    PlainText,
}

impl MediaKind {
    /// Classify an upload by media type, then by name.
    ///
    /// A media type mentioning "pdf" selects PDF; one mentioning "word", or
    /// a name ending in `.docx`, selects Word; everything else is text.
    pub fn detect(media_type: &str, name: &str) -> Self {
        let media_type = media_type.to_ascii_lowercase();

        if media_type.contains("pdf") {
            Self::Pdf
        } else if media_type.contains("word") || name.to_ascii_lowercase().ends_with(".docx") {
            Self::Word
        } else {
            Self::PlainText
        }
    }

    /// Guess a media type from a file name, for callers that only have a path.
    pub fn guess_media_type(name: &str) -> &'static str {
        let lower = name.to_ascii_lowercase();
        if lower.ends_with(".pdf") {
            "application/pdf"
        } else if lower.ends_with(".docx") {
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        } else if lower.ends_with(".md") || lower.ends_with(".markdown") {
            "text/markdown"
        } else {
            "text/plain"
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Word => "docx",
            Self::PlainText => "text",
        }
    }
}

/// Extract plain text from uploaded bytes.
///
/// Returns the text with surrounding whitespace trimmed. An empty result is
/// not an error here; the caller decides what an empty document means.
pub fn extract_text(bytes: &[u8], media_type: &str, name: &str) -> AppResult<String> {
    let kind = MediaKind::detect(media_type, name);

    tracing::debug!(
        "Extracting {} ({} bytes) as {}",
        name,
        bytes.len(),
        kind.as_str()
    );

    let raw = match kind {
        MediaKind::Pdf => extract_pdf(bytes)?,
        MediaKind::Word => extract_docx(bytes)?,
        MediaKind::PlainText => String::from_utf8_lossy(bytes).into_owned(),
    };

    Ok(raw.trim_start_matches('\u{feff}').trim().to_string())
}

fn extract_pdf(bytes: &[u8]) -> AppResult<String> {
    pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| AppError::Extraction(format!("Failed to parse PDF: {}", e)))
}

fn extract_docx(bytes: &[u8]) -> AppResult<String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| AppError::Extraction(format!("Not a valid DOCX package: {}", e)))?;

    let mut xml = String::new();
    archive
        .by_name(DOCX_BODY_PART)
        .map_err(|e| AppError::Extraction(format!("DOCX has no {}: {}", DOCX_BODY_PART, e)))?
        .read_to_string(&mut xml)
        .map_err(|e| AppError::Extraction(format!("Failed to read {}: {}", DOCX_BODY_PART, e)))?;

    docx_body_text(&xml)
}

/// Collect run text from WordprocessingML.
///
/// Paragraphs end with a blank line so paragraph structure survives into
/// chunking; tabs and breaks are kept as whitespace.
fn docx_body_text(xml: &str) -> AppResult<String> {
    let mut reader = Reader::from_str(xml);
    let mut text = String::new();
    let mut in_run_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                if e.name().as_ref() == b"w:t" {
                    in_run_text = true;
                }
            }
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:t" => in_run_text = false,
                b"w:p" => text.push_str("\n\n"),
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"w:tab" => text.push('\t'),
                b"w:br" | b"w:cr" => text.push('\n'),
                _ => {}
            },
            Ok(Event::Text(t)) if in_run_text => {
                let decoded = t
                    .unescape()
                    .map_err(|e| AppError::Extraction(format!("Bad DOCX text run: {}", e)))?;
                text.push_str(&decoded);
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(AppError::Extraction(format!(
                    "Malformed DOCX body at byte {}: {}",
                    reader.buffer_position(),
                    e
                )))
            }
            _ => {}
        }
    }

    Ok(text)
}
