//! Paragraph-aware text chunking.
//!
//! Text is normalized, capped, split on blank lines and then greedily packed
//! into chunks of at most `max_chunk_length` characters. A single paragraph
//! longer than the limit becomes its own oversized chunk; it is never split.
//! All lengths are counted in characters, not bytes.

/// Separator placed between paragraphs packed into the same chunk.
const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// Chunking bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkerConfig {
    /// Normalized text is cut to this many characters first
    pub max_document_chars: usize,

    /// Packing target for each chunk
    pub max_chunk_length: usize,

    /// Chunks beyond this count are dropped
    pub max_chunks: usize,
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self {
            max_document_chars: 200_000,
            max_chunk_length: 900,
            max_chunks: 48,
        }
    }
}

/// Split text into retrieval chunks.
///
/// Empty or whitespace-only input yields no chunks. Text that fits in one
/// chunk after normalization is returned whole, blank lines included.
pub fn chunk_text(text: &str, config: &ChunkerConfig) -> Vec<String> {
    let normalized = normalize(text);
    let capped = truncate_chars(&normalized, config.max_document_chars);

    if capped.is_empty() || config.max_chunks == 0 {
        return Vec::new();
    }

    if capped.chars().count() <= config.max_chunk_length {
        return vec![capped.to_string()];
    }

    let separator_len = PARAGRAPH_SEPARATOR.chars().count();
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for paragraph in paragraphs(capped) {
        let paragraph_len = paragraph.chars().count();

        if !current.is_empty() && current_len + separator_len + paragraph_len > config.max_chunk_length
        {
            chunks.push(std::mem::take(&mut current));
            current.push_str(paragraph);
            current_len = paragraph_len;
        } else {
            if !current.is_empty() {
                current.push_str(PARAGRAPH_SEPARATOR);
                current_len += separator_len;
            }
            current.push_str(paragraph);
            current_len += paragraph_len;
        }

        if chunks.len() >= config.max_chunks {
            break;
        }
    }

    if !current.is_empty() && chunks.len() < config.max_chunks {
        chunks.push(current);
    }

    if chunks.len() >= config.max_chunks {
        tracing::debug!("Chunk cap of {} reached, remaining text dropped", config.max_chunks);
    }
    chunks.truncate(config.max_chunks);

    chunks
}

/// Unify line endings, drop trailing blanks on each line, trim the ends.
fn normalize(text: &str) -> String {
    let unified = text.replace("\r\n", "\n").replace('\r', "\n");

    unified
        .split('\n')
        .map(|line| line.trim_end_matches([' ', '\t']))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Non-empty, trimmed paragraphs separated by two or more newlines.
fn paragraphs(text: &str) -> impl Iterator<Item = &str> {
    text.split(PARAGRAPH_SEPARATOR)
        .map(str::trim)
        .filter(|p| !p.is_empty())
}

/// Longest prefix of `text` holding at most `max_chars` characters.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}
