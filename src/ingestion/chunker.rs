//! Recursive character chunking with overlap
//!
//! Splits long report text into overlapping passages, preferring paragraph,
//! line, and word boundaries before falling back to hard character cuts.
//! Lengths are counted in grapheme clusters, not bytes; the report corpus is
//! Korean.

use std::collections::VecDeque;

use unicode_segmentation::UnicodeSegmentation;

/// Text splitter with configurable size and overlap
pub struct TextChunker {
    /// Maximum chunk size in characters
    chunk_size: usize,
    /// Characters of trailing context carried into the next chunk
    overlap: usize,
    /// Boundary preference, strongest first; the empty separator means
    /// single-character splits
    separators: Vec<String>,
}

impl TextChunker {
    /// Create a chunker with the given size and overlap
    pub fn new(chunk_size: usize, overlap: usize) -> Self {
        assert!(chunk_size > 0, "chunk_size must be positive");
        assert!(overlap < chunk_size, "overlap must be smaller than chunk_size");
        Self {
            chunk_size,
            overlap,
            separators: vec![
                "\n\n".to_string(),
                "\n".to_string(),
                " ".to_string(),
                String::new(),
            ],
        }
    }

    /// Split text into overlapping chunks of at most `chunk_size` characters.
    ///
    /// Deterministic for a given input and configuration.
    pub fn split(&self, text: &str) -> Vec<String> {
        self.split_recursive(text, &self.separators)
    }

    fn split_recursive(&self, text: &str, separators: &[String]) -> Vec<String> {
        let (separator, remaining) = pick_separator(text, separators);
        let pieces = split_keeping_separator(text, separator);

        let mut chunks = Vec::new();
        let mut pending: Vec<String> = Vec::new();

        for piece in pieces {
            if char_len(&piece) < self.chunk_size {
                pending.push(piece);
                continue;
            }

            // A piece too large for one chunk: flush what we have, then
            // split it again on the next weaker boundary.
            if !pending.is_empty() {
                chunks.extend(self.merge_pieces(&pending));
                pending.clear();
            }
            if remaining.is_empty() {
                chunks.push(piece);
            } else {
                chunks.extend(self.split_recursive(&piece, remaining));
            }
        }

        if !pending.is_empty() {
            chunks.extend(self.merge_pieces(&pending));
        }

        chunks
    }

    /// Greedily pack pieces into chunks, carrying up to `overlap` characters
    /// of trailing pieces into the start of the next chunk.
    fn merge_pieces(&self, pieces: &[String]) -> Vec<String> {
        let mut chunks = Vec::new();
        let mut window: VecDeque<&String> = VecDeque::new();
        let mut total = 0usize;

        for piece in pieces {
            let len = char_len(piece);

            if total + len > self.chunk_size && !window.is_empty() {
                push_chunk(&mut chunks, &window);
                // Shrink the window to the overlap budget, and further if
                // the incoming piece would still not fit.
                while total > self.overlap
                    || (total + len > self.chunk_size && total > 0)
                {
                    let dropped = window.pop_front().expect("window is non-empty");
                    total -= char_len(dropped);
                }
            }

            window.push_back(piece);
            total += len;
        }

        if !window.is_empty() {
            push_chunk(&mut chunks, &window);
        }

        chunks
    }
}

fn char_len(s: &str) -> usize {
    s.graphemes(true).count()
}

fn push_chunk(chunks: &mut Vec<String>, window: &VecDeque<&String>) {
    let joined: String = window.iter().map(|s| s.as_str()).collect();
    let trimmed = joined.trim();
    if !trimmed.is_empty() {
        chunks.push(trimmed.to_string());
    }
}

/// Pick the first separator present in the text; the empty separator always
/// matches. Returns the chosen separator and the weaker ones after it.
fn pick_separator<'a>(text: &str, separators: &'a [String]) -> (&'a str, &'a [String]) {
    for (i, sep) in separators.iter().enumerate() {
        if sep.is_empty() || text.contains(sep.as_str()) {
            return (sep, &separators[i + 1..]);
        }
    }
    ("", &[])
}

/// Split on a separator, keeping the separator attached to the preceding
/// piece so rejoining reproduces the original text.
fn split_keeping_separator(text: &str, separator: &str) -> Vec<String> {
    if separator.is_empty() {
        return text.graphemes(true).map(String::from).collect();
    }

    let mut pieces = Vec::new();
    let mut start = 0;
    while let Some(pos) = text[start..].find(separator) {
        let end = start + pos + separator.len();
        pieces.push(text[start..end].to_string());
        start = end;
    }
    if start < text.len() {
        pieces.push(text[start..].to_string());
    }
    pieces.retain(|p| !p.is_empty());
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Longest k such that the end of `prev` equals the start of `next`
    fn shared_boundary_chars(prev: &str, next: &str) -> usize {
        let prev_chars: Vec<char> = prev.chars().collect();
        let next_chars: Vec<char> = next.chars().collect();
        let max = prev_chars.len().min(next_chars.len());
        (1..=max)
            .rev()
            .find(|&k| prev_chars[prev_chars.len() - k..] == next_chars[..k])
            .unwrap_or(0)
    }

    #[test]
    fn test_short_text_is_one_chunk() {
        let chunker = TextChunker::new(700, 100);
        let chunks = chunker.split("짧은 문장입니다.");
        assert_eq!(chunks, vec!["짧은 문장입니다.".to_string()]);
    }

    #[test]
    fn test_empty_text_yields_no_chunks() {
        let chunker = TextChunker::new(700, 100);
        assert!(chunker.split("").is_empty());
        assert!(chunker.split("   \n\n  ").is_empty());
    }

    #[test]
    fn test_chunks_respect_size_bound() {
        let text = "과목 안내 ".repeat(500);
        for (size, overlap) in [(700, 100), (200, 50), (64, 16), (30, 5)] {
            let chunker = TextChunker::new(size, overlap);
            for chunk in chunker.split(&text) {
                assert!(
                    chunk.chars().count() <= size,
                    "chunk of {} chars exceeds size {}",
                    chunk.chars().count(),
                    size
                );
            }
        }
    }

    #[test]
    fn test_consecutive_chunks_overlap() {
        // Unique words keep the shared boundary unambiguous.
        let text: String = (0..400).map(|i| format!("w{} ", i)).collect();
        let chunker = TextChunker::new(100, 30);
        let chunks = chunker.split(&text);
        assert!(chunks.len() > 2);

        for pair in chunks.windows(2) {
            let shared = shared_boundary_chars(&pair[0], &pair[1]);
            assert!(shared > 0, "chunks {:?} and {:?} share no context", pair[0], pair[1]);
            assert!(shared <= 30, "shared context {} exceeds overlap", shared);
        }
    }

    #[test]
    fn test_prefers_paragraph_boundaries() {
        let paragraph = "가나다라마바사 아자차카타파하.".repeat(3);
        let text = format!("{p}\n\n{p}\n\n{p}", p = paragraph);
        let chunker = TextChunker::new(paragraph.chars().count() + 10, 5);
        let chunks = chunker.split(&text);
        // Each paragraph fits a chunk on its own, so no chunk should mix two.
        for chunk in &chunks {
            assert!(!chunk.contains("\n\n"), "chunk spans a paragraph break: {:?}", chunk);
        }
    }

    #[test]
    fn test_hard_cut_without_boundaries() {
        // Non-repeating text with no whitespace forces character cuts and
        // makes the shared boundary unambiguous.
        let text: String = (0..90).map(|i| format!("{:03}", i)).collect();
        let chunker = TextChunker::new(100, 20);
        let chunks = chunker.split(&text);
        assert!(chunks.len() >= 3);
        for chunk in &chunks {
            assert!(chunk.chars().count() <= 100);
        }

        // Dropping each chunk's leading overlap reconstructs the input.
        let mut rebuilt = chunks[0].clone();
        for pair in chunks.windows(2) {
            let shared = shared_boundary_chars(&pair[0], &pair[1]);
            assert!(shared > 0 && shared <= 20);
            rebuilt.extend(pair[1].chars().skip(shared));
        }
        assert_eq!(rebuilt, text);
    }

    #[test]
    fn test_deterministic() {
        let text = "학생 상담 기록 ".repeat(120);
        let chunker = TextChunker::new(150, 40);
        assert_eq!(chunker.split(&text), chunker.split(&text));
    }
}
