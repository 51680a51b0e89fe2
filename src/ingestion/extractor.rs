//! PDF text extraction and heading-based segmentation

use regex::Regex;
use std::path::Path;

use crate::error::{Error, Result};
use crate::types::SemanticBlock;

/// Section title assigned to content that appears before any heading
pub const DEFAULT_SECTION_TITLE: &str = "일반";

/// Lines matching this pattern open a new semantic block: course-name and
/// competency labels, table captions, and numbered Korean section markers
/// from the curriculum report layout.
const HEADING_PATTERN: &str = r"^(교과목명|역량명|교과개요|전공역량|<표 \d+>|[가-힣]+\.)";

/// PDF extractor for the curriculum report
pub struct PdfExtractor {
    heading: Regex,
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfExtractor {
    /// Create an extractor with the report heading pattern
    pub fn new() -> Self {
        Self {
            heading: Regex::new(HEADING_PATTERN).expect("heading pattern is valid"),
        }
    }

    /// Extract per-page text from a PDF. Fails (and aborts ingestion) if the
    /// file cannot be opened or parsed.
    pub fn extract_pages(&self, path: &Path) -> Result<Vec<String>> {
        pdf_extract::extract_text_by_pages(path)
            .map_err(|e| Error::pdf_extract(path.display().to_string(), e.to_string()))
    }

    /// Extract the whole document as one string, non-empty page texts joined
    /// with blank-line separators.
    pub fn extract_text(&self, path: &Path) -> Result<String> {
        let pages = self.extract_pages(path)?;
        let non_empty: Vec<&str> = pages
            .iter()
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .collect();
        Ok(non_empty.join("\n\n"))
    }

    /// Extract heading-delimited semantic blocks in reading order, skipping
    /// empty pages.
    pub fn extract_blocks(&self, path: &Path) -> Result<Vec<SemanticBlock>> {
        let pages = self.extract_pages(path)?;
        let mut blocks = Vec::new();
        for (i, page) in pages.iter().enumerate() {
            let page_number = (i + 1) as u32;
            blocks.extend(self.segment_page(page_number, page));
        }
        tracing::info!("Extracted {} semantic blocks", blocks.len());
        Ok(blocks)
    }

    /// Segment one page's text into blocks. A heading line flushes the
    /// current block and becomes the next block's title; leading untitled
    /// content gets the default title.
    pub fn segment_page(&self, page_number: u32, text: &str) -> Vec<SemanticBlock> {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();

        let mut blocks = Vec::new();
        let mut current_lines: Vec<&str> = Vec::new();
        let mut current_title: Option<String> = None;

        for line in lines {
            if self.heading.is_match(line) {
                if !current_lines.is_empty() {
                    blocks.push(SemanticBlock {
                        page: page_number,
                        section_title: current_title
                            .take()
                            .unwrap_or_else(|| DEFAULT_SECTION_TITLE.to_string()),
                        content: current_lines.join("\n"),
                    });
                    current_lines.clear();
                }
                current_title = Some(line.to_string());
            } else {
                current_lines.push(line);
            }
        }

        if !current_lines.is_empty() {
            blocks.push(SemanticBlock {
                page: page_number,
                section_title: current_title
                    .unwrap_or_else(|| DEFAULT_SECTION_TITLE.to_string()),
                content: current_lines.join("\n"),
            });
        }

        blocks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_lines_open_blocks() {
        let extractor = PdfExtractor::new();
        let page = "교과목명 자료구조\n배열과 연결 리스트를 다룬다\n역량명 문제해결\n알고리즘 설계 역량";
        let blocks = extractor.segment_page(3, page);

        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].page, 3);
        assert_eq!(blocks[0].section_title, "교과목명 자료구조");
        assert_eq!(blocks[0].content, "배열과 연결 리스트를 다룬다");
        assert_eq!(blocks[1].section_title, "역량명 문제해결");
    }

    #[test]
    fn test_untitled_leading_content_gets_default_title() {
        let extractor = PdfExtractor::new();
        let page = "서론에 해당하는 내용\n교과목명 운영체제\n프로세스와 스레드";
        let blocks = extractor.segment_page(1, page);

        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].section_title, DEFAULT_SECTION_TITLE);
        assert_eq!(blocks[0].content, "서론에 해당하는 내용");
    }

    #[test]
    fn test_table_captions_and_numbered_sections_are_headings() {
        let extractor = PdfExtractor::new();
        let page = "<표 12> 트랙별 이수 체계\n표 본문 내용\n가. 전공 기초\n기초 과목 설명";
        let blocks = extractor.segment_page(2, page);

        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].section_title, "<표 12> 트랙별 이수 체계");
        assert_eq!(blocks[1].section_title, "가. 전공 기초");
    }

    #[test]
    fn test_empty_page_yields_no_blocks() {
        let extractor = PdfExtractor::new();
        assert!(extractor.segment_page(5, "").is_empty());
        assert!(extractor.segment_page(5, "  \n \n").is_empty());
    }

    #[test]
    fn test_consecutive_headings_keep_last_title() {
        let extractor = PdfExtractor::new();
        let page = "교과목명 자료구조\n교과개요\n본문 내용입니다";
        let blocks = extractor.segment_page(1, page);

        // Two headings in a row: no block is flushed for the first since it
        // has no body, the second takes over as the open title.
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].section_title, "교과개요");
        assert_eq!(blocks[0].content, "본문 내용입니다");
    }
}
