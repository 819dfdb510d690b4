use crate::config::ChunkPolicy;
use crate::detector::ChapterDetector;
use crate::error::{ChunkerError, Result};
use crate::measure;
use crate::types::{BookStats, Chapter, Chunk, Fragment};
use log::debug;
use std::path::Path;

/// Main interface for turning cleaned book text into a flat, globally
/// numbered chunk sequence.
pub struct BookChunker {
    policy: ChunkPolicy,
    detector: ChapterDetector,
}

impl BookChunker {
    /// Create a chunker with a validated policy
    pub fn new(policy: ChunkPolicy) -> Result<Self> {
        policy.validate().map_err(ChunkerError::invalid_policy)?;
        Ok(Self {
            policy,
            detector: ChapterDetector::new(),
        })
    }

    /// Get the active policy
    #[must_use]
    pub const fn policy(&self) -> &ChunkPolicy {
        &self.policy
    }

    /// Chunk a whole book from a file on disk
    pub fn chunk_file(&self, path: impl AsRef<Path>) -> Result<Vec<Chunk>> {
        let text = std::fs::read_to_string(path)?;
        self.chunk_book(&text)
    }

    /// Chunk a whole book: detect chapters, split each one, then assign
    /// global 1-based numbers and backfill `total_chunks`.
    ///
    /// The build is two-phase: fragments are computed per chapter with no
    /// shared state, and a single final pass assigns numbering.
    pub fn chunk_book(&self, text: &str) -> Result<Vec<Chunk>> {
        if text.trim().is_empty() {
            return Err(ChunkerError::EmptyText);
        }

        let chapters = self.detector.detect(text);
        let mut chunks = Vec::new();

        for chapter in &chapters {
            let fragments = self.chunk_chapter(&chapter.text);
            debug!(
                "chapter at {} split into {} fragments",
                chapter.start_offset,
                fragments.len()
            );

            let mut chapter_start = true;
            for fragment in fragments {
                let trimmed = fragment.text.trim();
                let word_count = measure::count_words(trimmed);
                // Empty chunks are never emitted.
                if word_count == 0 {
                    continue;
                }

                chunks.push(Chunk {
                    chunk_number: 0,
                    total_chunks: 0,
                    text: trimmed.to_string(),
                    token_count: measure::estimate_tokens(trimmed, self.policy.chars_per_token),
                    word_count,
                    chapter_title: chapter.title.clone(),
                    chapter_number: chapter.number,
                    is_chapter_start: chapter_start,
                    start_offset: chapter.start_offset + fragment.start_offset,
                    end_offset: chapter.start_offset + fragment.end_offset,
                });
                chapter_start = false;
            }
        }

        let total = chunks.len();
        for (index, chunk) in chunks.iter_mut().enumerate() {
            chunk.chunk_number = index + 1;
            chunk.total_chunks = total;
        }

        Ok(chunks)
    }

    /// Split one chapter's text into fragments respecting paragraph and
    /// sentence boundaries under the size policy.
    ///
    /// A chapter that fits within the hard ceiling is emitted unchanged.
    /// Otherwise paragraphs accumulate into a buffer that is flushed at the
    /// policy bounds; a paragraph that alone exceeds the ceiling falls back
    /// to sentence-level splitting.
    #[must_use]
    pub fn chunk_chapter(&self, text: &str) -> Vec<Fragment> {
        let target_chars = self.policy.target_chars();
        let max_chars = self.policy.max_chars();
        let min_chars = self.policy.min_chars();

        if text.len() <= max_chars {
            return vec![Fragment {
                text: text.to_string(),
                start_offset: 0,
                end_offset: text.len(),
            }];
        }

        let mut fragments = Vec::new();
        let mut buffer = String::new();
        let mut buffer_start = 0;

        for (offset, paragraph) in measure::split_paragraphs(text) {
            if buffer.len() + paragraph.len() > max_chars && buffer.len() > min_chars {
                flush(&mut fragments, &mut buffer, buffer_start);
                buffer_start = offset;
                buffer.push_str(paragraph);
            } else if paragraph.len() > max_chars {
                if !buffer.is_empty() && buffer.len() >= min_chars {
                    flush(&mut fragments, &mut buffer, buffer_start);
                    buffer_start = offset;
                }
                if buffer.is_empty() {
                    buffer_start = offset;
                }

                // Sentence-level fallback for a pathologically long
                // paragraph. Offset bookkeeping here is approximate: the
                // cursor advances by sentence length plus one for the
                // consumed separator, not the exact original width.
                let mut cursor = offset;
                for sentence in measure::split_sentences(paragraph) {
                    if buffer.len() + sentence.len() > target_chars && buffer.len() >= min_chars {
                        flush(&mut fragments, &mut buffer, buffer_start);
                        buffer_start = cursor;
                    }
                    if !buffer.is_empty() {
                        buffer.push(' ');
                    }
                    buffer.push_str(sentence);
                    cursor += sentence.len() + 1;
                }
            } else if buffer.len() >= target_chars {
                flush(&mut fragments, &mut buffer, buffer_start);
                buffer_start = offset;
                buffer.push_str(paragraph);
            } else {
                if buffer.is_empty() {
                    buffer_start = offset;
                } else {
                    buffer.push_str("\n\n");
                }
                buffer.push_str(paragraph);
            }
        }

        flush(&mut fragments, &mut buffer, buffer_start);
        fragments
    }

    /// Derived whole-book statistics (word/page/reading-time estimates)
    #[must_use]
    pub fn book_stats(text: &str) -> BookStats {
        BookStats::for_text(text)
    }

    /// Detect chapters without chunking them
    #[must_use]
    pub fn detect_chapters(&self, text: &str) -> Vec<Chapter> {
        self.detector.detect(text)
    }

    /// Summarize a chunk list
    #[must_use]
    pub fn get_stats(chunks: &[Chunk]) -> ChunkingStats {
        ChunkingStats {
            total_chunks: chunks.len(),
            total_words: chunks.iter().map(|c| c.word_count).sum(),
            total_tokens: chunks.iter().map(|c| c.token_count).sum(),
            avg_tokens_per_chunk: if chunks.is_empty() {
                0
            } else {
                chunks.iter().map(|c| c.token_count).sum::<usize>() / chunks.len()
            },
            min_tokens: chunks.iter().map(|c| c.token_count).min().unwrap_or(0),
            max_tokens: chunks.iter().map(|c| c.token_count).max().unwrap_or(0),
        }
    }
}

/// Flush the buffer as a fragment if it holds anything beyond whitespace
fn flush(fragments: &mut Vec<Fragment>, buffer: &mut String, start: usize) {
    if buffer.trim().is_empty() {
        buffer.clear();
        return;
    }
    let end = start + buffer.len();
    fragments.push(Fragment {
        text: std::mem::take(buffer),
        start_offset: start,
        end_offset: end,
    });
}

/// Statistics about a chunking run
#[derive(Debug, Clone)]
pub struct ChunkingStats {
    pub total_chunks: usize,
    pub total_words: usize,
    pub total_tokens: usize,
    pub avg_tokens_per_chunk: usize,
    pub min_tokens: usize,
    pub max_tokens: usize,
}

impl std::fmt::Display for ChunkingStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Chunks: {} | Words: {} | Tokens: {} | Avg: {} | Range: {}-{}",
            self.total_chunks,
            self.total_words,
            self.total_tokens,
            self.avg_tokens_per_chunk,
            self.min_tokens,
            self.max_tokens
        )
    }
}
