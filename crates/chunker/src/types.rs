use crate::measure;
use serde::{Deserialize, Serialize};

/// Assumed words per printed page for [`BookStats::page_count`]
pub const WORDS_PER_PAGE: usize = 250;

/// Assumed reading rate for [`BookStats::reading_minutes`]. Deliberately
/// fast: the readers are agents, not humans.
pub const WORDS_PER_MINUTE: usize = 1000;

/// A structurally detected, contiguous span of the source text.
///
/// Chapters are totally ordered by `start_offset` and partition
/// `[0, text.len())` with no gaps or overlaps. When no heading structure is
/// found the whole text becomes one chapter with absent title and number.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Chapter {
    /// Detected heading text, if any structure was found
    pub title: Option<String>,

    /// Parsed ordinal (arabic or roman-derived), if parseable
    pub number: Option<u32>,

    /// Byte offset of the span start in the source text
    pub start_offset: usize,

    /// Byte offset one past the span end in the source text
    pub end_offset: usize,

    /// The substring covered by the span
    pub text: String,
}

impl Chapter {
    /// Span length in bytes
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end_offset.saturating_sub(self.start_offset)
    }

    /// Whether the span is empty
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A chapter-local piece of text produced by the per-chapter splitter.
///
/// Offsets are relative to the chapter text and best-effort: sentence-level
/// fallback splitting advances them approximately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    /// Fragment content (untrimmed; trimming happens at chunk assembly)
    pub text: String,

    /// Byte offset into the chapter text (approximate after sentence splits)
    pub start_offset: usize,

    /// Byte offset one past the fragment end (approximate after sentence splits)
    pub end_offset: usize,
}

/// A bounded-size piece of a book, the unit delivered to a reader.
///
/// Persisted by the caller keyed on `(book, chunk_number)`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Chunk {
    /// 1-based position in the global sequence across all chapters
    pub chunk_number: usize,

    /// Count of chunks in the whole book; identical on every chunk,
    /// backfilled once all chapters are processed
    pub total_chunks: usize,

    /// Chunk content, trimmed of leading/trailing whitespace
    pub text: String,

    /// Estimated token count of `text`
    pub token_count: usize,

    /// Whitespace-delimited word count of `text`; always >= 1
    pub word_count: usize,

    /// Title of the owning chapter, if it had one
    pub chapter_title: Option<String>,

    /// Ordinal of the owning chapter, if it had one
    pub chapter_number: Option<u32>,

    /// True only for the first chunk produced from a given chapter
    pub is_chapter_start: bool,

    /// Best-effort byte offset of the chunk start in the source text
    pub start_offset: usize,

    /// Best-effort byte offset one past the chunk end in the source text
    pub end_offset: usize,
}

impl Chunk {
    /// Whether this is the final chunk of the book
    #[must_use]
    pub const fn is_last(&self) -> bool {
        self.chunk_number == self.total_chunks
    }
}

/// Derived whole-book statistics
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookStats {
    /// Whitespace-delimited word count
    pub word_count: usize,

    /// Page estimate at [`WORDS_PER_PAGE`] words per page
    pub page_count: usize,

    /// Reading time estimate at [`WORDS_PER_MINUTE`] words per minute
    pub reading_minutes: usize,
}

impl BookStats {
    /// Compute statistics for a text
    #[must_use]
    pub fn for_text(text: &str) -> Self {
        let word_count = measure::count_words(text);
        Self {
            word_count,
            page_count: word_count.div_ceil(WORDS_PER_PAGE),
            reading_minutes: word_count.div_ceil(WORDS_PER_MINUTE),
        }
    }
}
