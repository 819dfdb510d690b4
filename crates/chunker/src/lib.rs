//! # Folio Chunker
//!
//! Chapter-aware, token-budgeted chunking of long-form book text.
//!
//! ## Philosophy
//!
//! The chunker turns a cleaned book into bounded pieces for sequential
//! consumption:
//! - Preserve natural reading units (paragraphs first, sentences only for
//!   pathologically long paragraphs)
//! - Keep chapter structure: every chunk knows its chapter and whether it
//!   opens one
//! - Bound sizes with a three-tier policy (soft target, hard ceiling,
//!   small-chunk floor) in cheap estimated tokens
//!
//! ## Architecture
//!
//! ```text
//! Cleaned Text
//!     │
//!     ├──> Chapter Detection (heading patterns + proximity dedup)
//!     │
//!     ├──> Per-Chapter Splitting
//!     │    ├─> Whole chapter if under the hard ceiling
//!     │    ├─> Paragraph accumulation against target/max/min
//!     │    └─> Sentence fallback for oversized paragraphs
//!     │
//!     └──> Global Assembly
//!          ├─> 1-based chunk numbering across chapters
//!          └─> total_chunks backfill on every chunk
//! ```
//!
//! ## Example
//!
//! ```rust
//! use folio_chunker::{BookChunker, ChunkPolicy};
//!
//! let chunker = BookChunker::new(ChunkPolicy::default()).unwrap();
//! let text = "CHAPTER I\n\nIt was a pleasure to burn.\n\nCHAPTER II\n\nIt was later.";
//! let chunks = chunker.chunk_book(text).unwrap();
//!
//! assert_eq!(chunks.len(), 2);
//! assert_eq!(chunks[0].chapter_number, Some(1));
//! assert!(chunks[0].is_chapter_start);
//! assert_eq!(chunks[1].total_chunks, 2);
//! ```

mod chunker;
mod config;
mod detector;
mod error;
mod measure;
mod roman;
mod types;

pub use chunker::{BookChunker, ChunkingStats};
pub use config::ChunkPolicy;
pub use detector::ChapterDetector;
pub use error::{ChunkerError, Result};
pub use measure::{count_words, estimate_tokens};
pub use types::{BookStats, Chapter, Chunk, Fragment};
