//! Shared text measurement and segmentation utilities.
//!
//! Token counts here are a cheap character-ratio estimate used only to
//! bound chunk sizes. They are consistent and fast, not billing-grade.

use once_cell::sync::Lazy;
use regex::Regex;

/// Two or more newlines separate paragraphs (line endings are normalized
/// upstream before text reaches the chunker).
static PARAGRAPH_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n{2,}").expect("paragraph break pattern"));

/// Sentence-ending punctuation followed by whitespace.
static SENTENCE_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]\s+").expect("sentence break pattern"));

/// Estimate the token count of a text: `ceil(bytes / chars_per_token)`.
#[must_use]
pub fn estimate_tokens(text: &str, chars_per_token: usize) -> usize {
    text.len().div_ceil(chars_per_token.max(1))
}

/// Count whitespace-delimited words, discarding empty tokens.
#[must_use]
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Split a text into paragraphs with their byte offsets.
///
/// Paragraphs are runs separated by two-or-more newlines; runs that are
/// empty after trimming are discarded.
#[must_use]
pub fn split_paragraphs(text: &str) -> Vec<(usize, &str)> {
    let mut paragraphs = Vec::new();
    let mut start = 0;
    for brk in PARAGRAPH_BREAK.find_iter(text) {
        push_paragraph(text, start, brk.start(), &mut paragraphs);
        start = brk.end();
    }
    push_paragraph(text, start, text.len(), &mut paragraphs);
    paragraphs
}

fn push_paragraph<'a>(text: &'a str, start: usize, end: usize, out: &mut Vec<(usize, &'a str)>) {
    let slice = &text[start..end];
    if !slice.trim().is_empty() {
        out.push((start, slice));
    }
}

/// Split a paragraph into sentences on terminator-plus-whitespace
/// boundaries, keeping each terminator with its sentence.
#[must_use]
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    for brk in SENTENCE_BREAK.find_iter(text) {
        // Keep the one-byte terminator, drop the trailing whitespace.
        let sentence = text[start..brk.start() + 1].trim();
        if !sentence.is_empty() {
            sentences.push(sentence);
        }
        start = brk.end();
    }
    let tail = text[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail);
    }
    sentences
}
