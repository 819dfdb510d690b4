use crate::roman;
use crate::types::Chapter;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

/// Matches closer than this to the previously kept match, with no paragraph
/// break between them, are duplicate hits on the same heading block.
const DEDUP_WINDOW: usize = 100;

struct HeadingPattern {
    regex: Regex,
    /// Canonical keyword used when formatting "<Keyword> <token>: <title>"
    keyword: Option<&'static str>,
}

/// Fixed, ordered heading pattern set. All matches are pooled and re-sorted
/// by position, so order here only decides which duplicate survives dedup.
static HEADING_PATTERNS: Lazy<Vec<HeadingPattern>> = Lazy::new(|| {
    let compile = |pattern: &str| Regex::new(pattern).expect("heading pattern");
    vec![
        HeadingPattern {
            regex: compile(r"(?mi)^[ \t]*chapter\s+([ivxlcdm]+|\d+|[a-z]+)\b[.:]?[ \t]*(.*)$"),
            keyword: Some("Chapter"),
        },
        HeadingPattern {
            regex: compile(r"(?mi)^[ \t]*book\s+([ivxlcdm]+|\d+)\b[.:]?[ \t]*(.*)$"),
            keyword: Some("Book"),
        },
        HeadingPattern {
            regex: compile(r"(?mi)^[ \t]*part\s+([ivxlcdm]+|\d+)\b[.:]?[ \t]*(.*)$"),
            keyword: Some("Part"),
        },
        // Bare roman numeral heading: "II." optionally with trailing text.
        HeadingPattern {
            regex: compile(r"(?m)^[ \t]*([IVXLCDM]+)\.[ \t]*(.*)$"),
            keyword: None,
        },
        // Catch-all for headers without an explicit keyword: an all-caps
        // line of 6-50 characters (letters, spaces, hyphens, apostrophes).
        HeadingPattern {
            regex: compile(r"(?m)^[A-Z][A-Z '\-]{5,49}$"),
            keyword: None,
        },
    ]
});

#[derive(Debug)]
struct HeadingMatch {
    position: usize,
    /// The matched heading line, trimmed
    raw: String,
    token: Option<String>,
    remainder: Option<String>,
    keyword: Option<&'static str>,
}

impl HeadingMatch {
    fn number(&self) -> Option<u32> {
        let token = self.token.as_deref()?;
        token.parse::<u32>().ok().or_else(|| roman::parse(token))
    }

    fn title(&self) -> String {
        match (self.keyword, self.token.as_deref(), self.remainder.as_deref()) {
            (Some(keyword), Some(token), Some(remainder)) => {
                format!("{keyword} {token}: {remainder}")
            }
            _ => self.raw.clone(),
        }
    }
}

/// Scans cleaned text for structural markers and partitions it into an
/// ordered sequence of chapters.
///
/// Detection is heuristic by design: plain-text sources carry no structural
/// markup, so the pattern set over-detects (note the all-caps catch-all)
/// and a proximity-based dedup pass collapses duplicate hits.
pub struct ChapterDetector {
    patterns: &'static [HeadingPattern],
}

impl ChapterDetector {
    /// Create a new detector over the built-in pattern set
    #[must_use]
    pub fn new() -> Self {
        Self {
            patterns: HEADING_PATTERNS.as_slice(),
        }
    }

    /// Partition `text` into ordered, contiguous chapters.
    ///
    /// Chapter spans cover `[0, text.len())` exactly: text before the first
    /// heading becomes an untitled front-matter chapter, and when no heading
    /// matches at all the whole text is one chapter with absent title and
    /// number.
    #[must_use]
    pub fn detect(&self, text: &str) -> Vec<Chapter> {
        let matches = self.dedup(text, self.collect_matches(text));

        if matches.is_empty() {
            return vec![Chapter {
                title: None,
                number: None,
                start_offset: 0,
                end_offset: text.len(),
                text: text.to_string(),
            }];
        }

        let mut chapters = Vec::with_capacity(matches.len() + 1);
        if matches[0].position > 0 {
            chapters.push(Chapter {
                title: None,
                number: None,
                start_offset: 0,
                end_offset: matches[0].position,
                text: text[..matches[0].position].to_string(),
            });
        }

        for (i, heading) in matches.iter().enumerate() {
            let start = heading.position;
            let end = matches.get(i + 1).map_or(text.len(), |next| next.position);
            chapters.push(Chapter {
                title: Some(heading.title()),
                number: heading.number(),
                start_offset: start,
                end_offset: end,
                text: text[start..end].to_string(),
            });
        }

        debug!(
            "detected {} chapters from {} heading matches",
            chapters.len(),
            matches.len()
        );
        chapters
    }

    /// Run every pattern over the whole text and pool the results, stably
    /// sorted by position (ties keep pattern order).
    fn collect_matches(&self, text: &str) -> Vec<HeadingMatch> {
        let mut matches = Vec::new();
        for pattern in self.patterns {
            for caps in pattern.regex.captures_iter(text) {
                let Some(whole) = caps.get(0) else { continue };
                let token = caps.get(1).map(|m| m.as_str().to_string());
                let remainder = caps
                    .get(2)
                    .map(|m| m.as_str().trim().to_string())
                    .filter(|s| !s.is_empty());
                matches.push(HeadingMatch {
                    position: whole.start(),
                    raw: whole.as_str().trim().to_string(),
                    token,
                    remainder,
                    keyword: pattern.keyword,
                });
            }
        }
        matches.sort_by_key(|m| m.position);
        matches
    }

    /// Drop matches that hit the same heading block as the previously kept
    /// match: closer than [`DEDUP_WINDOW`] with no paragraph break between.
    fn dedup(&self, text: &str, matches: Vec<HeadingMatch>) -> Vec<HeadingMatch> {
        let mut kept: Vec<HeadingMatch> = Vec::new();
        for candidate in matches {
            if let Some(prev) = kept.last() {
                let close = candidate.position.saturating_sub(prev.position) < DEDUP_WINDOW;
                let same_block = !text[prev.position..candidate.position].contains("\n\n");
                if close && same_block {
                    continue;
                }
            }
            kept.push(candidate);
        }
        kept
    }
}

impl Default for ChapterDetector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn detect(text: &str) -> Vec<Chapter> {
        ChapterDetector::new().detect(text)
    }

    #[test]
    fn test_no_structure_single_chapter() {
        let text = "just some lowercase prose without any headings at all.";
        let chapters = detect(text);
        assert_eq!(chapters.len(), 1);
        assert_eq!(chapters[0].title, None);
        assert_eq!(chapters[0].number, None);
        assert_eq!(chapters[0].start_offset, 0);
        assert_eq!(chapters[0].end_offset, text.len());
    }

    #[test]
    fn test_two_chapters_with_roman_numbers() {
        let text = "CHAPTER I\n\nFirst paragraph.\n\nCHAPTER II\n\nSecond paragraph.";
        let chapters = detect(text);
        assert_eq!(chapters.len(), 2);
        assert_eq!(chapters[0].number, Some(1));
        assert_eq!(chapters[1].number, Some(2));
        assert_eq!(chapters[0].title.as_deref(), Some("CHAPTER I"));
        assert!(chapters[1].text.contains("Second paragraph."));
    }

    #[test]
    fn test_spans_partition_text() {
        let text = "CHAPTER 1\n\nAlpha body text.\n\nCHAPTER 2\n\nBeta body text.\n\nCHAPTER 3\n\nGamma.";
        let chapters = detect(text);
        assert_eq!(chapters.len(), 3);
        assert_eq!(chapters[0].start_offset, 0);
        for pair in chapters.windows(2) {
            assert_eq!(pair[0].end_offset, pair[1].start_offset);
        }
        assert_eq!(chapters.last().unwrap().end_offset, text.len());
        let rebuilt: String = chapters.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(rebuilt, text);
    }

    #[test]
    fn test_front_matter_becomes_untitled_chapter() {
        let text = "Some introductory note.\n\nCHAPTER I\n\nThe story begins.";
        let chapters = detect(text);
        assert_eq!(chapters.len(), 2);
        assert_eq!(chapters[0].title, None);
        assert_eq!(chapters[0].number, None);
        assert_eq!(chapters[1].number, Some(1));
        assert_eq!(chapters[0].end_offset, chapters[1].start_offset);
    }

    #[test]
    fn test_title_with_remainder_is_formatted() {
        let text = "CHAPTER IV. THE RECKONING\n\nBody of the chapter goes here.";
        let chapters = detect(text);
        assert_eq!(chapters.len(), 1);
        assert_eq!(chapters[0].title.as_deref(), Some("Chapter IV: THE RECKONING"));
        assert_eq!(chapters[0].number, Some(4));
    }

    #[test]
    fn test_word_number_token_yields_absent_number() {
        let text = "CHAPTER ONE\n\nIt begins, as these things do, quietly.";
        let chapters = detect(text);
        assert_eq!(chapters.len(), 1);
        assert_eq!(chapters[0].number, None);
        assert_eq!(chapters[0].title.as_deref(), Some("CHAPTER ONE"));
    }

    #[test]
    fn test_book_and_part_headings() {
        let text = "BOOK I\n\nOpening of the first book here.\n\nPART 2\n\nAnd the second part follows it.";
        let chapters = detect(text);
        assert_eq!(chapters.len(), 2);
        assert_eq!(chapters[0].number, Some(1));
        assert_eq!(chapters[1].number, Some(2));
    }

    #[test]
    fn test_bare_roman_heading() {
        let text = "II. The Long Road\n\nThe road stretched on and on before them.";
        let chapters = detect(text);
        assert_eq!(chapters.len(), 1);
        assert_eq!(chapters[0].number, Some(2));
        // No keyword captured, so the raw heading line is the title.
        assert_eq!(chapters[0].title.as_deref(), Some("II. The Long Road"));
    }

    #[test]
    fn test_all_caps_catch_all() {
        let text = "THE CYCLONE\n\nDorothy lived in the midst of the great Kansas prairies.";
        let chapters = detect(text);
        assert_eq!(chapters.len(), 1);
        assert_eq!(chapters[0].title.as_deref(), Some("THE CYCLONE"));
        assert_eq!(chapters[0].number, None);
    }

    #[test]
    fn test_short_or_long_caps_lines_ignored() {
        // Under 6 chars and over 50 chars fall outside the catch-all.
        let text = "HI\n\nlowercase body text here, nothing resembling a heading.";
        assert_eq!(detect(text)[0].title, None);

        let long_line = "A".repeat(60);
        let text = format!("{long_line}\n\nmore lowercase body text, still no heading found.");
        assert_eq!(detect(&text)[0].title, None);
    }

    #[test]
    fn test_overlapping_patterns_collapse_to_one_boundary() {
        // "CHAPTER I" matches both the keyword pattern and the all-caps
        // catch-all; "THE START" on the next line matches the catch-all.
        // All of it is one heading block and must yield one chapter.
        let text = "CHAPTER I\nTHE START\n\nAnd so the story finally gets underway.";
        let chapters = detect(text);
        assert_eq!(chapters.len(), 1);
        assert_eq!(chapters[0].number, Some(1));
        assert_eq!(chapters[0].title.as_deref(), Some("CHAPTER I"));
    }

    #[test]
    fn test_nearby_headings_across_paragraph_break_both_kept() {
        // Closer than the dedup window, but separated by a blank line:
        // genuinely distinct chapters.
        let text = "CHAPTER I\n\nShort.\n\nCHAPTER II\n\nAlso short.";
        let chapters = detect(text);
        assert_eq!(chapters.len(), 2);
    }

    #[test]
    fn test_arabic_number_parsed_directly() {
        let text = "CHAPTER 3\n\nArabic ordinals skip roman parsing entirely.";
        assert_eq!(detect(text)[0].number, Some(3));
    }
}
