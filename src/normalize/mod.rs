//! Text segmentation and normalization: raw text in, normalized tokens out.

pub mod pipeline;
pub mod segment;

use segment::{Category, Segmenter, UnicodeSegmenter};

/// Result of normalizing one piece of text: the accepted tokens in
/// segmentation order, and the total number of segments the text broke
/// into (including rejected ones, but not pure-whitespace runs between
/// words — those are boundaries, not segments the original text was
/// "made of"). `total_segments` is the denominator the indexer divides
/// by when scoring, so rejected (non-whitespace) segments still dilute
/// a pair's scores.
#[derive(Debug, Clone, Default)]
pub struct Normalized {
    pub tokens: Vec<String>,
    pub total_segments: usize,
}

/// Normalizes `text` using the default [`UnicodeSegmenter`].
pub fn normalize(text: &str) -> Normalized {
    normalize_with(text, &UnicodeSegmenter)
}

/// Normalizes `text` using a caller-supplied segmenter, applying the
/// per-segment accept/reject/transliterate policy described in the
/// normalizer's component design.
pub fn normalize_with(text: &str, segmenter: &dyn Segmenter) -> Normalized {
    let segments = segmenter.segments(text);
    let total_segments = segments.iter().filter(|seg| !is_whitespace_only(seg.text)).count();
    let mut tokens = Vec::new();

    for seg in segments {
        if seg.rune_count > 30 {
            continue;
        }
        if let Some(token) = normalize_segment(seg.text, seg.category) {
            tokens.push(token);
        }
    }

    Normalized { tokens, total_segments }
}

fn normalize_segment(text: &str, category: Category) -> Option<String> {
    match category {
        Category::Nd | Category::OtherNumeric => {
            let rune_count = text.chars().count();
            if rune_count > 7 {
                return None;
            }
            if is_ascii_digits(text) {
                Some(text.to_string())
            } else {
                Some(pipeline::full_normalize(text))
            }
        }
        Category::WordAllLower | Category::LetterLower => {
            if is_ascii_lower(text) {
                Some(text.to_string())
            } else {
                Some(pipeline::full_normalize(text))
            }
        }
        Category::WordAllUpper
        | Category::WordFirstUpper
        | Category::WordMixedLetters
        | Category::LetterOther => {
            if text.is_ascii() && text.chars().all(|c| c.is_ascii_alphabetic()) {
                Some(text.to_ascii_lowercase())
            } else {
                Some(pipeline::full_normalize(text))
            }
        }
        Category::Other => None,
    }
}

fn is_whitespace_only(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_whitespace())
}

fn is_ascii_digits(text: &str) -> bool {
    text.bytes().all(|b| b.is_ascii_digit())
}

fn is_ascii_lower(text: &str) -> bool {
    text.bytes().all(|b| b.is_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idempotent_on_ascii_lowercase() {
        let n = normalize("the quick fox");
        assert_eq!(n.tokens, vec!["the", "quick", "fox"]);
    }

    #[test]
    fn transliterates_and_expands() {
        let n = normalize("100jähriges Straße");
        assert_eq!(n.tokens, vec!["100jaehriges", "strasse"]);
    }

    #[test]
    fn drops_overlong_numerics() {
        let n = normalize("12345678");
        assert!(n.tokens.is_empty());
        assert_eq!(n.total_segments, 1);
    }

    #[test]
    fn rejected_segments_still_count_toward_total() {
        let n = normalize("hello, world");
        assert_eq!(n.tokens, vec!["hello", "world"]);
        // "hello" / "," / "world" — the space between them is a word
        // boundary, not a counted segment.
        assert_eq!(n.total_segments, 3);
    }

    #[test]
    fn whitespace_does_not_inflate_total_segments() {
        let n = normalize("cafe CAFE");
        assert_eq!(n.tokens, vec!["cafe", "cafe"]);
        assert_eq!(n.total_segments, 2);
    }

    #[test]
    fn determinism() {
        let a = normalize("Café au lait — 100jähriges Jubiläum");
        let b = normalize("Café au lait — 100jähriges Jubiläum");
        assert_eq!(a.tokens, b.tokens);
        assert_eq!(a.total_segments, b.total_segments);
    }
}
