use unicode_segmentation::UnicodeSegmentation;

/// Coarse Unicode-category bucket a segment falls into. This is a
/// behavioral stand-in for the full Unicode general-category table: it
/// only distinguishes the buckets the normalization policy actually
/// branches on, classifying multi-rune alphabetic spans by their case
/// pattern and single-rune spans by that one rune's case/numeric shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// ASCII or other decimal digit run (Unicode Nd).
    Nd,
    /// Other numeric run: letter-numbers or numeric symbols (Nl/No).
    OtherNumeric,
    WordAllLower,
    WordAllUpper,
    WordFirstUpper,
    WordMixedLetters,
    /// Single lowercase letter rune (Ll).
    LetterLower,
    /// Single non-lowercase letter rune (Lu/Lt/Lm/Lo).
    LetterOther,
    /// Whitespace, punctuation, symbols — rejected by the normalizer.
    Other,
}

#[derive(Debug, Clone, Copy)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub rune_count: usize,
    pub category: Category,
}

pub trait Segmenter: Send + Sync {
    fn segments<'a>(&self, text: &'a str) -> Vec<Segment<'a>>;
}

/// Segments on UAX #29 word boundaries and classifies each resulting
/// span, mirroring the per-segment category contract a collaborator
/// segmenter is expected to honor.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeSegmenter;

impl Segmenter for UnicodeSegmenter {
    fn segments<'a>(&self, text: &'a str) -> Vec<Segment<'a>> {
        text.split_word_bounds().map(classify).collect()
    }
}

fn classify(text: &str) -> Segment<'_> {
    let rune_count = text.chars().count();
    Segment { text, rune_count, category: classify_category(text) }
}

fn classify_category(text: &str) -> Category {
    if text.chars().all(|c| c.is_ascii_digit()) {
        return Category::Nd;
    }
    if text.chars().all(|c| c.is_numeric()) {
        return Category::OtherNumeric;
    }

    // UAX #29 word boundaries (WB9/WB10) keep a digit+letter run like
    // "100jaehriges" as one span. Classify by the case pattern of its
    // letters, ignoring interleaved digits, rather than rejecting the
    // whole span for not being purely alphabetic.
    let letters: Vec<char> = text.chars().filter(|c| c.is_alphabetic()).collect();
    let first_letter = match letters.first() {
        Some(&c) => c,
        None => return Category::Other,
    };

    if text.chars().count() == 1 {
        return if first_letter.is_lowercase() { Category::LetterLower } else { Category::LetterOther };
    }

    if letters.iter().all(|c| c.is_lowercase()) {
        Category::WordAllLower
    } else if letters.iter().all(|c| c.is_uppercase()) {
        Category::WordAllUpper
    } else if first_letter.is_uppercase() && letters[1..].iter().all(|c| c.is_lowercase()) {
        Category::WordFirstUpper
    } else {
        Category::WordMixedLetters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_ascii_words() {
        assert_eq!(classify_category("hello"), Category::WordAllLower);
        assert_eq!(classify_category("HELLO"), Category::WordAllUpper);
        assert_eq!(classify_category("Hello"), Category::WordFirstUpper);
        assert_eq!(classify_category("HeLLo"), Category::WordMixedLetters);
        assert_eq!(classify_category("123"), Category::Nd);
        assert_eq!(classify_category(" "), Category::Other);
    }

    #[test]
    fn classifies_digit_letter_runs_by_letter_case() {
        assert_eq!(classify_category("100jaehriges"), Category::WordAllLower);
        assert_eq!(classify_category("100Jaehriges"), Category::WordFirstUpper);
    }

    #[test]
    fn splits_on_word_boundaries() {
        let segs = UnicodeSegmenter.segments("Cafe au lait");
        let words: Vec<&str> = segs.iter().filter(|s| s.category != Category::Other).map(|s| s.text).collect();
        assert_eq!(words, vec!["Cafe", "au", "lait"]);
    }
}
