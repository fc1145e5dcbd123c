use unicode_normalization::UnicodeNormalization;

/// The full normalization pipeline applied to any segment that isn't
/// already plain ASCII for its category: NFKC, a case-sensitive German
/// umlaut expansion, NFD, combining-mark removal, lowercasing, and a
/// case-insensitive ligature/symbol cleanup.
pub fn full_normalize(text: &str) -> String {
    let nfkc: String = text.nfkc().collect();
    let umlauts_expanded = expand_cased_umlauts(&nfkc);
    let nfd: String = umlauts_expanded.nfd().collect();
    let marks_stripped: String = nfd.chars().filter(|c| !unicode_normalization::char::is_combining_mark(*c)).collect();
    let lowered: String = marks_stripped.chars().flat_map(|c| c.to_lowercase()).collect();
    expand_caseless_ligatures(&lowered)
}

fn expand_cased_umlauts(text: &str) -> String {
    text.replace('ä', "ae")
        .replace('ö', "oe")
        .replace('ü', "ue")
        .replace('Ä', "Ae")
        .replace('Ö', "Oe")
        .replace('Ü', "Ue")
}

fn expand_caseless_ligatures(text: &str) -> String {
    text.replace('⁄', "/")
        .replace('æ', "ae")
        .replace('ð', "d")
        .replace('ł', "l")
        .replace('ø', "oe")
        .replace('œ', "oe")
        .replace('ß', "ss")
        .replace('þ', "th")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_accents() {
        assert_eq!(full_normalize("Café"), "cafe");
    }

    #[test]
    fn expands_german_umlauts() {
        assert_eq!(full_normalize("Straße"), "strasse");
        assert_eq!(full_normalize("100jähriges"), "100jaehriges");
    }

    #[test]
    fn expands_nfkc_fractions() {
        assert_eq!(full_normalize("¼"), "1/4");
        assert_eq!(full_normalize("²"), "2");
    }
}
