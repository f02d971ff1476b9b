//! Case and accent folding for search comparisons

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Canonical search form of a string.
///
/// Lower-cases every character, decomposes to NFD and drops combining
/// marks, so `"Água"` and `"AGUA"` both become `"agua"`. Digits,
/// punctuation and whitespace pass through unchanged.
///
/// Folding is done one character at a time, which keeps the output a
/// plain concatenation of [`normalize_char`] results. Highlighting relies
/// on that to map matches back onto the original text.
pub fn normalize(value: &str) -> String {
    value.chars().flat_map(char::to_lowercase).nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Canonical search form of a single character (possibly empty)
pub fn normalize_char(c: char) -> String {
    c.to_lowercase().nfd().filter(|c| !is_combining_mark(*c)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_accents_and_case() {
        assert_eq!(normalize("Água"), "agua");
        assert_eq!(normalize("AGUA"), "agua");
        assert_eq!(normalize("agua"), "agua");
        assert_eq!(normalize("Ação Çedilha"), "acao cedilha");
    }

    #[test]
    fn test_normalize_keeps_digits_and_punctuation() {
        assert_eq!(normalize("Conta #12: R$ 3,50!"), "conta #12: r$ 3,50!");
    }

    #[test]
    fn test_normalize_decomposed_input() {
        // "e" followed by a combining acute accent
        assert_eq!(normalize("Cafe\u{301}"), "cafe");
    }

    #[test]
    fn test_normalize_idempotent() {
        for input in ["Água", "São Paulo", "ÉCOLE", "naïve", "", "  x  ", "Ωμέγα", "İstanbul"] {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", input);
        }
    }

    #[test]
    fn test_normalize_is_concatenation_of_chars() {
        let input = "Conta de Água Ç";
        let by_char: String = input.chars().map(normalize_char).collect();
        assert_eq!(normalize(input), by_char);
    }

    #[test]
    fn test_normalize_char_combining_mark_is_empty() {
        assert_eq!(normalize_char('\u{301}'), "");
        assert_eq!(normalize_char('Ç'), "c");
    }
}
