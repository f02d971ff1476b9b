//! Locating the searched term inside a description for emphasis

use mxmoney_query::{normalize, normalize_char};
use mxmoney_utils::escape_html;
use serde::{Deserialize, Serialize};

/// A description split around the first match, in its original form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightSpan {
    pub before: String,
    #[serde(rename = "match")]
    pub matched: String,
    pub after: String,
}

impl HighlightSpan {
    /// Render with the match wrapped in `<mark>`, escaping every part
    pub fn to_html(&self) -> String {
        format!(
            "{}<mark>{}</mark>{}",
            escape_html(&self.before),
            escape_html(&self.matched),
            escape_html(&self.after)
        )
    }

    /// Render with arbitrary markers around the match
    pub fn wrap(&self, open: &str, close: &str) -> String {
        format!("{}{}{}{}{}", self.before, open, self.matched, close, self.after)
    }
}

/// Find the first accent and case insensitive occurrence of `term` in
/// `text` and split the original `text` around it.
///
/// Matching runs on the normalized forms. Every normalized byte remembers
/// which original character produced it, so the span boundaries always
/// fall on original character boundaries even when folding changes byte
/// lengths ("Á" is two bytes, "a" is one).
pub fn locate_highlight(text: &str, term: &str) -> Option<HighlightSpan> {
    let needle = normalize(term);
    if needle.is_empty() {
        return None;
    }

    let mut haystack = String::with_capacity(text.len());
    // (start, end) byte range in `text` of the character behind each haystack byte
    let mut origin: Vec<(usize, usize)> = Vec::with_capacity(text.len());
    for (start, c) in text.char_indices() {
        let folded = normalize_char(c);
        let end = start + c.len_utf8();
        origin.extend(std::iter::repeat((start, end)).take(folded.len()));
        haystack.push_str(&folded);
    }

    let found = haystack.find(&needle)?;
    let start = origin[found].0;
    let mut end = origin[found + needle.len() - 1].1;

    // Trailing combining marks fold to nothing; keep them with their base letter
    end += text[end..]
        .chars()
        .take_while(|c| normalize_char(*c).is_empty())
        .map(char::len_utf8)
        .sum::<usize>();

    Some(HighlightSpan {
        before: text[..start].to_string(),
        matched: text[start..end].to_string(),
        after: text[end..].to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_accented_text() {
        let span = locate_highlight("Conta de Água", "agua").unwrap();
        assert_eq!(span.before, "Conta de ");
        assert_eq!(span.matched, "Água");
        assert_eq!(span.after, "");
    }

    #[test]
    fn test_highlight_accented_term() {
        let span = locate_highlight("SALARIO mensal", "salário").unwrap();
        assert_eq!(span.matched, "SALARIO");
        assert_eq!(span.after, " mensal");
    }

    #[test]
    fn test_first_occurrence_only() {
        let span = locate_highlight("luz e luz", "LUZ").unwrap();
        assert_eq!(span.before, "");
        assert_eq!(span.matched, "luz");
        assert_eq!(span.after, " e luz");
    }

    #[test]
    fn test_empty_term_and_no_match() {
        assert_eq!(locate_highlight("Conta de Água", ""), None);
        assert_eq!(locate_highlight("Conta de Água", "gas"), None);
        assert_eq!(locate_highlight("", "a"), None);
    }

    #[test]
    fn test_decomposed_text_keeps_marks_in_match() {
        let text = "Cafe\u{301} da manha\u{303}";
        let span = locate_highlight(text, "café").unwrap();
        assert_eq!(span.matched, "Cafe\u{301}");
        assert_eq!(span.after, " da manha\u{303}");
    }

    #[test]
    fn test_match_in_the_middle_of_multibyte_text() {
        let span = locate_highlight("Pão de açúcar ção", "acucar").unwrap();
        assert_eq!(span.before, "Pão de ");
        assert_eq!(span.matched, "açúcar");
        assert_eq!(span.after, " ção");
    }

    #[test]
    fn test_to_html_escapes() {
        let span = locate_highlight("<b>Água</b>", "agua").unwrap();
        assert_eq!(span.to_html(), "&lt;b&gt;<mark>Água</mark>&lt;/b&gt;");
        assert_eq!(span.wrap("[", "]"), "<b>[Água]</b>");
    }
}
