//! Search query parser
//!
//! A query mixes free text with `#key:value` tag clauses:
//!
//! ```text
//! #categoria: Lazer #mes: fev #ano: 2026 cinema
//! ```
//!
//! Recognized keys are `categoria`/`category`, `mes`/`month` and
//! `ano`/`year`. Clauses are resolved left to right and a later clause
//! overrides an earlier one for the same key. A recognized clause whose
//! value does not parse is dropped; an unrecognized key stays in the
//! free text untouched.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::normalize::normalize;
use crate::types::{ParsedQuery, TagKey};

/// `#key:` followed by optional whitespace and a run of non-space, non-`#` characters
static TAG_CLAUSE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"#(\w+):\s*([^\s#]*)").expect("tag clause regex is valid")
});

const MONTHS_PT: [&str; 12] = [
    "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
];

const MONTHS_EN: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// Split a raw search string into structured clauses and residual text
pub fn parse_query(raw: &str) -> ParsedQuery {
    let mut query = ParsedQuery::default();
    let mut residual: Vec<&str> = Vec::new();
    let mut cursor = 0;

    for caps in TAG_CLAUSE.captures_iter(raw) {
        let (Some(whole), Some(key), Some(value)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            continue;
        };

        let Some(tag) = TagKey::from_normalized(&normalize(key.as_str())) else {
            continue;
        };

        residual.push(&raw[cursor..whole.start()]);
        cursor = whole.end();
        if !apply_clause(&mut query, tag, value.as_str()) {
            log::debug!("dropping {} clause with unusable value {:?}", tag, value.as_str());
        }
    }
    residual.push(&raw[cursor..]);

    query.text_term = residual
        .iter()
        .map(|piece| piece.trim())
        .filter(|piece| !piece.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    log::debug!("parsed query {:?} into {:?}", raw, query);
    query
}

/// Store a clause value on the query; false when the value is unusable
fn apply_clause(query: &mut ParsedQuery, tag: TagKey, value: &str) -> bool {
    match tag {
        TagKey::Category => {
            let term = normalize(value);
            if term.is_empty() {
                return false;
            }
            query.category_term = Some(term);
        }
        TagKey::Month => match parse_month(value) {
            Some(month) => query.month = Some(month),
            None => return false,
        },
        TagKey::Year => match parse_year(value) {
            Some(year) => query.year = Some(year),
            None => return false,
        },
    }
    true
}

/// Resolve a month name by its first three letters, Portuguese first
pub fn parse_month(value: &str) -> Option<u32> {
    let prefix: String = normalize(value).chars().take(3).collect();
    MONTHS_PT
        .iter()
        .position(|m| *m == prefix)
        .or_else(|| MONTHS_EN.iter().position(|m| *m == prefix))
        .map(|index| index as u32)
}

/// Accept exactly four ASCII digits
pub fn parse_year(value: &str) -> Option<i32> {
    if value.len() == 4 && value.bytes().all(|b| b.is_ascii_digit()) {
        value.parse().ok()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_round_trip() {
        let query = parse_query("#categoria: Lazer #mes: fev #ano: 2026 cinema");
        assert_eq!(query.text_term, "cinema");
        assert_eq!(query.category_term, Some(normalize("Lazer")));
        assert_eq!(query.month, Some(1));
        assert_eq!(query.year, Some(2026));
    }

    #[test]
    fn test_english_keys_and_values() {
        let query = parse_query("rent #Category:Housing #MONTH:December #year:2025");
        assert_eq!(query.text_term, "rent");
        assert_eq!(query.category_term.as_deref(), Some("housing"));
        assert_eq!(query.month, Some(11));
        assert_eq!(query.year, Some(2025));
    }

    #[test]
    fn test_unrecognized_tag_stays_text() {
        let query = parse_query("#foo: bar");
        assert_eq!(query.text_term, "#foo: bar");
        assert_eq!(query.category_term, None);
        assert_eq!(query.month, None);
        assert_eq!(query.year, None);
    }

    #[test]
    fn test_plain_text_keeps_original_form() {
        let query = parse_query("  Conta de   Água ");
        assert_eq!(query.text_term, "Conta de   Água");
        assert!(!query.is_empty());
    }

    #[test]
    fn test_text_between_tags_is_joined() {
        let query = parse_query("conta #mes:jan de #ano:2024 luz");
        assert_eq!(query.text_term, "conta de luz");
    }

    #[test]
    fn test_bad_month_is_dropped() {
        let query = parse_query("mercado #mes:xyz");
        assert_eq!(query.text_term, "mercado");
        assert_eq!(query.month, None);
    }

    #[test]
    fn test_bad_year_is_dropped() {
        for raw in ["#ano:26", "#ano:20266", "#year:abcd", "#ano:٢٠٢٦"] {
            let query = parse_query(raw);
            assert_eq!(query.year, None, "{}", raw);
            assert_eq!(query.text_term, "", "{}", raw);
        }
    }

    #[test]
    fn test_last_clause_wins() {
        let query = parse_query("#mes:jan #mes:mar #categoria:a #categoria:b");
        assert_eq!(query.month, Some(2));
        assert_eq!(query.category_term.as_deref(), Some("b"));
    }

    #[test]
    fn test_unparsable_repeat_keeps_earlier_value() {
        let query = parse_query("#ano:2024 #ano:xx");
        assert_eq!(query.year, Some(2024));
    }

    #[test]
    fn test_accented_key_and_month() {
        let query = parse_query("#mês:Março #CATEGORIA:Saúde");
        assert_eq!(query.month, Some(2));
        assert_eq!(query.category_term.as_deref(), Some("saude"));
    }

    #[test]
    fn test_empty_value_is_dropped() {
        let query = parse_query("#categoria: #mes:abr");
        assert_eq!(query.category_term, None);
        assert_eq!(query.month, Some(3));
        assert_eq!(query.text_term, "");
    }

    #[test]
    fn test_apply_clause_reports_unusable_values() {
        let mut query = ParsedQuery::default();
        assert!(apply_clause(&mut query, TagKey::Month, "abril"));
        assert!(!apply_clause(&mut query, TagKey::Month, "xyz"));
        assert!(!apply_clause(&mut query, TagKey::Category, ""));
        assert!(!apply_clause(&mut query, TagKey::Year, "99"));
        assert_eq!(query.month, Some(3));
        assert_eq!(TagKey::Month.to_string(), "month");
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_query("").is_empty());
        assert!(parse_query("   ").is_empty());
    }

    #[test]
    fn test_parse_month_tables() {
        assert_eq!(parse_month("fevereiro"), Some(1));
        assert_eq!(parse_month("Feb"), Some(1));
        assert_eq!(parse_month("out"), Some(9));
        assert_eq!(parse_month("oct"), Some(9));
        assert_eq!(parse_month("ja"), None);
        assert_eq!(parse_month(""), None);
    }
}
