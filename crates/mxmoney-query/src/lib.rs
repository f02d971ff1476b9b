//! Search query parsing for the transaction search box
//!
//! Turns the raw text typed by the user into a [`ParsedQuery`] and
//! provides the accent and case folding used on both sides of every
//! text comparison.

pub mod normalize;
pub mod parser;
pub mod types;

pub use normalize::{normalize, normalize_char};
pub use parser::{parse_month, parse_query, parse_year};
pub use types::{ParsedQuery, TagKey};

/// Tag vocabulary shown in the search hints, as `(portuguese, english)` pairs
pub const TAG_VOCABULARY: [(&str, &str); 3] = [
    ("#categoria:", "#category:"),
    ("#mes:", "#month:"),
    ("#ano:", "#year:"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabulary_is_recognized() {
        for (pt, en) in TAG_VOCABULARY {
            for key in [pt, en] {
                let name = key.trim_start_matches('#').trim_end_matches(':');
                assert!(TagKey::from_normalized(name).is_some(), "{}", key);
            }
        }
    }

    #[test]
    fn test_is_empty_per_clause() {
        assert!(ParsedQuery::default().is_empty());
        assert!(!parse_query("#ano:2026").is_empty());
        assert!(!parse_query("#mes:jan").is_empty());
        assert!(!parse_query("#categoria:casa").is_empty());
        assert!(parse_query("#ano:bad").is_empty());
    }
}
