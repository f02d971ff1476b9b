//! Query value types

use serde::{Deserialize, Serialize};

/// Structured form of a search string
///
/// Built fresh for every evaluation and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedQuery {
    /// Residual free text, trimmed, in its original casing and accents
    pub text_term: String,
    /// Normalized substring matched against the category name
    pub category_term: Option<String>,
    /// 0-based month (0 = January)
    pub month: Option<u32>,
    /// Four digit calendar year
    pub year: Option<i32>,
}

impl ParsedQuery {
    /// True when no clause would restrict a listing
    pub fn is_empty(&self) -> bool {
        self.text_term.is_empty()
            && self.category_term.is_none()
            && self.month.is_none()
            && self.year.is_none()
    }
}

/// Recognized tag keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKey {
    Category,
    Month,
    Year,
}

impl TagKey {
    /// Resolve a key as typed by the user. Portuguese and English
    /// spellings are both accepted; case and accents are ignored.
    pub fn from_normalized(key: &str) -> Option<Self> {
        match key {
            "categoria" | "category" => Some(TagKey::Category),
            "mes" | "month" => Some(TagKey::Month),
            "ano" | "year" => Some(TagKey::Year),
            _ => None,
        }
    }
}

impl std::fmt::Display for TagKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TagKey::Category => write!(f, "category"),
            TagKey::Month => write!(f, "month"),
            TagKey::Year => write!(f, "year"),
        }
    }
}
