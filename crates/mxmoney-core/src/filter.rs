//! Conjunctive search filter over a transaction snapshot

use mxmoney_query::{normalize, ParsedQuery};

use super::models::Transaction;

/// Apply every present clause of `query` and return the matches, most
/// recent first.
///
/// A query with no clause at all yields nothing: the search page shows
/// an empty list until the user types something.
pub fn filter_transactions(transactions: &[Transaction], query: &ParsedQuery) -> Vec<Transaction> {
    if query.is_empty() {
        return Vec::new();
    }

    let text = normalize(&query.text_term);
    let mut matched: Vec<Transaction> = transactions
        .iter()
        .filter(|t| matches_query(t, query, &text))
        .cloned()
        .collect();

    sort_by_date_desc(&mut matched);

    log::debug!("filter kept {} of {} transactions", matched.len(), transactions.len());
    matched
}

/// Evaluate one transaction against the query.
///
/// `normalized_text` is `normalize(&query.text_term)`, computed once per
/// query by the caller.
pub fn matches_query(transaction: &Transaction, query: &ParsedQuery, normalized_text: &str) -> bool {
    if !normalized_text.is_empty() && !normalize(&transaction.description).contains(normalized_text) {
        return false;
    }

    if let Some(term) = &query.category_term {
        match transaction.category_name() {
            Some(name) if normalize(name).contains(term.as_str()) => {}
            _ => return false,
        }
    }

    if let Some(month) = query.month {
        if transaction.month0() != month {
            return false;
        }
    }

    if let Some(year) = query.year {
        if transaction.year() != year {
            return false;
        }
    }

    true
}

/// Most recent first; equal dates keep their snapshot order
pub fn sort_by_date_desc(transactions: &mut [Transaction]) {
    // sort_by is stable
    transactions.sort_by(|a, b| b.effective_date.cmp(&a.effective_date));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use crate::types::{Recurrence, TransactionType};
    use chrono::NaiveDate;
    use mxmoney_query::parse_query;
    use rust_decimal::Decimal;

    fn tx(id: i64, description: &str, date: &str, category: Option<&str>) -> Transaction {
        Transaction {
            id,
            description: description.to_string(),
            amount: Decimal::from(10),
            effective_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            kind: TransactionType::Expense,
            recurrence: Recurrence::None,
            category: category.map(|name| Category {
                id: id * 100,
                name: name.to_string(),
                color: None,
                icon: None,
            }),
        }
    }

    fn snapshot() -> Vec<Transaction> {
        vec![
            tx(1, "Conta de Água", "2026-02-01", Some("Moradia")),
            tx(2, "Cinema com amigos", "2026-02-15", Some("Lazer")),
            tx(3, "Cinema", "2025-02-20", Some("Lazer")),
            tx(4, "Agua mineral", "2026-03-02", None),
            tx(5, "Aluguel", "2026-02-15", Some("Moradia")),
        ]
    }

    fn ids(result: &[Transaction]) -> Vec<i64> {
        result.iter().map(|t| t.id).collect()
    }

    #[test]
    fn test_empty_query_returns_nothing() {
        assert!(filter_transactions(&snapshot(), &ParsedQuery::default()).is_empty());
    }

    #[test]
    fn test_text_is_accent_and_case_insensitive() {
        let result = filter_transactions(&snapshot(), &parse_query("AGUA"));
        assert_eq!(ids(&result), vec![4, 1]);
    }

    #[test]
    fn test_category_clause_excludes_uncategorized() {
        let result = filter_transactions(&snapshot(), &parse_query("agua #categoria:mora"));
        assert_eq!(ids(&result), vec![1]);
    }

    #[test]
    fn test_month_and_year_clauses() {
        let result = filter_transactions(&snapshot(), &parse_query("#mes:fev #ano:2026"));
        assert_eq!(ids(&result), vec![2, 5, 1]);

        let result = filter_transactions(&snapshot(), &parse_query("#month:feb"));
        assert_eq!(ids(&result), vec![2, 5, 1, 3]);
    }

    #[test]
    fn test_sort_order_most_recent_first() {
        let transactions = vec![tx(1, "a", "2026-02-01", None), tx(2, "a", "2026-02-15", None)];
        let result = filter_transactions(&transactions, &parse_query("a"));
        assert_eq!(ids(&result), vec![2, 1]);
    }

    #[test]
    fn test_equal_dates_keep_snapshot_order() {
        let transactions = vec![
            tx(9, "x", "2026-02-15", None),
            tx(3, "x", "2026-02-15", None),
            tx(7, "x", "2026-02-15", None),
        ];
        let result = filter_transactions(&transactions, &parse_query("x"));
        assert_eq!(ids(&result), vec![9, 3, 7]);
    }

    #[test]
    fn test_adding_a_clause_narrows_results() {
        let transactions = snapshot();
        let steps = ["cinema", "cinema #categoria:lazer", "cinema #categoria:lazer #ano:2026"];
        let mut previous: Option<Vec<i64>> = None;
        for raw in steps {
            let current = ids(&filter_transactions(&transactions, &parse_query(raw)));
            if let Some(prev) = previous {
                assert!(current.iter().all(|id| prev.contains(id)), "{} widened the result", raw);
            }
            previous = Some(current);
        }
        assert_eq!(previous, Some(vec![2]));
    }

    #[test]
    fn test_no_matches_and_empty_input() {
        assert!(filter_transactions(&snapshot(), &parse_query("supermercado")).is_empty());
        assert!(filter_transactions(&[], &parse_query("agua")).is_empty());
    }
}
