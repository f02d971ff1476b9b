//! Transaction search and aggregation core
//!
//! Pure functions over an in-memory snapshot of transactions: the search
//! box filter, match highlighting, and the per-day, per-period and
//! per-category summaries behind the calendar and report views.

pub mod aggregate;
pub mod error;
pub mod filter;
pub mod highlight;
pub mod models;
pub mod reports;
pub mod source;
pub mod time;
pub mod types;

use chrono::NaiveDate;
use mxmoney_config::{Config, WeekStart};
use mxmoney_query::parse_query;
use std::collections::BTreeMap;

pub use aggregate::{
    aggregate_by_category, aggregate_by_category_with, aggregate_by_day, aggregate_by_recurrence,
    calendar_month, financial_summary, result_summary, totals, totals_for_period, totals_in_range,
    transactions_in_period, CategoryOptions,
};
pub use error::{CoreError, CoreResult, DefaultErrorLogger, ErrorCode, ErrorLogger, ErrorSeverity};
pub use filter::filter_transactions;
pub use highlight::{locate_highlight, HighlightSpan};
pub use models::{Category, Transaction};
pub use mxmoney_query::{normalize, ParsedQuery};
pub use reports::{
    CalendarDay, CategoryAverage, CategoryTotal, DayAggregate, FinancialSummary, RecurrenceTotal, ResultSummary, SearchResult,
    Totals,
};
pub use source::{parse_snapshot, JsonFileSource, SourceRef, TransactionSource};
pub use time::Period;
pub use types::{Recurrence, TransactionType};

/// Immutable snapshot of the user's transactions plus view settings
///
/// Every method is a pure read; re-running a search on each keystroke
/// or after a refresh just means calling it again, or building a new
/// book from the refreshed list.
#[derive(Debug, Clone, Default)]
pub struct TransactionBook {
    transactions: Vec<Transaction>,
    categories: CategoryOptions,
    week_start: WeekStart,
}

impl TransactionBook {
    pub fn new(transactions: Vec<Transaction>) -> Self {
        Self {
            transactions,
            ..Self::default()
        }
    }

    /// Take category labels and week layout from the configuration
    pub fn with_config(transactions: Vec<Transaction>, config: &Config) -> Self {
        Self {
            transactions,
            categories: config.categories.clone().into(),
            week_start: config.calendar.week_start,
        }
    }

    /// Load the snapshot from a source and wrap it
    pub async fn load(source: &dyn TransactionSource, config: &Config) -> CoreResult<Self> {
        let transactions = source.load().await?;
        Ok(Self::with_config(transactions, config))
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn transaction(&self, id: i64) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    /// Parse the search box text, filter and summarize the matches
    pub fn search(&self, raw: &str) -> SearchResult {
        let query = parse_query(raw);
        let transactions = filter_transactions(&self.transactions, &query);
        let summary = result_summary(&transactions);
        SearchResult {
            query,
            transactions,
            summary,
        }
    }

    pub fn by_day(&self) -> BTreeMap<NaiveDate, DayAggregate> {
        aggregate_by_day(&self.transactions)
    }

    pub fn totals_in_range(&self, start: NaiveDate, end: NaiveDate) -> Totals {
        totals_in_range(&self.transactions, start, end)
    }

    pub fn totals_for_period(&self, period: &Period) -> Totals {
        totals_for_period(&self.transactions, period)
    }

    pub fn listing(&self, period: &Period) -> Vec<Transaction> {
        transactions_in_period(&self.transactions, period)
    }

    pub fn calendar(&self, year: i32, month0: u32) -> Vec<CalendarDay> {
        calendar_month(&self.transactions, year, month0, self.week_start)
    }

    /// Category breakdown for one transaction type
    pub fn by_category(&self, kind: TransactionType) -> Vec<CategoryTotal> {
        aggregate_by_category_with(&self.transactions, kind, &self.categories)
    }

    pub fn by_recurrence(&self) -> Vec<RecurrenceTotal> {
        aggregate_by_recurrence(&self.transactions)
    }

    pub fn summary(&self) -> Option<FinancialSummary> {
        financial_summary(&self.transactions, &self.categories)
    }
}

// ==================== Tests ====================
