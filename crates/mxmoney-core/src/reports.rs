//! Report structures returned by the aggregation functions

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::models::Transaction;
use super::types::Recurrence;

/// Per-date counts and sums for the calendar view
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayAggregate {
    pub income_count: usize,
    pub expense_count: usize,
    pub total_income: Decimal,
    pub total_expense: Decimal,
}

impl DayAggregate {
    pub fn transaction_count(&self) -> usize {
        self.income_count + self.expense_count
    }

    pub fn balance(&self) -> Decimal {
        self.total_income - self.total_expense
    }
}

/// Income, expense and their difference over some set of transactions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub income: Decimal,
    pub expense: Decimal,
    pub balance: Decimal,
}

impl Totals {
    pub fn new(income: Decimal, expense: Decimal) -> Self {
        Self {
            income,
            expense,
            balance: income - expense,
        }
    }
}

/// Totals plus the number of transactions they cover
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultSummary {
    #[serde(flatten)]
    pub totals: Totals,
    pub count: usize,
}

/// One slice of the spending breakdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    pub category_name: String,
    pub total: Decimal,
    pub color: String,
}

/// A spending slice with its share of an average month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryAverage {
    #[serde(flatten)]
    pub category: CategoryTotal,
    /// `total` over the summary's month count, 2 decimal places
    pub monthly_average: Decimal,
}

/// Totals for one repeating cadence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrenceTotal {
    pub recurrence: Recurrence,
    pub count: usize,
    #[serde(flatten)]
    pub totals: Totals,
}

/// A cell of the month calendar grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    pub date: NaiveDate,
    /// False for the leading and trailing days borrowed from adjacent months
    pub in_month: bool,
    #[serde(flatten)]
    pub aggregate: DayAggregate,
    /// The day's transactions in snapshot order
    pub transactions: Vec<Transaction>,
}

/// Whole-history overview used by the reports page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSummary {
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
    /// Calendar months touched, counting both ends
    pub months: u32,
    pub transaction_count: usize,
    pub recurring_count: usize,
    pub totals: Totals,
    pub average_monthly_expense: Decimal,
    pub expense_by_category: Vec<CategoryAverage>,
    pub income_by_category: Vec<CategoryTotal>,
}

/// Output of a search box evaluation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub query: mxmoney_query::ParsedQuery,
    pub transactions: Vec<Transaction>,
    pub summary: ResultSummary,
}
