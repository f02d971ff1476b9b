//! Per-day, per-period and per-category aggregation
//!
//! Every function here is a single pass over the slice it is given and
//! builds a fresh value; nothing is cached between calls.

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, NaiveDate};
use mxmoney_config::{CategoriesConfig, WeekStart};
use rust_decimal::{Decimal, RoundingStrategy};

use super::filter::sort_by_date_desc;
use super::models::Transaction;
use super::reports::{
    CalendarDay, CategoryAverage, CategoryTotal, DayAggregate, FinancialSummary, RecurrenceTotal, ResultSummary, Totals,
};
use super::time::{calendar_range, Period};
use super::types::{Recurrence, TransactionType};

/// How the category breakdown names and colors its buckets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryOptions {
    /// Bucket for transactions with no category
    pub uncategorized_label: String,
    /// Color for buckets whose category has none
    pub fallback_color: String,
}

impl Default for CategoryOptions {
    fn default() -> Self {
        CategoriesConfig::default().into()
    }
}

impl From<CategoriesConfig> for CategoryOptions {
    fn from(config: CategoriesConfig) -> Self {
        Self {
            uncategorized_label: config.uncategorized_label,
            fallback_color: config.fallback_color,
        }
    }
}

/// Bucket transactions by their exact effective date
///
/// Dates without transactions have no entry.
pub fn aggregate_by_day(transactions: &[Transaction]) -> BTreeMap<NaiveDate, DayAggregate> {
    let mut days: BTreeMap<NaiveDate, DayAggregate> = BTreeMap::new();
    for t in transactions {
        let day = days.entry(t.effective_date).or_default();
        match t.kind {
            TransactionType::Income => {
                day.income_count += 1;
                day.total_income += t.amount;
            }
            TransactionType::Expense => {
                day.expense_count += 1;
                day.total_expense += t.amount;
            }
        }
    }
    days
}

/// Income and expense over the whole slice
pub fn totals(transactions: &[Transaction]) -> Totals {
    let (income, expense) = transactions.iter().fold(
        (Decimal::ZERO, Decimal::ZERO),
        |(income, expense), t| match t.kind {
            TransactionType::Income => (income + t.amount, expense),
            TransactionType::Expense => (income, expense + t.amount),
        },
    );
    Totals::new(income, expense)
}

/// Totals plus a count, as shown above a result list
pub fn result_summary(transactions: &[Transaction]) -> ResultSummary {
    ResultSummary {
        totals: totals(transactions),
        count: transactions.len(),
    }
}

/// Totals for transactions dated within `start..=end`
pub fn totals_in_range(transactions: &[Transaction], start: NaiveDate, end: NaiveDate) -> Totals {
    totals_for_period(transactions, &Period::Range { start, end })
}

pub fn totals_for_period(transactions: &[Transaction], period: &Period) -> Totals {
    let (income, expense) = transactions
        .iter()
        .filter(|t| period.contains(&t.effective_date))
        .fold((Decimal::ZERO, Decimal::ZERO), |(income, expense), t| match t.kind {
            TransactionType::Income => (income + t.amount, expense),
            TransactionType::Expense => (income, expense + t.amount),
        });
    Totals::new(income, expense)
}

/// Transactions of a period, most recent first
///
/// Unlike the search filter, an unrestricted period lists everything.
pub fn transactions_in_period(transactions: &[Transaction], period: &Period) -> Vec<Transaction> {
    let mut selected: Vec<Transaction> = transactions
        .iter()
        .filter(|t| period.contains(&t.effective_date))
        .cloned()
        .collect();
    sort_by_date_desc(&mut selected);
    selected
}

/// Spending breakdown: expenses grouped by category name, largest first
pub fn aggregate_by_category(transactions: &[Transaction]) -> Vec<CategoryTotal> {
    aggregate_by_category_with(transactions, TransactionType::Expense, &CategoryOptions::default())
}

/// Group transactions of one type by category name and sum them
///
/// Uncategorized transactions share one bucket named by
/// `options.uncategorized_label`. A bucket takes the color of the first
/// transaction seen for it. Ties on the total are ordered by name.
pub fn aggregate_by_category_with(
    transactions: &[Transaction],
    kind: TransactionType,
    options: &CategoryOptions,
) -> Vec<CategoryTotal> {
    let mut buckets: HashMap<&str, CategoryTotal> = HashMap::new();

    for t in transactions.iter().filter(|t| t.kind == kind) {
        let name = t.category_name().unwrap_or(options.uncategorized_label.as_str());
        let bucket = buckets.entry(name).or_insert_with(|| CategoryTotal {
            category_name: name.to_string(),
            total: Decimal::ZERO,
            color: t
                .category
                .as_ref()
                .and_then(|c| c.color.clone())
                .filter(|color| !color.is_empty())
                .unwrap_or_else(|| options.fallback_color.clone()),
        });
        bucket.total += t.amount;
    }

    let mut result: Vec<CategoryTotal> = buckets.into_values().collect();
    result.sort_by(|a, b| {
        b.total
            .cmp(&a.total)
            .then_with(|| a.category_name.cmp(&b.category_name))
    });
    result
}

/// Count and totals for each repeating cadence that occurs
pub fn aggregate_by_recurrence(transactions: &[Transaction]) -> Vec<RecurrenceTotal> {
    Recurrence::REPEATING
        .iter()
        .filter_map(|recurrence| {
            let (count, income, expense) = transactions
                .iter()
                .filter(|t| t.recurrence == *recurrence)
                .fold((0, Decimal::ZERO, Decimal::ZERO), |(count, income, expense), t| match t.kind {
                    TransactionType::Income => (count + 1, income + t.amount, expense),
                    TransactionType::Expense => (count + 1, income, expense + t.amount),
                });
            (count > 0).then(|| RecurrenceTotal {
                recurrence: *recurrence,
                count,
                totals: Totals::new(income, expense),
            })
        })
        .collect()
}

/// Calendar grid for one month padded to whole weeks
///
/// Days without transactions carry a zero aggregate and an empty list.
/// An out-of-range `month0`, or a month whose padding would leave the
/// supported date range, yields an empty grid.
pub fn calendar_month(
    transactions: &[Transaction],
    year: i32,
    month0: u32,
    week_start: WeekStart,
) -> Vec<CalendarDay> {
    let Some((start, end)) = calendar_range(year, month0, week_start) else {
        return Vec::new();
    };

    let visible: Vec<Transaction> = transactions
        .iter()
        .filter(|t| t.effective_date >= start && t.effective_date <= end)
        .cloned()
        .collect();
    let by_day = aggregate_by_day(&visible);
    let mut listed: HashMap<NaiveDate, Vec<Transaction>> = HashMap::new();
    for t in visible {
        listed.entry(t.effective_date).or_default().push(t);
    }

    let mut days = Vec::new();
    let mut next = Some(start);
    while let Some(date) = next.filter(|date| *date <= end) {
        days.push(CalendarDay {
            date,
            in_month: date.year() == year && date.month0() == month0,
            aggregate: by_day.get(&date).cloned().unwrap_or_default(),
            transactions: listed.remove(&date).unwrap_or_default(),
        });
        next = date.succ_opt();
    }
    days
}

/// Overview of the whole history, `None` for an empty slice
pub fn financial_summary(transactions: &[Transaction], options: &CategoryOptions) -> Option<FinancialSummary> {
    let first_date = transactions.iter().map(|t| t.effective_date).min()?;
    let last_date = transactions.iter().map(|t| t.effective_date).max()?;

    let months = months_spanned(first_date, last_date);
    let totals = totals(transactions);
    let average_monthly_expense = monthly_average(totals.expense, months);
    let expense_by_category = aggregate_by_category_with(transactions, TransactionType::Expense, options)
        .into_iter()
        .map(|category| CategoryAverage {
            monthly_average: monthly_average(category.total, months),
            category,
        })
        .collect();

    Some(FinancialSummary {
        first_date,
        last_date,
        months,
        transaction_count: transactions.len(),
        recurring_count: transactions.iter().filter(|t| t.recurrence.is_recurring()).count(),
        totals,
        average_monthly_expense,
        expense_by_category,
        income_by_category: aggregate_by_category_with(transactions, TransactionType::Income, options),
    })
}

fn monthly_average(total: Decimal, months: u32) -> Decimal {
    (total / Decimal::from(months)).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Months from the start of `first`'s month to the start of `last`'s, plus one
fn months_spanned(first: NaiveDate, last: NaiveDate) -> u32 {
    let diff = (last.year() - first.year()) * 12 + last.month0() as i32 - first.month0() as i32;
    (diff + 1).max(1) as u32
}
