//! mxmoney command line entry point

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use mxmoney_config::error::ConfigErrorSeverity;
use mxmoney_config::{Config, WeekStart};
use mxmoney_core::{
    locate_highlight, DefaultErrorLogger, ErrorLogger, JsonFileSource, Period, SourceRef, Totals,
    Transaction, TransactionBook, TransactionType,
};
use mxmoney_utils::format_currency;
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;

#[derive(Parser, Debug)]
#[command(name = "mxmoney")]
#[command(version)]
#[command(about = "Search and summarize a personal finance transaction snapshot", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Transaction snapshot, overrides data.snapshot
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search descriptions, with optional #categoria: #mes: #ano: tags
    Search {
        query: String,
        /// Mark matches with <mark> and escape descriptions
        #[arg(long)]
        html: bool,
    },
    /// Day-by-day totals for one month
    Calendar {
        #[arg(long)]
        year: i32,
        /// Month number, 1-12
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: u32,
        /// First weekday of the grid, overrides calendar.week_start
        #[arg(long)]
        week_start: Option<WeekStart>,
    },
    /// Income, expense and balance between two dates (inclusive)
    Totals {
        #[arg(long)]
        from: NaiveDate,
        #[arg(long)]
        to: NaiveDate,
    },
    /// Breakdown by category, largest first
    Categories {
        /// income/expense (or receita/despesa)
        #[arg(long = "type", default_value = "expense")]
        kind: TransactionType,
    },
    /// Totals per recurrence cadence
    Recurring,
    /// Overview of the whole history
    Summary,
    /// Print the default configuration file
    DefaultConfig,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if let Command::DefaultConfig = args.command {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    let config = match Config::load(&args.config) {
        Ok(config) => Some(config),
        Err(e) if e.severity() == ConfigErrorSeverity::Warning => None,
        Err(e) => return Err(anyhow::anyhow!("{}", e.to_details())),
    };
    let missing_config = config.is_none();
    let mut config = config.unwrap_or_default();

    let mut logger = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.clone()),
    );
    logger.init();

    if missing_config {
        log::warn!("config {} not found, using defaults", args.config.display());
    }
    if let Some(data) = args.data.clone() {
        config.data.snapshot = data;
    }
    if let Command::Calendar { week_start: Some(week_start), .. } = args.command {
        log::debug!("calendar weeks start on {}", week_start);
        config.calendar.week_start = week_start;
    }

    let rt = Runtime::new()?;
    let source: SourceRef = Arc::new(JsonFileSource::new(config.data.snapshot.clone()));
    let book = match rt.block_on(TransactionBook::load(source.as_ref(), &config)) {
        Ok(book) => book,
        Err(e) => {
            DefaultErrorLogger.log_error(&e, "load snapshot");
            return Err(e).context("failed to load the transaction snapshot");
        }
    };
    log::info!("loaded {} transactions", book.len());

    let out = Output { config: &config, json: args.json };
    match args.command {
        Command::Search { query, html } => {
            let result = book.search(&query);
            if out.json {
                return out.print_json(&result);
            }
            for t in &result.transactions {
                let span = locate_highlight(&t.description, &result.query.text_term);
                let description = match (span, html) {
                    (Some(span), true) => span.to_html(),
                    (Some(span), false) => span.wrap("[", "]"),
                    (None, true) => mxmoney_utils::escape_html(&t.description),
                    (None, false) => t.description.clone(),
                };
                out.print_line(t, &description);
            }
            println!("{} result(s)", result.summary.count);
            out.print_totals(&result.summary.totals);
        }
        Command::Calendar { year, month, .. } => {
            let days = book.calendar(year, month - 1);
            if out.json {
                return out.print_json(&days);
            }
            for day in days.iter().filter(|d| d.in_month && d.aggregate.transaction_count() > 0) {
                println!(
                    "{}  +{} ({})  -{} ({})",
                    day.date,
                    out.money(day.aggregate.total_income),
                    day.aggregate.income_count,
                    out.money(day.aggregate.total_expense),
                    day.aggregate.expense_count
                );
                for t in &day.transactions {
                    out.print_line(t, &t.description);
                }
            }
        }
        Command::Totals { from, to } => {
            let period = Period::Range { start: from, end: to };
            let totals = book.totals_for_period(&period);
            if out.json {
                return out.print_json(&totals);
            }
            println!("{}", period.description());
            out.print_totals(&totals);
        }
        Command::Categories { kind } => {
            let categories = book.by_category(kind);
            if out.json {
                return out.print_json(&categories);
            }
            for c in &categories {
                println!("{:<24} {:>16}  {}", c.category_name, out.money(c.total), c.color);
            }
        }
        Command::Recurring => {
            let groups = book.by_recurrence();
            if out.json {
                return out.print_json(&groups);
            }
            for g in &groups {
                println!("{:<8} {:>4} transaction(s)", g.recurrence, g.count);
                out.print_totals(&g.totals);
            }
        }
        Command::Summary => {
            let summary = book.summary();
            if out.json {
                return out.print_json(&summary);
            }
            match summary {
                Some(s) => {
                    println!("{} to {} ({} month(s))", s.first_date, s.last_date, s.months);
                    println!("{} transaction(s), {} recurring", s.transaction_count, s.recurring_count);
                    out.print_totals(&s.totals);
                    println!("average monthly expense: {}", out.money(s.average_monthly_expense));
                    for c in &s.expense_by_category {
                        println!(
                            "  {:<24} {:>16}  {:>14}/month",
                            c.category.category_name,
                            out.money(c.category.total),
                            out.money(c.monthly_average)
                        );
                    }
                }
                None => println!("no transactions"),
            }
        }
        Command::DefaultConfig => {}
    }

    Ok(())
}

struct Output<'a> {
    config: &'a Config,
    json: bool,
}

impl Output<'_> {
    fn money(&self, value: Decimal) -> String {
        let display = &self.config.display;
        format_currency(
            value,
            &display.currency_symbol,
            &display.thousands_separator,
            &display.decimal_separator,
        )
    }

    fn print_line(&self, t: &Transaction, description: &str) {
        let category = t.category_name().unwrap_or("-");
        println!(
            "{}  {:<40} {:<16} {}",
            t.effective_date,
            description,
            category,
            self.money(t.signed_amount())
        );
    }

    fn print_totals(&self, totals: &Totals) {
        println!(
            "income {}  expense {}  balance {}",
            self.money(totals.income),
            self.money(totals.expense),
            self.money(totals.balance)
        );
    }

    fn print_json<T: serde::Serialize>(&self, value: &T) -> anyhow::Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }
}
