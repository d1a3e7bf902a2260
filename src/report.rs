//! Assembles the dashboard figures into a single report.

use numfmt::{Formatter, Precision};
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use serde::Serialize;
use time::Date;

use crate::{
    Error,
    category::CategoryName,
    config::ReportConfig,
    dashboard::{
        BalancePoint, CategoryTotal, DashboardStats, Summary, YearlyRollup, balance_trend,
        category_share, dashboard_stats, month_label, summarize, top_categories,
        year_to_date_transactions, yearly_monthly_rollup,
    },
    dataset::Dataset,
    transaction::{ResolvedTransaction, TransactionId, TransactionType, recent_transactions},
};

/// A category in the spending breakdown and its share of the year's expenses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedCategory {
    /// The category and its total.
    #[serde(flatten)]
    pub total: CategoryTotal,
    /// The percentage of the year's expenses, `None` if there were none.
    pub share: Option<Decimal>,
}

/// A row in the recent transactions list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecentTransaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The day of the transaction.
    pub date: Date,
    /// Whether the transaction is income or an expense.
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// The amount of the transaction.
    pub amount: Decimal,
    /// The name of the category, `None` if uncategorized.
    pub category: Option<CategoryName>,
    /// The description of the transaction.
    pub description: Option<String>,
}

impl From<&ResolvedTransaction<'_>> for RecentTransaction {
    fn from(resolved: &ResolvedTransaction<'_>) -> Self {
        Self {
            id: resolved.transaction.id.clone(),
            date: resolved.date(),
            kind: resolved.kind(),
            amount: resolved.amount(),
            category: resolved.category.map(|category| category.name.clone()),
            description: resolved.transaction.description.clone(),
        }
    }
}

/// Everything shown on the dashboard and analytics pages, as of one day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// The day the report was made for.
    pub as_of: Date,
    /// Totals over all transactions.
    pub summary: Summary,
    /// The headline figures for the current month.
    pub stats: DashboardStats,
    /// The running balance for each day of the trailing window.
    pub balance_trend: Vec<BalancePoint>,
    /// Monthly totals and statistics for the selected year.
    pub rollup: YearlyRollup,
    /// The largest expense categories of the selected year.
    pub top_categories: Vec<RankedCategory>,
    /// The newest transactions, newest first.
    pub recent_transactions: Vec<RecentTransaction>,
}

impl Report {
    /// Build the report for `dataset` as of `today`.
    ///
    /// # Errors
    /// Returns [Error::InvalidRange] if the configured windows cannot be
    /// represented, e.g. `trailing_days` is zero.
    pub fn build(dataset: &Dataset, config: &ReportConfig, today: Date) -> Result<Self, Error> {
        let transactions = dataset.resolve();
        let year = config.rollup_year(today);

        let rollup = yearly_monthly_rollup(&transactions, year)?;
        let year_to_date = year_to_date_transactions(&transactions, year)?;
        let ranked = top_categories(&year_to_date, config.top_categories)
            .into_iter()
            .map(|total| RankedCategory {
                share: category_share(total.total, rollup.ytd_expense),
                total,
            })
            .collect();

        let report = Self {
            as_of: today,
            summary: summarize(&transactions),
            stats: dashboard_stats(&transactions, today)?,
            balance_trend: balance_trend(&transactions, today, config.trailing_days)?,
            top_categories: ranked,
            recent_transactions: recent_transactions(&transactions, config.recent_count)
                .iter()
                .map(RecentTransaction::from)
                .collect(),
            rollup,
        };

        tracing::info!(
            "Built report as of {today} for {} transactions, rollup year {year}",
            transactions.len()
        );

        Ok(report)
    }

    /// Serialize the report as pretty-printed JSON.
    ///
    /// # Errors
    /// Returns [Error::JSONSerializationError] if serialization fails.
    pub fn to_json(&self) -> Result<String, Error> {
        serde_json::to_string_pretty(self)
            .map_err(|error| Error::JSONSerializationError(error.to_string()))
    }

    /// Render the report as plain text with amounts formatted using
    /// `currency_symbol`.
    ///
    /// # Errors
    /// Returns [Error::InvalidCurrencySymbol] if `currency_symbol` cannot be
    /// used by the number formatter.
    pub fn render_text(&self, currency_symbol: &str) -> Result<String, Error> {
        let currency = CurrencyFormatter::new(currency_symbol)?;
        let money = |amount: Decimal| currency.format(amount);
        let stats = &self.stats;
        let summary = &self.summary;
        let rollup = &self.rollup;

        let mut lines = vec![
            format!("Report as of {}", self.as_of),
            String::new(),
            format!("Balance:         {}", money(stats.balance)),
            format!("Month income:    {}", money(stats.month_income)),
            format!("Month expenses:  {}", money(stats.month_expense)),
            format!("Total income:    {}", money(summary.total_income)),
            format!("Total expenses:  {}", money(summary.total_expense)),
            format!("Savings rate:    {}%", format_percent(summary.savings_rate)),
            String::new(),
            format!("Monthly totals for {}", rollup.year),
        ];

        for month in &rollup.months {
            let label = month_label(month.month);
            let income = money(month.income);
            let expense = money(month.expense);
            lines.push(format!("  {label}  income {income:>14}  expenses {expense:>14}"));
        }

        let ytd_income = money(rollup.ytd_income);
        let ytd_expense = money(rollup.ytd_expense);
        let avg_income = money(rollup.avg_monthly_income);
        let avg_expense = money(rollup.avg_monthly_expense);
        let savings_rate = format_percent(rollup.savings_rate);
        lines.extend([
            format!("  Year to date income:      {ytd_income}"),
            format!("  Year to date expenses:    {ytd_expense}"),
            format!("  Average monthly income:   {avg_income}"),
            format!("  Average monthly expenses: {avg_expense}"),
            format!("  Savings rate: {savings_rate}%"),
            String::new(),
            "Top spending categories".to_owned(),
        ]);

        if self.top_categories.is_empty() {
            lines.push("  No categorized expenses".to_owned());
        }

        for ranked in &self.top_categories {
            let name = &ranked.total.name;
            let total = money(ranked.total.total);
            let share = ranked
                .share
                .map(|share| format!(" ({}%)", format_percent(share)))
                .unwrap_or_default();
            lines.push(format!("  {name}  {total}{share}"));
        }

        lines.push(String::new());
        lines.push("Recent transactions".to_owned());

        if self.recent_transactions.is_empty() {
            lines.push("  No transactions".to_owned());
        }

        for transaction in &self.recent_transactions {
            let date = transaction.date;
            let category = transaction
                .category
                .as_ref()
                .map(|name| name.as_ref())
                .unwrap_or("Uncategorized");
            let amount = match transaction.kind {
                TransactionType::Income => money(transaction.amount),
                TransactionType::Expense => money(-transaction.amount),
            };
            let description = transaction.description.as_deref().unwrap_or_default();
            lines.push(format!("  {date}  {amount}  {category}  {description}"));
        }

        lines.push(String::new());
        let days = self.balance_trend.len();
        lines.push(format!("Balance over the last {days} days"));

        for point in &self.balance_trend {
            lines.push(format!("  {}  {}", point.date, money(point.balance)));
        }

        let mut text = lines.join("\n");
        text.push('\n');

        Ok(text)
    }
}

/// Round a percentage to one decimal place for display, with halves rounded
/// away from zero.
fn format_percent(percent: Decimal) -> Decimal {
    percent.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats amounts as currency with thousands separators and two decimals,
/// e.g. "$1,234.50" or "-$0.99".
pub struct CurrencyFormatter {
    positive: Formatter,
    negative: Formatter,
    symbol: String,
}

impl CurrencyFormatter {
    /// Create a formatter that places `symbol` before each amount.
    ///
    /// # Errors
    /// Returns [Error::InvalidCurrencySymbol] if `symbol` is too long to be
    /// used as a prefix.
    pub fn new(symbol: &str) -> Result<Self, Error> {
        let invalid_symbol = |_| Error::InvalidCurrencySymbol(symbol.to_owned());

        Ok(Self {
            positive: Formatter::currency(symbol)
                .map_err(invalid_symbol)?
                .precision(Precision::Decimals(0)),
            negative: Formatter::currency(&format!("-{symbol}"))
                .map_err(invalid_symbol)?
                .precision(Precision::Decimals(0)),
            symbol: symbol.to_owned(),
        })
    }

    /// Format `amount` rounded to cents, with half a cent rounded away from
    /// zero.
    pub fn format(&self, amount: Decimal) -> String {
        let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let is_negative = rounded < Decimal::ZERO;
        let magnitude = rounded.abs();
        let whole = magnitude.trunc();
        let cents = ((magnitude - whole) * Decimal::ONE_HUNDRED)
            .to_u32()
            .unwrap_or_default();

        let whole_value = whole.to_f64().unwrap_or_default();

        // numfmt renders zero as "0" without the prefix.
        let whole_text = match (whole.is_zero(), is_negative) {
            (true, false) => format!("{}0", self.symbol),
            (true, true) => format!("-{}0", self.symbol),
            (false, false) => self.positive.fmt_string(whole_value),
            (false, true) => self.negative.fmt_string(whole_value),
        };

        format!("{whole_text}.{cents:02}")
    }
}
