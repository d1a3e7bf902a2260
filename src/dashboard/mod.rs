//! Dashboard calculations
//!
//! Turns a list of resolved transactions into the figures shown on the
//! dashboard: the running balance chart, the monthly income and expense
//! chart, the spending breakdown by category and the headline totals.
//!
//! Every calculation takes the current date as an argument instead of
//! reading the clock.

mod balance_trend;
mod ranking;
mod rollup;
mod summary;

pub use balance_trend::{BalancePoint, DEFAULT_TRAILING_DAYS, balance_trend};
pub use ranking::{CategoryTotal, DEFAULT_TOP_CATEGORIES, category_share, top_categories};
pub use rollup::{
    MonthlyTotals, YearlyRollup, month_label, year_to_date_transactions, yearly_monthly_rollup,
};
pub use summary::{
    DashboardStats, Summary, dashboard_stats, savings_rate, summarize, summarize_for_month,
};
