//! Expense tracking core.
//!
//! The engine holds an immutable list of [`ExpenseRecord`]s and derives
//! everything the pages show from it: per-category and per-week totals,
//! month-over-month trends, and the filtered/sorted expense list. Nothing
//! here performs I/O except [`ExpenseStore::load`].

pub use aggregation::{
    CategoryAggregate, DashboardSummary, RECENT_LIMIT, TimeWindowAggregate, WeeklyBucket,
    WindowTotals, category_totals, dashboard_summary, recent_expenses, total_amount,
    trend_percent, week_start, weekly_breakdown, window_aggregate, window_totals,
};
pub use categories::{Catalog, CatalogEntry, Category};
pub use clock::Clock;
pub use collate::locale_compare;
pub use error::EngineError;
pub use expense::{ExpenseDraft, ExpenseRecord, NewExpense, RawExpense, parse_date};
pub use filters::{
    CategoryFilter, CategorySort, DateWindow, ExpenseQuery, SortDirection, SortKey,
    filter_by_category, filter_by_date_window, filter_by_search, filter_category_aggregates,
    sort_category_aggregates, sort_expenses,
};
pub use money::MoneyCents;
pub use store::ExpenseStore;
pub use window::Window;

mod aggregation;
mod categories;
mod clock;
mod collate;
mod error;
mod expense;
mod filters;
pub mod format;
mod money;
mod store;
mod window;

type ResultEngine<T> = Result<T, EngineError>;
