//! Summary statistics over expense records.
//!
//! Every function takes a slice and returns fresh values; inputs are never
//! mutated. Functions that need category labels fail with
//! [`EngineError::UnknownCategory`] rather than skipping a record whose
//! category the catalog does not list.
//!
//! [`EngineError::UnknownCategory`]: crate::EngineError::UnknownCategory

use std::collections::{BTreeMap, HashSet};

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use crate::{Catalog, Category, EngineError, ExpenseRecord, MoneyCents, ResultEngine, Window};

/// Default number of rows in the "recent expenses" card.
pub const RECENT_LIMIT: usize = 10;

/// Count and total of the records of one category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CategoryAggregate {
    pub category: Category,
    pub label: String,
    pub count: usize,
    pub total: MoneyCents,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct WindowTotals {
    pub total: MoneyCents,
    pub count: usize,
}

/// Totals of a window compared with the window right before it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TimeWindowAggregate {
    pub window: Window,
    pub total: MoneyCents,
    pub count: usize,
    pub previous: WindowTotals,
    /// `None` when the previous window had no spending.
    pub total_trend: Option<f64>,
    /// `None` when the previous window had no transactions.
    pub count_trend: Option<f64>,
}

/// Spending of one Sunday-starting week, keyed by category label.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct WeeklyBucket {
    pub week_start: NaiveDate,
    pub totals: BTreeMap<String, MoneyCents>,
}

/// Everything the dashboard shows for the month containing "today".
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub month: TimeWindowAggregate,
    pub most_expensive: Option<CategoryAggregate>,
    pub average_daily_spend: MoneyCents,
    /// Categories with at least one record this month, in catalog order.
    pub breakdown: Vec<CategoryAggregate>,
    pub weekly: Vec<WeeklyBucket>,
}

/// Fails with [`EngineError::AmountOverflow`] instead of wrapping.
pub fn total_amount(records: &[ExpenseRecord]) -> ResultEngine<MoneyCents> {
    MoneyCents::checked_sum(records.iter().map(ExpenseRecord::amount))
        .ok_or(EngineError::AmountOverflow)
}

fn add_amount(total: MoneyCents, amount: MoneyCents) -> ResultEngine<MoneyCents> {
    total.checked_add(amount).ok_or(EngineError::AmountOverflow)
}

/// One aggregate per catalog category, in catalog order, zero-activity
/// categories included.
pub fn category_totals(
    records: &[ExpenseRecord],
    catalog: &Catalog,
) -> ResultEngine<Vec<CategoryAggregate>> {
    let mut aggregates: Vec<CategoryAggregate> = catalog
        .iter()
        .map(|entry| CategoryAggregate {
            category: entry.category,
            label: entry.label.clone(),
            count: 0,
            total: MoneyCents::ZERO,
        })
        .collect();

    for record in records {
        let idx = catalog.position(record.category()).ok_or_else(|| {
            EngineError::UnknownCategory(record.category().value().to_string())
        })?;
        let aggregate = &mut aggregates[idx];
        aggregate.count += 1;
        aggregate.total = add_amount(aggregate.total, record.amount())?;
    }

    Ok(aggregates)
}

pub fn window_totals(records: &[ExpenseRecord], window: &Window) -> ResultEngine<WindowTotals> {
    records
        .iter()
        .filter(|r| window.contains(r.date()))
        .try_fold(WindowTotals::default(), |acc, r| -> ResultEngine<_> {
            Ok(WindowTotals {
                total: add_amount(acc.total, r.amount())?,
                count: acc.count + 1,
            })
        })
}

/// Percentage change from `previous` to `current`.
///
/// Returns `None` when `previous` is zero: there is no meaningful trend.
pub fn trend_percent(current: f64, previous: f64) -> Option<f64> {
    if previous == 0.0 {
        return None;
    }
    Some((current - previous) / previous * 100.0)
}

pub fn window_aggregate(
    records: &[ExpenseRecord],
    window: &Window,
) -> ResultEngine<TimeWindowAggregate> {
    let current = window_totals(records, window)?;
    let previous = match window.preceding() {
        Some(prev) => window_totals(records, &prev)?,
        None => WindowTotals::default(),
    };

    Ok(TimeWindowAggregate {
        window: *window,
        total: current.total,
        count: current.count,
        previous,
        total_trend: trend_percent(
            current.total.cents() as f64,
            previous.total.cents() as f64,
        ),
        count_trend: trend_percent(current.count as f64, previous.count as f64),
    })
}

/// The Sunday on or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_sunday()))
}

/// Buckets records by week, oldest week first. A bucket only lists the
/// categories that had spending in that week.
pub fn weekly_breakdown(
    records: &[ExpenseRecord],
    catalog: &Catalog,
) -> ResultEngine<Vec<WeeklyBucket>> {
    let mut weeks: BTreeMap<NaiveDate, BTreeMap<String, MoneyCents>> = BTreeMap::new();
    for record in records {
        let label = catalog.label(record.category())?;
        let total = weeks
            .entry(week_start(record.date()))
            .or_default()
            .entry(label.to_string())
            .or_default();
        *total = add_amount(*total, record.amount())?;
    }

    Ok(weeks
        .into_iter()
        .map(|(week_start, totals)| WeeklyBucket { week_start, totals })
        .collect())
}

/// Most recent records first; equal dates keep their input order.
pub fn recent_expenses(records: &[ExpenseRecord], limit: usize) -> Vec<ExpenseRecord> {
    let mut recent = records.to_vec();
    recent.sort_by(|a, b| b.date().cmp(&a.date()));
    recent.truncate(limit);
    recent
}

pub fn dashboard_summary(
    records: &[ExpenseRecord],
    catalog: &Catalog,
    today: NaiveDate,
) -> ResultEngine<DashboardSummary> {
    let window = Window::month_of(today)?;
    let month = window_aggregate(records, &window)?;

    let in_month: Vec<ExpenseRecord> = records
        .iter()
        .filter(|r| window.contains(r.date()))
        .cloned()
        .collect();

    let breakdown: Vec<CategoryAggregate> = category_totals(&in_month, catalog)?
        .into_iter()
        .filter(|aggregate| aggregate.count > 0)
        .collect();

    // `max_by_key` keeps the last of equal maxima.
    let most_expensive = breakdown.iter().max_by_key(|a| a.total).cloned();

    let active_days = in_month.iter().map(ExpenseRecord::date).collect::<HashSet<_>>();
    let average_daily_spend = month.total.split(active_days.len());

    let weekly = weekly_breakdown(&in_month, catalog)?;

    tracing::debug!(
        "dashboard for {}: {} expenses, {}",
        window.start,
        month.count,
        month.total
    );

    Ok(DashboardSummary {
        month,
        most_expensive,
        average_daily_spend,
        breakdown,
        weekly,
    })
}
