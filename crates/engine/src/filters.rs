//! Filtering and sorting of expense lists.
//!
//! Filters are independent of each other: applying them in any order gives
//! the same result. Sorting always runs last, on whatever the filters kept.

use std::{cmp::Ordering, fmt, str::FromStr};

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{
    Catalog, Category, EngineError, ExpenseRecord, ResultEngine,
    aggregation::CategoryAggregate,
    collate::{contains_ignore_case, locale_compare},
};

/// Category selector of the expense list. Text form: `all` or a category value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl FromStr for CategoryFilter {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "all" => Ok(CategoryFilter::All),
            value => value.parse().map(CategoryFilter::Only),
        }
    }
}

/// How far back the expense list looks, counted from the start of today.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateWindow {
    #[default]
    #[serde(rename = "all")]
    AllTime,
    #[serde(rename = "7d")]
    Last7Days,
    #[serde(rename = "30d")]
    Last30Days,
    #[serde(rename = "90d")]
    Last90Days,
}

impl DateWindow {
    #[must_use]
    pub const fn days(self) -> Option<i64> {
        match self {
            DateWindow::AllTime => None,
            DateWindow::Last7Days => Some(7),
            DateWindow::Last30Days => Some(30),
            DateWindow::Last90Days => Some(90),
        }
    }

    /// Earliest date kept, or `None` for no lower bound.
    #[must_use]
    pub fn cutoff(self, today: NaiveDate) -> Option<NaiveDate> {
        self.days()
            .and_then(|days| today.checked_sub_signed(Duration::days(days)))
    }
}

impl FromStr for DateWindow {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "all" => Ok(DateWindow::AllTime),
            "7d" => Ok(DateWindow::Last7Days),
            "30d" => Ok(DateWindow::Last30Days),
            "90d" => Ok(DateWindow::Last90Days),
            other => Err(EngineError::InvalidFilter(format!(
                "unknown date window \"{other}\""
            ))),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Date,
    Amount,
    Category,
    Description,
}

impl FromStr for SortKey {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "date" => Ok(SortKey::Date),
            "amount" => Ok(SortKey::Amount),
            "category" => Ok(SortKey::Category),
            "description" => Ok(SortKey::Description),
            other => Err(EngineError::InvalidFilter(format!(
                "unknown sort key \"{other}\""
            ))),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl FromStr for SortDirection {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "asc" => Ok(SortDirection::Asc),
            "" | "desc" => Ok(SortDirection::Desc),
            other => Err(EngineError::InvalidFilter(format!(
                "unknown sort direction \"{other}\""
            ))),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        })
    }
}

/// Keeps records whose description or category label contains `query`,
/// ignoring case. A blank query keeps everything.
pub fn filter_by_search(
    records: &[ExpenseRecord],
    catalog: &Catalog,
    query: &str,
) -> Vec<ExpenseRecord> {
    if query.trim().is_empty() {
        return records.to_vec();
    }
    let needle = query.to_lowercase();
    records
        .iter()
        .filter(|r| {
            contains_ignore_case(r.description(), &needle)
                || contains_ignore_case(catalog.label_or_value(r.category()), &needle)
        })
        .cloned()
        .collect()
}

pub fn filter_by_category(records: &[ExpenseRecord], filter: CategoryFilter) -> Vec<ExpenseRecord> {
    match filter {
        CategoryFilter::All => records.to_vec(),
        CategoryFilter::Only(category) => records
            .iter()
            .filter(|r| r.category() == category)
            .cloned()
            .collect(),
    }
}

/// Keeps records dated on or after the window's cutoff. Future dates are kept.
pub fn filter_by_date_window(
    records: &[ExpenseRecord],
    window: DateWindow,
    today: NaiveDate,
) -> Vec<ExpenseRecord> {
    match window.cutoff(today) {
        None => records.to_vec(),
        Some(cutoff) => records
            .iter()
            .filter(|r| r.date() >= cutoff)
            .cloned()
            .collect(),
    }
}

fn compare(a: &ExpenseRecord, b: &ExpenseRecord, catalog: &Catalog, key: SortKey) -> Ordering {
    match key {
        SortKey::Date => a.date().cmp(&b.date()),
        SortKey::Amount => a.amount().cmp(&b.amount()),
        SortKey::Category => locale_compare(
            catalog.label_or_value(a.category()),
            catalog.label_or_value(b.category()),
        ),
        SortKey::Description => locale_compare(a.description(), b.description()),
    }
}

/// Stable sort: records with equal keys keep their input order in both
/// directions.
pub fn sort_expenses(
    records: &[ExpenseRecord],
    catalog: &Catalog,
    key: SortKey,
    direction: SortDirection,
) -> Vec<ExpenseRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| {
        let ord = compare(a, b, catalog, key);
        match direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
    sorted
}

/// Parameters of the expense list view.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExpenseQuery {
    pub search: String,
    pub category: CategoryFilter,
    pub window: DateWindow,
    pub sort_key: SortKey,
    pub direction: SortDirection,
}

impl ExpenseQuery {
    /// Builds a query from the raw text parameters of a request; missing
    /// values take the list defaults (newest first, everything shown).
    pub fn from_params(
        search: Option<&str>,
        category: Option<&str>,
        window: Option<&str>,
        sort_key: Option<&str>,
        direction: Option<&str>,
    ) -> ResultEngine<Self> {
        Ok(Self {
            search: search.unwrap_or_default().to_string(),
            category: category.unwrap_or_default().parse()?,
            window: window.unwrap_or_default().parse()?,
            sort_key: sort_key.unwrap_or_default().parse()?,
            direction: direction.unwrap_or_default().parse()?,
        })
    }

    /// Search, category and date filters, then the sort.
    pub fn apply(
        &self,
        records: &[ExpenseRecord],
        catalog: &Catalog,
        today: NaiveDate,
    ) -> Vec<ExpenseRecord> {
        let found = filter_by_search(records, catalog, &self.search);
        let found = filter_by_category(&found, self.category);
        let found = filter_by_date_window(&found, self.window, today);
        sort_expenses(&found, catalog, self.sort_key, self.direction)
    }
}

/// Sort order of the category list view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategorySort {
    /// Label, A to Z.
    Name,
    /// Most expenses first.
    Count,
    /// Highest total first.
    #[default]
    Amount,
}

impl FromStr for CategorySort {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "name" => Ok(CategorySort::Name),
            "count" => Ok(CategorySort::Count),
            "" | "amount" => Ok(CategorySort::Amount),
            other => Err(EngineError::InvalidFilter(format!(
                "unknown category sort \"{other}\""
            ))),
        }
    }
}

pub fn filter_category_aggregates(
    aggregates: &[CategoryAggregate],
    query: &str,
) -> Vec<CategoryAggregate> {
    if query.trim().is_empty() {
        return aggregates.to_vec();
    }
    let needle = query.to_lowercase();
    aggregates
        .iter()
        .filter(|a| contains_ignore_case(&a.label, &needle))
        .cloned()
        .collect()
}

pub fn sort_category_aggregates(
    aggregates: &[CategoryAggregate],
    sort: CategorySort,
) -> Vec<CategoryAggregate> {
    let mut sorted = aggregates.to_vec();
    match sort {
        CategorySort::Name => sorted.sort_by(|a, b| locale_compare(&a.label, &b.label)),
        CategorySort::Count => sorted.sort_by(|a, b| b.count.cmp(&a.count)),
        CategorySort::Amount => sorted.sort_by(|a, b| b.total.cmp(&a.total)),
    }
    sorted
}
