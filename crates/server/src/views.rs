//! Conversions from engine values to response bodies.

use api_types::{
    category::{CategoryStatsView, CategoryView},
    dashboard::WeeklyView,
    expense::ExpenseView,
};
use chrono::NaiveDate;
use engine::{Catalog, CatalogEntry, CategoryAggregate, ExpenseRecord, WeeklyBucket, format};

pub(crate) fn expense_view(record: &ExpenseRecord, catalog: &Catalog, today: NaiveDate) -> ExpenseView {
    ExpenseView {
        id: record.id().to_string(),
        amount_cents: record.amount().cents(),
        amount: record.amount().to_string(),
        category: record.category().value().to_string(),
        category_label: catalog.label_or_value(record.category()).to_string(),
        date: record.date(),
        date_label: format::relative_date(record.date(), today),
        description: record.description().to_string(),
    }
}

pub(crate) fn expense_views(
    records: &[ExpenseRecord],
    catalog: &Catalog,
    today: NaiveDate,
) -> Vec<ExpenseView> {
    records
        .iter()
        .map(|r| expense_view(r, catalog, today))
        .collect()
}

pub(crate) fn category_view(entry: &CatalogEntry) -> CategoryView {
    CategoryView {
        value: entry.category.value().to_string(),
        label: entry.label.clone(),
        icon: entry.category.icon().to_string(),
        color: entry.category.color().to_string(),
    }
}

pub(crate) fn category_stats_view(aggregate: &CategoryAggregate) -> CategoryStatsView {
    CategoryStatsView {
        value: aggregate.category.value().to_string(),
        label: aggregate.label.clone(),
        icon: aggregate.category.icon().to_string(),
        color: aggregate.category.color().to_string(),
        expense_count: aggregate.count,
        total_cents: aggregate.total.cents(),
        total: aggregate.total.to_string(),
    }
}

pub(crate) fn weekly_view(bucket: &WeeklyBucket) -> WeeklyView {
    WeeklyView {
        week_start: bucket.week_start,
        week_label: format::short_date(bucket.week_start),
        amounts_cents: bucket
            .totals
            .iter()
            .map(|(label, total)| (label.clone(), total.cents()))
            .collect(),
    }
}
