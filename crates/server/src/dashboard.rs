//! Dashboard endpoint

use api_types::dashboard::DashboardResponse;
use axum::{Json, extract::State};
use engine::{RECENT_LIMIT, dashboard_summary, format, recent_expenses};

use crate::{ServerError, server::ServerState, views};

/// Current month summary with trends, the category breakdown, weekly chart
/// data and the latest expenses.
pub async fn get(State(state): State<ServerState>) -> Result<Json<DashboardResponse>, ServerError> {
    let today = state.clock.today();
    let store = &state.store;
    let catalog = store.catalog();

    let summary =
        dashboard_summary(store.records(), catalog, today).map_err(ServerError::internal)?;
    let recent = recent_expenses(store.records(), RECENT_LIMIT);

    Ok(Json(DashboardResponse {
        month_label: format::month_label(summary.month.window.start),
        total_cents: summary.month.total.cents(),
        total: summary.month.total.to_string(),
        total_trend: summary.month.total_trend,
        transaction_count: summary.month.count,
        transaction_trend: summary.month.count_trend,
        most_expensive: summary.most_expensive.as_ref().map(views::category_stats_view),
        average_daily_cents: summary.average_daily_spend.cents(),
        average_daily: summary.average_daily_spend.to_string(),
        breakdown: summary
            .breakdown
            .iter()
            .map(views::category_stats_view)
            .collect(),
        weekly: summary.weekly.iter().map(views::weekly_view).collect(),
        recent: views::expense_views(&recent, catalog, today),
    }))
}
