//! Category list endpoint

use api_types::category::{CategoryListParams, CategoryListResponse};
use axum::{
    Json,
    extract::{Query, State},
};
use engine::{
    CategorySort, category_totals, filter_category_aggregates, sort_category_aggregates,
    total_amount,
};

use crate::{ServerError, server::ServerState, views};

/// Per-category statistics over the whole dataset. The totals at the bottom
/// always cover every expense, whatever the search matched.
pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<CategoryListParams>,
) -> Result<Json<CategoryListResponse>, ServerError> {
    let sort = params
        .sort
        .as_deref()
        .unwrap_or_default()
        .parse::<CategorySort>()?;

    let store = &state.store;
    let stats = category_totals(store.records(), store.catalog()).map_err(ServerError::internal)?;
    let found = filter_category_aggregates(&stats, params.search.as_deref().unwrap_or_default());
    let sorted = sort_category_aggregates(&found, sort);
    let total = total_amount(store.records()).map_err(ServerError::internal)?;

    Ok(Json(CategoryListResponse {
        categories: sorted.iter().map(views::category_stats_view).collect(),
        category_count: store.catalog().len(),
        expense_count: store.len(),
        total_cents: total.cents(),
        total: total.to_string(),
    }))
}
