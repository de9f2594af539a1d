//! Expense list, CSV export and the "new expense" form.

use api_types::expense::{ExpenseForm, ExpenseListParams, ExpenseListResponse, ExpenseNew};
use axum::{
    Form, Json,
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Redirect, Response},
};
use csv::Writer;
use engine::{ExpenseDraft, ExpenseQuery, ExpenseRecord, MoneyCents, total_amount};
use serde::Serialize;

use crate::{ServerError, server::ServerState, views};

const LIST_PATH: &str = "/expenses/list";

fn query_from(params: &ExpenseListParams) -> Result<ExpenseQuery, ServerError> {
    let query = ExpenseQuery::from_params(
        params.search.as_deref(),
        params.category.as_deref(),
        params.window.as_deref(),
        params.sort.as_deref(),
        params.dir.as_deref(),
    )?;
    tracing::debug!(?query, "expense query");
    Ok(query)
}

fn listed(state: &ServerState, params: &ExpenseListParams) -> Result<Vec<ExpenseRecord>, ServerError> {
    let query = query_from(params)?;
    Ok(query.apply(
        state.store.records(),
        state.store.catalog(),
        state.clock.today(),
    ))
}

pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<ExpenseListParams>,
) -> Result<Json<ExpenseListResponse>, ServerError> {
    let records = listed(&state, &params)?;
    let total = total_amount(&records).map_err(ServerError::internal)?;

    Ok(Json(ExpenseListResponse {
        expenses: views::expense_views(&records, state.store.catalog(), state.clock.today()),
        count: records.len(),
        total_cents: total.cents(),
        total: total.to_string(),
    }))
}

#[derive(Serialize)]
struct ExportRow<'a> {
    id: &'a str,
    date: String,
    category: &'a str,
    description: &'a str,
    amount: String,
}

/// "1234.50"
fn plain_amount(amount: MoneyCents) -> String {
    let cents = amount.cents();
    let sign = if cents < 0 { "-" } else { "" };
    format!("{sign}{}.{:02}", cents.abs() / 100, cents.abs() % 100)
}

/// The list as filtered and sorted by `params`, as a CSV attachment.
pub async fn export(
    State(state): State<ServerState>,
    Query(params): Query<ExpenseListParams>,
) -> Result<Response, ServerError> {
    let records = listed(&state, &params)?;
    let catalog = state.store.catalog();

    let mut writer = Writer::from_writer(vec![]);
    for record in &records {
        writer
            .serialize(ExportRow {
                id: record.id(),
                date: record.date().to_string(),
                category: catalog.label_or_value(record.category()),
                description: record.description(),
                amount: plain_amount(record.amount()),
            })
            .map_err(|err| ServerError::internal(format!("failed to serialize export row: {err}")))?;
    }
    let data = writer
        .into_inner()
        .map_err(|err| ServerError::internal(format!("failed to finalize export: {err}")))?;

    tracing::info!("exported {} expenses", records.len());
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"expenses.csv\"",
            ),
        ],
        data,
    )
        .into_response())
}

pub async fn form(State(state): State<ServerState>) -> Json<ExpenseForm> {
    Json(ExpenseForm {
        categories: state
            .store
            .catalog()
            .iter()
            .map(views::category_view)
            .collect(),
        today: state.clock.today(),
    })
}

/// Validates a new expense. Nothing is stored: on success the client is sent
/// back to the list.
pub async fn create(
    State(state): State<ServerState>,
    Form(payload): Form<ExpenseNew>,
) -> Result<Redirect, ServerError> {
    let draft = ExpenseDraft {
        amount: payload.amount,
        description: payload.description,
        category: payload.category,
        date: payload.date,
    };
    let expense = draft.validate(state.store.catalog(), state.clock.today())?;
    tracing::info!(
        amount = %expense.amount,
        category = %expense.category,
        date = %expense.date,
        "expense accepted"
    );
    Ok(Redirect::to(LIST_PATH))
}
