//! Expense API endpoints

use api_types::expense::{
    AmountExpensesResponse, ExpenseCreated, ExpenseNew, ExpenseUpdate, ExpenseView,
    ExpensesDeleted,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::{Day, Money};

use crate::{ServerError, server::ServerState};

pub async fn create(
    State(state): State<ServerState>,
    Path(amount_id): Path<String>,
    Json(payload): Json<ExpenseNew>,
) -> Result<(StatusCode, Json<ExpenseCreated>), ServerError> {
    let value: Money = payload.value.parse()?;
    let date: Day = payload.date.parse()?;

    let id = state
        .engine
        .add_expense(&amount_id, &payload.description, value, date)
        .await?;

    Ok((StatusCode::CREATED, Json(ExpenseCreated { id, amount_id })))
}

pub async fn list_for_amount(
    State(state): State<ServerState>,
    Path(amount_id): Path<String>,
) -> Result<Json<AmountExpensesResponse>, ServerError> {
    let detail = state.engine.amount_expenses(&amount_id).await?;

    let expenses = detail
        .expenses
        .into_iter()
        .map(|expense| ExpenseView {
            id: expense.id,
            description: expense.description,
            value: expense.value.to_string(),
            date: expense.date.to_string(),
        })
        .collect();

    Ok(Json(AmountExpensesResponse {
        id: detail.amount.id,
        total_value: detail.amount.value.to_string(),
        total_spent: detail.spent.to_string(),
        remaining: detail.remaining.to_string(),
        expenses,
    }))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ExpenseUpdate>,
) -> Result<StatusCode, ServerError> {
    let value: Money = payload.value.parse()?;
    let date: Day = payload.date.parse()?;

    state
        .engine
        .update_expense(&id, &payload.description, value, date)
        .await?;

    Ok(StatusCode::OK)
}

pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_expense(&id).await?;
    Ok(StatusCode::OK)
}

pub async fn remove_all_for_amount(
    State(state): State<ServerState>,
    Path(amount_id): Path<String>,
) -> Result<Json<ExpensesDeleted>, ServerError> {
    let removed = state.engine.delete_amount_expenses(&amount_id).await?;
    Ok(Json(ExpensesDeleted { removed }))
}
