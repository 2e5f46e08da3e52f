//! Amount API endpoints

use api_types::amount::{
    AmountCreated, AmountListResponse, AmountNew, AmountStatusEntry, AmountStatusView,
    AmountUpdate, AmountView, StatusListResponse,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::{AmountStatus, Day, Money};

use crate::{ServerError, server::ServerState};

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<AmountNew>,
) -> Result<(StatusCode, Json<AmountCreated>), ServerError> {
    let value: Money = payload.value.parse()?;
    let date: Day = payload.date.parse()?;

    let id = state
        .engine
        .add_amount(&payload.description, value, date)
        .await?;

    Ok((StatusCode::CREATED, Json(AmountCreated { id })))
}

pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<AmountListResponse>, ServerError> {
    let amounts = state
        .engine
        .amounts()
        .await?
        .into_iter()
        .map(|summary| AmountView {
            id: summary.amount.id,
            description: summary.amount.description,
            value: summary.amount.value.to_string(),
            date: summary.amount.date.to_string(),
            expense_count: summary.expense_count,
        })
        .collect();

    Ok(Json(AmountListResponse { amounts }))
}

pub async fn statuses(
    State(state): State<ServerState>,
) -> Result<Json<StatusListResponse>, ServerError> {
    let amounts = state
        .engine
        .amount_statuses()
        .await?
        .into_iter()
        .map(|entry| AmountStatusEntry {
            id: entry.amount.id,
            description: entry.amount.description,
            value: entry.amount.value.to_string(),
            status: match entry.status {
                AmountStatus::Finished => AmountStatusView::Finished,
                AmountStatus::Remaining(remaining) => AmountStatusView::Remaining {
                    remaining: remaining.to_string(),
                },
            },
        })
        .collect();

    Ok(Json(StatusListResponse { amounts }))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<AmountUpdate>,
) -> Result<StatusCode, ServerError> {
    let value: Money = payload.value.parse()?;
    let date: Day = payload.date.parse()?;

    state
        .engine
        .update_amount(&id, &payload.description, value, date)
        .await?;

    Ok(StatusCode::OK)
}

pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_amount(&id).await?;
    Ok(StatusCode::OK)
}
