use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

use serde::Serialize;
pub use server::{run, run_with_listener, spawn_with_listener};

mod amounts;
mod expenses;
mod server;

pub mod types {
    pub mod amount {
        pub use api_types::amount::{
            AmountCreated, AmountListResponse, AmountNew, AmountStatusEntry, AmountStatusView,
            AmountUpdate, AmountView, StatusListResponse,
        };
    }

    pub mod expense {
        pub use api_types::expense::{
            AmountExpensesResponse, ExpenseCreated, ExpenseNew, ExpenseUpdate, ExpenseView,
            ExpensesDeleted,
        };
    }
}

/// Engine failure carried out of a handler.
pub struct ServerError(EngineError);

#[derive(Serialize)]
struct Error {
    error: String,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::EmptyDescription
        | EngineError::BadDateFormat(_)
        | EngineError::InvalidValue(_) => StatusCode::BAD_REQUEST,
        EngineError::NotFound(_) => StatusCode::NOT_FOUND,
        EngineError::OverBudget { .. }
        | EngineError::BelowCommitted { .. }
        | EngineError::DateBeforeAmount { .. }
        | EngineError::DateAfterExpense { .. } => StatusCode::FORBIDDEN,
        EngineError::InvalidKind(_) | EngineError::Database(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        EngineError::InvalidKind(detail) => {
            tracing::error!("corrupt ledger row: {detail}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let status = status_for_engine_error(&self.0);
        let error = message_for_engine_error(self.0);

        (status, Json(Error { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::Money;

    #[test]
    fn validation_errors_map_to_400() {
        let res = ServerError::from(EngineError::EmptyDescription).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let res = ServerError::from(EngineError::BadDateFormat("05-08-2024".to_string()))
            .into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_maps_to_404() {
        let res = ServerError::from(EngineError::NotFound("amount with the ID x".to_string()))
            .into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn rule_denials_map_to_403() {
        let res = ServerError::from(EngineError::OverBudget {
            max_allowed: Money::new(0),
        })
        .into_response();
        assert_eq!(res.status(), StatusCode::FORBIDDEN);

        let res = ServerError::from(EngineError::BelowCommitted {
            spent: Money::new(100),
        })
        .into_response();
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn corrupt_rows_map_to_500() {
        let res = ServerError::from(EngineError::InvalidKind("bad".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
