//! The module contains the error the engine can throw.
//!
//! Every rule violation maps to its own variant so callers can react to the
//! specific denial, and the message carries the corrective value where one
//! exists ([`OverBudget`] reports the largest legal expense, [`BelowCommitted`]
//! the total already spent).
//!
//! [`OverBudget`]: EngineError::OverBudget
//! [`BelowCommitted`]: EngineError::BelowCommitted
use sea_orm::DbErr;
use thiserror::Error;

use crate::{dates::Day, money::Money};

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("description cannot be empty")]
    EmptyDescription,
    #[error("{0} is not a valid date or is not in DD-MMM-YYYY format, e.g. 05-Aug-2024")]
    BadDateFormat(String),
    #[error("invalid value: {0}")]
    InvalidValue(String),
    #[error("no {0} exists")]
    NotFound(String),
    #[error("can only add expense of {max_allowed}")]
    OverBudget { max_allowed: Money },
    #[error("expenses of {spent} already recorded; value cannot drop below that")]
    BelowCommitted { spent: Money },
    #[error("expense date of {expense} cannot be earlier than amount date of {amount}")]
    DateBeforeAmount { expense: Day, amount: Day },
    #[error("amount date of {proposed} cannot be later than expense date of {earliest}")]
    DateAfterExpense { proposed: Day, earliest: Day },
    #[error("invalid entry kind: {0}")]
    InvalidKind(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::EmptyDescription, Self::EmptyDescription) => true,
            (Self::BadDateFormat(a), Self::BadDateFormat(b)) => a == b,
            (Self::InvalidValue(a), Self::InvalidValue(b)) => a == b,
            (Self::NotFound(a), Self::NotFound(b)) => a == b,
            (
                Self::OverBudget { max_allowed: a },
                Self::OverBudget { max_allowed: b },
            ) => a == b,
            (Self::BelowCommitted { spent: a }, Self::BelowCommitted { spent: b }) => a == b,
            (
                Self::DateBeforeAmount {
                    expense: ae,
                    amount: aa,
                },
                Self::DateBeforeAmount {
                    expense: be,
                    amount: ba,
                },
            ) => ae == be && aa == ba,
            (
                Self::DateAfterExpense {
                    proposed: ap,
                    earliest: ae,
                },
                Self::DateAfterExpense {
                    proposed: bp,
                    earliest: be,
                },
            ) => ap == bp && ae == be,
            (Self::InvalidKind(a), Self::InvalidKind(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
