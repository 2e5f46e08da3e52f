//! Ledger entry primitives.
//!
//! Amounts and expenses share one storage table, discriminated by a `kind`
//! tag and linked by `parent_id`. The domain layer hides that shape behind
//! the closed [`LedgerEntry`] sum type: an `Amount` never has a parent, an
//! `Expense` always has exactly one, and the kind of a row never changes
//! after creation.

use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, dates::Day, money::Money};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Amount,
    Expense,
}

impl EntryKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Amount => "amount",
            Self::Expense => "expense",
        }
    }
}

impl TryFrom<&str> for EntryKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "amount" => Ok(Self::Amount),
            "expense" => Ok(Self::Expense),
            other => Err(EngineError::InvalidKind(other.to_string())),
        }
    }
}

/// A budget allocation. Root entity; expenses are recorded against it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Amount {
    pub id: String,
    pub description: String,
    pub value: Money,
    pub date: Day,
}

impl Amount {
    pub fn new(description: String, value: Money, date: Day) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            description,
            value,
            date,
        }
    }
}

/// A spend entry attached to exactly one [`Amount`].
///
/// `amount_id` is set at creation and never reassigned; an expense cannot be
/// moved between amounts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expense {
    pub id: String,
    pub amount_id: String,
    pub description: String,
    pub value: Money,
    pub date: Day,
}

impl Expense {
    pub fn new(amount_id: String, description: String, value: Money, date: Day) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            amount_id,
            description,
            value,
            date,
        }
    }
}

/// One row of the shared table, decoded into its domain shape.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LedgerEntry {
    Amount(Amount),
    Expense(Expense),
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "entries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub description: String,
    pub value_minor: i64,
    pub kind: String,
    pub date_secs: i64,
    pub parent_id: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::ParentId",
        to = "Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Parent,
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Amount> for ActiveModel {
    fn from(amount: &Amount) -> Self {
        Self {
            id: ActiveValue::Set(amount.id.clone()),
            description: ActiveValue::Set(amount.description.clone()),
            value_minor: ActiveValue::Set(amount.value.cents()),
            kind: ActiveValue::Set(EntryKind::Amount.as_str().to_string()),
            date_secs: ActiveValue::Set(amount.date.epoch_secs()),
            parent_id: ActiveValue::Set(None),
        }
    }
}

impl From<&Expense> for ActiveModel {
    fn from(expense: &Expense) -> Self {
        Self {
            id: ActiveValue::Set(expense.id.clone()),
            description: ActiveValue::Set(expense.description.clone()),
            value_minor: ActiveValue::Set(expense.value.cents()),
            kind: ActiveValue::Set(EntryKind::Expense.as_str().to_string()),
            date_secs: ActiveValue::Set(expense.date.epoch_secs()),
            parent_id: ActiveValue::Set(Some(expense.amount_id.clone())),
        }
    }
}

impl TryFrom<Model> for LedgerEntry {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let kind = EntryKind::try_from(model.kind.as_str())?;
        let value = Money::new(model.value_minor);
        let date = Day::from_epoch_secs(model.date_secs);

        match (kind, model.parent_id) {
            (EntryKind::Amount, None) => Ok(Self::Amount(Amount {
                id: model.id,
                description: model.description,
                value,
                date,
            })),
            (EntryKind::Expense, Some(amount_id)) => Ok(Self::Expense(Expense {
                id: model.id,
                amount_id,
                description: model.description,
                value,
                date,
            })),
            (EntryKind::Amount, Some(_)) => Err(EngineError::InvalidKind(format!(
                "amount {} has a parent",
                model.id
            ))),
            (EntryKind::Expense, None) => Err(EngineError::InvalidKind(format!(
                "expense {} has no parent",
                model.id
            ))),
        }
    }
}
