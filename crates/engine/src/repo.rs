//! Typed access to the `entries` table.
//!
//! Every function takes any [`ConnectionTrait`] implementor, so the same
//! reads run on the plain connection for queries and inside a
//! [`DatabaseTransaction`] when a mutation needs its aggregate re-checked
//! atomically with the write.
//!
//! [`DatabaseTransaction`]: sea_orm::DatabaseTransaction

use std::collections::HashMap;

use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter,
    Statement, Value,
};

use crate::{
    EngineError, ResultEngine,
    dates::Day,
    entries::{self, Amount, EntryKind, Expense, LedgerEntry},
    money::Money,
};

pub(crate) async fn insert_amount<C: ConnectionTrait>(
    conn: &C,
    amount: &Amount,
) -> ResultEngine<()> {
    entries::ActiveModel::from(amount).insert(conn).await?;
    Ok(())
}

pub(crate) async fn insert_expense<C: ConnectionTrait>(
    conn: &C,
    expense: &Expense,
) -> ResultEngine<()> {
    entries::ActiveModel::from(expense).insert(conn).await?;
    Ok(())
}

/// Fetches one amount by id.
///
/// Rows are filtered by kind in the query and still decoded through
/// [`LedgerEntry`], so a corrupt row surfaces as `InvalidKind` instead of
/// leaking half-formed data.
pub(crate) async fn amount<C: ConnectionTrait>(conn: &C, id: &str) -> ResultEngine<Amount> {
    let model = entries::Entity::find()
        .filter(entries::Column::Id.eq(id))
        .filter(entries::Column::Kind.eq(EntryKind::Amount.as_str()))
        .one(conn)
        .await?
        .ok_or_else(|| EngineError::NotFound(format!("amount with the ID {id}")))?;

    match LedgerEntry::try_from(model)? {
        LedgerEntry::Amount(amount) => Ok(amount),
        LedgerEntry::Expense(_) => Err(EngineError::InvalidKind(format!(
            "entry {id} is not an amount"
        ))),
    }
}

pub(crate) async fn expense<C: ConnectionTrait>(conn: &C, id: &str) -> ResultEngine<Expense> {
    let model = entries::Entity::find()
        .filter(entries::Column::Id.eq(id))
        .filter(entries::Column::Kind.eq(EntryKind::Expense.as_str()))
        .one(conn)
        .await?
        .ok_or_else(|| EngineError::NotFound(format!("expense with the ID {id}")))?;

    match LedgerEntry::try_from(model)? {
        LedgerEntry::Expense(expense) => Ok(expense),
        LedgerEntry::Amount(_) => Err(EngineError::InvalidKind(format!(
            "entry {id} is not an expense"
        ))),
    }
}

pub(crate) async fn amounts<C: ConnectionTrait>(conn: &C) -> ResultEngine<Vec<Amount>> {
    let models = entries::Entity::find()
        .filter(entries::Column::Kind.eq(EntryKind::Amount.as_str()))
        .all(conn)
        .await?;

    let mut out = Vec::with_capacity(models.len());
    for model in models {
        match LedgerEntry::try_from(model)? {
            LedgerEntry::Amount(amount) => out.push(amount),
            LedgerEntry::Expense(expense) => {
                return Err(EngineError::InvalidKind(format!(
                    "entry {} is not an amount",
                    expense.id
                )));
            }
        }
    }
    Ok(out)
}

pub(crate) async fn expenses_of<C: ConnectionTrait>(
    conn: &C,
    parent_id: &str,
) -> ResultEngine<Vec<Expense>> {
    let models = entries::Entity::find()
        .filter(entries::Column::ParentId.eq(parent_id))
        .all(conn)
        .await?;

    let mut out = Vec::with_capacity(models.len());
    for model in models {
        match LedgerEntry::try_from(model)? {
            LedgerEntry::Expense(expense) => out.push(expense),
            LedgerEntry::Amount(amount) => {
                return Err(EngineError::InvalidKind(format!(
                    "entry {} is not an expense",
                    amount.id
                )));
            }
        }
    }
    Ok(out)
}

/// Sums the expenses recorded against one amount; 0 with no children.
///
/// `excluding` leaves one expense out of the total so a value revision does
/// not count the entry against itself.
pub(crate) async fn sum_expenses_of<C: ConnectionTrait>(
    conn: &C,
    parent_id: &str,
    excluding: Option<&str>,
) -> ResultEngine<Money> {
    let backend = conn.get_database_backend();
    let (exclude_cond, values) = match excluding {
        None => ("", vec![Value::from(parent_id)]),
        Some(id) => (" AND id <> ?", vec![Value::from(parent_id), Value::from(id)]),
    };

    let stmt = Statement::from_sql_and_values(
        backend,
        format!(
            "SELECT COALESCE(SUM(value_minor), 0) AS total \
             FROM entries \
             WHERE parent_id = ?{exclude_cond}"
        ),
        values,
    );
    let row = conn.query_one(stmt).await?;
    let total: i64 = row.and_then(|r| r.try_get("", "total").ok()).unwrap_or(0);
    Ok(Money::new(total))
}

/// Number of expenses per amount, for the list view.
pub(crate) async fn expense_counts<C: ConnectionTrait>(
    conn: &C,
) -> ResultEngine<HashMap<String, i64>> {
    let backend = conn.get_database_backend();
    let stmt = Statement::from_string(
        backend,
        "SELECT parent_id, COUNT(*) AS children \
         FROM entries \
         WHERE parent_id IS NOT NULL \
         GROUP BY parent_id",
    );

    let rows = conn.query_all(stmt).await?;
    let mut counts = HashMap::with_capacity(rows.len());
    for row in rows {
        let parent_id: String = row.try_get("", "parent_id")?;
        let children: i64 = row.try_get("", "children")?;
        counts.insert(parent_id, children);
    }
    Ok(counts)
}

/// Earliest expense date under one amount, or `None` with no children.
pub(crate) async fn earliest_expense_date<C: ConnectionTrait>(
    conn: &C,
    parent_id: &str,
) -> ResultEngine<Option<Day>> {
    let backend = conn.get_database_backend();
    let stmt = Statement::from_sql_and_values(
        backend,
        "SELECT MIN(date_secs) AS earliest FROM entries WHERE parent_id = ?",
        vec![Value::from(parent_id)],
    );

    let row = conn.query_one(stmt).await?;
    let earliest: Option<i64> = row
        .and_then(|r| r.try_get::<Option<i64>>("", "earliest").ok())
        .flatten();
    Ok(earliest.map(Day::from_epoch_secs))
}

/// Overwrites the three mutable fields of one entry. Kind and parent are
/// immutable and left untouched.
pub(crate) async fn update_entry<C: ConnectionTrait>(
    conn: &C,
    id: &str,
    description: String,
    value: Money,
    date: Day,
) -> ResultEngine<()> {
    let model = entries::ActiveModel {
        id: ActiveValue::Set(id.to_string()),
        description: ActiveValue::Set(description),
        value_minor: ActiveValue::Set(value.cents()),
        date_secs: ActiveValue::Set(date.epoch_secs()),
        ..Default::default()
    };
    model.update(conn).await?;
    Ok(())
}

pub(crate) async fn delete_entry<C: ConnectionTrait>(conn: &C, id: &str) -> ResultEngine<()> {
    entries::Entity::delete_by_id(id.to_string()).exec(conn).await?;
    Ok(())
}

/// Bulk-deletes the children of one amount without touching the amount.
pub(crate) async fn delete_expenses_of<C: ConnectionTrait>(
    conn: &C,
    parent_id: &str,
) -> ResultEngine<u64> {
    let res = entries::Entity::delete_many()
        .filter(entries::Column::ParentId.eq(parent_id))
        .exec(conn)
        .await?;
    Ok(res.rows_affected)
}
