//! Ledger consistency engine for the amount tracker.
//!
//! Clients create amounts (budget allocations) and record expenses against
//! them. The engine owns the invariants that tie the two together:
//!
//! - the expenses of an amount never total more than its value, and
//! - no expense is dated before its amount.
//!
//! Every mutation runs read → decide → write inside a single database
//! transaction, so the aggregate a rule was checked against cannot change
//! between the check and the write.

use sea_orm::{DatabaseConnection, TransactionTrait};

pub use dates::Day;
pub use entries::{Amount, EntryKind, Expense, LedgerEntry};
pub use error::EngineError;
pub use money::Money;
pub use status::AmountStatus;

mod dates;
mod entries;
mod error;
mod money;
mod repo;
mod rules;
mod status;
mod text;

type ResultEngine<T> = Result<T, EngineError>;

/// An amount together with how many expenses it carries.
#[derive(Clone, Debug)]
pub struct AmountSummary {
    pub amount: Amount,
    pub expense_count: i64,
}

/// An amount, its expenses, and the derived totals.
#[derive(Clone, Debug)]
pub struct AmountExpenses {
    pub amount: Amount,
    pub expenses: Vec<Expense>,
    pub spent: Money,
    pub remaining: Money,
}

/// An amount with its derived status.
#[derive(Clone, Debug)]
pub struct AmountWithStatus {
    pub amount: Amount,
    pub status: AmountStatus,
}

#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// Creates a new amount and returns its generated id.
    pub async fn add_amount(
        &self,
        description: &str,
        value: Money,
        date: Day,
    ) -> ResultEngine<String> {
        let description = text::sanitize_description(description)?;
        ensure_positive(value)?;

        let amount = Amount::new(description, value, date);
        let id = amount.id.clone();
        repo::insert_amount(&self.database, &amount).await?;
        Ok(id)
    }

    /// Records an expense against an existing amount and returns its id.
    ///
    /// Denied when the amount does not exist, the date falls before the
    /// amount's date, or the value would push the amount over budget.
    pub async fn add_expense(
        &self,
        amount_id: &str,
        description: &str,
        value: Money,
        date: Day,
    ) -> ResultEngine<String> {
        let description = text::sanitize_description(description)?;
        ensure_positive(value)?;

        let db_tx = self.database.begin().await?;

        let parent = repo::amount(&db_tx, amount_id).await?;
        rules::check_expense_date(parent.date, date)?;

        let spent = repo::sum_expenses_of(&db_tx, amount_id, None).await?;
        rules::check_expense_fits(parent.value, spent, value)?;

        let expense = Expense::new(parent.id, description, value, date);
        let id = expense.id.clone();
        repo::insert_expense(&db_tx, &expense).await?;

        db_tx.commit().await?;
        Ok(id)
    }

    /// Overwrites an amount's description, value, and date.
    ///
    /// The new value must still cover the expenses already recorded, and the
    /// new date may not move past any existing expense.
    pub async fn update_amount(
        &self,
        id: &str,
        description: &str,
        value: Money,
        date: Day,
    ) -> ResultEngine<()> {
        let description = text::sanitize_description(description)?;
        ensure_positive(value)?;

        let db_tx = self.database.begin().await?;

        repo::amount(&db_tx, id).await?;

        let spent = repo::sum_expenses_of(&db_tx, id, None).await?;
        rules::check_amount_covers(spent, value)?;

        let earliest = repo::earliest_expense_date(&db_tx, id).await?;
        rules::check_amount_date(date, earliest)?;

        repo::update_entry(&db_tx, id, description, value, date).await?;

        db_tx.commit().await?;
        Ok(())
    }

    /// Overwrites an expense's description, value, and date.
    ///
    /// The balance check excludes the expense's own current value, so
    /// revising an expense to what it already is always succeeds.
    pub async fn update_expense(
        &self,
        id: &str,
        description: &str,
        value: Money,
        date: Day,
    ) -> ResultEngine<()> {
        let description = text::sanitize_description(description)?;
        ensure_positive(value)?;

        let db_tx = self.database.begin().await?;

        let expense = repo::expense(&db_tx, id).await?;
        let parent = repo::amount(&db_tx, &expense.amount_id).await?;
        rules::check_expense_date(parent.date, date)?;

        let spent_by_others = repo::sum_expenses_of(&db_tx, &parent.id, Some(id)).await?;
        rules::check_expense_fits(parent.value, spent_by_others, value)?;

        repo::update_entry(&db_tx, id, description, value, date).await?;

        db_tx.commit().await?;
        Ok(())
    }

    /// Lists every amount with its expense count.
    pub async fn amounts(&self) -> ResultEngine<Vec<AmountSummary>> {
        let amounts = repo::amounts(&self.database).await?;
        let counts = repo::expense_counts(&self.database).await?;

        Ok(amounts
            .into_iter()
            .map(|amount| {
                let expense_count = counts.get(&amount.id).copied().unwrap_or(0);
                AmountSummary {
                    amount,
                    expense_count,
                }
            })
            .collect())
    }

    /// Returns one amount with its expenses and derived totals.
    ///
    /// The amount row is fetched first, so a missing id is `NotFound` even
    /// though the child query would merely come back empty.
    pub async fn amount_expenses(&self, amount_id: &str) -> ResultEngine<AmountExpenses> {
        let amount = repo::amount(&self.database, amount_id).await?;
        let expenses = repo::expenses_of(&self.database, amount_id).await?;

        let spent = expenses
            .iter()
            .fold(Money::ZERO, |acc, expense| acc + expense.value);
        let remaining = amount.value - spent;

        Ok(AmountExpenses {
            amount,
            expenses,
            spent,
            remaining,
        })
    }

    /// Lists every amount with its derived status.
    pub async fn amount_statuses(&self) -> ResultEngine<Vec<AmountWithStatus>> {
        let amounts = repo::amounts(&self.database).await?;

        let mut out = Vec::with_capacity(amounts.len());
        for amount in amounts {
            let spent = repo::sum_expenses_of(&self.database, &amount.id, None).await?;
            out.push(AmountWithStatus {
                status: status::status_of(amount.value, spent),
                amount,
            });
        }
        Ok(out)
    }

    /// Deletes an amount and cascades to all its expenses.
    pub async fn delete_amount(&self, id: &str) -> ResultEngine<()> {
        let db_tx = self.database.begin().await?;

        repo::amount(&db_tx, id).await?;
        repo::delete_expenses_of(&db_tx, id).await?;
        repo::delete_entry(&db_tx, id).await?;

        db_tx.commit().await?;
        Ok(())
    }

    /// Deletes one expense. Its amount is untouched.
    pub async fn delete_expense(&self, id: &str) -> ResultEngine<()> {
        let db_tx = self.database.begin().await?;

        let expense = repo::expense(&db_tx, id).await?;
        repo::delete_entry(&db_tx, &expense.id).await?;

        db_tx.commit().await?;
        Ok(())
    }

    /// Bulk-deletes the expenses of one amount; the amount itself survives
    /// with its original value. Returns how many expenses were removed.
    pub async fn delete_amount_expenses(&self, amount_id: &str) -> ResultEngine<u64> {
        let db_tx = self.database.begin().await?;

        repo::amount(&db_tx, amount_id).await?;
        let removed = repo::delete_expenses_of(&db_tx, amount_id).await?;

        db_tx.commit().await?;
        Ok(removed)
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Construct `Engine`
    pub fn build(self) -> Engine {
        Engine {
            database: self.database,
        }
    }
}

fn ensure_positive(value: Money) -> ResultEngine<()> {
    if !value.is_positive() {
        return Err(EngineError::InvalidValue(
            "value must be greater than 0".to_string(),
        ));
    }
    Ok(())
}
