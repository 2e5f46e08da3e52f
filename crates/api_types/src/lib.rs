//! Request and response types shared by the server and its clients.
//!
//! Monetary values cross the boundary as decimal strings (`"1000.00"`) and
//! dates in `DD-MMM-YYYY` form (`"05-Aug-2024"`); the server parses both
//! into the engine's exact types.

use serde::{Deserialize, Serialize};

pub mod amount {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AmountNew {
        pub description: String,
        /// Decimal string, e.g. `"1000.00"`. Must be > 0.
        pub value: String,
        /// `DD-MMM-YYYY`, e.g. `"01-Jan-2025"`.
        pub date: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AmountUpdate {
        pub description: String,
        pub value: String,
        pub date: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AmountCreated {
        pub id: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AmountView {
        pub id: String,
        pub description: String,
        pub value: String,
        pub date: String,
        pub expense_count: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AmountListResponse {
        pub amounts: Vec<AmountView>,
    }

    /// Derived spending state of one amount.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(tag = "status", rename_all = "snake_case")]
    pub enum AmountStatusView {
        Finished,
        Remaining { remaining: String },
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AmountStatusEntry {
        pub id: String,
        pub description: String,
        pub value: String,
        #[serde(flatten)]
        pub status: AmountStatusView,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct StatusListResponse {
        pub amounts: Vec<AmountStatusEntry>,
    }
}

pub mod expense {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseNew {
        pub description: String,
        pub value: String,
        pub date: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseUpdate {
        pub description: String,
        pub value: String,
        pub date: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseCreated {
        pub id: String,
        pub amount_id: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseView {
        pub id: String,
        pub description: String,
        pub value: String,
        pub date: String,
    }

    /// One amount with its expenses and derived totals.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct AmountExpensesResponse {
        pub id: String,
        pub total_value: String,
        pub total_spent: String,
        pub remaining: String,
        pub expenses: Vec<ExpenseView>,
    }

    /// Result of bulk-deleting an amount's expenses.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpensesDeleted {
        pub removed: u64,
    }
}
