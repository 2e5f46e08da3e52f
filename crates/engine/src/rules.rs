//! Balance and date rules.
//!
//! The decision core of the engine: given a parent amount and the relevant
//! aggregate (current spend, earliest child date), these functions decide
//! whether a prospective mutation keeps the ledger consistent. They are pure;
//! callers fetch the aggregates and persist only after every check passes.
//!
//! Tie-break policy: equality is always legal. Spending exactly the budget,
//! or dating an expense on the amount's own day, is allowed. Comparisons are
//! on exact cents with no rounding.

use crate::{EngineError, ResultEngine, dates::Day, money::Money};

/// Checks that a prospective expense value fits the amount's budget.
///
/// `spent` is the current total of the amount's expenses; for an update it
/// must already exclude the expense under revision so the entry does not
/// count against itself. Denies with the largest legal value.
pub(crate) fn check_expense_fits(
    amount_value: Money,
    spent: Money,
    proposed: Money,
) -> ResultEngine<()> {
    if spent + proposed > amount_value {
        return Err(EngineError::OverBudget {
            max_allowed: amount_value - spent,
        });
    }
    Ok(())
}

/// Checks that shrinking an amount's value keeps it covering its expenses.
pub(crate) fn check_amount_covers(spent: Money, proposed_value: Money) -> ResultEngine<()> {
    if spent > proposed_value {
        return Err(EngineError::BelowCommitted { spent });
    }
    Ok(())
}

/// Checks that an expense is not dated before its amount.
pub(crate) fn check_expense_date(amount_date: Day, proposed: Day) -> ResultEngine<()> {
    if proposed < amount_date {
        return Err(EngineError::DateBeforeAmount {
            expense: proposed,
            amount: amount_date,
        });
    }
    Ok(())
}

/// Checks that moving an amount's date does not pass an existing expense.
///
/// Allowed whenever `proposed <= min(child dates)` or there are no children.
pub(crate) fn check_amount_date(proposed: Day, earliest_expense: Option<Day>) -> ResultEngine<()> {
    if let Some(earliest) = earliest_expense
        && earliest < proposed
    {
        return Err(EngineError::DateAfterExpense { proposed, earliest });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn money(s: &str) -> Money {
        s.parse().unwrap()
    }

    fn day(s: &str) -> Day {
        s.parse().unwrap()
    }

    #[test]
    fn expense_within_budget_is_allowed() {
        assert!(check_expense_fits(money("100.00"), money("40.00"), money("59.99")).is_ok());
    }

    #[test]
    fn spending_exactly_the_budget_is_allowed() {
        assert!(check_expense_fits(money("100.00"), money("40.00"), money("60.00")).is_ok());
    }

    #[test]
    fn one_cent_over_budget_is_denied_with_max_allowed() {
        let err =
            check_expense_fits(money("100.00"), money("40.00"), money("60.01")).unwrap_err();
        assert_eq!(
            err,
            EngineError::OverBudget {
                max_allowed: money("60.00")
            }
        );
    }

    #[test]
    fn finished_amount_denies_any_further_spend() {
        let err = check_expense_fits(money("100.00"), money("100.00"), money("0.01")).unwrap_err();
        assert_eq!(
            err,
            EngineError::OverBudget {
                max_allowed: money("0.00")
            }
        );
    }

    #[test]
    fn amount_may_shrink_to_exactly_the_spent_total() {
        assert!(check_amount_covers(money("75.00"), money("75.00")).is_ok());
        assert_eq!(
            check_amount_covers(money("75.00"), money("74.99")).unwrap_err(),
            EngineError::BelowCommitted {
                spent: money("75.00")
            }
        );
    }

    #[test]
    fn expense_on_amount_day_is_allowed_earlier_is_denied() {
        let amount_date = day("10-Jun-2025");
        assert!(check_expense_date(amount_date, day("10-Jun-2025")).is_ok());
        assert!(check_expense_date(amount_date, day("11-Jun-2025")).is_ok());
        assert_eq!(
            check_expense_date(amount_date, day("09-Jun-2025")).unwrap_err(),
            EngineError::DateBeforeAmount {
                expense: day("09-Jun-2025"),
                amount: amount_date,
            }
        );
    }

    #[test]
    fn amount_date_may_move_back_but_not_past_an_expense() {
        let earliest = Some(day("10-Jun-2025"));
        assert!(check_amount_date(day("05-Jun-2025"), earliest).is_ok());
        assert!(check_amount_date(day("10-Jun-2025"), earliest).is_ok());
        assert_eq!(
            check_amount_date(day("15-Jun-2025"), earliest).unwrap_err(),
            EngineError::DateAfterExpense {
                proposed: day("15-Jun-2025"),
                earliest: day("10-Jun-2025"),
            }
        );
    }

    #[test]
    fn amount_date_is_free_without_children() {
        assert!(check_amount_date(day("15-Jun-2025"), None).is_ok());
    }
}
