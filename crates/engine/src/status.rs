//! Derived amount status.

use serde::{Deserialize, Serialize};

use crate::money::Money;

/// Whether an amount's budget is fully spent.
///
/// Always recomputed from the current aggregate, never stored: a finished
/// amount reverts to `Remaining` as soon as its value grows or one of its
/// expenses is deleted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmountStatus {
    Finished,
    Remaining(Money),
}

pub(crate) fn status_of(value: Money, spent: Money) -> AmountStatus {
    if spent == value {
        AmountStatus::Finished
    } else {
        AmountStatus::Remaining(value - spent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finished_only_on_exact_match() {
        assert_eq!(
            status_of(Money::new(10_000), Money::new(10_000)),
            AmountStatus::Finished
        );
        assert_eq!(
            status_of(Money::new(10_000), Money::new(9_999)),
            AmountStatus::Remaining(Money::new(1))
        );
        assert_eq!(
            status_of(Money::new(10_000), Money::ZERO),
            AmountStatus::Remaining(Money::new(10_000))
        );
    }
}
