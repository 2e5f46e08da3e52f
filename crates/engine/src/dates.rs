//! Calendar-day handling.
//!
//! Dates enter the system as `DD-MMM-YYYY` text (e.g. `05-Aug-2024`) and are
//! stored as epoch seconds at UTC midnight. Because every comparison site
//! uses the same normalization, two entries on the same calendar day always
//! compare equal and cross-day comparisons are full-day granular.

use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::EngineError;

/// The textual format dates use at the boundary.
pub const DATE_FORMAT: &str = "%d-%b-%Y";

/// A calendar day, normalized to epoch seconds at UTC midnight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Day(i64);

impl Day {
    /// Wraps an already-normalized timestamp read back from storage.
    #[must_use]
    pub const fn from_epoch_secs(secs: i64) -> Self {
        Self(secs)
    }

    /// Returns the underlying timestamp.
    #[must_use]
    pub const fn epoch_secs(self) -> i64 {
        self.0
    }
}

impl FromStr for Day {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let date = NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
            .map_err(|_| EngineError::BadDateFormat(trimmed.to_string()))?;
        let midnight = date
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| EngineError::BadDateFormat(trimmed.to_string()))?;
        Ok(Self(midnight.and_utc().timestamp()))
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match DateTime::from_timestamp(self.0, 0) {
            Some(dt) => write!(f, "{}", dt.format(DATE_FORMAT)),
            None => write!(f, "@{}", self.0),
        }
    }
}
