//! Date-specific exception rules: full closures and modified hours.
//!
//! An exception takes precedence over both the base template and the
//! workday spec for its date. At most one rule applies per date; when
//! duplicates slip through the catalogue, the first one wins.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::template::Window;

/// A resolved exception for one zone-local calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExceptionRule {
    pub date: NaiveDate,
    /// Fully closed that day; any override window is ignored.
    pub closed: bool,
    /// Replacement hours: a single regular session spanning this window.
    pub override_window: Option<Window>,
}

impl ExceptionRule {
    /// Build a rule from raw override fields. A partial override (only
    /// one of open/close supplied) resolves to "no override": the base
    /// template stands. Same for an inverted window.
    pub fn new(date: NaiveDate, closed: bool, open: Option<u16>, close: Option<u16>) -> Self {
        let override_window = match (closed, open, close) {
            (false, Some(start), Some(end)) if start < end => Some(Window { start, end }),
            _ => None,
        };
        Self {
            date,
            closed,
            override_window,
        }
    }

    /// First rule matching the given date, if any.
    pub fn find<'a>(rules: &'a [ExceptionRule], date: NaiveDate) -> Option<&'a ExceptionRule> {
        rules.iter().find(|r| r.date == date)
    }
}
