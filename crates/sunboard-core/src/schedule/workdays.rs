//! Workday specs: the set of weekdays on which sessions apply at all.
//!
//! Grammar is either a contiguous range of weekday abbreviations
//! (`MON-FRI`, wrapping allowed as in `SUN-THU`) or an explicit comma
//! list (`MON,WED,FRI`). The weekday gate is independent of session
//! times: a day outside the set is closed no matter what the template
//! says.

use chrono::Weekday;

const ABBREVIATIONS: [&str; 7] = ["MON", "TUE", "WED", "THU", "FRI", "SAT", "SUN"];

/// Set of active weekdays, indexed by days-from-Monday.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkdaySpec {
    days: [bool; 7],
}

impl Default for WorkdaySpec {
    /// Monday through Friday.
    fn default() -> Self {
        Self {
            days: [true, true, true, true, true, false, false],
        }
    }
}

impl WorkdaySpec {
    /// Parse a workday spec string. `None` means the string matched
    /// neither grammar; callers decide how to degrade (the catalogue
    /// falls back to the Mon-Fri default with a diagnostic).
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if let Some((from, to)) = input.split_once('-') {
            let from = day_index(from)?;
            let to = day_index(to)?;
            let mut days = [false; 7];
            // Wrapping range: SUN-THU covers SUN,MON,TUE,WED,THU.
            let mut d = from;
            loop {
                days[d] = true;
                if d == to {
                    break;
                }
                d = (d + 1) % 7;
            }
            return Some(Self { days });
        }
        let mut days = [false; 7];
        for part in input.split(',') {
            days[day_index(part)?] = true;
        }
        if days.iter().any(|&d| d) {
            Some(Self { days })
        } else {
            None
        }
    }

    /// Whether the given weekday is an active workday.
    pub fn contains(&self, day: Weekday) -> bool {
        self.days[day.num_days_from_monday() as usize]
    }
}

fn day_index(abbr: &str) -> Option<usize> {
    let abbr = abbr.trim().to_ascii_uppercase();
    ABBREVIATIONS.iter().position(|&a| a == abbr)
}
