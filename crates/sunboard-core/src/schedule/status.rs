//! Open/closed status resolution for a single exchange at a single instant.
//!
//! The resolver is a pure function of the parsed schedule inputs, the
//! exchange's timezone, and a caller-supplied instant; it never reads the
//! wall clock itself. Each call builds a fresh [`StatusRecord`].

use chrono::{DateTime, Datelike, Timelike, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use super::exceptions::ExceptionRule;
use super::template::{Phase, ScheduleTemplate, Session};
use super::workdays::WorkdaySpec;

pub const MINUTES_PER_DAY: u16 = 1440;

/// Phase of the containing session, or `Closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StatusPhase {
    Pre,
    Reg,
    Post,
    Closed,
}

impl From<Phase> for StatusPhase {
    fn from(phase: Phase) -> Self {
        match phase {
            Phase::Pre => StatusPhase::Pre,
            Phase::Reg => StatusPhase::Reg,
            Phase::Post => StatusPhase::Post,
        }
    }
}

impl std::fmt::Display for StatusPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(match self {
            StatusPhase::Pre => "PRE",
            StatusPhase::Reg => "REG",
            StatusPhase::Post => "POST",
            StatusPhase::Closed => "CLOSED",
        })
    }
}

/// What the next transition is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventLabel {
    Opens,
    Closes,
}

impl std::fmt::Display for EventLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(match self {
            EventLabel::Opens => "Opens",
            EventLabel::Closes => "Closes",
        })
    }
}

/// Countdown to the next open/close transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextEvent {
    pub label: EventLabel,
    pub minutes: u16,
}

/// Result of one status evaluation. Built fresh per call, never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRecord {
    pub is_open: bool,
    pub phase: StatusPhase,
    /// `None` only for exchanges with no sessions at all (bad template,
    /// unresolvable zone): permanently closed, nothing to count down to.
    pub next_event: Option<NextEvent>,
    pub sessions_today: Vec<Session>,
}

impl StatusRecord {
    /// The record for an exchange that can never open.
    pub fn permanently_closed() -> Self {
        Self {
            is_open: false,
            phase: StatusPhase::Closed,
            next_event: None,
            sessions_today: Vec::new(),
        }
    }
}

/// Today's effective session list after the weekday gate, the exception
/// overlay, and any early-close clipping.
///
/// Precedence: a `closed` exception empties the day outright; an override
/// window replaces the day with a single regular session (both win over
/// the weekday gate); otherwise sessions apply only on active workdays.
pub fn sessions_for_day(
    template: Option<&ScheduleTemplate>,
    workdays: &WorkdaySpec,
    exceptions: &[ExceptionRule],
    date: chrono::NaiveDate,
    early_close: Option<u16>,
) -> Vec<Session> {
    let mut sessions = match ExceptionRule::find(exceptions, date) {
        Some(rule) if rule.closed => Vec::new(),
        Some(&ExceptionRule {
            override_window: Some(w),
            ..
        }) => vec![Session {
            start_minute: w.start,
            end_minute: w.end,
            phase: Phase::Reg,
        }],
        _ => {
            if workdays.contains(date.weekday()) {
                template.map(ScheduleTemplate::sessions).unwrap_or_default()
            } else {
                Vec::new()
            }
        }
    };

    if let Some(cutoff) = early_close {
        // Half-day close: clip ends, never extend; drop emptied sessions.
        for s in &mut sessions {
            s.end_minute = s.end_minute.min(cutoff);
        }
        sessions.retain(|s| s.start_minute < s.end_minute);
    }
    sessions
}

/// Evaluate an exchange's status at `instant`.
pub fn resolve_status(
    template: Option<&ScheduleTemplate>,
    workdays: &WorkdaySpec,
    exceptions: &[ExceptionRule],
    tz: Tz,
    instant: DateTime<Utc>,
    early_close: Option<u16>,
) -> StatusRecord {
    let local = instant.with_timezone(&tz);
    let date = local.date_naive();
    let minute = (local.hour() * 60 + local.minute()) as u16;

    let sessions = sessions_for_day(template, workdays, exceptions, date, early_close);

    // Inside a session: open, counting down to its close.
    for s in &sessions {
        if minute >= s.start_minute && minute < s.end_minute {
            return StatusRecord {
                is_open: true,
                phase: s.phase.into(),
                next_event: Some(NextEvent {
                    label: EventLabel::Closes,
                    minutes: s.end_minute - minute,
                }),
                sessions_today: sessions,
            };
        }
    }

    // Closed: next opening later today, else tomorrow's first template
    // session (wrapping past midnight).
    let next_event = sessions
        .iter()
        .find(|s| s.start_minute > minute)
        .map(|s| NextEvent {
            label: EventLabel::Opens,
            minutes: s.start_minute - minute,
        })
        .or_else(|| {
            let base = template.map(ScheduleTemplate::sessions).unwrap_or_default();
            base.first().map(|first| NextEvent {
                label: EventLabel::Opens,
                minutes: MINUTES_PER_DAY - minute + first.start_minute,
            })
        });

    StatusRecord {
        is_open: false,
        phase: StatusPhase::Closed,
        next_event,
        sessions_today: sessions,
    }
}
