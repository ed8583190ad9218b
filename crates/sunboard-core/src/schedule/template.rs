//! The schedule template grammar and its parsed form.
//!
//! Templates arrive as compact strings in one of three shapes:
//!
//! ```text
//! CONTINUOUS_09:30_16:00
//! SPLIT_09:00_11:30__12:30_15:00
//! EXTENDED_PRE_04:00_09:30__REG_09:30_16:00__POST_16:00_20:00
//! ```
//!
//! They are really a tagged union disguised as a string, so they parse
//! into [`ScheduleTemplate`] exactly once (at catalogue load) and every
//! later evaluation works on the variant. A string matching none of the
//! three shapes is not an error: it parses to `None`, which downstream
//! renders as an always-closed exchange.

use serde::{Deserialize, Serialize};

/// Session phase tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Pre,
    Reg,
    Post,
}

/// A half-open local-time window, in minutes since local midnight.
///
/// `start` is in `[0, 1440)`, `end` in `(start, 1440]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    pub start: u16,
    pub end: u16,
}

/// One resolved trading session for a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub start_minute: u16,
    pub end_minute: u16,
    pub phase: Phase,
}

/// Parsed schedule template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind")]
pub enum ScheduleTemplate {
    /// Single regular session.
    Continuous { window: Window },
    /// Two regular sessions with a gap (e.g. a lunch break).
    Split { morning: Window, afternoon: Window },
    /// Up to three phase-tagged sessions; at least one segment present.
    Extended {
        pre: Option<Window>,
        reg: Option<Window>,
        post: Option<Window>,
    },
}

impl ScheduleTemplate {
    /// Parse a template string. Returns `None` for anything that does not
    /// match one of the three grammar shapes -- malformed catalogue data
    /// degrades to "no sessions" rather than failing the load.
    pub fn parse(input: &str) -> Option<Self> {
        if let Some(rest) = input.strip_prefix("CONTINUOUS_") {
            let window = parse_window(rest)?;
            return Some(Self::Continuous { window });
        }
        if let Some(rest) = input.strip_prefix("SPLIT_") {
            let (first, second) = rest.split_once("__")?;
            return Some(Self::Split {
                morning: parse_window(first)?,
                afternoon: parse_window(second)?,
            });
        }
        if let Some(rest) = input.strip_prefix("EXTENDED_") {
            return parse_extended(rest);
        }
        None
    }

    /// Materialise the ordered session list this template describes.
    pub fn sessions(&self) -> Vec<Session> {
        match self {
            Self::Continuous { window } => vec![session(*window, Phase::Reg)],
            Self::Split { morning, afternoon } => {
                vec![session(*morning, Phase::Reg), session(*afternoon, Phase::Reg)]
            }
            Self::Extended { pre, reg, post } => {
                let mut out = Vec::with_capacity(3);
                if let Some(w) = pre {
                    out.push(session(*w, Phase::Pre));
                }
                if let Some(w) = reg {
                    out.push(session(*w, Phase::Reg));
                }
                if let Some(w) = post {
                    out.push(session(*w, Phase::Post));
                }
                out
            }
        }
    }
}

fn session(window: Window, phase: Phase) -> Session {
    Session {
        start_minute: window.start,
        end_minute: window.end,
        phase,
    }
}

/// `EXTENDED_` body: `__`-separated phase segments, each `TAG_HH:MM_HH:MM`,
/// in PRE/REG/POST order with no repeats and at least one present.
fn parse_extended(body: &str) -> Option<ScheduleTemplate> {
    let mut pre = None;
    let mut reg = None;
    let mut post = None;
    for segment in body.split("__") {
        if let Some(rest) = segment.strip_prefix("PRE_") {
            if pre.is_some() || reg.is_some() || post.is_some() {
                return None;
            }
            pre = Some(parse_window(rest)?);
        } else if let Some(rest) = segment.strip_prefix("REG_") {
            if reg.is_some() || post.is_some() {
                return None;
            }
            reg = Some(parse_window(rest)?);
        } else if let Some(rest) = segment.strip_prefix("POST_") {
            if post.is_some() {
                return None;
            }
            post = Some(parse_window(rest)?);
        } else {
            return None;
        }
    }
    if pre.is_none() && reg.is_none() && post.is_none() {
        return None;
    }
    Some(ScheduleTemplate::Extended { pre, reg, post })
}

/// `HH:MM_HH:MM` with start strictly before end.
fn parse_window(input: &str) -> Option<Window> {
    let (start_str, end_str) = input.split_once('_')?;
    let start = parse_minute(start_str)?;
    let end = parse_minute(end_str)?;
    if start >= end || start >= 1440 {
        return None;
    }
    Some(Window { start, end })
}

/// `HH:MM` as minutes since midnight. `24:00` is allowed as an end-of-day
/// close (1440); anything else past 23:59 is rejected.
pub(crate) fn parse_minute(input: &str) -> Option<u16> {
    let (h, m) = input.split_once(':')?;
    if h.len() != 2 || m.len() != 2 {
        return None;
    }
    let hour: u16 = h.parse().ok()?;
    let minute: u16 = m.parse().ok()?;
    if minute >= 60 || hour > 24 || (hour == 24 && minute != 0) {
        return None;
    }
    Some(hour * 60 + minute)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn continuous_round_trip() {
        let template = ScheduleTemplate::parse("CONTINUOUS_09:30_16:00").unwrap();
        assert_eq!(
            template.sessions(),
            vec![Session {
                start_minute: 570,
                end_minute: 960,
                phase: Phase::Reg
            }]
        );
    }

    #[test]
    fn split_produces_two_sessions_with_gap() {
        let template = ScheduleTemplate::parse("SPLIT_09:00_11:30__12:30_15:00").unwrap();
        let sessions = template.sessions();
        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0].end_minute, 690);
        assert_eq!(sessions[1].start_minute, 750);
        assert!(sessions.iter().all(|s| s.phase == Phase::Reg));
    }

    #[test]
    fn extended_full_three_phases() {
        let template =
            ScheduleTemplate::parse("EXTENDED_PRE_04:00_09:30__REG_09:30_16:00__POST_16:00_20:00")
                .unwrap();
        let sessions = template.sessions();
        assert_eq!(
            sessions.iter().map(|s| s.phase).collect::<Vec<_>>(),
            vec![Phase::Pre, Phase::Reg, Phase::Post]
        );
        assert_eq!(sessions[0].start_minute, 240);
        assert_eq!(sessions[2].end_minute, 1200);
    }

    #[test]
    fn extended_subset_of_phases() {
        let template = ScheduleTemplate::parse("EXTENDED_REG_09:30_16:00__POST_16:00_20:00").unwrap();
        let sessions = template.sessions();
        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0].phase, Phase::Reg);
        assert_eq!(sessions[1].phase, Phase::Post);
    }

    #[test]
    fn extended_out_of_order_segments_rejected() {
        assert_eq!(
            ScheduleTemplate::parse("EXTENDED_POST_16:00_20:00__PRE_04:00_09:30"),
            None
        );
    }

    #[test]
    fn malformed_templates_parse_to_none() {
        for bad in [
            "",
            "CONTINUOUS_09:30",
            "CONTINUOUS_9:30_16:00",
            "CONTINUOUS_25:00_26:00",
            "CONTINUOUS_16:00_09:30",
            "SPLIT_09:00_11:30",
            "EXTENDED_",
            "EXTENDED_LUNCH_12:00_13:00",
            "OPEN_ALL_DAY",
        ] {
            assert_eq!(ScheduleTemplate::parse(bad), None, "accepted {bad:?}");
        }
    }

    #[test]
    fn midnight_close_is_allowed() {
        let template = ScheduleTemplate::parse("CONTINUOUS_20:00_24:00").unwrap();
        assert_eq!(template.sessions()[0].end_minute, 1440);
    }
}
