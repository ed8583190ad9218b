//! Trading-session schedules: template grammar, workday specs, date
//! exceptions, and the open/closed status resolver.
//!
//! Everything here is evaluated fresh per call from immutable inputs. The
//! string grammars are parsed once at catalogue load (see
//! [`crate::catalogue`]); evaluation works on the parsed forms only.

pub mod exceptions;
pub mod status;
pub mod template;
pub mod workdays;

pub use exceptions::ExceptionRule;
pub use status::{resolve_status, EventLabel, NextEvent, StatusPhase, StatusRecord};
pub use template::{Phase, ScheduleTemplate, Session, Window};
pub use workdays::WorkdaySpec;
