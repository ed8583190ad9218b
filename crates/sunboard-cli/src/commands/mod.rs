pub mod completions;
pub mod order;
pub mod status;
pub mod sunrise;

use std::path::Path;

use chrono::{DateTime, Utc};
use sunboard_core::Catalogue;

/// Load a catalogue, printing per-record data-quality diagnostics to
/// stderr. Only file-level failures propagate as errors.
pub fn load_catalogue(path: &Path) -> Result<Catalogue, Box<dyn std::error::Error>> {
    let (catalogue, diagnostics) = Catalogue::load(path)?;
    for diagnostic in &diagnostics {
        eprintln!("warning: {diagnostic}");
    }
    Ok(catalogue)
}

/// Parse an RFC 3339 instant, defaulting to now. Passing an explicit
/// instant keeps runs reproducible for golden-file tests.
pub fn parse_instant(at: Option<&str>) -> Result<DateTime<Utc>, Box<dyn std::error::Error>> {
    match at {
        Some(s) => Ok(DateTime::parse_from_rfc3339(s)
            .map_err(|e| format!("invalid instant {s:?}: {e}"))?
            .with_timezone(&Utc)),
        None => Ok(Utc::now()),
    }
}

/// `HH:MM` rendering of a minute-of-day.
pub fn format_minute(minute: u16) -> String {
    format!("{:02}:{:02}", minute / 60, minute % 60)
}
