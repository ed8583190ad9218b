//! The read-only exchange catalogue.
//!
//! Records arrive as JSON or TOML and are parsed into their structured
//! forms exactly once here: timezone names into [`Tz`], schedule strings
//! into [`ScheduleTemplate`], workday specs into [`WorkdaySpec`], and
//! exception times into minutes. Evaluation never touches the raw strings
//! again.
//!
//! Data-quality problems in individual records degrade that record and
//! surface as [`Diagnostic`]s: an exchange with bad coordinates stays on
//! the board but is unranked; one with an unknown timezone or malformed
//! template renders permanently closed. Only file-level failures abort
//! the load.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::Deserialize;

use crate::error::CatalogueError;
use crate::schedule::template::parse_minute;
use crate::schedule::{resolve_status, ExceptionRule, ScheduleTemplate, StatusRecord, WorkdaySpec};

/// One exchange record as it appears on disk.
#[derive(Debug, Clone, Deserialize)]
pub struct ExchangeRecord {
    pub id: String,
    pub timezone: String,
    pub latitude: f64,
    pub longitude: f64,
    pub schedule: String,
    #[serde(default)]
    pub workdays: Option<String>,
    #[serde(default)]
    pub exceptions: Vec<ExceptionRecord>,
}

/// Raw exception entry: date plus either a closure flag or override times.
#[derive(Debug, Clone, Deserialize)]
pub struct ExceptionRecord {
    pub date: NaiveDate,
    #[serde(default)]
    pub closed: bool,
    #[serde(default)]
    pub open: Option<String>,
    #[serde(default)]
    pub close: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CatalogueFile {
    #[serde(default)]
    exchanges: Vec<ExchangeRecord>,
}

/// Validated coordinates, degrees.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// A per-record data-quality warning produced during load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub exchange_id: String,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.exchange_id, self.message)
    }
}

/// One exchange in its parsed, evaluation-ready form.
#[derive(Debug, Clone)]
pub struct Exchange {
    pub id: String,
    /// `None` when the timezone name did not resolve; the exchange then
    /// renders permanently closed.
    pub tz: Option<Tz>,
    /// `None` when latitude/longitude were out of range; the exchange is
    /// then unranked in any ordering.
    pub coordinates: Option<Coordinates>,
    pub template: Option<ScheduleTemplate>,
    pub workdays: WorkdaySpec,
    pub exceptions: Vec<ExceptionRule>,
}

impl Exchange {
    /// Status at `instant`, with an optional half-day early-close cutoff
    /// (minutes since local midnight).
    pub fn status(&self, instant: DateTime<Utc>, early_close: Option<u16>) -> StatusRecord {
        match self.tz {
            Some(tz) => resolve_status(
                self.template.as_ref(),
                &self.workdays,
                &self.exceptions,
                tz,
                instant,
                early_close,
            ),
            None => StatusRecord::permanently_closed(),
        }
    }
}

/// Immutable exchange catalogue. Load once, evaluate many times.
#[derive(Debug, Clone, Default)]
pub struct Catalogue {
    exchanges: Vec<Exchange>,
}

impl Catalogue {
    /// Load from a `.json` or `.toml` file, selected by extension.
    pub fn load(path: &Path) -> Result<(Self, Vec<Diagnostic>), CatalogueError> {
        let text = std::fs::read_to_string(path).map_err(|source| CatalogueError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&text),
            Some("toml") => Self::from_toml_str(&text),
            _ => Err(CatalogueError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    /// Parse a JSON catalogue of shape `{ "exchanges": [...] }`.
    pub fn from_json_str(text: &str) -> Result<(Self, Vec<Diagnostic>), CatalogueError> {
        let file: CatalogueFile = serde_json::from_str(text)?;
        Ok(Self::from_records(file.exchanges))
    }

    /// Parse a TOML catalogue with `[[exchanges]]` tables.
    pub fn from_toml_str(text: &str) -> Result<(Self, Vec<Diagnostic>), CatalogueError> {
        let file: CatalogueFile = toml::from_str(text)?;
        Ok(Self::from_records(file.exchanges))
    }

    /// Build from raw records, degrading per record and collecting the
    /// diagnostics. Never fails: a catalogue of entirely bad records is a
    /// catalogue of permanently closed, unranked exchanges.
    pub fn from_records(records: Vec<ExchangeRecord>) -> (Self, Vec<Diagnostic>) {
        let mut diagnostics = Vec::new();
        let mut seen = HashSet::new();
        let mut exchanges = Vec::with_capacity(records.len());

        for record in records {
            if !seen.insert(record.id.clone()) {
                diagnostics.push(Diagnostic {
                    exchange_id: record.id,
                    message: "duplicate id, record skipped".into(),
                });
                continue;
            }
            exchanges.push(parse_record(record, &mut diagnostics));
        }

        (Self { exchanges }, diagnostics)
    }

    pub fn exchanges(&self) -> &[Exchange] {
        &self.exchanges
    }

    pub fn get(&self, id: &str) -> Option<&Exchange> {
        self.exchanges.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.exchanges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exchanges.is_empty()
    }
}

fn parse_record(record: ExchangeRecord, diagnostics: &mut Vec<Diagnostic>) -> Exchange {
    let mut diag = |message: String| {
        diagnostics.push(Diagnostic {
            exchange_id: record.id.clone(),
            message,
        })
    };

    let coordinates = if (-90.0..=90.0).contains(&record.latitude)
        && (-180.0..=180.0).contains(&record.longitude)
    {
        Some(Coordinates {
            latitude: record.latitude,
            longitude: record.longitude,
        })
    } else {
        diag(format!(
            "coordinates out of range ({}, {}), exchange unranked",
            record.latitude, record.longitude
        ));
        None
    };

    let tz: Option<Tz> = match record.timezone.parse() {
        Ok(tz) => Some(tz),
        Err(_) => {
            diag(format!("unknown timezone {:?}", record.timezone));
            None
        }
    };

    let template = ScheduleTemplate::parse(&record.schedule);
    if template.is_none() {
        diag(format!(
            "malformed schedule template {:?}, treating as always closed",
            record.schedule
        ));
    }

    let workdays = match record.workdays.as_deref() {
        None => WorkdaySpec::default(),
        Some(spec) => WorkdaySpec::parse(spec).unwrap_or_else(|| {
            diag(format!(
                "malformed workday spec {:?}, defaulting to MON-FRI",
                spec
            ));
            WorkdaySpec::default()
        }),
    };

    let mut exceptions: Vec<ExceptionRule> = Vec::with_capacity(record.exceptions.len());
    for raw in &record.exceptions {
        if exceptions.iter().any(|r| r.date == raw.date) {
            diag(format!("duplicate exception for {}, first rule wins", raw.date));
            continue;
        }
        let open = raw.open.as_deref().and_then(parse_minute);
        let close = raw.close.as_deref().and_then(parse_minute);
        if (open.is_none() && raw.open.is_some()) || (close.is_none() && raw.close.is_some()) {
            diag(format!(
                "unparseable override time on {}, override ignored",
                raw.date
            ));
        }
        exceptions.push(ExceptionRule::new(raw.date, raw.closed, open, close));
    }
    exceptions.sort_by_key(|r| r.date);

    Exchange {
        id: record.id,
        tz,
        coordinates,
        template,
        workdays,
        exceptions,
    }
}
