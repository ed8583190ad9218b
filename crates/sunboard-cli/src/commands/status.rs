use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use sunboard_core::{order, OrderingKey, StatusRecord};

use super::{format_minute, load_catalogue, parse_instant};

#[derive(Args)]
pub struct StatusArgs {
    /// Catalogue file (.json or .toml)
    pub catalogue: PathBuf,
    /// RFC 3339 instant to evaluate at (defaults to now)
    #[arg(long)]
    pub at: Option<String>,
    /// Emit JSON instead of the table
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct StatusLine {
    id: String,
    rank: usize,
    #[serde(flatten)]
    status: StatusRecord,
}

pub fn run(args: StatusArgs) -> Result<(), Box<dyn std::error::Error>> {
    let catalogue = load_catalogue(&args.catalogue)?;
    let instant = parse_instant(args.at.as_deref())?;

    // Global rank comes from the sunrise ordering at the same instant.
    let layout = order(&catalogue, instant, OrderingKey::Sunrise);
    let rank_of = |id: &str| {
        layout
            .sequence
            .iter()
            .position(|e| e.id == id)
            .map(|i| i + 1)
            .unwrap_or(0)
    };

    let lines: Vec<StatusLine> = catalogue
        .exchanges()
        .iter()
        .map(|exchange| StatusLine {
            id: exchange.id.clone(),
            rank: rank_of(&exchange.id),
            status: exchange.status(instant, None),
        })
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&lines)?);
        return Ok(());
    }

    for line in &lines {
        let state = if line.status.is_open { "OPEN" } else { "CLOSED" };
        let next = match line.status.next_event {
            Some(event) => format!("{} in {} min", event.label, event.minutes),
            None => "no next event".to_string(),
        };
        let sessions = line
            .status
            .sessions_today
            .iter()
            .map(|s| format!("{}-{}", format_minute(s.start_minute), format_minute(s.end_minute)))
            .collect::<Vec<_>>()
            .join(" ");
        println!(
            "{:<12} #{:<3} {:<6} {:<6} {:<20} {}",
            line.id, line.rank, state, line.status.phase, next, sessions
        );
    }
    Ok(())
}
