use std::path::PathBuf;

use clap::{Args, ValueEnum};
use sunboard_core::{order, OrderingKey, SortKey, SortedExchange};

use super::{load_catalogue, parse_instant};

#[derive(Clone, Copy, ValueEnum)]
pub enum KeyChoice {
    Sunrise,
    Longitude,
}

impl From<KeyChoice> for OrderingKey {
    fn from(choice: KeyChoice) -> Self {
        match choice {
            KeyChoice::Sunrise => OrderingKey::Sunrise,
            KeyChoice::Longitude => OrderingKey::Longitude,
        }
    }
}

#[derive(Args)]
pub struct OrderArgs {
    /// Catalogue file (.json or .toml)
    pub catalogue: PathBuf,
    /// RFC 3339 instant to evaluate at (defaults to now)
    #[arg(long)]
    pub at: Option<String>,
    /// Ordering key
    #[arg(long = "by", value_enum, default_value = "sunrise")]
    pub by: KeyChoice,
    /// Emit JSON instead of the table
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: OrderArgs) -> Result<(), Box<dyn std::error::Error>> {
    let catalogue = load_catalogue(&args.catalogue)?;
    let instant = parse_instant(args.at.as_deref())?;
    let layout = order(&catalogue, instant, args.by.into());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&layout)?);
        return Ok(());
    }

    for (i, entry) in layout.sequence.iter().enumerate() {
        println!("{:>3}  {}", i + 1, describe(entry));
    }
    println!();
    println!("left rail:  {}", rail_ids(&layout.rails.left));
    println!("right rail: {}", rail_ids(&layout.rails.right));
    Ok(())
}

fn describe(entry: &SortedExchange) -> String {
    let key = match entry.sort_key {
        SortKey::Sunrise(instant) => format!("sunrise {}", instant.format("%H:%M UTC")),
        SortKey::Longitude(lon) => format!("longitude {lon:.4}"),
        SortKey::Unranked => "unranked".to_string(),
    };
    format!("{:<12} {}", entry.id, key)
}

fn rail_ids(rail: &[SortedExchange]) -> String {
    rail.iter()
        .map(|e| e.id.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
