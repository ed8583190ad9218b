use chrono::{NaiveDate, Utc};
use clap::Args;
use sunboard_core::sunrise_utc;

#[derive(Args)]
pub struct SunriseArgs {
    /// Latitude in degrees, -90 to 90
    #[arg(allow_negative_numbers = true)]
    pub latitude: f64,
    /// Longitude in degrees, -180 to 180
    #[arg(allow_negative_numbers = true)]
    pub longitude: f64,
    /// Calendar date (defaults to today, UTC)
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

pub fn run(args: SunriseArgs) -> Result<(), Box<dyn std::error::Error>> {
    if !(-90.0..=90.0).contains(&args.latitude) {
        return Err(format!("latitude {} out of range", args.latitude).into());
    }
    if !(-180.0..=180.0).contains(&args.longitude) {
        return Err(format!("longitude {} out of range", args.longitude).into());
    }

    let date = args.date.unwrap_or_else(|| Utc::now().date_naive());
    match sunrise_utc(date, args.latitude, args.longitude) {
        Some(instant) => println!("{}", instant.format("%Y-%m-%dT%H:%M:%SZ")),
        None => println!("no sunrise"),
    }
    Ok(())
}
