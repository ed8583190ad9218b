use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "sunboard-cli", version, about = "Sunboard CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Per-exchange open/closed status and global rank
    Status(commands::status::StatusArgs),
    /// Global ordering and the two display rails
    Order(commands::order::OrderArgs),
    /// Sunrise time for a point on Earth
    Sunrise(commands::sunrise::SunriseArgs),
    /// Generate shell completions
    Completions(commands::completions::CompletionsArgs),
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Status(args) => commands::status::run(args),
        Commands::Order(args) => commands::order::run(args),
        Commands::Sunrise(args) => commands::sunrise::run(args),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
