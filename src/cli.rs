//! Command-line interface for fooqawhi_quest.

use clap::{Parser, Subcommand};

/// Fooqawhi Quest - find the Fooqawhi from a handful of hints
#[derive(Parser, Debug)]
#[command(name = "fooqawhi_quest")]
#[command(about = "Geography guessing game: hints, geocoded guesses, great-circle scoring", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the game config file
    #[arg(short, long, global = true, default_value = "fooqawhi.toml")]
    pub config: std::path::PathBuf,

    /// Override the catalog path from the config
    #[arg(long, global = true)]
    pub catalog: Option<std::path::PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play one round in the terminal
    Play {
        /// Override the correct-guess threshold, in kilometers
        #[arg(long)]
        threshold_km: Option<f64>,
    },

    /// List the places in the catalog
    Places,

    /// Resolve a free-text address with the configured geocoder
    Geocode {
        /// Address to resolve, e.g. "Matera, Italy"
        query: String,
    },
}
