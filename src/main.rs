//! Fooqawhi Quest - unified CLI
//!
//! Terminal front end over the game engine.

#![warn(missing_docs)]

mod cli;
mod play;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use fooqawhi_quest::{GameConfig, GameEngine, PlaceCatalog, build_geocoder};
use tracing::{info, instrument};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();
    initialize_tracing();

    let cli = Cli::parse();
    let mut config = GameConfig::load_or_default(&cli.config)?;
    if let Some(catalog) = &cli.catalog {
        config = config.with_catalog_path(catalog);
    }

    match cli.command {
        Command::Play { threshold_km } => run_play(config, threshold_km).await,
        Command::Places => list_places(&config),
        Command::Geocode { query } => run_geocode(&config, &query).await,
    }
}

/// Play a round on stdin/stdout
#[instrument(skip(config))]
async fn run_play(config: GameConfig, threshold_km: Option<f64>) -> Result<()> {
    let config = match threshold_km {
        Some(km) => {
            info!(km, "Overriding correct-guess threshold");
            let policy = config.policy().with_correct_guess_threshold_km(km);
            config.with_policy(policy)?
        }
        None => config,
    };

    let catalog = PlaceCatalog::from_file(config.catalog_path())
        .with_context(|| format!("loading catalog {}", config.catalog_path().display()))?;
    let geocoder = build_geocoder(config.geocoder(), config.api_key_from_env())?;

    let engine = GameEngine::builder(catalog, geocoder)
        .policy(*config.policy())
        .selection(*config.selection())
        .build()?;

    play::run(engine).await
}

/// Print the catalog
fn list_places(config: &GameConfig) -> Result<()> {
    let catalog = PlaceCatalog::from_file(config.catalog_path())?;
    for (index, place) in catalog.places().iter().enumerate() {
        println!(
            "{:>3}  {}, {}  ({:.4}, {:.4})  {} hints",
            index,
            place.name(),
            place.country(),
            place.latitude(),
            place.longitude(),
            place.hint_count()
        );
    }
    Ok(())
}

/// Resolve one address and print the hit
#[instrument(skip(config))]
async fn run_geocode(config: &GameConfig, query: &str) -> Result<()> {
    let geocoder = build_geocoder(config.geocoder(), config.api_key_from_env())?;
    let hit = geocoder.resolve(query).await?;
    println!(
        "{}\n  lat {:.6}, lng {:.6}\n  place_id {}",
        hit.formatted_address(),
        hit.latitude(),
        hit.longitude(),
        hit.place_id()
    );
    Ok(())
}

fn initialize_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,fooqawhi_quest=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
