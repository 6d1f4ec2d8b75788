use anyhow::Context;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use crate::config;
use crate::domain::seed::demo_tracks;
use crate::http::server::HttpServer;
use crate::storage::error::StorageError;
use crate::storage::tracks::TrackRepository;

#[derive(Parser)]
#[command(name = "trackbase")]
#[command(version = "0.1")]
#[command(about = "Track catalog HTTP service")]
pub struct Cli {
    /// Path to the config TOML file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run http server exposing the track catalog
    Serve,
    /// Drop all tracks and load the demo data set
    Seed,
    /// List stored tracks
    List,
}

/// Entrypoint for CLI
pub fn run() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let cfg = config::Config::load(&cli.config.to_string_lossy())?;

    match &cli.command {
        Commands::Serve => {
            let storage =
                TrackRepository::new(&cfg.database).context("Failed to initialize storage")?;

            let http_server = HttpServer::new(storage, cfg.http);

            log::info!(
                "HTTP server running at http://{}:{}",
                http_server.config.bind_addr,
                http_server.config.port
            );
            http_server.run();
        }

        Commands::Seed => {
            let mut storage =
                TrackRepository::new(&cfg.database).context("Failed to initialize storage")?;
            let inserted = storage.seed(&demo_tracks())?;
            println!("Database seeded with {inserted} tracks");
        }

        Commands::List => {
            let storage =
                TrackRepository::new(&cfg.database).context("Failed to initialize storage")?;

            let tracks = match storage.list_all() {
                Ok(tracks) => tracks,
                Err(StorageError::NoTracks) => {
                    println!("No tracks found. Run \"seed\" to load the demo data.");
                    return Ok(());
                }
                Err(e) => return Err(e.into()),
            };

            for track in tracks {
                println!(
                    "{:>4}  {} - {} ({}, {}, {} min, {})",
                    track.id,
                    track.artist.as_deref().unwrap_or("?"),
                    track.name.as_deref().unwrap_or("?"),
                    track.album.as_deref().unwrap_or("?"),
                    track.genre.as_deref().unwrap_or("?"),
                    track.duration.map_or("?".to_string(), |d| d.to_string()),
                    track.release_year.map_or("?".to_string(), |y| y.to_string()),
                );
            }
        }
    }

    Ok(())
}
