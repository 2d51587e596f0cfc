use std::error::Error as StdError;
use std::io;
use std::path::PathBuf;

use clap::Parser as _;
use surface_elo_replay::history::Archive;
use surface_elo_replay::record::{MatchRatingRow, MatchRow, RegistryRow};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(clap::Parser)]
struct Opt {
    /// Competitor id, as in the matches file.
    player: String,
    #[clap(long)]
    matches: PathBuf,
    #[clap(long, default_value = "elos_match_by_match.csv")]
    log: PathBuf,
    #[clap(long, default_value = "players_elos.csv")]
    registry: PathBuf,
}

fn main() -> Result<(), Box<dyn StdError>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let opt = Opt::parse();

    let mut latest = None;
    let mut found = false;
    for row in csv::Reader::from_path(&opt.registry)?.deserialize() {
        let row: RegistryRow = row?;
        if row.id == opt.player {
            latest = row.previous_match.filter(|id| !id.is_empty());
            found = true;
            break;
        }
    }
    if !found {
        warn!(player = %opt.player, "not in the registry snapshot");
    }

    let mut archive = Archive::default();
    for row in csv::Reader::from_path(&opt.log)?.deserialize() {
        let row: MatchRatingRow = row?;
        archive.insert_record(row);
    }
    for row in csv::Reader::from_path(&opt.matches)?.deserialize() {
        let row: MatchRow = row?;
        archive.insert_match(row.into_raw());
    }
    info!(records = archive.len(), "loaded rating log");

    println!("match_id,date,opponent,result,surface,elo,elo_surface");
    for entry in archive.history(&opt.player, latest.as_deref())? {
        println!(
            "{},{},{},{},{},{:.2},{:.2}",
            entry.match_id,
            entry.date.map(|date| date.to_string()).unwrap_or_default(),
            entry.opponent,
            if entry.won { "W" } else { "L" },
            entry.surface,
            entry.elo,
            entry.elo_surface,
        );
    }

    Ok(())
}
