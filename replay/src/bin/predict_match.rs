use std::error::Error as StdError;
use std::io;
use std::path::PathBuf;

use clap::Parser as _;
use surface_elo::{
    match_win_probability, set_win_probability, win_probability, BestOf, MatchContext,
    RatingRegistry, Surface, SurfaceBucket, SurfaceWeights,
};
use surface_elo_replay::record::RegistryRow;
use tracing_subscriber::EnvFilter;

#[derive(clap::Parser)]
struct Opt {
    first: String,
    second: String,
    #[clap(long)]
    surface: Surface,
    #[clap(long, default_value = "ATP 250")]
    tier: String,
    #[clap(long, default_value = "3")]
    best_of: BestOf,
    #[clap(long, default_value = "grass")]
    carpet_bucket: SurfaceBucket,
    #[clap(long, default_value = "players_elos.csv")]
    registry: PathBuf,
}

fn main() -> Result<(), Box<dyn StdError>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let opt = Opt::parse();

    let mut prior = Vec::new();
    for row in csv::Reader::from_path(&opt.registry)?.deserialize() {
        let row: RegistryRow = row?;
        prior.push(row.into_prior());
    }
    let registry = RatingRegistry::from_prior(prior);

    let first = registry
        .lookup(&opt.first)
        .ok_or_else(|| format!("{} is not in the registry", opt.first))?;
    let second = registry
        .lookup(&opt.second)
        .ok_or_else(|| format!("{} is not in the registry", opt.second))?;

    let context = MatchContext {
        surface: opt.surface,
        tier: &opt.tier,
        best_of: opt.best_of,
        carpet_bucket: opt.carpet_bucket,
    };
    let bucket = opt.surface.bucket(opt.carpet_bucket);

    let overall = match_win_probability(
        set_win_probability(first.overall.elo, second.overall.elo),
        opt.best_of,
    );
    let surface = match_win_probability(
        set_win_probability(first.surface(bucket).elo, second.surface(bucket).elo),
        opt.best_of,
    );
    let combined = win_probability(first, second, &context, &SurfaceWeights::default());

    println!("# {} vs {} on {} ({})", first.id, second.id, opt.surface, opt.tier);
    println!("# Overall: {:.3}", overall.value());
    println!("# {}: {:.3}", bucket, surface.value());
    println!("# Combined: {:.3}", combined.value());

    Ok(())
}
