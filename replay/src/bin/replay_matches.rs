use std::{
    error::Error as StdError,
    fs::File,
    io,
    io::Write,
    path::{Path, PathBuf},
};

use chrono::NaiveDate;
use clap::Parser as _;
use surface_elo::{
    prepare, EngineConfig, ExhibitionHalving, RatingEngine, RatingPass, RatingRegistry,
    Surface, SurfaceBucket,
};
use surface_elo_replay::record::{MatchDate, MatchRatingRow, MatchRow, RegistryRow};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(clap::Parser)]
struct Opt {
    /// Matches file. Read from stdin if not given.
    #[clap(long)]
    matches: Option<PathBuf>,
    /// Registry snapshot of a previous run to continue from.
    #[clap(long)]
    prior: Option<PathBuf>,
    /// Directory for elos_match_by_match.csv and players_elos.csv.
    #[clap(long, default_value = ".")]
    out_dir: PathBuf,
    /// Ignore matches dated before this day.
    #[clap(long)]
    since: Option<MatchDate>,
    /// Only rate matches on these surfaces.
    #[clap(long, value_delimiter = ',', num_args = 1.., default_value = "Hard,Clay,Grass,Carpet")]
    surfaces: Vec<Surface>,
    #[clap(long, default_value = "250")]
    overall_constant: f64,
    #[clap(long, default_value = "280")]
    hard_constant: f64,
    #[clap(long, default_value = "300")]
    clay_constant: f64,
    #[clap(long, default_value = "350")]
    grass_constant: f64,
    #[clap(long, default_value = "20")]
    offset: f64,
    #[clap(long, default_value = "0.6")]
    shape: f64,
    #[clap(long, default_value = "1400")]
    initial_elo: f64,
    #[clap(long, default_value = "40")]
    activity_threshold: u32,
    #[clap(long, default_value = "75")]
    recency_window_days: u32,
    #[clap(long, default_value = "0.98")]
    penalty: f64,
    /// Apply the inactivity penalty to the surface rating too.
    #[clap(long, default_value = "true", action = clap::ArgAction::Set)]
    penalize_surface: bool,
    #[clap(long, default_value = "Exhibition")]
    exhibition_tier: String,
    #[clap(long, default_value = "divide")]
    exhibition_halving: ExhibitionHalving,
    #[clap(long, default_value = "grass")]
    carpet_bucket: SurfaceBucket,
}

impl Opt {
    fn config(&self) -> EngineConfig {
        EngineConfig::builder()
            .overall_constant(self.overall_constant)
            .surface_constant(SurfaceBucket::Hard, self.hard_constant)
            .surface_constant(SurfaceBucket::Clay, self.clay_constant)
            .surface_constant(SurfaceBucket::Grass, self.grass_constant)
            .offset(self.offset)
            .shape(self.shape)
            .initial_elo(self.initial_elo)
            .activity_threshold(self.activity_threshold)
            .recency_window_days(self.recency_window_days)
            .penalty(self.penalty)
            .penalize_surface(self.penalize_surface)
            .exhibition_tier(self.exhibition_tier.clone())
            .exhibition_halving(self.exhibition_halving)
            .carpet_bucket(self.carpet_bucket)
            .build()
    }
}

fn read_prior(path: &Path) -> Result<RatingRegistry, Box<dyn StdError>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut prior = Vec::new();
    for row in reader.deserialize() {
        let row: RegistryRow = row?;
        prior.push(row.into_prior());
    }
    info!(path = %path.display(), competitors = prior.len(), "read prior registry");
    Ok(RatingRegistry::from_prior(prior))
}

fn write_outputs(out_dir: &Path, pass: &RatingPass) -> Result<(), Box<dyn StdError>> {
    let log_path = out_dir.join("elos_match_by_match.csv");
    let mut writer = csv::Writer::from_path(&log_path)?;
    for record in &pass.log {
        writer.serialize(MatchRatingRow::from(record))?;
    }
    writer.flush()?;
    info!(path = %log_path.display(), rows = pass.log.len(), "wrote match rating log");

    let registry_path = out_dir.join("players_elos.csv");
    let mut writer = csv::Writer::from_path(&registry_path)?;
    for state in pass.registry.ranked() {
        writer.serialize(RegistryRow::from(state))?;
    }
    writer.flush()?;
    info!(path = %registry_path.display(), rows = pass.registry.len(), "wrote registry snapshot");

    Ok(())
}

fn write_report<W: Write>(
    mut writer: W,
    pass: &RatingPass,
    last_date: Option<NaiveDate>,
) -> io::Result<()> {
    writeln!(writer, "# ---")?;
    for (rank, state) in pass.registry.ranked().into_iter().take(10).enumerate() {
        writeln!(
            writer,
            "# {:>2}. {}: {:.1} (hard {:.1}, clay {:.1}, grass {:.1}, matches {})",
            rank + 1,
            state.id,
            f64::from(state.overall.elo),
            f64::from(state.surfaces.hard.elo),
            f64::from(state.surfaces.clay.elo),
            f64::from(state.surfaces.grass.elo),
            state.overall.match_number,
        )?;
    }
    writeln!(writer, "# ---")?;
    writeln!(writer, "# Distinct players: {}", pass.registry.len())?;
    match last_date {
        Some(date) => writeln!(writer, "# Rated matches: {} (last on: {})", pass.log.len(), date)?,
        None => writeln!(writer, "# Rated matches: 0")?,
    }
    writeln!(writer, "# ---")?;
    Ok(())
}

fn main() -> Result<(), Box<dyn StdError>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let opt = Opt::parse();
    let config = opt.config();

    let registry = match &opt.prior {
        Some(path) => read_prior(path)?,
        None => RatingRegistry::new(),
    };

    let mut reader = match &opt.matches {
        Some(path) => csv::Reader::from_reader(Box::new(File::open(path)?) as Box<dyn io::Read>),
        None => csv::Reader::from_reader(Box::new(io::stdin().lock()) as Box<dyn io::Read>),
    };

    let mut raw = Vec::new();
    for row in reader.deserialize() {
        let row: MatchRow = row?;
        // Unknown surfaces are passed on, so that they show up in the stream summary.
        if row
            .surface
            .parse::<Surface>()
            .map_or(true, |surface| opt.surfaces.contains(&surface))
        {
            raw.push(row.into_raw());
        }
    }

    let matches = prepare(raw, opt.since.map(|MatchDate(date)| date));
    let last_date = matches.last().map(|m| m.date);

    let pass = RatingEngine::run(&config, registry, &matches)?;

    write_outputs(&opt.out_dir, &pass)?;
    write_report(io::stdout(), &pass, last_date)?;

    Ok(())
}
