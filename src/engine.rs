//! The sequential rating pass.
//!
//! Every match moves the overall rating and one surface rating of both
//! participants. Ratings are set-weighted: each completed set counts as one
//! Elo encounter, so a 3-0 moves ratings more than a 3-2.

use chrono::{Days, NaiveDate};

use crate::{
    config::EngineConfig,
    ordering::{check_order, Match, StreamError},
    probability::Probability,
    rating::{Elo, EloDifference},
    recency::RecencyIndex,
    registry::{CompetitorId, RatingRegistry},
    score::{sets_won, SetsWon},
    surface::SurfaceBucket,
};

/// Rating around which the inactivity penalty is centered.
const PENALTY_CENTER: f64 = 1910.0;
const PENALTY_STEEPNESS: f64 = 0.05;
const PENALTY_SCALE: f64 = 1.0 / 0.995 - 1.0;
const ACTIVITY_DECAY: f64 = 0.4;

/// Learning rate after `match_number` career matches: `c / (match_number + o)^s`.
pub fn k_factor(match_number: u32, c: f64, o: f64, s: f64) -> f64 {
    c / (f64::from(match_number) + o).powf(s)
}

/// Adjustments for a competitor's recent activity.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct EloFactors {
    /// Multiplies both learning rates. `1.0` for very active competitors, up
    /// to `2.0` after a quiet period.
    pub activity: f64,
    /// Multiplies the pre-match rating. Below `1.0` only when the competitor
    /// did not play at all in the recency window.
    pub penalty: f64,
}

impl EloFactors {
    pub const NEUTRAL: EloFactors = EloFactors {
        activity: 1.0,
        penalty: 1.0,
    };
}

/// Activity and penalty factors. Competitors with fewer than the configured
/// threshold of career matches always count as active.
pub fn elo_factors(
    config: &EngineConfig,
    elo: Elo,
    match_number: u32,
    recent_matches: usize,
) -> EloFactors {
    if match_number < config.activity_threshold() {
        return EloFactors::NEUTRAL;
    }

    let activity = (-ACTIVITY_DECAY * recent_matches as f64).exp() + 1.0;
    let penalty = if recent_matches == 0 {
        let Elo(elo) = elo;
        1.0 - (1.0 - config.penalty())
            / (1.0 + (-PENALTY_STEEPNESS * (elo - PENALTY_CENTER)).exp() * PENALTY_SCALE)
    } else {
        1.0
    };

    EloFactors { activity, penalty }
}

/// Set-weighted Elo update. Each side's rating moves by its own learning
/// rate: up for every set it won, down for every set it lost.
pub fn elo_new(winner: Elo, loser: Elo, winner_k: f64, loser_k: f64, sets: SetsWon) -> (Elo, Elo) {
    let p = Probability::from_advantage(winner - loser).value();
    let won = f64::from(sets.winner);
    let lost = f64::from(sets.loser);

    // Sets the winner took beyond expectation, net of the sets it dropped.
    let surplus = EloDifference((1.0 - p) * won - p * lost);

    (winner + surplus * winner_k, loser - surplus * loser_k)
}

/// Ratings computed for one match, in stream order.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchRatingRecord {
    pub match_id: String,
    pub winner_elo: Elo,
    pub loser_elo: Elo,
    pub winner_elo_surface: Elo,
    pub loser_elo_surface: Elo,
    /// Match the winner's rating came from before this one, if any.
    pub winner_previous_match: Option<String>,
    pub loser_previous_match: Option<String>,
}

/// Result of a completed pass.
#[derive(Debug, Clone)]
pub struct RatingPass {
    pub log: Vec<MatchRatingRecord>,
    pub registry: RatingRegistry,
}

/// One side of a match, ready for the update.
#[derive(Debug, Copy, Clone)]
struct Contestant {
    competitor: CompetitorId,
    elo: Elo,
    elo_surface: Elo,
    k: f64,
    k_surface: f64,
}

pub struct RatingEngine<'a> {
    config: &'a EngineConfig,
    registry: RatingRegistry,
    recency: RecencyIndex,
    dates: Vec<NaiveDate>,
}

impl<'a> RatingEngine<'a> {
    /// Rates `matches` in order, starting from `registry`.
    ///
    /// Fails before touching any rating if the stream has duplicate ids or
    /// is not in chronological order.
    pub fn run(
        config: &'a EngineConfig,
        mut registry: RatingRegistry,
        matches: &[Match],
    ) -> Result<RatingPass, StreamError> {
        check_order(matches)?;

        let known = registry.len();
        let created = registry.ensure(
            matches
                .iter()
                .flat_map(|m| [m.winner_id.as_str(), m.loser_id.as_str()]),
            config.initial_elo(),
        );
        tracing::info!(matches = matches.len(), known, created, "starting rating pass");

        let mut engine = RatingEngine {
            config,
            registry,
            recency: RecencyIndex::new(),
            dates: matches.iter().map(|m| m.date).collect(),
        };

        let log = matches
            .iter()
            .enumerate()
            .map(|(position, m)| engine.apply(position, m))
            .collect();

        tracing::info!(competitors = engine.registry.len(), "finished rating pass");

        Ok(RatingPass {
            log,
            registry: engine.registry,
        })
    }

    fn contestant(&self, competitor: CompetitorId, bucket: SurfaceBucket, cutoff: NaiveDate) -> Contestant {
        let config = self.config;
        let state = self.registry.get(competitor);
        let surface = state.surface(bucket);

        let factors = if state.overall.match_number >= config.activity_threshold() {
            let recent = self.recency.matches_since(competitor, cutoff, &self.dates);
            elo_factors(config, state.overall.elo, state.overall.match_number, recent)
        } else {
            EloFactors::NEUTRAL
        };

        let k = k_factor(
            state.overall.match_number,
            config.overall_constant(),
            config.offset(),
            config.shape(),
        );
        let k_surface = k_factor(
            surface.match_number,
            config.surface_constant(bucket),
            config.offset(),
            config.shape(),
        );

        Contestant {
            competitor,
            elo: state.overall.elo * factors.penalty,
            elo_surface: if config.penalize_surface() {
                surface.elo * factors.penalty
            } else {
                surface.elo
            },
            k: k * factors.activity,
            k_surface: k_surface * factors.activity,
        }
    }

    /// Writes the new ratings of one side back and returns its previous
    /// match.
    fn commit(
        &mut self,
        competitor: CompetitorId,
        bucket: SurfaceBucket,
        elo: Elo,
        elo_surface: Elo,
        m: &Match,
        position: usize,
    ) -> Option<String> {
        let mut state = self.registry.get(competitor).clone();
        state.overall.elo = elo;
        state.overall.match_number += 1;
        let surface = state.surfaces.get_mut(bucket);
        surface.elo = elo_surface;
        surface.match_number += 1;
        let previous = state.previous_match.replace(m.match_id.clone());
        self.registry.write(competitor, state);
        self.recency.record(competitor, position);
        previous
    }

    fn apply(&mut self, position: usize, m: &Match) -> MatchRatingRecord {
        let config = self.config;
        let bucket = m.surface.bucket(config.carpet_bucket());
        let cutoff = m
            .date
            .checked_sub_days(Days::new(u64::from(config.recency_window_days())))
            .unwrap_or(NaiveDate::MIN);

        let winner = self.registry.get_or_insert(&m.winner_id, config.initial_elo());
        let loser = self.registry.get_or_insert(&m.loser_id, config.initial_elo());

        let mut w = self.contestant(winner, bucket, cutoff);
        let mut l = self.contestant(loser, bucket, cutoff);

        if m.tier == config.exhibition_tier() {
            let halving = config.exhibition_halving();
            for side in [&mut w, &mut l] {
                side.k = halving.halve(side.k);
                side.k_surface = halving.halve(side.k_surface);
            }
        }

        let sets = sets_won(&m.score);
        let (winner_elo, loser_elo) = elo_new(w.elo, l.elo, w.k, l.k, sets);
        let (winner_elo_surface, loser_elo_surface) =
            elo_new(w.elo_surface, l.elo_surface, w.k_surface, l.k_surface, sets);

        tracing::trace!(
            match_id = %m.match_id,
            winner = %m.winner_id,
            loser = %m.loser_id,
            sets_winner = sets.winner,
            sets_loser = sets.loser,
            "rated match"
        );

        let winner_previous_match =
            self.commit(w.competitor, bucket, winner_elo, winner_elo_surface, m, position);
        let loser_previous_match =
            self.commit(l.competitor, bucket, loser_elo, loser_elo_surface, m, position);

        MatchRatingRecord {
            match_id: m.match_id.clone(),
            winner_elo,
            loser_elo,
            winner_elo_surface,
            loser_elo_surface,
            winner_previous_match,
            loser_previous_match,
        }
    }
}
