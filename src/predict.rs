//! Pre-match win probabilities from current ratings.
//!
//! Ratings predict single sets. A match probability follows from the number
//! of sets needed, and the overall and surface estimates are blended with a
//! per-surface weight, since surface ratings rest on fewer matches.

use std::str::FromStr;

use thiserror::Error;

use crate::{
    probability::Probability,
    rating::{CompetitorRatingState, Elo},
    surface::{Surface, SurfaceBucket},
};

/// Tiers whose grass results carry more weight.
pub const TOUR_LEVEL_TIERS: [&str; 6] = [
    "ATP 1000",
    "ATP 500",
    "ATP 250",
    "Finals",
    "Grand Slam",
    "Olympics",
];

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BestOf {
    Three,
    Five,
}

#[derive(Debug, Error)]
#[error("invalid match format, expected 3 or 5")]
pub struct InvalidBestOf;

impl FromStr for BestOf {
    type Err = InvalidBestOf;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "3" => BestOf::Three,
            "5" => BestOf::Five,
            _ => return Err(InvalidBestOf),
        })
    }
}

/// Weight given to the surface estimate when blending.
#[derive(Debug, Copy, Clone)]
pub struct SurfaceWeights {
    pub hard: f64,
    pub clay: f64,
    pub grass: f64,
    pub grass_tour_level: f64,
}

impl Default for SurfaceWeights {
    fn default() -> SurfaceWeights {
        SurfaceWeights {
            hard: 0.281,
            clay: 0.362,
            grass: 0.206,
            grass_tour_level: 0.266,
        }
    }
}

impl SurfaceWeights {
    pub fn weight(&self, bucket: SurfaceBucket, tier: &str) -> f64 {
        match bucket {
            SurfaceBucket::Hard => self.hard,
            SurfaceBucket::Clay => self.clay,
            SurfaceBucket::Grass if TOUR_LEVEL_TIERS.contains(&tier) => self.grass_tour_level,
            SurfaceBucket::Grass => self.grass,
        }
    }
}

/// Probability that `elo` takes a set from `opponent`.
pub fn set_win_probability(elo: Elo, opponent: Elo) -> Probability {
    Probability::from_advantage(elo - opponent)
}

/// Probability of winning the match, given the probability of winning each
/// set independently.
pub fn match_win_probability(Probability(p): Probability, best_of: BestOf) -> Probability {
    let q = 1.0 - p;
    Probability(match best_of {
        BestOf::Three => p.powi(2) + 2.0 * p.powi(2) * q,
        BestOf::Five => p.powi(3) + 3.0 * p.powi(3) * q + 6.0 * p.powi(3) * q.powi(2),
    })
}

/// Where and how a match is played.
#[derive(Debug, Clone)]
pub struct MatchContext<'a> {
    pub surface: Surface,
    pub tier: &'a str,
    pub best_of: BestOf,
    pub carpet_bucket: SurfaceBucket,
}

/// Probability that `first` beats `second`.
pub fn win_probability(
    first: &CompetitorRatingState,
    second: &CompetitorRatingState,
    context: &MatchContext,
    weights: &SurfaceWeights,
) -> Probability {
    let bucket = context.surface.bucket(context.carpet_bucket);
    let overall = match_win_probability(
        set_win_probability(first.overall.elo, second.overall.elo),
        context.best_of,
    );
    let surface = match_win_probability(
        set_win_probability(first.surface(bucket).elo, second.surface(bucket).elo),
        context.best_of,
    );
    overall.blend(surface, weights.weight(bucket, context.tier))
}
