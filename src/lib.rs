//! Set-weighted Elo ratings for head-to-head sports played in sets, with
//! parallel surface-specific ratings.
//!
//! A pass walks a chronologically ordered stream of matches and updates the
//! overall rating and one surface rating of both participants after every
//! match:
//!
//! * learning rates decay with career experience,
//! * competitors returning from a quiet period get a larger learning rate,
//!   and a one-time discount when they did not play at all for a while,
//! * every completed set counts as one Elo encounter.
//!
//! ```
//! use chrono::NaiveDate;
//! use surface_elo::{prepare, EngineConfig, RatingEngine, RatingRegistry, RawMatch};
//!
//! let raw = vec![RawMatch {
//!     match_id: "2010-doha-a-b".to_owned(),
//!     winner_id: "a".to_owned(),
//!     loser_id: "b".to_owned(),
//!     score: "6-4 7-6(5)".to_owned(),
//!     date: NaiveDate::from_ymd_opt(2010, 1, 4),
//!     tourney_date: None,
//!     surface: "Hard".to_owned(),
//!     tier: "ATP 250".to_owned(),
//!     round: "R32".to_owned(),
//! }];
//!
//! let config = EngineConfig::default();
//! let pass = RatingEngine::run(&config, RatingRegistry::new(), &prepare(raw, None)).unwrap();
//! assert!(pass.registry.lookup("a").unwrap().overall.elo > pass.registry.lookup("b").unwrap().overall.elo);
//! ```

mod config;
mod engine;
mod ordering;
mod predict;
mod probability;
mod rating;
mod recency;
mod registry;
mod score;
mod surface;

pub use config::{EngineConfig, EngineConfigBuilder, ExhibitionHalving, InvalidExhibitionHalving};
pub use engine::{elo_factors, elo_new, k_factor, EloFactors, MatchRatingRecord, RatingEngine, RatingPass};
pub use ordering::{check_order, prepare, Match, RawMatch, RoundRank, StreamError};
pub use predict::{
    match_win_probability, set_win_probability, win_probability, BestOf, InvalidBestOf,
    MatchContext, SurfaceWeights, TOUR_LEVEL_TIERS,
};
pub use probability::Probability;
pub use rating::{CompetitorRatingState, Elo, EloDifference, Track};
pub use recency::RecencyIndex;
pub use registry::{CompetitorId, PriorRating, RatingRegistry};
pub use score::{normalize, parse_set, sets_won, SetOutcome, SetResult, SetsWon, MAX_SETS};
pub use surface::{BySurface, InvalidBucket, InvalidSurface, Surface, SurfaceBucket};
