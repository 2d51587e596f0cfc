use std::ops::{Add, AddAssign, Mul, Sub};

use crate::surface::{BySurface, SurfaceBucket};

/// Number representing playing strength. The difference between two ratings
/// predicts the probability of winning a set. Higher is better.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Default)]
pub struct Elo(pub f64);

impl From<Elo> for f64 {
    #[inline]
    fn from(Elo(elo): Elo) -> f64 {
        elo
    }
}

impl From<f64> for Elo {
    #[inline]
    fn from(elo: f64) -> Elo {
        Elo(elo)
    }
}

impl Sub<Elo> for Elo {
    type Output = EloDifference;

    #[inline]
    fn sub(self, rhs: Elo) -> EloDifference {
        EloDifference(self.0 - rhs.0)
    }
}

impl Add<EloDifference> for Elo {
    type Output = Elo;

    #[inline]
    fn add(self, EloDifference(difference): EloDifference) -> Elo {
        Elo(self.0 + difference)
    }
}

impl AddAssign<EloDifference> for Elo {
    #[inline]
    fn add_assign(&mut self, EloDifference(difference): EloDifference) {
        self.0 += difference;
    }
}

impl Sub<EloDifference> for Elo {
    type Output = Elo;

    #[inline]
    fn sub(self, EloDifference(difference): EloDifference) -> Elo {
        Elo(self.0 - difference)
    }
}

/// Scaling a rating itself, as done by the inactivity penalty.
impl Mul<f64> for Elo {
    type Output = Elo;

    #[inline]
    fn mul(self, factor: f64) -> Elo {
        Elo(self.0 * factor)
    }
}

/// A difference between two ratings, or a rating change.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Default)]
pub struct EloDifference(pub f64);

impl From<EloDifference> for f64 {
    #[inline]
    fn from(EloDifference(difference): EloDifference) -> f64 {
        difference
    }
}

impl Mul<f64> for EloDifference {
    type Output = EloDifference;

    #[inline]
    fn mul(self, scalar: f64) -> EloDifference {
        EloDifference(self.0 * scalar)
    }
}

/// One rating track: a rating and the number of matches that went into it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Track {
    pub elo: Elo,
    /// Matches rated on this track so far. Drives the learning rate.
    pub match_number: u32,
}

impl Track {
    pub fn new(elo: Elo) -> Track {
        Track {
            elo,
            match_number: 0,
        }
    }
}

/// Everything the engine knows about one competitor.
#[derive(Debug, Clone, PartialEq)]
pub struct CompetitorRatingState {
    pub id: String,
    pub overall: Track,
    pub surfaces: BySurface<Track>,
    /// Id of the last match this state was updated from. Downstream
    /// consumers follow it backwards through the match rating log.
    pub previous_match: Option<String>,
}

impl CompetitorRatingState {
    /// Fresh state with every track at `initial_elo`.
    pub fn new(id: String, initial_elo: Elo) -> CompetitorRatingState {
        CompetitorRatingState {
            id,
            overall: Track::new(initial_elo),
            surfaces: BySurface::from_fn(|_| Track::new(initial_elo)),
            previous_match: None,
        }
    }

    pub fn surface(&self, bucket: SurfaceBucket) -> &Track {
        self.surfaces.get(bucket)
    }
}
