use ordered_float::OrderedFloat;
use rustc_hash::FxHashMap;

use crate::{
    rating::{CompetitorRatingState, Elo, Track},
    surface::BySurface,
};

/// Dense handle of a competitor inside one [`RatingRegistry`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct CompetitorId(usize);

impl CompetitorId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Rating state carried over from a previous run. Older files only have the
/// overall track, in which case `surfaces` is all `None`.
#[derive(Debug, Clone)]
pub struct PriorRating {
    pub id: String,
    pub overall: Track,
    pub surfaces: BySurface<Option<Track>>,
    pub previous_match: Option<String>,
}

impl PriorRating {
    fn into_state(self) -> CompetitorRatingState {
        let overall = self.overall;
        CompetitorRatingState {
            id: self.id,
            overall,
            surfaces: BySurface {
                hard: self.surfaces.hard.unwrap_or(Track::new(overall.elo)),
                clay: self.surfaces.clay.unwrap_or(Track::new(overall.elo)),
                grass: self.surfaces.grass.unwrap_or(Track::new(overall.elo)),
            },
            previous_match: self.previous_match,
        }
    }
}

/// Mutable rating state of every known competitor, addressed by identity.
#[derive(Debug, Clone, Default)]
pub struct RatingRegistry {
    index: FxHashMap<Box<str>, CompetitorId>,
    states: Vec<CompetitorRatingState>,
}

impl RatingRegistry {
    pub fn new() -> RatingRegistry {
        RatingRegistry::default()
    }

    /// Seeds a registry from a previous run. Missing surface tracks start
    /// from the competitor's overall rating rather than the initial rating,
    /// so that established ratings are not thrown away. If an id occurs more
    /// than once, the first row wins.
    pub fn from_prior<I>(prior: I) -> RatingRegistry
    where
        I: IntoIterator<Item = PriorRating>,
    {
        let mut registry = RatingRegistry::new();
        for rating in prior {
            if registry.index.contains_key(rating.id.as_str()) {
                tracing::warn!(id = %rating.id, "duplicate competitor in prior ratings, keeping first");
                continue;
            }
            registry.push(rating.into_state());
        }
        registry
    }

    fn push(&mut self, state: CompetitorRatingState) -> CompetitorId {
        let id = CompetitorId(self.states.len());
        self.index.insert(state.id.clone().into_boxed_str(), id);
        self.states.push(state);
        id
    }

    /// Makes sure every id has a state, creating missing ones at
    /// `initial_elo` on every track. Existing entries are left untouched.
    /// Returns the number of competitors created.
    pub fn ensure<'a, I>(&mut self, ids: I, initial_elo: Elo) -> usize
    where
        I: IntoIterator<Item = &'a str>,
    {
        let before = self.states.len();
        for id in ids {
            self.get_or_insert(id, initial_elo);
        }
        self.states.len() - before
    }

    pub fn get_or_insert(&mut self, id: &str, initial_elo: Elo) -> CompetitorId {
        match self.index.get(id) {
            Some(&competitor) => competitor,
            None => self.push(CompetitorRatingState::new(id.to_owned(), initial_elo)),
        }
    }

    pub fn id(&self, id: &str) -> Option<CompetitorId> {
        self.index.get(id).copied()
    }

    pub fn lookup(&self, id: &str) -> Option<&CompetitorRatingState> {
        self.id(id).map(|competitor| self.get(competitor))
    }

    pub fn get(&self, competitor: CompetitorId) -> &CompetitorRatingState {
        &self.states[competitor.0]
    }

    /// Replaces the state of `competitor`. The identity itself never changes.
    pub fn write(&mut self, competitor: CompetitorId, state: CompetitorRatingState) {
        debug_assert_eq!(self.states[competitor.0].id, state.id);
        self.states[competitor.0] = state;
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CompetitorRatingState> {
        self.states.iter()
    }

    /// All states, best overall rating first.
    pub fn ranked(&self) -> Vec<&CompetitorRatingState> {
        let mut ranked: Vec<_> = self.states.iter().collect();
        ranked.sort_by_key(|state| OrderedFloat(-f64::from(state.overall.elo)));
        ranked
    }
}
