use std::{fmt, str::FromStr};

use thiserror::Error;

use crate::{
    rating::Elo,
    surface::{BySurface, SurfaceBucket},
};

/// How learning rates are halved for exhibition matches.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum ExhibitionHalving {
    /// `k / 2`.
    #[default]
    Divide,
    /// `floor(k / 2)`. Reproduces historical output, but freezes ratings
    /// whenever `k < 2`.
    Floor,
}

#[derive(Debug, Error)]
#[error("invalid exhibition halving mode")]
pub struct InvalidExhibitionHalving;

impl FromStr for ExhibitionHalving {
    type Err = InvalidExhibitionHalving;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "divide" => ExhibitionHalving::Divide,
            "floor" => ExhibitionHalving::Floor,
            _ => return Err(InvalidExhibitionHalving),
        })
    }
}

impl fmt::Display for ExhibitionHalving {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            ExhibitionHalving::Divide => "divide",
            ExhibitionHalving::Floor => "floor",
        })
    }
}

impl ExhibitionHalving {
    #[inline]
    pub fn halve(self, k: f64) -> f64 {
        match self {
            ExhibitionHalving::Divide => k / 2.0,
            ExhibitionHalving::Floor => (k / 2.0).floor(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EngineConfigBuilder {
    overall_constant: f64,
    surface_constants: BySurface<f64>,
    offset: f64,
    shape: f64,

    initial_elo: f64,

    activity_threshold: u32,
    recency_window_days: u32,
    penalty: f64,
    penalize_surface: bool,

    exhibition_tier: String,
    exhibition_halving: ExhibitionHalving,

    carpet_bucket: SurfaceBucket,
}

impl Default for EngineConfigBuilder {
    fn default() -> EngineConfigBuilder {
        EngineConfigBuilder::new()
    }
}

impl EngineConfigBuilder {
    pub fn new() -> EngineConfigBuilder {
        EngineConfigBuilder {
            overall_constant: 250.0,
            surface_constants: BySurface {
                hard: 280.0,
                clay: 300.0,
                grass: 350.0,
            },
            offset: 20.0,
            shape: 0.6,

            initial_elo: 1400.0,

            activity_threshold: 40,
            recency_window_days: 75,
            penalty: 0.98,
            penalize_surface: true,

            exhibition_tier: "Exhibition".to_owned(),
            exhibition_halving: ExhibitionHalving::Divide,

            carpet_bucket: SurfaceBucket::Grass,
        }
    }

    /// Multiplicative constant `c` of the overall learning rate.
    pub fn overall_constant(&mut self, c: f64) -> &mut Self {
        assert!(c > 0.0);
        self.overall_constant = c;
        self
    }

    /// Multiplicative constant of the learning rate of a surface track.
    pub fn surface_constant(&mut self, bucket: SurfaceBucket, c: f64) -> &mut Self {
        assert!(c > 0.0);
        *self.surface_constants.get_mut(bucket) = c;
        self
    }

    /// Offset `o` added to the match count.
    pub fn offset(&mut self, o: f64) -> &mut Self {
        assert!(o > 0.0);
        self.offset = o;
        self
    }

    /// Shape exponent `s` of the learning rate decay.
    pub fn shape(&mut self, s: f64) -> &mut Self {
        assert!(s > 0.0);
        self.shape = s;
        self
    }

    pub fn initial_elo(&mut self, initial_elo: f64) -> &mut Self {
        assert!(initial_elo.is_finite());
        self.initial_elo = initial_elo;
        self
    }

    /// Career match count from which activity and penalty factors apply.
    pub fn activity_threshold(&mut self, matches: u32) -> &mut Self {
        self.activity_threshold = matches;
        self
    }

    pub fn recency_window_days(&mut self, days: u32) -> &mut Self {
        self.recency_window_days = days;
        self
    }

    /// Floor of the inactivity penalty, `p`.
    pub fn penalty(&mut self, p: f64) -> &mut Self {
        assert!(p > 0.0 && p <= 1.0);
        self.penalty = p;
        self
    }

    /// Whether the inactivity penalty also scales the surface rating.
    pub fn penalize_surface(&mut self, penalize_surface: bool) -> &mut Self {
        self.penalize_surface = penalize_surface;
        self
    }

    pub fn exhibition_tier(&mut self, tier: impl Into<String>) -> &mut Self {
        self.exhibition_tier = tier.into();
        self
    }

    pub fn exhibition_halving(&mut self, halving: ExhibitionHalving) -> &mut Self {
        self.exhibition_halving = halving;
        self
    }

    pub fn carpet_bucket(&mut self, bucket: SurfaceBucket) -> &mut Self {
        self.carpet_bucket = bucket;
        self
    }

    pub fn build(&self) -> EngineConfig {
        EngineConfig {
            overall_constant: self.overall_constant,
            surface_constants: self.surface_constants.clone(),
            offset: self.offset,
            shape: self.shape,

            initial_elo: Elo(self.initial_elo),

            activity_threshold: self.activity_threshold,
            recency_window_days: self.recency_window_days,
            penalty: self.penalty,
            penalize_surface: self.penalize_surface,

            exhibition_tier: self.exhibition_tier.clone(),
            exhibition_halving: self.exhibition_halving,

            carpet_bucket: self.carpet_bucket,
        }
    }
}

/// Parameters of the rating engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    overall_constant: f64,
    surface_constants: BySurface<f64>,
    offset: f64,
    shape: f64,

    initial_elo: Elo,

    activity_threshold: u32,
    recency_window_days: u32,
    penalty: f64,
    penalize_surface: bool,

    exhibition_tier: String,
    exhibition_halving: ExhibitionHalving,

    carpet_bucket: SurfaceBucket,
}

impl Default for EngineConfig {
    fn default() -> EngineConfig {
        EngineConfig::new()
    }
}

impl EngineConfig {
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::default()
    }

    pub fn new() -> EngineConfig {
        EngineConfig::builder().build()
    }

    pub fn overall_constant(&self) -> f64 {
        self.overall_constant
    }

    pub fn surface_constant(&self, bucket: SurfaceBucket) -> f64 {
        *self.surface_constants.get(bucket)
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn shape(&self) -> f64 {
        self.shape
    }

    pub fn initial_elo(&self) -> Elo {
        self.initial_elo
    }

    pub fn activity_threshold(&self) -> u32 {
        self.activity_threshold
    }

    pub fn recency_window_days(&self) -> u32 {
        self.recency_window_days
    }

    pub fn penalty(&self) -> f64 {
        self.penalty
    }

    pub fn penalize_surface(&self) -> bool {
        self.penalize_surface
    }

    pub fn exhibition_tier(&self) -> &str {
        &self.exhibition_tier
    }

    pub fn exhibition_halving(&self) -> ExhibitionHalving {
        self.exhibition_halving
    }

    pub fn carpet_bucket(&self) -> SurfaceBucket {
        self.carpet_bucket
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.overall_constant(), 250.0);
        assert_eq!(config.surface_constant(SurfaceBucket::Hard), 280.0);
        assert_eq!(config.surface_constant(SurfaceBucket::Clay), 300.0);
        assert_eq!(config.surface_constant(SurfaceBucket::Grass), 350.0);
        assert_eq!(config.offset(), 20.0);
        assert_eq!(config.shape(), 0.6);
        assert_eq!(config.initial_elo(), Elo(1400.0));
        assert_eq!(config.recency_window_days(), 75);
        assert_eq!(config.penalty(), 0.98);
        assert_eq!(config.activity_threshold(), 40);
        assert_eq!(config.exhibition_tier(), "Exhibition");
        assert_eq!(config.carpet_bucket(), SurfaceBucket::Grass);
    }

    #[test]
    fn test_builder() {
        let config = EngineConfig::builder()
            .surface_constant(SurfaceBucket::Clay, 320.0)
            .carpet_bucket(SurfaceBucket::Hard)
            .exhibition_halving(ExhibitionHalving::Floor)
            .build();
        assert_eq!(config.surface_constant(SurfaceBucket::Clay), 320.0);
        assert_eq!(config.surface_constant(SurfaceBucket::Hard), 280.0);
        assert_eq!(config.carpet_bucket(), SurfaceBucket::Hard);
        assert_eq!(config.exhibition_halving(), ExhibitionHalving::Floor);
    }

    #[test]
    #[should_panic]
    fn test_penalty_out_of_range() {
        EngineConfig::builder().penalty(1.5);
    }

    #[test]
    #[should_panic]
    fn test_zero_offset() {
        EngineConfig::builder().offset(0.0);
    }

    #[test]
    fn test_halving() {
        assert_eq!(ExhibitionHalving::Divide.halve(1.5), 0.75);
        assert_eq!(ExhibitionHalving::Floor.halve(1.5), 0.0);
        assert_eq!(ExhibitionHalving::Floor.halve(31.7), 15.0);
    }
}
