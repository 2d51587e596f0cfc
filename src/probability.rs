use crate::rating::EloDifference;

/// A probability in the range `0.0..=1.0` that the first-named side wins,
/// where `0.0` is a certain loss and `1.0` is a certain win.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Default)]
pub struct Probability(pub f64);

impl From<Probability> for f64 {
    #[inline]
    fn from(Probability(probability): Probability) -> f64 {
        probability
    }
}

impl From<f64> for Probability {
    #[inline]
    fn from(probability: f64) -> Probability {
        Probability(probability)
    }
}

impl Probability {
    pub const EVEN: Probability = Probability(0.5);

    /// Logistic expectation with a 400 point scale, given the rating
    /// advantage of the first-named side.
    #[inline]
    pub fn from_advantage(EloDifference(advantage): EloDifference) -> Probability {
        Probability(1.0 / (1.0 + 10f64.powf(-advantage / 400.0)))
    }

    #[inline]
    pub fn opposite(self) -> Probability {
        Probability(1.0 - self.0)
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Weighted blend, `weight` going to `other`.
    #[must_use]
    #[inline]
    pub fn blend(self, other: Probability, weight: f64) -> Probability {
        Probability((1.0 - weight) * self.0 + weight * other.0)
    }
}
