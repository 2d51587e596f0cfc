use std::{fmt, str::FromStr};

use thiserror::Error;

/// Court surface a match was played on.
#[derive(Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Copy, Clone)]
pub enum Surface {
    Hard,
    Clay,
    Grass,
    Carpet,
}

#[derive(Debug, Error)]
#[error("invalid surface")]
pub struct InvalidSurface;

impl FromStr for Surface {
    type Err = InvalidSurface;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "Hard" => Surface::Hard,
            "Clay" => Surface::Clay,
            "Grass" => Surface::Grass,
            "Carpet" => Surface::Carpet,
            _ => return Err(InvalidSurface),
        })
    }
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Surface::Hard => "Hard",
            Surface::Clay => "Clay",
            Surface::Grass => "Grass",
            Surface::Carpet => "Carpet",
        })
    }
}

impl Surface {
    /// Rating bucket for this surface. Carpet has no bucket of its own and is
    /// folded into `carpet_bucket`.
    pub fn bucket(self, carpet_bucket: SurfaceBucket) -> SurfaceBucket {
        match self {
            Surface::Hard => SurfaceBucket::Hard,
            Surface::Clay => SurfaceBucket::Clay,
            Surface::Grass => SurfaceBucket::Grass,
            Surface::Carpet => carpet_bucket,
        }
    }
}

/// A surface-specific rating track.
#[derive(Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Copy, Clone)]
pub enum SurfaceBucket {
    Hard,
    Clay,
    Grass,
}

#[derive(Debug, Error)]
#[error("invalid surface bucket")]
pub struct InvalidBucket;

impl FromStr for SurfaceBucket {
    type Err = InvalidBucket;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "hard" => SurfaceBucket::Hard,
            "clay" => SurfaceBucket::Clay,
            "grass" => SurfaceBucket::Grass,
            _ => return Err(InvalidBucket),
        })
    }
}

impl fmt::Display for SurfaceBucket {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            SurfaceBucket::Hard => "hard",
            SurfaceBucket::Clay => "clay",
            SurfaceBucket::Grass => "grass",
        })
    }
}

/// One value per surface bucket.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BySurface<T> {
    pub hard: T,
    pub clay: T,
    pub grass: T,
}

impl<T> BySurface<T> {
    pub fn from_fn<F>(mut f: F) -> BySurface<T>
    where
        F: FnMut(SurfaceBucket) -> T,
    {
        BySurface {
            hard: f(SurfaceBucket::Hard),
            clay: f(SurfaceBucket::Clay),
            grass: f(SurfaceBucket::Grass),
        }
    }

    pub fn get(&self, bucket: SurfaceBucket) -> &T {
        match bucket {
            SurfaceBucket::Hard => &self.hard,
            SurfaceBucket::Clay => &self.clay,
            SurfaceBucket::Grass => &self.grass,
        }
    }

    pub fn get_mut(&mut self, bucket: SurfaceBucket) -> &mut T {
        match bucket {
            SurfaceBucket::Hard => &mut self.hard,
            SurfaceBucket::Clay => &mut self.clay,
            SurfaceBucket::Grass => &mut self.grass,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_surface() {
        assert_eq!("Clay".parse::<Surface>().unwrap(), Surface::Clay);
        assert!("clay".parse::<Surface>().is_err());
        assert!("".parse::<Surface>().is_err());
        assert!("Indoor".parse::<Surface>().is_err());
    }

    #[test]
    fn test_carpet_bucket() {
        assert_eq!(Surface::Carpet.bucket(SurfaceBucket::Grass), SurfaceBucket::Grass);
        assert_eq!(Surface::Carpet.bucket(SurfaceBucket::Hard), SurfaceBucket::Hard);
        assert_eq!(Surface::Clay.bucket(SurfaceBucket::Grass), SurfaceBucket::Clay);
    }

    #[test]
    fn test_by_surface() {
        let mut counts = BySurface::from_fn(|bucket| bucket as u32);
        *counts.get_mut(SurfaceBucket::Grass) += 10;
        assert_eq!(*counts.get(SurfaceBucket::Hard), 0);
        assert_eq!(*counts.get(SurfaceBucket::Grass), 12);
    }
}
