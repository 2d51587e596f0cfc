use std::{fmt, str::FromStr};

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};
use surface_elo::{
    BySurface, CompetitorRatingState, Elo, MatchRatingRecord, PriorRating, RawMatch, Track,
};

use crate::ids;

/// Calendar date of a match. Timestamps are truncated to the day.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub struct MatchDate(pub NaiveDate);

impl FromStr for MatchDate {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .or_else(|_| NaiveDate::parse_from_str(s, "%Y%m%d"))
            .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").map(|t| t.date()))
            .map(MatchDate)
    }
}

impl fmt::Display for MatchDate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// One row of the matches file.
#[serde_as]
#[derive(Deserialize, Debug)]
pub struct MatchRow {
    #[serde(default)]
    pub match_id: Option<String>,
    pub winner_id: String,
    pub loser_id: String,
    #[serde(default)]
    pub score: String,
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub date: Option<MatchDate>,
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub tourney_date: Option<MatchDate>,
    #[serde(default)]
    pub surface: String,
    #[serde(default)]
    pub tourney_level: String,
    #[serde(default)]
    pub round: String,
    #[serde(default)]
    pub tourney_id: Option<String>,
}

impl MatchRow {
    /// The id of the match, derived from the tournament and the players when
    /// the file does not carry one.
    pub fn id(&self) -> String {
        match self.match_id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => id.to_owned(),
            _ => ids::match_id(
                self.tourney_id.as_deref().unwrap_or_default(),
                &self.winner_id,
                &self.loser_id,
                &self.score,
            ),
        }
    }

    pub fn into_raw(self) -> RawMatch {
        RawMatch {
            match_id: self.id(),
            winner_id: self.winner_id,
            loser_id: self.loser_id,
            score: self.score,
            date: self.date.map(|MatchDate(d)| d),
            tourney_date: self.tourney_date.map(|MatchDate(d)| d),
            surface: self.surface,
            tier: self.tourney_level,
            round: self.round,
        }
    }
}

/// One competitor in a registry file. Surface columns may be missing in files
/// written before surface ratings existed.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RegistryRow {
    pub id: String,
    pub elo_overall: f64,
    #[serde(default)]
    pub match_number: u32,
    #[serde(default)]
    pub elo_hard: Option<f64>,
    #[serde(default)]
    pub match_number_hard: Option<u32>,
    #[serde(default)]
    pub elo_clay: Option<f64>,
    #[serde(default)]
    pub match_number_clay: Option<u32>,
    #[serde(default)]
    pub elo_grass: Option<f64>,
    #[serde(default)]
    pub match_number_grass: Option<u32>,
    #[serde(default)]
    pub previous_match: Option<String>,
}

fn track(elo: Option<f64>, match_number: Option<u32>) -> Option<Track> {
    elo.map(|elo| Track {
        elo: Elo(elo),
        match_number: match_number.unwrap_or(0),
    })
}

impl RegistryRow {
    pub fn into_prior(self) -> PriorRating {
        PriorRating {
            id: self.id,
            overall: Track {
                elo: Elo(self.elo_overall),
                match_number: self.match_number,
            },
            surfaces: BySurface {
                hard: track(self.elo_hard, self.match_number_hard),
                clay: track(self.elo_clay, self.match_number_clay),
                grass: track(self.elo_grass, self.match_number_grass),
            },
            previous_match: self.previous_match.filter(|id| !id.is_empty()),
        }
    }
}

impl From<&CompetitorRatingState> for RegistryRow {
    fn from(state: &CompetitorRatingState) -> RegistryRow {
        RegistryRow {
            id: state.id.clone(),
            elo_overall: f64::from(state.overall.elo),
            match_number: state.overall.match_number,
            elo_hard: Some(f64::from(state.surfaces.hard.elo)),
            match_number_hard: Some(state.surfaces.hard.match_number),
            elo_clay: Some(f64::from(state.surfaces.clay.elo)),
            match_number_clay: Some(state.surfaces.clay.match_number),
            elo_grass: Some(f64::from(state.surfaces.grass.elo)),
            match_number_grass: Some(state.surfaces.grass.match_number),
            previous_match: state.previous_match.clone(),
        }
    }
}

/// One row of the match-by-match rating log.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MatchRatingRow {
    pub match_id: String,
    pub winner_elo: f64,
    pub loser_elo: f64,
    pub winner_elo_surface: f64,
    pub loser_elo_surface: f64,
    #[serde(default)]
    pub winner_previous_match: Option<String>,
    #[serde(default)]
    pub loser_previous_match: Option<String>,
}

impl From<&MatchRatingRecord> for MatchRatingRow {
    fn from(record: &MatchRatingRecord) -> MatchRatingRow {
        MatchRatingRow {
            match_id: record.match_id.clone(),
            winner_elo: f64::from(record.winner_elo),
            loser_elo: f64::from(record.loser_elo),
            winner_elo_surface: f64::from(record.winner_elo_surface),
            loser_elo_surface: f64::from(record.loser_elo_surface),
            winner_previous_match: record.winner_previous_match.clone(),
            loser_previous_match: record.loser_previous_match.clone(),
        }
    }
}
