//! Establishes the precondition of a rating pass: only rateable surfaces,
//! unique match ids, chronological order.

use chrono::NaiveDate;
use rustc_hash::{FxHashMap, FxHashSet};
use thiserror::Error;

use crate::surface::Surface;

/// A match as it comes out of the data files, before any filtering.
#[derive(Debug, Clone)]
pub struct RawMatch {
    pub match_id: String,
    pub winner_id: String,
    pub loser_id: String,
    pub score: String,
    /// Day the match was played, if known.
    pub date: Option<NaiveDate>,
    /// First day of the tournament.
    pub tourney_date: Option<NaiveDate>,
    pub surface: String,
    pub tier: String,
    pub round: String,
}

/// A match ready to be rated.
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    pub match_id: String,
    pub winner_id: String,
    pub loser_id: String,
    pub score: String,
    /// Match date, or the tournament start date when the former is unknown.
    pub date: NaiveDate,
    pub surface: Surface,
    pub tier: String,
    pub round: String,
}

impl Match {
    pub fn round_rank(&self) -> RoundRank {
        RoundRank::of(&self.round)
    }

    fn sort_key(&self) -> (NaiveDate, RoundRank) {
        (self.date, self.round_rank())
    }
}

const ROUNDS: [&str; 17] = [
    "NA", "Q1", "Q2", "Q3", "Q4", "R128", "R64", "R32", "R16", "QF", "SF", "BR", "F", "RR 1",
    "RR 2", "RR 3", "RR",
];

/// Tie-breaker among matches on the same day. Later stages of a tournament
/// rank higher; unknown round codes rank after every known one.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct RoundRank(usize);

impl RoundRank {
    pub fn of(round: &str) -> RoundRank {
        RoundRank(
            ROUNDS
                .iter()
                .position(|&known| known == round)
                .unwrap_or(ROUNDS.len()),
        )
    }
}

/// Filters and sorts raw matches into a stream the engine accepts.
///
/// Rows without any date or with an unrated surface are dropped, every copy
/// of a duplicated match id is dropped, and so is everything before `since`.
/// The rest is sorted by (effective date, round rank), keeping input order
/// among equal keys.
pub fn prepare(raw: Vec<RawMatch>, since: Option<NaiveDate>) -> Vec<Match> {
    let total = raw.len();

    let rateable: Vec<(RawMatch, Surface)> = raw
        .into_iter()
        .filter_map(|m| {
            let surface = m.surface.parse().ok()?;
            Some((m, surface))
        })
        .collect();
    let unrated_surface = total - rateable.len();

    let mut occurrences: FxHashMap<&str, usize> = FxHashMap::default();
    for (m, _) in &rateable {
        *occurrences.entry(m.match_id.as_str()).or_default() += 1;
    }
    let mut duplicated: Vec<String> = occurrences
        .into_iter()
        .filter(|&(_, count)| count > 1)
        .map(|(id, _)| id.to_owned())
        .collect();
    duplicated.sort_unstable();
    if !duplicated.is_empty() {
        tracing::warn!(
            count = duplicated.len(),
            sample = ?&duplicated[..duplicated.len().min(10)],
            "match ids are not unique, dropping every copy"
        );
    }
    let duplicated: FxHashSet<String> = duplicated.into_iter().collect();

    let mut undated = 0;
    let mut matches: Vec<Match> = rateable
        .into_iter()
        .filter(|(m, _)| !duplicated.contains(&m.match_id))
        .filter_map(|(m, surface)| {
            let Some(date) = m.date.or(m.tourney_date) else {
                undated += 1;
                return None;
            };
            Some(Match {
                match_id: m.match_id,
                winner_id: m.winner_id,
                loser_id: m.loser_id,
                score: m.score,
                date,
                surface,
                tier: m.tier,
                round: m.round,
            })
        })
        .filter(|m| since.map_or(true, |since| m.date >= since))
        .collect();

    matches.sort_by_key(Match::sort_key);

    tracing::info!(
        total,
        kept = matches.len(),
        unrated_surface,
        duplicated = duplicated.len(),
        undated,
        "prepared match stream"
    );

    matches
}

#[derive(Debug, Error)]
pub enum StreamError {
    #[error("match id {match_id} occurs again at position {position}")]
    DuplicateMatchId { position: usize, match_id: String },
    #[error("match {match_id} at position {position} is out of chronological order")]
    OutOfOrder { position: usize, match_id: String },
}

/// Checks that `matches` is a stream the engine may rate: unique ids, sorted
/// by (date, round rank).
pub fn check_order(matches: &[Match]) -> Result<(), StreamError> {
    let mut seen: FxHashSet<&str> = FxHashSet::default();
    for (position, m) in matches.iter().enumerate() {
        if !seen.insert(m.match_id.as_str()) {
            return Err(StreamError::DuplicateMatchId {
                position,
                match_id: m.match_id.clone(),
            });
        }
        if position > 0 && matches[position - 1].sort_key() > m.sort_key() {
            return Err(StreamError::OutOfOrder {
                position,
                match_id: m.match_id.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn raw(id: &str, date: Option<NaiveDate>, tourney_date: Option<NaiveDate>, surface: &str, round: &str) -> RawMatch {
        RawMatch {
            match_id: id.to_owned(),
            winner_id: "w".to_owned(),
            loser_id: "l".to_owned(),
            score: "6-4 6-4".to_owned(),
            date,
            tourney_date,
            surface: surface.to_owned(),
            tier: "ATP 250".to_owned(),
            round: round.to_owned(),
        }
    }

    fn ids(matches: &[Match]) -> Vec<&str> {
        matches.iter().map(|m| m.match_id.as_str()).collect()
    }

    #[test]
    fn test_round_rank() {
        assert!(RoundRank::of("Q1") < RoundRank::of("R128"));
        assert!(RoundRank::of("QF") < RoundRank::of("SF"));
        assert!(RoundRank::of("SF") < RoundRank::of("BR"));
        assert!(RoundRank::of("BR") < RoundRank::of("F"));
        assert!(RoundRank::of("F") < RoundRank::of("RR 1"));
        assert!(RoundRank::of("RR") < RoundRank::of("whatever"));
    }

    #[test]
    fn test_prepare_sorts_by_date_then_round() {
        let day = Some(date(2010, 1, 10));
        let matches = prepare(
            vec![
                raw("final", day, None, "Hard", "F"),
                raw("later", Some(date(2010, 1, 11)), None, "Hard", "R32"),
                raw("semi", day, None, "Hard", "SF"),
                raw("earlier", Some(date(2010, 1, 1)), None, "Clay", "F"),
            ],
            None,
        );
        assert_eq!(ids(&matches), ["earlier", "semi", "final", "later"]);
        assert!(check_order(&matches).is_ok());
    }

    #[test]
    fn test_prepare_filters() {
        let day = Some(date(2010, 5, 1));
        let matches = prepare(
            vec![
                raw("ok", day, None, "Carpet", "R16"),
                raw("no surface", day, None, "", "R16"),
                raw("odd surface", day, None, "Sand", "R16"),
                raw("dup", day, None, "Hard", "R16"),
                raw("dup", day, None, "Hard", "R32"),
                raw("undated", None, None, "Hard", "R16"),
                raw("tourney dated", None, Some(date(2010, 4, 28)), "Grass", "R32"),
            ],
            None,
        );
        assert_eq!(ids(&matches), ["tourney dated", "ok"]);
        assert_eq!(matches[0].date, date(2010, 4, 28));
        assert_eq!(matches[1].surface, Surface::Carpet);
    }

    #[test]
    fn test_prepare_since() {
        let matches = prepare(
            vec![
                raw("old", Some(date(2009, 11, 30)), None, "Hard", "F"),
                raw("new", Some(date(2009, 12, 1)), None, "Hard", "F"),
            ],
            Some(date(2009, 12, 1)),
        );
        assert_eq!(ids(&matches), ["new"]);
    }

    #[test]
    fn test_check_order() {
        let mut matches = prepare(
            vec![
                raw("a", Some(date(2010, 1, 1)), None, "Hard", "F"),
                raw("b", Some(date(2010, 1, 2)), None, "Hard", "F"),
            ],
            None,
        );
        matches.swap(0, 1);
        assert!(matches!(
            check_order(&matches),
            Err(StreamError::OutOfOrder { position: 1, .. })
        ));

        matches[1].match_id = "b".to_owned();
        matches[1].date = matches[0].date;
        assert!(matches!(
            check_order(&matches),
            Err(StreamError::DuplicateMatchId { position: 1, .. })
        ));
    }
}
