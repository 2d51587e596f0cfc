use chrono::NaiveDate;
use rustc_hash::FxHashMap;
use surface_elo::RawMatch;
use thiserror::Error;

use crate::record::MatchRatingRow;

#[derive(Debug, Error, PartialEq)]
pub enum HistoryError {
    #[error("match {0} is not in the rating log")]
    MissingRecord(String),
    #[error("match {0} is not in the matches file")]
    MissingMatch(String),
    #[error("{competitor} did not play in match {match_id}")]
    NotAParticipant { competitor: String, match_id: String },
    #[error("previous match chain loops at {0}")]
    Cycle(String),
}

/// One rated match from the point of view of a single competitor.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub match_id: String,
    pub date: Option<NaiveDate>,
    pub opponent: String,
    pub won: bool,
    pub surface: String,
    pub elo: f64,
    pub elo_surface: f64,
}

/// Match rows and rating log rows, both addressed by match id.
#[derive(Default)]
pub struct Archive {
    records: FxHashMap<Box<str>, MatchRatingRow>,
    matches: FxHashMap<Box<str>, RawMatch>,
}

impl Archive {
    pub fn insert_record(&mut self, record: MatchRatingRow) {
        self.records
            .insert(record.match_id.clone().into_boxed_str(), record);
    }

    /// Keeps the first of several matches with the same id, like the rating
    /// pass excludes duplicates anyway.
    pub fn insert_match(&mut self, m: RawMatch) {
        self.matches
            .entry(m.match_id.clone().into_boxed_str())
            .or_insert(m);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Walks the previous match chain of `competitor` backwards, starting at
    /// `latest`, and returns the entries oldest first.
    pub fn history(
        &self,
        competitor: &str,
        latest: Option<&str>,
    ) -> Result<Vec<HistoryEntry>, HistoryError> {
        let mut entries = Vec::new();
        let mut next = latest.map(str::to_owned);

        while let Some(match_id) = next {
            if entries.len() > self.records.len() {
                return Err(HistoryError::Cycle(match_id));
            }

            let record = self
                .records
                .get(match_id.as_str())
                .ok_or_else(|| HistoryError::MissingRecord(match_id.clone()))?;
            let m = self
                .matches
                .get(match_id.as_str())
                .ok_or_else(|| HistoryError::MissingMatch(match_id.clone()))?;

            let (won, opponent, elo, elo_surface, previous) = if m.winner_id == competitor {
                (
                    true,
                    &m.loser_id,
                    record.winner_elo,
                    record.winner_elo_surface,
                    &record.winner_previous_match,
                )
            } else if m.loser_id == competitor {
                (
                    false,
                    &m.winner_id,
                    record.loser_elo,
                    record.loser_elo_surface,
                    &record.loser_previous_match,
                )
            } else {
                return Err(HistoryError::NotAParticipant {
                    competitor: competitor.to_owned(),
                    match_id,
                });
            };

            entries.push(HistoryEntry {
                date: m.date.or(m.tourney_date),
                opponent: opponent.clone(),
                won,
                surface: m.surface.clone(),
                elo,
                elo_surface,
                match_id,
            });
            next = previous.clone().filter(|id| !id.is_empty());
        }

        entries.reverse();
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(match_id: &str, winner: &str, loser: &str) -> RawMatch {
        RawMatch {
            match_id: match_id.to_owned(),
            winner_id: winner.to_owned(),
            loser_id: loser.to_owned(),
            score: "6-4 6-4".to_owned(),
            date: NaiveDate::from_ymd_opt(2012, 5, 1),
            tourney_date: None,
            surface: "Clay".to_owned(),
            tier: "ATP 250".to_owned(),
            round: "R32".to_owned(),
        }
    }

    fn record(
        match_id: &str,
        winner_elo: f64,
        loser_elo: f64,
        winner_previous: Option<&str>,
        loser_previous: Option<&str>,
    ) -> MatchRatingRow {
        MatchRatingRow {
            match_id: match_id.to_owned(),
            winner_elo,
            loser_elo,
            winner_elo_surface: winner_elo + 1.0,
            loser_elo_surface: loser_elo + 1.0,
            winner_previous_match: winner_previous.map(str::to_owned),
            loser_previous_match: loser_previous.map(str::to_owned),
        }
    }

    fn archive() -> Archive {
        let mut archive = Archive::default();
        archive.insert_match(raw("m1", "a", "b"));
        archive.insert_match(raw("m2", "c", "a"));
        archive.insert_match(raw("m3", "a", "c"));
        archive.insert_record(record("m1", 1420.0, 1380.0, None, None));
        archive.insert_record(record("m2", 1415.0, 1405.0, None, Some("m1")));
        archive.insert_record(record("m3", 1425.0, 1405.0, Some("m2"), Some("m2")));
        archive
    }

    #[test]
    fn test_history_follows_chain() {
        let history = archive().history("a", Some("m3")).unwrap();
        let ids: Vec<&str> = history.iter().map(|e| e.match_id.as_str()).collect();
        assert_eq!(ids, ["m1", "m2", "m3"]);
        assert!(history[0].won);
        assert!(!history[1].won);
        assert_eq!(history[1].opponent, "c");
        assert_eq!(history[1].elo, 1405.0);
        assert_eq!(history[2].elo_surface, 1426.0);
    }

    #[test]
    fn test_history_without_matches() {
        assert_eq!(archive().history("z", None), Ok(Vec::new()));
    }

    #[test]
    fn test_broken_chain() {
        let mut archive = archive();
        archive.insert_record(record("m4", 1430.0, 1400.0, Some("m9"), None));
        archive.insert_match(raw("m4", "a", "b"));
        assert_eq!(
            archive.history("a", Some("m4")),
            Err(HistoryError::MissingRecord("m9".to_owned()))
        );
        assert!(matches!(
            archive.history("b", Some("m3")),
            Err(HistoryError::NotAParticipant { .. })
        ));
    }

    #[test]
    fn test_cycle() {
        let mut archive = Archive::default();
        archive.insert_match(raw("m1", "a", "b"));
        archive.insert_record(record("m1", 1420.0, 1380.0, Some("m1"), None));
        assert_eq!(
            archive.history("a", Some("m1")),
            Err(HistoryError::Cycle("m1".to_owned()))
        );
    }
}
