use surface_elo::normalize;

/// Identifier of a match whose row does not carry one: tournament, winner,
/// loser and the score without tiebreak details. Unique as long as the same
/// two players do not meet twice in one tournament with the same score.
pub fn match_id(tourney_id: &str, winner_id: &str, loser_id: &str, score: &str) -> String {
    format!("{tourney_id}-{winner_id}-{loser_id}{}", normalize(score))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_id() {
        assert_eq!(
            match_id("2019-wimbledon", "djokovic", "federer", "7-6(5) 1-6 7-6(4) 4-6 13-12(3)"),
            "2019-wimbledon-djokovic-federer7-6 1-6 7-6 4-6 13-12"
        );
        assert_eq!(match_id("", "a", "b", "[10-8]"), "-a-b10-8");
    }
}
