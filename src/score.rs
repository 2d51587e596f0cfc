//! Parsing of per-set score strings such as `"6-3 7-6(5)"` or `"3-0 RET"`.
//!
//! Scores are always written from the point of view of the match winner.
//! Anything that is not a completed set (retirements, walkovers, garbage)
//! simply counts for neither side.

/// Matches are at most best-of-5, so later tokens are annotations.
pub const MAX_SETS: usize = 5;

/// Who took a single set.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SetResult {
    WinnerWon,
    LoserWon,
    Invalid,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct SetOutcome {
    pub winner_games: u32,
    pub loser_games: u32,
    pub result: SetResult,
}

/// Number of completed sets won by each side of a match.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct SetsWon {
    pub winner: u32,
    pub loser: u32,
}

/// Strips parenthesized tiebreak scores and match tiebreak brackets, so that
/// `"7-6(5) [10-4]"` becomes `"7-6 10-4"`.
///
/// A group only counts if it closes within the same set token. An unclosed
/// `(` is left in place and makes that token's game count unreadable.
pub fn normalize(score: &str) -> String {
    let mut normalized = String::with_capacity(score.len());
    let mut rest = score;
    while let Some(ch) = rest.chars().next() {
        if ch == '(' {
            let token_end = rest.find(char::is_whitespace).unwrap_or(rest.len());
            if let Some(close) = rest[..token_end].rfind(')') {
                rest = &rest[close + 1..];
                continue;
            }
        }
        if ch != '[' && ch != ']' {
            normalized.push(ch);
        }
        rest = &rest[ch.len_utf8()..];
    }
    normalized
}

fn games(field: Option<&str>) -> u32 {
    field.and_then(|f| f.trim().parse().ok()).unwrap_or(0)
}

fn takes_set(games: u32, opponent: u32) -> bool {
    (games > opponent.saturating_add(1) && games >= 6) || (games == 7 && opponent == 6)
}

/// Decides a single set token, e.g. `"6-4"`, `"7-6(3)"` or `"[10-8]"`.
pub fn parse_set(token: &str) -> SetOutcome {
    let token = normalize(token);
    let mut fields = token.split('-');
    let winner_games = games(fields.next());
    let loser_games = games(fields.next());

    let result = if takes_set(winner_games, loser_games) {
        SetResult::WinnerWon
    } else if takes_set(loser_games, winner_games) {
        SetResult::LoserWon
    } else {
        SetResult::Invalid
    };

    SetOutcome {
        winner_games,
        loser_games,
        result,
    }
}

/// Counts the completed sets each side won.
pub fn sets_won(score: &str) -> SetsWon {
    normalize(score)
        .split_whitespace()
        .take(MAX_SETS)
        .map(parse_set)
        .fold(SetsWon::default(), |mut sets, set| {
            match set.result {
                SetResult::WinnerWon => sets.winner += 1,
                SetResult::LoserWon => sets.loser += 1,
                SetResult::Invalid => (),
            }
            sets
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_results() {
        for (token, expected) in [
            ("6-3", SetResult::WinnerWon),
            ("0-6", SetResult::LoserWon),
            ("7-6(4)", SetResult::WinnerWon),
            ("[10-4]", SetResult::WinnerWon),
            ("18-16", SetResult::WinnerWon),
            ("6-7", SetResult::LoserWon),
            ("2-1", SetResult::Invalid),
            ("RET", SetResult::Invalid),
            ("6-5", SetResult::Invalid),
            ("7-5", SetResult::WinnerWon),
        ] {
            assert_eq!(parse_set(token).result, expected, "{token}");
        }
    }

    #[test]
    fn test_set_games() {
        let set = parse_set("7-6(5)");
        assert_eq!((set.winner_games, set.loser_games), (7, 6));
        let set = parse_set("W/O");
        assert_eq!((set.winner_games, set.loser_games), (0, 0));
    }

    #[test]
    fn test_sets_won() {
        for (score, winner, loser) in [
            ("6-3 6-4", 2, 0),
            ("6-0 0-6 7-6(1)", 2, 1),
            ("6-1 1-6 2-0 RET", 1, 1),
            ("6-0 6-0 0-6 0-6 6-4", 3, 2),
            ("W/O", 0, 0),
            ("", 0, 0),
            ("6-4 3-6 [10-5]", 2, 1),
            ("6-4 7-6(5 6-3", 3, 0),
            ("7-6(7-5) 6-3", 2, 0),
        ] {
            assert_eq!(sets_won(score), SetsWon { winner, loser }, "{score}");
        }
    }

    #[test]
    fn test_at_most_five_sets() {
        assert_eq!(
            sets_won("6-0 6-0 6-0 6-0 6-0 6-0"),
            SetsWon {
                winner: 5,
                loser: 0
            }
        );
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("7-6(5) 6-7(3) 6-4"), "7-6 6-7 6-4");
        assert_eq!(normalize("6-4 3-6 [10-5]"), "6-4 3-6 10-5");
        assert_eq!(normalize("6-4 7-6(5 6-3"), "6-4 7-6(5 6-3");
        assert_eq!(normalize("7-6(5)(3) 6-3"), "7-6 6-3");
    }
}
