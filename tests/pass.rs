use chrono::NaiveDate;
use rustc_hash::FxHashMap;
use surface_elo::{
    check_order, prepare, EngineConfig, Match, RatingEngine, RatingRegistry, RawMatch,
    StreamError, SurfaceBucket,
};

const PLAYERS: [&str; 6] = [
    "rafael nadal-90",
    "roger federer-sw-85",
    "novak djokovic",
    "andy murray-gr-87",
    "stan wawrinka-sw-85",
    "juan martin del potro-ar-88",
];

const SCORES: [&str; 6] = [
    "6-1 7-6(5)",
    "6-4 3-6 6-4",
    "7-6(5) 6-7(3) 6-4",
    "6-4 3-6 1-6 7-6(5) 7-5",
    "6-3 2-1 RET",
    "W/O",
];

const SURFACES: [&str; 4] = ["Hard", "Clay", "Grass", "Carpet"];

/// A deterministic season: enough matches that experienced players cross the
/// activity threshold, with a long break in the middle.
fn season() -> Vec<RawMatch> {
    let start = NaiveDate::from_ymd_opt(2010, 1, 4).unwrap();
    let mut raw = Vec::new();
    for i in 0..400usize {
        let winner = PLAYERS[(i * 7 + 1) % PLAYERS.len()];
        let mut loser = PLAYERS[(i * 5 + 3) % PLAYERS.len()];
        if loser == winner {
            loser = PLAYERS[(i * 5 + 4) % PLAYERS.len()];
        }
        let gap = if i >= 250 { 120 } else { 0 };
        let day = start + chrono::Days::new((i / 2 + gap) as u64);
        raw.push(RawMatch {
            match_id: format!("m{i}"),
            winner_id: winner.to_owned(),
            loser_id: loser.to_owned(),
            score: SCORES[i % SCORES.len()].to_owned(),
            date: if i % 9 == 0 { None } else { Some(day) },
            tourney_date: Some(day),
            surface: SURFACES[(i / 10) % SURFACES.len()].to_owned(),
            tier: if i % 37 == 0 { "Exhibition" } else { "ATP 500" }.to_owned(),
            round: ["R32", "R16", "QF", "SF", "F"][i % 5].to_owned(),
        });
    }
    raw
}

fn run(matches: &[Match]) -> RatingRegistry {
    RatingEngine::run(&EngineConfig::default(), RatingRegistry::new(), matches)
        .unwrap()
        .registry
}

#[test]
fn test_replay_is_deterministic() {
    let matches = prepare(season(), None);
    let first = run(&matches);
    let second = run(&matches);

    assert_eq!(first.len(), second.len());
    for state in first.iter() {
        assert_eq!(Some(state), second.lookup(&state.id));
    }
}

#[test]
fn test_order_matters() {
    let matches = prepare(season(), None);
    let forward = run(&matches);

    // Same matches, rewritten so that the reversed sequence is chronological.
    let last = matches.last().unwrap().date;
    let first = matches.first().unwrap().date;
    let mut reversed: Vec<Match> = matches.iter().rev().cloned().collect();
    for (i, m) in reversed.iter_mut().enumerate() {
        m.date = first + chrono::Days::new(((last - matches[matches.len() - 1 - i].date).num_days()) as u64);
        m.round = "F".to_owned();
    }
    assert!(check_order(&reversed).is_ok());
    let backward = run(&reversed);

    let differs = forward.iter().any(|state| {
        let other = backward.lookup(&state.id).unwrap();
        (f64::from(state.overall.elo) - f64::from(other.overall.elo)).abs() > 1e-6
    });
    assert!(differs);
}

#[test]
fn test_registry_is_complete() {
    let matches = prepare(season(), None);
    let pass = RatingEngine::run(&EngineConfig::default(), RatingRegistry::new(), &matches).unwrap();

    let mut appearances: FxHashMap<&str, u32> = FxHashMap::default();
    let mut by_bucket: FxHashMap<(&str, SurfaceBucket), u32> = FxHashMap::default();
    for m in &matches {
        let bucket = m.surface.bucket(SurfaceBucket::Grass);
        for id in [m.winner_id.as_str(), m.loser_id.as_str()] {
            *appearances.entry(id).or_default() += 1;
            *by_bucket.entry((id, bucket)).or_default() += 1;
        }
    }

    assert_eq!(pass.registry.len(), appearances.len());
    assert_eq!(pass.log.len(), matches.len());
    for (id, count) in appearances {
        let state = pass.registry.lookup(id).unwrap();
        assert_eq!(state.overall.match_number, count, "{id}");
        for bucket in [SurfaceBucket::Hard, SurfaceBucket::Clay, SurfaceBucket::Grass] {
            assert_eq!(
                state.surface(bucket).match_number,
                by_bucket.get(&(id, bucket)).copied().unwrap_or(0),
                "{id} {bucket}"
            );
        }
    }
}

#[test]
fn test_log_follows_stream_order() {
    let matches = prepare(season(), None);
    let pass = RatingEngine::run(&EngineConfig::default(), RatingRegistry::new(), &matches).unwrap();
    for (m, record) in matches.iter().zip(&pass.log) {
        assert_eq!(m.match_id, record.match_id);
        assert!(f64::from(record.winner_elo).is_finite());
        assert!(f64::from(record.loser_elo_surface).is_finite());
    }

    let ranked = pass.registry.ranked();
    for pair in ranked.windows(2) {
        assert!(pair[0].overall.elo >= pair[1].overall.elo);
    }
}

#[test]
fn test_unsorted_stream_is_rejected() {
    let mut matches = prepare(season(), None);
    matches.reverse();
    let result = RatingEngine::run(&EngineConfig::default(), RatingRegistry::new(), &matches);
    assert!(matches!(result, Err(StreamError::OutOfOrder { .. })));
}
