#![no_main]

use arbitrary::{Arbitrary, Unstructured};
use chrono::{Days, NaiveDate};
use libfuzzer_sys::fuzz_target;
use surface_elo::{prepare, EngineConfig, RatingEngine, RatingRegistry, RawMatch};

#[derive(Arbitrary, Debug)]
struct ArbitraryMatch {
    winner: u8,
    loser: u8,
    score: String,
    days: u16,
    surface: u8,
    exhibition: bool,
}

const SURFACES: [&str; 5] = ["Hard", "Clay", "Grass", "Carpet", "Sand"];

impl ArbitraryMatch {
    fn into_raw(self, i: usize) -> RawMatch {
        let date = NaiveDate::from_ymd_opt(2000, 1, 1)
            .and_then(|start| start.checked_add_days(Days::new(u64::from(self.days))));
        RawMatch {
            match_id: i.to_string(),
            winner_id: (self.winner % 16).to_string(),
            loser_id: (self.loser % 16).to_string(),
            score: self.score,
            date,
            tourney_date: None,
            surface: SURFACES[usize::from(self.surface) % SURFACES.len()].to_owned(),
            tier: if self.exhibition { "Exhibition" } else { "ATP 250" }.to_owned(),
            round: "R32".to_owned(),
        }
    }
}

fn assert_finite(elo: f64) {
    assert!(elo.is_finite(), "{elo}");
}

fuzz_target!(|data: &[u8]| {
    let mut u = Unstructured::new(data);
    let Ok(matches) = Vec::<ArbitraryMatch>::arbitrary(&mut u) else {
        return;
    };
    let raw = matches
        .into_iter()
        .enumerate()
        .map(|(i, m)| m.into_raw(i))
        .collect();

    let pass = RatingEngine::run(&EngineConfig::default(), RatingRegistry::new(), &prepare(raw, None))
        .expect("prepared stream is in order");

    for state in pass.registry.iter() {
        assert_finite(f64::from(state.overall.elo));
        assert_finite(f64::from(state.surfaces.hard.elo));
        assert_finite(f64::from(state.surfaces.clay.elo));
        assert_finite(f64::from(state.surfaces.grass.elo));
    }
});
