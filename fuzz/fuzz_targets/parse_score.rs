#![no_main]

use libfuzzer_sys::fuzz_target;
use surface_elo::{sets_won, MAX_SETS};

fuzz_target!(|score: &str| {
    let sets = sets_won(score);
    assert!(sets.winner + sets.loser <= MAX_SETS as u32);
});
