#![no_main]

use bomblab::config::generate::SLOT_LETTERS;
use bomblab::config::{BombBuilder, PhaseSelection};
use bomblab::parse::decode_line;
use bomblab::phase::Phase;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 14 {
        return;
    }
    let (header, rest) = data.split_at(14);
    let mut seed = [0u8; 8];
    seed.copy_from_slice(&header[..8]);

    let letters: String = SLOT_LETTERS
        .iter()
        .zip(&header[8..])
        .map(|(offered, &b)| char::from(offered.as_bytes()[usize::from(b) % offered.len()]))
        .collect();
    let Ok(selection) = letters.parse::<PhaseSelection>() else {
        return;
    };
    let Ok(bomb) = BombBuilder::new(u64::from_le_bytes(seed))
        .selection(selection)
        .build()
    else {
        return;
    };

    // Arbitrary lines may be rejected but must never panic.
    let line = decode_line(rest);
    for phase in &bomb.phases {
        let _ = phase.check(&line);
    }
    let _ = bomb.secret_phase().check(&line);
});
