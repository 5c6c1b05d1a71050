#![no_main]

use bomblab::config::BombLoader;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(yaml_str) = std::str::from_utf8(data) {
        // Anything that loads must also be solvable.
        if let Ok(loaded) = BombLoader::with_defaults().load_from_str(yaml_str) {
            for phase in &loaded.bomb.phases {
                if let Ok(answer) = phase.solve() {
                    assert!(phase.check(&answer).is_ok(), "{phase:?} rejects {answer:?}");
                }
            }
        }
    }
});
