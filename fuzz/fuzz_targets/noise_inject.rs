#![no_main]

use libfuzzer_sys::fuzz_target;
use semdrift::noise::{hamming_distance, inject_noise};

fuzz_target!(|input: (String, u8, u64)| {
    let (text, percent, seed) = input;
    let epsilon = f64::from(percent) / 255.0;

    // Any valid level must preserve the character count
    if let Ok(noisy) = inject_noise(&text, epsilon, seed) {
        let changed = hamming_distance(&text, &noisy).unwrap();
        assert!(changed <= text.chars().count());
    }
});
