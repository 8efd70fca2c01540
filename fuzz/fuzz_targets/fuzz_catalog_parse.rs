#![no_main]

use libfuzzer_sys::fuzz_target;
use medbill::core::{LineItemBuilder, compute};
use rust_decimal::Decimal;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Parse must not panic, and any parsed profile must be usable.
        if let Ok(profiles) = medbill::catalog::parse_profiles(s) {
            for profile in profiles {
                let line = LineItemBuilder::new(1, Decimal::ONE_HUNDRED)
                    .inclusive(profile)
                    .build();
                let _ = compute(&line);
            }
        }
    }
});
