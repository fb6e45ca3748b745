#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (u16, u16, f64)| {
    let (n, k, p) = input;
    match quorate_prob::evaluate(n as u64, k as u64, p) {
        Ok(availability) => {
            assert!(
                (0.0..=1.0).contains(&availability),
                "evaluate({n}, {k}, {p}) = {availability}"
            );
        }
        Err(quorate_prob::AvailabilityError::InvalidParameters { .. }) => {}
        Err(other) => panic!("unexpected error: {other}"),
    }
});
