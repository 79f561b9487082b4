#![no_main]

use hll_murmur::{murmur_bytes, CardinalityEstimator};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let m = 1 << (1 + data[0] % 16);
    let split_index = murmur_bytes(data) as usize % data.len();
    let (first_half, second_half) = data.split_at(split_index);

    let mut estimator1: CardinalityEstimator = CardinalityEstimator::new(m).unwrap();
    for chunk in first_half.chunks(4) {
        estimator1.add(murmur_bytes(chunk));
        assert!(estimator1.count() > 0);
    }

    let mut estimator2: CardinalityEstimator = CardinalityEstimator::new(m).unwrap();
    for chunk in second_half.chunks(4) {
        estimator2.add(murmur_bytes(chunk));
        assert!(estimator2.count() > 0);
    }

    let max_rank = 33 - estimator1.precision() as u8;
    estimator1.merge(&estimator2).unwrap();
    assert!(estimator1.registers().iter().all(|&r| r <= max_rank));

    estimator1.reset();
    assert_eq!(estimator1.count(), 0);
});
