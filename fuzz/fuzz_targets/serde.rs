#![no_main]

use hll_murmur::{murmur32, CardinalityEstimator};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(mut estimator) = serde_json::from_slice::<CardinalityEstimator>(data) {
        let registers_count = estimator.registers_count();
        estimator.add(murmur32(1));
        assert_eq!(estimator.registers_count(), registers_count);
        let serialized = serde_json::to_vec(&estimator).unwrap();
        let restored: CardinalityEstimator = serde_json::from_slice(&serialized).unwrap();
        assert_eq!(estimator, restored);
    }
});
