use std::hash::Hasher;
use std::io::Cursor;

use hll_murmur::{murmur128, murmur32, murmur64, murmur_bytes, murmur_str, Murmur3Hasher};
use rand::distributions::{Alphanumeric, DistString};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Hash `data` with the `murmur3` crate x86_32 implementation and seed `0`
fn reference(data: &[u8]) -> u32 {
    murmur3::murmur3_32(&mut Cursor::new(data), 0).unwrap()
}

#[test]
fn test_murmur32_matches_reference() {
    let mut rng = StdRng::seed_from_u64(101);
    for _ in 0..1000 {
        let x: u32 = rng.gen();
        assert_eq!(murmur32(x), reference(&x.to_le_bytes()), "hash mismatch on {x}");
    }
}

#[test]
fn test_murmur64_matches_reference() {
    let mut rng = StdRng::seed_from_u64(102);
    for _ in 0..1000 {
        let x: u64 = rng.gen();
        assert_eq!(murmur64(x), reference(&x.to_le_bytes()), "hash mismatch on {x}");
    }
}

#[test]
fn test_murmur128_matches_reference() {
    let mut rng = StdRng::seed_from_u64(103);
    let mut buf = [0u8; 16];
    for _ in 0..1000 {
        let (x, y): (u64, u64) = rng.gen();
        buf[..8].copy_from_slice(&x.to_le_bytes());
        buf[8..].copy_from_slice(&y.to_le_bytes());
        assert_eq!(murmur128(x, y), reference(&buf), "hash mismatch on {x},{y}");
    }
}

#[test]
fn test_murmur_str_matches_reference() {
    let mut rng = StdRng::seed_from_u64(104);
    for i in 0..1000 {
        let key = Alphanumeric.sample_string(&mut rng, i % 37);
        assert_eq!(murmur_str(&key), reference(key.as_bytes()), "hash mismatch on {key}");
        assert_eq!(murmur_bytes(key.as_bytes()), murmur_str(&key));
    }
}

#[test]
fn test_hasher_matches_reference() {
    let mut rng = StdRng::seed_from_u64(105);
    for len in 0..64 {
        let data: Vec<u8> = (0..len).map(|_| rng.gen()).collect();
        let split = rng.gen_range(0..=len);

        let mut hasher = Murmur3Hasher::default();
        hasher.write(&data[..split]);
        hasher.write(&data[split..]);
        assert_eq!(hasher.finish(), u64::from(reference(&data)), "hash mismatch on {data:?}");
    }
}
