//! ## Murmur3 hash provider
//! Implements Murmur3 x86 32-bit hash with seed `0` for integers, byte slices and strings.
//! All functions are pure, allocation-free and produce the same value as the reference
//! implementation applied to the little-endian byte encoding of the input.
//!
//! [Reference implementation](https://github.com/aappleby/smhasher/blob/master/src/MurmurHash3.cpp)

use std::hash::Hasher;

const C1: u32 = 0xcc9e_2d51;
const C2: u32 = 0x1b87_3593;

/// Scramble a single 4-byte chunk before mixing it into the hash state
#[inline]
fn scramble(k: u32) -> u32 {
    k.wrapping_mul(C1).rotate_left(15).wrapping_mul(C2)
}

/// Mix a full 4-byte little-endian chunk `k` into hash state `h`
#[inline]
fn mix_block(h: u32, k: u32) -> u32 {
    (h ^ scramble(k))
        .rotate_left(13)
        .wrapping_mul(5)
        .wrapping_add(0xe654_6b64)
}

/// Mix 1-3 trailing bytes (already packed into `k`) into hash state `h`
#[inline]
fn mix_tail(h: u32, k: u32) -> u32 {
    h ^ scramble(k)
}

/// Finalization mix forcing all bits of the hash to avalanche
#[inline]
fn fmix(mut h: u32, len: u32) -> u32 {
    h ^= len;
    h ^= h >> 16;
    h = h.wrapping_mul(0x85eb_ca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2_ae35);
    h ^= h >> 16;
    h
}

/// Pack up to 3 trailing bytes into `u32`, first byte in the lowest bits
#[inline]
fn pack_tail(tail: &[u8]) -> u32 {
    tail.iter()
        .rev()
        .fold(0, |k, &byte| (k << 8) | u32::from(byte))
}

/// Hash `u32` as its 4 little-endian bytes.
#[inline]
pub fn murmur32(x: u32) -> u32 {
    fmix(mix_block(0, x), 4)
}

/// Hash `u64` as its 8 little-endian bytes.
#[inline]
pub fn murmur64(x: u64) -> u32 {
    let h = mix_block(0, x as u32);
    let h = mix_block(h, (x >> 32) as u32);
    fmix(h, 8)
}

/// Hash pair of `u64` values as 16 little-endian bytes of `x` followed by `y`.
#[inline]
pub fn murmur128(x: u64, y: u64) -> u32 {
    let h = mix_block(0, x as u32);
    let h = mix_block(h, (x >> 32) as u32);
    let h = mix_block(h, y as u32);
    let h = mix_block(h, (y >> 32) as u32);
    fmix(h, 16)
}

/// Hash arbitrary byte slice. Empty slice hashes to `0`.
pub fn murmur_bytes(data: &[u8]) -> u32 {
    let mut chunks = data.chunks_exact(4);
    let mut h = 0;
    for chunk in &mut chunks {
        h = mix_block(h, u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]));
    }
    let tail = chunks.remainder();
    if !tail.is_empty() {
        h = mix_tail(h, pack_tail(tail));
    }
    // Reference implementation mixes in the length truncated to 32 bits
    fmix(h, data.len() as u32)
}

/// Hash UTF-8 bytes of the string, equal to `murmur_bytes(s.as_bytes())`.
#[inline]
pub fn murmur_str(s: &str) -> u32 {
    murmur_bytes(s.as_bytes())
}

/// Streaming Murmur3 x86_32 hasher with seed `0`.
///
/// Writes are buffered only up to a partial 4-byte chunk, so hashing never allocates.
/// `finish` returns the same value as `murmur_bytes` over all bytes written so far,
/// zero-extended to `u64`.
///
/// Note that `Hash` implementations may write more than the raw value (e.g. `str` appends
/// a `0xff` terminator), so `insert("a")` and `add(murmur_str("a"))` feed different hashes.
#[derive(Debug, Clone, Default)]
pub struct Murmur3Hasher {
    /// Hash state after all complete chunks
    h: u32,
    /// Bytes of incomplete chunk packed little-endian
    tail: u32,
    /// Number of bytes stored in `tail`, always in `[0..3]`
    tail_len: u32,
    /// Total number of bytes written
    len: usize,
}

impl Murmur3Hasher {
    #[inline]
    fn push_tail_byte(&mut self, byte: u8) {
        self.tail |= u32::from(byte) << (8 * self.tail_len);
        self.tail_len += 1;
        if self.tail_len == 4 {
            self.h = mix_block(self.h, self.tail);
            self.tail = 0;
            self.tail_len = 0;
        }
    }
}

impl Hasher for Murmur3Hasher {
    fn write(&mut self, bytes: &[u8]) {
        self.len = self.len.wrapping_add(bytes.len());

        let mut bytes = bytes;
        // complete pending chunk first to keep subsequent chunks aligned
        while self.tail_len > 0 && !bytes.is_empty() {
            self.push_tail_byte(bytes[0]);
            bytes = &bytes[1..];
        }

        let mut chunks = bytes.chunks_exact(4);
        for chunk in &mut chunks {
            let k = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
            self.h = mix_block(self.h, k);
        }
        for &byte in chunks.remainder() {
            self.push_tail_byte(byte);
        }
    }

    #[inline]
    fn write_u32(&mut self, i: u32) {
        self.write(&i.to_le_bytes());
    }

    #[inline]
    fn write_u64(&mut self, i: u64) {
        self.write(&i.to_le_bytes());
    }

    #[inline]
    fn write_usize(&mut self, i: usize) {
        self.write(&i.to_le_bytes());
    }

    #[inline]
    fn finish(&self) -> u64 {
        let h = if self.tail_len > 0 {
            mix_tail(self.h, self.tail)
        } else {
            self.h
        };
        u64::from(fmix(h, self.len as u32))
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(b"" => 0; "empty")]
    #[test_case(b"hello" => 613_153_351; "hello")]
    #[test_case(b"test" => 0xba6b_d213; "single block")]
    #[test_case(b"Hello, world!" => 0xc036_3e43; "one byte tail")]
    #[test_case(b"The quick brown fox jumps over the lazy dog" => 0x2e4f_f723; "three byte tail")]
    fn test_murmur_bytes(data: &[u8]) -> u32 {
        murmur_bytes(data)
    }

    #[test]
    fn test_murmur_str_matches_bytes() {
        for s in ["", "a", "ab", "abc", "hello", "héllo wörld", "日本語"] {
            assert_eq!(murmur_str(s), murmur_bytes(s.as_bytes()), "mismatch for {s:?}");
        }
        assert_eq!(murmur_str("hello"), 613_153_351);
    }

    #[test_case(0)]
    #[test_case(1)]
    #[test_case(0xdead_beef)]
    #[test_case(u32::MAX)]
    fn test_murmur32_matches_bytes(x: u32) {
        assert_eq!(murmur32(x), murmur_bytes(&x.to_le_bytes()));
    }

    #[test_case(0)]
    #[test_case(42)]
    #[test_case(0x0123_4567_89ab_cdef)]
    #[test_case(u64::MAX)]
    fn test_murmur64_matches_bytes(x: u64) {
        assert_eq!(murmur64(x), murmur_bytes(&x.to_le_bytes()));
    }

    #[test_case(0, 0)]
    #[test_case(1, 2)]
    #[test_case(0x0123_4567_89ab_cdef, 0xfedc_ba98_7654_3210)]
    fn test_murmur128_matches_bytes(x: u64, y: u64) {
        let mut buf = [0u8; 16];
        buf[..8].copy_from_slice(&x.to_le_bytes());
        buf[8..].copy_from_slice(&y.to_le_bytes());
        assert_eq!(murmur128(x, y), murmur_bytes(&buf));
    }

    #[test_case(&[]; "no writes")]
    #[test_case(&[5]; "single write")]
    #[test_case(&[1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1]; "byte by byte")]
    #[test_case(&[3, 2, 7, 1, 0, 6]; "unaligned writes")]
    #[test_case(&[4, 8, 2]; "aligned writes")]
    fn test_hasher_split_writes(splits: &[usize]) {
        let data = b"The quick brown fox jumps over the lazy dog";
        let mut hasher = Murmur3Hasher::default();
        let mut offset = 0;
        for &n in splits {
            hasher.write(&data[offset..offset + n]);
            offset += n;
        }
        assert_eq!(hasher.finish(), u64::from(murmur_bytes(&data[..offset])));
    }

    #[test]
    fn test_hasher_integer_writes_are_little_endian() {
        let mut hasher = Murmur3Hasher::default();
        hasher.write_u64(0x0123_4567_89ab_cdef);
        assert_eq!(hasher.finish(), u64::from(murmur64(0x0123_4567_89ab_cdef)));

        let mut hasher = Murmur3Hasher::default();
        hasher.write_u32(0xdead_beef);
        assert_eq!(hasher.finish(), u64::from(murmur32(0xdead_beef)));
    }
}
