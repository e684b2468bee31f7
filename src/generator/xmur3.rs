// xmur3 string hash: expands a seed key into a stream of 32-bit seed words.
// Non-cryptographic. Every step is u32 wrapping arithmetic so output matches
// other clients bit for bit.

/// Stateful hash stream over one key. Each `next_u32` call further mixes
/// the internal state and returns an avalanche-mixed word.
#[derive(Debug, Clone)]
pub struct Xmur3 {
    h: u32,
}

impl Xmur3 {
    /// Hashes `key` by UTF-16 code units; the length seed is the UTF-16 length.
    pub fn new(key: &str) -> Self {
        let len = key.encode_utf16().count() as u32;
        let mut h = 1_779_033_703u32 ^ len;
        for unit in key.encode_utf16() {
            h = (h ^ u32::from(unit)).wrapping_mul(3_432_918_353);
            h = h.rotate_left(13);
        }
        Self { h }
    }

    pub fn next_u32(&mut self) -> u32 {
        let mut h = self.h;
        h = (h ^ (h >> 16)).wrapping_mul(2_246_822_507);
        h = (h ^ (h >> 13)).wrapping_mul(3_266_489_909);
        h ^= h >> 16;
        self.h = h;
        h
    }

    /// Draws four words, the seed state for one generator.
    pub fn seed_words(&mut self) -> [u32; 4] {
        [
            self.next_u32(),
            self.next_u32(),
            self.next_u32(),
            self.next_u32(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucket_key_matches_reference_words() {
        let mut h = Xmur3::new("pivotr|bucket|1700000000000");
        assert_eq!(
            h.seed_words(),
            [911_819_853, 4_279_719_244, 198_421_030, 4_128_332_218]
        );
    }

    #[test]
    fn empty_key_matches_reference_words() {
        let mut h = Xmur3::new("");
        assert_eq!(
            h.seed_words(),
            [167_010_153, 2_610_615_433, 1_495_386_444, 1_351_578_270]
        );
    }

    #[test]
    fn non_ascii_key_hashes_utf16_units() {
        let mut h = Xmur3::new("héllo");
        assert_eq!(
            h.seed_words(),
            [3_960_454_150, 3_698_224_093, 4_275_517_834, 2_124_770_583]
        );
    }

    #[test]
    fn stream_is_not_constant() {
        let mut h = Xmur3::new("pivotr|day|2023-11-15");
        let a = h.next_u32();
        let b = h.next_u32();
        assert_ne!(a, b);
    }
}
