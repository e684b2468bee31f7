// Seeded deterministic generation: string key -> xmur3 seed words -> sfc32.

mod sfc32;
mod xmur3;

pub use sfc32::Sfc32;
pub use xmur3::Xmur3;

/// Creates a generator seeded from an arbitrary string key.
pub fn rng_from_seed(key: &str) -> Sfc32 {
    Sfc32::from_words(Xmur3::new(key).seed_words())
}
