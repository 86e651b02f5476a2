use serde::{Deserialize, Serialize};

/// Source of uniform randomness for target spawning.
///
/// The combat simulation never reaches for a global RNG; callers pass one
/// in, which keeps replays deterministic and lets tests script exact draws.
pub trait SpawnRng {
    /// Uniform sample in `[0, 1)`.
    fn next_unit(&mut self) -> f32;
}

impl<R: SpawnRng + ?Sized> SpawnRng for &mut R {
    fn next_unit(&mut self) -> f32 {
        (**self).next_unit()
    }
}

/// Seeded splitmix64 generator.
///
/// Same seed, same sequence, on every platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn state(&self) -> u64 {
        self.state
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^ (z >> 31)
    }
}

impl SpawnRng for SplitMix64 {
    fn next_unit(&mut self) -> f32 {
        // Top 24 bits fill an f32 mantissa exactly, so the result stays < 1.0.
        (self.next_u64() >> 40) as f32 / (1u32 << 24) as f32
    }
}
