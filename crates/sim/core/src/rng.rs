//! Seeded random stream for deterministic simulation runs.
//!
//! The engine owns exactly one [`SimRng`] and draws every random outcome
//! (hit, crit, partial resist, damage spread, proc chances, consumable
//! restores) from it in a fixed order. Given the same seed, the stream
//! produces the same sequence on every platform, which is what makes a run a
//! pure function of seed + configuration.
//!
//! # Determinism
//!
//! The generator is implemented here rather than borrowed from a general
//! purpose RNG crate so that recorded regression baselines never shift with a
//! dependency upgrade.

/// PCG random stream (Permuted Congruential Generator).
///
/// Uses PCG-XSH-RR, which produces 32-bit output from 64-bit state.
///
/// # Properties
///
/// - **Deterministic**: Same seed always produces the same stream
/// - **Fast**: Single multiply + xorshift + rotate per draw
/// - **Small state**: Only 64 bits
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimRng {
    state: u64,
}

impl SimRng {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    /// 2^32, used to map a `u32` draw onto `[0, 1)`.
    const U32_RANGE: f64 = 4_294_967_296.0;

    /// Creates a stream positioned at the start of `seed`'s sequence.
    pub fn seeded(seed: u64) -> Self {
        Self {
            state: mix_seed(seed),
        }
    }

    /// Rewinds the stream to the start of `seed`'s sequence.
    pub fn reseed(&mut self, seed: u64) {
        self.state = mix_seed(seed);
    }

    /// Advance the PCG state by one step.
    ///
    /// `state' = (state × multiplier + increment) mod 2^64`
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// PCG output function using XSH-RR (xorshift high, random rotate).
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }

    /// Draws the next raw 32-bit value.
    pub fn next_u32(&mut self) -> u32 {
        self.state = Self::pcg_step(self.state);
        Self::pcg_output(self.state)
    }

    /// Draws a uniform value in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / Self::U32_RANGE
    }

    /// Draws a uniform integer in `[0, bound)`. A zero bound yields 0 without
    /// consuming a draw.
    pub fn below(&mut self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        self.next_u32() % bound
    }

    /// Returns true with probability `chance` (values ≥ 1 always succeed).
    pub fn roll(&mut self, chance: f64) -> bool {
        self.next_f64() < chance
    }
}

/// Spreads a user supplied seed over the full 64-bit state.
///
/// Consecutive seeds (the engine increments the seed once per run) would
/// otherwise start neighbouring PCG sequences. The avalanche constants are
/// the SplitMix64 / Murmur3 finalizer multipliers.
pub fn mix_seed(seed: u64) -> u64 {
    let mut hash = seed.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xc4ceb9fe1a85ec53);
    hash ^= hash >> 33;
    hash
}
