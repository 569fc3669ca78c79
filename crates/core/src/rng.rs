//! RNG module - deterministic and entropy-backed random sources
//!
//! [`SeededRandom`] is a Mulberry32 generator: the same 32-bit seed always
//! yields the same sequence on every platform, which is what daily challenges
//! rely on to be shareable. [`EntropyRandom`] backs ordinary sessions.
//!
//! Also provides the date-to-seed hash used for daily challenges.

use chrono::Local;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Uniform random source consumed by the piece generator and level synthesis
pub trait RandomSource {
    /// Next value in `[0, 1)`
    fn next_f64(&mut self) -> f64;

    /// Integer in `[min, max]` inclusive
    fn next_int(&mut self, min: i32, max: i32) -> i32 {
        let span = (max - min + 1) as f64;
        min + (self.next_f64() * span).floor() as i32
    }

    /// Pick a random element, `None` for an empty slice
    fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T>
    where
        Self: Sized,
    {
        if items.is_empty() {
            return None;
        }
        let idx = self.next_int(0, items.len() as i32 - 1) as usize;
        items.get(idx)
    }

    /// Fisher-Yates shuffle in place
    fn shuffle<T>(&mut self, slice: &mut [T])
    where
        Self: Sized,
    {
        for i in (1..slice.len()).rev() {
            let j = self.next_int(0, i as i32) as usize;
            slice.swap(i, j);
        }
    }
}

/// Mulberry32 PRNG
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeededRandom {
    state: u32,
}

impl SeededRandom {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Generate next raw 32-bit output
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x6d2b_79f5);
        let s = self.state;
        let mut t = (s ^ (s >> 15)).wrapping_mul(1 | s);
        t = t.wrapping_add((t ^ (t >> 7)).wrapping_mul(61 | t)) ^ t;
        t ^ (t >> 14)
    }

    /// Current internal state (for resuming a sequence)
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl RandomSource for SeededRandom {
    fn next_f64(&mut self) -> f64 {
        self.next_u32() as f64 / 4_294_967_296.0
    }
}

/// OS-seeded source for non-reproducible sessions
#[derive(Debug, Clone)]
pub struct EntropyRandom(StdRng);

impl EntropyRandom {
    pub fn new() -> Self {
        Self(StdRng::from_os_rng())
    }
}

impl Default for EntropyRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for EntropyRandom {
    fn next_f64(&mut self) -> f64 {
        self.0.random::<f64>()
    }
}

/// Derive a seed from a date string (YYYY-MM-DD)
///
/// 31-multiplier string hash over UTF-16 code units with 32-bit wraparound,
/// then the absolute value. Same date, same seed, on every device.
pub fn date_seed(date: &str) -> u32 {
    let mut hash: i32 = 0;
    for unit in date.encode_utf16() {
        hash = hash
            .wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(unit as i32);
    }
    hash.unsigned_abs()
}

/// Today's local date as YYYY-MM-DD
pub fn today_string() -> String {
    Local::now().date_naive().format("%Y-%m-%d").to_string()
}
