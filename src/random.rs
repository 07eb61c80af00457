//! Seeded linear-congruential sequence used by every render pass.
//!
//! The recurrence is `state = (state * 9301 + 49297) mod 233280` and each
//! draw yields `state / 233280`. Output of the scene depends on the exact
//! values, so the arithmetic here must never change.

const MULTIPLIER: i128 = 9301;
const INCREMENT: i128 = 49297;
const MODULUS: i128 = 233280;

/// Anything the scene renderer can pull fractional draws from.
pub trait RandomSource {
    /// Advance the sequence by one draw and return the new value.
    fn next_f64(&mut self) -> f64;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}

/// Deterministic LCG with a single integer register.
///
/// Any seed is accepted, including zero and negative values. The remainder
/// truncates toward zero, so a negative register stays negative and yields
/// negative draws; callers get exactly what the recurrence produces.
///
/// ```
/// use colorcanvas::random::SeededRandom;
///
/// let mut rng = SeededRandom::new(1);
/// assert_eq!(rng.next(), 58598.0 / 233280.0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeededRandom {
    seed: i64,
    draws: u64,
}

impl SeededRandom {
    pub fn new(seed: i64) -> Self {
        Self { seed, draws: 0 }
    }

    /// Advance the register and return `state / 233280`.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> f64 {
        // Widened so the first step is total over every i64 seed; after it the
        // register is always within (-233280, 233280).
        let state = (self.seed as i128 * MULTIPLIER + INCREMENT) % MODULUS;
        self.seed = state as i64;
        self.draws += 1;
        self.seed as f64 / MODULUS as f64
    }

    /// Current register value.
    pub fn state(&self) -> i64 {
        self.seed
    }

    /// Number of draws served since creation.
    pub fn draws(&self) -> u64 {
        self.draws
    }
}

impl RandomSource for SeededRandom {
    fn next_f64(&mut self) -> f64 {
        self.next()
    }
}

impl Iterator for SeededRandom {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        Some(self.next_f64())
    }
}

/// Wraps a source and keeps every value it hands out.
#[derive(Debug, Clone)]
pub struct TracingRandom<R> {
    inner: R,
    values: Vec<f64>,
}

impl<R: RandomSource> TracingRandom<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, values: Vec::new() }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn draw_count(&self) -> usize {
        self.values.len()
    }

    pub fn into_parts(self) -> (R, Vec<f64>) {
        (self.inner, self.values)
    }
}

impl<R: RandomSource> RandomSource for TracingRandom<R> {
    fn next_f64(&mut self) -> f64 {
        let v = self.inner.next_f64();
        self.values.push(v);
        v
    }
}
