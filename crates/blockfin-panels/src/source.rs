//! Fake data providers
//!
//! Every random draw a panel makes goes through [`DataSource`], so a test can
//! swap the entropy-backed source for a seeded or scripted one.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform values in `[0, 1)`
pub trait DataSource: Send {
    fn next_unit(&mut self) -> f64;
}

/// Thread-local entropy; the production default
#[derive(Debug, Default)]
pub struct RandomSource;

impl DataSource for RandomSource {
    fn next_unit(&mut self) -> f64 {
        rand::thread_rng().gen::<f64>()
    }
}

/// Reproducible source seeded once
pub struct SeededSource {
    rng: StdRng,
}

impl SeededSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl DataSource for SeededSource {
    fn next_unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Replays a fixed sequence, cycling when exhausted
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    values: Vec<f64>,
    cursor: usize,
}

impl ScriptedSource {
    /// Values are clamped into `[0, 1]`; an empty script yields `0.5`
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        let mut values: Vec<f64> = values
            .into()
            .into_iter()
            .map(|v| if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) })
            .collect();
        if values.is_empty() {
            values.push(0.5);
        }
        Self { values, cursor: 0 }
    }

    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }
}

impl DataSource for ScriptedSource {
    fn next_unit(&mut self) -> f64 {
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}

/// Shaped draws built on [`DataSource::next_unit`]
pub trait DataSourceExt: DataSource {
    /// Uniform in `[lo, hi]`
    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.next_unit() * (hi - lo)
    }

    /// Uniform integer in `[lo, hi]`
    fn int_range(&mut self, lo: u32, hi: u32) -> u32 {
        if hi <= lo {
            return lo;
        }
        let span = (hi - lo + 1) as f64;
        (lo + (self.next_unit() * span).floor() as u32).min(hi)
    }

    /// Percentage in `[0, 100]` with one decimal
    fn percent(&mut self) -> f64 {
        round_to(self.next_unit() * 100.0, 1)
    }

    fn chance(&mut self, probability: f64) -> bool {
        self.next_unit() < probability
    }

    /// Uniform index into a non-empty slice of length `len`
    fn index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0);
        ((self.next_unit() * len as f64).floor() as usize).min(len.saturating_sub(1))
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.index(items.len())]
    }

    /// `k` distinct indices out of `0..n`, in draw order
    fn sample_indices(&mut self, n: usize, k: usize) -> Vec<usize> {
        let mut pool: Vec<usize> = (0..n).collect();
        let mut picked = Vec::with_capacity(k.min(n));
        while picked.len() < k && !pool.is_empty() {
            let i = self.index(pool.len());
            picked.push(pool.swap_remove(i));
        }
        picked
    }
}

impl<T: DataSource + ?Sized> DataSourceExt for T {}

/// Round half away from zero to `dp` decimals
pub fn round_to(value: f64, dp: i32) -> f64 {
    let factor = 10f64.powi(dp);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_cycles_and_clamps() {
        let mut source = ScriptedSource::new(vec![0.25, 1.5, -2.0]);
        assert_eq!(source.next_unit(), 0.25);
        assert_eq!(source.next_unit(), 1.0);
        assert_eq!(source.next_unit(), 0.0);
        assert_eq!(source.next_unit(), 0.25);
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let mut a = SeededSource::new(42);
        let mut b = SeededSource::new(42);
        let xs: Vec<f64> = (0..8).map(|_| a.next_unit()).collect();
        let ys: Vec<f64> = (0..8).map(|_| b.next_unit()).collect();
        assert_eq!(xs, ys);
        assert!(xs.iter().all(|x| (0.0..1.0).contains(x)));
    }

    #[test]
    fn test_shaped_draws_stay_in_bounds() {
        let mut source = ScriptedSource::new(vec![0.0, 0.999, 1.0]);
        for _ in 0..6 {
            let v = source.int_range(3, 6);
            assert!((3..=6).contains(&v));
        }
        let mut top = ScriptedSource::constant(1.0);
        assert_eq!(top.index(4), 3);
        assert_eq!(top.percent(), 100.0);
        assert_eq!(top.int_range(1, 5), 5);
    }

    #[test]
    fn test_sample_indices_are_distinct() {
        let mut source = SeededSource::new(7);
        let mut picked = source.sample_indices(8, 5);
        assert_eq!(picked.len(), 5);
        picked.sort_unstable();
        picked.dedup();
        assert_eq!(picked.len(), 5);

        assert_eq!(source.sample_indices(3, 10).len(), 3);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(12.346, 2), 12.35);
        assert_eq!(round_to(-0.26, 1), -0.3);
    }
}
