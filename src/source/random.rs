//! # Uniform random grades.
//!
//! [`RandomGrades`] draws grades uniformly from a closed range
//! (default `1..=100`).
//!
//! - [`RandomGrades::seeded`] - reproducible sequence (tests, replays)
//! - [`RandomGrades::from_os_rng`] - seeded from the operating system

use std::ops::RangeInclusive;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::GradeSource;
use crate::Grade;
use crate::core::Config;

/// Never-ending source of uniformly distributed grades.
#[derive(Clone, Debug)]
pub struct RandomGrades {
    rng: StdRng,
    range: RangeInclusive<Grade>,
}

impl RandomGrades {
    /// Deterministic source over the default range of [`Config`].
    pub fn seeded(seed: u64) -> Self {
        Self::from_config(&Config::default(), seed)
    }

    /// Deterministic source over `cfg.grade_range()`.
    pub fn from_config(cfg: &Config, seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            range: cfg.grade_range(),
        }
    }

    /// Non-reproducible source over the default range.
    pub fn from_os_rng() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
            range: Config::default().grade_range(),
        }
    }

    /// Replaces the range; bounds are reordered if reversed.
    #[must_use]
    pub fn with_range(mut self, range: RangeInclusive<Grade>) -> Self {
        let (lo, hi) = range.into_inner();
        self.range = if lo <= hi { lo..=hi } else { hi..=lo };
        self
    }

    /// Range grades are drawn from.
    pub fn range(&self) -> &RangeInclusive<Grade> {
        &self.range
    }
}

impl GradeSource for RandomGrades {
    fn next_grade(&mut self) -> Option<Grade> {
        Some(self.rng.random_range(self.range.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grades_stay_in_default_range() {
        let mut src = RandomGrades::seeded(7);
        for _ in 0..1_000 {
            let g = src.next_grade().unwrap();
            assert!((1..=100).contains(&g), "grade {g} out of range");
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = RandomGrades::seeded(42);
        let mut b = RandomGrades::seeded(42);
        let xs: Vec<_> = (0..20).map(|_| a.next_grade()).collect();
        let ys: Vec<_> = (0..20).map(|_| b.next_grade()).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn test_reversed_range_is_reordered() {
        let mut src = RandomGrades::seeded(1).with_range(10..=5);
        assert_eq!(src.range(), &(5..=10));
        for _ in 0..100 {
            assert!((5..=10).contains(&src.next_grade().unwrap()));
        }
    }

    #[test]
    fn test_single_point_range() {
        let cfg = Config {
            grade_min: 3,
            grade_max: 3,
            ..Config::default()
        };
        let mut src = RandomGrades::from_config(&cfg, 0);
        assert_eq!(src.next_grade(), Some(3));
    }
}
