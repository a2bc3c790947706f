// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Cosmetic pause between a reply arriving and it being shown

use std::time::Duration;

use rand::Rng;

/// Delay drawn uniformly from `[min, max)`. Equal bounds give a fixed delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplyDelay {
    min: Duration,
    max: Duration,
}

impl Default for ReplyDelay {
    fn default() -> Self {
        Self::new(Duration::from_millis(350), Duration::from_millis(600))
    }
}

impl ReplyDelay {
    /// Bounds are swapped if given in the wrong order.
    pub fn new(min: Duration, max: Duration) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// No delay at all
    pub fn none() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    pub fn min(&self) -> Duration {
        self.min
    }

    pub fn max(&self) -> Duration {
        self.max
    }

    pub fn is_zero(&self) -> bool {
        self.max.is_zero()
    }

    /// Draw one delay.
    pub fn sample(&self) -> Duration {
        let min_ms = self.min.as_millis() as u64;
        let max_ms = self.max.as_millis() as u64;
        if min_ms >= max_ms {
            return self.min;
        }
        let mut rng = rand::rng();
        Duration::from_millis(rng.random_range(min_ms..max_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bounds() {
        let delay = ReplyDelay::default();
        assert_eq!(delay.min(), Duration::from_millis(350));
        assert_eq!(delay.max(), Duration::from_millis(600));
    }

    #[test]
    fn test_samples_within_half_open_range() {
        let delay = ReplyDelay::default();
        for _ in 0..500 {
            let d = delay.sample();
            assert!(d >= Duration::from_millis(350));
            assert!(d < Duration::from_millis(600));
        }
    }

    #[test]
    fn test_fixed_delay() {
        let delay = ReplyDelay::new(Duration::from_millis(400), Duration::from_millis(400));
        assert_eq!(delay.sample(), Duration::from_millis(400));
    }

    #[test]
    fn test_none_is_zero() {
        let delay = ReplyDelay::none();
        assert!(delay.is_zero());
        assert_eq!(delay.sample(), Duration::ZERO);
    }

    #[test]
    fn test_swapped_bounds_are_normalised() {
        let delay = ReplyDelay::new(Duration::from_millis(600), Duration::from_millis(350));
        assert_eq!(delay.min(), Duration::from_millis(350));
        assert_eq!(delay.max(), Duration::from_millis(600));
    }
}
