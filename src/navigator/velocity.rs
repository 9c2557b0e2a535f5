//! # Wheel velocity
//!
//! Recent wheel-delta magnitudes and the mapping from their mean to a slide
//! duration: faster scrolling gives a shorter slide.

use std::collections::VecDeque;

/// Samples kept for the velocity estimate.
pub const MAX_VELOCITY_SAMPLES: usize = 5;

const VELOCITY_FLOOR: f64 = 5.0;
const VELOCITY_CEIL: f64 = 80.0;

/// Bounded FIFO of wheel-delta magnitudes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VelocitySamples {
    samples: VecDeque<f64>,
}

impl VelocitySamples {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `delta`'s magnitude, evicting the oldest sample when full.
    pub fn push(&mut self, delta: f64) {
        self.samples.push_back(delta.abs());
        while self.samples.len() > MAX_VELOCITY_SAMPLES {
            self.samples.pop_front();
        }
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn mean(&self) -> Option<f64> {
        if self.samples.is_empty() {
            return None;
        }
        Some(self.samples.iter().sum::<f64>() / self.samples.len() as f64)
    }
}

/// Duration range a velocity maps onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationRange {
    pub min_ms: u64,
    pub max_ms: u64,
    /// Used when there are no samples.
    pub default_ms: u64,
}

impl Default for DurationRange {
    fn default() -> Self {
        Self {
            min_ms: 300,
            max_ms: 800,
            default_ms: 600,
        }
    }
}

/// Map the mean sample, clamped to `[5, 80]`, inversely and linearly onto
/// `[min_ms, max_ms]`, rounded to the nearest millisecond.
pub fn transition_duration(samples: &VelocitySamples, range: DurationRange) -> u64 {
    let Some(mean) = samples.mean() else {
        return range.default_ms;
    };
    let clamped = mean.clamp(VELOCITY_FLOOR, VELOCITY_CEIL);
    let span = range.max_ms as f64 - range.min_ms as f64;
    let fraction = (clamped - VELOCITY_FLOOR) / (VELOCITY_CEIL - VELOCITY_FLOOR);
    (range.max_ms as f64 - fraction * span).round().max(0.0) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples(values: &[f64]) -> VelocitySamples {
        let mut samples = VelocitySamples::new();
        for v in values {
            samples.push(*v);
        }
        samples
    }

    #[test]
    fn test_no_samples_uses_default() {
        assert_eq!(
            transition_duration(&VelocitySamples::new(), DurationRange::default()),
            600
        );
    }

    #[test]
    fn test_clamp_endpoints() {
        let range = DurationRange::default();
        assert_eq!(transition_duration(&samples(&[5.0, 5.0]), range), 800);
        assert_eq!(transition_duration(&samples(&[1.0]), range), 800);
        assert_eq!(transition_duration(&samples(&[80.0, 80.0]), range), 300);
        assert_eq!(transition_duration(&samples(&[400.0]), range), 300);
    }

    #[test]
    fn test_midpoint_and_rounding() {
        let range = DurationRange::default();
        // mean 42.5 -> halfway
        assert_eq!(transition_duration(&samples(&[42.5]), range), 550);
        // mean 40 -> 800 - 35/75 * 500 = 566.67
        assert_eq!(transition_duration(&samples(&[40.0]), range), 567);
    }

    #[test]
    fn test_bounded_fifo_eviction() {
        let s = samples(&[100.0, 1.0, 1.0, 1.0, 1.0, 1.0]);
        assert_eq!(s.len(), MAX_VELOCITY_SAMPLES);
        assert_eq!(s.mean(), Some(1.0));
    }

    #[test]
    fn test_magnitudes_are_stored() {
        let s = samples(&[-30.0, 10.0]);
        assert_eq!(s.mean(), Some(20.0));
    }
}
