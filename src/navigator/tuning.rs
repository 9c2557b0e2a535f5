//! Thresholds and timings for gesture classification.

use super::timer::Millis;
use super::velocity::DurationRange;

/// Every knob the navigator uses. Defaults are the values the site ships with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tuning {
    /// Accumulated boundary scroll needed to change section.
    pub scroll_threshold: f64,
    /// A wheel tick later than this after the previous one starts a new gesture.
    pub fresh_gesture_gap_ms: Millis,
    /// Ticks closer than this to the previous one contribute a velocity sample.
    pub velocity_window_ms: Millis,
    /// Non-fresh ticks this soon after a transition started are momentum.
    pub momentum_window_ms: Millis,
    pub durations: DurationRange,
    /// Slack when deciding a panel is scrolled to its bottom.
    pub boundary_tolerance: f64,
    pub swipe_distance: f64,
    pub edge_swipe_distance: f64,
    /// Width of the strip along each viewport edge where edge swipes start.
    pub edge_zone: f64,
    pub swipe_duration_ms: Millis,
    pub edge_swipe_duration_ms: Millis,
    pub mobile_nav_duration_ms: Millis,
    /// Extra time after the slide before the lock is released.
    pub unlock_slack_ms: Millis,
    /// Fraction of the slide after which the reveal hook runs.
    pub reveal_fraction: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            scroll_threshold: 120.0,
            fresh_gesture_gap_ms: 100,
            velocity_window_ms: 200,
            momentum_window_ms: 800,
            durations: DurationRange::default(),
            boundary_tolerance: 2.0,
            swipe_distance: 80.0,
            edge_swipe_distance: 40.0,
            edge_zone: 30.0,
            swipe_duration_ms: 400,
            edge_swipe_duration_ms: 300,
            mobile_nav_duration_ms: 500,
            unlock_slack_ms: 50,
            reveal_fraction: 0.3,
        }
    }
}
