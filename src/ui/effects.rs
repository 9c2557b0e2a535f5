//! # Visual Effects
//!
//! Terminal renditions of the navigator's collaborators:
//!
//! - **Reveal**: items of a freshly entered section appear one by one,
//!   [`REVEAL_STAGGER_MS`] apart.
//! - **Haptic**: the header border pulses (and optionally the bell rings).
//! - **Nav indicator**: the underline in the bottom nav slides to the
//!   active item.
//!
//! The navigator owns its hooks, so the hooks and the renderer share an
//! [`Effects`] value behind `Arc<Mutex<..>>`.

use crate::navigator::{Clock, HapticIntensity, Hooks, Millis, SectionId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Delay between two revealed items.
pub const REVEAL_STAGGER_MS: Millis = 80;

/// Pulse length per millisecond of vibration pattern.
const PULSE_SCALE: Millis = 12;

/// How long the nav indicator takes to slide to a new item.
pub const INDICATOR_SLIDE_MS: Millis = 250;

pub type SharedEffects = Arc<Mutex<Effects>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pulse {
    pub intensity: HapticIntensity,
    pub until: Millis,
}

/// Position of the bottom-nav underline, animated between two items.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorSlide {
    pub from: usize,
    pub to: usize,
    pub started_at: Millis,
}

impl IndicatorSlide {
    /// Fractional item index at `now`.
    pub fn position(&self, now: Millis) -> f64 {
        let t = (now.saturating_sub(self.started_at) as f64 / INDICATOR_SLIDE_MS as f64).min(1.0);
        self.from as f64 + (self.to as f64 - self.from as f64) * t
    }

    pub fn is_settled(&self, now: Millis) -> bool {
        now >= self.started_at + INDICATOR_SLIDE_MS
    }
}

#[derive(Debug, Default)]
pub struct Effects {
    reduced_motion: bool,
    bell: bool,
    reveals: HashMap<SectionId, Millis>,
    pulse: Option<Pulse>,
    bell_pending: bool,
    indicator_stale: bool,
}

impl Effects {
    pub fn new(reduced_motion: bool, bell: bool) -> Self {
        Self {
            reduced_motion,
            bell,
            ..Self::default()
        }
    }

    pub fn shared(self) -> SharedEffects {
        Arc::new(Mutex::new(self))
    }

    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    pub fn record_reveal(&mut self, section: &SectionId, now: Millis) {
        self.reveals.insert(section.clone(), now);
    }

    pub fn record_haptic(&mut self, intensity: HapticIntensity, now: Millis) {
        let length: Millis = intensity.pattern_ms().iter().sum::<Millis>() * PULSE_SCALE;
        self.pulse = Some(Pulse {
            intensity,
            until: now + length,
        });
        if self.bell {
            self.bell_pending = true;
        }
    }

    pub fn mark_indicator_stale(&mut self) {
        self.indicator_stale = true;
    }

    /// The pulse in effect at `now`, if any.
    pub fn pulse_at(&self, now: Millis) -> Option<Pulse> {
        self.pulse.filter(|p| now < p.until)
    }

    /// Consume a pending bell request.
    pub fn take_bell(&mut self) -> bool {
        std::mem::take(&mut self.bell_pending)
    }

    /// Consume a pending nav indicator update.
    pub fn take_indicator_update(&mut self) -> bool {
        std::mem::take(&mut self.indicator_stale)
    }

    /// How many of a section's `total` items are shown at `now`.
    ///
    /// `entering_since` is the start of a slide currently bringing the
    /// section in; its items stay hidden until the reveal for that slide
    /// has fired. Sections that were never revealed show everything.
    pub fn visible_items(
        &self,
        section: &SectionId,
        total: usize,
        now: Millis,
        entering_since: Option<Millis>,
    ) -> usize {
        if self.reduced_motion {
            return total;
        }
        let revealed_at = self.reveals.get(section).copied();
        if let Some(started) = entering_since {
            if revealed_at.is_none_or(|at| at < started) {
                return 0;
            }
        }
        match revealed_at {
            Some(at) => {
                let steps = now.saturating_sub(at) / REVEAL_STAGGER_MS + 1;
                total.min(usize::try_from(steps).unwrap_or(usize::MAX))
            }
            None => total,
        }
    }

    /// Whether a reveal or pulse is still playing at `now`.
    pub fn is_animating(&self, now: Millis, max_items: usize) -> bool {
        if self.pulse_at(now).is_some() {
            return true;
        }
        if self.reduced_motion {
            return false;
        }
        let reveal_span = REVEAL_STAGGER_MS * max_items as Millis;
        self.reveals
            .values()
            .any(|&at| now < at.saturating_add(reveal_span))
    }
}

/// Navigator hooks that record into `effects`, stamped with `clock`.
pub fn hooks_for<C>(effects: &SharedEffects, clock: C) -> Hooks
where
    C: Clock + Clone + 'static,
{
    let reveal_fx = Arc::clone(effects);
    let reveal_clock = clock.clone();
    let haptic_fx = Arc::clone(effects);
    let indicator_fx = Arc::clone(effects);

    Hooks::none()
        .with_reveal(move |section| {
            if let Ok(mut fx) = reveal_fx.lock() {
                fx.record_reveal(section, reveal_clock.now_ms());
            }
        })
        .with_haptic(move |intensity| {
            if let Ok(mut fx) = haptic_fx.lock() {
                fx.record_haptic(intensity, clock.now_ms());
            }
        })
        .with_nav_indicator(move || {
            if let Ok(mut fx) = indicator_fx.lock() {
                fx.mark_indicator_stale();
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn about() -> SectionId {
        SectionId::from("about")
    }

    #[test]
    fn test_unrevealed_section_shows_everything() {
        let fx = Effects::new(false, false);
        assert_eq!(fx.visible_items(&about(), 3, 5_000, None), 3);
    }

    #[test]
    fn test_reveal_staggers_items() {
        let mut fx = Effects::new(false, false);
        fx.record_reveal(&about(), 1_000);
        assert_eq!(fx.visible_items(&about(), 3, 1_000, None), 1);
        assert_eq!(fx.visible_items(&about(), 3, 1_079, None), 1);
        assert_eq!(fx.visible_items(&about(), 3, 1_080, None), 2);
        assert_eq!(fx.visible_items(&about(), 3, 2_000, None), 3);
    }

    #[test]
    fn test_entering_section_hidden_until_reveal() {
        let mut fx = Effects::new(false, false);
        fx.record_reveal(&about(), 500);
        assert_eq!(fx.visible_items(&about(), 3, 1_100, Some(1_000)), 0);

        fx.record_reveal(&about(), 1_180);
        assert_eq!(fx.visible_items(&about(), 3, 1_180, Some(1_000)), 1);
    }

    #[test]
    fn test_reduced_motion_shows_everything() {
        let mut fx = Effects::new(true, false);
        fx.record_reveal(&about(), 1_000);
        assert_eq!(fx.visible_items(&about(), 3, 1_000, Some(900)), 3);
        assert!(!fx.is_animating(1_000, 3));
    }

    #[test]
    fn test_haptic_pulse_and_bell() {
        let mut fx = Effects::new(false, true);
        fx.record_haptic(HapticIntensity::Light, 1_000);
        assert!(fx.pulse_at(1_119).is_some());
        assert!(fx.pulse_at(1_120).is_none());
        assert!(fx.take_bell());
        assert!(!fx.take_bell());
    }

    #[test]
    fn test_no_bell_unless_enabled() {
        let mut fx = Effects::new(false, false);
        fx.record_haptic(HapticIntensity::Heavy, 0);
        assert!(!fx.take_bell());
    }

    #[test]
    fn test_indicator_slide_position() {
        let slide = IndicatorSlide {
            from: 0,
            to: 2,
            started_at: 1_000,
        };
        assert_eq!(slide.position(1_000), 0.0);
        assert!((slide.position(1_125) - 1.0).abs() < 1e-9);
        assert_eq!(slide.position(5_000), 2.0);
        assert!(slide.is_settled(1_250));
    }

    #[test]
    fn test_hooks_record_into_effects() {
        use crate::navigator::ManualClock;

        let clock = ManualClock::new(2_000);
        let effects = Effects::new(false, false).shared();
        let mut hooks = hooks_for(&effects, clock.clone());

        hooks.reveal(&about());
        hooks.haptic(HapticIntensity::Light);
        hooks.nav_indicator();

        let mut fx = effects.lock().expect("lock");
        assert_eq!(fx.visible_items(&about(), 5, 2_000, None), 1);
        assert!(fx.pulse_at(2_000).is_some());
        assert!(fx.take_indicator_update());
    }
}
