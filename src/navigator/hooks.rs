//! # Collaborator hooks
//!
//! The navigator notifies three optional collaborators. Each one is
//! independently optional; a missing hook is simply skipped.

use super::section::SectionId;
use std::fmt;

/// Strength of a haptic pulse.
///
/// Page transitions only ask for `Light`. The other strengths are there for
/// hosts that pulse on their own events, such as a confirmed action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HapticIntensity {
    Light,
    Medium,
    Heavy,
    Success,
}

impl HapticIntensity {
    /// Vibration pattern in milliseconds (on, off, on, ...).
    pub fn pattern_ms(self) -> &'static [u64] {
        match self {
            HapticIntensity::Light => &[10],
            HapticIntensity::Medium => &[25],
            HapticIntensity::Heavy => &[50],
            HapticIntensity::Success => &[10, 50, 10],
        }
    }
}

pub type RevealHook = Box<dyn FnMut(&SectionId) + Send>;
pub type HapticHook = Box<dyn FnMut(HapticIntensity) + Send>;
pub type NavIndicatorHook = Box<dyn FnMut() + Send>;

/// Injected collaborators.
#[derive(Default)]
pub struct Hooks {
    reveal: Option<RevealHook>,
    haptic: Option<HapticHook>,
    nav_indicator: Option<NavIndicatorHook>,
}

impl Hooks {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_reveal(mut self, hook: impl FnMut(&SectionId) + Send + 'static) -> Self {
        self.reveal = Some(Box::new(hook));
        self
    }

    pub fn with_haptic(mut self, hook: impl FnMut(HapticIntensity) + Send + 'static) -> Self {
        self.haptic = Some(Box::new(hook));
        self
    }

    pub fn with_nav_indicator(mut self, hook: impl FnMut() + Send + 'static) -> Self {
        self.nav_indicator = Some(Box::new(hook));
        self
    }

    pub(crate) fn reveal(&mut self, section: &SectionId) {
        if let Some(hook) = self.reveal.as_mut() {
            hook(section);
        }
    }

    pub(crate) fn haptic(&mut self, intensity: HapticIntensity) {
        if let Some(hook) = self.haptic.as_mut() {
            hook(intensity);
        }
    }

    pub(crate) fn nav_indicator(&mut self) {
        if let Some(hook) = self.nav_indicator.as_mut() {
            hook();
        }
    }
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("reveal", &self.reveal.is_some())
            .field("haptic", &self.haptic.is_some())
            .field("nav_indicator", &self.nav_indicator.is_some())
            .finish()
    }
}
