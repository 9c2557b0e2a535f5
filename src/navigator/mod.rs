//! # Section Navigator
//!
//! Pages horizontally between an ordered set of sections (e.g. about,
//! projects, toolbox) in response to wheel, touch, keyboard and nav-button
//! input.
//!
//! ## Gestures
//!
//! - **Wheel**: scrolling past the top or bottom of the active section only
//!   pages once enough sustained scroll has accumulated at that boundary. Ticks
//!   that look like the inertial tail of the previous slide are ignored.
//! - **Touch**: a dominant horizontal swipe pages to the neighbor. Swipes that
//!   start near the viewport edge need half the distance.
//! - **Keyboard**: Left/Right arrows page to the neighbor.
//! - **Buttons**: may target any section directly.
//!
//! ## Locking
//!
//! One slide at a time. While a slide is in flight every request is dropped.
//! The lock is released by a deferred task that always runs, so the host loop
//! must call [`SectionNavigator::tick`] regularly:
//!
//! ```text
//! go_to ──► lock ──► (30% of slide) reveal hook ──► (slide + 50 ms) unlock
//! ```

mod hooks;
mod pager;
mod section;
mod surface;
mod timer;
mod tuning;
mod velocity;

pub use hooks::{HapticIntensity, Hooks};
pub use pager::{
    GoToOptions, NavKey, NavigatorState, SectionNavigator, TouchStart, Transition, WheelOutcome,
};
pub use section::{Direction, OrderError, SectionId, SectionOrder};
pub use surface::{
    Bindings, NavButton, NavButtonSet, NavKind, Panel, ScrollRegion, Track, Viewport,
};
pub use timer::{Clock, ManualClock, Millis, MonotonicClock, TimerQueue};
pub use tuning::Tuning;
pub use velocity::{transition_duration, DurationRange, VelocitySamples, MAX_VELOCITY_SAMPLES};
