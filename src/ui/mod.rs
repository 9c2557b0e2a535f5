//! # UI Module
//!
//! This module provides the terminal front end for folio.
//!
//! ## Components
//!
//! - [`App`] - Application state (navigator, filter, accordion, theme)
//! - [`mod@input`] - Mapping terminal events to navigator gestures
//! - [`mod@render`] - Rendering functions for drawing the TUI
//! - [`mod@effects`] - Reveal, haptic and nav indicator effects
//!
//! ## Layout
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │ name    1 About   2 Projects   3 Toolbox        │  header (desktop nav)
//! ├─────────────────────────────────────────────────┤
//! │                                                 │
//! │                 active page                     │  slides left / right
//! │                                                 │
//! ├─────────────────────────────────────────────────┤
//! ━━━━━━━━━━━━━━━━━━──────────────────────────────     scroll progress
//!      About          Projects         Toolbox         bottom nav (mobile nav)
//!    ━━━━━━━                                           nav indicator
//!  [←→] Page  [/] Filter  [t] Theme ...                footer
//! ```

pub mod app;
pub mod config;
pub mod effects;
pub mod input;
pub mod layout;
pub mod render;
pub mod theme;

pub use app::App;
pub use render::render;
