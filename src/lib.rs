//! folio - a terminal portfolio with gesture-driven section paging
//!
//! This library provides the section navigator state machine, the portfolio
//! content model, and the ratatui front end that drives the navigator from
//! mouse wheel, drag and keyboard input.

pub mod content;
pub mod navigator;
pub mod ui;
