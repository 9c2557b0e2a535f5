//! # Portfolio Content
//!
//! The text shown in each section: cards for the about and projects pages and
//! an accordion of tool groups for the toolbox.
//!
//! ## Data Format
//!
//! Content can be supplied as JSON with `--content FILE`:
//!
//! ```json
//! {
//!   "owner": { "name": "Ada", "tagline": "Systems tinkerer" },
//!   "sections": [
//!     { "id": "about", "title": "About", "kind": "cards",
//!       "items": [{ "title": "Hi", "body": "..." }] },
//!     { "id": "toolbox", "title": "Toolbox", "kind": "accordion",
//!       "groups": [{ "name": "Languages", "tools": ["Rust"] }] }
//!   ]
//! }
//! ```
//!
//! Section order in the file is the paging order.

mod defaults;
mod model;

pub use defaults::default_portfolio;
pub use model::{Card, ContentError, Owner, Portfolio, Section, SectionBody, ToolGroup};
