//! # Section identifiers and ordering
//!
//! A [`SectionOrder`] is the fixed, ordered list of sections the navigator
//! pages through. Adjacency is defined purely by position in that list.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Identifier of one full-viewport section (e.g. `about`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionId(String);

impl SectionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SectionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for SectionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Which way a transition slides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards a later section (content enters from the right).
    Forward,
    /// Towards an earlier section (content enters from the left).
    Backward,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum OrderError {
    #[error("section order must contain at least one section")]
    Empty,
    #[error("section '{0}' appears more than once in the order")]
    Duplicate(SectionId),
}

/// Ordered, non-empty, duplicate-free sequence of sections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionOrder {
    ids: Vec<SectionId>,
}

impl SectionOrder {
    pub fn new<I, S>(ids: I) -> Result<Self, OrderError>
    where
        I: IntoIterator<Item = S>,
        S: Into<SectionId>,
    {
        let ids: Vec<SectionId> = ids.into_iter().map(Into::into).collect();
        if ids.is_empty() {
            return Err(OrderError::Empty);
        }
        for (i, id) in ids.iter().enumerate() {
            if ids[..i].contains(id) {
                return Err(OrderError::Duplicate(id.clone()));
            }
        }
        Ok(Self { ids })
    }

    pub fn first(&self) -> &SectionId {
        // Non-empty by construction.
        &self.ids[0]
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SectionId> {
        self.ids.iter()
    }

    pub fn index_of(&self, id: &SectionId) -> Option<usize> {
        self.ids.iter().position(|s| s == id)
    }

    pub fn contains(&self, id: &SectionId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn get(&self, index: usize) -> Option<&SectionId> {
        self.ids.get(index)
    }

    /// The neighbor of `id` in `direction`, if any.
    pub fn neighbor(&self, id: &SectionId, direction: Direction) -> Option<&SectionId> {
        let index = self.index_of(id)?;
        match direction {
            Direction::Forward => self.ids.get(index + 1),
            Direction::Backward => index.checked_sub(1).and_then(|i| self.ids.get(i)),
        }
    }

    /// Direction of travel from `from` to `to`. Equal or unknown positions
    /// count as backward, matching the "target index greater ⇒ forward" rule.
    pub fn direction(&self, from: &SectionId, to: &SectionId) -> Direction {
        match (self.index_of(from), self.index_of(to)) {
            (Some(a), Some(b)) if b > a => Direction::Forward,
            _ => Direction::Backward,
        }
    }
}
