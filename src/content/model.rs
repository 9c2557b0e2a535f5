use crate::navigator::{OrderError, SectionId, SectionOrder};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ContentError {
    #[error("content defines no sections")]
    NoSections,
    #[error("section '{0}' has an empty title")]
    EmptyTitle(SectionId),
    #[error("invalid section order: {0}")]
    Order(#[from] OrderError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Owner {
    pub name: String,
    #[serde(default)]
    pub tagline: String,
}

/// One card on the about or projects page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Card {
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub link: Option<String>,
}

/// One collapsible group in the toolbox accordion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolGroup {
    pub name: String,
    #[serde(default)]
    pub tools: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SectionBody {
    Cards { items: Vec<Card> },
    Accordion { groups: Vec<ToolGroup> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: SectionId,
    pub title: String,
    #[serde(flatten)]
    pub body: SectionBody,
}

impl Section {
    /// Number of revealable items (cards or groups).
    pub fn item_count(&self) -> usize {
        match &self.body {
            SectionBody::Cards { items } => items.len(),
            SectionBody::Accordion { groups } => groups.len(),
        }
    }

    /// Indices of items matching `query` (case-insensitive); all of them
    /// for an empty query.
    pub fn matching_items(&self, query: &str) -> Vec<usize> {
        let query = query.to_lowercase();
        let hit = |text: &str| query.is_empty() || text.to_lowercase().contains(&query);

        match &self.body {
            SectionBody::Cards { items } => items
                .iter()
                .enumerate()
                .filter(|(_, card)| {
                    hit(&card.title)
                        || hit(&card.body)
                        || card.subtitle.as_deref().is_some_and(hit)
                        || card.tags.iter().any(|t| hit(t))
                })
                .map(|(i, _)| i)
                .collect(),
            SectionBody::Accordion { groups } => groups
                .iter()
                .enumerate()
                .filter(|(_, group)| hit(&group.name) || group.tools.iter().any(|t| hit(t)))
                .map(|(i, _)| i)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Portfolio {
    pub owner: Owner,
    pub sections: Vec<Section>,
}

impl Portfolio {
    /// Load and validate content from a JSON file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read content file: {}", path.display()))?;
        let portfolio: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse content file: {}", path.display()))?;
        portfolio
            .validate()
            .with_context(|| format!("Invalid content file: {}", path.display()))?;
        Ok(portfolio)
    }

    pub fn validate(&self) -> Result<(), ContentError> {
        if self.sections.is_empty() {
            return Err(ContentError::NoSections);
        }
        if let Some(section) = self.sections.iter().find(|s| s.title.trim().is_empty()) {
            return Err(ContentError::EmptyTitle(section.id.clone()));
        }
        self.order()?;
        Ok(())
    }

    /// Paging order: sections in the order they are listed.
    pub fn order(&self) -> Result<SectionOrder, ContentError> {
        Ok(SectionOrder::new(self.sections.iter().map(|s| s.id.clone()))?)
    }

    pub fn section(&self, id: &SectionId) -> Option<&Section> {
        self.sections.iter().find(|s| &s.id == id)
    }
}
