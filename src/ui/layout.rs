//! Screen regions, shared by the renderer and mouse hit testing.

use crate::content::Portfolio;
use crate::navigator::{NavKind, SectionId};
use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};

/// Gap between the owner name and the first header tab.
const TAB_GAP: u16 = 3;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppLayout {
    pub header: Rect,
    /// Desktop nav: one tab per section inside the header.
    pub tabs: Vec<(SectionId, Rect)>,
    /// The page viewport, including its border.
    pub body: Rect,
    /// Where page content is drawn.
    pub body_inner: Rect,
    pub progress: Rect,
    /// Mobile nav: one item per section.
    pub bottom_nav: Vec<(SectionId, Rect)>,
    /// Row under the bottom nav holding the indicator.
    pub indicator_row: Rect,
    pub footer: Rect,
}

/// Text of a header tab.
pub fn tab_label(index: usize, title: &str) -> String {
    format!(" {} {} ", index + 1, title)
}

impl AppLayout {
    pub fn compute(area: Rect, portfolio: &Portfolio) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(3),    // Page
                Constraint::Length(1), // Scroll progress
                Constraint::Length(1), // Bottom nav
                Constraint::Length(1), // Nav indicator
                Constraint::Length(1), // Footer
            ])
            .split(area);

        let header = rows[0];
        let body = rows[1];
        let body_inner = Rect {
            x: body.x.saturating_add(1),
            y: body.y.saturating_add(1),
            width: body.width.saturating_sub(2),
            height: body.height.saturating_sub(2),
        };

        let mut tabs = Vec::with_capacity(portfolio.sections.len());
        let header_right = header.x + header.width.saturating_sub(1);
        let name_width = u16::try_from(portfolio.owner.name.chars().count()).unwrap_or(u16::MAX);
        let mut x = header
            .x
            .saturating_add(2)
            .saturating_add(name_width)
            .saturating_add(TAB_GAP);
        for (i, section) in portfolio.sections.iter().enumerate() {
            let label = tab_label(i, &section.title);
            let width = u16::try_from(label.chars().count()).unwrap_or(u16::MAX);
            if x.saturating_add(width) > header_right {
                break;
            }
            tabs.push((section.id.clone(), Rect::new(x, header.y + 1, width, 1)));
            x += width + 1;
        }

        let count = portfolio.sections.len().max(1) as u32;
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints((0..count).map(|_| Constraint::Ratio(1, count)))
            .split(rows[3]);
        let bottom_nav = portfolio
            .sections
            .iter()
            .zip(columns.iter())
            .map(|(section, rect)| (section.id.clone(), *rect))
            .collect();

        Self {
            header,
            tabs,
            body,
            body_inner,
            progress: rows[2],
            bottom_nav,
            indicator_row: rows[4],
            footer: rows[5],
        }
    }

    /// The nav button under a cell, if any.
    pub fn nav_button_at(&self, column: u16, row: u16) -> Option<(NavKind, &SectionId)> {
        let pos = Position::new(column, row);
        if let Some((id, _)) = self.tabs.iter().find(|(_, r)| r.contains(pos)) {
            return Some((NavKind::Desktop, id));
        }
        self.bottom_nav
            .iter()
            .find(|(_, r)| r.contains(pos))
            .map(|(id, _)| (NavKind::Mobile, id))
    }

    pub fn in_body(&self, column: u16, row: u16) -> bool {
        self.body.contains(Position::new(column, row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::default_portfolio;

    #[test]
    fn test_regions_stack_vertically() {
        let layout = AppLayout::compute(Rect::new(0, 0, 100, 30), &default_portfolio());
        assert_eq!(layout.header.height, 3);
        assert_eq!(layout.body.y, 3);
        assert_eq!(layout.body.height, 23);
        assert_eq!(layout.body_inner.height, 21);
        assert_eq!(layout.footer.y, 29);
        assert_eq!(layout.bottom_nav.len(), 3);
    }

    #[test]
    fn test_hit_testing() {
        let layout = AppLayout::compute(Rect::new(0, 0, 100, 30), &default_portfolio());

        let (_, tab) = &layout.tabs[1];
        let hit = layout.nav_button_at(tab.x, tab.y);
        assert_eq!(hit.map(|(k, id)| (k, id.as_str())), Some((NavKind::Desktop, "projects")));

        let (_, item) = &layout.bottom_nav[2];
        let hit = layout.nav_button_at(item.x + 1, item.y);
        assert_eq!(hit.map(|(k, id)| (k, id.as_str())), Some((NavKind::Mobile, "toolbox")));

        assert!(layout.nav_button_at(50, 10).is_none());
        assert!(layout.in_body(50, 10));
    }

    #[test]
    fn test_tabs_dropped_when_header_too_narrow() {
        let layout = AppLayout::compute(Rect::new(0, 0, 15, 30), &default_portfolio());
        assert!(layout.tabs.is_empty());
    }
}
