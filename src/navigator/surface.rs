//! # Bound surfaces
//!
//! Plain-data model of the elements the navigator drives: the viewport that
//! receives input, the track that slides between sections, one panel per
//! section and any number of nav button sets. Renderers read these back to
//! draw the current state; nothing here knows about terminals.

use super::section::{Direction, SectionId, SectionOrder};

/// Vertical scroll state of a scrollable element.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollRegion {
    /// Current scroll offset from the top.
    pub offset: f64,
    /// Total height of the content.
    pub content_height: f64,
    /// Visible height of the element.
    pub viewport_height: f64,
}

impl ScrollRegion {
    pub fn new(content_height: f64, viewport_height: f64) -> Self {
        Self {
            offset: 0.0,
            content_height,
            viewport_height,
        }
    }

    pub fn max_offset(&self) -> f64 {
        (self.content_height - self.viewport_height).max(0.0)
    }

    pub fn at_top(&self) -> bool {
        self.offset <= 0.0
    }

    pub fn at_bottom(&self, tolerance: f64) -> bool {
        self.offset + self.viewport_height >= self.content_height - tolerance
    }

    /// Scroll by `delta`, clamped to the scrollable extent.
    pub fn scroll_by(&mut self, delta: f64) {
        self.offset = (self.offset + delta).clamp(0.0, self.max_offset());
    }

    pub fn reset(&mut self) {
        self.offset = 0.0;
    }

    /// More than `threshold` of content is hidden above.
    pub fn can_scroll_up(&self, threshold: f64) -> bool {
        self.offset > threshold
    }

    /// More than `threshold` of content is hidden below.
    pub fn can_scroll_down(&self, threshold: f64) -> bool {
        self.offset + self.viewport_height < self.content_height - threshold
    }

    /// Fraction of the extent scrolled, 0 when nothing can scroll.
    pub fn progress(&self) -> f64 {
        let max = self.max_offset();
        if max > 0.0 {
            (self.offset / max).min(1.0)
        } else {
            0.0
        }
    }

    /// Update the measured sizes, keeping the offset inside the new extent.
    pub fn resize(&mut self, content_height: f64, viewport_height: f64) {
        self.content_height = content_height;
        self.viewport_height = viewport_height;
        self.offset = self.offset.clamp(0.0, self.max_offset());
    }
}

/// The element that receives wheel and touch input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

/// The sliding container holding every panel.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Track {
    /// Section the track is positioned on.
    pub active_section: Option<SectionId>,
    /// Duration hint for the in-flight slide.
    pub transition_duration_ms: Option<u64>,
    /// Animation hint set for the duration of a slide.
    pub will_change: bool,
}

/// One section's content panel.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub section: SectionId,
    pub active: bool,
    /// Entrance tag applied when the panel slid in.
    pub entrance: Option<Direction>,
    pub scroll: ScrollRegion,
    /// Scrollable descendants that are reset along with the panel.
    pub nested: Vec<ScrollRegion>,
}

impl Panel {
    pub fn new(section: SectionId) -> Self {
        Self {
            section,
            active: false,
            entrance: None,
            scroll: ScrollRegion::default(),
            nested: Vec::new(),
        }
    }

    fn reset_scroll(&mut self) {
        self.scroll.reset();
        for region in &mut self.nested {
            region.reset();
        }
    }

    pub(crate) fn deactivate(&mut self) {
        self.active = false;
        self.entrance = None;
    }

    pub(crate) fn enter(&mut self, direction: Direction, reset_scroll: bool) {
        self.entrance = Some(direction);
        if reset_scroll {
            self.reset_scroll();
        }
        self.active = true;
    }
}

/// Where a nav button set lives; mobile buttons use a shorter slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKind {
    Desktop,
    Mobile,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NavButton {
    pub section: SectionId,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NavButtonSet {
    pub kind: NavKind,
    pub buttons: Vec<NavButton>,
}

impl NavButtonSet {
    pub fn for_order(kind: NavKind, order: &SectionOrder) -> Self {
        Self {
            kind,
            buttons: order
                .iter()
                .map(|section| NavButton {
                    section: section.clone(),
                    active: section == order.first(),
                })
                .collect(),
        }
    }

    pub(crate) fn set_active(&mut self, target: &SectionId) {
        for button in &mut self.buttons {
            button.active = &button.section == target;
        }
    }

    pub fn active_index(&self) -> Option<usize> {
        self.buttons.iter().position(|b| b.active)
    }
}

/// Everything `initialize` binds to.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Bindings {
    pub viewport: Option<Viewport>,
    pub track: Option<Track>,
    pub panels: Vec<Panel>,
    pub nav_sets: Vec<NavButtonSet>,
}

impl Bindings {
    /// A complete layout for `order`: track, one panel per section with the
    /// first one active, and a desktop plus a mobile nav set.
    pub fn for_order(order: &SectionOrder, viewport: Viewport) -> Self {
        let panels = order
            .iter()
            .map(|section| {
                let mut panel = Panel::new(section.clone());
                panel.active = section == order.first();
                panel.scroll = ScrollRegion::new(viewport.height, viewport.height);
                panel
            })
            .collect();

        Self {
            viewport: Some(viewport),
            track: Some(Track {
                active_section: Some(order.first().clone()),
                ..Track::default()
            }),
            panels,
            nav_sets: vec![
                NavButtonSet::for_order(NavKind::Desktop, order),
                NavButtonSet::for_order(NavKind::Mobile, order),
            ],
        }
    }

    pub fn panel(&self, section: &SectionId) -> Option<&Panel> {
        self.panels.iter().find(|p| &p.section == section)
    }

    pub fn panel_mut(&mut self, section: &SectionId) -> Option<&mut Panel> {
        self.panels.iter_mut().find(|p| &p.section == section)
    }
}
