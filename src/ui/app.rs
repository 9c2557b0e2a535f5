use crate::content::{Portfolio, Section, SectionBody, ToolGroup};
use crate::navigator::{
    Bindings, Clock, Millis, NavKey, NavKind, SectionId, SectionNavigator, Viewport, WheelOutcome,
};
use crate::ui::config::Config;
use crate::ui::effects::{self, Effects, IndicatorSlide, SharedEffects};
use crate::ui::layout::AppLayout;
use crate::ui::theme::{Theme, ThemeMode};
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;

/// Terminal size assumed before the first frame is drawn.
const INITIAL_COLUMNS: f64 = 80.0;
const INITIAL_ROWS: f64 = 24.0;

/// Event poll interval while something moves on screen (~60fps).
const FRAME_POLL: Duration = Duration::from_millis(16);
/// Event poll interval when idle.
const IDLE_POLL: Duration = Duration::from_millis(100);

/// Pixels of hidden content needed before a scroll cue shows.
pub const SCROLL_CUE_THRESHOLD: f64 = 20.0;

/// Whether a page has content hidden above or below its viewport.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollCues {
    pub up: bool,
    pub down: bool,
}

pub struct App {
    pub portfolio: Portfolio,
    pub navigator: SectionNavigator,
    pub effects: SharedEffects,
    pub theme: Theme,
    pub config: Config,
    config_path: Option<PathBuf>,
    pub layout: AppLayout,
    pub should_quit: bool,
    pub show_info: bool,
    pub filter_mode: bool,
    pub filter_query: String,
    pub selected_index: usize,
    pub expanded_groups: Vec<String>,
    pub indicator: IndicatorSlide,
}

impl App {
    pub fn new<C>(portfolio: Portfolio, config: Config, clock: C) -> Result<Self>
    where
        C: Clock + Clone + 'static,
    {
        let order = portfolio.order().context("Invalid section order")?;
        let effects = Effects::new(config.reduced_motion, config.bell).shared();
        let hooks = effects::hooks_for(&effects, clock.clone());

        let mut navigator = SectionNavigator::new(order.clone(), hooks, clock);
        let viewport = Viewport {
            width: INITIAL_COLUMNS * config.cell_width,
            height: INITIAL_ROWS * config.cell_height,
        };
        navigator.initialize(Bindings::for_order(&order, viewport));

        let theme = Theme::for_mode(config.theme_mode()).clone();

        Ok(Self {
            portfolio,
            navigator,
            effects,
            theme,
            config,
            config_path: None,
            layout: AppLayout::default(),
            should_quit: false,
            show_info: false,
            filter_mode: false,
            filter_query: String::new(),
            selected_index: 0,
            expanded_groups: Vec::new(),
            indicator: IndicatorSlide {
                from: 0,
                to: 0,
                started_at: 0,
            },
        })
    }

    /// Persist config changes (theme toggles) to `path`.
    pub fn with_config_path(mut self, path: PathBuf) -> Self {
        self.config_path = Some(path);
        self
    }

    pub fn now(&self) -> Millis {
        self.navigator.now()
    }

    pub fn current_section(&self) -> Option<&Section> {
        self.portfolio.section(self.navigator.current_section())
    }

    pub fn toggle_info(&mut self) {
        self.show_info = !self.show_info;
    }

    /// Switch between light and dark and store the preference.
    ///
    /// The theme changes even if saving fails.
    pub fn toggle_theme(&mut self) -> Result<()> {
        let mode = self.theme.mode.toggled();
        self.set_theme_mode(mode);
        self.config.theme = Some(mode);
        match &self.config_path {
            Some(path) => self.config.save_to(path),
            None => Ok(()),
        }
    }

    pub fn set_theme_mode(&mut self, mode: ThemeMode) {
        self.theme = Theme::for_mode(mode).clone();
    }

    // -- Filter field --

    pub fn enter_filter_mode(&mut self) {
        self.filter_mode = true;
        self.filter_query.clear();
        self.selected_index = 0;
    }

    /// Leave the field and drop the filter.
    pub fn exit_filter_mode(&mut self) {
        self.filter_mode = false;
        self.filter_query.clear();
        self.selected_index = 0;
    }

    /// Leave the field but keep filtering by the typed query.
    pub fn apply_filter(&mut self) {
        self.filter_mode = false;
    }

    pub fn filter_push_char(&mut self, c: char) {
        self.filter_query.push(c);
        self.selected_index = 0;
    }

    pub fn filter_pop_char(&mut self) {
        self.filter_query.pop();
        self.selected_index = 0;
    }

    /// Indices of the section's items that pass the filter.
    pub fn visible_item_indices(&self, section: &Section) -> Vec<usize> {
        section.matching_items(&self.filter_query)
    }

    // -- Toolbox accordion --

    pub fn toggle_group(&mut self, name: &str) {
        if let Some(pos) = self.expanded_groups.iter().position(|g| g == name) {
            self.expanded_groups.remove(pos);
        } else {
            self.expanded_groups.push(name.to_string());
        }
    }

    pub fn is_group_expanded(&self, name: &str) -> bool {
        self.expanded_groups.iter().any(|g| g == name)
    }

    /// Groups of the current section that pass the filter, if it is an
    /// accordion.
    pub fn visible_groups(&self) -> Vec<&ToolGroup> {
        let Some(section) = self.current_section() else {
            return Vec::new();
        };
        match &section.body {
            SectionBody::Accordion { groups } => self
                .visible_item_indices(section)
                .into_iter()
                .filter_map(|i| groups.get(i))
                .collect(),
            SectionBody::Cards { .. } => Vec::new(),
        }
    }

    pub fn selected_group(&self) -> Option<&ToolGroup> {
        self.visible_groups().get(self.selected_index).copied()
    }

    /// Toggle the selected accordion group. Returns false on card pages.
    pub fn activate_selected(&mut self) -> bool {
        let Some(name) = self.selected_group().map(|g| g.name.clone()) else {
            return false;
        };
        self.toggle_group(&name);
        true
    }

    /// Move the accordion selection down, or scroll a card page by a line.
    pub fn next(&mut self) {
        let count = self.visible_groups().len();
        if count > 0 {
            self.selected_index = (self.selected_index + 1) % count;
        } else {
            self.navigator.scroll_active_by(self.config.cell_height);
        }
    }

    /// Move the accordion selection up, or scroll a card page by a line.
    pub fn previous(&mut self) {
        let count = self.visible_groups().len();
        if count > 0 {
            if self.selected_index > 0 {
                self.selected_index -= 1;
            } else {
                self.selected_index = count - 1;
            }
        } else {
            self.navigator.scroll_active_by(-self.config.cell_height);
        }
    }

    /// Scroll the active page by `pages` viewport heights.
    pub fn scroll_pages(&mut self, pages: f64) {
        let height = self.layout.body_inner.height.saturating_sub(1).max(1);
        self.navigator
            .scroll_active_by(pages * f64::from(height) * self.config.cell_height);
    }

    // -- Gestures --

    /// Arrow key paging. Ignored while the filter field has focus.
    pub fn page(&mut self, key: NavKey) -> bool {
        let moved = self.navigator.handle_keyboard(key, self.filter_mode);
        if moved {
            self.selected_index = 0;
        }
        moved
    }

    /// One wheel notch; positive `notches` scroll down.
    pub fn wheel(&mut self, notches: f64) -> WheelOutcome {
        let now = self.now();
        let outcome = self
            .navigator
            .handle_wheel_event(notches * self.config.wheel_delta, now);
        if matches!(outcome, WheelOutcome::Transitioned(_)) {
            self.selected_index = 0;
        }
        outcome
    }

    pub fn press(&mut self, column: u16, row: u16) {
        let (x, y) = self.pointer_px(column, row);
        self.navigator.handle_touch_start(x, y);
    }

    pub fn release(&mut self, column: u16, row: u16) -> bool {
        let (x, y) = self.pointer_px(column, row);
        let moved = self.navigator.handle_touch_end(x, y);
        if moved {
            self.selected_index = 0;
        }
        moved
    }

    pub fn click_nav(&mut self, kind: NavKind, section: &SectionId) -> bool {
        let moved = self.navigator.click_nav_button(kind, section);
        if moved {
            self.selected_index = 0;
        }
        moved
    }

    /// Pixel position of a cell, relative to the page viewport.
    fn pointer_px(&self, column: u16, row: u16) -> (f64, f64) {
        let body = self.layout.body;
        let x = f64::from(column.saturating_sub(body.x)) * self.config.cell_width;
        let y = f64::from(row.saturating_sub(body.y)) * self.config.cell_height;
        (x, y)
    }

    // -- Frame loop --

    /// Run due navigator tasks and pick up effect updates.
    pub fn tick(&mut self) -> usize {
        let fired = self.navigator.tick_now();
        self.sync_indicator();
        fired
    }

    /// Start sliding the nav indicator when the navigator asked for it.
    pub fn sync_indicator(&mut self) {
        let (stale, reduced_motion) = match self.effects.lock() {
            Ok(mut fx) => (fx.take_indicator_update(), fx.reduced_motion()),
            Err(_) => return,
        };
        if !stale {
            return;
        }
        let Some(target) = self
            .navigator
            .bindings()
            .and_then(|b| b.nav_sets.iter().find(|s| s.kind == NavKind::Mobile))
            .and_then(|s| s.active_index())
        else {
            return;
        };

        let now = self.now();
        let from = if reduced_motion {
            target
        } else {
            self.indicator.position(now).round() as usize
        };
        self.indicator = IndicatorSlide {
            from,
            to: target,
            started_at: now,
        };
    }

    pub fn take_bell(&mut self) -> bool {
        self.effects.lock().is_ok_and(|mut fx| fx.take_bell())
    }

    /// Slide start time when `section` is the one coming in.
    pub fn entering_since(&self, section: &SectionId) -> Option<Millis> {
        self.navigator
            .active_transition()
            .filter(|t| &t.to == section)
            .map(|t| t.started_at)
    }

    /// How many filtered items of `section` are revealed right now.
    pub fn revealed_count(&self, section: &Section) -> usize {
        let total = self.visible_item_indices(section).len();
        let now = self.now();
        self.effects.lock().map_or(total, |fx| {
            fx.visible_items(&section.id, total, now, self.entering_since(&section.id))
        })
    }

    /// Scroll offset of a page in whole terminal rows.
    pub fn scroll_rows(&self, section: &SectionId) -> u16 {
        let offset = self
            .navigator
            .bindings()
            .and_then(|b| b.panel(section))
            .map_or(0.0, |p| p.scroll.offset);
        (offset / self.config.cell_height).round() as u16
    }

    pub fn scroll_cues(&self, section: &SectionId) -> ScrollCues {
        self.navigator
            .bindings()
            .and_then(|b| b.panel(section))
            .map_or_else(ScrollCues::default, |p| ScrollCues {
                up: p.scroll.can_scroll_up(SCROLL_CUE_THRESHOLD),
                down: p.scroll.can_scroll_down(SCROLL_CUE_THRESHOLD),
            })
    }

    /// Whether something on screen is still moving.
    pub fn is_animating(&self) -> bool {
        let now = self.now();
        if self.navigator.is_transitioning() || !self.indicator.is_settled(now) {
            return true;
        }
        let max_items = self
            .portfolio
            .sections
            .iter()
            .map(Section::item_count)
            .max()
            .unwrap_or(0);
        self.effects
            .lock()
            .is_ok_and(|fx| fx.is_animating(now, max_items))
    }

    /// How long the event loop may wait for input before the next frame.
    /// Idle waits end early when a deferred task falls due.
    pub fn poll_timeout(&self) -> Duration {
        if self.is_animating() {
            return FRAME_POLL;
        }
        match self.navigator.next_due() {
            Some(due) => Duration::from_millis(due.saturating_sub(self.now())).min(IDLE_POLL),
            None => IDLE_POLL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::default_portfolio;
    use crate::navigator::ManualClock;

    fn test_app() -> (App, ManualClock) {
        let clock = ManualClock::new(1_000);
        let app = App::new(default_portfolio(), Config::default(), clock.clone()).expect("app");
        (app, clock)
    }

    #[test]
    fn test_starts_on_first_section() {
        let (app, _) = test_app();
        assert_eq!(app.navigator.current_section().as_str(), "about");
        assert_eq!(app.theme.mode, ThemeMode::Dark);
    }

    #[test]
    fn test_indicator_follows_mobile_nav() {
        let (mut app, clock) = test_app();
        assert!(app.click_nav(NavKind::Mobile, &SectionId::from("toolbox")));
        app.sync_indicator();
        assert_eq!(app.indicator.to, 2);
        assert_eq!(app.indicator.from, 0);

        clock.advance(1_000);
        app.tick();
        assert!(app.indicator.is_settled(app.now()));
    }

    #[test]
    fn test_poll_timeout_follows_motion() {
        let (mut app, clock) = test_app();
        assert_eq!(app.poll_timeout(), IDLE_POLL);

        assert!(app.click_nav(NavKind::Desktop, &SectionId::from("projects")));
        assert_eq!(app.navigator.next_due(), Some(1_180));
        assert_eq!(app.poll_timeout(), FRAME_POLL);

        clock.advance(700);
        app.tick();
        assert_eq!(app.navigator.next_due(), None);

        // Reveal stagger and indicator slide run out
        clock.advance(5_000);
        assert_eq!(app.poll_timeout(), IDLE_POLL);
    }

    #[test]
    fn test_pointer_px_is_relative_to_body() {
        let (mut app, _) = test_app();
        app.layout.body = ratatui::layout::Rect::new(0, 3, 80, 20);
        assert_eq!(app.pointer_px(10, 5), (80.0, 32.0));
        assert_eq!(app.pointer_px(0, 0), (0.0, 0.0));
    }
}
