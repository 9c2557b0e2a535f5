use super::hooks::{HapticIntensity, Hooks};
use super::section::{Direction, SectionId, SectionOrder};
use super::surface::{Bindings, NavKind, Panel};
use super::timer::{Clock, Millis, TimerQueue};
use super::tuning::Tuning;
use super::velocity::{transition_duration, VelocitySamples};
use log::{debug, trace};

/// Options for an explicit transition request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoToOptions {
    /// Reset the incoming panel (and its nested regions) to the top.
    pub reset_scroll: bool,
    /// Derive the duration from recent wheel velocity.
    pub use_velocity: bool,
    /// Fixed duration; wins over `use_velocity`.
    pub explicit_duration_ms: Option<Millis>,
}

impl Default for GoToOptions {
    fn default() -> Self {
        Self {
            reset_scroll: true,
            use_velocity: false,
            explicit_duration_ms: None,
        }
    }
}

impl GoToOptions {
    pub fn velocity() -> Self {
        Self {
            use_velocity: true,
            ..Self::default()
        }
    }

    pub fn duration(ms: Millis) -> Self {
        Self {
            explicit_duration_ms: Some(ms),
            ..Self::default()
        }
    }
}

/// What a wheel tick did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WheelOutcome {
    /// Swallowed without any state change (unbound or mid-transition).
    Ignored,
    /// Counted towards the boundary threshold.
    Accumulated,
    /// Pushed the accumulator over the threshold and started a transition.
    Transitioned(SectionId),
    /// Boundary tick classified as inertial tail of the last transition.
    Momentum,
    /// Ordinary scrolling inside the active section.
    Scrolled,
}

/// Keys the navigator reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    ArrowLeft,
    ArrowRight,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchStart {
    pub x: f64,
    pub y: f64,
    /// Started within the edge zone of the viewport.
    pub edge: bool,
}

/// Observable navigator state.
#[derive(Debug, Clone, PartialEq)]
pub struct NavigatorState {
    pub current_section: SectionId,
    pub is_transitioning: bool,
    pub scroll_accumulator: f64,
    /// When the most recent transition started.
    pub last_transition_time: Option<Millis>,
    pub last_scroll_time: Option<Millis>,
    pub velocity_samples: VelocitySamples,
    pub touch_start: Option<TouchStart>,
}

impl NavigatorState {
    fn initial(order: &SectionOrder) -> Self {
        Self {
            current_section: order.first().clone(),
            is_transitioning: false,
            scroll_accumulator: 0.0,
            last_transition_time: None,
            last_scroll_time: None,
            velocity_samples: VelocitySamples::new(),
            touch_start: None,
        }
    }
}

/// The slide currently in flight.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub from: SectionId,
    pub to: SectionId,
    pub direction: Direction,
    pub duration_ms: Millis,
    pub started_at: Millis,
}

impl Transition {
    /// Linear progress of the slide at `now`, in `0.0..=1.0`.
    pub fn progress(&self, now: Millis) -> f64 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        (now.saturating_sub(self.started_at) as f64 / self.duration_ms as f64).min(1.0)
    }
}

#[derive(Debug)]
enum Task {
    Reveal(SectionId),
    Unlock,
}

#[derive(Debug)]
struct Scheduled {
    epoch: u64,
    due: Millis,
    task: Task,
}

/// Gesture-driven pager over an ordered set of sections.
///
/// All input goes through the `handle_*` methods and [`SectionNavigator::go_to`];
/// deferred work (reveal, lock release) runs from [`SectionNavigator::tick`].
pub struct SectionNavigator {
    order: SectionOrder,
    tuning: Tuning,
    hooks: Hooks,
    clock: Box<dyn Clock>,
    bindings: Option<Bindings>,
    state: NavigatorState,
    transition: Option<Transition>,
    timers: TimerQueue<Scheduled>,
    epoch: u64,
}

impl SectionNavigator {
    pub fn new(order: SectionOrder, hooks: Hooks, clock: impl Clock + 'static) -> Self {
        let state = NavigatorState::initial(&order);
        Self {
            order,
            tuning: Tuning::default(),
            hooks,
            clock: Box::new(clock),
            bindings: None,
            state,
            transition: None,
            timers: TimerQueue::new(),
            epoch: 0,
        }
    }

    pub fn with_tuning(mut self, tuning: Tuning) -> Self {
        self.tuning = tuning;
        self
    }

    /// Bind to a set of surfaces. Without a track there is nothing to page,
    /// so the navigator stays inert and `false` is returned.
    ///
    /// Binding again starts over: pending tasks of the previous binding are
    /// cancelled and the state returns to the first section.
    pub fn initialize(&mut self, bindings: Bindings) -> bool {
        let cancelled = self.timers.cancel_all();
        if cancelled > 0 {
            debug!("re-initializing: dropped {} pending task(s)", cancelled);
        }
        self.epoch += 1;
        self.state = NavigatorState::initial(&self.order);
        self.transition = None;

        if bindings.track.is_none() {
            debug!("no section track bound; navigator stays inert");
            self.bindings = None;
            return false;
        }

        let mut bindings = bindings;
        let current = self.state.current_section.clone();
        if let Some(track) = bindings.track.as_mut() {
            track.active_section = Some(current.clone());
            track.transition_duration_ms = None;
            track.will_change = false;
        }
        for panel in &mut bindings.panels {
            panel.active = panel.section == current;
            panel.entrance = None;
        }
        for set in &mut bindings.nav_sets {
            set.set_active(&current);
        }
        self.bindings = Some(bindings);
        true
    }

    /// Drop the bound surfaces. Pending tasks still run.
    pub fn unbind(&mut self) {
        self.bindings = None;
    }

    /// Remove one panel from the bound surfaces.
    pub fn remove_panel(&mut self, section: &SectionId) {
        if let Some(bindings) = self.bindings.as_mut() {
            bindings.panels.retain(|p| &p.section != section);
        }
    }

    pub fn is_bound(&self) -> bool {
        self.bindings.is_some()
    }

    pub fn order(&self) -> &SectionOrder {
        &self.order
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn current_section(&self) -> &SectionId {
        &self.state.current_section
    }

    pub fn is_transitioning(&self) -> bool {
        self.state.is_transitioning
    }

    pub fn state(&self) -> &NavigatorState {
        &self.state
    }

    pub fn snapshot(&self) -> NavigatorState {
        self.state.clone()
    }

    pub fn bindings(&self) -> Option<&Bindings> {
        self.bindings.as_ref()
    }

    pub fn active_transition(&self) -> Option<&Transition> {
        self.transition.as_ref()
    }

    pub fn pending_tasks(&self) -> usize {
        self.timers.len()
    }

    /// When the earliest deferred task is due.
    pub fn next_due(&self) -> Option<Millis> {
        self.timers.next_due()
    }

    pub fn now(&self) -> Millis {
        self.clock.now_ms()
    }

    /// Request a transition to `target` at the clock's current time.
    pub fn go_to(&mut self, target: &SectionId, options: GoToOptions) -> bool {
        let now = self.clock.now_ms();
        self.go_to_at(target, options, now)
    }

    /// Request a transition to any section in the order. Dropped while a
    /// transition is in flight, for the current section, for unknown
    /// sections and when unbound. Returns whether a transition started.
    pub fn go_to_at(&mut self, target: &SectionId, options: GoToOptions, now: Millis) -> bool {
        if self.bindings.is_none() {
            return false;
        }
        if target == &self.state.current_section {
            return false;
        }
        if self.state.is_transitioning {
            debug!("transition to '{}' dropped: one is in flight", target);
            return false;
        }
        if !self.order.contains(target) {
            debug!("transition to unknown section '{}' dropped", target);
            return false;
        }

        let from = self.state.current_section.clone();
        let direction = self.order.direction(&from, target);
        let duration = options.explicit_duration_ms.unwrap_or_else(|| {
            if options.use_velocity {
                transition_duration(&self.state.velocity_samples, self.tuning.durations)
            } else {
                self.tuning.durations.default_ms
            }
        });

        self.state.is_transitioning = true;
        self.state.scroll_accumulator = 0.0;

        if let Some(bindings) = self.bindings.as_mut() {
            if let Some(track) = bindings.track.as_mut() {
                track.will_change = true;
                track.transition_duration_ms = Some(duration);
                track.active_section = Some(target.clone());
            }
            for set in &mut bindings.nav_sets {
                set.set_active(target);
            }
            for panel in &mut bindings.panels {
                panel.deactivate();
            }
            if let Some(panel) = bindings.panel_mut(target) {
                panel.enter(direction, options.reset_scroll);
            }
        }

        debug!(
            "transition {} -> {} ({:?}, {} ms)",
            from, target, direction, duration
        );

        self.state.current_section = target.clone();
        self.state.velocity_samples.clear();
        self.state.last_transition_time = Some(now);
        self.transition = Some(Transition {
            from,
            to: target.clone(),
            direction,
            duration_ms: duration,
            started_at: now,
        });

        self.hooks.nav_indicator();
        self.hooks.haptic(HapticIntensity::Light);

        let reveal_at = now + (duration as f64 * self.tuning.reveal_fraction).round() as Millis;
        self.schedule(reveal_at, Task::Reveal(target.clone()));
        self.schedule(now + duration + self.tuning.unlock_slack_ms, Task::Unlock);
        true
    }

    fn schedule(&mut self, due: Millis, task: Task) {
        self.timers.schedule(
            due,
            Scheduled {
                epoch: self.epoch,
                due,
                task,
            },
        );
    }

    /// Run every deferred task due at `now`. Returns how many ran.
    pub fn tick(&mut self, now: Millis) -> usize {
        let mut fired = 0;
        while let Some(scheduled) = self.timers.pop_due(now) {
            if scheduled.epoch != self.epoch {
                continue;
            }
            fired += 1;
            match scheduled.task {
                Task::Reveal(section) => self.hooks.reveal(&section),
                Task::Unlock => self.unlock(scheduled.due),
            }
        }
        fired
    }

    pub fn tick_now(&mut self) -> usize {
        let now = self.clock.now_ms();
        self.tick(now)
    }

    fn unlock(&mut self, at: Millis) {
        self.state.is_transitioning = false;
        self.state.scroll_accumulator = 0.0;
        self.transition = None;
        if let Some(track) = self.bindings.as_mut().and_then(|b| b.track.as_mut()) {
            track.transition_duration_ms = None;
            track.will_change = false;
        }
        trace!("transition lock released at {} ms", at);
    }

    fn active_panel(&self) -> Option<&Panel> {
        self.bindings
            .as_ref()?
            .panel(&self.state.current_section)
    }

    fn accepts_pointer_input(&self) -> bool {
        self.bindings.as_ref().is_some_and(|b| b.viewport.is_some())
    }

    /// Interpret one wheel tick.
    pub fn handle_wheel_event(&mut self, delta_y: f64, now: Millis) -> WheelOutcome {
        if !self.accepts_pointer_input() || self.state.is_transitioning {
            return WheelOutcome::Ignored;
        }
        let Some(panel) = self.active_panel() else {
            return WheelOutcome::Ignored;
        };
        let at_top = panel.scroll.at_top();
        let at_bottom = panel.scroll.at_bottom(self.tuning.boundary_tolerance);

        let since_last = self
            .state
            .last_scroll_time
            .map(|t| now.saturating_sub(t));
        let fresh = since_last.is_none_or(|gap| gap > self.tuning.fresh_gesture_gap_ms);
        if fresh {
            self.state.scroll_accumulator = 0.0;
            self.state.velocity_samples.clear();
        }
        self.state.last_scroll_time = Some(now);

        if let Some(gap) = since_last {
            if gap > 0 && gap < self.tuning.velocity_window_ms {
                self.state.velocity_samples.push(delta_y);
            }
        }

        let momentum = !fresh
            && self
                .state
                .last_transition_time
                .is_some_and(|t| now.saturating_sub(t) < self.tuning.momentum_window_ms);

        let current = self.state.current_section.clone();
        let boundary_target = if delta_y > 0.0 && at_bottom {
            self.order.neighbor(&current, Direction::Forward).cloned()
        } else if delta_y < 0.0 && at_top {
            self.order.neighbor(&current, Direction::Backward).cloned()
        } else {
            None
        };

        trace!(
            "wheel {:+} at {} ms: fresh={} momentum={} top={} bottom={}",
            delta_y,
            now,
            fresh,
            momentum,
            at_top,
            at_bottom
        );

        match boundary_target {
            Some(_) if momentum => WheelOutcome::Momentum,
            Some(target) => {
                self.state.scroll_accumulator += delta_y.abs();
                if self.state.scroll_accumulator >= self.tuning.scroll_threshold
                    && self.go_to_at(&target, GoToOptions::velocity(), now)
                {
                    WheelOutcome::Transitioned(target)
                } else {
                    WheelOutcome::Accumulated
                }
            }
            None => {
                self.state.scroll_accumulator = 0.0;
                self.scroll_active_by(delta_y);
                WheelOutcome::Scrolled
            }
        }
    }

    /// Scroll the active panel without any paging decision.
    pub fn scroll_active_by(&mut self, delta: f64) {
        if self.state.is_transitioning {
            return;
        }
        let current = self.state.current_section.clone();
        if let Some(panel) = self.bindings.as_mut().and_then(|b| b.panel_mut(&current)) {
            panel.scroll.scroll_by(delta);
        }
    }

    /// Arrow keys page to the neighbor; ignored while typing into a field.
    pub fn handle_keyboard(&mut self, key: NavKey, target_is_text_input: bool) -> bool {
        if target_is_text_input || self.state.is_transitioning {
            return false;
        }
        let direction = match key {
            NavKey::ArrowRight => Direction::Forward,
            NavKey::ArrowLeft => Direction::Backward,
            NavKey::Other => return false,
        };
        let Some(target) = self
            .order
            .neighbor(&self.state.current_section, direction)
            .cloned()
        else {
            return false;
        };
        self.go_to(&target, GoToOptions::default())
    }

    pub fn handle_touch_start(&mut self, x: f64, y: f64) {
        let Some(viewport) = self.bindings.as_ref().and_then(|b| b.viewport) else {
            return;
        };
        let edge = x < self.tuning.edge_zone || x > viewport.width - self.tuning.edge_zone;
        self.state.touch_start = Some(TouchStart { x, y, edge });
    }

    /// Finish a touch; a dominant horizontal swipe pages to the neighbor.
    pub fn handle_touch_end(&mut self, x: f64, y: f64) -> bool {
        let Some(start) = self.state.touch_start.take() else {
            return false;
        };
        if !self.accepts_pointer_input() {
            return false;
        }
        let delta_x = x - start.x;
        let delta_y = y - start.y;
        let threshold = if start.edge {
            self.tuning.edge_swipe_distance
        } else {
            self.tuning.swipe_distance
        };
        if delta_x.abs() <= delta_y.abs() || delta_x.abs() <= threshold {
            return false;
        }

        let direction = if delta_x < 0.0 {
            Direction::Forward
        } else {
            Direction::Backward
        };
        let Some(target) = self
            .order
            .neighbor(&self.state.current_section, direction)
            .cloned()
        else {
            return false;
        };
        let duration = if start.edge {
            self.tuning.edge_swipe_duration_ms
        } else {
            self.tuning.swipe_duration_ms
        };
        self.go_to(&target, GoToOptions::duration(duration))
    }

    /// A nav button naming `section` was activated.
    pub fn click_nav_button(&mut self, kind: NavKind, section: &SectionId) -> bool {
        let options = match kind {
            NavKind::Desktop => GoToOptions::default(),
            NavKind::Mobile => GoToOptions::duration(self.tuning.mobile_nav_duration_ms),
        };
        self.go_to(section, options)
    }

    /// Viewport size changed.
    pub fn resize_viewport(&mut self, width: f64, height: f64) {
        if let Some(viewport) = self.bindings.as_mut().and_then(|b| b.viewport.as_mut()) {
            viewport.width = width;
            viewport.height = height;
        }
    }

    /// Report measured sizes of a panel's root scroll region.
    pub fn measure_panel(&mut self, section: &SectionId, content_height: f64, viewport_height: f64) {
        if let Some(panel) = self.bindings.as_mut().and_then(|b| b.panel_mut(section)) {
            panel.scroll.resize(content_height, viewport_height);
        }
    }

    /// How far the active panel is scrolled, `0.0..=1.0`.
    pub fn scroll_progress(&self) -> f64 {
        self.active_panel().map_or(0.0, |p| p.scroll.progress())
    }
}

impl std::fmt::Debug for SectionNavigator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SectionNavigator")
            .field("order", &self.order)
            .field("state", &self.state)
            .field("bound", &self.bindings.is_some())
            .field("pending_tasks", &self.timers.len())
            .field("hooks", &self.hooks)
            .finish()
    }
}
