use crate::content::{Section, SectionBody};
use crate::navigator::{Direction as SlideDirection, NavKind, SectionId};
use crate::ui::app::App;
use crate::ui::layout::{tab_label, AppLayout};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, LineGauge, Paragraph, Widget, Wrap},
    Frame,
};

pub fn render(frame: &mut Frame, app: &mut App) {
    let layout = AppLayout::compute(frame.area(), &app.portfolio);
    measure_pages(app, &layout);
    app.layout = layout;

    let app = &*app;
    let theme = &app.theme;
    frame.render_widget(
        Block::default().style(Style::default().bg(theme.bg).fg(theme.fg)),
        frame.area(),
    );

    render_header(frame, app);
    render_body(frame, app);
    render_progress(frame, app);
    render_bottom_nav(frame, app);
    render_footer(frame, app);

    if app.show_info {
        render_info_modal(frame, app);
    }
}

/// Report viewport and content sizes of every page to the navigator.
fn measure_pages(app: &mut App, layout: &AppLayout) {
    let inner = layout.body_inner;
    let cell_w = app.config.cell_width;
    let cell_h = app.config.cell_height;
    let viewport_h = f64::from(inner.height) * cell_h;
    app.navigator
        .resize_viewport(f64::from(inner.width) * cell_w, viewport_h);

    let view: &App = app;
    let heights: Vec<(SectionId, usize)> = view
        .portfolio
        .sections
        .iter()
        .map(|section| {
            let shown = view.visible_item_indices(section).len();
            let lines = section_lines(view, section, shown);
            let rows = Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .line_count(inner.width);
            (section.id.clone(), rows)
        })
        .collect();

    for (id, rows) in heights {
        app.navigator
            .measure_panel(&id, rows as f64 * cell_h, viewport_h);
    }
}

fn render_header(frame: &mut Frame, app: &App) {
    let theme = &app.theme;
    let area = app.layout.header;
    let now = app.now();

    let pulsing = app
        .effects
        .lock()
        .is_ok_and(|fx| fx.pulse_at(now).is_some());
    let border_color = if pulsing { theme.secondary } else { theme.accent };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title_bottom(
            Line::from(format!(" {} ", app.portfolio.owner.tagline))
                .style(Style::default().fg(theme.fg_dim)),
        );
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let name = Paragraph::new(Line::from(Span::styled(
        format!(" {}", app.portfolio.owner.name),
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(name, inner);

    let active = active_button(app, NavKind::Desktop);
    for (i, (id, rect)) in app.layout.tabs.iter().enumerate() {
        let title = app
            .portfolio
            .section(id)
            .map_or(id.as_str(), |s| s.title.as_str());
        let style = if active.as_ref() == Some(id) {
            Style::default()
                .fg(theme.bg)
                .bg(theme.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.fg)
        };
        frame.render_widget(Paragraph::new(tab_label(i, title)).style(style), *rect);
    }
}

fn active_button(app: &App, kind: NavKind) -> Option<SectionId> {
    let set = app
        .navigator
        .bindings()?
        .nav_sets
        .iter()
        .find(|s| s.kind == kind)?;
    set.buttons
        .iter()
        .find(|b| b.active)
        .map(|b| b.section.clone())
}

fn render_body(frame: &mut Frame, app: &App) {
    let area = app.layout.body;
    let reduced_motion = app.effects.lock().is_ok_and(|fx| fx.reduced_motion());

    let sliding = app
        .navigator
        .active_transition()
        .filter(|_| !reduced_motion)
        .cloned();

    let Some(transition) = sliding else {
        if let Some(section) = app.current_section() {
            render_page(frame.buffer_mut(), area, app, section);
        }
        return;
    };

    let mut outgoing = Buffer::empty(area);
    let mut incoming = Buffer::empty(area);
    if let Some(section) = app.portfolio.section(&transition.from) {
        render_page(&mut outgoing, area, app, section);
    }
    if let Some(section) = app.portfolio.section(&transition.to) {
        render_page(&mut incoming, area, app, section);
    }

    let progress = ease_out_cubic(transition.progress(app.now()));
    let shift = (progress * f64::from(area.width)).round() as u16;
    blit_slide(
        frame.buffer_mut(),
        area,
        &outgoing,
        &incoming,
        shift,
        transition.direction,
    );
}

fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

/// Copy two side-by-side pages into `target`, the pair shifted by `shift`
/// columns. Forward slides move left, backward slides move right.
fn blit_slide(
    target: &mut Buffer,
    area: Rect,
    outgoing: &Buffer,
    incoming: &Buffer,
    shift: u16,
    direction: SlideDirection,
) {
    let width = area.width;
    let shift = shift.min(width);
    for y in area.top()..area.bottom() {
        for dx in 0..width {
            let (source, sx) = match direction {
                SlideDirection::Forward => {
                    let v = dx + shift;
                    if v < width {
                        (outgoing, v)
                    } else {
                        (incoming, v - width)
                    }
                }
                SlideDirection::Backward => {
                    if dx >= shift {
                        (outgoing, dx - shift)
                    } else {
                        (incoming, width - shift + dx)
                    }
                }
            };
            target[(area.x + dx, y)] = source[(area.x + sx, y)].clone();
        }
    }
}

fn render_page(buf: &mut Buffer, area: Rect, app: &App, section: &Section) {
    let theme = &app.theme;
    let mut block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", section.title))
        .border_style(Style::default().fg(theme.accent))
        .style(Style::default().bg(theme.bg));

    let cues = app.scroll_cues(&section.id);
    let cue = match (cues.up, cues.down) {
        (true, true) => Some(" ▲▼ "),
        (true, false) => Some(" ▲ "),
        (false, true) => Some(" ▼ "),
        (false, false) => None,
    };
    if let Some(cue) = cue {
        block = block.title_bottom(
            Line::from(Span::styled(cue, Style::default().fg(theme.secondary))).right_aligned(),
        );
    }

    let lines = section_lines(app, section, app.revealed_count(section));
    Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.scroll_rows(&section.id), 0))
        .render(area, buf);
}

/// Lines of a page, showing the first `shown` filtered items.
fn section_lines<'a>(app: &'a App, section: &'a Section, shown: usize) -> Vec<Line<'a>> {
    let theme = &app.theme;
    let items = app.visible_item_indices(section);

    if items.is_empty() && !app.filter_query.is_empty() {
        return vec![Line::from(Span::styled(
            format!("No matches for \"{}\"", app.filter_query),
            Style::default().fg(theme.fg_dim),
        ))];
    }

    let mut lines = Vec::new();
    match &section.body {
        SectionBody::Cards { items: cards } => {
            for card in items.iter().take(shown).filter_map(|&i| cards.get(i)) {
                lines.push(Line::from(Span::styled(
                    card.title.as_str(),
                    Style::default()
                        .fg(theme.accent)
                        .add_modifier(Modifier::BOLD),
                )));
                if let Some(subtitle) = &card.subtitle {
                    lines.push(Line::from(Span::styled(
                        subtitle.as_str(),
                        Style::default()
                            .fg(theme.secondary)
                            .add_modifier(Modifier::ITALIC),
                    )));
                }
                if !card.body.is_empty() {
                    lines.push(Line::from(Span::styled(
                        card.body.as_str(),
                        Style::default().fg(theme.fg),
                    )));
                }
                if !card.tags.is_empty() {
                    let tags = card
                        .tags
                        .iter()
                        .map(|t| format!("#{t}"))
                        .collect::<Vec<_>>()
                        .join(" ");
                    lines.push(Line::from(Span::styled(
                        tags,
                        Style::default().fg(theme.fg_dim),
                    )));
                }
                if let Some(link) = &card.link {
                    lines.push(Line::from(Span::styled(
                        link.as_str(),
                        Style::default()
                            .fg(theme.accent)
                            .add_modifier(Modifier::UNDERLINED),
                    )));
                }
                lines.push(Line::from(""));
            }
        }
        SectionBody::Accordion { groups } => {
            let is_current = &section.id == app.navigator.current_section();
            for (pos, group) in items
                .iter()
                .take(shown)
                .filter_map(|&i| groups.get(i))
                .enumerate()
            {
                // Matches are easier to see with every group open
                let expanded =
                    !app.filter_query.is_empty() || app.is_group_expanded(&group.name);
                let icon = if expanded { "▼" } else { "▶" };
                let style = if is_current && pos == app.selected_index {
                    Style::default()
                        .fg(theme.fg)
                        .bg(theme.selection_bg)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(theme.fg)
                };
                lines.push(Line::from(vec![
                    Span::styled(format!("{icon} {}", group.name), style),
                    Span::styled(
                        format!("  ({})", group.tools.len()),
                        Style::default().fg(theme.fg_dim),
                    ),
                ]));
                if expanded {
                    for tool in &group.tools {
                        lines.push(Line::from(Span::styled(
                            format!("    • {tool}"),
                            Style::default().fg(theme.fg),
                        )));
                    }
                }
            }
        }
    }
    lines
}

fn render_progress(frame: &mut Frame, app: &App) {
    let theme = &app.theme;
    let gauge = LineGauge::default()
        .ratio(app.navigator.scroll_progress().clamp(0.0, 1.0))
        .label("")
        .filled_style(Style::default().fg(theme.success))
        .unfilled_style(Style::default().fg(theme.selection_bg));
    frame.render_widget(gauge, app.layout.progress);
}

fn render_bottom_nav(frame: &mut Frame, app: &App) {
    let theme = &app.theme;
    let active = active_button(app, NavKind::Mobile);

    for (id, rect) in &app.layout.bottom_nav {
        let title = app
            .portfolio
            .section(id)
            .map_or(id.as_str(), |s| s.title.as_str());
        let style = if active.as_ref() == Some(id) {
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.fg_dim)
        };
        frame.render_widget(
            Paragraph::new(title).style(style).alignment(Alignment::Center),
            *rect,
        );
    }

    let row = app.layout.indicator_row;
    let count = app.layout.bottom_nav.len();
    if count == 0 || row.width == 0 {
        return;
    }
    let item_width = f64::from(row.width) / count as f64;
    let bar_width = (item_width / 2.0).max(1.0);
    let position = app.indicator.position(app.now());
    let x = row.x + (position * item_width + (item_width - bar_width) / 2.0).round() as u16;
    let width = (bar_width.round() as u16).min(row.right().saturating_sub(x));
    let bar = Rect::new(x, row.y, width, 1);
    frame.render_widget(
        Paragraph::new("━".repeat(usize::from(width))).style(Style::default().fg(theme.accent)),
        bar,
    );
}

fn render_footer(frame: &mut Frame, app: &App) {
    let theme = &app.theme;
    let line = if app.filter_mode {
        Line::from(vec![
            Span::styled("/", Style::default().fg(theme.accent)),
            Span::styled(app.filter_query.as_str(), Style::default().fg(theme.secondary)),
            Span::styled("▏", Style::default().fg(theme.accent)),
            Span::styled(
                "   [Enter] Apply  [Esc] Clear",
                Style::default().fg(theme.fg_dim),
            ),
        ])
    } else if !app.filter_query.is_empty() {
        Line::from(vec![
            Span::styled("filter: ", Style::default().fg(theme.fg_dim)),
            Span::styled(app.filter_query.as_str(), Style::default().fg(theme.secondary)),
            Span::styled(
                "   [/] Edit  [Esc] Clear  [←→] Page  [Q] Quit",
                Style::default().fg(theme.fg_dim),
            ),
        ])
    } else {
        Line::from(Span::styled(
            "[←→/hl] Page  [↑↓/jk] Move  [Enter] Toggle  [/] Filter  [t] Theme  [i] Info  [Q] Quit",
            Style::default().fg(theme.fg_dim),
        ))
    };
    frame.render_widget(Paragraph::new(line), app.layout.footer);
}

fn render_info_modal(frame: &mut Frame, app: &App) {
    let theme = &app.theme;
    let area = centered_rect(60, 60, frame.area());

    let key = |k: &'static str, what: &'static str| {
        Line::from(vec![
            Span::styled(format!("{k:<14}"), Style::default().fg(theme.accent)),
            Span::styled(what, Style::default().fg(theme.fg)),
        ])
    };

    let mut lines = vec![
        Line::from(Span::styled(
            app.portfolio.owner.name.as_str(),
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        key("wheel", "scroll; keep scrolling at an edge to page"),
        key("drag ← →", "swipe between pages"),
        key("← → / h l", "previous / next page"),
        key("1-9 / click", "jump to a page"),
        key("↑ ↓ / j k", "select group or scroll"),
        key("PgUp PgDn", "scroll by a page"),
        key("Enter", "expand or collapse a group"),
        key("/", "filter items"),
        key("t", "toggle light / dark"),
        key("q", "quit"),
        Line::from(""),
    ];
    lines.push(Line::from(Span::styled(
        format!("Theme: {}", theme.name),
        Style::default().fg(theme.fg_dim),
    )));

    let modal = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Info ")
                .border_style(Style::default().fg(theme.secondary))
                .style(Style::default().bg(theme.bg)),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(Clear, area);
    frame.render_widget(modal, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::default_portfolio;
    use crate::navigator::ManualClock;
    use crate::ui::config::Config;
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(app: &mut App) -> Buffer {
        draw_sized(app, 100, 30)
    }

    fn draw_sized(app: &mut App, width: u16, height: u16) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).expect("terminal");
        terminal.draw(|f| render(f, app)).expect("draw");
        terminal.backend().buffer().clone()
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (buf.area.left()..buf.area.right())
            .map(|x| buf[(x, y)].symbol())
            .collect()
    }

    fn buffer_text(buf: &Buffer) -> String {
        let area = buf.area;
        let mut text = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                text.push_str(buf[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_render_shows_first_page() {
        let clock = ManualClock::new(1_000);
        let mut app = App::new(default_portfolio(), Config::default(), clock).expect("app");
        let text = buffer_text(&draw(&mut app));
        assert!(text.contains("1 About"));
        assert!(text.contains("Hello"));
        assert!(app.layout.body.height > 0);
    }

    #[test]
    fn test_render_measures_pages() {
        let clock = ManualClock::new(1_000);
        let mut app = App::new(default_portfolio(), Config::default(), clock).expect("app");
        draw(&mut app);
        let viewport = app
            .navigator
            .bindings()
            .and_then(|b| b.viewport)
            .expect("viewport");
        assert_eq!(viewport.height, 21.0 * 16.0);
        assert_eq!(viewport.width, 98.0 * 8.0);
    }

    #[test]
    fn test_render_mid_slide() {
        let clock = ManualClock::new(1_000);
        let mut app =
            App::new(default_portfolio(), Config::default(), clock.clone()).expect("app");
        assert!(app.click_nav(NavKind::Desktop, &SectionId::from("projects")));
        clock.advance(300);
        let text = buffer_text(&draw(&mut app));
        assert!(text.contains("About") || text.contains("Projects"));
    }

    #[test]
    fn test_scroll_cues_on_page_border() {
        let clock = ManualClock::new(1_000);
        let mut app = App::new(default_portfolio(), Config::default(), clock).expect("app");

        // Three content rows cannot hold the about page
        let buf = draw_sized(&mut app, 100, 12);
        let border = row_text(&buf, app.layout.body.bottom() - 1);
        assert!(border.contains(" ▼ "));
        assert!(!border.contains('▲'));

        app.scroll_pages(1.0);
        let buf = draw_sized(&mut app, 100, 12);
        let border = row_text(&buf, app.layout.body.bottom() - 1);
        assert!(border.contains('▲'));
    }

    #[test]
    fn test_no_scroll_cues_when_page_fits() {
        let clock = ManualClock::new(1_000);
        let mut app = App::new(default_portfolio(), Config::default(), clock).expect("app");
        app.navigator
            .measure_panel(&SectionId::from("about"), 100.0, 336.0);
        let cues = app.scroll_cues(&SectionId::from("about"));
        assert!(!cues.up && !cues.down);
    }

    #[test]
    fn test_filter_without_matches() {
        let clock = ManualClock::new(1_000);
        let mut app = App::new(default_portfolio(), Config::default(), clock).expect("app");
        app.filter_query = "zzz".to_string();
        let text = buffer_text(&draw(&mut app));
        assert!(text.contains("No matches for \"zzz\""));
    }

    #[test]
    fn test_blit_slide_forward_halfway() {
        let area = Rect::new(0, 0, 4, 1);
        let mut outgoing = Buffer::empty(area);
        let mut incoming = Buffer::empty(area);
        outgoing.set_string(0, 0, "abcd", Style::default());
        incoming.set_string(0, 0, "wxyz", Style::default());

        let mut target = Buffer::empty(area);
        blit_slide(&mut target, area, &outgoing, &incoming, 2, SlideDirection::Forward);
        assert_eq!(buffer_text(&target), "cdwx\n");

        blit_slide(&mut target, area, &outgoing, &incoming, 1, SlideDirection::Backward);
        assert_eq!(buffer_text(&target), "zabc\n");
    }

    #[test]
    fn test_ease_out_cubic_bounds() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert!(ease_out_cubic(0.5) > 0.5);
    }
}
