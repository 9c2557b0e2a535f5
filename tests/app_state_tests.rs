//! Application state tests
//!
//! Tests for application state management including the toolbox accordion,
//! filtering, theme persistence, reveal staggering and page scrolling.

use folio::content::default_portfolio;
use folio::navigator::{ManualClock, NavKind, SectionId};
use folio::ui::config::Config;
use folio::ui::layout::AppLayout;
use folio::ui::theme::ThemeMode;
use folio::ui::app::ScrollCues;
use folio::ui::App;
use ratatui::layout::Rect;
use tempfile::TempDir;

/// Helper to create a test app with a hand-driven clock
fn create_test_app() -> (App, ManualClock) {
    create_app_with(Config::default())
}

fn create_app_with(config: Config) -> (App, ManualClock) {
    let clock = ManualClock::new(1_000);
    let mut app = App::new(default_portfolio(), config, clock.clone()).unwrap();
    app.layout = AppLayout::compute(Rect::new(0, 0, 100, 30), &app.portfolio);
    (app, clock)
}

fn go_to_toolbox(app: &mut App, clock: &ManualClock) {
    assert!(app.click_nav(NavKind::Desktop, &SectionId::from("toolbox")));
    clock.advance(1_000);
    app.tick();
}

#[tokio::test]
async fn test_group_expand_collapse() {
    let (mut app, _) = create_test_app();

    assert!(!app.is_group_expanded("Languages"));
    app.toggle_group("Languages");
    app.toggle_group("Editors");
    assert!(app.is_group_expanded("Languages"));
    assert_eq!(app.expanded_groups.len(), 2);

    app.toggle_group("Languages");
    assert!(!app.is_group_expanded("Languages"));
    assert!(app.is_group_expanded("Editors"));
    assert_eq!(app.expanded_groups.len(), 1);
}

#[tokio::test]
async fn test_selection_wraps_on_toolbox() {
    let (mut app, clock) = create_test_app();
    go_to_toolbox(&mut app, &clock);

    assert_eq!(app.selected_group().unwrap().name, "Languages");
    app.previous();
    assert_eq!(app.selected_group().unwrap().name, "Editors");
    app.next();
    assert_eq!(app.selected_group().unwrap().name, "Languages");
}

#[tokio::test]
async fn test_enter_on_cards_page_does_nothing() {
    let (mut app, _) = create_test_app();
    assert!(app.visible_groups().is_empty());
    assert!(!app.activate_selected());
}

#[tokio::test]
async fn test_filter_narrows_groups() {
    let (mut app, clock) = create_test_app();
    go_to_toolbox(&mut app, &clock);

    app.enter_filter_mode();
    for c in "nix".chars() {
        app.filter_push_char(c);
    }
    let names: Vec<&str> = app.visible_groups().iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, vec!["Infrastructure"]);

    app.exit_filter_mode();
    assert_eq!(app.visible_groups().len(), 4);
}

#[tokio::test]
async fn test_paging_resets_selection() {
    let (mut app, clock) = create_test_app();
    go_to_toolbox(&mut app, &clock);
    app.next();
    app.next();
    assert_eq!(app.selected_index, 2);

    assert!(app.click_nav(NavKind::Mobile, &SectionId::from("about")));
    assert_eq!(app.selected_index, 0);
}

#[tokio::test]
async fn test_theme_toggle_persists() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("folio").join("config.json");

    let (app, _) = create_test_app();
    let mut app = app.with_config_path(config_path.clone());

    app.toggle_theme().unwrap();
    assert_eq!(app.theme.mode, ThemeMode::Light);

    let saved = Config::load_from(&config_path).unwrap();
    assert_eq!(saved.theme, Some(ThemeMode::Light));

    // A new session starts with the stored preference
    let (restored, _) = create_app_with(saved);
    assert_eq!(restored.theme.mode, ThemeMode::Light);
}

#[tokio::test]
async fn test_theme_toggle_reports_save_failure() {
    let temp_dir = TempDir::new().unwrap();
    // A directory where the file should be makes the write fail
    let config_path = temp_dir.path().to_path_buf();

    let (app, _) = create_test_app();
    let mut app = app.with_config_path(config_path);

    assert!(app.toggle_theme().is_err());
    assert_eq!(app.theme.mode, ThemeMode::Light);
}

#[tokio::test]
async fn test_reveal_staggers_incoming_items() {
    let (mut app, clock) = create_test_app();
    assert!(app.click_nav(NavKind::Desktop, &SectionId::from("projects")));

    let projects = app.portfolio.section(&SectionId::from("projects")).unwrap().clone();

    // Hidden until the reveal fires at 30% of the 600 ms slide
    clock.advance(100);
    app.tick();
    assert_eq!(app.revealed_count(&projects), 0);

    clock.advance(80);
    app.tick();
    assert_eq!(app.revealed_count(&projects), 1);

    clock.advance(80);
    assert_eq!(app.revealed_count(&projects), 2);

    clock.advance(1_000);
    app.tick();
    assert_eq!(app.revealed_count(&projects), 3);
    assert!(!app.navigator.is_transitioning());
}

#[tokio::test]
async fn test_reduced_motion_reveals_immediately() {
    let config = Config {
        reduced_motion: true,
        ..Config::default()
    };
    let (mut app, _) = create_app_with(config);
    assert!(app.click_nav(NavKind::Desktop, &SectionId::from("projects")));

    let projects = app.portfolio.section(&SectionId::from("projects")).unwrap().clone();
    assert_eq!(app.revealed_count(&projects), 3);
}

#[tokio::test]
async fn test_card_page_scrolls_by_line_and_page() {
    let (mut app, _) = create_test_app();
    let about = SectionId::from("about");

    // 60 rows of content in a 20 row viewport, 16 px per row
    app.navigator.measure_panel(&about, 960.0, 320.0);

    app.next();
    assert_eq!(app.scroll_rows(&about), 1);
    app.previous();
    assert_eq!(app.scroll_rows(&about), 0);

    app.scroll_pages(1.0);
    assert_eq!(app.scroll_rows(&about), 20);
    assert!(app.navigator.scroll_progress() > 0.0);
}

#[tokio::test]
async fn test_scroll_cues_follow_offset() {
    let (mut app, _) = create_test_app();
    let about = SectionId::from("about");

    // 60 rows of content in a 20 row viewport
    app.navigator.measure_panel(&about, 960.0, 320.0);
    assert_eq!(app.scroll_cues(&about), ScrollCues { up: false, down: true });

    // One row down is not enough hidden content for the upper cue
    app.next();
    assert_eq!(app.scroll_cues(&about), ScrollCues { up: false, down: true });

    app.scroll_pages(1.0);
    assert_eq!(app.scroll_cues(&about), ScrollCues { up: true, down: true });

    app.scroll_pages(10.0);
    assert_eq!(app.scroll_cues(&about), ScrollCues { up: true, down: false });
}

#[tokio::test]
async fn test_is_animating_follows_slide() {
    let (mut app, clock) = create_test_app();
    assert!(!app.is_animating());

    assert!(app.click_nav(NavKind::Desktop, &SectionId::from("projects")));
    assert!(app.is_animating());

    // Reveal and unlock fire, the indicator starts sliding
    clock.advance(700);
    app.tick();
    assert!(!app.navigator.is_transitioning());
    assert!(app.is_animating());

    clock.advance(5_000);
    assert!(!app.is_animating());
}

#[tokio::test]
async fn test_info_toggle() {
    let (mut app, _) = create_test_app();

    assert!(!app.show_info);
    app.toggle_info();
    assert!(app.show_info);
    app.toggle_info();
    assert!(!app.show_info);
}
