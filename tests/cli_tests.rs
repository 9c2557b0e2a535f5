//! Content and configuration loading tests

use folio::content::{default_portfolio, ContentError, Portfolio, SectionBody};
use folio::navigator::ManualClock;
use folio::ui::config::Config;
use folio::ui::theme::ThemeMode;
use folio::ui::App;
use std::fs;
use tempfile::TempDir;

const CONTENT: &str = r#"{
    "owner": { "name": "Grace", "tagline": "Compilers and coffee" },
    "sections": [
        { "id": "about", "title": "About", "kind": "cards",
          "items": [
            { "title": "Hi", "body": "I write compilers.", "tags": ["cobol"] },
            { "title": "Elsewhere", "link": "https://example.com" }
          ] },
        { "id": "projects", "title": "Projects", "kind": "cards", "items": [] },
        { "id": "toolbox", "title": "Toolbox", "kind": "accordion",
          "groups": [{ "name": "Languages", "tools": ["COBOL", "Rust"] }] }
    ]
}"#;

/// Test that a content file drives the section order
#[tokio::test]
async fn test_content_file_sets_order() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("portfolio.json");
    fs::write(&path, CONTENT).unwrap();

    let portfolio = Portfolio::load_from(&path).unwrap();
    assert_eq!(portfolio.owner.name, "Grace");

    let order = portfolio.order().unwrap();
    let ids: Vec<&str> = order.iter().map(|id| id.as_str()).collect();
    assert_eq!(ids, vec!["about", "projects", "toolbox"]);

    let app = App::new(portfolio, Config::default(), ManualClock::new(0)).unwrap();
    assert_eq!(app.navigator.current_section().as_str(), "about");
}

/// Test that a missing content file reports its path
#[tokio::test]
async fn test_missing_content_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nope.json");

    let err = Portfolio::load_from(&path).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("Failed to read content file"));
    assert!(msg.contains("nope.json"));
}

/// Test that duplicate section ids are rejected before the navigator sees them
#[tokio::test]
async fn test_duplicate_section_ids_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("dup.json");
    fs::write(&path, CONTENT.replace("\"projects\"", "\"about\"")).unwrap();

    let err = Portfolio::load_from(&path).unwrap_err();
    assert!(err.to_string().contains("Invalid content file"));
    assert!(matches!(
        err.downcast_ref::<ContentError>(),
        Some(ContentError::Order(_))
    ));
}

/// Test that unknown fields in content are rejected
#[tokio::test]
async fn test_unknown_card_field_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("typo.json");
    fs::write(&path, CONTENT.replace("\"tags\"", "\"tgas\"")).unwrap();

    assert!(Portfolio::load_from(&path).is_err());
}

/// Test that the built-in content is a complete three-page portfolio
#[test]
fn test_default_content_shape() {
    let portfolio = default_portfolio();
    assert!(matches!(
        portfolio.sections[2].body,
        SectionBody::Accordion { .. }
    ));
    assert!(portfolio.sections.iter().all(|s| s.item_count() > 0));
}

/// Test that config files written by one session load in the next
#[test]
fn test_config_survives_restart() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");

    let config = Config {
        theme: Some(ThemeMode::Light),
        bell: true,
        ..Config::default()
    };
    config.save_to(&path).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded.theme_mode(), ThemeMode::Light);
    assert!(loaded.bell);
}

/// Test that a corrupt config file is reported
#[test]
fn test_corrupt_config_reported() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    fs::write(&path, "theme = dark").unwrap();

    let err = Config::load_from(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config file"));
}
