//! # folio CLI Entry Point
//!
//! This is the main entry point for the folio TUI application.
//!
//! ## Overview
//!
//! folio shows a portfolio (about, projects, toolbox) as full-screen pages
//! and pages between them the way a touch site would: scroll past the end of
//! a page with the mouse wheel, drag sideways, use the arrow keys, or click
//! the header tabs and bottom nav.
//!
//! ## Usage
//!
//! ```bash
//! # Built-in content
//! folio
//!
//! # Your own content
//! folio --content ./portfolio.json
//!
//! # No animations, light theme for this session
//! folio --reduced-motion --theme light
//!
//! # Write navigator logs to a file (RUST_LOG controls the level)
//! RUST_LOG=debug folio --log-file folio.log
//!
//! # Debug mode - print sections and tuning and exit
//! folio --debug
//! ```
//!
//! ## Key Bindings
//!
//! - `q` / `Q` - Quit the application
//! - `Left` / `Right`, `h` / `l` - Previous / next page
//! - `1`-`9` - Jump to a page
//! - `j` / `Down`, `k` / `Up` - Move accordion selection or scroll
//! - `PageDown` / `Space`, `PageUp` - Scroll by a page
//! - `Enter` - Expand/collapse the selected toolbox group
//! - `/` - Filter items; `Esc` clears
//! - `t` - Toggle light/dark theme (saved)
//! - `i` - Show/hide info modal

use folio::content::{default_portfolio, Portfolio};
use folio::navigator::MonotonicClock;
use folio::ui;
use folio::ui::config::Config;
use folio::ui::theme::ThemeMode;
use folio::ui::App;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    style::Print,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::File;
use std::io;
use std::panic;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Trait for reading terminal events (allows dependency injection for testing)
trait EventReader {
    fn read_event(&mut self, timeout: Duration) -> Result<Option<Event>>;
}

/// Production event reader that uses crossterm's event polling + read
struct CrosstermEventReader;

impl EventReader for CrosstermEventReader {
    fn read_event(&mut self, timeout: Duration) -> Result<Option<Event>> {
        if event::poll(timeout).context("Failed to poll for events")? {
            Ok(Some(event::read().context("Failed to read terminal event")?))
        } else {
            Ok(None)
        }
    }
}

/// folio - a terminal portfolio with gesture-driven section paging
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "A portfolio that lives in your terminal", long_about = None)]
struct Args {
    /// Portfolio content (JSON). Built-in content is used when omitted
    #[arg(short, long, value_name = "FILE")]
    content: Option<PathBuf>,

    /// Theme for this session, without changing the saved preference
    #[arg(long, value_enum)]
    theme: Option<ThemeMode>,

    /// Show pages and items without slide or reveal animations
    #[arg(long)]
    reduced_motion: bool,

    /// Ring the terminal bell as haptic feedback
    #[arg(long)]
    bell: bool,

    /// Write logs to this file (the TUI owns the terminal)
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Print the loaded sections and navigator tuning, then exit
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse();

    // Set up panic hook to ensure terminal is restored on panic
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Try to restore terminal state
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);

        // Call the original panic hook
        original_hook(panic_info);
    }));

    // Run the application and ensure cleanup happens
    let result = run_application(args).await;

    // Restore panic hook
    let _ = panic::take_hook();

    result
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file: {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .context("Failed to initialize logging")?;
    Ok(())
}

fn load_portfolio(content: Option<&Path>) -> Result<Portfolio> {
    match content {
        Some(path) => Portfolio::load_from(path),
        None => Ok(default_portfolio()),
    }
}

async fn run_application(args: Args) -> Result<()> {
    init_logging(args.log_file.as_deref())?;

    let portfolio = load_portfolio(args.content.as_deref())?;

    let mut config = Config::load();
    config.reduced_motion |= args.reduced_motion;
    config.bell |= args.bell;

    let mut app = App::new(portfolio, config, MonotonicClock::new())?;
    match Config::config_path() {
        Ok(path) => app = app.with_config_path(path),
        Err(e) => log::warn!("Theme preference will not be saved: {e:#}"),
    }
    if let Some(mode) = args.theme {
        app.set_theme_mode(mode);
    }

    // Debug mode: print sections and exit
    if args.debug {
        print_debug(&app);
        return Ok(());
    }

    log::info!(
        "Starting with {} sections on {}",
        app.portfolio.sections.len(),
        app.navigator.current_section()
    );

    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode for terminal")?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to setup terminal")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    // Run the app and ensure cleanup happens even on error
    let mut event_reader = CrosstermEventReader;
    let run_result = run_app(&mut terminal, &mut app, &mut event_reader).await;

    // Restore terminal (always runs, even if run_app failed)
    let cleanup_result = cleanup_terminal(&mut terminal);

    // Return the first error that occurred, or Ok if both succeeded
    run_result?;
    cleanup_result?;

    Ok(())
}

fn print_debug(app: &App) {
    println!("=== Sections ===");
    for (i, section) in app.portfolio.sections.iter().enumerate() {
        println!(
            "  {}. {} ({})\n    Items: {}",
            i + 1,
            section.title,
            section.id,
            section.item_count()
        );
    }
    println!("\n=== Navigator ===");
    println!("  Start: {}", app.navigator.current_section());
    println!("  Theme: {}", app.theme.name);
    println!("  {:#?}", app.navigator.tuning());
}

/// Clean up terminal state
fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;

    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to restore terminal")?;

    terminal.show_cursor().context("Failed to show cursor")?;

    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    event_reader: &mut dyn EventReader,
) -> Result<()> {
    loop {
        // Fire due reveal/unlock tasks before drawing
        app.tick();

        if app.take_bell() {
            execute!(terminal.backend_mut(), Print('\u{7}')).context("Failed to ring bell")?;
        }

        terminal
            .draw(|f| ui::render(f, app))
            .context("Failed to draw terminal UI")?;

        // Short polls while animating so slides and reveals keep moving
        let event = event_reader.read_event(app.poll_timeout())?;

        // If no event, continue the loop (re-render for animations)
        let Some(event) = event else {
            continue;
        };

        ui::input::handle_event(app, &event);

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
