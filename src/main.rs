//! shelf - browse a UI component catalog in the terminal
//!
//! Entry point: parses the command line, merges it with the user config,
//! loads the catalog and runs the Component Architecture event loop.

mod action;
mod app;
mod component;
mod components;
mod config;
mod logging;
mod model;
mod services;
mod tui;

use crate::action::Action;
use crate::app::App;
use crate::component::Component;
use crate::config::Config;
use crate::model::{Catalog, PackageManager};
use crate::services::{builtin_catalog, load_catalog};
use crate::tui::Tui;
use anyhow::Result;
use clap::Parser;
use crossterm::event::Event;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(name = "shelf", version, about = "Browse a UI component catalog in the terminal")]
struct Cli {
    /// Catalog file (JSON or YAML); the built-in catalog is used when omitted
    catalog: Option<PathBuf>,

    /// Package manager install commands are shown for
    #[arg(short, long)]
    package_manager: Option<PackageManager>,

    /// Terminal width below which the preview opens as a bottom drawer
    #[arg(short, long, value_name = "COLS")]
    breakpoint: Option<u16>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Without a log file the app still runs
    let _ = logging::init();

    let mut config = Config::load();
    if let Some(pm) = cli.package_manager {
        config.package_manager = pm;
    }
    if let Some(breakpoint) = cli.breakpoint {
        config.narrow_breakpoint = breakpoint;
    }

    let (catalog, load_error) = open_catalog(cli.catalog.or_else(|| config.catalog_path.clone()));

    // Setup terminal
    let mut tui = Tui::new()?.with_tick_rate(Duration::from_millis(config.tick_rate_ms));
    tui.enter()?;

    let mut app = App::new(catalog, config);
    app.error = load_error;
    app.init()?;
    let size = tui.size()?;
    app.update(Action::Resize(size.width, size.height))?;

    let result = run_app(&mut tui, &mut app);

    // Cleanup terminal
    tui.exit()?;

    if let Err(err) = result {
        tracing::error!("Exiting after error: {:?}", err);
        eprintln!("Error: {:?}", err);
        std::process::exit(1);
    }

    Ok(())
}

/// Load the requested catalog, falling back to the built-in one
fn open_catalog(path: Option<PathBuf>) -> (Catalog, Option<String>) {
    let Some(path) = path else {
        return (builtin_catalog(), None);
    };

    match load_catalog(&path) {
        Ok(catalog) => (catalog, None),
        Err(e) => {
            tracing::error!("{}", e);
            (
                builtin_catalog(),
                Some(format!("{}. Showing the built-in catalog.", e)),
            )
        }
    }
}

/// Run the main application loop
fn run_app(tui: &mut Tui, app: &mut App) -> Result<()> {
    while !app.should_quit {
        tui.draw(|frame| {
            if let Err(e) = app.draw(frame, frame.area()) {
                tracing::error!("Draw error: {}", e);
            }
        })?;

        if let Some(event) = tui.next_event()? {
            let action = match event {
                Event::Key(key) => app.handle_key_event(key)?,
                Event::Resize(w, h) => Some(Action::Resize(w, h)),
                _ => None,
            };

            // Action might produce a follow-up action
            let mut current_action = action;
            while let Some(a) = current_action {
                tracing::trace!("Action: {}", a);
                current_action = app.update(a)?;
            }
        } else {
            // No event - tick drives loading, animations and copy acknowledgements
            let mut current_action = Some(Action::Tick);
            while let Some(a) = current_action {
                current_action = app.update(a)?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_cli_flags() {
        let cli = Cli::parse_from(["shelf", "catalog.yaml", "-p", "bun", "--breakpoint", "80"]);
        assert_eq!(cli.catalog, Some(PathBuf::from("catalog.yaml")));
        assert_eq!(cli.package_manager, Some(PackageManager::Bun));
        assert_eq!(cli.breakpoint, Some(80));
    }

    #[test]
    fn test_unreadable_catalog_falls_back_to_builtin() {
        let dir = TempDir::new().unwrap();
        let (catalog, error) = open_catalog(Some(dir.path().join("missing.json")));

        assert_eq!(catalog.items.len(), builtin_catalog().items.len());
        assert!(error.unwrap().contains("built-in"));
    }
}
