//! Splash screen component
//!
//! Shows the logo and the catalog being opened, then hands over to the browser.

use crate::action::Action;
use crate::component::Component;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame,
};
use std::time::{Duration, Instant};

const LOGO: &[&str] = &[
    "      _          _  __ ",
    "  ___| |__   ___| |/ _|",
    " / __| '_ \\ / _ \\ | |_ ",
    " \\__ \\ | | |  __/ |  _|",
    " |___/_| |_|\\___|_|_|  ",
];

/// Shelf-board glyphs drawn under the logo, one per item kind
const SHELF: &str = "▦  ◆  ▤";

pub struct SplashComponent {
    start_time: Option<Instant>,
    duration: Duration,
    /// Catalog name shown under the logo
    pub subtitle: String,
}

impl Default for SplashComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl SplashComponent {
    pub fn new() -> Self {
        Self {
            start_time: None,
            duration: Duration::from_millis(1200),
            subtitle: "A terminal catalog for UI components".to_string(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.start_time
            .map(|t| t.elapsed() >= self.duration)
            .unwrap_or(false)
    }
}

impl Component for SplashComponent {
    fn init(&mut self) -> Result<()> {
        self.start_time = Some(Instant::now());
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        // Any key skips the splash screen
        match key.code {
            KeyCode::Char('q') => Ok(Some(Action::ForceQuit)),
            _ => Ok(Some(Action::SplashComplete)),
        }
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        if action == Action::Tick && self.is_complete() {
            return Ok(Some(Action::SplashComplete));
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        frame.render_widget(Clear, area);

        let logo_height = LOGO.len() as u16;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(area.height.saturating_sub(logo_height + 4) / 2),
                Constraint::Length(logo_height),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(area);

        let logo: Vec<Line> = LOGO
            .iter()
            .map(|line| {
                Line::from(Span::styled(
                    *line,
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ))
            })
            .collect();
        frame.render_widget(Paragraph::new(logo).alignment(Alignment::Center), chunks[1]);

        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(SHELF, Style::default().fg(Color::Yellow))))
                .alignment(Alignment::Center),
            chunks[3],
        );
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                self.subtitle.as_str(),
                Style::default().fg(Color::DarkGray),
            )))
            .alignment(Alignment::Center),
            chunks[4],
        );

        Ok(())
    }
}
