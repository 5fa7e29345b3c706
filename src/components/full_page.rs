//! Full-page item view
//!
//! The navigation target for "open in full page". Shows everything known about
//! one item without loading its content; Enter opens the preview modal on top.

use crate::action::Action;
use crate::component::Component;
use crate::model::catalog::{CatalogItem, CodeSource, PreviewSpec};
use crate::model::package_manager::PackageManager;
use crate::services::install::synthesize;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

#[derive(Default)]
pub struct FullPageView {
    pub scroll_offset: usize,
}

fn preview_summary(preview: &PreviewSpec) -> String {
    match preview {
        PreviewSpec::Text { path } => format!("text art from {}", path.display()),
        PreviewSpec::Inline { text } if text.trim().is_empty() => "none".to_string(),
        PreviewSpec::Inline { .. } => "inline text art".to_string(),
        PreviewSpec::Gauge { label, percent } => format!("gauge \"{}\" at {}%", label, percent),
        PreviewSpec::Sparkline { title, data } => {
            format!("sparkline \"{}\" over {} samples", title, data.len())
        }
        PreviewSpec::Table { headers, rows } => {
            format!("table with {} columns and {} rows", headers.len(), rows.len())
        }
        PreviewSpec::Dashboard { title, metrics } => {
            format!("dashboard \"{}\" with {} metrics", title, metrics.len())
        }
    }
}

impl FullPageView {
    pub fn draw_with_item(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        item: Option<&CatalogItem>,
        pm: PackageManager,
    ) -> Result<()> {
        frame.render_widget(Clear, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(area);

        let lines = match item {
            Some(item) => build_page(item, pm),
            None => vec![Line::from(Span::styled(
                "This item is no longer in the catalog.",
                Style::default().fg(Color::Red),
            ))],
        };

        let title = item
            .map(|i| format!(" {} ", i.name))
            .unwrap_or_else(|| " Not found ".to_string());
        let max_scroll = lines.len().saturating_sub(chunks[0].height.saturating_sub(2) as usize);
        self.scroll_offset = self.scroll_offset.min(max_scroll);

        frame.render_widget(
            Paragraph::new(lines)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Cyan))
                        .title(title)
                        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
                )
                .wrap(Wrap { trim: false })
                .scroll((self.scroll_offset as u16, 0)),
            chunks[0],
        );

        let help = Line::from(vec![
            Span::styled(" Esc ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            Span::raw("Back  "),
            Span::styled(" Enter ", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::raw("Preview & code  "),
            Span::styled(" j/k ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::raw("Scroll"),
        ]);
        frame.render_widget(Paragraph::new(help), chunks[1]);
        Ok(())
    }
}

fn build_page(item: &CatalogItem, pm: PackageManager) -> Vec<Line<'static>> {
    let heading = |text: &str| {
        Line::from(Span::styled(
            text.to_string(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ))
    };
    let command = |text: String| {
        Line::from(vec![
            Span::styled("  $ ", Style::default().fg(Color::DarkGray)),
            Span::styled(text, Style::default().fg(Color::Green)),
        ])
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled(format!("{} ", item.icon()), Style::default().fg(Color::Yellow)),
            Span::styled(
                item.name.clone(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {} · {}", item.kind.as_str(), item.group_category()),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        Line::from(""),
    ];
    if !item.description.is_empty() {
        lines.push(Line::from(item.description.clone()));
        lines.push(Line::from(""));
    }

    lines.push(heading(&format!("Installation ({})", pm)));
    lines.push(command(synthesize(&item.scaffold_command(), pm)));
    if let Some(deps) = item.dependency_command() {
        lines.push(command(synthesize(&deps, pm)));
    }
    lines.push(Line::from(""));

    lines.push(heading("Files"));
    if item.files.is_empty() {
        lines.push(Line::from(Span::styled("  none", Style::default().fg(Color::DarkGray))));
    }
    for file in &item.files {
        let origin = match &file.source {
            CodeSource::Path { path } => path.display().to_string(),
            CodeSource::Inline { code } => format!("inline, {} lines", code.lines().count()),
        };
        lines.push(Line::from(vec![
            Span::raw(format!("  {} ", file.name)),
            Span::styled(format!("({})", origin), Style::default().fg(Color::DarkGray)),
        ]));
    }
    lines.push(Line::from(""));

    lines.push(heading("Preview"));
    lines.push(Line::from(format!("  {}", preview_summary(&item.preview))));

    lines
}

impl Component for FullPageView {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') => Some(Action::BackToBrowse),
            KeyCode::Enter => Some(Action::OpenPreview),
            KeyCode::Char('j') | KeyCode::Down => Some(Action::ScrollDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::ScrollUp),
            KeyCode::Char('?') => Some(Action::OpenHelp),
            KeyCode::Char('q') => Some(Action::OpenQuitDialog),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::ScrollDown => self.scroll_offset = self.scroll_offset.saturating_add(1),
            Action::ScrollUp => self.scroll_offset = self.scroll_offset.saturating_sub(1),
            Action::BackToBrowse => self.scroll_offset = 0,
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Drawing needs the item; see draw_with_item
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::catalog::builtin_catalog;

    fn text_of(lines: &[Line]) -> String {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_page_uses_selected_package_manager() {
        let catalog = builtin_catalog();
        let button = catalog.find("button").unwrap();
        let page = text_of(&build_page(button, PackageManager::Pnpm));

        assert!(page.contains("pnpm dlx shadcn@latest add button"));
        assert!(page.contains("pnpm add @radix-ui/react-slot lucide-react"));
        assert!(page.contains("button-demo.tsx"));
    }

    #[test]
    fn test_preview_summary() {
        let spec = PreviewSpec::Gauge {
            label: "Upload".to_string(),
            percent: 40,
        };
        assert_eq!(preview_summary(&spec), "gauge \"Upload\" at 40%");
        assert_eq!(preview_summary(&PreviewSpec::default()), "none");
    }
}
