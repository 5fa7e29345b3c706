//! Preview/code modal
//!
//! Draws the open `ModalSession` inside the surface picked for the current
//! terminal width: a centered dialog with a file sidebar, or a bottom drawer
//! with a file tab strip. Switching surfaces keeps every piece of session
//! state; only the container changes.

use crate::action::Action;
use crate::component::Component;
use crate::components::code_highlight::highlight_code;
use crate::components::layout::{calculate_modal_layout, ModalLayout};
use crate::model::device::DeviceMode;
use crate::model::package_manager::PackageManager;
use crate::model::session::{FileState, ModalSession, Pane, PreviewState};
use crate::model::ui::Surface;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Tabs},
    Frame,
};
use std::time::Instant;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Cut `text` to at most `max` display columns, marking the cut with `…`
pub fn truncate_to_width(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        out.push(ch);
        used += w;
    }
    if max > 0 {
        out.push('…');
    }
    out
}

fn key_style(color: Color) -> Style {
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

/// Preview/code modal component
#[derive(Default)]
pub struct PreviewModal {
    /// Vertical scroll of the code pane
    pub code_scroll: usize,
}

impl PreviewModal {
    pub fn reset(&mut self) {
        self.code_scroll = 0;
    }

    pub fn scroll_down(&mut self) {
        self.code_scroll = self.code_scroll.saturating_add(1);
    }

    pub fn scroll_up(&mut self) {
        self.code_scroll = self.code_scroll.saturating_sub(1);
    }

    /// Draw `session` inside `surface`
    pub fn draw_with_session(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        session: &mut ModalSession,
        surface: Surface,
        now: Instant,
    ) -> Result<()> {
        session.sync_mount();

        let layout = calculate_modal_layout(area, surface);
        frame.render_widget(Clear, layout.frame);

        let title = match surface {
            Surface::Dialog => format!(" {} ", session.item().name),
            Surface::Drawer => format!(" ▁ {} ", session.item().name),
        };
        frame.render_widget(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(title)
                .title_style(key_style(Color::Cyan)),
            layout.frame,
        );

        self.render_header(frame, layout.header, session);
        self.render_toolbar(frame, layout.toolbar, session, now);

        match session.pane() {
            Pane::Preview => {
                let content = layout.files.union(layout.body);
                self.render_preview(frame, content, session);
            }
            Pane::Code => {
                match surface {
                    Surface::Dialog => self.render_file_sidebar(frame, layout.files, session),
                    Surface::Drawer => self.render_file_strip(frame, layout.files, session),
                }
                self.render_code(frame, layout.body, session);
            }
        }

        self.render_footer(frame, &layout, session);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Header & Toolbar
    // ─────────────────────────────────────────────────────────────────────────

    fn render_header(&self, frame: &mut Frame, area: Rect, session: &ModalSession) {
        let item = session.item();
        let width = area.width as usize;
        let mut lines = vec![Line::from(vec![
            Span::styled(format!("{} ", item.icon()), Style::default().fg(Color::Yellow)),
            Span::styled(item.name.clone(), key_style(Color::White)),
            Span::styled(
                format!("  {} · {}", item.kind.as_str(), item.group_category()),
                Style::default().fg(Color::DarkGray),
            ),
        ])];
        if !item.description.is_empty() {
            lines.push(Line::from(Span::styled(
                truncate_to_width(&item.description, width),
                Style::default().fg(Color::Gray),
            )));
        }
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn render_toolbar(&self, frame: &mut Frame, area: Rect, session: &ModalSession, now: Instant) {
        // Row 1: panes, package managers, device
        let mut spans = vec![];
        for pane in [Pane::Preview, Pane::Code] {
            let style = if pane == session.pane() {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            spans.push(Span::styled(format!(" {} ", pane.label()), style));
        }
        spans.push(Span::styled("  │ ", Style::default().fg(Color::DarkGray)));
        for pm in PackageManager::all() {
            let style = if pm == session.package_manager() {
                key_style(Color::Green)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            spans.push(Span::styled(format!("{} ", pm.name()), style));
        }
        if session.supports_device_frame() {
            spans.push(Span::styled(" │ ", Style::default().fg(Color::DarkGray)));
            for mode in DeviceMode::all() {
                let style = if mode == session.device() {
                    key_style(Color::Magenta)
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                spans.push(Span::styled(format!("{} ", mode.label()), style));
            }
        }
        if session.is_loading() {
            spans.push(Span::styled(
                format!(
                    " │ loading… {}/{} files",
                    session.loaded_file_count(),
                    session.item().files.len()
                ),
                Style::default().fg(Color::Yellow),
            ));
        }
        if session.is_copied(now) {
            spans.push(Span::styled(" │ ", Style::default().fg(Color::DarkGray)));
            spans.push(Span::styled("✓ Copied", key_style(Color::Green)));
        }

        // One row per command, translated for the active package manager
        let mut lines = vec![Line::from(spans)];
        for (command, key) in session.install_commands().iter().zip(["y", "Y"]) {
            let text = command.for_package_manager(session.package_manager());
            let prefix = format!("{} {:<13}$ ", key, command.label);
            let room = (area.width as usize).saturating_sub(prefix.width());
            lines.push(Line::from(vec![
                Span::styled(format!("{} ", key), key_style(Color::Yellow)),
                Span::styled(
                    format!("{:<13}$ ", command.label),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(truncate_to_width(&text, room), Style::default().fg(Color::White)),
            ]));
        }

        frame.render_widget(Paragraph::new(lines), area);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Preview Pane
    // ─────────────────────────────────────────────────────────────────────────

    fn render_preview(&self, frame: &mut Frame, area: Rect, session: &ModalSession) {
        let target = if session.supports_device_frame() {
            session.device().frame(area)
        } else {
            area
        };

        match session.preview_state() {
            PreviewState::Pending => render_placeholder(frame, area, "Loading preview...", Color::Yellow),
            PreviewState::Failed(reason) => {
                render_placeholder(frame, area, &format!("Preview unavailable: {}", reason), Color::Red)
            }
            PreviewState::Ready(preview) => {
                if target != area {
                    let block = Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::DarkGray))
                        .title(format!(" {} {}×{} ", session.device().label(), target.width, target.height));
                    let inner = block.inner(target);
                    frame.render_widget(block, target);
                    preview.draw(frame, inner);
                } else {
                    preview.draw(frame, target);
                }
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Code Pane
    // ─────────────────────────────────────────────────────────────────────────

    fn file_marker(state: Option<&FileState>) -> (&'static str, Color) {
        match state {
            Some(FileState::Loaded(_)) => (" ", Color::DarkGray),
            Some(FileState::Pending) => ("⋯", Color::Yellow),
            Some(FileState::Failed(_)) => ("✗", Color::Red),
            None => ("?", Color::DarkGray),
        }
    }

    fn render_file_sidebar(&self, frame: &mut Frame, area: Rect, session: &ModalSession) {
        let width = area.width.saturating_sub(4) as usize;
        let items: Vec<ListItem> = session
            .item()
            .file_names()
            .into_iter()
            .map(|name| {
                let selected = session.selected_file() == Some(name);
                let (marker, color) = Self::file_marker(session.file_state(name));
                let name_style = if selected {
                    Style::default()
                        .fg(Color::White)
                        .bg(Color::Blue)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Gray)
                };
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{} ", marker), Style::default().fg(color)),
                    Span::styled(truncate_to_width(name, width), name_style),
                ]))
            })
            .collect();

        let list = List::new(items).block(
            Block::default()
                .borders(Borders::RIGHT)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Files "),
        );
        frame.render_widget(list, area);
    }

    fn render_file_strip(&self, frame: &mut Frame, area: Rect, session: &ModalSession) {
        let names = session.item().file_names();
        let selected = session
            .selected_file()
            .and_then(|s| names.iter().position(|n| *n == s));
        let titles: Vec<Line> = names
            .iter()
            .map(|name| {
                let (marker, color) = Self::file_marker(session.file_state(name));
                if marker.trim().is_empty() {
                    Line::from(name.to_string())
                } else {
                    Line::from(vec![
                        Span::styled(marker, Style::default().fg(color)),
                        Span::raw(name.to_string()),
                    ])
                }
            })
            .collect();

        let mut tabs = Tabs::new(titles)
            .block(Block::default().borders(Borders::BOTTOM))
            .style(Style::default().fg(Color::DarkGray))
            .highlight_style(key_style(Color::Cyan));
        if let Some(idx) = selected {
            tabs = tabs.select(idx);
        }
        frame.render_widget(tabs, area);
    }

    fn render_code(&mut self, frame: &mut Frame, area: Rect, session: &ModalSession) {
        let file_name = session.selected_file().unwrap_or_default();
        let text = session.code_text();
        let highlighted = match session.selected_file().and_then(|n| session.file_state(n)) {
            Some(FileState::Loaded(_)) => highlight_code(&text, file_name),
            _ => text.lines().map(|l| Line::from(l.to_string())).collect(),
        };

        let gutter = highlighted.len().to_string().len();
        let lines: Vec<Line> = highlighted
            .into_iter()
            .enumerate()
            .map(|(i, line)| {
                let mut spans = vec![Span::styled(
                    format!(" {:>width$} ", i + 1, width = gutter),
                    Style::default().fg(Color::DarkGray),
                )];
                spans.extend(line.spans);
                Line::from(spans)
            })
            .collect();

        let max_scroll = lines.len().saturating_sub(area.height as usize);
        self.code_scroll = self.code_scroll.min(max_scroll);

        frame.render_widget(
            Paragraph::new(lines).scroll((self.code_scroll as u16, 0)),
            area,
        );
    }

    fn render_footer(&self, frame: &mut Frame, layout: &ModalLayout, session: &ModalSession) {
        let mut spans = vec![
            Span::styled(" Esc ", key_style(Color::Yellow)),
            Span::raw("Close "),
            Span::styled(" Tab ", key_style(Color::Cyan)),
            Span::raw("Preview/Code "),
            Span::styled(" m ", key_style(Color::Green)),
            Span::raw("Pkg mgr "),
            Span::styled(" y/Y ", key_style(Color::Green)),
            Span::raw("Copy cmd/deps "),
        ];
        if session.pane() == Pane::Code {
            spans.push(Span::styled(" [ ] ", key_style(Color::Cyan)));
            spans.push(Span::raw("File "));
            spans.push(Span::styled(" C ", key_style(Color::Green)));
            spans.push(Span::raw("Copy file "));
        } else {
            spans.push(Span::styled(" r ", key_style(Color::Cyan)));
            spans.push(Span::raw("Reload "));
            if session.supports_device_frame() {
                spans.push(Span::styled(" d ", key_style(Color::Magenta)));
                spans.push(Span::raw("Device "));
            }
        }
        spans.push(Span::styled(" o ", key_style(Color::White)));
        spans.push(Span::raw("Full page"));

        frame.render_widget(Paragraph::new(Line::from(spans)), layout.footer);
    }
}

fn render_placeholder(frame: &mut Frame, area: Rect, text: &str, color: Color) {
    let y = area.y + area.height / 2;
    let line_area = Rect::new(
        area.x,
        y.min(area.bottom().saturating_sub(1)),
        area.width,
        area.height.min(1),
    );
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(text.to_string(), Style::default().fg(color))))
            .alignment(Alignment::Center),
        line_area,
    );
}

impl Component for PreviewModal {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Char('q') => Some(Action::CloseModal),
            KeyCode::Char('p') => Some(Action::SetPane(Pane::Preview)),
            KeyCode::Char('c') => Some(Action::SetPane(Pane::Code)),
            KeyCode::Tab => Some(Action::TogglePane),
            KeyCode::Char(']') | KeyCode::Right => Some(Action::NextFile),
            KeyCode::Char('[') | KeyCode::Left => Some(Action::PrevFile),
            KeyCode::Char('j') | KeyCode::Down => Some(Action::ScrollDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::ScrollUp),
            KeyCode::Char('m') => Some(Action::CyclePackageManager),
            KeyCode::Char('y') => Some(Action::CopyScaffoldCommand),
            KeyCode::Char('Y') => Some(Action::CopyDependencyCommand),
            KeyCode::Char('C') => Some(Action::CopyFileCode),
            KeyCode::Char('r') => Some(Action::ReloadPreview),
            KeyCode::Char('d') => Some(Action::CycleDevice),
            KeyCode::Char('o') => Some(Action::OpenFullPage),
            KeyCode::Char('?') => Some(Action::OpenHelp),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::ScrollDown => self.scroll_down(),
            Action::ScrollUp => self.scroll_up(),
            Action::NextFile | Action::PrevFile | Action::SetPane(_) | Action::TogglePane => {
                self.reset()
            }
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Drawing needs the session; see draw_with_session
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::session::ModalHost;
    use crate::services::catalog::builtin_catalog;
    use crossterm::event::KeyModifiers;
    use ratatui::{backend::TestBackend, Terminal};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn render(host: &mut ModalHost, width: u16, height: u16, surface: Surface) -> String {
        let mut modal = PreviewModal::default();
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        let session = host.session_mut().unwrap();
        terminal
            .draw(|f| {
                modal
                    .draw_with_session(f, f.area(), session, surface, Instant::now())
                    .unwrap()
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_key_bindings() {
        let mut modal = PreviewModal::default();
        assert_eq!(modal.handle_key_event(key(KeyCode::Esc)).unwrap(), Some(Action::CloseModal));
        assert_eq!(
            modal.handle_key_event(key(KeyCode::Char('c'))).unwrap(),
            Some(Action::SetPane(Pane::Code))
        );
        assert_eq!(
            modal.handle_key_event(key(KeyCode::Char('Y'))).unwrap(),
            Some(Action::CopyDependencyCommand)
        );
        assert_eq!(modal.handle_key_event(key(KeyCode::Char('z'))).unwrap(), None);
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("button.tsx", 20), "button.tsx");
        assert_eq!(truncate_to_width("button.tsx", 5), "butt…");
    }

    #[test]
    fn test_pending_session_shows_loading() {
        let catalog = builtin_catalog();
        let mut host = ModalHost::default();
        host.open(catalog.find("button").unwrap().clone());

        let out = render(&mut host, 120, 40, Surface::Dialog);
        assert!(out.contains("Loading preview..."));
        assert!(out.contains("npx shadcn@latest add button"));
    }

    #[test]
    fn test_drawer_renders_file_strip_in_code_pane() {
        let catalog = builtin_catalog();
        let mut host = ModalHost::default();
        host.open(catalog.find("login-01").unwrap().clone());
        host.session_mut().unwrap().set_pane(Pane::Code);

        let out = render(&mut host, 80, 40, Surface::Drawer);
        assert!(out.contains("page.tsx"));
        assert!(out.contains("login-form.tsx"));
        assert!(!out.contains("Files"));
    }

    #[test]
    fn test_dialog_renders_file_sidebar_in_code_pane() {
        let catalog = builtin_catalog();
        let mut host = ModalHost::default();
        host.open(catalog.find("login-01").unwrap().clone());
        host.session_mut().unwrap().set_pane(Pane::Code);

        let out = render(&mut host, 120, 40, Surface::Dialog);
        assert!(out.contains("Files"));
    }
}
