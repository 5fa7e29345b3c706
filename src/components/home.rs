//! Home component - Catalog browser screen
//!
//! Displays kind tabs, the category-grouped item list and the selected
//! item's summary. Owns navigation and search state.

use crate::action::Action;
use crate::component::Component;
use crate::components::calculate_main_layout;
use crate::model::catalog::CatalogItem;
use crate::model::package_manager::PackageManager;
use crate::model::ui::Tab;
use crate::services::install::synthesize;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs, Wrap},
    Frame,
};
use std::collections::BTreeMap;

// ═══════════════════════════════════════════════════════════════════════════════
// Display List Item
// ═══════════════════════════════════════════════════════════════════════════════

/// Display list item for grouped item display
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayListItem {
    /// Category header (not selectable)
    Header(String),
    /// Item reference by index in the filtered items list
    Item(usize),
}

// ═══════════════════════════════════════════════════════════════════════════════
// Home Component
// ═══════════════════════════════════════════════════════════════════════════════

pub struct HomeComponent {
    pub active_tab: Tab,
    pub list_state: ListState,
    pub search_query: String,
    pub search_mode: bool,
}

impl Default for HomeComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl HomeComponent {
    pub fn new() -> Self {
        Self {
            active_tab: Tab::all()[0],
            list_state: ListState::default(),
            search_query: String::new(),
            search_mode: false,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Filtering & Display
    // ─────────────────────────────────────────────────────────────────────────

    /// Items of the active tab matching the search query, grouped by category
    ///
    /// The flattened group order is the order used for list indices.
    pub fn get_items_grouped<'a>(&self, items: &'a [CatalogItem]) -> Vec<(String, Vec<&'a CatalogItem>)> {
        let query = self.search_query.to_lowercase();
        let mut grouped: BTreeMap<String, Vec<&CatalogItem>> = BTreeMap::new();

        for item in items.iter().filter(|i| i.kind == self.active_tab.kind()) {
            if !query.is_empty()
                && !item.name.to_lowercase().contains(&query)
                && !item.slug.to_lowercase().contains(&query)
                && !item.description.to_lowercase().contains(&query)
            {
                continue;
            }
            grouped
                .entry(item.group_category().to_string())
                .or_default()
                .push(item);
        }

        grouped.into_iter().collect()
    }

    /// Filtered items in display order
    pub fn get_filtered_items<'a>(&self, items: &'a [CatalogItem]) -> Vec<&'a CatalogItem> {
        self.get_items_grouped(items)
            .into_iter()
            .flat_map(|(_, group)| group)
            .collect()
    }

    /// Build display items list
    /// Returns the items and a list of selectable indices
    pub fn build_display_list(&self, items: &[CatalogItem]) -> (Vec<DisplayListItem>, Vec<usize>) {
        let mut display = Vec::new();
        let mut selectable_indices = Vec::new();
        let mut item_index = 0;

        for (category, group) in self.get_items_grouped(items) {
            display.push(DisplayListItem::Header(category));
            for _ in group {
                selectable_indices.push(display.len());
                display.push(DisplayListItem::Item(item_index));
                item_index += 1;
            }
        }

        (display, selectable_indices)
    }

    pub fn get_selected_item<'a>(&self, items: &'a [CatalogItem]) -> Option<&'a CatalogItem> {
        let (display_items, _) = self.build_display_list(items);
        let display_idx = self.list_state.selected()?;

        match display_items.get(display_idx)? {
            DisplayListItem::Item(idx) => self.get_filtered_items(items).get(*idx).copied(),
            DisplayListItem::Header(_) => None,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────────

    fn tab_index(&self) -> usize {
        Tab::all()
            .iter()
            .position(|t| *t == self.active_tab)
            .unwrap_or(0)
    }

    pub fn next_tab(&mut self, items: &[CatalogItem]) {
        let tabs = Tab::all();
        self.active_tab = tabs[(self.tab_index() + 1) % tabs.len()];
        self.select_first(items);
    }

    pub fn previous_tab(&mut self, items: &[CatalogItem]) {
        let tabs = Tab::all();
        let current = self.tab_index();
        let prev = if current == 0 { tabs.len() - 1 } else { current - 1 };
        self.active_tab = tabs[prev];
        self.select_first(items);
    }

    /// Select next item in the list (skipping headers)
    pub fn next(&mut self, items: &[CatalogItem]) {
        let (_, selectable) = self.build_display_list(items);
        let Some(&first) = selectable.first() else {
            return;
        };
        let current = self.list_state.selected().unwrap_or(0);
        let next = selectable.iter().find(|&&i| i > current).copied().unwrap_or(first);
        self.list_state.select(Some(next));
    }

    /// Select previous item in the list (skipping headers)
    pub fn previous(&mut self, items: &[CatalogItem]) {
        let (_, selectable) = self.build_display_list(items);
        let Some(&last) = selectable.last() else {
            return;
        };
        let current = self.list_state.selected().unwrap_or(0);
        let prev = selectable
            .iter()
            .rev()
            .find(|&&i| i < current)
            .copied()
            .unwrap_or(last);
        self.list_state.select(Some(prev));
    }

    pub fn select_first(&mut self, items: &[CatalogItem]) {
        let (_, selectable) = self.build_display_list(items);
        self.list_state.select(selectable.first().copied());
    }

    pub fn select_last(&mut self, items: &[CatalogItem]) {
        let (_, selectable) = self.build_display_list(items);
        if let Some(&last) = selectable.last() {
            self.list_state.select(Some(last));
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Search
    // ─────────────────────────────────────────────────────────────────────────

    pub fn enter_search_mode(&mut self) {
        self.search_mode = true;
    }

    pub fn exit_search_mode(&mut self) {
        self.search_mode = false;
    }

    pub fn search_input(&mut self, c: char, items: &[CatalogItem]) {
        self.search_query.push(c);
        self.select_first(items);
    }

    pub fn search_backspace(&mut self, items: &[CatalogItem]) {
        self.search_query.pop();
        self.select_first(items);
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for HomeComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.search_mode {
            let action = match key.code {
                KeyCode::Esc | KeyCode::Enter => Some(Action::ExitSearchMode),
                KeyCode::Backspace => Some(Action::SearchBackspace),
                KeyCode::Char(c) => Some(Action::SearchInput(c)),
                _ => None,
            };
            return Ok(action);
        }

        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Action::NextItem),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::PrevItem),
            KeyCode::Tab => Some(Action::NextTab),
            KeyCode::BackTab => Some(Action::PrevTab),
            KeyCode::Char('g') => Some(Action::FirstItem),
            KeyCode::Char('G') => Some(Action::LastItem),
            KeyCode::Enter => Some(Action::OpenPreview),
            KeyCode::Char('o') => Some(Action::OpenFullPage),
            KeyCode::Char('/') => Some(Action::EnterSearchMode),
            KeyCode::Char('?') => Some(Action::OpenHelp),
            KeyCode::Char('q') => Some(Action::OpenQuitDialog),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Drawing is done through draw_home_screen which takes full context
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Rendering Functions
// ═══════════════════════════════════════════════════════════════════════════════

/// Context needed for rendering the home screen
pub struct HomeRenderContext<'a> {
    pub items: &'a [CatalogItem],
    pub catalog_name: Option<&'a str>,
    pub package_manager: PackageManager,
    pub error: Option<&'a str>,
    pub status_message: Option<&'a str>,
}

pub fn draw_home_screen(
    frame: &mut Frame,
    area: Rect,
    home: &mut HomeComponent,
    ctx: &HomeRenderContext,
) -> Result<()> {
    let layout = calculate_main_layout(area, true);

    render_tabs(frame, layout.tabs, home, ctx.items);
    render_item_list(frame, layout.list, home, ctx.items);
    render_item_summary(frame, layout.detail, home.get_selected_item(ctx.items), ctx.package_manager);
    if let Some(status_area) = layout.status {
        render_status_bar(frame, status_area, ctx);
    }
    render_help_bar(frame, layout.help, home);

    Ok(())
}

fn render_tabs(frame: &mut Frame, area: Rect, home: &HomeComponent, items: &[CatalogItem]) {
    let titles: Vec<String> = Tab::all()
        .iter()
        .map(|t| {
            let count = items.iter().filter(|i| i.kind == t.kind()).count();
            format!("{} ({})", t.name(), count)
        })
        .collect();

    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::BOTTOM))
        .select(home.tab_index())
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_widget(tabs, area);
}

fn render_item_list(frame: &mut Frame, area: Rect, home: &mut HomeComponent, items: &[CatalogItem]) {
    let filtered = home.get_filtered_items(items);
    let (display_items, _) = home.build_display_list(items);

    let list_items: Vec<ListItem> = display_items
        .iter()
        .map(|entry| match entry {
            DisplayListItem::Header(category) => ListItem::new(Line::from(vec![
                Span::styled(
                    format!("── {} ", category),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled("──────────────", Style::default().fg(Color::DarkGray)),
            ])),
            DisplayListItem::Item(idx) => match filtered.get(*idx) {
                Some(item) => ListItem::new(Line::from(vec![
                    Span::styled(format!("{} ", item.icon()), Style::default().fg(Color::Yellow)),
                    Span::styled(item.name.clone(), Style::default().fg(Color::White)),
                ])),
                None => ListItem::new(Line::from("")),
            },
        })
        .collect();

    let mut title = format!(" {} ({}) ", home.active_tab.name(), filtered.len());
    if !home.search_query.is_empty() {
        title = format!("{} [/{}] ", title.trim_end(), home.search_query);
    }

    let list = List::new(list_items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    frame.render_stateful_widget(list, area, &mut home.list_state);
}

fn render_item_summary(frame: &mut Frame, area: Rect, item: Option<&CatalogItem>, pm: PackageManager) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let Some(item) = item else {
        let empty = Paragraph::new(Line::from(Span::styled(
            "No items match",
            Style::default().fg(Color::DarkGray),
        )))
        .block(block);
        frame.render_widget(empty, area);
        return;
    };

    let label = |text: &'static str| Span::styled(text, Style::default().fg(Color::DarkGray));

    let mut lines = vec![
        Line::from(vec![
            Span::styled(format!("{} ", item.icon()), Style::default().fg(Color::Yellow)),
            Span::styled(
                item.name.clone(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(item.slug.clone(), Style::default().fg(Color::DarkGray))),
        Line::from(""),
    ];
    if !item.description.is_empty() {
        lines.push(Line::from(item.description.clone()));
        lines.push(Line::from(""));
    }
    lines.push(Line::from(vec![
        label("kind:     "),
        Span::styled(item.kind.as_str(), Style::default().fg(Color::Cyan)),
    ]));
    lines.push(Line::from(vec![
        label("category: "),
        Span::styled(item.group_category().to_string(), Style::default().fg(Color::Cyan)),
    ]));
    lines.push(Line::from(vec![
        label("files:    "),
        Span::raw(item.file_names().join(", ")),
    ]));
    if !item.dependencies.is_empty() {
        lines.push(Line::from(vec![
            label("deps:     "),
            Span::raw(item.dependencies.join(", ")),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        label("$ "),
        Span::styled(
            synthesize(&item.scaffold_command(), pm),
            Style::default().fg(Color::Green),
        ),
    ]));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(
            " Enter ",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("Preview & code  "),
        Span::styled(
            " o ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("Full page"),
    ]));

    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

fn render_status_bar(frame: &mut Frame, area: Rect, ctx: &HomeRenderContext) {
    let mut spans = vec![];

    if let Some(name) = ctx.catalog_name {
        spans.push(Span::styled(
            format!(" {} ", name),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(" "));
    }

    spans.push(Span::styled(
        format!(" {} ", ctx.package_manager),
        Style::default()
            .fg(Color::Black)
            .bg(Color::Green)
            .add_modifier(Modifier::BOLD),
    ));

    if let Some(error) = ctx.error {
        spans.push(Span::styled(
            format!(" Error: {} ", error),
            Style::default().fg(Color::Red),
        ));
    }

    if let Some(status) = ctx.status_message {
        spans.push(Span::styled(
            format!(" {} ", status),
            Style::default().fg(Color::Yellow),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_help_bar(frame: &mut Frame, area: Rect, home: &HomeComponent) {
    let key = |k: &'static str, color: Color| {
        Span::styled(k, Style::default().fg(color).add_modifier(Modifier::BOLD))
    };

    let help_spans = if home.search_mode {
        vec![
            key(" Esc ", Color::Yellow),
            Span::raw("Done  "),
            Span::styled(
                format!("Search: {}_", home.search_query),
                Style::default().fg(Color::Cyan),
            ),
        ]
    } else {
        vec![
            key(" q ", Color::Yellow),
            Span::raw("Quit "),
            key(" Enter ", Color::Green),
            Span::raw("Preview "),
            key(" o ", Color::Cyan),
            Span::raw("Full page "),
            key(" Tab ", Color::Cyan),
            Span::raw("Kind "),
            key(" / ", Color::Cyan),
            Span::raw("Search "),
            key(" ? ", Color::White),
            Span::raw("Help"),
        ]
    };

    frame.render_widget(Paragraph::new(Line::from(help_spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::catalog::{ItemKind, PreviewSpec};
    use crossterm::event::KeyModifiers;

    fn create_item(slug: &str, kind: ItemKind, category: &str) -> CatalogItem {
        CatalogItem {
            slug: slug.to_string(),
            name: slug.to_string(),
            description: String::new(),
            kind,
            category: category.to_string(),
            dependencies: vec![],
            install: None,
            files: vec![],
            preview: PreviewSpec::default(),
        }
    }

    fn sample_items() -> Vec<CatalogItem> {
        vec![
            create_item("login", ItemKind::Block, "auth"),
            create_item("signup", ItemKind::Block, "auth"),
            create_item("hero", ItemKind::Block, "marketing"),
            create_item("button", ItemKind::Component, "inputs"),
            create_item("sales", ItemKind::Dashboard, ""),
        ]
    }

    #[test]
    fn test_display_list_groups_by_category() {
        let items = sample_items();
        let home = HomeComponent::new();
        let (display, selectable) = home.build_display_list(&items);

        assert_eq!(display[0], DisplayListItem::Header("auth".to_string()));
        assert_eq!(display[3], DisplayListItem::Header("marketing".to_string()));
        assert_eq!(selectable, vec![1, 2, 4]);
    }

    #[test]
    fn test_navigation_skips_headers_and_wraps() {
        let items = sample_items();
        let mut home = HomeComponent::new();
        home.select_first(&items);
        assert_eq!(home.get_selected_item(&items).unwrap().slug, "login");

        home.next(&items);
        home.next(&items);
        assert_eq!(home.get_selected_item(&items).unwrap().slug, "hero");

        home.next(&items);
        assert_eq!(home.get_selected_item(&items).unwrap().slug, "login");

        home.previous(&items);
        assert_eq!(home.get_selected_item(&items).unwrap().slug, "hero");
    }

    #[test]
    fn test_tabs_filter_by_kind() {
        let items = sample_items();
        let mut home = HomeComponent::new();
        home.next_tab(&items);
        assert_eq!(home.active_tab.kind(), ItemKind::Component);
        assert_eq!(home.get_selected_item(&items).unwrap().slug, "button");

        home.next_tab(&items);
        let selected = home.get_selected_item(&items).unwrap();
        assert_eq!(selected.slug, "sales");
        assert_eq!(selected.group_category(), "general");

        home.previous_tab(&items);
        home.previous_tab(&items);
        home.previous_tab(&items);
        assert_eq!(home.active_tab.kind(), ItemKind::Dashboard);
    }

    #[test]
    fn test_search_filters_and_reselects() {
        let items = sample_items();
        let mut home = HomeComponent::new();
        home.select_first(&items);
        for c in "sign".chars() {
            home.search_input(c, &items);
        }
        assert_eq!(home.get_filtered_items(&items).len(), 1);
        assert_eq!(home.get_selected_item(&items).unwrap().slug, "signup");

        for _ in 0..4 {
            home.search_backspace(&items);
        }
        assert_eq!(home.get_filtered_items(&items).len(), 3);
    }

    #[test]
    fn test_search_mode_captures_keys() {
        let mut home = HomeComponent::new();
        home.enter_search_mode();
        let action = home
            .handle_key_event(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE))
            .unwrap();
        assert_eq!(action, Some(Action::SearchInput('q')));
    }

    #[test]
    fn test_enter_opens_preview() {
        let mut home = HomeComponent::new();
        let action = home
            .handle_key_event(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE))
            .unwrap();
        assert_eq!(action, Some(Action::OpenPreview));
    }
}
