//! Root application component
//!
//! The App struct implements the Component trait, acting as the root component
//! that routes input to the screen or overlay on top and applies the resulting
//! Actions to the catalog, the overlay stack and the open preview session.

use crate::action::Action;
use crate::component::Component;
use crate::components::{
    draw_home_screen, FullPageView, HelpDialog, HomeComponent, HomeRenderContext, PreviewModal,
    QuitDialog, SplashComponent,
};
use crate::config::Config;
use crate::model::modal::{Modal, ModalStack};
use crate::model::session::FileState;
use crate::model::ui::{AppMode, Breakpoint, Viewport};
use crate::model::{Catalog, CatalogItem, ModalHost};
use crate::services::{
    AnalyticsEvent, AnalyticsSink, ClipboardSink, ContentLoader, NoopAnalytics, SystemClipboard,
    TracingAnalytics,
};
use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};
use std::path::PathBuf;
use std::time::Instant;

// ═══════════════════════════════════════════════════════════════════════════════
// App Struct
// ═══════════════════════════════════════════════════════════════════════════════

/// Main application state - coordinates between components
pub struct App {
    /// Current application mode
    pub mode: AppMode,

    /// Next mode to transition to after splash
    pub next_mode_after_splash: AppMode,

    /// Items being browsed
    pub catalog: Catalog,

    /// Overlay stack
    pub modals: ModalStack,

    /// The open preview session, if any
    pub host: ModalHost,

    /// Background loading of files and previews
    pub loader: ContentLoader,

    pub clipboard: Box<dyn ClipboardSink>,
    pub analytics: Box<dyn AnalyticsSink>,

    /// Terminal size, decides between dialog and drawer
    pub viewport: Viewport,

    pub config: Config,

    /// Where config changes are written; None keeps them in memory
    pub config_path: Option<PathBuf>,

    /// Flag to indicate the app should quit
    pub should_quit: bool,

    /// Error message to display
    pub error: Option<String>,

    /// Status message to display
    pub status_message: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // Child Components
    // ─────────────────────────────────────────────────────────────────────────
    pub splash: SplashComponent,
    pub home: HomeComponent,
    pub preview_modal: PreviewModal,
    pub full_page: FullPageView,
    pub help_dialog: HelpDialog,
    pub quit_dialog: QuitDialog,
}

// ═══════════════════════════════════════════════════════════════════════════════
// App Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    /// Create the app with the system clipboard and, unless disabled, log-backed analytics
    pub fn new(catalog: Catalog, config: Config) -> App {
        let analytics: Box<dyn AnalyticsSink> = if config.analytics {
            Box::new(TracingAnalytics)
        } else {
            Box::new(NoopAnalytics)
        };
        let mut app = Self::with_parts(
            catalog,
            config,
            Box::new(SystemClipboard::new()),
            analytics,
            ContentLoader::default(),
        );
        app.config_path = Config::path();
        app
    }

    pub fn with_parts(
        catalog: Catalog,
        config: Config,
        clipboard: Box<dyn ClipboardSink>,
        analytics: Box<dyn AnalyticsSink>,
        loader: ContentLoader,
    ) -> App {
        let breakpoint = Breakpoint {
            narrow_below: config.narrow_breakpoint,
        };
        let mut splash = SplashComponent::new();
        if let Some(name) = &catalog.name {
            splash.subtitle = name.clone();
        }

        let mut app = App {
            mode: AppMode::Splash,
            next_mode_after_splash: AppMode::Browse,
            modals: ModalStack::new(),
            host: ModalHost::new(config.package_manager),
            loader,
            clipboard,
            analytics,
            viewport: Viewport::new(0, 0, breakpoint),
            config,
            config_path: None,
            should_quit: false,
            error: None,
            status_message: None,
            splash,
            home: HomeComponent::new(),
            preview_modal: PreviewModal::default(),
            full_page: FullPageView::default(),
            help_dialog: HelpDialog::default(),
            quit_dialog: QuitDialog,
            catalog,
        };

        if app.catalog.items.is_empty() {
            app.error = Some("The catalog has no items".to_string());
        } else {
            app.home.select_first(&app.catalog.items);
        }
        app
    }

    /// Item the current screen is about: the page's item or the list selection
    fn current_item(&self) -> Option<&CatalogItem> {
        match &self.mode {
            AppMode::ItemPage { slug } => self.catalog.find(slug),
            _ => self.home.get_selected_item(&self.catalog.items),
        }
    }

    fn open_preview(&mut self) {
        let Some(item) = self.current_item().cloned() else {
            return;
        };

        let generation = self.host.open(item.clone());
        self.loader.request(generation, &item);
        self.preview_modal.reset();
        if !self.modals.contains(&Modal::Preview) {
            self.modals.push(Modal::Preview);
        }

        self.analytics.emit(
            &AnalyticsEvent::new("item_opened")
                .with("slug", item.slug.as_str())
                .with("kind", item.kind.as_str()),
        );
    }

    fn close_preview(&mut self) {
        if let Some(slug) = self.host.close() {
            tracing::debug!("Closed preview of {}", slug);
        }
        self.modals.remove(&Modal::Preview);
        self.preview_modal.reset();
    }

    fn cycle_package_manager(&mut self) {
        let Some(session) = self.host.session_mut() else {
            return;
        };
        let pm = session.package_manager().next();
        session.set_package_manager(pm);
        let slug = session.item().slug.clone();

        self.config.package_manager = pm;
        if let Some(path) = &self.config_path {
            if let Err(e) = self.config.save_to(path) {
                tracing::warn!("Failed to save package manager choice: {}", e);
            }
        }

        self.analytics.emit(
            &AnalyticsEvent::new("package_manager_selected")
                .with("package_manager", pm.name())
                .with("slug", slug),
        );
    }

    /// Copy `text` through the open session and record `event` on success
    fn copy_text(&mut self, text: String, event: AnalyticsEvent) {
        let Some(session) = self.host.session_mut() else {
            return;
        };

        if session.copy(self.clipboard.as_mut(), &text, Instant::now()) {
            self.status_message = None;
            self.analytics.emit(&event);
        } else {
            self.status_message = Some("Could not copy to the clipboard".to_string());
        }
    }

    fn copy_command(&mut self, dependencies: bool) {
        let Some(session) = self.host.session() else {
            return;
        };
        let command = if dependencies {
            session.dependency_command()
        } else {
            Some(session.scaffold_command())
        };
        let Some(command) = command else {
            self.status_message = Some("This item has no extra dependencies".to_string());
            return;
        };

        let event = AnalyticsEvent::new("install_command_copied")
            .with("slug", session.item().slug.as_str())
            .with("package_manager", session.package_manager().name())
            .with("command", if dependencies { "dependencies" } else { "add" });
        self.copy_text(command, event);
    }

    fn copy_file_code(&mut self) {
        let Some(session) = self.host.session() else {
            return;
        };
        let Some(name) = session.selected_file() else {
            return;
        };
        // Placeholders and error text are never copied
        let Some(FileState::Loaded(code)) = session.file_state(name) else {
            return;
        };

        let code = code.clone();
        let event = AnalyticsEvent::new("file_code_copied")
            .with("slug", session.item().slug.as_str())
            .with("file", name);
        self.copy_text(code, event);
    }

    fn open_full_page(&mut self) {
        let slug = match self.host.session() {
            Some(session) => Some(session.item().slug.clone()),
            None => self.current_item().map(|item| item.slug.clone()),
        };
        let Some(slug) = slug else {
            return;
        };

        self.close_preview();
        self.full_page.scroll_offset = 0;
        self.mode = AppMode::ItemPage { slug };
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for App {
    fn init(&mut self) -> Result<()> {
        self.splash.init()?;
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.mode == AppMode::Splash {
            return self.splash.handle_key_event(key);
        }

        if let Some(modal) = self.modals.top().cloned() {
            return self.handle_modal_key_event(&modal, key);
        }

        match self.mode {
            AppMode::ItemPage { .. } => self.full_page.handle_key_event(key),
            _ => self.home.handle_key_event(key),
        }
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            // ─────────────────────────────────────────────────────────────────
            // App Lifecycle
            // ─────────────────────────────────────────────────────────────────
            Action::Tick => {
                if self.mode == AppMode::Splash {
                    return self.splash.update(action);
                }
                self.loader.poll(&mut self.host);
                if let Some(session) = self.host.session_mut() {
                    session.tick(Instant::now());
                }
            }
            Action::SplashComplete => {
                self.mode = self.next_mode_after_splash.clone();
            }
            Action::ForceQuit => {
                self.should_quit = true;
            }
            Action::Resize(width, height) => {
                let before = self.viewport.surface();
                self.viewport.resize(width, height);
                if self.viewport.surface() != before {
                    tracing::debug!(
                        "Modal surface is now {:?} at {}x{}",
                        self.viewport.surface(),
                        self.viewport.width,
                        self.viewport.height
                    );
                }
            }

            // ─────────────────────────────────────────────────────────────────
            // Navigation (delegate to HomeComponent)
            // ─────────────────────────────────────────────────────────────────
            Action::NextItem => self.home.next(&self.catalog.items),
            Action::PrevItem => self.home.previous(&self.catalog.items),
            Action::NextTab => self.home.next_tab(&self.catalog.items),
            Action::PrevTab => self.home.previous_tab(&self.catalog.items),
            Action::FirstItem => self.home.select_first(&self.catalog.items),
            Action::LastItem => self.home.select_last(&self.catalog.items),

            // ─────────────────────────────────────────────────────────────────
            // Search (delegate to HomeComponent)
            // ─────────────────────────────────────────────────────────────────
            Action::EnterSearchMode => self.home.enter_search_mode(),
            Action::ExitSearchMode => self.home.exit_search_mode(),
            Action::SearchInput(c) => self.home.search_input(c, &self.catalog.items),
            Action::SearchBackspace => self.home.search_backspace(&self.catalog.items),

            // ─────────────────────────────────────────────────────────────────
            // Scrolling (whatever is on top)
            // ─────────────────────────────────────────────────────────────────
            Action::ScrollUp | Action::ScrollDown => match self.modals.top() {
                Some(Modal::Preview) => {
                    self.preview_modal.update(action)?;
                }
                Some(_) => {}
                None => {
                    self.full_page.update(action)?;
                }
            },

            // ─────────────────────────────────────────────────────────────────
            // Modals
            // ─────────────────────────────────────────────────────────────────
            Action::OpenQuitDialog => {
                self.modals.push(Modal::QuitConfirm);
            }
            Action::OpenHelp => {
                if self.modals.top() != Some(&Modal::Help) {
                    self.help_dialog.scroll_offset = 0;
                    self.modals.push(Modal::Help);
                }
            }
            Action::CloseModal => match self.modals.top() {
                Some(Modal::Preview) => self.close_preview(),
                Some(_) => {
                    self.modals.pop();
                }
                None => {}
            },
            Action::ConfirmModal => {
                if self.modals.top() == Some(&Modal::QuitConfirm) {
                    self.should_quit = true;
                }
            }

            // ─────────────────────────────────────────────────────────────────
            // Preview Modal
            // ─────────────────────────────────────────────────────────────────
            Action::OpenPreview => self.open_preview(),
            Action::SetPane(pane) => {
                if let Some(session) = self.host.session_mut() {
                    session.set_pane(pane);
                }
                self.preview_modal.update(action)?;
            }
            Action::TogglePane => {
                if let Some(session) = self.host.session_mut() {
                    session.toggle_pane();
                }
                self.preview_modal.update(action)?;
            }
            Action::NextFile | Action::PrevFile => {
                let delta = if action == Action::NextFile { 1 } else { -1 };
                if let Some(session) = self.host.session_mut() {
                    session.step_file(delta);
                }
                self.preview_modal.update(action)?;
            }
            Action::CyclePackageManager => self.cycle_package_manager(),
            Action::CopyScaffoldCommand => self.copy_command(false),
            Action::CopyDependencyCommand => self.copy_command(true),
            Action::CopyFileCode => self.copy_file_code(),
            Action::ReloadPreview => {
                if let Some(session) = self.host.session_mut() {
                    session.reload();
                }
            }
            Action::CycleDevice => {
                if let Some(session) = self.host.session_mut() {
                    let next = session.device().next();
                    session.set_device(next);
                }
            }

            // ─────────────────────────────────────────────────────────────────
            // Full Page
            // ─────────────────────────────────────────────────────────────────
            Action::OpenFullPage => self.open_full_page(),
            Action::BackToBrowse => {
                self.full_page.update(action)?;
                self.mode = AppMode::Browse;
            }
        }

        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        match &self.mode {
            AppMode::Splash => {
                self.splash.draw(frame, area)?;
                return Ok(());
            }
            AppMode::Browse => {
                let ctx = HomeRenderContext {
                    items: &self.catalog.items,
                    catalog_name: self.catalog.name.as_deref(),
                    package_manager: self.host.package_manager(),
                    error: self.error.as_deref(),
                    status_message: self.status_message.as_deref(),
                };
                draw_home_screen(frame, area, &mut self.home, &ctx)?;
            }
            AppMode::ItemPage { slug } => {
                let item = self.catalog.find(slug);
                self.full_page
                    .draw_with_item(frame, area, item, self.host.package_manager())?;
            }
        }

        // Overlays draw bottom to top
        let modals: Vec<Modal> = self.modals.iter().cloned().collect();
        for modal in &modals {
            self.draw_modal(frame, area, modal)?;
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Helper Methods
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    fn handle_modal_key_event(&mut self, modal: &Modal, key: KeyEvent) -> Result<Option<Action>> {
        match modal {
            Modal::Preview => self.preview_modal.handle_key_event(key),
            Modal::Help => self.help_dialog.handle_key_event(key),
            Modal::QuitConfirm => self.quit_dialog.handle_key_event(key),
        }
    }

    fn draw_modal(&mut self, frame: &mut Frame, area: Rect, modal: &Modal) -> Result<()> {
        match modal {
            Modal::Preview => {
                let surface = self.viewport.surface();
                if let Some(session) = self.host.session_mut() {
                    self.preview_modal
                        .draw_with_session(frame, area, session, surface, Instant::now())?;
                }
            }
            Modal::Help => self.help_dialog.draw(frame, area)?,
            Modal::QuitConfirm => self.quit_dialog.draw(frame, area)?,
        }
        Ok(())
    }
}
