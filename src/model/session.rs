//! Preview/code modal session state
//!
//! A `ModalHost` owns at most one `ModalSession`. Every session gets a fresh
//! generation number; asynchronous load results carry the generation they
//! were requested for and are dropped unless it matches the open session.

use crate::component::Renderable;
use crate::model::catalog::{CatalogItem, ItemKind};
use crate::model::device::DeviceMode;
use crate::model::package_manager::PackageManager;
use crate::services::clipboard::{ClipboardSink, CopyCoordinator};
use crate::services::install::synthesize;
use std::collections::HashMap;
use std::fmt;
use std::time::Instant;
use thiserror::Error;

/// Text shown by code panes while a file is still loading
pub const LOADING_PLACEHOLDER: &str = "Loading...";

/// Why a file or preview could not be loaded
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {reason}")]
    Read { path: String, reason: String },
    #[error("{0}")]
    Invalid(String),
}

/// Top-level view inside the modal body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pane {
    #[default]
    Preview,
    Code,
}

impl Pane {
    pub fn label(&self) -> &'static str {
        match self {
            Pane::Preview => "Preview",
            Pane::Code => "Code",
        }
    }
}

/// Load state of one file's code text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileState {
    Pending,
    Loaded(String),
    Failed(String),
}

/// Load state of the live preview
pub enum PreviewState {
    Pending,
    Ready(Box<dyn Renderable>),
    Failed(String),
}

impl fmt::Debug for PreviewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreviewState::Pending => write!(f, "Pending"),
            PreviewState::Ready(_) => write!(f, "Ready(..)"),
            PreviewState::Failed(reason) => write!(f, "Failed({})", reason),
        }
    }
}

/// Result payload from the content loader
pub enum LoadPayload {
    File {
        name: String,
        result: Result<String, LoadError>,
    },
    Preview(Result<Box<dyn Renderable>, LoadError>),
}

/// A load result tagged with the session generation it belongs to
pub struct LoadMessage {
    pub generation: u64,
    pub payload: LoadPayload,
}

/// Monotonic key used to force the preview to remount
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReloadCounter {
    value: u64,
}

impl ReloadCounter {
    pub fn current(&self) -> u64 {
        self.value
    }

    pub fn bump(&mut self) -> u64 {
        self.value += 1;
        self.value
    }
}

/// An install command offered in the modal toolbar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallCommand {
    pub label: &'static str,
    pub base: String,
}

impl InstallCommand {
    pub fn for_package_manager(&self, pm: PackageManager) -> String {
        synthesize(&self.base, pm)
    }
}

/// State of one open preview/code modal
pub struct ModalSession {
    item: CatalogItem,
    generation: u64,
    pane: Pane,
    reload: ReloadCounter,
    files: HashMap<String, FileState>,
    preview: PreviewState,
    mounted_key: Option<u64>,
    selected_file: Option<String>,
    package_manager: PackageManager,
    device: DeviceMode,
    copy: CopyCoordinator,
}

impl ModalSession {
    fn new(item: CatalogItem, generation: u64, package_manager: PackageManager) -> Self {
        let files = item
            .files
            .iter()
            .map(|f| (f.name.clone(), FileState::Pending))
            .collect();

        Self {
            item,
            generation,
            pane: Pane::Preview,
            reload: ReloadCounter::default(),
            files,
            preview: PreviewState::Pending,
            mounted_key: None,
            selected_file: None,
            package_manager,
            device: DeviceMode::Desktop,
            copy: CopyCoordinator::new(),
        }
    }

    pub fn item(&self) -> &CatalogItem {
        &self.item
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Loading
    // ─────────────────────────────────────────────────────────────────────────

    /// Whether the preview or any file is still pending
    pub fn is_loading(&self) -> bool {
        matches!(self.preview, PreviewState::Pending) || self.has_pending_files()
    }

    fn has_pending_files(&self) -> bool {
        self.files.values().any(|s| *s == FileState::Pending)
    }

    pub fn file_state(&self, name: &str) -> Option<&FileState> {
        self.files.get(name)
    }

    /// Number of files whose code text is available
    pub fn loaded_file_count(&self) -> usize {
        self.files
            .values()
            .filter(|s| matches!(s, FileState::Loaded(_)))
            .count()
    }

    pub fn preview_state(&self) -> &PreviewState {
        &self.preview
    }

    fn apply(&mut self, payload: LoadPayload) {
        match payload {
            LoadPayload::File { name, result } => {
                let state = match result {
                    Ok(code) => FileState::Loaded(code),
                    Err(e) => {
                        tracing::warn!("Failed to load {} for {}: {}", name, self.item.slug, e);
                        FileState::Failed(e.to_string())
                    }
                };
                self.files.insert(name, state);
                if !self.has_pending_files() && self.selected_file.is_none() {
                    self.selected_file = self.item.files.first().map(|f| f.name.clone());
                }
            }
            LoadPayload::Preview(result) => {
                self.preview = match result {
                    Ok(renderable) => PreviewState::Ready(renderable),
                    Err(e) => {
                        tracing::warn!("Failed to load preview for {}: {}", self.item.slug, e);
                        PreviewState::Failed(e.to_string())
                    }
                };
                self.mounted_key = None;
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Preview mounting
    // ─────────────────────────────────────────────────────────────────────────

    pub fn reload_token(&self) -> u64 {
        self.reload.current()
    }

    /// Force the preview to remount on the next draw
    pub fn reload(&mut self) -> u64 {
        self.reload.bump()
    }

    /// Mount the preview, remounting if the reload token moved since the last mount
    pub fn sync_mount(&mut self) {
        let key = self.reload_token();
        if let PreviewState::Ready(preview) = &mut self.preview {
            if self.mounted_key != Some(key) {
                if self.mounted_key.is_some() {
                    preview.unmount();
                }
                preview.mount(key);
                self.mounted_key = Some(key);
            }
        }
    }

    #[cfg(test)]
    pub fn mounted_key(&self) -> Option<u64> {
        self.mounted_key
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Panes and files
    // ─────────────────────────────────────────────────────────────────────────

    pub fn pane(&self) -> Pane {
        self.pane
    }

    pub fn set_pane(&mut self, pane: Pane) {
        self.pane = pane;
    }

    pub fn toggle_pane(&mut self) {
        self.pane = match self.pane {
            Pane::Preview => Pane::Code,
            Pane::Code => Pane::Preview,
        };
    }

    pub fn selected_file(&self) -> Option<&str> {
        self.selected_file.as_deref()
    }

    /// Select a file by name; names without loaded content are allowed
    pub fn select_file(&mut self, name: &str) {
        self.selected_file = Some(name.to_string());
    }

    /// Move the file selection by `delta` in list order, wrapping around
    pub fn step_file(&mut self, delta: isize) {
        let names = self.item.file_names();
        if names.is_empty() {
            return;
        }
        let len = names.len() as isize;
        let current = self
            .selected_file
            .as_deref()
            .and_then(|s| names.iter().position(|n| *n == s))
            .map(|i| i as isize);
        let next = match current {
            Some(i) => (i + delta).rem_euclid(len),
            None => 0,
        };
        let name = names[next as usize].to_string();
        self.select_file(&name);
    }

    /// Text for the code pane given the current selection
    pub fn code_text(&self) -> String {
        match self.selected_file.as_deref() {
            Some(name) => match self.files.get(name) {
                Some(FileState::Loaded(code)) => code.clone(),
                Some(FileState::Pending) => LOADING_PLACEHOLDER.to_string(),
                Some(FileState::Failed(reason)) => {
                    format!("Could not load {}.\n\n{}", name, reason)
                }
                None => format!("No content available for {}", name),
            },
            None if self.has_pending_files() => LOADING_PLACEHOLDER.to_string(),
            None => "This item has no source files.".to_string(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Install commands
    // ─────────────────────────────────────────────────────────────────────────

    pub fn package_manager(&self) -> PackageManager {
        self.package_manager
    }

    pub fn set_package_manager(&mut self, pm: PackageManager) {
        self.package_manager = pm;
    }

    /// Commands offered for this item, untranslated
    pub fn install_commands(&self) -> Vec<InstallCommand> {
        let mut commands = vec![InstallCommand {
            label: "Add",
            base: self.item.scaffold_command(),
        }];
        if let Some(deps) = self.item.dependency_command() {
            commands.push(InstallCommand {
                label: "Dependencies",
                base: deps,
            });
        }
        commands
    }

    /// Scaffolding command for the active package manager
    pub fn scaffold_command(&self) -> String {
        synthesize(&self.item.scaffold_command(), self.package_manager)
    }

    /// Dependency install command for the active package manager
    pub fn dependency_command(&self) -> Option<String> {
        self.item
            .dependency_command()
            .map(|cmd| synthesize(&cmd, self.package_manager))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Device frame
    // ─────────────────────────────────────────────────────────────────────────

    pub fn device(&self) -> DeviceMode {
        self.device
    }

    pub fn supports_device_frame(&self) -> bool {
        self.item.kind == ItemKind::Dashboard
    }

    /// Switch the simulated device, remounting the preview if it changed
    pub fn set_device(&mut self, mode: DeviceMode) {
        if !self.supports_device_frame() || mode == self.device {
            return;
        }
        self.device = mode;
        self.reload.bump();
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Copy acknowledgement
    // ─────────────────────────────────────────────────────────────────────────

    pub fn copy(&mut self, sink: &mut dyn ClipboardSink, text: &str, now: Instant) -> bool {
        self.copy.copy(sink, text, now)
    }

    pub fn is_copied(&self, now: Instant) -> bool {
        self.copy.is_copied(now)
    }

    pub fn tick(&mut self, now: Instant) {
        self.copy.tick(now);
    }
}

impl Drop for ModalSession {
    fn drop(&mut self) {
        if let PreviewState::Ready(preview) = &mut self.preview {
            if self.mounted_key.is_some() {
                preview.unmount();
            }
        }
    }
}

/// Owner of the single open modal session
#[derive(Default)]
pub struct ModalHost {
    session: Option<ModalSession>,
    last_generation: u64,
    package_manager: PackageManager,
}

impl ModalHost {
    pub fn new(package_manager: PackageManager) -> Self {
        Self {
            session: None,
            last_generation: 0,
            package_manager,
        }
    }

    /// Open `item`, replacing any open session; returns the new generation
    pub fn open(&mut self, item: CatalogItem) -> u64 {
        if let Some(pm) = self.session.as_ref().map(|s| s.package_manager) {
            self.package_manager = pm;
        }
        self.last_generation += 1;
        tracing::debug!("Opening {} (generation {})", item.slug, self.last_generation);
        self.session = Some(ModalSession::new(
            item,
            self.last_generation,
            self.package_manager,
        ));
        self.last_generation
    }

    pub fn close(&mut self) -> Option<String> {
        let session = self.session.take()?;
        self.package_manager = session.package_manager;
        Some(session.item.slug.clone())
    }

    pub fn session(&self) -> Option<&ModalSession> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut ModalSession> {
        self.session.as_mut()
    }

    /// Package manager the next session starts with
    pub fn package_manager(&self) -> PackageManager {
        self.session
            .as_ref()
            .map(|s| s.package_manager)
            .unwrap_or(self.package_manager)
    }

    /// Apply a load result; returns false if it belongs to a superseded session
    pub fn apply(&mut self, message: LoadMessage) -> bool {
        match self.session.as_mut() {
            Some(session) if session.generation == message.generation => {
                session.apply(message.payload);
                true
            }
            _ => {
                tracing::debug!("Discarding stale load result (generation {})", message.generation);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::catalog::{CatalogFile, PreviewSpec};
    use crate::services::clipboard::testing::MemoryClipboard;
    use ratatui::{layout::Rect, Frame};
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct MountLog {
        mounts: Vec<u64>,
        unmounts: usize,
    }

    struct Probe(Arc<Mutex<MountLog>>);

    impl Renderable for Probe {
        fn mount(&mut self, key: u64) {
            self.0.lock().unwrap().mounts.push(key);
        }

        fn unmount(&mut self) {
            self.0.lock().unwrap().unmounts += 1;
        }

        fn draw(&self, _frame: &mut Frame, _area: Rect) {}
    }

    fn create_item(slug: &str, kind: ItemKind, files: &[&str], deps: &[&str]) -> CatalogItem {
        CatalogItem {
            slug: slug.to_string(),
            name: slug.to_string(),
            description: String::new(),
            kind,
            category: "test".to_string(),
            dependencies: deps.iter().map(|d| d.to_string()).collect(),
            install: None,
            files: files
                .iter()
                .map(|f| CatalogFile::inline(f, ""))
                .collect(),
            preview: PreviewSpec::default(),
        }
    }

    fn file_loaded(generation: u64, name: &str, code: &str) -> LoadMessage {
        LoadMessage {
            generation,
            payload: LoadPayload::File {
                name: name.to_string(),
                result: Ok(code.to_string()),
            },
        }
    }

    fn file_failed(generation: u64, name: &str) -> LoadMessage {
        LoadMessage {
            generation,
            payload: LoadPayload::File {
                name: name.to_string(),
                result: Err(LoadError::Invalid("boom".to_string())),
            },
        }
    }

    fn preview_loaded(generation: u64, log: &Arc<Mutex<MountLog>>) -> LoadMessage {
        LoadMessage {
            generation,
            payload: LoadPayload::Preview(Ok(Box::new(Probe(Arc::clone(log))))),
        }
    }

    #[test]
    fn test_open_starts_on_preview_pane() {
        let mut host = ModalHost::default();
        host.open(create_item("a", ItemKind::Component, &["a.tsx"], &[]));
        let session = host.session().unwrap();

        assert_eq!(session.pane(), Pane::Preview);
        assert_eq!(session.selected_file(), None);
        assert_eq!(session.reload_token(), 0);
        assert!(session.is_loading());
        assert_eq!(session.code_text(), LOADING_PLACEHOLDER);
    }

    #[test]
    fn test_superseded_results_are_discarded() {
        let log = Arc::new(Mutex::new(MountLog::default()));
        let mut host = ModalHost::default();
        let gen_a = host.open(create_item("a", ItemKind::Component, &["a.tsx", "shared.tsx"], &[]));
        let gen_b = host.open(create_item("b", ItemKind::Component, &["b.tsx", "shared.tsx"], &[]));

        assert!(!host.apply(file_loaded(gen_a, "a.tsx", "from a")));
        assert!(!host.apply(file_loaded(gen_a, "shared.tsx", "from a")));
        assert!(!host.apply(preview_loaded(gen_a, &log)));

        assert!(host.apply(file_loaded(gen_b, "b.tsx", "from b")));
        assert!(host.apply(file_loaded(gen_b, "shared.tsx", "shared b")));

        let session = host.session().unwrap();
        assert_eq!(session.item().slug, "b");
        assert_eq!(session.file_state("a.tsx"), None);
        assert_eq!(
            session.file_state("shared.tsx"),
            Some(&FileState::Loaded("shared b".to_string()))
        );
        assert!(matches!(session.preview_state(), PreviewState::Pending));
    }

    #[test]
    fn test_results_after_close_are_discarded() {
        let mut host = ModalHost::default();
        let generation = host.open(create_item("a", ItemKind::Block, &["a.tsx"], &[]));
        assert_eq!(host.close().as_deref(), Some("a"));
        assert!(!host.apply(file_loaded(generation, "a.tsx", "late")));
        assert!(host.session().is_none());
    }

    #[test]
    fn test_auto_selects_first_file_once_loaded() {
        let mut host = ModalHost::default();
        let generation = host.open(create_item("a", ItemKind::Block, &["a.tsx", "b.tsx"], &[]));

        host.apply(file_loaded(generation, "b.tsx", "b"));
        assert_eq!(host.session().unwrap().selected_file(), None);

        host.apply(file_loaded(generation, "a.tsx", "a"));
        assert_eq!(host.session().unwrap().selected_file(), Some("a.tsx"));
    }

    #[test]
    fn test_auto_select_keeps_existing_selection() {
        let mut host = ModalHost::default();
        let generation = host.open(create_item("a", ItemKind::Block, &["a.tsx", "b.tsx"], &[]));
        host.session_mut().unwrap().select_file("b.tsx");

        host.apply(file_loaded(generation, "a.tsx", "a"));
        host.apply(file_loaded(generation, "b.tsx", "b"));
        assert_eq!(host.session().unwrap().selected_file(), Some("b.tsx"));
    }

    #[test]
    fn test_partial_failure_keeps_other_files() {
        let mut host = ModalHost::default();
        let generation = host.open(create_item("a", ItemKind::Block, &["a.tsx", "b.tsx"], &[]));
        host.apply(file_failed(generation, "a.tsx"));
        host.apply(file_loaded(generation, "b.tsx", "const b = 1"));

        let session = host.session_mut().unwrap();
        assert_eq!(session.loaded_file_count(), 1);
        assert!(matches!(session.file_state("a.tsx"), Some(FileState::Failed(_))));
        assert!(session.code_text().starts_with("Could not load a.tsx"));

        session.select_file("b.tsx");
        assert_eq!(session.code_text(), "const b = 1");
    }

    #[test]
    fn test_selecting_unknown_file_shows_fallback() {
        let mut host = ModalHost::default();
        host.open(create_item("a", ItemKind::Block, &["a.tsx"], &[]));
        let session = host.session_mut().unwrap();
        session.select_file("missing.tsx");
        assert_eq!(session.code_text(), "No content available for missing.tsx");
    }

    #[test]
    fn test_step_file_wraps() {
        let mut host = ModalHost::default();
        host.open(create_item("a", ItemKind::Block, &["a.tsx", "b.tsx", "c.tsx"], &[]));
        let session = host.session_mut().unwrap();

        session.step_file(1);
        assert_eq!(session.selected_file(), Some("a.tsx"));
        session.step_file(-1);
        assert_eq!(session.selected_file(), Some("c.tsx"));
        session.step_file(1);
        assert_eq!(session.selected_file(), Some("a.tsx"));
    }

    #[test]
    fn test_reload_token_increases() {
        let mut host = ModalHost::default();
        host.open(create_item("a", ItemKind::Block, &[], &[]));
        let session = host.session_mut().unwrap();
        assert_eq!(session.reload(), 1);
        assert_eq!(session.reload(), 2);
        assert_eq!(session.reload_token(), 2);
    }

    #[test]
    fn test_reopen_resets_session_state() {
        let mut host = ModalHost::default();
        let generation = host.open(create_item("a", ItemKind::Block, &["a.tsx"], &[]));
        host.apply(file_loaded(generation, "a.tsx", "a"));
        host.session_mut().unwrap().reload();
        host.session_mut().unwrap().set_pane(Pane::Code);

        host.open(create_item("b", ItemKind::Block, &["b.tsx"], &[]));
        let session = host.session().unwrap();
        assert_eq!(session.reload_token(), 0);
        assert_eq!(session.pane(), Pane::Preview);
        assert_eq!(session.selected_file(), None);
        assert_eq!(session.loaded_file_count(), 0);
    }

    #[test]
    fn test_remount_on_reload_and_unmount_on_close() {
        let log = Arc::new(Mutex::new(MountLog::default()));
        let mut host = ModalHost::default();
        let generation = host.open(create_item("a", ItemKind::Component, &[], &[]));
        host.apply(preview_loaded(generation, &log));

        let session = host.session_mut().unwrap();
        session.sync_mount();
        session.sync_mount();
        session.reload();
        session.sync_mount();
        assert_eq!(log.lock().unwrap().mounts, vec![0, 1]);
        assert_eq!(log.lock().unwrap().unmounts, 1);

        host.close();
        assert_eq!(log.lock().unwrap().unmounts, 2);
    }

    #[test]
    fn test_device_switch_remounts_without_touching_selection() {
        let mut host = ModalHost::default();
        let generation = host.open(create_item("d", ItemKind::Dashboard, &["page.tsx"], &[]));
        host.apply(file_loaded(generation, "page.tsx", "x"));

        let session = host.session_mut().unwrap();
        session.set_pane(Pane::Code);
        let before = session.reload_token();

        session.set_device(DeviceMode::Mobile);

        assert!(session.reload_token() > before);
        assert_eq!(session.device(), DeviceMode::Mobile);
        assert_eq!(session.selected_file(), Some("page.tsx"));
        assert_eq!(session.pane(), Pane::Code);
    }

    #[test]
    fn test_device_switch_ignored_for_components() {
        let mut host = ModalHost::default();
        host.open(create_item("c", ItemKind::Component, &[], &[]));
        let session = host.session_mut().unwrap();
        session.set_device(DeviceMode::Tablet);
        assert_eq!(session.device(), DeviceMode::Desktop);
        assert_eq!(session.reload_token(), 0);
    }

    #[test]
    fn test_package_manager_carries_to_next_session() {
        let mut host = ModalHost::new(PackageManager::Npm);
        host.open(create_item("a", ItemKind::Block, &[], &[]));
        host.session_mut()
            .unwrap()
            .set_package_manager(PackageManager::Bun);
        host.open(create_item("b", ItemKind::Block, &[], &[]));
        assert_eq!(host.session().unwrap().package_manager(), PackageManager::Bun);
    }

    #[test]
    fn test_component_walkthrough() {
        let log = Arc::new(Mutex::new(MountLog::default()));
        let mut host = ModalHost::new(PackageManager::Npm);
        let generation = host.open(create_item(
            "button",
            ItemKind::Component,
            &["demo.tsx", "button.tsx"],
            &["lucide-react"],
        ));
        host.apply(preview_loaded(generation, &log));
        host.apply(file_loaded(generation, "demo.tsx", "<Button />"));
        host.apply(file_loaded(generation, "button.tsx", "export function Button() {}"));

        let session = host.session_mut().unwrap();
        assert_eq!(session.pane(), Pane::Preview);
        assert_eq!(session.loaded_file_count(), 2);
        assert!(!session.is_loading());

        session.set_pane(Pane::Code);
        session.select_file("button.tsx");
        assert_eq!(session.code_text(), "export function Button() {}");

        session.set_package_manager(PackageManager::Pnpm);
        let command = session.dependency_command().unwrap();
        assert_eq!(command, "pnpm add lucide-react");

        let mut clipboard = MemoryClipboard::default();
        let now = Instant::now();
        assert!(session.copy(&mut clipboard, &command, now));
        assert!(session.is_copied(now));
        assert_eq!(clipboard.writes, vec!["pnpm add lucide-react".to_string()]);
    }
}
