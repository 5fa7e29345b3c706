//! Action enum - All possible application actions
//!
//! Components turn key events into Actions; the App applies them to state.

use crate::model::session::Pane;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Regular tick for animations, load polling and copy acknowledgements
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Quit without confirmation
    ForceQuit,
    /// Transition from splash to the browser
    SplashComplete,

    // ─────────────────────────────────────────────────────────────────────────
    // Browser Navigation
    // ─────────────────────────────────────────────────────────────────────────
    NextItem,
    PrevItem,
    NextTab,
    PrevTab,
    FirstItem,
    LastItem,

    // ─────────────────────────────────────────────────────────────────────────
    // Search
    // ─────────────────────────────────────────────────────────────────────────
    EnterSearchMode,
    ExitSearchMode,
    SearchInput(char),
    SearchBackspace,

    // ─────────────────────────────────────────────────────────────────────────
    // Overlays
    // ─────────────────────────────────────────────────────────────────────────
    OpenQuitDialog,
    OpenHelp,
    /// Close the top overlay
    CloseModal,
    /// Confirm the top overlay
    ConfirmModal,
    ScrollUp,
    ScrollDown,

    // ─────────────────────────────────────────────────────────────────────────
    // Preview Modal
    // ─────────────────────────────────────────────────────────────────────────
    /// Open the preview modal for the selected item
    OpenPreview,
    SetPane(Pane),
    TogglePane,
    NextFile,
    PrevFile,
    CyclePackageManager,
    CopyScaffoldCommand,
    CopyDependencyCommand,
    CopyFileCode,
    ReloadPreview,
    /// Cycle the simulated device (dashboards only)
    CycleDevice,

    // ─────────────────────────────────────────────────────────────────────────
    // Full Page
    // ─────────────────────────────────────────────────────────────────────────
    /// Show the selected (or open) item on its own page
    OpenFullPage,
    /// Leave the full page and return to the browser
    BackToBrowse,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::ForceQuit => write!(f, "ForceQuit"),
            Action::SplashComplete => write!(f, "SplashComplete"),
            Action::NextItem => write!(f, "NextItem"),
            Action::PrevItem => write!(f, "PrevItem"),
            Action::NextTab => write!(f, "NextTab"),
            Action::PrevTab => write!(f, "PrevTab"),
            Action::FirstItem => write!(f, "FirstItem"),
            Action::LastItem => write!(f, "LastItem"),
            Action::EnterSearchMode => write!(f, "EnterSearchMode"),
            Action::ExitSearchMode => write!(f, "ExitSearchMode"),
            Action::SearchInput(c) => write!(f, "SearchInput('{}')", c),
            Action::SearchBackspace => write!(f, "SearchBackspace"),
            Action::OpenQuitDialog => write!(f, "OpenQuitDialog"),
            Action::OpenHelp => write!(f, "OpenHelp"),
            Action::CloseModal => write!(f, "CloseModal"),
            Action::ConfirmModal => write!(f, "ConfirmModal"),
            Action::ScrollUp => write!(f, "ScrollUp"),
            Action::ScrollDown => write!(f, "ScrollDown"),
            Action::OpenPreview => write!(f, "OpenPreview"),
            Action::SetPane(pane) => write!(f, "SetPane({})", pane.label()),
            Action::TogglePane => write!(f, "TogglePane"),
            Action::NextFile => write!(f, "NextFile"),
            Action::PrevFile => write!(f, "PrevFile"),
            Action::CyclePackageManager => write!(f, "CyclePackageManager"),
            Action::CopyScaffoldCommand => write!(f, "CopyScaffoldCommand"),
            Action::CopyDependencyCommand => write!(f, "CopyDependencyCommand"),
            Action::CopyFileCode => write!(f, "CopyFileCode"),
            Action::ReloadPreview => write!(f, "ReloadPreview"),
            Action::CycleDevice => write!(f, "CycleDevice"),
            Action::OpenFullPage => write!(f, "OpenFullPage"),
            Action::BackToBrowse => write!(f, "BackToBrowse"),
        }
    }
}
