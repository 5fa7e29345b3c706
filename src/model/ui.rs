//! UI state - presentation state separate from domain data

use crate::model::catalog::ItemKind;

/// Main application mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppMode {
    Splash,
    Browse,
    /// Full-page view of one catalog item
    ItemPage { slug: String },
}

/// Container the preview modal is drawn in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    /// Centered overlay with a vertical file sidebar
    Dialog,
    /// Bottom sheet with a horizontal file tab strip
    Drawer,
}

impl Surface {
    /// Pick the surface for the current responsive state
    pub fn choose(is_narrow: bool) -> Surface {
        if is_narrow {
            Surface::Drawer
        } else {
            Surface::Dialog
        }
    }
}

/// Width below which the terminal counts as narrow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Breakpoint {
    pub narrow_below: u16,
}

impl Default for Breakpoint {
    fn default() -> Self {
        Self { narrow_below: 100 }
    }
}

/// Current terminal size, updated on every resize
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
    pub breakpoint: Breakpoint,
}

impl Viewport {
    pub fn new(width: u16, height: u16, breakpoint: Breakpoint) -> Self {
        Self {
            width,
            height,
            breakpoint,
        }
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    pub fn is_narrow(&self) -> bool {
        self.width < self.breakpoint.narrow_below
    }

    pub fn surface(&self) -> Surface {
        Surface::choose(self.is_narrow())
    }
}

/// Tab selection in the browser
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tab(pub ItemKind);

impl Tab {
    pub fn all() -> Vec<Tab> {
        ItemKind::all().into_iter().map(Tab).collect()
    }

    pub fn name(&self) -> &str {
        self.0.plural()
    }

    pub fn kind(&self) -> ItemKind {
        self.0
    }
}
