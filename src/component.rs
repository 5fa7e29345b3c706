//! Component trait and the preview content hosted by the modal

use crate::action::Action;
use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

/// A screen or overlay with its own view state
///
/// Key events become Actions in `handle_key_event`; state only changes in
/// `update`, which the App calls for every Action it processes.
pub trait Component {
    /// Called once before the first draw
    fn init(&mut self) -> Result<()> {
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let _ = key;
        Ok(None)
    }

    /// Apply an Action; may return a follow-up Action
    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        let _ = action;
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()>;
}

/// Live preview content hosted inside the preview pane
///
/// Nothing is assumed about what gets drawn. The host mounts the content
/// with a key and mounts it again whenever the key changes, which resets
/// any state the content keeps between frames.
pub trait Renderable: Send {
    /// Called before the first draw and whenever the remount key changes
    fn mount(&mut self, key: u64);

    /// Called before a remount and when the hosting session goes away
    fn unmount(&mut self) {}

    fn draw(&self, frame: &mut Frame, area: Rect);
}
