//! Clipboard access and the "copied" acknowledgement window

use std::time::{Duration, Instant};
use thiserror::Error;

/// How long the "copied" acknowledgement stays visible
pub const COPY_ACK_WINDOW: Duration = Duration::from_millis(2000);

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
    #[error("clipboard write failed: {0}")]
    Write(String),
}

/// Something text can be written to
pub trait ClipboardSink {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// The platform clipboard
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self { inner: None }
    }

    fn handle(&mut self) -> Result<&mut arboard::Clipboard, ClipboardError> {
        if self.inner.is_none() {
            let clipboard =
                arboard::Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
            self.inner = Some(clipboard);
        }
        self.inner
            .as_mut()
            .ok_or_else(|| ClipboardError::Unavailable("not initialized".to_string()))
    }
}

impl ClipboardSink for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let clipboard = self.handle()?;
        clipboard
            .set_text(text.to_string())
            .map_err(|e| ClipboardError::Write(e.to_string()))
    }
}

/// Tracks the acknowledgement shown after a successful copy
///
/// Only one reset deadline exists at a time: a copy inside the window
/// replaces it.
#[derive(Debug, Clone, Default)]
pub struct CopyCoordinator {
    reset_at: Option<Instant>,
}

impl CopyCoordinator {
    pub fn new() -> Self {
        Self { reset_at: None }
    }

    /// Write `text` to `sink`, returning whether it succeeded
    pub fn copy(&mut self, sink: &mut dyn ClipboardSink, text: &str, now: Instant) -> bool {
        match sink.write_text(text) {
            Ok(()) => {
                self.reset_at = Some(now + COPY_ACK_WINDOW);
                tracing::debug!("Copied {} bytes to clipboard", text.len());
                true
            }
            Err(e) => {
                tracing::warn!("Copy to clipboard failed: {}", e);
                false
            }
        }
    }

    /// Whether the acknowledgement is showing at `now`
    pub fn is_copied(&self, now: Instant) -> bool {
        self.reset_at.is_some_and(|deadline| now < deadline)
    }

    /// Drop an expired deadline
    pub fn tick(&mut self, now: Instant) {
        if self.reset_at.is_some_and(|deadline| now >= deadline) {
            self.reset_at = None;
        }
    }
}
