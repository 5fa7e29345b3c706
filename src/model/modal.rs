//! Overlay stack
//!
//! Overlays are drawn bottom to top; only the top one receives input. The
//! preview modal's own state lives in `ModalHost`, the stack only records
//! that it is showing and what sits above it.

/// An overlay drawn on top of the main UI
#[derive(Debug, Clone, PartialEq)]
pub enum Modal {
    /// Preview/code modal for the open session
    Preview,
    /// Keyboard shortcut reference
    Help,
    /// Quit confirmation dialog
    QuitConfirm,
}

#[derive(Debug, Default)]
pub struct ModalStack {
    stack: Vec<Modal>,
}

impl ModalStack {
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    pub fn push(&mut self, modal: Modal) {
        self.stack.push(modal);
    }

    pub fn pop(&mut self) -> Option<Modal> {
        self.stack.pop()
    }

    pub fn top(&self) -> Option<&Modal> {
        self.stack.last()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn contains(&self, modal: &Modal) -> bool {
        self.stack.contains(modal)
    }

    /// Drop `modal` wherever it sits, keeping everything else in order
    pub fn remove(&mut self, modal: &Modal) {
        self.stack.retain(|m| m != modal);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Modal> {
        self.stack.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modal_stack_push_pop() {
        let mut stack = ModalStack::new();
        assert!(stack.top().is_none());

        stack.push(Modal::Preview);
        stack.push(Modal::QuitConfirm);

        assert_eq!(stack.pop(), Some(Modal::QuitConfirm));
        assert_eq!(stack.pop(), Some(Modal::Preview));
        assert!(stack.is_empty());
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut stack = ModalStack::new();
        stack.push(Modal::Preview);
        stack.push(Modal::Help);
        stack.remove(&Modal::Preview);

        assert!(!stack.contains(&Modal::Preview));
        assert_eq!(stack.top(), Some(&Modal::Help));
    }
}
