//! StatusBoard — the most recently rendered status block.
//!
//! One writer (the reporter) and any number of readers (HTTP handlers).
//! Backed by a `watch` channel so a publish replaces the whole string at
//! once and readers never see a partial block.

use std::sync::Arc;

use tokio::sync::watch;

/// Shared handle to the exposed status text.
#[derive(Clone)]
pub struct StatusBoard {
    tx: Arc<watch::Sender<String>>,
}

impl StatusBoard {
    /// Text served before the first report completes.
    pub const PLACEHOLDER: &'static str = "Preparing";

    /// A board showing [`Self::PLACEHOLDER`].
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Self::PLACEHOLDER.to_string());
        Self { tx: Arc::new(tx) }
    }

    /// Replace the exposed text.
    pub fn publish(&self, text: String) {
        self.tx.send_replace(text);
    }

    /// Copy of the current text.
    pub fn current(&self) -> String {
        self.tx.borrow().clone()
    }
}

impl Default for StatusBoard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_placeholder() {
        assert_eq!(StatusBoard::new().current(), "Preparing");
    }

    #[test]
    fn publish_is_visible_through_clones() {
        let board = StatusBoard::new();
        let reader = board.clone();
        board.publish("a: 1\n".to_string());
        assert_eq!(reader.current(), "a: 1\n");
    }

    #[test]
    fn publish_replaces_whole_block() {
        let board = StatusBoard::new();
        board.publish("a: 1\nb: 2\n".to_string());
        board.publish("a: 3\n".to_string());
        assert_eq!(board.current(), "a: 3\n");
    }
}
