//! Adapter between a live document and a tree-display host.
//!
//! The host asks for children one level at a time, tells the provider when a node
//! is activated or selected, and subscribes to the change signal so it knows when
//! to ask again. The provider itself only forwards to the stateless extractor and
//! never caches nodes between calls.

use crate::input;
use crate::node::OutlineNode;
use crate::outline;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Supplies the current document text as lines.
pub trait DocumentSource {
    /// Current lines, or `None` when there is no document to outline.
    fn lines(&self) -> Option<Vec<String>>;
}

/// Document text held in memory.
pub struct TextDocument {
    text: String,
}

impl TextDocument {
    #[must_use]
    /// Wraps document text.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Replaces the document text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}

impl DocumentSource for TextDocument {
    fn lines(&self) -> Option<Vec<String>> {
        Some(input::split_lines(&self.text))
    }
}

/// A document on disk, re-read on every request.
pub struct FileDocument {
    path: PathBuf,
}

impl FileDocument {
    #[must_use]
    /// Points at a file; nothing is read until lines are requested.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    /// Location of the document.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DocumentSource for FileDocument {
    fn lines(&self) -> Option<Vec<String>> {
        match input::read_lines(&self.path) {
            Ok(lines) => Some(lines),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "cannot read document");
                None
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Request to scroll the host view so `line` is at the top.
pub struct Reveal {
    /// Zero-based line to bring into view.
    pub line: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Half-open line range `[start, end)` for the host to select.
pub struct LineRange {
    /// First selected line.
    pub start: usize,
    /// One past the last selected line.
    pub end: usize,
}

impl LineRange {
    #[must_use]
    /// Text of the selected lines joined by newlines, clamped to the document.
    pub fn text<S: AsRef<str>>(&self, lines: &[S]) -> String {
        let end = self.end.min(lines.len());
        let start = self.start.min(end);
        lines[start..end]
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<&str>>()
            .join("\n")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// Handle returned by [`OutlineProvider::subscribe`].
pub struct SubscriptionId(usize);

type Listener = Box<dyn FnMut()>;

/// Serves outline levels for a document and broadcasts change notifications.
pub struct OutlineProvider<D> {
    source: D,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: usize,
}

impl<D: DocumentSource> OutlineProvider<D> {
    #[must_use]
    /// Creates a provider with no subscribers.
    pub fn new(source: D) -> Self {
        Self {
            source,
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    #[must_use]
    /// The underlying document.
    pub fn source(&self) -> &D {
        &self.source
    }

    /// Mutable access to the document. Callers should follow edits with
    /// [`notify_changed`](Self::notify_changed).
    pub fn source_mut(&mut self) -> &mut D {
        &mut self.source
    }

    #[must_use]
    /// Current document lines, empty when no document is available.
    pub fn lines(&self) -> Vec<String> {
        self.source.lines().unwrap_or_default()
    }

    #[must_use]
    /// Top-level nodes of the current document.
    pub fn root_children(&self) -> Vec<OutlineNode> {
        self.children(None)
    }

    #[must_use]
    /// Children of `node`, or of the root when `node` is `None`.
    pub fn children(&self, node: Option<&OutlineNode>) -> Vec<OutlineNode> {
        match self.source.lines() {
            Some(lines) => outline::children(node, &lines),
            None => Vec::new(),
        }
    }

    #[must_use]
    #[allow(clippy::unused_self)]
    /// Where the host should scroll when `node` is activated.
    pub fn navigate(&self, node: &OutlineNode) -> Reveal {
        Reveal {
            line: node.line_start,
        }
    }

    #[must_use]
    #[allow(clippy::unused_self)]
    /// Which lines the host should select for `node`.
    pub fn select(&self, node: &OutlineNode) -> LineRange {
        LineRange {
            start: node.line_start,
            end: node.line_end,
        }
    }

    /// Registers a listener called on every [`notify_changed`](Self::notify_changed).
    pub fn subscribe(&mut self, listener: impl FnMut() + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    /// Tells every subscriber that previously returned nodes are stale.
    pub fn notify_changed(&mut self) {
        debug!(listeners = self.listeners.len(), "outline changed");
        for (_, listener) in &mut self.listeners {
            listener();
        }
    }
}

#[cfg(test)]
#[path = "tests/provider.rs"]
mod tests;
