//! Outline node representation for hybrid markdown and bibliography documents.
//!
//! A node is either a section header (which may contain further nodes) or a
//! bibliography entry (always a leaf). Nodes carry no reference to their parent
//! or children: the tree is recomputed on demand from line offsets, so a node is
//! only meaningful against the document text it was extracted from.

use serde::Serialize;

/// Depth reserved for bibliography entries, distinct from any heading depth.
pub const LEAF_DEPTH: usize = usize::MAX;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// A header or bibliography entry anchored to a contiguous line range.
pub struct OutlineNode {
    /// Heading text without markers, or the entry's citation key.
    pub label: String,
    /// Entry title (or booktitle) with whitespace collapsed; empty for headers.
    pub secondary_text: String,
    /// Count of leading `#` for headers, [`LEAF_DEPTH`] for entries.
    pub depth: usize,
    /// First line of the node (the heading line or the `@` line).
    pub line_start: usize,
    /// One past the last line covered by the node.
    pub line_end: usize,
    /// Whether the node may have children.
    pub expandable: bool,
}

impl OutlineNode {
    #[must_use]
    /// Builds a section header node spanning `[line_start, line_end)`.
    pub fn header(
        label: impl Into<String>,
        depth: usize,
        line_start: usize,
        line_end: usize,
    ) -> Self {
        Self {
            label: label.into(),
            secondary_text: String::new(),
            depth,
            line_start,
            line_end,
            expandable: true,
        }
    }

    #[must_use]
    /// Builds a bibliography entry leaf spanning `[line_start, line_end)`.
    pub fn entry(
        key: impl Into<String>,
        title: impl Into<String>,
        line_start: usize,
        line_end: usize,
    ) -> Self {
        Self {
            label: key.into(),
            secondary_text: title.into(),
            depth: LEAF_DEPTH,
            line_start,
            line_end,
            expandable: false,
        }
    }

    #[must_use]
    /// True for bibliography entries.
    pub fn is_leaf(&self) -> bool {
        self.depth == LEAF_DEPTH
    }
}
