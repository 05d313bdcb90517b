//! Line conventions recognised in a hybrid notes document.
//!
//! Headers follow the `#`-repetition convention (see [`markdown`]) and bibliography
//! records follow the `@type{key, field = value, ...}` convention (see [`bibtex`]).
//! Each format also decides how its nodes are drawn in the outline panel.

use crate::node::OutlineNode;
use ratatui::text::Line;

pub mod bibtex;
pub mod markdown;

/// Display rules for the nodes a format produces.
pub trait Format {
    /// Renders a node as a single outline row, without tree indentation.
    fn format_node_display(&self, node: &OutlineNode, expanded: bool) -> Line<'static>;
}

#[must_use]
/// Picks the format responsible for drawing `node`.
pub fn format_for(node: &OutlineNode) -> &'static dyn Format {
    if node.is_leaf() {
        &bibtex::BibtexFormat
    } else {
        &markdown::MarkdownFormat
    }
}
