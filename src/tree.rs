//! Fully expanded outline trees.
//!
//! The extractor only ever lists one level at a time. This module drives it
//! recursively to materialise the whole outline, which is what the JSON output and
//! tests want to look at.

use crate::node::OutlineNode;
use crate::outline;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// A node together with all of its descendants.
pub struct OutlineTree {
    /// The node at this position.
    #[serde(flatten)]
    pub node: OutlineNode,
    /// Immediate children in document order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<OutlineTree>,
}

#[must_use]
/// Expands every node of the document outline.
pub fn build<S: AsRef<str>>(lines: &[S]) -> Vec<OutlineTree> {
    expand(None, lines)
}

fn expand<S: AsRef<str>>(parent: Option<&OutlineNode>, lines: &[S]) -> Vec<OutlineTree> {
    outline::children(parent, lines)
        .into_iter()
        .map(|node| {
            let children = expand(Some(&node), lines);
            OutlineTree { node, children }
        })
        .collect()
}

impl OutlineTree {
    #[must_use]
    /// Number of nodes in this subtree, including itself.
    pub fn node_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(OutlineTree::node_count)
            .sum::<usize>()
    }
}

#[cfg(test)]
#[path = "tests/tree.rs"]
mod tests;
