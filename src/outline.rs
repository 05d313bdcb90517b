//! Single-pass outline extraction over a document's lines.
//!
//! Children of a node are found by scanning forward from the line after it, looking
//! for headers one level deeper and for bibliography records. The scan ends at the
//! first header that is a sibling or ancestor of the scope being listed. Nothing is
//! cached: each call rebuilds the requested level from the lines it is given.

use crate::formats::{bibtex, markdown};
use crate::node::OutlineNode;
use tracing::{debug, trace};

#[must_use]
/// Top-level nodes of the document.
pub fn root_children<S: AsRef<str>>(lines: &[S]) -> Vec<OutlineNode> {
    children(None, lines)
}

#[must_use]
/// Immediate children of `parent`, or of the document root when `parent` is `None`.
///
/// `parent` must have been extracted from the same `lines`. Bibliography entries are
/// leaves and always yield an empty list.
pub fn children<S: AsRef<str>>(parent: Option<&OutlineNode>, lines: &[S]) -> Vec<OutlineNode> {
    match parent {
        Some(node) if node.is_leaf() => Vec::new(),
        Some(node) => scan(lines, node.line_start + 1, node.depth + 1),
        None => scan(lines, 0, 1),
    }
}

fn scan<S: AsRef<str>>(lines: &[S], start: usize, target_depth: usize) -> Vec<OutlineNode> {
    let mut nodes = Vec::new();
    let marker = markdown::marker(target_depth);
    let mut i = start;

    while i < lines.len() {
        let line = lines[i].as_ref();

        if line.starts_with(&marker) {
            // Deeper headers still match the marker prefix and keep their own depth.
            let depth = markdown::heading_depth(line);
            let end = markdown::section_end(lines, i + 1, depth);
            trace!(line = i, depth, "header");
            nodes.push(OutlineNode::header(
                markdown::heading_text(line),
                depth,
                i,
                end,
            ));
            i = end;
        } else if bibtex::is_entry(line) {
            let Some(key) = bibtex::citation_key(line) else {
                debug!(line = i, "skipping entry without a citation key");
                i += 1;
                continue;
            };
            let Some(end) = bibtex::record_end(lines, i) else {
                debug!(line = i, key, "unterminated entry, stopping scan");
                return nodes;
            };
            let record = lines[i..=end]
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<&str>>()
                .join("\n");
            trace!(line = i, key, "entry");
            nodes.push(OutlineNode::entry(
                key,
                bibtex::display_title(&record),
                i,
                end + 1,
            ));
            i = end + 1;
        } else if (1..=target_depth).contains(&markdown::heading_depth(line)) {
            break;
        } else {
            i += 1;
        }
    }

    nodes
}

#[cfg(test)]
#[path = "tests/outline.rs"]
mod tests;
