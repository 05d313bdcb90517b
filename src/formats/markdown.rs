//! Markdown-style headers made of repeated `#` markers.
//!
//! Header detection is purely lexical: a line is a header of depth N when it begins
//! with N `#` characters. No space is required after the markers and ATX closing
//! sequences are not stripped.

use crate::formats::Format;
use crate::node::OutlineNode;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

/// Character repeated to mark header depth.
pub const HEADER_MARKER: char = '#';

/// Display rules for section headers.
pub struct MarkdownFormat;

impl Format for MarkdownFormat {
    fn format_node_display(&self, node: &OutlineNode, expanded: bool) -> Line<'static> {
        let color = match node.depth {
            1 => Color::Cyan,
            2 => Color::Green,
            3 => Color::Yellow,
            _ => Color::Magenta,
        };
        let toggle = if expanded { "▾ " } else { "▸ " };

        Line::from(vec![
            Span::styled(toggle, Style::default().fg(color)),
            Span::styled(
                node.label.clone(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
        ])
    }
}

#[must_use]
/// The marker prefix that opens a header of `depth`.
pub fn marker(depth: usize) -> String {
    HEADER_MARKER.to_string().repeat(depth)
}

#[must_use]
/// Number of leading `#` characters, zero for non-header lines.
pub fn heading_depth(line: &str) -> usize {
    line.chars().take_while(|&c| c == HEADER_MARKER).count()
}

#[must_use]
/// Heading text with all leading markers stripped and surrounding whitespace trimmed.
pub fn heading_text(line: &str) -> &str {
    line.trim_start_matches(HEADER_MARKER).trim()
}

#[must_use]
/// Index of the first line at or after `from` that opens a header of `depth` or
/// shallower, or the line count when the section runs to the end of the document.
pub fn section_end<S: AsRef<str>>(lines: &[S], from: usize, depth: usize) -> usize {
    (from..lines.len())
        .find(|&i| {
            let found = heading_depth(lines[i].as_ref());
            found > 0 && found <= depth
        })
        .unwrap_or(lines.len())
}
