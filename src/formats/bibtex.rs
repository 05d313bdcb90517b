//! Bibliography records in a BibTeX-like `@type{key, field = value, ...}` syntax.
//!
//! Records are located by naive brace counting and their fields are pulled out with
//! regular expressions. Neither step understands quoting: a `{` or `}` inside a
//! quoted value still moves the brace balance, and a braced field value is only
//! captured whole when it contains no nested braces.

use crate::formats::Format;
use crate::node::OutlineNode;
use lazy_static::lazy_static;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use regex::Regex;

/// Character that opens a bibliography record.
pub const ENTRY_MARKER: char = '@';

lazy_static! {
    /// Opening brace through the first comma, e.g. `{knuth1984,`.
    static ref KEY_PATTERN: Regex = Regex::new(r"\{[^,]*,").unwrap();

    /// `title = value` where value is `{...}`, `"..."` or a bare token.
    static ref TITLE_PATTERN: Regex = field_pattern("title");

    /// `booktitle = value`, consulted when no title is present.
    static ref BOOKTITLE_PATTERN: Regex = field_pattern("booktitle");
}

fn field_pattern(name: &str) -> Regex {
    Regex::new(&format!(
        r#"(?i)(?:^|[\s,]){name}\s*=\s*(\{{[^{{}}]*\}}|"[^"]*"|[^,}}\n]+)"#
    ))
    .unwrap()
}

/// Display rules for bibliography entries.
pub struct BibtexFormat;

impl Format for BibtexFormat {
    fn format_node_display(&self, node: &OutlineNode, _expanded: bool) -> Line<'static> {
        let mut spans = vec![
            Span::styled("• ", Style::default().fg(Color::Blue)),
            Span::styled(
                node.label.clone(),
                Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            ),
        ];
        if !node.secondary_text.is_empty() {
            spans.push(Span::styled(
                format!("  {}", node.secondary_text),
                Style::default().fg(Color::DarkGray),
            ));
        }
        Line::from(spans)
    }
}

#[must_use]
/// True when the line opens a bibliography record.
pub fn is_entry(line: &str) -> bool {
    line.starts_with(ENTRY_MARKER)
}

#[must_use]
/// Citation key between the first `{` and the following comma.
///
/// Returns `None` for malformed record openings such as `@misc{key}`.
pub fn citation_key(line: &str) -> Option<&str> {
    let found = KEY_PATTERN.find(line)?.as_str();
    Some(&found[1..found.len() - 1])
}

#[must_use]
/// Count of `{` minus count of `}` on a line.
pub fn brace_delta(line: &str) -> isize {
    line.chars().fold(0, |balance, c| match c {
        '{' => balance + 1,
        '}' => balance - 1,
        _ => balance,
    })
}

#[must_use]
/// Index of the line on which the record opened at `start` balances its braces.
///
/// Returns `None` when the document ends while braces are still open.
pub fn record_end<S: AsRef<str>>(lines: &[S], start: usize) -> Option<usize> {
    let mut balance = brace_delta(lines.get(start)?.as_ref());
    let mut end = start;
    while balance > 0 {
        end += 1;
        balance += brace_delta(lines.get(end)?.as_ref());
    }
    Some(end)
}

#[must_use]
/// The record's `title`, falling back to `booktitle`, or an empty string.
pub fn display_title(record: &str) -> String {
    field_value(&TITLE_PATTERN, record)
        .or_else(|| field_value(&BOOKTITLE_PATTERN, record))
        .unwrap_or_default()
}

fn field_value(pattern: &Regex, record: &str) -> Option<String> {
    let raw = pattern.captures(record)?.get(1)?.as_str().trim();
    let inner = strip_delimiters(raw, '{', '}')
        .or_else(|| strip_delimiters(raw, '"', '"'))
        .unwrap_or(raw);
    Some(normalize_whitespace(inner))
}

fn strip_delimiters(value: &str, open: char, close: char) -> Option<&str> {
    if !(value.starts_with(open) && value.ends_with(close)) {
        return None;
    }
    // A lone delimiter both opens and closes the value.
    Some(value.get(1..value.len() - 1).unwrap_or_default())
}

#[must_use]
/// Collapses every whitespace run to a single space and trims the ends.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
#[path = "../tests/bibtex.rs"]
mod tests;
