//! The UI renders the application state into something visible and navigable.
//!
//! The draw function dispatches based on the current view (file list, outline or detail).
//! The outline view shows the header and entry tree using box-drawing characters.

use crate::app_state::{AppState, TreeRow, View};
use crate::formats::format_for;
use edtui::{EditorTheme, EditorView, SyntaxHighlighter};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Renders the active view based on current application state.
pub fn draw(f: &mut Frame, app: &mut AppState) {
    match app.current_view {
        View::FileList => draw_file_list(f, app),
        View::List => draw_list(f, app),
        View::Detail => draw_detail(f, app),
    }
}

/// Generate box-drawing prefix for tree structure
fn get_tree_prefix(level: usize, is_last: bool, parent_states: &[bool]) -> String {
    let mut prefix = String::new();

    // Draw vertical lines for ancestor levels that still have siblings below
    for i in 0..level {
        if parent_states.get(i).copied().unwrap_or(false) {
            prefix.push_str("│   ");
        } else {
            prefix.push_str("    ");
        }
    }

    if is_last {
        prefix.push_str("└── ");
    } else {
        prefix.push_str("├── ");
    }

    prefix
}

/// For each row, whether another row at the same level follows before the level closes.
fn last_at_level(rows: &[TreeRow]) -> Vec<bool> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            !rows[i + 1..]
                .iter()
                .take_while(|next| next.tree_level >= row.tree_level)
                .any(|next| next.tree_level == row.tree_level)
        })
        .collect()
}

fn draw_file_list(f: &mut Frame, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(f.area());

    let items: Vec<ListItem> = app
        .files
        .iter()
        .enumerate()
        .map(|(i, path)| {
            let style = if i == app.current_file_index {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(Span::styled(
                format!("📄 {}", path.display()),
                Style::default().fg(Color::Blue),
            )))
            .style(style)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("Files ({})", app.files.len())),
    );
    f.render_widget(list, chunks[0]);

    let help = Paragraph::new("↑/↓: Navigate | Enter: Open | q: Quit")
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[1]);
}

fn draw_list(f: &mut Frame, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(f.area());

    let is_last = last_at_level(&app.rows);

    // Track which ancestor levels still have siblings coming
    let mut parent_has_siblings: Vec<bool> = Vec::new();

    let items: Vec<ListItem> = app
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            parent_has_siblings.truncate(row.tree_level);
            let tree_prefix = get_tree_prefix(row.tree_level, is_last[i], &parent_has_siblings);
            parent_has_siblings.push(!is_last[i]);

            let mut spans = vec![Span::raw(tree_prefix)];
            let mut display = format_for(&row.node).format_node_display(&row.node, row.expanded);
            spans.append(&mut display.spans);

            let style = if i == app.current_row_index {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };

            ListItem::new(Line::from(spans)).style(style)
        })
        .collect();

    let title = if app.rows.is_empty() {
        format!("Outline: {} (empty)", app.current_file_name())
    } else {
        format!("Outline: {}", app.current_file_name())
    };

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(list, chunks[0]);

    let help_text = app.message.clone().unwrap_or_else(|| {
        "↑/↓: Navigate | ←/→: Collapse/Expand | Enter: Select | r: Refresh | q: Quit".to_string()
    });
    let help = Paragraph::new(help_text).block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[1]);
}

fn draw_detail(f: &mut Frame, app: &mut AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Breadcrumb
            Constraint::Min(0),    // Editor
            Constraint::Length(3), // Help
        ])
        .split(f.area());

    let breadcrumb = app.breadcrumb().join(" > ");
    let breadcrumb_widget =
        Paragraph::new(breadcrumb).block(Block::default().borders(Borders::ALL).title("Navigation"));
    f.render_widget(breadcrumb_widget, chunks[0]);

    let title = match (app.selection, app.reveal) {
        (Some(range), Some(reveal)) => format!(
            "Lines {}..{} of {} (revealed at {})",
            range.start,
            range.end,
            app.line_count(),
            reveal.line
        ),
        _ => "Selection".to_string(),
    };

    if let Some(ref mut editor_state) = app.editor_state {
        let block = Block::default().borders(Borders::ALL).title(title);
        let inner = block.inner(chunks[1]);
        f.render_widget(block, chunks[1]);

        let syntax_highlighter = SyntaxHighlighter::new("dracula", "md");
        let editor = EditorView::new(editor_state)
            .theme(EditorTheme::default())
            .syntax_highlighter(Some(syntax_highlighter))
            .wrap(true);

        f.render_widget(editor, inner);
    }

    let help = Paragraph::new("Read-only preview | ←/↓/↑/→ hjkl: Move | v: Visual | y: Copy | Esc: Back to outline")
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[2]);
}
