//! The core state machine bridging the document outline and the interactive viewer.
//!
//! A TUI needs a single source of truth that can be interrogated and mutated as the user
//! navigates. The outline is never stored as a tree: it is flattened into visible rows by
//! listing one level at a time from a snapshot of the document lines. The snapshot is only
//! re-read when the provider signals that the document changed, so every node on screen
//! comes from the same text.

use crate::node::OutlineNode;
use crate::outline;
use crate::provider::{FileDocument, LineRange, OutlineProvider, Reveal};
use edtui::{EditorState, Lines};
use ratatui::crossterm::event::KeyCode;
use std::cell::Cell;
use std::collections::HashSet;
use std::path::PathBuf;
use std::rc::Rc;
use tracing::debug;

#[derive(PartialEq, Debug)]
/// Determines navigation scope and quit behavior based on project size.
pub enum FileMode {
    /// Single-file mode quits directly to shell.
    Single,
    /// Multi-file mode returns to file list before quitting.
    Multi,
}

#[derive(PartialEq, Debug)]
/// Determines which UI screen renders and how input is interpreted.
pub enum View {
    /// Displays available files for multi-file projects.
    FileList,
    /// Shows the outline tree with navigation.
    List,
    /// Shows the selected node's lines in an editor.
    Detail,
}

#[derive(Clone, Debug)]
/// One visible line of the outline panel.
pub struct TreeRow {
    /// The outline node shown on this row.
    pub node: OutlineNode,
    /// Nesting below the document root (0 for top-level nodes).
    pub tree_level: usize,
    /// Whether the node's children are currently listed below it.
    pub expanded: bool,
}

/// Bridges the outline provider and the terminal UI, maintaining session state.
pub struct AppState {
    /// File paths available in multi-file mode.
    pub files: Vec<PathBuf>,
    /// Selected file in the file list view.
    pub current_file_index: usize,
    /// Controls navigation behavior and file list visibility.
    pub file_mode: FileMode,
    /// Active UI screen determining input handling.
    pub current_view: View,
    /// Outline source for the open file.
    pub provider: OutlineProvider<FileDocument>,
    /// Visible outline rows in display order.
    pub rows: Vec<TreeRow>,
    /// Selected row in the outline view.
    pub current_row_index: usize,
    /// Editor buffer content when detail view is active.
    pub editor_state: Option<EditorState>,
    /// Range shown in the detail view.
    pub selection: Option<LineRange>,
    /// Line the host view was asked to reveal.
    pub reveal: Option<Reveal>,
    /// Status feedback displayed in the help bar.
    pub message: Option<String>,
    /// Whether headers start expanded.
    pub expand_headers: bool,
    /// Document lines every visible row was extracted from.
    pub lines: Vec<String>,
    /// Headers toggled away from the default expansion, keyed by start line.
    toggled: HashSet<usize>,
    stale: Rc<Cell<bool>>,
}

impl AppState {
    #[must_use]
    /// Initialises application state and determines file mode.
    ///
    /// Single-file projects open the outline straight away, while multi-file projects
    /// show a file selector first and return to it on 'q'.
    ///
    /// # Panics
    ///
    /// Panics if `files` is empty.
    pub fn new(files: Vec<PathBuf>, expand_headers: bool) -> Self {
        let file_mode = if files.len() == 1 {
            FileMode::Single
        } else {
            FileMode::Multi
        };
        let current_view = match file_mode {
            FileMode::Single => View::List,
            FileMode::Multi => View::FileList,
        };

        let stale = Rc::new(Cell::new(true));
        let provider = Self::watch(FileDocument::new(files[0].clone()), &stale);

        let mut app = Self {
            files,
            current_file_index: 0,
            file_mode,
            current_view,
            provider,
            rows: Vec::new(),
            current_row_index: 0,
            editor_state: None,
            selection: None,
            reveal: None,
            message: None,
            expand_headers,
            lines: Vec::new(),
            toggled: HashSet::new(),
            stale,
        };
        app.sync();
        app
    }

    fn watch(document: FileDocument, stale: &Rc<Cell<bool>>) -> OutlineProvider<FileDocument> {
        let mut provider = OutlineProvider::new(document);
        let flag = Rc::clone(stale);
        provider.subscribe(move || flag.set(true));
        provider
    }

    /// Switches the outline to the file at `index` and shows the outline view.
    pub fn open_file(&mut self, index: usize) {
        let Some(path) = self.files.get(index).cloned() else {
            return;
        };
        self.current_file_index = index;
        self.stale = Rc::new(Cell::new(true));
        self.provider = Self::watch(FileDocument::new(path), &self.stale);
        self.toggled.clear();
        self.current_row_index = 0;
        self.sync();
        if self.file_mode == FileMode::Multi {
            self.current_view = View::List;
        }
    }

    /// Re-reads the document if the provider has signalled a change.
    pub fn sync(&mut self) {
        if !self.stale.replace(false) {
            return;
        }
        self.lines = self.provider.lines();
        self.rebuild_rows();
    }

    /// Flattens the outline of the current snapshot into visible rows.
    fn rebuild_rows(&mut self) {
        let mut rows = Vec::new();
        self.collect_rows(None, 0, &mut rows);
        debug!(rows = rows.len(), lines = self.lines.len(), "outline rebuilt");
        self.rows = rows;
        self.current_row_index = self.current_row_index.min(self.rows.len().saturating_sub(1));
    }

    fn collect_rows(&self, parent: Option<&OutlineNode>, tree_level: usize, rows: &mut Vec<TreeRow>) {
        for node in outline::children(parent, &self.lines) {
            let expanded = node.expandable && self.is_expanded(&node);
            rows.push(TreeRow {
                node: node.clone(),
                tree_level,
                expanded,
            });
            if expanded {
                self.collect_rows(Some(&node), tree_level + 1, rows);
            }
        }
    }

    fn is_expanded(&self, node: &OutlineNode) -> bool {
        self.expand_headers != self.toggled.contains(&node.line_start)
    }

    /// Re-reads the document and notifies subscribers so the outline is rebuilt.
    pub fn refresh(&mut self) {
        self.provider.notify_changed();
        self.sync();
        self.message = Some("Refreshed".to_string());
    }

    #[must_use]
    /// The selected outline row, if any.
    pub fn current_row(&self) -> Option<&TreeRow> {
        self.rows.get(self.current_row_index)
    }

    /// Moves the selection up one row.
    pub fn select_prev(&mut self) {
        self.current_row_index = self.current_row_index.saturating_sub(1);
    }

    /// Moves the selection down one row.
    pub fn select_next(&mut self) {
        if self.current_row_index + 1 < self.rows.len() {
            self.current_row_index += 1;
        }
    }

    #[must_use]
    /// Index of the row holding the selected row's parent.
    pub fn navigate_to_parent(&self) -> Option<usize> {
        let level = self.current_row()?.tree_level;
        (0..self.current_row_index)
            .rev()
            .find(|&i| self.rows[i].tree_level < level)
    }

    /// Shows the children of the selected header. Returns false if nothing changed.
    pub fn expand_current(&mut self) -> bool {
        self.set_current_expanded(true)
    }

    /// Hides the children of the selected header, or moves to its parent when there is
    /// nothing to hide.
    pub fn collapse_current(&mut self) {
        if !self.set_current_expanded(false) {
            if let Some(parent) = self.navigate_to_parent() {
                self.current_row_index = parent;
            }
        }
    }

    fn set_current_expanded(&mut self, expanded: bool) -> bool {
        let Some(row) = self.current_row() else {
            return false;
        };
        if !row.node.expandable || row.expanded == expanded {
            return false;
        }
        let line_start = row.node.line_start;
        if !self.toggled.remove(&line_start) {
            self.toggled.insert(line_start);
        }
        self.rebuild_rows();
        true
    }

    #[must_use]
    /// Labels of the selected row and its ancestors, outermost first.
    pub fn breadcrumb(&self) -> Vec<String> {
        let mut parts = Vec::new();
        let mut index = Some(self.current_row_index);
        while let Some(i) = index {
            let Some(row) = self.rows.get(i) else {
                break;
            };
            parts.push(row.node.label.clone());
            index = (0..i).rev().find(|&j| self.rows[j].tree_level < row.tree_level);
        }
        parts.reverse();
        parts
    }

    /// Selects the current node's line range and loads it into the editor.
    pub fn enter_detail_view(&mut self) {
        let Some(node) = self.current_row().map(|row| row.node.clone()) else {
            return;
        };
        let range = self.provider.select(&node);
        let text = range.text(&self.lines);

        self.reveal = Some(self.provider.navigate(&node));
        self.selection = Some(range);
        self.editor_state = Some(EditorState::new(Lines::from(text.as_str())));
        self.current_view = View::Detail;
    }

    /// Returns to the outline view.
    pub fn exit_detail_view(&mut self) {
        self.editor_state = None;
        self.selection = None;
        self.current_view = View::List;
    }

    #[must_use]
    /// Name of the open file for display.
    pub fn current_file_name(&self) -> String {
        self.files
            .get(self.current_file_index)
            .and_then(|path| path.file_name())
            .map_or_else(String::new, |name| name.to_string_lossy().to_string())
    }

    #[must_use]
    /// Total number of lines in the current snapshot.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

#[must_use]
/// Whether a key may reach the detail editor, which only previews the selection.
///
/// Movement, visual selection and yank pass through; anything that would edit the
/// buffer is dropped, since changes there are never written back.
pub fn is_preview_key(code: KeyCode) -> bool {
    match code {
        KeyCode::Up
        | KeyCode::Down
        | KeyCode::Left
        | KeyCode::Right
        | KeyCode::Home
        | KeyCode::End
        | KeyCode::PageUp
        | KeyCode::PageDown
        | KeyCode::Esc => true,
        KeyCode::Char(c) => "hjklwbe0$gGvVy".contains(c),
        _ => false,
    }
}

#[cfg(test)]
#[path = "tests/app_state.rs"]
mod tests;
