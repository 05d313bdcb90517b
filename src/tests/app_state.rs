use super::{is_preview_key, AppState, FileMode, View};
use ratatui::crossterm::event::KeyCode;
use std::fs;
use std::io::Write;
use tempfile::{tempdir, NamedTempFile};

const NOTES: &str = "\
# Reading
@book{knuth,
  title = {Literate Programming},
}
## Papers
@article{turing, title = {On Computable Numbers}}
# Notes
plain text
";

fn notes_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{NOTES}").unwrap();
    file
}

fn labels(app: &AppState) -> Vec<&str> {
    app.rows.iter().map(|r| r.node.label.as_str()).collect()
}

#[test]
fn test_rows_fully_expanded() {
    let file = notes_file();
    let app = AppState::new(vec![file.path().to_path_buf()], true);

    assert_eq!(app.file_mode, FileMode::Single);
    assert_eq!(app.current_view, View::List);
    assert_eq!(labels(&app), vec!["Reading", "knuth", "Papers", "turing", "Notes"]);
    let levels: Vec<usize> = app.rows.iter().map(|r| r.tree_level).collect();
    assert_eq!(levels, vec![0, 1, 1, 2, 0]);
}

#[test]
fn test_rows_start_collapsed() {
    let file = notes_file();
    let mut app = AppState::new(vec![file.path().to_path_buf()], false);

    assert_eq!(labels(&app), vec!["Reading", "Notes"]);

    assert!(app.expand_current());
    assert_eq!(labels(&app), vec!["Reading", "knuth", "Papers", "Notes"]);
    assert!(!app.expand_current(), "Already expanded");
}

#[test]
fn test_collapse_then_parent() {
    let file = notes_file();
    let mut app = AppState::new(vec![file.path().to_path_buf()], true);

    // Select "turing" and walk back up the tree
    app.current_row_index = 3;
    assert_eq!(app.breadcrumb(), vec!["Reading", "Papers", "turing"]);

    app.collapse_current();
    assert_eq!(app.current_row_index, 2, "Leaf moves to its parent");

    app.collapse_current();
    assert_eq!(labels(&app), vec!["Reading", "knuth", "Papers", "Notes"]);
    assert_eq!(app.current_row_index, 2, "Header collapses in place");

    app.collapse_current();
    assert_eq!(app.current_row_index, 0);
}

#[test]
fn test_select_stops_at_edges() {
    let file = notes_file();
    let mut app = AppState::new(vec![file.path().to_path_buf()], false);

    app.select_prev();
    assert_eq!(app.current_row_index, 0);
    app.select_next();
    app.select_next();
    assert_eq!(app.current_row_index, 1);
}

#[test]
fn test_detail_view_shows_selection() {
    let file = notes_file();
    let mut app = AppState::new(vec![file.path().to_path_buf()], true);

    app.current_row_index = 1;
    app.enter_detail_view();

    assert_eq!(app.current_view, View::Detail);
    let range = app.selection.unwrap();
    assert_eq!((range.start, range.end), (1, 4));
    assert_eq!(app.reveal.unwrap().line, 1);

    let text: Vec<String> = app
        .editor_state
        .as_ref()
        .unwrap()
        .lines
        .iter_row()
        .map(|line| line.iter().collect::<String>())
        .collect();
    assert_eq!(text[0], "@book{knuth,");
    assert_eq!(text[2], "}");

    app.exit_detail_view();
    assert_eq!(app.current_view, View::List);
    assert!(app.editor_state.is_none());
}

#[test]
fn test_refresh_picks_up_edits() {
    let file = notes_file();
    let mut app = AppState::new(vec![file.path().to_path_buf()], true);

    fs::write(file.path(), "# Only\n").unwrap();
    app.sync();
    assert_eq!(app.rows.len(), 5, "No rebuild without a change signal");

    app.refresh();
    assert_eq!(labels(&app), vec!["Only"]);
    assert_eq!(app.message.as_deref(), Some("Refreshed"));
}

#[test]
fn test_multi_file_mode() {
    let dir = tempdir().unwrap();
    let first = dir.path().join("first.md");
    let second = dir.path().join("second.md");
    fs::write(&first, "# First\n").unwrap();
    fs::write(&second, "# Second\n## Sub\n").unwrap();

    let mut app = AppState::new(vec![first, second], true);
    assert_eq!(app.file_mode, FileMode::Multi);
    assert_eq!(app.current_view, View::FileList);
    assert_eq!(labels(&app), vec!["First"]);

    app.open_file(1);
    assert_eq!(app.current_view, View::List);
    assert_eq!(app.current_file_name(), "second.md");
    assert_eq!(labels(&app), vec!["Second", "Sub"]);
    assert_eq!(app.line_count(), 2);
}

#[test]
fn test_expansion_reuses_snapshot() {
    let file = notes_file();
    let path = file.path().to_path_buf();
    let mut app = AppState::new(vec![path.clone()], false);
    assert_eq!(app.line_count(), 8);

    // Without a change signal the outline must not go back to disk
    fs::remove_file(&path).unwrap();

    assert!(app.expand_current());
    assert_eq!(labels(&app), vec!["Reading", "knuth", "Papers", "Notes"]);

    app.current_row_index = 2;
    assert!(app.expand_current());
    assert_eq!(
        labels(&app),
        vec!["Reading", "knuth", "Papers", "turing", "Notes"]
    );
    assert_eq!(app.line_count(), 8);
}

#[test]
fn test_detail_view_uses_snapshot() {
    let file = notes_file();
    let mut app = AppState::new(vec![file.path().to_path_buf()], true);

    fs::write(file.path(), "# Rewritten\n").unwrap();
    app.current_row_index = 1;
    app.enter_detail_view();

    let first_line: String = app
        .editor_state
        .as_ref()
        .unwrap()
        .lines
        .iter_row()
        .next()
        .unwrap()
        .iter()
        .collect();
    assert_eq!(first_line, "@book{knuth,");
    assert_eq!(app.line_count(), 8);

    app.exit_detail_view();
    app.refresh();
    assert_eq!(labels(&app), vec!["Rewritten"]);
    assert_eq!(app.line_count(), 1);
}

#[test]
fn test_preview_keys_never_edit() {
    for code in [KeyCode::Up, KeyCode::PageDown, KeyCode::Esc, KeyCode::Char('j')] {
        assert!(is_preview_key(code), "{code:?} should move the cursor");
    }
    assert!(is_preview_key(KeyCode::Char('v')));
    assert!(is_preview_key(KeyCode::Char('y')));

    for c in ['i', 'a', 'o', 'x', 'd', 'p', 'u', 'r'] {
        assert!(!is_preview_key(KeyCode::Char(c)), "'{c}' would edit");
    }
    assert!(!is_preview_key(KeyCode::Enter));
    assert!(!is_preview_key(KeyCode::Backspace));
}
