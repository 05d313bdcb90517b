use super::{DocumentSource, FileDocument, LineRange, OutlineProvider, Reveal, TextDocument};
use std::cell::Cell;
use std::fs;
use std::rc::Rc;
use tempfile::tempdir;

struct NoDocument;

impl DocumentSource for NoDocument {
    fn lines(&self) -> Option<Vec<String>> {
        None
    }
}

#[test]
fn test_children_follow_document() {
    let provider = OutlineProvider::new(TextDocument::new("# A\n## B\n# C\n"));
    let roots = provider.root_children();

    assert_eq!(roots.len(), 2);
    let nested = provider.children(Some(&roots[0]));
    assert_eq!(nested[0].label, "B");
    assert_eq!(provider.children(None), roots);
}

#[test]
fn test_no_document_yields_nothing() {
    let provider = OutlineProvider::new(NoDocument);
    assert!(provider.root_children().is_empty());
    assert!(provider.lines().is_empty());
}

#[test]
fn test_navigate_and_select() {
    let provider = OutlineProvider::new(TextDocument::new(
        "# Refs\n@book{k,\n title={T},\n}\ntrailing\n",
    ));
    let roots = provider.root_children();
    let entry = &provider.children(Some(&roots[0]))[0];

    assert_eq!(provider.navigate(entry), Reveal { line: 1 });
    let range = provider.select(entry);
    assert_eq!(range, LineRange { start: 1, end: 4 });
    assert_eq!(range.text(&provider.lines()), "@book{k,\n title={T},\n}");
}

#[test]
fn test_range_text_is_clamped() {
    let lines = vec!["a".to_string(), "b".to_string()];
    assert_eq!(LineRange { start: 1, end: 9 }.text(&lines), "b");
    assert_eq!(LineRange { start: 5, end: 9 }.text(&lines), "");
}

#[test]
fn test_notify_changed_reaches_subscribers() {
    let mut provider = OutlineProvider::new(TextDocument::new("# A\n"));
    let calls = Rc::new(Cell::new(0));

    let counter = Rc::clone(&calls);
    let id = provider.subscribe(move || counter.set(counter.get() + 1));

    provider.source_mut().set_text("# A\n# B\n");
    provider.notify_changed();
    assert_eq!(calls.get(), 1);
    assert_eq!(provider.root_children().len(), 2);

    assert!(provider.unsubscribe(id));
    assert!(!provider.unsubscribe(id));
    provider.notify_changed();
    assert_eq!(calls.get(), 1);
}

#[test]
fn test_file_document_rereads() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("notes.md");
    fs::write(&path, "# One\n").unwrap();

    let provider = OutlineProvider::new(FileDocument::new(&path));
    assert_eq!(provider.root_children()[0].label, "One");

    fs::write(&path, "# Two\n").unwrap();
    assert_eq!(provider.root_children()[0].label, "Two");

    fs::remove_file(&path).unwrap();
    assert!(provider.root_children().is_empty());
}
