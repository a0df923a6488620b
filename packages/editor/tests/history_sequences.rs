//! Longer editing sequences through the host
//!
//! This tests:
//! - Typing, formatting and splitting followed by undo/redo chains
//! - History depth limits
//! - Whole-document replacement resetting history
//! - Document validity after every operation

use drafter_editor::{Command, EditorHost, Selection};
use drafter_schema::{DocumentBuilder, Mark, Node, Outline, Schema, SectionData, TextRun};

fn doc() -> Node {
    let outline = Outline {
        sections: vec![SectionData::new("Scope", vec!["Build it.".into()])],
    };
    DocumentBuilder::new("history").build_document(&outline)
}

// heading "Scope" content 2..7, paragraph "Build it." content 9..18

#[test]
fn test_typing_then_undo_all() {
    let mut host = EditorHost::new();
    let handle = host.initialize(Some(doc())).unwrap();
    let original = host.doc(handle).unwrap().clone();

    host.set_selection(handle, Selection::cursor(18)).unwrap();
    for word in [" Test", " it", "."] {
        assert!(host.run_command(handle, &Command::InsertText(word.into())).unwrap());
    }

    let para = host.doc(handle).unwrap().child(0).unwrap().child(1).unwrap();
    assert_eq!(para.text_content(), "Build it. Test it.");
    assert_eq!(host.state(handle).unwrap().history().undo_levels(), 3);

    while host.undo(handle).unwrap() {
        Schema::check(host.doc(handle).unwrap()).unwrap();
    }
    assert_eq!(host.doc(handle).unwrap(), &original);
    assert_eq!(host.state(handle).unwrap().history().redo_levels(), 3);
}

#[test]
fn test_undo_redo_round_trip() {
    let mut host = EditorHost::new();
    let handle = host.initialize(Some(doc())).unwrap();

    host.set_selection(handle, Selection::range(9, 14)).unwrap();
    host.run_command(handle, &Command::ToggleMark(Mark::Strong)).unwrap();
    host.set_selection(handle, Selection::cursor(14)).unwrap();
    host.run_command(handle, &Command::SplitBlock).unwrap();
    let edited = host.doc(handle).unwrap().clone();

    let section = edited.child(0).unwrap();
    assert_eq!(section.child_count(), 3);
    assert_eq!(section.child(1).unwrap().runs(), &[TextRun::marked("Build", [Mark::Strong])]);
    assert_eq!(section.child(2).unwrap().text_content(), " it.");

    assert!(host.handle_key(handle, "Mod-z").unwrap());
    assert!(host.handle_key(handle, "Mod-z").unwrap());
    assert_eq!(host.doc(handle).unwrap(), &doc());

    assert!(host.handle_key(handle, "Mod-y").unwrap());
    assert!(host.handle_key(handle, "Mod-Shift-z").unwrap());
    assert_eq!(host.doc(handle).unwrap(), &edited);
    assert!(!host.redo(handle).unwrap());
}

#[test]
fn test_new_edit_discards_redo() {
    let mut host = EditorHost::new();
    let handle = host.initialize(Some(doc())).unwrap();

    host.set_selection(handle, Selection::cursor(18)).unwrap();
    host.run_command(handle, &Command::InsertText("!".into())).unwrap();
    host.undo(handle).unwrap();
    assert!(host.state(handle).unwrap().history().can_redo());

    host.run_command(handle, &Command::InsertText("?".into())).unwrap();
    assert!(!host.state(handle).unwrap().history().can_redo());
}

#[test]
fn test_history_depth_limit() {
    let mut host = EditorHost::with_history_depth(2);
    let handle = host.initialize(Some(doc())).unwrap();

    host.set_selection(handle, Selection::cursor(18)).unwrap();
    for ch in ["a", "b", "c", "d"] {
        host.run_command(handle, &Command::InsertText(ch.into())).unwrap();
    }

    assert_eq!(host.state(handle).unwrap().history().undo_levels(), 2);
    host.undo(handle).unwrap();
    host.undo(handle).unwrap();
    assert!(!host.undo(handle).unwrap());

    let para = host.doc(handle).unwrap().child(0).unwrap().child(1).unwrap();
    assert_eq!(para.text_content(), "Build it.ab");
}

#[test]
fn test_replace_document_resets_history() {
    let mut host = EditorHost::new();
    let handle = host.initialize(Some(doc())).unwrap();

    host.set_selection(handle, Selection::cursor(18)).unwrap();
    host.run_command(handle, &Command::InsertText("!".into())).unwrap();

    let fresh = DocumentBuilder::new("fresh").build_document(&Outline {
        sections: vec![SectionData::new("New", vec!["Draft.".into()])],
    });
    let epoch = host.replace_document(handle, fresh.clone()).unwrap();

    assert_eq!(epoch, 1);
    assert!(!host.undo(handle).unwrap());
    assert_eq!(host.doc(handle).unwrap(), &fresh);
    assert_eq!(host.state(handle).unwrap().selection(), Selection::cursor(2));
}

#[test]
fn test_backspace_sequence_stays_valid() {
    let mut host = EditorHost::new();
    let handle = host.initialize(Some(doc())).unwrap();

    // split, then backspace enough to delete the split and more
    host.set_selection(handle, Selection::cursor(14)).unwrap();
    host.handle_key(handle, "Enter").unwrap();
    for _ in 0..3 {
        host.handle_key(handle, "Backspace").unwrap();
        Schema::check(host.doc(handle).unwrap()).unwrap();
    }

    let para = host.doc(handle).unwrap().child(0).unwrap().child(1).unwrap();
    assert_eq!(para.text_content(), "Bui it.");
}
