//! Workspace workflow integration tests.

use crate::helpers::{TestWorkspaceBuilder, sample};
use spaceboard::error::{FocusError, InteractionError, RegistryError, WorkspaceError};
use spaceboard::types::{DragMode, Vec2};
use spaceboard::workspace::Workspace;
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn test_empty_workspace() {
    let workspace = Workspace::new();
    assert_eq!(workspace.active_canvas(), None);
    assert_eq!(workspace.canvases().count(), 0);
    assert!(matches!(
        Workspace::new().add_note("x", "", Vec2::ZERO),
        Err(RegistryError::NoActiveCanvas)
    ));
}

#[test]
fn test_canvas_lifecycle() {
    let mut workspace = Workspace::new();
    let home = workspace.create_canvas("Home");
    let work = workspace.create_canvas("Work");

    assert_eq!(workspace.active_canvas(), Some(home));
    workspace.rename_canvas(work, "Office").unwrap();
    assert_eq!(
        workspace.canvases().map(|(_, t)| t).collect::<Vec<_>>(),
        vec!["Home", "Office"]
    );

    workspace.reorder_canvases(0, 1).unwrap();
    assert_eq!(
        workspace.canvases().map(|(id, _)| id).collect::<Vec<_>>(),
        vec![work, home]
    );

    workspace.remove_canvas(home).unwrap();
    assert_eq!(workspace.active_canvas(), Some(work));
}

#[test]
fn test_notes_and_hit_testing() {
    let (mut workspace, notes) = TestWorkspaceBuilder::new()
        .with_canvas("Board")
        .with_note("A", (100.0, 100.0))
        .with_note("B", (400.0, 100.0))
        .build();

    let hits = workspace.notes_at(110.0, 110.0);
    assert_eq!(hits, vec![notes[0]]);
    assert!(workspace.notes_at(50.0, 500.0).is_empty());

    // Switching canvases swaps the hit-test population
    let other = workspace.create_canvas("Other");
    workspace.set_active_canvas(other).unwrap();
    assert!(workspace.notes_at(110.0, 110.0).is_empty());
}

#[test]
fn test_trash_and_recover_through_workspace() {
    let (mut workspace, notes) = TestWorkspaceBuilder::new()
        .with_canvas("Board")
        .with_note("Keep", (100.0, 100.0))
        .with_note("Toss", (400.0, 100.0))
        .build();

    workspace.trash_note(notes[1]).unwrap();
    assert!(workspace.note(notes[1]).is_none());
    assert!(workspace.notes_at(410.0, 110.0).is_empty());

    let (canvas, recovered) = workspace.recover_note().unwrap();
    assert_eq!(Some(canvas), workspace.active_canvas());
    assert_eq!(workspace.note(recovered).unwrap().title, "Toss");
    // Recovered notes are hit-testable again
    assert_eq!(workspace.notes_at(410.0, 110.0), vec![recovered]);
}

#[test]
fn test_focus_commit_updates_note_and_releases_drag() {
    let (mut workspace, notes) = TestWorkspaceBuilder::new()
        .with_canvas("Board")
        .with_note("Original", (100.0, 100.0))
        .build();
    let note = notes[0];

    let mut session = workspace.focus_note(note).unwrap();

    // Drags are suppressed while focused
    let before = workspace.note(note).unwrap().position;
    workspace.drag_start(note, sample(110.0, 110.0, 0.0)).unwrap();
    workspace.drag_move(note, sample(500.0, 500.0, 0.016)).unwrap();
    assert_eq!(workspace.note(note).unwrap().position, before);
    assert!(workspace.engine().is_idle());

    workspace.edit_title(&mut session, "X");
    workspace.edit_body(&mut session, "updated");
    workspace.commit_focus(session).unwrap();

    let committed = workspace.note(note).unwrap();
    assert_eq!(committed.title, "X");
    assert_eq!(committed.body, "updated");
    assert!(!committed.focused);

    // Suppression is released: the note drags again
    workspace.drag_start(note, sample(110.0, 110.0, 0.0)).unwrap();
    assert!(workspace.engine().state().is_dragging());
    workspace.drag_end(note).unwrap();
}

#[test]
fn test_focus_cancel_keeps_original() {
    let (mut workspace, notes) = TestWorkspaceBuilder::new()
        .with_canvas("Board")
        .with_note("Original", (100.0, 100.0))
        .build();

    let mut session = workspace.focus_note(notes[0]).unwrap();
    workspace.edit_title(&mut session, "Scratch");
    workspace.cancel_focus(session).unwrap();
    assert_eq!(workspace.note(notes[0]).unwrap().title, "Original");
}

#[test]
fn test_double_focus_rejected() {
    let (mut workspace, notes) = TestWorkspaceBuilder::new()
        .with_canvas("Board")
        .with_note("One", (100.0, 100.0))
        .build();

    let session = workspace.focus_note(notes[0]).unwrap();
    assert_eq!(
        workspace.focus_note(notes[0]).unwrap_err(),
        WorkspaceError::Focus(FocusError::AlreadyFocused(notes[0]))
    );
    workspace.cancel_focus(session).unwrap();
}

#[test]
fn test_title_edits_stream_to_workspace_listener() {
    let (mut workspace, notes) = TestWorkspaceBuilder::new()
        .with_canvas("Board")
        .with_note("Label", (100.0, 100.0))
        .build();

    let seen: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    workspace.on_title_changed(move |title| sink.borrow_mut().push(title.to_string()));

    let mut session = workspace.focus_note(notes[0]).unwrap();
    workspace.edit_title(&mut session, "La");
    workspace.edit_title(&mut session, "Lab");
    workspace.commit_focus(session).unwrap();

    assert_eq!(*seen.borrow(), vec!["La", "Lab"]);
}

#[test]
fn test_commit_lands_after_canvas_switch() {
    let (mut workspace, notes) = TestWorkspaceBuilder::new()
        .with_canvas("Board")
        .with_note("Here", (100.0, 100.0))
        .build();

    let mut session = workspace.focus_note(notes[0]).unwrap();
    let elsewhere = workspace.create_canvas("Elsewhere");
    workspace.set_active_canvas(elsewhere).unwrap();

    workspace.edit_title(&mut session, "Still lands");
    workspace.commit_focus(session).unwrap();

    let (first, _) = workspace.canvases().next().map(|(id, t)| (id, t.to_string())).unwrap();
    workspace.set_active_canvas(first).unwrap();
    assert_eq!(workspace.note(notes[0]).unwrap().title, "Still lands");
}

#[test]
fn test_mode_change_rejected_while_dragging_via_workspace() {
    let (mut workspace, notes) = TestWorkspaceBuilder::new()
        .with_canvas("Board")
        .with_note("One", (100.0, 100.0))
        .build();
    let note = notes[0];

    workspace.set_drag_mode(note, DragMode::FreeSliding).unwrap();
    workspace.drag_start(note, sample(110.0, 110.0, 0.0)).unwrap();
    assert_eq!(
        workspace.set_drag_mode(note, DragMode::Animated).unwrap_err(),
        WorkspaceError::Interaction(InteractionError::Rejected)
    );
    workspace.drag_end(note).unwrap();
}
