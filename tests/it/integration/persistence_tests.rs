//! Persisted-layout integration tests: capture, restore, and identity
//! preservation across the save/load boundary.

use spaceboard::persist::WorkspaceSnapshot;
use spaceboard::settings::{self, Settings};
use spaceboard::types::Vec2;
use spaceboard::workspace::Workspace;

#[test]
fn test_snapshot_round_trip_preserves_order_and_identity() {
    let mut workspace = Workspace::new();
    let cs = workspace.create_canvas("Computer Science");
    let bio = workspace.create_canvas("Biology");
    let acct = workspace.create_canvas("Accounting");
    workspace.reorder_canvases(0, 2).unwrap();
    workspace.set_active_canvas(bio).unwrap();

    let snapshot = workspace.snapshot();
    let json = serde_json::to_string(&snapshot).unwrap();
    let reloaded: WorkspaceSnapshot = serde_json::from_str(&json).unwrap();

    let restored = Workspace::restore(&reloaded, settings::shared(Settings::default()));
    assert_eq!(
        restored.canvases().collect::<Vec<_>>(),
        vec![
            (bio, "Biology"),
            (acct, "Accounting"),
            (cs, "Computer Science"),
        ]
    );
    assert_eq!(restored.active_canvas(), Some(bio));
}

#[test]
fn test_restored_workspace_mints_past_persisted_ids() {
    let mut workspace = Workspace::new();
    let a = workspace.create_canvas("A");
    let b = workspace.create_canvas("B");
    workspace.remove_canvas(a).unwrap();

    let snapshot = workspace.snapshot();
    let mut restored = Workspace::restore(&snapshot, settings::shared(Settings::default()));
    let fresh = restored.create_canvas("C");
    assert!(fresh > b, "restored registry must mint past persisted ids");
    assert_ne!(fresh, a);
}

#[test]
fn test_trash_survives_snapshot() {
    let mut workspace = Workspace::new();
    workspace.create_canvas("Board");
    let note = workspace
        .add_note("Trashed later", "body", Vec2::new(50.0, 50.0))
        .unwrap();
    workspace.trash_note(note).unwrap();

    let snapshot = workspace.snapshot();
    assert_eq!(snapshot.trashed_notes.len(), 1);
    assert_eq!(snapshot.trashed_notes[0].note.title, "Trashed later");

    let mut restored = Workspace::restore(&snapshot, settings::shared(Settings::default()));
    let (_, recovered) = restored.recover_note().unwrap();
    assert_eq!(restored.note(recovered).unwrap().title, "Trashed later");
    assert_eq!(restored.snapshot().recovered_note, Some(recovered));
}

#[test]
fn test_misaligned_snapshot_is_tolerated() {
    let mut snapshot = WorkspaceSnapshot::default();
    snapshot.canvas_titles = vec!["One".into(), "Two".into(), "Orphan".into()];
    snapshot.canvas_title_ids = vec![
        spaceboard::types::CanvasId(1),
        spaceboard::types::CanvasId(2),
    ];
    snapshot.current_canvas_index = Some(0);

    let restored = Workspace::restore(&snapshot, settings::shared(Settings::default()));
    // The orphan title has no id and is dropped
    assert_eq!(restored.canvases().count(), 2);
}
