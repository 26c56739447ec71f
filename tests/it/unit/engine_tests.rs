//! Unit tests for the interaction engine's drag state machine.

use crate::helpers::{TICK, sample};
use spaceboard::error::InteractionError;
use spaceboard::input::{InteractionEngine, TickOutcome};
use spaceboard::settings::PhysicsSettings;
use spaceboard::spatial_index::SpatialIndex;
use spaceboard::types::{CanvasBounds, CanvasId, DragMode, Note, NoteId, Vec2};

fn engine() -> InteractionEngine {
    InteractionEngine::new(PhysicsSettings::default())
}

fn note(mode: DragMode) -> Note {
    let mut note = Note::new(
        NoteId(1),
        CanvasId(1),
        "Note",
        "",
        Vec2::new(200.0, 200.0),
    );
    note.drag_mode = mode;
    note
}

fn arena() -> CanvasBounds {
    CanvasBounds {
        width: 1024.0,
        height: 768.0,
    }
}

/// Drag the note rightwards at a steady 600 units/s and release.
fn fling_right(engine: &mut InteractionEngine, note: &mut Note) {
    engine.drag_start(note, sample(210.0, 210.0, 0.0));
    for i in 1..=10 {
        let t = i as f64 * TICK as f64;
        engine.drag_move(note, sample(210.0 + 10.0 * i as f32, 210.0, t));
    }
    engine.drag_end(note);
}

#[test]
fn test_starts_idle() {
    let engine = engine();
    assert!(engine.is_idle());
    assert_eq!(engine.current_note(), None);
}

#[test]
fn test_drag_start_fixes_mode_for_session() {
    let mut engine = engine();
    let mut note = note(DragMode::FreeSliding);
    engine.drag_start(&mut note, sample(210.0, 210.0, 0.0));
    assert!(engine.state().is_dragging());
    assert_eq!(engine.state().mode(), Some(DragMode::FreeSliding));
    assert_eq!(engine.current_note(), Some(note.id));
}

#[test]
fn test_animated_release_has_zero_residual_velocity() {
    let mut engine = engine();
    let mut note = note(DragMode::Animated);
    fling_right(&mut engine, &mut note);

    // Straight to idle, never settling
    assert!(engine.is_idle());
    let outcome = engine.tick(&mut note, TICK, arena(), &SpatialIndex::new());
    assert_eq!(outcome, TickOutcome::Ignored);
}

#[test]
fn test_animated_steps_toward_pointer() {
    let mut engine = engine();
    let mut note = note(DragMode::Animated);
    engine.drag_start(&mut note, sample(210.0, 210.0, 0.0));
    let before = note.position;
    engine.drag_move(&mut note, sample(310.0, 210.0, TICK as f64));
    let after = note.position;

    // Moved toward the target but not all the way there
    assert!(after.x > before.x);
    assert!(after.x < 300.0);
    assert_eq!(after.y, before.y);
}

#[test]
fn test_free_sliding_passes_through_settling_to_idle() {
    let mut engine = engine();
    let mut note = note(DragMode::FreeSliding);
    fling_right(&mut engine, &mut note);

    assert!(engine.state().is_settling());
    let velocity = engine.state().velocity().unwrap();
    assert!(velocity.x > 100.0, "release velocity should be sampled");

    let index = SpatialIndex::new();
    let mut ticks = 0;
    loop {
        match engine.tick(&mut note, TICK, arena(), &index) {
            TickOutcome::Settling => {
                ticks += 1;
                assert!(ticks < 1000, "settle never completed");
            }
            TickOutcome::Rested => break,
            TickOutcome::Ignored => panic!("tick ignored mid-settle"),
        }
    }
    assert!(engine.is_idle());
    assert!(note.position.x > 300.0, "note should keep sliding after release");
}

#[test]
fn test_drag_end_while_idle_is_noop() {
    let mut engine = engine();
    let mut note = note(DragMode::FreeSliding);
    engine.drag_end(&mut note);
    assert!(engine.is_idle());
}

#[test]
fn test_drag_move_while_settling_starts_new_session() {
    let mut engine = engine();
    let mut note = note(DragMode::FreeSliding);
    fling_right(&mut engine, &mut note);
    assert!(engine.state().is_settling());

    engine.drag_move(&mut note, sample(400.0, 300.0, 1.0));
    assert!(engine.state().is_dragging());
    // No stale velocity from the interrupted settle
    assert_eq!(engine.state().velocity(), Some(Vec2::ZERO));
}

#[test]
fn test_drag_move_while_idle_starts_session() {
    let mut engine = engine();
    let mut note = note(DragMode::FreeSliding);
    engine.drag_move(&mut note, sample(250.0, 250.0, 0.0));
    assert!(engine.state().is_dragging());
}

#[test]
fn test_mode_change_rejected_during_session() {
    let mut engine = engine();
    let mut note = note(DragMode::FreeSliding);
    engine.drag_start(&mut note, sample(210.0, 210.0, 0.0));

    assert_eq!(
        engine.set_mode(&mut note, DragMode::Animated),
        Err(InteractionError::Rejected)
    );
    // The session keeps its mode
    assert_eq!(engine.state().mode(), Some(DragMode::FreeSliding));
    assert_eq!(note.drag_mode, DragMode::FreeSliding);

    engine.drag_end(&mut note);
    assert!(engine.state().is_settling());
    assert_eq!(
        engine.set_mode(&mut note, DragMode::Animated),
        Err(InteractionError::Rejected)
    );
}

#[test]
fn test_mode_change_accepted_while_idle() {
    let mut engine = engine();
    let mut note = note(DragMode::FreeSliding);
    engine
        .set_mode(&mut note, DragMode::FreeSlidingWithGravity)
        .unwrap();
    assert_eq!(note.drag_mode, DragMode::FreeSlidingWithGravity);
}

#[test]
fn test_focused_note_suppresses_drag_events() {
    let mut engine = engine();
    let mut note = note(DragMode::FreeSliding);
    note.focused = true;

    let before = note.position;
    engine.drag_start(&mut note, sample(210.0, 210.0, 0.0));
    assert!(engine.is_idle());
    engine.drag_move(&mut note, sample(400.0, 400.0, TICK as f64));
    assert!(engine.is_idle());
    assert_eq!(note.position, before);
}

#[test]
fn test_duplicate_samples_are_tolerated() {
    let mut engine = engine();
    let mut note = note(DragMode::FreeSliding);
    engine.drag_start(&mut note, sample(210.0, 210.0, 0.0));
    // Same timestamp twice: the second sample must not divide by zero
    engine.drag_move(&mut note, sample(220.0, 210.0, 0.016));
    engine.drag_move(&mut note, sample(220.0, 210.0, 0.016));
    engine.drag_end(&mut note);
    let velocity = engine.state().velocity().unwrap();
    assert!(velocity.x.is_finite());
}

#[test]
fn test_release_speed_is_capped() {
    let mut engine = engine();
    let mut note = note(DragMode::FreeSliding);
    engine.drag_start(&mut note, sample(0.0, 0.0, 0.0));
    // One enormous jump in one tick
    engine.drag_move(&mut note, sample(9000.0, 0.0, TICK as f64));
    engine.drag_end(&mut note);

    let velocity = engine.state().velocity().unwrap();
    let max = PhysicsSettings::default().max_release_speed;
    assert!(velocity.length() <= max + 1e-3);
}
