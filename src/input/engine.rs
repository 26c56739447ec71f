//! Note interaction engine - drives the drag state machine.
//!
//! Event handlers mirror the platform's pointer callbacks: drag-start,
//! drag-move, drag-end, plus a periodic tick that advances settle physics.
//! Events for a note are processed in arrival order on one thread; a
//! drag-end while idle is a benign no-op, and a drag-move while settling
//! interrupts the settle and starts a fresh session.

use crate::error::InteractionError;
use crate::input::physics::{self, SettleStep};
use crate::input::state::DragState;
use crate::profile_scope;
use crate::settings::PhysicsSettings;
use crate::spatial_index::SpatialIndex;
use crate::types::{CanvasBounds, DragMode, Note, NoteId, PointerSample, Vec2};
use crate::constants::MIN_SAMPLE_DT;

/// What a simulation tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The engine was not settling this note; nothing happened
    Ignored,
    /// The note moved and is still settling
    Settling,
    /// The note came to rest; the engine is idle again
    Rested,
}

/// Drag-mode state machine for notes.
///
/// One session at a time: the engine tracks a single note from drag-start
/// through settle. Physics parameters are captured at session start, so a
/// settings reload never alters a session in flight.
#[derive(Debug, Default)]
pub struct InteractionEngine {
    state: DragState,
    physics: PhysicsSettings,
}

impl InteractionEngine {
    pub fn new(physics: PhysicsSettings) -> Self {
        Self {
            state: DragState::Idle,
            physics,
        }
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    /// Note of the active session, if any
    pub fn current_note(&self) -> Option<NoteId> {
        self.state.note()
    }

    pub fn is_idle(&self) -> bool {
        self.state.is_idle()
    }

    pub fn physics(&self) -> &PhysicsSettings {
        &self.physics
    }

    /// Replace the physics tuning used by subsequent sessions. Call while
    /// idle; an active session keeps the parameters it started with.
    pub fn set_physics(&mut self, physics: PhysicsSettings) {
        self.physics = physics;
    }

    /// Abandon the active session, if any.
    pub fn reset(&mut self) {
        self.state.reset();
    }

    /// Change a note's drag mode. Only accepted while the engine is idle;
    /// the active session always finishes in the mode it started with.
    pub fn set_mode(&mut self, note: &mut Note, mode: DragMode) -> Result<(), InteractionError> {
        if !self.state.is_idle() {
            return Err(InteractionError::Rejected);
        }
        note.drag_mode = mode;
        Ok(())
    }

    /// Begin a drag session on `note`. Interrupts any session in
    /// progress; its velocity is discarded. Suppressed while the note is
    /// held by a focus session.
    pub fn drag_start(&mut self, note: &mut Note, sample: PointerSample) {
        if note.focused {
            tracing::trace!(note = %note.id, "drag suppressed: note is focused");
            return;
        }
        if !self.state.is_idle() {
            tracing::debug!(
                previous = ?self.state.note(),
                "drag-start interrupts active session"
            );
        }
        self.state = DragState::Dragging {
            mode: note.drag_mode,
            note: note.id,
            grab_offset: sample.position - note.position,
            last_sample: sample,
            velocity: Vec2::ZERO,
        };
    }

    /// Process a drag-move. A move without a matching session (idle, or
    /// settling from a previous release) starts a fresh drag.
    pub fn drag_move(&mut self, note: &mut Note, sample: PointerSample) {
        if note.focused {
            return;
        }
        let engaged = matches!(
            &self.state,
            DragState::Dragging { note: id, .. } if *id == note.id
        );
        if !engaged {
            self.drag_start(note, sample);
            return;
        }
        let animated_follow = self.physics.animated_follow;
        let smoothing = self.physics.velocity_smoothing;
        let DragState::Dragging {
            mode,
            grab_offset,
            last_sample,
            velocity,
            ..
        } = &mut self.state
        else {
            return;
        };
        let target = sample.position - *grab_offset;
        match mode {
            DragMode::Animated => {
                note.position = note.position.lerp(target, animated_follow);
            }
            DragMode::FreeSliding | DragMode::FreeSlidingWithGravity => {
                let dt = (sample.timestamp - last_sample.timestamp) as f32;
                let previous = note.position;
                note.position = target;
                if dt > MIN_SAMPLE_DT {
                    let instant = (note.position - previous) * (1.0 / dt);
                    *velocity = velocity.lerp(instant, smoothing);
                }
            }
        }
        *last_sample = sample;
    }

    /// End the drag session on `note`. Animated releases go straight to
    /// idle with no residual velocity; the free modes enter settling with
    /// the last sampled velocity. A drag-end without a session is a no-op.
    pub fn drag_end(&mut self, note: &mut Note) {
        let DragState::Dragging {
            mode,
            note: id,
            velocity,
            ..
        } = self.state
        else {
            return;
        };
        if id != note.id {
            return;
        }
        match mode {
            DragMode::Animated => {
                self.state = DragState::Idle;
            }
            DragMode::FreeSliding | DragMode::FreeSlidingWithGravity => {
                let velocity = physics::clamp_speed(velocity, self.physics.max_release_speed);
                tracing::debug!(
                    note = %id,
                    speed = velocity.length(),
                    ?mode,
                    "release, settling"
                );
                self.state = DragState::Settling {
                    mode,
                    note: id,
                    velocity,
                };
            }
        }
    }

    /// Advance settle physics by `dt` seconds. Only meaningful while the
    /// engine is settling `note`; any other state ignores the tick.
    pub fn tick(
        &mut self,
        note: &mut Note,
        dt: f32,
        arena: CanvasBounds,
        obstacles: &SpatialIndex,
    ) -> TickOutcome {
        if dt <= 0.0 {
            return TickOutcome::Ignored;
        }
        let DragState::Settling {
            mode,
            note: id,
            velocity,
        } = self.state
        else {
            return TickOutcome::Ignored;
        };
        if id != note.id {
            return TickOutcome::Ignored;
        }
        profile_scope!("settle_tick");
        let SettleStep {
            position,
            velocity,
            at_rest,
        } = physics::step_settle(
            mode,
            id,
            note.position,
            note.size,
            velocity,
            dt,
            arena,
            obstacles,
            &self.physics,
        );
        note.position = position;
        if at_rest {
            self.state = DragState::Idle;
            tracing::debug!(note = %id, "settle complete");
            TickOutcome::Rested
        } else {
            self.state = DragState::Settling {
                mode,
                note: id,
                velocity,
            };
            TickOutcome::Settling
        }
    }
}
