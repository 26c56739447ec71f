//! Drag state machine - unified state for note drag interactions.
//!
//! This module replaces scattered "is dragging"/"is settling" flags with a
//! single explicit state machine, making impossible states unrepresentable.
//!
//! ## State Transitions
//!
//! ```text
//! Idle     -> Dragging    (drag-start; mode fixed for the session)
//! Dragging -> Dragging    (drag-move: position update, velocity sample)
//! Dragging -> Idle        (drag-end in Animated mode)
//! Dragging -> Settling    (drag-end in FreeSliding*, carrying velocity)
//! Settling -> Settling    (simulation tick above rest thresholds)
//! Settling -> Idle        (velocity and support conditions satisfied)
//! Settling -> Dragging    (drag-move interrupts the settle)
//! ```

use crate::types::{DragMode, NoteId, PointerSample, Vec2};

/// Unified state for one note drag session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    /// No active drag session
    Idle,

    /// A pointer is dragging a note
    Dragging {
        /// Physics mode, fixed for the duration of this session
        mode: DragMode,
        /// Note being dragged
        note: NoteId,
        /// Offset from the note's top-left corner to the pointer
        grab_offset: Vec2,
        /// Most recent pointer sample, for velocity deltas
        last_sample: PointerSample,
        /// Smoothed drag velocity (zero in Animated mode)
        velocity: Vec2,
    },

    /// Released note still moving under the mode's physics
    Settling {
        mode: DragMode,
        note: NoteId,
        velocity: Vec2,
    },
}

impl Default for DragState {
    fn default() -> Self {
        Self::Idle
    }
}

impl DragState {
    /// Returns true if no session is active
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Returns true while a pointer holds the note
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }

    /// Returns true while release physics are still running
    pub fn is_settling(&self) -> bool {
        matches!(self, Self::Settling { .. })
    }

    /// The session's note, if a session is active
    pub fn note(&self) -> Option<NoteId> {
        match self {
            Self::Idle => None,
            Self::Dragging { note, .. } | Self::Settling { note, .. } => Some(*note),
        }
    }

    /// The session's drag mode, if a session is active
    pub fn mode(&self) -> Option<DragMode> {
        match self {
            Self::Idle => None,
            Self::Dragging { mode, .. } | Self::Settling { mode, .. } => Some(*mode),
        }
    }

    /// Current session velocity, if a session is active
    pub fn velocity(&self) -> Option<Vec2> {
        match self {
            Self::Idle => None,
            Self::Dragging { velocity, .. } | Self::Settling { velocity, .. } => Some(*velocity),
        }
    }

    /// Reset to Idle, dropping any session state
    pub fn reset(&mut self) {
        *self = Self::Idle;
    }
}
