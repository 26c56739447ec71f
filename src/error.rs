//! Error types for registry, interaction, and focus operations.
//!
//! Every failure here is an ordinary result value; callers decide whether
//! to surface it. Out-of-order input events (a drag-end while idle, a
//! duplicate pointer sample) are benign no-ops, not errors.

use crate::types::{CanvasId, NoteId};
use thiserror::Error;

/// Errors from canvas registry operations
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryError {
    /// No canvas with this id exists
    #[error("unknown canvas id {0}")]
    NotFound(CanvasId),

    /// No such note on the given canvas
    #[error("unknown note id {note} on canvas {canvas}")]
    NoteNotFound { canvas: CanvasId, note: NoteId },

    /// A reorder index is outside the current canvas count
    #[error("reorder index {index} out of range (count {count})")]
    OutOfRange { index: usize, count: usize },

    /// The operation needs an active canvas and none is selected
    #[error("no active canvas")]
    NoActiveCanvas,
}

/// Result type alias for registry operations
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Errors from the interaction engine
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionError {
    /// Mode changes are only accepted while the engine is idle; the
    /// active session keeps its mode until it finishes.
    #[error("drag session active, mode change rejected")]
    Rejected,
}

/// Errors from the focus coordinator
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusError {
    /// The note already has an active focus session
    #[error("note {0} is already focused")]
    AlreadyFocused(NoteId),

    /// No such note
    #[error("unknown note id {0}")]
    NotFound(NoteId),

    /// The session does not match the coordinator's record for the note
    #[error("focus session is stale")]
    StaleSession,
}

/// Union of component errors, returned by the workspace façade.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkspaceError {
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    Interaction(#[from] InteractionError),
    #[error(transparent)]
    Focus(#[from] FocusError),
}

/// Result type alias for workspace operations
pub type WorkspaceResult<T> = Result<T, WorkspaceError>;
