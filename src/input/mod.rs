//! Note drag interaction - state machine, event handling, settle physics.
//!
//! The engine processes discrete pointer events (drag-start, drag-move,
//! drag-end) and periodic simulation ticks on one logical thread. An
//! explicit state machine (`DragState`) tracks the session; impossible
//! combinations (settling while dragging, velocity without a session) are
//! unrepresentable.
//!
//! ## Modules
//!
//! - `state` - Drag state machine enum and helper methods
//! - `engine` - Event handlers driving the transitions
//! - `physics` - Pure settle-step math (friction, gravity, rest detection)

pub mod engine;
pub mod physics;
pub mod state;

pub use engine::{InteractionEngine, TickOutcome};
pub use state::DragState;
