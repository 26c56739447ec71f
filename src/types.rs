//! Core types for the spaceboard canvas system.
//!
//! This module defines the fundamental data structures used throughout the
//! crate: stable identifiers, canvas geometry, notes, and the drag-mode
//! selection.

use crate::constants::DEFAULT_NOTE_SIZE;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub};

// ============================================================================
// Identifiers
// ============================================================================

/// Stable identifier for a canvas.
///
/// Minted monotonically by the registry and never reused, even after the
/// canvas is removed. Display order is tracked separately, so a `CanvasId`
/// carries no positional meaning.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanvasId(pub u64);

impl fmt::Display for CanvasId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier for a note, scoped to its owning canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(pub u64);

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Geometry
// ============================================================================

/// 2D vector in canvas coordinates. Positive y points down.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Linear blend toward `other` by `t` (0.0 keeps self, 1.0 takes other).
    pub fn lerp(self, other: Vec2, t: f32) -> Vec2 {
        self + (other - self) * t
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl From<(f32, f32)> for Vec2 {
    fn from(value: (f32, f32)) -> Self {
        Vec2::new(value.0, value.1)
    }
}

/// The rectangular arena a canvas's notes live in. Origin is the top-left
/// corner; settle physics clamps notes inside it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CanvasBounds {
    pub width: f32,
    pub height: f32,
}

impl Default for CanvasBounds {
    fn default() -> Self {
        let (width, height) = crate::constants::DEFAULT_CANVAS_SIZE;
        Self { width, height }
    }
}

/// Axis-aligned bounding box of a note.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NoteBounds {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl NoteBounds {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            min_x: position.x,
            min_y: position.y,
            max_x: position.x + size.x,
            max_y: position.y + size.y,
        }
    }

    #[inline]
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    #[inline]
    pub fn intersects(&self, other: &NoteBounds) -> bool {
        self.min_x <= other.max_x
            && self.max_x >= other.min_x
            && self.min_y <= other.max_y
            && self.max_y >= other.min_y
    }
}

// ============================================================================
// Drag Modes
// ============================================================================

/// Physics behavior applied to a note while dragged and after release.
///
/// The mode is fixed for the duration of a drag session; it may only be
/// changed between sessions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragMode {
    /// Position steps toward the pointer in discrete interpolated
    /// increments; release retains no velocity.
    #[default]
    Animated,
    /// Velocity is tracked during the drag; on release the note keeps
    /// sliding under friction until it comes to rest.
    FreeSliding,
    /// As `FreeSliding`, plus constant downward acceleration until the
    /// note lands on the canvas floor or on another note.
    FreeSlidingWithGravity,
}

/// One pointer event as seen by the interaction engine: where and when.
///
/// Timestamps are monotonic seconds with an arbitrary origin; only the
/// differences between consecutive samples matter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    pub position: Vec2,
    pub timestamp: f64,
}

impl PointerSample {
    pub fn at(position: Vec2, timestamp: f64) -> Self {
        Self {
            position,
            timestamp,
        }
    }
}

// ============================================================================
// Notes
// ============================================================================

/// A positioned text item belonging to exactly one canvas.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// Identifier, scoped to the owning canvas
    pub id: NoteId,
    /// Owning canvas (weak back-reference; does not keep the canvas alive)
    pub canvas_id: CanvasId,
    /// Top-left corner in canvas coordinates
    pub position: Vec2,
    /// Width and height in canvas units
    pub size: Vec2,
    pub title: String,
    pub body: String,
    /// Physics applied to the next drag session on this note
    pub drag_mode: DragMode,
    /// Set while a focus session holds the note; drag events are
    /// suppressed for its duration. Not persisted.
    #[serde(skip)]
    pub focused: bool,
}

impl Note {
    pub fn new(
        id: NoteId,
        canvas_id: CanvasId,
        title: impl Into<String>,
        body: impl Into<String>,
        position: Vec2,
    ) -> Self {
        Self {
            id,
            canvas_id,
            position,
            size: DEFAULT_NOTE_SIZE.into(),
            title: title.into(),
            body: body.into(),
            drag_mode: DragMode::default(),
            focused: false,
        }
    }

    pub fn bounds(&self) -> NoteBounds {
        NoteBounds::new(self.position, self.size)
    }
}
