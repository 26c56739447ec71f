//! Pure settle-step math: friction decay, gravity, and rest detection.
//!
//! Everything here is a function of its inputs; the engine owns the state
//! transitions. Positions are clamped into the canvas arena, and a clamped
//! axis loses its velocity component so notes slide along edges instead of
//! pressing into them.

use crate::constants::SUPPORT_EPSILON;
use crate::settings::PhysicsSettings;
use crate::spatial_index::SpatialIndex;
use crate::types::{CanvasBounds, DragMode, NoteBounds, NoteId, Vec2};

/// Result of advancing one settle tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SettleStep {
    pub position: Vec2,
    pub velocity: Vec2,
    pub at_rest: bool,
}

/// Exponential velocity decay over `dt` seconds.
pub fn decay(velocity: Vec2, friction: f32, dt: f32) -> Vec2 {
    velocity * (-friction * dt).exp()
}

/// Scale `velocity` down to `max_speed` when it exceeds it.
pub fn clamp_speed(velocity: Vec2, max_speed: f32) -> Vec2 {
    let speed = velocity.length();
    if speed > max_speed && speed > 0.0 {
        velocity * (max_speed / speed)
    } else {
        velocity
    }
}

fn clamp_axis(value: f32, size: f32, extent: f32) -> (f32, bool) {
    if value < 0.0 {
        (0.0, true)
    } else if value + size > extent {
        ((extent - size).max(0.0), true)
    } else {
        (value, false)
    }
}

/// Advance one simulation tick of a settling note.
///
/// `obstacles` holds the bounds of every note on the canvas, including the
/// settling note itself, which is excluded by id.
pub fn step_settle(
    mode: DragMode,
    note_id: NoteId,
    position: Vec2,
    size: Vec2,
    velocity: Vec2,
    dt: f32,
    arena: CanvasBounds,
    obstacles: &SpatialIndex,
    physics: &PhysicsSettings,
) -> SettleStep {
    match mode {
        // Animated never enters Settling; release is immediate.
        DragMode::Animated => SettleStep {
            position,
            velocity: Vec2::ZERO,
            at_rest: true,
        },
        DragMode::FreeSliding => {
            let mut v = decay(velocity, physics.slide_friction, dt);
            let mut p = position + v * dt;
            let (x, hit_x) = clamp_axis(p.x, size.x, arena.width);
            let (y, hit_y) = clamp_axis(p.y, size.y, arena.height);
            p = Vec2::new(x, y);
            if hit_x {
                v.x = 0.0;
            }
            if hit_y {
                v.y = 0.0;
            }
            let at_rest = v.length() < physics.rest_speed;
            SettleStep {
                position: p,
                velocity: if at_rest { Vec2::ZERO } else { v },
                at_rest,
            }
        }
        DragMode::FreeSlidingWithGravity => {
            let mut v = decay(velocity, physics.slide_friction, dt);
            v.y += physics.gravity * dt;
            let start = NoteBounds::new(position, size);
            let mut p = position + v * dt;
            let mut supported = false;

            // Landing on another note, checked only while moving down
            if v.y > 0.0 {
                let drop = (p.y - position.y).max(0.0) + SUPPORT_EPSILON;
                if let Some(top) = obstacles.support_below(note_id, &start, drop) {
                    if p.y + size.y >= top {
                        p.y = top - size.y;
                        v.y = 0.0;
                        supported = true;
                    }
                }
            }

            // Canvas floor
            if p.y + size.y >= arena.height {
                p.y = (arena.height - size.y).max(0.0);
                v.y = 0.0;
                supported = true;
            }
            if p.y < 0.0 {
                p.y = 0.0;
                v.y = v.y.max(0.0);
            }
            let (x, hit_x) = clamp_axis(p.x, size.x, arena.width);
            p.x = x;
            if hit_x {
                v.x = 0.0;
            }

            let at_rest = supported && v.length() < physics.rest_speed;
            SettleStep {
                position: p,
                velocity: if at_rest { Vec2::ZERO } else { v },
                at_rest,
            }
        }
    }
}
