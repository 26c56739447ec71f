//! Application-wide constants.
//!
//! Centralizes magic numbers and tuning values to make the codebase
//! more maintainable and self-documenting. The physics values here are
//! defaults; the effective values come from `settings::Settings`.

// ============================================================================
// Canvas Defaults
// ============================================================================

/// Default canvas arena size (width, height) in canvas units
pub const DEFAULT_CANVAS_SIZE: (f32, f32) = (1024.0, 768.0);

/// Default note size (width, height) in canvas units
pub const DEFAULT_NOTE_SIZE: (f32, f32) = (180.0, 140.0);

// ============================================================================
// Drag & Settle Physics
// ============================================================================

/// Fraction of the remaining distance an Animated-mode note covers per
/// drag-move event
pub const ANIMATED_FOLLOW_RATE: f32 = 0.45;

/// Low-pass blend factor for velocity sampling during free drags
/// (1.0 = trust only the newest sample)
pub const VELOCITY_SMOOTHING: f32 = 0.6;

/// Exponential friction coefficient applied during settle, in 1/s
pub const SLIDE_FRICTION: f32 = 4.0;

/// Downward acceleration for gravity-mode settling, in canvas units/s^2
pub const GRAVITY_ACCEL: f32 = 1200.0;

/// Speed below which a settling note is considered at rest, in units/s
pub const REST_SPEED: f32 = 12.0;

/// Cap on release velocity carried into a settle, in units/s
pub const MAX_RELEASE_SPEED: f32 = 4000.0;

/// Nominal simulation tick length in seconds (60 Hz)
pub const SIMULATION_TICK_SECONDS: f32 = 1.0 / 60.0;

/// Pointer samples closer together than this are folded into one
/// (duplicate-event tolerance), in seconds
pub const MIN_SAMPLE_DT: f32 = 1e-4;

/// Contact tolerance for rest-support detection, in canvas units
pub const SUPPORT_EPSILON: f32 = 0.5;

// ============================================================================
// Settings
// ============================================================================

/// File name of the settings JSON inside the platform config directory
pub const SETTINGS_FILE_NAME: &str = "spaceboard.json";
